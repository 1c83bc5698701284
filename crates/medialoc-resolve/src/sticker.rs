//! Sticker document inspection.

use medialoc_core::types::{Document, DocumentAttribute, InputStickerSet};

/// MIME type of vector-animated (lottie) stickers
pub const ANIMATED_STICKER_MIME: &str = "application/x-tgsticker";

/// Sticker set the document belongs to, if one can be addressed.
///
/// Looks at the first sticker or custom-emoji attribute; an empty set reference counts as none.
pub fn input_sticker_set(document: &Document) -> Option<&InputStickerSet> {
    document
        .attributes
        .iter()
        .find_map(|attr| match attr {
            DocumentAttribute::Sticker { stickerset, .. }
            | DocumentAttribute::CustomEmoji { stickerset, .. } => Some(stickerset.as_ref()),
            _ => None,
        })
        .flatten()
        .filter(|set| !set.is_empty())
}

pub fn is_animated_sticker(document: &Document) -> bool {
    document.mime_type == ANIMATED_STICKER_MIME && input_sticker_set(document).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sticker_with(set: Option<InputStickerSet>, mime: &str) -> Document {
        Document {
            id: 10,
            mime_type: mime.into(),
            attributes: vec![
                DocumentAttribute::ImageSize {
                    width: 512,
                    height: 512,
                },
                DocumentAttribute::Sticker {
                    alt: "🙂".into(),
                    stickerset: set,
                    mask: false,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn finds_set_after_other_attributes() {
        let doc = sticker_with(
            Some(InputStickerSet::ShortName {
                short_name: "cats".into(),
            }),
            "image/webp",
        );
        assert_eq!(
            input_sticker_set(&doc),
            Some(&InputStickerSet::ShortName {
                short_name: "cats".into()
            })
        );
    }

    #[test]
    fn empty_or_missing_set_is_none() {
        let empty = sticker_with(Some(InputStickerSet::Empty), "image/webp");
        assert!(input_sticker_set(&empty).is_none());
        assert!(input_sticker_set(&sticker_with(None, "image/webp")).is_none());
        assert!(input_sticker_set(&Document::default()).is_none());
    }

    #[test]
    fn custom_emoji_sets_count() {
        let doc = Document {
            attributes: vec![DocumentAttribute::CustomEmoji {
                alt: String::new(),
                stickerset: Some(InputStickerSet::Id {
                    id: 5,
                    access_hash: 6,
                }),
                free: true,
            }],
            ..Default::default()
        };
        assert!(input_sticker_set(&doc).is_some());
    }

    #[test]
    fn animated_needs_mime_and_set() {
        let set = InputStickerSet::Id {
            id: 1,
            access_hash: 2,
        };
        assert!(is_animated_sticker(&sticker_with(Some(set.clone()), ANIMATED_STICKER_MIME)));
        assert!(!is_animated_sticker(&sticker_with(Some(set), "image/webp")));
        assert!(!is_animated_sticker(&sticker_with(None, ANIMATED_STICKER_MIME)));
    }
}
