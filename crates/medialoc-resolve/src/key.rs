//! Cache-key derivation for resolved locations.
//!
//! A key names the underlying bytes, not the descriptor they were reached
//! through, so the same file resolved from two owners hits the same cache
//! entry. Stripped previews are the exception: they carry no id of their own
//! and are keyed through their owner instead.

use tracing::trace;

use medialoc_core::config::{KeyConfig, StrippedFallback};
use medialoc_core::owner::OwnerContext;
use medialoc_core::types::{
    Document, FileLocation, InputPeer, InputStickerSet, Photo, PhotoSize,
};

use crate::digest::{blake3_hex, md5_hex};
use crate::location::{Origin, RemoteOwner, ResolvedLocation};

/// Maps an owning entity to a stable string.
pub trait OwnerKeyResolver: Send + Sync {
    fn owner_key(&self, owner: &OwnerContext) -> String;
}

impl<F> OwnerKeyResolver for F
where
    F: Fn(&OwnerContext) -> String + Send + Sync,
{
    fn owner_key(&self, owner: &OwnerContext) -> String {
        self(owner)
    }
}

/// Prefix-per-kind owner keys: `webpage{id}`, `message{msg}_{dialog}`, `user{id}`, `chat{id}`,
/// `channel{id}`, `setid{id}`, `setname{short_name}`, `set_animated_emoji`, `set_dice{emoticon}`.
///
/// Every kind carries its own prefix so owners that share a numeric id never share a key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOwnerKeys;

impl OwnerKeyResolver for DefaultOwnerKeys {
    fn owner_key(&self, owner: &OwnerContext) -> String {
        match owner {
            OwnerContext::WebPage { id, .. } => format!("webpage{id}"),
            OwnerContext::Message {
                dialog_id,
                message_id,
            } => format!("message{message_id}_{dialog_id}"),
            OwnerContext::Peer { peer } => match peer {
                InputPeer::User { user_id, .. } => format!("user{user_id}"),
                InputPeer::Chat { chat_id } => format!("chat{chat_id}"),
                InputPeer::Channel { channel_id, .. } => format!("channel{channel_id}"),
            },
            OwnerContext::StickerSet { set } => match set {
                InputStickerSet::Id { id, .. } => format!("setid{id}"),
                InputStickerSet::ShortName { short_name } => format!("setname{short_name}"),
                InputStickerSet::AnimatedEmoji => "set_animated_emoji".into(),
                InputStickerSet::Dice { emoticon } => format!("set_dice{emoticon}"),
                InputStickerSet::Empty => "set".into(),
            },
            OwnerContext::None => String::new(),
        }
    }
}

/// The full-resolution sibling of a stripped preview, if the caller has one.
#[derive(Debug, Clone, Copy)]
pub enum FullObject<'a> {
    Location(&'a ResolvedLocation),
    Document(&'a Document),
    Photo(&'a Photo),
    PhotoSize(&'a PhotoSize),
    FileLocation(&'a FileLocation),
    Other,
}

/// What a full object boils down to for keying.
#[derive(Debug, PartialEq, Eq)]
enum Underlying {
    DocumentId(i64),
    PhotoId(i64),
    Coordinates { local_id: i32, volume_id: i64 },
    Unkeyed,
}

impl FullObject<'_> {
    fn underlying(&self) -> Underlying {
        match *self {
            FullObject::Location(location) => underlying_of_location(location),
            FullObject::Document(document) => Underlying::DocumentId(document.id),
            FullObject::Photo(photo) => Underlying::PhotoId(photo.id),
            FullObject::PhotoSize(size) => size
                .location()
                .map(coordinates_of)
                .unwrap_or(Underlying::Unkeyed),
            FullObject::FileLocation(location) => coordinates_of(location),
            FullObject::Other => Underlying::Unkeyed,
        }
    }
}

fn coordinates_of(location: &FileLocation) -> Underlying {
    let c = location.coordinates();
    Underlying::Coordinates {
        local_id: c.local_id,
        volume_id: c.volume_id,
    }
}

/// Most specific object behind a location: document, then photo size, then photo.
fn underlying_of_location(location: &ResolvedLocation) -> Underlying {
    match location {
        ResolvedLocation::RemoteFile(remote) => match (remote.origin, &remote.owner) {
            (Origin::Document, RemoteOwner::Document { document_id }) => {
                Underlying::DocumentId(*document_id)
            }
            (_, RemoteOwner::Photo { photo_id }) => Underlying::PhotoId(*photo_id),
            _ => Underlying::Unkeyed,
        },
        // a stripped size has no file location of its own
        _ => Underlying::Unkeyed,
    }
}

/// Derives cache keys; holds the owner-key collaborator and key settings.
#[derive(Debug, Clone, Default)]
pub struct KeyDeriver<R = DefaultOwnerKeys> {
    resolver: R,
    config: KeyConfig,
}

impl<R: OwnerKeyResolver> KeyDeriver<R> {
    pub fn new(resolver: R, config: KeyConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &KeyConfig {
        &self.config
    }

    /// Stable cache key for `location`, or `None` when it must not be looked up.
    ///
    /// `owner` and `full` only matter for stripped previews.
    pub fn cache_key(
        &self,
        location: Option<&ResolvedLocation>,
        owner: &OwnerContext,
        full: Option<&FullObject<'_>>,
    ) -> Option<String> {
        let Some(location) = location else {
            trace!("no location, no cache key");
            return None;
        };

        let (rule, key) = match location {
            ResolvedLocation::SecureDocument(document) => (
                "secure_document",
                Some(format!(
                    "{}_{}",
                    document.secure_file.dc_id, document.secure_file.id
                )),
            ),
            ResolvedLocation::StrippedPreview { bytes, .. } if !bytes.is_empty() => {
                ("stripped", Some(self.stripped_key(owner, full, bytes)))
            }
            ResolvedLocation::StrippedPreview { .. } => ("stripped_empty", None),
            ResolvedLocation::RemoteFile(remote) => match (&remote.coordinates, &remote.owner) {
                (Some(c), _) => ("coordinates", Some(format!("{}_{}", c.volume_id, c.local_id))),
                (None, RemoteOwner::Document { document_id })
                    if *document_id != 0 && remote.dc_id != 0 =>
                {
                    ("document", Some(format!("{}_{}", remote.dc_id, document_id)))
                }
                _ => ("remote_unkeyed", None),
            },
            ResolvedLocation::WebFile { url, .. } => ("web_file", Some(md5_hex(url))),
            ResolvedLocation::LocalPath { path } => ("local_path", Some(md5_hex(path))),
        };

        trace!(rule, kind = ?location.kind(), key = ?key, "cache key");
        key
    }

    /// Key for a stripped preview with inline `stripped` bytes.
    ///
    /// Only web-page owners disambiguate by the full-size sibling; every
    /// other owner shares one preview key.
    pub fn stripped_key(
        &self,
        owner: &OwnerContext,
        full: Option<&FullObject<'_>>,
        stripped: &[u8],
    ) -> String {
        let owner_key = self.resolver.owner_key(owner);
        if !owner.is_web_page() {
            return format!("stripped{owner_key}");
        }

        let Some(full) = full else {
            return format!("stripped{owner_key}_{}", self.fallback_suffix(stripped));
        };
        match full.underlying() {
            Underlying::DocumentId(id) | Underlying::PhotoId(id) => {
                format!("stripped{owner_key}_{id}")
            }
            Underlying::Coordinates {
                local_id,
                volume_id,
            } => format!("stripped{owner_key}_{local_id}_{volume_id}"),
            Underlying::Unkeyed => format!("stripped{owner_key}"),
        }
    }

    fn fallback_suffix(&self, stripped: &[u8]) -> String {
        match self.config.stripped_fallback {
            StrippedFallback::ContentHash => blake3_hex(stripped),
            StrippedFallback::Identity => format!("{:p}", stripped.as_ptr()),
        }
    }
}
