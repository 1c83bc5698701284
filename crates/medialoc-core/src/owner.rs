//! Owning entities: what a media item is attached to.
//!
//! Callers build these at the point where they already know the concrete kind
//! of the owner, so nothing downstream inspects types at runtime.

use serde::{Deserialize, Serialize};

use crate::types::{Document, InputPeer, InputStickerSet, Photo};

/// The higher-level object a media item belongs to, used to disambiguate cache keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OwnerContext {
    /// Link preview embedding the media
    WebPage {
        id: i64,
        #[serde(default)]
        url: String,
    },
    Message { dialog_id: i64, message_id: i32 },
    Peer { peer: InputPeer },
    StickerSet { set: InputStickerSet },
    #[default]
    None,
}

impl OwnerContext {
    pub fn is_web_page(&self) -> bool {
        matches!(self, OwnerContext::WebPage { .. })
    }
}

/// The media object a size variant was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaOwner {
    Photo(Photo),
    Document(Document),
    /// Any owner without a remote-file resolution path
    Other,
}
