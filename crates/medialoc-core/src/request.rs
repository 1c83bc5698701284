//! JSON envelope naming one source descriptor to resolve.

use serde::{Deserialize, Serialize};

use crate::error::{MedialocError, MedialocResult};
use crate::owner::{MediaOwner, OwnerContext};
use crate::types::{Chat, Document, FileLocation, Photo, PhotoSize, SecureDocument, User, WebFile};

/// A source descriptor plus the owner context used when deriving its cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    #[serde(flatten)]
    pub source: Source,
    #[serde(default)]
    pub owner: OwnerContext,
}

/// One variant per normalizer entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Source {
    Path {
        path: Option<String>,
    },
    SecureDocument {
        document: Option<SecureDocument>,
    },
    Document {
        document: Option<Document>,
    },
    WebFile {
        file: Option<WebFile>,
    },
    Photo {
        size: Option<PhotoSize>,
        photo: Option<Photo>,
    },
    DocumentThumb {
        size: Option<PhotoSize>,
        document: Option<Document>,
    },
    Sticker {
        size: Option<PhotoSize>,
        sticker: Option<Document>,
    },
    /// Size variant of a photo or document, dispatched on the owner kind
    Object {
        size: Option<PhotoSize>,
        media: Option<MediaOwner>,
    },
    User {
        user: Option<User>,
        #[serde(default)]
        big: bool,
    },
    Chat {
        chat: Option<Chat>,
        #[serde(default)]
        big: bool,
    },
    Local {
        location: Option<FileLocation>,
    },
}

impl ResolveRequest {
    pub fn from_json(data: &[u8]) -> MedialocResult<Self> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(MedialocError::Descriptor("empty request".into()));
        }
        Ok(serde_json::from_slice(data)?)
    }

    pub fn to_json(&self) -> MedialocResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
