//! The canonical resolved location and its cheap derived queries.

use serde::{Deserialize, Serialize};

use medialoc_core::types::{FileCoordinates, InputPeer, InputStickerSet, SecureDocument};

/// Where a media item's bytes live, normalized from any source descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedLocation {
    /// Bytes already on local disk; nothing to fetch
    LocalPath { path: String },
    SecureDocument(SecureDocument),
    RemoteFile(RemoteFile),
    /// Inline low-resolution preview carried by the descriptor itself
    StrippedPreview { label: String, bytes: Vec<u8> },
    WebFile { url: String, size: u64 },
}

/// Discriminant of [`ResolvedLocation`], for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    LocalPath,
    SecureDocument,
    RemoteFile,
    StrippedPreview,
    WebFile,
}

/// Which constructor produced a [`RemoteFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// A whole document; addressed by document id, no coordinates
    Document,
    /// Normalized coordinates with reference and credentials from the owner
    Normalized,
    /// Coordinates synthesized from the older raw form
    Legacy,
    /// Raw coordinates of an already-downloaded file
    LocalCache,
}

/// Symmetric key material for end-to-end encrypted files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encryption {
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
}

impl Encryption {
    /// `None` unless `key` is non-empty.
    pub fn from_parts(key: &[u8], iv: &[u8]) -> Option<Self> {
        if key.is_empty() {
            return None;
        }
        Some(Encryption {
            key: key.to_vec(),
            iv: iv.to_vec(),
        })
    }
}

/// What a remote file belongs to; decides how the fetch layer addresses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteOwner {
    Photo { photo_id: i64 },
    Document { document_id: i64 },
    /// User or chat avatar
    Peer { peer: InputPeer, big: bool },
    StickerSet { set: InputStickerSet },
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub origin: Origin,
    pub dc_id: i32,
    pub coordinates: Option<FileCoordinates>,
    pub file_reference: Vec<u8>,
    pub access_hash: i64,
    pub encryption: Option<Encryption>,
    /// Declared size; a hint, not a guarantee
    pub size: u64,
    pub owner: RemoteOwner,
    pub thumb_size: Option<String>,
    /// Vector-animation sticker thumbnail
    pub lottie_animation: bool,
}

impl ResolvedLocation {
    pub fn kind(&self) -> LocationKind {
        match self {
            ResolvedLocation::LocalPath { .. } => LocationKind::LocalPath,
            ResolvedLocation::SecureDocument(_) => LocationKind::SecureDocument,
            ResolvedLocation::RemoteFile(_) => LocationKind::RemoteFile,
            ResolvedLocation::StrippedPreview { .. } => LocationKind::StrippedPreview,
            ResolvedLocation::WebFile { .. } => LocationKind::WebFile,
        }
    }

    pub fn remote(&self) -> Option<&RemoteFile> {
        match self {
            ResolvedLocation::RemoteFile(remote) => Some(remote),
            _ => None,
        }
    }

    pub fn encryption(&self) -> Option<&Encryption> {
        self.remote().and_then(|r| r.encryption.as_ref())
    }

    /// True iff the bytes need decrypting with a key carried by the location.
    pub fn is_encrypted(&self) -> bool {
        self.encryption().is_some()
    }

    /// Best-known byte size, `0` when nothing is known.
    pub fn size(&self) -> u64 {
        match self {
            ResolvedLocation::StrippedPreview { bytes, .. } => bytes.len() as u64,
            ResolvedLocation::SecureDocument(doc) => doc.secure_file.size,
            ResolvedLocation::RemoteFile(remote) => remote.size,
            ResolvedLocation::WebFile { size, .. } => *size,
            ResolvedLocation::LocalPath { .. } => 0,
        }
    }

    /// Data-center id to fetch from; `0` for locations that are not fetched by coordinates.
    pub fn dc_id(&self) -> i32 {
        match self {
            ResolvedLocation::RemoteFile(remote) => remote.dc_id,
            ResolvedLocation::SecureDocument(doc) => doc.secure_file.dc_id,
            _ => 0,
        }
    }
}
