//! Source descriptors as they arrive off the wire.
//!
//! These mirror the loosely-typed media objects handed out by the messaging
//! layer. Byte fields use an empty `Vec` for "absent", numeric ids use `0`.

use serde::{Deserialize, Serialize};

/// Raw storage coordinates of a remote file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCoordinates {
    pub dc_id: i32,
    pub volume_id: i64,
    pub local_id: i32,
    pub secret: i64,
}

/// Raw coordinates in the older form, carrying their own reference and key material
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyFileLocation {
    #[serde(flatten)]
    pub coordinates: FileCoordinates,
    pub file_reference: Vec<u8>,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
}

/// A file location in one of its two on-wire forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FileLocation {
    /// Already-normalized coordinates; reference and credentials live on the owner
    Normalized(FileCoordinates),
    /// Older raw form
    Legacy(LegacyFileLocation),
}

impl FileLocation {
    pub fn coordinates(&self) -> &FileCoordinates {
        match self {
            FileLocation::Normalized(c) => c,
            FileLocation::Legacy(l) => &l.coordinates,
        }
    }

    pub fn dc_id(&self) -> i32 {
        self.coordinates().dc_id
    }
}

/// One size variant of a photo or a document thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhotoSize {
    /// Tiny inline preview; the bytes travel with the descriptor
    Stripped { label: String, bytes: Vec<u8> },
    /// A remotely stored size
    Sized {
        label: String,
        #[serde(default)]
        location: Option<FileLocation>,
        #[serde(default)]
        width: i32,
        #[serde(default)]
        height: i32,
        #[serde(default)]
        size: u64,
    },
    /// Vector outline, inline like `Stripped` but never used as a preview source
    Path { label: String, bytes: Vec<u8> },
    Empty { label: String },
}

impl PhotoSize {
    pub fn label(&self) -> &str {
        match self {
            PhotoSize::Stripped { label, .. }
            | PhotoSize::Sized { label, .. }
            | PhotoSize::Path { label, .. }
            | PhotoSize::Empty { label } => label,
        }
    }

    pub fn is_stripped(&self) -> bool {
        matches!(self, PhotoSize::Stripped { .. })
    }

    pub fn location(&self) -> Option<&FileLocation> {
        match self {
            PhotoSize::Sized { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    /// Declared byte size; inline variants report their payload length.
    pub fn size(&self) -> u64 {
        match self {
            PhotoSize::Sized { size, .. } => *size,
            PhotoSize::Stripped { bytes, .. } | PhotoSize::Path { bytes, .. } => bytes.len() as u64,
            PhotoSize::Empty { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub dc_id: i32,
    pub sizes: Vec<PhotoSize>,
}

/// Sticker set reference as carried by sticker attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputStickerSet {
    Empty,
    Id { id: i64, access_hash: i64 },
    ShortName { short_name: String },
    AnimatedEmoji,
    Dice { emoticon: String },
}

impl InputStickerSet {
    pub fn is_empty(&self) -> bool {
        matches!(self, InputStickerSet::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentAttribute {
    Sticker {
        #[serde(default)]
        alt: String,
        #[serde(default)]
        stickerset: Option<InputStickerSet>,
        #[serde(default)]
        mask: bool,
    },
    CustomEmoji {
        #[serde(default)]
        alt: String,
        #[serde(default)]
        stickerset: Option<InputStickerSet>,
        #[serde(default)]
        free: bool,
    },
    Filename { file_name: String },
    ImageSize { width: i32, height: i32 },
    Animated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub dc_id: i32,
    pub size: u64,
    pub mime_type: String,
    /// Symmetric key for end-to-end encrypted documents; empty otherwise
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    pub thumbs: Vec<PhotoSize>,
    pub attributes: Vec<DocumentAttribute>,
}

/// Storage descriptor of an uploaded identity-verification file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecureFile {
    pub id: i64,
    pub access_hash: i64,
    pub size: u64,
    pub dc_id: i32,
    pub file_hash: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecureDocument {
    pub secure_file: SecureFile,
    pub file_hash: Vec<u8>,
    pub file_secret: Vec<u8>,
}

/// Media addressed by URL rather than data-center coordinates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebFile {
    pub url: String,
    pub size: u64,
    pub mime_type: Option<String>,
}

/// Peer reference as used to request peer-owned files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputPeer {
    User { user_id: i64, access_hash: i64 },
    Chat { chat_id: i64 },
    Channel { channel_id: i64, access_hash: i64 },
}

impl InputPeer {
    pub fn id(&self) -> i64 {
        match self {
            InputPeer::User { user_id, .. } => *user_id,
            InputPeer::Chat { chat_id } => *chat_id,
            InputPeer::Channel { channel_id, .. } => *channel_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfilePhoto {
    pub photo_id: i64,
    pub dc_id: i32,
    pub photo_small: Option<FileLocation>,
    pub photo_big: Option<FileLocation>,
    pub stripped_thumb: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub access_hash: i64,
    pub photo: Option<UserProfilePhoto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPhoto {
    pub photo_id: i64,
    pub dc_id: i32,
    pub photo_small: Option<FileLocation>,
    pub photo_big: Option<FileLocation>,
    pub stripped_thumb: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    #[default]
    Group,
    GroupForbidden,
    Channel,
    ChannelForbidden,
}

impl ChatKind {
    pub fn is_channel(self) -> bool {
        matches!(self, ChatKind::Channel | ChatKind::ChannelForbidden)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chat {
    pub id: i64,
    pub access_hash: i64,
    pub kind: ChatKind,
    pub photo: Option<ChatPhoto>,
}

impl Chat {
    pub fn is_channel(&self) -> bool {
        self.kind.is_channel()
    }
}
