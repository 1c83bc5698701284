//! Source descriptor → [`ResolvedLocation`].
//!
//! Every entry point is total: a missing, zero, or otherwise unusable input
//! yields `None`, never a partially populated location. Stripped size variants
//! short-circuit to an inline preview before the owner is even looked at.
//!
//! Remote files come out of exactly two constructors, one per on-wire form of
//! the file coordinates:
//! - normalized: coordinates as-is, reference and credentials from the owner
//! - legacy: coordinates synthesized from the raw location, which also supplies
//!   the file reference, the access hash (its `secret`), and any key material

use tracing::trace;

use medialoc_core::owner::MediaOwner;
use medialoc_core::types::{
    Chat, Document, FileCoordinates, FileLocation, InputPeer, InputStickerSet, LegacyFileLocation,
    Photo, PhotoSize, SecureDocument, User, WebFile,
};

use crate::location::{Encryption, Origin, RemoteFile, RemoteOwner, ResolvedLocation};
use crate::sticker;

/// The entity a remote file hangs off; at least one is required to address it.
#[derive(Debug, Clone, Copy)]
enum Parent<'a> {
    Photo(&'a Photo),
    Document(&'a Document),
    Peer { peer: InputPeer, big: bool },
    StickerSet(&'a InputStickerSet),
}

impl Parent<'_> {
    fn owner(&self) -> RemoteOwner {
        match *self {
            Parent::Photo(photo) => RemoteOwner::Photo { photo_id: photo.id },
            Parent::Document(document) => RemoteOwner::Document {
                document_id: document.id,
            },
            Parent::Peer { peer, big } => RemoteOwner::Peer { peer, big },
            Parent::StickerSet(set) => RemoteOwner::StickerSet { set: set.clone() },
        }
    }
}

fn absent(reason: &'static str) -> Option<ResolvedLocation> {
    trace!(reason, "no location");
    None
}

/// The owner's data-center id wins unless it is unset.
fn resolve_dc(owner_dc: i32, coordinates_dc: i32) -> i32 {
    if owner_dc != 0 {
        owner_dc
    } else {
        coordinates_dc
    }
}

fn remote_file(
    location: &FileLocation,
    size: u64,
    parent: Parent<'_>,
    owner_dc: i32,
    thumb_size: Option<&str>,
) -> RemoteFile {
    let dc_id = resolve_dc(owner_dc, location.dc_id());
    match location {
        FileLocation::Normalized(coordinates) => {
            remote_from_normalized(coordinates, size, parent, dc_id, thumb_size)
        }
        FileLocation::Legacy(raw) => remote_from_legacy(raw, size, parent, dc_id),
    }
}

fn remote_from_normalized(
    coordinates: &FileCoordinates,
    size: u64,
    parent: Parent<'_>,
    dc_id: i32,
    thumb_size: Option<&str>,
) -> RemoteFile {
    let (file_reference, access_hash, thumb_size) = match parent {
        Parent::Photo(photo) => (
            photo.file_reference.clone(),
            photo.access_hash,
            thumb_size.map(str::to_owned),
        ),
        Parent::Document(document) => (
            document.file_reference.clone(),
            document.access_hash,
            thumb_size.map(str::to_owned),
        ),
        Parent::Peer { .. } | Parent::StickerSet(_) => (Vec::new(), 0, None),
    };

    RemoteFile {
        origin: Origin::Normalized,
        dc_id,
        coordinates: Some(*coordinates),
        file_reference,
        access_hash,
        encryption: None,
        size,
        owner: parent.owner(),
        thumb_size,
        lottie_animation: false,
    }
}

fn remote_from_legacy(
    raw: &LegacyFileLocation,
    size: u64,
    parent: Parent<'_>,
    dc_id: i32,
) -> RemoteFile {
    RemoteFile {
        origin: Origin::Legacy,
        dc_id,
        coordinates: Some(raw.coordinates),
        file_reference: raw.file_reference.clone(),
        // the raw secret doubles as the access credential on this path
        access_hash: raw.coordinates.secret,
        encryption: Encryption::from_parts(&raw.key, &raw.iv),
        size,
        owner: parent.owner(),
        thumb_size: None,
        lottie_animation: false,
    }
}

fn stripped_preview(size: &PhotoSize) -> Option<ResolvedLocation> {
    match size {
        PhotoSize::Stripped { label, bytes } => Some(ResolvedLocation::StrippedPreview {
            label: label.clone(),
            bytes: bytes.clone(),
        }),
        _ => None,
    }
}

/// Local file path; empty paths do not resolve.
pub fn for_path(path: Option<&str>) -> Option<ResolvedLocation> {
    match path {
        Some(path) if !path.is_empty() => Some(ResolvedLocation::LocalPath {
            path: path.to_owned(),
        }),
        _ => absent("no local path"),
    }
}

pub fn for_secure_document(document: Option<&SecureDocument>) -> Option<ResolvedLocation> {
    match document {
        Some(document) => Some(ResolvedLocation::SecureDocument(document.clone())),
        None => absent("no secure document"),
    }
}

/// A whole document, addressed by its id on its own data center.
pub fn for_document(document: Option<&Document>) -> Option<ResolvedLocation> {
    let Some(document) = document else {
        return absent("no document");
    };
    Some(ResolvedLocation::RemoteFile(RemoteFile {
        origin: Origin::Document,
        dc_id: document.dc_id,
        coordinates: None,
        file_reference: document.file_reference.clone(),
        access_hash: document.access_hash,
        encryption: Encryption::from_parts(&document.key, &document.iv),
        size: document.size,
        owner: RemoteOwner::Document {
            document_id: document.id,
        },
        thumb_size: None,
        lottie_animation: false,
    }))
}

pub fn for_web_file(file: Option<&WebFile>) -> Option<ResolvedLocation> {
    match file {
        Some(file) => Some(ResolvedLocation::WebFile {
            url: file.url.clone(),
            size: file.size,
        }),
        None => absent("no web file"),
    }
}

/// One size variant of a photo.
pub fn for_photo(size: Option<&PhotoSize>, photo: Option<&Photo>) -> Option<ResolvedLocation> {
    if let Some(preview) = size.and_then(stripped_preview) {
        return Some(preview);
    }
    let (Some(size), Some(photo)) = (size, photo) else {
        return absent("photo size or photo missing");
    };
    let Some(location) = size.location() else {
        return absent("photo size has no file location");
    };
    Some(ResolvedLocation::RemoteFile(remote_file(
        location,
        size.size(),
        Parent::Photo(photo),
        photo.dc_id,
        Some(size.label()),
    )))
}

/// One thumbnail variant of a document.
pub fn for_document_thumb(
    size: Option<&PhotoSize>,
    document: Option<&Document>,
) -> Option<ResolvedLocation> {
    if let Some(preview) = size.and_then(stripped_preview) {
        return Some(preview);
    }
    let (Some(size), Some(document)) = (size, document) else {
        return absent("thumb size or document missing");
    };
    let Some(location) = size.location() else {
        return absent("thumb size has no file location");
    };
    Some(ResolvedLocation::RemoteFile(remote_file(
        location,
        size.size(),
        Parent::Document(document),
        document.dc_id,
        Some(size.label()),
    )))
}

/// A sticker thumbnail, addressed through the sticker's set.
pub fn for_sticker(
    size: Option<&PhotoSize>,
    sticker: Option<&Document>,
) -> Option<ResolvedLocation> {
    if let Some(preview) = size.and_then(stripped_preview) {
        return Some(preview);
    }
    let (Some(size), Some(sticker)) = (size, sticker) else {
        return absent("thumb size or sticker missing");
    };
    let Some(set) = sticker::input_sticker_set(sticker) else {
        return absent("sticker has no sticker set");
    };
    let Some(location) = size.location() else {
        return absent("thumb size has no file location");
    };

    let mut remote = remote_file(
        location,
        size.size(),
        Parent::StickerSet(set),
        sticker.dc_id,
        Some(size.label()),
    );
    remote.lottie_animation = sticker::is_animated_sticker(sticker);
    Some(ResolvedLocation::RemoteFile(remote))
}

/// A user's profile photo, big or small.
pub fn for_user(user: Option<&User>, big: bool) -> Option<ResolvedLocation> {
    let Some(user) = user else {
        return absent("no user");
    };
    if user.access_hash == 0 {
        return absent("user has no access hash");
    }
    let Some(photo) = user.photo.as_ref() else {
        return absent("user has no photo");
    };
    let selected = if big { &photo.photo_big } else { &photo.photo_small };
    let Some(location) = selected.as_ref() else {
        return absent("user photo lacks requested size");
    };

    let peer = InputPeer::User {
        user_id: user.id,
        access_hash: user.access_hash,
    };
    Some(ResolvedLocation::RemoteFile(remote_file(
        location,
        0,
        Parent::Peer { peer, big },
        photo.dc_id,
        None,
    )))
}

/// A group or channel photo, big or small. Channels need an access hash, groups do not.
pub fn for_chat(chat: Option<&Chat>, big: bool) -> Option<ResolvedLocation> {
    let Some(chat) = chat else {
        return absent("no chat");
    };
    let Some(photo) = chat.photo.as_ref() else {
        return absent("chat has no photo");
    };
    let selected = if big { &photo.photo_big } else { &photo.photo_small };
    let Some(location) = selected.as_ref() else {
        return absent("chat photo lacks requested size");
    };

    let peer = if chat.is_channel() {
        if chat.access_hash == 0 {
            return absent("channel has no access hash");
        }
        InputPeer::Channel {
            channel_id: chat.id,
            access_hash: chat.access_hash,
        }
    } else {
        InputPeer::Chat { chat_id: chat.id }
    };
    Some(ResolvedLocation::RemoteFile(remote_file(
        location,
        0,
        Parent::Peer { peer, big },
        photo.dc_id,
        None,
    )))
}

/// Raw coordinates of an already-downloaded file: no reference, no key, no owner.
pub fn for_local(location: Option<&FileLocation>) -> Option<ResolvedLocation> {
    let Some(location) = location else {
        return absent("no file location");
    };
    let raw = *location.coordinates();
    Some(ResolvedLocation::RemoteFile(RemoteFile {
        origin: Origin::LocalCache,
        dc_id: raw.dc_id,
        coordinates: Some(raw),
        file_reference: Vec::new(),
        access_hash: 0,
        encryption: None,
        size: 0,
        owner: RemoteOwner::None,
        thumb_size: None,
        lottie_animation: false,
    }))
}

/// Size variant of whichever media the owner is.
pub fn for_object(
    size: Option<&PhotoSize>,
    media: Option<&MediaOwner>,
) -> Option<ResolvedLocation> {
    match media {
        Some(MediaOwner::Photo(photo)) => for_photo(size, Some(photo)),
        Some(MediaOwner::Document(document)) => for_document_thumb(size, Some(document)),
        Some(MediaOwner::Other) | None => absent("owner is neither photo nor document"),
    }
}
