//! medialoc-resolve: media location normalization and cache keys
//!
//! # Overview
//! - `normalize`: one total constructor per source descriptor → [`ResolvedLocation`]
//! - `key`: stable cache keys, including owner-scoped keys for stripped previews
//! - `location`: the canonical location type and its accessors (`is_encrypted`, `size`)
//! - `sticker`: sticker-set lookup and animated-sticker detection
//!
//! Everything here is pure: no I/O, no shared state, safe to call from any thread.

pub mod digest;
pub mod key;
pub mod location;
pub mod normalize;
pub mod sticker;

pub use key::{DefaultOwnerKeys, FullObject, KeyDeriver, OwnerKeyResolver};
pub use location::{Encryption, LocationKind, Origin, RemoteFile, RemoteOwner, ResolvedLocation};

use medialoc_core::request::{ResolveRequest, Source};

/// Resolve whichever source descriptor the request carries.
pub fn resolve_request(request: &ResolveRequest) -> Option<ResolvedLocation> {
    match &request.source {
        Source::Path { path } => normalize::for_path(path.as_deref()),
        Source::SecureDocument { document } => normalize::for_secure_document(document.as_ref()),
        Source::Document { document } => normalize::for_document(document.as_ref()),
        Source::WebFile { file } => normalize::for_web_file(file.as_ref()),
        Source::Photo { size, photo } => normalize::for_photo(size.as_ref(), photo.as_ref()),
        Source::DocumentThumb { size, document } => {
            normalize::for_document_thumb(size.as_ref(), document.as_ref())
        }
        Source::Sticker { size, sticker } => {
            normalize::for_sticker(size.as_ref(), sticker.as_ref())
        }
        Source::Object { size, media } => normalize::for_object(size.as_ref(), media.as_ref()),
        Source::User { user, big } => normalize::for_user(user.as_ref(), *big),
        Source::Chat { chat, big } => normalize::for_chat(chat.as_ref(), *big),
        Source::Local { location } => normalize::for_local(location.as_ref()),
    }
}
