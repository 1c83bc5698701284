//! End-to-end scenarios: descriptor → location → cache key / size / encryption.

use medialoc_core::config::KeyConfig;
use medialoc_core::owner::{MediaOwner, OwnerContext};
use medialoc_core::types::{
    Chat, ChatKind, ChatPhoto, Document, DocumentAttribute, FileCoordinates, FileLocation,
    InputStickerSet, LegacyFileLocation, Photo, PhotoSize, User, UserProfilePhoto, WebFile,
};
use medialoc_resolve::digest::md5_hex;
use medialoc_resolve::normalize;
use medialoc_resolve::{FullObject, KeyDeriver, ResolvedLocation};
use proptest::prelude::*;

fn deriver() -> KeyDeriver {
    KeyDeriver::new(Default::default(), KeyConfig::default())
}

fn normalized(dc_id: i32, volume_id: i64, local_id: i32) -> FileLocation {
    FileLocation::Normalized(FileCoordinates {
        dc_id,
        volume_id,
        local_id,
        secret: 0,
    })
}

fn sized(location: FileLocation) -> PhotoSize {
    PhotoSize::Sized {
        label: "y".into(),
        location: Some(location),
        width: 1280,
        height: 960,
        size: 90_000,
    }
}

#[test]
fn web_file_scenario() {
    let file = WebFile {
        url: "http://x/y.jpg".into(),
        size: 1024,
        mime_type: None,
    };
    let location = normalize::for_web_file(Some(&file)).unwrap();
    assert_eq!(
        location,
        ResolvedLocation::WebFile {
            url: "http://x/y.jpg".into(),
            size: 1024
        }
    );
    assert_eq!(
        deriver().cache_key(Some(&location), &OwnerContext::None, None),
        Some(md5_hex("http://x/y.jpg"))
    );
    assert_eq!(location.size(), 1024);
    assert!(!location.is_encrypted());
}

#[test]
fn local_coordinates_scenario() {
    let location = normalize::for_local(Some(&normalized(2, 5, 9))).unwrap();
    let remote = location.remote().unwrap();
    assert_eq!(remote.dc_id, 2);
    assert_eq!(remote.coordinates.map(|c| (c.volume_id, c.local_id)), Some((5, 9)));
    assert_eq!(
        deriver().cache_key(Some(&location), &OwnerContext::None, None).as_deref(),
        Some("5_9")
    );
}

#[test]
fn document_scenario() {
    let document = Document {
        id: 42,
        dc_id: 1,
        size: 2048,
        ..Default::default()
    };
    let location = normalize::for_document(Some(&document)).unwrap();
    assert!(!location.is_encrypted());
    assert_eq!(location.size(), 2048);
    assert_eq!(
        deriver().cache_key(Some(&location), &OwnerContext::None, None).as_deref(),
        Some("1_42")
    );
}

#[test]
fn encrypted_document() {
    let document = Document {
        id: 42,
        dc_id: 1,
        key: vec![7; 32],
        iv: vec![8; 32],
        ..Default::default()
    };
    let location = normalize::for_document(Some(&document)).unwrap();
    assert!(location.is_encrypted());
    assert_eq!(location.encryption().map(|e| e.iv.len()), Some(32));
}

#[test]
fn dc_fallback() {
    let size = sized(normalized(7, 1, 1));
    let zero = Photo {
        id: 1,
        dc_id: 0,
        ..Default::default()
    };
    let three = Photo { dc_id: 3, ..zero.clone() };
    assert_eq!(normalize::for_photo(Some(&size), Some(&zero)).unwrap().dc_id(), 7);
    assert_eq!(normalize::for_photo(Some(&size), Some(&three)).unwrap().dc_id(), 3);

    let legacy = sized(FileLocation::Legacy(LegacyFileLocation {
        coordinates: FileCoordinates {
            dc_id: 7,
            volume_id: 1,
            local_id: 1,
            secret: 2,
        },
        ..Default::default()
    }));
    assert_eq!(normalize::for_photo(Some(&legacy), Some(&zero)).unwrap().dc_id(), 7);
    assert_eq!(normalize::for_photo(Some(&legacy), Some(&three)).unwrap().dc_id(), 3);
}

#[test]
fn absence_propagates() {
    let user = User {
        id: 1,
        access_hash: 2,
        photo: None,
    };
    let location = normalize::for_user(Some(&user), true);
    assert!(location.is_none());
    assert!(deriver()
        .cache_key(location.as_ref(), &OwnerContext::None, None)
        .is_none());
}

#[test]
fn web_page_preview_keyed_by_photo_sibling() {
    let photo = Photo {
        id: 5005,
        dc_id: 2,
        sizes: vec![
            PhotoSize::Stripped {
                label: "i".into(),
                bytes: vec![1, 40, 30, 9, 9],
            },
            sized(normalized(2, 70, 3)),
        ],
        ..Default::default()
    };
    let owner = OwnerContext::WebPage {
        id: 99,
        url: "https://example.org".into(),
    };
    let media = MediaOwner::Photo(photo.clone());

    let preview = normalize::for_object(photo.sizes.first(), Some(&media)).unwrap();
    let full = normalize::for_object(photo.sizes.get(1), Some(&media)).unwrap();

    let d = deriver();
    assert_eq!(
        d.cache_key(Some(&preview), &owner, Some(&FullObject::Location(&full)))
            .as_deref(),
        Some("strippedwebpage99_5005")
    );
    assert_eq!(
        d.cache_key(Some(&full), &owner, None).as_deref(),
        Some("70_3")
    );
}

#[test]
fn channel_avatar_key_uses_coordinates() {
    let chat = Chat {
        id: 10,
        access_hash: 11,
        kind: ChatKind::Channel,
        photo: Some(ChatPhoto {
            dc_id: 4,
            photo_big: Some(normalized(1, 123, 45)),
            ..Default::default()
        }),
    };
    let location = normalize::for_chat(Some(&chat), true).unwrap();
    assert_eq!(location.dc_id(), 4);
    assert_eq!(
        deriver().cache_key(Some(&location), &OwnerContext::None, None).as_deref(),
        Some("123_45")
    );
}

fn arb_location() -> impl Strategy<Value = FileLocation> {
    let key = proptest::collection::vec(any::<u8>(), 0..4);
    (any::<i32>(), any::<i64>(), any::<i32>(), any::<i64>(), key)
        .prop_flat_map(|(dc_id, volume_id, local_id, secret, key)| {
            let coordinates = FileCoordinates {
                dc_id,
                volume_id,
                local_id,
                secret,
            };
            prop_oneof![
                Just(FileLocation::Normalized(coordinates)),
                Just(FileLocation::Legacy(LegacyFileLocation {
                    coordinates,
                    file_reference: Vec::new(),
                    iv: key.clone(),
                    key,
                })),
            ]
        })
}

fn arb_size() -> impl Strategy<Value = Option<PhotoSize>> {
    prop_oneof![
        Just(None),
        proptest::collection::vec(any::<u8>(), 0..8)
            .prop_map(|bytes| Some(PhotoSize::Stripped { label: "i".into(), bytes })),
        proptest::option::of(arb_location()).prop_map(|location| Some(PhotoSize::Sized {
            label: "m".into(),
            location,
            width: 0,
            height: 0,
            size: 10,
        })),
        Just(Some(PhotoSize::Empty { label: "s".into() })),
    ]
}

fn arb_sticker_set() -> impl Strategy<Value = Option<InputStickerSet>> {
    prop_oneof![
        Just(None),
        Just(Some(InputStickerSet::Empty)),
        any::<i64>().prop_map(|id| Some(InputStickerSet::Id { id, access_hash: 1 })),
        "[a-z]{1,8}".prop_map(|short_name| Some(InputStickerSet::ShortName { short_name })),
    ]
}

fn arb_chat_kind() -> impl Strategy<Value = ChatKind> {
    prop_oneof![
        Just(ChatKind::Group),
        Just(ChatKind::GroupForbidden),
        Just(ChatKind::Channel),
        Just(ChatKind::ChannelForbidden),
    ]
}

/// Resolving twice yields the same location, and keying it twice the same key.
fn check_deterministic(
    first: Option<ResolvedLocation>,
    second: Option<ResolvedLocation>,
    owner: &OwnerContext,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(&first, &second);
    let d = deriver();
    prop_assert_eq!(
        d.cache_key(first.as_ref(), owner, None),
        d.cache_key(second.as_ref(), owner, None)
    );
    Ok(())
}

/// Owner's non-zero dc wins, otherwise the coordinates' own dc.
fn expected_dc(owner_dc: i32, location: &FileLocation) -> i32 {
    if owner_dc != 0 {
        owner_dc
    } else {
        location.dc_id()
    }
}

proptest! {
    #[test]
    fn photo_resolution_is_total_and_keys_are_deterministic(
        size in arb_size(),
        photo_dc in any::<i32>(),
        with_photo in any::<bool>(),
    ) {
        let photo = Photo { id: 1, dc_id: photo_dc, ..Default::default() };
        let location = normalize::for_photo(size.as_ref(), with_photo.then_some(&photo));

        if let Some(PhotoSize::Stripped { .. }) = size {
            let is_preview = matches!(location, Some(ResolvedLocation::StrippedPreview { .. }));
            prop_assert!(is_preview);
        }

        let owner = OwnerContext::WebPage { id: 1, url: String::new() };
        let d = deriver();
        let first = d.cache_key(location.as_ref(), &owner, None);
        let second = d.cache_key(location.clone().as_ref(), &owner, None);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn document_thumb_resolution_is_deterministic(
        size in arb_size(),
        document_dc in any::<i32>(),
        with_document in any::<bool>(),
    ) {
        let document = Document { id: 7, dc_id: document_dc, ..Default::default() };
        let document = with_document.then_some(&document);
        let location = normalize::for_document_thumb(size.as_ref(), document);

        if let Some(PhotoSize::Stripped { .. }) = size {
            let is_preview = matches!(location, Some(ResolvedLocation::StrippedPreview { .. }));
            prop_assert!(is_preview);
        }
        let coordinates = size.as_ref().and_then(PhotoSize::location);
        if let (Some(ResolvedLocation::RemoteFile(remote)), Some(coordinates)) =
            (&location, coordinates)
        {
            prop_assert_eq!(remote.dc_id, expected_dc(document_dc, coordinates));
        }

        let again = normalize::for_document_thumb(size.as_ref(), document);
        check_deterministic(location, again, &OwnerContext::None)?;
    }

    #[test]
    fn sticker_resolution_is_deterministic(
        size in arb_size(),
        set in arb_sticker_set(),
        animated in any::<bool>(),
        sticker_dc in any::<i32>(),
    ) {
        let sticker = Document {
            id: 11,
            dc_id: sticker_dc,
            mime_type: if animated { "application/x-tgsticker" } else { "image/webp" }.into(),
            attributes: vec![DocumentAttribute::Sticker {
                alt: String::new(),
                stickerset: set.clone(),
                mask: false,
            }],
            ..Default::default()
        };
        let location = normalize::for_sticker(size.as_ref(), Some(&sticker));

        let has_set = !matches!(set, None | Some(InputStickerSet::Empty));
        if let Some(ResolvedLocation::RemoteFile(remote)) = &location {
            prop_assert!(has_set);
            prop_assert_eq!(remote.lottie_animation, animated);
        }

        let again = normalize::for_sticker(size.as_ref(), Some(&sticker));
        let owner = OwnerContext::WebPage { id: 2, url: String::new() };
        check_deterministic(location, again, &owner)?;
    }

    #[test]
    fn user_avatar_resolution_is_deterministic(
        location in proptest::option::of(arb_location()),
        access_hash in any::<i64>(),
        photo_dc in any::<i32>(),
        big in any::<bool>(),
    ) {
        let user = User {
            id: 5,
            access_hash,
            photo: Some(UserProfilePhoto {
                photo_id: 1,
                dc_id: photo_dc,
                photo_small: location.clone(),
                photo_big: location.clone(),
                stripped_thumb: Vec::new(),
            }),
        };
        let resolved = normalize::for_user(Some(&user), big);

        prop_assert_eq!(resolved.is_some(), access_hash != 0 && location.is_some());
        if let (Some(resolved), Some(location)) = (&resolved, &location) {
            prop_assert_eq!(resolved.dc_id(), expected_dc(photo_dc, location));
        }

        let again = normalize::for_user(Some(&user), big);
        check_deterministic(resolved, again, &OwnerContext::None)?;
    }

    #[test]
    fn chat_avatar_resolution_is_deterministic(
        location in proptest::option::of(arb_location()),
        kind in arb_chat_kind(),
        access_hash in any::<i64>(),
        photo_dc in any::<i32>(),
        big in any::<bool>(),
    ) {
        let chat = Chat {
            id: 9,
            access_hash,
            kind,
            photo: Some(ChatPhoto {
                photo_id: 1,
                dc_id: photo_dc,
                photo_small: location.clone(),
                photo_big: location.clone(),
                stripped_thumb: Vec::new(),
            }),
        };
        let resolved = normalize::for_chat(Some(&chat), big);

        let reachable = !kind.is_channel() || access_hash != 0;
        prop_assert_eq!(resolved.is_some(), reachable && location.is_some());
        if let (Some(resolved), Some(location)) = (&resolved, &location) {
            prop_assert_eq!(resolved.dc_id(), expected_dc(photo_dc, location));
        }

        let again = normalize::for_chat(Some(&chat), big);
        check_deterministic(resolved, again, &OwnerContext::None)?;
    }

    #[test]
    fn local_coordinates_always_resolve(location in arb_location()) {
        let resolved = normalize::for_local(Some(&location));
        prop_assert!(resolved.is_some());
        prop_assert!(resolved.as_ref().is_some_and(|r| !r.is_encrypted()));
        prop_assert_eq!(resolved.as_ref().map(ResolvedLocation::dc_id), Some(location.dc_id()));

        let again = normalize::for_local(Some(&location));
        check_deterministic(resolved, again, &OwnerContext::None)?;
    }

    #[test]
    fn encrypted_iff_key_present(location in arb_location()) {
        let size = sized(location.clone());
        let photo = Photo { id: 3, ..Default::default() };
        let resolved = normalize::for_photo(Some(&size), Some(&photo)).unwrap();
        let has_key = matches!(&location, FileLocation::Legacy(l) if !l.key.is_empty());
        prop_assert_eq!(resolved.is_encrypted(), has_key);
    }
}
