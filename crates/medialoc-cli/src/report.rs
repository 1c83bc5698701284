//! What `medialoc resolve` prints for one request.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use medialoc_core::ResolveRequest;
use medialoc_resolve::{resolve_request, KeyDeriver, OwnerKeyResolver, ResolvedLocation};

#[derive(Debug, Serialize)]
pub struct Report {
    pub location: Option<ResolvedLocation>,
    pub cache_key: Option<String>,
    pub encrypted: bool,
    pub size: u64,
    pub dc_id: i32,
}

impl Report {
    pub fn build<R: OwnerKeyResolver>(request: &ResolveRequest, deriver: &KeyDeriver<R>) -> Self {
        let location = resolve_request(request);
        let cache_key = deriver.cache_key(location.as_ref(), &request.owner, None);
        Report {
            encrypted: location.as_ref().is_some_and(ResolvedLocation::is_encrypted),
            size: location.as_ref().map_or(0, ResolvedLocation::size),
            dc_id: location.as_ref().map_or(0, ResolvedLocation::dc_id),
            cache_key,
            location,
        }
    }
}

/// Read a request from `input`, or from stdin when `input` is `-`.
pub fn read_request(input: &Path) -> Result<ResolveRequest> {
    let data = if input == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading request from stdin")?;
        buf
    } else {
        std::fs::read(input).with_context(|| format!("reading request: {}", input.display()))?
    };
    ResolveRequest::from_json(&data)
        .with_context(|| format!("decoding request: {}", input.display()))
}
