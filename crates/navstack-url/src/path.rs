//! Path half of a workflow URL
//!
//! `{base}/{use-case}/{segment}*` where a segment is a plural slug (list) or
//! a singular slug followed by the entity id (detail):
//!
//! ```text
//! /main/vulnerability-management/deployments/image/img-123
//!       └── use case ──────────┘ └─ list ──┘ └─ detail ─┘
//! ```
//!
//! Empty components are ignored, so `//` and trailing slashes are harmless.

use navstack_entity::{EntityCatalog, UseCase};
use navstack_state::StackEntry;
use url::form_urlencoded;

use crate::config::CodecConfig;
use crate::error::CodecError;

/// Use case and stack named by a path; `None` for the bare base path
pub(crate) type DecodedPath = (Option<UseCase>, Vec<StackEntry>);

/// Percent-encode one path component
pub(crate) fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Decode one path component
///
/// Raw `&` and `=` never appear in an encoded id and are rejected.
pub(crate) fn decode_component(raw: &str) -> Result<String, CodecError> {
    if raw.contains(['&', '=']) {
        return Err(CodecError::segment(raw, "reserved character in entity id"));
    }
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(decoded, _)| decoded.into_owned())
        .filter(|decoded| !decoded.is_empty())
        .ok_or_else(|| CodecError::segment(raw, "empty entity id"))
}

/// Decode a URL path into a use case and its stack
pub(crate) fn decode_path(
    catalog: &EntityCatalog,
    config: &CodecConfig,
    path: &str,
) -> Result<DecodedPath, CodecError> {
    let mut components = path.split('/').filter(|c| !c.is_empty());

    for expected in config.base_components() {
        if components.next() != Some(expected) {
            return Err(CodecError::segment(
                path,
                format!("outside base path '{}'", config.base_path),
            ));
        }
    }

    let Some(slug) = components.next() else {
        return Ok((None, Vec::new()));
    };
    let use_case = catalog
        .use_case_for_slug(slug)
        .ok_or_else(|| CodecError::UnknownUseCase(slug.to_string()))?;

    let mut stack = Vec::new();
    while let Some(token) = components.next() {
        let entry = if let Some(entity_type) = catalog.entity_for_list_slug(token) {
            StackEntry::list(entity_type)
        } else if let Some(entity_type) = catalog.entity_for_detail_slug(token) {
            let raw_id = components
                .next()
                .ok_or_else(|| CodecError::segment(token, "missing entity id"))?;
            StackEntry::entity(entity_type, decode_component(raw_id)?)
        } else {
            return Err(CodecError::UnknownEntityType(token.to_string()));
        };

        if !catalog.supports(use_case, entry.entity_type) {
            return Err(CodecError::UnknownEntityType(token.to_string()));
        }
        stack.push(entry);
    }

    Ok((Some(use_case), stack))
}

/// Encode a use case and its stack as a URL path
pub(crate) fn encode_path(
    catalog: &EntityCatalog,
    config: &CodecConfig,
    use_case: Option<UseCase>,
    stack: &[StackEntry],
) -> Result<String, CodecError> {
    let mut path = config.base_path.clone();

    match use_case {
        Some(use_case) => {
            let slug = catalog
                .use_case_slug(use_case)
                .ok_or_else(|| CodecError::UnknownUseCase(use_case.to_string()))?;
            path.push('/');
            path.push_str(slug);
        }
        None if stack.is_empty() => {}
        None => return Err(CodecError::UnknownUseCase(String::new())),
    }

    for entry in stack {
        let descriptor = catalog
            .entity(entry.entity_type)
            .ok_or(CodecError::Unencodable(entry.entity_type))?;
        match entry.entity_id() {
            None => {
                path.push('/');
                path.push_str(&descriptor.plural);
            }
            Some("") => return Err(CodecError::segment(&descriptor.singular, "empty entity id")),
            Some(id) => {
                path.push('/');
                path.push_str(&descriptor.singular);
                path.push('/');
                path.push_str(&encode_component(id));
            }
        }
    }

    if path.is_empty() {
        path.push('/');
    }
    Ok(path)
}
