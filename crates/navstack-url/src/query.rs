//! Query half of a workflow URL
//!
//! Bracketed keys in the style of nested form parameters:
//!
//! | key | meaning |
//! |---|---|
//! | `s[{index}][{field}]` | search field of stack entry `index` |
//! | `p`, `p2` | page / side-panel page index |
//! | `sort[id]`, `sort[desc]` | page sort |
//! | `sort2[id]`, `sort2[desc]` | side-panel sort |
//!
//! Anything else is kept verbatim as an extra parameter.

use std::collections::BTreeMap;

use navstack_state::{Paging, Panel, SearchFilter, SortOption, Sorting, WorkflowState};
use url::form_urlencoded;

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::path::encode_component;

/// Managed and unmanaged parameters of one query string
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DecodedQuery {
    pub(crate) search: BTreeMap<usize, SearchFilter>,
    pub(crate) paging: Paging,
    pub(crate) sort: Sorting,
    pub(crate) extra_params: Vec<(String, String)>,
}

#[derive(Default)]
struct SortParts {
    id: Option<String>,
    desc: Option<bool>,
}

impl SortParts {
    fn set(&mut self, key: &str, part: &str, nested: Option<&str>, value: String) -> Result<(), CodecError> {
        match (part, nested) {
            ("id", None) => self.id = Some(value),
            ("desc", None) => {
                let desc = value
                    .parse()
                    .map_err(|_| CodecError::query(key, format!("'{value}' is not a sort direction")))?;
                self.desc = Some(desc);
            }
            _ => return Err(CodecError::query(key, "unknown sort parameter")),
        }
        Ok(())
    }

    fn finish(self, key: &str) -> Result<Option<SortOption>, CodecError> {
        match (self.id, self.desc) {
            (Some(id), desc) => Ok(Some(SortOption {
                id,
                desc: desc.unwrap_or(false),
            })),
            (None, Some(_)) => Err(CodecError::query(format!("{key}[desc]"), "sort direction without sort field")),
            (None, None) => Ok(None),
        }
    }
}

/// Split `name[first]` or `name[first][second]`
///
/// `second` runs to the final `]`, so it may itself contain brackets.
fn split_brackets<'k>(key: &'k str, name: &str) -> Option<(&'k str, Option<&'k str>)> {
    let rest = key.strip_prefix(name)?.strip_prefix('[')?;
    let close = rest.find(']')?;
    let (first, tail) = (&rest[..close], &rest[close + 1..]);
    if tail.is_empty() {
        return Some((first, None));
    }
    let second = tail.strip_prefix('[')?.strip_suffix(']')?;
    Some((first, Some(second)))
}

fn parse_page(key: &str, value: &str) -> Result<u32, CodecError> {
    value
        .parse()
        .map_err(|_| CodecError::query(key, format!("'{value}' is not a page index")))
}

/// Decode a query string, with or without its leading `?`
pub(crate) fn decode_query(config: &CodecConfig, query: &str) -> Result<DecodedQuery, CodecError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let side_page_key = CodecConfig::side_panel_key(&config.page_key);
    let side_sort_key = CodecConfig::side_panel_key(&config.sort_key);

    let mut decoded = DecodedQuery::default();
    let mut page_sort = SortParts::default();
    let mut side_sort = SortParts::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let key: &str = &key;
        let value = value.into_owned();

        if key == config.page_key {
            decoded.paging.page = parse_page(key, &value)?;
        } else if key == side_page_key {
            decoded.paging.side_panel = parse_page(key, &value)?;
        } else if let Some((index, field)) = split_brackets(key, &config.search_key) {
            let field = field.ok_or_else(|| CodecError::query(key, "missing search field"))?;
            let index: usize = index
                .parse()
                .map_err(|_| CodecError::query(key, format!("'{index}' is not a stack index")))?;
            decoded
                .search
                .entry(index)
                .or_default()
                .insert(field.to_string(), value);
        } else if let Some((part, nested)) = split_brackets(key, &config.sort_key) {
            page_sort.set(key, part, nested, value)?;
        } else if let Some((part, nested)) = split_brackets(key, &side_sort_key) {
            side_sort.set(key, part, nested, value)?;
        } else {
            decoded.extra_params.push((key.to_string(), value));
        }
    }

    decoded.sort = Sorting::new(
        page_sort.finish(&config.sort_key)?,
        side_sort.finish(&side_sort_key)?,
    );
    Ok(decoded)
}

/// Encode the query string of a state, without the leading `?`
pub(crate) fn encode_query(config: &CodecConfig, state: &WorkflowState) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();

    let search_key = encode_component(&config.search_key);
    for (index, entry) in state.stack.iter().enumerate() {
        for (field, value) in &entry.search {
            pairs.push((
                format!("{search_key}[{index}][{}]", encode_component(field)),
                encode_component(value),
            ));
        }
    }

    for panel in [Panel::Page, Panel::SidePanel] {
        let page = *state.paging.get(panel);
        if page != 0 {
            pairs.push((panel_key(&config.page_key, panel), page.to_string()));
        }
    }

    for panel in [Panel::Page, Panel::SidePanel] {
        if let Some(sort) = state.sort.get(panel) {
            let key = panel_key(&config.sort_key, panel);
            pairs.push((format!("{key}[id]"), encode_component(&sort.id)));
            if sort.desc {
                pairs.push((format!("{key}[desc]"), "true".to_string()));
            }
        }
    }

    for (key, value) in &state.extra_params {
        pairs.push((encode_component(key), encode_component(value)));
    }

    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn panel_key(key: &str, panel: Panel) -> String {
    let key = match panel {
        Panel::Page => key.to_string(),
        Panel::SidePanel => CodecConfig::side_panel_key(key),
    };
    encode_component(&key)
}
