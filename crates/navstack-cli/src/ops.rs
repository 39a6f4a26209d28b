//! Transition scripts for `navstack navigate`
//!
//! One argument per transition:
//!
//! ```text
//! list:DEPLOYMENT  entity:IMAGE:img-123  item:img-456  pop  clear
//! search:Severity=CRITICAL,Fixable=true  page:2  sort:name[:desc]
//! ```

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use navstack_entity::EntityType;
use navstack_state::{Navigator, SearchFilter, SortOption, WorkflowState};

/// One scripted transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NavOp {
    List(EntityType),
    Entity(EntityType, String),
    Item(String),
    Pop,
    Clear,
    Search(SearchFilter),
    Page(u32),
    Sort(Option<SortOption>),
}

impl NavOp {
    /// Apply this transition
    pub(crate) fn apply(&self, nav: &Navigator<'_>, state: &WorkflowState) -> WorkflowState {
        match self {
            Self::List(entity_type) => nav.push_list(state, *entity_type),
            Self::Entity(entity_type, id) => nav.push_related_entity(state, *entity_type, id),
            Self::Item(id) => state.push_list_item(id),
            Self::Pop => state.pop(),
            Self::Clear => nav.clear(state),
            Self::Search(search) => state.set_search(search.clone()),
            Self::Page(page) => state.set_page(*page),
            Self::Sort(sort) => state.set_sort(sort.clone()),
        }
    }
}

fn entity_type(token: &str) -> Result<EntityType> {
    token
        .to_ascii_uppercase()
        .parse()
        .map_err(|err| anyhow!("{err}"))
}

fn search(terms: &str) -> Result<SearchFilter> {
    terms.split(',')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| anyhow!("search term '{pair}' is not KEY=VALUE"))
        })
        .collect()
}

impl FromStr for NavOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, arg) = s.split_once(':').unwrap_or((s, ""));
        let op = match (name, arg) {
            ("pop", "") => Self::Pop,
            ("clear", "") => Self::Clear,
            ("list", t) => Self::List(entity_type(t)?),
            ("entity", rest) => {
                let (t, id) = rest
                    .split_once(':')
                    .ok_or_else(|| anyhow!("expected entity:TYPE:ID, got '{s}'"))?;
                Self::Entity(entity_type(t)?, id.to_string())
            }
            ("item", id) if !id.is_empty() => Self::Item(id.to_string()),
            ("search", terms) => Self::Search(search(terms)?),
            ("page", n) => Self::Page(n.parse().with_context(|| format!("invalid page '{n}'"))?),
            ("sort", "") => Self::Sort(None),
            ("sort", arg) => match arg.rsplit_once(':') {
                Some((id, "desc")) => Self::Sort(Some(SortOption::descending(id))),
                Some((id, "asc")) => Self::Sort(Some(SortOption::ascending(id))),
                _ => Self::Sort(Some(SortOption::ascending(arg))),
            },
            _ => bail!("unknown transition '{s}'"),
        };
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navstack_entity::UseCase;
    use navstack_state::StackEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_every_transition() {
        assert_eq!("pop".parse::<NavOp>().unwrap(), NavOp::Pop);
        assert_eq!("clear".parse::<NavOp>().unwrap(), NavOp::Clear);
        assert_eq!(
            "list:image_cve".parse::<NavOp>().unwrap(),
            NavOp::List(EntityType::ImageCve)
        );
        assert_eq!(
            "entity:IMAGE:sha256:abc".parse::<NavOp>().unwrap(),
            NavOp::Entity(EntityType::Image, "sha256:abc".to_string())
        );
        assert_eq!("item:d-1".parse::<NavOp>().unwrap(), NavOp::Item("d-1".to_string()));
        assert_eq!("page:3".parse::<NavOp>().unwrap(), NavOp::Page(3));
        assert_eq!(
            "sort:name:desc".parse::<NavOp>().unwrap(),
            NavOp::Sort(Some(SortOption::descending("name")))
        );
        assert_eq!("sort".parse::<NavOp>().unwrap(), NavOp::Sort(None));

        let NavOp::Search(search) = "search:Severity=CRITICAL,Fixable=true".parse::<NavOp>().unwrap() else {
            panic!("expected search");
        };
        assert_eq!(search.len(), 2);
        assert_eq!(search["Severity"], "CRITICAL");
    }

    #[test]
    fn rejects_bad_transitions() {
        for bad in ["jump", "list:GALAXY", "entity:IMAGE", "item:", "page:x", "search:novalue", "pop:1"] {
            assert!(bad.parse::<NavOp>().is_err(), "{bad}");
        }
    }

    #[test]
    fn applies_in_order() {
        let nav = Navigator::builtin();
        let ops: Vec<NavOp> = ["item:d-1", "entity:IMAGE:img-123", "pop"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let start = WorkflowState::new(UseCase::VulnManagement, vec![StackEntry::list(EntityType::Deployment)]);
        let end = ops.iter().fold(start, |state, op| op.apply(&nav, &state));
        assert_eq!(
            end.stack,
            vec![
                StackEntry::list(EntityType::Deployment),
                StackEntry::entity(EntityType::Deployment, "d-1"),
            ]
        );
    }
}
