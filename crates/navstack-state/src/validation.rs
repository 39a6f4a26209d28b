//! Stack validation
//!
//! Decides whether a drill-down stack still reads as one coherent path from
//! its root. Transitions use it to decide when to skim the stack.

use navstack_entity::{EntityCatalog, EntityType, Relationship};

use crate::entry::StackEntry;

/// Drill-down path validator
///
/// Consecutive entries of the same type (a list followed by one of its
/// rows) are not a step and are skipped. Every other step must be related,
/// must not revisit a type, and must not follow a parents or matches step.
#[derive(Debug, Clone, Copy)]
pub struct StackValidator<'c> {
    catalog: &'c EntityCatalog,
}

impl<'c> StackValidator<'c> {
    /// Create validator over a catalog
    #[inline]
    #[must_use]
    pub fn new(catalog: &'c EntityCatalog) -> Self {
        Self { catalog }
    }

    /// Validate a stack
    ///
    /// # Errors
    /// Returns the first violation, with the index of the offending entry
    pub fn validate(&self, stack: &[StackEntry]) -> Result<(), StackViolation> {
        let mut visited: Vec<EntityType> = Vec::new();
        let mut terminal: Option<Relationship> = None;

        for (index, pair) in stack.windows(2).enumerate() {
            let from = pair[0].entity_type;
            let to = pair[1].entity_type;
            let index = index + 1;

            if !visited.contains(&from) {
                visited.push(from);
            }
            if from == to {
                continue;
            }

            if let Some(step) = terminal {
                return Err(StackViolation::PastTerminal { index, after: step });
            }
            if visited.contains(&to) {
                return Err(StackViolation::Duplicate {
                    index,
                    entity_type: to,
                });
            }

            match self.catalog.relationship(from, to) {
                Some(Relationship::Contains) => {}
                Some(Relationship::Parents) => {
                    let origin = visited
                        .iter()
                        .filter(|t| **t != from)
                        .find(|t| self.catalog.is_ancestor(to, **t));
                    if let Some(origin) = origin {
                        return Err(StackViolation::AboveOrigin {
                            index,
                            entity_type: to,
                            origin: *origin,
                        });
                    }
                    terminal = Some(Relationship::Parents);
                }
                Some(Relationship::Matches) => terminal = Some(Relationship::Matches),
                None => return Err(StackViolation::Unrelated { index, from, to }),
            }
        }

        Ok(())
    }

    /// Check if a stack is valid
    #[inline]
    #[must_use]
    pub fn is_valid(&self, stack: &[StackEntry]) -> bool {
        self.validate(stack).is_ok()
    }
}

/// Reasons a stack stops being a coherent drill-down
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackViolation {
    /// Navigation continued after a parents or matches step
    #[error("entry {index} continues past a {after:?} step")]
    PastTerminal {
        /// Position of the offending entry
        index: usize,
        /// Step that ended the drill-down
        after: Relationship,
    },

    /// Entity type already appeared lower in the stack
    #[error("entry {index} revisits {entity_type}")]
    Duplicate {
        /// Position of the offending entry
        index: usize,
        /// Revisited type
        entity_type: EntityType,
    },

    /// Parents step climbs above where the drill-down started
    #[error("entry {index} climbs to {entity_type}, above {origin}")]
    AboveOrigin {
        /// Position of the offending entry
        index: usize,
        /// Type climbed to
        entity_type: EntityType,
        /// Earlier type it contains
        origin: EntityType,
    },

    /// Step between unrelated entity types
    #[error("entry {index} steps from {from} to unrelated {to}")]
    Unrelated {
        /// Position of the offending entry
        index: usize,
        /// Type stepped from
        from: EntityType,
        /// Type stepped to
        to: EntityType,
    },
}
