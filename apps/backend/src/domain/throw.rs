//! Lead validation and the defensibility check for multi-block leads.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::blocks::{compare_blocks, decompose, find_blocks, flatten, is_throw, Block};
use crate::domain::cards_logic::common_class;
use crate::domain::cards_types::{Card, SuitClass, Trump};
use crate::domain::rules::PLAYERS;
use crate::domain::state::{nth_from, Seat, ThrowOutcome};
use crate::errors::domain::{DomainError, RuleKind};

/// Canonical form of a lead after the throw check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub class: SuitClass,
    /// Blocks actually led. A refused throw leaves only the forced block.
    pub groups: Vec<Vec<Block>>,
    /// Present when the selection was a throw.
    pub throw: Option<ThrowOutcome>,
}

impl Lead {
    pub fn cards(&self) -> Vec<Card> {
        flatten(&self.groups)
    }
}

/// Validate and canonicalize the cards a leader selected.
///
/// The cards must share one suit-class. A throw is checked against each
/// defender in seating order: for every group, the group's weakest block
/// is matched against the defender's best block of the same shape. A
/// strictly stronger defender block refuses the throw and the lead collapses
/// to that weakest block.
pub fn canonicalize_lead(
    leader: Seat,
    cards: &[Card],
    hands: &[&[Card]; PLAYERS],
    trump: &Trump,
) -> Result<Lead, DomainError> {
    let Some(class) = common_class(cards, trump) else {
        return Err(DomainError::rule(
            RuleKind::IllegalPlay,
            "lead cards must share one suit class",
        ));
    };

    let groups = decompose(cards, trump, class);
    if !is_throw(&groups) {
        return Ok(Lead {
            class,
            groups,
            throw: None,
        });
    }

    let intended: Vec<_> = cards.iter().map(|c| c.id).collect();
    for n in 1..PLAYERS as u8 {
        let defender = nth_from(leader, n);
        for group in &groups {
            let Some(weakest) = group.last() else {
                continue;
            };
            let defence = find_blocks(hands[defender as usize], trump, class, weakest.shape());
            let Some(best) = defence.first() else {
                continue;
            };
            if compare_blocks(weakest, best)? == Ordering::Less {
                debug!(leader, defender, "throw refused");
                return Ok(Lead {
                    class,
                    groups: vec![vec![weakest.clone()]],
                    throw: Some(ThrowOutcome {
                        intended,
                        accepted: false,
                        beaten_by: Some(defender),
                    }),
                });
            }
        }
    }

    Ok(Lead {
        class,
        groups,
        throw: Some(ThrowOutcome {
            intended,
            accepted: true,
            beaten_by: None,
        }),
    })
}
