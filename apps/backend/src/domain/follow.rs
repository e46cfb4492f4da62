//! Follow legality ("hide-check").
//!
//! A follower must match the lead's card count, play every card of the lead
//! class when they hold no more than the lead requires, and otherwise stay
//! inside the lead class and never conceal a pattern they hold. Each block of
//! the lead is matched against the hand through a ladder of degraded shapes;
//! a shape the hand holds but the play does not cover is concealment.

use std::collections::BTreeSet;

use crate::domain::blocks::{find_blocks, total_cards, Block, BlockKind, Shape};
use crate::domain::cards_logic::{cards_in_class, suit_class};
use crate::domain::cards_types::{Card, CardId, SuitClass, Trump};
use crate::errors::domain::{DomainError, RuleKind};

fn illegal(detail: impl Into<String>) -> DomainError {
    DomainError::rule(RuleKind::IllegalFollow, detail)
}

/// Degrade ladder for one lead block, strongest plan first.
///
/// A tractor of `n` pairs tries: the full tractor; a shorter tractor of
/// `t` pairs plus the rest as pairs then singles; finally plain pairs and
/// singles only.
pub fn degrade_plans(shape: Shape) -> Vec<Vec<Shape>> {
    fn fill(pairs: usize, singles: usize) -> impl Iterator<Item = Shape> {
        std::iter::repeat(Shape::PAIR)
            .take(pairs)
            .chain(std::iter::repeat(Shape::SINGLE).take(singles))
    }

    match shape.kind {
        BlockKind::Single => vec![vec![Shape::SINGLE]],
        BlockKind::Pair => vec![vec![Shape::PAIR], vec![Shape::SINGLE, Shape::SINGLE]],
        BlockKind::Tractor => {
            let n = shape.tractor_len as usize;
            let mut plans = Vec::new();
            for t in (2..=n).rev() {
                let rest = n - t;
                for p in (0..=rest).rev() {
                    let mut plan = vec![Shape::tractor(t as u8)];
                    plan.extend(fill(p, 2 * (rest - p)));
                    plans.push(plan);
                }
            }
            for p in (0..=n).rev() {
                plans.push(fill(p, 2 * (n - p)).collect());
            }
            plans
        }
    }
}

fn sorted_ids(block: &Block) -> Vec<CardId> {
    let mut ids = block.card_ids();
    ids.sort_unstable();
    ids
}

enum PlanResult {
    Matched {
        hand: Vec<Card>,
        played: BTreeSet<CardId>,
    },
    /// Hand lacks one of the shapes; try the next plan.
    Unavailable,
}

fn try_plan(
    plan: &[Shape],
    hand: &[Card],
    played: &BTreeSet<CardId>,
    trump: &Trump,
    class: SuitClass,
) -> Result<PlanResult, DomainError> {
    let mut hand = hand.to_vec();
    let mut played = played.clone();

    for &shape in plan {
        let available = find_blocks(&hand, trump, class, shape);
        if available.is_empty() {
            return Ok(PlanResult::Unavailable);
        }
        let chosen = available
            .iter()
            .filter(|b| b.cards.iter().all(|c| played.contains(&c.id)))
            .map(sorted_ids)
            .min();
        let Some(ids) = chosen else {
            return Err(illegal(format!(
                "a {:?} of the led suit is held but not played",
                shape.kind
            )));
        };
        hand.retain(|c| !ids.contains(&c.id));
        for id in &ids {
            played.remove(id);
        }
    }

    Ok(PlanResult::Matched { hand, played })
}

/// Check a follow against the lead.
///
/// `hand` is the follower's hand before the cards are removed; `played`
/// are the cards they put down; `lead_groups` is the lead's decomposition.
pub fn validate_follow(
    hand: &[Card],
    played: &[Card],
    lead_groups: &[Vec<Block>],
    lead_class: SuitClass,
    trump: &Trump,
) -> Result<(), DomainError> {
    let need = total_cards(lead_groups);
    if played.len() != need {
        return Err(illegal(format!("must play {need} cards")));
    }

    let in_class = cards_in_class(hand, trump, lead_class);

    // Not enough of the lead class: all of it must go.
    if in_class.len() <= need {
        let played_ids: BTreeSet<CardId> = played.iter().map(|c| c.id).collect();
        if in_class.iter().any(|c| !played_ids.contains(&c.id)) {
            return Err(illegal("every remaining card of the led suit must be played"));
        }
        return Ok(());
    }

    if played.iter().any(|c| suit_class(c, trump) != lead_class) {
        return Err(illegal("must follow the led suit"));
    }

    let mut remaining = in_class;
    let mut unmatched: BTreeSet<CardId> = played.iter().map(|c| c.id).collect();

    for block in lead_groups.iter().flatten() {
        let mut matched = false;
        for plan in degrade_plans(block.shape()) {
            if let PlanResult::Matched { hand, played } =
                try_plan(&plan, &remaining, &unmatched, trump, lead_class)?
            {
                remaining = hand;
                unmatched = played;
                matched = true;
                break;
            }
        }
        if !matched {
            return Err(illegal("follow does not match the lead pattern"));
        }
    }

    if !unmatched.is_empty() {
        return Err(illegal("follow does not match the lead pattern"));
    }
    Ok(())
}
