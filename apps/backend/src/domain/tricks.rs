use std::cmp::Ordering;

use tracing::{debug, info};

use crate::domain::blocks::{compare_blocks, take_blocks, Block, BlockKind};
use crate::domain::cards_logic::{common_class, total_points};
use crate::domain::cards_types::{Card, CardId, SuitClass, Trump};
use crate::domain::follow::validate_follow;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{
    dig_multiplier, next_starter, promote_levels, settle_points, Dig, RoundOutcome,
};
use crate::domain::state::{
    cards_in_hand, next_seat, require_starter, require_trump, team_of, BestPlay, CompletedTrick,
    GameState, Phase, PlayedMove, Seat, ThrowOutcome, TrickState,
};
use crate::domain::throw::canonicalize_lead;
use crate::errors::domain::{DomainError, StateKind};

/// Result of playing cards, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardsResult {
    /// Ids that actually left the hand (a refused throw plays fewer).
    pub played: Vec<CardId>,
    /// Throw check outcome when the lead was a throw.
    pub throw: Option<ThrowOutcome>,
    /// Winner of the trick, if this play completed it.
    pub trick_winner: Option<Seat>,
    /// Set when this play finished the round.
    pub round_outcome: Option<RoundOutcome>,
}

/// Try to fit the lead structure inside `cards` and beat `best` group by
/// group. Returns the matched groups when every group's top block is
/// strictly stronger.
pub fn overtakes(
    cards: &[Card],
    class: SuitClass,
    trump: &Trump,
    best: &[Vec<Block>],
) -> Result<Option<Vec<Vec<Block>>>, DomainError> {
    let mut remaining = cards.to_vec();
    let mut matched = Vec::with_capacity(best.len());
    for group in best {
        let Some(top) = group.first() else {
            continue;
        };
        let Some((blocks, rest)) = take_blocks(&remaining, trump, class, top.shape(), group.len())
        else {
            return Ok(None);
        };
        if compare_blocks(&blocks[0], top)? != Ordering::Greater {
            return Ok(None);
        }
        matched.push(blocks);
        remaining = rest;
    }
    Ok(Some(matched))
}

/// Play `ids` from `seat` into the current trick, enforcing phase, turn,
/// lead shape and follow rules. Completes the trick and, after the last
/// trick, settles the round.
pub fn play_cards(
    state: &mut GameState,
    seat: Seat,
    ids: &[CardId],
) -> Result<PlayCardsResult, DomainError> {
    let Phase::PlayTrick(trick) = &state.phase else {
        return Err(DomainError::state(StateKind::WrongPhase, "no trick in progress"));
    };
    if trick.turn != seat {
        return Err(DomainError::state(
            StateKind::NotYourTurn,
            format!("seat {} plays next", trick.turn),
        ));
    }
    let trump = require_trump(state, "play_cards")?.trump;
    let selected = cards_in_hand(state.hand(seat), ids)?;

    let mut trick = trick.clone();
    let (played, throw) = if trick.is_lead_pending() {
        let lead = canonicalize_lead(seat, &selected, &state.hands(), &trump)?;
        let cards = lead.cards();
        trick.lead_class = Some(lead.class);
        trick.best = Some(BestPlay {
            seat,
            groups: lead.groups.clone(),
        });
        trick.lead_groups = lead.groups;
        trick.throw = lead.throw.clone();
        trick.plays[seat as usize] = Some(PlayedMove {
            seat,
            cards: cards.clone(),
            class: Some(lead.class),
            comparable: true,
        });
        (cards, lead.throw)
    } else {
        let lead_class = trick
            .lead_class
            .ok_or_else(|| DomainError::internal("follow without a lead class"))?;
        validate_follow(state.hand(seat), &selected, &trick.lead_groups, lead_class, &trump)?;

        let class = common_class(&selected, &trump);
        let comparable = matches!(class, Some(c) if c == lead_class || c == SuitClass::Trump);
        if let (Some(class), true) = (class, comparable) {
            let best = trick
                .best
                .as_ref()
                .ok_or_else(|| DomainError::internal("trick has no best play"))?;
            if let Some(groups) = overtakes(&selected, class, &trump, &best.groups)? {
                debug!(seat, "takes the lead in the trick");
                trick.best = Some(BestPlay { seat, groups });
            }
        }
        trick.plays[seat as usize] = Some(PlayedMove {
            seat,
            cards: selected.clone(),
            class,
            comparable,
        });
        (selected, None)
    };

    let played_ids: Vec<CardId> = played.iter().map(|c| c.id).collect();
    state.take_from_hand(seat, &played_ids)?;
    trick.turn = next_seat(seat);

    let mut result = PlayCardsResult {
        played: played_ids,
        throw,
        trick_winner: None,
        round_outcome: None,
    };

    if trick.play_count() < PLAYERS {
        state.phase = Phase::PlayTrick(trick);
        return Ok(result);
    }

    let (winner, outcome) = complete_trick(state, trick)?;
    result.trick_winner = Some(winner);
    result.round_outcome = outcome;
    Ok(result)
}

/// Score a full trick, archive it and move to the next trick or settle.
fn complete_trick(
    state: &mut GameState,
    trick: TrickState,
) -> Result<(Seat, Option<RoundOutcome>), DomainError> {
    let best = trick
        .best
        .as_ref()
        .ok_or_else(|| DomainError::internal("complete trick has no best play"))?;
    let winner = best.seat;
    let winning_kind = best
        .groups
        .first()
        .and_then(|g| g.first())
        .map(|b| b.kind)
        .unwrap_or(BlockKind::Single);

    let starter = require_starter(state, "complete_trick")?;
    // Change and attack hand the declaring role to the challenger.
    let declarer = state
        .round
        .trump
        .and_then(|ts| ts.declared_by)
        .unwrap_or(starter);
    let declaring_team = team_of(declarer);
    let plays: Vec<PlayedMove> = trick.plays_in_order().into_iter().cloned().collect();
    let points = total_points(plays.iter().flat_map(|p| p.cards.iter()));
    if team_of(winner) != declaring_team {
        state.round.attacker_points += points;
    }
    debug!(
        trick_no = trick.trick_no,
        winner,
        points,
        attacker_points = state.round.attacker_points,
        "trick complete"
    );

    state.round.last_trick = Some(CompletedTrick {
        trick_no: trick.trick_no,
        leader: trick.leader,
        winner,
        points,
        plays,
    });

    if state.seats.iter().any(|s| !s.hand.is_empty()) {
        state.phase = Phase::PlayTrick(TrickState::new(trick.trick_no + 1, winner));
        return Ok((winner, None));
    }

    // Bottom points go to attackers only when they take the last trick and
    // someone actually buried the bottom.
    let dig = (team_of(winner) != declaring_team && state.round.bottom_owner.is_some()).then(|| {
        Dig {
            bottom_points: total_points(&state.round.bottom),
            multiplier: dig_multiplier(winning_kind),
        }
    });
    if let Some(dig) = dig {
        state.round.attacker_points += dig.total();
    }

    let settlement = settle_points(state.round.attacker_points);
    let levels_before = [state.teams[0].level, state.teams[1].level];
    let levels_after = promote_levels(levels_before, declaring_team, &settlement);
    state.teams[0].level = levels_after[0];
    state.teams[1].level = levels_after[1];
    let next = next_starter(declarer, &settlement);
    state.next_starter = next;

    let outcome = RoundOutcome {
        round_index: state.round.index,
        starter,
        declarer,
        declaring_team,
        attacker_points: state.round.attacker_points,
        dig,
        settlement,
        levels_after,
        next_starter: next,
    };
    info!(
        round = outcome.round_index,
        attacker_points = outcome.attacker_points,
        kind = ?outcome.settlement.kind,
        next_starter = next,
        "round settled"
    );
    state.previous_round = Some(outcome.clone());
    state.phase = Phase::RoundSettle(outcome.clone());
    Ok((winner, Some(outcome)))
}
