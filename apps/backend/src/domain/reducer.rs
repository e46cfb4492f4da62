//! Phase machine: one pure transition per action.
//!
//! `reduce` never mutates its input. It validates the action's structure,
//! dispatches on the current phase and returns a fresh state (with the
//! version bumped) or an error leaving the caller's state untouched.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::actions::Action;
use crate::domain::cards_types::{CardId, Trump};
use crate::domain::dealing::shuffle_and_deal;
use crate::domain::rules::{CALL_PASSES_FOR_HARD_TRUMP, FIGHT_PASSES_TO_PLAY, PLAYERS};
use crate::domain::state::{
    cards_in_hand, next_seat, require_starter, require_trump, BottomWindow, CallMode, CallWindow,
    FightWindow, GameState, Phase, RoundState, Seat, SeatSet, SeatState, TrickState, TrumpLock,
    TrumpState,
};
use crate::domain::tricks::play_cards;
use crate::domain::trump::{validate_attack, validate_call, validate_change};
use crate::errors::domain::{DomainError, StateKind};

/// Informational event attached to a successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A throw was refused; only the forced block was played.
    ThrowRefused {
        seat: Seat,
        intended: Vec<CardId>,
        played: Vec<CardId>,
        beaten_by: Option<Seat>,
    },
    /// Everyone passed; hard trump applies and play starts.
    HardTrump { starter: Seat },
    TrumpChanged { seat: Seat, trump: Trump },
    TrumpAttacked { seat: Seat },
}

/// Output of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub state: GameState,
    /// False when the action was accepted but changed nothing.
    pub changed: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Default)]
struct Step {
    changed: bool,
    notice: Option<Notice>,
}

impl Step {
    fn changed() -> Self {
        Self {
            changed: true,
            notice: None,
        }
    }

    fn unchanged() -> Self {
        Self::default()
    }

    fn with_notice(notice: Notice) -> Self {
        Self {
            changed: true,
            notice: Some(notice),
        }
    }
}

/// Apply `action` from `actor` using the thread RNG for any deal.
pub fn reduce(state: &GameState, actor: &str, action: &Action) -> Result<Reduced, DomainError> {
    reduce_with_rng(state, actor, action, &mut rand::rng())
}

/// Apply `action` from `actor`; `rng` drives the shuffle when the action
/// deals a new round.
pub fn reduce_with_rng<R: Rng>(
    state: &GameState,
    actor: &str,
    action: &Action,
    rng: &mut R,
) -> Result<Reduced, DomainError> {
    action.validate_structure()?;

    let mut next = state.clone();
    let step = match apply(&mut next, actor, action, rng) {
        Ok(step) => step,
        Err(err) => {
            if err.is_system() {
                error!(room = %state.room_id, actor, action = action.name(), error = %err, "engine fault");
            }
            return Err(err);
        }
    };

    if step.changed {
        next.version += 1;
        debug!(
            room = %next.room_id,
            actor,
            action = action.name(),
            phase = next.phase.name(),
            version = next.version,
            "action applied"
        );
    }
    Ok(Reduced {
        state: next,
        changed: step.changed,
        notice: step.notice,
    })
}

/// Mark a seat's occupant online or offline. Going offline in the lobby also
/// clears readiness. Returns None when nothing changes.
pub fn set_presence(state: &GameState, uid: &str, online: bool) -> Option<GameState> {
    let seat = state.seat_of(uid)? as usize;
    let clear_ready = !online && state.phase == Phase::Lobby && state.seats[seat].ready;
    if state.seats[seat].online == online && !clear_ready {
        return None;
    }
    let mut next = state.clone();
    next.seats[seat].online = online;
    if clear_ready {
        next.seats[seat].ready = false;
    }
    next.version += 1;
    Some(next)
}

fn apply<R: Rng>(
    state: &mut GameState,
    actor: &str,
    action: &Action,
    rng: &mut R,
) -> Result<Step, DomainError> {
    let phase = state.phase.clone();
    match (&phase, action) {
        (Phase::Lobby, Action::Sit { seat }) => sit(state, actor, *seat),
        (Phase::Lobby, Action::LeaveSeat) => leave_seat(state, actor),
        (Phase::Lobby, Action::Ready) => set_ready(state, actor, true, rng),
        (Phase::Lobby, Action::Unready) => set_ready(state, actor, false, rng),
        (Phase::Lobby, Action::Start) => start(state, actor, rng),
        (Phase::CallTrump(window), Action::CallTrump { joker, level_cards }) => {
            call_trump(state, *window, actor, *joker, level_cards)
        }
        (Phase::CallTrump(window), Action::CallPass) => call_pass(state, *window, actor),
        (Phase::Bottom(window), Action::PutBottom { discard }) => {
            put_bottom(state, *window, actor, discard)
        }
        (Phase::TrumpFight(window), Action::ChangeTrump { joker, level_cards }) => {
            change_trump(state, *window, actor, *joker, level_cards)
        }
        (Phase::TrumpFight(window), Action::AttackTrump { jokers }) => {
            attack_trump(state, *window, actor, jokers)
        }
        (Phase::TrumpFight(window), Action::CallPass) => fight_pass(state, *window, actor),
        (Phase::PlayTrick(_), Action::PlayCards { cards }) => play(state, actor, cards),
        (Phase::RoundSettle(outcome), Action::StartNextRound) => {
            next_round(state, outcome.next_starter, actor, rng)
        }
        (phase, action) => Err(DomainError::state(
            StateKind::WrongPhase,
            format!("{} is not accepted during {}", action.name(), phase.name()),
        )),
    }
}

// ---------------------------------------------------------------------------
// Lobby

fn sit(state: &mut GameState, actor: &str, seat: Seat) -> Result<Step, DomainError> {
    let target = &state.seats[seat as usize];
    match target.uid.as_deref() {
        Some(uid) if uid == actor => return Ok(Step::unchanged()),
        Some(_) => {
            return Err(DomainError::state(
                StateKind::SeatTaken,
                format!("seat {seat} is taken"),
            ))
        }
        None => {}
    }

    if let Some(old) = state.seat_of(actor) {
        state.seats[old as usize] = SeatState::default();
    }
    state.seats[seat as usize] = SeatState {
        uid: Some(actor.to_owned()),
        ready: false,
        online: true,
        hand: Vec::new(),
    };
    Ok(Step::changed())
}

fn leave_seat(state: &mut GameState, actor: &str) -> Result<Step, DomainError> {
    let seat = state.require_seat(actor)?;
    state.seats[seat as usize] = SeatState::default();
    Ok(Step::changed())
}

fn set_ready<R: Rng>(
    state: &mut GameState,
    actor: &str,
    ready: bool,
    rng: &mut R,
) -> Result<Step, DomainError> {
    let seat = state.require_seat(actor)?;
    if state.seats[seat as usize].ready == ready {
        return Ok(Step::unchanged());
    }
    state.seats[seat as usize].ready = ready;
    if ready && state.settings.auto_deal && state.all_ready() {
        deal_round(state, rng, CallMode::Race, 0)?;
    }
    Ok(Step::changed())
}

fn start<R: Rng>(state: &mut GameState, actor: &str, rng: &mut R) -> Result<Step, DomainError> {
    state.require_seat(actor)?;
    if !state.all_ready() {
        return Err(DomainError::state(
            StateKind::NotReady,
            "all four seats must be taken and ready",
        ));
    }
    deal_round(state, rng, CallMode::Race, 0)?;
    Ok(Step::changed())
}

/// Shuffle, deal and open the call window for round `index`.
fn deal_round<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    mode: CallMode,
    index: u32,
) -> Result<(), DomainError> {
    state.phase = Phase::Dealing;
    let deal = shuffle_and_deal(rng)?;
    for (seat, hand) in state.seats.iter_mut().zip(deal.hands) {
        seat.hand = hand;
    }
    state.round = RoundState::empty(index);
    state.round.bottom = deal.bottom;
    state.resort_hands();

    let turn = match mode {
        CallMode::Race => None,
        CallMode::Ordered => Some(state.next_starter),
    };
    state.phase = Phase::CallTrump(CallWindow {
        mode,
        turn,
        passes: SeatSet::empty(),
    });
    info!(room = %state.room_id, round = index, ?mode, "round dealt");
    Ok(())
}

// ---------------------------------------------------------------------------
// Calling

fn require_call_turn(window: &CallWindow, seat: Seat) -> Result<(), DomainError> {
    match window.turn {
        Some(turn) if window.mode == CallMode::Ordered && turn != seat => Err(DomainError::state(
            StateKind::NotYourTurn,
            format!("seat {turn} acts next"),
        )),
        _ => Ok(()),
    }
}

fn call_trump(
    state: &mut GameState,
    window: CallWindow,
    actor: &str,
    joker: CardId,
    level_cards: &[CardId],
) -> Result<Step, DomainError> {
    let seat = state.require_seat(actor)?;
    require_call_turn(&window, seat)?;

    let joker = cards_in_hand(state.hand(seat), &[joker])?[0];
    let levels = cards_in_hand(state.hand(seat), level_cards)?;
    let mut declared = validate_call(state.level_of(seat), &joker, &levels)?;
    declared.declared_by = Some(seat);

    info!(room = %state.room_id, seat, trump = ?declared.trump, lock = ?declared.lock, "trump called");
    state.round.trump = Some(declared);
    state.round.starter = Some(seat);
    state.resort_hands();
    enter_bottom(state, seat);
    Ok(Step::changed())
}

fn call_pass(state: &mut GameState, window: CallWindow, actor: &str) -> Result<Step, DomainError> {
    let seat = state.require_seat(actor)?;
    require_call_turn(&window, seat)?;
    if window.passes.contains(seat) {
        return Err(DomainError::state(StateKind::AlreadyPassed, "already passed"));
    }

    let mut window = window;
    window.passes.insert(seat);
    if window.mode == CallMode::Ordered {
        window.turn = Some(next_seat(seat));
    }

    if window.passes.count() < CALL_PASSES_FOR_HARD_TRUMP {
        state.phase = Phase::CallTrump(window);
        return Ok(Step::changed());
    }

    let starter = match window.mode {
        CallMode::Race => 0,
        CallMode::Ordered => state.next_starter,
    };
    state.round.trump = Some(TrumpState {
        trump: Trump::hard(state.level_of(starter)),
        lock: TrumpLock::Sealed,
        declared_by: None,
    });
    state.round.starter = Some(starter);
    state.resort_hands();
    state.phase = Phase::PlayTrick(TrickState::new(1, starter));
    info!(room = %state.room_id, starter, "all passed, hard trump");
    Ok(Step::with_notice(Notice::HardTrump { starter }))
}

/// Hand the bottom to `owner` and wait for them to bury it. The picked-up
/// cards stay recorded so the owner can see them until they bury.
fn enter_bottom(state: &mut GameState, owner: Seat) {
    let bottom = state.round.bottom.clone();
    state.seats[owner as usize].hand.extend(bottom);
    state.round.bottom_owner = Some(owner);
    state.resort_hands();
    state.phase = Phase::Bottom(BottomWindow { owner });
}

// ---------------------------------------------------------------------------
// Bottom and trump fight

fn put_bottom(
    state: &mut GameState,
    window: BottomWindow,
    actor: &str,
    discard: &[CardId],
) -> Result<Step, DomainError> {
    let seat = state.require_seat(actor)?;
    if seat != window.owner {
        return Err(DomainError::state(
            StateKind::NotEntitled,
            format!("seat {} holds the bottom", window.owner),
        ));
    }
    let buried = state.take_from_hand(seat, discard)?;
    state.round.bottom = buried;
    state.phase = Phase::TrumpFight(FightWindow {
        owner: seat,
        passes: SeatSet::empty(),
    });
    debug!(room = %state.room_id, seat, "bottom buried");
    Ok(Step::changed())
}

fn require_challenger(state: &GameState, window: &FightWindow, actor: &str) -> Result<Seat, DomainError> {
    let seat = state.require_seat(actor)?;
    if seat == window.owner {
        return Err(DomainError::state(
            StateKind::NotEntitled,
            "the bottom owner cannot contest the trump",
        ));
    }
    Ok(seat)
}

fn fight_pass(state: &mut GameState, window: FightWindow, actor: &str) -> Result<Step, DomainError> {
    let seat = require_challenger(state, &window, actor)?;
    if window.passes.contains(seat) {
        return Err(DomainError::state(StateKind::AlreadyPassed, "already passed"));
    }
    let mut window = window;
    window.passes.insert(seat);

    if window.passes.count() < FIGHT_PASSES_TO_PLAY {
        state.phase = Phase::TrumpFight(window);
        return Ok(Step::changed());
    }

    let leader = require_starter(state, "fight_pass")?;
    state.phase = Phase::PlayTrick(TrickState::new(1, leader));
    info!(room = %state.room_id, leader, "trick play begins");
    Ok(Step::changed())
}

fn change_trump(
    state: &mut GameState,
    window: FightWindow,
    actor: &str,
    joker: CardId,
    level_cards: &[CardId],
) -> Result<Step, DomainError> {
    let seat = require_challenger(state, &window, actor)?;
    let current = require_trump(state, "change_trump")?;
    let joker = cards_in_hand(state.hand(seat), &[joker])?[0];
    let levels = cards_in_hand(state.hand(seat), level_cards)?;
    let mut changed = validate_change(&current, &joker, &levels)?;
    changed.declared_by = Some(seat);

    info!(room = %state.room_id, seat, trump = ?changed.trump, "trump changed");
    state.round.trump = Some(changed);
    state.resort_hands();
    enter_bottom(state, seat);
    Ok(Step::with_notice(Notice::TrumpChanged {
        seat,
        trump: changed.trump,
    }))
}

fn attack_trump(
    state: &mut GameState,
    window: FightWindow,
    actor: &str,
    jokers: &[CardId],
) -> Result<Step, DomainError> {
    let seat = require_challenger(state, &window, actor)?;
    let current = require_trump(state, "attack_trump")?;
    let jokers = cards_in_hand(state.hand(seat), jokers)?;
    let mut attacked = validate_attack(&current, &jokers)?;
    attacked.declared_by = Some(seat);

    info!(room = %state.room_id, seat, "trump attacked");
    state.round.trump = Some(attacked);
    state.resort_hands();
    enter_bottom(state, seat);
    Ok(Step::with_notice(Notice::TrumpAttacked { seat }))
}

// ---------------------------------------------------------------------------
// Play and settlement

fn play(state: &mut GameState, actor: &str, cards: &[CardId]) -> Result<Step, DomainError> {
    let seat = state.require_seat(actor)?;
    let result = play_cards(state, seat, cards)?;

    let notice = match result.throw {
        Some(throw) if !throw.accepted => Some(Notice::ThrowRefused {
            seat,
            intended: throw.intended,
            played: result.played,
            beaten_by: throw.beaten_by,
        }),
        _ => None,
    };
    Ok(Step {
        changed: true,
        notice,
    })
}

fn next_round<R: Rng>(
    state: &mut GameState,
    next_starter: Seat,
    actor: &str,
    rng: &mut R,
) -> Result<Step, DomainError> {
    let seat = state.require_seat(actor)?;
    if seat != next_starter {
        return Err(DomainError::state(
            StateKind::NotEntitled,
            format!("seat {next_starter} starts the next round"),
        ));
    }
    if state.seats.iter().any(|s| s.uid.is_none()) {
        return Err(DomainError::state(
            StateKind::NotReady,
            format!("all {PLAYERS} seats must be taken"),
        ));
    }
    let index = state.round.index + 1;
    deal_round(state, rng, CallMode::Ordered, index)?;
    Ok(Step::changed())
}
