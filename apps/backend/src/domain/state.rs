use serde::Serialize;

use crate::domain::blocks::Block;
use crate::domain::cards_logic::sort_hand;
use crate::domain::cards_types::{Card, CardId, Rank, SuitClass, Trump};
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::RoundOutcome;
use crate::errors::domain::{DomainError, RuleKind, StateKind};

pub type Seat = u8; // 0..=3
pub type TeamId = u8; // 0 (seats 0, 2) or 1 (seats 1, 3)

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as Seat
}

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    seat_offset(start, n as i8)
}

#[inline]
pub fn team_of(seat: Seat) -> TeamId {
    seat % 2
}

#[inline]
pub fn partner_of(seat: Seat) -> Seat {
    seat_offset(seat, 2)
}

/// Set of seats packed into a bitmask. Used for pass tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeatSet(u8);

impl SeatSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, seat: Seat) {
        self.0 |= 1 << seat;
    }

    pub fn contains(&self, seat: Seat) -> bool {
        self.0 & (1 << seat) != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn seats(&self) -> Vec<Seat> {
        (0..PLAYERS as Seat).filter(|s| self.contains(*s)).collect()
    }
}

impl Serialize for SeatSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seats().serialize(serializer)
    }
}

/// One of the four seats at the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatState {
    /// Occupant id (None when the seat is free).
    pub uid: Option<String>,
    pub ready: bool,
    pub online: bool,
    /// Private hand, kept sorted for display.
    pub hand: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamState {
    pub level: Rank,
}

/// Who may declare during the call window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallMode {
    /// First round: any seat may call, the first valid call wins.
    Race,
    /// Later rounds: seats act in turn starting from the round starter.
    Ordered,
}

/// How far the current trump may still be contested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrumpLock {
    /// Called with one level card: change and attack allowed.
    Open,
    /// Changed once: only an attack remains.
    ChangeClosed,
    /// Called with a pair, or attacked: no further contest.
    Sealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrumpState {
    pub trump: Trump,
    pub lock: TrumpLock,
    /// Seat whose call, change or attack set the current trump.
    /// None after the all-pass fallback.
    pub declared_by: Option<Seat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallWindow {
    pub mode: CallMode,
    /// Seat expected to act in ordered mode; None in race mode.
    pub turn: Option<Seat>,
    pub passes: SeatSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomWindow {
    pub owner: Seat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FightWindow {
    pub owner: Seat,
    pub passes: SeatSet,
}

/// Outcome of the defensibility check on a multi-block lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowOutcome {
    /// Card ids the leader selected.
    pub intended: Vec<CardId>,
    pub accepted: bool,
    /// Defender holding the stronger block when the throw was refused.
    pub beaten_by: Option<Seat>,
}

/// Cards one seat put into the current trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub seat: Seat,
    pub cards: Vec<Card>,
    /// Common suit-class of the cards; None for a mixed discard.
    pub class: Option<SuitClass>,
    /// False for discards that can never win the trick.
    pub comparable: bool,
}

/// Strongest play so far, with its blocks matched to the lead structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestPlay {
    pub seat: Seat,
    pub groups: Vec<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickState {
    /// 1-based within the round.
    pub trick_no: u8,
    pub leader: Seat,
    pub turn: Seat,
    pub plays: [Option<PlayedMove>; PLAYERS],
    pub lead_class: Option<SuitClass>,
    /// Canonical decomposition of the lead.
    pub lead_groups: Vec<Vec<Block>>,
    pub throw: Option<ThrowOutcome>,
    pub best: Option<BestPlay>,
}

impl TrickState {
    pub fn new(trick_no: u8, leader: Seat) -> Self {
        Self {
            trick_no,
            leader,
            turn: leader,
            plays: [None, None, None, None],
            lead_class: None,
            lead_groups: Vec::new(),
            throw: None,
            best: None,
        }
    }

    pub fn is_lead_pending(&self) -> bool {
        self.plays.iter().all(Option::is_none)
    }

    pub fn play_count(&self) -> usize {
        self.plays.iter().filter(|p| p.is_some()).count()
    }

    /// Plays in seating order starting from the leader.
    pub fn plays_in_order(&self) -> Vec<&PlayedMove> {
        (0..PLAYERS as u8)
            .filter_map(|n| self.plays[nth_from(self.leader, n) as usize].as_ref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTrick {
    pub trick_no: u8,
    pub leader: Seat,
    pub winner: Seat,
    pub points: u32,
    /// Plays in order from the leader.
    pub plays: Vec<PlayedMove>,
}

/// Overall table progression. Each phase carries only its own data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Seating and readiness.
    Lobby,
    /// Shuffle and deal in progress; no actions accepted.
    Dealing,
    /// Seats may call trump or pass.
    CallTrump(CallWindow),
    /// Owner must bury the bottom.
    Bottom(BottomWindow),
    /// Non-owner seats may change, attack or pass.
    TrumpFight(FightWindow),
    /// Trick play.
    PlayTrick(TrickState),
    /// Round finished; the next starter may continue.
    RoundSettle(RoundOutcome),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Lobby => "lobby",
            Phase::Dealing => "dealing",
            Phase::CallTrump(_) => "call_trump",
            Phase::Bottom(_) => "bottom",
            Phase::TrumpFight(_) => "trump_fight",
            Phase::PlayTrick(_) => "play_trick",
            Phase::RoundSettle(_) => "round_settle",
        }
    }
}

/// Per-round container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    /// 0-based round index; round 0 uses race calling.
    pub index: u32,
    /// Declaring seat for this round (set by a call or the all-pass fallback).
    pub starter: Option<Seat>,
    pub trump: Option<TrumpState>,
    pub bottom: Vec<Card>,
    /// Seat holding custody of the bottom; None when nobody buried it.
    pub bottom_owner: Option<Seat>,
    /// Points captured by the non-declaring team so far.
    pub attacker_points: u32,
    pub last_trick: Option<CompletedTrick>,
}

impl RoundState {
    pub fn empty(index: u32) -> Self {
        Self {
            index,
            starter: None,
            trump: None,
            bottom: Vec::new(),
            bottom_owner: None,
            attacker_points: 0,
            last_trick: None,
        }
    }
}

/// Table-level settings fixed when the room is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSettings {
    pub starting_level: Rank,
    /// Deal automatically once all four seats are ready.
    pub auto_deal: bool,
}

/// Entire room container, sufficient for pure engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub room_id: String,
    /// Increments once per committed action.
    pub version: u64,
    pub settings: TableSettings,
    pub phase: Phase,
    pub seats: [SeatState; PLAYERS],
    pub teams: [TeamState; 2],
    /// Starter for the next ordered round.
    pub next_starter: Seat,
    pub round: RoundState,
    pub previous_round: Option<RoundOutcome>,
}

impl GameState {
    pub fn new(room_id: impl Into<String>, settings: TableSettings) -> Self {
        let level = settings.starting_level;
        Self {
            room_id: room_id.into(),
            version: 0,
            settings,
            phase: Phase::Lobby,
            seats: Default::default(),
            teams: [TeamState { level }, TeamState { level }],
            next_starter: 0,
            round: RoundState::empty(0),
            previous_round: None,
        }
    }

    pub fn seat_of(&self, uid: &str) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| s.uid.as_deref() == Some(uid))
            .map(|i| i as Seat)
    }

    pub fn require_seat(&self, uid: &str) -> Result<Seat, DomainError> {
        self.seat_of(uid)
            .ok_or_else(|| DomainError::state(StateKind::NotSeated, format!("{uid} holds no seat")))
    }

    pub fn all_ready(&self) -> bool {
        self.seats.iter().all(|s| s.uid.is_some() && s.ready)
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.seats[seat as usize].hand
    }

    pub fn hands(&self) -> [&[Card]; PLAYERS] {
        [
            self.hand(0),
            self.hand(1),
            self.hand(2),
            self.hand(3),
        ]
    }

    pub fn level_of(&self, seat: Seat) -> Rank {
        self.teams[team_of(seat) as usize].level
    }

    /// Trump used for ordering `seat`'s hand: the round trump once set,
    /// otherwise hard trump at the seat's own team level.
    pub fn view_trump(&self, seat: Seat) -> Trump {
        match &self.round.trump {
            Some(ts) => ts.trump,
            None => Trump::hard(self.level_of(seat)),
        }
    }

    pub fn resort_hands(&mut self) {
        for seat in 0..PLAYERS as Seat {
            let trump = self.view_trump(seat);
            sort_hand(&mut self.seats[seat as usize].hand, &trump);
        }
    }

    /// Remove `ids` from `seat`'s hand, returning the cards in `ids` order.
    pub fn take_from_hand(&mut self, seat: Seat, ids: &[CardId]) -> Result<Vec<Card>, DomainError> {
        let hand = &mut self.seats[seat as usize].hand;
        let cards = cards_in_hand(hand, ids)?;
        hand.retain(|c| !ids.contains(&c.id));
        Ok(cards)
    }
}

/// Look up `ids` in `hand` without removing them.
pub fn cards_in_hand(hand: &[Card], ids: &[CardId]) -> Result<Vec<Card>, DomainError> {
    ids.iter()
        .map(|id| {
            hand.iter().find(|c| c.id == *id).copied().ok_or_else(|| {
                DomainError::rule(
                    RuleKind::CardNotInHand,
                    format!("card {id} not in hand"),
                )
            })
        })
        .collect()
}

pub fn require_trump(state: &GameState, ctx: &'static str) -> Result<TrumpState, DomainError> {
    state
        .round
        .trump
        .ok_or_else(|| DomainError::internal(format!("{ctx}: trump must be set")))
}

pub fn require_starter(state: &GameState, ctx: &'static str) -> Result<Seat, DomainError> {
    state
        .round
        .starter
        .ok_or_else(|| DomainError::internal(format!("{ctx}: starter must be set")))
}
