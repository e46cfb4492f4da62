//! Per-viewer projection of the room state.
//!
//! Public facts are identical for every viewer. The viewer's own hand and,
//! for the bottom owner while burying, the picked-up bottom are the only
//! private parts.

use serde::Serialize;

use crate::domain::cards_logic::suit_class;
use crate::domain::cards_types::{Card, CardId, Rank, Suit, SuitClass, Trump};
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::RoundOutcome;
use crate::domain::state::{
    team_of, CallMode, CompletedTrick, GameState, Phase, PlayedMove, Seat, SeatSet, TeamId,
    TrickState, TrumpLock,
};

/// A card plus its suit-class under the trump the viewer sorts by.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView {
    #[serde(flatten)]
    pub card: Card,
    pub class: SuitClass,
}

fn card_views(cards: &[Card], trump: &Trump) -> Vec<CardView> {
    cards
        .iter()
        .map(|c| CardView {
            card: *c,
            class: suit_class(c, trump),
        })
        .collect()
}

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatPublic {
    pub seat: Seat,
    pub uid: Option<String>,
    pub ready: bool,
    pub online: bool,
    pub team: TeamId,
    pub hand_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrumpPublic {
    pub suit: Option<Suit>,
    pub level: Rank,
    pub lock: TrumpLock,
    pub declared_by: Option<Seat>,
}

/// Room-level header present in every snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoomHeader {
    pub room_id: String,
    pub version: u64,
    pub round_index: u32,
    pub seats: [SeatPublic; PLAYERS],
    pub team_levels: [Rank; 2],
    pub starter: Option<Seat>,
    pub next_starter: Seat,
    pub trump: Option<TrumpPublic>,
    pub bottom_owner: Option<Seat>,
    pub bottom_count: usize,
    pub attacker_points: u32,
    pub last_trick: Option<CompletedTrickPublic>,
    pub previous_round: Option<RoundOutcome>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayPublic {
    pub seat: Seat,
    pub cards: Vec<Card>,
    pub class: Option<SuitClass>,
    pub comparable: bool,
}

impl From<&PlayedMove> for PlayPublic {
    fn from(p: &PlayedMove) -> Self {
        Self {
            seat: p.seat,
            cards: p.cards.clone(),
            class: p.class,
            comparable: p.comparable,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThrowPublic {
    pub intended: Vec<CardId>,
    pub accepted: bool,
    pub beaten_by: Option<Seat>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrickPublic {
    pub trick_no: u8,
    pub leader: Seat,
    pub turn: Seat,
    /// Plays so far in order from the leader.
    pub plays: Vec<PlayPublic>,
    pub lead_class: Option<SuitClass>,
    pub winning_seat: Option<Seat>,
    pub throw: Option<ThrowPublic>,
}

impl From<&TrickState> for TrickPublic {
    fn from(t: &TrickState) -> Self {
        Self {
            trick_no: t.trick_no,
            leader: t.leader,
            turn: t.turn,
            plays: t.plays_in_order().into_iter().map(PlayPublic::from).collect(),
            lead_class: t.lead_class,
            winning_seat: t.best.as_ref().map(|b| b.seat),
            throw: t.throw.as_ref().map(|th| ThrowPublic {
                intended: th.intended.clone(),
                accepted: th.accepted,
                beaten_by: th.beaten_by,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletedTrickPublic {
    pub trick_no: u8,
    pub leader: Seat,
    pub winner: Seat,
    pub points: u32,
    pub plays: Vec<PlayPublic>,
}

impl From<&CompletedTrick> for CompletedTrickPublic {
    fn from(t: &CompletedTrick) -> Self {
        Self {
            trick_no: t.trick_no,
            leader: t.leader,
            winner: t.winner,
            points: t.points,
            plays: t.plays.iter().map(PlayPublic::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CallSnapshot {
    pub mode: CallMode,
    pub turn: Option<Seat>,
    pub passes: SeatSet,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BottomSnapshot {
    pub owner: Seat,
    /// Picked-up bottom; present only for the owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Vec<CardView>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FightSnapshot {
    pub owner: Seat,
    pub passes: SeatSet,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", content = "data", rename_all = "snake_case")]
pub enum PhaseSnapshot {
    Lobby,
    Dealing,
    CallTrump(CallSnapshot),
    Bottom(BottomSnapshot),
    TrumpFight(FightSnapshot),
    PlayTrick(TrickPublic),
    RoundSettle(RoundOutcome),
}

/// Everything one viewer is allowed to see.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoomSnapshot {
    pub room: RoomHeader,
    pub phase: PhaseSnapshot,
    pub my_seat: Option<Seat>,
    pub my_hand: Vec<CardView>,
}

/// Project `state` for `viewer` (None for a spectator).
pub fn snapshot_for(state: &GameState, viewer: Option<&str>) -> RoomSnapshot {
    let my_seat = viewer.and_then(|uid| state.seat_of(uid));

    let seats: [SeatPublic; PLAYERS] = std::array::from_fn(|i| {
        let s = &state.seats[i];
        SeatPublic {
            seat: i as Seat,
            uid: s.uid.clone(),
            ready: s.ready,
            online: s.online,
            team: team_of(i as Seat),
            hand_count: s.hand.len(),
        }
    });

    let room = RoomHeader {
        room_id: state.room_id.clone(),
        version: state.version,
        round_index: state.round.index,
        seats,
        team_levels: [state.teams[0].level, state.teams[1].level],
        starter: state.round.starter,
        next_starter: state.next_starter,
        trump: state.round.trump.map(|ts| TrumpPublic {
            suit: ts.trump.suit,
            level: ts.trump.level,
            lock: ts.lock,
            declared_by: ts.declared_by,
        }),
        bottom_owner: state.round.bottom_owner,
        bottom_count: state.round.bottom.len(),
        attacker_points: state.round.attacker_points,
        last_trick: state.round.last_trick.as_ref().map(CompletedTrickPublic::from),
        previous_round: state.previous_round.clone(),
    };

    let phase = match &state.phase {
        Phase::Lobby => PhaseSnapshot::Lobby,
        Phase::Dealing => PhaseSnapshot::Dealing,
        Phase::CallTrump(w) => PhaseSnapshot::CallTrump(CallSnapshot {
            mode: w.mode,
            turn: w.turn,
            passes: w.passes,
        }),
        Phase::Bottom(w) => {
            let bottom = (my_seat == Some(w.owner)).then(|| {
                card_views(&state.round.bottom, &state.view_trump(w.owner))
            });
            PhaseSnapshot::Bottom(BottomSnapshot {
                owner: w.owner,
                bottom,
            })
        }
        Phase::TrumpFight(w) => PhaseSnapshot::TrumpFight(FightSnapshot {
            owner: w.owner,
            passes: w.passes,
        }),
        Phase::PlayTrick(t) => PhaseSnapshot::PlayTrick(TrickPublic::from(t)),
        Phase::RoundSettle(o) => PhaseSnapshot::RoundSettle(o.clone()),
    };

    let my_hand = my_seat
        .map(|seat| card_views(state.hand(seat), &state.view_trump(seat)))
        .unwrap_or_default();

    RoomSnapshot {
        room,
        phase,
        my_seat,
        my_hand,
    }
}
