//! Round settlement: bottom digging, the points table and level promotion.

use serde::Serialize;

use crate::domain::blocks::BlockKind;
use crate::domain::cards_types::Rank;
use crate::domain::rules::FLIP_THRESHOLD;
use crate::domain::state::{nth_from, partner_of, Seat, TeamId};

/// Named bands of the settlement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleKind {
    /// Attackers scored nothing.
    Shutout,
    /// Below 40.
    Crushing,
    /// 40..80: partial clear.
    Partial,
    /// 80..120: declaring role changes hands, no level change.
    Flip,
    /// 120..160.
    BigWin,
    /// 160..200.
    LargeWin,
    /// 200 and above.
    Perfect,
}

/// Which side of the table a settlement favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Declarers,
    Attackers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub kind: SettleKind,
    /// Side that declares next round.
    pub next_declarers: Side,
    /// Levels gained by `next_declarers`.
    pub levels: u8,
}

/// Map final attacker points to the settlement table.
pub fn settle_points(points: u32) -> Settlement {
    let (kind, next_declarers, levels) = match points {
        0 => (SettleKind::Shutout, Side::Declarers, 3),
        1..=39 => (SettleKind::Crushing, Side::Declarers, 2),
        40..=79 => (SettleKind::Partial, Side::Declarers, 1),
        80..=119 => (SettleKind::Flip, Side::Attackers, 0),
        120..=159 => (SettleKind::BigWin, Side::Attackers, 1),
        160..=199 => (SettleKind::LargeWin, Side::Attackers, 2),
        _ => (SettleKind::Perfect, Side::Attackers, 3),
    };
    debug_assert_eq!(next_declarers == Side::Attackers, points >= FLIP_THRESHOLD);
    Settlement {
        kind,
        next_declarers,
        levels,
    }
}

/// Multiplier applied to bottom points when attackers take the last trick,
/// keyed by the leading block of the winning play.
pub fn dig_multiplier(kind: BlockKind) -> u32 {
    match kind {
        BlockKind::Single => 1,
        BlockKind::Pair => 2,
        BlockKind::Tractor => 4,
    }
}

/// Starter of the next round: the declarer's partner when declarers hold,
/// otherwise the seat after the declarer. `declarer` is the trump holder.
pub fn next_starter(starter: Seat, settlement: &Settlement) -> Seat {
    match settlement.next_declarers {
        Side::Declarers => partner_of(starter),
        Side::Attackers => nth_from(starter, 1),
    }
}

/// Bottom points added on the last trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dig {
    pub bottom_points: u32,
    pub multiplier: u32,
}

impl Dig {
    pub fn total(&self) -> u32 {
        self.bottom_points * self.multiplier
    }
}

/// Summary of a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub round_index: u32,
    pub starter: Seat,
    /// Seat holding trump at the end of the round.
    pub declarer: Seat,
    pub declaring_team: TeamId,
    /// Final attacker total, dig included.
    pub attacker_points: u32,
    pub dig: Option<Dig>,
    pub settlement: Settlement,
    pub levels_after: [Rank; 2],
    pub next_starter: Seat,
}

/// Levels after applying `settlement`, saturating at ace.
pub fn promote_levels(levels: [Rank; 2], declaring_team: TeamId, settlement: &Settlement) -> [Rank; 2] {
    let mut out = levels;
    let gaining = match settlement.next_declarers {
        Side::Declarers => declaring_team,
        Side::Attackers => 1 - declaring_team,
    };
    out[gaining as usize] = out[gaining as usize].advance(settlement.levels);
    out
}
