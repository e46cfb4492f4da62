//! Card patterns: singles, pairs and tractors (runs of consecutive pairs).
//!
//! A pair is two copies of the same face (ids differ by one deck). A tractor
//! of length `n` is `n` pairs whose rank values are exactly consecutive.

use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

use crate::domain::cards_logic::{rank_value, suit_class};
use crate::domain::cards_types::{Card, CardId, SuitClass, Trump};
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BlockKind {
    Single,
    Pair,
    Tractor,
}

/// Block shape independent of the cards it is made of.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Shape {
    pub kind: BlockKind,
    /// Number of pairs in a tractor; zero otherwise.
    pub tractor_len: u8,
}

impl Shape {
    pub const SINGLE: Shape = Shape {
        kind: BlockKind::Single,
        tractor_len: 0,
    };
    pub const PAIR: Shape = Shape {
        kind: BlockKind::Pair,
        tractor_len: 0,
    };

    pub fn tractor(len: u8) -> Shape {
        Shape {
            kind: BlockKind::Tractor,
            tractor_len: len,
        }
    }

    pub fn card_count(&self) -> usize {
        match self.kind {
            BlockKind::Single => 1,
            BlockKind::Pair => 2,
            BlockKind::Tractor => 2 * self.tractor_len as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub class: SuitClass,
    /// Rank value of the card (single, pair) or of the highest pair (tractor).
    pub value: u16,
    pub tractor_len: u8,
    pub cards: Vec<Card>,
}

impl Block {
    pub fn shape(&self) -> Shape {
        Shape {
            kind: self.kind,
            tractor_len: self.tractor_len,
        }
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    fn single(card: Card, class: SuitClass, trump: &Trump) -> Block {
        Block {
            kind: BlockKind::Single,
            class,
            value: rank_value(&card, trump),
            tractor_len: 0,
            cards: vec![card],
        }
    }

    fn tractor(pairs: &[&Block], class: SuitClass) -> Block {
        Block {
            kind: BlockKind::Tractor,
            class,
            value: pairs[0].value,
            tractor_len: pairs.len() as u8,
            cards: pairs.iter().flat_map(|p| p.cards.iter().copied()).collect(),
        }
    }
}

/// Ordering of two blocks of the same shape.
///
/// Blocks are comparable only when kind, tractor length and cardinality match
/// and they share a suit-class or at least one of them is trump. Anything
/// else is an engine fault, never a silent answer.
pub fn compare_blocks(a: &Block, b: &Block) -> Result<Ordering, DomainError> {
    if a.kind != b.kind || a.tractor_len != b.tractor_len || a.cards.len() != b.cards.len() {
        return Err(DomainError::internal(format!(
            "incomparable blocks: {:?}/{} vs {:?}/{}",
            a.kind, a.tractor_len, b.kind, b.tractor_len
        )));
    }
    if a.class != b.class && a.class != SuitClass::Trump && b.class != SuitClass::Trump {
        return Err(DomainError::internal(format!(
            "incomparable suit classes: {:?} vs {:?}",
            a.class, b.class
        )));
    }
    Ok(a.value.cmp(&b.value))
}

/// Pairs among `cards`, in input order of their first card.
fn pairs_in(cards: &[Card], class: SuitClass, trump: &Trump) -> Vec<Block> {
    let ids: HashSet<CardId> = cards.iter().map(|c| c.id).collect();
    cards
        .iter()
        .filter(|c| c.id < c.twin_id() && ids.contains(&c.twin_id()))
        .filter_map(|c| {
            let twin = cards.iter().find(|t| t.id == c.twin_id())?;
            Some(Block {
                kind: BlockKind::Pair,
                class,
                value: rank_value(c, trump),
                tractor_len: 0,
                cards: vec![*c, *twin],
            })
        })
        .collect()
}

/// Every tractor of exactly `len` pairs that can be built from `pairs`
/// (sorted by descending value). Equal-valued pairs each yield a candidate.
fn tractors_from(pairs: &[Block], len: u8, class: SuitClass) -> Vec<Block> {
    fn extend<'a>(
        pairs: &'a [Block],
        chain: &mut Vec<&'a Block>,
        len: usize,
        class: SuitClass,
        out: &mut Vec<Block>,
    ) {
        if chain.len() == len {
            out.push(Block::tractor(chain, class));
            return;
        }
        let Some(last) = chain.last() else {
            return;
        };
        let Some(want) = last.value.checked_sub(1) else {
            return;
        };
        for next in pairs.iter().filter(|p| p.value == want) {
            chain.push(next);
            extend(pairs, chain, len, class, out);
            chain.pop();
        }
    }

    let mut out = Vec::new();
    if len < 2 {
        return out;
    }
    for start in pairs {
        let mut chain = vec![start];
        extend(pairs, &mut chain, len as usize, class, &mut out);
    }
    out
}

/// All blocks of `shape` available in the `class` cards of `hand`, strongest
/// first. Ties keep input order.
pub fn find_blocks(hand: &[Card], trump: &Trump, class: SuitClass, shape: Shape) -> Vec<Block> {
    let cards: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| suit_class(c, trump) == class)
        .collect();

    let mut blocks = match shape.kind {
        BlockKind::Single => cards
            .iter()
            .map(|c| Block::single(*c, class, trump))
            .collect(),
        BlockKind::Pair => pairs_in(&cards, class, trump),
        BlockKind::Tractor => {
            let mut pairs = pairs_in(&cards, class, trump);
            pairs.sort_by_key(|p| Reverse(p.value));
            tractors_from(&pairs, shape.tractor_len, class)
        }
    };
    blocks.sort_by_key(|b| Reverse(b.value));
    blocks
}

/// Split a homogeneous set of cards into its canonical block structure.
///
/// Pairs are consumed greedily into maximal consecutive runs (length two or
/// more becomes a tractor), leftover pairs stand alone and the rest are
/// singles. Output groups: tractors by descending length, then pairs, then
/// singles; each group strongest first. The result depends only on the set
/// of cards, never on their order, so decomposing a flattened decomposition
/// gives it back unchanged.
pub fn decompose(cards: &[Card], trump: &Trump, class: SuitClass) -> Vec<Vec<Block>> {
    let mut sorted = cards.to_vec();
    sorted.sort_by_key(|c| (Reverse(rank_value(c, trump)), c.id));

    let pairs = pairs_in(&sorted, class, trump);
    let paired: HashSet<CardId> = pairs
        .iter()
        .flat_map(|p| p.cards.iter().map(|c| c.id))
        .collect();

    let mut tractors: Vec<Block> = Vec::new();
    let mut lone_pairs: Vec<Block> = Vec::new();
    let mut i = 0;
    while i < pairs.len() {
        let mut j = i;
        while j + 1 < pairs.len() && pairs[j + 1].value + 1 == pairs[j].value {
            j += 1;
        }
        if j > i {
            let run: Vec<&Block> = pairs[i..=j].iter().collect();
            tractors.push(Block::tractor(&run, class));
        } else {
            lone_pairs.push(pairs[i].clone());
        }
        i = j + 1;
    }

    let singles: Vec<Block> = sorted
        .iter()
        .filter(|c| !paired.contains(&c.id))
        .map(|c| Block::single(*c, class, trump))
        .collect();

    // Stable: equal lengths keep descending value order from the run scan.
    tractors.sort_by_key(|t| Reverse(t.tractor_len));

    let mut groups: Vec<Vec<Block>> = Vec::new();
    let mut iter = tractors.into_iter().peekable();
    while let Some(first) = iter.next() {
        let len = first.tractor_len;
        let mut group = vec![first];
        while let Some(next) = iter.next_if(|t| t.tractor_len == len) {
            group.push(next);
        }
        groups.push(group);
    }
    if !lone_pairs.is_empty() {
        groups.push(lone_pairs);
    }
    if !singles.is_empty() {
        groups.push(singles);
    }
    groups
}

/// Cards of a decomposition in group order.
pub fn flatten(groups: &[Vec<Block>]) -> Vec<Card> {
    groups
        .iter()
        .flatten()
        .flat_map(|b| b.cards.iter().copied())
        .collect()
}

/// More than one group, or a group with several blocks, makes a throw.
pub fn is_throw(groups: &[Vec<Block>]) -> bool {
    groups.len() > 1 || groups.first().is_some_and(|g| g.len() > 1)
}

pub fn total_cards(groups: &[Vec<Block>]) -> usize {
    groups.iter().flatten().map(|b| b.cards.len()).sum()
}

/// Greedily carve `count` disjoint blocks of `shape` out of `cards`, best
/// first. Returns the blocks and the cards left over, or `None` when the
/// shape cannot be met.
pub fn take_blocks(
    cards: &[Card],
    trump: &Trump,
    class: SuitClass,
    shape: Shape,
    count: usize,
) -> Option<(Vec<Block>, Vec<Card>)> {
    let mut remaining = cards.to_vec();
    let mut taken = Vec::with_capacity(count);
    for _ in 0..count {
        let best = find_blocks(&remaining, trump, class, shape).into_iter().next()?;
        remaining.retain(|c| !best.cards.iter().any(|b| b.id == c.id));
        taken.push(best);
    }
    Some((taken, remaining))
}
