use proptest::prelude::*;

use crate::domain::blocks::{decompose, BlockKind, Shape};
use crate::domain::cards_logic::suit_class;
use crate::domain::cards_types::{Card, Rank, Suit, SuitClass, Trump};
use crate::domain::fixtures::CardFixtures;
use crate::domain::follow::{degrade_plans, validate_follow};
use crate::domain::test_gens::{class_cards, distinct_cards};
use crate::domain::test_prelude;
use crate::errors::domain::{DomainError, RuleKind};

const SPADES: SuitClass = SuitClass::Plain(Suit::Spades);

fn cards(tokens: &[&str]) -> Vec<Card> {
    CardFixtures::parse_hardcoded(tokens)
}

fn check(lead: &[&str], hand: &[&str], played: &[&str]) -> Result<(), DomainError> {
    let trump = Trump::hard(Rank::Two);
    let groups = decompose(&cards(lead), &trump, SPADES);
    validate_follow(&cards(hand), &cards(played), &groups, SPADES, &trump)
}

fn assert_illegal(result: Result<(), DomainError>) {
    match result {
        Err(DomainError::Rule(RuleKind::IllegalFollow, _)) => {}
        other => panic!("expected IllegalFollow, got {other:?}"),
    }
}

#[test]
fn card_count_must_match_the_lead() {
    assert_illegal(check(&["AS", "AS#1"], &["3S", "4S", "5H"], &["3S"]));
}

#[test]
fn short_suit_must_be_played_out() {
    let hand = ["3S", "4H", "5H"];
    assert!(check(&["AS", "AS#1"], &hand, &["3S", "4H"]).is_ok());
    assert_illegal(check(&["AS", "AS#1"], &hand, &["4H", "5H"]));
}

#[test]
fn void_follower_may_discard_anything() {
    assert!(check(&["AS"], &["4H", "BJ"], &["BJ"]).is_ok());
}

#[test]
fn must_stay_in_the_led_suit_when_holding_enough() {
    assert_illegal(check(&["AS"], &["3S", "4S", "5H"], &["5H"]));
    assert!(check(&["AS"], &["3S", "4S", "5H"], &["4S"]).is_ok());
}

#[test]
fn held_pair_cannot_be_hidden() {
    let hand = ["KS", "KS#1", "QS", "4H"];
    assert!(check(&["AS", "AS#1"], &hand, &["KS", "KS#1"]).is_ok());
    assert_illegal(check(&["AS", "AS#1"], &hand, &["KS", "QS"]));
}

#[test]
fn held_tractor_cannot_be_hidden() {
    let lead = ["AS", "AS#1", "KS", "KS#1"];
    let hand = ["QS", "QS#1", "JS", "JS#1", "9S", "3S"];
    assert!(check(&lead, &hand, &["QS", "QS#1", "JS", "JS#1"]).is_ok());
    assert_illegal(check(&lead, &hand, &["QS", "QS#1", "9S", "3S"]));
}

#[test]
fn tractor_lead_degrades_to_pairs() {
    let lead = ["AS", "AS#1", "KS", "KS#1"];
    let hand = ["QS", "QS#1", "9S", "9S#1", "3S"];
    assert!(check(&lead, &hand, &["QS", "QS#1", "9S", "9S#1"]).is_ok());
    assert_illegal(check(&lead, &hand, &["QS", "QS#1", "9S", "3S"]));

    let one_pair = ["QS", "QS#1", "9S", "5S", "3S"];
    assert!(check(&lead, &one_pair, &["QS", "QS#1", "9S", "3S"]).is_ok());
}

#[test]
fn degrade_ladder_runs_from_full_shape_to_singles() {
    let plans = degrade_plans(Shape::tractor(3));
    assert_eq!(plans.first(), Some(&vec![Shape::tractor(3)]));
    assert!(plans.contains(&vec![Shape::tractor(2), Shape::PAIR]));
    assert!(plans.contains(&vec![Shape::tractor(2), Shape::SINGLE, Shape::SINGLE]));
    assert_eq!(plans.last(), Some(&vec![Shape::SINGLE; 6]));
    assert!(plans
        .iter()
        .all(|p| p.iter().map(Shape::card_count).sum::<usize>() == 6));

    let pair = degrade_plans(Shape::PAIR);
    assert_eq!(pair, vec![vec![Shape::PAIR], vec![Shape::SINGLE, Shape::SINGLE]]);
    assert_eq!(degrade_plans(Shape::SINGLE)[0][0].kind, BlockKind::Single);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// A follower short in the led class who plays all of it, topped up with
    /// any other cards, is legal whatever shape was led.
    #[test]
    fn prop_playing_out_a_short_suit_is_legal(
        (trump, class, cards) in class_cards(12),
        held in any::<prop::sample::Index>(),
        others in distinct_cards(30),
    ) {
        let lead_len = cards.len().div_ceil(2);
        let (lead, rest) = cards.split_at(lead_len);
        let held = &rest[..held.index(lead_len).min(rest.len())];
        let fillers: Vec<Card> = others
            .into_iter()
            .filter(|c| suit_class(c, &trump) != class)
            .collect();
        let top_up = lead_len - held.len();
        if fillers.len() < top_up {
            return Ok(());
        }

        let hand: Vec<Card> = held.iter().chain(fillers.iter()).copied().collect();
        let played: Vec<Card> = held.iter().chain(fillers[..top_up].iter()).copied().collect();
        let groups = decompose(lead, &trump, class);
        prop_assert!(validate_follow(&hand, &played, &groups, class, &trump).is_ok());
    }
}
