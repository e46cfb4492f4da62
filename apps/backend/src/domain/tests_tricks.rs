use crate::domain::cards_types::{Rank, Suit, Trump};
use crate::domain::fixtures::CardFixtures;
use crate::domain::scoring::{Dig, SettleKind};
use crate::domain::state::{GameState, Phase, Seat, TrumpLock};
use crate::domain::test_state_helpers::trick_table;
use crate::domain::tricks::{play_cards, PlayCardsResult};
use crate::errors::domain::{DomainError, RuleKind, StateKind};

fn play(state: &mut GameState, seat: Seat, tokens: &[&str]) -> PlayCardsResult {
    play_cards(state, seat, &CardFixtures::ids(tokens)).unwrap()
}

fn hard_two() -> Trump {
    Trump::hard(Rank::Two)
}

/// Hand trump and the buried bottom to `holder` after the round's starter
/// lost them in the fight.
fn contested(state: &mut GameState, holder: Seat, lock: TrumpLock, bottom: &[&str]) {
    if let Some(ts) = state.round.trump.as_mut() {
        ts.declared_by = Some(holder);
        ts.lock = lock;
    }
    state.round.bottom_owner = Some(holder);
    state.round.bottom = CardFixtures::parse_hardcoded(bottom);
}

#[test]
fn highest_card_of_the_led_suit_wins() {
    let mut state = trick_table(
        [&["AS", "3H"], &["5S", "4H"], &["KS", "6H"], &["10S", "7H"]],
        hard_two(),
        0,
        0,
    );
    play(&mut state, 0, &["AS"]);
    play(&mut state, 1, &["5S"]);
    play(&mut state, 2, &["KS"]);
    let result = play(&mut state, 3, &["10S"]);

    assert_eq!(result.trick_winner, Some(0));
    assert!(result.round_outcome.is_none());
    assert_eq!(state.round.attacker_points, 0);
    assert_eq!(state.round.last_trick.as_ref().map(|t| t.points), Some(25));
    match &state.phase {
        Phase::PlayTrick(trick) => {
            assert_eq!(trick.trick_no, 2);
            assert_eq!(trick.leader, 0);
            assert_eq!(trick.turn, 0);
        }
        other => panic!("expected next trick, got {other:?}"),
    }
}

#[test]
fn ruff_takes_the_trick_for_attackers() {
    let mut state = trick_table(
        [&["AS", "3H"], &["BJ", "4H"], &["5S", "6H"], &["KS", "7H"]],
        hard_two(),
        0,
        0,
    );
    play(&mut state, 0, &["AS"]);
    play(&mut state, 1, &["BJ"]);
    play(&mut state, 2, &["5S"]);
    let result = play(&mut state, 3, &["KS"]);

    assert_eq!(result.trick_winner, Some(1));
    assert_eq!(state.round.attacker_points, 15);
}

#[test]
fn mixed_discard_is_not_comparable() {
    let mut state = trick_table(
        [
            &["AS", "AS#1", "9D"],
            &["BJ", "3H", "4H"],
            &["5S", "6S", "7D"],
            &["7S", "8S", "8D"],
        ],
        hard_two(),
        0,
        0,
    );
    play(&mut state, 0, &["AS", "AS#1"]);
    play(&mut state, 1, &["BJ", "3H"]);

    let Phase::PlayTrick(trick) = &state.phase else {
        panic!("trick should still be open");
    };
    let discard = trick.plays[1].as_ref().unwrap();
    assert!(!discard.comparable);
    assert_eq!(discard.class, None);
    assert_eq!(trick.best.as_ref().map(|b| b.seat), Some(0));

    play(&mut state, 2, &["5S", "6S"]);
    let result = play(&mut state, 3, &["7S", "8S"]);
    assert_eq!(result.trick_winner, Some(0));
}

#[test]
fn turn_and_ownership_are_enforced() {
    let mut state = trick_table(
        [&["AS"], &["5S"], &["KS"], &["10S"]],
        Trump::with_suit(Rank::Two, Suit::Hearts),
        0,
        0,
    );
    let before = state.clone();

    match play_cards(&mut state, 2, &CardFixtures::ids(&["KS"])) {
        Err(DomainError::State(StateKind::NotYourTurn, _)) => {}
        other => panic!("expected NotYourTurn, got {other:?}"),
    }
    match play_cards(&mut state, 0, &CardFixtures::ids(&["KS"])) {
        Err(DomainError::Rule(RuleKind::CardNotInHand, _)) => {}
        other => panic!("expected CardNotInHand, got {other:?}"),
    }
    assert_eq!(state, before);
}

#[test]
fn tractor_on_the_last_trick_digs_four_times() {
    let mut state = trick_table(
        [
            &["8H", "9H", "8C", "9C"],
            &["AS", "AS#1", "KS", "KS#1"],
            &["3H", "4H", "6H", "7H"],
            &["3C", "4C", "6C", "7C"],
        ],
        hard_two(),
        0,
        1,
    );
    state.round.bottom = CardFixtures::parse_hardcoded(&["5D", "10D"]);
    state.round.bottom_owner = Some(0);

    play(&mut state, 1, &["AS", "AS#1", "KS", "KS#1"]);
    play(&mut state, 2, &["3H", "4H", "6H", "7H"]);
    play(&mut state, 3, &["3C", "4C", "6C", "7C"]);
    let result = play(&mut state, 0, &["8H", "9H", "8C", "9C"]);

    let outcome = result.round_outcome.expect("last trick settles the round");
    assert_eq!(
        outcome.dig,
        Some(Dig {
            bottom_points: 15,
            multiplier: 4
        })
    );
    assert_eq!(outcome.attacker_points, 80);
    assert_eq!(outcome.settlement.kind, SettleKind::Flip);
    assert_eq!(outcome.levels_after, [Rank::Two, Rank::Two]);
    assert_eq!(outcome.next_starter, 1);
    assert_eq!(state.next_starter, 1);
    assert!(matches!(state.phase, Phase::RoundSettle(_)));
    assert_eq!(state.previous_round, Some(outcome));
}

#[test]
fn declarers_keep_the_bottom_when_they_win_last() {
    let mut state = trick_table([&["AS"], &["3H"], &["4H"], &["5H"]], hard_two(), 0, 0);
    state.round.bottom = CardFixtures::parse_hardcoded(&["10D"]);
    state.round.bottom_owner = Some(0);

    play(&mut state, 0, &["AS"]);
    play(&mut state, 1, &["3H"]);
    play(&mut state, 2, &["4H"]);
    let outcome = play(&mut state, 3, &["5H"]).round_outcome.unwrap();

    assert_eq!(outcome.dig, None);
    assert_eq!(outcome.settlement.kind, SettleKind::Shutout);
    assert_eq!(outcome.levels_after, [Rank::Five, Rank::Two]);
    assert_eq!(state.teams[0].level, Rank::Five);
    assert_eq!(outcome.next_starter, 2);
}

#[test]
fn unburied_bottom_is_never_dug() {
    let mut state = trick_table([&["3S"], &["AS"], &["4S"], &["5S"]], hard_two(), 0, 0);
    state.round.bottom = CardFixtures::parse_hardcoded(&["KD"]);
    state.round.bottom_owner = None;

    play(&mut state, 0, &["3S"]);
    play(&mut state, 1, &["AS"]);
    play(&mut state, 2, &["4S"]);
    let outcome = play(&mut state, 3, &["5S"]).round_outcome.unwrap();

    assert_eq!(outcome.dig, None);
    assert_eq!(outcome.attacker_points, 5);
    assert_eq!(outcome.settlement.kind, SettleKind::Crushing);
}

#[test]
fn changer_keeps_its_own_bottom() {
    let mut state = trick_table(
        [&["3S"], &["AS"], &["4S"], &["KS"]],
        Trump::with_suit(Rank::Two, Suit::Diamonds),
        0,
        0,
    );
    contested(&mut state, 1, TrumpLock::ChangeClosed, &["10C", "KC"]);

    play(&mut state, 0, &["3S"]);
    play(&mut state, 1, &["AS"]);
    play(&mut state, 2, &["4S"]);
    let outcome = play(&mut state, 3, &["KS"]).round_outcome.unwrap();

    assert_eq!(outcome.declarer, 1);
    assert_eq!(outcome.declaring_team, 1);
    assert_eq!(outcome.dig, None);
    assert_eq!(outcome.attacker_points, 0);
    assert_eq!(outcome.settlement.kind, SettleKind::Shutout);
    assert_eq!(outcome.levels_after, [Rank::Two, Rank::Five]);
    assert_eq!(outcome.next_starter, 3);
}

#[test]
fn attacker_trump_holder_is_dug_by_the_starter_team() {
    let mut state = trick_table([&["AS"], &["3S"], &["4S"], &["5S"]], hard_two(), 0, 0);
    contested(&mut state, 3, TrumpLock::Sealed, &["10C", "KC"]);

    play(&mut state, 0, &["AS"]);
    play(&mut state, 1, &["3S"]);
    play(&mut state, 2, &["4S"]);
    let outcome = play(&mut state, 3, &["5S"]).round_outcome.unwrap();

    assert_eq!(outcome.starter, 0);
    assert_eq!(outcome.declaring_team, 1);
    assert_eq!(
        outcome.dig,
        Some(Dig {
            bottom_points: 20,
            multiplier: 1
        })
    );
    assert_eq!(outcome.attacker_points, 25);
    assert_eq!(outcome.settlement.kind, SettleKind::Crushing);
    assert_eq!(outcome.levels_after, [Rank::Two, Rank::Four]);
    assert_eq!(outcome.next_starter, 1);
}
