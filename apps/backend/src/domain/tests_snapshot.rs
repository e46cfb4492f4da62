use serde_json::json;

use crate::domain::actions::Action;
use crate::domain::cards_types::SuitClass;
use crate::domain::fixtures::CardFixtures;
use crate::domain::reducer::reduce;
use crate::domain::snapshot::{snapshot_for, PhaseSnapshot};
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::{call_table, race, seated_lobby, settings, BOTTOM};

const HANDS: [&[&str]; 4] = [
    &["BJ", "2H", "AS", "KS"],
    &["BJ#1", "2D", "2D#1", "3S"],
    &["QS", "JS", "7S", "8S"],
    &["SJ", "SJ#1", "5S", "6S"],
];

fn called_by_ana() -> GameState {
    let state = call_table(HANDS, race());
    let action = Action::CallTrump {
        joker: CardFixtures::ids(&["BJ"])[0],
        level_cards: CardFixtures::ids(&["2H"]),
    };
    reduce(&state, "ana", &action).unwrap().state
}

#[test]
fn spectator_sees_only_public_facts() {
    let state = GameState::new("room-9", settings());
    let view = snapshot_for(&state, None);
    assert_eq!(view.my_seat, None);
    assert!(view.my_hand.is_empty());
    assert_eq!(view.phase, PhaseSnapshot::Lobby);
    assert_eq!(view.room.room_id, "room-9");
    assert!(view.room.seats.iter().all(|s| s.uid.is_none() && s.hand_count == 0));
}

#[test]
fn players_see_their_own_hand_only() {
    let state = call_table(HANDS, race());
    let view = snapshot_for(&state, Some("bo"));
    assert_eq!(view.my_seat, Some(1));
    assert_eq!(view.my_hand.len(), 4);
    assert!(view.room.seats.iter().all(|s| s.hand_count == 4));
    assert_eq!(view.room.seats[1].team, 1);
    assert!(view.room.trump.is_none());

    // Before any call each seat sorts under hard trump at its own level.
    let classes: Vec<SuitClass> = view.my_hand.iter().map(|c| c.class).collect();
    assert_eq!(classes.iter().filter(|c| **c == SuitClass::Trump).count(), 3);
    assert_eq!(view.my_hand[0].card.id, CardFixtures::ids(&["BJ#1"])[0]);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["phase"]["phase"], "call_trump");
    assert_eq!(json["phase"]["data"]["mode"], "race");
    assert_eq!(json["my_hand"][0], json!({"id": 107, "rank": "BJ", "class": "TRUMP"}));
}

#[test]
fn bottom_is_shown_to_its_owner_alone() {
    let state = called_by_ana();
    assert!(matches!(state.phase, Phase::Bottom(_)));

    let owner = snapshot_for(&state, Some("ana"));
    let PhaseSnapshot::Bottom(bottom) = &owner.phase else {
        panic!("expected bottom phase, got {:?}", owner.phase);
    };
    let shown: Vec<u8> = bottom
        .bottom
        .as_ref()
        .expect("owner sees the bottom")
        .iter()
        .map(|c| c.card.id)
        .collect();
    assert_eq!(shown, CardFixtures::ids(&BOTTOM));
    assert_eq!(owner.my_hand.len(), 12);

    let other = snapshot_for(&state, Some("cy"));
    let PhaseSnapshot::Bottom(bottom) = &other.phase else {
        panic!("expected bottom phase");
    };
    assert!(bottom.bottom.is_none());
    let json = serde_json::to_value(&other).unwrap();
    assert!(json["phase"]["data"].get("bottom").is_none());
    assert_eq!(json["room"]["trump"], json!({"suit": "H", "level": "2", "lock": "open", "declared_by": 0}));
}

#[test]
fn lobby_snapshot_tracks_readiness_and_version() {
    let state = seated_lobby();
    let next = reduce(&state, "bo", &Action::Unready).unwrap().state;
    let view = snapshot_for(&next, Some("ana"));
    assert_eq!(view.room.version, state.version + 1);
    assert!(!view.room.seats[1].ready);
    assert!(view.room.seats[0].ready);
    assert_eq!(view.my_seat, Some(0));
}
