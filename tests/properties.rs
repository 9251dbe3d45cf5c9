//! Property tests over arbitrary move sequences.

use proptest::prelude::*;

use battling_knights::engine::{Arena, Outcome};
use battling_knights::entity::{ItemKind, KnightId, Status};
use battling_knights::script::{Direction, Move};

fn any_move() -> impl Strategy<Value = Move> {
    (0..KnightId::ALL.len(), 0..Direction::ALL.len())
        .prop_map(|(k, d)| Move::new(KnightId::ALL[k], Direction::ALL[d]))
}

fn any_script() -> impl Strategy<Value = Vec<Move>> {
    prop::collection::vec(any_move(), 0..200)
}

proptest! {
    #[test]
    fn invariants_hold_after_every_move(moves in any_script()) {
        let mut arena = Arena::new();
        for mv in moves {
            arena.apply(mv);
            prop_assert_eq!(arena.check_invariants(), Ok(()));
        }
    }

    #[test]
    fn every_item_is_reported_somewhere(moves in any_script()) {
        let mut arena = Arena::new();
        for mv in &moves {
            arena.apply(*mv);
        }
        let snap = arena.snapshot();
        for kind in ItemKind::ALL {
            let item = snap.item(kind);
            prop_assert!(item.position.is_some(), "{} has no position", kind);
            let holders = KnightId::ALL
                .iter()
                .filter(|&&id| snap.knight(id).item == Some(kind))
                .count();
            prop_assert_eq!(holders, usize::from(item.equipped));
        }
    }

    #[test]
    fn out_of_play_knights_never_change(moves in any_script()) {
        let mut arena = Arena::new();
        for mv in moves {
            let before = arena.knight(mv.knight).clone();
            let outcome = arena.apply(mv);
            if before.status != Status::Live {
                prop_assert_eq!(outcome, Outcome::Skipped);
                prop_assert_eq!(arena.knight(mv.knight), &before);
            }
        }
    }

    #[test]
    fn drowned_knights_are_stripped(moves in any_script()) {
        let mut arena = Arena::new();
        for mv in moves {
            if let Outcome::Drowned { .. } = arena.apply(mv) {
                let report = arena.snapshot();
                let knight = report.knight(mv.knight);
                prop_assert_eq!(knight.status, Status::Drowned);
                prop_assert_eq!((knight.attack, knight.defence), (0, 0));
                prop_assert_eq!(knight.item, None);
                prop_assert_eq!(knight.position, None);
            }
        }
    }

    #[test]
    fn holding_knights_never_pick_up(moves in any_script()) {
        let mut arena = Arena::new();
        for mv in moves {
            let held = arena.knight(mv.knight).item;
            arena.apply(mv);
            let knight = arena.knight(mv.knight);
            if held.is_some() && knight.is_live() {
                prop_assert_eq!(knight.item, held);
            }
        }
    }
}
