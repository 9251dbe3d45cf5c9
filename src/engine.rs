//! Move engine.
//!
//! The [`Arena`] owns the board and the rosters of knights and items, and
//! applies scripted moves one at a time:
//!
//! - A move by a knight that is no longer live is skipped.
//! - Stepping off the board drowns the knight. Its item is dropped on the
//!   cell it was standing on.
//! - Stepping onto a cell with items picks up the highest priority one,
//!   unless the knight already holds an item.
//! - Stepping onto an occupied cell starts a fight. The attacker scores its
//!   attack plus [`SURPRISE_BONUS`], the defender its defence. The attacker
//!   needs a strictly higher score to win; ties go to the defender. The loser
//!   dies on the contested cell and drops its item there.

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::board::{Board, Point};
use crate::constants::SURPRISE_BONUS;
use crate::entity::{Item, ItemKind, Knight, KnightId, Status};
use crate::script::Move;

/// What a single move did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The knight was not live, nothing happened
    Skipped,
    /// The knight stepped onto an empty cell
    Moved { to: Point },
    /// The knight stepped off the board
    Drowned { from: Point },
    /// The knight attacked and killed the defender
    Won { at: Point, defender: KnightId },
    /// The knight attacked and was killed by the defender
    Lost { at: Point, defender: KnightId },
}

/// A broken arena invariant. These indicate a bug in the engine, never bad input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("live knight {0} is not on the board")]
    LiveKnightMissing(KnightId),
    #[error("knight {0} is on more than one cell")]
    KnightDuplicated(KnightId),
    #[error("knight {0} is on the board but not live")]
    InactiveKnightOnBoard(KnightId),
    #[error("knight {0} is out of play but still has stats or an item")]
    InactiveKnightEquipped(KnightId),
    #[error("item {0} is neither on the board nor held")]
    ItemMissing(ItemKind),
    #[error("item {0} is in more than one place")]
    ItemDuplicated(ItemKind),
    #[error("item {0} has an equipped flag that disagrees with its holder")]
    EquippedMismatch(ItemKind),
}

/// Combat rule: the attacker needs a strictly higher score, ties go to the defender.
pub fn attacker_prevails(attack_score: f64, defence_score: f64) -> bool {
    attack_score > defence_score
}

/// The full game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arena {
    pub board: Board,
    knights: [Knight; 4],
    items: [Item; 4],
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// The standard starting arena.
    pub fn new() -> Self {
        Self::with_board(Board::standard())
    }

    /// An arena over a custom layout. Every knight not placed on `board`
    /// still starts live, so callers are expected to place all four.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            knights: KnightId::ALL.map(Knight::new),
            items: ItemKind::ALL.map(Item::new),
        }
    }

    pub fn knight(&self, id: KnightId) -> &Knight {
        &self.knights[id.index()]
    }

    fn knight_mut(&mut self, id: KnightId) -> &mut Knight {
        &mut self.knights[id.index()]
    }

    pub fn item(&self, kind: ItemKind) -> &Item {
        &self.items[kind.index()]
    }

    fn item_mut(&mut self, kind: ItemKind) -> &mut Item {
        &mut self.items[kind.index()]
    }

    /// Give an item to a knight directly. Used for setting up positions.
    ///
    /// Panics if the knight is already holding something or the item is
    /// not lying on the board.
    pub fn equip(&mut self, id: KnightId, kind: ItemKind) {
        assert!(
            self.knight(id).item.is_none(),
            "knight {id} already holds an item"
        );
        let pt = self
            .board
            .find_item(kind)
            .unwrap_or_else(|| panic!("item {kind} is not on the board"));
        self.board.cell_at_mut(pt).take_item(kind);
        self.item_mut(kind).equipped = true;
        self.knight_mut(id).item = Some(kind);
    }

    /// Apply one scripted move.
    pub fn apply(&mut self, mv: Move) -> Outcome {
        let outcome = self.apply_inner(mv);
        debug!(%mv, ?outcome, "move applied");
        trace!("\n{}", self.board);
        debug_assert_eq!(self.check_invariants(), Ok(()));
        outcome
    }

    fn apply_inner(&mut self, mv: Move) -> Outcome {
        let id = mv.knight;
        if !self.knight(id).is_live() {
            return Outcome::Skipped;
        }
        let Some(from) = self.board.find_knight(id) else {
            return Outcome::Skipped;
        };

        let (dr, dc) = mv.direction.delta();
        let dest = match (from.0.checked_add_signed(dr), from.1.checked_add_signed(dc)) {
            (Some(row), Some(col)) if Board::contains((row, col)) => (row, col),
            _ => {
                self.drown(id, from);
                return Outcome::Drowned { from };
            }
        };

        if self.knight(id).item.is_none() {
            if let Some(kind) = self.board.cell_at(dest).best_item() {
                self.board.cell_at_mut(dest).take_item(kind);
                self.item_mut(kind).equipped = true;
                self.knight_mut(id).item = Some(kind);
                debug!(knight = %id, item = %kind, "picked up item");
            }
        }

        self.board.cell_at_mut(from).knight = None;

        let Some(defender) = self.board.cell_at(dest).knight else {
            self.board.cell_at_mut(dest).knight = Some(id);
            return Outcome::Moved { to: dest };
        };

        let attack = f64::from(self.knight(id).effective_attack()) + SURPRISE_BONUS;
        let defence = f64::from(self.knight(defender).effective_defence());
        if attacker_prevails(attack, defence) {
            self.kill(defender, dest);
            self.board.cell_at_mut(dest).knight = Some(id);
            info!(attacker = %id, %defender, at = ?dest, attack, defence, "attacker wins");
            Outcome::Won { at: dest, defender }
        } else {
            self.kill(id, dest);
            info!(attacker = %id, %defender, at = ?dest, attack, defence, "defender wins");
            Outcome::Lost { at: dest, defender }
        }
    }

    /// Strip a knight's stats and drop whatever it holds on `at`.
    fn take_out(&mut self, id: KnightId, at: Point, status: Status) {
        let knight = self.knight_mut(id);
        knight.status = status;
        knight.attack = 0;
        knight.defence = 0;
        if let Some(kind) = knight.item.take() {
            self.item_mut(kind).equipped = false;
            self.board.cell_at_mut(at).items.push(kind);
        }
    }

    fn drown(&mut self, id: KnightId, from: Point) {
        self.take_out(id, from, Status::Drowned);
        self.board.cell_at_mut(from).knight = None;
        self.knight_mut(id).last_location = None;
        info!(knight = %id, from = ?from, "knight drowned");
    }

    fn kill(&mut self, id: KnightId, at: Point) {
        self.take_out(id, at, Status::Dead);
        self.knight_mut(id).last_location = Some(at);
    }

    /// Where a knight should be reported: its recorded death location if it
    /// has one, otherwise its current square.
    pub fn knight_position(&self, id: KnightId) -> Option<Point> {
        self.knight(id)
            .last_location
            .or_else(|| self.board.find_knight(id))
    }

    /// Where an item is: on the board, or wherever its holder stands.
    pub fn item_position(&self, kind: ItemKind) -> Option<Point> {
        self.board.find_item(kind).or_else(|| {
            KnightId::ALL
                .into_iter()
                .find(|&id| self.knight(id).item == Some(kind))
                .and_then(|id| self.board.find_knight(id))
        })
    }

    /// Verify that every knight and item is accounted for exactly once.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut knight_cells = [0usize; 4];
        let mut item_places = [0usize; 4];

        for (_, cell) in self.board.cells() {
            if let Some(id) = cell.knight {
                knight_cells[id.index()] += 1;
            }
            for kind in &cell.items {
                item_places[kind.index()] += 1;
            }
        }

        for knight in &self.knights {
            let id = knight.id;
            match (knight.is_live(), knight_cells[id.index()]) {
                (true, 0) => return Err(InvariantViolation::LiveKnightMissing(id)),
                (_, n) if n > 1 => return Err(InvariantViolation::KnightDuplicated(id)),
                (false, 1) => return Err(InvariantViolation::InactiveKnightOnBoard(id)),
                _ => {}
            }
            let stripped = knight.item.is_none() && knight.attack == 0 && knight.defence == 0;
            if !knight.is_live() && !stripped {
                return Err(InvariantViolation::InactiveKnightEquipped(id));
            }
            if let Some(kind) = knight.item {
                item_places[kind.index()] += 1;
            }
        }

        for item in &self.items {
            let kind = item.kind;
            match item_places[kind.index()] {
                0 => return Err(InvariantViolation::ItemMissing(kind)),
                1 => {}
                _ => return Err(InvariantViolation::ItemDuplicated(kind)),
            }
            let held = self.knights.iter().any(|k| k.item == Some(kind));
            if held != item.equipped {
                return Err(InvariantViolation::EquippedMismatch(kind));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Direction, parse_move};

    fn mv(token: &str) -> Move {
        parse_move(token).unwrap()
    }

    /// Arena with knights placed at the given squares and items at their
    /// usual starting squares.
    fn arena_with(knights: &[(KnightId, Point)]) -> Arena {
        let mut board = Board::new();
        for &(id, pt) in knights {
            board.cell_at_mut(pt).knight = Some(id);
        }
        for (kind, pt) in crate::constants::ITEM_STARTS {
            board.cell_at_mut(pt).items.push(kind);
        }
        Arena::with_board(board)
    }

    fn corners() -> Vec<(KnightId, Point)> {
        crate::constants::KNIGHT_STARTS.to_vec()
    }

    #[test]
    fn test_plain_move() {
        let mut arena = Arena::new();
        assert_eq!(arena.apply(mv("R:E")), Outcome::Moved { to: (0, 1) });
        assert_eq!(arena.board.find_knight(KnightId::Red), Some((0, 1)));
        assert_eq!(arena.board.cell_at((0, 0)).knight, None);
        assert_eq!(arena.knight(KnightId::Red).status, Status::Live);
    }

    #[test]
    fn test_each_direction() {
        let mut knights = corners();
        knights.retain(|&(id, _)| id != KnightId::Red);
        knights.push((KnightId::Red, (3, 3)));
        let mut arena = arena_with(&knights);

        let expected = [
            (Direction::North, (2, 3)),
            (Direction::East, (2, 4)),
            (Direction::South, (3, 4)),
            (Direction::West, (3, 3)),
        ];
        for (direction, to) in expected {
            let outcome = arena.apply(Move::new(KnightId::Red, direction));
            assert_eq!(outcome, Outcome::Moved { to });
        }
    }

    #[test]
    fn test_drown_at_each_edge() {
        for token in ["R:N", "R:W", "G:S", "G:E"] {
            let mut arena = Arena::new();
            let mv = mv(token);
            let from = arena.board.find_knight(mv.knight).unwrap();
            assert_eq!(arena.apply(mv), Outcome::Drowned { from });

            let knight = arena.knight(mv.knight);
            assert_eq!(knight.status, Status::Drowned);
            assert_eq!((knight.attack, knight.defence), (0, 0));
            assert_eq!(knight.last_location, None);
            assert_eq!(arena.knight_position(mv.knight), None);
            assert_eq!(arena.board.cell_at(from).knight, None);
        }
    }

    #[test]
    fn test_drown_drops_item_on_origin() {
        let mut arena = arena_with(&[
            (KnightId::Red, (2, 0)),
            (KnightId::Green, (7, 7)),
            (KnightId::Yellow, (0, 7)),
            (KnightId::Blue, (7, 0)),
        ]);
        arena.equip(KnightId::Red, ItemKind::Axe);

        assert_eq!(arena.apply(mv("R:W")), Outcome::Drowned { from: (2, 0) });
        assert_eq!(arena.knight(KnightId::Red).item, None);
        assert!(!arena.item(ItemKind::Axe).equipped);
        assert_eq!(arena.board.find_item(ItemKind::Axe), Some((2, 0)));
        assert_eq!(arena.check_invariants(), Ok(()));
    }

    #[test]
    fn test_pickup() {
        let mut arena = arena_with(&[
            (KnightId::Red, (2, 1)),
            (KnightId::Green, (7, 7)),
            (KnightId::Yellow, (0, 7)),
            (KnightId::Blue, (7, 0)),
        ]);
        arena.apply(mv("R:E"));

        let red = arena.knight(KnightId::Red);
        assert_eq!(red.item, Some(ItemKind::Axe));
        assert_eq!(red.effective_attack(), 3);
        assert!(arena.item(ItemKind::Axe).equipped);
        assert_eq!(arena.board.find_item(ItemKind::Axe), None);
        assert_eq!(arena.item_position(ItemKind::Axe), Some((2, 2)));
    }

    #[test]
    fn test_pickup_by_priority() {
        let mut board = Board::new();
        board.cell_at_mut((0, 0)).knight = Some(KnightId::Red);
        board.cell_at_mut((7, 7)).knight = Some(KnightId::Green);
        board.cell_at_mut((0, 7)).knight = Some(KnightId::Yellow);
        board.cell_at_mut((7, 0)).knight = Some(KnightId::Blue);
        board.cell_at_mut((0, 1)).items =
            vec![ItemKind::Helmet, ItemKind::Dagger, ItemKind::MagicStaff];
        board.cell_at_mut((4, 4)).items.push(ItemKind::Axe);
        let mut arena = Arena::with_board(board);

        arena.apply(mv("R:E"));
        assert_eq!(arena.knight(KnightId::Red).item, Some(ItemKind::MagicStaff));
        let mut left = arena.board.cell_at((0, 1)).items.clone();
        left.sort();
        assert_eq!(left, vec![ItemKind::Dagger, ItemKind::Helmet]);
    }

    #[test]
    fn test_no_pickup_when_holding() {
        let mut arena = arena_with(&[
            (KnightId::Red, (2, 4)),
            (KnightId::Green, (7, 7)),
            (KnightId::Yellow, (0, 7)),
            (KnightId::Blue, (7, 0)),
        ]);
        arena.apply(mv("R:E"));
        assert_eq!(arena.knight(KnightId::Red).item, Some(ItemKind::Dagger));

        // Walk to the axe: (2,5) -> (2,2)
        for _ in 0..3 {
            arena.apply(mv("R:W"));
        }
        assert_eq!(arena.board.find_knight(KnightId::Red), Some((2, 2)));
        assert_eq!(arena.knight(KnightId::Red).item, Some(ItemKind::Dagger));
        assert_eq!(arena.board.find_item(ItemKind::Axe), Some((2, 2)));
        assert!(!arena.item(ItemKind::Axe).equipped);
    }

    #[test]
    fn test_attacker_wins() {
        let mut arena = arena_with(&[
            (KnightId::Red, (3, 3)),
            (KnightId::Green, (3, 4)),
            (KnightId::Yellow, (0, 7)),
            (KnightId::Blue, (7, 0)),
        ]);
        assert_eq!(
            arena.apply(mv("R:E")),
            Outcome::Won { at: (3, 4), defender: KnightId::Green }
        );
        assert_eq!(arena.board.find_knight(KnightId::Red), Some((3, 4)));
        assert_eq!(arena.board.cell_at((3, 3)).knight, None);

        let green = arena.knight(KnightId::Green);
        assert_eq!(green.status, Status::Dead);
        assert_eq!(green.last_location, Some((3, 4)));
        assert_eq!((green.effective_attack(), green.effective_defence()), (0, 0));
    }

    #[test]
    fn test_tie_goes_to_defender() {
        assert!(!attacker_prevails(2.0, 2.0));
        assert!(!attacker_prevails(1.5, 1.5));
        assert!(attacker_prevails(1.5, 1.0));
        assert!(!attacker_prevails(1.5, 2.0));
    }

    #[test]
    fn test_attacker_loses() {
        let mut arena = arena_with(&[
            (KnightId::Red, (5, 1)),
            (KnightId::Green, (7, 7)),
            (KnightId::Yellow, (0, 7)),
            (KnightId::Blue, (7, 0)),
        ]);
        arena.apply(mv("R:E"));
        assert_eq!(arena.knight(KnightId::Red).item, Some(ItemKind::MagicStaff));
        assert_eq!(arena.knight(KnightId::Red).effective_defence(), 2);

        for token in ["B:N", "B:N", "B:E"] {
            arena.apply(mv(token));
        }
        assert_eq!(arena.board.find_knight(KnightId::Blue), Some((5, 1)));

        // 1 + 0.5 against a defence of 2
        assert_eq!(
            arena.apply(mv("B:E")),
            Outcome::Lost { at: (5, 2), defender: KnightId::Red }
        );
        let blue = arena.knight(KnightId::Blue);
        assert_eq!(blue.status, Status::Dead);
        assert_eq!(blue.last_location, Some((5, 2)));
        assert_eq!(arena.board.find_knight(KnightId::Red), Some((5, 2)));
        assert_eq!(arena.board.find_knight(KnightId::Blue), None);
        assert_eq!(arena.board.cell_at((5, 1)).knight, None);
    }

    #[test]
    fn test_loser_drops_item_on_contested_cell() {
        let mut arena = arena_with(&[
            (KnightId::Red, (2, 1)),
            (KnightId::Green, (2, 3)),
            (KnightId::Yellow, (0, 7)),
            (KnightId::Blue, (7, 0)),
        ]);
        // Green takes the axe and stands on its square.
        assert_eq!(arena.apply(mv("G:W")), Outcome::Moved { to: (2, 2) });
        assert_eq!(arena.knight(KnightId::Green).item, Some(ItemKind::Axe));

        // Red (1.5) beats Green's defence of 1 and takes the square.
        assert_eq!(
            arena.apply(mv("R:E")),
            Outcome::Won { at: (2, 2), defender: KnightId::Green }
        );
        assert_eq!(arena.knight(KnightId::Green).item, None);
        assert!(!arena.item(ItemKind::Axe).equipped);
        assert_eq!(arena.board.find_item(ItemKind::Axe), Some((2, 2)));
        // Pickup happens before the fight, and the cell was empty of items then.
        assert_eq!(arena.knight(KnightId::Red).item, None);
    }

    #[test]
    fn test_pickup_before_fight() {
        let mut board = Board::new();
        board.cell_at_mut((0, 0)).knight = Some(KnightId::Red);
        board.cell_at_mut((0, 1)).knight = Some(KnightId::Green);
        board.cell_at_mut((0, 7)).knight = Some(KnightId::Yellow);
        board.cell_at_mut((7, 0)).knight = Some(KnightId::Blue);
        board.cell_at_mut((0, 1)).items.push(ItemKind::Helmet);
        board.cell_at_mut((2, 2)).items.push(ItemKind::Axe);
        board.cell_at_mut((2, 5)).items.push(ItemKind::Dagger);
        board.cell_at_mut((5, 2)).items.push(ItemKind::MagicStaff);
        let mut arena = Arena::with_board(board);

        // Red picks up the helmet from under Green, then wins 1.5 vs 1.
        assert_eq!(
            arena.apply(mv("R:E")),
            Outcome::Won { at: (0, 1), defender: KnightId::Green }
        );
        assert_eq!(arena.knight(KnightId::Red).item, Some(ItemKind::Helmet));
        assert!(arena.item(ItemKind::Helmet).equipped);
    }

    #[test]
    fn test_out_of_play_knight_is_skipped() {
        let mut arena = Arena::new();
        arena.apply(mv("R:N"));
        let before = arena.clone();

        for token in ["R:S", "R:E", "R:N", "R:W"] {
            assert_eq!(arena.apply(mv(token)), Outcome::Skipped);
        }
        assert_eq!(arena, before);
    }

    #[test]
    fn test_dead_knight_is_skipped() {
        let mut arena = arena_with(&[
            (KnightId::Red, (3, 3)),
            (KnightId::Green, (3, 4)),
            (KnightId::Yellow, (0, 7)),
            (KnightId::Blue, (7, 0)),
        ]);
        arena.apply(mv("R:E"));
        let before = arena.clone();
        assert_eq!(arena.apply(mv("G:W")), Outcome::Skipped);
        assert_eq!(arena, before);
        assert_eq!(arena.knight_position(KnightId::Green), Some((3, 4)));
    }

    #[test]
    fn test_invariants_detect_duplicate_item() {
        let mut arena = Arena::new();
        arena.board.cell_at_mut((4, 4)).items.push(ItemKind::Axe);
        assert_eq!(
            arena.check_invariants(),
            Err(InvariantViolation::ItemDuplicated(ItemKind::Axe))
        );
    }

    #[test]
    fn test_invariants_detect_missing_knight() {
        let mut arena = Arena::new();
        arena.board.cell_at_mut((0, 0)).knight = None;
        assert_eq!(
            arena.check_invariants(),
            Err(InvariantViolation::LiveKnightMissing(KnightId::Red))
        );
    }
}
