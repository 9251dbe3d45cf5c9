//! Constants for the arena geometry, starting layout and combat rules.
//!
//! The arena is a fixed 8x8 grid. Coordinates are `(row, col)` with the
//! origin in the top-left corner; rows grow downward and columns grow
//! rightward.

use crate::entity::{ItemKind, KnightId};

// =============================================================================
// Arena Geometry
// =============================================================================

/// Arena size (NxN).
pub const N: usize = 8;

/// Total number of cells on the board.
pub const BOARDSIZE: usize = N * N;

// =============================================================================
// Combat
// =============================================================================

/// Attack every knight starts with before item bonuses.
pub const BASE_ATTACK: u32 = 1;

/// Defence every knight starts with before item bonuses.
pub const BASE_DEFENCE: u32 = 1;

/// Bonus added to the attacker's score in every fight.
pub const SURPRISE_BONUS: f64 = 0.5;

// =============================================================================
// Starting Layout
// =============================================================================

/// Knights start in the four corners.
pub const KNIGHT_STARTS: [(KnightId, (usize, usize)); 4] = [
    (KnightId::Red, (0, 0)),
    (KnightId::Yellow, (0, N - 1)),
    (KnightId::Blue, (N - 1, 0)),
    (KnightId::Green, (N - 1, N - 1)),
];

/// Items start on four interior cells.
pub const ITEM_STARTS: [(ItemKind, (usize, usize)); 4] = [
    (ItemKind::Axe, (2, 2)),
    (ItemKind::Dagger, (2, 5)),
    (ItemKind::MagicStaff, (5, 2)),
    (ItemKind::Helmet, (5, 5)),
];

// =============================================================================
// Move Script
// =============================================================================

/// First line of every move script.
pub const GAME_START: &str = "GAME-START";

/// Last line of every move script.
pub const GAME_END: &str = "GAME-END";

/// Default script read by the CLI.
pub const DEFAULT_MOVES_PATH: &str = "moves.txt";

/// Default file the final state is written to.
pub const DEFAULT_OUTPUT_PATH: &str = "final_state.json";

/// Default number of moves in a generated script.
pub const DEFAULT_RANDOM_MOVES: usize = 40;
