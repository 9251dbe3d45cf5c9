//! Battling Knights: a scripted board game simulation.
//!
//! Four knights start in the corners of an 8x8 arena and move according to
//! a script. They pick up items that boost their attack and defence, fight
//! when they step onto each other, and drown when they step off the board.
//!
//! ## Modules
//!
//! - [`constants`] - Arena size, starting layout and combat constants
//! - [`entity`] - Knights, items and their stats
//! - [`board`] - The 8x8 grid of cells
//! - [`engine`] - Applying moves: pickup, combat and drowning
//! - [`simulation`] - Running a script and capturing the final state
//! - [`script`] - Reading and generating move scripts
//! - [`report`] - Writing the final state as JSON
//! - [`logging`] - Log setup for the command line tool
//!
//! ## Example
//!
//! ```
//! use battling_knights::entity::{KnightId, Status};
//! use battling_knights::script::read_script;
//! use battling_knights::simulation::simulate;
//!
//! let moves = read_script("GAME-START\nR:E\nGAME-END\n".as_bytes()).unwrap();
//! let snapshot = simulate(&moves);
//!
//! let red = snapshot.knight(KnightId::Red);
//! assert_eq!(red.position, Some((0, 1)));
//! assert_eq!(red.status, Status::Live);
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod entity;
pub mod logging;
pub mod report;
pub mod script;
pub mod simulation;
