//! Move scripts.
//!
//! A script is a line-oriented text file:
//!
//! ```text
//! GAME-START
//! R:S
//! G:W
//! GAME-END
//! ```
//!
//! Every line between the sentinels is a move `<KNIGHT>:<DIRECTION>`, where
//! the knight is one of `R`, `G`, `Y`, `B` and the direction one of `N`, `E`,
//! `S`, `W`. Surrounding whitespace on each line is ignored. Anything after
//! `GAME-END` is not read.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::constants::{GAME_END, GAME_START};
use crate::entity::KnightId;

/// Direction of a single step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit `(row, col)` offset.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

/// One scripted move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub knight: KnightId,
    pub direction: Direction,
}

impl Move {
    pub fn new(knight: KnightId, direction: Direction) -> Self {
        Self { knight, direction }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.knight.symbol(), self.direction.symbol())
    }
}

/// Reasons a script cannot be played.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid file format: missing 'GAME-START' at the beginning")]
    MissingStart,
    #[error("invalid file format: missing 'GAME-END'")]
    MissingEnd,
    #[error("invalid file format: file ended unexpectedly")]
    UnexpectedEof,
    #[error("invalid move on line {line}: {text:?}")]
    InvalidMove { line: usize, text: String },
    #[error("failed to read move script")]
    Io(#[from] io::Error),
}

/// Parse a single `<KNIGHT>:<DIRECTION>` token.
pub fn parse_move(token: &str) -> Option<Move> {
    let mut chars = token.chars();
    let (k, sep, d) = (chars.next()?, chars.next()?, chars.next()?);
    if sep != ':' || chars.next().is_some() {
        return None;
    }
    Some(Move::new(KnightId::from_symbol(k)?, Direction::from_symbol(d)?))
}

/// Read a whole script, validating the sentinels and every move line.
pub fn read_script<R: BufRead>(reader: R) -> Result<Vec<Move>, ScriptError> {
    let mut lines = reader.lines();

    let first = lines.next().ok_or(ScriptError::UnexpectedEof)??;
    if first.trim() != GAME_START {
        return Err(ScriptError::MissingStart);
    }

    let mut moves = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let token = line.trim();
        if token == GAME_END {
            return Ok(moves);
        }
        match parse_move(token) {
            Some(mv) => moves.push(mv),
            None => {
                return Err(ScriptError::InvalidMove {
                    line: i + 2,
                    text: token.to_string(),
                });
            }
        }
    }
    Err(ScriptError::MissingEnd)
}

/// Read a script from a file.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Move>, ScriptError> {
    let file = File::open(path)?;
    read_script(BufReader::new(file))
}

/// Render moves as a complete script.
pub fn format_script(moves: &[Move]) -> String {
    let mut out = String::from(GAME_START);
    out.push('\n');
    for mv in moves {
        out.push_str(&mv.to_string());
        out.push('\n');
    }
    out.push_str(GAME_END);
    out.push('\n');
    out
}

/// Generate `len` uniformly random moves from a fixed seed.
pub fn random_moves(seed: u64, len: usize) -> Vec<Move> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len)
        .map(|_| {
            let knight = KnightId::ALL[rng.usize(..KnightId::ALL.len())];
            let direction = Direction::ALL[rng.usize(..Direction::ALL.len())];
            Move::new(knight, direction)
        })
        .collect()
}
