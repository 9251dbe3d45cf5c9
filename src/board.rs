use std::fmt;

use crate::constants::{BOARDSIZE, ITEM_STARTS, KNIGHT_STARTS, N};
use crate::entity::{ItemKind, KnightId};

/// A board coordinate as `(row, col)`.
pub type Point = (usize, usize);

/// A single square of the arena.
///
/// The knight reference only records presence; the knight itself lives in
/// the arena roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub knight: Option<KnightId>,
    pub items: Vec<ItemKind>,
}

impl Cell {
    /// Highest priority item lying here.
    pub fn best_item(&self) -> Option<ItemKind> {
        self.items.iter().copied().min()
    }

    pub fn take_item(&mut self, kind: ItemKind) -> Option<ItemKind> {
        let pos = self.items.iter().position(|&i| i == kind)?;
        Some(self.items.swap_remove(pos))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); BOARDSIZE],
        }
    }

    /// The starting layout: knights in the corners, items in the interior.
    pub fn standard() -> Self {
        let mut board = Self::new();
        for (id, pt) in KNIGHT_STARTS {
            board.cell_at_mut(pt).knight = Some(id);
        }
        for (kind, pt) in ITEM_STARTS {
            board.cell_at_mut(pt).items.push(kind);
        }
        board
    }

    fn idx(&self, (row, col): Point) -> usize {
        assert!(
            row < N && col < N,
            "cell ({row}, {col}) is outside the {N}x{N} arena"
        );
        row * N + col
    }

    /// Whether `pt` lies on the board.
    pub fn contains((row, col): Point) -> bool {
        row < N && col < N
    }

    /// Panics if `pt` is off the board.
    pub fn cell_at(&self, pt: Point) -> &Cell {
        &self.cells[self.idx(pt)]
    }

    /// Panics if `pt` is off the board.
    pub fn cell_at_mut(&mut self, pt: Point) -> &mut Cell {
        let i = self.idx(pt);
        &mut self.cells[i]
    }

    /// Iterate over every cell together with its coordinate, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| ((i / N, i % N), cell))
    }

    /// Current position of a knight standing on the board.
    ///
    /// Dead and drowned knights are not on the board, so they are never found.
    pub fn find_knight(&self, id: KnightId) -> Option<Point> {
        self.cells()
            .find(|(_, cell)| cell.knight == Some(id))
            .map(|(pt, _)| pt)
    }

    /// Position of an item lying on the board; `None` if it is held.
    pub fn find_item(&self, kind: ItemKind) -> Option<Point> {
        self.cells()
            .find(|(_, cell)| cell.items.contains(&kind))
            .map(|(pt, _)| pt)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let cell = self.cell_at((row, col));
                let ch = cell.knight.map_or('.', KnightId::symbol);
                write!(f, "{ch}")?;
                if cell.items.is_empty() {
                    write!(f, "    ")?;
                } else {
                    let mut items = cell.items.clone();
                    items.sort();
                    let symbols: String = items.iter().map(|i| i.symbol()).collect();
                    write!(f, "[{symbols:<2}]")?;
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
