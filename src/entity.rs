//! Knights, items and their combat stats.

use std::fmt;

use serde::Serialize;

use crate::board::Point;
use crate::constants::{BASE_ATTACK, BASE_DEFENCE};

/// One of the four knights.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KnightId {
    Red,
    Green,
    Yellow,
    Blue,
}

impl KnightId {
    /// All knights, in roster order.
    pub const ALL: [KnightId; 4] = [
        KnightId::Red,
        KnightId::Green,
        KnightId::Yellow,
        KnightId::Blue,
    ];

    pub fn symbol(self) -> char {
        match self {
            KnightId::Red => 'R',
            KnightId::Green => 'G',
            KnightId::Yellow => 'Y',
            KnightId::Blue => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'R' => Some(KnightId::Red),
            'G' => Some(KnightId::Green),
            'Y' => Some(KnightId::Yellow),
            'B' => Some(KnightId::Blue),
            _ => None,
        }
    }

    /// Key used in the final state report.
    pub fn name(self) -> &'static str {
        match self {
            KnightId::Red => "red",
            KnightId::Green => "green",
            KnightId::Yellow => "yellow",
            KnightId::Blue => "blue",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for KnightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four items.
///
/// Variants are declared in pickup priority order, so the derived `Ord`
/// is the priority: when several items lie on a cell, the smallest wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Axe,
    MagicStaff,
    Dagger,
    Helmet,
}

impl ItemKind {
    /// All items, in priority order.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Axe,
        ItemKind::MagicStaff,
        ItemKind::Dagger,
        ItemKind::Helmet,
    ];

    pub fn symbol(self) -> char {
        match self {
            ItemKind::Axe => 'A',
            ItemKind::MagicStaff => 'M',
            ItemKind::Dagger => 'D',
            ItemKind::Helmet => 'H',
        }
    }

    /// Key used in the final state report.
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Axe => "axe",
            ItemKind::MagicStaff => "magic_staff",
            ItemKind::Dagger => "dagger",
            ItemKind::Helmet => "helmet",
        }
    }

    pub fn attack_bonus(self) -> u32 {
        match self {
            ItemKind::Axe => 2,
            ItemKind::MagicStaff | ItemKind::Dagger => 1,
            ItemKind::Helmet => 0,
        }
    }

    pub fn defence_bonus(self) -> u32 {
        match self {
            ItemKind::MagicStaff | ItemKind::Helmet => 1,
            ItemKind::Axe | ItemKind::Dagger => 0,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knight lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Live,
    Dead,
    Drowned,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Live => write!(f, "LIVE"),
            Status::Dead => write!(f, "DEAD"),
            Status::Drowned => write!(f, "DROWNED"),
        }
    }
}

/// A knight and its combat state.
///
/// While the knight is live its position is tracked by the board;
/// `last_location` is only recorded when it dies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Knight {
    pub id: KnightId,
    pub status: Status,
    /// Base attack (0 once out of play)
    pub attack: u32,
    /// Base defence (0 once out of play)
    pub defence: u32,
    /// Held item, if any
    pub item: Option<ItemKind>,
    /// Where the knight died; `None` while live or after drowning
    pub last_location: Option<Point>,
}

impl Knight {
    pub fn new(id: KnightId) -> Self {
        Self {
            id,
            status: Status::Live,
            attack: BASE_ATTACK,
            defence: BASE_DEFENCE,
            item: None,
            last_location: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == Status::Live
    }

    /// Base attack plus the held item's attack bonus.
    pub fn effective_attack(&self) -> u32 {
        self.attack + self.item.map_or(0, ItemKind::attack_bonus)
    }

    /// Base defence plus the held item's defence bonus.
    pub fn effective_defence(&self) -> u32 {
        self.defence + self.item.map_or(0, ItemKind::defence_bonus)
    }
}

/// An item and whether a live knight currently holds it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub equipped: bool,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            equipped: false,
        }
    }
}
