//! Running a whole script and capturing the final state.

use serde::ser::{Serialize, SerializeMap, SerializeTuple, Serializer};
use tracing::info;

use crate::board::Point;
use crate::engine::{Arena, Outcome};
use crate::entity::{ItemKind, KnightId, Status};
use crate::script::Move;

/// Final state of one knight.
///
/// Serializes as `[position, status, item, attack, defence]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnightReport {
    pub position: Option<Point>,
    pub status: Status,
    pub item: Option<ItemKind>,
    pub attack: u32,
    pub defence: u32,
}

impl Serialize for KnightReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(5)?;
        tup.serialize_element(&self.position)?;
        tup.serialize_element(&self.status)?;
        tup.serialize_element(&self.item)?;
        tup.serialize_element(&self.attack)?;
        tup.serialize_element(&self.defence)?;
        tup.end()
    }
}

/// Final state of one item.
///
/// Serializes as `[position, equipped]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemReport {
    pub position: Option<Point>,
    pub equipped: bool,
}

impl Serialize for ItemReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.position, self.equipped).serialize(serializer)
    }
}

/// Read-only picture of the arena after the last move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    knights: [KnightReport; 4],
    items: [ItemReport; 4],
}

/// Order in which entries are reported.
const KNIGHT_ORDER: [KnightId; 4] = [
    KnightId::Red,
    KnightId::Blue,
    KnightId::Green,
    KnightId::Yellow,
];
const ITEM_ORDER: [ItemKind; 4] = [
    ItemKind::MagicStaff,
    ItemKind::Helmet,
    ItemKind::Dagger,
    ItemKind::Axe,
];

impl Snapshot {
    pub fn knight(&self, id: KnightId) -> &KnightReport {
        &self.knights[id.index()]
    }

    pub fn item(&self, kind: ItemKind) -> &ItemReport {
        &self.items[kind.index()]
    }

    /// Report entries keyed by name, in output order.
    pub fn entries(&self) -> serde_json::Result<Vec<(&'static str, serde_json::Value)>> {
        let mut entries = Vec::with_capacity(8);
        for id in KNIGHT_ORDER {
            entries.push((id.name(), serde_json::to_value(self.knight(id))?));
        }
        for kind in ITEM_ORDER {
            entries.push((kind.name(), serde_json::to_value(self.item(kind))?));
        }
        Ok(entries)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        for id in KNIGHT_ORDER {
            map.serialize_entry(id.name(), self.knight(id))?;
        }
        for kind in ITEM_ORDER {
            map.serialize_entry(kind.name(), self.item(kind))?;
        }
        map.end()
    }
}

impl Arena {
    /// Capture the current state of every knight and item.
    pub fn snapshot(&self) -> Snapshot {
        let knights = KnightId::ALL.map(|id| {
            let knight = self.knight(id);
            KnightReport {
                position: self.knight_position(id),
                status: knight.status,
                item: knight.item,
                attack: knight.effective_attack(),
                defence: knight.effective_defence(),
            }
        });
        let items = ItemKind::ALL.map(|kind| ItemReport {
            position: self.item_position(kind),
            equipped: self.item(kind).equipped,
        });
        Snapshot { knights, items }
    }
}

/// Play every move in order on a fresh arena and return the final state.
pub fn simulate(moves: &[Move]) -> Snapshot {
    let mut arena = Arena::new();
    play(&mut arena, moves);
    arena.snapshot()
}

/// Play every move in order on `arena`.
pub fn play(arena: &mut Arena, moves: &[Move]) {
    let mut casualties = 0;
    for &mv in moves {
        match arena.apply(mv) {
            Outcome::Drowned { .. } | Outcome::Won { .. } | Outcome::Lost { .. } => {
                casualties += 1
            }
            Outcome::Skipped | Outcome::Moved { .. } => {}
        }
    }
    info!(moves = moves.len(), casualties, "game finished");
}
