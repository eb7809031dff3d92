//! Rooms of the maze.

use serde::{Deserialize, Serialize};

use crate::object::Container;

/// One cell of the maze.
///
/// Created once per coordinate and never regenerated; only the floor
/// contents change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Solid rock; blocks entry.
    pub wall: bool,
    /// Index into the environment flavor table.
    pub env: usize,
    /// Directional generation seed, two bits.
    pub seed: u8,
    /// What is lying on the floor.
    pub items: Container,
}

/// The generation-relevant projection of a room, used to bias neighbors
/// toward coherent corridors and environments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomModel {
    pub wall: bool,
    pub env: usize,
    pub seed: u8,
}

/// Single-glyph classification of a room, for map rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomGlyph {
    /// Never generated
    Unexplored,
    /// Solid wall
    Wall,
    /// Contains at least one chest
    Chest,
    /// Contains at least one cart
    Cart,
    /// Contains loose items
    Items,
    /// Open and empty
    Floor,
}

impl Room {
    /// This room as a generation model for its neighbors.
    pub fn model(&self) -> RoomModel {
        RoomModel {
            wall: self.wall,
            env: self.env,
            seed: self.seed,
        }
    }

    /// Classify the room for the map. Chests outrank carts outrank loose
    /// items.
    pub fn glyph(&self) -> RoomGlyph {
        use crate::object::Item;
        if self.wall {
            return RoomGlyph::Wall;
        }
        if self.items.items.is_empty() {
            return RoomGlyph::Floor;
        }
        if self
            .items
            .items
            .iter()
            .any(|i| matches!(i, Item::Chest { .. }))
        {
            return RoomGlyph::Chest;
        }
        if self
            .items
            .items
            .iter()
            .any(|i| matches!(i, Item::Cart { .. }))
        {
            return RoomGlyph::Cart;
        }
        RoomGlyph::Items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Item;

    #[test]
    fn test_glyph_priorities() {
        let mut room = Room::default();
        assert_eq!(room.glyph(), RoomGlyph::Floor);

        room.items.items.push(Item::Treasure {
            kind: 0,
            material: 0,
            condition: 0,
        });
        assert_eq!(room.glyph(), RoomGlyph::Items);

        room.items.items.push(Item::new_cart());
        assert_eq!(room.glyph(), RoomGlyph::Cart);

        room.items.items.push(Item::new_chest());
        assert_eq!(room.glyph(), RoomGlyph::Chest);

        room.wall = true;
        assert_eq!(room.glyph(), RoomGlyph::Wall);
    }

    #[test]
    fn test_model_projection() {
        let room = Room {
            wall: true,
            env: 3,
            seed: 2,
            items: Container::new(),
        };
        let model = room.model();
        assert!(model.wall);
        assert_eq!(model.env, 3);
        assert_eq!(model.seed, 2);
    }
}
