//! The infinite, lazily generated maze.
//!
//! Rooms exist only once visited. Generation is deterministic: every room
//! draws from a generator seeded by its own coordinates, so the maze a
//! player walks through does not depend on the order rooms were first
//! seen. Coherence between neighbors comes from the model room passed in
//! by the viewport spawner, not from shared random state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::ENVIRONMENTS;
use crate::dungeon::room::{Room, RoomGlyph, RoomModel};
use crate::object::{Container, Item};
use crate::rng::GameRng;

/// How far the viewport arms reach north and south.
const ARM_REACH_NS: i64 = 4;
/// How far the viewport arms reach east and west.
const ARM_REACH_EW: i64 = 5;

/// Sparse grid of rooms, keyed by coordinate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Maze {
    rooms: HashMap<(i64, i64), Room>,
}

impl Maze {
    /// An empty maze; rooms appear as they are visited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms generated so far.
    pub fn generated_count(&self) -> usize {
        self.rooms.len()
    }

    /// The room at a coordinate, if it has been generated.
    pub fn peek(&self, x: i64, y: i64) -> Option<&Room> {
        self.rooms.get(&(x, y))
    }

    /// The room at a coordinate, generating it with the default model if
    /// needed.
    pub fn room_at(&mut self, x: i64, y: i64) -> &Room {
        self.generate_room(x, y, RoomModel::default(), 0)
    }

    /// Mutable access to the room at a coordinate, generating it with the
    /// default model if needed.
    pub fn room_at_mut(&mut self, x: i64, y: i64) -> &mut Room {
        self.generate_room_mut(x, y, RoomModel::default(), 0)
    }

    /// Whether the room at a coordinate can be entered, generating it if
    /// needed. Walls block entry.
    pub fn can_enter(&mut self, x: i64, y: i64) -> bool {
        !self.room_at(x, y).wall
    }

    /// Map glyph for a coordinate; never generates.
    pub fn glyph_at(&self, x: i64, y: i64) -> RoomGlyph {
        match self.peek(x, y) {
            Some(room) => room.glyph(),
            None => RoomGlyph::Unexplored,
        }
    }

    /// Generate the room at `(x, y)` if absent, biased by `model`.
    ///
    /// `seed` is the direction seed handed down by the spawner; matching
    /// the model's seed continues a corridor. Existing rooms are returned
    /// untouched regardless of the arguments.
    pub fn generate_room(&mut self, x: i64, y: i64, model: RoomModel, seed: u8) -> &Room {
        self.generate_room_mut(x, y, model, seed)
    }

    fn generate_room_mut(&mut self, x: i64, y: i64, model: RoomModel, seed: u8) -> &mut Room {
        self.rooms.entry((x, y)).or_insert_with(|| {
            let mut rng = GameRng::for_coords(x, y);
            build_room(model, seed, &mut rng)
        })
    }

    /// Generate the player's field of view around `(x, y)`.
    ///
    /// The center spawns its four cardinal neighbors, then each cardinal
    /// arm extends outward (shorter north/south than east/west), stopping
    /// early at a wall. Every arm step spawns its own cardinal neighbors
    /// with the step's room as the model, which lets walls and
    /// environments propagate into coherent corridors.
    pub fn spawn_rooms(&mut self, x: i64, y: i64) -> &Room {
        let center = self.room_at(x, y).model();
        self.spawn_cardinals(x, y, center);

        let arms = [
            (0i64, 1i64, ARM_REACH_NS),
            (0, -1, ARM_REACH_NS),
            (-1, 0, ARM_REACH_EW),
            (1, 0, ARM_REACH_EW),
        ];
        for (dx, dy, reach) in arms {
            let mut model = center;
            for step in 1..=reach {
                let (cx, cy) = (x + dx * step, y + dy * step);
                let arm = self.generate_room(cx, cy, model, 0).model();
                if arm.wall {
                    break;
                }
                self.spawn_cardinals(cx, cy, arm);
                model = arm;
            }
        }

        &self.rooms[&(x, y)]
    }

    /// Spawn the four cardinal neighbors of a cell, each with its own
    /// direction seed.
    fn spawn_cardinals(&mut self, x: i64, y: i64, model: RoomModel) {
        for (dx, dy, seed) in [(0i64, -1i64, 1u8), (-1, 0, 2), (1, 0, 3), (0, 1, 4)] {
            self.generate_room(x + dx, y + dy, model, seed);
        }
    }
}

/// Draw a new room from a coordinate-seeded generator.
fn build_room(model: RoomModel, seed: u8, rng: &mut GameRng) -> Room {
    let chest_roll = rng.frand();

    let jitter = if rng.frand() > 0.95 {
        rng.rn2(4) as u8
    } else {
        0
    };
    let room_seed = (seed + jitter) & 3;

    let mut env = model.env;
    if rng.frand() > 0.9 {
        env = rng.rn2(ENVIRONMENTS.len() as u32) as usize;
    }

    // A matching direction seed keeps the corridor open; a mismatch makes
    // a wall redraw very likely. When no redraw happens the model's wall
    // carries over.
    let mut wall = model.wall;
    let redraw_threshold = if seed == model.seed { 0.95 } else { 0.1 };
    if rng.frand() > redraw_threshold {
        wall = rng.frand() < 0.4;
    }

    let mut items = Container::new();
    let count = (rng.frand().powi(40) * 8.5) as usize;
    items.generate(count, rng);

    if chest_roll < 0.1 {
        items.items.insert(0, Item::new_chest());
    }
    if rng.frand() < 0.005 {
        items.items.insert(0, Item::new_cart());
    }

    Room {
        wall,
        env,
        seed: room_seed,
        items,
    }
}
