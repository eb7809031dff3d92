//! The maze and its rooms.

pub mod maze;
pub mod room;

pub use maze::Maze;
pub use room::{Room, RoomGlyph, RoomModel};
