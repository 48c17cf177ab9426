use glam::{DVec2, IVec2};
use serde::Serialize;

use crate::{registry::Id, room::Room};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PathPoint {
    pub position: DVec2,
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GmPath {
    pub precision: i32,
    pub closed: bool,
    pub smooth: bool,
    /// room drawn behind the path in the editor, linked by position in the room list
    pub background_room: Option<Id<Room>>,
    pub snap: IVec2,
    pub points: Vec<PathPoint>,
}
