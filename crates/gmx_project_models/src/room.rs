use enumflags2::{bitflags, BitFlags};
use glam::IVec2;
use serde::Serialize;
use smol_str::SmolStr;

use crate::{background::Background, object::GmObject, registry::Id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Rooms store their colour as a packed `0xBBGGRR` integer.
    pub fn from_packed_bgr(packed: i32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
        }
    }
}

#[bitflags]
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditorToggle {
    ShowGrid = 1 << 0,
    ShowObjects = 1 << 1,
    ShowTiles = 1 << 2,
    ShowBackgrounds = 1 << 3,
    ShowForegrounds = 1 << 4,
    ShowViews = 1 << 5,
    DeleteUnderlyingObjects = 1 << 6,
    DeleteUnderlyingTiles = 1 << 7,
}

/// State of the room editor saved with the room, no effect on the game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditorSettings {
    pub remember: bool,
    pub size: IVec2,
    pub toggles: BitFlags<EditorToggle>,
    pub page: i32,
    pub scroll: IVec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub position: IVec2,
    pub size: IVec2,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackgroundDef {
    pub visible: bool,
    pub background: Option<Id<Background>>,
    pub foreground: bool,
    pub tile_horizontal: bool,
    pub tile_vertical: bool,
    pub stretch: bool,
    pub speed: IVec2,
    pub position: IVec2,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    pub visible: bool,
    pub follow: Option<Id<GmObject>>,
    pub speed: IVec2,
    pub border: IVec2,
    pub port: Rect,
    pub view: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Instance {
    pub name: SmolStr,
    pub object: Option<Id<GmObject>>,
    pub position: IVec2,
    pub creation_code: String,
    pub locked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tile {
    pub name: SmolStr,
    pub background: Option<Id<Background>>,
    pub position: IVec2,
    pub source: IVec2, // offset inside the background
    pub size: IVec2,
    pub depth: i32,
    pub locked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Room {
    pub caption: String,
    pub size: IVec2,
    pub snap: IVec2,
    pub isometric: bool,
    pub speed: i32,
    pub persistent: bool,
    pub background_color: Rgb,
    pub draw_background_color: bool,
    pub creation_code: String,
    pub enable_views: bool,
    pub clear_view_background: bool,
    pub editor: EditorSettings,
    pub backgrounds: Vec<BackgroundDef>,
    pub views: Vec<View>,
    pub instances: Vec<Instance>,
    pub tiles: Vec<Tile>,
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x0000FF, Rgb { r: 255, g: 0, b: 0 })]
    #[case(0x00FF00, Rgb { r: 0, g: 255, b: 0 })]
    #[case(0xFF0000, Rgb { r: 0, g: 0, b: 255 })]
    #[case(12632256, Rgb { r: 192, g: 192, b: 192 })]
    fn test_packed_colour(#[case] packed: i32, #[case] expected: Rgb) {
        assert_eq!(Rgb::from_packed_bgr(packed), expected);
    }
}
