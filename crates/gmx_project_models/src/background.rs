use glam::IVec2;
use serde::Serialize;

use crate::media::DecodedImage;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Background {
    pub use_as_tileset: bool,
    pub tile_size: IVec2,
    pub tile_offset: IVec2,
    pub tile_separation: IVec2,
    pub size: IVec2,
    pub image: Option<DecodedImage>, // None when media loading is turned off
}
