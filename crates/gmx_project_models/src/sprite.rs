use glam::IVec2;
use serde::Serialize;

use crate::media::DecodedImage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum BoundingBoxMode {
    #[default]
    Automatic,
    FullImage,
    Manual,
}
indexed_table!(BoundingBoxMode {
    Automatic,
    FullImage,
    Manual
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MaskShape {
    #[default]
    Precise,
    Rectangle,
    Ellipse,
    Diamond,
}
indexed_table!(MaskShape {
    Precise,
    Rectangle,
    Ellipse,
    Diamond
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sprite {
    pub origin: IVec2,
    pub bbox_mode: BoundingBoxMode,
    pub bbox: BoundingBox,
    pub alpha_tolerance: i32,
    pub mask_shape: MaskShape,
    pub separate_masks: bool,
    pub size: IVec2, // as stored by the editor, frames carry their own size
    pub frames: Vec<DecodedImage>,
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Some(BoundingBoxMode::Automatic))]
    #[case(1, Some(BoundingBoxMode::FullImage))]
    #[case(2, Some(BoundingBoxMode::Manual))]
    #[case(3, None)]
    #[case(-1, None)]
    fn test_bbox_table(#[case] index: i32, #[case] expected: Option<BoundingBoxMode>) {
        assert_eq!(BoundingBoxMode::from_index(index), expected);
    }
}
