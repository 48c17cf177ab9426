use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Font {
    pub font_name: String,
    pub size: i32,
    pub bold: bool,
    pub italic: bool,
    pub charset: i32,
    pub antialias: i32,
    pub range_min: i32,
    pub range_max: i32,
    pub high_quality: bool,
    pub include_ttf: bool,
}
