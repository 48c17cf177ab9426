use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SoundKind {
    #[default]
    Normal,
    Background,
    Spatial, // "3D" in the editor
    Multimedia,
}
indexed_table!(SoundKind {
    Normal,
    Background,
    Spatial,
    Multimedia
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sound {
    pub kind: SoundKind,
    pub file_type: String,
    pub file_name: String,
    pub volume: f64,
    pub pan: f64,
    pub preload: bool,
    #[serde(skip)]
    pub data: Vec<u8>,
}
