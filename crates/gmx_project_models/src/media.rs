use serde::Serialize;

/// RGBA8 pixels of one decoded picture, row major.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

// pixels are left out, a single frame easily weighs hundreds of kilobytes
impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
