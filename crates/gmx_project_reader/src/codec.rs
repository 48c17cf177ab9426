use std::path::Path;

use gmx_project_models::media::DecodedImage;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::trace;

/// Turns media side files into memory. The reader never decodes pictures or audio itself.
pub trait MediaCodec {
    fn load_image(&self, path: &Path) -> Result<DecodedImage>;

    fn load_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display()))
    }
}

/// Default codec, decodes pictures with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCodec;

impl MediaCodec for ImageCodec {
    fn load_image(&self, path: &Path) -> Result<DecodedImage> {
        let img = image::open(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to decode image {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        trace!(width, height, "decoded {}", path.display());
        Ok(DecodedImage::new(width, height, img.into_raw()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spr_ball_0.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        let decoded = ImageCodec.load_image(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageCodec
            .load_bytes(&dir.path().join("nothing.wav"))
            .unwrap_err();
        assert!(err.to_string().contains("nothing.wav"));
    }
}
