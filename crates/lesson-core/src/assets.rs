//! Texture file loading.
//!
//! Open and decode failures are split so callers can treat a missing file
//! as a fatal precondition while downgrading a corrupt one to a logged
//! fallback, as the lessons do.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to open texture {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode texture {path}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

impl AssetError {
    /// True when the file was readable but the codec rejected it.
    pub fn is_decode(&self) -> bool {
        matches!(self, AssetError::Decode { .. })
    }
}

/// RGBA8 pixels ready for GPU upload.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Single opaque white pixel, bound in place of a texture that failed
    /// to decode.
    pub fn fallback_pixel() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255, 255, 255, 255],
        }
    }
}

/// Read and decode an image file, flattening to RGBA8.
pub fn load_rgba8(path: &Path) -> Result<DecodedImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let img = decode_rgba8(&bytes).map_err(|source| AssetError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("loaded {} ({}x{})", path.display(), img.width, img.height);
    Ok(img)
}

fn decode_rgba8(bytes: &[u8]) -> Result<DecodedImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_rgba8(Path::new("no/such/texture.png")).unwrap_err();
        assert!(!err.is_decode());
        assert!(err.to_string().contains("no/such/texture.png"));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_rgba8(b"definitely not an image").unwrap_err();
        // load_rgba8 wraps this as Decode; exercise the classification too
        let wrapped = AssetError::Decode {
            path: "garbage".into(),
            source: err,
        };
        assert!(wrapped.is_decode());
    }

    #[test]
    fn fallback_pixel_is_opaque_white() {
        let px = DecodedImage::fallback_pixel();
        assert_eq!((px.width, px.height), (1, 1));
        assert_eq!(px.rgba, vec![255, 255, 255, 255]);
    }

    #[test]
    fn bundled_texture_decodes() {
        let img = decode_rgba8(include_bytes!("../../../assets/textures/container.png"))
            .expect("bundled texture");
        assert!(img.width > 0 && img.height > 0);
        assert_eq!(img.rgba.len(), (img.width * img.height * 4) as usize);
    }
}
