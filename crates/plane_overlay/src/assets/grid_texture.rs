//! Grid texture shared by every plane
//!
//! The plane shader reads the red channel as dot intensity and the green
//! channel as line intensity. Texels cover a 1 x sqrt(3) cell of a triangular
//! lattice, which the UV matrix's density ratio turns back into equilateral
//! triangles on the plane.

use std::path::Path;

use crate::core::config::PlaneRendererConfig;
use super::AssetError;

/// Edge length of the generated texture
pub const DEFAULT_GRID_TEXTURE_SIZE: u32 = 128;

const SQRT_3: f32 = 1.732_050_8;
const DOT_RADIUS: f32 = 0.18;
const LINE_HALF_WIDTH: f32 = 0.04;

/// RGBA8 grid texture ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTexture {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA pixels
    pub data: Vec<u8>,
}

impl GridTexture {
    /// Load a texture from an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        log::debug!("Loading grid texture from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load grid texture {:?}: {}", path_ref, e)))?;
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded grid texture {}x{} from {:?}", width, height, path_ref);
        Ok(Self {
            width,
            height,
            data: rgba_img.into_raw(),
        })
    }

    /// Decode a texture from encoded image bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to decode grid texture: {}", e)))?;
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Decoded grid texture {}x{} from memory", width, height);
        Ok(Self {
            width,
            height,
            data: rgba_img.into_raw(),
        })
    }

    /// Wrap raw RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(AssetError::InvalidDimensions {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Generate the triangular dot-and-line grid
    pub fn procedural(size: u32) -> Self {
        let size = size.max(1);
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);

        for y in 0..size {
            for x in 0..size {
                let u = (x as f32 + 0.5) / size as f32;
                let v = (y as f32 + 0.5) / size as f32 * SQRT_3;
                data.extend_from_slice(&[to_byte(dot_intensity(u, v)), to_byte(line_intensity(u, v)), 0, 255]);
            }
        }

        log::debug!("Generated {}x{} grid texture", size, size);
        Self {
            width: size,
            height: size,
            data,
        }
    }

    /// Texture named by the renderer configuration, or the generated grid
    pub fn from_config(config: &PlaneRendererConfig) -> Result<Self, AssetError> {
        match &config.grid_texture_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::procedural(DEFAULT_GRID_TEXTURE_SIZE)),
        }
    }

    /// RGBA value of one texel
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2], self.data[offset + 3]]
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

// Lattice points of one cell: the four corners and the center
fn dot_intensity(u: f32, v: f32) -> f32 {
    let points = [(0.0, 0.0), (1.0, 0.0), (0.0, SQRT_3), (1.0, SQRT_3), (0.5, SQRT_3 * 0.5)];
    let nearest = points
        .iter()
        .map(|(px, py)| ((u - px).powi(2) + (v - py).powi(2)).sqrt())
        .fold(f32::INFINITY, f32::min);
    (1.0 - nearest / DOT_RADIUS).max(0.0)
}

// Three line families at 60 degrees, spaced sqrt(3)/2 apart
fn line_intensity(u: f32, v: f32) -> f32 {
    let spacing = SQRT_3 * 0.5;
    let normals = [(0.0, 1.0), (SQRT_3 * 0.5, 0.5), (-SQRT_3 * 0.5, 0.5)];
    let nearest = normals
        .iter()
        .map(|(nx, ny)| {
            let s = u * nx + v * ny;
            (s - (s / spacing).round() * spacing).abs()
        })
        .fold(f32::INFINITY, f32::min);
    (1.0 - nearest / LINE_HALF_WIDTH).max(0.0)
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedural_texture_layout() {
        let texture = GridTexture::procedural(64);
        assert_eq!(texture.width, 64);
        assert_eq!(texture.height, 64);
        assert_eq!(texture.size_bytes(), 64 * 64 * 4);
        assert!(texture.data.chunks(4).all(|texel| texel[3] == 255));
    }

    #[test]
    fn test_procedural_texture_has_dots_at_lattice_points() {
        let texture = GridTexture::procedural(64);
        // Corner and cell center are dots
        assert!(texture.texel(0, 0)[0] > 200);
        assert!(texture.texel(32, 32)[0] > 200);
        // Halfway between two corner dots on the bottom edge: a line, no dot
        let edge = texture.texel(32, 0);
        assert_eq!(edge[0], 0);
        assert!(edge[1] > 128);
    }

    #[test]
    fn test_procedural_texture_has_empty_space() {
        let texture = GridTexture::procedural(64);
        let empty = texture.data.chunks(4).filter(|texel| texel[0] == 0 && texel[1] == 0).count();
        assert!(empty > 64 * 64 / 4);
    }

    #[test]
    fn test_from_rgba_validates_length() {
        assert!(GridTexture::from_rgba(2, 2, vec![0; 16]).is_ok());
        let err = GridTexture::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, AssetError::InvalidDimensions { expected: 16, actual: 15, .. }));
        assert!(GridTexture::from_rgba(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let mut encoded = Vec::new();
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
            .unwrap();

        let texture = GridTexture::from_bytes(&encoded).unwrap();
        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.texel(2, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = GridTexture::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::LoadFailed(_)));
    }

    #[test]
    fn test_missing_file_fails() {
        let config = PlaneRendererConfig::default().with_grid_texture("definitely/missing/trigrid.png");
        assert!(GridTexture::from_config(&config).is_err());
        assert_eq!(GridTexture::from_config(&PlaneRendererConfig::default()).unwrap().width, DEFAULT_GRID_TEXTURE_SIZE);
    }
}
