//! Environment lighting: equirectangular HDR panoramas with a procedural
//! sky-gradient fallback.

use std::f32::consts::PI;
use std::path::Path;

use crate::util::{smoothstep, Error, Result, Vec3, Vec4};

/// An equirectangular (longitude/latitude) HDR panorama.
pub struct EnvironmentMap {
    pixels: Vec<Vec4>,
    width: u32,
    height: u32,
}

impl EnvironmentMap {
    /// Wrap an existing pixel array. The buffer length must match the
    /// dimensions.
    pub fn from_pixels(pixels: Vec<Vec4>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(Error::PixelCountMismatch {
                got: pixels.len(),
                width,
                height,
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Load a Radiance `.hdr` panorama from disk.
    pub fn load_hdr(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref())?.into_rgb32f();
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| Vec4::new(p[0], p[1], p[2], 1.0))
            .collect();
        Self::from_pixels(pixels, width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Radiance arriving from `dir`, by nearest-texel equirectangular
    /// lookup: longitude from `atan2`, latitude from `acos`.
    pub fn sample(&self, dir: Vec3) -> Vec4 {
        let d = dir.normalize_or_zero();
        if d == Vec3::ZERO {
            return Vec4::ZERO;
        }
        let u = 0.5 + d.z.atan2(d.x) / (2.0 * PI);
        let v = d.y.clamp(-1.0, 1.0).acos() / PI;

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Procedural sky: white-to-blue gradient above a soft horizon, constant
/// ground tint below.
pub fn sky_gradient(dir: Vec3) -> Vec4 {
    let sky_t = smoothstep(0.0, 0.4, dir.y).powf(0.35);
    let ground_to_sky = smoothstep(-0.01, 0.0, dir.y);
    let sky = Vec3::ONE.lerp(Vec3::new(0.6, 0.6, 1.0), sky_t);
    let composite = Vec3::splat(0.2).lerp(sky, ground_to_sky);
    composite.extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_validation() {
        assert!(matches!(
            EnvironmentMap::from_pixels(vec![Vec4::ONE; 5], 2, 3),
            Err(Error::PixelCountMismatch { got: 5, .. })
        ));
        assert!(EnvironmentMap::from_pixels(vec![Vec4::ONE; 6], 2, 3).is_ok());
        assert!(EnvironmentMap::from_pixels(Vec::new(), 0, 0).is_err());
    }

    #[test]
    fn test_sample_poles_and_equator() {
        // 4x2: top row red, bottom row blue
        let mut pixels = vec![Vec4::new(1.0, 0.0, 0.0, 1.0); 4];
        pixels.extend(vec![Vec4::new(0.0, 0.0, 1.0, 1.0); 4]);
        let env = EnvironmentMap::from_pixels(pixels, 4, 2).unwrap();

        // straight up is latitude 0 -> top row
        assert_eq!(env.sample(Vec3::Y).x, 1.0);
        // straight down -> bottom row
        assert_eq!(env.sample(Vec3::NEG_Y).z, 1.0);
        // zero direction falls back to black
        assert_eq!(env.sample(Vec3::ZERO), Vec4::ZERO);
    }

    #[test]
    fn test_sample_longitude_wraps() {
        // 4x1 with one distinct texel; +x maps to longitude 0 -> u = 0.5
        let mut pixels = vec![Vec4::ZERO; 4];
        pixels[2] = Vec4::ONE;
        let env = EnvironmentMap::from_pixels(pixels, 4, 1).unwrap();
        assert_eq!(env.sample(Vec3::X), Vec4::ONE);
        assert_eq!(env.sample(Vec3::NEG_X), Vec4::ZERO);
        // +z is a quarter turn: u = 0.75 -> texel 3
        assert_eq!(env.sample(Vec3::Z), Vec4::ZERO);
    }

    #[test]
    fn test_sky_gradient_shape() {
        let up = sky_gradient(Vec3::Y);
        let down = sky_gradient(Vec3::NEG_Y);
        // zenith is the blue-ish sky color, ground is the dark tint
        assert!((up.z - 1.0).abs() < 1e-5);
        assert!((down.x - 0.2).abs() < 1e-5);
        assert!(up.x < down.z + 1.0); // both finite, sane
        assert_eq!(up.w, 1.0);
    }
}
