use crate::math::Vector4;

/// Packs the RGB channels of a `[0, 1]` RGBA color into `0xRRGGBB`. Alpha is dropped.
///
/// Channels are clamped, scaled to `0..=255` and truncated, so `0.5` becomes `127`.
pub fn pack_rgb(rgba: &Vector4<f32>) -> u32 {
    let [r, g, b] = [rgba.x, rgba.y, rgba.z].map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8 as u32);
    (r << 16) | (g << 8) | b
}

/// Phong material of a mirrored geom.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: u32,
    pub reflectivity: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Material::phong(0xffffff)
    }
}

impl Material {
    pub const fn phong(color: u32) -> Self {
        Material {
            color,
            reflectivity: 0.5,
            opacity: 1.0,
        }
    }

    pub fn from_rgba(rgba: &Vector4<f32>) -> Self {
        Material::phong(pack_rgb(rgba))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_pack_to_their_channel() {
        assert_eq!(pack_rgb(&Vector4::new(1.0, 0.0, 0.0, 1.0)), 0xFF0000);
        assert_eq!(pack_rgb(&Vector4::new(0.0, 1.0, 0.0, 1.0)), 0x00FF00);
        assert_eq!(pack_rgb(&Vector4::new(0.0, 0.0, 1.0, 1.0)), 0x0000FF);
    }

    #[test]
    fn alpha_is_ignored() {
        assert_eq!(
            pack_rgb(&Vector4::new(1.0, 1.0, 1.0, 0.0)),
            pack_rgb(&Vector4::new(1.0, 1.0, 1.0, 1.0))
        );
    }

    #[test]
    fn channels_truncate() {
        assert_eq!(pack_rgb(&Vector4::new(0.5, 0.5, 0.5, 1.0)), 0x7F7F7F);
    }

    #[test]
    fn out_of_range_channels_clamp() {
        assert_eq!(pack_rgb(&Vector4::new(2.0, -1.0, 0.0, 1.0)), 0xFF0000);
    }

    #[test]
    fn material_from_rgba_is_phong() {
        let material = Material::from_rgba(&Vector4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(material.color, 0x00FF00);
        assert_eq!(material.opacity, 1.0);
    }
}
