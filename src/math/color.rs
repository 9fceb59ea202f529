/// Splits a packed `0xRRGGBB` value into sRGB components in [0, 1]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// sRGB transfer function inverse (IEC 61966-2-1)
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Packed sRGB hex to linear RGB, ready for shading on an sRGB surface
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_rgb(hex).map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_cyan() {
        let rgb = hex_to_rgb(0x00d4ff);
        assert_eq!(rgb[0], 0.0);
        assert!((rgb[1] - 212.0 / 255.0).abs() < 1e-6);
        assert_eq!(rgb[2], 1.0);
    }

    #[test]
    fn test_hex_to_rgb_white_and_black() {
        assert_eq!(hex_to_rgb(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_to_rgb(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hex_ignores_high_byte() {
        assert_eq!(hex_to_rgb(0xff8b5cf6), hex_to_rgb(0x8b5cf6));
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_srgb_to_linear_darkens_midtones() {
        let mid = srgb_to_linear(0.5);
        assert!(mid > 0.2 && mid < 0.22);
    }
}
