//! Pixel packing for the window surface
//!
//! tiny-skia renders premultiplied RGBA8, softbuffer expects packed 0RGB
//! u32 pixels. The pixmap is always filled with an opaque background before
//! rendering, so premultiplied and straight RGB coincide here.
use std::{fmt, str::FromStr};

/// Default window background
pub const DEFAULT_BG: Rgb = Rgb([0xf0, 0xf0, 0xf0]);

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb([u8; 3]);

impl Rgb {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Rasterizer color, fully opaque
    pub fn to_color(self) -> tiny_skia::Color {
        let Self([r, g, b]) = self;
        tiny_skia::Color::from_rgba8(r, g, b, 0xff)
    }

    /// Packed 0RGB pixel as expected by the window surface
    pub fn to_pixel(self) -> u32 {
        let Self([r, g, b]) = self;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self([r, g, b]) = self;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && color.len() == 7 {
            // #RRGGBB
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok(digit(pair[0])? << 4 | digit(pair[1])?));
            Ok(Rgb::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

/// Convert the pixmap's RGBA8 bytes into packed 0RGB pixels
pub fn pack(data: &[u8], out: &mut [u32]) {
    let pixels: &[[u8; 4]] = bytemuck::cast_slice(data);
    debug_assert_eq!(pixels.len(), out.len());
    for (dst, src) in out.iter_mut().zip(pixels) {
        let [r, g, b, _] = *src;
        *dst = (r as u32) << 16 | (g as u32) << 8 | b as u32;
    }
}

/// Bad color argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB in hexadecimal format")
            }
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        assert_eq!("#f0f0f0".parse::<Rgb>().unwrap(), Rgb::new(0xf0, 0xf0, 0xf0));
        assert_eq!("#DeadBe".parse::<Rgb>().unwrap(), Rgb::new(0xde, 0xad, 0xbe));
        assert_eq!(Rgb::new(0xde, 0xad, 0xbe).to_string(), "#deadbe");
        assert!("f0f0f0".parse::<Rgb>().is_err());
        assert!("#f0f0".parse::<Rgb>().is_err());
        assert!("#f0f0fg".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_pack() {
        // opaque RGBA8 bytes as produced over an opaque background
        let data = [0xff, 0x80, 0x00, 0xff, 0x00, 0x00, 0x00, 0xff];
        let mut out = [0u32; 2];
        pack(&data, &mut out);
        assert_eq!(out, [0x00ff_8000, 0x0000_0000]);
    }

    #[test]
    fn test_pixel_matches_pack() {
        let color = Rgb::new(0x12, 0x34, 0x56);
        let data = [0x12, 0x34, 0x56, 0xff];
        let mut out = [0u32; 1];
        pack(&data, &mut out);
        assert_eq!(out[0], color.to_pixel());
    }
}
