//! True-colour raster with packed pixels.
//!
//! Pixels are packed as `alpha << 24 | red << 16 | green << 8 | blue` with a
//! 7-bit alpha channel where 0 is opaque and [`ALPHA_MAX`] is fully
//! transparent. PNG decoding and encoding go through the `image` crate.

use std::fs::File;
use std::io::{BufRead, BufWriter, Seek, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{
    ExtendedColorType, ImageEncoder, ImageError, ImageFormat, ImageReader, Rgba, RgbaImage,
};

use crate::error::{Error, Result};

pub const ALPHA_MAX: u32 = 127;
pub const RED_MAX: u32 = 255;
pub const GREEN_MAX: u32 = 255;
pub const BLUE_MAX: u32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel(pub u32);

impl Pixel {
    pub const fn new(red: u32, green: u32, blue: u32, alpha: u32) -> Self {
        Self(
            ((alpha & ALPHA_MAX) << 24)
                | ((red & RED_MAX) << 16)
                | ((green & GREEN_MAX) << 8)
                | (blue & BLUE_MAX),
        )
    }

    pub const fn alpha(self) -> u32 {
        (self.0 >> 24) & ALPHA_MAX
    }

    pub const fn red(self) -> u32 {
        (self.0 >> 16) & RED_MAX
    }

    pub const fn green(self) -> u32 {
        (self.0 >> 8) & GREEN_MAX
    }

    pub const fn blue(self) -> u32 {
        self.0 & BLUE_MAX
    }

    /// 8-bit RGBA as stored in a PNG.
    pub fn to_rgba(self) -> Rgba<u8> {
        let a = self.alpha();
        Rgba([
            self.red() as u8,
            self.green() as u8,
            self.blue() as u8,
            (255 - ((a << 1) + (a >> 6))) as u8,
        ])
    }

    pub fn from_rgba(rgba: &Rgba<u8>) -> Self {
        let Rgba([r, g, b, a]) = *rgba;
        Self::new(r.into(), g.into(), b.into(), ALPHA_MAX - (u32::from(a) >> 1))
    }
}

/// An owned true-colour image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// A blank image; every pixel is packed zero (opaque black).
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_pixel(width, height, Pixel::default())
    }

    pub fn from_pixel(width: u32, height: u32, pixel: Pixel) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![pixel; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Panics if `(x, y)` is outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// Panics if `(x, y)` is outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        let i = self.index(x, y);
        self.pixels[i] = pixel;
    }

    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(Pixel::from_rgba).collect(),
        }
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| self.get_pixel(x, y).to_rgba())
    }

    pub fn read_png<R: BufRead + Seek>(reader: R) -> std::result::Result<Self, ImageError> {
        let img = image::load(reader, ImageFormat::Png)?.to_rgba8();
        Ok(Self::from_rgba_image(&img))
    }

    pub fn write_png<W: Write>(&self, writer: W) -> std::result::Result<(), ImageError> {
        let rgba = self.to_rgba_image();
        PngEncoder::new(writer).write_image(
            rgba.as_raw(),
            self.width,
            self.height,
            ExtendedColorType::Rgba8,
        )
    }

    pub fn load_png(path: &Path) -> Result<Self> {
        let load_err = |message: String| Error::ImageLoad {
            path: path.display().to_string(),
            message,
        };
        let img = ImageReader::open(path)
            .map_err(|e| load_err(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| load_err(e.to_string()))?
            .decode()
            .map_err(|e| load_err(e.to_string()))?
            .to_rgba8();
        Ok(Self::from_rgba_image(&img))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let write_err = |message: String| Error::ImageWrite {
            path: path.display().to_string(),
            message,
        };
        let file = File::create(path).map_err(|e| write_err(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        self.write_png(&mut writer)
            .map_err(|e| write_err(e.to_string()))?;
        writer.flush().map_err(|e| write_err(e.to_string()))
    }
}
