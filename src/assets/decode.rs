use std::io::Cursor;

use anyhow::Context;
use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::foundation::core::ImageRgba;
use crate::foundation::error::{FramefitError, FramefitResult};

/// Decode artwork bytes to straight RGBA8.
///
/// EXIF orientation is applied before anything else so every downstream
/// geometry computation sees the displayed orientation.
pub fn decode_artwork(bytes: &[u8]) -> FramefitResult<ImageRgba> {
    decode_oriented(bytes).map_err(|e| FramefitError::artwork_invalid(format!("{e:#}")))
}

/// Decode a template background to straight RGBA8.
///
/// Same pipeline as [`decode_artwork`], but failures are manifest-level:
/// an unreadable background makes the template invalid, not the artwork.
pub fn decode_background(bytes: &[u8]) -> FramefitResult<ImageRgba> {
    decode_oriented(bytes).map_err(|e| FramefitError::manifest_invalid(format!("background: {e:#}")))
}

fn decode_oriented(bytes: &[u8]) -> anyhow::Result<ImageRgba> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?;
    let mut decoder = reader.into_decoder().context("open image decoder")?;
    let orientation = decoder.orientation().context("read exif orientation")?;
    let mut img = DynamicImage::from_decoder(decoder).context("decode image")?;
    img.apply_orientation(orientation);

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageRgba {
        width,
        height,
        data: rgba.into_raw(),
    })
}

/// Encode a straight RGBA8 buffer as a PNG byte stream.
pub fn encode_png(img: &ImageRgba) -> FramefitResult<Vec<u8>> {
    let buffer = image::RgbaImage::from_raw(img.width, img.height, img.data.clone())
        .ok_or_else(|| FramefitError::encoding("pixel buffer does not match dimensions"))?;

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| FramefitError::encoding(format!("png encode: {e}")))?;
    Ok(out.into_inner())
}
