//! Conversion between greyscale images and the bit sequences the automaton
//! works on.
//!
//! Each 8-bit pixel expands to 8 bits, most significant first, in row-major
//! order. The image dimensions ride alongside the bits so that the output
//! image can be laid out exactly like the input.

use {
    crate::{bits, Error, Result},
    image::GrayImage,
    std::path::Path,
};

/// Read an image as a flat bit sequence plus its dimensions.
///
/// The image is converted to 8-bit greyscale if it is not already.
pub fn read_grayscale(path: impl AsRef<Path>) -> Result<(Vec<u8>, (u32, u32))> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::MissingFile(path.to_owned()));
    }
    let pixels = image::open(path)?.to_luma8();
    let dimensions = pixels.dimensions();
    Ok((bits::bytes_to_bits(pixels.as_raw()), dimensions))
}

/// Write a flat bit sequence back out as a greyscale PNG with the given
/// dimensions.
///
/// The sequence must pack into exactly `width * height` pixels.
pub fn write_grayscale(
    path: impl AsRef<Path>,
    tape: &[u8],
    (width, height): (u32, u32),
) -> Result<()> {
    let pixels = bits::bits_to_bytes(tape)?;
    if pixels.len() != width as usize * height as usize {
        return Err(Error::LengthMismatch {
            left: pixels.len(),
            right: width as usize * height as usize,
        });
    }
    let image = GrayImage::from_raw(width, height, pixels).unwrap_or_else(|| unreachable!());
    image.save(path)?;
    Ok(())
}
