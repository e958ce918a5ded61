//! Uncompressed 24-bit BMP codec.
//!
//! Only the narrow profile the editor supports is accepted: a 14-byte file
//! header, a 40-byte BITMAPINFOHEADER, no color table, one plane, no
//! compression, 24 bits per pixel, and unpadded rows of blue-green-red
//! triples starting at byte 54.

mod cursor;
mod decode;
mod encode;
mod header;

pub use header::{
    BITS_PER_PIXEL, BYTES_PER_PIXEL, BitmapHeader, FILE_HEADER_LEN, FileHeader, HEADER_LEN,
    HeaderFlags, INFO_HEADER_LEN, InfoHeader, MAGIC,
};

use enough::Stop;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// A decoded bitmap: the headers as stored plus the pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub header: BitmapHeader,
    pub pixels: PixelBuffer,
}

/// Parse, validate and decode a bitmap.
///
/// Fails on a wrong magic before reading any other field, then on any
/// fatal header violation, then on limits, then on a short pixel array.
pub fn decode(data: &[u8], limits: Option<&Limits>, stop: &dyn Stop) -> Result<Bitmap, BitmapError> {
    let header = BitmapHeader::parse(data)?;
    header.check()?;
    check_limits(limits, header.cols(), header.rows())?;
    stop.check()?;
    let pixels = decode::decode_pixels(data, &header, stop)?;
    Ok(Bitmap { header, pixels })
}

/// Encode `pixels` under `header`.
///
/// `header` must advertise the buffer's actual shape (width = cols,
/// height = rows).
pub fn encode(header: &BitmapHeader, pixels: &PixelBuffer, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(header, pixels, stop)
}

fn check_limits(limits: Option<&Limits>, width: usize, height: usize) -> Result<(), BitmapError> {
    match limits {
        Some(limits) => limits.check(width, height),
        None => Ok(()),
    }
}

impl Bitmap {
    /// Encode with the stored header.
    pub fn encode(&self, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
        encode(&self.header, &self.pixels, stop)
    }
}
