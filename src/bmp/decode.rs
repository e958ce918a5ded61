//! Pixel array decoder for validated 24-bit bitmaps.

use enough::Stop;
use tracing::info;

use super::cursor::Cursor;
use super::header::{BitmapHeader, HEADER_LEN};
use crate::error::BitmapError;
use crate::pixel::{Pixel, PixelBuffer};

/// Read `rows * cols` pixel triples starting right after the header.
///
/// Triples are stored blue, green, red and are kept in that order. Rows
/// carry no padding. Bytes after the last pixel are ignored.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BitmapHeader,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let (rows, cols) = (header.rows(), header.cols());
    let count = rows
        .checked_mul(cols)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.info.width,
            height: header.info.height,
        })?;

    let mut cursor = Cursor::new(data);
    cursor
        .set_position(HEADER_LEN)
        .map_err(|_| BitmapError::TruncatedPixels { index: 0, row: 0, col: 0 })?;

    info!(rows, cols, "reading pixels");
    let mut pixels = Vec::with_capacity(count.min(cursor.remaining() / 3 + 1));
    for row in 0..rows {
        if row % 16 == 0 {
            stop.check()?;
        }
        for col in 0..cols {
            let [b, g, r] = cursor
                .read_fixed_bytes::<3>()
                .map_err(|_| BitmapError::TruncatedPixels {
                    index: row * cols + col,
                    row,
                    col,
                })?;
            pixels.push(Pixel { b, g, r });
        }
    }

    PixelBuffer::from_pixels(rows, cols, pixels)
}
