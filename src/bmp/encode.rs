//! Bitmap encoder: header verbatim, then unpadded BGR rows.

use enough::Stop;

use super::header::{BitmapHeader, BYTES_PER_PIXEL, HEADER_LEN};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Serialize `header` followed by every row of `pixels`.
///
/// The header is written field for field as given. Its width and height
/// must equal the buffer's cols and rows, so a rotated buffer needs a
/// [`BitmapHeader::transposed`] header.
pub(crate) fn encode_bmp(
    header: &BitmapHeader,
    pixels: &PixelBuffer,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    pixels.ensure_shape(header.rows(), header.cols())?;

    let pixel_data_size = pixels
        .rows()
        .checked_mul(pixels.cols())
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.info.width,
            height: header.info.height,
        })?;

    let mut out = Vec::with_capacity(HEADER_LEN + pixel_data_size);
    header.write_to(&mut out);

    stop.check()?;
    for (row_idx, row) in pixels.iter_rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
    }

    Ok(out)
}
