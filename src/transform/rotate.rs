//! Quarter-turn rotations.
//!
//! Both rotations write into a `cols x rows` output but walk only the
//! first `cols - 1` rows and `rows - 1` columns of it, so the last output
//! row and column keep whatever the buffer held (black for a fresh
//! [`PixelBuffer`]).

use tracing::trace;

use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Rotate a quarter turn to the right: `out[i][j] = in[j][cols - i - 1]`.
pub fn rotate_right(input: &PixelBuffer, output: &mut PixelBuffer) -> Result<(), BitmapError> {
    let (rows, cols) = input.shape();
    output.ensure_shape(cols, rows)?;
    trace!(rows, cols, "rotate right");

    for i in 0..cols.saturating_sub(1) {
        for j in 0..rows.saturating_sub(1) {
            output[(i, j)] = input[(j, cols - i - 1)];
        }
    }
    Ok(())
}

/// Rotate a quarter turn to the left: `out[i][j] = in[rows - j - 1][i]`.
pub fn rotate_left(input: &PixelBuffer, output: &mut PixelBuffer) -> Result<(), BitmapError> {
    let (rows, cols) = input.shape();
    output.ensure_shape(cols, rows)?;
    trace!(rows, cols, "rotate left");

    for i in 0..cols.saturating_sub(1) {
        for j in 0..rows.saturating_sub(1) {
            output[(i, j)] = input[(rows - j - 1, i)];
        }
    }
    Ok(())
}
