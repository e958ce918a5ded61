//! Laplacian edge detection with a cropped 3x3 kernel.

use tracing::trace;

use crate::error::BitmapError;
use crate::pixel::{Pixel, PixelBuffer};

/// Edge-highlighting kernel, row-major, centered on the current pixel.
pub const KERNEL: [[i32; 3]; 3] = [
    [0, -1, 0],
    [-1, 4, -1],
    [0, -1, 0],
];

/// How a channel's signed weighted sum becomes an 8-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeMode {
    /// Keep the low 8 bits of the two's-complement sum (wraps).
    Truncate,
    /// Absolute value, saturated at 255.
    Magnitude,
}

impl EdgeMode {
    /// Fold a running channel accumulator back into `0..=255`.
    ///
    /// Applied after every kernel tap, so in magnitude mode the result
    /// depends on tap order.
    pub fn combine(self, sum: i32) -> u8 {
        match self {
            Self::Truncate => (sum & 0xFF) as u8,
            Self::Magnitude => sum.unsigned_abs().min(255) as u8,
        }
    }
}

/// Convolve `input` with [`KERNEL`] into `output`, per channel.
///
/// Taps that fall outside the buffer are dropped rather than padded,
/// reflected or wrapped, so edge pixels see a cropped kernel. Taps are
/// visited row by row and each channel accumulator is passed through
/// [`EdgeMode::combine`] after every tap. `output` must have the same
/// shape as `input`.
pub fn edge_detect(input: &PixelBuffer, output: &mut PixelBuffer, mode: EdgeMode) -> Result<(), BitmapError> {
    let (rows, cols) = input.shape();
    output.ensure_shape(rows, cols)?;
    trace!(rows, cols, ?mode, "edge detect");

    for i in 0..rows {
        for j in 0..cols {
            let (mut b, mut g, mut r) = (0u8, 0u8, 0u8);
            for (k, kernel_row) in KERNEL.iter().enumerate() {
                let Some(y) = (i + k).checked_sub(1).filter(|&y| y < rows) else {
                    continue;
                };
                for (m, &weight) in kernel_row.iter().enumerate() {
                    let Some(x) = (j + m).checked_sub(1).filter(|&x| x < cols) else {
                        continue;
                    };
                    let px = input[(y, x)];
                    r = mode.combine(i32::from(r) + weight * i32::from(px.r));
                    g = mode.combine(i32::from(g) + weight * i32::from(px.g));
                    b = mode.combine(i32::from(b) + weight * i32::from(px.b));
                }
            }
            output[(i, j)] = Pixel { b, g, r };
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Pixel {
        Pixel { b: v, g: v, r: v }
    }

    fn buffer(rows: usize, cols: usize, values: &[u8]) -> PixelBuffer {
        PixelBuffer::from_pixels(rows, cols, values.iter().copied().map(gray).collect()).unwrap()
    }

    fn run(input: &PixelBuffer, mode: EdgeMode) -> PixelBuffer {
        let mut out = PixelBuffer::new(input.rows(), input.cols()).unwrap();
        edge_detect(input, &mut out, mode).unwrap();
        out
    }

    #[test]
    fn combine_policies() {
        assert_eq!(EdgeMode::Truncate.combine(0), 0);
        assert_eq!(EdgeMode::Truncate.combine(300), 44);
        assert_eq!(EdgeMode::Truncate.combine(-1), 255);
        assert_eq!(EdgeMode::Truncate.combine(-256), 0);
        assert_eq!(EdgeMode::Magnitude.combine(-40), 40);
        assert_eq!(EdgeMode::Magnitude.combine(-1000), 255);
        assert_eq!(EdgeMode::Magnitude.combine(1020), 255);
    }

    #[test]
    fn uniform_interior_is_zero() {
        let input = buffer(4, 5, &[77; 20]);
        let out = run(&input, EdgeMode::Truncate);
        for i in 1..3 {
            for j in 1..4 {
                assert_eq!(out[(i, j)], gray(0));
            }
        }
    }

    #[test]
    fn edges_and_corners_use_cropped_kernel() {
        // Uniform 10: a corner has two neighbors (4*10 - 20), an edge three
        // (4*10 - 30).
        let input = buffer(3, 3, &[10; 9]);
        let out = run(&input, EdgeMode::Truncate);
        assert_eq!(out[(0, 0)], gray(20));
        assert_eq!(out[(2, 2)], gray(20));
        assert_eq!(out[(0, 1)], gray(10));
        assert_eq!(out[(1, 2)], gray(10));
        assert_eq!(out[(1, 1)], gray(0));
    }

    #[test]
    fn bright_center_on_black() {
        #[rustfmt::skip]
        let input = buffer(3, 3, &[
            0, 0, 0,
            0, 50, 0,
            0, 0, 0,
        ]);
        let mag = run(&input, EdgeMode::Magnitude);
        assert_eq!(mag[(1, 1)], gray(200));
        assert_eq!(mag[(0, 1)], gray(50));
        assert_eq!(mag[(0, 0)], gray(0));

        let trunc = run(&input, EdgeMode::Truncate);
        assert_eq!(trunc[(1, 1)], gray(200));
        // -50 masked to the low byte.
        assert_eq!(trunc[(0, 1)], gray(206));
    }

    #[test]
    fn magnitude_clips_after_every_tap() {
        // Center of uniform 100, taps in row order:
        // -100 -> 100, -100 -> 0, +400 -> 255, -100 -> 155, -100 -> 55.
        let input = buffer(3, 3, &[100; 9]);
        let out = run(&input, EdgeMode::Magnitude);
        #[rustfmt::skip]
        let expected = [
            55, 55, 155,
            55, 55, 155,
            155, 155, 255,
        ];
        for (n, &v) in expected.iter().enumerate() {
            assert_eq!(out[(n / 3, n % 3)], gray(v), "pixel {n}");
        }
    }

    #[test]
    fn magnitude_cross_pattern() {
        #[rustfmt::skip]
        let input = buffer(3, 3, &[
            0, 100, 0,
            100, 10, 100,
            0, 100, 0,
        ]);
        let out = run(&input, EdgeMode::Magnitude);
        // -100 -> 100, -100 -> 0, +40 -> 40, -100 -> 60, -100 -> 40.
        assert_eq!(out[(1, 1)], gray(40));
        let out = run(&input, EdgeMode::Truncate);
        assert_eq!(out[(1, 1)], gray(((40i32 - 400) & 0xFF) as u8));
    }

    #[test]
    fn channels_are_independent() {
        let mut input = PixelBuffer::new(3, 3).unwrap();
        input[(1, 1)] = Pixel { b: 10, g: 0, r: 100 };
        let out = run(&input, EdgeMode::Magnitude);
        assert_eq!(out[(1, 1)], Pixel { b: 40, g: 0, r: 255 });
        assert_eq!(out[(1, 0)], Pixel { b: 10, g: 0, r: 100 });
    }

    #[test]
    fn single_row_and_column() {
        let input = buffer(1, 3, &[10, 20, 30]);
        let out = run(&input, EdgeMode::Magnitude);
        assert_eq!(out[(0, 0)], gray(20)); // 40, then 20
        assert_eq!(out[(0, 1)], gray(60)); // 10, then 90, then 60
        assert_eq!(out[(0, 2)], gray(140)); // 20, then 140

        let input = buffer(1, 1, &[60]);
        assert_eq!(run(&input, EdgeMode::Magnitude)[(0, 0)], gray(240));
    }

    #[test]
    fn does_not_touch_input() {
        let input = buffer(2, 2, &[1, 2, 3, 4]);
        let before = input.clone();
        let _ = run(&input, EdgeMode::Truncate);
        assert_eq!(input, before);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let input = buffer(2, 3, &[0; 6]);
        let mut out = PixelBuffer::new(3, 2).unwrap();
        assert!(matches!(
            edge_detect(&input, &mut out, EdgeMode::Truncate),
            Err(BitmapError::ShapeMismatch { .. })
        ));
    }
}
