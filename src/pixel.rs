use core::fmt;
use core::ops::{Index, IndexMut};

use imgref::ImgVec;

use crate::error::BitmapError;

/// One 24-bit pixel, stored in on-disk channel order (blue, green, red).
pub type Pixel = rgb::alt::BGR8;

/// Black, the value every freshly allocated buffer starts with.
pub const BLACK: Pixel = Pixel { b: 0, g: 0, r: 0 };

/// Row-major 2D grid of [`Pixel`]s with fixed `(rows, cols)` extents.
///
/// Backed by a single contiguous [`ImgVec`] with stride equal to the
/// column count. Indexing is `buffer[(row, col)]`.
#[derive(Clone)]
pub struct PixelBuffer {
    img: ImgVec<Pixel>,
}

impl PixelBuffer {
    /// Allocate a black buffer of `rows` x `cols`.
    ///
    /// Fails with [`BitmapError::InvalidShape`] when either extent is zero
    /// or the pixel count overflows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BitmapError> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0)
            .ok_or(BitmapError::InvalidShape { rows, cols })?;
        Ok(Self {
            img: ImgVec::new(vec![BLACK; len], cols, rows),
        })
    }

    /// Wrap row-major pixels. `pixels.len()` must equal `rows * cols`.
    pub fn from_pixels(rows: usize, cols: usize, pixels: Vec<Pixel>) -> Result<Self, BitmapError> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols) != Some(pixels.len()) {
            return Err(BitmapError::ShapeMismatch {
                expected_rows: rows,
                expected_cols: cols,
                rows: pixels.len().checked_div(cols).unwrap_or(0),
                cols,
            });
        }
        Ok(Self {
            img: ImgVec::new(pixels, cols, rows),
        })
    }

    pub fn rows(&self) -> usize {
        self.img.height()
    }

    pub fn cols(&self) -> usize {
        self.img.width()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Pixel at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row < self.rows() && col < self.cols() {
            Some(self[(row, col)])
        } else {
            None
        }
    }

    /// Borrow one full row.
    pub fn row(&self, row: usize) -> &[Pixel] {
        let cols = self.cols();
        &self.pixels()[row * cols..(row + 1) * cols]
    }

    /// Iterate rows top to bottom (in buffer order).
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels().chunks_exact(self.cols())
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.img.buf()[..]
    }

    /// Borrow as an [`imgref::ImgRef`] (width = cols, height = rows).
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        self.img.as_ref()
    }

    pub(crate) fn ensure_shape(&self, rows: usize, cols: usize) -> Result<(), BitmapError> {
        if self.shape() != (rows, cols) {
            return Err(BitmapError::ShapeMismatch {
                expected_rows: rows,
                expected_cols: cols,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for PixelBuffer {
    type Output = Pixel;

    fn index(&self, (row, col): (usize, usize)) -> &Pixel {
        &self.img[(col, row)]
    }
}

impl IndexMut<(usize, usize)> for PixelBuffer {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Pixel {
        &mut self.img[(col, row)]
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.pixels() == other.pixels()
    }
}

impl Eq for PixelBuffer {}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .finish_non_exhaustive()
    }
}
