use enough::StopReason;

use crate::bmp::HeaderFlags;

/// Errors from bitmap decoding, transformation and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("not a bmp file: magic {found:#06x}, expected 0x4d42")]
    UnrecognizedFormat { found: u16 },

    #[error("truncated header: needed {needed} bytes, got {actual}")]
    TruncatedHeader { needed: usize, actual: usize },

    #[error("unsupported bitmap (code {code:#x}): {flags}", code = .flags.bits())]
    Unsupported { flags: HeaderFlags },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("failed to read pixel {index} at [{row}][{col}]")]
    TruncatedPixels { index: usize, row: usize, col: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i32, height: i32 },

    #[error("invalid buffer shape: {rows}x{cols}")]
    InvalidShape { rows: usize, cols: usize },

    #[error("buffer shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unknown operation {0:?} (expected one of: edtrunc, edmag, rotr, rotl)")]
    UnknownOperation(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
