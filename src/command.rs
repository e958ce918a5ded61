//! Operation dispatch: token parsing, output shape, and the full
//! decode → transform → encode pipeline.

use core::fmt;
use core::str::FromStr;

use enough::Stop;
use tracing::{debug, trace};

use crate::bmp;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;
use crate::transform::{EdgeMode, edge_detect, rotate_left, rotate_right};

/// One of the four supported edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `edtrunc`: edge detection, low-byte masking.
    EdgeTruncate,
    /// `edmag`: edge detection, absolute value clipped to 255.
    EdgeMagnitude,
    /// `rotr`: quarter turn right.
    RotateRight,
    /// `rotl`: quarter turn left.
    RotateLeft,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Self::EdgeTruncate,
        Self::EdgeMagnitude,
        Self::RotateRight,
        Self::RotateLeft,
    ];

    /// The command-line token.
    pub fn token(self) -> &'static str {
        match self {
            Self::EdgeTruncate => "edtrunc",
            Self::EdgeMagnitude => "edmag",
            Self::RotateRight => "rotr",
            Self::RotateLeft => "rotl",
        }
    }

    /// Whether the output swaps width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Self::RotateRight | Self::RotateLeft)
    }

    /// `(rows, cols)` of the output for an input of `(rows, cols)`.
    pub fn output_shape(self, rows: usize, cols: usize) -> (usize, usize) {
        if self.swaps_dimensions() {
            (cols, rows)
        } else {
            (rows, cols)
        }
    }

    /// Allocate a black output of the right shape and fill it from `input`.
    pub fn apply(self, input: &PixelBuffer) -> Result<PixelBuffer, BitmapError> {
        let (rows, cols) = self.output_shape(input.rows(), input.cols());
        let mut output = PixelBuffer::new(rows, cols)?;
        trace!(op = self.token(), rows, cols, "applying");
        match self {
            Self::EdgeTruncate => edge_detect(input, &mut output, EdgeMode::Truncate)?,
            Self::EdgeMagnitude => edge_detect(input, &mut output, EdgeMode::Magnitude)?,
            Self::RotateRight => rotate_right(input, &mut output)?,
            Self::RotateLeft => rotate_left(input, &mut output)?,
        }
        Ok(output)
    }
}

impl FromStr for Operation {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.token() == s)
            .ok_or_else(|| BitmapError::UnknownOperation(s.to_owned()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Decode `data`, apply `op`, and encode the result.
///
/// Rotations write the input header with width and height swapped; every
/// other header field is carried over unchanged.
pub fn process(
    op: Operation,
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let input = bmp::decode(data, limits, stop)?;
    debug!(
        op = op.token(),
        rows = input.pixels.rows(),
        cols = input.pixels.cols(),
        "decoded"
    );
    let output = op.apply(&input.pixels)?;
    let header = if op.swaps_dimensions() {
        input.header.transposed()
    } else {
        input.header
    };
    bmp::encode(&header, &output, stop)
}
