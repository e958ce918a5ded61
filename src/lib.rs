//! # bmpedit
//!
//! Edge detection and quarter-turn rotation for uncompressed 24-bit BMP
//! images.
//!
//! ## Supported Format
//!
//! Exactly one BMP profile is read and written: 14-byte file header,
//! 40-byte BITMAPINFOHEADER, pixel data at offset 54, one plane, no
//! compression, no color table, 24 bits per pixel, rows of blue-green-red
//! triples with no row padding. Headers are validated rule by rule and every
//! violated rule is reported (see [`HeaderFlags`]); only a stale image size
//! field is tolerated.
//!
//! ## Operations
//!
//! - `edtrunc`: 3x3 Laplacian edge detection, sums masked to the low byte
//! - `edmag`: the same kernel, absolute value clipped to 255
//! - `rotr` / `rotl`: quarter turn right / left (width and height swap)
//!
//! ## Non-Goals
//!
//! - Compressed, palette, or non-24-bit bitmaps
//! - In-place editing
//! - Streaming; the whole image lives in memory
//!
//! ## Usage
//!
//! ```no_run
//! use bmpedit::{Operation, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Whole pipeline
//! let rotated = bmpedit::process(Operation::RotateRight, data, None, &Unstoppable)?;
//!
//! // Or step by step
//! let bitmap = bmpedit::decode(data, None, &Unstoppable)?;
//! let edges = Operation::EdgeMagnitude.apply(&bitmap.pixels)?;
//! let out = bmpedit::encode(&bitmap.header, &edges, &Unstoppable)?;
//! # let _ = (rotated, out);
//! # Ok::<(), bmpedit::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

pub mod bmp;
mod command;
mod error;
mod limits;
mod pixel;
pub mod transform;

// Re-exports
pub use bmp::{Bitmap, BitmapHeader, FileHeader, HeaderFlags, InfoHeader, decode, encode};
pub use command::{Operation, process};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::{BLACK, Pixel, PixelBuffer};
