//! BMP file header and BITMAPINFOHEADER: field-by-field parsing, validation
//! against the supported 24-bit profile, and serialization.

use core::fmt;

use bitflags::bitflags;
use tracing::{debug, warn};

use super::cursor::Cursor;
use crate::error::BitmapError;

/// `"BM"` read as a little-endian u16.
pub const MAGIC: u16 = 0x4D42;
pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the pixel array when there is no color table.
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
pub const BITS_PER_PIXEL: u16 = 24;
pub const BYTES_PER_PIXEL: usize = 3;

/// 2835 pixels per metre, roughly 72 DPI.
const DEFAULT_RESOLUTION: i32 = 2835;

bitflags! {
    /// Header rules violated by a bitmap.
    ///
    /// Bit values match the aggregate exit code of the legacy tool. Only
    /// [`HeaderFlags::IMAGE_SIZE`] is tolerated; every other bit is fatal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u8 {
        /// Pixel data offset is not 54 (a color table is present).
        const OFFSET = 0x01;
        /// Info header is not the 40-byte BITMAPINFOHEADER.
        const INFO_SIZE = 0x02;
        /// Planes is not 1 or compression is not 0.
        const PLANES_OR_COMPRESSION = 0x04;
        /// Bits per pixel is not 24.
        const BIT_DEPTH = 0x08;
        /// Image size field disagrees with width * height * 3. Warning only.
        const IMAGE_SIZE = 0x10;
        /// File size field disagrees with 54 + width * height * 3.
        const FILE_SIZE = 0x20;
        /// Color count or important color count is non-zero.
        const COLOR_TABLE = 0x40;
    }
}

const DESCRIPTIONS: [(HeaderFlags, &str); 7] = [
    (HeaderFlags::OFFSET, "pixel data offset is not 54, color tables are not supported"),
    (HeaderFlags::INFO_SIZE, "info header size is not 40, header variant not supported"),
    (HeaderFlags::PLANES_OR_COMPRESSION, "planes or compression format not supported"),
    (HeaderFlags::BIT_DEPTH, "only 24-bit color is supported"),
    (HeaderFlags::IMAGE_SIZE, "image size field does not match dimensions"),
    (HeaderFlags::FILE_SIZE, "file size field does not match dimensions"),
    (HeaderFlags::COLOR_TABLE, "color maps are not supported"),
];

impl HeaderFlags {
    /// The violations that abort processing.
    pub fn fatal(self) -> Self {
        self.difference(Self::IMAGE_SIZE)
    }

    /// One line per set flag, in bit order.
    pub fn descriptions(self) -> impl Iterator<Item = &'static str> {
        DESCRIPTIONS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, text)| text)
    }
}

impl fmt::Display for HeaderFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no violations");
        }
        for (i, text) in self.descriptions().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(text)?;
        }
        Ok(())
    }
}

/// The 14-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub data_offset: u32,
}

/// The 40-byte BITMAPINFOHEADER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub colors: u32,
    pub important_colors: u32,
}

/// Both headers of a bitmap, exactly as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl BitmapHeader {
    /// A conforming 24-bit header for a `width` x `height` image.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width.min(i32::MAX as u32) as i32,
            height: height.min(i32::MAX as u32) as i32,
        };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = (width as u64)
            .checked_mul(height as u64)
            .and_then(|px| px.checked_mul(BYTES_PER_PIXEL as u64))
            .and_then(|bytes| u32::try_from(bytes).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size
            .checked_add(HEADER_LEN as u32)
            .ok_or_else(too_large)?;

        Ok(Self {
            file: FileHeader {
                magic: MAGIC,
                file_size,
                reserved1: 0,
                reserved2: 0,
                data_offset: HEADER_LEN as u32,
            },
            info: InfoHeader {
                header_size: INFO_HEADER_LEN as u32,
                width: w,
                height: h,
                planes: 1,
                bits_per_pixel: BITS_PER_PIXEL,
                compression: 0,
                image_size,
                x_resolution: DEFAULT_RESOLUTION,
                y_resolution: DEFAULT_RESOLUTION,
                colors: 0,
                important_colors: 0,
            },
        })
    }

    /// Read the 54 header bytes at the start of `data`.
    ///
    /// The magic is checked before any other field is read. Fields are read
    /// one at a time, little-endian, since their sizes do not fall on
    /// natural alignment boundaries. No validation beyond the magic happens
    /// here; see [`BitmapHeader::validate`] and [`BitmapHeader::check`].
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let mut cursor = Cursor::new(data);
        let truncated = |_| BitmapError::TruncatedHeader {
            needed: HEADER_LEN,
            actual: data.len(),
        };

        let magic = cursor.get_u16_le().map_err(truncated)?;
        if magic != MAGIC {
            return Err(BitmapError::UnrecognizedFormat { found: magic });
        }

        let file = FileHeader {
            magic,
            file_size: cursor.get_u32_le().map_err(truncated)?,
            reserved1: cursor.get_u16_le().map_err(truncated)?,
            reserved2: cursor.get_u16_le().map_err(truncated)?,
            data_offset: cursor.get_u32_le().map_err(truncated)?,
        };
        let info = InfoHeader {
            header_size: cursor.get_u32_le().map_err(truncated)?,
            width: cursor.get_i32_le().map_err(truncated)?,
            height: cursor.get_i32_le().map_err(truncated)?,
            planes: cursor.get_u16_le().map_err(truncated)?,
            bits_per_pixel: cursor.get_u16_le().map_err(truncated)?,
            compression: cursor.get_u32_le().map_err(truncated)?,
            image_size: cursor.get_u32_le().map_err(truncated)?,
            x_resolution: cursor.get_i32_le().map_err(truncated)?,
            y_resolution: cursor.get_i32_le().map_err(truncated)?,
            colors: cursor.get_u32_le().map_err(truncated)?,
            important_colors: cursor.get_u32_le().map_err(truncated)?,
        };
        debug_assert_eq!(cursor.position(), HEADER_LEN);

        Ok(Self { file, info })
    }

    /// Pixel bytes implied by width, height and bit depth.
    ///
    /// Computed in i128 so hostile headers cannot overflow; may be negative
    /// when a dimension is.
    pub fn expected_pixel_bytes(&self) -> i128 {
        i128::from(self.info.width) * i128::from(self.info.height)
            * i128::from(self.info.bits_per_pixel)
            / 8
    }

    /// Every rule this header violates. Empty means fully conforming.
    pub fn validate(&self) -> HeaderFlags {
        let (file, info) = (&self.file, &self.info);
        let mut flags = HeaderFlags::empty();

        if file.data_offset as usize != HEADER_LEN {
            flags |= HeaderFlags::OFFSET;
        }
        if info.header_size as usize != INFO_HEADER_LEN {
            flags |= HeaderFlags::INFO_SIZE;
        }
        if info.planes != 1 || info.compression != 0 {
            flags |= HeaderFlags::PLANES_OR_COMPRESSION;
        }
        if info.bits_per_pixel != BITS_PER_PIXEL {
            flags |= HeaderFlags::BIT_DEPTH;
        }
        let expected = self.expected_pixel_bytes();
        if expected != i128::from(info.image_size) {
            flags |= HeaderFlags::IMAGE_SIZE;
        }
        if expected + HEADER_LEN as i128 != i128::from(file.file_size) {
            flags |= HeaderFlags::FILE_SIZE;
        }
        if info.colors != 0 || info.important_colors != 0 {
            flags |= HeaderFlags::COLOR_TABLE;
        }
        flags
    }

    /// Validate and log each violated rule.
    ///
    /// An image size mismatch only warns. Any other violation fails with
    /// [`BitmapError::Unsupported`] carrying the full flag set. A header
    /// that passes the rules but has a non-positive dimension fails with
    /// [`BitmapError::InvalidDimensions`].
    pub fn check(&self) -> Result<HeaderFlags, BitmapError> {
        let flags = self.validate();
        for text in flags.descriptions() {
            warn!("{text}");
        }
        if flags.contains(HeaderFlags::IMAGE_SIZE) {
            warn!(
                declared = self.info.image_size,
                expected = %self.expected_pixel_bytes(),
                "image size field is often left unset; ignoring"
            );
        }
        if !flags.fatal().is_empty() {
            return Err(BitmapError::Unsupported { flags });
        }
        if self.info.width <= 0 || self.info.height <= 0 {
            return Err(BitmapError::InvalidDimensions {
                width: self.info.width,
                height: self.info.height,
            });
        }
        debug!(width = self.info.width, height = self.info.height, "header accepted");
        Ok(flags)
    }

    /// Pixel rows (the height). Zero for non-positive heights.
    pub fn rows(&self) -> usize {
        usize::try_from(self.info.height).unwrap_or(0)
    }

    /// Pixel columns (the width). Zero for non-positive widths.
    pub fn cols(&self) -> usize {
        usize::try_from(self.info.width).unwrap_or(0)
    }

    /// The same header with width and height exchanged.
    pub fn transposed(&self) -> Self {
        let mut out = *self;
        core::mem::swap(&mut out.info.width, &mut out.info.height);
        out
    }

    /// Append the 54 header bytes, field by field.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let (file, info) = (&self.file, &self.info);

        // File header (14 bytes)
        out.extend_from_slice(&file.magic.to_le_bytes());
        out.extend_from_slice(&file.file_size.to_le_bytes());
        out.extend_from_slice(&file.reserved1.to_le_bytes());
        out.extend_from_slice(&file.reserved2.to_le_bytes());
        out.extend_from_slice(&file.data_offset.to_le_bytes());

        // BITMAPINFOHEADER (40 bytes)
        out.extend_from_slice(&info.header_size.to_le_bytes());
        out.extend_from_slice(&info.width.to_le_bytes());
        out.extend_from_slice(&info.height.to_le_bytes());
        out.extend_from_slice(&info.planes.to_le_bytes());
        out.extend_from_slice(&info.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&info.compression.to_le_bytes());
        out.extend_from_slice(&info.image_size.to_le_bytes());
        out.extend_from_slice(&info.x_resolution.to_le_bytes());
        out.extend_from_slice(&info.y_resolution.to_le_bytes());
        out.extend_from_slice(&info.colors.to_le_bytes());
        out.extend_from_slice(&info.important_colors.to_le_bytes());
    }
}
