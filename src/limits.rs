use crate::error::BitmapError;
use crate::pixel::Pixel;

/// Caps on the images [`decode`](crate::decode) will allocate for.
///
/// Checked against the header before any pixel is read. `None` means
/// unlimited; the default has no caps at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum width * height.
    pub max_pixels: Option<u64>,
    /// Maximum size of one decoded [`PixelBuffer`](crate::PixelBuffer).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Fail with [`BitmapError::LimitExceeded`] naming the first cap a
    /// `width` x `height` image breaks.
    pub(crate) fn check(&self, width: usize, height: usize) -> Result<(), BitmapError> {
        let (width, height) = (width as u64, height as u64);
        let pixels = width.saturating_mul(height);
        let bytes = pixels.saturating_mul(size_of::<Pixel>() as u64);

        let measures = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("pixel buffer bytes", bytes, self.max_memory_bytes),
        ];
        for (what, value, cap) in measures {
            if let Some(cap) = cap.filter(|&cap| value > cap) {
                return Err(BitmapError::LimitExceeded(format!(
                    "{what} {value} exceeds limit {cap}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exceeded(limits: &Limits, width: usize, height: usize) -> String {
        match limits.check(width, height) {
            Err(BitmapError::LimitExceeded(msg)) => msg,
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn default_is_unlimited() {
        assert!(Limits::default().check(usize::MAX, usize::MAX).is_ok());
    }

    #[test]
    fn width_and_height() {
        let limits = Limits {
            max_width: Some(10),
            max_height: Some(5),
            ..Default::default()
        };
        assert!(limits.check(10, 5).is_ok());
        assert_eq!(exceeded(&limits, 11, 1), "width 11 exceeds limit 10");
        assert_eq!(exceeded(&limits, 1, 6), "height 6 exceeds limit 5");
    }

    #[test]
    fn pixel_count() {
        let limits = Limits {
            max_pixels: Some(12),
            ..Default::default()
        };
        assert!(limits.check(4, 3).is_ok());
        assert_eq!(exceeded(&limits, 4, 4), "pixel count 16 exceeds limit 12");
    }

    #[test]
    fn buffer_bytes_count_three_per_pixel() {
        let limits = Limits {
            max_memory_bytes: Some(30),
            ..Default::default()
        };
        assert!(limits.check(5, 2).is_ok());
        assert_eq!(exceeded(&limits, 11, 1), "pixel buffer bytes 33 exceeds limit 30");
    }
}
