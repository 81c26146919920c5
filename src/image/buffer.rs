//! Owned and borrowed single-channel image buffers, row-major layout.

/// Borrowed 8-bit grayscale view with stride (bytes between rows).
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes (stride == width).
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert!(data.len() >= width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Owned single-channel f32 image, `stride == width`.
///
/// The edge stage keeps intensity in 8-bit units (0.0–255.0) so the Canny
/// hysteresis thresholds carry their conventional scale.
#[derive(Clone, Debug)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Lift an 8-bit view into float, preserving the 0–255 intensity scale.
    pub fn from_u8(gray: ImageU8<'_>) -> Self {
        let mut out = Self::new(gray.w, gray.h);
        for y in 0..gray.h {
            let src = gray.row(y);
            let dst = out.row_mut(y);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = s as f32;
            }
        }
        out
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.w + x] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8_keeps_intensity_scale() {
        let data = vec![0u8, 128, 255, 64];
        let img = ImageU8 {
            w: 2,
            h: 2,
            stride: 2,
            data: &data,
        };
        let f = ImageF32::from_u8(img);
        assert_eq!(f.get(0, 0), 0.0);
        assert_eq!(f.get(0, 1), 255.0);
        assert_eq!(f.get(1, 1), 64.0);
    }

    #[test]
    fn strided_view_reads_rows_correctly() {
        // 3 wide, stride 4: last byte of each row is padding
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 99];
        let img = ImageU8 {
            w: 3,
            h: 2,
            stride: 4,
            data: &data,
        };
        assert_eq!(img.row(1), &[4, 5, 6]);
        assert_eq!(img.get(2, 0), 3);
    }
}
