#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// In-memory RGBA frame for headless rendering.
///
/// The windowed path draws straight into the `pixels` frame buffer; tests
/// draw into one of these and hash or inspect the bytes.
#[derive(Debug, Clone)]
pub struct RgbaBufferSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl RgbaBufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.buf.clear();
        self.buf.resize(size.rgba_len(), 0u8);
    }
}
