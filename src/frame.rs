/// Pixel dimensions of the frame a processing cycle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameShape {
    pub height: u32,
    pub width: u32,
}

impl FrameShape {
    #[inline]
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// (width, height) pair
    #[inline]
    pub fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }
}
