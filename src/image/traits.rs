/// Row access over a single-channel buffer; rows are exactly `width` long.
pub trait ImageView {
    type Pixel: Copy;

    fn row(&self, y: usize) -> &[Self::Pixel];
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}
