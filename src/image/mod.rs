pub mod f32;
pub mod io;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::io::{load_source_image, SourceImage};
pub use self::traits::{ImageView, ImageViewMut};
