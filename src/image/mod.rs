pub mod gray;
pub mod io;
pub mod source;
pub mod traits;
pub mod u8;

pub use self::gray::GrayImageU8;
pub use self::source::{gray_from_dynamic, ChannelOrder, SourceImage};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
