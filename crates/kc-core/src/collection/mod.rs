//! Filter collections and the rules deciding whether one may be used.

mod access;
mod preview;
mod registry;

pub use access::AccessState;
pub use preview::{preview_images, PreviewImage, PREVIEW_IMAGE_COUNT};
pub use registry::{CollectionRegistry, FilterCollection};
