mod gallery_item;
mod session;

pub use gallery_item::*;
pub use session::*;
