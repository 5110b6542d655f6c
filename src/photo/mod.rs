pub mod loader;
pub mod slot;

pub use loader::{PhotoLoadResult, PhotoTarget, decode, extension_for, load_photo};
pub use slot::PhotoSlot;
