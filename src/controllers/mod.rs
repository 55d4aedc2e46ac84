//! Controllers shipped with the framework and registered by `ControllerFactory::initialize`.
pub mod files;

pub use files::{EMBEDDED_ASSETS, EmbeddedAsset, FilesController};
