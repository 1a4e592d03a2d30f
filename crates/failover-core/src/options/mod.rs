//! Option source implementations

pub mod env;
pub mod file;
pub mod layered;
pub mod memory;

pub use env::EnvOptionSource;
pub use file::FileOptionSource;
pub use layered::LayeredOptionSource;
pub use memory::MapOptionSource;
