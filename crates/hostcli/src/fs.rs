//! File system abstractions

pub mod filesystem;
pub mod real;

#[cfg(any(test, feature = "with_mocks"))]
pub use filesystem::MockFileSystem;
pub use filesystem::{FileSystem, FileSystemError};
pub use real::RealFileSystem;
