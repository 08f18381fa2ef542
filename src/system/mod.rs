//! System abstraction for environment and filesystem operations
//!
//! Config loading and saving go through this trait so they can be tested
//! against an in-memory implementation.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for system operations (environment + filesystem)
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::fs`, `dirs` and `tempfile`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// The current user's home directory, if one can be determined
    fn home_dir(&self) -> Option<PathBuf>;

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Replace the contents of a file so readers never observe a partial write
    ///
    /// The parent directory must already exist.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}
