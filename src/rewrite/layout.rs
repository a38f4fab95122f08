//! Output layout for a rewritten config.
//!
//! ```text
//! <parent of output_dir's parent>/
//!   <name>/
//!     <name>.json
//!     log/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RewriteError;

/// Name of the logging subdirectory.
pub const LOG_DIR_NAME: &str = "log";

/// Extension of the rewritten config file.
pub const CONFIG_EXTENSION: &str = "json";

/// Directories and file produced for one derived name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub output_dir: PathBuf,
    pub logging_dir: PathBuf,
    pub config_path: PathBuf,
}

impl OutputLayout {
    /// Lay out outputs for `name` next to the parent of `original_output_dir`.
    ///
    /// `/out/run1` with name `n` yields `/n`, `/n/log` and `/n/n.json`.
    /// A path without a parent (filesystem root, bare relative name) is
    /// used as its own parent.
    pub fn derive(original_output_dir: &Path, name: &str) -> Self {
        let parent = parent_or_self(original_output_dir);
        let base = parent_or_self(parent);

        let output_dir = base.join(name);
        let logging_dir = output_dir.join(LOG_DIR_NAME);
        let config_path = output_dir.join(format!("{}.{}", name, CONFIG_EXTENSION));

        Self {
            output_dir,
            logging_dir,
            config_path,
        }
    }

    /// Create the output and logging directories. Existing directories are fine.
    pub fn create_dirs(&self) -> Result<(), RewriteError> {
        for dir in [&self.output_dir, &self.logging_dir] {
            fs::create_dir_all(dir).map_err(|e| RewriteError::io(dir, e))?;
        }
        Ok(())
    }
}

fn parent_or_self(path: &Path) -> &Path {
    path.parent().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_derive_absolute() {
        let layout = OutputLayout::derive(Path::new("/out/run1"), "name");
        assert_eq!(layout.output_dir, PathBuf::from("/name"));
        assert_eq!(layout.logging_dir, PathBuf::from("/name/log"));
        assert_eq!(layout.config_path, PathBuf::from("/name/name.json"));
    }

    #[test]
    fn test_derive_deep_path() {
        let layout = OutputLayout::derive(Path::new("/data/models/lora/run1"), "n");
        assert_eq!(layout.output_dir, PathBuf::from("/data/models/n"));
    }

    #[test]
    fn test_derive_trailing_slash() {
        let layout = OutputLayout::derive(Path::new("/data/models/run1/"), "n");
        assert_eq!(layout.output_dir, PathBuf::from("/data/n"));
    }

    #[test]
    fn test_derive_relative() {
        let layout = OutputLayout::derive(Path::new("out/run1"), "n");
        assert_eq!(layout.output_dir, PathBuf::from("n"));
        assert_eq!(layout.config_path, PathBuf::from("n/n.json"));
    }

    #[test]
    fn test_derive_bare_name() {
        let layout = OutputLayout::derive(Path::new("run1"), "n");
        assert_eq!(layout.output_dir, PathBuf::from("n"));
    }

    #[test]
    fn test_derive_root() {
        let layout = OutputLayout::derive(Path::new("/"), "n");
        assert_eq!(layout.output_dir, PathBuf::from("/n"));
    }

    #[test]
    fn test_create_dirs_idempotent() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("out").join("run1");
        let layout = OutputLayout::derive(&original, "n");

        layout.create_dirs().unwrap();
        layout.create_dirs().unwrap();

        assert!(layout.output_dir.is_dir());
        assert!(layout.logging_dir.is_dir());
        assert_eq!(layout.output_dir, temp.path().join("n"));
    }

    #[test]
    fn test_create_dirs_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("n"), b"not a dir").unwrap();

        let layout = OutputLayout::derive(&temp.path().join("out").join("run1"), "n");
        let err = layout.create_dirs().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
