use std::path::Path;

use crate::ports::Filesystem;

/// Filesystem predicates backed by `std::fs` metadata (symlinks are followed).
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_predicates_distinguish_files_and_directories() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("data.txt");
        std::fs::write(&file, b"x").unwrap();

        let fs = StdFilesystem;
        assert!(fs.is_dir(temp.path()));
        assert!(!fs.is_file(temp.path()));
        assert!(fs.is_file(&file));
        assert!(!fs.is_dir(&file));
        assert!(!fs.is_file(&temp.path().join("absent")));
    }
}
