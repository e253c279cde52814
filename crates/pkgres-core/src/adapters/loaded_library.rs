use std::path::{Path, PathBuf};

use crate::ports::{LibraryLocator, MARKER_CHECK_VALUE};

/// Finds loaded shared libraries of the current process.
///
/// On Linux this scans `/proc/self/maps`. Other platforms report nothing,
/// which makes the installed-tree strategy yield no candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadedLibraryLocator;

impl LibraryLocator for LoadedLibraryLocator {
    fn marker_check(&self) -> u32 {
        MARKER_CHECK_VALUE
    }

    #[cfg(target_os = "linux")]
    fn locate(&self, name: &str) -> Option<PathBuf> {
        match std::fs::read_to_string("/proc/self/maps") {
            Ok(maps) => find_in_maps(&maps, name),
            Err(e) => {
                tracing::debug!("Cannot read /proc/self/maps: {}", e);
                None
            }
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn locate(&self, _name: &str) -> Option<PathBuf> {
        None
    }
}

/// Directory of the first mapping whose file name is exactly `name`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn find_in_maps(maps: &str, name: &str) -> Option<PathBuf> {
    maps.lines()
        .filter_map(mapped_path)
        .map(Path::new)
        .find(|path| path.file_name().is_some_and(|file| file == name))
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}

/// The pathname column of a maps line: everything after the first five fields.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn mapped_path(line: &str) -> Option<&str> {
    let mut rest = line;
    for _ in 0..5 {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace)?;
        rest = &rest[end..];
    }
    let path = rest.trim();
    let path = path.strip_suffix(" (deleted)").unwrap_or(path);
    path.starts_with('/').then_some(path)
}
