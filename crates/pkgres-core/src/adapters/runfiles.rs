//! Runfiles-backed runtime archive.
//!
//! A runfiles tree is either a directory mirroring the logical layout, a
//! manifest file mapping logical paths to absolute ones, or both. Discovery
//! follows the usual variables: `RUNFILES_MANIFEST_FILE`, then `RUNFILES_DIR`,
//! then `TEST_SRCDIR`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ports::{Environment, RuntimeArchive};

/// Variable naming a runfiles manifest.
pub const RUNFILES_MANIFEST_ENV_VAR: &str = "RUNFILES_MANIFEST_FILE";

/// Variable naming a runfiles directory.
pub const RUNFILES_DIR_ENV_VAR: &str = "RUNFILES_DIR";

/// Variable naming the runfiles directory of a test.
pub const TEST_SRCDIR_ENV_VAR: &str = "TEST_SRCDIR";

/// Archive that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArchive;

impl RuntimeArchive for NoArchive {
    fn has_archive(&self) -> bool {
        false
    }

    fn resolve(&self, identifier: &str) -> Result<PathBuf, String> {
        Err(format!(
            "Cannot resolve '{identifier}': no runtime archive is available"
        ))
    }
}

/// Runtime archive backed by a runfiles directory and/or manifest.
#[derive(Debug, Clone, Default)]
pub struct RunfilesArchive {
    directory: Option<PathBuf>,
    manifest: HashMap<String, PathBuf>,
}

impl RunfilesArchive {
    /// Archive rooted at a runfiles directory.
    pub fn from_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            manifest: HashMap::new(),
        }
    }

    /// Archive backed by a manifest file.
    ///
    /// When the manifest sits at `<x>.runfiles/MANIFEST` or
    /// `<x>.runfiles_manifest`, the sibling `<x>.runfiles` directory is used
    /// as the directory fallback.
    pub fn from_manifest(manifest_path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(manifest_path)?;
        Ok(Self {
            directory: directory_for_manifest(manifest_path),
            manifest: parse_manifest(&contents),
        })
    }

    /// Discover runfiles from the environment, or `None` if there are none.
    pub fn from_env(env: &dyn Environment) -> Option<Self> {
        let non_empty = |name: &str| env.var_os(name).filter(|value| !value.is_empty());

        if let Some(manifest) = non_empty(RUNFILES_MANIFEST_ENV_VAR) {
            match Self::from_manifest(Path::new(&manifest)) {
                Ok(mut archive) => {
                    if let Some(dir) = non_empty(RUNFILES_DIR_ENV_VAR) {
                        archive.directory = Some(PathBuf::from(dir));
                    }
                    return Some(archive);
                }
                Err(e) => {
                    tracing::debug!(
                        "Ignoring {}='{}' because it could not be read: {}",
                        RUNFILES_MANIFEST_ENV_VAR,
                        Path::new(&manifest).display(),
                        e
                    );
                }
            }
        }

        non_empty(RUNFILES_DIR_ENV_VAR)
            .or_else(|| non_empty(TEST_SRCDIR_ENV_VAR))
            .map(Self::from_directory)
    }

    /// Directory the archive falls back to for entries missing from the manifest.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

impl RuntimeArchive for RunfilesArchive {
    fn has_archive(&self) -> bool {
        self.directory.is_some() || !self.manifest.is_empty()
    }

    fn resolve(&self, identifier: &str) -> Result<PathBuf, String> {
        if identifier.is_empty() || identifier.starts_with('/') {
            return Err(format!(
                "Runfiles lookup of '{identifier}' requires a non-empty relative path"
            ));
        }

        if let Some(path) = self.manifest.get(identifier) {
            if path.is_file() {
                return Ok(path.clone());
            }
        }

        if let Some(dir) = &self.directory {
            let candidate = dir.join(identifier);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        let dir = self
            .directory
            .as_ref()
            .map_or_else(|| "<none>".to_string(), |d| d.display().to_string());
        Err(format!(
            "Sought '{identifier}' in runfiles directory '{dir}' but the file does not exist \
             at that location nor is it on the manifest; perhaps a 'data = []' dependency is \
             missing."
        ))
    }
}

/// Parse `<logical> <absolute>` manifest lines; malformed lines are skipped.
fn parse_manifest(contents: &str) -> HashMap<String, PathBuf> {
    contents
        .lines()
        .filter_map(|line| line.split_once(' '))
        .filter(|(logical, absolute)| !logical.is_empty() && !absolute.is_empty())
        .map(|(logical, absolute)| (logical.to_string(), PathBuf::from(absolute)))
        .collect()
}

fn directory_for_manifest(manifest_path: &Path) -> Option<PathBuf> {
    let parent = manifest_path.parent()?;
    let file_name = manifest_path.file_name()?.to_str()?;
    if file_name == "MANIFEST" {
        return Some(parent.to_path_buf());
    }
    file_name
        .strip_suffix("_manifest")
        .filter(|stem| !stem.is_empty())
        .map(|stem| parent.join(stem))
}
