//! Default implementations of the resolver ports.
//!
//! These talk to the real process: environment variables, the filesystem,
//! a runfiles tree and `/proc/self/maps`. Tests substitute their own port
//! implementations instead.

mod loaded_library;
mod process_env;
mod runfiles;
mod std_fs;

pub use loaded_library::LoadedLibraryLocator;
pub use process_env::ProcessEnvironment;
pub use runfiles::{NoArchive, RunfilesArchive};
pub use std_fs::StdFilesystem;
