//! Resource resolution across the configured root strategies.
//!
//! # Design
//!
//! - Strategies run in the order given by [`ResolverConfig::strategies`]
//! - The first strategy that yields a root wins, even when that root lacks the
//!   requested file; every root is expected to be complete
//! - Errors are returned as data in a [`ResolutionResult`]; only the
//!   `*_or_fail` entry points return `Err`

mod identifier;
mod install;
mod legacy;
mod probe;
mod sentinel;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{
    LoadedLibraryLocator, NoArchive, ProcessEnvironment, RunfilesArchive, StdFilesystem,
};
use crate::config::{ResolverConfig, RootStrategy};
use crate::error::{ConfigError, ResolveError};
use crate::ports::{Environment, Filesystem, LibraryLocator, RuntimeArchive};
use crate::result::ResolutionResult;
use crate::warnings::WarningRegistry;

pub use probe::{ProbeStatus, RootProbe, RootProbes};
pub use sentinel::RootCandidate;

/// Resolves resource identifiers to absolute paths.
///
/// A resolver holds no per-call state and can be shared across threads.
#[derive(Clone)]
pub struct Resolver {
    config: ResolverConfig,
    environment: Arc<dyn Environment>,
    filesystem: Arc<dyn Filesystem>,
    archive: Arc<dyn RuntimeArchive>,
    libraries: Arc<dyn LibraryLocator>,
    warnings: Arc<WarningRegistry>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("has_archive", &self.archive.has_archive())
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Start building a resolver; unset ports default to the real process.
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    /// Resolver using the default configuration and the real process state.
    pub fn from_process() -> Self {
        let environment: Arc<dyn Environment> = Arc::new(ProcessEnvironment);
        Self {
            config: ResolverConfig::default(),
            archive: default_archive(environment.as_ref()),
            environment,
            filesystem: Arc::new(StdFilesystem),
            libraries: Arc::new(LoadedLibraryLocator),
            warnings: WarningRegistry::global(),
        }
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `identifier`, reporting failures in the returned result.
    ///
    /// An empty identifier means nothing was requested and yields the empty
    /// result.
    pub fn resolve(&self, identifier: &str) -> ResolutionResult {
        if identifier.is_empty() {
            return ResolutionResult::make_empty();
        }
        if let Err(error) = identifier::validate(identifier, &self.config.namespace_prefix()) {
            return ResolutionResult::failed(identifier, error);
        }

        let mut tried = Vec::with_capacity(self.config.strategies.len());
        for strategy in &self.config.strategies {
            let attempt = match strategy {
                RootStrategy::EnvironmentOverride => self
                    .environment_root()
                    .map(|root| self.check_and_make_result(&root, identifier)),
                RootStrategy::RuntimeArchive => self.resolve_from_archive(identifier),
                RootStrategy::InstalledTree => self
                    .install_root()
                    .map(|root| self.check_and_make_result(&root, identifier)),
            };
            match attempt {
                Ok(result) => return result,
                Err(reason) => tried.push(reason),
            }
        }

        ResolutionResult::failed(
            identifier,
            ResolveError::NoRootFound {
                identifier: identifier.to_string(),
                tried,
            },
        )
    }

    /// Resolve `identifier` or return the error describing why it failed.
    pub fn resolve_or_fail(&self, identifier: &str) -> Result<PathBuf, ResolveError> {
        self.resolve(identifier).absolute_path_or_fail()
    }

    /// Root named by the override variable, if it is set to a directory.
    ///
    /// `Err` carries a short description of why the strategy was skipped.
    fn environment_root(&self) -> Result<RootCandidate, String> {
        let name = &self.config.root_env_var;
        let Some(value) = self.environment.var_os(name) else {
            return Err(format!("{name} is unset"));
        };
        let root = PathBuf::from(value);
        if !root.as_os_str().is_empty() && self.filesystem.is_dir(&root) {
            return Ok(RootCandidate::new(
                root,
                format!("{name} environment variable"),
            ));
        }
        tracing::debug!(
            "Resource lookup ignoring {}='{}' because it does not exist",
            name,
            root.display()
        );
        Err(format!("{name}='{}' is not a directory", root.display()))
    }

    /// Ask the runtime archive, then the legacy fallbacks, for `identifier`.
    fn resolve_from_archive(&self, identifier: &str) -> Result<ResolutionResult, String> {
        if !self.archive.has_archive() {
            return Err("no runtime archive is available".to_string());
        }

        let message = match self.archive.resolve(identifier) {
            Ok(path) => return Ok(ResolutionResult::found(identifier, path)),
            Err(message) => message,
        };

        if let Some(result) = self.archive_directory_fallback(identifier) {
            return Ok(result);
        }
        if let Some(path) = self.attic_fallback(identifier) {
            return Ok(ResolutionResult::found(identifier, path));
        }

        let message = if message.is_empty() {
            format!("The runtime archive could not resolve '{identifier}'")
        } else {
            message
        };
        Ok(ResolutionResult::failed(
            identifier,
            ResolveError::ArchiveLookup {
                identifier: identifier.to_string(),
                message,
            },
        ))
    }
}

fn default_archive(environment: &dyn Environment) -> Arc<dyn RuntimeArchive> {
    match RunfilesArchive::from_env(environment) {
        Some(archive) => Arc::new(archive),
        None => Arc::new(NoArchive),
    }
}

/// Builder for [`Resolver`].
#[derive(Default)]
pub struct ResolverBuilder {
    config: Option<ResolverConfig>,
    environment: Option<Arc<dyn Environment>>,
    filesystem: Option<Arc<dyn Filesystem>>,
    archive: Option<Arc<dyn RuntimeArchive>>,
    libraries: Option<Arc<dyn LibraryLocator>>,
    warnings: Option<Arc<WarningRegistry>>,
}

impl ResolverBuilder {
    #[must_use]
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Some(Arc::new(environment));
        self
    }

    #[must_use]
    pub fn filesystem(mut self, filesystem: impl Filesystem + 'static) -> Self {
        self.filesystem = Some(Arc::new(filesystem));
        self
    }

    /// Use this archive instead of discovering runfiles from the environment.
    #[must_use]
    pub fn archive(mut self, archive: impl RuntimeArchive + 'static) -> Self {
        self.archive = Some(Arc::new(archive));
        self
    }

    #[must_use]
    pub fn library_locator(mut self, libraries: impl LibraryLocator + 'static) -> Self {
        self.libraries = Some(Arc::new(libraries));
        self
    }

    /// Use a dedicated warning registry instead of the process-wide one.
    #[must_use]
    pub fn warnings(mut self, warnings: Arc<WarningRegistry>) -> Self {
        self.warnings = Some(warnings);
        self
    }

    /// Validate the configuration and assemble the resolver.
    pub fn build(self) -> Result<Resolver, ConfigError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let environment = self
            .environment
            .unwrap_or_else(|| Arc::new(ProcessEnvironment));
        let archive = self
            .archive
            .unwrap_or_else(|| default_archive(environment.as_ref()));

        Ok(Resolver {
            config,
            archive,
            environment,
            filesystem: self.filesystem.unwrap_or_else(|| Arc::new(StdFilesystem)),
            libraries: self
                .libraries
                .unwrap_or_else(|| Arc::new(LoadedLibraryLocator)),
            warnings: self.warnings.unwrap_or_else(WarningRegistry::global),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::ffi::OsString;
    use std::path::Path;

    use super::*;
    use crate::config::DirectoryPolicy;
    use crate::ports::{MARKER_CHECK_VALUE, MockLibraryLocator, MockRuntimeArchive};

    const SENTINEL: &str = "pkg/.pkg-find_resource-sentinel";

    #[derive(Default)]
    struct FakeEnv(HashMap<String, OsString>);

    impl FakeEnv {
        fn with(mut self, name: &str, value: impl Into<OsString>) -> Self {
            self.0.insert(name.to_string(), value.into());
            self
        }
    }

    impl Environment for FakeEnv {
        fn var_os(&self, name: &str) -> Option<OsString> {
            self.0.get(name).cloned()
        }
    }

    #[derive(Default)]
    struct FakeFs {
        dirs: HashSet<PathBuf>,
        files: HashSet<PathBuf>,
    }

    impl FakeFs {
        fn dir(mut self, path: impl AsRef<Path>) -> Self {
            self.dirs.insert(path.as_ref().to_path_buf());
            self
        }

        fn file(mut self, path: impl AsRef<Path>) -> Self {
            self.files.insert(path.as_ref().to_path_buf());
            self
        }

        /// A genuine root at `root`, holding the sentinel and `files`.
        fn root(self, root: impl AsRef<Path>, files: &[&str]) -> Self {
            let root = root.as_ref();
            let mut fs = self.dir(root).file(root.join(SENTINEL));
            for file in files {
                fs = fs.file(root.join(file));
            }
            fs
        }
    }

    impl Filesystem for FakeFs {
        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.contains(path)
        }
    }

    /// Archive rooted at `root` that knows exactly `entries`.
    struct FakeArchive {
        root: PathBuf,
        entries: HashSet<String>,
    }

    impl FakeArchive {
        fn new(root: &str, entries: &[&str]) -> Self {
            Self {
                root: PathBuf::from(root),
                entries: entries.iter().map(ToString::to_string).collect(),
            }
        }
    }

    impl RuntimeArchive for FakeArchive {
        fn has_archive(&self) -> bool {
            true
        }

        fn resolve(&self, identifier: &str) -> Result<PathBuf, String> {
            if self.entries.contains(identifier) {
                Ok(self.root.join(identifier))
            } else {
                Err(format!("'{identifier}' is not in the archive"))
            }
        }
    }

    struct FakeLibraries(Option<PathBuf>);

    impl LibraryLocator for FakeLibraries {
        fn marker_check(&self) -> u32 {
            MARKER_CHECK_VALUE
        }

        fn locate(&self, name: &str) -> Option<PathBuf> {
            assert_eq!(name, "libpkg_marker.so");
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Setup {
        config: ResolverConfig,
        env: FakeEnv,
        fs: FakeFs,
        archive: Option<Box<dyn RuntimeArchive>>,
        library_dir: Option<&'static str>,
    }

    struct BoxedArchive(Box<dyn RuntimeArchive>);

    impl RuntimeArchive for BoxedArchive {
        fn has_archive(&self) -> bool {
            self.0.has_archive()
        }

        fn resolve(&self, identifier: &str) -> Result<PathBuf, String> {
            self.0.resolve(identifier)
        }
    }

    impl Setup {
        fn build(self) -> (Resolver, Arc<WarningRegistry>) {
            let warnings = Arc::new(WarningRegistry::new());
            let archive = self
                .archive
                .unwrap_or_else(|| Box::new(NoArchive) as Box<dyn RuntimeArchive>);
            let resolver = Resolver::builder()
                .config(self.config)
                .environment(self.env)
                .filesystem(self.fs)
                .archive(BoxedArchive(archive))
                .library_locator(FakeLibraries(self.library_dir.map(PathBuf::from)))
                .warnings(Arc::clone(&warnings))
                .build()
                .expect("valid config");
            (resolver, warnings)
        }
    }

    fn assert_invariants(result: &ResolutionResult) {
        if result.is_empty() {
            assert!(result.absolute_path().is_none() && result.error().is_none());
        } else {
            assert!(result.absolute_path().is_some() != result.error().is_some());
        }
    }

    fn kind(result: &ResolutionResult) -> Option<&'static str> {
        result.error().map(ResolveError::kind)
    }

    #[test]
    fn test_install_marker_root_resolves_file() {
        let share = "/opt/pkg/lib/../share";
        let (resolver, _) = Setup {
            fs: FakeFs::default().root(share, &["pkg/readme.txt"]),
            library_dir: Some("/opt/pkg/lib"),
            ..Setup::default()
        }
        .build();

        let result = resolver.resolve("pkg/readme.txt");
        assert_eq!(
            result.absolute_path(),
            Some(Path::new("/opt/pkg/lib/../share/pkg/readme.txt"))
        );
        assert_eq!(
            resolver.resolve_or_fail("pkg/readme.txt").unwrap(),
            result.absolute_path().unwrap()
        );
    }

    #[test]
    fn test_wrong_prefix_is_invalid_regardless_of_environment() {
        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default().root("/env", &["not/pkg/x"]),
            ..Setup::default()
        }
        .build();

        let result = resolver.resolve("not/pkg/x");
        assert_eq!(kind(&result), Some("invalid_identifier"));
        assert!(result.error_message().unwrap().contains("does not start with pkg/"));
    }

    #[test]
    fn test_absolute_identifier_is_invalid() {
        let (resolver, _) = Setup::default().build();
        let result = resolver.resolve("/pkg/readme.txt");
        assert_eq!(kind(&result), Some("invalid_identifier"));
        assert!(result.error_message().unwrap().contains("is not a relative path"));
    }

    #[test]
    fn test_empty_identifier_is_empty_result() {
        let (resolver, _) = Setup::default().build();
        let result = resolver.resolve("");
        assert!(result.is_empty());
        assert_eq!(
            resolver.resolve_or_fail(""),
            Err(ResolveError::EmptyResult)
        );
    }

    #[test]
    fn test_missing_resource_names_exact_path() {
        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default().root("/env", &[]),
            ..Setup::default()
        }
        .build();

        let result = resolver.resolve("pkg/missing.txt");
        assert_eq!(
            result.error(),
            Some(&ResolveError::ResourceMissing {
                identifier: "pkg/missing.txt".to_string(),
                root_source: "PKG_RESOURCE_ROOT environment variable".to_string(),
                root: PathBuf::from("/env"),
                path: PathBuf::from("/env/pkg/missing.txt"),
            })
        );
        assert!(result
            .error_message()
            .unwrap()
            .contains("'/env/pkg/missing.txt'"));
    }

    #[test]
    fn test_environment_override_beats_working_archive() {
        let mut archive = MockRuntimeArchive::new();
        archive.expect_has_archive().never();
        archive.expect_resolve().never();

        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default().root("/env", &["pkg/a.txt"]),
            archive: Some(Box::new(archive)),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            resolver.resolve_or_fail("pkg/a.txt").unwrap(),
            PathBuf::from("/env/pkg/a.txt")
        );
    }

    #[test]
    fn test_first_existing_root_wins_even_without_the_file() {
        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default()
                .root("/env", &[])
                .root("/opt/lib/../share", &["pkg/a.txt"]),
            library_dir: Some("/opt/lib"),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            kind(&resolver.resolve("pkg/a.txt")),
            Some("resource_missing")
        );
    }

    #[test]
    fn test_environment_not_a_directory_falls_through() {
        let mut archive = MockRuntimeArchive::new();
        archive.expect_has_archive().return_const(true);
        archive
            .expect_resolve()
            .times(1)
            .returning(|identifier| Ok(Path::new("/runfiles").join(identifier)));

        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/nope"),
            archive: Some(Box::new(archive)),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            resolver.resolve_or_fail("pkg/a.txt").unwrap(),
            PathBuf::from("/runfiles/pkg/a.txt")
        );
    }

    #[test]
    fn test_missing_sentinel_fails_even_when_file_present() {
        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default().dir("/env").file("/env/pkg/a.txt"),
            ..Setup::default()
        }
        .build();

        let result = resolver.resolve("pkg/a.txt");
        assert_eq!(kind(&result), Some("sentinel_missing"));
        let message = result.error_message().unwrap();
        assert!(message.contains("PKG_RESOURCE_ROOT environment variable"));
        assert!(message.contains("'/env'"));
        assert!(message.contains(SENTINEL));
    }

    #[test]
    fn test_directory_resource_warns_once() {
        let (resolver, warnings) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default().root("/env", &[]).dir("/env/pkg/models"),
            ..Setup::default()
        }
        .build();

        for _ in 0..3 {
            let result = resolver.resolve("pkg/models");
            assert_eq!(result.absolute_path(), Some(Path::new("/env/pkg/models")));
        }
        assert_eq!(warnings.emitted_count(), 1);
        assert!(warnings.has_emitted(&legacy::deprecated_directory_message("pkg/models")));
    }

    #[test]
    fn test_directory_resource_rejected_by_policy() {
        let config = ResolverConfig {
            directory_policy: DirectoryPolicy::Reject,
            ..ResolverConfig::default()
        };
        let (resolver, warnings) = Setup {
            config,
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default().root("/env", &[]).dir("/env/pkg/models"),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            kind(&resolver.resolve("pkg/models")),
            Some("directory_resource")
        );
        assert_eq!(warnings.emitted_count(), 0);
    }

    #[test]
    fn test_archive_success_skips_sentinel() {
        let (resolver, _) = Setup {
            archive: Some(Box::new(FakeArchive::new("/rf", &["pkg/a.txt"]))),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            resolver.resolve_or_fail("pkg/a.txt").unwrap(),
            PathBuf::from("/rf/pkg/a.txt")
        );
    }

    #[test]
    fn test_archive_directory_fallback() {
        let (resolver, warnings) = Setup {
            fs: FakeFs::default().dir("/rf/pkg/models"),
            archive: Some(Box::new(FakeArchive::new("/rf", &[SENTINEL]))),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            resolver.resolve_or_fail("pkg/models").unwrap(),
            PathBuf::from("/rf/pkg/models")
        );
        assert_eq!(warnings.emitted_count(), 1);
    }

    #[test]
    fn test_archive_attic_fallback() {
        let (resolver, _) = Setup {
            archive: Some(Box::new(FakeArchive::new(
                "/rf",
                &["pkg/attic/multibody/test/robot.urdf"],
            ))),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            resolver.resolve_or_fail("pkg/multibody/test/robot.urdf").unwrap(),
            PathBuf::from("/rf/pkg/attic/multibody/test/robot.urdf")
        );
    }

    #[test]
    fn test_attic_only_applies_to_legacy_prefixes() {
        let (resolver, _) = Setup {
            archive: Some(Box::new(FakeArchive::new(
                "/rf",
                &["pkg/attic/common/robot.urdf"],
            ))),
            ..Setup::default()
        }
        .build();

        let result = resolver.resolve("pkg/common/robot.urdf");
        assert_eq!(
            result.error(),
            Some(&ResolveError::ArchiveLookup {
                identifier: "pkg/common/robot.urdf".to_string(),
                message: "'pkg/common/robot.urdf' is not in the archive".to_string(),
            })
        );
    }

    #[test]
    fn test_archive_error_is_verbatim_after_failed_fallbacks() {
        let (resolver, _) = Setup {
            archive: Some(Box::new(FakeArchive::new("/rf", &[SENTINEL]))),
            ..Setup::default()
        }
        .build();

        let result = resolver.resolve("pkg/multibody/test/gone.urdf");
        assert_eq!(
            result.error_message().as_deref(),
            Some("'pkg/multibody/test/gone.urdf' is not in the archive")
        );
    }

    #[test]
    fn test_no_root_found_lists_every_attempt() {
        let (resolver, _) = Setup::default().build();

        let result = resolver.resolve("pkg/a.txt");
        let Some(ResolveError::NoRootFound { tried, .. }) = result.error() else {
            panic!("expected NoRootFound, got {result:?}");
        };
        assert_eq!(
            tried,
            &vec![
                "PKG_RESOURCE_ROOT is unset".to_string(),
                "no runtime archive is available".to_string(),
                "there is no install marker (libpkg_marker.so is not loaded)".to_string(),
            ]
        );
    }

    #[test]
    fn test_install_candidate_must_exist() {
        let (resolver, _) = Setup {
            library_dir: Some("/opt/lib"),
            ..Setup::default()
        }
        .build();

        let message = resolver.resolve("pkg/a.txt").error_message().unwrap();
        assert!(message.contains("install candidate '/opt/lib/../share' does not exist"));
    }

    #[test]
    fn test_strategy_order_is_configuration() {
        let cases = [
            (
                vec![RootStrategy::EnvironmentOverride, RootStrategy::InstalledTree],
                "/env/pkg/a.txt",
            ),
            (
                vec![RootStrategy::InstalledTree, RootStrategy::EnvironmentOverride],
                "/opt/lib/../share/pkg/a.txt",
            ),
            (
                vec![RootStrategy::RuntimeArchive, RootStrategy::EnvironmentOverride],
                "/rf/pkg/a.txt",
            ),
        ];

        for (strategies, expected) in cases {
            let config = ResolverConfig {
                strategies: strategies.clone(),
                ..ResolverConfig::default()
            };
            let (resolver, _) = Setup {
                config,
                env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
                fs: FakeFs::default()
                    .root("/env", &["pkg/a.txt"])
                    .root("/opt/lib/../share", &["pkg/a.txt"]),
                archive: Some(Box::new(FakeArchive::new("/rf", &["pkg/a.txt"]))),
                library_dir: Some("/opt/lib"),
            }
            .build();

            assert_eq!(
                resolver.resolve_or_fail("pkg/a.txt").unwrap(),
                PathBuf::from(expected),
                "{strategies:?}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "liveness check")]
    fn test_marker_check_mismatch_is_fatal() {
        let mut libraries = MockLibraryLocator::new();
        libraries.expect_marker_check().return_const(7_u32);
        libraries.expect_locate().never();

        let resolver = Resolver::builder()
            .environment(FakeEnv::default())
            .filesystem(FakeFs::default())
            .archive(NoArchive)
            .library_locator(libraries)
            .warnings(Arc::new(WarningRegistry::new()))
            .build()
            .unwrap();
        let _ = resolver.resolve("pkg/a.txt");
    }

    #[test]
    fn test_custom_namespace() {
        let config = ResolverConfig {
            namespace: "acme".to_string(),
            root_env_var: "ACME_RESOURCE_ROOT".to_string(),
            sentinel_relpath: "acme/.sentinel".to_string(),
            ..ResolverConfig::default()
        };
        let (resolver, _) = Setup {
            config,
            env: FakeEnv::default().with("ACME_RESOURCE_ROOT", "/acme"),
            fs: FakeFs::default()
                .dir("/acme")
                .file("/acme/acme/.sentinel")
                .file("/acme/acme/data.bin"),
            ..Setup::default()
        }
        .build();

        assert!(resolver.resolve("acme/data.bin").is_success());
        assert_eq!(
            kind(&resolver.resolve("pkg/data.bin")),
            Some("invalid_identifier")
        );
    }

    #[test]
    fn test_every_result_satisfies_invariants() {
        let identifiers = [
            "",
            "/abs",
            "pkg",
            "pkg/",
            "pkg/a.txt",
            "pkg/models",
            "pkg/missing.txt",
            "pkg/multibody/test/x.urdf",
            "other/a.txt",
        ];
        let setups: [fn() -> Setup; 4] = [
            Setup::default,
            || Setup {
                env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
                fs: FakeFs::default().root("/env", &["pkg/a.txt"]).dir("/env/pkg/models"),
                ..Setup::default()
            },
            || Setup {
                env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
                fs: FakeFs::default().dir("/env"),
                ..Setup::default()
            },
            || Setup {
                archive: Some(Box::new(FakeArchive::new("/rf", &[SENTINEL, "pkg/a.txt"]))),
                ..Setup::default()
            },
        ];

        for setup in setups {
            let (resolver, _) = setup().build();
            for identifier in identifiers {
                let result = resolver.resolve(identifier);
                assert_invariants(&result);
                assert_eq!(result.requested_path(), identifier);
                assert_eq!(
                    resolver.resolve_or_fail(identifier).ok().as_deref(),
                    result.absolute_path()
                );
            }
        }
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = ResolverConfig {
            strategies: Vec::new(),
            ..ResolverConfig::default()
        };
        let err = Resolver::builder().config(config).build().unwrap_err();
        assert_eq!(err, ConfigError::EmptyField("strategies"));
    }

    #[test]
    fn test_probe_roots_marks_first_available_strategy() {
        let (resolver, _) = Setup {
            fs: FakeFs::default().root("/opt/lib/../share", &[]),
            archive: Some(Box::new(FakeArchive::new("/rf", &[SENTINEL]))),
            library_dir: Some("/opt/lib"),
            ..Setup::default()
        }
        .build();

        let probes = resolver.probe_roots();
        let statuses: Vec<_> = probes
            .0
            .iter()
            .map(|probe| (probe.strategy, probe.status, probe.selected))
            .collect();
        assert_eq!(
            statuses,
            vec![
                (RootStrategy::EnvironmentOverride, ProbeStatus::Unavailable, false),
                (RootStrategy::RuntimeArchive, ProbeStatus::Usable, true),
                (RootStrategy::InstalledTree, ProbeStatus::Usable, false),
            ]
        );
        assert_eq!(
            probes.selected().and_then(|probe| probe.root.as_deref()),
            Some(Path::new("/rf"))
        );

        let output = probes.to_string();
        assert!(output.contains("* runtime_archive = /rf [usable]"));
        assert!(output.contains("environment_override = - [unavailable] PKG_RESOURCE_ROOT is unset"));
    }

    #[test]
    fn test_probe_reports_missing_sentinel() {
        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", "/env"),
            fs: FakeFs::default().dir("/env"),
            ..Setup::default()
        }
        .build();

        let probes = resolver.probe_roots();
        let selected = probes.selected().unwrap();
        assert_eq!(selected.strategy, RootStrategy::EnvironmentOverride);
        assert_eq!(selected.status, ProbeStatus::MissingSentinel);
    }

    #[test]
    fn test_archive_sentinel_outside_its_relpath_is_not_usable() {
        let mut archive = MockRuntimeArchive::new();
        archive.expect_has_archive().return_const(true);
        archive
            .expect_resolve()
            .returning(|_| Ok(PathBuf::from("/rf/elsewhere/sentinel")));

        let (resolver, _) = Setup {
            archive: Some(Box::new(archive)),
            ..Setup::default()
        }
        .build();

        let probes = resolver.probe_roots();
        let archive_probe = &probes.0[1];
        assert_eq!(archive_probe.strategy, RootStrategy::RuntimeArchive);
        assert_eq!(archive_probe.status, ProbeStatus::MissingSentinel);
        assert_eq!(archive_probe.root, None);
        assert!(archive_probe.detail.contains("does not end with"), "{}", archive_probe.detail);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_environment_root_is_honored() {
        use std::os::unix::ffi::OsStringExt;

        let root = PathBuf::from(OsString::from_vec(b"/data/root\xFF".to_vec()));
        let (resolver, _) = Setup {
            env: FakeEnv::default().with("PKG_RESOURCE_ROOT", root.clone()),
            fs: FakeFs::default().root(&root, &["pkg/a.txt"]),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            resolver.resolve_or_fail("pkg/a.txt").unwrap(),
            root.join("pkg/a.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_archive_root_keeps_directory_fallback_exact() {
        use std::os::unix::ffi::OsStringExt;

        let root = PathBuf::from(OsString::from_vec(b"/rf\xFE".to_vec()));
        let archive_root = root.clone();
        let mut archive = MockRuntimeArchive::new();
        archive.expect_has_archive().return_const(true);
        archive.expect_resolve().returning(move |identifier| {
            if identifier == SENTINEL {
                Ok(archive_root.join(identifier))
            } else {
                Err(format!("'{identifier}' is not in the archive"))
            }
        });

        let (resolver, _) = Setup {
            fs: FakeFs::default().dir(root.join("pkg/models")),
            archive: Some(Box::new(archive)),
            ..Setup::default()
        }
        .build();

        assert_eq!(
            resolver.resolve_or_fail("pkg/models").unwrap(),
            root.join("pkg/models")
        );
        assert_eq!(resolver.probe_roots().0[1].root.as_deref(), Some(root.as_path()));
    }
}
