//! Root discovery diagnostics.
//!
//! Reports what every configured strategy would contribute, without
//! resolving any particular identifier. This is the "which root am I
//! actually using" view behind `pkgres roots`.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::Resolver;
use crate::config::RootStrategy;

/// Outcome of probing one root strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// A root exists and carries the sentinel.
    Usable,
    /// A root exists, or an archive is present, but the sentinel could not be
    /// found; lookups through it will fail.
    MissingSentinel,
    /// The strategy has no root to offer.
    Unavailable,
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Usable => "usable",
            Self::MissingSentinel => "missing_sentinel",
            Self::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// What one strategy found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootProbe {
    pub strategy: RootStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    pub status: ProbeStatus,
    /// Whether resolution would stop at this strategy.
    pub selected: bool,
    pub detail: String,
}

/// Probes for every configured strategy, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RootProbes(pub Vec<RootProbe>);

impl RootProbes {
    /// The probe resolution would use, if any.
    pub fn selected(&self) -> Option<&RootProbe> {
        self.0.iter().find(|probe| probe.selected)
    }
}

impl fmt::Display for RootProbes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, probe) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let marker = if probe.selected { "*" } else { " " };
            let root = probe
                .root
                .as_ref()
                .map_or_else(|| "-".to_string(), |root| root.display().to_string());
            write!(
                f,
                "{marker} {} = {} [{}] {}",
                probe.strategy, root, probe.status, probe.detail
            )?;
        }
        Ok(())
    }
}

impl Resolver {
    /// Probe each configured strategy in order.
    pub fn probe_roots(&self) -> RootProbes {
        let mut selected_seen = false;
        let probes = self
            .config
            .strategies
            .iter()
            .map(|&strategy| {
                let mut probe = self.probe(strategy);
                if probe.status != ProbeStatus::Unavailable && !selected_seen {
                    probe.selected = true;
                    selected_seen = true;
                }
                probe
            })
            .collect();
        RootProbes(probes)
    }

    fn probe(&self, strategy: RootStrategy) -> RootProbe {
        let found = match strategy {
            RootStrategy::EnvironmentOverride => self.environment_root(),
            RootStrategy::InstalledTree => self.install_root(),
            RootStrategy::RuntimeArchive => return self.probe_archive(),
        };

        match found {
            Ok(candidate) => {
                let status = if self.has_sentinel(&candidate.root) {
                    ProbeStatus::Usable
                } else {
                    ProbeStatus::MissingSentinel
                };
                RootProbe {
                    strategy,
                    root: Some(candidate.root),
                    status,
                    selected: false,
                    detail: candidate.description,
                }
            }
            Err(reason) => RootProbe {
                strategy,
                root: None,
                status: ProbeStatus::Unavailable,
                selected: false,
                detail: reason,
            },
        }
    }

    /// An archive counts as usable only when its root can be recovered from
    /// the sentinel.
    fn probe_archive(&self) -> RootProbe {
        let strategy = RootStrategy::RuntimeArchive;
        if !self.archive.has_archive() {
            return RootProbe {
                strategy,
                root: None,
                status: ProbeStatus::Unavailable,
                selected: false,
                detail: "no runtime archive is available".to_string(),
            };
        }

        match self.archive_root() {
            Ok(root) => RootProbe {
                strategy,
                root: Some(root),
                status: ProbeStatus::Usable,
                selected: false,
                detail: "runtime archive".to_string(),
            },
            Err(reason) => RootProbe {
                strategy,
                root: None,
                status: ProbeStatus::MissingSentinel,
                selected: false,
                detail: reason,
            },
        }
    }
}
