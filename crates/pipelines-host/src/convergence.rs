// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use pipelines_config::{render, render_global, ConfigTree, Format, ObjectSet};

use crate::error::ConvergenceError;
use crate::package::PackageManager;
use crate::service::ServiceSupervisor;
use crate::writer::write_if_changed;

/// Phase a convergence run has reached. The chain is linear: Configured is
/// only entered once Installed holds, and Running only once every current
/// declaration is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergencePhase {
    /// Agent package present on the host.
    Installed,
    /// Configuration tree scaffolded, global options and every declared
    /// object rendered, stale files purged when requested.
    Configured,
    /// Service enabled and active.
    Running,
}

/// Settings for one convergence run.
#[derive(Debug, Clone)]
pub struct ConvergenceSettings {
    /// Root of the agent's configuration tree, e.g. `/etc/pipelines-agent`.
    pub etc_root: PathBuf,
    /// Agent package to install before configuring. `None` skips the install
    /// phase entirely.
    pub package: Option<String>,
    /// Remove files in the kind directories that no current declaration
    /// owns. Removals count as configuration changes.
    pub purge: bool,
    /// Format of the global options document.
    pub global_format: Format,
    /// Global (topology-independent) agent options.
    pub global_options: Map<String, Value>,
}

impl ConvergenceSettings {
    pub fn new(etc_root: impl Into<PathBuf>) -> Self {
        Self {
            etc_root: etc_root.into(),
            package: None,
            purge: false,
            global_format: Format::default(),
            global_options: Map::new(),
        }
    }
}

/// Outcome of a completed convergence run.
#[derive(Debug)]
pub struct ConvergenceReport {
    pub phase: ConvergencePhase,
    /// Paths whose content was created or rewritten this run.
    pub written: Vec<PathBuf>,
    /// Paths purged because no current declaration owns them.
    pub removed: Vec<PathBuf>,
    /// Whether the service was restarted because artifacts changed.
    pub restarted: bool,
}

impl ConvergenceReport {
    /// Whether any configured artifact changed this run.
    pub fn changed(&self) -> bool {
        !self.written.is_empty() || !self.removed.is_empty()
    }
}

/// Drives a host through install, configure, and service phases against one
/// desired-state object set.
pub struct Convergence<P, S> {
    settings: ConvergenceSettings,
    tree: ConfigTree,
    packages: P,
    supervisor: S,
}

impl<P: PackageManager, S: ServiceSupervisor> Convergence<P, S> {
    pub fn new(settings: ConvergenceSettings, packages: P, supervisor: S) -> Self {
        let tree = ConfigTree::new(settings.etc_root.clone());
        Self {
            settings,
            tree,
            packages,
            supervisor,
        }
    }

    /// Runs one full convergence pass. Fails wholesale on the first error;
    /// the caller's scheduler decides when to try again.
    pub fn run(&self, objects: &ObjectSet) -> Result<ConvergenceReport, ConvergenceError> {
        self.install()?;
        debug!("convergence phase: installed");

        let (written, removed) = self.configure(objects)?;
        debug!(
            "convergence phase: configured ({} written, {} removed)",
            written.len(),
            removed.len()
        );

        let changed = !written.is_empty() || !removed.is_empty();
        let restarted = self.ensure_running(changed)?;
        info!(
            "convergence complete: {} object(s), changed={}, restarted={}",
            objects.len(),
            changed,
            restarted
        );

        Ok(ConvergenceReport {
            phase: ConvergencePhase::Running,
            written,
            removed,
            restarted,
        })
    }

    fn install(&self) -> Result<(), ConvergenceError> {
        if let Some(package) = &self.settings.package {
            self.packages.ensure_installed(package)?;
        }
        Ok(())
    }

    fn configure(
        &self,
        objects: &ObjectSet,
    ) -> Result<(Vec<PathBuf>, Vec<PathBuf>), ConvergenceError> {
        // Scaffolding runs before any declaration writes; ordering, not
        // locking, is what keeps the kind directories conflict-free.
        for dir in self.tree.object_dirs() {
            fs::create_dir_all(&dir).map_err(|source| ConvergenceError::Scaffold {
                path: dir.clone(),
                source,
            })?;
        }

        let mut written = Vec::new();

        let global = render_global(
            &self.settings.global_options,
            self.settings.global_format,
            &self.tree,
        )?;
        if write_if_changed(&global.path, &global.content)? {
            written.push(global.path);
        }

        // Each object owns a disjoint path, so render order is immaterial —
        // except for duplicates, where the filesystem makes the last
        // declaration win.
        let mut owned: HashSet<PathBuf> = HashSet::new();
        for object in objects.iter() {
            let rendered = render(object, &self.tree)?;
            if !owned.insert(rendered.path.clone()) {
                warn!(
                    "duplicate {} '{}': earlier declaration at {} is overwritten",
                    object.kind,
                    object.name,
                    rendered.path.display()
                );
            }
            if write_if_changed(&rendered.path, &rendered.content)? {
                written.push(rendered.path);
            }
        }

        let removed = if self.settings.purge {
            self.purge_unowned(&owned)?
        } else {
            Vec::new()
        };

        Ok((written, removed))
    }

    fn purge_unowned(&self, owned: &HashSet<PathBuf>) -> Result<Vec<PathBuf>, ConvergenceError> {
        let mut removed = Vec::new();
        for dir in self.tree.object_dirs() {
            let entries = fs::read_dir(&dir).map_err(|source| ConvergenceError::Purge {
                path: dir.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| ConvergenceError::Purge {
                    path: dir.clone(),
                    source,
                })?;
                let path = entry.path();
                if path.is_file() && !owned.contains(&path) {
                    fs::remove_file(&path).map_err(|source| ConvergenceError::Purge {
                        path: path.clone(),
                        source,
                    })?;
                    debug!("purged: {}", path.display());
                    removed.push(path);
                }
            }
        }
        Ok(removed)
    }

    fn ensure_running(&self, changed: bool) -> Result<bool, ConvergenceError> {
        self.supervisor.enable()?;
        if changed {
            debug!("configuration changed; restarting service");
            self.supervisor.restart()?;
            return Ok(true);
        }
        if !self.supervisor.is_running()? {
            self.supervisor.start()?;
        }
        Ok(false)
    }
}
