// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use pipelines_config::RenderError;

/// Failure writing one file under the configuration tree.
#[derive(Debug, thiserror::Error)]
#[error("Failed to write '{path}': {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Failure invoking the host's process supervisor.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to invoke systemctl {action} for '{unit}': {source}")]
    Spawn {
        unit: String,
        action: String,
        source: io::Error,
    },

    #[error("systemctl {action} for '{unit}' exited with {status}")]
    CommandFailed {
        unit: String,
        action: String,
        status: ExitStatus,
    },
}

/// Failure invoking the host's package manager.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Failed to invoke '{program}' for package '{package}': {source}")]
    Spawn {
        program: String,
        package: String,
        source: io::Error,
    },

    #[error("Install of package '{package}' exited with {status}")]
    CommandFailed { package: String, status: ExitStatus },
}

/// Failure loading the desired-state manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] pipelines_config::ConfigError),
}

/// Any failure during a convergence run. The run aborts at the first error;
/// nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum ConvergenceError {
    #[error(transparent)]
    Package(#[from] PackageError),

    #[error("Failed to scaffold '{path}': {source}")]
    Scaffold {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("Failed to reconcile '{path}': {source}")]
    Purge {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}
