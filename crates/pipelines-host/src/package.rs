// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::process::Command;

use tracing::debug;

use crate::error::PackageError;

/// Interface to the host's package manager.
///
/// Repository setup and package manager behavior are not reimplemented here;
/// the convergence engine only asks that a package end up installed.
pub trait PackageManager {
    fn ensure_installed(&self, package: &str) -> Result<(), PackageError>;
}

/// No-op manager for hosts where the agent package is already present
/// (baked into an image, or managed out of band).
#[derive(Debug, Clone, Copy, Default)]
pub struct PreinstalledPackage;

impl PackageManager for PreinstalledPackage {
    fn ensure_installed(&self, package: &str) -> Result<(), PackageError> {
        debug!("assuming package '{}' is preinstalled", package);
        Ok(())
    }
}

/// Installs through an arbitrary host command, e.g. `apt-get install -y` or
/// `dnf install -y`. The package name is appended as the final argument.
#[derive(Debug, Clone)]
pub struct CommandPackageManager {
    program: String,
    args: Vec<String>,
}

impl CommandPackageManager {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl PackageManager for CommandPackageManager {
    fn ensure_installed(&self, package: &str) -> Result<(), PackageError> {
        debug!("installing package '{}' via {}", package, self.program);
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(package)
            .status()
            .map_err(|source| PackageError::Spawn {
                program: self.program.clone(),
                package: package.to_string(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(PackageError::CommandFailed {
                package: package.to_string(),
                status,
            })
        }
    }
}
