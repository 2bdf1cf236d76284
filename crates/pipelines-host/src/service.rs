// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::process::Command;

use tracing::debug;

use crate::error::ServiceError;

/// Interface to the host's process supervisor.
///
/// The convergence engine only ever invokes the supervisor; supervision
/// semantics (unit files, dependency ordering, watchdogs) stay with the
/// supervisor itself. Tests substitute a recording implementation.
pub trait ServiceSupervisor {
    /// Enables the service so it starts on boot.
    fn enable(&self) -> Result<(), ServiceError>;

    /// Starts the service if it is not running.
    fn start(&self) -> Result<(), ServiceError>;

    /// Restarts the service. Invoked when configured artifacts changed.
    fn restart(&self) -> Result<(), ServiceError>;

    /// Whether the service is currently active.
    fn is_running(&self) -> Result<bool, ServiceError>;
}

/// Thin `systemctl` wrapper for systemd hosts.
#[derive(Debug, Clone)]
pub struct SystemdSupervisor {
    unit: String,
}

impl SystemdSupervisor {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn systemctl(&self, action: &str) -> Result<(), ServiceError> {
        debug!("systemctl {} {}", action, self.unit);
        let status = Command::new("systemctl")
            .arg(action)
            .arg(&self.unit)
            .status()
            .map_err(|source| ServiceError::Spawn {
                unit: self.unit.clone(),
                action: action.to_string(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(ServiceError::CommandFailed {
                unit: self.unit.clone(),
                action: action.to_string(),
                status,
            })
        }
    }
}

impl ServiceSupervisor for SystemdSupervisor {
    fn enable(&self) -> Result<(), ServiceError> {
        self.systemctl("enable")
    }

    fn start(&self) -> Result<(), ServiceError> {
        self.systemctl("start")
    }

    fn restart(&self) -> Result<(), ServiceError> {
        self.systemctl("restart")
    }

    fn is_running(&self) -> Result<bool, ServiceError> {
        // is-active exits nonzero for inactive units; that is an answer, not
        // a failure.
        let status = Command::new("systemctl")
            .arg("is-active")
            .arg("--quiet")
            .arg(&self.unit)
            .status()
            .map_err(|source| ServiceError::Spawn {
                unit: self.unit.clone(),
                action: "is-active".to_string(),
                source,
            })?;
        Ok(status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_name_is_kept_verbatim() {
        let supervisor = SystemdSupervisor::new("pipelines-agent.service");
        assert_eq!(supervisor.unit(), "pipelines-agent.service");
    }
}
