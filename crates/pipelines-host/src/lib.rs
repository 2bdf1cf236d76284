// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Convergence engine for the telemetry pipelines agent.
//!
//! A convergence run drives a host through three phases, in order:
//!
//! 1. **Installed** — the agent package is present;
//! 2. **Configured** — the configuration tree is scaffolded, the global
//!    options document and every declared object are rendered to disk, and
//!    (optionally) files no current declaration owns are purged;
//! 3. **Running** — the service is enabled and active, restarted when any
//!    configured artifact changed.
//!
//! The run is single-threaded and run-to-completion: any step's failure
//! aborts the whole pass, and retrying belongs to whatever scheduler invokes
//! it. External processes (the package manager, the process supervisor) are
//! reached only through the [`package::PackageManager`] and
//! [`service::ServiceSupervisor`] traits.

pub mod convergence;
pub mod error;
pub mod manifest;
pub mod package;
pub mod service;
pub mod writer;

pub use convergence::{Convergence, ConvergencePhase, ConvergenceReport, ConvergenceSettings};
pub use error::{ConvergenceError, ManifestError, PackageError, ServiceError, WriteError};
pub use manifest::Manifest;
pub use package::{CommandPackageManager, PackageManager, PreinstalledPackage};
pub use service::{ServiceSupervisor, SystemdSupervisor};
pub use writer::write_if_changed;
