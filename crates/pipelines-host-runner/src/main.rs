// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use pipelines_host::{CommandPackageManager, Convergence, ConvergenceSettings, Manifest, SystemdSupervisor};

const DEFAULT_ETC_ROOT: &str = "/etc/pipelines-agent";
const DEFAULT_SERVICE_UNIT: &str = "pipelines-agent";
const DEFAULT_INSTALL_COMMAND: &str = "apt-get install -y";

pub fn main() -> ExitCode {
    let log_level = env::var("PIPELINES_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(&log_level).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("unable to install the log subscriber: {e}");
        return ExitCode::FAILURE;
    }

    let manifest_path = match env::var("PIPELINES_MANIFEST") {
        Ok(path) => PathBuf::from(path),
        Err(_) => {
            error!("PIPELINES_MANIFEST must point at a desired-state manifest. Shutting down.");
            return ExitCode::FAILURE;
        }
    };
    let etc_root = env::var("PIPELINES_ETC_ROOT").unwrap_or_else(|_| DEFAULT_ETC_ROOT.to_string());
    let service_unit =
        env::var("PIPELINES_SERVICE_UNIT").unwrap_or_else(|_| DEFAULT_SERVICE_UNIT.to_string());
    let package = env::var("PIPELINES_PACKAGE").ok();
    let purge = env::var("PIPELINES_PURGE")
        .map(|val| val.to_lowercase() == "true")
        .unwrap_or(false);
    let install_command = env::var("PIPELINES_INSTALL_COMMAND")
        .unwrap_or_else(|_| DEFAULT_INSTALL_COMMAND.to_string());

    let manifest = match Manifest::from_path(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            error!("unable to load the manifest: {e}");
            return ExitCode::FAILURE;
        }
    };
    let (objects, global_format) = match manifest.objects().and_then(|objects| {
        let format = manifest.global_format()?;
        Ok((objects, format))
    }) {
        Ok(value) => value,
        Err(e) => {
            error!("invalid manifest: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = ConvergenceSettings::new(etc_root);
    settings.package = package;
    settings.purge = purge;
    settings.global_format = global_format;
    settings.global_options = manifest.global.options.clone();

    // The install command is only invoked when PIPELINES_PACKAGE is set.
    let mut install_words = install_command.split_whitespace().map(str::to_string);
    let program = match install_words.next() {
        Some(program) => program,
        None => {
            error!("PIPELINES_INSTALL_COMMAND must not be empty. Shutting down.");
            return ExitCode::FAILURE;
        }
    };
    let packages = CommandPackageManager::new(program, install_words.collect());
    let supervisor = SystemdSupervisor::new(service_unit);

    debug!(
        "converging {} declared object(s) under {}",
        objects.len(),
        settings.etc_root.display()
    );
    match Convergence::new(settings, packages, supervisor).run(&objects) {
        Ok(report) => {
            info!(
                "host converged: {} file(s) written, {} purged, restarted={}",
                report.written.len(),
                report.removed.len(),
                report.restarted
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("convergence failed: {e}");
            ExitCode::FAILURE
        }
    }
}
