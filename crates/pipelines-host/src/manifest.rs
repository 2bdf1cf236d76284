// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Desired-state manifest: the declarative front-end for a convergence run.
//!
//! One TOML document declares the global options plus every source,
//! transform, and sink. Example:
//!
//! ```toml
//! [global]
//! format = "toml"
//! [global.options]
//! data_dir = "/var/lib/pipelines-agent"
//!
//! [[sources]]
//! name = "logfile_input"
//! type = "file"
//! [sources.options]
//! include = ["/var/log/**/*.log"]
//!
//! [[sinks]]
//! name = "logfile_kafka"
//! type = "kafka"
//! inputs = ["logfile_input"]
//! [sinks.options]
//! bootstrap_servers = "localhost:9092"
//! topic = "logs"
//! ```
//!
//! Per-object `format` values are constrained to `json|yaml|yml|toml` and
//! rejected here, before anything reaches the renderer.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use pipelines_config::{ConfigObject, Format, ObjectSet};

use crate::error::ManifestError;

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub global: GlobalSection,
    pub sources: Vec<SourceEntry>,
    pub transforms: Vec<TransformEntry>,
    pub sinks: Vec<SinkEntry>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalSection {
    pub format: Option<String>,
    pub options: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub format: Option<String>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub inputs: Vec<String>,
    pub format: Option<String>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub inputs: Vec<String>,
    pub format: Option<String>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Format of the global options document (default TOML).
    pub fn global_format(&self) -> Result<Format, ManifestError> {
        parse_format(self.global.format.as_deref())
    }

    /// Builds the full object set, in declaration order: sources, then
    /// transforms, then sinks.
    pub fn objects(&self) -> Result<ObjectSet, ManifestError> {
        let mut set = ObjectSet::new();
        for entry in &self.sources {
            set.push(
                ConfigObject::source(&entry.name, &entry.component_type, entry.options.clone())
                    .with_format(parse_format(entry.format.as_deref())?),
            );
        }
        for entry in &self.transforms {
            set.push(
                ConfigObject::transform(
                    &entry.name,
                    &entry.component_type,
                    entry.inputs.clone(),
                    entry.options.clone(),
                )
                .with_format(parse_format(entry.format.as_deref())?),
            );
        }
        for entry in &self.sinks {
            set.push(
                ConfigObject::sink(
                    &entry.name,
                    &entry.component_type,
                    entry.inputs.clone(),
                    entry.options.clone(),
                )
                .with_format(parse_format(entry.format.as_deref())?),
            );
        }
        Ok(set)
    }
}

fn parse_format(token: Option<&str>) -> Result<Format, ManifestError> {
    match token {
        Some(token) => Ok(token.parse()?),
        None => Ok(Format::default()),
    }
}
