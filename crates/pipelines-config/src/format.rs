// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Serialization format for a rendered configuration file.
///
/// `Yml` is a distinct variant rather than an alias for `Yaml`: both
/// serialize as YAML, but the file extension is the literal token the caller
/// supplied. The agent's automatic namespacing recognizes files by suffix, so
/// the extension is never canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Yml,
    #[default]
    Toml,
}

impl Format {
    /// File extension for this format, as a literal token.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Yml => "yml",
            Format::Toml => "toml",
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    /// Parses a format token. The set is closed: anything outside
    /// `json|yaml|yml|toml` is rejected here so the renderer never sees an
    /// unrecognized value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            "yml" => Ok(Format::Yml),
            "toml" => Ok(Format::Toml),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
