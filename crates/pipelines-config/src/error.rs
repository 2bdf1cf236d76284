// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors raised while validating declaration input, before rendering.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported format '{0}'. Must be one of: json, yaml, yml, toml")]
    UnsupportedFormat(String),
}

/// Errors raised while serializing a configuration object.
///
/// These surface serializer limitations (for example TOML has no encoding for
/// a null value), not schema problems: parameter bags are opaque and never
/// validated against the agent's plugin schemas.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to serialize '{name}' as JSON: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },

    #[error("Failed to serialize '{name}' as YAML: {source}")]
    Yaml {
        name: String,
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize '{name}' as TOML: {source}")]
    Toml {
        name: String,
        source: toml::ser::Error,
    },
}
