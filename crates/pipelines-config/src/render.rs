// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Pure translation of declarations into `(path, content)` pairs.
//!
//! Rendering performs no I/O and never mutates its input: the same
//! declaration always yields byte-identical output. Writing the result to
//! disk — and deciding whether anything actually changed — is the host
//! crate's job.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::RenderError;
use crate::format::Format;
use crate::object::{ConfigObject, ObjectKind};
use crate::tree::ConfigTree;

/// Output of a render: the file's target path and serialized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub path: PathBuf,
    pub content: String,
}

/// Renders one configuration object into its file under `tree`.
///
/// The content is the object's parameter bag merged with the derived fields:
/// `type` (always) and `inputs` (for transforms and sinks). The merge is a
/// shallow override — a user parameter literally named `type` or `inputs` is
/// replaced by the derived value.
pub fn render(object: &ConfigObject, tree: &ConfigTree) -> Result<Rendered, RenderError> {
    let path = tree.object_path(object.kind, &object.name, object.format);

    let mut merged = object.parameters.clone();
    merged.insert(
        "type".to_string(),
        Value::String(object.component_type.clone()),
    );
    if object.kind != ObjectKind::Source {
        merged.insert(
            "inputs".to_string(),
            Value::Array(
                object
                    .inputs
                    .iter()
                    .map(|input| Value::String(input.clone()))
                    .collect(),
            ),
        );
    }

    let content = serialize(&object.name, &merged, object.format)?;
    Ok(Rendered { path, content })
}

/// Renders the global options document at `<etc_root>/global.<ext>`.
pub fn render_global(
    options: &Map<String, Value>,
    format: Format,
    tree: &ConfigTree,
) -> Result<Rendered, RenderError> {
    Ok(Rendered {
        path: tree.global_path(format),
        content: serialize("global", options, format)?,
    })
}

fn serialize(name: &str, map: &Map<String, Value>, format: Format) -> Result<String, RenderError> {
    match format {
        Format::Yaml | Format::Yml => serde_yaml::to_string(map).map_err(|source| {
            RenderError::Yaml {
                name: name.to_string(),
                source,
            }
        }),
        Format::Toml => toml::to_string(map).map_err(|source| RenderError::Toml {
            name: name.to_string(),
            source,
        }),
        // Anything else serializes as JSON. Format parsing rejects unknown
        // tokens one layer up, so today this arm only sees Json; the fallback
        // mirrors the source system's permissive behavior.
        _ => serde_json::to_string_pretty(map)
            .map(|mut content| {
                content.push('\n');
                content
            })
            .map_err(|source| RenderError::Json {
                name: name.to_string(),
                source,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> ConfigTree {
        ConfigTree::new("/etc/pipelines-agent")
    }

    fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_source_toml_scenario() {
        let object = ConfigObject::source(
            "logfile_input",
            "file",
            params(&[("include", json!(["/var/log/**/*.log"]))]),
        );
        let rendered = render(&object, &tree()).unwrap();

        assert_eq!(
            rendered.path,
            PathBuf::from("/etc/pipelines-agent/configs/sources/logfile_input.toml")
        );
        let parsed: Value = toml::from_str(&rendered.content).unwrap();
        assert_eq!(
            parsed,
            json!({"include": ["/var/log/**/*.log"], "type": "file"})
        );
    }

    #[test]
    fn test_sink_toml_scenario() {
        let object = ConfigObject::sink(
            "logfile_kafka",
            "kafka",
            vec!["logfile_transform".to_string()],
            params(&[
                ("bootstrap_servers", json!("localhost:9092")),
                ("topic", json!("logs")),
                ("encoding", json!({"codec": "json"})),
            ]),
        );
        let rendered = render(&object, &tree()).unwrap();

        assert_eq!(
            rendered.path,
            PathBuf::from("/etc/pipelines-agent/configs/sinks/logfile_kafka.toml")
        );
        let parsed: Value = toml::from_str(&rendered.content).unwrap();
        assert_eq!(
            parsed,
            json!({
                "bootstrap_servers": "localhost:9092",
                "topic": "logs",
                "encoding": {"codec": "json"},
                "type": "kafka",
                "inputs": ["logfile_transform"],
            })
        );
    }

    #[test]
    fn test_sources_never_carry_inputs() {
        let object = ConfigObject::source("logs", "file", Map::new());
        let rendered = render(&object, &tree()).unwrap();
        let parsed: Value = toml::from_str(&rendered.content).unwrap();
        assert!(parsed.get("inputs").is_none());
    }

    #[test]
    fn test_derived_fields_override_user_parameters() {
        let object = ConfigObject::transform(
            "remap_logs",
            "remap",
            vec!["logs".to_string()],
            params(&[
                ("type", json!("bogus")),
                ("inputs", json!(["also_bogus"])),
                ("source", json!(".message = \"hi\"")),
            ]),
        );
        let rendered = render(&object, &tree()).unwrap();
        let parsed: Value = toml::from_str(&rendered.content).unwrap();
        assert_eq!(parsed["type"], json!("remap"));
        assert_eq!(parsed["inputs"], json!(["logs"]));
        assert_eq!(parsed["source"], json!(".message = \"hi\""));
    }

    #[test]
    fn test_yaml_and_yml_serialize_identically_but_path_differs() {
        let base = ConfigObject::source("logs", "file", params(&[("include", json!(["/a"]))]));
        let yaml = render(&base.clone().with_format(Format::Yaml), &tree()).unwrap();
        let yml = render(&base.with_format(Format::Yml), &tree()).unwrap();

        assert_eq!(yaml.content, yml.content);
        assert!(yaml.path.to_string_lossy().ends_with("logs.yaml"));
        assert!(yml.path.to_string_lossy().ends_with("logs.yml"));

        let parsed: Value = serde_yaml::from_str(&yaml.content).unwrap();
        assert_eq!(parsed, json!({"include": ["/a"], "type": "file"}));
    }

    #[test]
    fn test_json_round_trip() {
        let object = ConfigObject::sink(
            "console_out",
            "console",
            vec!["logs".to_string()],
            params(&[("encoding", json!({"codec": "text"}))]),
        )
        .with_format(Format::Json);
        let rendered = render(&object, &tree()).unwrap();

        let parsed: Value = serde_json::from_str(&rendered.content).unwrap();
        assert_eq!(
            parsed,
            json!({
                "encoding": {"codec": "text"},
                "type": "console",
                "inputs": ["logs"],
            })
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let object = ConfigObject::transform(
            "remap_logs",
            "remap",
            vec!["logs".to_string()],
            params(&[("source", json!(".status = 200"))]),
        );
        let first = render(&object, &tree()).unwrap();
        let second = render(&object, &tree()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_does_not_mutate_the_object() {
        let object = ConfigObject::source("logs", "file", params(&[("include", json!(["/a"]))]));
        let before = object.clone();
        render(&object, &tree()).unwrap();
        assert_eq!(object, before);
        assert!(object.parameters.get("type").is_none());
    }

    #[test]
    fn test_toml_rejects_null_parameters() {
        let object = ConfigObject::source("logs", "file", params(&[("broken", json!(null))]));
        let error = render(&object, &tree()).unwrap_err();
        assert!(matches!(error, RenderError::Toml { ref name, .. } if name == "logs"));
    }

    #[test]
    fn test_global_document() {
        let options = params(&[("data_dir", json!("/var/lib/pipelines-agent"))]);
        let rendered = render_global(&options, Format::Toml, &tree()).unwrap();
        assert_eq!(
            rendered.path,
            PathBuf::from("/etc/pipelines-agent/global.toml")
        );
        let parsed: Value = toml::from_str(&rendered.content).unwrap();
        assert_eq!(parsed, json!({"data_dir": "/var/lib/pipelines-agent"}));
    }
}
