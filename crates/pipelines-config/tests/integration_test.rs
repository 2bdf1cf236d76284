// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use pipelines_config::{render, ConfigObject, ConfigTree, Format};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn tree() -> ConfigTree {
    ConfigTree::new("/etc/pipelines-agent")
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,24}"
}

fn format_strategy() -> impl Strategy<Value = Format> {
    prop_oneof![
        Just(Format::Json),
        Just(Format::Yaml),
        Just(Format::Yml),
        Just(Format::Toml),
    ]
}

proptest! {
    #[test]
    fn render_is_deterministic(
        name in name_strategy(),
        component_type in name_strategy(),
        value in "[ -~]{0,32}",
        format in format_strategy(),
    ) {
        let mut parameters = Map::new();
        parameters.insert("field".to_string(), Value::String(value));
        let object = ConfigObject::source(name, component_type, parameters).with_format(format);

        let first = render(&object, &tree()).unwrap();
        let second = render(&object, &tree()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distinct_names_render_distinct_paths(
        a in name_strategy(),
        b in name_strategy(),
        format in format_strategy(),
    ) {
        prop_assume!(a != b);
        let first = ConfigObject::source(a, "file", Map::new()).with_format(format);
        let second = ConfigObject::source(b, "file", Map::new()).with_format(format);

        let first = render(&first, &tree()).unwrap();
        let second = render(&second, &tree()).unwrap();
        prop_assert_ne!(first.path, second.path);
    }

    #[test]
    fn content_round_trips_through_the_matching_parser(
        name in name_strategy(),
        key in "[a-z][a-z0-9_]{0,12}",
        value in "[a-zA-Z0-9 ./:_-]{0,32}",
        format in format_strategy(),
    ) {
        let mut parameters = Map::new();
        parameters.insert(key, Value::String(value));
        let object = ConfigObject::sink(
            name,
            "kafka",
            vec!["upstream".to_string()],
            parameters.clone(),
        )
        .with_format(format);

        let rendered = render(&object, &tree()).unwrap();
        let parsed: Value = match format {
            Format::Yaml | Format::Yml => serde_yaml::from_str(&rendered.content).unwrap(),
            Format::Toml => toml::from_str(&rendered.content).unwrap(),
            Format::Json => serde_json::from_str(&rendered.content).unwrap(),
        };

        let mut expected = parameters;
        expected.insert("type".to_string(), json!("kafka"));
        expected.insert("inputs".to_string(), json!(["upstream"]));
        prop_assert_eq!(parsed, Value::Object(expected));
    }
}
