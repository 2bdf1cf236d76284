// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde_json::{Map, Value};

use crate::format::Format;

/// Category of a configuration object in the agent topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Ingests telemetry from the host (files, sockets, journals).
    Source,
    /// Reshapes events flowing from sources or other transforms.
    Transform,
    /// Delivers events to a downstream system.
    Sink,
}

impl ObjectKind {
    /// Directory under `configs/` that the agent loads this kind from.
    pub fn directory(self) -> &'static str {
        match self {
            ObjectKind::Source => "sources",
            ObjectKind::Transform => "transforms",
            ObjectKind::Sink => "sinks",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ObjectKind::Source => "source",
            ObjectKind::Transform => "transform",
            ObjectKind::Sink => "sink",
        };
        f.write_str(kind)
    }
}

/// One declared source, transform, or sink.
///
/// The name doubles as the output filename stem, so it must be unique within
/// its kind: two objects of the same kind and name render to the same path
/// and the last write wins. `component_type` and `parameters` are opaque to
/// this crate — which keys are valid is defined by the agent's plugin for
/// that type, and validation happens at agent startup, not here. The same
/// goes for `inputs`: entries should name existing sources or transforms,
/// but referential integrity is the agent's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigObject {
    pub kind: ObjectKind,
    pub name: String,
    pub component_type: String,
    /// Opaque parameter bag, passed through verbatim. Insertion order is
    /// preserved through serialization.
    pub parameters: Map<String, Value>,
    /// Upstream object names feeding this one. Always empty for sources.
    pub inputs: Vec<String>,
    pub format: Format,
}

impl ConfigObject {
    /// Declares a source. Sources have no upstream inputs.
    pub fn source(
        name: impl Into<String>,
        component_type: impl Into<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        Self {
            kind: ObjectKind::Source,
            name: name.into(),
            component_type: component_type.into(),
            parameters,
            inputs: Vec::new(),
            format: Format::default(),
        }
    }

    /// Declares a transform fed by the named upstream objects.
    pub fn transform(
        name: impl Into<String>,
        component_type: impl Into<String>,
        inputs: Vec<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        Self {
            kind: ObjectKind::Transform,
            name: name.into(),
            component_type: component_type.into(),
            parameters,
            inputs,
            format: Format::default(),
        }
    }

    /// Declares a sink fed by the named upstream objects.
    pub fn sink(
        name: impl Into<String>,
        component_type: impl Into<String>,
        inputs: Vec<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        Self {
            kind: ObjectKind::Sink,
            name: name.into(),
            component_type: component_type.into(),
            parameters,
            inputs,
            format: Format::default(),
        }
    }

    /// Overrides the serialization format (default TOML).
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

/// Ordered set of configuration objects — the full desired topology for one
/// convergence run. Iteration order is declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSet {
    objects: Vec<ConfigObject>,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: ConfigObject) {
        self.objects.push(object);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<ConfigObject> for ObjectSet {
    fn from_iter<I: IntoIterator<Item = ConfigObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
