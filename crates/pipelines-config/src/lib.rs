// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Declaration model and renderer for the telemetry pipelines agent.
//!
//! The agent composes its topology from many small configuration files loaded
//! out of fixed, kind-namespaced directories (`configs/sources`,
//! `configs/transforms`, `configs/sinks`). This crate owns the two pieces that
//! make that composition deterministic:
//!
//! * the [`ConfigObject`] declaration model — one declared source, transform,
//!   or sink, carrying an opaque parameter bag the agent's plugins interpret;
//! * the [`render`] operation — the pure translation of a declaration into
//!   exactly one `(path, content)` pair under the agent's configuration tree.
//!
//! Because every declaration owns a disjoint file path derived from its kind
//! and name, independent declaration sites compose into one agent
//! configuration without a central merge step or write-write conflicts. The
//! crate performs no I/O; writing the rendered files to disk (and deciding
//! whether anything changed) belongs to the `pipelines-host` crate.

pub mod error;
pub mod format;
pub mod object;
pub mod render;
pub mod tree;

pub use error::{ConfigError, RenderError};
pub use format::Format;
pub use object::{ConfigObject, ObjectKind, ObjectSet};
pub use render::{render, render_global, Rendered};
pub use tree::ConfigTree;
