// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::format::Format;
use crate::object::ObjectKind;

/// Filesystem layout the agent loads its configuration from.
///
/// The layout is fixed for agent compatibility:
///
/// ```text
/// <etc_root>/global.<ext>
/// <etc_root>/configs/sources/<name>.<ext>
/// <etc_root>/configs/transforms/<name>.<ext>
/// <etc_root>/configs/sinks/<name>.<ext>
/// ```
///
/// Each declared object owns exactly one path under this tree, fully
/// determined by its kind, name, and format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTree {
    etc_root: PathBuf,
}

impl ConfigTree {
    pub fn new(etc_root: impl Into<PathBuf>) -> Self {
        Self {
            etc_root: etc_root.into(),
        }
    }

    pub fn etc_root(&self) -> &Path {
        &self.etc_root
    }

    /// Path of the global options document.
    pub fn global_path(&self, format: Format) -> PathBuf {
        self.etc_root.join(format!("global.{}", format.extension()))
    }

    /// Directory holding all objects of one kind.
    pub fn kind_dir(&self, kind: ObjectKind) -> PathBuf {
        self.etc_root.join("configs").join(kind.directory())
    }

    /// The three kind directories, in fixed order.
    pub fn object_dirs(&self) -> [PathBuf; 3] {
        [
            self.kind_dir(ObjectKind::Source),
            self.kind_dir(ObjectKind::Transform),
            self.kind_dir(ObjectKind::Sink),
        ]
    }

    /// Path of one object's configuration file.
    pub fn object_path(&self, kind: ObjectKind, name: &str, format: Format) -> PathBuf {
        self.kind_dir(kind)
            .join(format!("{}.{}", name, format.extension()))
    }
}
