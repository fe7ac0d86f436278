// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rows of a mutation-testing report.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::types::LeafStats;

/// One per-class result from the upstream mutation-testing report.
///
/// Field names follow the report's JSON (`dottedPath`, `lines`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRecord {
    /// Fully qualified class name, e.g. `com.example.Parser`.
    pub dotted_path: String,
    /// Line count of the class.
    pub lines: u64,
    /// Upstream-reported coverage percentage.
    #[serde(default)]
    pub coverage: f64,
    /// Total mutations.
    pub mutations: u64,
    /// Detected mutations.
    pub detected: u64,
}

impl CoverageRecord {
    /// Path segments of [`Self::dotted_path`].
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.dotted_path.split('.')
    }

    /// Leaf statistics carried by this record.
    pub fn stats(&self) -> LeafStats {
        LeafStats {
            lines: self.lines,
            coverage: self.coverage,
            mutations: self.mutations,
            detected: self.detected,
        }
    }
}
