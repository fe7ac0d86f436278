// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record-level failures raised while building or aggregating a tree.

use alloc::string::String;

/// Errors produced while ingesting or aggregating coverage records.
///
/// Both variants are local to a single record: callers are expected to log
/// them and keep processing the rest of the dataset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The dotted path was empty or contained an empty segment.
    #[error("malformed path `{path}`")]
    MalformedPath {
        /// The offending path, segments joined with `.`.
        path: String,
    },
    /// A leaf claims more detected mutations than it has.
    #[error("inconsistent leaf `{path}`: {detected} detected of {total} mutations")]
    InconsistentLeaf {
        /// The offending path, segments joined with `.`.
        path: String,
        /// Reported total mutations.
        total: u64,
        /// Reported detected mutations.
        detected: u64,
    },
}
