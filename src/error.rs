// File: error.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use thiserror::Error;

/// Fault raised by a single analyzer while reading a scan artifact.
///
/// Analyzers never abort a batch run: the assembler maps every fault to
/// sentinel-valued output slots and moves on. The three variants record why
/// an output group is missing.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An expected element of the artifact is absent (no primary document,
    /// no header mapping, no `<body>` in the DOM snapshot).
    #[error("structural fault: {0}")]
    Structural(String),

    /// A value is present but cannot be interpreted (unparseable URL,
    /// malformed record).
    #[error("parse fault: {0}")]
    Parse(String),

    /// A domain or suffix lookup failed for a value that parsed fine.
    #[error("lookup fault: {0}")]
    Lookup(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
