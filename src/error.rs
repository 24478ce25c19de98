// Copyright (c) 2026 MCU-Debug Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types and the process exit codes they map to.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 3;
pub const EXIT_OPERATIONAL: i32 = 10;
pub const EXIT_UNEXPECTED: i32 = 11;
pub const EXIT_UNRECOGNIZED: i32 = 12;

#[derive(Error, Debug)]
#[error("invalid filter pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to run {compiler}: {source}")]
    Spawn {
        compiler: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{compiler} failed ({status}): {stderr}")]
    Failed {
        compiler: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Data-integrity violations raised by the address index.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndexError {
    #[error("different lengths for the symbol {symbol} at 0x{start:x} ({existing} and {length})")]
    LengthMismatch {
        symbol: String,
        start: u64,
        existing: u64,
        length: u64,
    },

    #[error("symbol {symbol} at 0x{start:x} with length {length} overflows the address space")]
    AddressOverflow {
        symbol: String,
        start: u64,
        length: u64,
    },
}

/// Expected operational failures. Each carries a short category naming
/// where it was raised.
#[derive(Error, Debug)]
pub enum SymsError {
    #[error("no kernel file")]
    NoKernel,

    #[error("only one kernel file")]
    MultipleKernels,

    #[error("no output or map")]
    NoOutput,

    #[error("no filtered symbols")]
    NoFilteredSymbols,

    #[error("{}: {}", .path.display(), .reason)]
    Kernel { path: PathBuf, reason: String },

    #[error("cannot read filter file {}: {}", .path.display(), .source)]
    FilterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("map file {}: {}", .path.display(), .source)]
    MapFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl SymsError {
    pub fn category(&self) -> &'static str {
        match self {
            SymsError::NoKernel | SymsError::MultipleKernels | SymsError::NoOutput => "options",
            SymsError::NoFilteredSymbols | SymsError::FilterFile { .. } | SymsError::Pattern(_) => {
                "filter"
            }
            SymsError::Kernel { .. } => "kernel",
            SymsError::MapFile { .. } => "map",
            SymsError::Compile(_) => "compiler",
        }
    }
}

/// Exit code for a failed run, and the line reported to the user.
pub fn exit_code_for(err: &anyhow::Error) -> (i32, String) {
    match err.downcast_ref::<SymsError>() {
        Some(e) => (EXIT_OPERATIONAL, format!("{}: {}", e.category(), e)),
        None => (EXIT_UNEXPECTED, format!("exception: {err:#}")),
    }
}
