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

use crate::cli::Args;
use crate::compiler::{split_flags, CompilerSelection};
use crate::error::SymsError;
use crate::generator::GenerationMode;
use log::warn;
use std::path::PathBuf;

/// Settings for one run, validated from the command line.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub kernel: PathBuf,
    pub output: Option<PathBuf>,
    pub map: Option<PathBuf>,
    /// Where to write and keep the generated source.
    pub source: Option<PathBuf>,
    pub mode: GenerationMode,
    pub compiler: CompilerSelection,
    pub cflags: Vec<String>,
    pub filter_files: Vec<PathBuf>,
    pub filter_patterns: Vec<String>,
    pub keep_temporaries: bool,
    pub verbosity: u8,
    /// `-E` was given together with `-C` and is not used.
    pub ignored_exec_prefix: Option<String>,
}

impl TryFrom<Args> for Config {
    type Error = SymsError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mut kernels = args.kernel.into_iter();
        let kernel = kernels.next().ok_or(SymsError::NoKernel)?;
        if kernels.next().is_some() {
            return Err(SymsError::MultipleKernels);
        }
        if args.output.is_none() && args.map.is_none() {
            return Err(SymsError::NoOutput);
        }

        let mut ignored_exec_prefix = None;
        let compiler = match (args.cc, args.exec_prefix) {
            (Some(cc), prefix) => {
                ignored_exec_prefix = prefix;
                CompilerSelection::Explicit(cc)
            }
            (None, Some(prefix)) => CompilerSelection::Prefix(prefix),
            (None, None) => CompilerSelection::Detect,
        };

        let mode = if args.embed {
            GenerationMode::Embedded
        } else {
            GenerationMode::Linked
        };

        Ok(Config {
            kernel,
            output: args.output,
            map: args.map,
            source: args.symc,
            mode,
            compiler,
            cflags: args.cflags.iter().flat_map(|f| split_flags(f)).collect(),
            filter_files: args.filter,
            filter_patterns: args.filter_re,
            keep_temporaries: args.keep,
            verbosity: args.verbose,
            ignored_exec_prefix,
        })
    }
}

impl Config {
    /// Log what was accepted but will not be used. Call once logging runs.
    pub fn log_warnings(&self) {
        if let Some(prefix) = &self.ignored_exec_prefix {
            warn!("exec-prefix {prefix} ignored when CC provided");
        }
    }
}
