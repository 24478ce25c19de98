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

//! Runs the target C compiler over the generated symbol table source.

use crate::error::CompileError;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Target OS part of the toolchain prefix when it is derived from the
/// kernel's machine type, eg `arm-rtems6-gcc`.
pub const DEFAULT_TARGET_OS: &str = "rtems6";

/// Fallback when nothing better is known.
const HOST_CC: &str = "gcc";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompilerSelection {
    /// Full path or name of the compiler.
    Explicit(PathBuf),
    /// Machine part of the toolchain prefix, eg `arm`. The compiler is
    /// `<prefix>-rtems6-gcc`.
    Prefix(String),
    /// Derive the prefix from the kernel image.
    #[default]
    Detect,
}

impl CompilerSelection {
    /// Resolve to a compiler executable. `machine` is the kernel's machine
    /// type and only used when detecting.
    pub fn resolve(&self, machine: Option<&str>) -> PathBuf {
        match self {
            CompilerSelection::Explicit(cc) => cc.clone(),
            CompilerSelection::Prefix(prefix) => toolchain_cc(prefix),
            CompilerSelection::Detect => {
                machine.map_or_else(|| PathBuf::from(HOST_CC), toolchain_cc)
            }
        }
    }
}

/// `<prefix>-rtems6-gcc`, the one naming rule for `-E` and detection.
pub fn toolchain_cc(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{DEFAULT_TARGET_OS}-gcc"))
}

pub struct Compiler {
    cc: PathBuf,
    cflags: Vec<String>,
}

impl Compiler {
    pub fn new(cc: impl Into<PathBuf>, cflags: Vec<String>) -> Self {
        Self {
            cc: cc.into(),
            cflags,
        }
    }

    pub fn cc(&self) -> &Path {
        &self.cc
    }

    /// Arguments for compiling `source` into `object`.
    pub fn arguments(&self, source: &Path, object: &Path) -> Vec<String> {
        let mut args = self.cflags.clone();
        args.extend(["-O2".to_string(), "-c".to_string(), "-o".to_string()]);
        args.push(object.display().to_string());
        args.push(source.display().to_string());
        args
    }

    /// Compile only, no link. A non-zero or abnormal exit is an error
    /// carrying what the compiler wrote to stderr.
    pub fn compile(&self, source: &Path, object: &Path) -> Result<(), CompileError> {
        let compiler = self.cc.display().to_string();
        let args = self.arguments(source, object);
        info!("compiling: {} {}", compiler, args.join(" "));

        let output = Command::new(&self.cc)
            .args(&args)
            .output()
            .map_err(|source| CompileError::Spawn {
                compiler: compiler.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(CompileError::Failed {
                compiler,
                status: output.status,
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!("{compiler}: {stderr}");
        }
        Ok(())
    }
}

/// Split a `--cflags` string into arguments.
pub fn split_flags(flags: &str) -> Vec<String> {
    flags.split_whitespace().map(str::to_string).collect()
}
