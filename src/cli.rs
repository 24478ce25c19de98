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

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rtl-syms",
    version,
    about = "Generate a runtime loadable global symbol table from a kernel image"
)]
pub struct Args {
    /// Verbose output, can be given more than once
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Keep temporary files
    #[arg(short = 'k', long = "keep")]
    pub keep: bool,

    /// Embedded symbol table, values are resolved when it is linked
    #[arg(short = 'e', long = "embed")]
    pub embed: bool,

    /// Write the generated C source here and keep it
    #[arg(short = 'S', long = "symc", value_name = "FILE")]
    pub symc: Option<PathBuf>,

    /// Output object file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output a map of the selected symbols
    #[arg(short = 'm', long = "map", value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Target C compiler executable
    #[arg(short = 'C', long = "cc", value_name = "FILE")]
    pub cc: Option<PathBuf>,

    /// Toolchain machine prefix, eg arm for arm-rtems6-gcc
    #[arg(short = 'E', long = "exec-prefix", value_name = "PREFIX")]
    pub exec_prefix: Option<String>,

    /// C compiler flags
    #[arg(short = 'c', long = "cflags", value_name = "CFLAGS", allow_hyphen_values = true)]
    pub cflags: Vec<String>,

    /// File of symbol filter expressions
    #[arg(short = 'f', long = "filter", value_name = "FILE")]
    pub filter: Vec<PathBuf>,

    /// Symbol filter regular expression
    #[arg(short = 'F', long = "filter-re", value_name = "RE")]
    pub filter_re: Vec<String>,

    /// Kernel image
    #[arg(value_name = "KERNEL")]
    pub kernel: Vec<PathBuf>,
}
