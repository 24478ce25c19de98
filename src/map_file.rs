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

//! Map of the selected symbols, as text or, for `.json` paths, JSON.

use crate::error::SymsError;
use crate::symbols::{Symbol, SymbolTable};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct JsonMap<'a> {
    kernel: String,
    symbols: Vec<&'a Symbol>,
}

pub fn write_map(path: &Path, kernel: &Path, symbols: &SymbolTable) -> Result<(), SymsError> {
    let map_err = |source: io::Error| SymsError::MapFile {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(map_err)?;
    let mut out = BufWriter::new(file);
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        write_json(&mut out, kernel, symbols).map_err(map_err)?;
    } else {
        write_text(&mut out, kernel, symbols).map_err(map_err)?;
    }
    out.flush().map_err(map_err)
}

pub fn write_text<W: Write>(out: &mut W, kernel: &Path, symbols: &SymbolTable) -> io::Result<()> {
    writeln!(out, "RTEMS Kernel Symbols Map")?;
    writeln!(out, " kernel: {}", kernel.display())?;
    writeln!(out)?;
    for (index, sym) in symbols.iter().enumerate() {
        write!(
            out,
            "{:>5}: {:<6} {:<6} 0x{:08x} {:>8} {}",
            index, sym.scope, sym.kind, sym.address, sym.size, sym.name
        )?;
        if sym.demangled != sym.name {
            write!(out, " ({})", sym.demangled)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, kernel: &Path, symbols: &SymbolTable) -> io::Result<()> {
    let map = JsonMap {
        kernel: kernel.display().to_string(),
        symbols: symbols.iter().map(|s| s.as_ref()).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &map)?;
    writeln!(out)
}
