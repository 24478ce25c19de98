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

//! One run of the tool: load the kernel, filter its symbols, write the map
//! and compile the symbol table object.

use crate::compiler::Compiler;
use crate::config::Config;
use crate::elf_items::load_kernel;
use crate::error::SymsError;
use crate::filter::SymbolFilter;
use crate::generator::generate;
use crate::map_file::write_map;
use crate::scratch::Scratch;
use crate::symbols::SymbolTable;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::sync::Arc;

/// Name of the generated source inside the scratch directory.
pub const SOURCE_FILE_NAME: &str = "rtl-syms.c";

pub fn build_filter(config: &Config) -> Result<SymbolFilter, SymsError> {
    let mut filter = SymbolFilter::new();
    for path in &config.filter_files {
        filter.load(path)?;
    }
    for re in &config.filter_patterns {
        filter.add(re)?;
    }
    Ok(filter)
}

/// Select the global and weak symbols to publish. A weak symbol linked into
/// the base image behaves as a global.
pub fn select_symbols(
    symbols: &SymbolTable,
    filter: &SymbolFilter,
) -> Result<SymbolTable, SymsError> {
    let mut exported = SymbolTable::new();
    for sym in symbols.globals().chain(symbols.weaks()) {
        exported.insert_shared(Arc::clone(sym));
    }
    let selected = filter.apply(&exported);
    if selected.is_empty() {
        return Err(SymsError::NoFilteredSymbols);
    }
    Ok(selected)
}

pub fn run(config: &Config, scratch: &Scratch) -> Result<()> {
    info!("kernel: {}", config.kernel.display());
    let filter = build_filter(config)?;

    let kernel = load_kernel(&config.kernel)?;
    info!("kernel symbols: {}", kernel.symbols.len());

    let selected = select_symbols(&kernel.symbols, &filter)?;
    info!("filtered symbols: {}", selected.len());

    if let Some(map) = &config.map {
        write_map(map, &config.kernel, &selected)?;
        info!("map file: {}", map.display());
    }

    if let Some(output) = &config.output {
        let source = config
            .source
            .clone()
            .unwrap_or_else(|| scratch.file(SOURCE_FILE_NAME));
        info!("symbol C file: {}", source.display());
        fs::write(&source, generate(&selected, config.mode))
            .with_context(|| format!("writing {}", source.display()))?;

        let cc = config.compiler.resolve(kernel.machine_type());
        info!("symbol O file: {}", output.display());
        Compiler::new(cc, config.cflags.clone())
            .compile(&source, output)
            .map_err(SymsError::from)?;
    }
    Ok(())
}
