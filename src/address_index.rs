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

use crate::elf_items::demangle;
use crate::error::IndexError;
use crate::symbols::{Symbol, SymbolTable};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One address range owned by a symbol, inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalEntry {
    pub low: u64,
    pub high: u64,
    pub symbol: String,
}

/// One instance of a symbol. A name can have several when it was derived
/// from more than one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    pub starting_address: u64,
    pub length: u64,
}

/// Maps addresses collected at run time back to the symbol that owns them.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    // Keyed by the high address so the first key >= addr is the only
    // candidate range.
    contents: BTreeMap<u64, IntervalEntry>,
    info: HashMap<String, Vec<SymbolInfo>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from loaded symbols. Names are demangled after any
    /// `.suffix` is removed from the linkage name, so compiler clones such as
    /// `foo.part.0` or `_Z3fooi.part.0` become instances of `foo` or
    /// `foo(int)`. Zero sized symbols are skipped.
    pub fn from_symbols(symbols: &SymbolTable) -> Result<Self, IndexError> {
        let mut index = SymbolIndex::new();
        for sym in symbols.iter().filter(|s| s.size > 0) {
            index.add(&index_name(sym), sym.address, sym.size)?;
        }
        Ok(index)
    }

    /// Record `[start, start + length - 1]` for `symbol`.
    ///
    /// Adding the same instance twice is a no-op. Adding an instance at a
    /// known start address with a different length fails and leaves the
    /// index untouched.
    pub fn add(&mut self, symbol: &str, start: u64, length: u64) -> Result<(), IndexError> {
        let end = start
            .checked_add(length.saturating_sub(1))
            .ok_or_else(|| IndexError::AddressOverflow {
                symbol: symbol.to_string(),
                start,
                length,
            })?;

        let instances = self.info.get(symbol).map(Vec::as_slice).unwrap_or_default();
        let mut known = false;
        // Names are stripped of suffixes so the same name can appear at
        // different start addresses.
        for existing in instances.iter().filter(|i| i.starting_address == start) {
            if existing.length != length {
                return Err(IndexError::LengthMismatch {
                    symbol: symbol.to_string(),
                    start,
                    existing: existing.length,
                    length,
                });
            }
            known = true;
        }

        self.contents.insert(
            end,
            IntervalEntry {
                low: start,
                high: end,
                symbol: symbol.to_string(),
            },
        );
        if !known {
            self.info.entry(symbol.to_string()).or_default().push(SymbolInfo {
                starting_address: start,
                length,
            });
        }
        Ok(())
    }

    /// The symbol whose range contains `address`.
    pub fn resolve(&self, address: u64) -> Option<&str> {
        let (_, entry) = self.contents.range(address..).next()?;
        (entry.low <= address).then_some(entry.symbol.as_str())
    }

    /// Length of the first recorded instance of `symbol`, 0 if unknown.
    pub fn length_of(&self, symbol: &str) -> u64 {
        self.info
            .get(symbol)
            .and_then(|instances| instances.first())
            .map_or(0, |i| i.length)
    }

    pub fn info_for(&self, symbol: &str) -> Option<&[SymbolInfo]> {
        self.info.get(symbol).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn intervals(&self) -> impl Iterator<Item = &IntervalEntry> {
        self.contents.values()
    }
}

/// Strip a compiler generated `.suffix` from a symbol name.
pub fn base_name(name: &str) -> &str {
    match name.find('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name,
    }
}

fn index_name(sym: &Symbol) -> String {
    let base = base_name(&sym.name);
    if base.len() == sym.name.len() {
        sym.demangled.clone()
    } else {
        demangle(base)
    }
}

impl fmt::Display for SymbolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.info.keys().collect();
        names.sort();
        for name in names {
            for i in &self.info[name] {
                writeln!(
                    f,
                    "{}:\tStarting address = 0x{:x}\tLength = {}",
                    name, i.starting_address, i.length
                )?;
            }
        }
        Ok(())
    }
}
