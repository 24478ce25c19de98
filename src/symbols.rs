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

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Function,
    Data,
    /// Thread-local storage object.
    Tls,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolScope {
    Global,
    Weak,
    Local,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolType::Function => "FUNC",
            SymbolType::Data => "OBJECT",
            SymbolType::Tls => "TLS",
            SymbolType::Unknown => "NOTYPE",
        };
        f.pad(s)
    }
}

impl fmt::Display for SymbolScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolScope::Global => "GLOBAL",
            SymbolScope::Weak => "WEAK",
            SymbolScope::Local => "LOCAL",
        };
        f.pad(s)
    }
}

/// A symbol loaded from the kernel image. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Linkage name, as written in the object file.
    pub name: String,
    pub demangled: String,
    pub address: u64,
    pub size: u64,
    pub kind: SymbolType,
    pub scope: SymbolScope,
}

impl Symbol {
    pub fn new(name: impl Into<String>, address: u64, size: u64) -> Self {
        let name = name.into();
        Self {
            demangled: name.clone(),
            name,
            address,
            size,
            kind: SymbolType::Unknown,
            scope: SymbolScope::Global,
        }
    }

    pub fn with_demangled(mut self, demangled: impl Into<String>) -> Self {
        self.demangled = demangled.into();
        self
    }

    pub fn with_kind(mut self, kind: SymbolType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_scope(mut self, scope: SymbolScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_weak(&self) -> bool {
        self.scope == SymbolScope::Weak
    }

    pub fn is_tls(&self) -> bool {
        self.kind == SymbolType::Tls
    }
}

/// Symbols keyed by linkage name. Values are shared so a filtered table
/// refers to the same symbols as the table it was taken from.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols_by_name: BTreeMap<String, Arc<Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols_by_name: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, symbol: Symbol) {
        self.insert_shared(Arc::new(symbol));
    }

    /// Insert an already shared symbol. A symbol with the same linkage name
    /// is replaced.
    pub fn insert_shared(&mut self, symbol: Arc<Symbol>) {
        self.symbols_by_name.insert(symbol.name.clone(), symbol);
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Symbol> {
        self.symbols_by_name.get(name).map(|s| s.as_ref())
    }

    pub fn has_symbol_by_name(&self, name: &str) -> bool {
        self.symbols_by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols_by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Symbol>> {
        self.symbols_by_name.values()
    }

    pub fn globals(&self) -> impl Iterator<Item = &Arc<Symbol>> {
        self.iter().filter(|s| s.scope == SymbolScope::Global)
    }

    pub fn weaks(&self) -> impl Iterator<Item = &Arc<Symbol>> {
        self.iter().filter(|s| s.scope == SymbolScope::Weak)
    }
}

impl FromIterator<Symbol> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        for symbol in iter {
            table.insert(symbol);
        }
        table
    }
}

impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.symbols_by_name == other.symbols_by_name
    }
}
