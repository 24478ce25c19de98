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

use crate::error::SymsError;
use crate::symbols::{Symbol, SymbolScope, SymbolTable, SymbolType};
use log::{debug, trace};
use object::{Architecture, Object, ObjectSymbol, SymbolKind};
use std::fs;
use std::path::Path;

/// Global and weak symbols of a kernel image plus what we need to pick a
/// compiler for it.
pub struct KernelImage {
    pub symbols: SymbolTable,
    pub architecture: Architecture,
}

impl KernelImage {
    /// Machine name used to build the toolchain prefix, if known.
    pub fn machine_type(&self) -> Option<&'static str> {
        machine_type(self.architecture)
    }
}

pub fn load_kernel(path: &Path) -> Result<KernelImage, SymsError> {
    let kernel_err = |reason: String| SymsError::Kernel {
        path: path.to_path_buf(),
        reason,
    };

    let bin_data = fs::read(path).map_err(|e| kernel_err(e.to_string()))?;
    parse_kernel(&bin_data).map_err(kernel_err)
}

/// Parse an in-memory image. Errors are returned as text so the caller can
/// attach the path.
pub fn parse_kernel(data: &[u8]) -> Result<KernelImage, String> {
    let obj_file = object::File::parse(data).map_err(|e| e.to_string())?;
    if obj_file.format() != object::BinaryFormat::Elf {
        return Err(format!("not an ELF file ({:?})", obj_file.format()));
    }

    let mut symbols = SymbolTable::new();
    for sym in obj_file.symbols() {
        if sym.is_undefined() {
            continue;
        }
        let kind = match sym.kind() {
            SymbolKind::Text => SymbolType::Function,
            SymbolKind::Data => SymbolType::Data,
            SymbolKind::Tls => SymbolType::Tls,
            // Section and file symbols are never exported.
            SymbolKind::Section | SymbolKind::File => continue,
            _ => SymbolType::Unknown,
        };
        let scope = if sym.is_weak() {
            SymbolScope::Weak
        } else if sym.is_global() {
            SymbolScope::Global
        } else {
            continue;
        };
        let name = match sym.name() {
            Ok(name) if !name.is_empty() => name,
            _ => continue,
        };
        trace!("{} {} 0x{:x} {}", scope, kind, sym.address(), name);
        symbols.insert(
            Symbol::new(name, sym.address(), sym.size())
                .with_demangled(demangle(name))
                .with_kind(kind)
                .with_scope(scope),
        );
    }

    debug!(
        "loaded {} symbols ({} weak)",
        symbols.len(),
        symbols.weaks().count()
    );
    Ok(KernelImage {
        symbols,
        architecture: obj_file.architecture(),
    })
}

/// Human readable form of a linkage name. Rust and C++ manglings are
/// recognised, anything else is returned unchanged.
pub fn demangle(name: &str) -> String {
    if let Ok(d) = rustc_demangle::try_demangle(name) {
        return format!("{d:#}");
    }
    if name.starts_with("_Z") {
        if let Ok(sym) = cpp_demangle::Symbol::new(name.as_bytes()) {
            if let Ok(demangled) = sym.demangle() {
                return demangled;
            }
        }
    }
    name.to_string()
}

pub fn machine_type(architecture: Architecture) -> Option<&'static str> {
    let machine = match architecture {
        Architecture::Arm => "arm",
        Architecture::Aarch64 => "aarch64",
        Architecture::I386 => "i386",
        Architecture::X86_64 => "x86_64",
        Architecture::Mips => "mips",
        Architecture::Mips64 => "mips64",
        Architecture::PowerPc => "powerpc",
        Architecture::PowerPc64 => "powerpc64",
        Architecture::Riscv32 => "riscv32",
        Architecture::Riscv64 => "riscv64",
        Architecture::Sparc64 => "sparc64",
        _ => return None,
    };
    Some(machine)
}
