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

#![allow(dead_code)]

use object::write::{Object, StandardSection, Symbol, SymbolSection};
use object::{Architecture, BinaryFormat, Endianness, SymbolFlags, SymbolKind, SymbolScope};
use std::path::{Path, PathBuf};

struct Def {
    name: &'static str,
    value: u64,
    size: u64,
    kind: SymbolKind,
    scope: SymbolScope,
    weak: bool,
}

const DEFS: &[Def] = &[
    Def { name: "rtems_task_create", value: 0x10, size: 8, kind: SymbolKind::Text, scope: SymbolScope::Dynamic, weak: false },
    Def { name: "_ZN3rtl4initEv", value: 0x20, size: 4, kind: SymbolKind::Text, scope: SymbolScope::Dynamic, weak: false },
    Def { name: "weak_hook", value: 0, size: 0, kind: SymbolKind::Text, scope: SymbolScope::Dynamic, weak: true },
    Def { name: "local_helper", value: 0x30, size: 4, kind: SymbolKind::Text, scope: SymbolScope::Compilation, weak: false },
    Def { name: "rtems_config", value: 0x8, size: 8, kind: SymbolKind::Data, scope: SymbolScope::Dynamic, weak: false },
    Def { name: "errno_tls", value: 0, size: 4, kind: SymbolKind::Tls, scope: SymbolScope::Dynamic, weak: false },
];

/// A small ARM ELF object standing in for a kernel image.
pub fn kernel_image() -> Vec<u8> {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::Arm, Endianness::Little);
    let text = obj.section_id(StandardSection::Text);
    obj.append_section_data(text, &[0u8; 0x40], 4);
    let data = obj.section_id(StandardSection::Data);
    obj.append_section_data(data, &[0u8; 0x20], 4);
    let tls = obj.section_id(StandardSection::Tls);
    obj.append_section_data(tls, &[0u8; 0x8], 4);

    for def in DEFS {
        let section = match def.kind {
            SymbolKind::Data => data,
            SymbolKind::Tls => tls,
            _ => text,
        };
        obj.add_symbol(Symbol {
            name: def.name.as_bytes().to_vec(),
            value: def.value,
            size: def.size,
            kind: def.kind,
            scope: def.scope,
            weak: def.weak,
            section: SymbolSection::Section(section),
            flags: SymbolFlags::None,
        });
    }
    obj.write().expect("write kernel fixture")
}

pub fn write_kernel(dir: &Path) -> PathBuf {
    let path = dir.join("kernel.o");
    std::fs::write(&path, kernel_image()).expect("write kernel fixture");
    path
}
