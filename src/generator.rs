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

//! C source generation for the base image global symbol table.
//!
//! The table is laid out with `asm()` statements so the compiler emits the
//! bytes verbatim into `.rodata`:
//!
//! ```text
//! rtems__rtl_base_globals:
//!     .asciz "name"          one entry per symbol
//!     .quad / .long value    pointer sized
//!     ...
//!     .byte 0
//!     .ascii "\xde\xad\xbe\xef"
//! rtems__rtl_base_globals_size:
//!     .long rtems__rtl_base_globals_size - rtems__rtl_base_globals
//! ```
//!
//! followed by an initialiser that hands the table to the runtime loader.

use crate::symbols::{Symbol, SymbolTable};

/// How symbol values are written into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Resolved addresses from the kernel image, registered by a constructor.
    #[default]
    Linked,
    /// Symbol references resolved when the table is linked into the image,
    /// registered by an explicitly called init function.
    Embedded,
}

/// Runtime loader entry point that receives the table.
pub const REGISTER_FUNCTION: &str = "rtems_rtl_base_sym_global_add";

/// Init function the embedding environment calls in [`GenerationMode::Embedded`].
pub const EMBEDDED_INIT_FUNCTION: &str = "rtems_rtl_base_global_syms_init";

const HEADER: &[&str] = &[
    "/*",
    " * RTEMS Global Symbol Table",
    " *  Automatically generated. Do not edit..",
    " */",
    "",
    "extern const unsigned char rtems__rtl_base_globals[];",
    "extern const unsigned int rtems__rtl_base_globals_size[];",
    "",
];

const TABLE_START: &[&str] = &[
    "",
    r#"asm(".section \".rodata\"");"#,
    "",
    r#"asm("  .align   4");"#,
    r#"asm("  .local   rtems__rtl_base_globals");"#,
    r#"asm("rtems__rtl_base_globals:");"#,
    "#if __mips__",
    r#" asm("  .align 0");"#,
    "#else",
    r#" asm("  .balign 1");"#,
    "#endif",
];

const TRAILER: &[&str] = &[
    r#"asm("  .byte    0");"#,
    r#"asm("  .ascii   \"\xde\xad\xbe\xef\"");"#,
    "",
    "/*",
    " * Symbol table size.",
    " */",
    r#"asm("  .align   4");"#,
    r#"asm("  .local   rtems__rtl_base_globals_size");"#,
    r#"asm("rtems__rtl_base_globals_size:");"#,
    r#"asm("  .long rtems__rtl_base_globals_size - rtems__rtl_base_globals");"#,
    "",
];


fn paint(out: &mut String, lines: &[&str]) {
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}

/// Emit the pointer sized value slot, choosing `.quad` or `.long` when the
/// source is compiled.
fn paint_value(out: &mut String, value: &str) {
    out.push_str("#if __SIZEOF_POINTER__ == 8\n");
    out.push_str(&format!("asm(\"  .quad {value}\");\n"));
    out.push_str("#else\n");
    out.push_str(&format!("asm(\"  .long {value}\");\n"));
    out.push_str("#endif\n");
}

/// Call handing the table to [`REGISTER_FUNCTION`].
fn paint_register(out: &mut String) {
    let indent = REGISTER_FUNCTION.len() + 4;
    out.push_str("{\n");
    out.push_str(&format!(
        "  {REGISTER_FUNCTION} (&rtems__rtl_base_globals[0],\n"
    ));
    out.push_str(&format!(
        "{:indent$}rtems__rtl_base_globals_size[0]);\n",
        ""
    ));
    out.push_str("}\n");
}

/// Weak symbols without a value are unresolved externs and carry nothing
/// a loader can use.
pub fn is_emitted(sym: &Symbol) -> bool {
    !(sym.is_weak() && sym.address == 0)
}

/// Source for one table entry, empty if the symbol is skipped.
pub fn emit_symbol(sym: &Symbol, mode: GenerationMode) -> String {
    let mut out = String::new();
    if !is_emitted(sym) {
        return out;
    }

    out.push_str(&format!("asm(\"  .asciz \\\"{}\\\"\");\n", sym.name));

    if sym.is_tls() {
        out.push_str(&format!(
            "asm(\"  .type \\\"{}\\\", %tls_object\");\n",
            sym.name
        ));
    }

    match mode {
        GenerationMode::Embedded => paint_value(&mut out, &sym.name),
        GenerationMode::Linked => paint_value(&mut out, &format!("0x{:08x}", sym.address)),
    }
    out
}

/// The complete C source for `symbols`.
pub fn generate(symbols: &SymbolTable, mode: GenerationMode) -> String {
    let mut out = String::new();
    paint(&mut out, HEADER);
    out.push_str(&format!(
        "void {REGISTER_FUNCTION} (const unsigned char* , unsigned int );\n"
    ));
    paint(&mut out, TABLE_START);

    // Weak symbols linked into the base image are no longer weak; they are
    // emitted as globals and cannot be redefined by a loaded module.
    for sym in symbols.iter() {
        out.push_str(&emit_symbol(sym, mode));
    }

    paint(&mut out, TRAILER);

    match mode {
        GenerationMode::Linked => {
            out.push_str("static void init(void) __attribute__ ((constructor));\n");
            out.push_str("static void init(void)\n");
        }
        GenerationMode::Embedded => {
            out.push_str(&format!("void {EMBEDDED_INIT_FUNCTION}(void);\n"));
            out.push_str(&format!("void {EMBEDDED_INIT_FUNCTION}(void)\n"));
        }
    }
    paint_register(&mut out);
    out
}
