// Crate root: declare modules and control visibility
pub mod address_index;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod elf_items;
pub mod error;
pub mod filter;
pub mod generator;
pub mod logging;
pub mod map_file;
pub mod pipeline;
pub mod scratch;
pub mod symbols;

// Re-export commonly used API from the library for binaries/tests
pub use address_index::SymbolIndex;
pub use filter::SymbolFilter;
pub use generator::{generate, GenerationMode};
pub use symbols::{Symbol, SymbolTable};
