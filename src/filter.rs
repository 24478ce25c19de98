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

//! Selects symbols by matching their demangled names against regular
//! expressions. A symbol is kept if any expression matches the whole name.

use crate::error::{PatternError, SymsError};
use crate::symbols::SymbolTable;
use log::debug;
use regex::Regex;
use std::fs;
use std::path::Path;

struct Expression {
    source: String,
    re: Regex,
}

#[derive(Default)]
pub struct SymbolFilter {
    expressions: Vec<Expression>,
}

impl SymbolFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load whitespace separated expressions from a file.
    pub fn load(&mut self, path: &Path) -> Result<(), SymsError> {
        let text = fs::read_to_string(path).map_err(|source| SymsError::FilterFile {
            path: path.to_path_buf(),
            source,
        })?;
        for token in text.split_whitespace() {
            self.add(token)?;
        }
        Ok(())
    }

    pub fn add(&mut self, pattern: &str) -> Result<(), PatternError> {
        let pattern_err = |source: regex::Error| PatternError {
            pattern: pattern.to_string(),
            source,
        };
        // Checked on its own first so an unbalanced group cannot escape
        // the anchors below.
        Regex::new(pattern).map_err(pattern_err)?;
        // Anchored so the expression has to match the whole name.
        let re = Regex::new(&format!("^(?:{pattern})$")).map_err(pattern_err)?;
        debug!("filter expression: {pattern}");
        self.expressions.push(Expression {
            source: pattern.to_string(),
            re,
        });
        Ok(())
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.expressions.iter().map(|e| e.source.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Add every symbol of `symbols` selected by the filter to `filtered`.
    /// With no expressions every symbol is selected.
    pub fn filter(&self, symbols: &SymbolTable, filtered: &mut SymbolTable) {
        if self.expressions.is_empty() {
            for sym in symbols.iter() {
                filtered.insert_shared(sym.clone());
            }
            return;
        }
        for expr in &self.expressions {
            for sym in symbols.iter() {
                if expr.re.is_match(&sym.demangled) {
                    filtered.insert_shared(sym.clone());
                }
            }
        }
    }

    pub fn apply(&self, symbols: &SymbolTable) -> SymbolTable {
        let mut filtered = SymbolTable::new();
        self.filter(symbols, &mut filtered);
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol;
    use std::io::Write;
    use std::sync::Arc;

    fn kernel_symbols() -> SymbolTable {
        [
            Symbol::new("foo", 0x1000, 4),
            Symbol::new("foobar", 0x1100, 4),
            Symbol::new("bar", 0x2000, 8),
            Symbol::new("_ZN3rtl4initEv", 0x3000, 16).with_demangled("rtl::init()"),
        ]
        .into_iter()
        .collect()
    }

    fn names(table: &SymbolTable) -> Vec<&str> {
        table.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let symbols = kernel_symbols();
        let filtered = SymbolFilter::new().apply(&symbols);
        assert_eq!(filtered, symbols);
    }

    #[test]
    fn whole_name_match_only() {
        let mut filter = SymbolFilter::new();
        filter.add("foo").unwrap();
        let filtered = filter.apply(&kernel_symbols());
        assert_eq!(names(&filtered), ["foo"]);
    }

    #[test]
    fn expressions_are_a_union() {
        let mut filter = SymbolFilter::new();
        filter.add("foo.*").unwrap();
        filter.add("bar").unwrap();
        filter.add("foo").unwrap();
        let filtered = filter.apply(&kernel_symbols());
        assert_eq!(names(&filtered), ["bar", "foo", "foobar"]);
    }

    #[test]
    fn matches_demangled_name() {
        let mut filter = SymbolFilter::new();
        filter.add(r"rtl::.*").unwrap();
        let filtered = filter.apply(&kernel_symbols());
        assert_eq!(names(&filtered), ["_ZN3rtl4initEv"]);

        let mut filter = SymbolFilter::new();
        filter.add("_ZN.*").unwrap();
        assert!(filter.apply(&kernel_symbols()).is_empty());
    }

    #[test]
    fn filtered_symbols_are_shared() {
        let symbols = kernel_symbols();
        let mut filter = SymbolFilter::new();
        filter.add("bar").unwrap();
        let filtered = filter.apply(&symbols);
        let original = symbols.iter().find(|s| s.name == "bar").unwrap();
        let selected = filtered.iter().next().unwrap();
        assert!(Arc::ptr_eq(original, selected));
    }

    #[test]
    fn bad_pattern_is_reported() {
        let mut filter = SymbolFilter::new();
        let err = filter.add("foo(").unwrap_err();
        assert_eq!(err.pattern, "foo(");
        assert!(filter.is_empty());
    }

    #[test]
    fn load_splits_on_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "foo  bar\n\trtl::.*").unwrap();
        let mut filter = SymbolFilter::new();
        filter.load(file.path()).unwrap();
        assert_eq!(filter.patterns().collect::<Vec<_>>(), ["foo", "bar", "rtl::.*"]);
        assert_eq!(filter.apply(&kernel_symbols()).len(), 3);
    }

    #[test]
    fn unbalanced_groups_are_rejected() {
        let mut filter = SymbolFilter::new();
        assert!(filter.add("a)(").is_err());
        let err = filter.add("foo)|(bar").unwrap_err();
        assert_eq!(err.pattern, "foo)|(bar");
        assert!(filter.is_empty());
    }

    #[test]
    fn alternation_matches_whole_names() {
        let symbols: SymbolTable = [
            Symbol::new("foozzz", 0x1000, 4),
            Symbol::new("xxbar", 0x2000, 4),
            Symbol::new("bar", 0x3000, 4),
        ]
        .into_iter()
        .collect();
        let mut filter = SymbolFilter::new();
        filter.add("foo|bar").unwrap();
        assert_eq!(names(&filter.apply(&symbols)), ["bar"]);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut filter = SymbolFilter::new();
        let err = filter.load(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, SymsError::FilterFile { .. }));
    }

    #[test]
    fn load_reports_bad_pattern() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ok [broken").unwrap();
        let mut filter = SymbolFilter::new();
        match filter.load(file.path()) {
            Err(SymsError::Pattern(e)) => assert_eq!(e.pattern, "[broken"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
