//! Declared-name table used by the semantic checker
//!
//! Names map to a stack of [`Symbol`] records. Inserting never rejects a
//! duplicate; it pushes a new record that shadows the older ones, and
//! [`SymbolTable::lookup`] always answers with the most recent record.
//!
//! The table is created with a fixed bucket count. Storage itself is an
//! [`FxHashMap`], but [`SymbolTable::bucket_index`] keeps the classic
//! `hash * 32 + byte` polynomial hash so that the diagnostic dump groups
//! names the same way for a given table size on every run.

use rustc_hash::FxHashMap;
use std::fmt;

/// What a declared name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Function => write!(f, "function"),
        }
    }
}

/// One declaration record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Line of the declaring statement; 0 for names declared outside the source
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: FxHashMap<String, Vec<Symbol>>,
    bucket_count: usize,
    len: usize,
}

impl SymbolTable {
    /// Create an empty table. A bucket count of zero is treated as one.
    pub fn new(bucket_count: usize) -> Self {
        Self {
            symbols: FxHashMap::default(),
            bucket_count: bucket_count.max(1),
            len: 0,
        }
    }

    /// Record a declaration of `name`, shadowing any earlier one.
    pub fn insert(&mut self, name: &str, kind: SymbolKind, line: usize) -> &Symbol {
        self.len += 1;
        let stack = self.symbols.entry(name.to_string()).or_default();
        stack.push(Symbol {
            name: name.to_string(),
            kind,
            line,
        });
        &stack[stack.len() - 1]
    }

    /// Most recently inserted record for `name`
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name).and_then(|stack| stack.last())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Polynomial rolling hash of the name's bytes, reduced to a bucket.
    pub fn bucket_index(&self, name: &str) -> usize {
        let hash = name
            .bytes()
            .fold(0usize, |hash, byte| hash.wrapping_mul(32).wrapping_add(byte as usize));
        hash % self.bucket_count
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Number of records, counting shadowed ones
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every record, newest first within each name, in unspecified name order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values().flat_map(|stack| stack.iter().rev())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(crate::constants::SYMBOL_TABLE_BUCKETS)
    }
}

impl fmt::Display for SymbolTable {
    /// Buckets in ascending order; within a bucket, names sorted and records
    /// newest first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buckets: Vec<(usize, &str)> = self
            .symbols
            .keys()
            .map(|name| (self.bucket_index(name), name.as_str()))
            .collect();
        buckets.sort_unstable();

        let mut current = None;
        for (bucket, name) in buckets {
            if current != Some(bucket) {
                writeln!(f, "Bucket {}:", bucket)?;
                current = Some(bucket);
            }
            for symbol in self.symbols[name].iter().rev() {
                writeln!(
                    f,
                    "  Name: {}, Kind: {}, Line: {}",
                    symbol.name, symbol.kind, symbol.line
                )?;
            }
        }
        Ok(())
    }
}
