/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! C3 — the ordered symbol table. Index 0 is always the reserved
//! global-procedure sentinel; the on-disk form (see `crate::object`)
//! excludes it and the codec adds/strips it at the load/write boundary.
//! Keeping the sentinel present uniformly — both while the assembler is
//! building a single file's table and in the linker's fresh global
//! table — avoids the index-0 collision spec.md §9's Open Question
//! warns about (see DESIGN.md).

use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    /// index 0 is always `None` (the sentinel); real names start at 1.
    names: Vec<Option<String>>,
    /// name -> index cache, rebuildable from `names`; omitted from the
    /// `--dump` JSON rendering (see `casm`/`clink`) since it's redundant.
    #[serde(skip)]
    index: HashMap<String, u16>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            names: vec![None],
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.len() <= 1
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the existing index, or inserts `name` at the next free
    /// position and returns that.
    pub fn index(&mut self, name: &str) -> u16 {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len() as u16;
        self.names.push(Some(name.to_string()));
        self.index.insert(name.to_string(), i);
        i
    }

    /// Alias for `index` — inserts `name` if it is not already present.
    pub fn add(&mut self, name: &str) -> u16 {
        self.index(name)
    }

    pub fn name_of(&self, i: u16) -> Option<&str> {
        self.names.get(i as usize).and_then(|n| n.as_deref())
    }

    /// Removes `name` from the table, shifting every entry above it down
    /// by one. Returns the index the name previously occupied, so the
    /// caller can re-index relocations and proc indices that referenced
    /// it (see `crate::symbol_store::SymbolStore::reindex_after_removal`).
    pub fn remove(&mut self, name: &str) -> Option<u16> {
        let old_index = self.index.remove(name)?;
        self.names.remove(old_index as usize);
        for (n, idx) in self.index.iter_mut() {
            if *idx > old_index {
                *idx -= 1;
            }
            let _ = n;
        }
        Some(old_index)
    }

    /// Re-appends `name` at the current end of the table — used by the
    /// driver (spec §4.6) to move a forward-referenced symbol to its
    /// definition point so table order matches definition order (I4).
    pub fn move_to_end(&mut self, name: &str) -> Option<(u16, u16)> {
        let old = self.remove(name)?;
        let new = self.index(name);
        Some((old, new))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_deref().map(|n| (i as u16, n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_is_sentinel() {
        let table = SymbolTable::new();
        assert_eq!(table.name_of(0), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn index_inserts_and_is_idempotent() {
        let mut table = SymbolTable::new();
        let i = table.index("main");
        assert_eq!(i, 1);
        assert_eq!(table.index("main"), 1);
        assert_eq!(table.name_of(1), Some("main"));
    }

    #[test]
    fn remove_and_reappend_preserves_other_indices_relative_order() {
        let mut table = SymbolTable::new();
        table.index("loop"); // 1 (forward reference)
        table.index("main"); // 2
        let (old, new) = table.move_to_end("loop").unwrap();
        assert_eq!(old, 1);
        assert_eq!(new, 2);
        assert_eq!(table.name_of(1), Some("main"));
        assert_eq!(table.name_of(2), Some("loop"));
    }
}
