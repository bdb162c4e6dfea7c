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

//! C4 — the symbol store: machine code and deferred relocations for
//! every *defined* symbol, keyed by name. A use-only reference lives in
//! the symbol table (C3) but has no record here until it is defined.

use crate::symbol_table::SymbolTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A deferred patch: write the absolute address of `symbol_index` as two
/// little-endian bytes at `machine_code_offset` within the owning
/// symbol's machine code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relocation {
    pub machine_code_offset: u16,
    pub symbol_index: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub proc_index: u16,
    pub machine_code: Vec<u8>,
    pub relocation_table: Vec<Relocation>,
    pub machine_code_base: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolStore {
    records: HashMap<String, SymbolRecord>,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SymbolRecord> {
        self.records.get_mut(name)
    }

    /// Creates a fresh, empty record for `name`, owned by `proc_name`
    /// (or the global sentinel if `proc_name` is `None`).
    pub fn add(&mut self, table: &mut SymbolTable, name: &str, proc_name: Option<&str>) -> &mut SymbolRecord {
        let proc_index = match proc_name {
            Some(p) => table.index(p),
            None => 0,
        };
        self.records.entry(name.to_string()).or_insert(SymbolRecord {
            proc_index,
            machine_code: Vec::new(),
            relocation_table: Vec::new(),
            machine_code_base: None,
        })
    }

    pub fn remove(&mut self, name: &str) -> Option<SymbolRecord> {
        self.records.remove(name)
    }

    pub fn insert(&mut self, name: String, record: SymbolRecord) {
        self.records.insert(name, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Walks every relocation and every `proc_index` in the store,
    /// decrementing any reference above `removed_index` by one. Used
    /// after `SymbolTable::remove`/`move_to_end` shifts the table (spec
    /// §4.6, §4.8) so every existing record keeps pointing at the right
    /// entry.
    pub fn reindex_after_removal(&mut self, removed_index: u16) {
        for record in self.records.values_mut() {
            if record.proc_index > removed_index {
                record.proc_index -= 1;
            }
            for reloc in record.relocation_table.iter_mut() {
                if reloc.symbol_index > removed_index {
                    reloc.symbol_index -= 1;
                }
            }
        }
    }

    /// Same as `reindex_after_removal` but for a record that was
    /// removed then re-appended at a new index (spec §4.6): every
    /// reference that used to point at `old_index` now points at
    /// `new_index`, and everything in between shifts down by one.
    pub fn reindex_after_move(&mut self, old_index: u16, new_index: u16) {
        for record in self.records.values_mut() {
            record.proc_index = remap_moved(record.proc_index, old_index, new_index);
            for reloc in record.relocation_table.iter_mut() {
                reloc.symbol_index = remap_moved(reloc.symbol_index, old_index, new_index);
            }
        }
    }
}

fn remap_moved(idx: u16, old_index: u16, new_index: u16) -> u16 {
    if idx == old_index {
        new_index
    } else if idx > old_index && idx <= new_index {
        idx - 1
    } else {
        idx
    }
}
