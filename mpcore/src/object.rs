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

//! C7 — binary encode/decode of the relocatable object artifact. Layout
//! is fixed by spec §6: a 3-byte magic, a version byte, a 16-bit
//! `link_base` (`0xFFFF` meaning absent), an ordered symbol-name table,
//! then one machine-code/relocation record per defined symbol.

use crate::errors::ErrorKind;
use crate::symbol_store::{Relocation, SymbolRecord, SymbolStore};
use crate::symbol_table::SymbolTable;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::Serialize;
use std::io::{Read, Write};

const MAGIC: &[u8; 3] = b"MPO";
const CURRENT_VERSION: u8 = 1;
const LINK_BASE_ABSENT: u16 = 0xFFFF;

/// The in-memory view of an artifact. `Serialize`-only: this is the
/// `--dump`/`--dump-symbols` JSON side channel (see `DESIGN.md`), never
/// a load path — the binary layout below remains the one format any
/// artifact is read back from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectFile {
    pub version: u8,
    pub link_base: Option<u16>,
    pub symbol_table: SymbolTable,
    pub symbol_store: SymbolStore,
}

impl ObjectFile {
    pub fn new(link_base: Option<u16>, symbol_table: SymbolTable, symbol_store: SymbolStore) -> Self {
        Self {
            version: CURRENT_VERSION,
            link_base,
            symbol_table,
            symbol_store,
        }
    }
}

fn eof_to_kind(e: std::io::Error) -> ErrorKind {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        ErrorKind::UnexpectedEof
    } else {
        ErrorKind::CorruptObjFile(e.to_string())
    }
}

pub fn write<W: Write>(writer: &mut W, obj: &ObjectFile) -> std::io::Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_u8(obj.version)?;
    writer.write_u16::<LittleEndian>(obj.link_base.unwrap_or(LINK_BASE_ABSENT))?;

    // on-disk symtab excludes the reserved sentinel at index 0.
    let names: Vec<(u16, &str)> = obj.symbol_table.iter().collect();
    writer.write_u16::<LittleEndian>(names.len() as u16)?;
    for (_, name) in &names {
        writer.write_u8(name.len() as u8)?;
        writer.write_all(name.as_bytes())?;
    }

    for (_, name) in &names {
        match obj.symbol_store.get(name) {
            Some(record) => {
                writer.write_u16::<LittleEndian>(record.machine_code.len() as u16)?;
                writer.write_all(&record.machine_code)?;
                writer.write_u16::<LittleEndian>(record.relocation_table.len() as u16)?;
                for reloc in &record.relocation_table {
                    writer.write_u16::<LittleEndian>(reloc.machine_code_offset)?;
                    writer.write_u16::<LittleEndian>(reloc.symbol_index)?;
                }
            }
            // external reference: zero-length machine code, no relocations.
            None => {
                writer.write_u16::<LittleEndian>(0)?;
            }
        }
    }
    Ok(())
}

pub fn read<R: Read>(reader: &mut R) -> Result<ObjectFile, ErrorKind> {
    let mut magic = [0u8; 3];
    reader.read_exact(&mut magic).map_err(eof_to_kind)?;
    if &magic != MAGIC {
        return Err(ErrorKind::NotObjFile);
    }

    let version = reader.read_u8().map_err(eof_to_kind)?;
    if version > CURRENT_VERSION {
        return Err(ErrorKind::IncompatibleObjFileVersion(version));
    }

    let raw_link_base = reader.read_u16::<LittleEndian>().map_err(eof_to_kind)?;
    let link_base = if raw_link_base == LINK_BASE_ABSENT {
        None
    } else {
        Some(raw_link_base)
    };

    let mut symbol_table = SymbolTable::new();
    let count = reader.read_u16::<LittleEndian>().map_err(eof_to_kind)?;
    let mut ordered_names = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = reader.read_u8().map_err(eof_to_kind)? as usize;
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).map_err(eof_to_kind)?;
        let name = String::from_utf8(buf)
            .map_err(|e| ErrorKind::CorruptObjFile(format!("non-utf8 symbol name: {e}")))?;
        symbol_table.index(&name);
        ordered_names.push(name);
    }

    let mut symbol_store = SymbolStore::new();
    for name in &ordered_names {
        let mc_size = reader.read_u16::<LittleEndian>().map_err(eof_to_kind)?;
        if mc_size == 0 {
            // external reference: present in the table, absent from the store.
            continue;
        }
        let mut machine_code = vec![0u8; mc_size as usize];
        reader.read_exact(&mut machine_code).map_err(eof_to_kind)?;
        let reloc_count = reader.read_u16::<LittleEndian>().map_err(eof_to_kind)?;
        let mut relocation_table = Vec::with_capacity(reloc_count as usize);
        for _ in 0..reloc_count {
            let offset = reader.read_u16::<LittleEndian>().map_err(eof_to_kind)?;
            let symbol_index = reader.read_u16::<LittleEndian>().map_err(eof_to_kind)?;
            relocation_table.push(Relocation {
                machine_code_offset: offset,
                symbol_index,
            });
        }
        symbol_store.insert(
            name.clone(),
            SymbolRecord {
                // proc_index is not persisted on disk: it only matters
                // while a single file is being assembled. Linked
                // artifacts have no notion of "current procedure".
                proc_index: 0,
                machine_code,
                relocation_table,
                machine_code_base: None,
            },
        );
    }

    Ok(ObjectFile {
        version,
        link_base,
        symbol_table,
        symbol_store,
    })
}
