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

//! C8 — the linker. Loads a list of object artifacts, resolves
//! cross-artifact symbol references, assigns a layout, patches
//! relocations, and emits either a loadable image (`main` present) or a
//! new combined library artifact (`main` absent) — spec §4.8.

use crate::file_reader::FileReader;
use log::debug;
use mpcore::{ErrorKind, ObjectFile, Relocation, SymbolRecord, SymbolStore, SymbolTable};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One error raised during linking. Unlike the assembler's per-line
/// `Diagnostic`, linker errors are anchored to an artifact file name (or
/// nothing, for whole-link errors like an ambiguous `main`) rather than
/// a source line — mirroring the teacher's `show_error(error,
/// obj_file_name)` in the Python original.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDiagnostic {
    pub context: Option<String>,
    pub kind: ErrorKind,
}

impl LinkDiagnostic {
    fn new(context: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            context: Some(context.into()),
            kind,
        }
    }

    fn global(kind: ErrorKind) -> Self {
        Self { context: None, kind }
    }
}

impl std::fmt::Display for LinkDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{ctx}: error: {}", self.kind),
            None => write!(f, "error: {}", self.kind),
        }
    }
}

pub enum LinkMode {
    Image { output_name: String, bytes: Vec<u8> },
    Library { output_name: String, bytes: Vec<u8> },
}

pub struct LinkOutput {
    pub diagnostics: Vec<LinkDiagnostic>,
    pub mode: Option<LinkMode>,
}

impl LinkOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

struct Artifact {
    file_name: String,
    object: ObjectFile,
}

/// Names defined (own a machine-code record) in `obj`, in table-index
/// order — which is definition order (I4) — skipping the sentinel at
/// index 0 and any name present only as an external reference.
fn ordered_defined_symbols(obj: &ObjectFile) -> Vec<String> {
    obj.symbol_table
        .iter()
        .filter(|(_, name)| obj.symbol_store.has(name))
        .map(|(_, name)| name.to_string())
        .collect()
}

pub fn link(paths: &[String], reader: &dyn FileReader) -> LinkOutput {
    let mut diagnostics = Vec::new();
    let artifacts = load_artifacts(paths, reader, &mut diagnostics);

    let main_owners: Vec<usize> = artifacts
        .iter()
        .enumerate()
        .filter(|(_, a)| a.object.symbol_store.has("main"))
        .map(|(i, _)| i)
        .collect();

    if main_owners.len() > 1 {
        diagnostics.push(LinkDiagnostic::global(ErrorKind::DuplicateSymbol("main".to_string())));
        return LinkOutput { diagnostics, mode: None };
    }

    // every artifact that defines a given name, used to detect a name
    // defined in more than one input artifact (spec §4.8 step 5).
    let mut owners_of: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, a) in artifacts.iter().enumerate() {
        for (_, name) in a.object.symbol_table.iter() {
            if a.object.symbol_store.has(name) {
                owners_of.entry(name).or_default().push(i);
            }
        }
    }

    let link_order: Vec<(usize, String)> = if let Some(&main_idx) = main_owners.first() {
        let mut order = vec![(main_idx, "main".to_string())];
        for name in ordered_defined_symbols(&artifacts[main_idx].object) {
            if name != "main" {
                order.push((main_idx, name));
            }
        }
        for (i, artifact) in artifacts.iter().enumerate() {
            if i == main_idx {
                continue;
            }
            for name in ordered_defined_symbols(&artifact.object) {
                order.push((i, name));
            }
        }
        order
    } else {
        artifacts
            .iter()
            .enumerate()
            .flat_map(|(i, artifact)| ordered_defined_symbols(&artifact.object).into_iter().map(move |n| (i, n)))
            .collect()
    };

    let mut global_table = SymbolTable::new();
    let mut global_store = SymbolStore::new();
    let mut link_base: Option<u16> = None;
    let mut link_offset: u16 = 0;
    let mut reconciled: HashSet<usize> = HashSet::new();
    let mut linked_order: Vec<String> = Vec::new();

    for (artifact_idx, name) in link_order {
        if global_store.has(&name) {
            continue;
        }

        let owners = owners_of.get(name.as_str()).cloned().unwrap_or_default();
        if owners.len() > 1 {
            diagnostics.push(LinkDiagnostic::new(
                artifacts[artifact_idx].file_name.clone(),
                ErrorKind::AmbiguousSymbol(name.clone()),
            ));
            continue;
        }

        let artifact = &artifacts[artifact_idx];
        if reconciled.insert(artifact_idx) {
            if let Some(candidate) = artifact.object.link_base {
                match link_base {
                    None => link_base = Some(candidate),
                    Some(existing) if existing != candidate => {
                        diagnostics.push(LinkDiagnostic::new(artifact.file_name.clone(), ErrorKind::AmbiguousLinkBase));
                    }
                    _ => {}
                }
            }
        }

        let local_record = artifact
            .object
            .symbol_store
            .get(&name)
            .expect("name came from this artifact's own defined symbols");

        let relocation_table: Vec<Relocation> = local_record
            .relocation_table
            .iter()
            .map(|r| {
                let target_name = artifact
                    .object
                    .symbol_table
                    .name_of(r.symbol_index)
                    .expect("relocation symbol_index is valid in its owning table (I2)");
                Relocation {
                    machine_code_offset: r.machine_code_offset,
                    symbol_index: global_table.index(target_name),
                }
            })
            .collect();

        global_table.index(&name);
        let base = link_offset;
        link_offset += local_record.machine_code.len() as u16;
        debug!("link: {name} <- {} at base {base:#06X}", artifact.file_name);

        global_store.insert(
            name.clone(),
            SymbolRecord {
                proc_index: 0,
                machine_code: local_record.machine_code.clone(),
                relocation_table,
                machine_code_base: Some(base),
            },
        );
        linked_order.push(name);
    }

    if !diagnostics.is_empty() {
        return LinkOutput { diagnostics, mode: None };
    }

    let mode = if let Some(&main_idx) = main_owners.first() {
        match emit_image(&linked_order, &global_table, &global_store, link_base, &mut diagnostics) {
            Some(bytes) => Some(LinkMode::Image {
                output_name: cpu_output_name(&artifacts[main_idx].file_name),
                bytes,
            }),
            None => None,
        }
    } else {
        let obj = ObjectFile::new(link_base, global_table, global_store);
        let mut bytes = Vec::new();
        mpcore::object::write(&mut bytes, &obj).expect("in-memory write is infallible");
        Some(LinkMode::Library {
            output_name: "output.obj".to_string(),
            bytes,
        })
    };

    LinkOutput { diagnostics, mode }
}

fn emit_image(
    linked_order: &[String],
    global_table: &SymbolTable,
    global_store: &SymbolStore,
    link_base: Option<u16>,
    diagnostics: &mut Vec<LinkDiagnostic>,
) -> Option<Vec<u8>> {
    let mut image = Vec::new();
    for name in linked_order {
        image.extend(&global_store.get(name).expect("just linked").machine_code);
    }

    let base = link_base.unwrap_or(0);
    for name in linked_order {
        let record = global_store.get(name).expect("just linked");
        let symbol_base = record.machine_code_base.expect("assigned during linking") as usize;
        for reloc in &record.relocation_table {
            let target_name = global_table.name_of(reloc.symbol_index).unwrap_or("");
            let Some(target) = global_store.get(target_name) else {
                diagnostics.push(LinkDiagnostic::global(ErrorKind::UnknownSymbol(target_name.to_string())));
                continue;
            };
            let addr = base.wrapping_add(target.machine_code_base.expect("linked target has a base"));
            let at = symbol_base + reloc.machine_code_offset as usize;
            image[at..at + 2].copy_from_slice(&addr.to_le_bytes());
        }
    }

    if diagnostics.is_empty() {
        Some(image)
    } else {
        None
    }
}

fn cpu_output_name(main_artifact_path: &str) -> String {
    let stem = Path::new(main_artifact_path).file_stem().unwrap_or_default();
    let mut out = std::path::PathBuf::from(stem);
    out.set_extension("cpu");
    out.to_string_lossy().to_string()
}

fn load_artifacts(paths: &[String], reader: &dyn FileReader, diagnostics: &mut Vec<LinkDiagnostic>) -> Vec<Artifact> {
    let mut seen = HashSet::new();
    let mut artifacts = Vec::new();

    for path in paths {
        if !seen.insert(path.clone()) {
            diagnostics.push(LinkDiagnostic::new(path.clone(), ErrorKind::DuplicateObjFile(path.clone())));
            continue;
        }

        let bytes = match reader.read_bytes(Path::new(path)) {
            Ok(b) => b,
            Err(_) => {
                diagnostics.push(LinkDiagnostic::new(path.clone(), ErrorKind::FileNotFound(path.clone())));
                continue;
            }
        };

        match mpcore::object::read(&mut &bytes[..]) {
            Ok(object) => artifacts.push(Artifact {
                file_name: path.clone(),
                object,
            }),
            Err(kind) => diagnostics.push(LinkDiagnostic::new(path.clone(), kind)),
        }
    }

    artifacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_reader::MockFileReader;
    use mpcore::{Relocation, SymbolRecord, SymbolStore, SymbolTable};

    fn obj_bytes(link_base: Option<u16>, symbols: &[(&str, Vec<u8>, Vec<Relocation>)], externals: &[&str]) -> Vec<u8> {
        let mut table = SymbolTable::new();
        let mut store = SymbolStore::new();
        for (name, code, relocs) in symbols {
            table.index(name);
            store.insert(
                name.to_string(),
                SymbolRecord {
                    proc_index: 0,
                    machine_code: code.clone(),
                    relocation_table: relocs.clone(),
                    machine_code_base: None,
                },
            );
        }
        for name in externals {
            table.index(name);
        }
        let obj = ObjectFile::new(link_base, table, store);
        let mut bytes = Vec::new();
        mpcore::object::write(&mut bytes, &obj).unwrap();
        bytes
    }

    #[test]
    fn two_artifacts_link_call_across_files() {
        let mut reader = MockFileReader::default();
        reader.add_file(
            "main.obj",
            obj_bytes(
                Some(0x1000),
                &[(
                    "main",
                    vec![0xD1, 0x00, 0x00],
                    vec![Relocation {
                        machine_code_offset: 1,
                        symbol_index: 2,
                    }],
                )],
                &["helper"],
            ),
        );
        reader.add_file("helper.obj", obj_bytes(None, &[("helper", vec![0x05], vec![])], &[]));

        let out = link(&["main.obj".to_string(), "helper.obj".to_string()], &reader);
        assert!(!out.has_errors(), "{:?}", out.diagnostics);
        let LinkMode::Image { bytes, output_name } = out.mode.expect("image mode") else {
            panic!("expected image mode");
        };
        assert_eq!(output_name, "main.cpu");
        assert_eq!(bytes.len(), 4);
        let patched = u16::from_le_bytes([bytes[1], bytes[2]]);
        assert_eq!(patched, 0x1000 + 3); // helper_base == len(main.code)
    }

    #[test]
    fn no_main_symbol_produces_library_artifact() {
        let mut reader = MockFileReader::default();
        reader.add_file("a.obj", obj_bytes(None, &[("util", vec![0x00], vec![])], &[]));

        let out = link(&["a.obj".to_string()], &reader);
        assert!(!out.has_errors());
        assert!(matches!(out.mode, Some(LinkMode::Library { .. })));
    }

    #[test]
    fn duplicate_main_symbol_is_ambiguous() {
        let mut reader = MockFileReader::default();
        reader.add_file("a.obj", obj_bytes(None, &[("main", vec![0x00], vec![])], &[]));
        reader.add_file("b.obj", obj_bytes(None, &[("main", vec![0x00], vec![])], &[]));

        let out = link(&["a.obj".to_string(), "b.obj".to_string()], &reader);
        assert!(out.has_errors());
        assert_eq!(out.diagnostics[0].kind, ErrorKind::DuplicateSymbol("main".to_string()));
    }

    #[test]
    fn duplicate_obj_file_name_errors() {
        let mut reader = MockFileReader::default();
        reader.add_file("a.obj", obj_bytes(None, &[("main", vec![0x00], vec![])], &[]));

        let out = link(&["a.obj".to_string(), "a.obj".to_string()], &reader);
        assert!(out.has_errors());
        assert_eq!(out.diagnostics[0].kind, ErrorKind::DuplicateObjFile("a.obj".to_string()));
    }

    #[test]
    fn ambiguous_link_base_is_reported() {
        let mut reader = MockFileReader::default();
        reader.add_file("a.obj", obj_bytes(Some(0x1000), &[("main", vec![0x00], vec![])], &[]));
        reader.add_file("b.obj", obj_bytes(Some(0x2000), &[("util", vec![0x00], vec![])], &[]));

        let out = link(&["a.obj".to_string(), "b.obj".to_string()], &reader);
        assert!(out.has_errors());
        assert!(out.diagnostics.iter().any(|d| d.kind == ErrorKind::AmbiguousLinkBase));
    }

    #[test]
    fn unknown_symbol_in_relocation_is_reported_at_emission() {
        let mut reader = MockFileReader::default();
        reader.add_file(
            "main.obj",
            obj_bytes(
                None,
                &[(
                    "main",
                    vec![0xD1, 0x00, 0x00],
                    vec![Relocation {
                        machine_code_offset: 1,
                        symbol_index: 2,
                    }],
                )],
                &["helper"],
            ),
        );

        let out = link(&["main.obj".to_string()], &reader);
        assert!(out.has_errors());
        assert!(out.diagnostics.iter().any(|d| matches!(d.kind, ErrorKind::UnknownSymbol(_))));
    }
}
