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

use casm::assemble_file;
use casm::file_reader::MockFileReader;
use std::path::Path;

#[test]
fn assembles_nop_and_hlt_into_one_symbol() {
    let mut reader = MockFileReader::default();
    reader.add_file("main.asm", "main:\n nop\n hlt\n.end\n");

    let output = assemble_file(&reader, Path::new("main.asm")).unwrap();
    assert!(!output.has_errors());

    let object = mpcore::object::read(&mut &output.object_bytes[..]).unwrap();
    assert!(object.symbol_store.has("main"));
    assert_eq!(object.symbol_store.get("main").unwrap().machine_code, vec![0x00, 0xFF]);
}

#[test]
fn forward_reference_jump_emits_relocation() {
    let mut reader = MockFileReader::default();
    reader.add_file("main.asm", "main:\n jmp loop\nloop:\n nop\n.end\n");

    let output = assemble_file(&reader, Path::new("main.asm")).unwrap();
    assert!(!output.has_errors());

    let object = mpcore::object::read(&mut &output.object_bytes[..]).unwrap();
    assert!(object.symbol_table.has("main"));
    assert!(object.symbol_table.has("loop"));

    let main_record = object.symbol_store.get("main").unwrap();
    assert_eq!(main_record.relocation_table.len(), 1);
    assert_eq!(main_record.relocation_table[0].machine_code_offset, 1);
}

#[test]
fn instruction_without_symbol_is_reported_as_one_error() {
    let mut reader = MockFileReader::default();
    reader.add_file("main.asm", "nop\n.end\n");

    let output = assemble_file(&reader, Path::new("main.asm")).unwrap();
    assert!(output.has_errors());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.object_bytes.is_empty());
}

#[test]
fn db_string_literal_emits_ordered_code_points() {
    let mut reader = MockFileReader::default();
    reader.add_file("main.asm", "main:\n db \"AB\", 0x00\n.end\n");

    let output = assemble_file(&reader, Path::new("main.asm")).unwrap();
    assert!(!output.has_errors());

    let object = mpcore::object::read(&mut &output.object_bytes[..]).unwrap();
    assert_eq!(object.symbol_store.get("main").unwrap().machine_code, vec![0x41, 0x42, 0x00]);
}

#[test]
fn output_path_swaps_extension_to_obj() {
    assert_eq!(casm::output_path_for(Path::new("src/main.asm")), Path::new("src/main.obj"));
}
