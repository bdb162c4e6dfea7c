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

use crom::file_reader::MockFileReader;
use crom::{generate, RunOptions};
use std::path::Path;

#[test]
fn multi_column_address_config_concatenates_msb_to_lsb() {
    let mut reader = MockFileReader::default();
    reader.add_file("table.csv", "0b1;0b01;0xFF\n");

    let options = RunOptions {
        csv_path: Path::new("table.csv"),
        addr_config: "0:1,1:2",
        data_config: "2",
        output_path: Path::new("out.raw"),
        extract_bits: None,
    };

    let bytes = generate(&reader, &options).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    // address = 0b1 (1 bit) ++ 0b01 (2 bits) = 0b101 = 5
    assert_eq!(text, "v2.0 raw\n0\n0\n0\n0\n0\nff\n");
}

#[test]
fn wildcard_address_cell_expands_to_two_rom_entries() {
    let mut reader = MockFileReader::default();
    reader.add_file("table.csv", "0bx;0xAA\n");

    let options = RunOptions {
        csv_path: Path::new("table.csv"),
        addr_config: "0",
        data_config: "1",
        output_path: Path::new("out.bin"),
        extract_bits: None,
    };

    let bytes = generate(&reader, &options).unwrap();
    assert_eq!(bytes, vec![0xAA, 0xAA]);
}

#[test]
fn extract_bits_slices_before_emission() {
    let mut reader = MockFileReader::default();
    reader.add_file("table.csv", "0x00;0xFF\n");

    let options = RunOptions {
        csv_path: Path::new("table.csv"),
        addr_config: "0",
        data_config: "1",
        output_path: Path::new("out.raw"),
        extract_bits: Some("0-3"),
    };

    let bytes = generate(&reader, &options).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "v2.0 raw\nf\n");
}

#[test]
fn invalid_extract_bits_range_is_rejected() {
    let reader = MockFileReader::default();
    let options = RunOptions {
        csv_path: Path::new("table.csv"),
        addr_config: "0",
        data_config: "1",
        output_path: Path::new("out.raw"),
        extract_bits: Some("7-3"),
    };
    assert!(generate(&reader, &options).is_err());
}
