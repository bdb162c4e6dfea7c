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

//! ROM image generator (C9): turns a `;`-separated truth table into a
//! `.raw` or `.bin` ROM image, driven by an address-config and
//! data-config mini-language (see `address_config`, `data_config`).

pub mod address_config;
pub mod cell;
pub mod csv;
pub mod data_config;
pub mod errors;
pub mod file_reader;
pub mod flags;
pub mod generator;
pub mod output;

use address_config::AddrConfig;
use data_config::DataConfig;
use errors::RomError;
use file_reader::FileReader;
use generator::ExtractBits;
use std::path::{Path, PathBuf};

pub enum OutputFormat {
    Raw,
    Bin,
}

pub fn output_format_for(path: &Path) -> Result<OutputFormat, RomError> {
    match path.extension().and_then(|e| e.to_str()) {
        None => Err(RomError::MissingOutputFileExtension(path.display().to_string())),
        Some("raw") => Ok(OutputFormat::Raw),
        Some("bin") => Ok(OutputFormat::Bin),
        Some(other) => Err(RomError::InvalidOutputFileExtension(other.to_string())),
    }
}

pub struct RunOptions<'a> {
    pub csv_path: &'a Path,
    pub addr_config: &'a str,
    pub data_config: &'a str,
    pub output_path: &'a Path,
    pub extract_bits: Option<&'a str>,
}

/// Runs the full C9 pipeline: reads the CSV and any referenced flags
/// file through `reader`, builds the address -> data map, and renders
/// the chosen output format. Returns the bytes that were (or would be)
/// written to `options.output_path`; the caller is responsible for the
/// actual write via `reader`.
pub fn generate(reader: &dyn FileReader, options: &RunOptions) -> Result<Vec<u8>, RomError> {
    let format = output_format_for(options.output_path)?;

    let csv_text = reader.read_text(options.csv_path).map_err(|_| RomError::FileNotFound(options.csv_path.display().to_string()))?;
    let rows = csv::parse(&csv_text);

    let addr_cfg: AddrConfig = address_config::parse(options.addr_config)?;

    let flags_reader = |p: &Path| -> Result<String, RomError> {
        let owned: PathBuf = p.to_path_buf();
        reader.read_text(&owned).map_err(|_| RomError::FileNotFound(owned.display().to_string()))
    };
    let data_cfg: DataConfig = data_config::parse(options.data_config, flags_reader)?;

    let extract: Option<ExtractBits> = options.extract_bits.map(generator::parse_extract_bits).transpose()?;

    let map = generator::build(&rows, &addr_cfg, &data_cfg, extract.as_ref())?;

    Ok(match format {
        OutputFormat::Raw => output::render_raw(&map, 0).into_bytes(),
        OutputFormat::Bin => {
            let max_value = map.values().copied().max().unwrap_or(0);
            let bytes_per_entry = (cell::bits_needed(max_value).max(8) as usize).div_ceil(8);
            output::render_bin(&map, bytes_per_entry)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use file_reader::MockFileReader;

    #[test]
    fn end_to_end_raw_output() {
        let mut reader = MockFileReader::default();
        reader.add_file("table.csv", "0x00;0x11\n0x01;0x22\n");

        let options = RunOptions { csv_path: Path::new("table.csv"), addr_config: "0", data_config: "1", output_path: Path::new("out.raw"), extract_bits: None };

        let bytes = generate(&reader, &options).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "v2.0 raw\n11\n22\n");
    }

    #[test]
    fn end_to_end_flags_mode() {
        let mut reader = MockFileReader::default();
        reader.add_file("table.csv", "0x00;carry,zero\n");
        reader.add_file("flags.txt", "carry\nzero\n");

        let options = RunOptions { csv_path: Path::new("table.csv"), addr_config: "0", data_config: "1:flags.txt", output_path: Path::new("out.raw"), extract_bits: None };

        let bytes = generate(&reader, &options).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "v2.0 raw\n3\n");
    }

    #[test]
    fn missing_output_extension_errors() {
        let reader = MockFileReader::default();
        let options = RunOptions { csv_path: Path::new("table.csv"), addr_config: "0", data_config: "1", output_path: Path::new("out"), extract_bits: None };
        assert!(generate(&reader, &options).is_err());
    }

    #[test]
    fn bin_output_sizes_to_highest_address() {
        let mut reader = MockFileReader::default();
        reader.add_file("table.csv", "0x02;0xAA\n");
        let options = RunOptions { csv_path: Path::new("table.csv"), addr_config: "0", data_config: "1", output_path: Path::new("out.bin"), extract_bits: None };
        let bytes = generate(&reader, &options).unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0xAA]);
    }
}
