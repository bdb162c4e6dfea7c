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

//! Data-config mini-language: `col`, `col:bits`, or `col:flags_file[:bits]`
//! (spec §4.9). The third form switches the column to "flags mode" —
//! the cell is a comma-separated list of flag names ORed together via
//! a loaded `FlagTable`.

use crate::errors::RomError;
use crate::flags::FlagTable;
use std::path::Path;

pub enum DataMode {
    Numeric { bits: Option<u32> },
    Flags { table: FlagTable, bits: Option<u32> },
}

pub struct DataConfig {
    pub column: usize,
    pub mode: DataMode,
}

/// `read_file` abstracts the flags-file load so tests can supply
/// in-memory content instead of touching disk.
pub fn parse(config_str: &str, read_file: impl Fn(&Path) -> Result<String, RomError>) -> Result<DataConfig, RomError> {
    let mut parts = config_str.split(':');
    let column_str = parts.next().unwrap_or("");
    let column: usize = column_str.parse().map_err(|_| RomError::InvalidColumnNumber(column_str.to_string()))?;

    let second = parts.next();
    let third = parts.next();

    let mode = match second {
        None => DataMode::Numeric { bits: None },
        Some(s) if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() => {
            DataMode::Numeric { bits: Some(s.parse::<u32>().map_err(|_| RomError::InvalidBitWidth(s.to_string()))?) }
        }
        Some(flags_file) => {
            let content = read_file(Path::new(flags_file))?;
            let table = crate::flags::parse(&content)?;
            let bits = match third {
                None => None,
                Some(b) => Some(b.parse::<u32>().map_err(|_| RomError::InvalidBitWidth(b.to_string()))?),
            };
            DataMode::Flags { table, bits }
        }
    };

    Ok(DataConfig { column, mode })
}

impl DataConfig {
    /// Resolves the single concrete data value for one CSV row, paired
    /// with its bit width. Unlike an address field, a data cell never
    /// expands — wildcards only widen the address side (spec §4.9).
    pub fn resolve(&self, row: &[String]) -> Result<(u64, u32), RomError> {
        let cell = row.get(self.column).ok_or(RomError::DataColumnNotFound(self.column))?;

        match &self.mode {
            DataMode::Numeric { bits } => {
                let value = crate::cell::parse_data_value(cell.trim())?;
                let natural = crate::cell::bits_needed(value).max(1);
                let width = bits.unwrap_or(natural);
                if natural > width {
                    return Err(RomError::IncompatibleDataSize { given: natural, max: width });
                }
                Ok((value, width))
            }
            DataMode::Flags { table, bits } => {
                let value = table.resolve(cell.trim())?;
                let width = bits.unwrap_or(table.bits);
                if table.bits > width {
                    return Err(RomError::FlagsExceedingBitWidth { flags_bits: table.bits, given_bits: width });
                }
                Ok((value, width))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_files(_: &Path) -> Result<String, RomError> {
        Err(RomError::FileNotFound("unused".to_string()))
    }

    #[test]
    fn parses_bare_column() {
        let cfg = parse("2", no_files).unwrap();
        assert_eq!(cfg.column, 2);
        assert!(matches!(cfg.mode, DataMode::Numeric { bits: None }));
    }

    #[test]
    fn parses_column_with_bits() {
        let cfg = parse("2:8", no_files).unwrap();
        assert!(matches!(cfg.mode, DataMode::Numeric { bits: Some(8) }));
    }

    #[test]
    fn parses_flags_mode() {
        let cfg = parse("2:flags.txt:8", |_| Ok("carry\nzero\n".to_string())).unwrap();
        match &cfg.mode {
            DataMode::Flags { table, bits } => {
                assert_eq!(*bits, Some(8));
                assert_eq!(table.masks["carry"], 1);
            }
            _ => panic!("expected flags mode"),
        }
    }

    #[test]
    fn numeric_resolve_rejects_wildcards() {
        let cfg = parse("0", no_files).unwrap();
        let row = vec!["0b1x".to_string()];
        assert!(cfg.resolve(&row).is_err());
    }

    #[test]
    fn numeric_resolve_rejects_oversize_value() {
        let cfg = parse("0:4", no_files).unwrap();
        let row = vec!["0xFF".to_string()];
        assert!(cfg.resolve(&row).is_err());
    }

    #[test]
    fn flags_resolve_ors_named_flags() {
        let cfg = parse("0:f.txt", |_| Ok("carry\nzero\n".to_string())).unwrap();
        let row = vec!["carry,zero".to_string()];
        let resolved = cfg.resolve(&row).unwrap();
        assert_eq!(resolved, (0b11, 2));
    }
}
