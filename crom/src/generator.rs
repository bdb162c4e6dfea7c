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

//! Ties the CSV rows, address config, and data config together into
//! the address -> data map C9 emits, applying `--extract-bits` before
//! output.

use crate::address_config::AddrConfig;
use crate::data_config::DataConfig;
use crate::errors::RomError;
use std::collections::BTreeMap;

pub struct ExtractBits {
    pub from: u32,
    pub to: u32,
}

pub fn parse_extract_bits(s: &str) -> Result<ExtractBits, RomError> {
    let mut parts = s.splitn(2, '-');
    let from_str = parts.next().unwrap_or("");
    let from: u32 = from_str.parse().map_err(|_| RomError::InvalidExtractBits(s.to_string()))?;
    let to = match parts.next() {
        None => from,
        Some(to_str) => to_str.parse::<u32>().map_err(|_| RomError::InvalidExtractBits(s.to_string()))?,
    };
    if from > to {
        return Err(RomError::InvalidExtractBits(s.to_string()));
    }
    Ok(ExtractBits { from, to })
}

impl ExtractBits {
    fn apply(&self, value: u64) -> u64 {
        let width = self.to - self.from + 1;
        let mask = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
        (value >> self.from) & mask
    }
}

/// Builds the address -> data map from parsed CSV `rows`. Each row
/// resolves to one data value but possibly several addresses, when its
/// address cells expand via wildcards; every expanded address gets the
/// row's same data value (spec §4.9: a wildcard doubles ROM entries,
/// one per address differing in that bit, not the data). Duplicate
/// addresses across rows still overwrite (later row wins), matching a
/// straight dict-assignment in the original.
pub fn build(rows: &[Vec<String>], addr_config: &AddrConfig, data_config: &DataConfig, extract_bits: Option<&ExtractBits>) -> Result<BTreeMap<u64, u64>, RomError> {
    let mut map = BTreeMap::new();

    for row in rows {
        let addrs = addr_config.assemble(row)?;
        let (value, _bits) = data_config.resolve(row)?;

        let value = match extract_bits {
            Some(eb) => eb.apply(value),
            None => value,
        };

        for (addr, _addr_bits) in addrs {
            map.insert(addr, value);
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn no_files(_: &Path) -> Result<String, RomError> {
        Err(RomError::FileNotFound("unused".to_string()))
    }

    #[test]
    fn builds_simple_map() {
        let rows = vec![vec!["0x00".to_string(), "0x11".to_string()], vec!["0x01".to_string(), "0x22".to_string()]];
        let addr_cfg = crate::address_config::parse("0").unwrap();
        let data_cfg = crate::data_config::parse("1", no_files).unwrap();
        let map = build(&rows, &addr_cfg, &data_cfg, None).unwrap();
        assert_eq!(map.get(&0), Some(&0x11));
        assert_eq!(map.get(&1), Some(&0x22));
    }

    #[test]
    fn wildcard_address_produces_two_entries_with_identical_data() {
        let rows = vec![vec!["0bx".to_string(), "0xAA".to_string()]];
        let addr_cfg = crate::address_config::parse("0").unwrap();
        let data_cfg = crate::data_config::parse("1", no_files).unwrap();
        let map = build(&rows, &addr_cfg, &data_cfg, None).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&0], 0xAA);
        assert_eq!(map[&1], 0xAA);
    }

    #[test]
    fn extract_bits_slices_before_storing() {
        let rows = vec![vec!["0x00".to_string(), "0xFF".to_string()]];
        let addr_cfg = crate::address_config::parse("0").unwrap();
        let data_cfg = crate::data_config::parse("1", no_files).unwrap();
        let eb = parse_extract_bits("4-7").unwrap();
        let map = build(&rows, &addr_cfg, &data_cfg, Some(&eb)).unwrap();
        assert_eq!(map[&0], 0xF);
    }

    #[test]
    fn extract_bits_range_parses_single_bit() {
        let eb = parse_extract_bits("3").unwrap();
        assert_eq!(eb.from, 3);
        assert_eq!(eb.to, 3);
    }

    #[test]
    fn extract_bits_rejects_inverted_range() {
        assert!(parse_extract_bits("7-3").is_err());
    }
}
