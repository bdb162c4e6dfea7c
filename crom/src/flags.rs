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

//! Flags-file parsing for data-config "flags mode" (spec §4.9): one
//! flag name per line, bare name assigned the next free bit, or
//! `name;value` assigning an explicit bitmask and extending the
//! tracked width to fit it.

use crate::errors::RomError;
use std::collections::HashMap;

/// `name -> bitmask` plus the total width in bits the flags span.
pub struct FlagTable {
    pub masks: HashMap<String, u64>,
    pub bits: u32,
}

impl FlagTable {
    /// ORs together the bitmasks of every comma-separated flag name in
    /// `cell`. An empty cell ORs to 0 (no flags set).
    pub fn resolve(&self, cell: &str) -> Result<u64, RomError> {
        let mut value = 0u64;
        for name in cell.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let mask = self.masks.get(name).ok_or_else(|| RomError::UnknownFlag(name.to_string()))?;
            value |= mask;
        }
        Ok(value)
    }
}

/// Parses a flags file: one entry per non-blank line, `;`-separated
/// for the explicit-value form, matching the CSV cell delimiter used
/// elsewhere in C9.
pub fn parse(content: &str) -> Result<FlagTable, RomError> {
    let mut masks = HashMap::new();
    let mut next_free_bit: u32 = 0;
    let mut width: u32 = 0;

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut parts = line.splitn(2, ';');
        let name = parts.next().unwrap().trim();
        if name.is_empty() || !mpcore::literal::is_valid_symbol_name(name) {
            return Err(RomError::InvalidFlagName(name.to_string()));
        }

        let mask = match parts.next() {
            None => {
                let bit = next_free_bit;
                next_free_bit += 1;
                1u64 << bit
            }
            Some(value_str) => {
                let value_str = value_str.trim();
                let lit = mpcore::Literal::parse(value_str).ok_or_else(|| RomError::InvalidFlagValue(value_str.to_string()))?;
                match lit.value() {
                    mpcore::LiteralValue::Integer(v) => *v,
                    mpcore::LiteralValue::CharSeq(_) => return Err(RomError::InvalidFlagValue(value_str.to_string())),
                }
            }
        };

        let needed = crate::cell::bits_needed(mask);
        width = width.max(needed);
        masks.insert(name.to_string(), mask);
    }

    width = width.max(next_free_bit);
    Ok(FlagTable { masks, bits: width })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_get_sequential_bits() {
        let table = parse("carry\nzero\nhalt\n").unwrap();
        assert_eq!(table.masks["carry"], 0b001);
        assert_eq!(table.masks["zero"], 0b010);
        assert_eq!(table.masks["halt"], 0b100);
        assert_eq!(table.bits, 3);
    }

    #[test]
    fn explicit_value_extends_width() {
        let table = parse("carry;0x80\n").unwrap();
        assert_eq!(table.masks["carry"], 0x80);
        assert_eq!(table.bits, 8);
    }

    #[test]
    fn resolve_ors_named_flags() {
        let table = parse("carry\nzero\n").unwrap();
        assert_eq!(table.resolve("carry,zero").unwrap(), 0b011);
    }

    #[test]
    fn unknown_flag_errors() {
        let table = parse("carry\n").unwrap();
        assert!(table.resolve("bogus").is_err());
    }

    #[test]
    fn invalid_name_errors() {
        assert!(parse("1bad\n").is_err());
    }
}
