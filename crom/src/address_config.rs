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

//! Address-config mini-language: `col:bits,col:bits,…` (spec §4.9).
//! Selected columns concatenate MSB-to-LSB into a bit string of the
//! declared total width; an omitted `:bits` defaults to the column
//! value's own natural width.

use crate::errors::RomError;

#[derive(Debug, Clone, PartialEq)]
pub struct AddrField {
    pub column: usize,
    pub bits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddrConfig {
    pub fields: Vec<AddrField>,
}

pub fn parse(config_str: &str) -> Result<AddrConfig, RomError> {
    let mut fields = Vec::new();
    for part in config_str.split(',') {
        let mut pieces = part.splitn(2, ':');
        let column_str = pieces.next().unwrap_or("");
        let column: usize = column_str.parse().map_err(|_| RomError::InvalidColumnNumber(column_str.to_string()))?;

        let bits = match pieces.next() {
            None => None,
            Some(bits_str) => Some(bits_str.parse::<u32>().map_err(|_| RomError::InvalidBitWidth(bits_str.to_string()))?),
        };

        fields.push(AddrField { column, bits });
    }
    Ok(AddrConfig { fields })
}

impl AddrConfig {
    /// Builds every concatenated address value (and the total bit width)
    /// for one CSV `row`. A field whose cell is a `0b…` pattern with `x`
    /// wildcards expands to more than one value; the final address list
    /// is the cross product of every field's expansions, one ROM entry
    /// per combination (spec §4.9: "each wildcard doubles the number of
    /// ROM entries written").
    pub fn assemble(&self, row: &[String]) -> Result<Vec<(u64, u32)>, RomError> {
        let mut combos: Vec<(u64, u32)> = vec![(0, 0)];

        for field in &self.fields {
            let cell = row.get(field.column).ok_or(RomError::AddrColumnNotFound(field.column))?;
            let (raw_values, natural_bits) = crate::cell::expand_addr(cell.trim())?;

            let bits = field.bits.unwrap_or(natural_bits.max(1));
            if natural_bits > bits {
                return Err(RomError::IncompatibleAddrSize { given: natural_bits, max: bits });
            }

            let mask = if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 };
            let mut next = Vec::with_capacity(combos.len() * raw_values.len());
            for (value, total_bits) in &combos {
                for raw in &raw_values {
                    next.push(((value << bits) | (raw & mask), total_bits + bits));
                }
            }
            combos = next;
        }

        Ok(combos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_columns_with_and_without_width() {
        let cfg = parse("0:4,1").unwrap();
        assert_eq!(cfg.fields, vec![AddrField { column: 0, bits: Some(4) }, AddrField { column: 1, bits: None }]);
    }

    #[test]
    fn assembles_msb_to_lsb() {
        let cfg = parse("0:4,1:4").unwrap();
        let row = vec!["0b0001".to_string(), "0b0010".to_string()];
        let combos = cfg.assemble(&row).unwrap();
        assert_eq!(combos, vec![(0b0001_0010, 8)]);
    }

    #[test]
    fn rejects_non_numeric_column() {
        assert!(parse("x:4").is_err());
    }

    #[test]
    fn missing_column_errors() {
        let cfg = parse("5").unwrap();
        let row = vec!["0".to_string()];
        assert!(cfg.assemble(&row).is_err());
    }

    #[test]
    fn wildcard_field_doubles_addresses_with_other_fields_fixed() {
        let cfg = parse("0:1,1:2").unwrap();
        let row = vec!["0bx".to_string(), "0b01".to_string()];
        let mut combos = cfg.assemble(&row).unwrap();
        combos.sort();
        assert_eq!(combos, vec![(0b001, 3), (0b101, 3)]);
    }

    #[test]
    fn multiple_wildcard_fields_cross_product() {
        let cfg = parse("0:1,1:1").unwrap();
        let row = vec!["0bx".to_string(), "0bx".to_string()];
        let mut combos = cfg.assemble(&row).unwrap();
        combos.sort();
        assert_eq!(combos, vec![(0b00, 2), (0b01, 2), (0b10, 2), (0b11, 2)]);
    }
}
