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

//! Parses one CSV cell into a value. Address cells may additionally use
//! `0b…` notation with `x` wildcards — each wildcard doubles the number
//! of ROM entries a row expands to, one for `0` and one for `1` (spec
//! §4.9) — handled here by `expand_addr`. Data cells are single values
//! (`parse_data_value`): a ROM entry is one address->byte pair, so the
//! "doubles ROM entries" wildcard behavior belongs to the address side,
//! not the data side (see `DESIGN.md`).

use crate::errors::RomError;

/// Parses an address cell into its natural-width concrete value(s): a
/// `0b…` cell with no wildcards, or any other literal, always expands
/// to exactly one value; a `0b…` cell containing `x` wildcards expands
/// to 2^n values, one per combination of the wildcarded bits. Returns
/// the expanded values alongside the pattern's natural bit width (the
/// full digit count for a `0b…` cell, `bits_needed` for anything else).
pub fn expand_addr(cell: &str) -> Result<(Vec<u64>, u32), RomError> {
    let digits = cell.strip_prefix("0b").or_else(|| cell.strip_prefix("0B"));
    match digits {
        Some(bits) => expand_wildcard_binary(bits, cell),
        None => {
            let lit = mpcore::Literal::parse(cell).ok_or_else(|| RomError::InvalidAddrValue(cell.to_string()))?;
            match lit.value() {
                mpcore::LiteralValue::Integer(v) => Ok((vec![*v], bits_needed(*v).max(1))),
                mpcore::LiteralValue::CharSeq(_) => Err(RomError::InvalidAddrValue(cell.to_string())),
            }
        }
    }
}

fn expand_wildcard_binary(bits: &str, original: &str) -> Result<(Vec<u64>, u32), RomError> {
    if bits.is_empty() || !bits.chars().all(|c| matches!(c, '0' | '1' | 'x' | 'X')) {
        return Err(RomError::InvalidAddrValue(original.to_string()));
    }
    if bits.len() > 64 {
        return Err(RomError::InvalidAddrValue(original.to_string()));
    }

    let wildcard_positions: Vec<usize> = bits.chars().enumerate().filter(|(_, c)| matches!(c, 'x' | 'X')).map(|(i, _)| i).collect();

    let combos = 1usize << wildcard_positions.len();
    let mut out = Vec::with_capacity(combos);
    let template: Vec<char> = bits.chars().collect();

    for combo in 0..combos {
        let mut concrete = template.clone();
        for (k, &pos) in wildcard_positions.iter().enumerate() {
            concrete[pos] = if (combo >> k) & 1 == 1 { '1' } else { '0' };
        }
        let s: String = concrete.into_iter().collect();
        let v = u64::from_str_radix(&s, 2).map_err(|_| RomError::InvalidAddrValue(original.to_string()))?;
        out.push(v);
    }
    Ok((out, bits.len() as u32))
}

/// Parses a data cell into a single concrete value. Data cells don't
/// expand — a `0b…` cell containing `x` is simply not a valid literal
/// here and is rejected the same way any other malformed cell is.
pub fn parse_data_value(cell: &str) -> Result<u64, RomError> {
    let lit = mpcore::Literal::parse(cell).ok_or_else(|| RomError::InvalidDataValue(cell.to_string()))?;
    match lit.value() {
        mpcore::LiteralValue::Integer(v) => Ok(*v),
        mpcore::LiteralValue::CharSeq(_) => Err(RomError::InvalidDataValue(cell.to_string())),
    }
}

/// The bit width a literal value actually needs (0 maps to 1 bit, not
/// the 8-bit floor `mpcore::Literal` uses — a ROM field can be a single
/// bit wide).
pub fn bits_needed(value: u64) -> u32 {
    64 - value.leading_zeros().min(63)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_literal_expands_to_one_value() {
        assert_eq!(expand_addr("0x2A").unwrap(), (vec![0x2A], 6));
        assert_eq!(expand_addr("42").unwrap(), (vec![42], 6));
    }

    #[test]
    fn single_wildcard_doubles_entries() {
        let (mut values, bits) = expand_addr("0b1x0").unwrap();
        values.sort();
        assert_eq!(values, vec![0b100, 0b110]);
        assert_eq!(bits, 3);
    }

    #[test]
    fn two_wildcards_quadruple_entries() {
        let (values, _) = expand_addr("0bxx").unwrap();
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn invalid_binary_digit_errors() {
        assert!(expand_addr("0b12x").is_err());
    }

    #[test]
    fn bits_needed_does_not_collapse_larger_values() {
        assert_eq!(bits_needed(0x80), 8);
        assert_eq!(bits_needed(0x1234), 13);
    }

    #[test]
    fn parse_data_value_rejects_wildcards() {
        assert!(parse_data_value("0b1x0").is_err());
    }
}
