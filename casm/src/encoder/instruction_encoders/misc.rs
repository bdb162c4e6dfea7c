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

use crate::ast::{expand_local, Operand};
use crate::encoder::components::{EncodeResult, PendingRelocation};
use crate::encoder::constants::INT_MAX;
use crate::encoder::operand_validators::expect_arity;
use crate::encoder::utility_functions::{is_numeric_literal, literal_integer, no_relocs};
use mpcore::{ErrorKind, LiteralValue};

pub fn encode_zero_operand(opcode: u8, operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    if !operands.is_empty() {
        return Err(ErrorKind::TooManyOperands(format!("{opcode:#04X}")));
    }
    Ok(no_relocs(vec![opcode]))
}

pub fn encode_int(base: u8, operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity("int", operands, 1)?;
    match &operands[0] {
        Operand::Literal(lit) => {
            if !is_numeric_literal(lit) {
                return Err(ErrorKind::IncompatibleDataType);
            }
            if lit.bit_size() > 8 {
                return Err(ErrorKind::IncompatibleDataSize);
            }
            let v = literal_integer(lit)?;
            if v > INT_MAX {
                return Err(ErrorKind::InvalidInt(v.to_string()));
            }
            Ok(no_relocs(vec![base, v as u8]))
        }
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}

/// Parses the `<mult>` half of a `<lit> ( <mult> )` data-directive
/// operand: a numeric literal, 1 <= value <= 0xFFFF (spec §4.5).
fn parse_multiplier(mult: &str) -> Result<u64, ErrorKind> {
    let lit = mpcore::Literal::parse(mult).ok_or_else(|| ErrorKind::InvalidMultiplier(mult.to_string()))?;
    if !is_numeric_literal(&lit) {
        return Err(ErrorKind::InvalidMultiplier(mult.to_string()));
    }
    if lit.bit_size() > 16 {
        return Err(ErrorKind::UnsupportedMultiplierSize);
    }
    let v = literal_integer(&lit)?;
    if v < 1 {
        return Err(ErrorKind::UnsupportedMultiplier);
    }
    Ok(v)
}

/// The byte sequence a single `db` operand (not yet multiplier-expanded)
/// contributes: a string's ordered code points, or one byte for a
/// numeric/char literal.
fn db_operand_bytes(op: &Operand) -> Result<Vec<u8>, ErrorKind> {
    match op {
        Operand::Literal(lit) => match lit.value() {
            LiteralValue::CharSeq(chars) => Ok(chars.iter().map(|&c| c as u8).collect()),
            LiteralValue::Integer(_) => {
                if lit.bit_size() > 8 {
                    return Err(ErrorKind::IncompatibleDataSize);
                }
                Ok(vec![literal_integer(lit)? as u8])
            }
        },
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}

pub fn encode_db(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    if operands.is_empty() {
        return Err(ErrorKind::NoData);
    }
    let mut bytes = Vec::new();
    for op in operands {
        match op {
            Operand::Multiplied(inner, mult) => {
                let count = parse_multiplier(mult)?;
                let unit = db_operand_bytes(inner)?;
                for _ in 0..count {
                    bytes.extend_from_slice(&unit);
                }
            }
            other => bytes.extend(db_operand_bytes(other)?),
        }
    }
    Ok(no_relocs(bytes))
}

/// The little-endian word sequence (and any relocation, offset-relative
/// to the start of this operand's contribution) a single `dw` operand
/// contributes.
fn dw_operand_words(
    op: &Operand,
    current_proc: Option<&str>,
    base_offset: u16,
) -> Result<(Vec<u8>, Vec<PendingRelocation>), ErrorKind> {
    match op {
        Operand::Literal(lit) => match lit.value() {
            LiteralValue::CharSeq(chars) => {
                let mut bytes = Vec::new();
                for &c in chars {
                    bytes.extend((c as u16).to_le_bytes());
                }
                Ok((bytes, Vec::new()))
            }
            LiteralValue::Integer(_) => {
                if lit.bit_size() > 16 {
                    return Err(ErrorKind::IncompatibleDataSize);
                }
                let v = literal_integer(lit)? as u16;
                Ok((v.to_le_bytes().to_vec(), Vec::new()))
            }
        },
        Operand::Symbol(name) => {
            let expanded = expand_local(name, current_proc);
            Ok((
                vec![0, 0],
                vec![PendingRelocation {
                    offset: base_offset,
                    symbol_name: expanded,
                }],
            ))
        }
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}

pub fn encode_dw(operands: &[Operand], current_proc: Option<&str>) -> Result<EncodeResult, ErrorKind> {
    if operands.is_empty() {
        return Err(ErrorKind::NoData);
    }
    let mut bytes = Vec::new();
    let mut relocations = Vec::new();
    for op in operands {
        match op {
            Operand::Multiplied(inner, mult) => {
                let count = parse_multiplier(mult)?;
                for _ in 0..count {
                    let (unit, relocs) = dw_operand_words(inner, current_proc, bytes.len() as u16)?;
                    bytes.extend(unit);
                    relocations.extend(relocs);
                }
            }
            other => {
                let (unit, relocs) = dw_operand_words(other, current_proc, bytes.len() as u16)?;
                bytes.extend(unit);
                relocations.extend(relocs);
            }
        }
    }
    Ok(EncodeResult { bytes, relocations })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_string_and_literal() {
        let result = encode_db(&[
            Operand::Literal(mpcore::Literal::parse("'AB'").unwrap()),
            Operand::Literal(mpcore::Literal::parse("0x00").unwrap()),
        ])
        .unwrap();
        assert_eq!(result.bytes, vec![0x41, 0x42, 0x00]);
    }

    #[test]
    fn db_multiplier_repeats_value() {
        let lit = Operand::Literal(mpcore::Literal::parse("0x41").unwrap());
        let result = encode_db(&[Operand::Multiplied(Box::new(lit), "4".to_string())]).unwrap();
        assert_eq!(result.bytes, vec![0x41, 0x41, 0x41, 0x41]);
    }

    #[test]
    fn db_no_operands_is_no_data() {
        assert_eq!(encode_db(&[]).unwrap_err(), ErrorKind::NoData);
    }

    #[test]
    fn dw_symbol_emits_relocation_at_correct_offset() {
        let result = encode_dw(
            &[
                Operand::Literal(mpcore::Literal::parse("0x1234").unwrap()),
                Operand::Symbol("target".into()),
            ],
            None,
        )
        .unwrap();
        assert_eq!(result.bytes.len(), 4);
        assert_eq!(result.relocations[0].offset, 2);
        assert_eq!(result.relocations[0].symbol_name, "target");
    }

    #[test]
    fn dw_multiplier_with_zero_is_unsupported() {
        let lit = Operand::Literal(mpcore::Literal::parse("0x01").unwrap());
        let err = encode_dw(&[Operand::Multiplied(Box::new(lit), "0".to_string())], None).unwrap_err();
        assert_eq!(err, ErrorKind::UnsupportedMultiplier);
    }

    #[test]
    fn int_rejects_value_above_63() {
        let result = encode_int(0xDF, &[Operand::Literal(mpcore::Literal::parse("64").unwrap())]);
        assert_eq!(result.unwrap_err(), ErrorKind::InvalidInt("64".to_string()));
    }

    #[test]
    fn int_encodes_base_and_value_byte() {
        let result = encode_int(0xDF, &[Operand::Literal(mpcore::Literal::parse("5").unwrap())]).unwrap();
        assert_eq!(result.bytes, vec![0xDF, 5]);
    }
}
