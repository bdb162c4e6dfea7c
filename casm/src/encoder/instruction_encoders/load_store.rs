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

use crate::ast::Operand;
use crate::encoder::components::EncodeResult;
use crate::encoder::constants::*;
use crate::encoder::operand_validators::expect_arity;
use crate::encoder::utility_functions::{encode_addr_operand, is_numeric_literal, literal_integer, no_relocs};
use mpcore::ErrorKind;

pub fn encode_mov(operands: &[Operand], current_proc: Option<&str>) -> Result<EncodeResult, ErrorKind> {
    expect_arity("mov", operands, 2)?;
    let dst = &operands[0];
    let src = &operands[1];

    match (dst, src) {
        (Operand::Mem, Operand::Reg8(r)) => {
            let opcode = MOV_BASE_8 | (MEM_CODE << 4) | (r.code() << 1);
            Ok(no_relocs(vec![opcode]))
        }
        (Operand::Reg8(r), Operand::Mem) => {
            let opcode = MOV_BASE_8 | (r.code() << 4) | (MEM_CODE << 1);
            Ok(no_relocs(vec![opcode]))
        }
        (Operand::Reg8(d), Operand::Reg8(s)) => {
            let opcode = MOV_BASE_8 | (d.code() << 4) | (s.code() << 1);
            Ok(no_relocs(vec![opcode]))
        }
        (Operand::Reg8(d), Operand::Literal(lit)) => {
            if !is_numeric_literal(lit) {
                return Err(ErrorKind::IncompatibleDataType);
            }
            if lit.bit_size() > 8 {
                return Err(ErrorKind::IncompatibleDataSize);
            }
            let v = literal_integer(lit)? as u8;
            let opcode = MOV_BASE_8 | (d.code() << 4) | (IMM_CODE << 1);
            Ok(no_relocs(vec![opcode, v]))
        }
        (Operand::Reg16(d), Operand::Reg16(s)) => {
            let opcode = MOV_BASE_16 | (d.code() << 4) | (s.code() << 1);
            Ok(no_relocs(vec![opcode]))
        }
        (Operand::Reg16(d), Operand::Symbol(_)) => {
            let opcode = MOV_BASE_16 | (d.code() << 4) | (IMM_CODE << 1);
            let (addr_bytes, reloc) = encode_addr_operand(src, current_proc, 1)?;
            let mut bytes = vec![opcode];
            bytes.extend(addr_bytes);
            Ok(EncodeResult {
                bytes,
                relocations: reloc.into_iter().collect(),
            })
        }
        (Operand::Reg16(d), Operand::Literal(lit)) => {
            if !is_numeric_literal(lit) {
                return Err(ErrorKind::IncompatibleDataType);
            }
            if lit.bit_size() > 16 {
                return Err(ErrorKind::IncompatibleDataSize);
            }
            let v = literal_integer(lit)? as u16;
            let opcode = MOV_BASE_16 | (d.code() << 4) | (IMM_CODE << 1);
            let mut bytes = vec![opcode];
            bytes.extend(v.to_le_bytes());
            Ok(no_relocs(bytes))
        }
        (Operand::Reg8(_), Operand::Reg16(_)) | (Operand::Reg16(_), Operand::Reg8(_)) => {
            Err(ErrorKind::IncompatibleRegisterSize)
        }
        (Operand::Invalid(t), _) | (_, Operand::Invalid(t)) => Err(ErrorKind::InvalidOperand(t.clone())),
        _ => Err(ErrorKind::UnsupportedOperand(format!("mov {dst:?}, {src:?}"))),
    }
}

pub fn encode_loda(operands: &[Operand], current_proc: Option<&str>) -> Result<EncodeResult, ErrorKind> {
    expect_arity("loda", operands, 2)?;
    let reg = match &operands[0] {
        Operand::Reg8(r) => *r,
        Operand::Invalid(t) => return Err(ErrorKind::InvalidOperand(t.clone())),
        other => return Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    };
    let opcode = LODA_BASE | (reg.code() << 4);
    let (addr_bytes, reloc) = encode_addr_operand(&operands[1], current_proc, 1)?;
    let mut bytes = vec![opcode];
    bytes.extend(addr_bytes);
    Ok(EncodeResult {
        bytes,
        relocations: reloc.into_iter().collect(),
    })
}

pub fn encode_stoa(operands: &[Operand], current_proc: Option<&str>) -> Result<EncodeResult, ErrorKind> {
    expect_arity("stoa", operands, 2)?;
    let reg = match &operands[1] {
        Operand::Reg8(r) => *r,
        Operand::Invalid(t) => return Err(ErrorKind::InvalidOperand(t.clone())),
        other => return Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    };
    let opcode = STOA_BASE | (reg.code() << 1);
    let (addr_bytes, reloc) = encode_addr_operand(&operands[0], current_proc, 1)?;
    let mut bytes = vec![opcode];
    bytes.extend(addr_bytes);
    Ok(EncodeResult {
        bytes,
        relocations: reloc.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Reg16, Reg8};

    #[test]
    fn mov_reg_immediate() {
        let result = encode_mov(&[Operand::Reg8(Reg8::A), Operand::Literal(mpcore::Literal::parse("0x2A").unwrap())], None).unwrap();
        assert_eq!(result.bytes, vec![MOV_BASE_8 | (0 << 4) | (IMM_CODE << 1), 0x2A]);
    }

    #[test]
    fn mov_reg16_symbol_emits_relocation() {
        let result = encode_mov(&[Operand::Reg16(Reg16::Hl), Operand::Symbol("loop".into())], None).unwrap();
        assert_eq!(result.bytes.len(), 3);
        assert_eq!(result.relocations[0].offset, 1);
        assert_eq!(result.relocations[0].symbol_name, "loop");
    }

    #[test]
    fn mov_mismatched_register_sizes_errors() {
        let err = encode_mov(&[Operand::Reg8(Reg8::A), Operand::Reg16(Reg16::Hl)], None).unwrap_err();
        assert_eq!(err, ErrorKind::IncompatibleRegisterSize);
    }

    #[test]
    fn stoa_places_opcode_before_address_bytes() {
        let result = encode_stoa(
            &[Operand::Literal(mpcore::Literal::parse("0x2000").unwrap()), Operand::Reg8(Reg8::A)],
            None,
        )
        .unwrap();
        assert_eq!(result.bytes[0], STOA_BASE);
        assert_eq!(&result.bytes[1..], &0x2000u16.to_le_bytes());
    }
}
