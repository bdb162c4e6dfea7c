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

use crate::ast::{Operand, Reg16, Reg8};
use mpcore::ErrorKind;

pub fn expect_arity(mnemonic: &str, operands: &[Operand], n: usize) -> Result<(), ErrorKind> {
    if operands.len() < n {
        return Err(ErrorKind::InsufficientOperands(mnemonic.to_string()));
    }
    if operands.len() > n {
        return Err(ErrorKind::TooManyOperands(mnemonic.to_string()));
    }
    Ok(())
}

pub fn expect_reg8(op: &Operand) -> Result<Reg8, ErrorKind> {
    match op {
        Operand::Reg8(r) => Ok(*r),
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}

pub fn expect_reg16(op: &Operand) -> Result<Reg16, ErrorKind> {
    match op {
        Operand::Reg16(r) => Ok(*r),
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}

/// Operand code + any immediate byte for an ALU/inc-dec-style unary
/// operand: `m` (code 6), a matched-size register, or an 8-bit
/// immediate (code 7, one byte appended).
pub fn reg_or_mem_code(op: &Operand, mem_code: u8) -> Result<(u8, Option<u8>), ErrorKind> {
    match op {
        Operand::Mem => Ok((mem_code, None)),
        Operand::Reg8(r) => Ok((r.code(), None)),
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}

/// ALU-family operand: `m`, an 8-bit register, or an immediate ≤8 bits
/// (never a string). Returns the sub-code and the immediate byte to
/// append, if any.
pub fn alu_operand_code(op: &Operand, mem_code: u8, imm_code: u8) -> Result<(u8, Option<u8>), ErrorKind> {
    match op {
        Operand::Mem => Ok((mem_code, None)),
        Operand::Reg8(r) => Ok((r.code(), None)),
        Operand::Literal(lit) => {
            if !super::utility_functions::is_numeric_literal(lit) {
                return Err(ErrorKind::IncompatibleDataType);
            }
            if lit.bit_size() > 8 {
                return Err(ErrorKind::IncompatibleDataSize);
            }
            let v = super::utility_functions::literal_integer(lit)?;
            Ok((imm_code, Some(v as u8)))
        }
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}
