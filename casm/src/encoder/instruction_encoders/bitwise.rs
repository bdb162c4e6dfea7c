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
use crate::encoder::operand_validators::{alu_operand_code, expect_arity, reg_or_mem_code};
use mpcore::ErrorKind;

fn encode_logic(mnemonic: &str, base: u8, operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity(mnemonic, operands, 1)?;
    let (code, imm) = alu_operand_code(&operands[0], MEM_CODE, IMM_CODE)?;
    let mut bytes = vec![base | code];
    bytes.extend(imm);
    Ok(EncodeResult {
        bytes,
        relocations: Vec::new(),
    })
}

pub fn encode_and(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_logic("and", AND_BASE, operands)
}

pub fn encode_or(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_logic("or", OR_BASE, operands)
}

pub fn encode_xor(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_logic("xor", XOR_BASE, operands)
}

/// `not`/`shl`/`shr` share a shape with `inc`/`dec` but use `m`'s
/// "immediate" sub-code (0b111) rather than its "memory" one (spec
/// §4.5), since these are unary bit ops, not arithmetic on a byte slot.
fn encode_unary_bitop(mnemonic: &str, base: u8, operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity(mnemonic, operands, 1)?;
    let (code, _) = reg_or_mem_code(&operands[0], IMM_CODE)?;
    Ok(EncodeResult {
        bytes: vec![base | code],
        relocations: Vec::new(),
    })
}

pub fn encode_not(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_unary_bitop("not", NOT_BASE, operands)
}

pub fn encode_shl(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_unary_bitop("shl", SHL_BASE, operands)
}

pub fn encode_shr(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_unary_bitop("shr", SHR_BASE, operands)
}
