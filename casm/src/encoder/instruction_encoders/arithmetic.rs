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

/// Shared shape for the ALU family: one operand (`m`, an 8-bit register,
/// or an 8-bit immediate), opcode `base | code` with `code` shifted left
/// one bit for the families that reserve the low bit (spec §4.5).
fn encode_alu(mnemonic: &str, base: u8, shifted: bool, operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity(mnemonic, operands, 1)?;
    let (code, imm) = alu_operand_code(&operands[0], MEM_CODE, IMM_CODE)?;
    let opcode = if shifted { base | (code << 1) } else { base | code };
    let mut bytes = vec![opcode];
    bytes.extend(imm);
    Ok(EncodeResult {
        bytes,
        relocations: Vec::new(),
    })
}

pub fn encode_add(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_alu("add", ADD_BASE, true, operands)
}

pub fn encode_sub(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_alu("sub", SUB_BASE, true, operands)
}

pub fn encode_cmp(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_alu("cmp", CMP_BASE, true, operands)
}

pub fn encode_adc(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_alu("adc", ADC_BASE, false, operands)
}

pub fn encode_sbb(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    encode_alu("sbb", SBB_BASE, false, operands)
}

pub fn encode_inc(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity("inc", operands, 1)?;
    let (code, _) = reg_or_mem_code(&operands[0], MEM_CODE)?;
    Ok(EncodeResult {
        bytes: vec![INC_BASE | code],
        relocations: Vec::new(),
    })
}

pub fn encode_dec(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity("dec", operands, 1)?;
    let (code, _) = reg_or_mem_code(&operands[0], MEM_CODE)?;
    Ok(EncodeResult {
        bytes: vec![DEC_BASE | code],
        relocations: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Reg8;

    #[test]
    fn add_immediate_appends_one_byte() {
        let lit = mpcore::Literal::parse("0x05").unwrap();
        let result = encode_add(&[Operand::Literal(lit)]).unwrap();
        assert_eq!(result.bytes, vec![ADD_BASE | (IMM_CODE << 1), 0x05]);
    }

    #[test]
    fn adc_uses_unshifted_code() {
        let result = encode_adc(&[Operand::Reg8(Reg8::C)]).unwrap();
        assert_eq!(result.bytes, vec![ADC_BASE | Reg8::C.code()]);
    }

    #[test]
    fn inc_mem_uses_mem_subcode() {
        let result = encode_inc(&[Operand::Mem]).unwrap();
        assert_eq!(result.bytes, vec![INC_BASE | MEM_CODE]);
    }
}
