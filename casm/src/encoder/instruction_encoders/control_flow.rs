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
use crate::encoder::utility_functions::{encode_addr_operand, is_numeric_literal, no_relocs};
use mpcore::ErrorKind;

fn encode_branch(
    mnemonic: &str,
    family_base: u8,
    cc: u8,
    operands: &[Operand],
    current_proc: Option<&str>,
) -> Result<EncodeResult, ErrorKind> {
    expect_arity(mnemonic, operands, 1)?;
    match &operands[0] {
        Operand::Mem => Ok(no_relocs(vec![family_base + (cc << 1)])),
        Operand::Symbol(_) => {
            let opcode = family_base + (cc << 1) + 1;
            let (addr_bytes, reloc) = encode_addr_operand(&operands[0], current_proc, 1)?;
            let mut bytes = vec![opcode];
            bytes.extend(addr_bytes);
            Ok(EncodeResult {
                bytes,
                relocations: reloc.into_iter().collect(),
            })
        }
        Operand::Literal(lit) if is_numeric_literal(lit) => {
            let opcode = family_base + (cc << 1) + 1;
            let (addr_bytes, _) = encode_addr_operand(&operands[0], current_proc, 1)?;
            let mut bytes = vec![opcode];
            bytes.extend(addr_bytes);
            Ok(no_relocs(bytes))
        }
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        _ => Err(ErrorKind::UnsupportedOperand(format!("{:?}", operands[0]))),
    }
}

pub fn encode_jmp(cc: u8, operands: &[Operand], current_proc: Option<&str>) -> Result<EncodeResult, ErrorKind> {
    encode_branch("jmp", JMP_BASE, cc, operands, current_proc)
}

pub fn encode_call(cc: u8, operands: &[Operand], current_proc: Option<&str>) -> Result<EncodeResult, ErrorKind> {
    encode_branch("call", CALL_BASE, cc, operands, current_proc)
}
