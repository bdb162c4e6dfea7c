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

//! C5 — the instruction encoder's single entry point. `encode` is the
//! pure function spec §4.5 describes: mnemonic + raw operand tokens in,
//! bytes + deferred relocations out, with no knowledge of files, lines,
//! or the symbol table beyond the current procedure name (needed only
//! to expand `@`-local symbol references).

pub mod components;
pub mod constants;
pub mod instruction_encoders;
pub mod operand_validators;
pub mod utility_functions;

use crate::ast::parse_operand;
use components::EncodeResult;
use constants::*;
use instruction_encoders::{arithmetic, bitwise, control_flow, load_store, misc, stack};
use mpcore::ErrorKind;

pub fn encode(mnemonic: &str, operand_tokens: &[String], current_proc: Option<&str>) -> Result<EncodeResult, ErrorKind> {
    let operands: Vec<_> = operand_tokens.iter().map(|t| parse_operand(t)).collect();

    match mnemonic {
        "nop" => misc::encode_zero_operand(NOP, &operands),
        "hlt" => misc::encode_zero_operand(HLT, &operands),
        "rst" => misc::encode_zero_operand(RST, &operands),
        "inchl" => misc::encode_zero_operand(INCHL, &operands),
        "dechl" => misc::encode_zero_operand(DECHL, &operands),
        "pushhl" => misc::encode_zero_operand(PUSHHL, &operands),
        "pophl" => misc::encode_zero_operand(POPHL, &operands),
        "pushf" => misc::encode_zero_operand(PUSHF, &operands),
        "popf" => misc::encode_zero_operand(POPF, &operands),
        "ret" => misc::encode_zero_operand(RET, &operands),
        "rc" | "rb" | "rnae" => misc::encode_zero_operand(RC, &operands),
        "rnc" | "rnb" | "rae" => misc::encode_zero_operand(RNC, &operands),
        "rz" | "re" => misc::encode_zero_operand(RZ, &operands),
        "rnz" | "rne" => misc::encode_zero_operand(RNZ, &operands),
        "ra" | "rnbe" => misc::encode_zero_operand(RA, &operands),
        "rna" | "rbe" => misc::encode_zero_operand(RNA, &operands),
        "iret" => misc::encode_zero_operand(IRET, &operands),

        "mov" => load_store::encode_mov(&operands, current_proc),
        "loda" => load_store::encode_loda(&operands, current_proc),
        "stoa" => load_store::encode_stoa(&operands, current_proc),

        "push" => stack::encode_push(&operands),
        "pop" => stack::encode_pop(&operands),

        "add" => arithmetic::encode_add(&operands),
        "sub" => arithmetic::encode_sub(&operands),
        "cmp" => arithmetic::encode_cmp(&operands),
        "adc" => arithmetic::encode_adc(&operands),
        "sbb" => arithmetic::encode_sbb(&operands),
        "inc" => arithmetic::encode_inc(&operands),
        "dec" => arithmetic::encode_dec(&operands),

        "and" => bitwise::encode_and(&operands),
        "or" => bitwise::encode_or(&operands),
        "xor" => bitwise::encode_xor(&operands),
        "not" => bitwise::encode_not(&operands),
        "shl" => bitwise::encode_shl(&operands),
        "shr" => bitwise::encode_shr(&operands),

        "jmp" => control_flow::encode_jmp(CC_ALWAYS, &operands, current_proc),
        "jc" | "jb" | "jnae" => control_flow::encode_jmp(CC_C, &operands, current_proc),
        "jnc" | "jnb" | "jae" => control_flow::encode_jmp(CC_NC, &operands, current_proc),
        "jz" | "je" => control_flow::encode_jmp(CC_Z, &operands, current_proc),
        "jnz" | "jne" => control_flow::encode_jmp(CC_NZ, &operands, current_proc),
        "ja" | "jnbe" => control_flow::encode_jmp(CC_A, &operands, current_proc),
        "jna" | "jbe" => control_flow::encode_jmp(CC_NA, &operands, current_proc),

        "call" => control_flow::encode_call(CC_ALWAYS, &operands, current_proc),
        "cc" | "cb" | "cnae" => control_flow::encode_call(CC_C, &operands, current_proc),
        "cnc" | "cnb" | "cae" => control_flow::encode_call(CC_NC, &operands, current_proc),
        "cz" | "ce" => control_flow::encode_call(CC_Z, &operands, current_proc),
        "cnz" | "cne" => control_flow::encode_call(CC_NZ, &operands, current_proc),
        "ca" | "cnbe" => control_flow::encode_call(CC_A, &operands, current_proc),
        "cna" | "cbe" => control_flow::encode_call(CC_NA, &operands, current_proc),

        "int" => misc::encode_int(INT_BASE, &operands),
        "db" => misc::encode_db(&operands),
        "dw" => misc::encode_dw(&operands, current_proc),

        other => Err(ErrorKind::InvalidMnemonic(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_zero_operand_mnemonic() {
        let result = encode("nop", &[], None).unwrap();
        assert_eq!(result.bytes, vec![NOP]);
    }

    #[test]
    fn zero_operand_with_stray_operand_errors() {
        assert!(matches!(
            encode("hlt", &["a".to_string()], None),
            Err(ErrorKind::TooManyOperands(_))
        ));
    }

    #[test]
    fn unknown_mnemonic_errors() {
        assert_eq!(
            encode("frobnicate", &[], None).unwrap_err(),
            ErrorKind::InvalidMnemonic("frobnicate".to_string())
        );
    }

    #[test]
    fn jmp_and_call_route_to_distinct_families() {
        let jmp = encode("jmp", &["m".to_string()], None).unwrap();
        let call = encode("call", &["m".to_string()], None).unwrap();
        assert_ne!(jmp.bytes[0], call.bytes[0]);
    }

    #[test]
    fn conditional_aliases_share_one_opcode() {
        let a = encode("jc", &["m".to_string()], None).unwrap();
        let b = encode("jb", &["m".to_string()], None).unwrap();
        let c = encode("jnae", &["m".to_string()], None).unwrap();
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(b.bytes, c.bytes);
    }

    #[test]
    fn db_dispatches_through_top_level_encode() {
        let result = encode("db", &["'AB'".to_string()], None).unwrap();
        assert_eq!(result.bytes, vec![0x41, 0x42]);
    }
}
