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

//! Fixed opcode table. Everything here is taken verbatim from the
//! encoding rules, except the jump/call family base opcodes and
//! condition-code numbering, which the rules leave as an open choice —
//! see the jump/call section below and `DESIGN.md`.

// --- operand sub-codes shared across families ---
pub const MEM_CODE: u8 = 0b110;
pub const IMM_CODE: u8 = 0b111;

// --- zero-operand table ---
pub const NOP: u8 = 0x00;
pub const HLT: u8 = 0xFF;
pub const RST: u8 = 0xF7;
pub const INCHL: u8 = 0x97;
pub const DECHL: u8 = 0xA7;
pub const PUSHHL: u8 = 0x91;
pub const POPHL: u8 = 0x95;
pub const PUSHF: u8 = 0x87;
pub const POPF: u8 = 0xD9;
pub const RET: u8 = 0x05;
pub const RC: u8 = 0x11;
pub const RNC: u8 = 0x15;
pub const RZ: u8 = 0x21;
pub const RNZ: u8 = 0x23;
pub const RA: u8 = 0x83;
pub const RNA: u8 = 0x85;
pub const IRET: u8 = 0xB5;

// --- mov ---
pub const MOV_BASE_8: u8 = 0b1000_0000;
pub const MOV_BASE_16: u8 = 0b0000_0000;

// --- loda / stoa ---
pub const LODA_BASE: u8 = 0b1000_1101;
pub const STOA_BASE: u8 = 0b1110_0001;

// --- push / pop ---
pub const PUSH_BASE: u8 = 0b1000_0000;
pub const POP_BASE: u8 = 0b1000_0001;

// --- ALU family (spec-given bases; note the differing shift per family) ---
pub const ADD_BASE: u8 = 0b0110_0000;
pub const SUB_BASE: u8 = 0b0110_0001;
pub const CMP_BASE: u8 = 0b0111_0000;
pub const ADC_BASE: u8 = 0b0101_0000;
pub const SBB_BASE: u8 = 0b0101_1000;
pub const AND_BASE: u8 = 0b0011_0000;
pub const OR_BASE: u8 = 0b0011_1000;
pub const XOR_BASE: u8 = 0b0100_0000;

// --- jump / call ---
// Resolves the opcode-table Open Question: condition codes 0..=5 match
// the six conditional zero-operand return opcodes above (rc->0, rnc->1,
// rz->2, rnz->3, ra->4, rna->5); 6 is the "always" pseudo-condition used
// by the unconditional mnemonic. `flip` is the low bit: 0 selects the
// `m`-operand form (no address bytes), 1 the address/symbol form.
pub const JMP_BASE: u8 = 0xC0;
pub const CALL_BASE: u8 = 0xC8;
pub const CC_ALWAYS: u8 = 6;
pub const CC_C: u8 = 0;
pub const CC_NC: u8 = 1;
pub const CC_Z: u8 = 2;
pub const CC_NZ: u8 = 3;
pub const CC_A: u8 = 4;
pub const CC_NA: u8 = 5;

// --- int ---
pub const INT_BASE: u8 = 0xDF;
pub const INT_MAX: u64 = 63;

// --- inc/dec/not/shl/shr ---
pub const INC_BASE: u8 = 0xF0;
pub const DEC_BASE: u8 = 0xF8;
pub const NOT_BASE: u8 = 0x08;
pub const SHL_BASE: u8 = 0x18;
pub const SHR_BASE: u8 = 0x28;
