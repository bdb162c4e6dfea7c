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
use crate::encoder::constants::{IMM_CODE, MEM_CODE};
use mpcore::{ErrorKind, LiteralKind, LiteralValue};

/// A two-byte little-endian address: either a literal value, or zero
/// bytes with a deferred relocation naming the target symbol.
pub fn encode_addr_operand(
    op: &Operand,
    current_proc: Option<&str>,
    offset: u16,
) -> Result<(Vec<u8>, Option<PendingRelocation>), ErrorKind> {
    match op {
        Operand::Literal(lit) => {
            let v = literal_integer(lit)?;
            if lit.bit_size() > 16 {
                return Err(ErrorKind::IncompatibleAddrSize);
            }
            Ok(((v as u16).to_le_bytes().to_vec(), None))
        }
        Operand::Symbol(name) => {
            let expanded = expand_local(name, current_proc);
            Ok((
                vec![0, 0],
                Some(PendingRelocation {
                    offset,
                    symbol_name: expanded,
                }),
            ))
        }
        _ => Err(ErrorKind::InvalidOperand(format!("{op:?}"))),
    }
}

/// Extracts a plain non-negative integer out of a literal, rejecting
/// char/string literals where a numeric value is required.
pub fn literal_integer(lit: &mpcore::Literal) -> Result<u64, ErrorKind> {
    match lit.value() {
        LiteralValue::Integer(v) => Ok(*v),
        LiteralValue::CharSeq(_) => Err(ErrorKind::IncompatibleDataType),
    }
}

/// True when a literal is a bare numeric (not a char/string literal).
pub fn is_numeric_literal(lit: &mpcore::Literal) -> bool {
    matches!(
        lit.kind(),
        LiteralKind::Decimal | LiteralKind::Hex | LiteralKind::Binary | LiteralKind::Octal
    )
}

pub fn no_relocs(bytes: Vec<u8>) -> EncodeResult {
    EncodeResult {
        bytes,
        relocations: Vec::new(),
    }
}
