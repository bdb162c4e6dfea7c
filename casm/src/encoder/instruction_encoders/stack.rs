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
use crate::encoder::constants::{POP_BASE, PUSH_BASE};
use crate::encoder::operand_validators::expect_arity;
use crate::encoder::utility_functions::no_relocs;
use mpcore::ErrorKind;

fn reg8_code(op: &Operand) -> Result<u8, ErrorKind> {
    match op {
        Operand::Reg8(r) => Ok(r.code()),
        Operand::Invalid(t) => Err(ErrorKind::InvalidOperand(t.clone())),
        other => Err(ErrorKind::UnsupportedOperand(format!("{other:?}"))),
    }
}

pub fn encode_push(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity("push", operands, 1)?;
    let code = reg8_code(&operands[0])?;
    Ok(no_relocs(vec![PUSH_BASE | (code << 4) | (code << 1)]))
}

pub fn encode_pop(operands: &[Operand]) -> Result<EncodeResult, ErrorKind> {
    expect_arity("pop", operands, 1)?;
    let code = reg8_code(&operands[0])?;
    Ok(no_relocs(vec![POP_BASE | (code << 4) | (code << 1)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Reg8;

    #[test]
    fn push_and_pop_share_the_register_field_layout() {
        let push = encode_push(&[Operand::Reg8(Reg8::B)]).unwrap();
        let pop = encode_pop(&[Operand::Reg8(Reg8::B)]).unwrap();
        assert_eq!(push.bytes[0] & 0x01, 0);
        assert_eq!(pop.bytes[0] & 0x01, 1);
    }
}
