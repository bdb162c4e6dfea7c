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

//! Operand-level types shared between the lexer's raw token strings and
//! the encoder (C5). Parsing a token into an `Operand` never fails on
//! its own — it degrades to `Operand::Symbol`/`Operand::Invalid` and lets
//! the encoder raise the precise error for the instruction it's in.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    H,
    L,
}

impl Reg8 {
    pub fn code(self) -> u8 {
        match self {
            Reg8::A => 0,
            Reg8::B => 1,
            Reg8::C => 2,
            Reg8::D => 3,
            Reg8::H => 4,
            Reg8::L => 5,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reg16 {
    Hl,
    Ip,
    Sp,
}

impl Reg16 {
    pub fn code(self) -> u8 {
        match self {
            Reg16::Hl => 0,
            Reg16::Ip => 1,
            Reg16::Sp => 2,
        }
    }
}

/// One parsed operand token, before the encoder checks it against the
/// shape a given mnemonic requires.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Reg8(Reg8),
    Reg16(Reg16),
    /// The memory pseudo-register `m`.
    Mem,
    /// A bare numeric/char/string literal.
    Literal(mpcore::Literal),
    /// A symbol name (possibly `@`-local, not yet expanded).
    Symbol(String),
    /// `<lit> ( <mult> )`, reconstructed by the lexer into one
    /// space-joined token and split back apart here.
    Multiplied(Box<Operand>, String),
    /// Didn't match any recognized shape; the encoder reports
    /// `INVALID_OPERAND` naming the raw text.
    Invalid(String),
}

pub fn parse_operand(token: &str) -> Operand {
    if let Some(reg) = parse_reg8(token) {
        return Operand::Reg8(reg);
    }
    if let Some(reg) = parse_reg16(token) {
        return Operand::Reg16(reg);
    }
    if token == "m" {
        return Operand::Mem;
    }
    if let Some((lit, mult)) = parse_multiplied(token) {
        return Operand::Multiplied(Box::new(lit), mult);
    }
    if let Some(lit) = mpcore::Literal::parse(token) {
        return Operand::Literal(lit);
    }
    if mpcore::literal::is_valid_symbol_name(token) {
        return Operand::Symbol(token.to_string());
    }
    Operand::Invalid(token.to_string())
}

fn parse_reg8(token: &str) -> Option<Reg8> {
    Some(match token {
        "a" => Reg8::A,
        "b" => Reg8::B,
        "c" => Reg8::C,
        "d" => Reg8::D,
        "h" => Reg8::H,
        "l" => Reg8::L,
        _ => return None,
    })
}

fn parse_reg16(token: &str) -> Option<Reg16> {
    Some(match token {
        "hl" => Reg16::Hl,
        "ip" => Reg16::Ip,
        "sp" => Reg16::Sp,
        _ => return None,
    })
}

/// Splits the lexer's rejoined `"<lit> ( <mult> )"` string back into its
/// literal and multiplier parts. Returns `None` for anything that isn't
/// shaped like that (a bare literal falls through to the caller).
fn parse_multiplied(token: &str) -> Option<(Operand, String)> {
    let open = token.find('(')?;
    let close = token.rfind(')')?;
    if close < open {
        return None;
    }
    let lit_part = token[..open].trim();
    let mult_part = token[open + 1..close].trim();
    if lit_part.is_empty() || mult_part.is_empty() {
        return None;
    }
    let lit = parse_operand(lit_part);
    Some((lit, mult_part.to_string()))
}

/// Expands an `@`-local symbol name per spec §3/§4.6: `@foo` becomes
/// `<proc>_foo` inside an active procedure, else `_foo`. Non-local names
/// pass through unchanged.
pub fn expand_local(name: &str, current_proc: Option<&str>) -> String {
    match name.strip_prefix('@') {
        Some(rest) => match current_proc {
            Some(proc) => format!("{proc}_{rest}"),
            None => format!("_{rest}"),
        },
        None => name.to_string(),
    }
}
