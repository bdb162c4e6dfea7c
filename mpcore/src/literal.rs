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

//! C1 — the literal parser. Pure functions over token strings, no
//! knowledge of lines, procedures, or the symbol table.

/// Reserved operand words — never valid as symbol names (spec §6).
pub const RESERVED_WORDS: &[&str] = &["a", "b", "c", "d", "h", "l", "hl", "ip", "sp", "m"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LiteralKind {
    Decimal,
    Hex,
    Binary,
    Octal,
    Char,
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Integer(u64),
    CharSeq(Vec<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    kind: LiteralKind,
    value: LiteralValue,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// The minimum multiple-of-8 bit width that holds this literal's value.
    /// A bare `0` is fixed at 8 bits (a 0-bit literal is disallowed).
    pub fn bit_size(&self) -> u32 {
        match &self.value {
            LiteralValue::Integer(v) => bits_for(*v),
            LiteralValue::CharSeq(chars) => chars
                .iter()
                .map(|&c| bits_for(c as u64))
                .max()
                .unwrap_or(8),
        }
    }

    /// Parse a token into a literal, trying each disjoint pattern in turn.
    pub fn parse(token: &str) -> Option<Literal> {
        parse_hex(token)
            .or_else(|| parse_binary(token))
            .or_else(|| parse_octal(token))
            .or_else(|| parse_decimal(token))
            .or_else(|| parse_quoted(token))
    }

    pub fn is_valid(token: &str) -> bool {
        Literal::parse(token).is_some()
    }
}

fn bits_for(v: u64) -> u32 {
    if v == 0 {
        return 8;
    }
    let used = 64 - v.leading_zeros();
    used.div_ceil(8) * 8
}

fn parse_hex(token: &str) -> Option<Literal> {
    let digits = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X"))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let v = u64::from_str_radix(digits, 16).ok()?;
    Some(Literal {
        kind: LiteralKind::Hex,
        value: LiteralValue::Integer(v),
    })
}

fn parse_binary(token: &str) -> Option<Literal> {
    let digits = token.strip_prefix("0b").or_else(|| token.strip_prefix("0B"))?;
    if digits.is_empty() || !digits.chars().all(|c| c == '0' || c == '1') {
        return None;
    }
    let v = u64::from_str_radix(digits, 2).ok()?;
    Some(Literal {
        kind: LiteralKind::Binary,
        value: LiteralValue::Integer(v),
    })
}

fn parse_octal(token: &str) -> Option<Literal> {
    let digits = token.strip_prefix("0o").or_else(|| token.strip_prefix("0O"))?;
    if digits.is_empty() || !digits.chars().all(|c| ('0'..='7').contains(&c)) {
        return None;
    }
    let v = u64::from_str_radix(digits, 8).ok()?;
    Some(Literal {
        kind: LiteralKind::Octal,
        value: LiteralValue::Integer(v),
    })
}

fn parse_decimal(token: &str) -> Option<Literal> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let v: u64 = token.parse().ok()?;
    Some(Literal {
        kind: LiteralKind::Decimal,
        value: LiteralValue::Integer(v),
    })
}

fn parse_quoted(token: &str) -> Option<Literal> {
    let mut chars = token.chars();
    let quote = chars.next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    if !token.ends_with(quote) || token.chars().count() < 2 {
        return None;
    }
    let inner: String = token[quote.len_utf8()..token.len() - quote.len_utf8()].to_string();
    let codepoints: Vec<u32> = inner.chars().map(|c| c as u32).collect();
    match codepoints.len() {
        0 => None,
        1 => Some(Literal {
            kind: LiteralKind::Char,
            value: LiteralValue::Integer(codepoints[0] as u64),
        }),
        _ => Some(Literal {
            kind: LiteralKind::Str,
            value: LiteralValue::CharSeq(codepoints),
        }),
    }
}

/// A symbol name matches `[@_A-Za-z][_A-Za-z0-9]{0,254}` and is not a
/// reserved operand word.
pub fn is_valid_symbol_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 255 {
        return false;
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap();
    if !(first == '@' || first == '_' || first.is_ascii_alphabetic()) {
        return false;
    }
    if !chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        return false;
    }
    !RESERVED_WORDS.contains(&name)
}

/// True for any valid symbol name OR any valid non-char, non-string literal.
pub fn is_valid_addr(token: &str) -> bool {
    if is_valid_symbol_name(token) {
        return true;
    }
    matches!(
        Literal::parse(token).map(|l| l.kind()),
        Some(LiteralKind::Decimal | LiteralKind::Hex | LiteralKind::Binary | LiteralKind::Octal)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_zero_is_eight_bits() {
        let lit = Literal::parse("0").unwrap();
        assert_eq!(lit.value(), &LiteralValue::Integer(0));
        assert_eq!(lit.bit_size(), 8);
    }

    #[test]
    fn hex_rounds_up_to_multiple_of_eight() {
        let lit = Literal::parse("0x2A").unwrap();
        assert_eq!(lit.bit_size(), 8);
        let lit = Literal::parse("0x1FF").unwrap();
        assert_eq!(lit.bit_size(), 16);
    }

    #[test]
    fn binary_and_octal_parse() {
        assert_eq!(
            Literal::parse("0b1010").unwrap().value(),
            &LiteralValue::Integer(10)
        );
        assert_eq!(
            Literal::parse("0o17").unwrap().value(),
            &LiteralValue::Integer(15)
        );
    }

    #[test]
    fn char_literal_is_single_codepoint() {
        let lit = Literal::parse("'A'").unwrap();
        assert_eq!(lit.kind(), LiteralKind::Char);
        assert_eq!(lit.value(), &LiteralValue::Integer(b'A' as u64));
    }

    #[test]
    fn string_literal_is_ordered_codepoints() {
        let lit = Literal::parse("\"AB\"").unwrap();
        assert_eq!(lit.kind(), LiteralKind::Str);
        assert_eq!(
            lit.value(),
            &LiteralValue::CharSeq(vec!['A' as u32, 'B' as u32])
        );
        assert_eq!(lit.bit_size(), 8);
    }

    #[test]
    fn symbol_names_reject_reserved_words() {
        assert!(!is_valid_symbol_name("hl"));
        assert!(is_valid_symbol_name("_hl"));
        assert!(is_valid_symbol_name("@local"));
    }

    #[test]
    fn is_valid_addr_accepts_names_and_numerics_only() {
        assert!(is_valid_addr("loop_start"));
        assert!(is_valid_addr("0x2000"));
        assert!(!is_valid_addr("'x'"));
        assert!(!is_valid_addr("\"hi\""));
    }
}
