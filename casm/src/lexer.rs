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

//! C2 — tokenizes one source line with `grammar.pest`, then groups the
//! resulting tokens into `{directive?, label?, mnemonic?, operands}`.

use mpcore::ErrorKind;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct LineParser;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub directive: Option<String>,
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operands: Vec<String>,
}

/// Raw token kinds as produced by the grammar, before grouping.
enum Tok {
    Bare(String),
    Quoted(String),
    Comma,
    LParen,
    RParen,
}

impl Tok {
    fn text(&self) -> &str {
        match self {
            Tok::Bare(s) | Tok::Quoted(s) => s,
            Tok::Comma => ",",
            Tok::LParen => "(",
            Tok::RParen => ")",
        }
    }

    fn is_bare(&self) -> bool {
        matches!(self, Tok::Bare(_))
    }
}

pub fn lex(line: &str) -> Result<Line, ErrorKind> {
    let mut pairs =
        LineParser::parse(Rule::line, line).map_err(|_| ErrorKind::Unexpected(first_offending_char(line)))?;
    let line_pair = pairs.next().expect("grammar always produces a `line` pair");

    let mut toks = Vec::new();
    for pair in line_pair.into_inner() {
        let text = pair.as_str();
        let tok = match pair.as_rule() {
            Rule::dq_string | Rule::sq_string => Tok::Quoted(text.to_string()),
            Rule::comma => Tok::Comma,
            Rule::lparen => Tok::LParen,
            Rule::rparen => Tok::RParen,
            Rule::bare_token => Tok::Bare(text.to_string()),
            Rule::token | Rule::line | Rule::EOI => continue,
        };
        toks.push(tok);
    }

    group(&toks)
}

fn first_offending_char(line: &str) -> char {
    line.chars().find(|c| !c.is_ascii_whitespace()).unwrap_or(' ')
}

fn group(toks: &[Tok]) -> Result<Line, ErrorKind> {
    if toks.is_empty() {
        return Ok(Line::default());
    }

    let mut idx = 0;
    let mut out = Line::default();

    if toks[0].is_bare() {
        let text = toks[0].text();
        if let Some(rest) = text.strip_prefix('.') {
            if rest.contains(':') {
                return Err(ErrorKind::Unexpected(':'));
            }
            if rest.contains('@') {
                return Err(ErrorKind::Unexpected('@'));
            }
            out.directive = Some(rest.to_string());
            idx = 1;
        } else if let Some(stripped) = text.strip_suffix(':') {
            if stripped.contains('.') {
                return Err(ErrorKind::Unexpected('.'));
            }
            if stripped.chars().skip(1).any(|c| c == '@') {
                return Err(ErrorKind::Unexpected('@'));
            }
            out.label = Some(stripped.to_string());
            idx = 1;
        }
    }

    // any remaining bare token that still looks like a directive or label
    // marker is a structural error: at most one of {directive, label} per
    // line, and only at the very start.
    for tok in &toks[idx..] {
        if !tok.is_bare() {
            continue;
        }
        let text = tok.text();
        if text.starts_with('.') {
            return Err(ErrorKind::Unexpected('.'));
        }
        if text.ends_with(':') {
            return Err(ErrorKind::Unexpected(':'));
        }
    }

    let rest = &toks[idx..];
    if rest.is_empty() {
        return Ok(out);
    }

    if matches!(rest[0], Tok::Comma) {
        return Err(ErrorKind::Unexpected(','));
    }
    if matches!(rest[rest.len() - 1], Tok::Comma) {
        return Err(ErrorKind::Unexpected(','));
    }

    let operand_toks = if out.directive.is_some() {
        rest
    } else {
        out.mnemonic = Some(rest[0].text().to_string());
        &rest[1..]
    };
    out.operands = group_operands(operand_toks)?;

    Ok(out)
}

/// Splits a token run on commas, joining each comma-delimited run of
/// tokens with a single space (spec §4.2) so `( 4 )` multipliers survive
/// as one operand string.
fn group_operands(toks: &[Tok]) -> Result<Vec<String>, ErrorKind> {
    if toks.is_empty() {
        return Ok(Vec::new());
    }

    let mut operands = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for tok in toks {
        if matches!(tok, Tok::Comma) {
            if current.is_empty() {
                return Err(ErrorKind::Unexpected(','));
            }
            operands.push(current.join(" "));
            current.clear();
        } else {
            current.push(tok.text());
        }
    }
    if current.is_empty() {
        return Err(ErrorKind::Unexpected(','));
    }
    operands.push(current.join(" "));
    Ok(operands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_label_and_zero_operand_mnemonic() {
        let line = lex("main: nop").unwrap();
        assert_eq!(line.label.as_deref(), Some("main"));
        assert_eq!(line.mnemonic.as_deref(), Some("nop"));
        assert!(line.operands.is_empty());
    }

    #[test]
    fn lexes_directive_with_operand() {
        let line = lex(".base 0x1000").unwrap();
        assert_eq!(line.directive.as_deref(), Some("base"));
        assert_eq!(line.operands, vec!["0x1000".to_string()]);
    }

    #[test]
    fn comma_separates_operands() {
        let line = lex("  mov a, 0x2A ; trailing comment").unwrap();
        assert_eq!(line.mnemonic.as_deref(), Some("mov"));
        assert_eq!(line.operands, vec!["a".to_string(), "0x2A".to_string()]);
    }

    #[test]
    fn paren_multiplier_rejoins_as_one_operand() {
        let line = lex("db 0x41 (4)").unwrap();
        assert_eq!(line.operands, vec!["0x41 ( 4 )".to_string()]);
    }

    #[test]
    fn quoted_string_operand_keeps_its_quotes() {
        let line = lex("db 'AB', 0x00").unwrap();
        assert_eq!(line.operands, vec!["'AB'".to_string(), "0x00".to_string()]);
    }

    #[test]
    fn empty_line_yields_default() {
        assert_eq!(lex("   ; just a comment").unwrap(), Line::default());
    }

    #[test]
    fn leading_comma_is_unexpected() {
        assert_eq!(lex("db , 1").unwrap_err(), ErrorKind::Unexpected(','));
    }

    #[test]
    fn trailing_comma_is_unexpected() {
        assert_eq!(lex("db 1,").unwrap_err(), ErrorKind::Unexpected(','));
    }

    #[test]
    fn directive_after_mnemonic_is_unexpected() {
        assert_eq!(lex("nop .base").unwrap_err(), ErrorKind::Unexpected('.'));
    }

    #[test]
    fn local_symbol_reference_is_a_plain_operand() {
        let line = lex("jmp @loop").unwrap();
        assert_eq!(line.operands, vec!["@loop".to_string()]);
    }
}
