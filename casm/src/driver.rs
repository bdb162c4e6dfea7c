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

//! C6 — the assembler driver. Walks a source file line by line, keeping
//! the `TopLevel`/`InProc` state spec §4.6 describes, dispatching
//! mnemonic lines through the encoder (C5) and accumulating bytes and
//! relocations into the running symbol table (C3) and store (C4).

use crate::ast::expand_local;
use crate::encoder;
use crate::lexer::{self, Line};
use mpcore::literal::is_valid_symbol_name;
use mpcore::{Diagnostic, ErrorKind, ObjectFile, SymbolStore, SymbolTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TopLevel,
    InProc,
}

/// The result of assembling one source file: the artifact built so far
/// (possibly incomplete, if errors were reported) plus every diagnostic
/// raised along the way.
pub struct AssembledFile {
    pub object: ObjectFile,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn assemble_source(file_name: &str, source: &str) -> AssembledFile {
    let mut symbol_table = SymbolTable::new();
    let mut symbol_store = SymbolStore::new();
    let mut link_base: Option<u16> = None;
    let mut state = State::TopLevel;
    let mut current_proc: Option<String> = None;
    let mut current_symbol: Option<String> = None;
    let mut diagnostics = Vec::new();

    'lines: for (i, raw_line) in source.lines().enumerate() {
        let line_no = i + 1;

        let line = match lexer::lex(raw_line) {
            Ok(l) => l,
            Err(kind) => {
                diagnostics.push(Diagnostic::new(file_name, line_no, kind, raw_line));
                continue;
            }
        };

        if let Some(directive) = &line.directive {
            match handle_directive(
                directive,
                &line,
                &mut state,
                &mut current_proc,
                &mut current_symbol,
                &mut link_base,
                &mut symbol_table,
                &mut symbol_store,
            ) {
                Ok(DirectiveOutcome::Continue) => continue 'lines,
                Ok(DirectiveOutcome::EndOfFile) => break 'lines,
                Err(kind) => {
                    diagnostics.push(Diagnostic::new(file_name, line_no, kind, raw_line));
                    continue 'lines;
                }
            }
        }

        if let Some(label) = &line.label {
            match define_label(label, current_proc.as_deref(), &mut symbol_table, &mut symbol_store) {
                Ok(name) => current_symbol = Some(name),
                Err(kind) => {
                    diagnostics.push(Diagnostic::new(file_name, line_no, kind, raw_line));
                    continue 'lines;
                }
            }
            // a label line may carry a mnemonic on the same line (e.g.
            // `main: nop`); fall through to the mnemonic check below.
        }

        if let Some(mnemonic) = &line.mnemonic {
            let Some(symbol) = current_symbol.clone() else {
                diagnostics.push(Diagnostic::new(file_name, line_no, ErrorKind::InstructionWithoutSymbol, raw_line));
                continue 'lines;
            };

            match encoder::encode(mnemonic, &line.operands, current_proc.as_deref()) {
                Ok(result) => {
                    let record = symbol_store.get_mut(&symbol).expect("current_symbol always has a record");
                    let base_offset = record.machine_code.len() as u16;
                    record.machine_code.extend(result.bytes);
                    for pending in result.relocations {
                        let symbol_index = symbol_table.index(&pending.symbol_name);
                        record.relocation_table.push(mpcore::Relocation {
                            machine_code_offset: base_offset + pending.offset,
                            symbol_index,
                        });
                    }
                }
                Err(kind) => {
                    diagnostics.push(Diagnostic::new(file_name, line_no, kind, raw_line));
                    continue 'lines;
                }
            }
        }
    }

    AssembledFile {
        object: ObjectFile::new(link_base, symbol_table, symbol_store),
        diagnostics,
    }
}

enum DirectiveOutcome {
    Continue,
    EndOfFile,
}

#[allow(clippy::too_many_arguments)]
fn handle_directive(
    directive: &str,
    line: &Line,
    state: &mut State,
    current_proc: &mut Option<String>,
    current_symbol: &mut Option<String>,
    link_base: &mut Option<u16>,
    symbol_table: &mut SymbolTable,
    symbol_store: &mut SymbolStore,
) -> Result<DirectiveOutcome, ErrorKind> {
    match directive {
        "proc" => {
            if *state == State::InProc {
                return Err(ErrorKind::UnexpectedProc);
            }
            let name = line.operands.first().ok_or_else(|| ErrorKind::InvalidProcName(String::new()))?;
            if name.starts_with('@') || !is_valid_symbol_name(name) {
                return Err(ErrorKind::InvalidProcName(name.clone()));
            }
            *state = State::InProc;
            *current_proc = Some(name.clone());
            let defined = define_label(name, current_proc.as_deref(), symbol_table, symbol_store)?;
            *current_symbol = Some(defined);
            Ok(DirectiveOutcome::Continue)
        }
        "endproc" => {
            if *state == State::TopLevel {
                return Err(ErrorKind::UnexpectedEndproc);
            }
            *state = State::TopLevel;
            *current_proc = None;
            *current_symbol = None;
            Ok(DirectiveOutcome::Continue)
        }
        "base" => {
            if link_base.is_some() {
                return Err(ErrorKind::DuplicateDirective("base".to_string()));
            }
            let token = line.operands.first().ok_or_else(|| ErrorKind::InsufficientOperands("base".to_string()))?;
            let lit = mpcore::Literal::parse(token).ok_or_else(|| ErrorKind::InvalidOperand(token.clone()))?;
            if !matches!(
                lit.kind(),
                mpcore::LiteralKind::Decimal | mpcore::LiteralKind::Hex | mpcore::LiteralKind::Binary | mpcore::LiteralKind::Octal
            ) {
                return Err(ErrorKind::IncompatibleDataType);
            }
            if lit.bit_size() > 16 {
                return Err(ErrorKind::IncompatibleDataSize);
            }
            let value = match lit.value() {
                mpcore::LiteralValue::Integer(v) => *v as u16,
                mpcore::LiteralValue::CharSeq(_) => unreachable!("numeric literal kind checked above"),
            };
            *link_base = Some(value);
            Ok(DirectiveOutcome::Continue)
        }
        "end" => Ok(DirectiveOutcome::EndOfFile),
        other => Err(ErrorKind::InvalidDirective(other.to_string())),
    }
}

/// Defines (or redefines-in-place) the symbol named by a label line —
/// expanding any `@`-local prefix, validating the name, and, if the
/// symbol was previously only referenced, moving its table entry to the
/// end so definition order matches source order (spec §4.6, I4).
fn define_label(
    raw_name: &str,
    current_proc: Option<&str>,
    symbol_table: &mut SymbolTable,
    symbol_store: &mut SymbolStore,
) -> Result<String, ErrorKind> {
    let name = expand_local(raw_name, current_proc);
    if !is_valid_symbol_name(&name) {
        return Err(ErrorKind::InvalidSymbolName(name));
    }
    if symbol_store.has(&name) {
        return Err(ErrorKind::DuplicateSymbol(name));
    }
    if symbol_table.has(&name) {
        let (old_index, new_index) = symbol_table.move_to_end(&name).expect("name is present");
        symbol_store.reindex_after_move(old_index, new_index);
    } else {
        symbol_table.index(&name);
    }
    symbol_store.add(symbol_table, &name, current_proc);
    Ok(name)
}
