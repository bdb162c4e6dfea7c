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

use thiserror::Error;

/// The closed set of error kinds shared by the assembler and the linker.
///
/// Variants carry their own typed payload rather than a string bag, so
/// message formatting stays a pure function of kind + payload (see
/// `Display`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // --- lexical ---
    #[error("unexpected character '{0}'")]
    Unexpected(char),

    // --- naming ---
    #[error("invalid symbol name: \"{0}\"")]
    InvalidSymbolName(String),
    #[error("duplicate symbol: \"{0}\"")]
    DuplicateSymbol(String),
    #[error("invalid procedure name: \"{0}\"")]
    InvalidProcName(String),

    // --- structural ---
    #[error("instruction outside of any symbol (missing label)")]
    InstructionWithoutSymbol,
    #[error("unexpected .proc (already inside a procedure)")]
    UnexpectedProc,
    #[error("unexpected .endproc (not inside a procedure)")]
    UnexpectedEndproc,
    #[error("duplicate directive: .{0}")]
    DuplicateDirective(String),
    #[error("invalid directive: .{0}")]
    InvalidDirective(String),
    #[error("invalid mnemonic: \"{0}\"")]
    InvalidMnemonic(String),

    // --- operand ---
    #[error("insufficient operands for \"{0}\"")]
    InsufficientOperands(String),
    #[error("too many operands for \"{0}\"")]
    TooManyOperands(String),
    #[error("invalid operand: \"{0}\"")]
    InvalidOperand(String),
    #[error("unsupported operand: \"{0}\"")]
    UnsupportedOperand(String),
    #[error("incompatible register size")]
    IncompatibleRegisterSize,
    #[error("incompatible data size")]
    IncompatibleDataSize,
    #[error("incompatible address size")]
    IncompatibleAddrSize,
    #[error("incompatible data type")]
    IncompatibleDataType,
    #[error("invalid int argument: \"{0}\"")]
    InvalidInt(String),
    #[error("no data given")]
    NoData,
    #[error("unsupported multiplier")]
    UnsupportedMultiplier,
    #[error("invalid multiplier: \"{0}\"")]
    InvalidMultiplier(String),
    #[error("unsupported multiplier size")]
    UnsupportedMultiplierSize,

    // --- I/O ---
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("unexpected end of file")]
    UnexpectedEof,
    #[error("corrupt object file: {0}")]
    CorruptObjFile(String),
    #[error("not an object file")]
    NotObjFile,
    #[error("incompatible object file version: {0}")]
    IncompatibleObjFileVersion(u8),

    // --- link ---
    #[error("duplicate object file: {0}")]
    DuplicateObjFile(String),
    #[error("unknown symbol: \"{0}\"")]
    UnknownSymbol(String),
    #[error("ambiguous symbol: \"{0}\"")]
    AmbiguousSymbol(String),
    #[error("ambiguous link base")]
    AmbiguousLinkBase,
}

/// One error, anchored to the source position it was raised at.
///
/// `Display` renders the `file:line: error: <msg>` prefix from spec §7
/// followed by the offending source line, matching the original
/// assembler's `parser_error` output.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub file: String,
    pub line: usize,
    pub kind: ErrorKind,
    pub source_line: String,
}

impl Diagnostic {
    pub fn new(file: impl Into<String>, line: usize, kind: ErrorKind, source_line: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
            source_line: source_line.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:{}: error: {}", self.file, self.line, self.kind)?;
        write!(f, " {}", self.source_line.trim())
    }
}

impl std::error::Error for Diagnostic {}
