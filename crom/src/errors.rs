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

/// C9's closed error set, carried over from the teacher pack's ROM
/// tooling (`i18n.py`'s `error_messages` catalog) in the same
/// typed-payload style as `mpcore::ErrorKind`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RomError {
    #[error("missing output file extension '{0}'")]
    MissingOutputFileExtension(String),
    #[error("invalid output file extension '{0}'")]
    InvalidOutputFileExtension(String),
    #[error("invalid column number '{0}'")]
    InvalidColumnNumber(String),
    #[error("invalid bit width '{0}'")]
    InvalidBitWidth(String),
    #[error("file not found '{0}'")]
    FileNotFound(String),
    #[error("invalid flag value '{0}'")]
    InvalidFlagValue(String),
    #[error("invalid flag name '{0}'")]
    InvalidFlagName(String),
    #[error("flags exceeding bit width (flags: {flags_bits}-bit, given: {given_bits}-bit)")]
    FlagsExceedingBitWidth { flags_bits: u32, given_bits: u32 },
    #[error("invalid address value '{0}'")]
    InvalidAddrValue(String),
    #[error("address column not found '{0}'")]
    AddrColumnNotFound(usize),
    #[error("incompatible address size (given: {given}-bit, max: {max}-bit)")]
    IncompatibleAddrSize { given: u32, max: u32 },
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("invalid data value '{0}'")]
    InvalidDataValue(String),
    #[error("data column not found '{0}'")]
    DataColumnNotFound(usize),
    #[error("incompatible data size (given: {given}-bit, max: {max}-bit)")]
    IncompatibleDataSize { given: u32, max: u32 },
    #[error("invalid extract-bits range '{0}'")]
    InvalidExtractBits(String),
}
