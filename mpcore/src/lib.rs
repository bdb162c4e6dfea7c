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

//! Shared data model for the assembler and linker: the literal parser
//! (C1), the ordered symbol table (C3), the per-symbol machine-code
//! store (C4), and the object file codec (C7).

pub mod errors;
pub mod literal;
pub mod object;
pub mod symbol_store;
pub mod symbol_table;

pub use errors::{Diagnostic, ErrorKind};
pub use literal::{Literal, LiteralKind, LiteralValue};
pub use object::ObjectFile;
pub use symbol_store::{Relocation, SymbolRecord, SymbolStore};
pub use symbol_table::SymbolTable;
