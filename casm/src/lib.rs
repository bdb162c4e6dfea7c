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

//! The assembler (C2, C5, C6): turns one source file into a relocatable
//! object artifact. Wraps `mpcore`'s data model (C1, C3, C4, C7) with the
//! line lexer, instruction encoder, and driver state machine.

pub mod ast;
pub mod driver;
pub mod encoder;
pub mod file_reader;
pub mod lexer;

use file_reader::FileReader;
use log::{debug, info};
use mpcore::Diagnostic;
use std::path::Path;

/// Everything produced by assembling one file: the artifact and every
/// diagnostic raised, plus the serialized object bytes ready to write
/// out (empty if any error was reported — see `has_errors`).
pub struct AssembleOutput {
    pub diagnostics: Vec<Diagnostic>,
    pub object_bytes: Vec<u8>,
}

impl AssembleOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Reads `input`, assembles it, and serializes the resulting artifact.
/// Diagnostics are always returned even when assembly partially failed —
/// the driver isolates errors per line (spec §4.6) rather than aborting.
pub fn assemble_file(reader: &dyn FileReader, input: &Path) -> anyhow::Result<AssembleOutput> {
    let file_name = input.display().to_string();
    info!("assembling {file_name}");

    let source = reader.read_to_string(input)?;
    let result = driver::assemble_source(&file_name, &source);

    debug!(
        "{}: {} symbols, {} diagnostics",
        file_name,
        result.object.symbol_store.len(),
        result.diagnostics.len()
    );

    let mut object_bytes = Vec::new();
    if result.diagnostics.is_empty() {
        mpcore::object::write(&mut object_bytes, &result.object)?;
    }

    Ok(AssembleOutput {
        diagnostics: result.diagnostics,
        object_bytes,
    })
}

/// The output artifact's path for a given source path: same basename,
/// `.obj` extension, same parent directory (spec §6).
pub fn output_path_for(input: &Path) -> std::path::PathBuf {
    input.with_extension("obj")
}
