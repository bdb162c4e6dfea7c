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

use casm::file_reader::AsmFileReader;
use casm::{assemble_file, output_path_for};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(version, author = "Connor Nolan", about = "Assemble a source file into a relocatable object artifact")]
struct Opts {
    /// Source file to assemble.
    file: PathBuf,

    /// Pretty-print the resolved symbol table and relocation list after a
    /// successful assembly. Diagnostic only — does not affect the .obj
    /// output.
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    env_logger::init();

    let reader = AsmFileReader;
    let output = match assemble_file(&reader, &opts.file) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &output.diagnostics {
        eprintln!("{diagnostic}");
    }

    if output.has_errors() {
        return ExitCode::FAILURE;
    }

    let out_path = output_path_for(&opts.file);
    if let Err(e) = std::fs::write(&out_path, &output.object_bytes) {
        eprintln!("error: failed to write {}: {e}", out_path.display());
        return ExitCode::FAILURE;
    }

    if opts.dump {
        match mpcore::object::read(&mut &output.object_bytes[..]) {
            Ok(object) => match serde_json::to_string_pretty(&object) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("error: failed to render dump: {e}"),
            },
            Err(e) => eprintln!("error: failed to re-read artifact for dump: {e}"),
        }
    }

    println!("assembled {} -> {}", opts.file.display(), out_path.display());
    ExitCode::SUCCESS
}
