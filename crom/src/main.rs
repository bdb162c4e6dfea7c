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

use clap::Parser;
use crom::file_reader::RomFileReader;
use crom::{generate, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(version, author = "Connor Nolan", about = "Generate a ROM image from a tabular truth table")]
struct Opts {
    /// `;`-separated truth table, one row per line.
    csv: PathBuf,

    /// Address column config: `col:bits,col:bits,…`.
    addr_config: String,

    /// Data column config: `col`, `col:bits`, or `col:flags_file[:bits]`.
    data_config: String,

    /// Output file; format is chosen by extension (`.raw` or `.bin`).
    #[clap(default_value = "output.raw")]
    output: PathBuf,

    /// Optional `FROM[-TO]` bit range to slice out of each data value
    /// before it's written.
    extract_bits: Option<String>,
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    env_logger::init();

    let reader = RomFileReader;
    let options = RunOptions { csv_path: &opts.csv, addr_config: &opts.addr_config, data_config: &opts.data_config, output_path: &opts.output, extract_bits: opts.extract_bits.as_deref() };

    let bytes = match generate(&reader, &options) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&opts.output, &bytes) {
        eprintln!("error: failed to write {}: {e}", opts.output.display());
        return ExitCode::FAILURE;
    }

    println!("wrote {}", opts.output.display());
    ExitCode::SUCCESS
}
