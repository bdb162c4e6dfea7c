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
use clink::file_reader::LinkFileReader;
use clink::{link, LinkMode};
use std::process::ExitCode;

#[derive(Parser)]
#[clap(version, author = "Connor Nolan", about = "Link relocatable object artifacts into an image or library")]
struct Opts {
    /// Object artifacts to link, in link order.
    objects: Vec<String>,

    /// Log each symbol's resolved link order and final base address.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    let level = if opts.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new().filter_level(level).init();

    let reader = LinkFileReader;
    let output = link(&opts.objects, &reader);

    for diagnostic in &output.diagnostics {
        eprintln!("{diagnostic}");
    }

    let Some(mode) = output.mode else {
        return ExitCode::FAILURE;
    };

    let (output_name, bytes) = match mode {
        LinkMode::Image { output_name, bytes } => (output_name, bytes),
        LinkMode::Library { output_name, bytes } => (output_name, bytes),
    };

    if let Err(e) = std::fs::write(&output_name, &bytes) {
        eprintln!("error: failed to write {output_name}: {e}");
        return ExitCode::FAILURE;
    }

    println!("linked {} object(s) -> {output_name}", opts.objects.len());

    if output.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
