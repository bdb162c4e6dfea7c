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

//! The linker (C8): combines one or more relocatable object artifacts
//! into either a loadable image or a new combined library artifact.

pub mod file_reader;
pub mod linker;

pub use linker::{link, LinkDiagnostic, LinkMode, LinkOutput};
