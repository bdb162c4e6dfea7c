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

/// A relocation the encoder could not resolve to an index on its own —
/// it names the target symbol; the driver (C6) turns the name into a
/// `symbol_index` via the file's symbol table (spec §4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRelocation {
    pub offset: u16,
    pub symbol_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeResult {
    pub bytes: Vec<u8>,
    pub relocations: Vec<PendingRelocation>,
}
