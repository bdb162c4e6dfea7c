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

//! One module per instruction family (spec §4.5), grouped the way the
//! teacher's `ast_builder` groups its per-family modules.

pub mod arithmetic;
pub mod bitwise;
pub mod control_flow;
pub mod load_store;
pub mod misc;
pub mod stack;
