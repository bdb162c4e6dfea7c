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

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait FileReader {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_binary(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub struct LinkFileReader;

impl FileReader for LinkFileReader {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_binary(&self, path: &Path, data: &[u8]) -> Result<()> {
        Ok(fs::write(path, data)?)
    }
}

#[derive(Default)]
pub struct MockFileReader {
    files: HashMap<PathBuf, Vec<u8>>,
    pub written: std::cell::RefCell<HashMap<PathBuf, Vec<u8>>>,
}

impl MockFileReader {
    pub fn add_file(&mut self, path: &str, content: Vec<u8>) {
        self.files.insert(PathBuf::from(path), content);
    }
}

impl FileReader for MockFileReader {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("mock file not found: {}", path.display()))
    }

    fn write_binary(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.written.borrow_mut().insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }
}
