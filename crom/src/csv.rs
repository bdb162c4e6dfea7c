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

//! The tabular truth-table format C9 reads: `;`-separated, no header
//! row. Kept deliberately hand-rolled rather than pulling in a `csv`
//! crate — nothing in the pack reaches for one, and the grammar here is
//! a single split on `;` with blank-line skipping.

/// Splits `content` into rows of trimmed cells, skipping blank lines.
pub fn parse(content: &str) -> Vec<Vec<String>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(';').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolon_and_skips_blanks() {
        let rows = parse("0x00;hlt,srst\n\n0x01;nxt\n");
        assert_eq!(rows, vec![vec!["0x00".to_string(), "hlt,srst".to_string()], vec!["0x01".to_string(), "nxt".to_string()]]);
    }

    #[test]
    fn trims_whitespace_around_cells() {
        let rows = parse(" 0x00 ;  nxt  ");
        assert_eq!(rows, vec![vec!["0x00".to_string(), "nxt".to_string()]]);
    }
}
