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

//! Output emission: `.raw` (Logisim-style `v2.0 raw` text) and `.bin`
//! (raw byte stream), grounded in `raw_file.py`'s `write_raw_file` and
//! `bin_file.py`.

use std::collections::BTreeMap;

/// Renders `data` (address -> value) as a `v2.0 raw` text file. Gaps
/// between nonzero entries are filled with explicit `0` lines; a zero
/// entry with no later nonzero entry is never materialized, matching
/// the original tool's behavior. `zero_fill` leading zero lines are
/// written before the first entry (used when the ROM's real origin
/// isn't address zero).
pub fn render_raw(data: &BTreeMap<u64, u64>, zero_fill: u32) -> String {
    let mut out = String::from("v2.0 raw\n");

    for _ in 0..zero_fill {
        out.push_str("0\n");
    }

    let mut prev_addr: i64 = -1;
    for (&addr, &value) in data {
        if value == 0 {
            continue;
        }
        let addr = addr as i64;
        for _ in prev_addr..(addr - 1) {
            out.push_str("0\n");
        }
        out.push_str(&format!("{:x}\n", value));
        prev_addr = addr;
    }

    out
}

/// Renders `data` as a flat byte stream, `bytes_per_entry` bytes per
/// address (little-endian), covering every address from 0 to the
/// highest key. Missing entries are zero-filled.
pub fn render_bin(data: &BTreeMap<u64, u64>, bytes_per_entry: usize) -> Vec<u8> {
    let max_addr = data.keys().copied().max().unwrap_or(0);
    let mut out = vec![0u8; (max_addr as usize + 1) * bytes_per_entry];

    for (&addr, &value) in data {
        let start = addr as usize * bytes_per_entry;
        let bytes = value.to_le_bytes();
        out[start..start + bytes_per_entry].copy_from_slice(&bytes[..bytes_per_entry]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_header_and_single_entry() {
        let mut data = BTreeMap::new();
        data.insert(0u64, 0x2Au64);
        let rendered = render_raw(&data, 0);
        assert_eq!(rendered, "v2.0 raw\n2a\n");
    }

    #[test]
    fn raw_fills_gaps_before_nonzero_entries() {
        let mut data = BTreeMap::new();
        data.insert(0u64, 0u64);
        data.insert(3u64, 0xFFu64);
        let rendered = render_raw(&data, 0);
        assert_eq!(rendered, "v2.0 raw\n0\n0\n0\nff\n");
    }

    #[test]
    fn raw_leading_zero_fill() {
        let mut data = BTreeMap::new();
        data.insert(0u64, 5u64);
        let rendered = render_raw(&data, 2);
        assert_eq!(rendered, "v2.0 raw\n0\n0\n5\n");
    }

    #[test]
    fn trailing_zero_entry_is_dropped() {
        let mut data = BTreeMap::new();
        data.insert(0u64, 1u64);
        data.insert(1u64, 0u64);
        let rendered = render_raw(&data, 0);
        assert_eq!(rendered, "v2.0 raw\n1\n");
    }

    #[test]
    fn bin_emits_little_endian_bytes_sized_to_max_address() {
        let mut data = BTreeMap::new();
        data.insert(0u64, 0x1234u64);
        let bytes = render_bin(&data, 2);
        assert_eq!(bytes, vec![0x34, 0x12]);
    }

    #[test]
    fn bin_zero_fills_missing_addresses() {
        let mut data = BTreeMap::new();
        data.insert(2u64, 0xAAu64);
        let bytes = render_bin(&data, 1);
        assert_eq!(bytes, vec![0x00, 0x00, 0xAA]);
    }
}
