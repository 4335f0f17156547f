#![no_main]

use libfuzzer_sys::fuzz_target;
use stx::index::{IndexConfig, TextIndex};
use stx::query::QueryExecutor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, binary allowed: building and line resolution must not panic
    let config = IndexConfig {
        allow_binary: true,
        case_insensitive: data.first().is_some_and(|b| b & 1 == 1),
        ..Default::default()
    };
    if let Ok(index) = TextIndex::from_bytes("fuzz", data, config) {
        let pattern = String::from_utf8_lossy(&data[..data.len().min(4)]).into_owned();
        let _ = QueryExecutor::new(&index).execute(&pattern);
    }
});
