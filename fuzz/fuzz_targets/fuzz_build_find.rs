#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stx::index::SuffixTree;

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    pattern: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Small alphabet so patterns actually occur
    let text: Vec<u8> = input.text.iter().take(512).map(|b| b'a' + b % 3).collect();
    let pattern: Vec<u8> = input.pattern.iter().take(16).map(|b| b'a' + b % 3).collect();

    let tree = SuffixTree::build(text.clone());
    tree.check_invariants().expect("structural invariants");

    let expected: Vec<usize> = if pattern.is_empty() || pattern.len() > text.len() {
        Vec::new()
    } else {
        (0..=text.len() - pattern.len())
            .filter(|&i| text[i..i + pattern.len()] == pattern[..])
            .collect()
    };
    assert_eq!(tree.find(&pattern), expected);
});
