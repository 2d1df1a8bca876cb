#![no_main]

use libfuzzer_sys::fuzz_target;

use coffer_core::pattern::{has_too_many_repeats, is_sequential, weakness};

fuzz_target!(|data: &[u8]| {
    // Map arbitrary bytes onto digit strings of the kind callers produce.
    let pin: String = data
        .iter()
        .take(16)
        .map(|b| char::from(b'0' + (b % 10)))
        .collect();

    // Total functions: no panic, and the combined check agrees with its parts.
    let seq = is_sequential(&pin);
    let rep = has_too_many_repeats(&pin);
    let weak = weakness(&pin);
    assert_eq!(weak.is_some(), seq || rep);

    // Raw (possibly non-digit) input must not panic either.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = is_sequential(s);
        let _ = has_too_many_repeats(s);
    }
});
