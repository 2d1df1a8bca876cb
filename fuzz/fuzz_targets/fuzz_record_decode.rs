#![no_main]

use libfuzzer_sys::fuzz_target;

use coffer_core::{decode_record, encode_record, XorObfuscator};

fuzz_target!(|data: &[u8]| {
    let obfuscator = XorObfuscator::with_default_key();

    // Arbitrary input must never panic the decoder.
    if let Ok(line) = std::str::from_utf8(data) {
        if let Ok(account) = decode_record(line, &obfuscator) {
            // Anything that decodes must survive a round-trip.
            let reencoded = encode_record(&account, &obfuscator);
            let account2 = decode_record(&reencoded, &obfuscator).unwrap();
            assert_eq!(account, account2);
        }
    }

    // Same under a key derived from the input itself.
    if data.len() >= 2 {
        let (key, rest) = data.split_at(data.len() / 2);
        if let (Ok(obf), Ok(line)) = (XorObfuscator::new(key.to_vec()), std::str::from_utf8(rest)) {
            let _ = decode_record(line, &obf);
        }
    }
});
