#![no_main]

use libfuzzer_sys::fuzz_target;
use rspace_tags::{decode_tag_string, encode_tag_string};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let encoded = encode_tag_string(text);
    assert!(!encoded.contains('/'));
    assert!(!encoded.contains(','));
    assert_eq!(decode_tag_string(&encoded), text);
});
