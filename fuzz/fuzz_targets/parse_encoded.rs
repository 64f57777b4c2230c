#![no_main]

use libfuzzer_sys::fuzz_target;
use rspace_tags::{Validator, decode_tags, encode_tags, parse_encoded_tag};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let tag = parse_encoded_tag(text);
    let _ = Validator::default().check_tag_string(&tag.value);

    // Parsed tags carry complete or absent metadata, so they always re-encode.
    let tags = decode_tags(text);
    assert!(encode_tags(&tags).is_some());
});
