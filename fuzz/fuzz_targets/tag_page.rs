#![no_main]

use libfuzzer_sys::fuzz_target;
use rspace_tags::{Candidates, TagPage};

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(page) = TagPage::from_json(body) else {
        return;
    };
    let merged = Candidates::new().merge_page(&page, &Default::default());
    assert_eq!(merged.is_exhausted(), !page.has_more());
});
