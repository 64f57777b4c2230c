use proptest::prelude::*;
use rspace_set::ImmutableSet;
use rspace_tags::page::{FINAL_DATA_SENTINEL, SMALL_DATASET_SENTINEL};
use rspace_tags::{
    Candidates, Tag, TagPage, decode_tag_string, decode_tags, encode_tag_string, encode_tags,
    parse_encoded_tags,
};

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(1000))]

    #[test]
    fn string_round_trip_any(s in any::<String>()) {
        prop_assert_eq!(decode_tag_string(&encode_tag_string(&s)), s);
    }

    #[test]
    fn string_round_trip_token_heavy(s in arb_component()) {
        prop_assert_eq!(decode_tag_string(&encode_tag_string(&s)), s);
    }

    #[test]
    fn encoded_component_has_no_raw_separators(s in arb_component()) {
        let encoded = encode_tag_string(&s);
        prop_assert!(!encoded.contains('/'));
        prop_assert!(!encoded.contains(','));
    }

    #[test]
    fn ontology_tags_survive_encode_then_parse(tags in prop::collection::vec(arb_ontology_tag(), 0..6)) {
        let field = encode_tags(&tags);
        prop_assert!(field.is_some());
        let parsed = decode_tags(&field.unwrap_or_default());
        prop_assert_eq!(parsed, tags);
    }

    #[test]
    fn mixed_tags_survive_encode_then_parse(tags in prop::collection::vec(arb_tag(), 0..6)) {
        let field = encode_tags(&tags).unwrap_or_default();
        prop_assert_eq!(decode_tags(&field), tags);
    }

    #[test]
    fn any_partial_tag_fails_the_batch(
        tags in prop::collection::vec(arb_tag(), 0..4),
        value in arb_non_empty_component(),
        uri in arb_component(),
    ) {
        let mut batch = tags;
        batch.push(Tag { uri: Some(uri), ..Tag::simple(value) });
        prop_assert_eq!(encode_tags(&batch), None);
    }

    #[test]
    fn parse_is_total(strings in prop::collection::vec(any::<String>(), 0..8)) {
        let expected = strings
            .iter()
            .filter(|s| !s.is_empty() && *s != FINAL_DATA_SENTINEL && *s != SMALL_DATASET_SENTINEL)
            .count();
        prop_assert_eq!(parse_encoded_tags(&strings).len(), expected);
    }

    #[test]
    fn candidates_unique_by_value(
        pages in prop::collection::vec(prop::collection::vec("[a-d]{1,2}", 0..6), 1..5),
        selected in prop::collection::vec("[a-d]{1,2}", 0..3),
    ) {
        let selection: ImmutableSet<Tag> = selected.into_iter().map(Tag::simple).collect();
        let merged = pages.into_iter().fold(Candidates::new(), |acc, data| {
            acc.merge_page(&TagPage { data }, &selection)
        });

        let values: ImmutableSet<&str> = merged.tags().iter().map(|c| c.tag.value.as_str()).collect();
        prop_assert_eq!(values.len(), merged.tags().len());
        for candidate in merged.tags() {
            prop_assert_eq!(candidate.selected, selection.contains(&candidate.tag));
        }
    }
}
