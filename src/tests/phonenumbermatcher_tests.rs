use crate::{
    Leniency, PhoneNumberMatch, PhoneNumberMatcher, i18n::RegionCode,
};

use super::get_phone_util;

fn find_all(text: &str, region: &str, leniency: Leniency) -> Vec<PhoneNumberMatch> {
    PhoneNumberMatcher::with_options(get_phone_util(), text, region, leniency, i64::MAX)
        .collect()
}

fn find_valid(text: &str, region: &str) -> Vec<PhoneNumberMatch> {
    find_all(text, region, Leniency::Valid)
}

#[test]
fn leniency_ordering() {
    assert!(Leniency::Possible < Leniency::Valid);
    assert!(Leniency::Valid < Leniency::StrictGrouping);
    assert!(Leniency::StrictGrouping < Leniency::ExactGrouping);
}

#[test]
fn finds_simple_number_in_sentence() {
    let text = "My number is 650-253-0000.";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(1, matches.len());

    let phone_match = &matches[0];
    assert_eq!(13, phone_match.start());
    assert_eq!("650-253-0000", phone_match.raw_string());
    assert_eq!(&text[phone_match.start()..phone_match.end()], phone_match.raw_string());
    assert_eq!(1, phone_match.number().country_code());
    assert_eq!(6502530000, phone_match.number().national_number());
}

#[test]
fn has_next_is_idempotent() {
    let text = "Call 650-253-0000 now";
    let mut matcher = PhoneNumberMatcher::new(text, RegionCode::us());
    assert!(matcher.has_next());
    assert!(matcher.has_next());
    let phone_match = matcher.next_match().expect("one match");
    assert_eq!("650-253-0000", phone_match.raw_string());
    assert!(!matcher.has_next());
    assert_eq!(None, matcher.next_match());
    // DONE is terminal.
    assert!(!matcher.has_next());
}

#[test]
fn rejects_vanity_number_followed_by_letters() {
    let matches = find_valid("Call 1-800-FLOWERS", RegionCode::us());
    assert!(matches.is_empty());
}

#[test]
fn rejects_publication_pages() {
    let text = "Computing Complete Answers to Queries in the Presence of Limited Access \
                Patterns. Chen Li. VLDB J. 12(3): 211-227 (2003).";
    assert!(find_valid(text, RegionCode::us()).is_empty());
}

#[test]
fn rejects_slash_separated_dates() {
    assert!(find_valid("Posted 3/10/2011 and 31/10/96", RegionCode::us()).is_empty());
}

#[test]
fn rejects_time_stamps() {
    let text = "Meeting at 2012-01-02 08:00 in room 5.";
    assert!(find_valid(text, RegionCode::us()).is_empty());

    // Only a trailing ":mm" marks the candidate as a timestamp. Without
    // it, the digits go through the ordinary pipeline (and here they
    // happen to parse as a valid NANP number).
    let text = "Version 2012-01-02 08 was released.";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(1, matches.len());
    assert_eq!("2012-01-02 08", matches[0].raw_string());
}

#[test]
fn finds_multiple_numbers_in_order() {
    let text = "Reach me at (650) 253-0000 x123 or 415-555-1212.";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(2, matches.len());

    assert_eq!("(650) 253-0000 x123", matches[0].raw_string());
    assert_eq!("123", matches[0].number().extension());
    assert_eq!("415-555-1212", matches[1].raw_string());
    assert!(matches[1].start() > matches[0].end());
}

#[test]
fn matches_are_non_overlapping_and_ordered() {
    let text = "Cell: 650-253-0000 or 650-253-0001, office (415) 555-1212 ext. 44.";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(3, matches.len());
    for window in matches.windows(2) {
        assert!(window[0].end() <= window[1].start());
    }
    for phone_match in &matches {
        assert_eq!(
            &text[phone_match.start()..phone_match.end()],
            phone_match.raw_string()
        );
    }
}

#[test]
fn match_number_omits_parsing_context() {
    let matches = find_valid("Call 650-253-0000", RegionCode::us());
    assert_eq!(1, matches.len());
    let number = matches[0].number();
    assert!(!number.has_raw_input());
    assert!(!number.has_country_code_source());
    assert_eq!("", number.preferred_domestic_carrier_code());
}

#[test]
fn reparsing_raw_string_yields_same_number() {
    let phone_util = get_phone_util();
    let text = "Reach me at (650) 253-0000 x123 or 415-555-1212.";
    for phone_match in find_valid(text, RegionCode::us()) {
        let reparsed = phone_util
            .parse(phone_match.raw_string(), RegionCode::us())
            .expect("raw string must reparse");
        assert_eq!(
            crate::MatchType::ExactMatch,
            phone_util.is_number_match(phone_match.number(), &reparsed)
        );
    }
}

#[test]
fn finds_number_with_explicit_country_code() {
    // The preferred region only applies to numbers without one.
    let matches = find_valid("Our UK office: +44 20 8765 4321.", RegionCode::us());
    assert_eq!(1, matches.len());
    assert_eq!(44, matches[0].number().country_code());
    assert_eq!(2087654321, matches[0].number().national_number());
}

#[test]
fn rejects_number_next_to_latin_letters() {
    assert!(find_valid("num650-253-0000", RegionCode::us()).is_empty());
    assert!(find_valid("650-253-0000num", RegionCode::us()).is_empty());
    // An accented Latin letter counts too.
    assert!(find_valid("\u{00E9}650-253-0000", RegionCode::us()).is_empty());
}

#[test]
fn rejects_number_next_to_currency_or_percent() {
    assert!(find_valid("$650-253-0000", RegionCode::us()).is_empty());
    assert!(find_valid("650-253-0000%", RegionCode::us()).is_empty());
    assert!(find_valid("\u{20AC}650-253-0000", RegionCode::us()).is_empty());
}

#[test]
fn accepts_number_starting_with_bracket_after_letters() {
    // A candidate beginning with lead-class punctuation skips the
    // preceding-character check.
    let matches = find_valid("tel(650) 253-0000", RegionCode::us());
    assert_eq!(1, matches.len());
    assert_eq!("(650) 253-0000", matches[0].raw_string());
}

#[test]
fn extracts_inner_match_after_leading_digits() {
    // The candidate initially swallows the zip code before it.
    let text = "Mountain View, CA 94041 650-253-0000 is the number";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(1, matches.len());
    assert_eq!("650-253-0000", matches[0].raw_string());
    assert_eq!(6502530000, matches[0].number().national_number());
}

#[test]
fn extracts_inner_match_before_trailing_digits() {
    let text = "Call 650-253-0000 94041";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(1, matches.len());
    assert_eq!("650-253-0000", matches[0].raw_string());
}

#[test]
fn truncates_candidate_at_second_number_start() {
    // The second extension marks the start of another number; only the
    // first number should be matched.
    let text = "(530) 583-6985 x302/x2303";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(1, matches.len());
    assert_eq!("(530) 583-6985 x302", matches[0].raw_string());
    assert_eq!("302", matches[0].number().extension());
}

#[test]
fn national_prefix_required_when_formatted_with_one() {
    // GB numbers are formatted with the national prefix, so a candidate
    // written without it is rejected at VALID.
    assert!(find_valid("Call 20 8765 4321", RegionCode::gb()).is_empty());

    let matches = find_valid("Call 020 8765 4321", RegionCode::gb());
    assert_eq!(1, matches.len());
    assert_eq!("020 8765 4321", matches[0].raw_string());
    assert_eq!(2087654321, matches[0].number().national_number());
}

#[test]
fn max_tries_zero_finds_nothing() {
    let text = "650-253-0000";
    let matches: Vec<_> = PhoneNumberMatcher::with_options(
        get_phone_util(),
        text,
        RegionCode::us(),
        Leniency::Valid,
        0,
    )
    .collect();
    assert!(matches.is_empty());
}

#[test]
fn no_digits_means_no_matches() {
    for leniency in [
        Leniency::Possible,
        Leniency::Valid,
        Leniency::StrictGrouping,
        Leniency::ExactGrouping,
    ] {
        assert!(find_all("No numbers here, move along.", RegionCode::us(), leniency).is_empty());
        assert!(find_all("", RegionCode::us(), leniency).is_empty());
    }
}

#[test]
fn possible_accepts_more_than_valid() {
    // Not a valid US number (US numbers never start with 1), but the
    // length is fine.
    let text = "Try 123-456-7890 maybe";
    assert!(find_valid(text, RegionCode::us()).is_empty());
    let matches = find_all(text, RegionCode::us(), Leniency::Possible);
    assert_eq!(1, matches.len());
    assert_eq!("123-456-7890", matches[0].raw_string());
}

#[test]
fn strict_grouping_requires_plausible_groups() {
    // Valid digits, but grouped in a way the number would never be
    // formatted.
    let text = "65 02 53 00 00";
    assert_eq!(1, find_valid(text, RegionCode::us()).len());
    assert!(find_all(text, RegionCode::us(), Leniency::StrictGrouping).is_empty());

    // Canonical and un-separated forms both pass.
    assert_eq!(
        1,
        find_all("650 253 0000", RegionCode::us(), Leniency::StrictGrouping).len()
    );
    assert_eq!(
        1,
        find_all("6502530000", RegionCode::us(), Leniency::StrictGrouping).len()
    );
    // A missing separator inside the subscriber number is tolerated at
    // STRICT_GROUPING.
    assert_eq!(
        1,
        find_all("650-2530000", RegionCode::us(), Leniency::StrictGrouping).len()
    );
}

#[test]
fn strict_grouping_rejects_two_slashes() {
    // Still fine at VALID, but more than one slash is dropped at the
    // grouping levels.
    let text = "650/253/0000";
    assert_eq!(1, find_valid(text, RegionCode::us()).len());
    assert!(find_all(text, RegionCode::us(), Leniency::StrictGrouping).is_empty());
    assert!(find_all(text, RegionCode::us(), Leniency::ExactGrouping).is_empty());
}

#[test]
fn exact_grouping_requires_formatted_groups() {
    // Grouping differs from the canonical 650-253-0000.
    assert!(find_all("650-2530000", RegionCode::us(), Leniency::ExactGrouping).is_empty());
    assert_eq!(1, find_valid("650-2530000", RegionCode::us()).len());

    // Exactly the canonical grouping, or a single block, passes.
    assert_eq!(
        1,
        find_all("(650) 253-0000", RegionCode::us(), Leniency::ExactGrouping).len()
    );
    assert_eq!(
        1,
        find_all("650-253-0000", RegionCode::us(), Leniency::ExactGrouping).len()
    );
    assert_eq!(
        1,
        find_all("6502530000", RegionCode::us(), Leniency::ExactGrouping).len()
    );
}

#[test]
fn leniency_levels_are_monotonic() {
    let texts = [
        "My number is 650-253-0000.",
        "65 02 53 00 00",
        "650-2530000",
        "Call 123-456-7890",
        "Reach me at (650) 253-0000 x123 or 415-555-1212.",
        "No numbers here.",
    ];
    for text in texts {
        let exact = find_all(text, RegionCode::us(), Leniency::ExactGrouping).len();
        let strict = find_all(text, RegionCode::us(), Leniency::StrictGrouping).len();
        let valid = find_all(text, RegionCode::us(), Leniency::Valid).len();
        let possible = find_all(text, RegionCode::us(), Leniency::Possible).len();
        assert!(exact <= strict, "{text}");
        assert!(strict <= valid, "{text}");
        assert!(valid <= possible, "{text}");
    }
}

#[test]
fn finds_fullwidth_number_with_correct_byte_offsets() {
    let text = "\u{96FB}\u{8A71}: \u{FF16}\u{FF15}\u{FF10}-\u{FF12}\u{FF15}\u{FF13}-\u{FF10}\u{FF10}\u{FF10}\u{FF10}";
    let matches = find_valid(text, RegionCode::us());
    assert_eq!(1, matches.len());

    let phone_match = &matches[0];
    assert_eq!(&text[phone_match.start()..phone_match.end()], phone_match.raw_string());
    assert_eq!(6502530000, phone_match.number().national_number());
}

#[test]
fn finds_italian_number_with_leading_zero() {
    let matches = find_valid("chiamami allo 02 3661 8300", RegionCode::it());
    assert_eq!(1, matches.len());
    assert_eq!("02 3661 8300", matches[0].raw_string());
    assert_eq!(39, matches[0].number().country_code());
    assert_eq!(236618300, matches[0].number().national_number());
    assert!(matches[0].number().italian_leading_zero());
}

#[test]
fn match_display_includes_range_and_raw_string() {
    let matches = find_valid("Call 650-253-0000", RegionCode::us());
    assert_eq!(
        "PhoneNumberMatch [5,17) 650-253-0000",
        matches[0].to_string()
    );
}
