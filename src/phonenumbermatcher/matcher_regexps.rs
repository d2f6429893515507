// Copyright (C) 2011 The Libphonenumber Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::LazyLock;

use regex::Regex;

use crate::phonenumberutil::{
    CAPTURE_UP_TO_SECOND_NUMBER_START, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN,
    PHONE_NUMBER_UTIL, PLUS_CHARS, VALID_PUNCTUATION,
};

/// Returns a regular expression quantifier with an upper and lower limit.
fn limit(lower: usize, upper: usize) -> String {
    debug_assert!(lower < upper);
    format!("{{{lower},{upper}}}")
}

/// The compiled patterns the matcher scans with. Built once per process and
/// shared read-only by every matcher instance.
pub(crate) struct PhoneNumberMatcherRegExps {
    /// Matches strings that look like publication pages. Example:
    /// Computing Complete Answers to Queries in the Presence of Limited
    /// Access Patterns. Chen Li. VLDB J. 12(3): 211-227 (2003).
    ///
    /// The string "211-227 (2003)" is not a telephone number.
    pub pub_pages: Regex,
    /// Matches strings that look like dates using "/" as a separator.
    /// Examples: 3/10/2011, 31/10/96 or 08/31/95.
    pub slash_separated_dates: Regex,
    /// Matches timestamps. Examples: "2012-01-02 08:00". Note that the
    /// reg-ex does not include the trailing ":\d\d" -- that is covered by
    /// time_stamps_suffix.
    pub time_stamps: Regex,
    pub time_stamps_suffix: Regex,
    /// Pattern to check that brackets match. Opening brackets should be
    /// closed within a phone number. This also checks that there is
    /// something inside the brackets. Having no brackets at all is also
    /// fine.
    pub matching_brackets: Regex,
    /// Matches white-space, which may indicate the end of a phone number
    /// and the start of something else (such as a neighbouring zip-code).
    /// If white-space is found, continues to match all characters that are
    /// not typically used to start a phone number.
    pub group_separator: Regex,
    pub capture_up_to_second_number_start_pattern: Regex,
    pub capturing_ascii_digits_pattern: Regex,
    /// Punctuation that may be at the start of a phone number - brackets
    /// and plus signs.
    pub lead_class_pattern: Regex,
    /// Phone number pattern allowing optional punctuation.
    pub pattern: Regex,
}

static MATCHER_REG_EXPS: LazyLock<PhoneNumberMatcherRegExps> =
    LazyLock::new(PhoneNumberMatcherRegExps::new);

impl PhoneNumberMatcherRegExps {
    pub fn get_instance() -> &'static Self {
        &MATCHER_REG_EXPS
    }

    fn new() -> Self {
        let opening_parens = "(\\[\u{FF08}\u{FF3B}";
        let closing_parens = ")\\]\u{FF09}\u{FF3D}";
        let non_parens = format!("[^{opening_parens}{closing_parens}]");
        // Limit on the number of pairs of brackets in a phone number.
        let bracket_pair_limit = limit(0, 3);
        // An opening bracket at the beginning may not be closed, but
        // subsequent ones should be. It's also possible that the leading
        // bracket was dropped, so we shouldn't be surprised if we see a
        // closing bracket first.
        let leading_maybe_matched_bracket = format!(
            "(?:[{opening_parens}])?(?:{non_parens}+[{closing_parens}])?"
        );
        let bracket_pairs = format!(
            "(?:[{opening_parens}]{non_parens}+[{closing_parens}]){bracket_pair_limit}"
        );
        // Limit on the number of leading (plus) characters.
        let lead_limit = limit(0, 2);
        // Limit on the number of consecutive punctuation characters.
        let punctuation_limit = limit(0, 4);
        // The maximum number of digits allowed in a digit-separated block.
        // As we allow all digits in a single block, this should be set high
        // enough to accommodate the entire national number and the
        // international country code.
        let digit_block_limit = MAX_LENGTH_FOR_NSN + MAX_LENGTH_COUNTRY_CODE;
        // Limit on the number of blocks separated by punctuation. Uses
        // digit_block_limit since some formats use spaces to separate each
        // digit.
        let block_limit = limit(0, digit_block_limit);
        // A punctuation sequence allowing white space.
        let punctuation = format!("[{VALID_PUNCTUATION}]{punctuation_limit}");
        // A digits block without punctuation.
        let digit_sequence = format!("\\p{{Nd}}{}", limit(1, digit_block_limit));
        let lead_class_chars = format!("{opening_parens}{PLUS_CHARS}");
        let lead_class = format!("[{lead_class_chars}]");
        let opening_punctuation = format!("(?:{lead_class}{punctuation})");
        let optional_extn_pattern = format!(
            "(?i:(?:{})?)",
            PHONE_NUMBER_UTIL.get_extn_patterns_for_matching()
        );

        Self {
            pub_pages: Regex::new(r"\d{1,5}-+\d{1,5}\s{0,4}\(\d{1,4}").unwrap(),
            slash_separated_dates: Regex::new(
                r"(?:(?:[0-3]?\d/[01]?\d)|(?:[01]?\d/[0-3]?\d))/(?:[12]\d)?\d{2}",
            )
            .unwrap(),
            time_stamps: Regex::new(r"[12]\d{3}[-/]?[01]\d[-/]?[0-3]\d [0-2]\d$").unwrap(),
            time_stamps_suffix: Regex::new(r":[0-5]\d").unwrap(),
            matching_brackets: Regex::new(&format!(
                "{leading_maybe_matched_bracket}{non_parens}+{bracket_pairs}{non_parens}*"
            ))
            .unwrap(),
            group_separator: Regex::new(&format!(
                "\\p{{Z}}[^{lead_class_chars}\\p{{Nd}}]*"
            ))
            .unwrap(),
            capture_up_to_second_number_start_pattern: Regex::new(
                CAPTURE_UP_TO_SECOND_NUMBER_START,
            )
            .unwrap(),
            capturing_ascii_digits_pattern: Regex::new(r"(\d+)").unwrap(),
            lead_class_pattern: Regex::new(&lead_class).unwrap(),
            pattern: Regex::new(&format!(
                "({opening_punctuation}{lead_limit}{digit_sequence}\
                 (?:{punctuation}{digit_sequence}){block_limit}{optional_extn_pattern})"
            ))
            .unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PhoneNumberMatcherRegExps;

    #[test]
    fn check_regexps_are_compiling() {
        let reg_exps = PhoneNumberMatcherRegExps::get_instance();
        assert!(reg_exps.pattern.is_match("650-253-0000"));
    }
}
