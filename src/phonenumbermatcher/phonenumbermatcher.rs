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

use unicode_blocks::find_unicode_block;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

use crate::{
    phonenumber::{CountryCodeSource, PhoneNumber},
    phonenumberutil::{
        MatchType, PHONE_NUMBER_UTIL, PhoneNumberFormat, PhoneNumberUtil,
        helper_functions::normalize_decimal_digits,
    },
    regex_util::{RegexConsume, RegexFullMatch},
};

use super::{matcher_regexps::PhoneNumberMatcherRegExps, phonenumbermatch::PhoneNumberMatch};

/// The possible verification levels, strictest last.
///
/// Each level but [`Possible`](Leniency::Possible) implies the predicates
/// of the levels before it; `Possible` is the lenient alternative branch
/// that skips validity checking entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Leniency {
    /// Phone numbers accepted are possible, but not necessarily valid.
    Possible,
    /// Phone numbers accepted are possible and valid. Numbers written in
    /// national format must have their national-prefix present if it is
    /// usually written for a number of this type.
    Valid,
    /// Phone numbers accepted are valid and are grouped in a possible way
    /// for this locale. For example, a US number written as
    /// "65 02 53 00 00" is not accepted at this leniency level, whereas
    /// "650 253 000" or "6502530000" are. Numbers with more than one '/'
    /// symbol are also dropped at this level.
    StrictGrouping,
    /// Phone numbers accepted are valid and are grouped in the same way
    /// that we would have formatted it, or as a single block. For example,
    /// a US number written as "650 2530000" is not accepted at this
    /// leniency level, whereas "650 253 0000" or "6502530000" are.
    ExactGrouping,
}

/// The iterator state: either we still have to scan for the next match,
/// the next match is cached and unconsumed, or the text is exhausted.
enum MatcherState {
    NotReady,
    Ready(PhoneNumberMatch),
    Done,
}

fn is_invalid_punctuation_symbol(character: char) -> bool {
    character == '%' || character.general_category() == GeneralCategory::CurrencySymbol
}

/// Helper method to determine if a character is a Latin-script letter or
/// not. For our purposes, combining marks should also return true since we
/// assume they have been added to a preceding Latin character.
pub(crate) fn is_latin_letter(letter: char) -> bool {
    // Combining marks are a subset of non-spacing-mark.
    if !letter.is_alphabetic()
        && letter.general_category() != GeneralCategory::NonspacingMark
    {
        return false;
    }
    let Some(block) = find_unicode_block(letter) else {
        return false;
    };
    block == unicode_blocks::BASIC_LATIN
        || block == unicode_blocks::LATIN_1_SUPPLEMENT
        || block == unicode_blocks::LATIN_EXTENDED_A
        || block == unicode_blocks::LATIN_EXTENDED_ADDITIONAL
        || block == unicode_blocks::LATIN_EXTENDED_B
        || block == unicode_blocks::COMBINING_DIACRITICAL_MARKS
}

fn contains_only_valid_x_chars(
    number: &PhoneNumber,
    candidate: &str,
    util: &PhoneNumberUtil,
) -> bool {
    // The characters 'x' and 'X' can be (1) a carrier code, in which case
    // they always precede the national significant number or (2) an
    // extension sign, in which case they always precede the extension
    // number. We assume a carrier code is more than 1 digit, so the first
    // case has to have more than 1 consecutive 'x' or 'X', whereas the
    // second case can only have exactly 1 'x' or 'X'.
    let bytes = candidate.as_bytes();
    let mut search_start = 0usize;
    while let Some(relative_index) = candidate[search_start..].find(['x', 'X']) {
        let found = search_start + relative_index;
        // We ignore the character if 'x' or 'X' appears as the last
        // character of the string.
        if found >= candidate.len() - 1 {
            break;
        }
        // We only look for 'x' or 'X' in ASCII form.
        let next_char = bytes[found + 1];
        if next_char == b'x' || next_char == b'X' {
            // This is the carrier code case, in which the 'X's always
            // precede the national significant number.
            if util.is_number_match_with_one_string(number, &candidate[found + 1..])
                != MatchType::NsnMatch
            {
                return false;
            }
            search_start = found + 2;
        } else {
            let mut normalized_extension = candidate[found..].to_string();
            util.normalize_digits_only(&mut normalized_extension);
            if normalized_extension != number.extension() {
                return false;
            }
            search_start = found + 1;
        }
    }
    true
}

/// A stateful iterator that extracts telephone numbers from a piece of
/// text.
///
/// Matches are produced in strictly increasing order of their byte offset
/// in the text, never overlap, and are only observable after full
/// verification at the configured [`Leniency`].
///
/// A matcher is single-threaded; run one matcher per text, and as many
/// matchers in parallel as desired across distinct instances.
pub struct PhoneNumberMatcher<'a> {
    reg_exps: &'static PhoneNumberMatcherRegExps,
    phone_util: &'a PhoneNumberUtil,
    /// The text searched for phone numbers.
    text: &'a str,
    /// The region (ISO 3166-1 alpha-2) numbers without an explicit country
    /// code are parsed with.
    preferred_region: String,
    leniency: Leniency,
    /// Attempts left; every rejected candidate (including inner-match
    /// peels) consumes one. Caps worst-case work on adversarial input.
    max_tries: i64,
    state: MatcherState,
    /// The next byte offset to scan from; monotone non-decreasing and
    /// always on a character boundary.
    search_index: usize,
}

impl<'a> PhoneNumberMatcher<'a> {
    /// Creates a matcher over `text`, producing matches verified at
    /// [`Leniency::Valid`] with no bound on the number of attempts.
    ///
    /// `region_code` is the region numbers without an explicit country
    /// code are expected to be from.
    pub fn new(text: &'a str, region_code: &str) -> Self {
        Self::with_options(
            &PHONE_NUMBER_UTIL,
            text,
            region_code,
            Leniency::Valid,
            i64::MAX,
        )
    }

    pub fn with_options(
        phone_util: &'a PhoneNumberUtil,
        text: &'a str,
        region_code: &str,
        leniency: Leniency,
        max_tries: i64,
    ) -> Self {
        Self {
            reg_exps: PhoneNumberMatcherRegExps::get_instance(),
            phone_util,
            text,
            preferred_region: region_code.to_string(),
            leniency,
            max_tries,
            state: MatcherState::NotReady,
            search_index: 0,
        }
    }

    /// Returns whether another match is available, scanning for it if
    /// necessary.
    pub fn has_next(&mut self) -> bool {
        if matches!(self.state, MatcherState::NotReady) {
            match self.find(self.search_index) {
                Some(phone_match) => {
                    self.search_index = phone_match.end();
                    self.state = MatcherState::Ready(phone_match);
                }
                None => {
                    self.state = MatcherState::Done;
                }
            }
        }
        matches!(self.state, MatcherState::Ready(_))
    }

    /// Returns the next match, or `None` once the text is exhausted.
    pub fn next_match(&mut self) -> Option<PhoneNumberMatch> {
        // Check the state and find the next match as a side-effect if
        // necessary.
        if !self.has_next() {
            return None;
        }
        match std::mem::replace(&mut self.state, MatcherState::NotReady) {
            MatcherState::Ready(phone_match) => Some(phone_match),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Scans the text from `index` for the next verifiable candidate.
    fn find(&mut self, index: usize) -> Option<PhoneNumberMatch> {
        let text = self.text;
        let mut index = index;
        while self.max_tries > 0 {
            let pattern_match = self.reg_exps.pattern.find(&text[index..])?;
            let matched_start = index + pattern_match.start();
            let matched_end = index + pattern_match.end();
            let mut candidate = &text[matched_start..matched_end];

            // Check for extra numbers at the end.
            if let Some(captures) = self
                .reg_exps
                .capture_up_to_second_number_start_pattern
                .captures(candidate)
            {
                if let Some(group) = captures.get(1) {
                    candidate = &candidate[..group.end()];
                }
            }

            if let Some(phone_match) = self.extract_match(candidate, matched_start) {
                return Some(phone_match);
            }

            // Rejected: keep scanning after the original (untruncated)
            // match.
            index = matched_end;
            self.max_tries -= 1;
        }
        None
    }

    /// Classifies the candidate against the noise patterns, then attempts
    /// whole-candidate verification, falling back to inner-match
    /// extraction.
    fn extract_match(&mut self, candidate: &'a str, offset: usize) -> Option<PhoneNumberMatch> {
        // Skip a match that is more likely a publication page reference or
        // a date.
        if self.reg_exps.pub_pages.is_match(candidate)
            || self.reg_exps.slash_separated_dates.is_match(candidate)
        {
            return None;
        }
        // Skip potential time-stamps.
        if self.reg_exps.time_stamps.is_match(candidate) {
            let following_text = &self.text[offset + candidate.len()..];
            if self
                .reg_exps
                .time_stamps_suffix
                .consume_start(following_text)
                .is_some()
            {
                return None;
            }
        }

        // Try to come up with a valid match given the entire candidate.
        if let Some(phone_match) = self.parse_and_verify(candidate, offset) {
            return Some(phone_match);
        }

        // If that failed, try to find an "inner match" - there might be a
        // phone number within this candidate.
        self.extract_inner_match(candidate, offset)
    }

    /// Attempts to extract a match out of `candidate` by peeling the first
    /// or last whitespace-delimited group.
    fn extract_inner_match(
        &mut self,
        candidate: &'a str,
        offset: usize,
    ) -> Option<PhoneNumberMatch> {
        // We consider white space to be a possible indication of the start
        // or end of the phone number.
        let first_separator = self.reg_exps.group_separator.find(candidate)?;
        let group_start_index = first_separator.end();

        // Try the first group by itself.
        let first_group_only = self
            .phone_util
            .trim_unwanted_end_chars(&candidate[..group_start_index]);
        if let Some(phone_match) = self.parse_and_verify(first_group_only, offset) {
            return Some(phone_match);
        }
        self.max_tries -= 1;

        // Try the rest of the candidate without the first group.
        let without_first_group = self
            .phone_util
            .trim_unwanted_end_chars(&candidate[group_start_index..]);
        if let Some(phone_match) =
            self.parse_and_verify(without_first_group, offset + group_start_index)
        {
            return Some(phone_match);
        }
        self.max_tries -= 1;

        if self.max_tries > 0 {
            // Find the last group.
            let mut last_group_start = group_start_index;
            while let Some(separator) = self
                .reg_exps
                .group_separator
                .find(&candidate[last_group_start..])
            {
                last_group_start += separator.end();
            }
            let without_last_group = self
                .phone_util
                .trim_unwanted_end_chars(&candidate[..last_group_start]);
            if without_last_group == first_group_only {
                // If there are only two groups, then the group "without the
                // last group" is the same as the first group. In these
                // cases, we don't want to re-check the number group, so we
                // exit already.
                return None;
            }
            if let Some(phone_match) = self.parse_and_verify(without_last_group, offset) {
                return Some(phone_match);
            }
            self.max_tries -= 1;
        }
        None
    }

    /// Parses a candidate and verifies it according to the configured
    /// leniency, also applying the bracket-balance and adjacent-character
    /// checks.
    fn parse_and_verify(&self, candidate: &str, offset: usize) -> Option<PhoneNumberMatch> {
        // Check the candidate doesn't contain any formatting which would
        // indicate that it really isn't a phone number.
        if !self.reg_exps.matching_brackets.full_match(candidate) {
            return None;
        }

        // If leniency is set to VALID or stricter, we also want to skip
        // numbers that are surrounded by Latin alphabetic characters, to
        // skip cases like abc8005001234 or 8005001234def.
        if self.leniency >= Leniency::Valid {
            // If the candidate is not at the start of the text, and does
            // not start with phone-number punctuation, check the previous
            // character.
            if offset > 0
                && self
                    .reg_exps
                    .lead_class_pattern
                    .consume_start(candidate)
                    .is_none()
            {
                if let Some(previous_char) = self.text[..offset].chars().next_back() {
                    if is_invalid_punctuation_symbol(previous_char)
                        || is_latin_letter(previous_char)
                    {
                        return None;
                    }
                }
            }
            let last_char_index = offset + candidate.len();
            if last_char_index < self.text.len() {
                if let Some(next_char) = self.text[last_char_index..].chars().next() {
                    if is_invalid_punctuation_symbol(next_char) || is_latin_letter(next_char) {
                        return None;
                    }
                }
            }
        }

        let mut number = self
            .phone_util
            .parse_and_keep_raw_input(candidate, &self.preferred_region)
            .ok()?;
        if self.verify_according_to_leniency(&number, candidate) {
            // We parsed keeping the raw input, but for now we don't return
            // the extra values parsed.
            // TODO: stop clearing these values here and switch users over
            // to reading raw_input() rather than raw_string() of the
            // match.
            number.clear_country_code_source();
            number.clear_preferred_domestic_carrier_code();
            number.clear_raw_input();
            return Some(PhoneNumberMatch::new(offset, candidate.to_string(), number));
        }
        None
    }

    fn verify_according_to_leniency(&self, number: &PhoneNumber, candidate: &str) -> bool {
        match self.leniency {
            Leniency::Possible => self.phone_util.is_possible_number(number),
            Leniency::Valid => {
                if !self.phone_util.is_valid_number(number)
                    || !contains_only_valid_x_chars(number, candidate, self.phone_util)
                {
                    return false;
                }
                self.is_national_prefix_present_if_required(number)
            }
            Leniency::StrictGrouping => {
                if !self.phone_util.is_valid_number(number)
                    || !contains_only_valid_x_chars(number, candidate, self.phone_util)
                    // Two or more slashes were present.
                    || candidate.match_indices('/').nth(1).is_some()
                    || !self.is_national_prefix_present_if_required(number)
                {
                    return false;
                }
                self.check_strict_grouping(number, candidate)
            }
            Leniency::ExactGrouping => {
                if !self.phone_util.is_valid_number(number)
                    || !contains_only_valid_x_chars(number, candidate, self.phone_util)
                    // Two or more slashes were present.
                    || candidate.match_indices('/').nth(1).is_some()
                    || !self.is_national_prefix_present_if_required(number)
                {
                    return false;
                }
                self.check_exact_grouping(number, candidate)
            }
        }
    }

    /// Returns the national-number part of `number`, formatted without any
    /// national prefix, as the digit blocks that would be formatted
    /// together.
    fn get_national_number_groups(&self, number: &PhoneNumber) -> Vec<String> {
        // This will be in the format +CC-DG;ext=EXT where DG represents
        // groups of digits.
        let rfc3966_format = self.phone_util.format(number, PhoneNumberFormat::RFC3966);
        // We remove the extension part from the formatted string before
        // splitting it into different groups.
        let end_index = rfc3966_format.find(';').unwrap_or(rfc3966_format.len());
        // The country-code will have a '-' following it.
        let start_index = rfc3966_format.find('-').map(|index| index + 1).unwrap_or(0);
        if start_index > end_index {
            return Vec::new();
        }
        rfc3966_format[start_index..end_index]
            .split('-')
            .map(str::to_string)
            .collect()
    }

    fn check_strict_grouping(&self, number: &PhoneNumber, candidate: &str) -> bool {
        let normalized_candidate = normalize_decimal_digits(candidate);
        let formatted_number_groups = self.get_national_number_groups(number);
        let mut from_index = 0usize;
        // Check each group of consecutive digits are not broken into
        // separate groups in the normalized_candidate string.
        for (i, digit_group) in formatted_number_groups.iter().enumerate() {
            // Fails if the substring of normalized_candidate starting from
            // from_index doesn't contain the consecutive digits in
            // digit_group.
            let Some(position) = normalized_candidate[from_index..].find(digit_group.as_str())
            else {
                return false;
            };
            // Moves from_index forward.
            from_index += position + digit_group.len();
            if i == 0 && from_index < normalized_candidate.len() {
                // We are at the position right after the NDC. Note although
                // normalized_candidate might contain non-ASCII formatting
                // characters, the byte at this position can only be an
                // ASCII digit if a digit character follows.
                if normalized_candidate.as_bytes()[from_index].is_ascii_digit() {
                    // This means there is no formatting symbol after the
                    // NDC. In this case, we only accept the number if there
                    // is no formatting symbol at all in the number, except
                    // for extensions.
                    let national_significant_number =
                        PhoneNumberUtil::get_national_significant_number(number);
                    return normalized_candidate[from_index - digit_group.len()..]
                        .starts_with(&national_significant_number);
                }
            }
        }
        // The check here makes sure that we haven't mistakenly already
        // used the extension to match the last group of the subscriber
        // number. Note the extension cannot have formatting in-between
        // digits.
        normalized_candidate[from_index..].contains(number.extension())
    }

    fn check_exact_grouping(&self, number: &PhoneNumber, candidate: &str) -> bool {
        let normalized_candidate = normalize_decimal_digits(candidate);
        let candidate_groups: Vec<&str> = self
            .reg_exps
            .capturing_ascii_digits_pattern
            .find_iter(&normalized_candidate)
            .map(|digit_block| digit_block.as_str())
            .collect();
        if candidate_groups.is_empty() {
            return false;
        }

        // Set this to the last group, skipping it if the number has an
        // extension.
        let mut candidate_number_group_index: isize = if number.has_extension() {
            candidate_groups.len() as isize - 2
        } else {
            candidate_groups.len() as isize - 1
        };
        // First we check if the national significant number is formatted
        // as a block. We use contains and not equals, since the national
        // significant number may be present with a prefix such as a
        // national number prefix, or the country code itself.
        let national_significant_number =
            PhoneNumberUtil::get_national_significant_number(number);
        if candidate_groups.len() == 1
            || (candidate_number_group_index >= 0
                && candidate_groups[candidate_number_group_index as usize]
                    .contains(&national_significant_number))
        {
            return true;
        }

        let formatted_number_groups = self.get_national_number_groups(number);
        if formatted_number_groups.is_empty() {
            return false;
        }
        // Starting from the end, go through in reverse, excluding the
        // first group, and check the candidate and number groups are the
        // same.
        let mut formatted_number_group_index = formatted_number_groups.len() as isize - 1;
        while formatted_number_group_index > 0 && candidate_number_group_index >= 0 {
            if candidate_groups[candidate_number_group_index as usize]
                != formatted_number_groups[formatted_number_group_index as usize]
            {
                return false;
            }
            formatted_number_group_index -= 1;
            candidate_number_group_index -= 1;
        }
        // Now check the first group. There may be a national prefix at the
        // start, so we only check that the candidate group ends with the
        // formatted number group.
        candidate_number_group_index >= 0
            && candidate_groups[candidate_number_group_index as usize]
                .ends_with(&formatted_number_groups[0])
    }

    fn is_national_prefix_present_if_required(&self, number: &PhoneNumber) -> bool {
        // First, check how we deduced the country code. If it was written
        // in international format, then the national prefix is not
        // required.
        if number.country_code_source() != CountryCodeSource::FromDefaultCountry {
            return true;
        }
        let phone_number_region = self
            .phone_util
            .get_region_code_for_country_code(number.country_code());
        let Some(metadata) = self.phone_util.get_metadata_for_region(phone_number_region)
        else {
            return true;
        };
        // Check if a national prefix should be present when formatting
        // this number.
        let national_number = PhoneNumberUtil::get_national_significant_number(number);
        let format_rule = match self
            .phone_util
            .choose_formatting_pattern_for_number(&metadata.number_format, &national_number)
        {
            Ok(format_rule) => format_rule,
            Err(err) => {
                log::error!("Invalid regex in metadata! {}", err);
                return false;
            }
        };
        // To do this, we check that a national prefix formatting rule was
        // present and that it wasn't just the first-group symbol ($1) with
        // punctuation.
        let Some(format_rule) = format_rule else {
            return true;
        };
        if format_rule.national_prefix_formatting_rule().is_empty() {
            return true;
        }
        if format_rule.national_prefix_optional_when_formatting() {
            // The national-prefix is optional in these cases, so we don't
            // need to check if it was present.
            return true;
        }
        // Remove the first-group symbol.
        let mut candidate_national_prefix_rule =
            format_rule.national_prefix_formatting_rule().to_string();
        // We assume that the first-group symbol will never be _before_ the
        // national prefix.
        if let Some(index) = candidate_national_prefix_rule.find("$1") {
            candidate_national_prefix_rule.truncate(index);
        }
        self.phone_util
            .normalize_digits_only(&mut candidate_national_prefix_rule);
        if candidate_national_prefix_rule.is_empty() {
            // National prefix not needed for this number.
            return true;
        }
        // Normalize the remainder, and check if we found a national prefix
        // and/or carrier code at the start of the raw input.
        let mut raw_input_copy = number.raw_input().to_string();
        self.phone_util.normalize_digits_only(&mut raw_input_copy);
        self.phone_util
            .maybe_strip_national_prefix_and_carrier_code(metadata, &mut raw_input_copy, None)
            .unwrap_or_else(|err| {
                log::error!("Invalid regex in metadata! {}", err);
                false
            })
    }
}

impl<'a> Iterator for PhoneNumberMatcher<'a> {
    type Item = PhoneNumberMatch;

    fn next(&mut self) -> Option<PhoneNumberMatch> {
        self.next_match()
    }
}
