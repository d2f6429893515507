// Copyright (C) 2009 The Libphonenumber Authors
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

use std::{
    borrow::Cow,
    cmp::max,
    collections::{HashMap, HashSet, VecDeque},
};

use log::trace;
use regex::Regex;

use crate::{
    i18n::RegionCode,
    interfaces::MatcherApi,
    metadata::{self, NumberFormat, PhoneMetadata},
    phonenumber::{CountryCodeSource, PhoneNumber},
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{RegexConsume, RegexFullMatch, RegexMatchStart},
    regexp_cache::InvalidRegexError,
};

use super::{
    MatchType, PhoneNumberFormat, PhoneNumberType, ValidNumberLenType,
    errors::{ExtractNumberError, NotANumberError, ParseError, ParseErrorInternal},
    helper_constants::{
        DEFAULT_EXTN_PREFIX, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        RFC3966_EXTN_PREFIX,
    },
    helper_functions::{
        self, copy_core_fields_only, get_supported_types_for_metadata,
        is_national_number_suffix_of_the_other, normalize_helper,
        prefix_number_with_country_calling_code, set_italian_leading_zeros_for_phone_number,
        test_number_length_with_unknown_type,
    },
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};

use super::ValidationResultErr;

pub struct PhoneNumberUtil {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character
    /// mappings.
    reg_exps: PhoneNumberRegExpsAndMappings,

    /// A mapping from a country calling code to the region codes which
    /// denote the regions represented by that country calling code. Regions
    /// under NANPA share the country calling code 1; the main country for a
    /// calling code is sorted first. This is implemented as a sorted vector
    /// to achieve better performance.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// A mapping from a region code to the PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,
}

impl PhoneNumberUtil {
    pub(super) fn new() -> Self {
        let mut instance = Self {
            matcher_api: Box::new(RegexBasedMatcher::new()),
            reg_exps: PhoneNumberRegExpsAndMappings::new(),
            country_calling_code_to_region_code_map: Default::default(),
            region_to_metadata_map: Default::default(),
        };
        // Storing data in a temporary map to make it easier to find other
        // regions that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        for metadata in metadata::metadata_collection() {
            let region_code = metadata.id().to_string();
            if RegionCode::get_unknown() == region_code {
                continue;
            }

            let country_calling_code = metadata.country_code();
            let main_country_for_code = metadata.main_country_for_code();
            instance
                .region_to_metadata_map
                .insert(region_code.clone(), metadata);

            let regions_for_code = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            if main_country_for_code {
                regions_for_code.push_front(region_code);
            } else {
                regions_for_code.push_back(region_code);
            }
        }

        instance.country_calling_code_to_region_code_map.extend(
            country_calling_code_to_region_map
                .into_iter()
                .map(|(code, regions)| (code, Vec::from(regions))),
        );
        // Sort all the pairs in ascending order according to country
        // calling code.
        instance
            .country_calling_code_to_region_code_map
            .sort_by_key(|(code, _)| *code);
        instance
    }

    pub fn get_supported_regions(&self) -> Vec<&str> {
        self.region_to_metadata_map
            .keys()
            .map(|region| region.as_str())
            .collect()
    }

    pub fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.region_to_metadata_map.get(region_code) else {
            log::warn!("Invalid or unknown region code provided: {}", region_code);
            return None;
        };
        Some(get_supported_types_for_metadata(metadata))
    }

    pub(crate) fn get_extn_patterns_for_matching(&self) -> &str {
        &self.reg_exps.extn_patterns_for_matching
    }

    pub fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.region_to_metadata_map.contains_key(region_code)
    }

    fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    /// Returns the region code that matches the specific country calling
    /// code. In the case of no region code being found, the unknown region
    /// code will be returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .first()
            .copied()
            .unwrap_or(RegionCode::get_unknown())
    }

    // Returns the region codes that match the specific country calling
    // code. In the case of no region code being found, the result is left
    // empty.
    fn get_region_codes_for_country_calling_code(
        &self,
        country_calling_code: i32,
    ) -> Vec<&str> {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| {
                self.country_calling_code_to_region_code_map[index]
                    .1
                    .iter()
                    .map(|region| region.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Strips any trailing characters that are not alpha or numerical
    /// characters from the end of the input. The hash character is
    /// retained, as it may signify that the previous block was an
    /// extension.
    pub(crate) fn trim_unwanted_end_chars<'a>(&self, number: &'a str) -> &'a str {
        let mut end = number.len();
        for character in number.chars().rev() {
            if !self
                .reg_exps
                .unwanted_end_char_pattern
                .full_match(&character.to_string())
            {
                break;
            }
            end -= character.len_utf8();
        }
        &number[..end]
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all. At the moment, checks to see that the string begins
    /// with at least 2 digits, ignoring any punctuation commonly found in
    /// phone numbers.
    pub(crate) fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.len() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.full_match(number)
    }

    /// Normalizes a string of characters representing a phone number. This
    /// converts wide-ascii and arabic-indic numerals to European numerals,
    /// and strips punctuation and alpha characters.
    pub fn normalize_digits_only(&self, number: &mut String) {
        let normalized: String = number
            .chars()
            .filter_map(|c| {
                helper_functions::decimal_digit_value(c).map(|value| char::from(b'0' + value as u8))
            })
            .collect();
        *number = normalized;
    }

    /// Normalizes a string of characters representing a phone number. This
    /// performs the following conversions:
    /// - numbers with more than two alpha characters present have the alpha
    ///   characters converted to their keypad digit equivalents,
    /// - other non-digit characters are removed, and digits are normalised
    ///   to their ASCII form.
    pub(crate) fn normalize(&self, number: &mut String) {
        if self.reg_exps.valid_alpha_phone_pattern.full_match(number) {
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, number);
        } else {
            self.normalize_digits_only(number);
        }
    }

    /// Gets the national significant number of a phone number. Note a
    /// national significant number doesn't contain a national prefix or
    /// any formatting.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        // If leading zero(s) have been set, we prefix this now. Note this
        // is not a national prefix. Ensure the number of leading zeros is
        // at least 0 so we don't crash in the case of malicious input.
        let zeros_start = if phone_number.italian_leading_zero() {
            "0".repeat(max(phone_number.number_of_leading_zeros(), 0) as usize)
        } else {
            String::new()
        };

        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());
        format!("{zeros_start}{national_number}")
    }

    // Formatting.

    /// Formats a phone number in the specified format using default rules.
    /// Note that this does not promise to produce a phone number that the
    /// user can dial from where they are - although we do format in either
    /// national or international format depending on what the client asks
    /// for, we do not currently support a more abbreviated format.
    pub fn format(&self, phone_number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        self.format_internal(phone_number, number_format)
            .unwrap_or_else(|err| {
                panic!(
                    "A valid regex is expected in metadata; this indicates a library bug! {}",
                    err
                )
            })
    }

    fn format_internal(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> Result<String, InvalidRegexError> {
        if phone_number.national_number() == 0 {
            let raw_input = phone_number.raw_input();
            if !raw_input.is_empty() {
                // Unparseable numbers that kept their raw input just use
                // that. This is the only case where a number can be
                // formatted as E164 without a leading '+' symbol (but the
                // original number wasn't parseable anyway).
                return Ok(raw_input.to_string());
            }
        }
        let country_calling_code = phone_number.country_code();
        let mut formatted_number = Self::get_national_significant_number(phone_number);
        if matches!(number_format, PhoneNumberFormat::E164) {
            // Early exit for E164 case (even if the country calling code is
            // invalid) since no formatting of the national number needs to
            // be applied. Extensions are not formatted.
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return Ok(formatted_number);
        }
        // Note that all NANPA formatting rules are contained by US, so we
        // use that to format NANPA numbers.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(formatted_number);
        };

        if let Cow::Owned(s) = self.format_nsn(&formatted_number, metadata, number_format)? {
            formatted_number = s;
        }
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, number_format)
        {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    fn format_nsn<'b>(
        &self,
        number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        // When the intl_number_format exists, we use that to format the
        // national number for any output other than the NATIONAL format.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        let formatting_pattern =
            self.choose_formatting_pattern_for_number(available_formats, number)?;
        match formatting_pattern {
            Some(formatting_pattern) => {
                self.format_nsn_using_pattern(number, formatting_pattern, number_format)
            }
            None => Ok(Cow::Borrowed(number)),
        }
    }

    pub(crate) fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> Result<Option<&'b NumberFormat>, InvalidRegexError> {
        for format in available_formats {
            // We always use the last leading_digits_pattern, as it is the
            // most detailed.
            if let Some(leading_digits) = format.leading_digits_pattern.last() {
                let leading_digits_regex = self.reg_exps.regexp_cache.get_regex(leading_digits)?;
                if leading_digits_regex.consume_start(national_number).is_none() {
                    continue;
                }
            }
            let pattern_to_match = self.reg_exps.regexp_cache.get_regex(format.pattern())?;
            if pattern_to_match.full_match(national_number) {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());

        let national_prefix_formatting_rule =
            formatting_pattern.national_prefix_formatting_rule();
        if matches!(number_format, PhoneNumberFormat::National)
            && !national_prefix_formatting_rule.is_empty()
        {
            // Apply the national_prefix_formatting_rule as the
            // formatting_pattern contains only information on how the
            // national significant number should be formatted at this
            // point.
            if let Cow::Owned(s) = self
                .reg_exps
                .first_group_capturing_pattern
                .replace(&number_format_rule, national_prefix_formatting_rule)
            {
                number_format_rule = Cow::Owned(s);
            }
        }

        let pattern_to_match = self
            .reg_exps
            .regexp_cache
            .get_regex(formatting_pattern.pattern())?;

        let mut formatted_number =
            pattern_to_match.replace_all(national_number, number_format_rule.as_ref());

        if matches!(number_format, PhoneNumberFormat::RFC3966) {
            // First consume any leading punctuation, if any was present.
            let without_leading_punctuation = self
                .reg_exps
                .separator_pattern
                .consume_start(&formatted_number)
                .map(|rest| rest.into_owned());
            if let Some(rest) = without_leading_punctuation {
                formatted_number = Cow::Owned(rest);
            }
            // Then replace all separators with a "-".
            let with_hyphens = match self
                .reg_exps
                .separator_pattern
                .replace_all(&formatted_number, "-")
            {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = with_hyphens {
                formatted_number = Cow::Owned(s);
            }
        }
        Ok(formatted_number)
    }

    // Returns the formatted extension of a phone number, if the phone
    // number had an extension specified.
    fn get_formatted_extension(
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> Option<String> {
        if !phone_number.has_extension() || phone_number.extension().is_empty() {
            return None;
        }

        let prefix = if matches!(number_format, PhoneNumberFormat::RFC3966) {
            RFC3966_EXTN_PREFIX
        } else {
            DEFAULT_EXTN_PREFIX
        };
        Some(format!("{prefix}{}", phone_number.extension()))
    }

    // Validity and possibility.

    fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            trace!(
                "Number '{national_number}' type unknown - doesn't match general national number pattern"
            );
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, &metadata.pager) {
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, &metadata.uan) {
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, &metadata.voicemail) {
            return PhoneNumberType::VoiceMail;
        }

        if self.is_number_matching_desc(national_number, &metadata.fixed_line) {
            if metadata.same_mobile_and_fixed_line_pattern()
                || self.is_number_matching_desc(national_number, &metadata.mobile)
            {
                return PhoneNumberType::FixedLineOrMobile;
            }
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if
        // certain that the patterns for mobile and fixed line aren't the
        // same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, &metadata.mobile)
        {
            return PhoneNumberType::Mobile;
        }
        trace!(
            "Number '{national_number}' type unknown - doesn't match any specific number type pattern"
        );
        PhoneNumberType::Unknown
    }

    fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: &crate::metadata::PhoneNumberDesc,
    ) -> bool {
        // Check if any possible number lengths are present; if so, we use
        // them to avoid checking the validation pattern if they don't
        // match. If they are absent, this means they match the general
        // description, which we have already checked before checking a
        // specific number type.
        let actual_length = national_number.len() as i32;
        if !number_desc.possible_length.is_empty()
            && !number_desc.possible_length.contains(&actual_length)
        {
            return false;
        }
        helper_functions::is_match(self.matcher_api.as_ref(), national_number, number_desc)
    }

    fn get_region_code_for_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<&str, InvalidRegexError> {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.get_region_codes_for_country_calling_code(country_calling_code);
        if region_codes.is_empty() {
            trace!(
                "Missing/invalid country calling code ({})",
                country_calling_code
            );
            return Ok(RegionCode::get_unknown());
        }
        if region_codes.len() == 1 {
            Ok(region_codes[0])
        } else {
            self.get_region_code_for_number_from_region_list(phone_number, &region_codes)
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &[&'b str],
    ) -> Result<&'b str, InvalidRegexError> {
        let national_number = Self::get_national_significant_number(phone_number);
        for region_code in region_codes.iter().copied() {
            // Metadata cannot be missing because the region codes come from
            // the country calling code map.
            let metadata = &self.region_to_metadata_map[region_code];
            if metadata.has_leading_digits() {
                if self
                    .reg_exps
                    .regexp_cache
                    .get_regex(metadata.leading_digits())?
                    .consume_start(&national_number)
                    .is_some()
                {
                    return Ok(region_code);
                }
            } else if self.get_number_type_helper(&national_number, metadata)
                != PhoneNumberType::Unknown
            {
                return Ok(region_code);
            }
        }
        Ok(RegionCode::get_unknown())
    }

    /// Tests whether a phone number matches a valid pattern. Note this
    /// doesn't verify the number is actually in use, which is impossible to
    /// tell by just looking at a number itself.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        match self.get_region_code_for_number(phone_number) {
            Ok(region_code) => self.is_valid_number_for_region(phone_number, region_code),
            Err(err) => {
                log::error!("Invalid regex in metadata! {}", err);
                false
            }
        }
    }

    /// Tests whether a phone number is valid for a certain region.
    pub fn is_valid_number_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_code: &str,
    ) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return false;
        };
        if metadata.country_code() != country_code {
            // Either the region code was invalid, or the country calling
            // code for a non-geographical entity was used.
            return false;
        }
        let national_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_number, metadata) != PhoneNumberType::Unknown
    }

    /// Convenience wrapper around
    /// [`is_possible_number_with_reason`](Self::is_possible_number_with_reason).
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        matches!(
            self.is_possible_number_with_reason(phone_number),
            Ok(ValidNumberLenType::IsPossible)
        )
    }

    /// Checks whether a phone number is possible from its length alone.
    ///
    /// Note this provides a more lenient check than
    /// [`is_valid_number`](Self::is_valid_number): it only checks the
    /// length, not the digit patterns.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<ValidNumberLenType, ValidationResultErr> {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: for regions that share a country calling code, like NANPA
        // numbers, we just use the rules from the main region for that
        // calling code, since the possible lengths are the same.
        if !self.has_valid_country_calling_code(country_code) {
            return Err(ValidationResultErr::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        let metadata = self
            .get_metadata_for_region(region_code)
            .ok_or(ValidationResultErr::InvalidCountryCode)?;
        test_number_length_with_unknown_type(&national_number, metadata)
    }

    // Number matching.

    /// Takes two phone numbers and compares them for equality.
    pub fn is_number_match(
        &self,
        first_number_in: &PhoneNumber,
        second_number_in: &PhoneNumber,
    ) -> MatchType {
        // We only care about the fields that uniquely define a number, so
        // we copy these across explicitly.
        let mut first_number = PhoneNumber::new();
        copy_core_fields_only(first_number_in, &mut first_number);
        let mut second_number = PhoneNumber::new();
        copy_core_fields_only(second_number_in, &mut second_number);

        // Early exit if both had extensions and these are different.
        if first_number.has_extension()
            && second_number.has_extension()
            && first_number.extension() != second_number.extension()
        {
            return MatchType::NoMatch;
        }

        let first_number_country_code = first_number.country_code();
        let second_number_country_code = second_number.country_code();
        // Both had country calling code specified.
        if first_number_country_code != 0 && second_number_country_code != 0 {
            if first_number == second_number {
                return MatchType::ExactMatch;
            }
            if first_number_country_code == second_number_country_code
                && is_national_number_suffix_of_the_other(&first_number, &second_number)
            {
                // A SHORT_NSN_MATCH occurs if there is a difference because
                // of the presence or absence of an 'Italian leading zero',
                // the presence or absence of an extension, or one NSN being
                // a shorter variant of the other.
                return MatchType::ShortNsnMatch;
            }
            return MatchType::NoMatch;
        }
        // Checks cases where one or both country calling codes were not
        // specified. To make equality checks easier, we first set the
        // country codes to be equal.
        first_number.set_country_code(second_number_country_code);
        // If all else was the same, then this is an NSN_MATCH.
        if first_number == second_number {
            return MatchType::NsnMatch;
        }
        if is_national_number_suffix_of_the_other(&first_number, &second_number) {
            return MatchType::ShortNsnMatch;
        }
        MatchType::NoMatch
    }

    /// Takes a phone number and a string to match against, parsing the
    /// string with the region the number belongs to.
    pub fn is_number_match_with_one_string(
        &self,
        first_number: &PhoneNumber,
        second_number: &str,
    ) -> MatchType {
        // First see if the second number has an implicit country calling
        // code, by attempting to parse it with the region the first number
        // was parsed for.
        let region_code = self.get_region_code_for_country_code(first_number.country_code());
        if region_code == RegionCode::get_unknown() {
            return MatchType::NoMatch;
        }
        match self.parse(second_number, region_code) {
            Ok(second_number_as_proto) => {
                self.is_number_match(first_number, &second_number_as_proto)
            }
            Err(_) => MatchType::NoMatch,
        }
    }

    // Parsing.

    /// Parses a string and returns it as a phone number in proto buffer
    /// format. The method is quite lenient and looks for a number in the
    /// input text (raw input) and does not check whether the string is
    /// definitely only a phone number. To do this, it ignores punctuation
    /// and white-space, as well as any text before the number (e.g. a
    /// leading "Tel: ") and trims the non-number bits.
    pub fn parse(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, false, true)
            .map_err(ParseErrorInternal::into_public)
    }

    /// Parses a string and returns it in proto buffer format. This method
    /// differs from [`parse`](Self::parse) in that it always populates the
    /// raw_input field of the protocol buffer with number_to_parse as well
    /// as the country_code_source field.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, true, true)
            .map_err(ParseErrorInternal::into_public)
    }

    /// Checks to see that the region code used is valid, or if it is not
    /// valid, that the number to parse starts with a + symbol so that we
    /// can attempt to infer the region from the number.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        self.is_valid_region_code(default_region)
            || (!number_to_parse.is_empty()
                && self
                    .reg_exps
                    .plus_chars_pattern
                    .matches_start(number_to_parse))
    }

    /// Attempts to extract a possible number from the string passed in.
    /// This currently strips all leading characters that cannot be used to
    /// start a phone number. Characters that can be used to start a phone
    /// number are decimal digits and the plus sign. If the string does not
    /// begin with any of these characters, trailing unwanted characters
    /// are also removed, and a prefix that looks like the start of a
    /// second number is cut off.
    fn extract_possible_number<'a>(
        &self,
        number: &'a str,
    ) -> Result<&'a str, ExtractNumberError> {
        let Some(start_match) = self.reg_exps.valid_start_char_pattern.find(number) else {
            return Err(ExtractNumberError::NoValidStartCharacter);
        };
        let number = &number[start_match.start()..];
        // Remove trailing non-alpha non-numerical characters.
        let number = self.trim_unwanted_end_chars(number);
        if number.is_empty() {
            return Err(ExtractNumberError::NotANumber);
        }
        // Check for extra numbers at the end.
        if let Some(captures) = self
            .reg_exps
            .capture_up_to_second_number_start_pattern
            .captures(number)
        {
            if let Some(group) = captures.get(1) {
                return Ok(&number[..group.end()]);
            }
        }
        Ok(number)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseErrorInternal> {
        let extracted = self.extract_possible_number(number_to_parse)?;
        if !self.is_viable_phone_number(extracted) {
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        if check_region && !self.check_region_for_parsing(extracted, default_region) {
            trace!("Missing or invalid default country.");
            return Err(ParseError::InvalidCountryCode.into());
        }

        let mut phone_number = PhoneNumber::new();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_string());
        }

        let mut national_number = extracted.to_string();
        // Attempt to parse extension first, since it doesn't require
        // region-specific data and we want to have the non-normalised
        // number here.
        if let Some(extension) = self.maybe_strip_extension(&mut national_number) {
            phone_number.set_extension(extension);
        }

        let mut country_metadata = self.get_metadata_for_region(default_region);
        // Check to see if the number is given in international format so we
        // know whether this number is from the default region or not.
        let country_code = self.maybe_extract_country_code(
            country_metadata,
            keep_raw_input,
            &mut national_number,
            &mut phone_number,
        )?;
        if country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(country_code);
            if phone_number_region != default_region {
                country_metadata = self.get_metadata_for_region(phone_number_region);
            }
        } else {
            // If no extracted country calling code, use the region supplied
            // instead. Note the national number was already normalized.
            let Some(metadata) = country_metadata else {
                return Err(ParseError::InvalidCountryCode.into());
            };
            phone_number.set_country_code(metadata.country_code());
        }

        if national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn.into());
        }

        if let Some(metadata) = country_metadata {
            let mut carrier_code = String::new();
            let mut potential_national_number = national_number.clone();
            self.maybe_strip_national_prefix_and_carrier_code(
                metadata,
                &mut potential_national_number,
                Some(&mut carrier_code),
            )?;
            // We require that the NSN remaining after stripping must be
            // long enough to be a possible length for the region.
            // Otherwise, we don't do the stripping, since the original
            // number could be a valid short number.
            let validation_result =
                test_number_length_with_unknown_type(&potential_national_number, metadata);
            match validation_result {
                Err(ValidationResultErr::TooShort)
                | Err(ValidationResultErr::InvalidLength)
                | Ok(ValidNumberLenType::IsPossibleLocalOnly) => {}
                _ => {
                    national_number = potential_national_number;
                    if keep_raw_input && !carrier_code.is_empty() {
                        phone_number.set_preferred_domestic_carrier_code(carrier_code);
                    }
                }
            }
        }

        let normalized_national_number_length = national_number.len();
        if normalized_national_number_length < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn.into());
        }
        if normalized_national_number_length > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLongNsn.into());
        }
        set_italian_leading_zeros_for_phone_number(&national_number, &mut phone_number);

        let number_as_int: u64 = national_number
            .parse()
            .map_err(|err| NotANumberError::FailedToParseNumberAsInt(err))?;
        phone_number.set_national_number(number_as_int);
        Ok(phone_number)
    }

    /// Tries to extract a country calling code from a number. Country
    /// calling codes are extracted in the following ways:
    /// - by stripping the international dialing prefix of the region the
    ///   person is dialing from, if this is present in the number, and
    ///   looking at the next digits,
    /// - by stripping the '+' sign if present and then looking at the next
    ///   digits,
    /// - by comparing the start of the number and the country calling code
    ///   of the default region. If the number is not considered possible
    ///   for the numbering plan of the default region initially, but starts
    ///   with the country calling code of this region, validation will be
    ///   reattempted after stripping this country calling code.
    fn maybe_extract_country_code(
        &self,
        metadata: Option<&PhoneMetadata>,
        keep_raw_input: bool,
        national_number: &mut String,
        phone_number: &mut PhoneNumber,
    ) -> Result<i32, ParseErrorInternal> {
        if national_number.is_empty() {
            return Ok(0);
        }
        // Set the default prefix to be something that will never match if
        // there is no default region.
        let possible_country_idd_prefix = metadata
            .map(|md| md.international_prefix())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or("NonMatch");

        let country_code_source = self
            .maybe_strip_international_prefix_and_normalize(
                national_number,
                possible_country_idd_prefix,
            )?;
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }
        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if national_number.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShortAfterIdd.into());
            }
            let potential_country_code = self.extract_country_code(national_number);
            if potential_country_code != 0 {
                phone_number.set_country_code(potential_country_code);
                return Ok(potential_country_code);
            }
            // If this fails, they must be using a strange country calling
            // code that we don't recognize, or that doesn't exist.
            return Err(ParseError::InvalidCountryCode.into());
        }
        if let Some(metadata) = metadata {
            // Check to see if the number starts with the country calling
            // code for the default region. If so, we remove the country
            // calling code, and do some checks on the validity of the
            // number before and after.
            let default_country_code = metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(potential_national_number) =
                national_number.strip_prefix(default_country_code_str)
            {
                let mut potential_national_number = potential_national_number.to_string();
                let general_pattern = self
                    .reg_exps
                    .regexp_cache
                    .get_regex(metadata.general_desc.national_number_pattern())?;
                self.maybe_strip_national_prefix_and_carrier_code(
                    metadata,
                    &mut potential_national_number,
                    None,
                )?;
                // If the number was not valid before but is valid now, or
                // if it was too long before, we consider the number with
                // the country code stripped to be a better result and keep
                // that instead.
                if (!general_pattern.full_match(national_number)
                    && general_pattern.full_match(&potential_national_number))
                    || matches!(
                        test_number_length_with_unknown_type(national_number, metadata),
                        Err(ValidationResultErr::TooLong)
                    )
                {
                    *national_number = potential_national_number;
                    if keep_raw_input {
                        phone_number
                            .set_country_code_source(CountryCodeSource::FromNumberWithoutPlusSign);
                    }
                    phone_number.set_country_code(default_country_code);
                    return Ok(default_country_code);
                }
            }
        }
        // No country calling code present.
        phone_number.set_country_code(0);
        Ok(0)
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if
    /// an international prefix was present.
    fn maybe_strip_international_prefix_and_normalize(
        &self,
        number: &mut String,
        possible_idd_prefix: &str,
    ) -> Result<CountryCodeSource, InvalidRegexError> {
        if number.is_empty() {
            return Ok(CountryCodeSource::FromDefaultCountry);
        }
        let without_plus = self
            .reg_exps
            .plus_chars_pattern
            .consume_start(number)
            .map(|rest| rest.into_owned());
        if let Some(rest) = without_plus {
            // Can now normalize the rest of the number since we've consumed
            // the "+" sign at the start.
            *number = rest;
            self.normalize(number);
            return Ok(CountryCodeSource::FromNumberWithPlusSign);
        }
        // Attempt to parse the first digits as an international prefix.
        let idd_pattern = self.reg_exps.regexp_cache.get_regex(possible_idd_prefix)?;
        self.normalize(number);
        if self.parse_prefix_as_idd(&idd_pattern, number) {
            Ok(CountryCodeSource::FromNumberWithIdd)
        } else {
            Ok(CountryCodeSource::FromDefaultCountry)
        }
    }

    /// Strips the IDD from the start of the number if present. Helper
    /// function used by
    /// [`maybe_strip_international_prefix_and_normalize`](Self::maybe_strip_international_prefix_and_normalize).
    fn parse_prefix_as_idd(&self, idd_pattern: &Regex, number: &mut String) -> bool {
        let Some(idd_match) = idd_pattern.find(number) else {
            return false;
        };
        if idd_match.start() != 0 {
            return false;
        }
        let match_end = idd_match.end();
        // Only strip this if the first digit after the match is not a 0,
        // since country calling codes cannot begin with 0.
        if let Some(captures) = self
            .reg_exps
            .capturing_digit_pattern
            .captures(&number[match_end..])
        {
            let digit = captures.get(1).map(|g| g.as_str()).unwrap_or("");
            if helper_functions::normalize_decimal_digits(digit) == "0" {
                return false;
            }
        }
        number.drain(..match_end);
        true
    }

    /// Extracts the country calling code from the beginning of
    /// national_number (already normalized), and places the remaining
    /// number in place. Returns 0 if no valid calling code was present.
    fn extract_country_code(&self, national_number: &mut String) -> i32 {
        if national_number.is_empty() || national_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return 0;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE {
            if length > national_number.len() {
                break;
            }
            let Ok(potential_country_code) = national_number[..length].parse::<i32>() else {
                break;
            };
            if self.has_valid_country_calling_code(potential_country_code) {
                national_number.drain(..length);
                return potential_country_code;
            }
        }
        0
    }

    /// Strips any national prefix (such as 0, 1) or carrier code present in
    /// the number, provided the remainder still matches the region's
    /// general number pattern. Returns true when something was stripped.
    pub(crate) fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        metadata: &PhoneMetadata,
        number: &mut String,
        carrier_code: Option<&mut String>,
    ) -> Result<bool, InvalidRegexError> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length or with no national
            // prefix possible.
            return Ok(false);
        }
        // Attempt to parse the first digits as a national prefix. We make a
        // copy so that we can revert to the original string if necessary.
        let prefix_pattern = self
            .reg_exps
            .regexp_cache
            .get_regex(&format!("^(?:{possible_national_prefix})"))?;
        let general_pattern = self
            .reg_exps
            .regexp_cache
            .get_regex(metadata.general_desc.national_number_pattern())?;
        let is_viable_original_number = general_pattern.full_match(number);
        let transform_rule = metadata.national_prefix_transform_rule();

        let (stripped_number, captured_carrier_code) = {
            let Some(captures) = prefix_pattern.captures(number) else {
                return Ok(false);
            };
            let full_match_end = captures.get(0).map(|m| m.end()).unwrap_or(0);
            let number_of_groups = captures.len() - 1;
            if !transform_rule.is_empty()
                && number_of_groups > 0
                && captures.get(number_of_groups).is_some()
            {
                // If this succeeded, then we must have had a transform rule
                // and there was some part of the prefix that we captured.
                // We make the transformation and check that the resultant
                // number is still viable.
                let mut transformed = String::new();
                captures.expand(transform_rule, &mut transformed);
                transformed.push_str(&number[full_match_end..]);
                let carrier = (number_of_groups > 1)
                    .then(|| captures.get(1).map(|g| g.as_str().to_string()))
                    .flatten();
                (transformed, carrier)
            } else {
                let carrier = captures.get(1).map(|g| g.as_str().to_string());
                (number[full_match_end..].to_string(), carrier)
            }
        };

        if is_viable_original_number && !general_pattern.full_match(&stripped_number) {
            return Ok(false);
        }
        if let Some(carrier_code) = carrier_code {
            if let Some(captured) = captured_carrier_code {
                carrier_code.push_str(&captured);
            }
        }
        *number = stripped_number;
        Ok(true)
    }

    /// Strips any extension (as in, the part of the number dialled after
    /// the call is connected, usually indicated with extn, ext, x or
    /// similar) from the end of the number, and returns it.
    fn maybe_strip_extension(&self, number: &mut String) -> Option<String> {
        let (match_start, extension) = {
            let captures = self.reg_exps.extn_pattern.captures(number)?;
            let match_start = captures.get(0)?.start();
            // If we find a potential extension, and the number preceding
            // this is a viable number, we assume it is an extension.
            if !self.is_viable_phone_number(&number[..match_start]) {
                return None;
            }
            // The numbers are captured into groups in the regular
            // expression.
            let group = (1..captures.len())
                .filter_map(|index| captures.get(index))
                .find(|group| !group.as_str().is_empty())?;
            (match_start, group.as_str().to_string())
        };
        number.truncate(match_start);
        Some(extension)
    }
}
