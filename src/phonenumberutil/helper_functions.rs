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

use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;

use crate::{
    interfaces::MatcherApi,
    metadata::{PhoneMetadata, PhoneNumberDesc},
    phonenumber::PhoneNumber,
};

use super::{
    PhoneNumberFormat, PhoneNumberType, ValidNumberLenType, ValidationResultErr,
    helper_constants::{
        OPTIONAL_EXT_SUFFIX, PLUS_SIGN, POSSIBLE_CHARS_AFTER_EXT_LABEL,
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, RFC3966_EXTN_PREFIX, RFC3966_PREFIX,
    },
};

/// Starting code points of the `Nd` digit runs that show up in phone
/// numbers in the wild: ASCII, Arabic-Indic, Extended Arabic-Indic,
/// Devanagari, Bengali, Gurmukhi, Gujarati, Tamil, Thai, Lao, Myanmar,
/// Khmer, Mongolian and fullwidth. Each run covers the ten digits starting
/// at its zero.
const DECIMAL_DIGIT_ZERO_POINTS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0BE6, 0x0E50, 0x0ED0, 0x1040,
    0x17E0, 0x1810, 0xFF10,
];

/// Returns the numeric value of a decimal digit code point, in any of the
/// digit scripts listed above.
pub(crate) fn decimal_digit_value(c: char) -> Option<u32> {
    let code_point = c as u32;
    DECIMAL_DIGIT_ZERO_POINTS.iter().find_map(|zero| {
        (code_point >= *zero && code_point < *zero + 10).then(|| code_point - *zero)
    })
}

/// Rewrites every decimal digit of the input to its ASCII form, leaving all
/// other characters in place.
pub(crate) fn normalize_decimal_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match decimal_digit_value(c) {
            Some(value) => char::from(b'0' + value as u8),
            None => c,
        })
        .collect()
}

/// Returns a pointer to the description inside the metadata of the
/// appropriate type.
pub(super) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> &PhoneNumberDesc {
    match phone_number_type {
        PhoneNumberType::PremiumRate => &metadata.premium_rate,
        PhoneNumberType::TollFree => &metadata.toll_free,
        PhoneNumberType::Mobile => &metadata.mobile,
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => &metadata.fixed_line,
        PhoneNumberType::SharedCost => &metadata.shared_cost,
        PhoneNumberType::VoIP => &metadata.voip,
        PhoneNumberType::PersonalNumber => &metadata.personal_number,
        PhoneNumberType::Pager => &metadata.pager,
        PhoneNumberType::UAN => &metadata.uan,
        PhoneNumberType::VoiceMail => &metadata.voicemail,
        // Instead of the default case, we only match `Unknown`
        PhoneNumberType::Unknown => &metadata.general_desc,
    }
}

/// A helper function that is used by `format`.
pub(super) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let country_calling_code_str = buf.format(country_calling_code);

    match number_format {
        PhoneNumberFormat::E164 => {
            *formatted_number =
                format!("{PLUS_SIGN}{country_calling_code_str}{formatted_number}");
        }
        PhoneNumberFormat::International => {
            *formatted_number =
                format!("{PLUS_SIGN}{country_calling_code_str} {formatted_number}");
        }
        PhoneNumberFormat::RFC3966 => {
            *formatted_number = format!(
                "{RFC3966_PREFIX}{PLUS_SIGN}{country_calling_code_str}-{formatted_number}"
            );
        }
        PhoneNumberFormat::National => {}
    }
}

// Returns true when one national number is the suffix of the other or both
// are the same.
pub(super) fn is_national_number_suffix_of_the_other(
    first_number: &PhoneNumber,
    second_number: &PhoneNumber,
) -> bool {
    let mut buf = itoa::Buffer::new();
    let first_number_national_number = buf.format(first_number.national_number()).to_string();
    let mut buf = itoa::Buffer::new();
    let second_number_national_number = buf.format(second_number.national_number());
    // Note that ends_with returns true if the numbers are equal.
    first_number_national_number.ends_with(second_number_national_number)
        || second_number_national_number.ends_with(&first_number_national_number)
}

/// Helper method for constructing regular expressions for parsing. Creates
/// an expression that captures up to max_length digits.
pub(super) fn extn_digits(max_length: u32) -> String {
    format!("([{}]{{1,{}}})", super::helper_constants::DIGITS, max_length)
}

// Helper initialiser method to create the regular-expression pattern to
// match extensions. Note that:
// - There are currently six capturing groups for the extension itself. If
// this number is changed, MaybeStripExtension needs to be updated.
// - The only capturing groups should be around the digits that you want to
// capture as part of the extension, or else parsing will fail!
pub(super) fn create_extn_pattern(for_parsing: bool) -> String {
    // We cap the maximum length of an extension based on the ambiguity of
    // the way the extension is prefixed. As per ITU, the officially allowed
    // length for extensions is actually 40, but we don't support this since
    // we haven't seen real examples and this introduces many false
    // interpretations as the extension labels are not standardized.
    let ext_limit_after_explicit_label = 20;
    let ext_limit_after_likely_label = 15;
    let ext_limit_after_ambiguous_char = 9;
    let ext_limit_when_not_sure = 6;

    // Canonical-equivalence doesn't seem to be an option with the regex
    // engine, so we allow two options for representing any non-ASCII
    // character like ó - the character itself, and one in the unicode
    // decomposed form with the combining acute accent.

    // Here the extension is called out in a more explicit way, i.e
    // mentioning it obvious patterns like "ext.".
    let explicit_ext_labels = "(?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|(?:\u{FF45})?\u{FF58}\u{FF54}(?:\u{FF4E})?|\u{0434}\u{043E}\u{0431}|anexo)";
    // One-character symbols that can be used to indicate an extension, and
    // less commonly used or more ambiguous extension labels.
    let ambiguous_ext_labels = "(?:[x\u{FF58}#\u{FF03}~\u{FF5E}]|int|\u{FF49}\u{FF4E}\u{FF54})";
    // When extension is not separated clearly.
    let ambiguous_separator = "[- ]+";

    let rfc_extn = format!(
        "{RFC3966_EXTN_PREFIX}{}",
        extn_digits(ext_limit_after_explicit_label)
    );
    let explicit_extn = format!(
        "{POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL}{explicit_ext_labels}\
         {POSSIBLE_CHARS_AFTER_EXT_LABEL}{}{OPTIONAL_EXT_SUFFIX}",
        extn_digits(ext_limit_after_explicit_label)
    );
    let ambiguous_extn = format!(
        "{POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL}{ambiguous_ext_labels}\
         {POSSIBLE_CHARS_AFTER_EXT_LABEL}{}{OPTIONAL_EXT_SUFFIX}",
        extn_digits(ext_limit_after_ambiguous_char)
    );
    let american_style_extn_with_suffix = format!(
        "{ambiguous_separator}{}#",
        extn_digits(ext_limit_when_not_sure)
    );

    // The first regular expression covers RFC 3966 format, where the
    // extension is added using ";ext=". The second more generic where
    // extension is mentioned with explicit labels like "ext:". In both the
    // above cases we allow more numbers in extension than any other
    // extension labels. The third one captures when single character
    // extension labels or less commonly used labels are present. In such
    // cases we capture fewer extension digits in order to reduce the chance
    // of falsely interpreting two numbers beside each other as a number +
    // extension. The fourth one covers the special case of American numbers
    // where the extension is written with a hash at the end, such as
    // "- 503#".
    let extension_pattern = format!(
        "{rfc_extn}|{explicit_extn}|{ambiguous_extn}|{american_style_extn_with_suffix}"
    );
    // Additional pattern that is supported when parsing extensions, not
    // when matching.
    if for_parsing {
        // ",," is commonly used for auto dialling the extension when
        // connected. Semi-colon works in Iphone and also in Android to pop
        // up a button with the extension number following.
        let auto_dialling_and_ext_labels_found = "(?:,{2}|;)";
        // This is same as POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        // but not matching comma as extension label may have it.
        let possible_separators_number_ext_label_no_comma = "[ \u{00A0}\\t]*";

        let auto_dialling_extn = format!(
            "{possible_separators_number_ext_label_no_comma}\
             {auto_dialling_and_ext_labels_found}{POSSIBLE_CHARS_AFTER_EXT_LABEL}\
             {}{OPTIONAL_EXT_SUFFIX}",
            extn_digits(ext_limit_after_likely_label)
        );
        let only_commas_extn = format!(
            "{possible_separators_number_ext_label_no_comma}\
             (?:,)+{POSSIBLE_CHARS_AFTER_EXT_LABEL}{}{OPTIONAL_EXT_SUFFIX}",
            extn_digits(ext_limit_after_ambiguous_char)
        );
        // Here the first pattern is exclusive for extension autodialling
        // formats which are used when dialling and in this case we accept
        // longer extensions. However, the second pattern is more liberal on
        // the number of commas that acts as extension labels, so we have a
        // strict cap on the number of digits in such extensions.
        return format!("{extension_pattern}|{auto_dialling_extn}|{only_commas_extn}");
    }
    extension_pattern
}

/// Normalizes a string of characters representing a phone number by
/// replacing all characters found in the accompanying map with the values
/// therein, and stripping all other characters if remove_non_matches is
/// true.
///
/// Parameters:
/// * `normalization_replacements` - a mapping of characters to what they
///   should be replaced by in the normalized version of the phone number
/// * `remove_non_matches` - indicates whether characters that are not able
///   to be replaced should be stripped from the number. If this is false,
///   they will be left unchanged in the number.
/// * `phone_number` - the string of characters to be normalized, in place.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &mut String,
) {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        if let Some(replacement) =
            normalization_replacements.get(&phone_char.to_ascii_uppercase())
        {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
        // If neither of the above are true, we remove this character.
    }

    *phone_number = normalized_number;
}

/// Returns `true` if there is any possible number data set for a particular
/// PhoneNumberDesc.
pub(super) fn desc_has_possible_number_data(desc: &PhoneNumberDesc) -> bool {
    // If this is empty, it means numbers of this type inherit from the
    // "general desc" -> the value "-1" means that no numbers exist for this
    // type.
    desc.possible_length.len() != 1 || desc.possible_length.first().copied() != Some(-1)
}

/// Returns `true` if there is any data set for a particular
/// PhoneNumberDesc.
pub(super) fn desc_has_data(desc: &PhoneNumberDesc) -> bool {
    // We don't bother checking the possible_length_local_only, since if
    // this is the only thing that's present we don't really support the
    // type at all: no type-specific methods will work with only this data.
    desc_has_possible_number_data(desc) || desc.has_national_number_pattern()
}

/// Returns the types we have metadata for based on the PhoneMetadata object
/// passed in.
pub(super) fn get_supported_types_for_metadata(
    metadata: &PhoneMetadata,
) -> HashSet<PhoneNumberType> {
    PhoneNumberType::iter()
        // Never return FIXED_LINE_OR_MOBILE (it is a convenience type, and
        // represents that a particular number type can't be determined) or
        // UNKNOWN (the non-type).
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| desc_has_data(get_number_desc_by_type(metadata, *number_type)))
        .collect()
}

/// Helper method to check a number against possible lengths for this number
/// type, and determine whether it matches, or is too short or too long.
pub(super) fn test_number_length(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Result<ValidNumberLenType, ValidationResultErr> {
    let desc_for_type = get_number_desc_by_type(phone_metadata, phone_number_type);
    // There should always be "possibleLengths" set for every element. For
    // size efficiency, where a sub-description (e.g. fixed-line) has the
    // same possible lengths as the parent, this is missing, so we fall back
    // to the general desc (where no numbers of the type exist at all, there
    // is one possible length (-1) which is guaranteed not to match the
    // length of any real phone number).
    let mut possible_lengths = if desc_for_type.possible_length.is_empty() {
        phone_metadata.general_desc.possible_length.clone()
    } else {
        desc_for_type.possible_length.clone()
    };

    let mut local_lengths = desc_for_type.possible_length_local_only.clone();
    if phone_number_type == PhoneNumberType::FixedLineOrMobile {
        let fixed_line_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::FixedLine);
        if !desc_has_possible_number_data(fixed_line_desc) {
            // The rare case has been encountered where no fixedLine data is
            // available (true for some non-geographical entities), so we
            // just check mobile.
            return test_number_length(phone_number, phone_metadata, PhoneNumberType::Mobile);
        } else {
            let mobile_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::Mobile);
            if desc_has_possible_number_data(mobile_desc) {
                // Merge the mobile data in if there was any. Note that when
                // adding the possible lengths from mobile, we have to again
                // check they aren't empty since if they are this indicates
                // they are the same as the general desc and should be
                // obtained from there.
                let lengths_to_append = if mobile_desc.possible_length.is_empty() {
                    &phone_metadata.general_desc.possible_length
                } else {
                    &mobile_desc.possible_length
                };
                possible_lengths.extend_from_slice(lengths_to_append);
                possible_lengths.sort();

                if local_lengths.is_empty() {
                    local_lengths = mobile_desc.possible_length_local_only.clone();
                } else {
                    local_lengths.extend_from_slice(&mobile_desc.possible_length_local_only);
                    local_lengths.sort();
                }
            }
        }
    }

    // If the type is not supported at all (indicated by the possible
    // lengths containing -1 at this point) we return invalid length.
    if possible_lengths.first().copied().unwrap_or(-1) == -1 {
        return Err(ValidationResultErr::InvalidLength);
    }

    let actual_length = phone_number.len() as i32;
    // This is safe because there is never an overlap between the possible
    // lengths and the local-only lengths; this is checked at build time.
    if local_lengths.contains(&actual_length) {
        return Ok(ValidNumberLenType::IsPossibleLocalOnly);
    }

    let minimum_length = possible_lengths[0];
    if minimum_length == actual_length {
        return Ok(ValidNumberLenType::IsPossible);
    } else if minimum_length > actual_length {
        return Err(ValidationResultErr::TooShort);
    } else if possible_lengths[possible_lengths.len() - 1] < actual_length {
        return Err(ValidationResultErr::TooLong);
    }
    // We skip the first element; we've already checked it.
    if possible_lengths[1..].contains(&actual_length) {
        Ok(ValidNumberLenType::IsPossible)
    } else {
        Err(ValidationResultErr::InvalidLength)
    }
}

/// Helper method to check a number against possible lengths for this
/// region, based on the metadata being passed in, and determine whether it
/// matches, or is too short or too long.
pub(super) fn test_number_length_with_unknown_type(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
) -> Result<ValidNumberLenType, ValidationResultErr> {
    test_number_length(phone_number, phone_metadata, PhoneNumberType::Unknown)
}

/// Returns a new phone number containing only the fields needed to uniquely
/// identify a phone number, rather than any fields that capture the context
/// in which the phone number was created.
/// These fields correspond to those set in `parse()` rather than
/// `parse_and_keep_raw_input()`.
pub(crate) fn copy_core_fields_only(from_number: &PhoneNumber, to_number: &mut PhoneNumber) {
    to_number.set_country_code(from_number.country_code());
    to_number.set_national_number(from_number.national_number());
    if from_number.has_extension() {
        to_number.set_extension(from_number.extension().to_string());
    }
    if from_number.italian_leading_zero() {
        to_number.set_italian_leading_zero(true);
        // This field is only relevant if there are leading zeros at all.
        to_number.set_number_of_leading_zeros(from_number.number_of_leading_zeros());
    }
}

/// Keeps track of the leading zeros that are significant in the national
/// number, e.g. for Italian fixed lines.
pub(super) fn set_italian_leading_zeros_for_phone_number(
    national_number: &str,
    phone_number: &mut PhoneNumber,
) {
    if national_number.len() > 1 && national_number.starts_with('0') {
        phone_number.set_italian_leading_zero(true);
        let bytes = national_number.as_bytes();
        let mut number_of_leading_zeros = 1usize;
        // Note that if the national number is all "0"s, the last "0" is not
        // counted as a leading zero.
        while number_of_leading_zeros < bytes.len() - 1 && bytes[number_of_leading_zeros] == b'0'
        {
            number_of_leading_zeros += 1;
        }
        if number_of_leading_zeros != 1 {
            phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
        }
    }
}

/// Determines whether the given number is a national number match for the
/// given PhoneNumberDesc. Does not check against possible lengths!
pub(super) fn is_match(
    matcher_api: &dyn MatcherApi,
    number: &str,
    number_desc: &PhoneNumberDesc,
) -> bool {
    matcher_api.match_national_number(number, number_desc, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_digit_values() {
        assert_eq!(Some(0), decimal_digit_value('0'));
        assert_eq!(Some(9), decimal_digit_value('9'));
        assert_eq!(Some(6), decimal_digit_value('\u{FF16}')); // fullwidth six
        assert_eq!(Some(3), decimal_digit_value('\u{0663}')); // arabic-indic three
        assert_eq!(None, decimal_digit_value('a'));
        assert_eq!(None, decimal_digit_value('-'));
    }

    #[test]
    fn normalize_decimal_digits_preserves_formatting() {
        assert_eq!(
            "(650) 253-0000",
            normalize_decimal_digits("(\u{FF16}\u{FF15}\u{FF10}) 253-0000")
        );
    }
}
