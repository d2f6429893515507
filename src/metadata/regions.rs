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

//! The numbering-plan registry bundled with this library.
//!
//! Patterns are expressed over the national significant number, national
//! prefix excluded (but including the significant leading zeros of regions
//! like Italy). Formatting rules carry the national prefix already
//! resolved into the rule text.

use super::{NumberFormat, PhoneMetadata, PhoneNumberDesc};

fn desc(pattern: &str, possible_length: &[i32]) -> PhoneNumberDesc {
    let mut d = PhoneNumberDesc {
        possible_length: possible_length.to_vec(),
        ..Default::default()
    };
    d.set_national_number_pattern(pattern.to_string());
    d
}

fn desc_with_local_lengths(
    pattern: &str,
    possible_length: &[i32],
    local_only: &[i32],
) -> PhoneNumberDesc {
    let mut d = desc(pattern, possible_length);
    d.possible_length_local_only = local_only.to_vec();
    d
}

/// A description carrying the single length `-1`, marking a number type a
/// region has no numbers of.
fn no_numbers() -> PhoneNumberDesc {
    PhoneNumberDesc {
        possible_length: vec![-1],
        ..Default::default()
    }
}

fn number_format(pattern: &str, format: &str, leading_digits: &[&str]) -> NumberFormat {
    let mut f = NumberFormat {
        leading_digits_pattern: leading_digits.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    f.set_pattern(pattern.to_string());
    f.set_format(format.to_string());
    f
}

fn with_national_prefix_rule(mut format: NumberFormat, rule: &str) -> NumberFormat {
    format.set_national_prefix_formatting_rule(rule.to_string());
    format
}

fn us() -> PhoneMetadata {
    let mut md = PhoneMetadata {
        general_desc: desc_with_local_lengths(r"[2-9]\d{2}[2-9]\d{6}", &[10], &[7]),
        fixed_line: desc_with_local_lengths(r"[2-9]\d{2}[2-9]\d{6}", &[10], &[7]),
        mobile: desc_with_local_lengths(r"[2-9]\d{2}[2-9]\d{6}", &[10], &[7]),
        toll_free: desc(r"8(?:00|33|44|55|66|77|88)[2-9]\d{6}", &[10]),
        premium_rate: desc(r"900[2-9]\d{6}", &[10]),
        shared_cost: no_numbers(),
        voip: no_numbers(),
        personal_number: no_numbers(),
        pager: no_numbers(),
        uan: no_numbers(),
        voicemail: no_numbers(),
        no_international_dialling: desc(r"800[2-9]\d{6}", &[10]),
        number_format: vec![
            number_format(r"(\d{3})(\d{4})", "$1-$2", &[]),
            number_format(r"(\d{3})(\d{3})(\d{4})", "($1) $2-$3", &[]),
        ],
        intl_number_format: vec![number_format(r"(\d{3})(\d{3})(\d{4})", "$1-$2-$3", &[])],
        ..Default::default()
    };
    md.set_id("US".to_string());
    md.set_country_code(1);
    md.set_international_prefix("011".to_string());
    md.set_national_prefix("1".to_string());
    md.set_main_country_for_code(true);
    md.set_same_mobile_and_fixed_line_pattern(true);
    md
}

fn gb() -> PhoneMetadata {
    let mut md = PhoneMetadata {
        general_desc: desc(r"[1-7]\d{8,9}|8\d{8,9}", &[9, 10]),
        fixed_line: desc(r"[1-6]\d{8,9}", &[9, 10]),
        mobile: desc(r"7[1-9]\d{8}", &[10]),
        toll_free: desc(r"80[08]\d{7}", &[10]),
        premium_rate: desc(r"9[018]\d{8}", &[10]),
        shared_cost: desc(r"8(?:4[2-5]|7[0-3])\d{7}", &[10]),
        voip: desc(r"56\d{8}", &[10]),
        personal_number: desc(r"70\d{8}", &[10]),
        pager: desc(r"76\d{8}", &[10]),
        uan: desc(r"55\d{8}", &[10]),
        voicemail: no_numbers(),
        no_international_dialling: no_numbers(),
        number_format: vec![
            with_national_prefix_rule(
                number_format(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3", &["2"]),
                "(0$1)",
            ),
            with_national_prefix_rule(
                number_format(r"(\d{3})(\d{3})(\d{4})", "$1 $2 $3", &["[1358]"]),
                "(0$1)",
            ),
            with_national_prefix_rule(
                number_format(r"(\d{4})(\d{6})", "$1 $2", &["[4-7]|9"]),
                "0$1",
            ),
        ],
        intl_number_format: vec![],
        ..Default::default()
    };
    md.set_id("GB".to_string());
    md.set_country_code(44);
    md.set_international_prefix("00".to_string());
    md.set_national_prefix("0".to_string());
    md.set_main_country_for_code(true);
    md
}

fn de() -> PhoneMetadata {
    let mut md = PhoneMetadata {
        general_desc: desc(r"[2-9]\d{5,10}|1[5-7]\d{8}", &[6, 7, 8, 9, 10, 11]),
        fixed_line: desc(r"[2-9]\d{5,10}", &[6, 7, 8, 9, 10, 11]),
        mobile: desc(r"1[5-7]\d{8}", &[10]),
        toll_free: desc(r"800\d{7,9}", &[10, 11, 12]),
        premium_rate: desc(r"900[135]\d{6}", &[10]),
        shared_cost: no_numbers(),
        voip: no_numbers(),
        personal_number: desc(r"700\d{8}", &[11]),
        pager: no_numbers(),
        uan: no_numbers(),
        voicemail: no_numbers(),
        no_international_dialling: no_numbers(),
        number_format: vec![
            with_national_prefix_rule(
                number_format(r"(\d{3})(\d{7,8})", "$1 $2", &["1[5-7]"]),
                "0$1",
            ),
            with_national_prefix_rule(
                number_format(r"(\d{2,5})(\d{3,8})", "$1 $2", &["[2-9]"]),
                "0$1",
            ),
        ],
        intl_number_format: vec![],
        ..Default::default()
    };
    md.set_id("DE".to_string());
    md.set_country_code(49);
    md.set_international_prefix("00".to_string());
    md.set_national_prefix("0".to_string());
    md.set_main_country_for_code(true);
    md
}

fn fr() -> PhoneMetadata {
    let mut md = PhoneMetadata {
        general_desc: desc(r"[1-9]\d{8}", &[9]),
        fixed_line: desc(r"[1-5]\d{8}", &[9]),
        mobile: desc(r"[67]\d{8}", &[9]),
        toll_free: desc(r"80\d{7}", &[9]),
        premium_rate: desc(r"89[1-37-9]\d{6}", &[9]),
        shared_cost: desc(r"8(?:1[019]|2[0156]|84|90)\d{6}", &[9]),
        voip: desc(r"9\d{8}", &[9]),
        personal_number: no_numbers(),
        pager: no_numbers(),
        uan: no_numbers(),
        voicemail: no_numbers(),
        no_international_dialling: no_numbers(),
        number_format: vec![with_national_prefix_rule(
            number_format(
                r"(\d)(\d{2})(\d{2})(\d{2})(\d{2})",
                "$1 $2 $3 $4 $5",
                &[],
            ),
            "0$1",
        )],
        intl_number_format: vec![],
        ..Default::default()
    };
    md.set_id("FR".to_string());
    md.set_country_code(33);
    md.set_international_prefix("00".to_string());
    md.set_national_prefix("0".to_string());
    md.set_main_country_for_code(true);
    md
}

fn it() -> PhoneMetadata {
    let mut md = PhoneMetadata {
        // Italian fixed-line numbers keep their leading zero as part of the
        // national significant number.
        general_desc: desc(r"0\d{5,10}|3\d{8,9}|8\d{4,9}", &[6, 7, 8, 9, 10, 11]),
        fixed_line: desc(r"0\d{5,10}", &[6, 7, 8, 9, 10, 11]),
        mobile: desc(r"3\d{8,9}", &[9, 10]),
        toll_free: desc(r"80(?:0\d{3,6}|3\d{3})", &[6, 7, 8, 9, 10]),
        premium_rate: desc(r"89(?:2\d|9\d{3,6})", &[4, 6, 7, 8, 9, 10]),
        shared_cost: no_numbers(),
        voip: no_numbers(),
        personal_number: desc(r"1(?:78\d|99)\d{6}", &[9, 10]),
        pager: no_numbers(),
        uan: no_numbers(),
        voicemail: no_numbers(),
        no_international_dialling: no_numbers(),
        number_format: vec![
            number_format(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3", &["0[26]"]),
            number_format(r"(\d{3})(\d{3,4})(\d{4})", "$1 $2 $3", &["0[13-57-9]"]),
            number_format(r"(\d{3})(\d{3})(\d{3,4})", "$1 $2 $3", &["3"]),
            number_format(r"(\d{3})(\d{3,6})", "$1 $2", &["8"]),
        ],
        intl_number_format: vec![],
        ..Default::default()
    };
    md.set_id("IT".to_string());
    md.set_country_code(39);
    md.set_international_prefix("00".to_string());
    md.set_main_country_for_code(true);
    md
}

fn nz() -> PhoneMetadata {
    let mut md = PhoneMetadata {
        general_desc: desc(r"[2-9]\d{7,9}", &[8, 9, 10]),
        fixed_line: desc(r"[3-9]\d{7}", &[8]),
        mobile: desc(r"2[0-57-9]\d{6,8}", &[8, 9, 10]),
        toll_free: desc(r"800\d{6,7}", &[9, 10]),
        premium_rate: desc(r"900\d{5,7}", &[8, 9, 10]),
        shared_cost: no_numbers(),
        voip: no_numbers(),
        personal_number: desc(r"70\d{7}", &[9]),
        pager: desc(r"26\d{6,7}", &[8, 9]),
        uan: no_numbers(),
        voicemail: no_numbers(),
        no_international_dialling: no_numbers(),
        number_format: vec![
            with_national_prefix_rule(
                number_format(r"(\d)(\d{3})(\d{4})", "$1-$2 $3", &["[3-9]"]),
                "0$1",
            ),
            with_national_prefix_rule(
                number_format(r"(\d{2})(\d{3})(\d{3,5})", "$1-$2 $3", &["2"]),
                "0$1",
            ),
            with_national_prefix_rule(
                number_format(r"(\d{3})(\d{3})(\d{3,4})", "$1 $2 $3", &["[89]0"]),
                "0$1",
            ),
        ],
        intl_number_format: vec![],
        ..Default::default()
    };
    md.set_id("NZ".to_string());
    md.set_country_code(64);
    md.set_international_prefix("00".to_string());
    md.set_national_prefix("0".to_string());
    md.set_main_country_for_code(true);
    md
}

/// Every region this build carries metadata for.
pub(crate) fn metadata_collection() -> Vec<PhoneMetadata> {
    vec![us(), gb(), de(), fr(), it(), nz()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_is_internally_consistent() {
        let collection = metadata_collection();
        assert!(!collection.is_empty());
        for metadata in &collection {
            assert!(!metadata.id().is_empty());
            assert!(metadata.country_code() > 0);
            assert!(metadata.general_desc.has_national_number_pattern());
            assert!(!metadata.general_desc.possible_length.is_empty());
            for format in metadata
                .number_format
                .iter()
                .chain(metadata.intl_number_format.iter())
            {
                assert!(!format.pattern().is_empty());
                assert!(!format.format().is_empty());
            }
        }
    }

    #[test]
    fn every_format_pattern_compiles() {
        for metadata in metadata_collection() {
            for format in metadata
                .number_format
                .iter()
                .chain(metadata.intl_number_format.iter())
            {
                regex::Regex::new(format.pattern()).unwrap();
                for leading in &format.leading_digits_pattern {
                    regex::Regex::new(leading).unwrap();
                }
            }
            regex::Regex::new(metadata.general_desc.national_number_pattern()).unwrap();
        }
    }
}
