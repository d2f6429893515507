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

mod regions;

pub(crate) use regions::metadata_collection;

/// Describes the set of numbers of one type (fixed line, mobile, ...) for a
/// region: a validation pattern over the national significant number plus
/// the lengths such numbers may have.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneNumberDesc {
    national_number_pattern: Option<String>,
    /// Lengths of valid, dialable numbers of this type. An empty list means
    /// the lengths are inherited from the general description; a single
    /// `-1` means no numbers of this type exist at all.
    pub possible_length: Vec<i32>,
    /// Lengths that are only dialable within a local area (for example US
    /// seven-digit numbers without the area code).
    pub possible_length_local_only: Vec<i32>,
}

impl PhoneNumberDesc {
    pub fn national_number_pattern(&self) -> &str {
        self.national_number_pattern.as_deref().unwrap_or("")
    }

    pub fn has_national_number_pattern(&self) -> bool {
        self.national_number_pattern.is_some()
    }

    pub fn set_national_number_pattern(&mut self, pattern: String) {
        self.national_number_pattern = Some(pattern);
    }
}

/// One way of formatting a national significant number: a full-match
/// pattern over the digits and a replacement template, optionally guarded
/// by a leading-digits pattern and carrying the national-prefix rule to be
/// applied in national output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberFormat {
    pattern: Option<String>,
    format: Option<String>,
    /// Only the last (most detailed) entry is consulted when choosing a
    /// format.
    pub leading_digits_pattern: Vec<String>,
    national_prefix_formatting_rule: Option<String>,
    national_prefix_optional_when_formatting: Option<bool>,
}

impl NumberFormat {
    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or("")
    }

    pub fn set_pattern(&mut self, pattern: String) {
        self.pattern = Some(pattern);
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or("")
    }

    pub fn set_format(&mut self, format: String) {
        self.format = Some(format);
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        self.national_prefix_formatting_rule.as_deref().unwrap_or("")
    }

    pub fn set_national_prefix_formatting_rule(&mut self, rule: String) {
        self.national_prefix_formatting_rule = Some(rule);
    }

    pub fn national_prefix_optional_when_formatting(&self) -> bool {
        self.national_prefix_optional_when_formatting.unwrap_or(false)
    }

    pub fn set_national_prefix_optional_when_formatting(&mut self, optional: bool) {
        self.national_prefix_optional_when_formatting = Some(optional);
    }
}

/// Everything this library knows about one region's numbering plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneMetadata {
    id: Option<String>,
    country_code: Option<i32>,
    international_prefix: Option<String>,
    national_prefix: Option<String>,
    national_prefix_for_parsing: Option<String>,
    national_prefix_transform_rule: Option<String>,
    leading_digits: Option<String>,
    main_country_for_code: Option<bool>,
    same_mobile_and_fixed_line_pattern: Option<bool>,

    pub general_desc: PhoneNumberDesc,
    pub fixed_line: PhoneNumberDesc,
    pub mobile: PhoneNumberDesc,
    pub toll_free: PhoneNumberDesc,
    pub premium_rate: PhoneNumberDesc,
    pub shared_cost: PhoneNumberDesc,
    pub voip: PhoneNumberDesc,
    pub personal_number: PhoneNumberDesc,
    pub pager: PhoneNumberDesc,
    pub uan: PhoneNumberDesc,
    pub voicemail: PhoneNumberDesc,
    pub no_international_dialling: PhoneNumberDesc,

    pub number_format: Vec<NumberFormat>,
    /// When present, used instead of `number_format` for any output other
    /// than the national format.
    pub intl_number_format: Vec<NumberFormat>,
}

impl PhoneMetadata {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = Some(country_code);
    }

    pub fn international_prefix(&self) -> &str {
        self.international_prefix.as_deref().unwrap_or("")
    }

    pub fn set_international_prefix(&mut self, prefix: String) {
        self.international_prefix = Some(prefix);
    }

    pub fn national_prefix(&self) -> &str {
        self.national_prefix.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix(&self) -> bool {
        self.national_prefix.is_some()
    }

    pub fn set_national_prefix(&mut self, prefix: String) {
        self.national_prefix = Some(prefix);
    }

    /// Falls back to the plain national prefix when no dedicated parsing
    /// pattern is present.
    pub fn national_prefix_for_parsing(&self) -> &str {
        self.national_prefix_for_parsing
            .as_deref()
            .or(self.national_prefix.as_deref())
            .unwrap_or("")
    }

    pub fn set_national_prefix_for_parsing(&mut self, pattern: String) {
        self.national_prefix_for_parsing = Some(pattern);
    }

    pub fn national_prefix_transform_rule(&self) -> &str {
        self.national_prefix_transform_rule.as_deref().unwrap_or("")
    }

    pub fn set_national_prefix_transform_rule(&mut self, rule: String) {
        self.national_prefix_transform_rule = Some(rule);
    }

    pub fn leading_digits(&self) -> &str {
        self.leading_digits.as_deref().unwrap_or("")
    }

    pub fn has_leading_digits(&self) -> bool {
        self.leading_digits.is_some()
    }

    pub fn main_country_for_code(&self) -> bool {
        self.main_country_for_code.unwrap_or(false)
    }

    pub fn set_main_country_for_code(&mut self, value: bool) {
        self.main_country_for_code = Some(value);
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern.unwrap_or(false)
    }

    pub fn set_same_mobile_and_fixed_line_pattern(&mut self, value: bool) {
        self.same_mobile_and_fixed_line_pattern = Some(value);
    }
}
