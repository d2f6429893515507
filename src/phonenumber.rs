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

/// How the country code of a parsed number was deduced from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountryCodeSource {
    #[default]
    Unspecified,
    /// The input started with a `+` (or a fullwidth variant).
    FromNumberWithPlusSign,
    /// The input started with an international direct dialling prefix.
    FromNumberWithIdd,
    /// The input carried the country code in front of the national number,
    /// without a plus sign.
    FromNumberWithoutPlusSign,
    /// The country code was taken from the region the number was parsed
    /// with.
    FromDefaultCountry,
}

/// A parsed phone number.
///
/// All fields are optional; the accessors mirror the field presence
/// semantics of the wire representation this type descends from, with
/// `has_*` probes, defaulting getters, and `set_*`/`clear_*` mutators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PhoneNumber {
    country_code: Option<i32>,
    national_number: Option<u64>,
    extension: Option<String>,
    italian_leading_zero: Option<bool>,
    number_of_leading_zeros: Option<i32>,
    raw_input: Option<String>,
    country_code_source: Option<CountryCodeSource>,
    preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn has_country_code(&self) -> bool {
        self.country_code.is_some()
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = Some(country_code);
    }

    pub fn national_number(&self) -> u64 {
        self.national_number.unwrap_or(0)
    }

    pub fn set_national_number(&mut self, national_number: u64) {
        self.national_number = Some(national_number);
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn set_extension(&mut self, extension: String) {
        self.extension = Some(extension);
    }

    pub fn clear_extension(&mut self) {
        self.extension = None;
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.unwrap_or(false)
    }

    pub fn set_italian_leading_zero(&mut self, value: bool) {
        self.italian_leading_zero = Some(value);
    }

    /// Defaults to one: when `italian_leading_zero` is set without a count,
    /// exactly one zero is implied.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn set_number_of_leading_zeros(&mut self, count: i32) {
        self.number_of_leading_zeros = Some(count);
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn set_raw_input(&mut self, raw_input: String) {
        self.raw_input = Some(raw_input);
    }

    pub fn clear_raw_input(&mut self) {
        self.raw_input = None;
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source.unwrap_or_default()
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source.is_some()
    }

    pub fn set_country_code_source(&mut self, source: CountryCodeSource) {
        self.country_code_source = Some(source);
    }

    pub fn clear_country_code_source(&mut self) {
        self.country_code_source = None;
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code.as_deref().unwrap_or("")
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, carrier_code: String) {
        self.preferred_domestic_carrier_code = Some(carrier_code);
    }

    pub fn clear_preferred_domestic_carrier_code(&mut self) {
        self.preferred_domestic_carrier_code = None;
    }
}
