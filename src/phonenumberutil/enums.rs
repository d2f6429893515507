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

use strum::EnumIter;

/// Defines the various standardized formats for representing phone numbers.
///
/// `INTERNATIONAL` and `NATIONAL` formats align with the ITU-T E.123
/// recommendation, but use local conventions like hyphens (-) instead of
/// spaces for separators.
///
/// For example, the Google Switzerland office number would be:
/// - **INTERNATIONAL**: `+41 44 668 1800`
/// - **NATIONAL**: `044 668 1800`
/// - **E164**: `+41446681800` (international format without formatting)
/// - **RFC3966**: `tel:+41-44-668-1800` (hyphen-separated with a "tel:"
///   prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// Standardized international format with no spaces or symbols, always
    /// starting with a `+` followed by the country code.
    E164,
    /// Country code plus the national number, spaced for readability.
    International,
    /// The format used for dialing within the number's own country. May
    /// include a national prefix (like '0').
    National,
    /// A technical format used in contexts like web links. Starts with
    /// "tel:", uses hyphens as separators, and can carry an extension.
    RFC3966,
}

/// Categorizes phone numbers based on their primary use.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// Used in regions (e.g. the USA) where it's impossible to distinguish
    /// between fixed-line and mobile numbers by looking at the number
    /// itself.
    FixedLineOrMobile,
    /// Freephone numbers; the cost is paid by the recipient.
    TollFree,
    PremiumRate,
    /// The cost of the call is split between the caller and the recipient.
    SharedCost,
    VoIP,
    /// A number associated with a person rather than a location or device;
    /// it can be routed to wherever the user configures.
    PersonalNumber,
    Pager,
    /// Universal Access Numbers: one company number routed to different
    /// offices.
    UAN,
    VoiceMail,
    /// The number does not match any known pattern for its region.
    Unknown,
}

/// Describes the degree of similarity between two phone numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// The two numbers are entirely different.
    NoMatch,
    /// One number is a shorter version of the other's national significant
    /// number. For example, `6502530000` is a short match for
    /// `16502530000`.
    ShortNsnMatch,
    /// The numbers share the same national significant number but may have
    /// different country codes or formatting.
    NsnMatch,
    /// The two numbers are identical in country code, national significant
    /// number and extension.
    ExactMatch,
}

/// The possible valid outcomes when checking whether a phone number's
/// length is plausible. The invalid outcomes live in
/// [`ValidationResultErr`](super::ValidationResultErr), so length tests
/// read as an ordinary `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidNumberLenType {
    /// The length matches a complete, dialable number for the region.
    IsPossible,
    /// The length is too short for a full national number but matches a
    /// number that can be dialed within a local area (e.g. without the
    /// area code).
    IsPossibleLocalOnly,
}
