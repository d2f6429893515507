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

use std::fmt;

use crate::phonenumber::PhoneNumber;

/// One occurrence of a phone number within a piece of text.
///
/// Matches may be found using
/// [`PhoneNumberMatcher`](super::PhoneNumberMatcher). A match consists of
/// the byte range of the occurrence in the searched text, the literal
/// substring that was matched, and the parsed number value.
///
/// The byte range is `[start, end)`, with `raw_string` being exactly the
/// text between those offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumberMatch {
    start: usize,
    raw_string: String,
    number: PhoneNumber,
}

impl PhoneNumberMatch {
    pub(crate) fn new(start: usize, raw_string: String, number: PhoneNumber) -> Self {
        Self {
            start,
            raw_string,
            number,
        }
    }

    /// The byte offset of the occurrence within the searched text.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The byte offset immediately past the occurrence.
    pub fn end(&self) -> usize {
        self.start + self.raw_string.len()
    }

    /// The raw substring of the searched text.
    pub fn raw_string(&self) -> &str {
        &self.raw_string
    }

    /// The parsed phone number.
    pub fn number(&self) -> &PhoneNumber {
        &self.number
    }
}

impl fmt::Display for PhoneNumberMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PhoneNumberMatch [{},{}) {}",
            self.start(),
            self.end(),
            self.raw_string
        )
    }
}
