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

use std::borrow::Cow;

use regex::{Captures, Regex};

pub trait RegexFullMatch {
    /// The whole input must be consumed by the pattern.
    fn full_match(&self, s: &str) -> bool;
}

pub trait RegexMatchStart {
    /// The pattern must match at the beginning of the input; trailing input
    /// is allowed.
    fn matches_start(&self, s: &str) -> bool;
}

pub trait RegexConsume {
    /// Matches at the start of the input and returns the remainder.
    fn consume_start<'a>(&self, s: &'a str) -> Option<Cow<'a, str>> {
        self.consume_start_capturing(s).map(|res| res.0)
    }

    fn consume_start_capturing<'a>(&self, s: &'a str) -> Option<(Cow<'a, str>, Captures<'a>)>;

    /// Matches anywhere in the input and returns the remainder past the
    /// match.
    fn find_and_consume<'a>(&self, s: &'a str) -> Option<Cow<'a, str>> {
        self.find_and_consume_capturing(s).map(|res| res.0)
    }

    fn find_and_consume_capturing<'a>(&self, s: &'a str) -> Option<(Cow<'a, str>, Captures<'a>)>;
}

impl RegexFullMatch for Regex {
    fn full_match(&self, s: &str) -> bool {
        if let Some(matched) = self.find(s) {
            return matched.start() == 0 && matched.end() == s.len();
        }
        false
    }
}

impl RegexMatchStart for Regex {
    fn matches_start(&self, s: &str) -> bool {
        if let Some(matched) = self.find(s) {
            return matched.start() == 0;
        }
        false
    }
}

impl RegexConsume for Regex {
    fn consume_start_capturing<'a>(&self, s: &'a str) -> Option<(Cow<'a, str>, Captures<'a>)> {
        consume(self, s, true)
    }

    fn find_and_consume_capturing<'a>(&self, s: &'a str) -> Option<(Cow<'a, str>, Captures<'a>)> {
        consume(self, s, false)
    }
}

fn consume<'a>(
    r: &Regex,
    input: &'a str,
    anchor_at_start: bool,
) -> Option<(Cow<'a, str>, Captures<'a>)> {
    let captures = r.captures(input)?;
    let full_capture = captures.get(0)?;
    if anchor_at_start && full_capture.start() != 0 {
        return None;
    }

    Some((Cow::Borrowed(&input[full_capture.end()..]), captures))
}
