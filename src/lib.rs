mod interfaces;
mod metadata;
mod phonenumber;
mod phonenumbermatcher;
mod phonenumberutil;
mod regex_based_matcher;
mod regexp_cache;
pub mod i18n;
pub(crate) mod regex_util;

#[cfg(test)]
mod tests;

pub use metadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc};
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use phonenumbermatcher::{Leniency, PhoneNumberMatch, PhoneNumberMatcher};
pub use phonenumberutil::{
    ExtractNumberError, MatchType, NotANumberError, PHONE_NUMBER_UTIL, ParseError,
    PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil, ValidNumberLenType, ValidationResultErr,
};
