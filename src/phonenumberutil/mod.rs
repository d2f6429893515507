mod enums;
mod errors;
mod helper_constants;
pub(crate) mod helper_functions;
mod phone_number_regexps_and_mappings;
mod phonenumberutil;

use std::sync::LazyLock;

pub use enums::{MatchType, PhoneNumberFormat, PhoneNumberType, ValidNumberLenType};
pub use errors::{ExtractNumberError, NotANumberError, ParseError, ValidationResultErr};
pub use phonenumberutil::PhoneNumberUtil;

pub(crate) use helper_constants::{
    CAPTURE_UP_TO_SECOND_NUMBER_START, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, PLUS_CHARS,
    VALID_PUNCTUATION,
};

/// The process-wide parser/formatter instance. Built once, on first use,
/// from the bundled region metadata; read-only afterwards.
pub static PHONE_NUMBER_UTIL: LazyLock<PhoneNumberUtil> = LazyLock::new(PhoneNumberUtil::new);
