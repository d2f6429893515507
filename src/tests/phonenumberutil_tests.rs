use crate::{
    CountryCodeSource, MatchType, ParseError, PhoneNumber, PhoneNumberFormat, PhoneNumberType,
    ValidNumberLenType, ValidationResultErr, i18n::RegionCode,
};

use super::get_phone_util;

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    let regions = phone_util.get_supported_regions();
    assert!(regions.len() >= 6);
    assert!(regions.contains(&RegionCode::us()));
    assert!(regions.contains(&RegionCode::gb()));
}

#[test]
fn get_supported_types_for_region() {
    let phone_util = get_phone_util();
    let types = phone_util
        .get_supported_types_for_region(RegionCode::us())
        .expect("region should exist");
    assert!(types.contains(&PhoneNumberType::FixedLine));
    assert!(types.contains(&PhoneNumberType::TollFree));
    assert!(types.contains(&PhoneNumberType::PremiumRate));
    assert!(!types.contains(&PhoneNumberType::Pager));
    assert!(!types.contains(&PhoneNumberType::FixedLineOrMobile));
    assert!(!types.contains(&PhoneNumberType::Unknown));

    let types = phone_util
        .get_supported_types_for_region(RegionCode::gb())
        .expect("region should exist");
    assert!(types.contains(&PhoneNumberType::Mobile));
    assert!(types.contains(&PhoneNumberType::Pager));

    assert!(
        phone_util
            .get_supported_types_for_region(RegionCode::zz())
            .is_none()
    );
}

#[test]
fn get_region_code_for_country_code() {
    let phone_util = get_phone_util();
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_country_code(1));
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_country_code(44));
    assert_eq!(RegionCode::nz(), phone_util.get_region_code_for_country_code(64));
    assert_eq!(
        RegionCode::get_unknown(),
        phone_util.get_region_code_for_country_code(999)
    );
}

#[test]
fn get_national_significant_number() {
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    assert_eq!(
        "6502530000",
        crate::PhoneNumberUtil::get_national_significant_number(&number)
    );

    // An Italian fixed line keeps its leading zero.
    let mut it_number = PhoneNumber::new();
    it_number.set_country_code(39);
    it_number.set_national_number(236618300);
    it_number.set_italian_leading_zero(true);
    assert_eq!(
        "0236618300",
        crate::PhoneNumberUtil::get_national_significant_number(&it_number)
    );
}

#[test]
fn get_national_significant_number_many_leading_zeros() {
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(650);
    number.set_italian_leading_zero(true);
    number.set_number_of_leading_zeros(2);
    assert_eq!(
        "00650",
        crate::PhoneNumberUtil::get_national_significant_number(&number)
    );

    // Malicious input should not crash.
    number.set_number_of_leading_zeros(-3);
    assert_eq!(
        "650",
        crate::PhoneNumberUtil::get_national_significant_number(&number)
    );
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();

    let number = phone_util.parse("033316005", RegionCode::nz()).unwrap();
    assert_eq!(64, number.country_code());
    assert_eq!(33316005, number.national_number());
    assert!(!number.has_country_code_source());

    // National prefix missing is fine for parsing.
    let number = phone_util.parse("33316005", RegionCode::nz()).unwrap();
    assert_eq!(64, number.country_code());
    assert_eq!(33316005, number.national_number());

    let number = phone_util.parse("(650) 253-0000", RegionCode::us()).unwrap();
    assert_eq!(1, number.country_code());
    assert_eq!(6502530000, number.national_number());
}

#[test]
fn parse_number_with_plus_sign() {
    let phone_util = get_phone_util();

    // The region doesn't matter when the country code is explicit.
    let number = phone_util.parse("+1 650 253 0000", RegionCode::nz()).unwrap();
    assert_eq!(1, number.country_code());
    assert_eq!(6502530000, number.national_number());

    let number = phone_util.parse("+44 20 8765 4321", RegionCode::us()).unwrap();
    assert_eq!(44, number.country_code());
    assert_eq!(2087654321, number.national_number());
}

#[test]
fn parse_number_with_idd() {
    let phone_util = get_phone_util();

    // 011 is the international prefix in the US.
    let number = phone_util
        .parse("011 44 20 8765 4321", RegionCode::us())
        .unwrap();
    assert_eq!(44, number.country_code());
    assert_eq!(2087654321, number.national_number());
}

#[test]
fn parse_country_code_without_plus_sign() {
    let phone_util = get_phone_util();

    // The country code is written in front of the number without a plus.
    let number = phone_util.parse("1 650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(1, number.country_code());
    assert_eq!(6502530000, number.national_number());

    let number = phone_util
        .parse_and_keep_raw_input("1 650 253 0000", RegionCode::us())
        .unwrap();
    assert_eq!(
        CountryCodeSource::FromNumberWithoutPlusSign,
        number.country_code_source()
    );
}

#[test]
fn parse_and_keep_raw_input() {
    let phone_util = get_phone_util();

    let number = phone_util
        .parse_and_keep_raw_input("(650) 253-0000", RegionCode::us())
        .unwrap();
    assert_eq!("(650) 253-0000", number.raw_input());
    assert_eq!(CountryCodeSource::FromDefaultCountry, number.country_code_source());

    let number = phone_util
        .parse_and_keep_raw_input("+44 20 8765 4321", RegionCode::us())
        .unwrap();
    assert_eq!(CountryCodeSource::FromNumberWithPlusSign, number.country_code_source());

    // Plain parse drops the raw input.
    let number = phone_util.parse("(650) 253-0000", RegionCode::us()).unwrap();
    assert!(!number.has_raw_input());
    assert!(!number.has_country_code_source());
}

#[test]
fn parse_italian_leading_zero() {
    let phone_util = get_phone_util();

    let number = phone_util.parse("02 3661 8300", RegionCode::it()).unwrap();
    assert_eq!(39, number.country_code());
    assert_eq!(236618300, number.national_number());
    assert!(number.italian_leading_zero());
}

#[test]
fn parse_extensions() {
    let phone_util = get_phone_util();

    let number = phone_util
        .parse("03 331 6005 ext 3456", RegionCode::nz())
        .unwrap();
    assert_eq!(64, number.country_code());
    assert_eq!(33316005, number.national_number());
    assert_eq!("3456", number.extension());

    let number = phone_util.parse("(650) 253-0000 x123", RegionCode::us()).unwrap();
    assert_eq!(6502530000, number.national_number());
    assert_eq!("123", number.extension());

    let number = phone_util.parse("650-253-0000 #456", RegionCode::us()).unwrap();
    assert_eq!(6502530000, number.national_number());
    assert_eq!("456", number.extension());
}

#[test]
fn parse_with_fullwidth_digits() {
    let phone_util = get_phone_util();

    let number = phone_util
        .parse("\u{FF16}\u{FF15}\u{FF10} 253 0000", RegionCode::us())
        .unwrap();
    assert_eq!(6502530000, number.national_number());
}

#[test]
fn failed_parse_on_invalid_numbers() {
    let phone_util = get_phone_util();

    assert!(matches!(
        phone_util.parse("This is not a phone number", RegionCode::nz()),
        Err(ParseError::NotANumber(_))
    ));

    assert!(matches!(
        phone_util.parse("01495 72553301873 810104", RegionCode::gb()),
        Err(ParseError::TooLongNsn)
    ));

    assert!(matches!(
        phone_util.parse("123 456 7890", RegionCode::get_unknown()),
        Err(ParseError::InvalidCountryCode)
    ));

    assert!(matches!(
        phone_util.parse("+01495", RegionCode::gb()),
        Err(ParseError::TooShortAfterIdd) | Err(ParseError::InvalidCountryCode)
    ));
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();

    let mut us_number = PhoneNumber::new();
    us_number.set_country_code(1);
    us_number.set_national_number(6502530000);
    assert!(phone_util.is_valid_number(&us_number));

    let mut gb_number = PhoneNumber::new();
    gb_number.set_country_code(44);
    gb_number.set_national_number(2087654321);
    assert!(phone_util.is_valid_number(&gb_number));

    let mut it_number = PhoneNumber::new();
    it_number.set_country_code(39);
    it_number.set_national_number(236618300);
    it_number.set_italian_leading_zero(true);
    assert!(phone_util.is_valid_number(&it_number));
}

#[test]
fn is_not_valid_number() {
    let phone_util = get_phone_util();

    // Seven digits is dialable locally but not a valid US number.
    let mut us_number = PhoneNumber::new();
    us_number.set_country_code(1);
    us_number.set_national_number(2530000);
    assert!(!phone_util.is_valid_number(&us_number));

    // Invalid country code.
    let mut unknown_number = PhoneNumber::new();
    unknown_number.set_country_code(0);
    unknown_number.set_national_number(2530000);
    assert!(!phone_util.is_valid_number(&unknown_number));

    // US numbers cannot start with 1.
    let mut bad_number = PhoneNumber::new();
    bad_number.set_country_code(1);
    bad_number.set_national_number(1234567890);
    assert!(!phone_util.is_valid_number(&bad_number));
}

#[test]
fn is_valid_number_for_region() {
    let phone_util = get_phone_util();

    let mut number = PhoneNumber::new();
    number.set_country_code(44);
    number.set_national_number(2087654321);
    assert!(phone_util.is_valid_number_for_region(&number, RegionCode::gb()));
    assert!(!phone_util.is_valid_number_for_region(&number, RegionCode::us()));
}

#[test]
fn is_possible_number() {
    let phone_util = get_phone_util();

    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    assert!(phone_util.is_possible_number(&number));

    // Local-only length is not reported as possible, but gets its own
    // reason.
    number.set_national_number(2530000);
    assert!(!phone_util.is_possible_number(&number));
    assert_eq!(
        Ok(ValidNumberLenType::IsPossibleLocalOnly),
        phone_util.is_possible_number_with_reason(&number)
    );

    number.set_national_number(253000);
    assert_eq!(
        Err(ValidationResultErr::TooShort),
        phone_util.is_possible_number_with_reason(&number)
    );

    number.set_national_number(65025300000);
    assert_eq!(
        Err(ValidationResultErr::TooLong),
        phone_util.is_possible_number_with_reason(&number)
    );

    number.set_country_code(0);
    assert_eq!(
        Err(ValidationResultErr::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&number)
    );
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();

    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    assert_eq!("(650) 253-0000", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!(
        "+1 650-253-0000",
        phone_util.format(&number, PhoneNumberFormat::International)
    );
    assert_eq!("+16502530000", phone_util.format(&number, PhoneNumberFormat::E164));
    assert_eq!(
        "tel:+1-650-253-0000",
        phone_util.format(&number, PhoneNumberFormat::RFC3966)
    );
}

#[test]
fn format_gb_number() {
    let phone_util = get_phone_util();

    let mut number = PhoneNumber::new();
    number.set_country_code(44);
    number.set_national_number(2087654321);
    assert_eq!("(020) 8765 4321", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!(
        "+44 20 8765 4321",
        phone_util.format(&number, PhoneNumberFormat::International)
    );
    assert_eq!(
        "tel:+44-20-8765-4321",
        phone_util.format(&number, PhoneNumberFormat::RFC3966)
    );
}

#[test]
fn format_nz_number() {
    let phone_util = get_phone_util();

    let mut number = PhoneNumber::new();
    number.set_country_code(64);
    number.set_national_number(33316005);
    assert_eq!("03-331 6005", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!(
        "+64 3-331 6005",
        phone_util.format(&number, PhoneNumberFormat::International)
    );
}

#[test]
fn format_number_with_extension() {
    let phone_util = get_phone_util();

    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    number.set_extension("4567".to_string());
    assert_eq!(
        "(650) 253-0000 ext. 4567",
        phone_util.format(&number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "tel:+1-650-253-0000;ext=4567",
        phone_util.format(&number, PhoneNumberFormat::RFC3966)
    );
}

#[test]
fn format_italian_leading_zero() {
    let phone_util = get_phone_util();

    let mut number = PhoneNumber::new();
    number.set_country_code(39);
    number.set_national_number(236618300);
    number.set_italian_leading_zero(true);
    assert_eq!("02 3661 8300", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!("+390236618300", phone_util.format(&number, PhoneNumberFormat::E164));
}

#[test]
fn normalize_digits_only() {
    let phone_util = get_phone_util();

    let mut number = "034-56&+#2\u{00AD}34".to_string();
    phone_util.normalize_digits_only(&mut number);
    assert_eq!("03456234", number);

    let mut wide = "\u{FF16}\u{FF15}\u{FF10}-253".to_string();
    phone_util.normalize_digits_only(&mut wide);
    assert_eq!("650253", wide);
}

#[test]
fn is_number_match() {
    let phone_util = get_phone_util();

    let first = phone_util.parse("+16502530000", RegionCode::us()).unwrap();
    let second = phone_util.parse("650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(MatchType::ExactMatch, phone_util.is_number_match(&first, &second));

    let short = phone_util.parse("253 0000", RegionCode::us()).unwrap();
    assert_eq!(MatchType::ShortNsnMatch, phone_util.is_number_match(&first, &short));

    let other = phone_util.parse("650 253 0001", RegionCode::us()).unwrap();
    assert_eq!(MatchType::NoMatch, phone_util.is_number_match(&first, &other));

    // Extensions must agree when both are present.
    let with_ext = phone_util.parse("650 253 0000 x123", RegionCode::us()).unwrap();
    let with_other_ext = phone_util.parse("650 253 0000 x456", RegionCode::us()).unwrap();
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match(&with_ext, &with_other_ext)
    );
}

#[test]
fn is_number_match_with_one_string() {
    let phone_util = get_phone_util();

    let number = phone_util.parse("+16502530000", RegionCode::us()).unwrap();
    assert_eq!(
        MatchType::ExactMatch,
        phone_util.is_number_match_with_one_string(&number, "650 253 0000")
    );
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match_with_one_string(&number, "650 253 0001")
    );
    assert_eq!(
        MatchType::NoMatch,
        phone_util.is_number_match_with_one_string(&number, "not a number")
    );
}
