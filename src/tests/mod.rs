mod phonenumbermatcher_tests;
mod phonenumberutil_tests;

use crate::{PHONE_NUMBER_UTIL, PhoneNumberUtil};

static ONCE: std::sync::Once = std::sync::Once::new();

pub(crate) fn get_phone_util() -> &'static PhoneNumberUtil {
    ONCE.call_once(|| {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init()
    });
    &PHONE_NUMBER_UTIL
}
