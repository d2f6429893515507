mod matcher_regexps;
mod phonenumbermatch;
mod phonenumbermatcher;

pub use phonenumbermatch::PhoneNumberMatch;
pub use phonenumbermatcher::{Leniency, PhoneNumberMatcher};
