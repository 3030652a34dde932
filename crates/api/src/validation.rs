//! Custom `validator` rules shared by request DTOs.

use std::borrow::Cow;

use timeforing_core::contact;
use validator::ValidationError;

/// Shortest accepted name, after trimming.
pub const NAVN_MIN: usize = 2;
/// Longest accepted name, after trimming.
pub const NAVN_MAX: usize = 100;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Norwegian mobile number in any accepted prefix form.
pub fn validate_mobil(mobil: &str) -> Result<(), ValidationError> {
    if contact::is_valid_mobil(mobil) {
        Ok(())
    } else {
        Err(error(
            "mobil",
            "Mobilnummer må være på norsk format (+47XXXXXXXX)",
        ))
    }
}

/// Person or project name: not blank, 2 to 100 characters once trimmed.
pub fn validate_navn(navn: &str) -> Result<(), ValidationError> {
    let len = navn.trim().chars().count();
    if len == 0 {
        return Err(error("required", "Navn er påkrevd"));
    }
    if !(NAVN_MIN..=NAVN_MAX).contains(&len) {
        return Err(error("length", "Navn må være mellom 2 og 100 tegn"));
    }
    Ok(())
}
