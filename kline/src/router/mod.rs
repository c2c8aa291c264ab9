pub mod calendar;
pub mod history;
pub mod snapshot;

use kline_core::KlineError;

pub(crate) fn require_code(code: &str) -> Result<(), KlineError> {
    if code.trim().is_empty() {
        return Err(KlineError::InvalidArg("security code must not be empty".into()));
    }
    Ok(())
}

pub(crate) fn require_codes(codes: &[String]) -> Result<(), KlineError> {
    if codes.is_empty() {
        return Err(KlineError::InvalidArg("at least one security code is required".into()));
    }
    codes.iter().try_for_each(|c| require_code(c))
}

pub(crate) fn require_fields(fields: &[String]) -> Result<(), KlineError> {
    if fields.is_empty() {
        return Err(KlineError::InvalidArg("at least one field is required".into()));
    }
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(KlineError::InvalidArg("field names must not be empty".into()));
    }
    Ok(())
}
