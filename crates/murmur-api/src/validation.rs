//! Guard checks shared by the account and message services.

use crate::error::Rejection;

pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_MESSAGE_LEN: usize = 255;

/// Trim a username and require something to be left.
pub fn username(raw: Option<&str>) -> Result<&str, Rejection> {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(Rejection::BlankUsername),
    }
}

/// Passwords are never trimmed: surrounding spaces are part of the secret.
pub fn new_password(raw: Option<&str>) -> Result<&str, Rejection> {
    let password = raw.ok_or(Rejection::MissingPassword)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Rejection::PasswordTooShort);
    }
    Ok(password)
}

/// Trimmed text must be non-empty and at most [`MAX_MESSAGE_LEN`] characters.
pub fn message_text(raw: Option<&str>) -> Result<&str, Rejection> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(Rejection::BlankText);
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(Rejection::TextTooLong);
    }
    Ok(text)
}
