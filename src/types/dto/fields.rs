use crate::errors::internal::ValidationError;

/// Trimmed, non-empty text
pub fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Trimmed text, None when blank
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

pub fn required_id(field: &'static str, value: &str) -> Result<i32, ValidationError> {
    optional_id(field, value)?.ok_or(ValidationError::missing(field))
}

/// Integer id, None when blank
pub fn optional_id(field: &'static str, value: &str) -> Result<Option<i32>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: trimmed.to_owned(),
        })
}
