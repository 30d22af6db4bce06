use uuid::Uuid;

use crate::server::response::ApiError;

const MAX_USERNAME_LEN: usize = 64;

/// Rejects any blank-after-trim required field with a 400.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ApiError::bad_request(format!("{name} is required")));
        }
    }
    Ok(())
}

/// Trims and lowercases a username, then checks the allowed character set.
pub fn normalize_username(raw: &str) -> Result<String, ApiError> {
    let username = raw.trim().to_lowercase();

    if username.is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(ApiError::bad_request(format!(
            "username cannot exceed {MAX_USERNAME_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::bad_request(
            "username can only contain alphanumeric characters, hyphens, and underscores",
        ));
    }

    Ok(username)
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ApiError::bad_request("email is invalid")),
    }
}

/// Malformed ids are a validation failure, not a lookup miss.
pub fn validate_id(id: &str, entity: &str) -> Result<(), ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request(format!("Invalid {entity} ID")))?;
    Ok(())
}
