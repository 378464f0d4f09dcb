use serde::Serialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, message = "Community name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct DeleteCommunityRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Community name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Community is required"))]
    pub community: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct UpdatePostRequest {
    /// Addresses the post in the path; never part of the body.
    #[serde(skip)]
    #[validate(length(min = 1, message = "Post id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Post id is required"))]
    pub post_id: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
}

#[derive(Debug, Clone, Default, Validate, Serialize)]
pub struct DeleteAccountRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Password must mix lowercase, uppercase and digits.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(
            "Password must contain a lowercase letter, an uppercase letter and a digit".into(),
        ))
    }
}
