//! Request and response bodies for the handler contract.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccountCredentials, CredentialValidationError, NoteId, PasswordReset, UpdatedAttributes,
};

pub const NOTE_CREATED: &str = "Note created successfully";
pub const NOTE_UPDATED: &str = "Note updated successfully";
pub const NOTE_DELETED: &str = "Note deleted successfully";
pub const USER_SIGNED_UP: &str = "User signed up successfully";
pub const USER_LOGGED_IN: &str = "User logged in successfully";
pub const PASSWORD_RESET: &str = "Password reset successfully";

/// `{"message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// `{"error": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Note not found")]
    pub error: String,
}

/// Body returned by create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteCreated {
    pub message: String,
    #[schema(value_type = String, example = "1700000000000")]
    pub note_id: NoteId,
}

/// Table projection wrapper used by update responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedData {
    #[serde(rename = "Attributes")]
    pub attributes: UpdatedAttributes,
}

/// Body returned by update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteUpdated {
    pub message: String,
    pub data: UpdatedData,
}

/// Body returned by login.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginSucceeded {
    pub message: String,
    pub token: String,
}

/// Signup and login request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<CredentialsRequest> for AccountCredentials {
    type Error = CredentialValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Password reset request body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[schema(example = "user_1700000000000")]
    pub username: String,
    #[schema(example = "123456")]
    pub code: String,
    pub new_password: String,
}

impl TryFrom<ResetPasswordRequest> for PasswordReset {
    type Error = CredentialValidationError;

    fn try_from(value: ResetPasswordRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.code, &value.new_password)
    }
}
