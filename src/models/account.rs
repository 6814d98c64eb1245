use serde::{Deserialize, Serialize};

use super::enums::Role;

/// An account as the backend returns it (`/users/*`).
///
/// Role is immutable after creation. Patient profile fields and the staff
/// verification document are both optional on the wire; which side is
/// populated depends on `role`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    // Patient profile
    pub gender: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub sleep_routine: Option<String>,
    // Staff verification
    pub verification_document: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Registration input — becomes a multipart form on the wire.
///
/// Patients carry profile fields; staff roles carry the verification
/// document bytes instead. The split is validated before sending.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub gender: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub sleep_routine: Option<String>,
    /// (filename, bytes) of the verification document, staff roles only.
    pub verification_document: Option<(String, Vec<u8>)>,
}

impl NewAccount {
    /// Staff registration without a document is refused client-side;
    /// the backend would accept it and leave the account unverifiable.
    pub fn is_complete(&self) -> bool {
        !self.role.requires_verification_document() || self.verification_document.is_some()
    }
}

/// Bearer token as returned by `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
