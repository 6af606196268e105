//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// User model matching the `user` table
///
/// The password hash is never serialized out; user records are created via
/// explicit `CREATE ... SET` queries so the hash still reaches the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: UserRole,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_expires: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_expires: Option<i64>,
    pub created_at: i64,
}

/// Signup payload
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Profile update payload (name and/or phone)
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = User::hash_password("hunter2!").unwrap();
        let user = User {
            id: None,
            name: "jane".into(),
            email: "jane@example.com".into(),
            phone: "03001234567".into(),
            hash_pass: hash,
            role: UserRole::User,
            is_verified: true,
            verification_code: None,
            verification_expires: None,
            reset_token: None,
            reset_expires: None,
            created_at: 0,
        };

        assert!(user.verify_password("hunter2!").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_hash_not_serialized() {
        let user = User {
            id: None,
            name: "jane".into(),
            email: "jane@example.com".into(),
            phone: "03001234567".into(),
            hash_pass: "secret-hash".into(),
            role: UserRole::User,
            is_verified: false,
            verification_code: None,
            verification_expires: None,
            reset_token: None,
            reset_expires: None,
            created_at: 0,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
