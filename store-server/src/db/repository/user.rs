//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserRole};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id ("user:xxx")
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find user by email or display name (login form accepts either)
    pub async fn find_by_login(&self, username: &str) -> RepoResult<Option<User>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $username OR name = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new unverified user
    ///
    /// The password is hashed by the caller; the verification code expires
    /// after one hour.
    pub async fn create(
        &self,
        name: String,
        email: String,
        phone: String,
        hash_pass: String,
        verification_code: String,
        verification_expires: i64,
    ) -> RepoResult<User> {
        // Check duplicate email
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                email
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    phone = $phone,
                    hash_pass = $hash_pass,
                    role = $role,
                    is_verified = false,
                    verification_code = $verification_code,
                    verification_expires = $verification_expires,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", name))
            .bind(("email", email))
            .bind(("phone", phone))
            .bind(("hash_pass", hash_pass))
            .bind(("role", UserRole::User))
            .bind(("verification_code", verification_code))
            .bind(("verification_expires", verification_expires))
            .bind(("created_at", time::now_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Mark the matching user verified and clear the code
    ///
    /// Returns `None` when the code is unknown or expired.
    pub async fn verify_by_code(&self, code: &str) -> RepoResult<Option<User>> {
        let code_owned = code.to_string();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE user SET
                    is_verified = true,
                    verification_code = NONE,
                    verification_expires = NONE
                WHERE verification_code = $code AND verification_expires > $now
                RETURN AFTER"#,
            )
            .bind(("code", code_owned))
            .bind(("now", time::now_millis()))
            .await?;

        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Store a password-reset token for the given email
    ///
    /// Returns `None` when no user carries that email.
    pub async fn set_reset_token(
        &self,
        email: &str,
        token: String,
        expires: i64,
    ) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE user SET
                    reset_token = $token,
                    reset_expires = $expires
                WHERE email = $email
                RETURN AFTER"#,
            )
            .bind(("token", token))
            .bind(("expires", expires))
            .bind(("email", email_owned))
            .await?;

        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Replace the password for the user holding an unexpired reset token
    ///
    /// Returns `None` when the token is unknown or expired.
    pub async fn reset_password_by_token(
        &self,
        token: &str,
        hash_pass: String,
    ) -> RepoResult<Option<User>> {
        let token_owned = token.to_string();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE user SET
                    hash_pass = $hash_pass,
                    reset_token = NONE,
                    reset_expires = NONE
                WHERE reset_token = $token AND reset_expires > $now
                RETURN AFTER"#,
            )
            .bind(("hash_pass", hash_pass))
            .bind(("token", token_owned))
            .bind(("now", time::now_millis()))
            .await?;

        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Update profile fields (name and/or phone)
    pub async fn update_profile(
        &self,
        id: &str,
        name: Option<String>,
        phone: Option<String>,
    ) -> RepoResult<User> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    phone = $phone OR phone
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("phone", phone))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Replace the password hash for a user
    pub async fn update_password(&self, id: &str, hash_pass: String) -> RepoResult<User> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET hash_pass = $hash_pass RETURN AFTER")
            .bind(("thing", thing))
            .bind(("hash_pass", hash_pass))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }
}
