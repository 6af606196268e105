//! Authentication Handlers
//!
//! Handles signup, email verification, signin, password recovery and
//! profile management.

use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::api::MessageResponse;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ProfileUpdate, SignupRequest, User};
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;
use crate::utils::AppResult;
use crate::utils::time;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_phone, validate_required_text,
};
use shared::ErrorCode;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Verification codes and reset tokens live for one hour
const TOKEN_TTL_MS: i64 = 60 * 60 * 1000;

/// 归一化用户 ID: 接受 "user:xxx" 或裸 "xxx"
fn user_record_id(id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("user:{}", id)
    }
}

/// Draw a 4-digit verification code
fn verification_code() -> String {
    rand::thread_rng().gen_range(1000..=9999u32).to_string()
}

/// Draw a 40-hex-char reset token
fn reset_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

// =============================================================================
// Signup / Verify / Signin
// =============================================================================

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_phone(&req.phone)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let hash_pass = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let code = verification_code();
    let expires = time::now_millis() + TOKEN_TTL_MS;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(req.name, req.email, req.phone, hash_pass, code.clone(), expires)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
            other => AppError::database(other.to_string()),
        })?;

    state.mailer.send_verification_code(&user.email, &code).await;

    tracing::info!(email = %user.email, "User registered, verification pending");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "User registered. Please check your email for the verification code.",
        )),
    ))
}

/// Verify payload
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// POST /api/auth/verify
pub async fn verify(
    State(state): State<ServerState>,
    Json(req): Json<VerifyRequest>,
) -> AppResult<Json<MessageResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .verify_by_code(&req.token)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::VerificationCodeInvalid))?;

    tracing::info!(email = %user.email, "Email verified");

    Ok(Json(MessageResponse::new("Email verified successfully")))
}

/// Signin payload — `username` accepts email or display name
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Signin response
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub message: String,
    pub user_id: String,
    pub user_name: String,
    pub token: String,
}

/// POST /api/auth/signin
pub async fn signin(
    State(state): State<ServerState>,
    Json(req): Json<SigninRequest>,
) -> AppResult<Json<SigninResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_login(&req.username)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) if u.is_verified => u,
        Some(_) => {
            security_log!("WARN", "signin_unverified", username = req.username.clone());
            return Err(AppError::with_message(
                ErrorCode::InvalidCredentials,
                "Invalid credentials or unverified email",
            ));
        }
        None => {
            security_log!("WARN", "signin_unknown_user", username = req.username.clone());
            return Err(AppError::with_message(
                ErrorCode::InvalidCredentials,
                "Invalid credentials or unverified email",
            ));
        }
    };

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        security_log!("WARN", "signin_bad_password", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.name, user.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, name = %user.name, "User signed in");

    Ok(Json(SigninResponse {
        message: "Login successful".to_string(),
        user_id,
        user_name: user.name,
        token,
    }))
}

// =============================================================================
// Password recovery
// =============================================================================

/// Forgot-password payload
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let token = reset_token();
    let expires = time::now_millis() + TOKEN_TTL_MS;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .set_reset_token(&req.email, token.clone(), expires)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::validation("Email not found"))?;

    let reset_link = format!(
        "{}/createnewpassword?token={}",
        state.config.frontend_url, token
    );
    state.mailer.send_password_reset(&user.email, &reset_link).await;

    Ok(Json(MessageResponse::new(
        "Password reset link sent to your email",
    )))
}

/// Reset-password payload
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let hash_pass = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let repo = UserRepository::new(state.db.clone());
    repo.reset_password_by_token(&req.token, hash_pass)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::ResetTokenInvalid))?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}

// =============================================================================
// Profile
// =============================================================================

/// GET /api/auth/profile/{id} — public, password hash omitted
pub async fn get_profile(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&user_record_id(&id))
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(user))
}

/// Profile update response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: User,
}

/// PUT /api/auth/profile/{id} — owner only
pub async fn update_profile(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<ProfileUpdate>,
) -> AppResult<Json<ProfileResponse>> {
    let target = user_record_id(&id);
    if target != current.id && !current.is_admin() {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }

    if let Some(ref name) = req.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref phone) = req.phone {
        validate_phone(phone)?;
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .update_profile(&target, req.name, req.phone)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::UserNotFound, msg),
            other => AppError::database(other.to_string()),
        })?;

    Ok(Json(ProfileResponse {
        message: "Profile updated".to_string(),
        user,
    }))
}

/// Change-password payload
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PATCH /api/auth/change-password/{id} — owner only
pub async fn change_password(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let target = user_record_id(&id);
    if target != current.id {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }
    validate_required_text(&req.new_password, "password", MAX_PASSWORD_LEN)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&target)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let matches = user
        .verify_password(&req.current_password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !matches {
        return Err(AppError::new(ErrorCode::PasswordMismatch));
    }

    let hash_pass = User::hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    repo.update_password(&target, hash_pass)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
