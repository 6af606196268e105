//! Unified error codes for the storefront backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User/account errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 7xxx: Cart errors
//! - 8xxx: Review errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email address has not been verified
    EmailNotVerified = 1005,
    /// Verification code is invalid or expired
    VerificationCodeInvalid = 1006,
    /// Password reset token is invalid or expired
    ResetTokenInvalid = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Caller does not own the resource
    NotResourceOwner = 2003,

    // ==================== 3xxx: User ====================
    /// User not found
    UserNotFound = 3001,
    /// Email already registered
    EmailAlreadyRegistered = 3002,
    /// Phone number is malformed
    InvalidPhoneNumber = 3003,
    /// Current password does not match
    PasswordMismatch = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no line items
    OrderEmpty = 4002,
    /// Billing details carry no contact channel
    MissingBillingContact = 4003,
    /// Order cannot be cancelled from its current status
    OrderNotCancellable = 4004,
    /// Could not allocate a unique order number
    OrderNumberExhausted = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment amount is missing or not a number
    InvalidPaymentAmount = 5002,
    /// Amount is below the processor minimum charge
    AmountBelowMinimum = 5003,
    /// Exchange rate service unavailable
    ExchangeRateUnavailable = 5004,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is out of stock
    ProductOutOfStock = 6002,
    /// Requested quantity exceeds available stock
    InsufficientStock = 6003,

    // ==================== 7xxx: Cart ====================
    /// Cart not found
    CartNotFound = 7001,
    /// Item not found in cart
    CartItemNotFound = 7002,

    // ==================== 8xxx: Review ====================
    /// Review not found
    ReviewNotFound = 8001,
    /// User has already reviewed this product
    ReviewAlreadyExists = 8002,
    /// Only purchasers of a product may review it
    ReviewNotAllowed = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Mail dispatch failed
    MailDispatchFailed = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::EmailNotVerified => "Email address not verified",
            Self::VerificationCodeInvalid => "Invalid or expired verification code",
            Self::ResetTokenInvalid => "Invalid or expired reset token",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin access only",
            Self::NotResourceOwner => "Not the owner of this resource",

            Self::UserNotFound => "User not found",
            Self::EmailAlreadyRegistered => "Email already exists",
            Self::InvalidPhoneNumber => "Invalid phone number",
            Self::PasswordMismatch => "Current password is incorrect",

            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order has no items",
            Self::MissingBillingContact => "Billing details need an email or phone number",
            Self::OrderNotCancellable => "Order can no longer be cancelled",
            Self::OrderNumberExhausted => "Failed to generate unique order number",

            Self::PaymentFailed => "Payment processing failed",
            Self::InvalidPaymentAmount => "Invalid amount",
            Self::AmountBelowMinimum => "Amount too low for payment processor",
            Self::ExchangeRateUnavailable => "Failed to fetch exchange rate",

            Self::ProductNotFound => "Product not found",
            Self::ProductOutOfStock => "Product is out of stock",
            Self::InsufficientStock => "Not enough stock",

            Self::CartNotFound => "Cart not found",
            Self::CartItemNotFound => "Item not found in cart",

            Self::ReviewNotFound => "Review not found",
            Self::ReviewAlreadyExists => "You have already reviewed this product",
            Self::ReviewNotAllowed => "You can only review products you have ordered",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::MailDispatchFailed => "Mail dispatch failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 does not correspond to any [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::EmailNotVerified,
            1006 => Self::VerificationCodeInvalid,
            1007 => Self::ResetTokenInvalid,

            2001 => Self::PermissionDenied,
            2002 => Self::AdminRequired,
            2003 => Self::NotResourceOwner,

            3001 => Self::UserNotFound,
            3002 => Self::EmailAlreadyRegistered,
            3003 => Self::InvalidPhoneNumber,
            3004 => Self::PasswordMismatch,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderEmpty,
            4003 => Self::MissingBillingContact,
            4004 => Self::OrderNotCancellable,
            4005 => Self::OrderNumberExhausted,

            5001 => Self::PaymentFailed,
            5002 => Self::InvalidPaymentAmount,
            5003 => Self::AmountBelowMinimum,
            5004 => Self::ExchangeRateUnavailable,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductOutOfStock,
            6003 => Self::InsufficientStock,

            7001 => Self::CartNotFound,
            7002 => Self::CartItemNotFound,

            8001 => Self::ReviewNotFound,
            8002 => Self::ReviewAlreadyExists,
            8003 => Self::ReviewNotAllowed,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::MailDispatchFailed,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::AdminRequired,
            ErrorCode::OrderNumberExhausted,
            ErrorCode::ReviewAlreadyExists,
            ErrorCode::DatabaseError,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::OrderNotFound);
    }
}
