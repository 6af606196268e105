//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // General
            Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,

            // Auth — the original API reports bad credentials and
            // unverified accounts as 400, missing/broken tokens as 401
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidCredentials
            | Self::EmailNotVerified
            | Self::VerificationCodeInvalid
            | Self::ResetTokenInvalid => StatusCode::BAD_REQUEST,

            // Permission
            Self::PermissionDenied | Self::AdminRequired | Self::NotResourceOwner => {
                StatusCode::FORBIDDEN
            }

            // User
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyRegistered
            | Self::InvalidPhoneNumber
            | Self::PasswordMismatch => StatusCode::BAD_REQUEST,

            // Order
            Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::OrderEmpty | Self::MissingBillingContact | Self::OrderNotCancellable => {
                StatusCode::BAD_REQUEST
            }
            Self::OrderNumberExhausted => StatusCode::INTERNAL_SERVER_ERROR,

            // Payment
            Self::InvalidPaymentAmount | Self::AmountBelowMinimum => StatusCode::BAD_REQUEST,
            Self::PaymentFailed | Self::ExchangeRateUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // Product
            Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::ProductOutOfStock | Self::InsufficientStock => StatusCode::BAD_REQUEST,

            // Cart
            Self::CartNotFound | Self::CartItemNotFound => StatusCode::NOT_FOUND,

            // Review
            Self::ReviewNotFound => StatusCode::NOT_FOUND,
            Self::ReviewAlreadyExists => StatusCode::BAD_REQUEST,
            Self::ReviewNotAllowed => StatusCode::FORBIDDEN,

            // System
            Self::InternalError | Self::DatabaseError | Self::MailDispatchFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AdminRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::OrderNotCancellable.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::OrderNumberExhausted.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
