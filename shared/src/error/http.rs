//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::SeasonNotFound
            | Self::PlayerNotFound
            | Self::SuspensionNotFound
            | Self::MatchNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::RecalculationInProgress
            | Self::InvalidSuspensionTransition => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (source data is inconsistent)
            Self::CardEventUnknownPlayer
            | Self::CardEventUnknownTeam
            | Self::CardEventUnknownMatch
            | Self::CardEventTeamMismatch
            | Self::CardEventTeamNotInMatch => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            Self::ValidationFailed | Self::TeamNotInMatch => StatusCode::BAD_REQUEST,
        }
    }
}
