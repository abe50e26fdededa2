//! Unified error codes for the league services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Season / registry errors
//! - 2xxx: Discipline errors
//! - 3xxx: Fixture errors
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
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Season / registry ====================
    /// Season not found
    SeasonNotFound = 1001,
    /// Player not rostered for the season
    PlayerNotFound = 1002,

    // ==================== 2xxx: Discipline ====================
    /// Suspension not found
    SuspensionNotFound = 2001,
    /// A recalculation for the season is already running
    RecalculationInProgress = 2002,
    /// Requested status change is not allowed from the current status
    InvalidSuspensionTransition = 2003,
    /// Card event references a player missing from the roster
    CardEventUnknownPlayer = 2101,
    /// Card event references a team missing from the season
    CardEventUnknownTeam = 2102,
    /// Card event references a match missing from the fixture list
    CardEventUnknownMatch = 2103,
    /// Card event team differs from the player's roster team
    CardEventTeamMismatch = 2104,
    /// Card event team did not take part in the referenced match
    CardEventTeamNotInMatch = 2105,

    // ==================== 3xxx: Fixture ====================
    /// Match not found
    MatchNotFound = 3001,
    /// Team is not a participant of the match
    TeamNotInMatch = 3002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Season
            ErrorCode::SeasonNotFound => "Season not found",
            ErrorCode::PlayerNotFound => "Player not found in season roster",

            // Discipline
            ErrorCode::SuspensionNotFound => "Suspension not found",
            ErrorCode::RecalculationInProgress => "Recalculation in progress",
            ErrorCode::InvalidSuspensionTransition => "Suspension status change not allowed",
            ErrorCode::CardEventUnknownPlayer => "Card event references an unknown player",
            ErrorCode::CardEventUnknownTeam => "Card event references an unknown team",
            ErrorCode::CardEventUnknownMatch => "Card event references an unknown match",
            ErrorCode::CardEventTeamMismatch => "Card event team does not match the roster",
            ErrorCode::CardEventTeamNotInMatch => "Card event team did not play the match",

            // Fixture
            ErrorCode::MatchNotFound => "Match not found",
            ErrorCode::TeamNotInMatch => "Team is not a participant of the match",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Season
            1001 => Ok(ErrorCode::SeasonNotFound),
            1002 => Ok(ErrorCode::PlayerNotFound),

            // Discipline
            2001 => Ok(ErrorCode::SuspensionNotFound),
            2002 => Ok(ErrorCode::RecalculationInProgress),
            2003 => Ok(ErrorCode::InvalidSuspensionTransition),
            2101 => Ok(ErrorCode::CardEventUnknownPlayer),
            2102 => Ok(ErrorCode::CardEventUnknownTeam),
            2103 => Ok(ErrorCode::CardEventUnknownMatch),
            2104 => Ok(ErrorCode::CardEventTeamMismatch),
            2105 => Ok(ErrorCode::CardEventTeamNotInMatch),

            // Fixture
            3001 => Ok(ErrorCode::MatchNotFound),
            3002 => Ok(ErrorCode::TeamNotInMatch),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
