//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Season / registry errors
/// - 2xxx: Discipline errors
/// - 3xxx: Fixture errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Season / registry errors (1xxx)
    Season,
    /// Discipline errors (2xxx)
    Discipline,
    /// Fixture errors (3xxx)
    Fixture,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Season,
            2000..3000 => Self::Discipline,
            3000..4000 => Self::Fixture,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Season => "season",
            Self::Discipline => "discipline",
            Self::Fixture => "fixture",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Season);
        assert_eq!(ErrorCategory::from_code(2104), ErrorCategory::Discipline);
        assert_eq!(ErrorCategory::from_code(3002), ErrorCategory::Fixture);
        assert_eq!(ErrorCategory::from_code(4000), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::SeasonNotFound.category(), ErrorCategory::Season);
        assert_eq!(
            ErrorCode::RecalculationInProgress.category(),
            ErrorCategory::Discipline
        );
        assert_eq!(ErrorCode::MatchNotFound.category(), ErrorCategory::Fixture);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Discipline).unwrap();
        assert_eq!(json, "\"discipline\"");
        let category: ErrorCategory = serde_json::from_str("\"fixture\"").unwrap();
        assert_eq!(category, ErrorCategory::Fixture);
    }
}
