//! Discipline engine errors

use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use shared::models::SuspensionStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisciplineError {
    #[error("Season {0} not found")]
    SeasonNotFound(i64),

    #[error("Match {0} not found")]
    MatchNotFound(i64),

    #[error("Player {player_id} is not on the season {season_id} roster")]
    PlayerNotFound { season_id: i64, player_id: i64 },

    #[error("Suspension {0} not found")]
    SuspensionNotFound(i64),

    #[error("Team {team_id} does not play in match {match_id}")]
    TeamNotInMatch { match_id: i64, team_id: i64 },

    #[error("Recalculation already running for season {0}")]
    RecalculationInProgress(i64),

    #[error("Suspension {suspension_id} cannot move from {from} to {to}")]
    InvalidTransition {
        suspension_id: i64,
        from: SuspensionStatus,
        to: SuspensionStatus,
    },

    // ========== Card event data integrity ==========
    #[error("Card event {event_id} references unknown player {player_id}")]
    UnknownPlayer { event_id: i64, player_id: i64 },

    #[error("Card event {event_id} references unknown team {team_id}")]
    UnknownTeam { event_id: i64, team_id: i64 },

    #[error("Card event {event_id} references unknown match {match_id}")]
    UnknownMatch { event_id: i64, match_id: i64 },

    #[error(
        "Card event {event_id}: player {player_id} is rostered for team {roster_team_id}, not {event_team_id}"
    )]
    TeamMismatch {
        event_id: i64,
        player_id: i64,
        event_team_id: i64,
        roster_team_id: i64,
    },

    #[error("Card event {event_id}: team {team_id} did not play match {match_id}")]
    EventTeamNotInMatch {
        event_id: i64,
        team_id: i64,
        match_id: i64,
    },

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for DisciplineError {
    fn from(err: sqlx::Error) -> Self {
        DisciplineError::Repo(err.into())
    }
}

impl DisciplineError {
    /// Offending card event, for data-integrity failures
    pub fn event_id(&self) -> Option<i64> {
        match self {
            DisciplineError::UnknownPlayer { event_id, .. }
            | DisciplineError::UnknownTeam { event_id, .. }
            | DisciplineError::UnknownMatch { event_id, .. }
            | DisciplineError::TeamMismatch { event_id, .. }
            | DisciplineError::EventTeamNotInMatch { event_id, .. } => Some(*event_id),
            _ => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DisciplineError::SeasonNotFound(_) => ErrorCode::SeasonNotFound,
            DisciplineError::MatchNotFound(_) => ErrorCode::MatchNotFound,
            DisciplineError::PlayerNotFound { .. } => ErrorCode::PlayerNotFound,
            DisciplineError::SuspensionNotFound(_) => ErrorCode::SuspensionNotFound,
            DisciplineError::TeamNotInMatch { .. } => ErrorCode::TeamNotInMatch,
            DisciplineError::RecalculationInProgress(_) => ErrorCode::RecalculationInProgress,
            DisciplineError::InvalidTransition { .. } => ErrorCode::InvalidSuspensionTransition,
            DisciplineError::UnknownPlayer { .. } => ErrorCode::CardEventUnknownPlayer,
            DisciplineError::UnknownTeam { .. } => ErrorCode::CardEventUnknownTeam,
            DisciplineError::UnknownMatch { .. } => ErrorCode::CardEventUnknownMatch,
            DisciplineError::TeamMismatch { .. } => ErrorCode::CardEventTeamMismatch,
            DisciplineError::EventTeamNotInMatch { .. } => ErrorCode::CardEventTeamNotInMatch,
            DisciplineError::Repo(RepoError::NotFound(_)) => ErrorCode::NotFound,
            DisciplineError::Repo(RepoError::Duplicate(_)) => ErrorCode::AlreadyExists,
            DisciplineError::Repo(RepoError::Database(_)) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DisciplineError> for AppError {
    fn from(err: DisciplineError) -> Self {
        let code = err.code();
        match &err {
            // 数据库错误不向客户端暴露细节
            DisciplineError::Repo(RepoError::Database(msg)) => {
                tracing::error!(error = %msg, "Discipline storage failure");
                return AppError::new(code);
            }
            DisciplineError::Repo(_) => return AppError::with_message(code, err.to_string()),
            _ => {}
        }

        let mut app = AppError::with_message(code, err.to_string());
        if let Some(event_id) = err.event_id() {
            app = app.with_detail("event_id", event_id);
        }
        match err {
            DisciplineError::SeasonNotFound(season_id) => app.with_detail("season_id", season_id),
            DisciplineError::MatchNotFound(match_id) => app.with_detail("match_id", match_id),
            DisciplineError::PlayerNotFound {
                season_id,
                player_id,
            } => app
                .with_detail("season_id", season_id)
                .with_detail("player_id", player_id),
            DisciplineError::SuspensionNotFound(id) => app.with_detail("suspension_id", id),
            DisciplineError::TeamNotInMatch { match_id, team_id } => app
                .with_detail("match_id", match_id)
                .with_detail("team_id", team_id),
            DisciplineError::RecalculationInProgress(season_id) => {
                app.with_detail("season_id", season_id)
            }
            DisciplineError::InvalidTransition {
                suspension_id,
                from,
                to,
            } => app
                .with_detail("suspension_id", suspension_id)
                .with_detail("from", from.as_str())
                .with_detail("to", to.as_str()),
            DisciplineError::UnknownPlayer { player_id, .. } => {
                app.with_detail("player_id", player_id)
            }
            DisciplineError::UnknownTeam { team_id, .. } => app.with_detail("team_id", team_id),
            DisciplineError::UnknownMatch { match_id, .. } => {
                app.with_detail("match_id", match_id)
            }
            DisciplineError::TeamMismatch {
                player_id,
                roster_team_id,
                ..
            } => app
                .with_detail("player_id", player_id)
                .with_detail("roster_team_id", roster_team_id),
            DisciplineError::EventTeamNotInMatch {
                team_id, match_id, ..
            } => app
                .with_detail("team_id", team_id)
                .with_detail("match_id", match_id),
            DisciplineError::Repo(_) => app,
        }
    }
}

pub type DisciplineResult<T> = Result<T, DisciplineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_integrity_error_names_event() {
        let err = DisciplineError::UnknownPlayer {
            event_id: 17,
            player_id: 99,
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::CardEventUnknownPlayer);
        assert_eq!(app.http_status(), StatusCode::UNPROCESSABLE_ENTITY);
        let details = app.details.unwrap();
        assert_eq!(details.get("event_id").unwrap(), 17);
        assert_eq!(details.get("player_id").unwrap(), 99);
    }

    #[test]
    fn test_database_error_hides_message() {
        let err = DisciplineError::Repo(RepoError::Database("disk I/O error at page 12".into()));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.message, "Database error");
        assert!(app.details.is_none());
    }

    #[test]
    fn test_transition_error_is_conflict() {
        let err = DisciplineError::InvalidTransition {
            suspension_id: 4,
            from: SuspensionStatus::Archived,
            to: SuspensionStatus::Cancelled,
        };
        let app: AppError = err.into();
        assert_eq!(app.http_status(), StatusCode::CONFLICT);
        assert_eq!(app.details.unwrap().get("from").unwrap(), "archived");
    }

    #[test]
    fn test_not_found_codes_are_distinct() {
        assert_eq!(
            DisciplineError::SeasonNotFound(7).code(),
            ErrorCode::SeasonNotFound
        );
        assert_eq!(
            DisciplineError::MatchNotFound(1).code(),
            ErrorCode::MatchNotFound
        );
        assert_eq!(
            DisciplineError::SuspensionNotFound(1).code(),
            ErrorCode::SuspensionNotFound
        );
    }
}
