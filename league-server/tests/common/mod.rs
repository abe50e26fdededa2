//! Shared fixtures for the integration tests
//!
//! Season 7 fixture list (one week apart):
//!
//! | match | day | home | away |
//! |-------|-----|------|------|
//! | 1 | 1 | A | B |
//! | 2 | 2 | C | A |
//! | 3 | 3 | A | B |
//! | 4 | 4 | B | C |
//! | 5 | 5 | A | C |
//! | 6 | 6 | B | A |
//! | 7 | 7 | A | C |
//!
//! Roster: 42, 43 → A; 50 → B; 60 → C. Season 8 exists with no data.

#![allow(dead_code)]

use league_server::db::DbService;
use league_server::{Config, DisciplinePolicy, ServerState};
use shared::models::{CardType, Suspension, SuspensionQuery, SuspensionStatus};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const SEASON: i64 = 7;
pub const OTHER_SEASON: i64 = 8;
pub const TEAM_A: i64 = 1;
pub const TEAM_B: i64 = 2;
pub const TEAM_C: i64 = 3;

const KICKOFF_BASE: i64 = 1_740_000_000_000;
const WEEK_MS: i64 = 7 * 24 * 3600 * 1000;

pub struct TestLeague {
    // 保持临时目录存活直到测试结束
    _dir: TempDir,
    pub state: ServerState,
}

impl TestLeague {
    pub fn pool(&self) -> &SqlitePool {
        &self.state.db.pool
    }

    pub async fn card(
        &self,
        event_id: i64,
        match_id: i64,
        team_id: i64,
        player_id: i64,
        card_type: CardType,
        minute: i32,
    ) {
        sqlx::query(
            "INSERT INTO card_events (event_id, season_id, match_id, team_id, player_id, card_type, minute) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event_id)
        .bind(SEASON)
        .bind(match_id)
        .bind(team_id)
        .bind(player_id)
        .bind(card_type)
        .bind(minute)
        .execute(self.pool())
        .await
        .unwrap();
    }

    pub async fn yellow(&self, event_id: i64, match_id: i64, player_id: i64, minute: i32) {
        let team = team_of(player_id);
        self.card(event_id, match_id, team, player_id, CardType::Yellow, minute)
            .await;
    }

    pub async fn red(&self, event_id: i64, match_id: i64, player_id: i64, minute: i32) {
        let team = team_of(player_id);
        self.card(event_id, match_id, team, player_id, CardType::Red, minute)
            .await;
    }

    /// Notify completion of a match for both participating teams
    pub async fn complete_match(&self, match_id: i64) {
        let (home, away) = teams_of(match_id);
        for team in [home, away] {
            self.state
                .discipline
                .match_completed(match_id, team)
                .await
                .unwrap();
        }
    }

    pub async fn suspensions(&self, query: SuspensionQuery) -> Vec<Suspension> {
        self.state
            .discipline
            .suspensions(SEASON, &query)
            .await
            .unwrap()
    }

    pub async fn with_status(&self, status: SuspensionStatus) -> Vec<Suspension> {
        self.suspensions(SuspensionQuery {
            status: Some(status),
            ..Default::default()
        })
        .await
    }
}

pub fn team_of(player_id: i64) -> i64 {
    match player_id {
        42 | 43 => TEAM_A,
        50 => TEAM_B,
        _ => TEAM_C,
    }
}

pub fn teams_of(match_id: i64) -> (i64, i64) {
    match match_id {
        1 | 3 => (TEAM_A, TEAM_B),
        2 => (TEAM_C, TEAM_A),
        4 => (TEAM_B, TEAM_C),
        5 | 7 => (TEAM_A, TEAM_C),
        6 => (TEAM_B, TEAM_A),
        other => panic!("no fixture {other}"),
    }
}

pub async fn setup() -> TestLeague {
    setup_with_policy(DisciplinePolicy::default()).await
}

pub async fn setup_with_policy(policy: DisciplinePolicy) -> TestLeague {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("league.db");
    let path = path.to_str().unwrap().to_string();

    let db = DbService::new(&path, 4).await.unwrap();
    seed(&db.pool).await;

    let mut config = Config::with_database(path);
    config.policy = policy;
    let state = ServerState::new(config, db);

    TestLeague { _dir: dir, state }
}

async fn seed(pool: &SqlitePool) {
    for (season_id, name) in [(SEASON, "2025 Spring"), (OTHER_SEASON, "2025 Autumn")] {
        sqlx::query("INSERT INTO seasons (season_id, name) VALUES (?, ?)")
            .bind(season_id)
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }

    for (player_id, team_id) in [(42, TEAM_A), (43, TEAM_A), (50, TEAM_B), (60, TEAM_C)] {
        sqlx::query("INSERT INTO roster (season_id, player_id, team_id) VALUES (?, ?, ?)")
            .bind(SEASON)
            .bind(player_id)
            .bind(team_id)
            .execute(pool)
            .await
            .unwrap();
    }

    for match_id in 1..=7_i64 {
        let (home, away) = teams_of(match_id);
        sqlx::query(
            "INSERT INTO matches (match_id, season_id, matchday, kickoff_at, home_team_id, away_team_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(match_id)
        .bind(SEASON)
        .bind(match_id as i32)
        .bind(KICKOFF_BASE + match_id * WEEK_MS)
        .bind(home)
        .bind(away)
        .execute(pool)
        .await
        .unwrap();
    }
}
