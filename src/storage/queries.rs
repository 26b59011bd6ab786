//! Basic database query operations

use super::{models::*, schema::StatDatabase};
use crate::cli::types::{GameId, Period, PlayerId, SeasonType, TeamId};
use crate::engine::types::{ActionKind, GameEvent, RosterContext};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use std::collections::BTreeSet;

impl StatDatabase {
    /// Look a team up by name, creating it on first sight.
    pub fn get_or_create_team(&mut self, name: &str) -> Result<Team> {
        if let Some(team) = self.get_team_by_name(name)? {
            return Ok(team);
        }
        self.conn
            .execute("INSERT INTO teams (name) VALUES (?)", params![name])?;
        Ok(Team {
            team_id: TeamId::new(self.conn.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Option<Team>> {
        self.conn
            .query_row(
                "SELECT team_id, name FROM teams WHERE team_id = ?",
                params![team_id.as_i64()],
                |row| {
                    Ok(Team {
                        team_id: TeamId::new(row.get(0)?),
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .context("failed to load team")
    }

    pub fn get_team_by_name(&self, name: &str) -> Result<Option<Team>> {
        self.conn
            .query_row(
                "SELECT team_id, name FROM teams WHERE name = ?",
                params![name],
                |row| {
                    Ok(Team {
                        team_id: TeamId::new(row.get(0)?),
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .context("failed to load team by name")
    }

    /// Look a player up by (team, name), creating them with the next
    /// free jersey number on first sight.
    pub fn get_or_create_player(&mut self, team_id: TeamId, name: &str) -> Result<Player> {
        let existing = self
            .conn
            .query_row(
                "SELECT player_id, team_id, name, number FROM players
                 WHERE team_id = ? AND name = ?",
                params![team_id.as_i64(), name],
                Self::row_to_player,
            )
            .optional()?;
        if let Some(player) = existing {
            return Ok(player);
        }

        let number: u32 = self.conn.query_row(
            "SELECT COALESCE(MAX(number), 0) + 1 FROM players WHERE team_id = ?",
            params![team_id.as_i64()],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO players (team_id, name, number) VALUES (?, ?, ?)",
            params![team_id.as_i64(), name, number],
        )?;
        Ok(Player {
            player_id: PlayerId::new(self.conn.last_insert_rowid()),
            team_id,
            name: name.to_string(),
            number,
        })
    }

    /// All players of a team, in jersey-number order.
    pub fn get_team_players(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, team_id, name, number FROM players
             WHERE team_id = ? ORDER BY number",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64()], Self::row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Players of both teams participating in a game.
    pub fn get_game_players(&self, game_id: GameId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.player_id, p.team_id, p.name, p.number
             FROM players p
             JOIN games g ON p.team_id IN (g.home_team_id, g.away_team_id)
             WHERE g.game_id = ?
             ORDER BY p.team_id, p.number",
        )?;
        let rows = stmt.query_map(params![game_id.as_i64()], Self::row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Find a game by its matchup and date (duplicate-import check).
    pub fn find_game(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
        date: DateTime<Utc>,
    ) -> Result<Option<GameId>> {
        self.conn
            .query_row(
                "SELECT game_id FROM games
                 WHERE home_team_id = ? AND away_team_id = ? AND date = ?",
                params![home_team_id.as_i64(), away_team_id.as_i64(), date],
                |row| Ok(GameId::new(row.get(0)?)),
            )
            .optional()
            .context("failed to look up game")
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert_game(
        &mut self,
        home_team_id: TeamId,
        away_team_id: TeamId,
        date: DateTime<Utc>,
        duration_minutes: u32,
        quarters: u8,
        status: GameStatus,
        season_type: SeasonType,
    ) -> Result<GameId> {
        self.conn.execute(
            "INSERT INTO games
             (home_team_id, away_team_id, date, duration_minutes, quarters, status, season_type)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                home_team_id.as_i64(),
                away_team_id.as_i64(),
                date,
                duration_minutes,
                quarters,
                status.as_str(),
                season_type.as_str()
            ],
        )?;
        Ok(GameId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_game(&self, game_id: GameId) -> Result<Option<Game>> {
        self.conn
            .query_row(
                "SELECT game_id, home_team_id, away_team_id, date,
                        duration_minutes, quarters, status, season_type
                 FROM games WHERE game_id = ?",
                params![game_id.as_i64()],
                Self::row_to_game,
            )
            .optional()
            .context("failed to load game")
    }

    pub fn set_game_status(&mut self, game_id: GameId, status: GameStatus) -> Result<()> {
        self.conn.execute(
            "UPDATE games SET status = ? WHERE game_id = ?",
            params![status.as_str(), game_id.as_i64()],
        )?;
        Ok(())
    }

    /// Finished games a team took part in, optionally filtered by season
    /// phase, oldest first.
    pub fn get_team_games(
        &self,
        team_id: TeamId,
        season_type: Option<SeasonType>,
    ) -> Result<Vec<Game>> {
        let mut query = String::from(
            "SELECT game_id, home_team_id, away_team_id, date,
                    duration_minutes, quarters, status, season_type
             FROM games
             WHERE (home_team_id = ? OR away_team_id = ?) AND status = 'finished'",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(team_id.as_i64()),
            Box::new(team_id.as_i64()),
        ];

        if let Some(st) = season_type {
            query.push_str(" AND season_type = ?");
            params.push(Box::new(st.as_str()));
        }

        query.push_str(" ORDER BY date, game_id");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            Self::row_to_game,
        )?;

        let mut games = Vec::new();
        for row in rows {
            games.push(row?);
        }
        Ok(games)
    }

    /// Record a game participant (starter flag per the period-1 lineup).
    pub fn add_game_player(
        &mut self,
        game_id: GameId,
        player_id: PlayerId,
        is_starter: bool,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO game_players (game_id, player_id, is_starter)
             VALUES (?, ?, ?)",
            params![game_id.as_i64(), player_id.as_i64(), is_starter],
        )?;
        Ok(())
    }

    /// Roster context of a game: both teams' player sets plus starters.
    pub fn get_roster(&self, game_id: GameId) -> Result<RosterContext> {
        let game = self
            .get_game(game_id)?
            .ok_or_else(|| anyhow::anyhow!("game {} does not exist", game_id))?;

        let collect = |team_id: TeamId| -> Result<BTreeSet<PlayerId>> {
            Ok(self
                .get_team_players(team_id)?
                .into_iter()
                .map(|p| p.player_id)
                .collect())
        };
        let home = collect(game.home_team_id)?;
        let away = collect(game.away_team_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT player_id FROM game_players WHERE game_id = ? AND is_starter = 1",
        )?;
        let rows = stmt.query_map(params![game_id.as_i64()], |row| {
            Ok(PlayerId::new(row.get(0)?))
        })?;
        let mut starters = BTreeSet::new();
        for row in rows {
            starters.insert(row?);
        }

        Ok(RosterContext::new(home, away, starters))
    }

    /// Append one event to a game's log. Returns the arrival index.
    pub fn insert_event(
        &mut self,
        game_id: GameId,
        player_id: PlayerId,
        period: Period,
        timestamp: DateTime<Utc>,
        kind: ActionKind,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO events (game_id, player_id, period, timestamp, kind)
             VALUES (?, ?, ?, ?, ?)",
            params![
                game_id.as_i64(),
                player_id.as_i64(),
                period.as_u8(),
                timestamp,
                kind.code()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// A game's full event log in arrival order.
    pub fn get_game_events(&self, game_id: GameId) -> Result<Vec<GameEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_id, player_id, period, timestamp, kind
             FROM events WHERE game_id = ? ORDER BY event_id",
        )?;
        let rows = stmt.query_map(params![game_id.as_i64()], |row| {
            let kind_code: String = row.get(4)?;
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, DateTime<Utc>>(3)?,
                kind_code,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (event_id, player_id, period, timestamp, kind_code) = row?;
            let kind: ActionKind = kind_code
                .parse()
                .with_context(|| format!("event {} has a corrupt kind", event_id))?;
            events.push(GameEvent {
                game_id,
                player_id: PlayerId::new(player_id),
                period: Period::new(period),
                timestamp,
                kind,
                seq: event_id as u32,
            });
        }
        Ok(events)
    }

    /// Delete a game and everything derived from its identity. The event
    /// log goes with it; derived metrics were never stored.
    pub fn delete_game(&mut self, game_id: GameId) -> Result<()> {
        self.conn
            .execute("DELETE FROM events WHERE game_id = ?", params![game_id.as_i64()])?;
        self.conn.execute(
            "DELETE FROM game_players WHERE game_id = ?",
            params![game_id.as_i64()],
        )?;
        self.conn
            .execute("DELETE FROM games WHERE game_id = ?", params![game_id.as_i64()])?;
        Ok(())
    }

    fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
        Ok(Player {
            player_id: PlayerId::new(row.get(0)?),
            team_id: TeamId::new(row.get(1)?),
            name: row.get(2)?,
            number: row.get(3)?,
        })
    }

    fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
        let status_str: String = row.get(6)?;
        let season_str: String = row.get(7)?;
        let status = status_str.parse().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                format!("unknown game status: {}", status_str).into(),
            )
        })?;
        let season_type = season_str.parse().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                format!("unknown season type: {}", season_str).into(),
            )
        })?;

        Ok(Game {
            game_id: GameId::new(row.get(0)?),
            home_team_id: TeamId::new(row.get(1)?),
            away_team_id: TeamId::new(row.get(2)?),
            date: row.get(3)?,
            duration_minutes: row.get(4)?,
            quarters: row.get(5)?,
            status,
            season_type,
        })
    }
}
