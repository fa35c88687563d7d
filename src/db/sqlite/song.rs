//! SQLite SongRepository implementation.

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::SqliteGroupRepository;
use super::query::{SelectCriteria, UpdateFields, build_select_query, build_update_query};
use crate::db::utils::{parse_release_date, require_non_empty};
use crate::db::{
    DbError, DbResult, GroupRepository, NewSong, PageRequest, Song, SongFilter, SongPatch,
    SongRepository,
};
use crate::lyrics::select_couplet;

/// SQLx-backed song repository.
pub struct SqliteSongRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SqliteSongRepository<'a> {
    fn groups(&self) -> SqliteGroupRepository<'a> {
        SqliteGroupRepository { pool: self.pool }
    }
}

impl<'a> SongRepository for SqliteSongRepository<'a> {
    async fn insert(&self, song: &NewSong) -> DbResult<()> {
        require_non_empty("group", &song.group)?;
        require_non_empty("song", &song.song)?;
        let release_date = parse_release_date(&song.release_date)?;

        let group_id = self.groups().get_or_create(&song.group).await?;

        sqlx::query(
            "INSERT INTO songs (song_name, release_date, text, link, group_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&song.song)
        .bind(release_date)
        .bind(&song.text)
        .bind(&song.link)
        .bind(group_id)
        .execute(self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::Constraint { .. } => DbError::Constraint {
                message: format!(
                    "Song '{}' of group '{}' already exists",
                    song.song, song.group
                ),
            },
            other => other,
        })?;

        debug!(group = %song.group, song = %song.song, "Inserted song");
        Ok(())
    }

    async fn delete(&self, group: &str, song: &str) -> DbResult<()> {
        let group_id = self.groups().resolve_id(group).await?;

        let result = sqlx::query("DELETE FROM songs WHERE group_id = $1 AND song_name = $2")
            .bind(group_id)
            .bind(song)
            .execute(self.pool)
            .await?;

        debug!(group, song, rows = result.rows_affected(), "Deleted song");
        Ok(())
    }

    async fn edit(&self, group: &str, song: &str, patch: &SongPatch) -> DbResult<()> {
        let group_id = self.groups().resolve_id(group).await?;

        let fields = UpdateFields {
            release_date: patch
                .release_date
                .as_deref()
                .map(parse_release_date)
                .transpose()?,
            text: patch.text.clone(),
            link: patch.link.clone(),
        };

        let Some(query) = build_update_query(group_id, song, &fields) else {
            debug!(group, song, "Nothing to edit");
            return Ok(());
        };

        debug!(sql = %query.sql, params = ?query.params, "Editing song");
        let result = query
            .bind_all(sqlx::query(&query.sql))
            .execute(self.pool)
            .await?;

        debug!(group, song, rows = result.rows_affected(), "Edited song");
        Ok(())
    }

    async fn list(&self, filter: &SongFilter, page: PageRequest) -> DbResult<Vec<Song>> {
        let group_id = match filter.group.as_deref() {
            Some(name) => Some(self.groups().resolve_id(name).await?),
            None => None,
        };

        let criteria = SelectCriteria {
            group_id,
            song: filter.song.clone(),
            release_date: filter
                .release_date
                .as_deref()
                .map(parse_release_date)
                .transpose()?,
            text: filter.text.clone(),
            link: filter.link.clone(),
        };

        let query = build_select_query(&criteria, page);
        debug!(sql = %query.sql, params = ?query.params, "Listing songs");

        let rows = query
            .bind_all(sqlx::query(&query.sql))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(Song {
                    group: row.try_get("group_name")?,
                    song: row.try_get("song_name")?,
                    release_date: row.try_get("release_date")?,
                    text: row.try_get("text")?,
                    link: row.try_get("link")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(DbError::from)
    }

    async fn couplet(&self, group: &str, song: &str, index: i64) -> DbResult<String> {
        let group_id = self.groups().resolve_id(group).await?;

        let text: String =
            sqlx::query_scalar("SELECT text FROM songs WHERE group_id = $1 AND song_name = $2")
                .bind(group_id)
                .bind(song)
                .fetch_optional(self.pool)
                .await?
                .ok_or_else(|| DbError::not_found("Song", song))?;

        Ok(select_couplet(&text, index)?.to_string())
    }
}
