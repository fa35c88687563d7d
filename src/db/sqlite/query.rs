//! Parameterized query builder for sparse song filters and edits.
//!
//! Clauses are collected into a list and joined; values are always bound
//! through numbered `$n` placeholders, never interpolated into the SQL text.

use chrono::NaiveDate;

use crate::db::PageRequest;

const SELECT_SONGS: &str = "SELECT g.group_name, s.song_name, s.release_date, s.text, s.link \
     FROM songs s JOIN groups g ON s.group_id = g.id";

/// A value bound to a numbered placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

/// SQL text with its positional parameters; `params[0]` binds `$1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl ParamQuery {
    /// Bind all parameters onto a SQLx query, in placeholder order.
    pub fn bind_all<'q>(
        &'q self,
        mut query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        for param in &self.params {
            query = match param {
                SqlParam::Int(v) => query.bind(*v),
                SqlParam::Text(v) => query.bind(v.as_str()),
                SqlParam::Date(v) => query.bind(*v),
            };
        }
        query
    }
}

/// Read criteria with the group name already resolved to its id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectCriteria {
    pub group_id: Option<i64>,
    pub song: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Settable fields of an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateFields {
    pub release_date: Option<NaiveDate>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Accumulates `column = $n` clauses with contiguous placeholder numbers.
struct ClauseList {
    clauses: Vec<String>,
    params: Vec<SqlParam>,
    next: usize,
}

impl ClauseList {
    fn starting_at(next: usize) -> Self {
        Self {
            clauses: Vec::new(),
            params: Vec::new(),
            next,
        }
    }

    fn push(&mut self, column: &str, value: Option<SqlParam>) {
        if let Some(value) = value {
            self.clauses.push(format!("{} = ${}", column, self.next));
            self.params.push(value);
            self.next += 1;
        }
    }
}

/// Build the paginated SELECT for the given criteria.
///
/// Clauses follow the fixed order group, song, release date, text, link.
/// `LIMIT`/`OFFSET` always take the last two placeholders.
pub fn build_select_query(criteria: &SelectCriteria, page: PageRequest) -> ParamQuery {
    let mut list = ClauseList::starting_at(1);
    list.push("s.group_id", criteria.group_id.map(SqlParam::Int));
    list.push("s.song_name", criteria.song.clone().map(SqlParam::Text));
    list.push("s.release_date", criteria.release_date.map(SqlParam::Date));
    list.push("s.text", criteria.text.clone().map(SqlParam::Text));
    list.push("s.link", criteria.link.clone().map(SqlParam::Text));

    let mut sql = SELECT_SONGS.to_string();
    if !list.clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&list.clauses.join(" AND "));
    }
    sql.push_str(&format!(
        " ORDER BY s.id LIMIT ${} OFFSET ${}",
        list.next,
        list.next + 1
    ));

    let mut params = list.params;
    params.push(SqlParam::Int(page.items));
    params.push(SqlParam::Int(page.offset()));

    ParamQuery { sql, params }
}

/// Build the sparse UPDATE for one song, or `None` when nothing is set.
///
/// `$1` and `$2` are reserved for the group id and song name of the trailing
/// WHERE clause; SET clauses are numbered from `$3`.
pub fn build_update_query(group_id: i64, song: &str, fields: &UpdateFields) -> Option<ParamQuery> {
    let mut list = ClauseList::starting_at(3);
    list.push("release_date", fields.release_date.map(SqlParam::Date));
    list.push("text", fields.text.clone().map(SqlParam::Text));
    list.push("link", fields.link.clone().map(SqlParam::Text));

    if list.clauses.is_empty() {
        return None;
    }

    let sql = format!(
        "UPDATE songs SET {} WHERE group_id = $1 AND song_name = $2",
        list.clauses.join(", ")
    );

    let mut params = vec![SqlParam::Int(group_id), SqlParam::Text(song.to_string())];
    params.extend(list.params);

    Some(ParamQuery { sql, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2006, 7, 16).unwrap()
    }

    #[test]
    fn test_select_without_filters_has_no_where() {
        let query = build_select_query(&SelectCriteria::default(), PageRequest::new(1, 10));
        assert_eq!(
            query.sql,
            format!("{} ORDER BY s.id LIMIT $1 OFFSET $2", SELECT_SONGS)
        );
        assert_eq!(query.params, vec![SqlParam::Int(10), SqlParam::Int(0)]);
    }

    #[test]
    fn test_select_all_filters_in_fixed_order() {
        let criteria = SelectCriteria {
            group_id: Some(7),
            song: Some("Uprising".to_string()),
            release_date: Some(date()),
            text: Some("A".to_string()),
            link: Some("https://x".to_string()),
        };
        let query = build_select_query(&criteria, PageRequest::new(2, 5));
        assert_eq!(
            query.sql,
            format!(
                "{} WHERE s.group_id = $1 AND s.song_name = $2 AND s.release_date = $3 \
                 AND s.text = $4 AND s.link = $5 ORDER BY s.id LIMIT $6 OFFSET $7",
                SELECT_SONGS
            )
        );
        assert_eq!(
            query.params,
            vec![
                SqlParam::Int(7),
                SqlParam::Text("Uprising".to_string()),
                SqlParam::Date(date()),
                SqlParam::Text("A".to_string()),
                SqlParam::Text("https://x".to_string()),
                SqlParam::Int(5),
                SqlParam::Int(5),
            ]
        );
    }

    #[test]
    fn test_select_sparse_filters_have_no_gaps() {
        let criteria = SelectCriteria {
            song: Some("Uprising".to_string()),
            link: Some(String::new()),
            ..Default::default()
        };
        let query = build_select_query(&criteria, PageRequest::new(1, 3));
        assert!(
            query
                .sql
                .ends_with("WHERE s.song_name = $1 AND s.link = $2 ORDER BY s.id LIMIT $3 OFFSET $4")
        );
        assert_eq!(query.params.len(), 4);
        assert_eq!(query.params[1], SqlParam::Text(String::new()));
    }

    #[test]
    fn test_select_every_subset_numbers_placeholders_contiguously() {
        for mask in 0u8..32 {
            let criteria = SelectCriteria {
                group_id: ((mask & 1) != 0).then_some(1),
                song: ((mask & 2) != 0).then(|| "s".to_string()),
                release_date: ((mask & 4) != 0).then(date),
                text: ((mask & 8) != 0).then(|| "t".to_string()),
                link: ((mask & 16) != 0).then(|| "l".to_string()),
            };
            let query = build_select_query(&criteria, PageRequest::new(1, 1));
            let supplied = mask.count_ones() as usize;

            assert_eq!(query.params.len(), supplied + 2, "mask {:05b}", mask);
            for n in 1..=supplied + 2 {
                assert!(query.sql.contains(&format!("${}", n)), "mask {:05b}", mask);
            }
            assert!(!query.sql.contains(&format!("${}", supplied + 3)));
            assert_eq!(query.sql.contains(" WHERE "), supplied > 0);
        }
    }

    #[test]
    fn test_select_passes_nonsensical_paging_through() {
        let query = build_select_query(&SelectCriteria::default(), PageRequest::new(0, -1));
        assert_eq!(query.params, vec![SqlParam::Int(-1), SqlParam::Int(1)]);
    }

    #[test]
    fn test_update_numbers_from_three() {
        let fields = UpdateFields {
            release_date: Some(date()),
            text: None,
            link: Some("https://x".to_string()),
        };
        let query = build_update_query(4, "Uprising", &fields).unwrap();
        assert_eq!(
            query.sql,
            "UPDATE songs SET release_date = $3, link = $4 WHERE group_id = $1 AND song_name = $2"
        );
        assert_eq!(
            query.params,
            vec![
                SqlParam::Int(4),
                SqlParam::Text("Uprising".to_string()),
                SqlParam::Date(date()),
                SqlParam::Text("https://x".to_string()),
            ]
        );
    }

    #[test]
    fn test_update_without_fields_is_none() {
        assert_eq!(build_update_query(1, "Uprising", &UpdateFields::default()), None);
    }
}
