//! Idea repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable read/write APIs over the canonical `ideas` storage.
//! - Own the feed filter/order contract and the at-most-once support guard.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Idea::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Feed listings are ordered by `support DESC, id ASC`.
//! - Supporting an idea never touches `last_updated`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::idea::{Idea, IdeaId, IdeaValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const IDEA_SELECT_SQL: &str = "SELECT
    id,
    author,
    title,
    description,
    tag,
    icon,
    support,
    velocity,
    acceleration,
    last_updated
FROM ideas";

const IDEA_INSERT_SQL: &str = "INSERT INTO ideas (
    id,
    author,
    title,
    description,
    tag,
    icon,
    support,
    velocity,
    acceleration,
    last_updated
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);";

// Matches when the lowercased needle occurs in any of the three display
// columns. Bound three times with the same needle.
const MATCH_CLAUSE: &str = " AND (instr(lower(title), ?) > 0
        OR instr(lower(description), ?) > 0
        OR instr(lower(tag), ?) > 0)";

const REQUIRED_IDEA_COLUMNS: [&str; 10] = [
    "id",
    "author",
    "title",
    "description",
    "tag",
    "icon",
    "support",
    "velocity",
    "acceleration",
    "last_updated",
];

const REQUIRED_SUPPORT_COLUMNS: [&str; 2] = ["idea_id", "supported_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for idea persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(IdeaValidationError),
    Db(DbError),
    NotFound(IdeaId),
    /// The session already supported this idea; no state was changed.
    AlreadySupported(IdeaId),
    /// Insert collided with an existing idea id.
    DuplicateId(IdeaId),
    InvalidData(String),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "idea not found: {id}"),
            Self::AlreadySupported(id) => write!(f, "idea already supported: {id}"),
            Self::DuplicateId(id) => write!(f, "idea id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted idea data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IdeaValidationError> for RepoError {
    fn from(value: IdeaValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for feed listings.
///
/// A blank `text` matches every idea. `limit`/`offset` slice the ordered
/// match set; an offset past the end yields an empty result, not an error.
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub text: String,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for idea feed operations.
pub trait IdeaRepository {
    /// Inserts one idea; duplicate ids are rejected.
    fn insert_idea(&self, idea: &Idea) -> RepoResult<IdeaId>;
    /// Inserts a batch of ideas in one transaction.
    fn insert_ideas(&self, ideas: &[Idea]) -> RepoResult<usize>;
    /// Gets one idea by id.
    fn get_idea(&self, id: IdeaId) -> RepoResult<Option<Idea>>;
    /// Counts ideas matching the filter contract.
    fn count_matching(&self, text: &str) -> RepoResult<u64>;
    /// Lists matching ideas ordered by `support DESC, id ASC`.
    fn list_matching(&self, query: &FeedQuery) -> RepoResult<Vec<Idea>>;
    /// Adds `boost` to the idea's acceleration, at most once per session.
    ///
    /// Returns the new acceleration. Unknown ids fail with `NotFound`;
    /// repeat calls fail with `AlreadySupported` and change nothing.
    fn support_idea(&self, id: IdeaId, boost: f64) -> RepoResult<f64>;
}

/// SQLite-backed idea repository.
pub struct SqliteIdeaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIdeaRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl IdeaRepository for SqliteIdeaRepository<'_> {
    fn insert_idea(&self, idea: &Idea) -> RepoResult<IdeaId> {
        idea.validate()?;

        match self.conn.execute(IDEA_INSERT_SQL, insert_params(idea)) {
            Ok(_) => Ok(idea.id),
            Err(err) if is_unique_violation(&err) => Err(RepoError::DuplicateId(idea.id)),
            Err(err) => Err(err.into()),
        }
    }

    fn insert_ideas(&self, ideas: &[Idea]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(IDEA_INSERT_SQL)?;
            for idea in ideas {
                idea.validate()?;
                if let Err(err) = stmt.execute(insert_params(idea)) {
                    if is_unique_violation(&err) {
                        return Err(RepoError::DuplicateId(idea.id));
                    }
                    return Err(err.into());
                }
            }
        }
        tx.commit()?;
        Ok(ideas.len())
    }

    fn get_idea(&self, id: IdeaId) -> RepoResult<Option<Idea>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{IDEA_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_idea_row(row)?));
        }

        Ok(None)
    }

    fn count_matching(&self, text: &str) -> RepoResult<u64> {
        let mut sql = String::from("SELECT COUNT(*) FROM ideas WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        push_match_filter(&mut sql, &mut bind_values, text);

        let count: i64 =
            self.conn
                .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn list_matching(&self, query: &FeedQuery) -> RepoResult<Vec<Idea>> {
        let mut sql = format!("{IDEA_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        push_match_filter(&mut sql, &mut bind_values, &query.text);

        sql.push_str(" ORDER BY support DESC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut ideas = Vec::new();

        while let Some(row) = rows.next()? {
            ideas.push(parse_idea_row(row)?);
        }

        Ok(ideas)
    }

    fn support_idea(&self, id: IdeaId, boost: f64) -> RepoResult<f64> {
        let tx = self.conn.unchecked_transaction()?;

        let known: bool = tx.query_row(
            "SELECT EXISTS (SELECT 1 FROM ideas WHERE id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        if !known {
            return Err(RepoError::NotFound(id));
        }

        let inserted = tx.execute(
            "INSERT OR IGNORE INTO supported_ideas (idea_id, supported_at)
             VALUES (?1, (strftime('%s', 'now') * 1000));",
            params![id],
        )?;
        if inserted == 0 {
            return Err(RepoError::AlreadySupported(id));
        }

        tx.execute(
            "UPDATE ideas SET acceleration = acceleration + ?1 WHERE id = ?2;",
            params![boost, id],
        )?;
        let acceleration: f64 = tx.query_row(
            "SELECT acceleration FROM ideas WHERE id = ?1;",
            params![id],
            |row| row.get(0),
        )?;

        tx.commit()?;
        Ok(acceleration)
    }
}

/// Lowercases and trims user query text; `None` means match everything.
pub fn normalized_needle(text: &str) -> Option<String> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        None
    } else {
        Some(needle)
    }
}

fn push_match_filter(sql: &mut String, bind_values: &mut Vec<Value>, text: &str) {
    if let Some(needle) = normalized_needle(text) {
        sql.push_str(MATCH_CLAUSE);
        bind_values.push(Value::Text(needle.clone()));
        bind_values.push(Value::Text(needle.clone()));
        bind_values.push(Value::Text(needle));
    }
}

fn insert_params(idea: &Idea) -> [&dyn rusqlite::ToSql; 10] {
    [
        &idea.id,
        &idea.author,
        &idea.title,
        &idea.description,
        &idea.tag,
        &idea.icon,
        &idea.support,
        &idea.velocity,
        &idea.acceleration,
        &idea.last_updated,
    ]
}

fn parse_idea_row(row: &Row<'_>) -> RepoResult<Idea> {
    let idea = Idea {
        id: row.get("id")?,
        author: row.get("author")?,
        title: row.get("title")?,
        description: row.get("description")?,
        tag: row.get("tag")?,
        icon: row.get("icon")?,
        support: row.get("support")?,
        velocity: row.get("velocity")?,
        acceleration: row.get("acceleration")?,
        last_updated: row.get("last_updated")?,
    };
    idea.validate().map_err(|err| {
        RepoError::InvalidData(format!("idea {} failed validation: {err}", idea.id))
    })?;
    Ok(idea)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    ensure_table(conn, "ideas", &REQUIRED_IDEA_COLUMNS)?;
    ensure_table(conn, "supported_ideas", &REQUIRED_SUPPORT_COLUMNS)?;
    Ok(())
}

fn ensure_table(
    conn: &Connection,
    table: &'static str,
    required_columns: &[&'static str],
) -> RepoResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns: HashSet<String> = HashSet::new();

    while let Some(row) = rows.next()? {
        columns.insert(row.get("name")?);
    }

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in required_columns {
        if !columns.contains(column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}
