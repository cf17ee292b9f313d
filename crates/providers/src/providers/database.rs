//! Choices queried from a database column

use choiceparam_core::{validation, Error, Result};
use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A provider that lists every value of one column of one table.
///
/// On any failure opening the driver, connecting, or querying, or when the
/// query returns no rows at all, the fallback file is read instead
/// (one value per line, trimmed, blanks skipped). The final list is sorted
/// lexicographically regardless of where it came from. Errors never reach
/// the caller; a build must not fail because its choices could not be
/// queried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseChoiceProvider {
    /// Driver identifier; `sqlite` is the bundled driver
    pub driver: String,
    /// Connection URL; for sqlite, a database file path or `:memory:`
    pub url: String,
    /// Username for drivers that authenticate
    #[serde(default)]
    pub username: String,
    /// Password for drivers that authenticate
    #[serde(default)]
    pub password: String,
    /// Schema or database name to qualify the table with, if any
    #[serde(default)]
    pub database: String,
    /// Table to query
    pub table: String,
    /// Column whose values become choices
    pub column: String,
    /// File read instead when the query fails or yields nothing
    #[serde(default)]
    pub fallback_file: String,
}

impl DatabaseChoiceProvider {
    /// Create a sqlite-backed provider.
    #[must_use]
    pub fn sqlite(
        url: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        fallback_file: impl Into<String>,
    ) -> Self {
        Self {
            driver: "sqlite".to_string(),
            url: url.into(),
            table: String::from(table.into().trim()),
            column: String::from(column.into().trim()),
            fallback_file: String::from(fallback_file.into().trim()),
            ..Self::default()
        }
    }

    /// The current choice list.
    #[must_use]
    pub fn choice_list(&self) -> Vec<String> {
        let mut list = match self.query() {
            Ok(rows) => {
                debug!(rows = rows.len(), table = %self.table, "Queried choice entries");
                rows
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "Database choice query failed");
                Vec::new()
            }
        };
        if list.is_empty() {
            list = self.read_fallback();
        }
        list.sort();
        list
    }

    fn query(&self) -> Result<Vec<String>> {
        match self.driver.trim() {
            "sqlite" => self.query_sqlite(),
            other => Err(Error::configuration(format!(
                "unsupported database driver '{other}'"
            ))),
        }
    }

    fn query_sqlite(&self) -> Result<Vec<String>> {
        if validation::is_blank(&self.table) || validation::is_blank(&self.column) {
            return Err(Error::configuration("table and column are required"));
        }
        let path = self.url.strip_prefix("sqlite:").unwrap_or(&self.url);
        let conn =
            rusqlite::Connection::open(path).map_err(|e| Error::database(e.to_string()))?;

        let table = if validation::is_blank(&self.database) {
            self.table.clone()
        } else {
            format!("{}.{}", self.database, self.table)
        };
        let sql = format!("SELECT {} FROM {table}", self.column);
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| Error::database(e.to_string()))?;
        let mut rows = stmt.query([]).map_err(|e| Error::database(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| Error::database(e.to_string()))? {
            let value = row
                .get_ref(0)
                .map_err(|e| Error::database(e.to_string()))?;
            // A NULL column value stays in the list as an empty string.
            out.push(match value {
                ValueRef::Null => String::new(),
                ValueRef::Integer(i) => i.to_string(),
                ValueRef::Real(f) => f.to_string(),
                ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
            });
        }
        Ok(out)
    }

    fn read_fallback(&self) -> Vec<String> {
        if validation::is_blank(&self.fallback_file) {
            return Vec::new();
        }
        match std::fs::read_to_string(&self.fallback_file) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                warn!(path = %self.fallback_file, error = %e, "Unable to read the fallback file");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_db(tmp: &TempDir) -> String {
        let path = tmp.path().join("choices.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE environments (name TEXT);
             INSERT INTO environments VALUES ('prod'), ('dev'), (NULL), ('staging');",
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn lists_column_values_sorted_with_null_as_empty() {
        let tmp = TempDir::new().unwrap();
        let p = DatabaseChoiceProvider::sqlite(seeded_db(&tmp), "environments", "name", "");
        assert_eq!(p.choice_list(), vec!["", "dev", "prod", "staging"]);
    }

    #[test]
    fn schema_qualifier_is_applied() {
        let tmp = TempDir::new().unwrap();
        let mut p = DatabaseChoiceProvider::sqlite(seeded_db(&tmp), "environments", "name", "");
        p.database = "main".to_string();
        assert_eq!(p.choice_list(), vec!["", "dev", "prod", "staging"]);
    }

    #[test]
    fn empty_result_set_reads_the_fallback_file() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("empty.db");
        rusqlite::Connection::open(&db)
            .unwrap()
            .execute_batch("CREATE TABLE environments (name TEXT);")
            .unwrap();

        let fallback = tmp.path().join("fallback.txt");
        std::fs::write(&fallback, "  prod  \n\ndev\n").unwrap();

        let p = DatabaseChoiceProvider::sqlite(
            db.to_string_lossy(),
            "environments",
            "name",
            fallback.to_string_lossy(),
        );
        // Fallback lines are trimmed, blanks skipped, result sorted.
        assert_eq!(p.choice_list(), vec!["dev", "prod"]);
    }

    #[test]
    fn query_failure_reads_the_fallback_file() {
        let tmp = TempDir::new().unwrap();
        let fallback = tmp.path().join("fallback.txt");
        std::fs::write(&fallback, "b\na\n").unwrap();

        let p = DatabaseChoiceProvider::sqlite(
            tmp.path().join("no-such.db").to_string_lossy(),
            "missing_table",
            "name",
            fallback.to_string_lossy(),
        );
        assert_eq!(p.choice_list(), vec!["a", "b"]);
    }

    #[test]
    fn unknown_driver_reads_the_fallback_file() {
        let tmp = TempDir::new().unwrap();
        let fallback = tmp.path().join("fallback.txt");
        std::fs::write(&fallback, "only\n").unwrap();

        let mut p =
            DatabaseChoiceProvider::sqlite("ignored", "t", "c", fallback.to_string_lossy());
        p.driver = "oracle".to_string();
        assert_eq!(p.choice_list(), vec!["only"]);
    }

    #[test]
    fn nothing_anywhere_is_an_empty_list() {
        let p = DatabaseChoiceProvider::sqlite("/nonexistent/x.db", "t", "c", "");
        assert!(p.choice_list().is_empty());
    }

    #[test]
    fn sqlite_url_prefix_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = seeded_db(&tmp);
        let p = DatabaseChoiceProvider::sqlite(format!("sqlite:{path}"), "environments", "name", "");
        assert_eq!(p.choice_list(), vec!["", "dev", "prod", "staging"]);
    }
}
