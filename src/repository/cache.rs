use std::path::Path;
use std::sync::{Mutex, MutexGuard};

#[cfg(test)]
use mockall::automock;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::repository::error::CacheError;

/// Trait for storing and retrieving fetched version lists
#[cfg_attr(test, automock)]
pub trait VersionStorer: Send + Sync + 'static {
    /// Versions stored for an artifact, in repository order
    fn get_versions(&self, repository: &str, artifact: &str) -> Result<Vec<String>, CacheError>;

    /// Replace all versions stored for an artifact
    fn replace_versions(
        &self,
        repository: &str,
        artifact: &str,
        versions: Vec<String>,
    ) -> Result<(), CacheError>;

    /// Whether the stored list is younger than the refresh interval
    fn is_fresh(&self, repository: &str, artifact: &str) -> Result<bool, CacheError>;
}

pub struct Cache {
    conn: Mutex<Connection>,
    refresh_interval: i64,
}

impl Cache {
    pub fn new(db_path: &Path, refresh_interval: i64) -> Result<Self, CacheError> {
        info!("Initializing cache database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::with_connection(conn, refresh_interval)
    }

    /// Cache that lives only as long as this value
    pub fn in_memory(refresh_interval: i64) -> Result<Self, CacheError> {
        Self::with_connection(Connection::open_in_memory()?, refresh_interval)
    }

    fn with_connection(conn: Connection, refresh_interval: i64) -> Result<Self, CacheError> {
        debug!("Database connection established");

        let cache = Self {
            conn: Mutex::new(conn),
            refresh_interval,
        };

        cache.create_schema()?;
        info!("Cache initialized successfully");

        Ok(cache)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.conn.lock().map_err(|_| CacheError::LockPoisoned)
    }

    /// Get current timestamp in milliseconds since UNIX epoch
    fn current_timestamp_ms() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }

    fn create_schema(&self) -> Result<(), CacheError> {
        debug!("Creating database schema");

        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS artifacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                repository TEXT NOT NULL,
                artifact TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                UNIQUE(repository, artifact)
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS versions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                artifact_id INTEGER NOT NULL,
                position INTEGER NOT NULL,
                version TEXT NOT NULL,
                FOREIGN KEY (artifact_id) REFERENCES artifacts(id) ON DELETE CASCADE,
                UNIQUE(artifact_id, version)
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_artifact_id ON versions(artifact_id)",
            [],
        )?;

        debug!("Database schema created successfully");
        Ok(())
    }

    /// Drop every cached artifact
    pub fn clear(&self) -> Result<(), CacheError> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM versions", [])?;
        tx.execute("DELETE FROM artifacts", [])?;
        tx.commit()?;

        info!("Cache cleared");
        Ok(())
    }

    #[cfg(test)]
    fn set_updated_at(&self, repository: &str, artifact: &str, updated_at: i64) {
        let conn = self.lock_conn().unwrap();
        conn.execute(
            "UPDATE artifacts SET updated_at = ?1 WHERE repository = ?2 AND artifact = ?3",
            (updated_at, repository, artifact),
        )
        .unwrap();
    }
}

impl VersionStorer for Cache {
    fn get_versions(&self, repository: &str, artifact: &str) -> Result<Vec<String>, CacheError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT v.version FROM versions v
            JOIN artifacts a ON v.artifact_id = a.id
            WHERE a.repository = ?1 AND a.artifact = ?2
            ORDER BY v.position
            "#,
        )?;

        let versions = stmt
            .query_map((repository, artifact), |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(versions)
    }

    fn replace_versions(
        &self,
        repository: &str,
        artifact: &str,
        versions: Vec<String>,
    ) -> Result<(), CacheError> {
        debug!(
            "Saving {} versions for {} from {}",
            versions.len(),
            artifact,
            repository
        );

        let now = Self::current_timestamp_ms();

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        // Insert or update artifact
        tx.execute(
            r#"
            INSERT INTO artifacts (repository, artifact, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(repository, artifact) DO UPDATE SET updated_at = excluded.updated_at
            "#,
            (repository, artifact, now),
        )?;

        let artifact_id: i64 = tx.query_row(
            "SELECT id FROM artifacts WHERE repository = ?1 AND artifact = ?2",
            (repository, artifact),
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM versions WHERE artifact_id = ?1", [artifact_id])?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO versions (artifact_id, position, version) VALUES (?1, ?2, ?3)",
            )?;
            for (position, version) in versions.iter().enumerate() {
                stmt.execute((artifact_id, position as i64, version))?;
            }
        }

        tx.commit()?;

        debug!("Successfully saved versions for {}", artifact);
        Ok(())
    }

    fn is_fresh(&self, repository: &str, artifact: &str) -> Result<bool, CacheError> {
        let threshold = Self::current_timestamp_ms() - self.refresh_interval;

        let conn = self.lock_conn()?;
        let result = conn.query_row(
            "SELECT updated_at FROM artifacts WHERE repository = ?1 AND artifact = ?2",
            (repository, artifact),
            |row| row.get::<_, i64>(0),
        );

        match result {
            Ok(updated_at) => Ok(updated_at >= threshold),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REPO: &str = "https://repo.example.org/maven2";

    fn versions(items: &[&str]) -> Vec<String> {
        items.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn replace_versions_keeps_repository_order() {
        let cache = Cache::in_memory(86_400_000).unwrap();

        cache
            .replace_versions(REPO, "g:a", versions(&["1.10", "1.2", "1.9"]))
            .unwrap();

        assert_eq!(
            cache.get_versions(REPO, "g:a").unwrap(),
            versions(&["1.10", "1.2", "1.9"])
        );
    }

    #[test]
    fn replace_versions_drops_previous_list() {
        let cache = Cache::in_memory(86_400_000).unwrap();

        cache
            .replace_versions(REPO, "g:a", versions(&["1.0", "1.1"]))
            .unwrap();
        cache
            .replace_versions(REPO, "g:a", versions(&["2.0"]))
            .unwrap();

        assert_eq!(cache.get_versions(REPO, "g:a").unwrap(), versions(&["2.0"]));
    }

    #[test]
    fn entries_are_keyed_by_repository() {
        let cache = Cache::in_memory(86_400_000).unwrap();

        cache
            .replace_versions(REPO, "g:a", versions(&["1.0"]))
            .unwrap();

        assert!(cache.get_versions("https://other", "g:a").unwrap().is_empty());
        assert!(!cache.is_fresh("https://other", "g:a").unwrap());
    }

    #[test]
    fn is_fresh_expires_after_refresh_interval() {
        let cache = Cache::in_memory(1_000).unwrap();

        cache
            .replace_versions(REPO, "g:a", versions(&["1.0"]))
            .unwrap();
        assert!(cache.is_fresh(REPO, "g:a").unwrap());

        cache.set_updated_at(REPO, "g:a", 0);
        assert!(!cache.is_fresh(REPO, "g:a").unwrap());
    }

    #[test]
    fn clear_removes_everything() {
        let cache = Cache::in_memory(86_400_000).unwrap();
        cache
            .replace_versions(REPO, "g:a", versions(&["1.0"]))
            .unwrap();

        cache.clear().unwrap();

        assert!(cache.get_versions(REPO, "g:a").unwrap().is_empty());
        assert!(!cache.is_fresh(REPO, "g:a").unwrap());
    }

    #[test]
    fn cache_persists_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let cache = Cache::new(&db_path, 86_400_000).unwrap();
            cache
                .replace_versions(REPO, "g:a", versions(&["1.0", "1.1"]))
                .unwrap();
        }

        let cache = Cache::new(&db_path, 86_400_000).unwrap();
        assert_eq!(
            cache.get_versions(REPO, "g:a").unwrap(),
            versions(&["1.0", "1.1"])
        );
    }
}
