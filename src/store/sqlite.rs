use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

use crate::domain::settings::{SettingKey, Settings};
use crate::store::repo::SettingsStore;

pub struct SqliteSettingsStore {
    conn: Connection,
}

impl SqliteSettingsStore {
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn get(&self, key: SettingKey) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare(r#"SELECT value FROM settings WHERE key=?1"#)?;
        let mut rows = stmt.query(params![key.as_str()])?;
        if let Some(r) = rows.next()? {
            Ok(Some(r.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn set(&self, key: SettingKey, value: &str) -> Result<()> {
        key.validate(value)
            .map_err(|e| anyhow!("refusing to store setting: {e}"))?;
        self.conn.execute(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value=excluded.value
            "#,
            params![key.as_str(), value],
        )?;
        Ok(())
    }

    fn seed_defaults(&self) -> Result<usize> {
        let mut written = 0;
        let mut stmt = self
            .conn
            .prepare(r#"INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)"#)?;
        for key in SettingKey::ALL {
            written += stmt.execute(params![key.as_str(), key.default_value()])?;
        }
        if written > 0 {
            log::info!("seeded {written} default setting(s)");
        }
        Ok(written)
    }

    fn load(&self) -> Result<Settings> {
        let mut stmt = self.conn.prepare(r#"SELECT key, value FROM settings"#)?;
        let mut rows = stmt.query([])?;
        let mut pairs: Vec<(String, String)> = Vec::new();
        while let Some(r) = rows.next()? {
            pairs.push((r.get(0)?, r.get(1)?));
        }
        Ok(Settings::from_pairs(
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ))
    }
}
