use std::path::{Path, PathBuf};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use tempfile::TempDir;

const SCHEMA: &str = "
    CREATE TABLE users (
        user_id INTEGER PRIMARY KEY,
        username TEXT,
        first_seen TEXT NOT NULL
    );
    CREATE TABLE logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        command TEXT NOT NULL
    );
    CREATE TABLE feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        message TEXT NOT NULL
    );
    CREATE TABLE blocked_users (user_id INTEGER PRIMARY KEY, reason TEXT);
    CREATE TABLE blocklist (id INTEGER PRIMARY KEY, pattern TEXT NOT NULL);
    CREATE TABLE message_templates (name TEXT PRIMARY KEY, body TEXT NOT NULL);
    CREATE TABLE configuration (config_key TEXT PRIMARY KEY, config_value TEXT NOT NULL);
";

const SEED: &str = "
    INSERT INTO users VALUES
        (101, 'alice', '2024-01-02'),
        (102, 'bob', '2024-01-03'),
        (103, 'carol', '2024-02-11');
    INSERT INTO logs (user_id, command) VALUES
        (101, '/start'), (102, '/start'), (102, '/vpn'), (103, '/help');
    INSERT INTO feedback (user_id, message) VALUES (101, 'works great'), (103, 'slow at night');
    INSERT INTO blocked_users VALUES (666, 'spam');
    INSERT INTO blocklist (pattern) VALUES ('casino'), ('free money');
    INSERT INTO message_templates VALUES ('welcome', 'Hello!'), ('bye', 'See you');
    INSERT INTO configuration VALUES
        ('bot_token', '123456:ABC-secret'),
        ('scripts_dir', '/opt/phobos/scripts'),
        ('clients_dir', '/opt/phobos/clients'),
        ('admin_id', '42');
";

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct Setting {
    #[diesel(sql_type = Text)]
    config_key: String,
    #[diesel(sql_type = Text)]
    config_value: String,
}

/// A seeded phobos bot database inside its own temporary directory.
pub struct BotDb {
    dir: TempDir,
    path: PathBuf,
}

impl BotDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("phobos-bot.db");
        let db = Self { dir, path };
        db.execute(SCHEMA);
        db.execute(SEED);
        db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.dir.path().join("backups")
    }

    pub fn connect(&self) -> SqliteConnection {
        SqliteConnection::establish(self.path.to_str().expect("utf-8 path"))
            .expect("open sqlite database")
    }

    pub fn execute(&self, sql: &str) {
        self.connect().batch_execute(sql).expect("execute sql");
    }

    pub fn count(&self, table: &str) -> i64 {
        diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {table}"))
            .get_result::<Count>(&mut self.connect())
            .expect("count rows")
            .count
    }

    pub fn sequence_rows(&self) -> i64 {
        self.count("sqlite_sequence")
    }

    pub fn settings(&self) -> Vec<(String, String)> {
        diesel::sql_query("SELECT config_key, config_value FROM configuration ORDER BY config_key")
            .load::<Setting>(&mut self.connect())
            .expect("load configuration")
            .into_iter()
            .map(|s| (s.config_key, s.config_value))
            .collect()
    }

    pub fn bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("read database file")
    }

    /// Make every delete on `table` fail inside the cleanup transaction.
    pub fn refuse_deletes_on(&self, table: &str) {
        self.execute(&format!(
            "CREATE TRIGGER refuse_{table} BEFORE DELETE ON {table}
             BEGIN SELECT RAISE(ABORT, 'forced failure'); END;"
        ));
    }

    /// Copy of this database as a killed bot leaves it: WAL mode, with one
    /// extra committed user that exists only in the `-wal` file.
    pub fn crashed_copy_with_pending_user(&self) -> BotDb {
        let mut writer = self.connect();
        writer
            .batch_execute(
                "PRAGMA journal_mode=WAL;
                 PRAGMA wal_autocheckpoint=0;
                 INSERT INTO users VALUES (104, 'dave', '2024-03-01');",
            )
            .expect("write through the wal");

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("phobos-bot.db");
        std::fs::copy(&self.path, &path).expect("copy main file");
        std::fs::copy(wal_path(&self.path), wal_path(&path)).expect("copy wal file");
        drop(writer);

        Self { dir, path }
    }

    /// Backup files currently in the backup directory.
    pub fn backups(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(self.backup_dir()) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
        files.sort();
        files
    }
}

fn wal_path(database: &Path) -> PathBuf {
    let mut name = database.as_os_str().to_owned();
    name.push("-wal");
    PathBuf::from(name)
}
