#![allow(dead_code)]

use chrono::{DateTime, Utc};
use client_registry::db::{DbPool, establish_connection_pool};
use client_registry::domain::client::NewClient;
use client_registry::repository::{ClientWriter, DieselRepository};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite database file in a temporary directory, removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("establish pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

pub fn instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

/// Twelve clients: one named "Jose", five earning at least 4000.0 (one of them
/// exactly 4000.0) and one born after 2020-07-12T20:50:00Z.
pub const SEED: [(&str, &str, f64, &str); 12] = [
    ("Conceição Evaristo", "10619244881", 1500.0, "2020-07-13T20:50:00Z"),
    ("Lázaro Ramos", "10619244882", 2500.0, "1996-12-23T07:00:00Z"),
    ("Clarice Lispector", "10919444522", 3800.0, "1960-04-13T07:50:00Z"),
    ("Carolina Maria de Jesus", "10419244771", 7500.0, "1996-12-23T07:00:00Z"),
    ("Gilberto Gil", "10419344882", 2500.0, "1949-05-05T07:00:00Z"),
    ("Djamila Ribeiro", "10619244884", 4500.0, "1975-11-10T07:00:00Z"),
    ("Jakeliny Gracielly", "10619244885", 3999.99, "1995-12-23T07:00:00Z"),
    ("Jose Saramago", "10239254871", 5000.0, "1996-12-23T07:00:00Z"),
    ("Toni Morrison", "10219344681", 10000.0, "1940-02-23T07:00:00Z"),
    ("Chimamanda Adichie", "10114274861", 1500.0, "1956-09-23T07:00:00Z"),
    ("Silvio Almeida", "10164334861", 4000.0, "1976-07-23T07:00:00Z"),
    ("Sueli Carneiro", "10164334862", 3000.0, "1950-06-24T07:00:00Z"),
];

/// Inserts [`SEED`] in order, so ids run from 1 to 12.
pub fn seeded(filename: &str) -> TestDb {
    let test_db = TestDb::new(filename);
    let repo = test_db.repository();
    for (name, cpf, income, birth_date) in SEED {
        repo.create_client(&NewClient::new(
            name.into(),
            cpf.into(),
            instant(birth_date),
            income,
        ))
        .expect("seed client");
    }
    test_db
}
