use log::info;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::models::asset::SEED_ASSETS;
use crate::models::page::Page;
use crate::models::site_config;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Seeded administrator account. The password must be changed after first login.
pub const ADMIN_EMAIL: &str = "admin@hamour.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_DISPLAY_NAME: &str = "القبطان الأعلى";

pub fn init_pool_at(path: &str) -> Result<DbPool, String> {
    let manager = SqliteConnectionManager::file(path);
    let pool = Pool::builder()
        .max_size(10)
        .build(manager)
        .map_err(|e| e.to_string())?;

    // WAL for concurrent readers; foreign keys so sessions follow their user
    let conn = pool.get().map_err(|e| e.to_string())?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .map_err(|e| e.to_string())?;

    Ok(pool)
}

/// Named shared-cache in-memory database, so every pooled connection sees the same data.
pub fn init_memory_pool(name: &str) -> Result<DbPool, String> {
    let uri = format!("file:{}?mode=memory&cache=shared", name);
    let manager = SqliteConnectionManager::file(uri);
    let pool = Pool::builder()
        .max_size(2)
        .build(manager)
        .map_err(|e| e.to_string())?;
    let conn = pool.get().map_err(|e| e.to_string())?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")
        .map_err(|e| e.to_string())?;
    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;

    conn.execute_batch(
        "
        -- Settings (key-value, holds the site configuration)
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT
        );

        -- Accounts
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            display_name TEXT NOT NULL DEFAULT '',
            nickname TEXT NOT NULL DEFAULT '',
            role TEXT NOT NULL DEFAULT 'user',
            status TEXT NOT NULL DEFAULT 'active',
            avatar TEXT NOT NULL DEFAULT '',
            coins INTEGER NOT NULL DEFAULT 0,
            last_login_at DATETIME,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Login sessions
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            created_at DATETIME NOT NULL,
            expires_at DATETIME NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);

        -- Pages: routing columns next to the whole page document
        CREATE TABLE IF NOT EXISTS pages (
            id TEXT PRIMARY KEY,
            slug TEXT UNIQUE NOT NULL,
            label TEXT NOT NULL,
            is_hidden INTEGER NOT NULL DEFAULT 0,
            position INTEGER NOT NULL DEFAULT 0,
            document TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Media library
        CREATE TABLE IF NOT EXISTS assets (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            url TEXT NOT NULL,
            kind TEXT NOT NULL DEFAULT 'image',
            category TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Sponsor banners
        CREATE TABLE IF NOT EXISTS ads (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            image TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        ",
    )?;

    Ok(())
}

pub fn seed_defaults(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    seed_defaults_with_cost(pool, bcrypt::DEFAULT_COST)
}

/// Seed settings, the home page, the media library and the admin account.
/// Existing rows are left alone.
pub fn seed_defaults_with_cost(
    pool: &DbPool,
    bcrypt_cost: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;

    for (key, value) in site_config::DEFAULTS
        .iter()
        .chain([("session_expiry_hours", "24")].iter())
    {
        conn.execute(
            "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    }

    // Home page if no pages exist yet
    let page_count: i64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
    if page_count == 0 {
        let home = Page::seed_home();
        conn.execute(
            "INSERT INTO pages (id, slug, label, is_hidden, position, document)
             VALUES (?1, ?2, ?3, 0, 0, ?4)",
            params![home.id, home.slug, home.label, home.to_document()?],
        )?;
        info!("Seeded home page");
    }

    // Starter media library, only into an empty one
    let asset_count: i64 = conn.query_row("SELECT COUNT(*) FROM assets", [], |row| row.get(0))?;
    if asset_count == 0 {
        for (id, name, kind, url) in SEED_ASSETS {
            conn.execute(
                "INSERT INTO assets (id, name, url, kind) VALUES (?1, ?2, ?3, ?4)",
                params![id, name, url, kind.as_str()],
            )?;
        }
    }

    // Administrator account
    let admin_exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE email = ?1",
        params![ADMIN_EMAIL],
        |row| row.get(0),
    )?;
    if admin_exists == 0 {
        let hash = bcrypt::hash(ADMIN_PASSWORD, bcrypt_cost)?;
        let avatar = format!(
            "https://ui-avatars.com/api/?name={}&background=fbbf24&color=000",
            ADMIN_USERNAME
        );
        conn.execute(
            "INSERT INTO users (username, email, password_hash, display_name, role, status, avatar, coins)
             VALUES (?1, ?2, ?3, ?4, 'admin', 'active', ?5, 0)",
            params![ADMIN_USERNAME, ADMIN_EMAIL, hash, ADMIN_DISPLAY_NAME, avatar],
        )?;
        info!("Seeded administrator account {}", ADMIN_EMAIL);
    }

    Ok(())
}
