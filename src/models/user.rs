use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::db::DbPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Moderator,
    Editor,
    Support,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Moderator => "moderator",
            UserRole::Editor => "editor",
            UserRole::Support => "support",
            UserRole::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "admin" => Some(UserRole::Admin),
            "moderator" => Some(UserRole::Moderator),
            "editor" => Some(UserRole::Editor),
            "support" => Some(UserRole::Support),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }

    /// Every role except plain `user` may open the admin console.
    pub fn is_staff(&self) -> bool {
        !matches!(self, UserRole::User)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Banned,
    Pending,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Banned => "banned",
            UserStatus::Pending => "pending",
            UserStatus::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<UserStatus> {
        match s {
            "active" => Some(UserStatus::Active),
            "banned" => Some(UserStatus::Banned),
            "pending" => Some(UserStatus::Pending),
            "suspended" => Some(UserStatus::Suspended),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub nickname: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub avatar: String,
    pub coins: i64,
    pub last_login_at: Option<String>,
    pub created_at: String,
}

/// Fields for a new account row.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: &'a str,
    pub role: UserRole,
    pub avatar: &'a str,
}

impl User {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        let role: String = row.get(6)?;
        let status: String = row.get(7)?;
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            display_name: row.get(4)?,
            nickname: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            role: UserRole::parse(&role).unwrap_or_default(),
            // Unknown statuses never grant access
            status: UserStatus::parse(&status).unwrap_or(UserStatus::Suspended),
            avatar: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            coins: row.get(9)?,
            last_login_at: row.get(10)?,
            created_at: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
        })
    }

    const SELECT_COLS: &'static str =
        "id, username, email, password_hash, display_name, nickname, role, status, avatar, coins, last_login_at, created_at";

    // ── Lookups ──

    pub fn get_by_id(pool: &DbPool, id: i64) -> Option<User> {
        let conn = pool.get().ok()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )
        .ok()
    }

    pub fn get_by_email(pool: &DbPool, email: &str) -> Option<User> {
        let conn = pool.get().ok()?;
        conn.query_row(
            &format!(
                "SELECT {} FROM users WHERE email = ?1 COLLATE NOCASE",
                Self::SELECT_COLS
            ),
            params![email],
            Self::from_row,
        )
        .ok()
    }

    pub fn list_all(pool: &DbPool) -> Vec<User> {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return vec![],
        };
        let mut stmt = match conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY id ASC",
            Self::SELECT_COLS
        )) {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        stmt.query_map([], Self::from_row)
            .map(|rows| rows.filter_map(|r| r.ok()).collect())
            .unwrap_or_default()
    }

    pub fn count(pool: &DbPool) -> i64 {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap_or(0)
    }

    // ── Create ──

    pub fn create(pool: &DbPool, new: &NewUser) -> Result<i64, String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO users (username, email, password_hash, display_name, role, status, avatar)
             VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6)",
            params![
                new.username,
                new.email,
                new.password_hash,
                new.display_name,
                new.role.as_str(),
                new.avatar
            ],
        )
        .map_err(|e| e.to_string())?;
        Ok(conn.last_insert_rowid())
    }

    // ── Update ──

    pub fn update_profile(
        pool: &DbPool,
        id: i64,
        display_name: &str,
        nickname: &str,
    ) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "UPDATE users SET display_name = ?1, nickname = ?2, updated_at = CURRENT_TIMESTAMP WHERE id = ?3",
            params![display_name, nickname, id],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Change an account's status. Sessions are left to the caller.
    pub fn update_status(pool: &DbPool, id: i64, status: UserStatus) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "UPDATE users SET status = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
            params![status.as_str(), id],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn touch_last_login(pool: &DbPool, id: i64) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "UPDATE users SET last_login_at = CURRENT_TIMESTAMP WHERE id = ?1",
            params![id],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    // ── Helpers ──

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Return a safe version without password_hash for exports and dashboards
    pub fn safe_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
            "displayName": self.display_name,
            "nickname": self.nickname,
            "role": self.role,
            "status": self.status,
            "avatar": self.avatar,
            "coins": self.coins,
            "lastLoginAt": self.last_login_at,
            "createdAt": self.created_at,
        })
    }
}
