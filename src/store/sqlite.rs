use std::collections::HashMap;

use rusqlite::params;

use crate::db::DbPool;
use crate::models::ad::AdItem;
use crate::models::asset::Asset;
use crate::models::page::Page;
use crate::models::settings::Setting;
use crate::models::user::{NewUser, User, UserStatus};

use super::Store;

/// SQLite-backed implementation of the Store trait.
/// Wraps the r2d2 connection pool and delegates to model methods.
pub struct SqliteStore {
    pub pool: DbPool,
    bcrypt_cost: u32,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn new_at(path: &str) -> Result<Self, String> {
        let pool = crate::db::init_pool_at(path)?;
        Ok(Self::new(pool))
    }

    pub fn new_in_memory(name: &str) -> Result<Self, String> {
        let pool = crate::db::init_memory_pool(name)?;
        Ok(Self::new(pool))
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl Store for SqliteStore {
    // ── Lifecycle ───────────────────────────────────────────────────

    fn run_migrations(&self) -> Result<(), String> {
        crate::db::run_migrations(&self.pool).map_err(|e| e.to_string())
    }

    fn seed_defaults(&self) -> Result<(), String> {
        crate::db::seed_defaults_with_cost(&self.pool, self.bcrypt_cost).map_err(|e| e.to_string())
    }

    fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    // ── Settings ────────────────────────────────────────────────────

    fn setting_get(&self, key: &str) -> Option<String> {
        Setting::get(&self.pool, key)
    }

    fn setting_set(&self, key: &str, value: &str) -> Result<(), String> {
        Setting::set(&self.pool, key, value)
    }

    fn setting_set_many(&self, settings: &HashMap<String, String>) -> Result<(), String> {
        Setting::set_many(&self.pool, settings)
    }

    fn setting_all(&self) -> HashMap<String, String> {
        Setting::all(&self.pool)
    }

    // ── Pages ───────────────────────────────────────────────────────

    fn page_list_all(&self) -> Vec<Page> {
        Page::list_all(&self.pool)
    }

    fn page_find_by_id(&self, id: &str) -> Option<Page> {
        Page::find_by_id(&self.pool, id)
    }

    fn page_find_by_slug(&self, slug: &str) -> Option<Page> {
        Page::find_by_slug(&self.pool, slug)
    }

    fn page_save(&self, page: &Page) -> Result<Page, String> {
        Page::save(&self.pool, page)
    }

    fn page_delete(&self, id: &str) -> Result<(), String> {
        Page::delete(&self.pool, id)
    }

    fn page_count(&self) -> i64 {
        Page::count(&self.pool)
    }

    // ── Media library ───────────────────────────────────────────────

    fn asset_list_all(&self) -> Vec<Asset> {
        Asset::list_all(&self.pool)
    }

    fn asset_find_by_id(&self, id: &str) -> Option<Asset> {
        Asset::find_by_id(&self.pool, id)
    }

    fn asset_save(&self, asset: &Asset) -> Result<(), String> {
        Asset::save(&self.pool, asset)
    }

    fn asset_delete(&self, id: &str) -> Result<(), String> {
        Asset::delete(&self.pool, id)
    }

    // ── Ads ─────────────────────────────────────────────────────────

    fn ad_list_all(&self) -> Vec<AdItem> {
        AdItem::list_all(&self.pool)
    }

    fn ad_list_active(&self) -> Vec<AdItem> {
        AdItem::list_active(&self.pool)
    }

    fn ad_find_by_id(&self, id: &str) -> Option<AdItem> {
        AdItem::find_by_id(&self.pool, id)
    }

    fn ad_save(&self, ad: &AdItem) -> Result<(), String> {
        AdItem::save(&self.pool, ad)
    }

    fn ad_delete(&self, id: &str) -> Result<(), String> {
        AdItem::delete(&self.pool, id)
    }

    // ── Users ───────────────────────────────────────────────────────

    fn user_get_by_id(&self, id: i64) -> Option<User> {
        User::get_by_id(&self.pool, id)
    }

    fn user_get_by_email(&self, email: &str) -> Option<User> {
        User::get_by_email(&self.pool, email)
    }

    fn user_list_all(&self) -> Vec<User> {
        User::list_all(&self.pool)
    }

    fn user_count(&self) -> i64 {
        User::count(&self.pool)
    }

    fn user_create(&self, new: &NewUser) -> Result<i64, String> {
        User::create(&self.pool, new)
    }

    fn user_update_profile(
        &self,
        id: i64,
        display_name: &str,
        nickname: &str,
    ) -> Result<(), String> {
        User::update_profile(&self.pool, id, display_name, nickname)
    }

    fn user_update_status(&self, id: i64, status: UserStatus) -> Result<(), String> {
        User::update_status(&self.pool, id, status)
    }

    fn user_touch_last_login(&self, id: i64) -> Result<(), String> {
        User::touch_last_login(&self.pool, id)
    }

    // ── Sessions ────────────────────────────────────────────────────

    fn session_create(&self, user_id: i64, token: &str, expires_at: &str) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES (?1, ?2, datetime('now'), ?3)",
            params![token, user_id, expires_at],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn session_get_user_id(&self, token: &str) -> Option<i64> {
        let conn = self.pool.get().ok()?;
        conn.query_row(
            "SELECT user_id FROM sessions WHERE id = ?1 AND expires_at > datetime('now')",
            params![token],
            |row| row.get(0),
        )
        .ok()
    }

    fn session_delete(&self, token: &str) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM sessions WHERE id = ?1", params![token])
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn session_delete_for_user(&self, user_id: i64) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM sessions WHERE user_id = ?1", params![user_id])
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
