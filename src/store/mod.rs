use std::collections::HashMap;

use crate::models::ad::AdItem;
use crate::models::asset::Asset;
use crate::models::page::Page;
use crate::models::site_config::{SiteConfig, ThemeColors};
use crate::models::user::{NewUser, User, UserStatus};

pub mod sqlite;

/// Unified data-access trait. Every persistence call goes through here.
/// Implementation: `SqliteStore` (wraps rusqlite/r2d2).
pub trait Store: Send + Sync {
    // ── Lifecycle ───────────────────────────────────────────────────
    fn run_migrations(&self) -> Result<(), String>;
    fn seed_defaults(&self) -> Result<(), String>;
    /// bcrypt work factor for new password hashes.
    fn bcrypt_cost(&self) -> u32 {
        bcrypt::DEFAULT_COST
    }

    // ── Settings ────────────────────────────────────────────────────
    fn setting_get(&self, key: &str) -> Option<String>;
    fn setting_get_or(&self, key: &str, default: &str) -> String {
        self.setting_get(key).unwrap_or_else(|| default.to_string())
    }
    fn setting_get_bool(&self, key: &str) -> bool {
        self.setting_get(key)
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
    }
    fn setting_get_i64(&self, key: &str) -> i64 {
        self.setting_get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
    fn setting_set(&self, key: &str, value: &str) -> Result<(), String>;
    fn setting_set_many(&self, settings: &HashMap<String, String>) -> Result<(), String>;
    fn setting_all(&self) -> HashMap<String, String>;

    // ── Site configuration ──────────────────────────────────────────
    fn site_config(&self) -> SiteConfig {
        SiteConfig::from_settings(&self.setting_all())
    }
    /// Apply a partial update. Unknown keys reject the whole update.
    fn site_config_update(&self, partial: &HashMap<String, String>) -> Result<SiteConfig, String> {
        let mut unknown: Vec<&str> = partial
            .keys()
            .map(String::as_str)
            .filter(|k| !SiteConfig::is_known_key(k))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(format!("Unknown configuration keys: {}", unknown.join(", ")));
        }
        self.setting_set_many(partial)?;
        Ok(self.site_config())
    }
    fn theme_colors(&self) -> ThemeColors {
        self.site_config().theme_colors()
    }

    // ── Pages ───────────────────────────────────────────────────────
    fn page_list_all(&self) -> Vec<Page>;
    /// Pages offered to visitors: hidden ones are left out.
    fn page_list_public(&self) -> Vec<Page> {
        self.page_list_all()
            .into_iter()
            .filter(|p| !p.is_hidden)
            .collect()
    }
    fn page_find_by_id(&self, id: &str) -> Option<Page>;
    /// Exact slug lookup. Hidden pages are returned too: hiding is not access control.
    fn page_find_by_slug(&self, slug: &str) -> Option<Page>;
    fn page_save(&self, page: &Page) -> Result<Page, String>;
    fn page_delete(&self, id: &str) -> Result<(), String>;
    fn page_count(&self) -> i64;

    // ── Media library ───────────────────────────────────────────────
    fn asset_list_all(&self) -> Vec<Asset>;
    fn asset_find_by_id(&self, id: &str) -> Option<Asset>;
    fn asset_save(&self, asset: &Asset) -> Result<(), String>;
    fn asset_delete(&self, id: &str) -> Result<(), String>;

    // ── Ads ─────────────────────────────────────────────────────────
    fn ad_list_all(&self) -> Vec<AdItem>;
    fn ad_list_active(&self) -> Vec<AdItem>;
    fn ad_find_by_id(&self, id: &str) -> Option<AdItem>;
    fn ad_save(&self, ad: &AdItem) -> Result<(), String>;
    fn ad_delete(&self, id: &str) -> Result<(), String>;

    // ── Users ───────────────────────────────────────────────────────
    fn user_get_by_id(&self, id: i64) -> Option<User>;
    fn user_get_by_email(&self, email: &str) -> Option<User>;
    fn user_list_all(&self) -> Vec<User>;
    fn user_count(&self) -> i64;
    fn user_create(&self, new: &NewUser) -> Result<i64, String>;
    fn user_update_profile(&self, id: i64, display_name: &str, nickname: &str)
        -> Result<(), String>;
    fn user_update_status(&self, id: i64, status: UserStatus) -> Result<(), String>;
    fn user_touch_last_login(&self, id: i64) -> Result<(), String>;

    // ── Sessions ────────────────────────────────────────────────────
    fn session_create(&self, user_id: i64, token: &str, expires_at: &str) -> Result<(), String>;
    fn session_get_user_id(&self, token: &str) -> Option<i64>;
    fn session_get_user(&self, token: &str) -> Option<User> {
        let uid = self.session_get_user_id(token)?;
        self.user_get_by_id(uid)
    }
    fn session_delete(&self, token: &str) -> Result<(), String>;
    fn session_delete_for_user(&self, user_id: i64) -> Result<(), String>;
}
