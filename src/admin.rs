use std::collections::HashMap;

use chrono::Utc;
use log::info;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::{require_admin, require_staff, AuthError};
use crate::models::ad::AdItem;
use crate::models::asset::Asset;
use crate::models::site_config::SiteConfig;
use crate::models::user::{User, UserStatus};
use crate::store::Store;

/// Headline numbers for the console dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_users: usize,
    pub active_users: usize,
    pub banned_users: usize,
    pub staff_users: usize,
    pub total_pages: usize,
    pub hidden_pages: usize,
}

pub fn list_users(store: &dyn Store, actor: &User) -> Result<Vec<User>, AuthError> {
    require_staff(Some(actor))?;
    Ok(store.user_list_all())
}

/// Set another account's status. Admins only, and never on their own account.
pub fn update_user_status(
    store: &dyn Store,
    actor: &User,
    user_id: i64,
    status: UserStatus,
) -> Result<User, AuthError> {
    require_admin(Some(actor))?;
    if actor.id == user_id {
        return Err(AuthError::Validation(
            "You cannot change the status of your own account".into(),
        ));
    }
    if store.user_get_by_id(user_id).is_none() {
        return Err(AuthError::Validation(format!("No user with id {}", user_id)));
    }
    store.user_update_status(user_id, status)?;
    if status != UserStatus::Active {
        store.session_delete_for_user(user_id)?;
    }
    info!(
        "{} set user {} to {}",
        actor.email,
        user_id,
        status.as_str()
    );
    store
        .user_get_by_id(user_id)
        .ok_or_else(|| AuthError::Store(format!("user {} vanished after update", user_id)))
}

/// Flip between `active` and `banned`. Any non-active status becomes `active`.
pub fn toggle_user_ban(store: &dyn Store, actor: &User, user_id: i64) -> Result<User, AuthError> {
    require_admin(Some(actor))?;
    let target = store
        .user_get_by_id(user_id)
        .ok_or_else(|| AuthError::Validation(format!("No user with id {}", user_id)))?;
    let next = if target.status == UserStatus::Active {
        UserStatus::Banned
    } else {
        UserStatus::Active
    };
    update_user_status(store, actor, user_id, next)
}

pub fn overview(store: &dyn Store, actor: &User) -> Result<Overview, AuthError> {
    require_staff(Some(actor))?;
    let users = store.user_list_all();
    let pages = store.page_list_all();
    Ok(Overview {
        total_users: users.len(),
        active_users: users.iter().filter(|u| u.is_active()).count(),
        banned_users: users
            .iter()
            .filter(|u| u.status == UserStatus::Banned)
            .count(),
        staff_users: users.iter().filter(|u| u.is_staff()).count(),
        total_pages: pages.len(),
        hidden_pages: pages.iter().filter(|p| p.is_hidden).count(),
    })
}

pub fn update_site_config(
    store: &dyn Store,
    actor: &User,
    partial: &HashMap<String, String>,
) -> Result<SiteConfig, AuthError> {
    require_admin(Some(actor))?;
    let config = store.site_config_update(partial).map_err(|e| {
        if partial.keys().all(|k| SiteConfig::is_known_key(k)) {
            AuthError::Store(e)
        } else {
            AuthError::Validation(e)
        }
    })?;
    info!("{} updated {} configuration key(s)", actor.email, partial.len());
    Ok(config)
}

/// Remove a page for good. The home page can be deleted like any other.
pub fn delete_page(store: &dyn Store, actor: &User, page_id: &str) -> Result<(), AuthError> {
    require_admin(Some(actor))?;
    let page = store
        .page_find_by_id(page_id)
        .ok_or_else(|| AuthError::Validation(format!("No page with id {}", page_id)))?;
    store.page_delete(page_id)?;
    info!("{} deleted page {} ({})", actor.email, page.id, page.slug);
    Ok(())
}

// ── Media library ───────────────────────────────────────

pub fn list_assets(store: &dyn Store, actor: &User) -> Result<Vec<Asset>, AuthError> {
    require_staff(Some(actor))?;
    Ok(store.asset_list_all())
}

/// Insert or replace a library entry. Name and URL are required.
pub fn save_asset(store: &dyn Store, actor: &User, asset: &Asset) -> Result<Asset, AuthError> {
    require_staff(Some(actor))?;
    if asset.name.trim().is_empty() || asset.url.trim().is_empty() {
        return Err(AuthError::Validation(
            "An asset needs both a name and a URL".into(),
        ));
    }
    store.asset_save(asset)?;
    info!("{} saved asset {}", actor.email, asset.id);
    store
        .asset_find_by_id(&asset.id)
        .ok_or_else(|| AuthError::Store(format!("asset {} vanished after save", asset.id)))
}

pub fn delete_asset(store: &dyn Store, actor: &User, asset_id: &str) -> Result<(), AuthError> {
    require_staff(Some(actor))?;
    if store.asset_find_by_id(asset_id).is_none() {
        return Err(AuthError::Validation(format!("No asset with id {}", asset_id)));
    }
    store.asset_delete(asset_id)?;
    info!("{} deleted asset {}", actor.email, asset_id);
    Ok(())
}

// ── Ads ─────────────────────────────────────────────────

pub fn list_ads(store: &dyn Store, actor: &User) -> Result<Vec<AdItem>, AuthError> {
    require_admin(Some(actor))?;
    Ok(store.ad_list_all())
}

/// Insert or replace an ad. Title and link are required.
pub fn save_ad(store: &dyn Store, actor: &User, ad: &AdItem) -> Result<AdItem, AuthError> {
    require_admin(Some(actor))?;
    if ad.title.trim().is_empty() || ad.link.trim().is_empty() {
        return Err(AuthError::Validation("An ad needs both a title and a link".into()));
    }
    store.ad_save(ad)?;
    info!("{} saved ad {}", actor.email, ad.id);
    store
        .ad_find_by_id(&ad.id)
        .ok_or_else(|| AuthError::Store(format!("ad {} vanished after save", ad.id)))
}

/// Flip an ad between shown and hidden.
pub fn toggle_ad(store: &dyn Store, actor: &User, ad_id: &str) -> Result<AdItem, AuthError> {
    require_admin(Some(actor))?;
    let mut ad = store
        .ad_find_by_id(ad_id)
        .ok_or_else(|| AuthError::Validation(format!("No ad with id {}", ad_id)))?;
    ad.is_active = !ad.is_active;
    save_ad(store, actor, &ad)
}

pub fn delete_ad(store: &dyn Store, actor: &User, ad_id: &str) -> Result<(), AuthError> {
    require_admin(Some(actor))?;
    if store.ad_find_by_id(ad_id).is_none() {
        return Err(AuthError::Validation(format!("No ad with id {}", ad_id)));
    }
    store.ad_delete(ad_id)?;
    info!("{} deleted ad {}", actor.email, ad_id);
    Ok(())
}

/// Full backup of configuration, pages, the media library and accounts.
/// Password hashes are left out.
pub fn export_data(store: &dyn Store, actor: &User) -> Result<Value, AuthError> {
    require_admin(Some(actor))?;
    let users: Vec<Value> = store.user_list_all().iter().map(User::safe_json).collect();
    let pages = serde_json::to_value(store.page_list_all())
        .map_err(|e| AuthError::Store(e.to_string()))?;
    let assets = serde_json::to_value(store.asset_list_all())
        .map_err(|e| AuthError::Store(e.to_string()))?;
    let config = serde_json::to_value(store.site_config())
        .map_err(|e| AuthError::Store(e.to_string()))?;
    Ok(json!({
        "config": config,
        "pages": pages,
        "assets": assets,
        "users": users,
        "exportedAt": Utc::now().to_rfc3339(),
    }))
}
