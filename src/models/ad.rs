use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::db::DbPool;

/// A sponsor banner shown on public pages while active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdItem {
    pub id: String,
    pub title: String,
    pub image: String,
    pub link: String,
    pub is_active: bool,
}

impl AdItem {
    pub fn new(title: &str, image: &str, link: &str) -> AdItem {
        AdItem {
            id: format!("ad_{}", uuid::Uuid::new_v4().simple()),
            title: title.to_string(),
            image: image.to_string(),
            link: link.to_string(),
            is_active: true,
        }
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(AdItem {
            id: row.get(0)?,
            title: row.get(1)?,
            image: row.get(2)?,
            link: row.get(3)?,
            is_active: row.get::<_, i64>(4)? != 0,
        })
    }

    const SELECT_COLS: &'static str = "id, title, image, link, is_active";

    fn query(pool: &DbPool, filter: &str) -> Vec<AdItem> {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return vec![],
        };
        let mut stmt = match conn.prepare(&format!(
            "SELECT {} FROM ads {} ORDER BY created_at, rowid",
            Self::SELECT_COLS,
            filter
        )) {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        stmt.query_map([], Self::from_row)
            .map(|rows| rows.filter_map(|r| r.ok()).collect())
            .unwrap_or_default()
    }

    pub fn list_all(pool: &DbPool) -> Vec<AdItem> {
        Self::query(pool, "")
    }

    pub fn list_active(pool: &DbPool) -> Vec<AdItem> {
        Self::query(pool, "WHERE is_active = 1")
    }

    pub fn find_by_id(pool: &DbPool, id: &str) -> Option<AdItem> {
        let conn = pool.get().ok()?;
        conn.query_row(
            &format!("SELECT {} FROM ads WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )
        .ok()
    }

    /// Insert, or replace the ad with the same id.
    pub fn save(pool: &DbPool, ad: &AdItem) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO ads (id, title, image, link, is_active) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                image = excluded.image,
                link = excluded.link,
                is_active = excluded.is_active",
            params![ad.id, ad.title, ad.image, ad.link, ad.is_active as i32],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn delete(pool: &DbPool, id: &str) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM ads WHERE id = ?1", params![id])
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
