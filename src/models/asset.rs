use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::db::DbPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Icon,
    Background,
    #[default]
    Image,
    Gradient,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Icon => "icon",
            AssetKind::Background => "background",
            AssetKind::Image => "image",
            AssetKind::Gradient => "gradient",
        }
    }

    pub fn parse(s: &str) -> Option<AssetKind> {
        match s {
            "icon" => Some(AssetKind::Icon),
            "background" => Some(AssetKind::Background),
            "image" => Some(AssetKind::Image),
            "gradient" => Some(AssetKind::Gradient),
            _ => None,
        }
    }
}

/// A reusable media entry for the editor: an image URL or a CSS gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Library entries every fresh site starts with.
pub const SEED_ASSETS: &[(&str, &str, AssetKind, &str)] = &[
    (
        "ast_1",
        "Royal Gold Gradient",
        AssetKind::Gradient,
        "linear-gradient(135deg, #fbbf24 0%, #f97316 100%)",
    ),
    (
        "ast_2",
        "Deep Sea Background",
        AssetKind::Image,
        "https://images.unsplash.com/photo-1518837695005-2083093ee35b?q=80&w=2070",
    ),
];

impl Asset {
    pub fn new(name: &str, url: &str, kind: AssetKind) -> Asset {
        Asset {
            id: format!("ast_{}", uuid::Uuid::new_v4().simple()),
            name: name.to_string(),
            url: url.to_string(),
            kind,
            category: None,
        }
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        let kind: String = row.get(3)?;
        Ok(Asset {
            id: row.get(0)?,
            name: row.get(1)?,
            url: row.get(2)?,
            kind: AssetKind::parse(&kind).unwrap_or_default(),
            category: row.get(4)?,
        })
    }

    const SELECT_COLS: &'static str = "id, name, url, kind, category";

    pub fn list_all(pool: &DbPool) -> Vec<Asset> {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return vec![],
        };
        let mut stmt = match conn.prepare(&format!(
            "SELECT {} FROM assets ORDER BY created_at, rowid",
            Self::SELECT_COLS
        )) {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        stmt.query_map([], Self::from_row)
            .map(|rows| rows.filter_map(|r| r.ok()).collect())
            .unwrap_or_default()
    }

    pub fn find_by_id(pool: &DbPool, id: &str) -> Option<Asset> {
        let conn = pool.get().ok()?;
        conn.query_row(
            &format!("SELECT {} FROM assets WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )
        .ok()
    }

    /// Insert, or replace the entry with the same id.
    pub fn save(pool: &DbPool, asset: &Asset) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO assets (id, name, url, kind, category) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                url = excluded.url,
                kind = excluded.kind,
                category = excluded.category",
            params![asset.id, asset.name, asset.url, asset.kind.as_str(), asset.category],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn delete(pool: &DbPool, id: &str) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM assets WHERE id = ?1", params![id])
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
