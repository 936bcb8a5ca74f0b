use log::warn;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::blocks::{
    lenient, lenient_list, BlockKind, BlockStyle, Icon, LinkSize, LinkStyle, PageBlock,
    SmartLink, TextAlign, ROYAL_GRADIENT,
};
use crate::db::DbPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Color,
    Image,
    Gradient,
}

/// Page-level backdrop drawn behind every block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBackground {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: BackgroundKind,
    #[serde(default, deserialize_with = "lenient")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub overlay_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub is_blurred: Option<bool>,
}

impl Default for PageBackground {
    fn default() -> Self {
        PageBackground {
            kind: BackgroundKind::Color,
            value: "#020617".to_string(),
            overlay_opacity: None,
            is_blurred: None,
        }
    }
}

/// A routable page: metadata plus its ordered blocks. Persisted whole, never per block.
/// Decoding keeps the page when single blocks or style values are malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub label: String,
    pub slug: String,
    #[serde(default, deserialize_with = "lenient")]
    pub is_hidden: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub background: PageBackground,
    #[serde(default, deserialize_with = "lenient_list")]
    pub blocks: Vec<PageBlock>,
}

impl Page {
    pub fn new(id: &str, label: &str, slug: &str) -> Page {
        Page {
            id: id.to_string(),
            label: label.to_string(),
            slug: slug.to_string(),
            is_hidden: false,
            background: PageBackground::default(),
            blocks: Vec::new(),
        }
    }

    pub fn block(&self, id: &str) -> Option<&PageBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_index(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn to_document(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    pub fn from_document(doc: &str) -> Result<Page, String> {
        serde_json::from_str(doc).map_err(|e| e.to_string())
    }

    /// The page every fresh site starts with.
    pub fn seed_home() -> Page {
        let hero = PageBlock {
            id: "hero_home".to_string(),
            kind: BlockKind::Hero,
            title: "عصر الهامور".to_string(),
            subtitle: "إمبراطورية البحار الرقمية".to_string(),
            content: "ابدأ رحلتك كقبطان بسيط وكن أسطورة البحار في أقوى منصة إدارة متكاملة."
                .to_string(),
            actions: vec![
                SmartLink::new("ابدأ الآن", "/register", LinkStyle::RoyalGradient)
                    .with_size(LinkSize::Lg)
                    .with_icon(Icon::Play),
                SmartLink::new("Share", "#share", LinkStyle::Solid)
                    .with_size(LinkSize::Lg)
                    .with_icon(Icon::Share),
                SmartLink::new("طلب ديمو", "#contact", LinkStyle::Outline)
                    .with_size(LinkSize::Lg)
                    .with_theme_color("primary"),
            ],
            image: None,
            style: BlockStyle {
                overlay_opacity: Some(0.5),
                background_gradient: Some(ROYAL_GRADIENT.to_string()),
                ..BlockStyle::with_padding("24", TextAlign::Center)
            },
        };

        Page {
            id: "home".to_string(),
            label: "الرئيسية".to_string(),
            slug: "home".to_string(),
            is_hidden: false,
            background: PageBackground {
                overlay_opacity: Some(0.5),
                ..PageBackground::default()
            },
            blocks: vec![hero],
        }
    }

    // ── Persistence ──

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<(String, String)> {
        Ok((row.get(0)?, row.get(1)?))
    }

    fn decode((id, doc): (String, String)) -> Option<Page> {
        match Page::from_document(&doc) {
            Ok(page) => Some(page),
            Err(e) => {
                warn!("Skipping page {} with undecodable document: {}", id, e);
                None
            }
        }
    }

    /// Every page in stored order, hidden ones included.
    pub fn list_all(pool: &DbPool) -> Vec<Page> {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return vec![],
        };
        let mut stmt = match conn.prepare("SELECT id, document FROM pages ORDER BY position, id") {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        stmt.query_map([], Self::from_row)
            .map(|rows| rows.filter_map(|r| r.ok()).filter_map(Self::decode).collect())
            .unwrap_or_default()
    }

    pub fn find_by_id(pool: &DbPool, id: &str) -> Option<Page> {
        let conn = pool.get().ok()?;
        conn.query_row(
            "SELECT id, document FROM pages WHERE id = ?1",
            params![id],
            Self::from_row,
        )
        .ok()
        .and_then(Self::decode)
    }

    pub fn find_by_slug(pool: &DbPool, slug: &str) -> Option<Page> {
        let conn = pool.get().ok()?;
        conn.query_row(
            "SELECT id, document FROM pages WHERE slug = ?1",
            params![slug],
            Self::from_row,
        )
        .ok()
        .and_then(Self::decode)
    }

    pub fn count(pool: &DbPool) -> i64 {
        let conn = match pool.get() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))
            .unwrap_or(0)
    }

    /// Upsert by id. New pages go to the end of the list; existing pages keep their position.
    /// A slug already used by another page is rejected by the unique index.
    pub fn save(pool: &DbPool, page: &Page) -> Result<Page, String> {
        let doc = page.to_document()?;
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO pages (id, slug, label, is_hidden, position, document)
             VALUES (?1, ?2, ?3, ?4, (SELECT COALESCE(MAX(position), -1) + 1 FROM pages), ?5)
             ON CONFLICT(id) DO UPDATE SET
                slug = excluded.slug,
                label = excluded.label,
                is_hidden = excluded.is_hidden,
                document = excluded.document,
                updated_at = CURRENT_TIMESTAMP",
            params![page.id, page.slug, page.label, page.is_hidden as i32, doc],
        )
        .map_err(|e| e.to_string())?;
        Ok(page.clone())
    }

    pub fn delete(pool: &DbPool, id: &str) -> Result<(), String> {
        let conn = pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM pages WHERE id = ?1", params![id])
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
