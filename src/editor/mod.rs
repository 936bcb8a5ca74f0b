//! Staging area for one page: an in-memory draft, the view mode over it, and a
//! single explicit save that hands the whole draft to the store.

use log::{error, info};

use crate::blocks::{BlockItem, BlockPatch, BlockType, ItemPatch, LinkPatch, PageBlock};
use crate::models::page::{Page, PageBackground};
use crate::models::site_config::ThemeColors;
use crate::notice::Notice;
use crate::render::{render_page, Selection};
use crate::store::Store;

pub mod ops;

pub use ops::{normalize_slug, Direction};

/// Link prefix the preview uses for click-to-select.
pub const SELECT_HREF: &str = "?block=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    BrowsingBlocks,
    EditingBlock(String),
    EditingGlobalSettings,
}

/// Property panel inputs. Which ones a block gets depends on its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Subtitle,
    Content,
    Image,
    GridColumns,
    Items,
    Actions,
    Style,
}

/// Panel inputs for a block type, in panel order.
pub fn fields_for(block_type: BlockType) -> Vec<EditorField> {
    let mut fields = Vec::new();
    if block_type.has_heading() {
        fields.extend([EditorField::Title, EditorField::Subtitle]);
    }
    if block_type.has_body() {
        fields.push(EditorField::Content);
    }
    if block_type.has_media() {
        fields.push(EditorField::Image);
    }
    if block_type.has_grid() {
        fields.push(EditorField::GridColumns);
    }
    if block_type.item_shape().is_some() {
        fields.push(EditorField::Items);
    }
    fields.extend([EditorField::Actions, EditorField::Style]);
    fields
}

#[derive(Debug, Clone)]
pub struct PageEditor {
    draft: Page,
    mode: EditorMode,
    notice: Option<Notice>,
}

impl PageEditor {
    pub fn open(page: Page) -> Self {
        PageEditor {
            draft: page,
            mode: EditorMode::BrowsingBlocks,
            notice: None,
        }
    }

    pub fn draft(&self) -> &Page {
        &self.draft
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn selected_block_id(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::EditingBlock(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_block(&self) -> Option<&PageBlock> {
        self.selected_block_id().and_then(|id| self.draft.block(id))
    }

    /// Inputs the panel shows for the selected block. Empty with no selection.
    pub fn selected_fields(&self) -> Vec<EditorField> {
        self.selected_block()
            .map(|b| fields_for(b.block_type()))
            .unwrap_or_default()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // ── View mode ──

    /// Select a block for editing. Unknown ids leave the mode unchanged.
    pub fn select(&mut self, block_id: &str) -> bool {
        if self.draft.block(block_id).is_none() {
            return false;
        }
        self.mode = EditorMode::EditingBlock(block_id.to_string());
        true
    }

    pub fn deselect(&mut self) {
        self.mode = EditorMode::BrowsingBlocks;
    }

    /// Open or close the page settings panel. Opening it drops any block selection.
    pub fn toggle_settings(&mut self) {
        self.mode = match self.mode {
            EditorMode::EditingGlobalSettings => EditorMode::BrowsingBlocks,
            _ => EditorMode::EditingGlobalSettings,
        };
    }

    // ── Blocks ──

    /// Insert a block from the library and select it.
    pub fn add_block(&mut self, block_type: BlockType) -> String {
        let (page, id) = ops::add_block(&self.draft, block_type);
        self.draft = page;
        self.mode = EditorMode::EditingBlock(id.clone());
        id
    }

    pub fn remove_block(&mut self, block_id: &str) {
        self.draft = ops::remove_block(&self.draft, block_id);
        if self.selected_block_id() == Some(block_id) {
            self.mode = EditorMode::BrowsingBlocks;
        }
    }

    pub fn move_block(&mut self, index: usize, direction: Direction) {
        self.draft = ops::move_block(&self.draft, index, direction);
    }

    pub fn update_block(&mut self, block_id: &str, patch: &BlockPatch) {
        self.draft = ops::update_block(&self.draft, block_id, patch);
    }

    /// Patch whichever block is selected; `false` when nothing is.
    pub fn update_selected(&mut self, patch: &BlockPatch) -> bool {
        match self.selected_block_id().map(str::to_string) {
            Some(id) => {
                self.update_block(&id, patch);
                true
            }
            None => false,
        }
    }

    // ── Items ──

    pub fn add_item(&mut self, block_id: &str, item: BlockItem) -> Result<(), String> {
        self.draft = ops::add_item(&self.draft, block_id, item)?;
        Ok(())
    }

    pub fn add_starter_item(&mut self, block_id: &str) {
        self.draft = ops::add_starter_item(&self.draft, block_id);
    }

    pub fn update_item_at(
        &mut self,
        block_id: &str,
        index: usize,
        patch: &ItemPatch,
    ) -> Result<(), String> {
        self.draft = ops::update_item_at(&self.draft, block_id, index, patch)?;
        Ok(())
    }

    pub fn remove_item_at(&mut self, block_id: &str, index: usize) {
        self.draft = ops::remove_item_at(&self.draft, block_id, index);
    }

    // ── Actions ──

    pub fn add_action(&mut self, block_id: &str) {
        self.draft = ops::add_action(&self.draft, block_id, ops::default_action());
    }

    pub fn update_action_at(&mut self, block_id: &str, index: usize, patch: &LinkPatch) {
        self.draft = ops::update_action_at(&self.draft, block_id, index, patch);
    }

    pub fn remove_action_at(&mut self, block_id: &str, index: usize) {
        self.draft = ops::remove_action_at(&self.draft, block_id, index);
    }

    // ── Page settings ──

    pub fn set_label(&mut self, label: &str) {
        self.draft.label = label.to_string();
    }

    /// Slugs are normalised as they are typed, never rejected.
    pub fn set_slug(&mut self, input: &str) {
        self.draft.slug = normalize_slug(input);
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.draft.is_hidden = hidden;
    }

    pub fn set_background(&mut self, background: PageBackground) {
        self.draft.background = background;
    }

    // ── Output ──

    /// The draft as the editor canvas shows it, with click-to-select frames.
    pub fn preview(&self, theme: &ThemeColors) -> String {
        let selection = Selection::new(self.selected_block_id(), SELECT_HREF);
        render_page(
            &self.draft.blocks,
            theme,
            &self.draft.background,
            Some(&selection),
        )
    }

    /// Hand the whole draft to `persist`. On failure the draft stays exactly as it was
    /// and an error notice is posted, so the save can be retried.
    pub fn commit<F>(&mut self, persist: F) -> Result<Page, String>
    where
        F: FnOnce(&Page) -> Result<Page, String>,
    {
        if self.draft.slug.is_empty() {
            let msg = "Page slug cannot be empty".to_string();
            self.notice = Some(Notice::error(&msg));
            return Err(msg);
        }

        match persist(&self.draft) {
            Ok(saved) => {
                info!("Saved page {} ({} blocks)", saved.id, saved.blocks.len());
                self.draft = saved.clone();
                self.notice = Some(Notice::success("تم حفظ الصفحة بنجاح"));
                Ok(saved)
            }
            Err(e) => {
                error!("Failed to save page {}: {}", self.draft.id, e);
                self.notice = Some(Notice::error(&format!("فشل حفظ الصفحة: {}", e)));
                Err(e)
            }
        }
    }

    pub fn save(&mut self, store: &dyn Store) -> Result<Page, String> {
        self.commit(|page| store.page_save(page))
    }

    /// Discard the draft. Nothing is written.
    pub fn cancel(self) {}
}
