//! Pure page operations. Each takes the current page and returns a new one;
//! a missing block id or an out-of-range index gives back an unchanged copy.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::blocks::templates::instantiate;
use crate::blocks::{
    BlockItem, BlockPatch, BlockType, Icon, ItemPatch, LinkPatch, LinkStyle, PageBlock, SmartLink,
};
use crate::models::page::Page;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id(prefix: &str) -> String {
    let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), n)
}

/// Fresh block id: clock plus a process-wide counter, so two calls never collide.
pub fn next_block_id() -> String {
    next_id("block")
}

/// Lowercase and drop every whitespace character. Punctuation is kept as typed.
pub fn normalize_slug(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A new, empty page whose slug is derived from its label.
pub fn new_page(label: &str) -> Page {
    Page::new(&next_id("page"), label, &normalize_slug(label))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Action appended by "add button".
pub fn default_action() -> SmartLink {
    SmartLink::new("New Action", "#", LinkStyle::Solid).with_icon(Icon::Zap)
}

fn with_block<F>(page: &Page, block_id: &str, edit: F) -> Page
where
    F: FnOnce(&mut PageBlock),
{
    let mut next = page.clone();
    if let Some(block) = next.blocks.iter_mut().find(|b| b.id == block_id) {
        edit(block);
    }
    next
}

// ── Blocks ──

/// Append a block built from the type's template. Returns the page and the new id.
pub fn add_block(page: &Page, block_type: BlockType) -> (Page, String) {
    let id = next_block_id();
    let mut next = page.clone();
    next.blocks.push(instantiate(block_type, &id));
    (next, id)
}

pub fn remove_block(page: &Page, block_id: &str) -> Page {
    let mut next = page.clone();
    next.blocks.retain(|b| b.id != block_id);
    next
}

/// Swap the block at `index` with its neighbour. Out-of-range moves change nothing.
pub fn move_block(page: &Page, index: usize, direction: Direction) -> Page {
    let mut next = page.clone();
    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => index.checked_add(1),
    };
    if let Some(target) = target {
        if index < next.blocks.len() && target < next.blocks.len() {
            next.blocks.swap(index, target);
        }
    }
    next
}

pub fn update_block(page: &Page, block_id: &str, patch: &BlockPatch) -> Page {
    with_block(page, block_id, |block| *block = patch.apply(block))
}

// ── Items ──

/// Append an entry. An entry of the wrong shape for the block is rejected.
pub fn add_item(page: &Page, block_id: &str, item: BlockItem) -> Result<Page, String> {
    let mut next = page.clone();
    if let Some(block) = next.blocks.iter_mut().find(|b| b.id == block_id) {
        block.kind.push_item(item)?;
    }
    Ok(next)
}

/// Append the placeholder entry for the block's item shape, if it has one.
pub fn add_starter_item(page: &Page, block_id: &str) -> Page {
    let shape = page
        .block(block_id)
        .and_then(|b| b.block_type().item_shape());
    match shape {
        Some(shape) => with_block(page, block_id, |block| {
            // shape comes from the block itself, so the push cannot mismatch
            let _ = block.kind.push_item(BlockItem::starter(shape));
        }),
        None => page.clone(),
    }
}

pub fn update_item_at(
    page: &Page,
    block_id: &str,
    index: usize,
    patch: &ItemPatch,
) -> Result<Page, String> {
    let mut next = page.clone();
    if let Some(block) = next.blocks.iter_mut().find(|b| b.id == block_id) {
        block.kind.patch_item(index, patch)?;
    }
    Ok(next)
}

pub fn remove_item_at(page: &Page, block_id: &str, index: usize) -> Page {
    with_block(page, block_id, |block| {
        block.kind.remove_item(index);
    })
}

// ── Actions ──

pub fn add_action(page: &Page, block_id: &str, action: SmartLink) -> Page {
    with_block(page, block_id, |block| block.actions.push(action))
}

pub fn update_action_at(page: &Page, block_id: &str, index: usize, patch: &LinkPatch) -> Page {
    with_block(page, block_id, |block| {
        if let Some(action) = block.actions.get_mut(index) {
            *action = patch.apply(action);
        }
    })
}

pub fn remove_action_at(page: &Page, block_id: &str, index: usize) -> Page {
    with_block(page, block_id, |block| {
        if index < block.actions.len() {
            block.actions.remove(index);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockKind, FaqItem, ItemShape};

    fn page_with(types: &[BlockType]) -> Page {
        let mut page = Page::new("p", "Test", "test");
        for t in types {
            page = add_block(&page, *t).0;
        }
        page
    }

    fn order(page: &Page) -> Vec<String> {
        page.blocks.iter().map(|b| b.id.clone()).collect()
    }

    #[test]
    fn slug_is_lowercased_and_whitespace_free() {
        assert_eq!(normalize_slug("My Page Title!"), "mypagetitle!");
        assert_eq!(normalize_slug("  About\tUs\n"), "aboutus");
        assert_eq!(normalize_slug("already-fine"), "already-fine");
    }

    #[test]
    fn block_ids_are_unique() {
        let ids: std::collections::HashSet<String> = (0..500).map(|_| next_block_id()).collect();
        assert_eq!(ids.len(), 500);
        assert!(ids.iter().all(|id| id.starts_with("block_")));
    }

    #[test]
    fn add_block_appends_template_and_leaves_input_untouched() {
        let page = Page::new("p", "Test", "test");
        let (next, id) = add_block(&page, BlockType::Faq);
        assert!(page.blocks.is_empty());
        assert_eq!(next.blocks.len(), 1);
        assert_eq!(next.blocks[0].id, id);
        assert_eq!(next.blocks[0].block_type(), BlockType::Faq);
    }

    #[test]
    fn move_up_then_down_restores_order() {
        let page = page_with(&[
            BlockType::Hero,
            BlockType::Faq,
            BlockType::Gallery,
            BlockType::Divider,
        ]);
        for i in 1..page.blocks.len() {
            let moved = move_block(&page, i, Direction::Up);
            assert_ne!(order(&moved), order(&page));
            let back = move_block(&moved, i - 1, Direction::Down);
            assert_eq!(order(&back), order(&page));
        }
    }

    #[test]
    fn moves_past_the_ends_are_no_ops() {
        let page = page_with(&[BlockType::Hero, BlockType::Faq]);
        assert_eq!(order(&move_block(&page, 0, Direction::Up)), order(&page));
        assert_eq!(order(&move_block(&page, 1, Direction::Down)), order(&page));
        assert_eq!(order(&move_block(&page, 7, Direction::Up)), order(&page));
    }

    #[test]
    fn update_block_is_idempotent() {
        let page = page_with(&[BlockType::Hero]);
        let id = page.blocks[0].id.clone();
        let patch = BlockPatch {
            title: Some("Fleet".into()),
            image: Some(None),
            ..Default::default()
        };
        let once = update_block(&page, &id, &patch);
        let twice = update_block(&once, &id, &patch);
        assert_eq!(once, twice);
        assert_eq!(once.blocks[0].title, "Fleet");
    }

    #[test]
    fn update_block_with_unknown_id_changes_nothing() {
        let page = page_with(&[BlockType::Hero]);
        let patch = BlockPatch {
            title: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(update_block(&page, "nope", &patch), page);
    }

    #[test]
    fn item_operations_respect_shape() {
        let page = page_with(&[BlockType::Faq]);
        let id = page.blocks[0].id.clone();

        let grown = add_item(
            &page,
            &id,
            BlockItem::Faq(FaqItem {
                question: "Q".into(),
                answer: "A".into(),
            }),
        )
        .unwrap();
        assert_eq!(grown.blocks[0].kind.item_count(), 3);

        assert!(add_item(&page, &id, BlockItem::starter(ItemShape::Stat)).is_err());

        let patched = update_item_at(
            &grown,
            &id,
            2,
            &ItemPatch::Faq {
                question: None,
                answer: Some("Yes".into()),
            },
        )
        .unwrap();
        match &patched.blocks[0].kind {
            BlockKind::Faq(items) => {
                assert_eq!(items[2].question, "Q");
                assert_eq!(items[2].answer, "Yes");
            }
            other => panic!("unexpected kind {:?}", other),
        }

        let trimmed = remove_item_at(&patched, &id, 0);
        assert_eq!(trimmed.blocks[0].kind.item_count(), 2);
        assert_eq!(remove_item_at(&trimmed, &id, 10), trimmed);
    }

    #[test]
    fn starter_item_matches_block_shape() {
        let page = page_with(&[BlockType::StatsCounter, BlockType::Hero]);
        let stats = page.blocks[0].id.clone();
        let hero = page.blocks[1].id.clone();
        let next = add_starter_item(&page, &stats);
        assert_eq!(next.blocks[0].kind.item_count(), 4);
        assert_eq!(add_starter_item(&page, &hero), page);
    }

    #[test]
    fn action_operations() {
        let page = page_with(&[BlockType::Divider]);
        let id = page.blocks[0].id.clone();
        let with_action = add_action(&page, &id, default_action());
        assert_eq!(with_action.blocks[0].actions.len(), 1);
        assert_eq!(with_action.blocks[0].actions[0].label, "New Action");

        let renamed = update_action_at(
            &with_action,
            &id,
            0,
            &LinkPatch {
                label: Some("Join".into()),
                style: Some(LinkStyle::Outline),
                ..Default::default()
            },
        );
        assert_eq!(renamed.blocks[0].actions[0].label, "Join");
        assert_eq!(renamed.blocks[0].actions[0].style, LinkStyle::Outline);
        assert_eq!(renamed.blocks[0].actions[0].icon, Some(Icon::Zap));

        assert_eq!(remove_action_at(&renamed, &id, 3), renamed);
        assert!(remove_action_at(&renamed, &id, 0).blocks[0].actions.is_empty());
    }

    #[test]
    fn new_page_slug_comes_from_label() {
        let page = new_page("Fleet News");
        assert_eq!(page.slug, "fleetnews");
        assert!(page.id.starts_with("page_"));
        assert!(page.blocks.is_empty());
    }
}
