use crate::blocks::PageBlock;
use crate::models::page::{BackgroundKind, PageBackground};
use crate::models::site_config::ThemeColors;

use super::block::render_block;
use super::html_escape;

pub const EMPTY_TITLE: &str = "هذه الصفحة قيد الإنشاء";
pub const EMPTY_BODY: &str =
    "لم يتم إضافة أي كتل محتوى لهذه الصفحة بعد. استخدم لوحة التحكم لتصميم الصفحة.";

/// Click-to-select support for the editor preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub selected_block_id: Option<String>,
    /// Prefix of the selection link; the block id is appended.
    pub select_href: String,
}

impl Selection {
    pub fn new(selected_block_id: Option<&str>, select_href: &str) -> Self {
        Selection {
            selected_block_id: selected_block_id.map(str::to_string),
            select_href: select_href.to_string(),
        }
    }

    pub fn href_for(&self, block_id: &str) -> String {
        format!("{}{}", self.select_href, block_id)
    }

    pub fn is_selected(&self, block_id: &str) -> bool {
        self.selected_block_id.as_deref() == Some(block_id)
    }
}

/// Fixed layers behind the blocks: the backdrop, then the tint overlay if one is set.
fn render_background(bg: &PageBackground) -> String {
    let value = html_escape(bg.value.trim());
    let fill = match bg.kind {
        BackgroundKind::Color if !value.is_empty() => format!("background:{};", value),
        BackgroundKind::Gradient if !value.is_empty() => format!("background:{};", value),
        BackgroundKind::Image if !value.is_empty() => format!(
            "background-image:url('{}');background-size:cover;background-position:center;",
            value
        ),
        _ => "background:#020617;".to_string(),
    };
    let blur = if bg.is_blurred == Some(true) {
        "filter:blur(8px);transform:scale(1.05);"
    } else {
        ""
    };

    let mut html = format!(
        "<div class=\"page-bg page-bg-{}\" style=\"position:fixed;inset:0;z-index:0;{}{}\"></div>",
        match bg.kind {
            BackgroundKind::Color => "color",
            BackgroundKind::Image => "image",
            BackgroundKind::Gradient => "gradient",
        },
        fill,
        blur
    );
    if let Some(opacity) = bg.overlay_opacity.filter(|v| v.is_finite()) {
        html.push_str(&format!(
            "<div class=\"page-overlay\" style=\"position:fixed;inset:0;z-index:0;background:#000;opacity:{}\"></div>",
            opacity.clamp(0.0, 1.0)
        ));
    }
    html
}

fn render_empty() -> String {
    format!(
        "<section class=\"page-empty\" style=\"min-height:60vh;display:flex;flex-direction:column;align-items:center;justify-content:center;text-align:center;padding:5rem 1rem\"><div class=\"page-empty-icon\">&#10024;</div><h2>{}</h2><p>{}</p></section>",
        EMPTY_TITLE, EMPTY_BODY
    )
}

fn render_frame(block: &PageBlock, inner: &str, selection: &Selection) -> String {
    let selected = if selection.is_selected(&block.id) {
        " is-selected"
    } else {
        ""
    };
    format!(
        "<div class=\"block-frame{selected}\" data-block-id=\"{id}\"><a class=\"block-select\" href=\"{href}\" aria-label=\"{badge}\"></a><span class=\"block-badge\">{badge}</span>{inner}</div>",
        selected = selected,
        id = html_escape(&block.id),
        href = html_escape(&selection.href_for(&block.id)),
        badge = block.block_type().as_str().replace('_', " "),
        inner = inner,
    )
}

/// Render blocks in order over the page background. With a selection every block
/// becomes a click target and the selected one is highlighted.
pub fn render_page(
    blocks: &[PageBlock],
    theme: &ThemeColors,
    background: &PageBackground,
    selection: Option<&Selection>,
) -> String {
    let mut html = String::from("<div class=\"page-canvas\" style=\"position:relative;min-height:100vh\">");
    html.push_str(&render_background(background));
    html.push_str("<main class=\"page-blocks\" style=\"position:relative;z-index:1\">");

    if blocks.is_empty() {
        html.push_str(&render_empty());
    }
    for block in blocks {
        let inner = render_block(block, theme);
        match selection {
            Some(sel) => html.push_str(&render_frame(block, &inner, sel)),
            None => html.push_str(&inner),
        }
    }

    html.push_str("</main></div>");
    html
}
