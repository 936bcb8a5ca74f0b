use crate::blocks::{
    BlockKind, BlockStyle, FaqItem, FeatureItem, GalleryItem, Icon, PageBlock, StatItem,
    TextAlign, DEFAULT_GRID_COLS, DEFAULT_OVERLAY_OPACITY,
};
use crate::models::site_config::ThemeColors;

use super::button::render_actions;
use super::{css_value, html_escape, padding_rem};

/// Grid column count for gallery and feature blocks.
pub fn grid_columns(style: &BlockStyle) -> u32 {
    style.grid_cols.unwrap_or(DEFAULT_GRID_COLS).clamp(1, 6)
}

/// Wide-screen column count for a stats block: between two and four.
pub fn stats_columns(items: usize) -> usize {
    items.clamp(2, 4)
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Opening `<section>` shared by every block: padding, alignment and text color.
fn open_section(block: &PageBlock, extra_style: &str) -> String {
    let style = &block.style;
    let dark = if style.is_dark == Some(true) { " is-dark" } else { "" };
    let color = non_blank(&style.text_color)
        .map(|c| format!("color:{};", css_value(c)))
        .unwrap_or_default();
    format!(
        "<section class=\"block block-{kind}{dark}\" id=\"{id}\" data-block-type=\"{kind}\" style=\"padding:{pad} 0;text-align:{align};{color}{extra}\">",
        kind = block.block_type().as_str(),
        dark = dark,
        id = html_escape(&block.id),
        pad = padding_rem(&style.padding_y),
        align = style.text_align.as_str(),
        color = color,
        extra = extra_style,
    )
}

fn heading(tag: &str, class: &str, text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("<{tag} class=\"{class}\">{}</{tag}>", html_escape(text), tag = tag, class = class)
    }
}

/// Centered title and subtitle above grids and lists.
fn section_header(block: &PageBlock, theme: &ThemeColors) -> String {
    let title = heading("h2", "block-title", &block.title);
    let subtitle = if block.subtitle.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"block-eyebrow\" style=\"color:{}\">{}</p>",
            css_value(&theme.primary),
            html_escape(&block.subtitle)
        )
    };
    if title.is_empty() && subtitle.is_empty() {
        return String::new();
    }
    format!("<header class=\"block-header\">{}{}</header>", subtitle, title)
}

/// Render one block to an HTML fragment. Total over every block value.
pub fn render_block(block: &PageBlock, theme: &ThemeColors) -> String {
    match &block.kind {
        BlockKind::Hero => render_hero(block, theme),
        BlockKind::TextImage => render_text_image(block, theme),
        BlockKind::Gallery(items) => render_gallery(block, items, theme),
        BlockKind::FeaturesGrid(items) => render_features(block, items, theme),
        BlockKind::Faq(items) => render_faq(block, items, theme),
        BlockKind::StatsCounter(items) => render_stats(block, items, theme),
        BlockKind::Divider => render_divider(block, theme),
        BlockKind::VideoBlock
        | BlockKind::PricingTable
        | BlockKind::SocialLinks
        | BlockKind::TeamSection
        | BlockKind::NewsTicker
        | BlockKind::CtaBar => render_generic(block, theme),
    }
}

fn render_hero(block: &PageBlock, theme: &ThemeColors) -> String {
    let backdrop = if let Some(gradient) = non_blank(&block.style.background_gradient) {
        format!("background:{};", css_value(gradient))
    } else if let Some(image) = block.image_url() {
        format!(
            "background-image:url('{}');background-size:cover;background-position:center;",
            html_escape(image)
        )
    } else {
        format!("background:{};", css_value(&theme.secondary))
    };
    let opacity = block
        .style
        .overlay_opacity
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_OVERLAY_OPACITY)
        .clamp(0.0, 1.0);
    let content = if block.content.trim().is_empty() {
        String::new()
    } else {
        format!("<p class=\"hero-content\">{}</p>", html_escape(&block.content))
    };

    let mut html = open_section(
        block,
        &format!(
            "min-height:80vh;position:relative;overflow:hidden;display:flex;align-items:center;{}",
            backdrop
        ),
    );
    html.push_str(&format!(
        "<div class=\"hero-overlay\" style=\"position:absolute;inset:0;background:#000;opacity:{}\"></div>",
        opacity
    ));
    html.push_str("<div class=\"container hero-inner\" style=\"position:relative;z-index:1;width:100%\">");
    html.push_str(&heading("h1", "hero-title", &block.title));
    html.push_str(&heading("p", "hero-subtitle", &block.subtitle));
    html.push_str(&format!(
        "<div class=\"hero-bar\" style=\"height:4px;width:6rem;background:{};display:inline-block\"></div>",
        css_value(&theme.primary)
    ));
    html.push_str(&content);
    html.push_str(&render_actions(&block.actions, theme, block.style.text_align));
    html.push_str("</div></section>");
    html
}

fn render_text_image(block: &PageBlock, theme: &ThemeColors) -> String {
    let mut text = String::from("<div class=\"ti-text\">");
    if !block.subtitle.trim().is_empty() {
        text.push_str(&format!(
            "<p class=\"block-eyebrow\" style=\"color:{}\">{}</p>",
            css_value(&theme.primary),
            html_escape(&block.subtitle)
        ));
    }
    text.push_str(&heading("h2", "block-title", &block.title));
    text.push_str(&heading("p", "ti-content", &block.content));
    text.push_str(&render_actions(&block.actions, theme, block.style.text_align));
    text.push_str("</div>");

    let media = match block.image_url() {
        Some(src) => format!(
            "<div class=\"ti-media\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\" style=\"width:100%;border-radius:2rem\"></div>",
            html_escape(src),
            html_escape(&block.title)
        ),
        None => "<div class=\"ti-media\"></div>".to_string(),
    };

    // Right alignment puts the image first
    let (first, second) = if block.style.text_align == TextAlign::Right {
        (media, text)
    } else {
        (text, media)
    };

    format!(
        "{}<div class=\"container ti-grid\" style=\"display:grid;grid-template-columns:repeat(2,minmax(0,1fr));gap:3rem;align-items:center\">{}{}</div></section>",
        open_section(block, ""),
        first,
        second
    )
}

fn grid_open(block: &PageBlock, class: &str) -> String {
    format!(
        "<div class=\"container {}\" data-cols=\"{cols}\" style=\"display:grid;gap:2rem;grid-template-columns:repeat({cols},minmax(0,1fr))\">",
        class,
        cols = grid_columns(&block.style)
    )
}

fn render_gallery(block: &PageBlock, items: &[GalleryItem], theme: &ThemeColors) -> String {
    let mut html = open_section(block, "");
    html.push_str(&section_header(block, theme));
    html.push_str(&grid_open(block, "gallery-grid"));
    for item in items {
        html.push_str("<figure class=\"gallery-card\" style=\"position:relative;margin:0;overflow:hidden;border-radius:2rem;aspect-ratio:1\">");
        if !item.image.trim().is_empty() {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" style=\"width:100%;height:100%;object-fit:cover\">",
                html_escape(&item.image),
                html_escape(&item.title)
            ));
        }
        html.push_str("<figcaption class=\"gallery-caption\" style=\"position:absolute;inset:auto 0 0 0;padding:1.5rem;background:linear-gradient(to top,rgba(0,0,0,.8),transparent)\">");
        html.push_str(&heading("h4", "gallery-title", &item.title));
        if let Some(subtitle) = item.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
            html.push_str(&format!(
                "<p class=\"gallery-subtitle\" style=\"color:{}\">{}</p>",
                css_value(&theme.primary),
                html_escape(subtitle)
            ));
        }
        html.push_str("</figcaption></figure>");
    }
    html.push_str("</div></section>");
    html
}

fn render_features(block: &PageBlock, items: &[FeatureItem], theme: &ThemeColors) -> String {
    let mut html = open_section(block, "");
    html.push_str(&section_header(block, theme));
    html.push_str(&grid_open(block, "features-grid"));
    for item in items {
        let icon = item.icon.as_ref().unwrap_or(&Icon::Zap);
        html.push_str("<div class=\"feature-card\" style=\"padding:2.5rem;border-radius:2.5rem;border:1px solid rgba(255,255,255,.05)\">");
        if let Some(glyph) = icon.glyph() {
            html.push_str(&format!(
                "<div class=\"feature-icon\" style=\"color:{}\">{}</div>",
                css_value(&theme.primary), glyph
            ));
        }
        html.push_str(&heading("h3", "feature-title", &item.title));
        html.push_str(&heading("p", "feature-content", &item.content));
        html.push_str("</div>");
    }
    html.push_str("</div></section>");
    html
}

fn render_faq(block: &PageBlock, items: &[FaqItem], theme: &ThemeColors) -> String {
    let mut html = open_section(block, "");
    html.push_str(&section_header(block, theme));
    html.push_str("<div class=\"container faq-list\" style=\"max-width:48rem;display:flex;flex-direction:column;gap:1rem\">");
    for item in items {
        html.push_str(&format!(
            "<div class=\"faq-item\" style=\"padding:2rem;border-radius:2rem;border:1px solid rgba(255,255,255,.05)\"><h3 class=\"faq-question\" style=\"color:{}\">{}</h3><p class=\"faq-answer\">{}</p></div>",
            css_value(&theme.primary),
            html_escape(&item.question),
            html_escape(&item.answer)
        ));
    }
    html.push_str("</div></section>");
    html
}

fn render_stats(block: &PageBlock, items: &[StatItem], theme: &ThemeColors) -> String {
    let mut html = open_section(block, "");
    html.push_str(&section_header(block, theme));
    html.push_str(&format!(
        "<div class=\"container stats-grid\" data-cols-wide=\"{}\">",
        stats_columns(items.len())
    ));
    for item in items {
        html.push_str(&format!(
            "<div class=\"stat\"><div class=\"stat-value\" style=\"color:{};font-size:3rem;font-weight:900\">{}</div><div class=\"stat-label\">{}</div></div>",
            css_value(&theme.primary),
            html_escape(&item.value),
            html_escape(&item.label)
        ));
    }
    html.push_str("</div></section>");
    html
}

fn render_divider(block: &PageBlock, theme: &ThemeColors) -> String {
    format!(
        "{}<div class=\"container\"><hr class=\"divider-rule\" style=\"border:0;height:1px;background:linear-gradient(90deg,transparent,{},transparent)\"></div></section>",
        open_section(block, ""),
        css_value(&theme.primary)
    )
}

/// Title, subtitle and actions only. Items and image are ignored.
fn render_generic(block: &PageBlock, theme: &ThemeColors) -> String {
    let mut html = open_section(block, "");
    html.push_str("<div class=\"container\">");
    html.push_str(&heading("h2", "block-title", &block.title));
    html.push_str(&heading("p", "block-subtitle", &block.subtitle));
    html.push_str(&render_actions(&block.actions, theme, block.style.text_align));
    html.push_str("</div></section>");
    html
}
