//! HTML rendering for blocks, pages and the surrounding document.
//!
//! Everything here is a total function from data to markup: no rendering path
//! returns an error, and missing optional fields simply omit their element.

use serde::{Deserialize, Serialize};

use crate::models::site_config::ThemeColors;

pub mod block;
pub mod button;
pub mod page;

pub use block::render_block;
pub use button::{paint, render_actions, ButtonPaint};
pub use page::{render_page, Selection};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// A color, gradient or font name made safe for a `style` attribute or `<style>` element.
/// Characters that could end the declaration, the rule or the markup around it are dropped.
pub fn css_value(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '"' | '\'' | '<' | '>' | ';' | '{' | '}' | '\\') && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// `paddingY` is a spacing-scale step: one step is a quarter rem.
pub(crate) fn padding_rem(padding_y: &str) -> String {
    let step = padding_y
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(20.0);
    format!("{}rem", step * 0.25)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub fn lang(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    pub fn dir(&self) -> &'static str {
        match self {
            Locale::Ar => "rtl",
            Locale::En => "ltr",
        }
    }

    pub fn default_font(&self) -> &'static str {
        match self {
            Locale::Ar => "Cairo",
            Locale::En => "Inter",
        }
    }
}

/// Explicit render-time configuration for a whole document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub theme: ThemeColors,
    pub locale: Locale,
    /// Site font override; `None`, blank or `System` fall back to the locale font.
    pub font: Option<String>,
}

impl RenderContext {
    pub fn new(theme: ThemeColors, locale: Locale) -> Self {
        RenderContext {
            theme,
            locale,
            font: None,
        }
    }

    pub fn with_font(mut self, font: &str) -> Self {
        self.font = Some(font.to_string());
        self
    }

    pub fn font_family(&self) -> String {
        match self.font.as_deref().map(str::trim) {
            Some("System") => "system-ui, sans-serif".to_string(),
            Some(f) if !css_value(f).is_empty() => format!("'{}', sans-serif", css_value(f)),
            _ => format!("'{}', sans-serif", self.locale.default_font()),
        }
    }
}

const BASE_CSS: &str = "*{box-sizing:border-box}\
body{margin:0;background:#020617;color:#f8fafc}\
a{text-decoration:none}\
.btn{display:inline-flex;align-items:center;gap:.5rem;border-radius:9999px;font-weight:700}\
.btn-link{text-decoration:underline}\
.container{max-width:72rem;margin:0 auto;padding:0 1rem}\
.stats-grid{display:grid;gap:2rem;grid-template-columns:repeat(2,minmax(0,1fr))}\
@media(min-width:768px){\
.stats-grid[data-cols-wide=\"3\"]{grid-template-columns:repeat(3,minmax(0,1fr))}\
.stats-grid[data-cols-wide=\"4\"]{grid-template-columns:repeat(4,minmax(0,1fr))}}\
.gallery-card .gallery-caption{opacity:0;transition:opacity .3s}\
.gallery-card:hover .gallery-caption{opacity:1}\
.block-frame{position:relative}\
.block-frame.is-selected{outline:4px solid var(--color-primary);outline-offset:-4px}\
.block-select{position:absolute;inset:0;z-index:5}\
.block-badge{position:absolute;top:.5rem;inset-inline-start:.5rem;z-index:6;font-size:.625rem;text-transform:uppercase}";

/// Wrap rendered body markup into a full document. Direction, language and font are
/// decided here once from the context instead of being applied to a shared root.
pub fn render_document(ctx: &RenderContext, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\" dir=\"{dir}\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{title}</title>\n<style>:root{{--color-primary:{primary};--color-secondary:{secondary};--color-accent:{accent}}}body{{font-family:{font}}}{css}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        lang = ctx.locale.lang(),
        dir = ctx.locale.dir(),
        title = html_escape(title),
        primary = css_value(&ctx.theme.primary),
        secondary = css_value(&ctx.theme.secondary),
        accent = css_value(&ctx.theme.accent),
        font = ctx.font_family(),
        css = BASE_CSS,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            html_escape("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn css_values_cannot_leave_their_declaration() {
        assert_eq!(css_value(" #fff "), "#fff");
        assert_eq!(
            css_value("linear-gradient(135deg, #fbbf24 0%, #f97316 100%)"),
            "linear-gradient(135deg, #fbbf24 0%, #f97316 100%)"
        );
        assert_eq!(css_value("red\" onmouseover=\"x()"), "red onmouseover=x()");
        assert_eq!(css_value("#fff;}</style><script>"), "#fff/stylescript");
    }

    #[test]
    fn theme_colors_in_the_shell_are_sanitized() {
        let theme = ThemeColors {
            primary: "#fff}</style><script>x()</script>".into(),
            ..ThemeColors::default()
        };
        let html = render_document(&RenderContext::new(theme, Locale::En), "t", "");
        assert!(!html.contains("<script>"));
        assert_eq!(html.matches("</style>").count(), 1);
    }

    #[test]
    fn padding_steps_are_quarter_rems() {
        assert_eq!(padding_rem("24"), "6rem");
        assert_eq!(padding_rem("5"), "1.25rem");
        assert_eq!(padding_rem("wide"), "5rem");
    }

    #[test]
    fn arabic_documents_are_right_to_left() {
        let ctx = RenderContext::new(ThemeColors::default(), Locale::Ar);
        let html = render_document(&ctx, "عصر الهامور", "<main></main>");
        assert!(html.contains("lang=\"ar\" dir=\"rtl\""));
        assert!(html.contains("'Cairo', sans-serif"));
        assert!(html.contains("--color-primary:#EAB308"));
    }

    #[test]
    fn font_override_and_system_font() {
        let ctx = RenderContext::new(ThemeColors::default(), Locale::En).with_font("Inter");
        assert_eq!(ctx.font_family(), "'Inter', sans-serif");
        let system = RenderContext::new(ThemeColors::default(), Locale::Ar).with_font("System");
        assert_eq!(system.font_family(), "system-ui, sans-serif");
        let html = render_document(&system, "t", "");
        assert!(html.contains("dir=\"rtl\""));
    }
}
