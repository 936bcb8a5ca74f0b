use crate::blocks::{
    LinkSize, LinkStyle, SmartLink, TextAlign, DEFAULT_TEXT_COLOR, ROYAL_GRADIENT,
    SHIMMER_GRADIENT,
};
use crate::models::site_config::ThemeColors;

use super::{css_value, html_escape};

/// Resolved colors for one action button. `None` leaves the property to the stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonPaint {
    pub background: Option<String>,
    pub text_color: Option<String>,
    pub border: Option<String>,
}

impl ButtonPaint {
    fn style_attr(&self) -> String {
        let mut css = String::new();
        if let Some(bg) = &self.background {
            css.push_str(&format!("background:{};", css_value(bg)));
        }
        if let Some(color) = &self.text_color {
            css.push_str(&format!("color:{};", css_value(color)));
        }
        if let Some(border) = &self.border {
            css.push_str(&format!("border:{};", css_value(border)));
        }
        css
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Colors for a button: custom overrides, then the style rule, then the default text color.
pub fn paint(link: &SmartLink, theme: &ThemeColors) -> ButtonPaint {
    let active = theme.resolve(link.theme_color.as_deref());
    let custom_bg = non_blank(&link.custom_bg);
    let mut paint = ButtonPaint::default();

    if let Some(bg) = custom_bg {
        paint.background = Some(bg.to_string());
        paint.border = Some("none".to_string());
    } else {
        match link.style {
            LinkStyle::Outline => {
                paint.background = Some("transparent".to_string());
                paint.border = Some(format!("2px solid {}", active));
                paint.text_color = Some(active.to_string());
            }
            LinkStyle::RoyalGradient => paint.background = Some(ROYAL_GRADIENT.to_string()),
            LinkStyle::Shimmer => paint.background = Some(SHIMMER_GRADIENT.to_string()),
            LinkStyle::Solid | LinkStyle::Primary => paint.background = Some(active.to_string()),
            LinkStyle::Link => {}
        }
    }

    if let Some(color) = non_blank(&link.custom_text_color) {
        paint.text_color = Some(color.to_string());
    } else if custom_bg.is_none() && link.style != LinkStyle::Outline {
        paint.text_color = Some(DEFAULT_TEXT_COLOR.to_string());
    }

    paint
}

fn size_padding(size: Option<LinkSize>) -> &'static str {
    match size {
        Some(LinkSize::Sm) => "0.5rem 1rem",
        Some(LinkSize::Lg) => "1rem 2rem",
        Some(LinkSize::Xl) => "1.25rem 2.5rem",
        Some(LinkSize::Md) | None => "0.75rem 1.5rem",
    }
}

pub fn render_button(link: &SmartLink, theme: &ThemeColors) -> String {
    let paint = paint(link, theme);
    let icon = link
        .icon
        .as_ref()
        .and_then(|i| i.glyph().map(|g| format!("<span class=\"btn-icon\">{}</span>", g)))
        .unwrap_or_default();
    let target = match link.target.as_deref() {
        Some("_blank") => " target=\"_blank\" rel=\"noopener\"".to_string(),
        Some(t) if !t.is_empty() => format!(" target=\"{}\"", html_escape(t)),
        _ => String::new(),
    };
    let padding = if link.style == LinkStyle::Link {
        "0"
    } else {
        size_padding(link.size)
    };
    format!(
        "<a class=\"btn btn-{style}\" href=\"{href}\"{target} style=\"{paint}padding:{padding}\">{icon}<span>{label}</span></a>",
        style = link.style.as_str(),
        href = html_escape(&link.value),
        target = target,
        paint = paint.style_attr(),
        padding = padding,
        icon = icon,
        label = html_escape(&link.label),
    )
}

/// Button row for a block; empty when there are no actions.
pub fn render_actions(actions: &[SmartLink], theme: &ThemeColors, align: TextAlign) -> String {
    if actions.is_empty() {
        return String::new();
    }
    let justify = match align {
        TextAlign::Left => "flex-start",
        TextAlign::Center => "center",
        TextAlign::Right => "flex-end",
    };
    let buttons: String = actions.iter().map(|a| render_button(a, theme)).collect();
    format!(
        "<div class=\"block-actions\" style=\"display:flex;flex-wrap:wrap;gap:1rem;justify-content:{}\">{}</div>",
        justify, buttons
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Icon;

    fn theme() -> ThemeColors {
        ThemeColors {
            primary: "#fbbf24".into(),
            secondary: "#4f46e5".into(),
            accent: "#f97316".into(),
        }
    }

    #[test]
    fn custom_background_beats_outline() {
        let mut link = SmartLink::new("Go", "#", LinkStyle::Outline);
        link.custom_bg = Some("#ff0000".into());
        let p = paint(&link, &theme());
        assert_eq!(p.background.as_deref(), Some("#ff0000"));
        assert_eq!(p.border.as_deref(), Some("none"));
        assert!(p.text_color.is_none());
    }

    #[test]
    fn outline_uses_theme_slot_for_border_and_text() {
        let link = SmartLink::new("Demo", "#", LinkStyle::Outline).with_theme_color("accent");
        let p = paint(&link, &theme());
        assert_eq!(p.background.as_deref(), Some("transparent"));
        assert_eq!(p.border.as_deref(), Some("2px solid #f97316"));
        assert_eq!(p.text_color.as_deref(), Some("#f97316"));
    }

    #[test]
    fn gradients_are_fixed_palettes() {
        let royal = paint(&SmartLink::new("A", "#", LinkStyle::RoyalGradient), &theme());
        assert_eq!(royal.background.as_deref(), Some(ROYAL_GRADIENT));
        let shimmer = paint(&SmartLink::new("A", "#", LinkStyle::Shimmer), &ThemeColors::default());
        assert_eq!(shimmer.background.as_deref(), Some(SHIMMER_GRADIENT));
        assert_eq!(shimmer.text_color.as_deref(), Some(DEFAULT_TEXT_COLOR));
    }

    #[test]
    fn solid_and_primary_use_resolved_theme_color() {
        for style in [LinkStyle::Solid, LinkStyle::Primary] {
            let link = SmartLink::new("A", "#", style).with_theme_color("secondary");
            assert_eq!(paint(&link, &theme()).background.as_deref(), Some("#4f46e5"));
        }
        let unknown_slot = SmartLink::new("A", "#", LinkStyle::Solid).with_theme_color("gold");
        assert_eq!(paint(&unknown_slot, &theme()).background.as_deref(), Some("#fbbf24"));
    }

    #[test]
    fn custom_text_color_wins() {
        let mut link = SmartLink::new("A", "#", LinkStyle::Solid);
        link.custom_text_color = Some("#ffffff".into());
        assert_eq!(paint(&link, &theme()).text_color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn unknown_icon_renders_without_glyph() {
        let link = SmartLink::new("A", "/x", LinkStyle::Solid).with_icon(Icon::from("kraken"));
        let html = render_button(&link, &theme());
        assert!(!html.contains("btn-icon"));
        assert!(html.contains("href=\"/x\""));
    }

    #[test]
    fn no_actions_render_nothing() {
        assert_eq!(render_actions(&[], &theme(), TextAlign::Center), "");
    }
}
