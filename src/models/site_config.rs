use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings keys that make up the site configuration, with their seed values.
pub const DEFAULTS: &[(&str, &str)] = &[
    // General
    ("site_name", "Age of Hamour"),
    ("site_logo", "https://ui-avatars.com/api/?name=Hamour&background=fbbf24&color=000"),
    ("maintenance_mode", "false"),
    // Theme
    ("primary_color", "#fbbf24"),
    ("secondary_color", "#4f46e5"),
    ("accent_color", "#f97316"),
    ("background_image", ""),
    ("body_overlay_opacity", "0.5"),
    ("global_font", "Cairo"),
    // Header
    ("header_style", "glass"),
    ("header_sticky", "true"),
    ("header_cta_label", "دخول المنصة"),
    ("header_cta_url", "/login"),
    ("header_cta_show", "true"),
    // Footer
    ("show_footer", "true"),
    (
        "footer_text",
        "إمبراطورية الهامور - نظام الأمان المتكامل والتحكم المطلق في البحار الرقمية.",
    ),
    (
        "footer_links",
        r#"[{"label":"الرئيسية","url":"/"},{"label":"الأخبار","url":"/news"},{"label":"الدعم الفني","url":"/support"}]"#,
    ),
    ("footer_cta_label", "انضم لأسطولنا"),
    ("footer_cta_url", "/register"),
    ("footer_cta_show", "true"),
];

pub const FALLBACK_PRIMARY: &str = "#EAB308";
pub const FALLBACK_SECONDARY: &str = "#0F172A";
pub const FALLBACK_ACCENT: &str = "#78350F";

/// The palette blocks resolve their colors against. Site-wide, never per block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        ThemeColors {
            primary: FALLBACK_PRIMARY.to_string(),
            secondary: FALLBACK_SECONDARY.to_string(),
            accent: FALLBACK_ACCENT.to_string(),
        }
    }
}

impl ThemeColors {
    /// Look up a palette slot by name; absent or unknown names resolve to primary.
    pub fn resolve(&self, slot: Option<&str>) -> &str {
        match slot {
            Some("secondary") => &self.secondary,
            Some("accent") => &self.accent,
            _ => &self.primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub url: String,
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_name: String,
    pub site_logo: String,
    pub maintenance_mode: bool,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_image: Option<String>,
    pub body_overlay_opacity: f64,
    /// `Cairo`, `Inter` or `System`; empty means locale default.
    pub global_font: String,
    pub header_style: String,
    pub header_sticky: bool,
    pub header_cta: CallToAction,
    pub show_footer: bool,
    pub footer_text: String,
    pub footer_links: Vec<NavLink>,
    pub footer_cta: CallToAction,
}

impl SiteConfig {
    pub fn is_known_key(key: &str) -> bool {
        DEFAULTS.iter().any(|(k, _)| *k == key)
    }

    /// Project the key-value settings onto the typed config. Missing or
    /// unparsable values fall back to the seed defaults.
    pub fn from_settings(settings: &HashMap<String, String>) -> SiteConfig {
        let get = |key: &str| -> String {
            settings
                .get(key)
                .cloned()
                .or_else(|| {
                    DEFAULTS
                        .iter()
                        .find(|(k, _)| *k == key)
                        .map(|(_, v)| v.to_string())
                })
                .unwrap_or_default()
        };
        let flag = |key: &str| -> bool {
            let v = get(key);
            v == "true" || v == "1"
        };
        let color = |key: &str, fallback: &str| -> String {
            let v = get(key);
            if v.trim().is_empty() {
                fallback.to_string()
            } else {
                v
            }
        };

        let background_image = Some(get("background_image")).filter(|s| !s.trim().is_empty());
        let body_overlay_opacity = get("body_overlay_opacity")
            .parse::<f64>()
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(0.5);
        let footer_links: Vec<NavLink> =
            serde_json::from_str(&get("footer_links")).unwrap_or_default();

        SiteConfig {
            site_name: get("site_name"),
            site_logo: get("site_logo"),
            maintenance_mode: flag("maintenance_mode"),
            primary_color: color("primary_color", FALLBACK_PRIMARY),
            secondary_color: color("secondary_color", FALLBACK_SECONDARY),
            accent_color: color("accent_color", FALLBACK_ACCENT),
            background_image,
            body_overlay_opacity,
            global_font: get("global_font"),
            header_style: get("header_style"),
            header_sticky: flag("header_sticky"),
            header_cta: CallToAction {
                label: get("header_cta_label"),
                url: get("header_cta_url"),
                show: flag("header_cta_show"),
            },
            show_footer: flag("show_footer"),
            footer_text: get("footer_text"),
            footer_links,
            footer_cta: CallToAction {
                label: get("footer_cta_label"),
                url: get("footer_cta_url"),
                show: flag("footer_cta_show"),
            },
        }
    }

    pub fn theme_colors(&self) -> ThemeColors {
        ThemeColors {
            primary: self.primary_color.clone(),
            secondary: self.secondary_color.clone(),
            accent: self.accent_color.clone(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig::from_settings(&HashMap::new())
    }
}
