use serde::{Deserialize, Serialize};

/// Fixed palettes for the gradient button styles and the default button text color.
pub const ROYAL_GRADIENT: &str = "linear-gradient(135deg, #fbbf24 0%, #f97316 100%)";
pub const SHIMMER_GRADIENT: &str =
    "linear-gradient(90deg, #eab308 0%, #fde047 50%, #ca8a04 100%)";
pub const DEFAULT_TEXT_COLOR: &str = "#020617";

/// Visual treatment of an action button. Cosmetic only, every style is a plain link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStyle {
    #[default]
    Solid,
    Outline,
    RoyalGradient,
    Shimmer,
    Primary,
    Link,
}

impl LinkStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStyle::Solid => "solid",
            LinkStyle::Outline => "outline",
            LinkStyle::RoyalGradient => "royal-gradient",
            LinkStyle::Shimmer => "shimmer",
            LinkStyle::Primary => "primary",
            LinkStyle::Link => "link",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSize {
    Sm,
    Md,
    Lg,
    Xl,
}

impl LinkSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkSize::Sm => "sm",
            LinkSize::Md => "md",
            LinkSize::Lg => "lg",
            LinkSize::Xl => "xl",
        }
    }
}

/// Fixed icon symbol table. Keys outside the table are kept verbatim in
/// `Unknown` so documents round-trip, and render as no icon at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Icon {
    Play,
    PlayCircle,
    ArrowRight,
    Zap,
    Ship,
    Star,
    Shield,
    Rocket,
    Sparkles,
    Users,
    CreditCard,
    Message,
    Info,
    Share,
    Unknown(String),
}

impl Icon {
    /// Icons offered by the editor's picker, in picker order.
    pub const PICKER: [Icon; 12] = [
        Icon::Play,
        Icon::Zap,
        Icon::Ship,
        Icon::Star,
        Icon::Shield,
        Icon::Rocket,
        Icon::Sparkles,
        Icon::Share,
        Icon::ArrowRight,
        Icon::Users,
        Icon::Message,
        Icon::Info,
    ];

    pub fn key(&self) -> &str {
        match self {
            Icon::Play => "play",
            Icon::PlayCircle => "play-circle",
            Icon::ArrowRight => "arrow-right",
            Icon::Zap => "zap",
            Icon::Ship => "ship",
            Icon::Star => "star",
            Icon::Shield => "shield",
            Icon::Rocket => "rocket",
            Icon::Sparkles => "sparkles",
            Icon::Users => "users",
            Icon::CreditCard => "credit-card",
            Icon::Message => "message",
            Icon::Info => "info",
            Icon::Share => "share",
            Icon::Unknown(key) => key,
        }
    }

    /// Inline glyph for the icon, `None` for keys outside the table.
    pub fn glyph(&self) -> Option<&'static str> {
        let glyph = match self {
            Icon::Play => "&#9654;",
            Icon::PlayCircle => "&#9199;",
            Icon::ArrowRight => "&#8594;",
            Icon::Zap => "&#9889;",
            Icon::Ship => "&#128674;",
            Icon::Star => "&#9733;",
            Icon::Shield => "&#128737;",
            Icon::Rocket => "&#128640;",
            Icon::Sparkles => "&#10024;",
            Icon::Users => "&#128101;",
            Icon::CreditCard => "&#128179;",
            Icon::Message => "&#128172;",
            Icon::Info => "&#8505;",
            Icon::Share => "&#128279;",
            Icon::Unknown(_) => return None,
        };
        Some(glyph)
    }
}

impl From<String> for Icon {
    fn from(key: String) -> Self {
        match key.as_str() {
            "play" => Icon::Play,
            "play-circle" => Icon::PlayCircle,
            "arrow-right" => Icon::ArrowRight,
            "zap" => Icon::Zap,
            "ship" => Icon::Ship,
            "star" => Icon::Star,
            "shield" => Icon::Shield,
            "rocket" => Icon::Rocket,
            "sparkles" => Icon::Sparkles,
            "users" => Icon::Users,
            "credit-card" => Icon::CreditCard,
            "message" => Icon::Message,
            "info" => Icon::Info,
            "share" => Icon::Share,
            _ => Icon::Unknown(key),
        }
    }
}

impl From<&str> for Icon {
    fn from(key: &str) -> Self {
        Icon::from(key.to_string())
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        icon.key().to_string()
    }
}

/// An action button attached to a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartLink {
    #[serde(default)]
    pub label: String,
    /// Target URL or in-page anchor.
    #[serde(default)]
    pub value: String,
    #[serde(default, deserialize_with = "super::lenient")]
    pub style: LinkStyle,
    /// Palette slot name (`primary`, `secondary`, `accent`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::lenient")]
    pub size: Option<LinkSize>,
}

impl SmartLink {
    pub fn new(label: &str, value: &str, style: LinkStyle) -> Self {
        SmartLink {
            label: label.to_string(),
            value: value.to_string(),
            style,
            theme_color: None,
            icon: None,
            target: None,
            custom_bg: None,
            custom_text_color: None,
            size: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_size(mut self, size: LinkSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_theme_color(mut self, slot: &str) -> Self {
        self.theme_color = Some(slot.to_string());
        self
    }
}

/// Partial update for one action. `Some` fields overwrite, `None` fields keep.
/// The double options clear an optional field when set to `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkPatch {
    pub label: Option<String>,
    pub value: Option<String>,
    pub style: Option<LinkStyle>,
    pub theme_color: Option<Option<String>>,
    pub icon: Option<Option<Icon>>,
    pub custom_bg: Option<Option<String>>,
    pub custom_text_color: Option<Option<String>>,
    pub size: Option<Option<LinkSize>>,
}

impl LinkPatch {
    pub fn apply(&self, link: &SmartLink) -> SmartLink {
        let mut next = link.clone();
        if let Some(label) = &self.label {
            next.label = label.clone();
        }
        if let Some(value) = &self.value {
            next.value = value.clone();
        }
        if let Some(style) = self.style {
            next.style = style;
        }
        if let Some(theme_color) = &self.theme_color {
            next.theme_color = theme_color.clone();
        }
        if let Some(icon) = &self.icon {
            next.icon = icon.clone();
        }
        if let Some(bg) = &self.custom_bg {
            next.custom_bg = bg.clone();
        }
        if let Some(color) = &self.custom_text_color {
            next.custom_text_color = color.clone();
        }
        if let Some(size) = self.size {
            next.size = size;
        }
        next
    }
}
