use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod link;
pub mod templates;

pub use link::{
    Icon, LinkPatch, LinkSize, LinkStyle, SmartLink, DEFAULT_TEXT_COLOR, ROYAL_GRADIENT,
    SHIMMER_GRADIENT,
};

// ── Block types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Hero,
    VideoBlock,
    StatsCounter,
    PricingTable,
    SocialLinks,
    TeamSection,
    FeaturesGrid,
    NewsTicker,
    TextImage,
    Gallery,
    Faq,
    Divider,
    CtaBar,
}

impl BlockType {
    pub const ALL: [BlockType; 13] = [
        BlockType::Hero,
        BlockType::VideoBlock,
        BlockType::StatsCounter,
        BlockType::PricingTable,
        BlockType::SocialLinks,
        BlockType::TeamSection,
        BlockType::FeaturesGrid,
        BlockType::NewsTicker,
        BlockType::TextImage,
        BlockType::Gallery,
        BlockType::Faq,
        BlockType::Divider,
        BlockType::CtaBar,
    ];

    /// Types offered in the editor's component library, in display order.
    pub const LIBRARY: [BlockType; 10] = [
        BlockType::Hero,
        BlockType::TextImage,
        BlockType::FeaturesGrid,
        BlockType::Gallery,
        BlockType::StatsCounter,
        BlockType::Faq,
        BlockType::CtaBar,
        BlockType::VideoBlock,
        BlockType::Divider,
        BlockType::NewsTicker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::VideoBlock => "video_block",
            BlockType::StatsCounter => "stats_counter",
            BlockType::PricingTable => "pricing_table",
            BlockType::SocialLinks => "social_links",
            BlockType::TeamSection => "team_section",
            BlockType::FeaturesGrid => "features_grid",
            BlockType::NewsTicker => "news_ticker",
            BlockType::TextImage => "text_image",
            BlockType::Gallery => "gallery",
            BlockType::Faq => "faq",
            BlockType::Divider => "divider",
            BlockType::CtaBar => "cta_bar",
        }
    }

    pub fn parse(tag: &str) -> Option<BlockType> {
        BlockType::ALL.iter().copied().find(|t| t.as_str() == tag)
    }

    /// Human label used by the component library and block badges.
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Hero => "Hero",
            BlockType::VideoBlock => "Video",
            BlockType::StatsCounter => "Stats",
            BlockType::PricingTable => "Pricing",
            BlockType::SocialLinks => "Social",
            BlockType::TeamSection => "Team",
            BlockType::FeaturesGrid => "Features",
            BlockType::NewsTicker => "Ticker",
            BlockType::TextImage => "Text & Img",
            BlockType::Gallery => "Gallery",
            BlockType::Faq => "FAQ",
            BlockType::Divider => "Divider",
            BlockType::CtaBar => "CTA Bar",
        }
    }

    pub fn item_shape(&self) -> Option<ItemShape> {
        match self {
            BlockType::StatsCounter => Some(ItemShape::Stat),
            BlockType::FeaturesGrid => Some(ItemShape::Feature),
            BlockType::Gallery => Some(ItemShape::Gallery),
            BlockType::Faq => Some(ItemShape::Faq),
            _ => None,
        }
    }

    /// Title and subtitle are edited for every type except divider and ticker.
    pub fn has_heading(&self) -> bool {
        !matches!(self, BlockType::Divider | BlockType::NewsTicker)
    }

    pub fn has_body(&self) -> bool {
        matches!(
            self,
            BlockType::Hero | BlockType::TextImage | BlockType::CtaBar | BlockType::NewsTicker
        )
    }

    pub fn has_media(&self) -> bool {
        matches!(
            self,
            BlockType::Hero | BlockType::TextImage | BlockType::VideoBlock
        )
    }

    pub fn has_grid(&self) -> bool {
        matches!(self, BlockType::Gallery | BlockType::FeaturesGrid)
    }
}

// ── Items ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemShape {
    Stat,
    Feature,
    Gallery,
    Faq,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryItem {
    pub title: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// One entry for a block's `items` list, tagged with its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Stat(StatItem),
    Feature(FeatureItem),
    Gallery(GalleryItem),
    Faq(FaqItem),
}

impl BlockItem {
    pub fn shape(&self) -> ItemShape {
        match self {
            BlockItem::Stat(_) => ItemShape::Stat,
            BlockItem::Feature(_) => ItemShape::Feature,
            BlockItem::Gallery(_) => ItemShape::Gallery,
            BlockItem::Faq(_) => ItemShape::Faq,
        }
    }

    /// Placeholder entry the editor appends on "add entry".
    pub fn starter(shape: ItemShape) -> BlockItem {
        match shape {
            ItemShape::Faq => BlockItem::Faq(FaqItem {
                question: "New Question".into(),
                answer: "New Answer".into(),
            }),
            ItemShape::Gallery => BlockItem::Gallery(GalleryItem {
                title: "New Entry".into(),
                image: String::new(),
                subtitle: None,
            }),
            ItemShape::Feature => BlockItem::Feature(FeatureItem {
                title: "New Feature".into(),
                content: String::new(),
                icon: Some(Icon::Zap),
            }),
            ItemShape::Stat => BlockItem::Stat(StatItem {
                label: "Label".into(),
                value: "Value".into(),
            }),
        }
    }
}

/// Field-level update for one entry. The variant must match the block's item shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPatch {
    Stat {
        label: Option<String>,
        value: Option<String>,
    },
    Feature {
        title: Option<String>,
        content: Option<String>,
        icon: Option<Option<Icon>>,
    },
    Gallery {
        title: Option<String>,
        image: Option<String>,
        subtitle: Option<Option<String>>,
    },
    Faq {
        question: Option<String>,
        answer: Option<String>,
    },
}

impl ItemPatch {
    pub fn shape(&self) -> ItemShape {
        match self {
            ItemPatch::Stat { .. } => ItemShape::Stat,
            ItemPatch::Feature { .. } => ItemShape::Feature,
            ItemPatch::Gallery { .. } => ItemShape::Gallery,
            ItemPatch::Faq { .. } => ItemShape::Faq,
        }
    }
}

fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

/// Block type together with its type-specific item list.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Hero,
    VideoBlock,
    StatsCounter(Vec<StatItem>),
    PricingTable,
    SocialLinks,
    TeamSection,
    FeaturesGrid(Vec<FeatureItem>),
    NewsTicker,
    TextImage,
    Gallery(Vec<GalleryItem>),
    Faq(Vec<FaqItem>),
    Divider,
    CtaBar,
}

impl BlockKind {
    /// A kind of the given type with no items.
    pub fn empty(block_type: BlockType) -> BlockKind {
        match block_type {
            BlockType::Hero => BlockKind::Hero,
            BlockType::VideoBlock => BlockKind::VideoBlock,
            BlockType::StatsCounter => BlockKind::StatsCounter(Vec::new()),
            BlockType::PricingTable => BlockKind::PricingTable,
            BlockType::SocialLinks => BlockKind::SocialLinks,
            BlockType::TeamSection => BlockKind::TeamSection,
            BlockType::FeaturesGrid => BlockKind::FeaturesGrid(Vec::new()),
            BlockType::NewsTicker => BlockKind::NewsTicker,
            BlockType::TextImage => BlockKind::TextImage,
            BlockType::Gallery => BlockKind::Gallery(Vec::new()),
            BlockType::Faq => BlockKind::Faq(Vec::new()),
            BlockType::Divider => BlockKind::Divider,
            BlockType::CtaBar => BlockKind::CtaBar,
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Hero => BlockType::Hero,
            BlockKind::VideoBlock => BlockType::VideoBlock,
            BlockKind::StatsCounter(_) => BlockType::StatsCounter,
            BlockKind::PricingTable => BlockType::PricingTable,
            BlockKind::SocialLinks => BlockType::SocialLinks,
            BlockKind::TeamSection => BlockType::TeamSection,
            BlockKind::FeaturesGrid(_) => BlockType::FeaturesGrid,
            BlockKind::NewsTicker => BlockType::NewsTicker,
            BlockKind::TextImage => BlockType::TextImage,
            BlockKind::Gallery(_) => BlockType::Gallery,
            BlockKind::Faq(_) => BlockType::Faq,
            BlockKind::Divider => BlockType::Divider,
            BlockKind::CtaBar => BlockType::CtaBar,
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            BlockKind::StatsCounter(items) => items.len(),
            BlockKind::FeaturesGrid(items) => items.len(),
            BlockKind::Gallery(items) => items.len(),
            BlockKind::Faq(items) => items.len(),
            _ => 0,
        }
    }

    pub fn items(&self) -> Vec<BlockItem> {
        match self {
            BlockKind::StatsCounter(items) => items.iter().cloned().map(BlockItem::Stat).collect(),
            BlockKind::FeaturesGrid(items) => {
                items.iter().cloned().map(BlockItem::Feature).collect()
            }
            BlockKind::Gallery(items) => items.iter().cloned().map(BlockItem::Gallery).collect(),
            BlockKind::Faq(items) => items.iter().cloned().map(BlockItem::Faq).collect(),
            _ => Vec::new(),
        }
    }

    /// Append an entry. Rejects entries whose shape does not belong to this type.
    pub fn push_item(&mut self, item: BlockItem) -> Result<(), String> {
        match (self, item) {
            (BlockKind::StatsCounter(items), BlockItem::Stat(i)) => items.push(i),
            (BlockKind::FeaturesGrid(items), BlockItem::Feature(i)) => items.push(i),
            (BlockKind::Gallery(items), BlockItem::Gallery(i)) => items.push(i),
            (BlockKind::Faq(items), BlockItem::Faq(i)) => items.push(i),
            (kind, item) => {
                return Err(format!(
                    "{:?} entries do not belong to a {} block",
                    item.shape(),
                    kind.block_type().as_str()
                ))
            }
        }
        Ok(())
    }

    /// Merge `patch` into the entry at `index`. `Ok(false)` when the index is out of range.
    pub fn patch_item(&mut self, index: usize, patch: &ItemPatch) -> Result<bool, String> {
        let block_type = self.block_type();
        match (self, patch) {
            (BlockKind::StatsCounter(items), ItemPatch::Stat { label, value }) => {
                let Some(item) = items.get_mut(index) else { return Ok(false) };
                set(&mut item.label, label);
                set(&mut item.value, value);
            }
            (BlockKind::FeaturesGrid(items), ItemPatch::Feature { title, content, icon }) => {
                let Some(item) = items.get_mut(index) else { return Ok(false) };
                set(&mut item.title, title);
                set(&mut item.content, content);
                set(&mut item.icon, icon);
            }
            (BlockKind::Gallery(items), ItemPatch::Gallery { title, image, subtitle }) => {
                let Some(item) = items.get_mut(index) else { return Ok(false) };
                set(&mut item.title, title);
                set(&mut item.image, image);
                set(&mut item.subtitle, subtitle);
            }
            (BlockKind::Faq(items), ItemPatch::Faq { question, answer }) => {
                let Some(item) = items.get_mut(index) else { return Ok(false) };
                set(&mut item.question, question);
                set(&mut item.answer, answer);
            }
            (_, patch) => {
                return Err(format!(
                    "{:?} fields do not belong to a {} block",
                    patch.shape(),
                    block_type.as_str()
                ))
            }
        }
        Ok(true)
    }

    /// Remove the entry at `index`; `false` when there is nothing to remove.
    pub fn remove_item(&mut self, index: usize) -> bool {
        fn take<T>(items: &mut Vec<T>, index: usize) -> bool {
            if index < items.len() {
                items.remove(index);
                true
            } else {
                false
            }
        }
        match self {
            BlockKind::StatsCounter(items) => take(items, index),
            BlockKind::FeaturesGrid(items) => take(items, index),
            BlockKind::Gallery(items) => take(items, index),
            BlockKind::Faq(items) => take(items, index),
            _ => false,
        }
    }

    fn items_to_json(&self) -> Vec<Value> {
        fn encode<T: Serialize>(items: &[T]) -> Vec<Value> {
            items
                .iter()
                .filter_map(|i| serde_json::to_value(i).ok())
                .collect()
        }
        match self {
            BlockKind::StatsCounter(items) => encode(items),
            BlockKind::FeaturesGrid(items) => encode(items),
            BlockKind::Gallery(items) => encode(items),
            BlockKind::Faq(items) => encode(items),
            _ => Vec::new(),
        }
    }

    fn from_json(block_type: BlockType, items: Vec<Value>) -> BlockKind {
        let what = block_type.as_str();
        match block_type {
            BlockType::StatsCounter => BlockKind::StatsCounter(decode_entries(what, items)),
            BlockType::FeaturesGrid => BlockKind::FeaturesGrid(decode_entries(what, items)),
            BlockType::Gallery => BlockKind::Gallery(decode_entries(what, items)),
            BlockType::Faq => BlockKind::Faq(decode_entries(what, items)),
            other => BlockKind::empty(other),
        }
    }
}

// ── Lenient decoding ────────────────────────────────────────────────

fn decode_entries<T: DeserializeOwned>(what: &str, entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Dropping malformed {} entry: {}", what, e);
                None
            }
        })
        .collect()
}

/// Field decoder that falls back to the type's default when the stored value has the
/// wrong shape, so one bad value never rejects the surrounding document.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// List decoder that keeps every entry that decodes and drops the rest with a warning.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        other => {
            warn!("Expected a list, found {}", other);
            Vec::new()
        }
    };
    Ok(decode_entries("list", entries))
}

/// `paddingY` is stored as a string step, but a bare number is accepted too.
fn lenient_padding<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => DEFAULT_PADDING_Y.to_string(),
    })
}

// ── Style ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

pub const DEFAULT_PADDING_Y: &str = "20";
pub const DEFAULT_GRID_COLS: u32 = 3;
pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    #[serde(deserialize_with = "lenient_padding")]
    pub padding_y: String,
    #[serde(deserialize_with = "lenient")]
    pub text_align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub is_dark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub text_color: Option<String>,
    /// Hero overlay opacity in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub overlay_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub background_gradient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub grid_cols: Option<u32>,
}

impl Default for BlockStyle {
    fn default() -> Self {
        BlockStyle {
            padding_y: DEFAULT_PADDING_Y.to_string(),
            text_align: TextAlign::Center,
            is_dark: None,
            text_color: None,
            overlay_opacity: None,
            background_gradient: None,
            grid_cols: None,
        }
    }
}

impl BlockStyle {
    pub fn with_padding(padding_y: &str, text_align: TextAlign) -> Self {
        BlockStyle {
            padding_y: padding_y.to_string(),
            text_align,
            ..Default::default()
        }
    }
}

// ── Block ───────────────────────────────────────────────────────────

/// One content unit of a page. The id and type are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireBlock", into = "WireBlock")]
pub struct PageBlock {
    pub id: String,
    pub kind: BlockKind,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub actions: Vec<SmartLink>,
    pub image: Option<String>,
    pub style: BlockStyle,
}

impl PageBlock {
    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Image URL if one is set and non-blank.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Persisted document shape of a block: `type` and `items` side by side.
#[derive(Serialize, Deserialize)]
struct WireBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: BlockType,
    #[serde(default, deserialize_with = "lenient")]
    title: String,
    #[serde(default, deserialize_with = "lenient")]
    subtitle: String,
    #[serde(default, deserialize_with = "lenient")]
    content: String,
    #[serde(default, deserialize_with = "lenient_list")]
    actions: Vec<SmartLink>,
    #[serde(default, deserialize_with = "lenient")]
    items: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    style: BlockStyle,
}

impl From<WireBlock> for PageBlock {
    fn from(wire: WireBlock) -> Self {
        PageBlock {
            id: wire.id,
            kind: BlockKind::from_json(wire.block_type, wire.items),
            title: wire.title,
            subtitle: wire.subtitle,
            content: wire.content,
            actions: wire.actions,
            image: wire.image,
            style: wire.style,
        }
    }
}

impl From<PageBlock> for WireBlock {
    fn from(block: PageBlock) -> Self {
        WireBlock {
            id: block.id,
            block_type: block.kind.block_type(),
            items: block.kind.items_to_json(),
            title: block.title,
            subtitle: block.subtitle,
            content: block.content,
            actions: block.actions,
            image: block.image,
            style: block.style,
        }
    }
}

/// Shallow field update for a block. Id, type and items are not patchable here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image: Option<Option<String>>,
    pub actions: Option<Vec<SmartLink>>,
    pub style: Option<BlockStyle>,
}

impl BlockPatch {
    pub fn style(style: BlockStyle) -> Self {
        BlockPatch {
            style: Some(style),
            ..Default::default()
        }
    }

    pub fn apply(&self, block: &PageBlock) -> PageBlock {
        let mut next = block.clone();
        set(&mut next.title, &self.title);
        set(&mut next.subtitle, &self.subtitle);
        set(&mut next.content, &self.content);
        set(&mut next.image, &self.image);
        set(&mut next.actions, &self.actions);
        set(&mut next.style, &self.style);
        next
    }
}
