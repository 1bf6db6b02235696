//! Item style properties.
//!
//! Every item carries a [`Style`]: a bag of typed values keyed by
//! [`StyleKey`]. Lookups fall back to a process-wide defaults map and then
//! to a caller-supplied value. A string-keyed facade ([`StyleKey::from_name`],
//! [`Style::set_named`]) serves hosts that address properties by name.

use crate::error::{StyleError, StyleResult};
use crate::painter::{Brush, Font, Pen, TextAlignment};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, RwLock};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StyleColor {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Replace alpha with `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }
}

impl From<Color> for StyleColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<StyleColor> for Color {
    fn from(color: StyleColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke pattern of a pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PenStyle {
    NoPen,
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

/// Fill pattern of a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrushStyle {
    NoBrush,
    #[default]
    Solid,
}

/// Shape drawn at open stroke ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CapStyle {
    Flat,
    Square,
    #[default]
    Round,
}

/// Shape drawn where stroke segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JoinStyle {
    Miter,
    Bevel,
    #[default]
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Decoration drawn at the start or end of line-like items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArrowStyle {
    #[default]
    None,
    Normal,
    Reverse,
    Triangle,
    TriangleFilled,
    Concave,
    ConcaveFilled,
    Circle,
    CircleFilled,
    Diamond,
    DiamondFilled,
    Harpoon,
    HarpoonMirrored,
    X,
}

impl ArrowStyle {
    /// Filled with the pen color rather than the background.
    pub fn is_filled(self) -> bool {
        matches!(
            self,
            ArrowStyle::TriangleFilled
                | ArrowStyle::ConcaveFilled
                | ArrowStyle::CircleFilled
                | ArrowStyle::DiamondFilled
        )
    }

    /// Closed outline filled with the scene background.
    pub fn is_hollow(self) -> bool {
        matches!(
            self,
            ArrowStyle::Triangle | ArrowStyle::Concave | ArrowStyle::Circle | ArrowStyle::Diamond
        )
    }
}

/// Type of value a [`StyleKey`] expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Number,
    Text,
    Color,
    PenStyle,
    BrushStyle,
    CapStyle,
    JoinStyle,
    HorizontalAlignment,
    VerticalAlignment,
    ArrowStyle,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Text => "text",
            ValueKind::Color => "color",
            ValueKind::PenStyle => "pen style",
            ValueKind::BrushStyle => "brush style",
            ValueKind::CapStyle => "cap style",
            ValueKind::JoinStyle => "join style",
            ValueKind::HorizontalAlignment => "horizontal alignment",
            ValueKind::VerticalAlignment => "vertical alignment",
            ValueKind::ArrowStyle => "arrow style",
        };
        f.write_str(name)
    }
}

/// Closed set of style properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleKey {
    PenStyle,
    PenColor,
    PenOpacity,
    PenWidth,
    PenCapStyle,
    PenJoinStyle,
    BrushStyle,
    BrushColor,
    BrushOpacity,
    FontFamily,
    FontSize,
    FontBold,
    FontItalic,
    FontUnderline,
    FontOverline,
    FontStrikeThrough,
    TextColor,
    TextOpacity,
    TextAlignmentHorizontal,
    TextAlignmentVertical,
    Caption,
    CornerRadius,
    StartArrowStyle,
    StartArrowSize,
    EndArrowStyle,
    EndArrowSize,
}

impl StyleKey {
    pub const ALL: [StyleKey; 26] = [
        StyleKey::PenStyle,
        StyleKey::PenColor,
        StyleKey::PenOpacity,
        StyleKey::PenWidth,
        StyleKey::PenCapStyle,
        StyleKey::PenJoinStyle,
        StyleKey::BrushStyle,
        StyleKey::BrushColor,
        StyleKey::BrushOpacity,
        StyleKey::FontFamily,
        StyleKey::FontSize,
        StyleKey::FontBold,
        StyleKey::FontItalic,
        StyleKey::FontUnderline,
        StyleKey::FontOverline,
        StyleKey::FontStrikeThrough,
        StyleKey::TextColor,
        StyleKey::TextOpacity,
        StyleKey::TextAlignmentHorizontal,
        StyleKey::TextAlignmentVertical,
        StyleKey::Caption,
        StyleKey::CornerRadius,
        StyleKey::StartArrowStyle,
        StyleKey::StartArrowSize,
        StyleKey::EndArrowStyle,
        StyleKey::EndArrowSize,
    ];

    /// External (kebab-case) property name.
    pub fn name(self) -> &'static str {
        match self {
            StyleKey::PenStyle => "pen-style",
            StyleKey::PenColor => "pen-color",
            StyleKey::PenOpacity => "pen-opacity",
            StyleKey::PenWidth => "pen-width",
            StyleKey::PenCapStyle => "pen-cap-style",
            StyleKey::PenJoinStyle => "pen-join-style",
            StyleKey::BrushStyle => "brush-style",
            StyleKey::BrushColor => "brush-color",
            StyleKey::BrushOpacity => "brush-opacity",
            StyleKey::FontFamily => "font-family",
            StyleKey::FontSize => "font-size",
            StyleKey::FontBold => "font-bold",
            StyleKey::FontItalic => "font-italic",
            StyleKey::FontUnderline => "font-underline",
            StyleKey::FontOverline => "font-overline",
            StyleKey::FontStrikeThrough => "font-strike-through",
            StyleKey::TextColor => "text-color",
            StyleKey::TextOpacity => "text-opacity",
            StyleKey::TextAlignmentHorizontal => "text-alignment-horizontal",
            StyleKey::TextAlignmentVertical => "text-alignment-vertical",
            StyleKey::Caption => "caption",
            StyleKey::CornerRadius => "corner-radius",
            StyleKey::StartArrowStyle => "start-arrow-style",
            StyleKey::StartArrowSize => "start-arrow-size",
            StyleKey::EndArrowStyle => "end-arrow-style",
            StyleKey::EndArrowSize => "end-arrow-size",
        }
    }

    /// Look up a key by its external name.
    pub fn from_name(name: &str) -> Option<StyleKey> {
        StyleKey::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// Value kind this key accepts.
    pub fn kind(self) -> ValueKind {
        match self {
            StyleKey::PenStyle => ValueKind::PenStyle,
            StyleKey::PenCapStyle => ValueKind::CapStyle,
            StyleKey::PenJoinStyle => ValueKind::JoinStyle,
            StyleKey::BrushStyle => ValueKind::BrushStyle,
            StyleKey::PenColor | StyleKey::BrushColor | StyleKey::TextColor => ValueKind::Color,
            StyleKey::PenOpacity
            | StyleKey::PenWidth
            | StyleKey::BrushOpacity
            | StyleKey::FontSize
            | StyleKey::TextOpacity
            | StyleKey::CornerRadius
            | StyleKey::StartArrowSize
            | StyleKey::EndArrowSize => ValueKind::Number,
            StyleKey::FontBold
            | StyleKey::FontItalic
            | StyleKey::FontUnderline
            | StyleKey::FontOverline
            | StyleKey::FontStrikeThrough => ValueKind::Bool,
            StyleKey::FontFamily | StyleKey::Caption => ValueKind::Text,
            StyleKey::TextAlignmentHorizontal => ValueKind::HorizontalAlignment,
            StyleKey::TextAlignmentVertical => ValueKind::VerticalAlignment,
            StyleKey::StartArrowStyle | StyleKey::EndArrowStyle => ValueKind::ArrowStyle,
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Color(StyleColor),
    PenStyle(PenStyle),
    BrushStyle(BrushStyle),
    Cap(CapStyle),
    Join(JoinStyle),
    HAlign(HorizontalAlignment),
    VAlign(VerticalAlignment),
    Arrow(ArrowStyle),
}

impl StyleValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            StyleValue::Bool(_) => ValueKind::Bool,
            StyleValue::Number(_) => ValueKind::Number,
            StyleValue::Text(_) => ValueKind::Text,
            StyleValue::Color(_) => ValueKind::Color,
            StyleValue::PenStyle(_) => ValueKind::PenStyle,
            StyleValue::BrushStyle(_) => ValueKind::BrushStyle,
            StyleValue::Cap(_) => ValueKind::CapStyle,
            StyleValue::Join(_) => ValueKind::JoinStyle,
            StyleValue::HAlign(_) => ValueKind::HorizontalAlignment,
            StyleValue::VAlign(_) => ValueKind::VerticalAlignment,
            StyleValue::Arrow(_) => ValueKind::ArrowStyle,
        }
    }
}

macro_rules! style_value_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for StyleValue {
                fn from(value: $ty) -> Self {
                    StyleValue::$variant(value)
                }
            }

            impl FromStyleValue for $ty {
                fn from_style_value(value: &StyleValue) -> Option<Self> {
                    match value {
                        StyleValue::$variant(inner) => Some(inner.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

/// Extraction of a concrete type from a [`StyleValue`].
pub trait FromStyleValue: Sized {
    fn from_style_value(value: &StyleValue) -> Option<Self>;
}

style_value_conversions! {
    bool => Bool,
    f64 => Number,
    String => Text,
    StyleColor => Color,
    PenStyle => PenStyle,
    BrushStyle => BrushStyle,
    CapStyle => Cap,
    JoinStyle => Join,
    HorizontalAlignment => HAlign,
    VerticalAlignment => VAlign,
    ArrowStyle => Arrow,
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<Color> for StyleValue {
    fn from(value: Color) -> Self {
        StyleValue::Color(value.into())
    }
}

static DEFAULT_VALUES: LazyLock<RwLock<HashMap<StyleKey, StyleValue>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Set a process-wide default consulted when a style lacks `key`.
///
/// Returns `false` when the value kind does not match the key.
pub fn set_default_value(key: StyleKey, value: impl Into<StyleValue>) -> bool {
    let value = value.into();
    if value.kind() != key.kind() {
        return false;
    }
    DEFAULT_VALUES
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(key, value);
    true
}

pub fn unset_default_value(key: StyleKey) {
    DEFAULT_VALUES
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .remove(&key);
}

pub fn clear_default_values() {
    DEFAULT_VALUES
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .clear();
}

pub fn default_value(key: StyleKey) -> Option<StyleValue> {
    DEFAULT_VALUES
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(&key)
        .cloned()
}

pub fn has_default_value(key: StyleKey) -> bool {
    DEFAULT_VALUES
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .contains_key(&key)
}

/// Snapshot of all process-wide defaults.
pub fn default_values() -> HashMap<StyleKey, StyleValue> {
    DEFAULT_VALUES
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Replace all process-wide defaults. Entries of the wrong kind are dropped.
pub fn set_default_values(values: HashMap<StyleKey, StyleValue>) {
    let values = values
        .into_iter()
        .filter(|(key, value)| value.kind() == key.kind())
        .collect();
    *DEFAULT_VALUES.write().unwrap_or_else(|e| e.into_inner()) = values;
}

/// Property bag attached to each item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    values: HashMap<StyleKey, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value. Returns `false` (and leaves the style untouched) when
    /// the value kind does not match the key.
    pub fn set(&mut self, key: StyleKey, value: impl Into<StyleValue>) -> bool {
        let value = value.into();
        if value.kind() != key.kind() {
            return false;
        }
        self.values.insert(key, value);
        true
    }

    pub fn unset(&mut self, key: StyleKey) -> Option<StyleValue> {
        self.values.remove(&key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn has(&self, key: StyleKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Own value only, without consulting defaults.
    pub fn value(&self, key: StyleKey) -> Option<&StyleValue> {
        self.values.get(&key)
    }

    pub fn values(&self) -> &HashMap<StyleKey, StyleValue> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Own value, else the process-wide default.
    pub fn value_lookup(&self, key: StyleKey) -> Option<StyleValue> {
        self.values.get(&key).cloned().or_else(|| default_value(key))
    }

    /// Typed lookup: own value, then default, then `fallback`.
    pub fn get<T: FromStyleValue>(&self, key: StyleKey, fallback: T) -> T {
        self.value_lookup(key)
            .and_then(|value| T::from_style_value(&value))
            .unwrap_or(fallback)
    }

    /// Set a value addressed by its external name.
    pub fn set_named(&mut self, name: &str, value: StyleValue) -> StyleResult<()> {
        let key =
            StyleKey::from_name(name).ok_or_else(|| StyleError::UnknownKey(name.to_string()))?;
        if value.kind() != key.kind() {
            return Err(StyleError::TypeMismatch {
                key: key.name(),
                expected: key.kind(),
                found: value.kind(),
            });
        }
        self.values.insert(key, value);
        Ok(())
    }

    /// Look up a value by external name, consulting defaults.
    pub fn value_named(&self, name: &str) -> StyleResult<Option<StyleValue>> {
        let key =
            StyleKey::from_name(name).ok_or_else(|| StyleError::UnknownKey(name.to_string()))?;
        Ok(self.value_lookup(key))
    }

    pub fn pen(&self) -> Pen {
        let color = self.get(StyleKey::PenColor, StyleColor::BLACK);
        let opacity = self.get(StyleKey::PenOpacity, 1.0);
        Pen {
            color: color.with_opacity(opacity).into(),
            width: self.get(StyleKey::PenWidth, 1.0),
            style: self.get(StyleKey::PenStyle, PenStyle::Solid),
            cap: self.get(StyleKey::PenCapStyle, CapStyle::Round),
            join: self.get(StyleKey::PenJoinStyle, JoinStyle::Round),
        }
    }

    pub fn brush(&self) -> Brush {
        let color = self.get(StyleKey::BrushColor, StyleColor::WHITE);
        let opacity = self.get(StyleKey::BrushOpacity, 1.0);
        Brush {
            color: color.with_opacity(opacity).into(),
            style: self.get(StyleKey::BrushStyle, BrushStyle::Solid),
        }
    }

    pub fn font(&self) -> Font {
        Font {
            family: self.get(StyleKey::FontFamily, "Arial".to_string()),
            size: self.get(StyleKey::FontSize, 1.0),
            bold: self.get(StyleKey::FontBold, false),
            italic: self.get(StyleKey::FontItalic, false),
            underline: self.get(StyleKey::FontUnderline, false),
            overline: self.get(StyleKey::FontOverline, false),
            strike_through: self.get(StyleKey::FontStrikeThrough, false),
        }
    }

    /// Solid brush used to fill text glyphs.
    pub fn text_brush(&self) -> Brush {
        let color = self.get(StyleKey::TextColor, StyleColor::BLACK);
        let opacity = self.get(StyleKey::TextOpacity, 1.0);
        Brush {
            color: color.with_opacity(opacity).into(),
            style: BrushStyle::Solid,
        }
    }

    pub fn text_alignment(&self) -> TextAlignment {
        TextAlignment {
            horizontal: self.get(StyleKey::TextAlignmentHorizontal, HorizontalAlignment::Center),
            vertical: self.get(StyleKey::TextAlignmentVertical, VerticalAlignment::Center),
        }
    }

    pub fn start_arrow(&self) -> (ArrowStyle, f64) {
        (
            self.get(StyleKey::StartArrowStyle, ArrowStyle::None),
            self.get(StyleKey::StartArrowSize, 0.0),
        )
    }

    pub fn end_arrow(&self) -> (ArrowStyle, f64) {
        (
            self.get(StyleKey::EndArrowStyle, ArrowStyle::None),
            self.get(StyleKey::EndArrowSize, 0.0),
        )
    }

    pub(crate) fn init_pen(&mut self) {
        self.init(StyleKey::PenStyle, PenStyle::Solid);
        self.init(StyleKey::PenColor, StyleColor::BLACK);
        self.init(StyleKey::PenOpacity, 1.0);
        self.init(StyleKey::PenWidth, 12.0);
        self.init(StyleKey::PenCapStyle, CapStyle::Round);
        self.init(StyleKey::PenJoinStyle, JoinStyle::Round);
    }

    pub(crate) fn init_brush(&mut self) {
        self.init(StyleKey::BrushStyle, BrushStyle::Solid);
        self.init(StyleKey::BrushColor, StyleColor::WHITE);
        self.init(StyleKey::BrushOpacity, 1.0);
    }

    pub(crate) fn init_arrows(&mut self) {
        self.init(StyleKey::StartArrowStyle, ArrowStyle::None);
        self.init(StyleKey::StartArrowSize, 100.0);
        self.init(StyleKey::EndArrowStyle, ArrowStyle::None);
        self.init(StyleKey::EndArrowSize, 100.0);
    }

    pub(crate) fn init_text(&mut self) {
        self.init(StyleKey::FontFamily, "Arial");
        self.init(StyleKey::FontSize, 100.0);
        self.init(StyleKey::FontBold, false);
        self.init(StyleKey::FontItalic, false);
        self.init(StyleKey::FontUnderline, false);
        self.init(StyleKey::FontOverline, false);
        self.init(StyleKey::FontStrikeThrough, false);
        self.init(StyleKey::TextColor, StyleColor::BLACK);
        self.init(StyleKey::TextOpacity, 1.0);
        self.init(StyleKey::TextAlignmentHorizontal, HorizontalAlignment::Center);
        self.init(StyleKey::TextAlignmentVertical, VerticalAlignment::Center);
        self.init(StyleKey::Caption, "");
    }

    /// Store the default for `key` if one is registered, else `fallback`.
    fn init(&mut self, key: StyleKey, fallback: impl Into<StyleValue>) {
        let value = default_value(key).unwrap_or_else(|| fallback.into());
        self.values.insert(key, value);
    }
}
