//! Rich text as the host stores it, and its flattening to plain or legacy text
//!
//! Titles and descriptions live in the host as component trees: a run of text
//! with an optional color and decorations, followed by children that inherit
//! the parent's style. Two flattenings are supported:
//!
//! - plain text, concatenating every run depth-first
//! - legacy format codes, where style changes become `&<code>` markers

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The sixteen fixed chat colors and their legacy codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
    ];

    /// Legacy format code character
    pub fn code(self) -> char {
        match self {
            NamedColor::Black => '0',
            NamedColor::DarkBlue => '1',
            NamedColor::DarkGreen => '2',
            NamedColor::DarkAqua => '3',
            NamedColor::DarkRed => '4',
            NamedColor::DarkPurple => '5',
            NamedColor::Gold => '6',
            NamedColor::Gray => '7',
            NamedColor::DarkGray => '8',
            NamedColor::Blue => '9',
            NamedColor::Green => 'a',
            NamedColor::Aqua => 'b',
            NamedColor::Red => 'c',
            NamedColor::LightPurple => 'd',
            NamedColor::Yellow => 'e',
            NamedColor::White => 'f',
        }
    }

    /// RGB value as `0xRRGGBB`
    pub fn rgb(self) -> u32 {
        match self {
            NamedColor::Black => 0x000000,
            NamedColor::DarkBlue => 0x0000AA,
            NamedColor::DarkGreen => 0x00AA00,
            NamedColor::DarkAqua => 0x00AAAA,
            NamedColor::DarkRed => 0xAA0000,
            NamedColor::DarkPurple => 0xAA00AA,
            NamedColor::Gold => 0xFFAA00,
            NamedColor::Gray => 0xAAAAAA,
            NamedColor::DarkGray => 0x555555,
            NamedColor::Blue => 0x5555FF,
            NamedColor::Green => 0x55FF55,
            NamedColor::Aqua => 0x55FFFF,
            NamedColor::Red => 0xFF5555,
            NamedColor::LightPurple => 0xFF55FF,
            NamedColor::Yellow => 0xFFFF55,
            NamedColor::White => 0xFFFFFF,
        }
    }

    /// Closest named color to an arbitrary RGB value
    pub fn nearest(rgb: u32) -> NamedColor {
        let channels = |c: u32| {
            (
                ((c >> 16) & 0xFF) as i32,
                ((c >> 8) & 0xFF) as i32,
                (c & 0xFF) as i32,
            )
        };
        let (r, g, b) = channels(rgb);

        let mut best = NamedColor::White;
        let mut best_distance = i32::MAX;
        for color in NamedColor::ALL {
            let (cr, cg, cb) = channels(color.rgb());
            let distance = (r - cr).pow(2) + (g - cg).pow(2) + (b - cb).pow(2);
            if distance < best_distance {
                best = color;
                best_distance = distance;
            }
        }
        best
    }
}

/// A component color: one of the fixed palette or a free RGB value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    Named(NamedColor),
    Hex(u32),
}

impl TextColor {
    /// Legacy text has no RGB, so hex colors fall back to the nearest named one
    pub fn to_named(self) -> NamedColor {
        match self {
            TextColor::Named(color) => color,
            TextColor::Hex(rgb) => NamedColor::nearest(rgb),
        }
    }
}

impl From<NamedColor> for TextColor {
    fn from(color: NamedColor) -> Self {
        TextColor::Named(color)
    }
}

/// Text decorations, in legacy emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    Obfuscated,
    Bold,
    Strikethrough,
    Underlined,
    Italic,
}

impl Decoration {
    /// Legacy format code character
    pub fn code(self) -> char {
        match self {
            Decoration::Obfuscated => 'k',
            Decoration::Bold => 'l',
            Decoration::Strikethrough => 'm',
            Decoration::Underlined => 'n',
            Decoration::Italic => 'o',
        }
    }
}

/// A rich text tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Component {
    pub text: String,
    #[serde(default)]
    pub color: Option<TextColor>,
    #[serde(default)]
    pub decorations: BTreeSet<Decoration>,
    #[serde(default)]
    pub children: Vec<Component>,
}

impl Component {
    /// Create an unstyled text component
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the color
    pub fn color(mut self, color: impl Into<TextColor>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Add a decoration
    pub fn decorate(mut self, decoration: Decoration) -> Self {
        self.decorations.insert(decoration);
        self
    }

    /// Append a child component
    pub fn append(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Concatenated text of this component and all children, depth-first
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        self.collect_plain(&mut out);
        out
    }

    fn collect_plain(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_plain(out);
        }
    }
}

// =============================================================================
// LEGACY SERIALIZATION
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
struct Style {
    color: Option<NamedColor>,
    decorations: BTreeSet<Decoration>,
}

impl Style {
    fn inherit(&self, component: &Component) -> Style {
        let mut decorations = self.decorations.clone();
        decorations.extend(component.decorations.iter().copied());
        Style {
            color: component.color.map(TextColor::to_named).or(self.color),
            decorations,
        }
    }
}

/// Flattens components into text with legacy format codes
#[derive(Debug, Clone, Copy)]
pub struct LegacySerializer {
    marker: char,
}

impl LegacySerializer {
    /// Serializer using `&` as the format marker
    pub fn ampersand() -> Self {
        Self { marker: '&' }
    }

    /// Serializer using `§` as the format marker
    pub fn section() -> Self {
        Self { marker: '§' }
    }

    /// Serialize a component tree
    pub fn serialize(&self, component: &Component) -> String {
        let mut out = String::new();
        let mut emitted = Style::default();
        self.walk(component, &Style::default(), &mut emitted, &mut out);
        out
    }

    fn walk(&self, component: &Component, parent: &Style, emitted: &mut Style, out: &mut String) {
        let style = parent.inherit(component);

        if !component.text.is_empty() {
            self.apply(&style, emitted, out);
            out.push_str(&component.text);
        }

        for child in &component.children {
            self.walk(child, &style, emitted, out);
        }
    }

    /// Emit the codes that move the output from `emitted` to `target`
    fn apply(&self, target: &Style, emitted: &mut Style, out: &mut String) {
        if target == emitted {
            return;
        }

        let dropped_decoration = emitted
            .decorations
            .iter()
            .any(|d| !target.decorations.contains(d));

        if target.color != emitted.color || dropped_decoration {
            // A color code (or reset) clears all decorations in legacy text
            let code = target.color.map(NamedColor::code).unwrap_or('r');
            self.push_code(code, out);
            for decoration in &target.decorations {
                self.push_code(decoration.code(), out);
            }
        } else {
            for decoration in target.decorations.difference(&emitted.decorations) {
                self.push_code(decoration.code(), out);
            }
        }

        *emitted = target.clone();
    }

    fn push_code(&self, code: char, out: &mut String) {
        out.push(self.marker);
        out.push(code);
    }
}

impl Default for LegacySerializer {
    fn default() -> Self {
        Self::ampersand()
    }
}
