//! The normalized advancement record

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::frame::Frame;
use crate::host::{Advancement, HostValue, ItemStack, NamespacedKey};
use crate::shared::SharedData;
use crate::strategies::{derived_title, DisplayData, StrategyKind};
use crate::wrap::wrap;

/// Display metadata of one advancement, read once and never updated
#[derive(Debug, Clone, PartialEq)]
pub struct AdvancementInfo {
    advancement: Advancement,
    source: StrategyKind,
    display: DisplayData,
    criteria: HashMap<String, HostValue>,
    rewards: Option<HostValue>,
    requirements: Option<Vec<Vec<String>>>,
    parent: Option<Advancement>,
    description_width: usize,
}

impl AdvancementInfo {
    /// Assemble a record from one strategy's display data and the shared data.
    ///
    /// Blank titles and descriptions are replaced so neither is ever empty.
    pub(crate) fn new(
        advancement: Advancement,
        source: StrategyKind,
        mut display: DisplayData,
        shared: SharedData,
        fallback_description: &str,
        description_width: usize,
    ) -> Self {
        if display.title.trim().is_empty() {
            display.title = derived_title(advancement.key());
        }
        if display.description.trim().is_empty() {
            display.description = fallback_description.to_string();
        }

        Self {
            advancement,
            source,
            display,
            criteria: shared.criteria,
            rewards: shared.rewards,
            requirements: shared.requirements,
            parent: shared.parent,
            description_width,
        }
    }

    /// The public advancement this record describes
    pub fn advancement(&self) -> &Advancement {
        &self.advancement
    }

    /// Get the advancement key
    pub fn key(&self) -> &NamespacedKey {
        self.advancement.key()
    }

    /// Strategy that produced the display fields
    pub fn source(&self) -> StrategyKind {
        self.source
    }

    /// Get the title, never blank
    pub fn title(&self) -> &str {
        &self.display.title
    }

    /// Get the description, never blank
    pub fn description(&self) -> &str {
        &self.display.description
    }

    /// Description wrapped to `width` characters per line
    pub fn description_lines(&self, width: usize) -> Vec<String> {
        wrap(&self.display.description, width)
    }

    /// Description wrapped to the configured width
    pub fn wrapped_description(&self) -> Vec<String> {
        self.description_lines(self.description_width)
    }

    /// Get the icon item, if any
    pub fn icon(&self) -> Option<&ItemStack> {
        self.display.icon.as_ref()
    }

    /// Whether completion shows a toast
    pub fn shows_toast(&self) -> bool {
        self.display.show_toast
    }

    /// Whether completion is announced in chat
    pub fn announces_to_chat(&self) -> bool {
        self.display.announce_to_chat
    }

    /// Whether the advancement is hidden until completed
    pub fn is_hidden(&self) -> bool {
        self.display.hidden
    }

    /// Get the horizontal tab position
    pub fn x(&self) -> f32 {
        self.display.x
    }

    /// Get the vertical tab position
    pub fn y(&self) -> f32 {
        self.display.y
    }

    /// Get the tab position as `(x, y)`
    pub fn position(&self) -> (f32, f32) {
        (self.display.x, self.display.y)
    }

    /// Get the frame
    pub fn frame(&self) -> Frame {
        self.display.frame
    }

    /// Criteria by name; empty when the advancement has none or they were unreadable
    pub fn criteria(&self) -> &HashMap<String, HostValue> {
        &self.criteria
    }

    /// Get the raw rewards object, if readable
    pub fn rewards(&self) -> Option<&HostValue> {
        self.rewards.as_ref()
    }

    /// Groups of criterion names; the advancement is done once every group has one completed name
    pub fn requirements(&self) -> Option<&[Vec<String>]> {
        self.requirements.as_deref()
    }

    /// Get the parent advancement, if any
    pub fn parent(&self) -> Option<&Advancement> {
        self.parent.as_ref()
    }

    /// Serializable snapshot of the record
    pub fn summary(&self) -> AdvancementSummary {
        let mut criteria: Vec<String> = self.criteria.keys().cloned().collect();
        criteria.sort();

        AdvancementSummary {
            key: self.key().to_string(),
            source: self.source,
            title: self.display.title.clone(),
            description: self.display.description.clone(),
            frame: self.display.frame,
            icon: self.display.icon.clone(),
            show_toast: self.display.show_toast,
            announce_to_chat: self.display.announce_to_chat,
            hidden: self.display.hidden,
            x: self.display.x,
            y: self.display.y,
            criteria,
            requirements: self.requirements.clone(),
            parent: self.parent.as_ref().map(|p| p.key().to_string()),
        }
    }

    /// Summary as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.summary())
    }
}

impl fmt::Display for AdvancementInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}AdvancementInfo{{bukkit={}, parent=", self.source.record_prefix(), self.key())?;
        match &self.parent {
            Some(parent) => write!(f, "{}}}", parent.key()),
            None => write!(f, "null}}"),
        }
    }
}

/// Plain-data view of an `AdvancementInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancementSummary {
    pub key: String,
    pub source: StrategyKind,
    pub title: String,
    pub description: String,
    pub frame: Frame,
    #[serde(default)]
    pub icon: Option<ItemStack>,
    pub show_toast: bool,
    pub announce_to_chat: bool,
    pub hidden: bool,
    pub x: f32,
    pub y: f32,
    /// Criterion names, sorted
    #[serde(default)]
    pub criteria: Vec<String>,
    #[serde(default)]
    pub requirements: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub parent: Option<String>,
}
