//! Display extraction strategies
//!
//! Each strategy reads the display half of an advancement (title, description,
//! icon, flags, position, frame) through a different host surface:
//!
//! - **Structured**: the typed display accessors newer hosts expose
//! - **Legacy text**: the server fork's display API, with rich text flattened
//!   to legacy `&` codes
//! - **Introspection**: the internal display object, read member by member
//!
//! A strategy either returns a complete `DisplayData` or fails; it never
//! hands back a partially filled record.

pub mod introspection;
pub mod legacy_text;
pub mod structured;

pub use introspection::IntrospectionStrategy;
pub use legacy_text::LegacyTextStrategy;
pub use structured::StructuredStrategy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::error::{LookupError, LookupResult};
use crate::frame::Frame;
use crate::host::{Advancement, Host, HostObject, HostValue, ItemStack, NamespacedKey};
use crate::version::HostProfile;

/// Strategy identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Typed display accessors
    Structured,
    /// Server fork display API with legacy text
    LegacyText,
    /// Internal display object by member name
    Introspection,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Structured,
        StrategyKind::LegacyText,
        StrategyKind::Introspection,
    ];

    /// Configuration name
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Structured => "structured",
            StrategyKind::LegacyText => "legacy_text",
            StrategyKind::Introspection => "introspection",
        }
    }

    /// Prefix of a record's display form (`BukkitAdvancementInfo{...}`)
    pub fn record_prefix(self) -> &'static str {
        match self {
            StrategyKind::Structured => "Bukkit",
            StrategyKind::LegacyText => "Paper",
            StrategyKind::Introspection => "Reflect",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structured" | "bukkit" => Ok(StrategyKind::Structured),
            "legacy_text" | "legacytext" | "paper" => Ok(StrategyKind::LegacyText),
            "introspection" | "reflect" => Ok(StrategyKind::Introspection),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// Display fields produced by one strategy
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayData {
    pub title: String,
    pub description: String,
    pub icon: Option<ItemStack>,
    pub show_toast: bool,
    pub announce_to_chat: bool,
    pub hidden: bool,
    pub x: f32,
    pub y: f32,
    pub frame: Frame,
}

/// Everything a strategy may read while extracting
pub struct ExtractionContext<'a> {
    host: &'a dyn Host,
    profile: &'a HostProfile,
    config: &'a ResolverConfig,
    advancement: &'a Advancement,
    handle: &'a LookupResult<Arc<HostObject>>,
}

impl<'a> ExtractionContext<'a> {
    /// Create a context for one advancement
    pub fn new(
        host: &'a dyn Host,
        profile: &'a HostProfile,
        config: &'a ResolverConfig,
        advancement: &'a Advancement,
        handle: &'a LookupResult<Arc<HostObject>>,
    ) -> Self {
        Self {
            host,
            profile,
            config,
            advancement,
            handle,
        }
    }

    /// Get the host
    pub fn host(&self) -> &'a dyn Host {
        self.host
    }

    /// Get the host profile
    pub fn profile(&self) -> &'a HostProfile {
        self.profile
    }

    /// Get the configuration
    pub fn config(&self) -> &'a ResolverConfig {
        self.config
    }

    /// The public advancement being resolved
    pub fn advancement(&self) -> &'a Advancement {
        self.advancement
    }

    /// Internal handle behind the advancement, or why it could not be obtained
    pub fn handle(&self) -> LookupResult<&'a HostObject> {
        match self.handle {
            Ok(handle) => Ok(Arc::as_ref(handle)),
            Err(err) => Err(err.clone()),
        }
    }

    /// The public display object (`getDisplay`), which must be present
    pub fn public_display(&self) -> LookupResult<Arc<HostObject>> {
        let object = self.advancement.object();
        match self.host.invoke(object, "getDisplay")? {
            HostValue::Null => Err(LookupError::not_found(
                object.class().name(),
                "display (getDisplay returned null)",
            )),
            value => Ok(value.as_object()?.clone()),
        }
    }
}

/// A way of reading advancement display data from the host
pub trait DisplayStrategy: Send + Sync {
    /// Get the strategy kind
    fn kind(&self) -> StrategyKind;

    /// Whether the host can serve this strategy at all, checked before extraction
    fn is_supported(&self, _ctx: &ExtractionContext<'_>) -> LookupResult<()> {
        Ok(())
    }

    /// Read every display field, or fail without producing anything
    fn extract(&self, ctx: &ExtractionContext<'_>) -> LookupResult<DisplayData>;
}

/// Boxed strategy type
pub type BoxedStrategy = Box<dyn DisplayStrategy>;

/// Create the strategy for a kind
pub fn create_strategy(kind: StrategyKind) -> BoxedStrategy {
    match kind {
        StrategyKind::Structured => Box::new(StructuredStrategy),
        StrategyKind::LegacyText => Box::new(LegacyTextStrategy),
        StrategyKind::Introspection => Box::new(IntrospectionStrategy),
    }
}

/// Human-readable name derived from a key (`story/mine_stone` -> `Mine Stone`)
pub fn derived_title(key: &NamespacedKey) -> String {
    let last = key.key.rsplit('/').next().unwrap_or(&key.key);
    last.replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Read a string returned by a typed accessor; rich text is flattened to plain text
pub(crate) fn required_text(value: HostValue, what: &str) -> LookupResult<String> {
    match value {
        HostValue::Str(s) => Ok(s),
        HostValue::Text(component) => Ok(component.plain_text()),
        HostValue::Null => Err(LookupError::not_found("display", format!("{} (null)", what))),
        other => Err(LookupError::type_mismatch("text", other.kind())),
    }
}

/// Read an optional item returned by a typed accessor
pub(crate) fn optional_item(value: HostValue) -> LookupResult<Option<ItemStack>> {
    match value {
        HostValue::Item(item) => Ok(Some(item)),
        HostValue::Null => Ok(None),
        other => Err(LookupError::type_mismatch("item", other.kind())),
    }
}

/// Classify a frame value (an enum constant, or anything with a name)
pub(crate) fn frame_of(value: &HostValue) -> Frame {
    Frame::from_name(value.display_string().as_deref())
}
