//! Advancement Info
//!
//! Version-tolerant extraction of advancement display metadata from a host
//! server whose internals change from release to release.
//!
//! The crate provides:
//! - A host boundary (`Host`, `HostObject`, `FieldFinder`) for reading opaque
//!   host objects by declared type, type-name fragment or member name
//! - Three display strategies with version-gated fallback (`Resolver`)
//! - A normalized, immutable record (`AdvancementInfo`)
//! - Fixed-width description wrapping (`wrap`)
//!
//! # Example
//!
//! ```ignore
//! use advancement_info::{NamespacedKey, Resolver};
//!
//! let resolver = Resolver::new(&host);
//! if let Some(info) = resolver.resolve_key(&NamespacedKey::minecraft("story/mine_stone")) {
//!     println!("{} - {}", info.title(), info.description());
//!     for line in info.description_lines(30) {
//!         println!("  {}", line);
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod host;
pub mod record;
pub mod resolver;
pub mod shared;
pub mod strategies;
pub mod text;
pub mod version;
pub mod wrap;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{DisplayFieldNames, FieldNameOverride, IntrospectionConfig, ResolverConfig, StrategyRule};
pub use error::{ConfigError, LookupError, LookupResult, ResolveError};
pub use frame::Frame;
pub use host::{
    Advancement, FieldFinder, Host, HostObject, HostValue, ItemStack, NamespacedKey, SnapshotHost,
    TypeRef, Visibility,
};
pub use record::{AdvancementInfo, AdvancementSummary};
pub use resolver::Resolver;
pub use strategies::{DisplayData, DisplayStrategy, StrategyKind};
pub use text::{Component, LegacySerializer};
pub use version::{probe, HostProfile};
pub use wrap::wrap;
