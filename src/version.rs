//! Host version detection
//!
//! The host reports a free-form version string. Only the `1.<minor>[.<patch>]`
//! part matters: it becomes `minor.patch` as a decimal, so `1.19.4` is `19.4`
//! and `1.20` is `20.0`. Everything version-gated compares against that number.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::host::{types, Host};

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"1\.(\d+(?:\.\d+)?)").expect("Invalid regex"));

/// Parse the numeric host version out of a version string.
///
/// Returns `0.0` when nothing matches, which callers treat as "oldest known".
pub fn probe(version: &str) -> f64 {
    VERSION_PATTERN
        .captures(version)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Version facts about the running host, computed once and then read-only
#[derive(Debug, Clone, PartialEq)]
pub struct HostProfile {
    version: f64,
    version_string: String,
    implementation_package: String,
}

impl HostProfile {
    /// Build a profile from raw host facts
    pub fn new(version_string: impl Into<String>, implementation_package: impl Into<String>) -> Self {
        let version_string = version_string.into();
        Self {
            version: probe(&version_string),
            version_string,
            implementation_package: implementation_package.into(),
        }
    }

    /// Ask the host for its version and implementation package
    pub fn detect(host: &dyn Host) -> Self {
        let profile = Self::new(host.version(), host.implementation_package());
        log::debug!(
            "Detected host version {} from '{}' (package {})",
            profile.version,
            profile.version_string,
            profile.implementation_package
        );
        profile
    }

    /// Numeric version (`19.4` for 1.19.4)
    pub fn version(&self) -> f64 {
        self.version
    }

    /// Raw version string reported by the host
    pub fn version_string(&self) -> &str {
        &self.version_string
    }

    /// Implementation package name (`org.bukkit.craftbukkit.v1_20_R3`)
    pub fn implementation_package(&self) -> &str {
        &self.implementation_package
    }

    /// Whether the host is at least `version`
    pub fn at_least(&self, version: f64) -> bool {
        self.version >= version
    }

    /// Revision segment of the implementation package (`v1_16_R3`), if present
    pub fn server_revision(&self) -> Option<&str> {
        self.implementation_package.split('.').nth(3)
    }

    /// Fully qualified name of an implementation class (`advancement.CraftAdvancement`)
    pub fn implementation_class(&self, name: &str) -> String {
        format!("{}.{}", self.implementation_package, name)
    }

    /// Fully qualified name of a class in the revisioned server package
    pub fn legacy_server_class(&self, name: &str) -> Option<String> {
        self.server_revision()
            .map(|revision| format!("net.minecraft.server.{}.{}", revision, name))
    }

    /// Class of namespaced resource keys on this version
    pub fn resource_key_class(&self) -> Option<String> {
        if self.at_least(17.0) {
            Some(types::RESOURCE_KEY.to_string())
        } else {
            self.legacy_server_class("MinecraftKey")
        }
    }

    /// Base class of rich-text components on this version
    pub fn chat_component_class(&self) -> Option<String> {
        if self.at_least(17.0) {
            Some(types::CHAT_COMPONENT.to_string())
        } else {
            self.legacy_server_class("IChatBaseComponent")
        }
    }

    /// Component method that yields plain text
    pub fn plain_text_method(&self) -> &'static str {
        if self.version < 13.0 {
            "toPlainText"
        } else {
            "getString"
        }
    }

    /// Class whose presence marks the server fork with the legacy-text display API
    pub fn fork_marker_class(&self) -> &'static str {
        if self.at_least(12.0) {
            "com.destroystokyo.paper.ParticleBuilder"
        } else {
            "io.papermc.paperclip.Paperclip"
        }
    }
}
