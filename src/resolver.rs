//! Strategy selection and fallback
//!
//! The resolver probes the host once, picks the strategies enabled for that
//! version from the configuration, and tries them in order for each
//! advancement. The first strategy that completes supplies the display
//! fields; later strategies are never consulted and nothing is merged.

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::host::{Advancement, Host, NamespacedKey};
use crate::record::AdvancementInfo;
use crate::shared::SharedData;
use crate::strategies::{create_strategy, BoxedStrategy, ExtractionContext, StrategyKind};
use crate::version::HostProfile;

/// Resolves advancements against one host
pub struct Resolver<'h> {
    host: &'h dyn Host,
    profile: HostProfile,
    config: ResolverConfig,
    plan: Vec<BoxedStrategy>,
}

impl<'h> Resolver<'h> {
    /// Create a resolver with the default configuration
    pub fn new(host: &'h dyn Host) -> Self {
        Self::with_config(host, ResolverConfig::default())
    }

    /// Create a resolver with a custom configuration
    pub fn with_config(host: &'h dyn Host, config: ResolverConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("Resolver configuration is inconsistent: {}", err);
        }

        let profile = HostProfile::detect(host);
        let plan: Vec<BoxedStrategy> = config
            .strategies_for(profile.version())
            .into_iter()
            .map(create_strategy)
            .collect();

        log::info!(
            "Advancement resolver for {} using [{}]",
            profile.version_string(),
            plan.iter()
                .map(|s| s.kind().name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            host,
            profile,
            config,
            plan,
        }
    }

    /// Get the host profile
    pub fn profile(&self) -> &HostProfile {
        &self.profile
    }

    /// Get the configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Strategies that will be tried, in order
    pub fn plan(&self) -> Vec<StrategyKind> {
        self.plan.iter().map(|s| s.kind()).collect()
    }

    /// Resolve an advancement, reporting every failed attempt on exhaustion
    pub fn try_resolve(&self, advancement: &Advancement) -> Result<AdvancementInfo, ResolveError> {
        let shared = SharedData::extract(self.host, &self.profile, advancement);
        let ctx = ExtractionContext::new(
            self.host,
            &self.profile,
            &self.config,
            advancement,
            &shared.handle,
        );

        let mut attempts = Vec::new();
        for strategy in &self.plan {
            let kind = strategy.kind();
            log::debug!("Trying {} strategy for {}", kind, advancement.key());

            match strategy.extract(&ctx) {
                Ok(display) => {
                    log::debug!("Resolved {} with {} strategy", advancement.key(), kind);
                    return Ok(AdvancementInfo::new(
                        advancement.clone(),
                        kind,
                        display,
                        shared,
                        &self.config.fallback_description,
                        self.config.description_width,
                    ));
                }
                Err(err) => {
                    log::debug!("{} strategy failed for {}: {}", kind, advancement.key(), err);
                    attempts.push((kind, err));
                }
            }
        }

        log::warn!(
            "No display strategy could read {} ({} attempted)",
            advancement.key(),
            attempts.len()
        );
        Err(ResolveError::StrategyExhausted { attempts })
    }

    /// Resolve an advancement; `None` when no strategy could read it
    pub fn resolve(&self, advancement: &Advancement) -> Option<AdvancementInfo> {
        self.try_resolve(advancement).ok()
    }

    /// Look an advancement up in the host registry and resolve it
    pub fn resolve_key(&self, key: &NamespacedKey) -> Option<AdvancementInfo> {
        let advancement = self.host.advancement(key)?;
        self.resolve(&advancement)
    }
}
