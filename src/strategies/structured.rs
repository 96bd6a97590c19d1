//! Structured display strategy
//!
//! Newer hosts expose a typed display object on the public advancement.
//! Every field comes from its own accessor, so nothing here depends on
//! obfuscated member names.

use super::{
    frame_of, optional_item, required_text, DisplayData, DisplayStrategy, ExtractionContext,
    StrategyKind,
};
use crate::error::LookupResult;

/// Reads the public typed display accessors
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredStrategy;

impl DisplayStrategy for StructuredStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Structured
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> LookupResult<DisplayData> {
        let display = ctx.public_display()?;
        let host = ctx.host();
        let call = |method: &str| host.invoke(&display, method);

        Ok(DisplayData {
            title: required_text(call("getTitle")?, "title")?,
            description: required_text(call("getDescription")?, "description")?,
            icon: optional_item(call("getIcon")?)?,
            show_toast: call("shouldShowToast")?.as_bool()?,
            announce_to_chat: call("shouldAnnounceChat")?.as_bool()?,
            hidden: call("isHidden")?.as_bool()?,
            x: call("getX")?.as_f32()?,
            y: call("getY")?.as_f32()?,
            frame: frame_of(&call("getType")?),
        })
    }
}
