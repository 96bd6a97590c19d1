//! Legacy text display strategy
//!
//! The server fork exposes the display object with rich-text title and
//! description. Those are flattened with the `&` legacy serializer so color
//! and decoration codes survive. The fork does not expose the position, so
//! `x` and `y` are always zero.

use super::{frame_of, optional_item, DisplayData, DisplayStrategy, ExtractionContext, StrategyKind};
use crate::error::{LookupError, LookupResult};
use crate::host::HostValue;
use crate::text::LegacySerializer;

/// Reads the server fork's display API
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyTextStrategy;

impl LegacyTextStrategy {
    fn serialize(value: HostValue, what: &str) -> LookupResult<String> {
        match value {
            HostValue::Text(component) => Ok(LegacySerializer::ampersand().serialize(&component)),
            HostValue::Str(s) => Ok(s),
            HostValue::Null => Err(LookupError::not_found("display", format!("{} component", what))),
            other => Err(LookupError::type_mismatch("component", other.kind())),
        }
    }
}

impl DisplayStrategy for LegacyTextStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LegacyText
    }

    fn is_supported(&self, ctx: &ExtractionContext<'_>) -> LookupResult<()> {
        let marker = ctx.profile().fork_marker_class();
        match ctx.host().find_class(marker) {
            Some(_) => Ok(()),
            None => Err(LookupError::not_found("host", format!("class {}", marker))),
        }
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> LookupResult<DisplayData> {
        self.is_supported(ctx)?;

        let display = ctx.public_display()?;
        let host = ctx.host();
        let call = |method: &str| host.invoke(&display, method);

        Ok(DisplayData {
            title: Self::serialize(call("title")?, "title")?,
            description: Self::serialize(call("description")?, "description")?,
            icon: optional_item(call("icon")?)?,
            show_toast: call("doesShowToast")?.as_bool()?,
            hidden: call("isHidden")?.as_bool()?,
            announce_to_chat: call("doesAnnounceToChat")?.as_bool()?,
            x: 0.0,
            y: 0.0,
            frame: frame_of(&call("frame")?),
        })
    }
}
