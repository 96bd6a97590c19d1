//! Introspection display strategy
//!
//! Last resort for hosts without a usable public display API. The internal
//! display object is located on the advancement handle by type name, then
//! read member by member using the legacy field names configured for the
//! running version.
//!
//! Text and icon conversion are lenient: a title, description or icon that
//! cannot be converted takes its default. Missing members and null flags or
//! coordinates are not lenient and fail the strategy.

use super::{derived_title, frame_of, DisplayData, DisplayStrategy, ExtractionContext, StrategyKind};
use crate::error::LookupResult;
use crate::host::{FieldFinder, HostValue, ItemStack};

/// Fragment of the internal display type's simple name
const DISPLAY_TYPE: &str = "AdvancementDisplay";
/// Implementation class that wraps internal items
const ITEM_CLASS: &str = "inventory.CraftItemStack";

/// Reads the internal display object by member name
#[derive(Debug, Clone, Copy, Default)]
pub struct IntrospectionStrategy;

impl IntrospectionStrategy {
    /// Flatten an internal chat component to plain text
    fn plain_text(ctx: &ExtractionContext<'_>, value: &HostValue) -> Option<String> {
        let HostValue::Text(component) = value else {
            return None;
        };

        let profile = ctx.profile();
        let chat = profile.chat_component_class()?;
        ctx.host().find_class(&chat)?;

        match ctx.host().component_text(component, profile.plain_text_method()) {
            Ok(text) => Some(text),
            Err(err) => {
                log::debug!("Chat component conversion failed: {}", err);
                None
            }
        }
    }

    /// Wrap the internal item with the constructor taking its runtime type
    fn icon(ctx: &ExtractionContext<'_>, value: &HostValue) -> Option<ItemStack> {
        let item = match value {
            HostValue::Object(item) => item,
            HostValue::Item(item) => return Some(item.clone()),
            _ => return None,
        };

        let class = ctx.profile().implementation_class(ITEM_CLASS);
        let class = ctx.host().find_class(&class)?;

        match ctx.host().construct(&class, item) {
            Ok(HostValue::Item(stack)) => Some(stack),
            Ok(other) => {
                log::debug!("{} produced {} instead of an item", class.simple_name(), other.kind());
                None
            }
            Err(err) => {
                log::debug!("Icon conversion failed: {}", err);
                None
            }
        }
    }
}

impl DisplayStrategy for IntrospectionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Introspection
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> LookupResult<DisplayData> {
        let handle = ctx.handle()?;
        let display = FieldFinder::new(handle)
            .require_by_type_name(DISPLAY_TYPE)?
            .as_object()?;

        let find = FieldFinder::new(display);
        let names = ctx
            .config()
            .introspection
            .field_names_for(ctx.profile().version());

        let title = Self::plain_text(ctx, find.get_by_name(&names.title)?)
            .unwrap_or_else(|| derived_title(ctx.advancement().key()));
        let description = Self::plain_text(ctx, find.get_by_name(&names.description)?)
            .unwrap_or_else(|| ctx.config().fallback_description.clone())
            .replace("\\n", " ");
        let icon = Self::icon(ctx, find.get_by_name(&names.icon)?);

        Ok(DisplayData {
            title,
            description,
            icon,
            x: find.get_by_name(&names.x)?.as_f32()?,
            y: find.get_by_name(&names.y)?.as_f32()?,
            show_toast: find.get_by_name(&names.show_toast)?.as_bool()?,
            announce_to_chat: find.get_by_name(&names.announce_to_chat)?.as_bool()?,
            hidden: find.get_by_name(&names.hidden)?.as_bool()?,
            frame: frame_of(find.get_by_name(&names.frame)?),
        })
    }
}
