//! Recorded host fixtures shared by unit tests
//!
//! Modelled on a 1.20.4 server: the public advancement wraps an internal
//! handle holding the display object, criteria, rewards and requirements.

use std::sync::Arc;

use crate::host::{
    types, Advancement, HostObject, HostValue, ItemConstructor, ItemStack, NamespacedKey,
    SnapshotHost,
};
use crate::text::{Component, NamedColor};

pub const PACKAGE: &str = "org.bukkit.craftbukkit.v1_20_R3";
pub const CRAFT_ADVANCEMENT: &str = "org.bukkit.craftbukkit.v1_20_R3.advancement.CraftAdvancement";
pub const CRAFT_ITEM: &str = "org.bukkit.craftbukkit.v1_20_R3.inventory.CraftItemStack";
pub const PUBLIC_DISPLAY: &str = "org.bukkit.craftbukkit.v1_20_R3.advancement.CraftAdvancementDisplay";
pub const HANDLE: &str = "net.minecraft.advancements.Advancement";
pub const INTERNAL_DISPLAY: &str = "net.minecraft.advancements.AdvancementDisplay";
pub const REWARDS: &str = "net.minecraft.advancements.AdvancementRewards";
pub const FRAME_TYPE: &str = "net.minecraft.advancements.AdvancementFrameType";
pub const NMS_ITEM: &str = "net.minecraft.world.item.ItemStack";

pub fn item_constructor() -> ItemConstructor {
    Arc::new(|item: &HostObject| -> Result<ItemStack, String> {
        let material = item
            .invoke("getMaterial")
            .map_err(|e| e.to_string())?
            .display_string()
            .ok_or("no material")?;
        Ok(ItemStack::new(material, 1))
    })
}

/// Host with every class and conversion the strategies can use
pub fn modern_host() -> SnapshotHost {
    SnapshotHost::new("git-Paper-196 (MC: 1.20.4)", PACKAGE)
        .with_class(CRAFT_ADVANCEMENT)
        .with_class(types::CHAT_COMPONENT)
        .with_class(types::RESOURCE_KEY)
        .with_class("com.destroystokyo.paper.ParticleBuilder")
        .with_text_method("getString")
        .with_constructor(CRAFT_ITEM, NMS_ITEM, item_constructor())
}

pub fn nms_item(material: &str) -> Arc<HostObject> {
    HostObject::builder(NMS_ITEM).method("getMaterial", material).build()
}

/// Internal display object, with selected members replaced
pub fn sample_display_with(overrides: Vec<(&str, HostValue)>) -> Arc<HostObject> {
    let defaults: Vec<(&str, &str, HostValue)> = vec![
        ("a", types::CHAT_COMPONENT, Component::text("Stone Age").color(NamedColor::Green).into()),
        ("b", types::CHAT_COMPONENT, Component::text("Mine Stone with your new Pickaxe").into()),
        ("c", NMS_ITEM, nms_item("COBBLESTONE").into()),
        ("d", types::RESOURCE_KEY, HostValue::Null),
        ("e", FRAME_TYPE, HostValue::Enum("TASK".into())),
        ("f", types::BOOLEAN, true.into()),
        ("g", types::BOOLEAN, true.into()),
        ("h", types::BOOLEAN, false.into()),
        ("i", types::FLOAT, 1.0f32.into()),
        ("j", types::FLOAT, 0.5f32.into()),
    ];

    let mut builder = HostObject::builder(INTERNAL_DISPLAY);
    for (name, ty, value) in defaults {
        let value = overrides
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or(value);
        builder = builder.private_field(name, ty, value);
    }
    builder.build()
}

pub fn sample_display() -> Arc<HostObject> {
    sample_display_with(Vec::new())
}

/// Internal handle around the given display object
pub fn handle_with(display: Arc<HostObject>) -> Arc<HostObject> {
    HostObject::builder(HANDLE)
        .private_field("c", HANDLE, HostValue::Null)
        .private_field("d", INTERNAL_DISPLAY, display)
        .private_field("e", REWARDS, HostObject::builder(REWARDS).build())
        .private_field("f", types::MAP, HostValue::Map(Default::default()))
        .private_field("g", types::STRING_GRID, HostValue::Grid(vec![vec!["mined".to_string()]]))
        .build()
}

pub fn sample_handle() -> Arc<HostObject> {
    handle_with(sample_display())
}

/// Public typed display object
pub fn public_display() -> Arc<HostObject> {
    HostObject::builder(PUBLIC_DISPLAY)
        .method("getTitle", "Stone Age")
        .method("getDescription", "Mine Stone with your new Pickaxe")
        .method("getIcon", ItemStack::new("COBBLESTONE", 1))
        .method("shouldShowToast", true)
        .method("shouldAnnounceChat", true)
        .method("isHidden", false)
        .method("getX", 1.0f32)
        .method("getY", 0.5f32)
        .method("getType", HostValue::Enum("TASK".into()))
        .method("title", Component::text("Stone Age").color(NamedColor::Green))
        .method("description", Component::text("Mine Stone with your new Pickaxe"))
        .method("icon", ItemStack::new("COBBLESTONE", 1))
        .method("doesShowToast", true)
        .method("doesAnnounceToChat", true)
        .method("frame", HostValue::Enum("TASK".into()))
        .build()
}

/// Public advancement in the `minecraft` namespace
pub fn advancement(key: &str, handle: Arc<HostObject>, display: Option<Arc<HostObject>>) -> Advancement {
    let display = display.map(HostValue::Object).unwrap_or(HostValue::Null);
    let object = HostObject::builder(CRAFT_ADVANCEMENT)
        .method("getHandle", handle)
        .method("getDisplay", display)
        .build();
    Advancement::new(NamespacedKey::minecraft(key), object)
}
