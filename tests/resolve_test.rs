//! End-to-end resolution against recorded hosts of different versions

use std::sync::Arc;

use advancement_info::host::{types, ItemConstructor};
use advancement_info::text::NamedColor;
use advancement_info::{
    Advancement, Component, Frame, HostObject, HostValue, ItemStack, NamespacedKey, ResolveError,
    Resolver, ResolverConfig, SnapshotHost, StrategyKind, Visibility,
};

const HANDLE: &str = "net.minecraft.advancements.Advancement";
const DISPLAY: &str = "net.minecraft.advancements.AdvancementDisplay";
const FRAME_TYPE: &str = "net.minecraft.advancements.AdvancementFrameType";
const MODERN_ITEM: &str = "net.minecraft.world.item.ItemStack";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A server generation: version string, implementation package and the
/// names it uses for the internal classes
struct Server {
    version: &'static str,
    package: &'static str,
    chat_class: String,
    key_class: String,
    item_class: String,
    text_method: &'static str,
}

impl Server {
    fn modern() -> Self {
        Self {
            version: "git-Paper-196 (MC: 1.20.4)",
            package: "org.bukkit.craftbukkit.v1_20_R3",
            chat_class: types::CHAT_COMPONENT.to_string(),
            key_class: types::RESOURCE_KEY.to_string(),
            item_class: MODERN_ITEM.to_string(),
            text_method: "getString",
        }
    }

    fn legacy() -> Self {
        Self {
            version: "git-Spigot-79a30d7-acbc348 (MC: 1.12.2)",
            package: "org.bukkit.craftbukkit.v1_12_R1",
            chat_class: "net.minecraft.server.v1_12_R1.IChatBaseComponent".to_string(),
            key_class: "net.minecraft.server.v1_12_R1.MinecraftKey".to_string(),
            item_class: "net.minecraft.server.v1_12_R1.ItemStack".to_string(),
            text_method: "toPlainText",
        }
    }

    fn craft(&self, name: &str) -> String {
        format!("{}.{}", self.package, name)
    }

    fn host(&self) -> SnapshotHost {
        let constructor: ItemConstructor = Arc::new(|item: &HostObject| -> Result<ItemStack, String> {
            match item.invoke("getMaterial") {
                Ok(HostValue::Str(material)) => Ok(ItemStack::new(material, 1)),
                _ => Err("unreadable item".to_string()),
            }
        });

        SnapshotHost::new(self.version, self.package)
            .with_class(&self.craft("advancement.CraftAdvancement"))
            .with_class(&self.chat_class)
            .with_class(&self.key_class)
            .with_text_method(self.text_method)
            .with_constructor(&self.craft("inventory.CraftItemStack"), &self.item_class, constructor)
    }

    fn key(&self, key: &str) -> Arc<HostObject> {
        HostObject::builder(self.key_class.as_str())
            .method("getNamespace", "minecraft")
            .method("getKey", key)
            .build()
    }

    fn display(&self, title: &str, description: &str, frame: &str) -> Arc<HostObject> {
        HostObject::builder(DISPLAY)
            .private_field("a", self.chat_class.as_str(), Component::text(title).color(NamedColor::Yellow))
            .private_field("b", self.chat_class.as_str(), Component::text(description))
            .private_field(
                "c",
                self.item_class.as_str(),
                HostObject::builder(self.item_class.as_str()).method("getMaterial", "GRASS_BLOCK").build(),
            )
            .private_field("e", FRAME_TYPE, HostValue::Enum(frame.to_string()))
            .private_field("f", types::BOOLEAN, true)
            .private_field("g", types::BOOLEAN, false)
            .private_field("h", types::BOOLEAN, false)
            .private_field("i", types::FLOAT, 2.0f32)
            .private_field("j", types::FLOAT, 3.5f32)
            .build()
    }

    fn handle(&self, key: &str, parent: Option<Arc<HostObject>>, display: Arc<HostObject>) -> Arc<HostObject> {
        let mut criteria = std::collections::HashMap::new();
        criteria.insert("has_item".to_string(), HostValue::Null);

        HostObject::builder(HANDLE)
            .private_field("a", self.key_class.as_str(), self.key(key))
            .private_field("b", HANDLE, parent.map(HostValue::Object).unwrap_or_default())
            .private_field("c", DISPLAY, display)
            .private_field("d", "net.minecraft.advancements.AdvancementRewards", HostValue::Null)
            .private_field("e", types::MAP, HostValue::Map(criteria))
            .private_field("f", types::STRING_GRID, HostValue::Grid(vec![vec!["has_item".to_string()]]))
            .build()
    }

    fn advancement(&self, key: &str, handle: Arc<HostObject>, public_display: Option<Arc<HostObject>>) -> Advancement {
        let object = HostObject::builder(self.craft("advancement.CraftAdvancement").as_str())
            .method("getHandle", handle)
            .method("getDisplay", public_display.map(HostValue::Object).unwrap_or_default())
            .build();
        Advancement::new(NamespacedKey::minecraft(key), object)
    }
}

fn typed_display(title: &str) -> Arc<HostObject> {
    HostObject::builder("org.bukkit.craftbukkit.v1_20_R3.advancement.CraftAdvancementDisplay")
        .method("getTitle", title)
        .method("getDescription", "Typed description")
        .method("getIcon", HostValue::Null)
        .method("shouldShowToast", false)
        .method("shouldAnnounceChat", true)
        .method("isHidden", true)
        .method("getX", 4.0f32)
        .method("getY", 1.0f32)
        .method("getType", HostValue::Enum("CHALLENGE".to_string()))
        .build()
}

#[test]
fn test_modern_host_prefers_structured() {
    init_logger();
    let server = Server::modern();
    let handle = server.handle("story/root", None, server.display("Minecraft", "The heart and story of the game", "TASK"));
    let advancement = server.advancement("story/root", handle, Some(typed_display("Minecraft")));

    let host = server.host();
    let info = Resolver::new(&host).resolve(&advancement).unwrap();

    assert_eq!(info.source(), StrategyKind::Structured);
    assert_eq!(info.title(), "Minecraft");
    assert_eq!(info.description(), "Typed description");
    assert_eq!(info.frame(), Frame::Challenge);
    assert_eq!(info.position(), (4.0, 1.0));
    assert!(info.is_hidden());
    assert_eq!(info.icon(), None);
}

#[test]
fn test_falls_back_to_introspection_without_public_display() {
    init_logger();
    let server = Server::modern();
    let handle = server.handle("story/mine_stone", None, server.display("Stone Age", "Mine Stone with your new Pickaxe", "task"));
    let advancement = server.advancement("story/mine_stone", handle, None);

    let host = server.host();
    let info = Resolver::new(&host).resolve(&advancement).unwrap();

    // Every display field comes from the one strategy that succeeded
    assert_eq!(info.source(), StrategyKind::Introspection);
    assert_eq!(info.title(), "Stone Age");
    assert_eq!(info.description(), "Mine Stone with your new Pickaxe");
    assert_eq!(info.icon(), Some(&ItemStack::new("GRASS_BLOCK", 1)));
    assert_eq!(info.position(), (2.0, 3.5));
    assert_eq!(info.frame(), Frame::Task);
    assert!(info.shows_toast());
    assert!(!info.announces_to_chat());
    assert_eq!(info.to_string(), "ReflectAdvancementInfo{bukkit=minecraft:story/mine_stone, parent=null}");
}

#[test]
fn test_old_host_never_tries_structured() {
    init_logger();
    let server = Server::legacy();
    let handle = server.handle("story/mine_stone", None, server.display("Stone Age", "Mine it", "GOAL"));
    // A typed display is present but must not be used below the threshold
    let advancement = server.advancement("story/mine_stone", handle, Some(typed_display("Typed")));

    let host = server.host();
    let resolver = Resolver::new(&host);
    assert_eq!(resolver.plan(), vec![StrategyKind::Introspection]);

    let info = resolver.resolve(&advancement).unwrap();
    assert_eq!(info.source(), StrategyKind::Introspection);
    assert_eq!(info.title(), "Stone Age");
    assert_eq!(info.frame(), Frame::Goal);
}

#[test]
fn test_legacy_text_when_fork_present() {
    init_logger();
    let server = Server::modern();
    let handle = server.handle("story/smelt_iron", None, server.display("Acquire Hardware", "Smelt an Iron Ingot", "TASK"));
    let fork_display = HostObject::builder("io.papermc.paper.advancement.PaperAdvancementDisplay")
        .method("title", Component::text("Acquire Hardware").color(NamedColor::Gold))
        .method("description", Component::text("Smelt an Iron Ingot"))
        .method("icon", ItemStack::new("IRON_INGOT", 1))
        .method("doesShowToast", true)
        .method("isHidden", false)
        .method("doesAnnounceToChat", true)
        .method("frame", HostValue::Enum("TASK".to_string()))
        .build();
    let advancement = server.advancement("story/smelt_iron", handle, Some(fork_display));

    let host = server.host().with_class("com.destroystokyo.paper.ParticleBuilder");
    let info = Resolver::new(&host).resolve(&advancement).unwrap();

    assert_eq!(info.source(), StrategyKind::LegacyText);
    assert_eq!(info.title(), "&6Acquire Hardware");
    assert_eq!(info.position(), (0.0, 0.0));
    assert_eq!(info.icon(), Some(&ItemStack::new("IRON_INGOT", 1)));
}

#[test]
fn test_exhaustion_is_absence() {
    init_logger();
    let server = Server::legacy();
    let sealed = HostObject::builder(HANDLE)
        .declare("c", DISPLAY, Visibility::Sealed, server.display("Hidden", "Sealed away", "TASK"))
        .build();
    let advancement = server.advancement("story/sealed", sealed, None);

    let host = server.host();
    let resolver = Resolver::new(&host);
    assert!(resolver.resolve(&advancement).is_none());

    let ResolveError::StrategyExhausted { attempts } = resolver.try_resolve(&advancement).unwrap_err();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].0, StrategyKind::Introspection);
}

#[test]
fn test_typed_display_ignores_broken_internal_display() {
    init_logger();
    let server = Server::modern();
    // Internal display is incomplete; the typed accessors never read it
    let broken = HostObject::builder(DISPLAY)
        .private_field("a", server.chat_class.as_str(), Component::text("Broken"))
        .build();
    let handle = server.handle("story/broken", None, broken);
    let advancement = server.advancement("story/broken", handle, Some(typed_display("Still Here")));

    let host = server.host();
    let info = Resolver::new(&host).resolve(&advancement).unwrap();

    assert_eq!(info.source(), StrategyKind::Structured);
    assert!(info.criteria().contains_key("has_item"));
    assert_eq!(info.requirements(), Some(&[vec!["has_item".to_string()]][..]));
}

#[test]
fn test_sealed_criteria_leave_display_and_parent_intact() {
    init_logger();
    let server = Server::modern();
    let root_handle = server.handle("story/root", None, server.display("Minecraft", "The heart and story of the game", "TASK"));
    let root = server.advancement("story/root", root_handle.clone(), None);

    let mut criteria = std::collections::HashMap::new();
    criteria.insert("mined".to_string(), HostValue::Null);
    let handle = HostObject::builder(HANDLE)
        .private_field("a", server.key_class.as_str(), server.key("story/mine_stone"))
        .private_field("b", HANDLE, root_handle)
        .private_field("c", DISPLAY, server.display("Stone Age", "Mine Stone", "TASK"))
        .declare("e", types::MAP, Visibility::Sealed, HostValue::Map(criteria))
        .private_field("f", types::STRING_GRID, HostValue::Grid(vec![vec!["mined".to_string()]]))
        .build();
    let advancement = server.advancement("story/mine_stone", handle, Some(typed_display("Stone Age")));

    let host = server.host().with_advancement(root.clone());
    let info = Resolver::new(&host).resolve(&advancement).unwrap();

    assert_eq!(info.source(), StrategyKind::Structured);
    assert_eq!(info.title(), "Stone Age");
    assert!(info.criteria().is_empty());
    assert_eq!(info.requirements(), Some(&[vec!["mined".to_string()]][..]));
    assert_eq!(info.parent(), Some(&root));
}

#[test]
fn test_non_map_criteria_are_empty() {
    init_logger();
    let server = Server::modern();
    let handle = HostObject::builder(HANDLE)
        .private_field("c", DISPLAY, server.display("Stone Age", "Mine Stone", "TASK"))
        .private_field("e", types::MAP, "not a map")
        .private_field("f", types::STRING_GRID, HostValue::Grid(vec![vec!["mined".to_string()]]))
        .build();
    let advancement = server.advancement("story/mine_stone", handle, None);

    let host = server.host();
    let info = Resolver::new(&host).resolve(&advancement).unwrap();

    assert_eq!(info.source(), StrategyKind::Introspection);
    assert_eq!(info.title(), "Stone Age");
    assert!(info.criteria().is_empty());
    assert_eq!(info.requirements(), Some(&[vec!["mined".to_string()]][..]));
}

#[test]
fn test_parent_resolved_from_registry() {
    init_logger();
    let server = Server::modern();
    let root_handle = server.handle("story/root", None, server.display("Minecraft", "The heart and story of the game", "TASK"));
    let root = server.advancement("story/root", root_handle.clone(), None);
    let child_handle = server.handle("story/mine_stone", Some(root_handle), server.display("Stone Age", "Mine Stone", "TASK"));
    let child = server.advancement("story/mine_stone", child_handle, None);

    let host = server.host().with_advancement(root.clone()).with_advancement(child);
    let resolver = Resolver::new(&host);
    let info = resolver.resolve_key(&NamespacedKey::minecraft("story/mine_stone")).unwrap();

    assert_eq!(info.parent(), Some(&root));
    assert_eq!(
        info.to_string(),
        "ReflectAdvancementInfo{bukkit=minecraft:story/mine_stone, parent=minecraft:story/root}"
    );

    let summary = info.summary();
    assert_eq!(summary.parent.as_deref(), Some("minecraft:story/root"));
    assert_eq!(summary.criteria, vec!["has_item"]);
}

#[test]
fn test_holder_wrapped_handle() {
    init_logger();
    let server = Server::modern();
    let handle = server.handle("story/enter_the_nether", None, server.display("We Need to Go Deeper", "Build, light and enter a Nether Portal", "GOAL"));
    let holder = HostObject::builder("net.minecraft.advancements.AdvancementHolder")
        .field("id", types::RESOURCE_KEY, server.key("story/enter_the_nether"))
        .field("value", HANDLE, handle)
        .build();
    let advancement = server.advancement("story/enter_the_nether", holder, None);

    let host = server.host();
    let info = Resolver::new(&host).resolve(&advancement).unwrap();

    assert_eq!(info.title(), "We Need to Go Deeper");
    assert_eq!(info.frame(), Frame::Goal);
    assert_eq!(
        info.description_lines(20),
        vec!["Build, light and", "enter a Nether", "Portal"]
    );
}

#[test]
fn test_configured_order_and_width() {
    init_logger();
    let config = ResolverConfig::from_toml_str(r#"
        description_width = 10

        [[strategies]]
        kind = "introspection"

        [[strategies]]
        kind = "structured"
        min_version = 18.0
    "#).unwrap();

    let server = Server::modern();
    let handle = server.handle("story/mine_stone", None, server.display("Stone Age", "Mine Stone with your new Pickaxe", "TASK"));
    let advancement = server.advancement("story/mine_stone", handle, Some(typed_display("Typed")));

    let host = server.host();
    let info = Resolver::with_config(&host, config).resolve(&advancement).unwrap();

    assert_eq!(info.source(), StrategyKind::Introspection);
    assert_eq!(info.wrapped_description(), vec!["Mine Stone", "with your", "new", "Pickaxe"]);
}
