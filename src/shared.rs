//! Data read from the internal handle regardless of display strategy
//!
//! Criteria, rewards, requirements and the parent are extracted once per
//! resolution, before any display strategy runs. Each one fails on its own:
//! a missing requirements member leaves requirements absent and nothing else.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{LookupError, LookupResult};
use crate::host::{types, Advancement, FieldFinder, Host, HostObject, HostValue, NamespacedKey, TypeRef};
use crate::version::HostProfile;

/// Fragment of the wrapper type newer hosts put around the handle
const HOLDER_TYPE: &str = "AdvancementHolder";
const HANDLE_TYPE: &str = "Advancement";
const REWARDS_TYPE: &str = "AdvancementRewards";
const REQUIREMENTS_TYPE: &str = "AdvancementRequirements";

/// Strategy-independent advancement data
#[derive(Debug, Clone)]
pub struct SharedData {
    pub handle: LookupResult<Arc<HostObject>>,
    pub criteria: HashMap<String, HostValue>,
    pub rewards: Option<HostValue>,
    pub requirements: Option<Vec<Vec<String>>>,
    pub parent: Option<Advancement>,
}

impl SharedData {
    /// Read everything available; failures leave their field at its default
    pub fn extract(host: &dyn Host, profile: &HostProfile, advancement: &Advancement) -> Self {
        let handle = internal_handle(host, profile, advancement);

        let object = match &handle {
            Ok(object) => Arc::clone(object),
            Err(err) => {
                log::debug!("No internal handle for {}: {}", advancement.key(), err);
                return Self {
                    handle,
                    criteria: HashMap::new(),
                    rewards: None,
                    requirements: None,
                    parent: None,
                };
            }
        };

        let find = FieldFinder::new(&object);
        let key = advancement.key();

        let criteria = swallow(key, "criteria", criteria(&find)).unwrap_or_default();
        let rewards = swallow(key, "rewards", find.require_by_type_name(REWARDS_TYPE).cloned());
        let requirements = swallow(key, "requirements", requirements(&find));
        let parent = swallow(key, "parent", parent(host, profile, &object));

        Self {
            criteria,
            rewards,
            requirements,
            parent,
            handle,
        }
    }
}

fn swallow<T>(key: &NamespacedKey, what: &str, result: LookupResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("No {} for {}: {}", what, key, err);
            None
        }
    }
}

/// Obtain the internal handle behind a public advancement
pub fn internal_handle(
    host: &dyn Host,
    profile: &HostProfile,
    advancement: &Advancement,
) -> LookupResult<Arc<HostObject>> {
    let class_name = profile.implementation_class("advancement.CraftAdvancement");
    let craft = host
        .find_class(&class_name)
        .ok_or_else(|| LookupError::not_found("host", format!("class {}", class_name)))?;

    let object = advancement.object();
    if object.class() != &craft {
        return Err(LookupError::type_mismatch("CraftAdvancement", object.class().name()));
    }

    let handle = host.invoke(object, "getHandle")?.as_object()?.clone();
    Ok(unwrap_holder(handle))
}

/// Newer hosts wrap the handle in a holder; use the wrapped value when present
fn unwrap_holder(handle: Arc<HostObject>) -> Arc<HostObject> {
    if !handle.class().simple_name().contains(HOLDER_TYPE) {
        return handle;
    }

    let inner = FieldFinder::new(&handle)
        .require_by_type_name(HANDLE_TYPE)
        .and_then(|value| value.as_object().map(Arc::clone));

    match inner {
        Ok(inner) => inner,
        Err(err) => {
            log::debug!("Keeping {} as handle: {}", handle.class().simple_name(), err);
            handle
        }
    }
}

fn criteria(find: &FieldFinder<'_>) -> LookupResult<HashMap<String, HostValue>> {
    match find.get_by_type(&TypeRef::new(types::MAP))? {
        HostValue::Map(map) => Ok(map.clone()),
        HostValue::Null => Ok(HashMap::new()),
        other => Err(LookupError::type_mismatch("map", other.kind())),
    }
}

/// Requirements from the newer requirements object, else from the string grid
fn requirements(find: &FieldFinder<'_>) -> LookupResult<Vec<Vec<String>>> {
    match find.require_by_type_name(REQUIREMENTS_TYPE) {
        Ok(newer) => {
            let newer = newer.as_object()?;
            FieldFinder::new(newer)
                .require_by_type(&TypeRef::new(types::LIST))?
                .to_string_groups()
        }
        Err(err) if err.is_not_found() => find
            .require_by_type(&TypeRef::new(types::STRING_GRID))?
            .to_string_groups(),
        Err(err) => Err(err),
    }
}

/// The parent handle's resource key, looked up in the host registry
fn parent(host: &dyn Host, profile: &HostProfile, handle: &HostObject) -> LookupResult<Advancement> {
    let parent = FieldFinder::new(handle)
        .require_by_type(handle.class())?
        .as_object()?;

    let key_class = profile
        .resource_key_class()
        .ok_or_else(|| LookupError::not_found(profile.implementation_package(), "server revision"))?;
    let key_class = host
        .find_class(&key_class)
        .ok_or_else(|| LookupError::not_found("host", format!("class {}", key_class)))?;

    let resource = FieldFinder::new(parent)
        .require_by_type(&key_class)?
        .as_object()?;
    let namespace = host.invoke(resource, "getNamespace")?;
    let path = host.invoke(resource, "getKey")?;
    let key = NamespacedKey::new(namespace.as_str()?, path.as_str()?);

    host.advancement(&key)
        .ok_or_else(|| LookupError::not_found("registry", format!("advancement {}", key)))
}
