//! Component registry: tag names to component factories, plus the per-tag
//! instance counters used to allocate identifiers.

use crate::component::{Component, Template, TemplateComponent};
use ick_core::{names::is_tag_char, normalize, RegistrationError, ANONYMOUS_NAME, ICK_PREFIX};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

/// Per-tag instance counters.
pub(crate) type Counters = HashMap<String, u64>;

/// Creates a fresh component instance.
pub type Factory = Arc<dyn Fn() -> Box<dyn Component> + Send + Sync>;

/// A registered component type.
#[derive(Clone)]
pub struct RegistryEntry {
    name: String,
    factory: Factory,
}

impl RegistryEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A new, independent instance of the component.
    pub fn instantiate(&self) -> Box<dyn Component> {
        (self.factory)()
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A registry of component types.
///
/// Counters sit behind a mutex so identifiers can be allocated through a
/// shared reference.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: IndexMap<String, RegistryEntry>,
    counters: Mutex<Counters>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type built with `Default`.
    pub fn register<T>(&mut self, name: &str) -> Result<(), RegistrationError>
    where
        T: Component + Default + 'static,
    {
        self.register_factory(name, || Box::new(T::default()) as Box<dyn Component>)
    }

    /// Register a component with a fixed template.
    pub fn register_template(
        &mut self,
        name: &str,
        template: Template,
    ) -> Result<(), RegistrationError> {
        self.register_factory(name, move || {
            Box::new(TemplateComponent::new(template.clone())) as Box<dyn Component>
        })
    }

    /// Register a component factory under `name`.
    ///
    /// Registering a name twice is not an error: the second registration is
    /// ignored.
    pub fn register_factory<F>(&mut self, name: &str, factory: F) -> Result<(), RegistrationError>
    where
        F: Fn() -> Box<dyn Component> + Send + Sync + 'static,
    {
        let name = validate_name(name)?;
        if self.entries.contains_key(&name) {
            log::warn!("registering component {name:?} warning: already registered");
            return Ok(());
        }
        let entry = RegistryEntry {
            name: name.clone(),
            factory: Arc::new(factory),
        };
        self.entries.insert(name.clone(), entry);
        log::info!("component {name:?} registered");
        Ok(())
    }

    /// Get a component by tag name. Names are compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(&normalize(name))
    }

    /// Alias of [`get`](Self::get).
    pub fn lookup(&self, name: &str) -> Option<&RegistryEntry> {
        self.get(name)
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocate the next identifier for `name`: `"<name>-<n>"`, n starting at 1.
    ///
    /// An empty name draws from the anonymous `ick-<n>` sequence.
    pub fn next_id(&self, name: &str) -> String {
        allocate_id(&mut self.lock_counters(), name)
    }

    /// Hold the counters for a whole expansion.
    pub(crate) fn lock_counters(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// How many identifiers have been allocated for `name`.
    pub fn instance_count(&self, name: &str) -> u64 {
        self.lock_counters().get(&normalize(name)).copied().unwrap_or(0)
    }

    /// Drop every entry and counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counters
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Bump the counter of `name` and format the identifier.
pub(crate) fn allocate_id(counters: &mut Counters, name: &str) -> String {
    let mut name = normalize(name);
    if name.is_empty() {
        name = ANONYMOUS_NAME.to_string();
    }
    let count = counters.entry(name.clone()).or_insert(0);
    *count += 1;
    format!("{name}-{count}")
}

/// Normalize and check a tag name for registration.
fn validate_name(name: &str) -> Result<String, RegistrationError> {
    let name = normalize(name);
    if name.is_empty() {
        return Err(RegistrationError::EmptyName);
    }
    let Some(short) = name.strip_prefix(ICK_PREFIX) else {
        return Err(RegistrationError::MissingPrefix { name });
    };
    if short.is_empty() || !short.chars().all(is_tag_char) {
        return Err(RegistrationError::InvalidName { name });
    }
    Ok(name)
}

static GLOBAL: OnceLock<RwLock<ComponentRegistry>> = OnceLock::new();

/// The process-wide registry, created on first use and never torn down.
pub fn global() -> &'static RwLock<ComponentRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(ComponentRegistry::new()))
}

pub(crate) fn read_global() -> RwLockReadGuard<'static, ComponentRegistry> {
    global().read().unwrap_or_else(PoisonError::into_inner)
}

fn write_global() -> RwLockWriteGuard<'static, ComponentRegistry> {
    global().write().unwrap_or_else(PoisonError::into_inner)
}

/// Register a component type in the process-wide registry.
pub fn register<T>(name: &str) -> Result<(), RegistrationError>
where
    T: Component + Default + 'static,
{
    write_global().register::<T>(name)
}

/// Register a template component in the process-wide registry.
pub fn register_template(name: &str, template: Template) -> Result<(), RegistrationError> {
    write_global().register_template(name, template)
}

/// Register a factory in the process-wide registry.
pub fn register_factory<F>(name: &str, factory: F) -> Result<(), RegistrationError>
where
    F: Fn() -> Box<dyn Component> + Send + Sync + 'static,
{
    write_global().register_factory(name, factory)
}

/// Allocate an identifier from the process-wide registry.
pub fn next_id(name: &str) -> String {
    read_global().next_id(name)
}

/// Empty the process-wide registry. Meant for tests.
pub fn reset() {
    write_global().clear();
}
