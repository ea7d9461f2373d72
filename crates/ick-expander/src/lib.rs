//! Custom tag expansion for ick markup.
//!
//! This crate handles:
//! - Component registration and identifier allocation
//! - Component instantiation with caller attributes
//! - Recursive body expansion
//! - Circular embedding detection
//! - Serialization of resolved components
//!
//! ```ignore
//! use ick_expander::{ComponentRegistry, Expander, Template};
//!
//! let mut registry = ComponentRegistry::new();
//! registry.register_template("ick-badge", Template::new("span").attributes("class=badge"))?;
//!
//! let html = Expander::new(&registry).expand("Hi <ick-badge title='new'/>")?;
//! assert_eq!(
//!     html,
//!     r#"Hi <SPAN id="ick-badge-1" class="badge ick-badge" title="new"></SPAN>"#
//! );
//! ```

mod component;
mod expander;
mod registry;
mod render;

pub use component::{Component, DataState, Template, TemplateComponent};
pub use expander::{ExpandOptions, Expander, ExpansionContext, Unfolded};
pub use registry::{
    global, next_id, register, register_factory, register_template, reset, ComponentRegistry,
    Factory, RegistryEntry,
};
pub use render::{render, render_into};

use ick_core::ExpandError;

/// Expand all custom tags in `input` using the process-wide registry.
pub fn expand(input: &str) -> Result<String, ExpandError> {
    let registry = registry::read_global();
    Expander::new(&registry).expand(input)
}

/// Like [`expand`], also reporting the components instantiated directly from `input`.
pub fn unfold(input: &str) -> Result<Unfolded, ExpandError> {
    let registry = registry::read_global();
    Expander::new(&registry).unfold(input)
}
