//! The component capability set and component templates.

use ick_core::{AttributeStore, PropertyError};
use std::any::Any;

/// What a component renders.
///
/// A component without tag name renders only its body; a void component
/// renders only its opening tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    /// Container element name, upper-cased on output. May be empty.
    pub tag_name: String,
    /// Default attributes in markup syntax, e.g. `class="a b" tabIndex=2`.
    pub attributes: String,
    /// Inner markup, itself expanded. May hold further custom tags.
    pub body: String,
    pub void: bool,
}

impl Template {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    /// A template without container element.
    pub fn body_only(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn void(mut self) -> Self {
        self.void = true;
        self
    }
}

/// Ambient state handed to every [`Component::template`] call.
///
/// The engine never looks inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataState<'a> {
    pub page: Option<&'a dyn Any>,
    pub app: Option<&'a dyn Any>,
}

/// A renderable component.
pub trait Component {
    /// Produce the template. Called once per rendering.
    fn template(&self, data: &DataState<'_>) -> Template;

    fn attributes(&self) -> &AttributeStore;

    fn attributes_mut(&mut self) -> &mut AttributeStore;

    /// Offer a caller attribute as a component property.
    ///
    /// Returns `Ok(true)` when the component took it, in which case it is not
    /// stored as an attribute.
    fn set_property(&mut self, _name: &str, _value: Option<&str>) -> Result<bool, PropertyError> {
        Ok(false)
    }

    fn id(&self) -> Option<&str> {
        self.attributes().id()
    }

    /// Receive the identifier allocated by the registry.
    fn set_id(&mut self, id: &str) {
        self.attributes_mut().set_id(id);
    }
}

/// A component whose template is fixed when it is declared.
#[derive(Debug, Clone, Default)]
pub struct TemplateComponent {
    template: Template,
    attributes: AttributeStore,
}

impl TemplateComponent {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            attributes: AttributeStore::new(),
        }
    }
}

impl Component for TemplateComponent {
    fn template(&self, _data: &DataState<'_>) -> Template {
        self.template.clone()
    }

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }
}
