//! Component expansion logic.
//!
//! Expands custom tags by:
//! 1. Looking up the component in the registry
//! 2. Applying the caller attributes to a fresh instance
//! 3. Merging the component's default attributes without overwriting
//! 4. Recursively expanding the component's body
//! 5. Rendering the resolved element in place of the tag

use crate::component::{Component, DataState};
use crate::registry::{allocate_id, ComponentRegistry, Counters};
use crate::render::render;
use ick_core::{AttributeError, ExpandError, DEFAULT_MAX_DEPTH};
use ick_parser::{parse_attributes, IckTag, Scanner, Segment};
use indexmap::IndexMap;

/// Expansion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Maximum nesting of components inside components.
    pub max_depth: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExpandOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Recursion guard threaded through one top-level expansion.
#[derive(Debug, Clone, Default)]
pub struct ExpansionContext {
    /// Tag names currently being expanded, outermost first.
    ancestors: Vec<String>,
}

impl ExpansionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ancestors.iter().any(|a| a == name)
    }

    fn push(&mut self, name: &str) {
        self.ancestors.push(name.to_string());
    }

    fn pop(&mut self) {
        self.ancestors.pop();
    }
}

/// Result of [`Expander::unfold`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unfolded {
    pub html: String,
    /// Identifier to tag name of each component instantiated directly from the
    /// input, in scan order. Components nested in their bodies are not listed.
    pub embedded: IndexMap<String, String>,
}

/// Expands custom tags against a registry.
pub struct Expander<'r, 'd> {
    registry: &'r ComponentRegistry,
    options: ExpandOptions,
    data: DataState<'d>,
}

impl<'r, 'd> Expander<'r, 'd> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self {
            registry,
            options: ExpandOptions::default(),
            data: DataState::default(),
        }
    }

    pub fn with_options(mut self, options: ExpandOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_data(mut self, data: DataState<'d>) -> Self {
        self.data = data;
        self
    }

    /// Expand every custom tag in `input`. Text outside custom tags is copied verbatim.
    pub fn expand(&self, input: &str) -> Result<String, ExpandError> {
        self.expand_with(input, &mut ExpansionContext::new())
    }

    /// Expand `input` inside an existing expansion context.
    pub fn expand_with(
        &self,
        input: &str,
        ctx: &mut ExpansionContext,
    ) -> Result<String, ExpandError> {
        self.transaction(|ids| {
            let mut out = String::with_capacity(input.len());
            self.expand_into(&mut out, input, ctx, ids, None)?;
            Ok(out)
        })
    }

    /// Expand `input` and report the components it instantiated directly.
    pub fn unfold(&self, input: &str) -> Result<Unfolded, ExpandError> {
        self.transaction(|ids| {
            let mut unfolded = Unfolded::default();
            self.expand_into(
                &mut unfolded.html,
                input,
                &mut ExpansionContext::new(),
                ids,
                Some(&mut unfolded.embedded),
            )?;
            Ok(unfolded)
        })
    }

    /// Render a component instance that does not come from a tag.
    ///
    /// `name` is the tag name it is known by, used for its default class and
    /// identifier; without it identifiers come from the anonymous sequence.
    pub fn render_component(
        &self,
        component: &mut dyn Component,
        name: Option<&str>,
    ) -> Result<String, ExpandError> {
        let name = name.map(ick_core::normalize);
        let mut ctx = ExpansionContext::new();
        if let Some(name) = &name {
            ctx.push(name);
        }
        self.transaction(|ids| {
            let mut out = String::new();
            self.write_component(&mut out, component, name.as_deref(), &mut ctx, ids)?;
            Ok(out)
        })
    }

    /// Run one top-level expansion against a copy of the registry counters.
    ///
    /// The counters stay locked until the expansion ends and are only written
    /// back when it succeeds, so a failed expansion allocates no identifier.
    fn transaction<T>(
        &self,
        expand: impl FnOnce(&mut Counters) -> Result<T, ExpandError>,
    ) -> Result<T, ExpandError> {
        let mut counters = self.registry.lock_counters();
        let mut pending = counters.clone();
        let result = expand(&mut pending)?;
        *counters = pending;
        Ok(result)
    }

    fn expand_into(
        &self,
        out: &mut String,
        input: &str,
        ctx: &mut ExpansionContext,
        ids: &mut Counters,
        mut embedded: Option<&mut IndexMap<String, String>>,
    ) -> Result<(), ExpandError> {
        for segment in Scanner::new(input) {
            match segment? {
                Segment::Literal(text) => {
                    log::trace!("level={} -> literal of {} bytes", ctx.depth(), text.len());
                    out.push_str(text);
                }
                Segment::Tag(tag) => {
                    let id = self.expand_tag(out, &tag, ctx, ids)?;
                    if let (Some(embedded), Some(id)) = (embedded.as_deref_mut(), id) {
                        embedded.insert(id, tag.name.clone());
                    }
                }
            }
        }
        Ok(())
    }

    /// Expand one custom tag into `out`. Returns the id of the rendered element, if any.
    fn expand_tag(
        &self,
        out: &mut String,
        tag: &IckTag<'_>,
        ctx: &mut ExpansionContext,
        ids: &mut Counters,
    ) -> Result<Option<String>, ExpandError> {
        if ctx.contains(&tag.name) {
            let mut chain = ctx.ancestors().to_vec();
            chain.push(tag.name.clone());
            log::warn!(
                "recursive embedding stopped at {} (offset {})",
                tag.source,
                tag.span.start
            );
            return Err(ExpandError::RecursiveEmbedding {
                name: tag.name.clone(),
                chain,
            });
        }
        if ctx.depth() >= self.options.max_depth {
            return Err(ExpandError::MaxDepthExceeded {
                depth: self.options.max_depth,
            });
        }

        let entry = self
            .registry
            .get(&tag.name)
            .ok_or_else(|| ExpandError::UnregisteredComponent {
                name: tag.name.clone(),
                span: tag.span,
            })?;

        let mut component = entry.instantiate();
        self.apply_caller_attributes(component.as_mut(), tag)?;

        let depth = ctx.depth();
        ctx.push(entry.name());
        let result = self.write_component(out, component.as_mut(), Some(entry.name()), ctx, ids);
        ctx.pop();
        if let Ok(id) = &result {
            log::debug!(
                "level={depth} -> unfolded embedded component <{}> id={}",
                tag.name,
                id.as_deref().unwrap_or("-")
            );
        }
        result
    }

    /// Caller attributes go first and win over everything the component sets
    /// later. A caller `id` replaces the generated one.
    fn apply_caller_attributes(
        &self,
        component: &mut dyn Component,
        tag: &IckTag<'_>,
    ) -> Result<(), ExpandError> {
        for attr in &tag.attributes {
            let taken = component
                .set_property(&attr.name, attr.value.as_deref())
                .map_err(|source| ExpandError::Property {
                    component: tag.name.clone(),
                    source,
                })?;
            if taken {
                continue;
            }
            let overwrite = attr.name.trim().eq_ignore_ascii_case("id");
            component
                .attributes_mut()
                .set(&attr.name, attr.to_value(), overwrite)
                .map_err(|source| ExpandError::Attribute {
                    component: tag.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Render `component` with its template, expanding its body recursively.
    fn write_component(
        &self,
        out: &mut String,
        component: &mut dyn Component,
        name: Option<&str>,
        ctx: &mut ExpansionContext,
        ids: &mut Counters,
    ) -> Result<Option<String>, ExpandError> {
        let template = component.template(&self.data);
        let tag_name = template.tag_name.trim();

        if tag_name.is_empty() {
            if template.body.is_empty() {
                log::debug!("level={} -> empty html snippet, no tag name and no body", ctx.depth());
            } else {
                self.expand_into(out, &template.body, ctx, ids, None)?;
            }
            return Ok(None);
        }

        let id = match component.id() {
            Some(id) => id.to_string(),
            None => {
                let id = allocate_id(ids, name.unwrap_or_default());
                component.set_id(&id);
                id
            }
        };

        let attribute_error = |source: AttributeError| ExpandError::Attribute {
            component: name.unwrap_or(tag_name).to_string(),
            source,
        };
        let defaults = parse_attributes(&template.attributes)?;
        let attributes = component.attributes_mut();
        attributes.merge(&defaults).map_err(attribute_error)?;
        if let Some(name) = name {
            attributes.add_classes(name);
        }

        let mut body = String::new();
        if template.void {
            if !template.body.is_empty() {
                log::warn!("body of void component <{tag_name}> ignored");
            }
        } else {
            self.expand_into(&mut body, &template.body, ctx, ids, None)?;
        }

        out.push_str(&render(tag_name, component.attributes(), &body, template.void));
        Ok(Some(id))
    }
}
