//! # Filter Handlers
//!
//! A filter handler describes one filterable dimension of an entity list: its
//! kind (select or date range), its possible values, its default, and its
//! persistence policy. Handlers declare capabilities explicitly by overriding
//! the defaulted trait methods, in any combination — classification is a plain
//! read of those declarations, never a reflective probe.

use crate::model::FilterValue;
use serde::Serialize;

/// Render template applied by the front end when no custom template is set.
pub const DEFAULT_TEMPLATE: &str = "{{label}}";

/// The base shape of a filter: what kind of widget it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Select { multiple: bool },
    DateRange,
}

/// One entry of a select filter's ordered id -> label mapping.
///
/// Ids and labels are JSON values so handlers can expose numeric ids, and —
/// when paired with a custom template — structured labels the template
/// interprets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub id: serde_json::Value,
    pub label: serde_json::Value,
}

impl SelectOption {
    pub fn new(id: impl Into<serde_json::Value>, label: impl Into<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A view that can render itself to a template string.
pub trait TemplateView {
    fn render(&self) -> String;
}

/// A custom render template for a select filter's values: either an inline
/// string or a renderable view. Views are rendered at describe-time.
pub enum Template {
    Inline(String),
    View(Box<dyn TemplateView>),
}

impl Template {
    pub fn render(&self) -> String {
        match self {
            Template::Inline(s) => s.clone(),
            Template::View(view) => view.render(),
        }
    }
}

/// A user-defined filter handler.
///
/// Only `kind` is mandatory. Everything else is a capability declaration with
/// a conservative default: no label (the filter name is used), no values, no
/// custom template, not required, not retained, not global.
pub trait FilterHandler {
    fn kind(&self) -> FilterKind;

    /// Human-readable label shown by the front end.
    fn label(&self) -> Option<String> {
        None
    }

    /// Select family: the ordered id -> label mapping.
    fn values(&self) -> Vec<SelectOption> {
        Vec::new()
    }

    /// Select family: custom render template for values.
    fn template(&self) -> Option<Template> {
        None
    }

    /// Master filters reset dependent filters when they change.
    fn is_master(&self) -> bool {
        false
    }

    fn is_searchable(&self) -> bool {
        false
    }

    fn search_keys(&self) -> Vec<String> {
        vec!["label".to_string()]
    }

    /// Required and global filters must return `Some`.
    fn default_value(&self) -> Option<FilterValue> {
        None
    }

    /// Required filters never resolve to null.
    fn is_required(&self) -> bool {
        false
    }

    /// Retained filters keep their last explicit value in the session.
    fn retain_value_in_session(&self) -> bool {
        false
    }

    /// Global filters are retained at a namespace broader than one list.
    fn is_global(&self) -> bool {
        false
    }
}

/// Capability summary of a handler, derived from its declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub kind: FilterKind,
    pub required: bool,
    pub retained: bool,
    pub global: bool,
}

pub fn classify(handler: &dyn FilterHandler) -> Capabilities {
    Capabilities {
        kind: handler.kind(),
        required: handler.is_required(),
        retained: handler.retain_value_in_session(),
        global: handler.is_global(),
    }
}
