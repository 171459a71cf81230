//! # Filter Registry
//!
//! The registry owns the filter handlers registered for one list or command
//! context, in registration order, together with their optional on-change
//! callbacks. It answers two questions without any request state:
//!
//! - `describe`: what does each filter look like, serialized for the front
//!   end ([`FilterConfig`] records)?
//! - `default_value_for`: what does a filter resolve to when the request
//!   supplies nothing (global slot, retained session value, required default,
//!   or nothing)?

use serde::Serialize;

use crate::encoding;
use crate::error::Result;
use crate::handler::{classify, FilterHandler, FilterKind, DEFAULT_TEMPLATE};
use crate::model::FilterValue;
use crate::session::{self, SessionStore};
use crate::store::FilterValueStore;

/// Callback invoked whenever a filter's value is set. The sole extensibility
/// hook for side effects, e.g. invalidating dependent filters through
/// [`FilterValueStore::clear`].
pub type OnChange = Box<dyn Fn(Option<&str>, &mut FilterValueStore)>;

/// Serialized description of one filter, consumed by a front-end renderer.
///
/// Select-only fields (`multiple`, `values`, `master`, `searchable`,
/// `searchKeys`, `template`) are omitted for date-range filters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub key: String,
    #[serde(rename = "type")]
    pub filter_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    pub required: bool,
    pub default: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

struct FilterEntry {
    name: String,
    handler: Box<dyn FilterHandler>,
    on_change: Option<OnChange>,
}

/// Ordered set of registered filter handlers for one list/command context.
#[derive(Default)]
pub struct FilterRegistry {
    entries: Vec<FilterEntry>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under `name`. Registering the same name again
    /// replaces the previous handler: a name maps to at most one handler.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl FilterHandler + 'static,
    ) -> &mut Self {
        self.insert(name.into(), Box::new(handler), None);
        self
    }

    /// Registers a handler together with an on-change callback, invoked with
    /// `(new_value, store)` whenever the filter's value is set.
    pub fn register_with(
        &mut self,
        name: impl Into<String>,
        handler: impl FilterHandler + 'static,
        on_change: OnChange,
    ) -> &mut Self {
        self.insert(name.into(), Box::new(handler), Some(on_change));
        self
    }

    fn insert(&mut self, name: String, handler: Box<dyn FilterHandler>, on_change: Option<OnChange>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.handler = handler;
            entry.on_change = on_change;
            return;
        }

        self.entries.push(FilterEntry {
            name,
            handler,
            on_change,
        });
    }

    pub fn handler(&self, name: &str) -> Option<&dyn FilterHandler> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.handler.as_ref())
    }

    pub(crate) fn on_change(&self, name: &str) -> Option<&OnChange> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.on_change.as_ref())
    }

    /// Registered filter names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produces one [`FilterConfig`] per registered handler, in registration
    /// order. `default` is computed against the given session, so retained
    /// values show up as the front end's initial state.
    pub fn describe(&self, session: &dyn SessionStore) -> Result<Vec<FilterConfig>> {
        self.entries
            .iter()
            .map(|entry| self.config_for(entry, session))
            .collect()
    }

    fn config_for(&self, entry: &FilterEntry, session: &dyn SessionStore) -> Result<FilterConfig> {
        let handler = entry.handler.as_ref();
        let caps = classify(handler);
        let default = default_json(self.handler_default(handler, &entry.name, session)?)?;
        let label = handler.label().unwrap_or_else(|| entry.name.clone());

        let config = match caps.kind {
            FilterKind::Select { multiple } => FilterConfig {
                key: entry.name.clone(),
                filter_type: "select",
                multiple: Some(multiple),
                required: !multiple && caps.required,
                default,
                values: Some(select_values(handler)),
                label,
                master: Some(handler.is_master()),
                searchable: Some(handler.is_searchable()),
                search_keys: Some(handler.search_keys()),
                template: Some(select_template(handler)),
            },
            FilterKind::DateRange => FilterConfig {
                key: entry.name.clone(),
                filter_type: "dateRange",
                multiple: None,
                required: caps.required,
                default,
                values: None,
                label,
                master: None,
                searchable: None,
                search_keys: None,
                template: None,
            },
        };

        Ok(config)
    }

    /// Resolves the value a filter takes when the request supplies nothing:
    ///
    /// 1. Global filter: session global slot, else the handler default.
    /// 2. Retained filter with a session value: the decoded session value.
    /// 3. Required filter: the handler default.
    /// 4. Otherwise: `None`.
    pub fn default_value_for(
        &self,
        name: &str,
        session: &dyn SessionStore,
    ) -> Result<Option<FilterValue>> {
        match self.handler(name) {
            Some(handler) => self.handler_default(handler, name, session),
            None => Ok(None),
        }
    }

    fn handler_default(
        &self,
        handler: &dyn FilterHandler,
        name: &str,
        session: &dyn SessionStore,
    ) -> Result<Option<FilterValue>> {
        let caps = classify(handler);

        if caps.global {
            if let Some(raw) = session.get(&session::global_key(name)) {
                return decode_session_value(caps.kind, &raw).map(Some);
            }
            return Ok(handler.default_value());
        }

        if caps.retained {
            if let Some(raw) = session.get(&session::retained_key(name)) {
                return decode_session_value(caps.kind, &raw).map(Some);
            }
        }

        if caps.required {
            return Ok(handler.default_value());
        }

        Ok(None)
    }
}

/// Decodes a session string according to the handler's kind, rather than by
/// sniffing: a multi-select session value of "2" is still a one-entry list.
fn decode_session_value(kind: FilterKind, raw: &str) -> Result<FilterValue> {
    match kind {
        FilterKind::Select { multiple: true } => {
            Ok(FilterValue::Multiple(encoding::split_list(raw)))
        }
        FilterKind::DateRange => encoding::decode_range(raw),
        FilterKind::Select { multiple: false } => Ok(FilterValue::Single(raw.to_string())),
    }
}

fn default_json(default: Option<FilterValue>) -> Result<serde_json::Value> {
    match default {
        Some(value) => Ok(serde_json::to_value(value)?),
        None => Ok(serde_json::Value::Null),
    }
}

/// Shapes a select handler's values for the config record. Without a custom
/// template, the mapping is shaped into `[{id, label}, ...]`; with one, the
/// raw mapping passes through unshaped and the template interprets it.
fn select_values(handler: &dyn FilterHandler) -> serde_json::Value {
    let options = handler.values();

    if handler.template().is_none() {
        return serde_json::Value::Array(
            options
                .into_iter()
                .map(|opt| {
                    let mut entry = serde_json::Map::new();
                    entry.insert("id".to_string(), opt.id);
                    entry.insert("label".to_string(), opt.label);
                    serde_json::Value::Object(entry)
                })
                .collect(),
        );
    }

    let mut map = serde_json::Map::new();
    for opt in options {
        let key = match opt.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        map.insert(key, opt.label);
    }
    serde_json::Value::Object(map)
}

/// Renders the handler's template at describe-time, falling back to
/// `{{label}}`.
fn select_template(handler: &dyn FilterHandler) -> String {
    match handler.template() {
        Some(template) => template.render(),
        None => DEFAULT_TEMPLATE.to_string(),
    }
}
