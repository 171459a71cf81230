//! # Filter Value Store
//!
//! One `FilterValueStore` lives for the span of one request. It ingests the
//! request's `filter_*` parameters, normalizes every value to the flat string
//! encoding, answers `filter_for` lookups with lazily decoded values, and at
//! end of request persists retained values into the injected session store.
//!
//! Precedence, from strongest to weakest: forced value > request-supplied
//! value > session-retained value > required handler default > nothing.

use std::collections::{BTreeSet, HashMap};

use crate::encoding;
use crate::error::Result;
use crate::handler::classify;
use crate::model::{FilterInput, FilterValue, ParamValue};
use crate::registry::FilterRegistry;
use crate::session::{self, SessionStore};

/// Query-string prefix marking a parameter as a filter value.
pub const FILTER_PARAM_PREFIX: &str = "filter_";

/// Per-request resolved filter values.
pub struct FilterValueStore {
    /// Normalized current values; `None` marks an explicitly unset filter.
    values: HashMap<String, Option<String>>,
    /// Forced values, kept structured and returned verbatim.
    forced: HashMap<String, FilterValue>,
    /// Names the current request explicitly supplied.
    requested: BTreeSet<String>,
    session: Box<dyn SessionStore>,
}

impl FilterValueStore {
    pub fn new(session: impl SessionStore + 'static) -> Self {
        Self {
            values: HashMap::new(),
            forced: HashMap::new(),
            requested: BTreeSet::new(),
            session: Box::new(session),
        }
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Scans incoming parameters for `filter_`-prefixed names and sets each
    /// matching filter's value. Names with no registered handler are ignored.
    pub fn ingest(&mut self, registry: &FilterRegistry, params: &[(String, ParamValue)]) {
        for (key, value) in params {
            let name = match key.strip_prefix(FILTER_PARAM_PREFIX) {
                Some(name) => name,
                None => continue,
            };

            if registry.handler(name).is_none() {
                tracing::debug!(filter = name, "ignoring unregistered filter parameter");
                continue;
            }

            self.requested.insert(name.to_string());
            self.set_filter_value(registry, name, value.clone().into());
        }
    }

    /// Normalizes `input` to its flat string form, stores it, and fires the
    /// filter's on-change callback if one was registered.
    pub fn set_filter_value(&mut self, registry: &FilterRegistry, name: &str, input: FilterInput) {
        let value = encoding::normalize(input);
        tracing::trace!(filter = name, value = value.as_deref(), "filter value set");

        self.values.insert(name.to_string(), value.clone());

        if let Some(callback) = registry.on_change(name) {
            callback(value.as_deref(), self);
        }
    }

    /// Pins a value for `name`, bypassing normalization. Forced values are
    /// returned verbatim by [`filter_for`](Self::filter_for) and override
    /// request, session and default values.
    pub fn force_filter_value(&mut self, name: impl Into<String>, value: FilterValue) {
        self.forced.insert(name.into(), value);
    }

    /// Drops the current value for `name`. Intended for on-change callbacks
    /// invalidating filters that depend on the one that changed.
    pub fn clear(&mut self, name: &str) {
        self.values.remove(name);
        self.requested.remove(name);
    }

    /// The stored normalized string for `name`, if any.
    pub fn raw_value(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    /// Resolves the decoded value for `name`: a forced value verbatim, or the
    /// stored string decoded per the wire encoding (range, list, scalar), or
    /// `None` when nothing is stored.
    pub fn filter_for(&self, name: &str) -> Result<Option<FilterValue>> {
        if let Some(forced) = self.forced.get(name) {
            return Ok(Some(forced.clone()));
        }

        match self.values.get(name) {
            Some(Some(raw)) => encoding::decode(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Seeds values for every registered filter the request did not supply,
    /// from the registry's default resolution (global slot, retained session
    /// value, required default). Runs after `ingest`, before query building.
    pub fn fill_default_values(&mut self, registry: &FilterRegistry) -> Result<()> {
        let mut seeds: Vec<(String, FilterInput)> = Vec::new();

        for name in registry.names() {
            if self.requested.contains(name) || self.values.contains_key(name) {
                continue;
            }
            if let Some(value) = registry.default_value_for(name, self.session.as_ref())? {
                seeds.push((name.to_string(), value.into()));
            }
        }

        for (name, input) in seeds {
            self.set_filter_value(registry, &name, input);
        }

        Ok(())
    }

    /// Persists the values of request-supplied retained filters into their
    /// session slots, then durably flushes the session. A trimmed-empty value
    /// removes the slot instead of storing an empty string. Global filters
    /// retain under the global key.
    pub fn put_retained_values_in_session(&mut self, registry: &FilterRegistry) -> Result<()> {
        for name in &self.requested {
            let handler = match registry.handler(name) {
                Some(handler) => handler,
                None => continue,
            };

            let caps = classify(handler);
            if !caps.retained && !caps.global {
                continue;
            }

            let key = if caps.global {
                session::global_key(name)
            } else {
                session::retained_key(name)
            };

            let value = self
                .values
                .get(name)
                .and_then(|v| v.clone())
                .unwrap_or_default();

            if value.trim().is_empty() {
                tracing::debug!(filter = %name, "clearing retained filter value");
                self.session.forget(&key);
            } else {
                tracing::debug!(filter = %name, value = %value, "retaining filter value");
                self.session.put(&key, &value);
            }
        }

        self.session.flush()
    }
}
