//! The lookup modal that reference fields open in the browser.
//!
//! [`LOOKUP_SCRIPT`] is the shipped behaviour; [`LookupSession`] is the same
//! protocol as a plain state machine so it can be exercised without a DOM:
//!
//! ```text
//! Closed --open--> Querying --response--> Open --keystroke--> Querying
//!   ^                                       |
//!   +-------- select / cancel / escape -----+
//! ```
//!
//! Every fetch carries a generation number. Only the response to the latest
//! generation is applied, so a slow stale response never replaces newer
//! candidates.

use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;

use crate::domain::LookupRecord;

/// Quiet period after the last keystroke before a query is sent.
pub const DEBOUNCE: Duration = Duration::from_millis(180);

/// Browser behaviour inlined by the fallback renderer and served as
/// `/js/lookup-modal.js` for templated pages.
pub const LOOKUP_SCRIPT: &str = include_str!("lookup_modal.js");

/// Element ids, classes and attributes shared by the markup and the script.
pub mod dom {
    pub const OVERLAY_ID: &str = "lookup-overlay";
    pub const MODAL_ID: &str = "lookup-modal";
    pub const INPUT_ID: &str = "lookup-input";
    pub const LIST_ID: &str = "lookup-list";
    pub const ITEM_CLASS: &str = "lookup-item";
    pub const CLOSE_CLASS: &str = "lookup-close";
    pub const CANCEL_CLASS: &str = "lookup-cancel";
    pub const CONFIRM_CLASS: &str = "lookup-confirm";
    pub const REFERENCE_CLASS: &str = "reference-field";
    pub const REFERENCE_NAME_CLASS: &str = "reference-name";
    pub const LOOKUP_URL_ATTR: &str = "data-lookup-url";
    pub const REF_ATTR: &str = "data-ref";
    pub const DEBOUNCE_ATTR: &str = "data-debounce-ms";
}

/// Why a fetch produced no candidates. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("lookup endpoint answered with status {0}")]
    Status(u16),
    #[error("network failure: {0}")]
    Network(String),
    #[error("unreadable lookup response: {0}")]
    Body(String),
}

/// Coarse state of a [`LookupSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    Closed,
    /// Candidates are settled; no timer armed and no fetch outstanding.
    Open,
    /// A debounce timer is armed or a fetch is outstanding.
    Querying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Cancel,
    Overlay,
    Escape,
}

/// The reference field a lookup was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupContext {
    pub endpoint: String,
    pub field: String,
    /// Current content of the field's code input; the initial query.
    pub code: String,
}

impl LookupContext {
    pub fn new(endpoint: impl Into<String>, field: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            field: field.into(),
            code: code.into(),
        }
    }
}

/// Values written back into the originating reference field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub field: String,
    pub code: String,
    pub name: String,
    pub id: String,
}

/// Side effects the host (browser or test) must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEffect {
    Fetch { url: String, generation: u64 },
    Apply(Selection),
    /// Return focus to the field's code input.
    Focus { field: String },
}

#[derive(Debug)]
struct ActiveLookup {
    context: LookupContext,
    query: String,
    deadline: Option<Instant>,
    in_flight: bool,
    candidates: Vec<LookupRecord>,
    highlighted: Option<usize>,
}

/// One page's lookup modal. At most one context is open at a time.
#[derive(Debug)]
pub struct LookupSession {
    debounce: Duration,
    generation: u64,
    active: Option<ActiveLookup>,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupSession {
    pub fn new() -> Self {
        Self::with_debounce(DEBOUNCE)
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            generation: 0,
            active: None,
        }
    }

    pub fn state(&self) -> LookupState {
        match &self.active {
            None => LookupState::Closed,
            Some(active) if active.deadline.is_some() || active.in_flight => LookupState::Querying,
            Some(_) => LookupState::Open,
        }
    }

    pub fn context(&self) -> Option<&LookupContext> {
        self.active.as_ref().map(|active| &active.context)
    }

    pub fn query(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.query.as_str())
    }

    pub fn candidates(&self) -> &[LookupRecord] {
        self.active
            .as_ref()
            .map(|active| active.candidates.as_slice())
            .unwrap_or(&[])
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.active.as_ref().and_then(|active| active.highlighted)
    }

    /// Opens the modal for `context`, replacing any open one, and fetches the
    /// field's current code straight away.
    pub fn open(&mut self, context: LookupContext) -> LookupEffect {
        self.generation += 1;
        let url = fetch_url(&context.endpoint, &context.code);
        self.active = Some(ActiveLookup {
            query: context.code.clone(),
            context,
            deadline: None,
            in_flight: true,
            candidates: Vec::new(),
            highlighted: None,
        });
        LookupEffect::Fetch {
            url,
            generation: self.generation,
        }
    }

    /// Records a keystroke: the query changes and the debounce restarts.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        let debounce = self.debounce;
        if let Some(active) = self.active.as_mut() {
            active.query = query.into();
            active.deadline = Some(now + debounce);
        }
    }

    /// When the debounce timer fires, if armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.as_ref().and_then(|active| active.deadline)
    }

    /// Fires the debounce timer when it has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<LookupEffect> {
        let due = self
            .next_deadline()
            .is_some_and(|deadline| deadline <= now);
        if due {
            self.issue_fetch()
        } else {
            None
        }
    }

    fn issue_fetch(&mut self) -> Option<LookupEffect> {
        let active = self.active.as_mut()?;
        self.generation += 1;
        active.deadline = None;
        active.in_flight = true;
        Some(LookupEffect::Fetch {
            url: fetch_url(&active.context.endpoint, &active.query),
            generation: self.generation,
        })
    }

    /// Applies a fetch outcome. Failures empty the list; responses to
    /// superseded generations are dropped. Returns whether it was applied.
    pub fn receive(
        &mut self,
        generation: u64,
        outcome: Result<Vec<LookupRecord>, FetchError>,
    ) -> bool {
        let current = self.generation;
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if generation != current {
            tracing::debug!(generation, current, "discarding stale lookup response");
            return false;
        }
        active.in_flight = false;
        active.highlighted = None;
        active.candidates = outcome.unwrap_or_else(|err| {
            tracing::debug!(error = %err, "lookup fetch failed");
            Vec::new()
        });
        true
    }

    /// Marks a candidate as the confirm target.
    pub fn highlight(&mut self, index: usize) -> bool {
        match self.active.as_mut() {
            Some(active) if index < active.candidates.len() => {
                active.highlighted = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Double activation (or Enter) on a candidate selects it.
    pub fn activate(&mut self, index: usize) -> Vec<LookupEffect> {
        let Some(active) = self.active.as_ref() else {
            return Vec::new();
        };
        let Some(record) = active.candidates.get(index) else {
            return Vec::new();
        };
        let selection = Selection {
            field: active.context.field.clone(),
            code: record.code.clone(),
            name: record.name.clone(),
            id: record.effective_id().to_string(),
        };
        let mut effects = vec![LookupEffect::Apply(selection)];
        effects.extend(self.finish());
        effects
    }

    /// The confirm action selects the highlighted candidate, if any.
    pub fn confirm(&mut self) -> Vec<LookupEffect> {
        match self.highlighted() {
            Some(index) => self.activate(index),
            None => Vec::new(),
        }
    }

    /// Closes without touching the field.
    pub fn close(&mut self, reason: CloseReason) -> Option<LookupEffect> {
        if self.active.is_some() {
            tracing::debug!(?reason, "lookup closed without selection");
        }
        self.finish()
    }

    fn finish(&mut self) -> Option<LookupEffect> {
        let active = self.active.take()?;
        // Outstanding responses belong to a closed context.
        self.generation += 1;
        Some(LookupEffect::Focus {
            field: active.context.field,
        })
    }
}

/// `GET` URL for `query` against `endpoint`.
pub fn fetch_url(endpoint: &str, query: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}code={}", endpoint, separator, urlencoding::encode(query))
}

/// Reads a lookup response leniently: anything but an array of objects is an
/// error, and missing string members default to empty.
pub fn parse_response(body: &str) -> Result<Vec<LookupRecord>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| FetchError::Body(err.to_string()))?;
    let Value::Array(items) = value else {
        return Err(FetchError::Body("expected a JSON array".into()));
    };
    Ok(items
        .iter()
        .map(|item| {
            let member = |key: &str| {
                item.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            LookupRecord::new(member("id"), member("code"), member("name"))
        })
        .collect())
}
