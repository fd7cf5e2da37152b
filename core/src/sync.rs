//! Keeping the list query and the location's query string in step.
//!
//! # Design
//! There is one writer, `reconcile`, called once per external change with
//! the side that changed. A URL change is adopted into the store and reports
//! the refetch it implies; if it changes the page size with a non-zero skip,
//! skip drops to 0 and the location is rewritten. A state change is rendered
//! into a query string and reported only if it differs from the current
//! location.
//! Because neither direction triggers the other, there is no update loop to
//! guard against at runtime.

use crate::query::{FetchStrategy, ListQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The location changed (navigation, back/forward, pasted link).
    Url,
    /// The in-memory query changed through a user action.
    State,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The query the store should hold afterwards.
    pub store: ListQuery,
    /// New location query string (without `?`) to write, if any.
    pub url: Option<String>,
    /// List load implied by the change, if any.
    pub refetch: Option<FetchStrategy>,
}

pub fn reconcile(url: &ListQuery, store: &ListQuery, origin: ChangeOrigin) -> Reconciled {
    match origin {
        ChangeOrigin::Url => {
            let mut adopted = url.clone();
            let mut rewrite = None;
            // A new page size always starts from the first page.
            if url.limit != store.limit && url.skip != 0 {
                adopted.skip = 0;
                rewrite = Some(adopted.to_query_string());
            }
            Reconciled {
                refetch: refetch_for(store, &adopted),
                store: adopted,
                url: rewrite,
            }
        }
        ChangeOrigin::State => {
            let rendered = store.to_query_string();
            let url = (rendered != url.to_query_string()).then_some(rendered);
            Reconciled {
                store: store.clone(),
                url,
                refetch: None,
            }
        }
    }
}

/// Tag, paging and sort changes reload the list. Search text alone does not;
/// a search runs when it is submitted.
fn refetch_for(old: &ListQuery, new: &ListQuery) -> Option<FetchStrategy> {
    let changed = old.tag != new.tag
        || old.skip != new.skip
        || old.limit != new.limit
        || old.sort_by != new.sort_by
        || old.sort_order != new.sort_order;
    changed.then(|| new.paging_strategy())
}

/// Tracks the current location query string and feeds changes through
/// `reconcile`.
#[derive(Debug, Clone, Default)]
pub struct UrlSync {
    location: String,
}

impl UrlSync {
    pub fn new(location: &str) -> Self {
        Self {
            location: strip_question_mark(location).to_string(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn on_url_change(&mut self, raw: &str, store: &ListQuery) -> Reconciled {
        self.location = strip_question_mark(raw).to_string();
        let reconciled = reconcile(
            &ListQuery::from_query_string(&self.location),
            store,
            ChangeOrigin::Url,
        );
        if let Some(url) = &reconciled.url {
            self.location.clone_from(url);
        }
        reconciled
    }

    /// Returns the location to navigate to when `store` no longer matches it.
    pub fn on_state_change(&mut self, store: &ListQuery) -> Option<String> {
        let current = ListQuery::from_query_string(&self.location);
        let reconciled = reconcile(&current, store, ChangeOrigin::State);
        if let Some(url) = &reconciled.url {
            self.location.clone_from(url);
        }
        reconciled.url
    }
}

fn strip_question_mark(raw: &str) -> &str {
    raw.strip_prefix('?').unwrap_or(raw)
}
