//! Per-client browse state: reference coordinate, the current list context
//! and the category tip.
//!
//! Tip fetches run detached from the list. Each primary query bumps a token;
//! a tip is only applied when it carries the latest token, so a slow answer
//! for an old category never overwrites a newer one.

use std::time::Instant;

use serde::Serialize;
use rocket_okapi::okapi::schemars::JsonSchema;

use crate::models::{Category, Worker};
use crate::search::distance::Coordinates;
use crate::search::pipeline::{refine, search_by_category, search_by_text, sort_workers, SearchQuery, SortMode};

#[derive(Debug, Clone, PartialEq)]
pub struct ListContext {
    pub title: String,
    pub from_category: Option<Category>,
    /// Distance ordered base list; refinement and sorting never mutate it.
    pub workers: Vec<Worker>,
}

/// A tip that still has to be fetched for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRequest {
    pub token: u64,
    pub category_name: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub location_label: String,
    pub origin: Coordinates,
    /// `None` while on the home screen.
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub workers: Vec<Worker>,
    pub refine_term: String,
    pub sort_mode: SortMode,
    pub tip: Option<String>,
    pub tip_loading: bool,
}

#[derive(Debug, Clone)]
pub struct BrowseSession {
    origin: Coordinates,
    location_label: String,
    list: Option<ListContext>,
    refine_term: String,
    sort_mode: SortMode,
    tip: Option<String>,
    tip_loading: bool,
    tip_token: u64,
    last_seen: Instant,
}

impl BrowseSession {
    pub fn new(origin: Coordinates, location_label: impl Into<String>) -> Self {
        BrowseSession {
            origin,
            location_label: location_label.into(),
            list: None,
            refine_term: String::new(),
            sort_mode: SortMode::default(),
            tip: None,
            tip_loading: false,
            tip_token: 0,
            last_seen: Instant::now(),
        }
    }

    #[cfg(test)]
    pub fn list(&self) -> Option<&ListContext> {
        self.list.as_ref()
    }

    /// Marks the session as used now.
    pub fn touch(&mut self) {
        self.touch_at(Instant::now());
    }

    pub fn touch_at(&mut self, at: Instant) {
        self.last_seen = at;
    }

    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }

    /// Changes the reference coordinate for subsequent queries. The list on
    /// screen keeps the distances it was ranked with.
    pub fn set_location(&mut self, origin: Coordinates, label: impl Into<String>) {
        self.origin = origin;
        self.location_label = label.into();
    }

    /// Invalidates any tip in flight.
    fn reset_tip(&mut self) -> u64 {
        self.tip_token += 1;
        self.tip = None;
        self.tip_loading = false;
        self.tip_token
    }

    fn show(&mut self, list: ListContext) {
        self.list = Some(list);
        self.refine_term.clear();
        self.sort_mode = SortMode::default();
    }

    /// Lists the category's workers nearest first and asks for a tip.
    pub fn select_category(&mut self, workers: &[Worker], category: Category) -> TipRequest {
        let results = search_by_category(workers, category.id, self.origin);
        self.show(ListContext {
            title: format!("Available {}", category.name),
            from_category: Some(category),
            workers: results,
        });

        let token = self.reset_tip();
        self.tip_loading = true;
        TipRequest {
            token,
            category_name: category.name.to_string(),
        }
    }

    /// Returns `false` and leaves everything untouched when both terms are blank.
    pub fn search(&mut self, workers: &[Worker], query: &SearchQuery) -> bool {
        let Some(results) = search_by_text(workers, query, self.origin) else {
            return false;
        };
        self.show(ListContext {
            title: "Search Results".to_string(),
            from_category: None,
            workers: results,
        });
        self.reset_tip();
        true
    }

    pub fn set_refine_term(&mut self, term: impl Into<String>) {
        self.refine_term = term.into();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Back to the home screen.
    pub fn clear(&mut self) {
        self.list = None;
        self.refine_term.clear();
        self.sort_mode = SortMode::default();
        self.reset_tip();
    }

    /// Applies a fetched tip if it answers the latest query.
    pub fn apply_tip(&mut self, token: u64, tip: String) -> bool {
        if token != self.tip_token || self.list.is_none() {
            return false;
        }
        self.tip = Some(tip);
        self.tip_loading = false;
        true
    }

    /// The displayed list: refined from the base list, then sorted.
    pub fn displayed_workers(&self) -> Vec<Worker> {
        let Some(list) = &self.list else {
            return Vec::new();
        };
        let mut shown = refine(&list.workers, &self.refine_term);
        sort_workers(&mut shown, self.sort_mode);
        shown
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            location_label: self.location_label.clone(),
            origin: self.origin,
            title: self.list.as_ref().map(|l| l.title.clone()),
            category_id: self
                .list
                .as_ref()
                .and_then(|l| l.from_category)
                .map(|c| c.id.to_string()),
            workers: self.displayed_workers(),
            refine_term: self.refine_term.clone(),
            sort_mode: self.sort_mode,
            tip: self.tip.clone(),
            tip_loading: self.tip_loading,
        }
    }
}
