//! Matching, distance ranking and refinement over the worker collection.
//!
//! Every function works on a snapshot and returns annotated copies; the
//! store's workers are never mutated. Distances are always recomputed from
//! the given origin, never read from the stored `distance` field.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

use crate::models::Worker;
use crate::search::distance::Coordinates;

/// Location value meaning "use the detected position, any city".
pub const CURRENT_LOCATION: &str = "Your Current Location";

const FEATURED_LIMIT: usize = 5;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Distance order as produced by the primary query.
    #[default]
    Recommended,
    TopRated,
    MostExperienced,
    MostJobs,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "recommended" => Ok(SortMode::Recommended),
            "top-rated" => Ok(SortMode::TopRated),
            "most-experienced" => Ok(SortMode::MostExperienced),
            "most-jobs" => Ok(SortMode::MostJobs),
            other => Err(format!("Unknown sort mode '{}'", other)),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, JsonSchema)]
pub struct SearchQuery {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub location: String,
}

impl SearchQuery {
    pub fn is_blank(&self) -> bool {
        self.service.trim().is_empty() && self.location.trim().is_empty()
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Annotates with distance from `origin` and sorts nearest first. The sort is
/// stable, so equal distances keep their collection order.
pub fn rank_by_distance<'a>(
    workers: impl IntoIterator<Item = &'a Worker>,
    origin: Coordinates,
) -> Vec<Worker> {
    let mut ranked: Vec<Worker> = workers
        .into_iter()
        .map(|w| w.with_distance(origin.distance_to(&Coordinates::new(w.latitude, w.longitude))))
        .collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

/// Exact `category_id` match, nearest first. Unknown ids give an empty list.
pub fn search_by_category(workers: &[Worker], category_id: &str, origin: Coordinates) -> Vec<Worker> {
    rank_by_distance(workers.iter().filter(|w| w.category_id == category_id), origin)
}

/// Free-text search. `None` when both terms are blank: nothing to do.
pub fn search_by_text(workers: &[Worker], query: &SearchQuery, origin: Coordinates) -> Option<Vec<Worker>> {
    if query.is_blank() {
        return None;
    }

    let service = query.service.trim().to_lowercase();
    let location = query.location.trim();
    let any_city = location.is_empty() || location == CURRENT_LOCATION;
    let location = location.to_lowercase();

    let matches = workers.iter().filter(|w| {
        let service_match = service.is_empty() || contains_ignore_case(&w.category_name, &service);
        let location_match = any_city || contains_ignore_case(&w.city, &location);
        service_match && location_match
    });

    Some(rank_by_distance(matches, origin))
}

/// Keeps workers whose name or any service area contains `term`. Order is
/// preserved and a blank term keeps everything.
pub fn refine(workers: &[Worker], term: &str) -> Vec<Worker> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return workers.to_vec();
    }
    workers
        .iter()
        .filter(|w| {
            contains_ignore_case(&w.name, &term)
                || w.service_areas.iter().any(|area| contains_ignore_case(area, &term))
        })
        .cloned()
        .collect()
}

/// Re-orders in place; every mode is a stable descending sort except
/// `Recommended`, which leaves the order untouched.
pub fn sort_workers(workers: &mut [Worker], mode: SortMode) {
    match mode {
        SortMode::Recommended => {}
        SortMode::TopRated => workers.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortMode::MostExperienced => workers.sort_by(|a, b| b.experience.cmp(&a.experience)),
        SortMode::MostJobs => workers.sort_by(|a, b| b.jobs_completed.cmp(&a.jobs_completed)),
    }
}

/// The nearest featured workers, for the home screen.
pub fn featured_workers(workers: &[Worker], origin: Coordinates) -> Vec<Worker> {
    let mut featured = rank_by_distance(workers.iter().filter(|w| w.featured), origin);
    featured.truncate(FEATURED_LIMIT);
    featured
}

/// Distinct cities in first-seen order.
pub fn known_locations(workers: &[Worker]) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for worker in workers {
        if !worker.city.is_empty() && !cities.contains(&worker.city) {
            cities.push(worker.city.clone());
        }
    }
    cities
}

/// Cities matching what the user has typed so far; needs at least two characters.
pub fn location_suggestions(workers: &[Worker], typed: &str) -> Vec<String> {
    let typed = typed.trim();
    if typed.chars().count() < 2 {
        return Vec::new();
    }
    let typed = typed.to_lowercase();
    known_locations(workers)
        .into_iter()
        .filter(|city| contains_ignore_case(city, &typed))
        .collect()
}
