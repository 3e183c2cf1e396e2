use serde::Serialize;
use rocket_okapi::okapi::schemars::JsonSchema;

use crate::models::{all_categories, Worker};

const TOP_CATEGORIES: usize = 5;

#[derive(Debug, Serialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    /// Share of all workers, 0-100.
    pub percentage: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_workers: usize,
    pub total_categories: usize,
    pub verified_workers: usize,
    pub featured_workers: usize,
    pub top_categories: Vec<CategoryCount>,
}

pub fn dashboard_stats(workers: &[Worker]) -> DashboardStats {
    let total = workers.len();

    // First-seen order keeps ties stable once sorted.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for worker in workers.iter().filter(|w| !w.category_name.is_empty()) {
        match counts.iter_mut().find(|(name, _)| *name == worker.category_name) {
            Some((_, count)) => *count += 1,
            None => counts.push((worker.category_name.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let top_categories = counts
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|(category, count)| CategoryCount {
            category,
            count,
            percentage: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    DashboardStats {
        total_workers: total,
        total_categories: all_categories().count(),
        verified_workers: workers.iter().filter(|w| w.verified).count(),
        featured_workers: workers.iter().filter(|w| w.featured).count(),
        top_categories,
    }
}
