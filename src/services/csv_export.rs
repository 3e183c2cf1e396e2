//! Spreadsheet export of the worker collection.

use crate::models::Worker;

const HEADERS: [&str; 16] = [
    "ID",
    "Name",
    "Age",
    "Category",
    "Experience (yrs)",
    "Rating",
    "Review Count",
    "Phone",
    "City",
    "Verified",
    "Available",
    "Featured",
    "Bio",
    "Skills",
    "Service Areas",
    "Badges",
];

pub const EXPORT_FILE_NAME: &str = "workers.csv";

/// Quotes a cell when it holds a comma, quote or newline, doubling inner quotes.
pub fn escape_csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn row(worker: &Worker) -> Vec<String> {
    vec![
        worker.id.to_string(),
        worker.name.clone(),
        worker.age.to_string(),
        worker.category_name.clone(),
        worker.experience.to_string(),
        worker.rating.to_string(),
        worker.review_count.to_string(),
        worker.phone.clone(),
        worker.city.clone(),
        worker.verified.to_string(),
        worker.available.to_string(),
        worker.featured.to_string(),
        worker.bio.clone(),
        worker.skills.join("; "),
        worker.service_areas.join("; "),
        worker.badges.as_ref().map(|b| b.join("; ")).unwrap_or_default(),
    ]
}

pub fn workers_to_csv(workers: &[Worker]) -> String {
    let mut lines = Vec::with_capacity(workers.len() + 1);
    lines.push(HEADERS.join(","));
    for worker in workers {
        let cells: Vec<String> = row(worker).iter().map(|c| escape_csv_cell(c)).collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}
