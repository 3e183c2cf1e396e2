//! Shape normalization for persisted worker records.
//!
//! Persisted data may be partially corrupt or written by an older schema.
//! Each record is coerced field by field against a fixed default table; a
//! record that cannot be coerced is dropped on its own, never the whole list.
//!
//! | field | accepted | default |
//! |---|---|---|
//! | `id` | number or numeric string | record rejected |
//! | numeric fields | number or numeric string | `0` |
//! | `latitude` / `longitude` | number or numeric string | fallback coordinate |
//! | text fields | string | `""` |
//! | `available` | bool | `true` |
//! | other flags | bool | `false` |
//! | list fields | array (non-string items skipped) | `[]` |
//! | `hourlyRate`, `nextAvailable`, `badges` | as above | absent |

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::models::{Review, Worker, DEFAULT_REVIEWER_IMAGE};

type Object = Map<String, Value>;

fn number(obj: &Object, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn f64_or(obj: &Object, key: &str, default: f64) -> f64 {
    number(obj, key).unwrap_or(default)
}

fn u32_or_zero(obj: &Object, key: &str) -> u32 {
    number(obj, key)
        .filter(|n| *n >= 0.0)
        .map(|n| n.min(f64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

fn text(obj: &Object, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn optional_text(obj: &Object, key: &str) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn flag(obj: &Object, key: &str, default: bool) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

fn string_list(obj: &Object, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn timestamp(obj: &Object, key: &str) -> Option<DateTime<Utc>> {
    match obj.get(key) {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

fn normalize_review(raw: &Value) -> Option<Review> {
    let obj = raw.as_object()?;
    let rating = number(obj, "rating").unwrap_or(0.0).round().clamp(0.0, 5.0) as u8;
    let user_image = match text(obj, "userImage") {
        image if image.is_empty() => DEFAULT_REVIEWER_IMAGE.to_string(),
        image => image,
    };

    Some(Review {
        id: number(obj, "id").unwrap_or(0.0) as i64,
        user_name: text(obj, "userName"),
        user_image,
        rating,
        comment: text(obj, "comment"),
        media_url: optional_text(obj, "mediaUrl"),
        date: optional_text(obj, "date"),
    })
}

/// Coerces one raw record into a fully populated worker.
///
/// Returns `None` for non-objects and for records without a usable id.
pub fn normalize_worker(raw: &Value, fallback: (f64, f64)) -> Option<Worker> {
    let obj = raw.as_object()?;
    let id = number(obj, "id")? as i64;

    let reviews: Vec<Review> = match obj.get("reviews") {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_review).collect(),
        _ => Vec::new(),
    };

    let badges = match obj.get("badges") {
        Some(Value::Array(_)) => Some(string_list(obj, "badges")),
        _ => None,
    };

    Some(Worker {
        id,
        name: text(obj, "name"),
        age: u32_or_zero(obj, "age"),
        category_id: text(obj, "categoryId"),
        category_name: text(obj, "categoryName"),
        experience: u32_or_zero(obj, "experience"),
        rating: f64_or(obj, "rating", 0.0).clamp(0.0, 5.0),
        review_count: u32_or_zero(obj, "reviewCount"),
        distance: 0.0,
        photo: text(obj, "photo"),
        verified: flag(obj, "verified", false),
        available: flag(obj, "available", true),
        featured: flag(obj, "featured", false),
        city: text(obj, "city"),
        latitude: f64_or(obj, "latitude", fallback.0),
        longitude: f64_or(obj, "longitude", fallback.1),
        service_areas: string_list(obj, "serviceAreas"),
        reviews,
        phone: text(obj, "phone"),
        bio: text(obj, "bio"),
        skills: string_list(obj, "skills"),
        hourly_rate: number(obj, "hourlyRate"),
        next_available: optional_text(obj, "nextAvailable"),
        badges,
        jobs_completed: u32_or_zero(obj, "jobsCompleted"),
        created_at: timestamp(obj, "createdAt"),
        updated_at: timestamp(obj, "updatedAt"),
    })
}

/// Normalizes a persisted `workers` blob. `None` when the blob is not a list.
pub fn normalize_workers(raw: &Value, fallback: (f64, f64)) -> Option<Vec<Worker>> {
    let items = raw.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| normalize_worker(item, fallback))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FALLBACK: (f64, f64) = (17.385, 78.4867);

    #[test]
    fn drops_non_object_entries_only() {
        let raw = json!([
            { "id": 1, "name": "Rajesh Kumar", "categoryId": "plumber", "categoryName": "Plumber",
              "rating": 4.8, "city": "Kukatpally", "latitude": 17.4948, "longitude": 78.4,
              "serviceAreas": ["Pipe Repair"], "reviews": [] },
            "corrupt"
        ]);
        let workers = normalize_workers(&raw, FALLBACK).expect("list");
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].name, "Rajesh Kumar");
        assert_eq!(workers[0].service_areas, vec!["Pipe Repair"]);
    }

    #[test]
    fn coerces_malformed_fields_to_defaults() {
        let raw = json!({
            "id": "7", "age": "thirty", "experience": "5", "rating": null,
            "reviewCount": -3, "serviceAreas": "Drains", "skills": ["Fitting", 3],
            "reviews": [ { "rating": "4", "comment": "fine" }, 12 ],
            "badges": "Top Rated", "available": "yes"
        });
        let worker = normalize_worker(&raw, FALLBACK).expect("worker");
        assert_eq!(worker.id, 7);
        assert_eq!(worker.age, 0);
        assert_eq!(worker.experience, 5);
        assert_eq!(worker.rating, 0.0);
        assert_eq!(worker.review_count, 0);
        assert!(worker.service_areas.is_empty());
        assert_eq!(worker.skills, vec!["Fitting"]);
        assert_eq!(worker.reviews.len(), 1);
        assert_eq!(worker.reviews[0].rating, 4);
        assert_eq!(worker.reviews[0].user_image, DEFAULT_REVIEWER_IMAGE);
        assert_eq!(worker.badges, None);
        assert!(worker.available);
        assert_eq!((worker.latitude, worker.longitude), FALLBACK);
    }

    #[test]
    fn rejects_record_without_id() {
        assert!(normalize_worker(&json!({ "name": "No Id" }), FALLBACK).is_none());
        assert!(normalize_worker(&json!(42), FALLBACK).is_none());
    }

    #[test]
    fn non_list_blob_is_not_normalized() {
        assert!(normalize_workers(&json!({ "id": 1 }), FALLBACK).is_none());
    }
}
