use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;
use validator::Validate;

use crate::models::{Category, Review};
use crate::utils::validation::validate_phone_field;

pub type WorkerId = i64;

/// A service provider listed on the marketplace.
///
/// `distance` is transient: it is overwritten by the search pipeline before
/// any ranking and must never be trusted as stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub age: u32,
    pub category_id: String,
    pub category_name: String,
    pub experience: u32,
    pub rating: f64,
    pub review_count: u32,
    pub distance: f64,
    pub photo: String,
    pub verified: bool,
    pub available: bool,
    pub featured: bool,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub service_areas: Vec<String>,
    /// Newest first.
    pub reviews: Vec<Review>,
    pub phone: String,
    pub bio: String,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_available: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
    #[serde(default)]
    pub jobs_completed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Worker {
    /// Shallow copy carrying a freshly computed distance.
    pub fn with_distance(&self, distance: f64) -> Worker {
        Worker {
            distance,
            ..self.clone()
        }
    }
}

/// Everything an admin supplies when adding a worker; the store assigns the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerDraft {
    pub name: String,
    pub age: u32,
    pub category_id: String,
    pub category_name: String,
    pub experience: u32,
    pub rating: f64,
    pub review_count: u32,
    pub photo: String,
    pub verified: bool,
    pub available: bool,
    pub featured: bool,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub service_areas: Vec<String>,
    pub reviews: Vec<Review>,
    pub phone: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub next_available: Option<String>,
    pub badges: Option<Vec<String>>,
    pub jobs_completed: u32,
}

impl WorkerDraft {
    pub fn into_worker(self, id: WorkerId, now: DateTime<Utc>) -> Worker {
        Worker {
            id,
            name: self.name,
            age: self.age,
            category_id: self.category_id,
            category_name: self.category_name,
            experience: self.experience,
            rating: self.rating,
            review_count: self.review_count,
            distance: 0.0,
            photo: self.photo,
            verified: self.verified,
            available: self.available,
            featured: self.featured,
            city: self.city,
            latitude: self.latitude,
            longitude: self.longitude,
            service_areas: self.service_areas,
            reviews: self.reviews,
            phone: self.phone,
            bio: self.bio,
            skills: self.skills,
            hourly_rate: self.hourly_rate,
            next_available: self.next_available,
            badges: self.badges,
            jobs_completed: self.jobs_completed,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_latitude() -> f64 {
    crate::config::Config::default_latitude()
}

fn default_longitude() -> f64 {
    crate::config::Config::default_longitude()
}

/// Admin form payload for adding or editing a worker.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(range(max = 120))]
    pub age: u32,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub city: String,
    #[serde(default = "default_latitude")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[validate(custom = "validate_phone_field")]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
    pub next_available: Option<String>,
    pub badges: Option<Vec<String>>,
}

/// Trims each entry and drops the blank ones, the way the comma-separated
/// form inputs are cleaned.
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl WorkerDto {
    /// Builds a draft for a brand new worker. `category` must be the catalogue
    /// entry for `self.category_id`; its display name is denormalized here.
    pub fn into_draft(self, category: &Category) -> WorkerDraft {
        WorkerDraft {
            name: self.name.trim().to_string(),
            age: self.age,
            category_id: category.id.to_string(),
            category_name: category.name.to_string(),
            experience: self.experience,
            rating: 0.0,
            review_count: 0,
            photo: self.photo,
            verified: self.verified,
            available: self.available,
            featured: self.featured,
            city: self.city.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            service_areas: clean_list(self.service_areas),
            reviews: Vec::new(),
            phone: self.phone,
            bio: self.bio,
            skills: clean_list(self.skills),
            hourly_rate: self.hourly_rate,
            next_available: self.next_available,
            badges: self.badges.map(clean_list),
            jobs_completed: 0,
        }
    }

    /// Applies the form onto an existing worker. Identity, reviews and the
    /// derived rating fields are kept.
    pub fn apply_to(self, existing: &Worker, category: &Category) -> Worker {
        Worker {
            name: self.name.trim().to_string(),
            age: self.age,
            category_id: category.id.to_string(),
            category_name: category.name.to_string(),
            experience: self.experience,
            photo: self.photo,
            verified: self.verified,
            available: self.available,
            featured: self.featured,
            city: self.city.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            service_areas: clean_list(self.service_areas),
            phone: self.phone,
            bio: self.bio,
            skills: clean_list(self.skills),
            hourly_rate: self.hourly_rate,
            next_available: self.next_available,
            badges: self.badges.map(clean_list),
            ..existing.clone()
        }
    }
}
