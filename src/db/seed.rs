use serde_json::{json, Value};

use crate::db::normalize::normalize_workers;
use crate::models::Worker;

fn catalogue() -> Value {
    json!([
        {
            "id": 1, "name": "Rajesh Kumar", "age": 38, "categoryId": "plumber", "categoryName": "Plumber",
            "experience": 12, "rating": 4.8, "reviewCount": 152, "jobsCompleted": 310,
            "photo": "https://picsum.photos/id/1005/200/200", "verified": true, "available": true, "featured": true,
            "city": "Kukatpally", "latitude": 17.4948, "longitude": 78.4000, "phone": "9876543210",
            "hourlyRate": 300, "nextAvailable": "Today, 2 PM", "badges": ["Top Rated", "Certified"],
            "serviceAreas": ["Residential Plumbing", "Drain Cleaning", "Pipe Repair"],
            "skills": ["Leak Detection", "Pipe Fitting", "Water Heater Repair", "Drainage Systems"],
            "bio": "With over a decade of experience, Rajesh is a master plumber known for his reliability and quick problem-solving skills.",
            "reviews": [
                { "id": 1, "userName": "Anjali S.", "userImage": "https://picsum.photos/id/1011/50/50", "rating": 5,
                  "comment": "Very professional and fixed the leak quickly!", "date": "2023-10-15" }
            ]
        },
        {
            "id": 2, "name": "Suresh Singh", "age": 32, "categoryId": "coconut-climber", "categoryName": "Coconut Tree Climber",
            "experience": 8, "rating": 4.9, "reviewCount": 45, "jobsCompleted": 120,
            "photo": "https://picsum.photos/id/1006/200/200", "verified": true, "available": true, "featured": true,
            "city": "Gachibowli", "latitude": 17.4401, "longitude": 78.3489, "phone": "9876543211",
            "hourlyRate": 50, "nextAvailable": "Tomorrow",
            "serviceAreas": ["Coconut Harvesting", "Tree Trimming"],
            "skills": ["Traditional Climbing", "Safety Equipment Usage"],
            "bio": "Expert coconut tree climber using safety gear. Quick and clean harvesting.",
            "reviews": []
        },
        {
            "id": 3, "name": "SecureTech Team", "age": 0, "categoryId": "cctv", "categoryName": "CCTV Surveillance",
            "experience": 5, "rating": 4.7, "reviewCount": 20, "jobsCompleted": 64,
            "photo": "https://picsum.photos/id/1015/200/200", "verified": true, "available": true, "featured": true,
            "city": "Madhapur", "latitude": 17.4483, "longitude": 78.3915, "phone": "9876543212",
            "hourlyRate": 1500, "badges": ["Agency"],
            "serviceAreas": ["Camera Installation", "Maintenance", "IP Cameras"],
            "skills": ["Wiring", "Network Config", "Remote View Setup"],
            "bio": "Professional team for home and office security solutions.",
            "reviews": []
        },
        {
            "id": 4, "name": "Green Energy Sol", "age": 0, "categoryId": "solar", "categoryName": "Solar Installation",
            "experience": 7, "rating": 4.8, "reviewCount": 33, "jobsCompleted": 48,
            "photo": "https://picsum.photos/id/1018/200/200", "verified": true, "available": true, "featured": false,
            "city": "Banjara Hills", "latitude": 17.4156, "longitude": 78.4446, "phone": "9876543213",
            "hourlyRate": 5000,
            "serviceAreas": ["Rooftop Solar", "Panel Cleaning"],
            "skills": ["Installation", "Inverter Sync", "Maintenance"],
            "bio": "Helping you switch to renewable energy with efficient solar panel installations.",
            "reviews": []
        },
        {
            "id": 5, "name": "Dr. Priya Sharma", "age": 35, "categoryId": "doctor", "categoryName": "Doctors",
            "experience": 10, "rating": 4.9, "reviewCount": 500, "jobsCompleted": 1200,
            "photo": "https://picsum.photos/id/1066/200/200", "verified": true, "available": true, "featured": true,
            "city": "Jubilee Hills", "latitude": 17.4316, "longitude": 78.4068, "phone": "9876543217",
            "serviceAreas": ["General Checkup", "Fever Treatment", "Consultation"],
            "skills": ["Family Medicine", "Preventive Care", "Minor Illnesses"],
            "bio": "Dr. Priya Sharma is a compassionate and experienced General Physician.",
            "reviews": []
        }
    ])
}

/// Starting catalogue used when nothing has been persisted yet.
pub fn seed_workers(fallback: (f64, f64)) -> Vec<Worker> {
    normalize_workers(&catalogue(), fallback).unwrap_or_default()
}
