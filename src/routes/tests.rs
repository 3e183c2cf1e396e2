use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

use crate::db::MemoryStorage;
use crate::state::testing::{test_state, TEST_MAX_SESSIONS};
use crate::state::AppState;

fn client() -> Client {
    let rocket = crate::app().manage(test_state(MemoryStorage::new()));
    Client::tracked(rocket).expect("valid rocket instance")
}

fn get_json(client: &Client, uri: &str) -> (Status, Value) {
    let response = client.get(uri.to_string()).dispatch();
    let status = response.status();
    (status, response.into_json().expect("json body"))
}

fn ids(data: &Value) -> Vec<i64> {
    data.as_array()
        .expect("array")
        .iter()
        .map(|w| w["id"].as_i64().expect("id"))
        .collect()
}

fn admin_token(client: &Client) -> Header<'static> {
    let response = client
        .post("/api/v1/admin/login")
        .json(&json!({ "username": "admin", "password": "admin123" }))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json body");
    let token = body["data"]["token"].as_str().expect("token").to_string();
    Header::new("Authorization", format!("Bearer {}", token))
}

#[test]
fn lists_category_sections() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/categories");
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(7));

    let (_, body) = get_json(&client, "/api/v1/categories/solar");
    assert_eq!(body["data"]["name"], "Solar Installation");
    let (status, _) = get_json(&client, "/api/v1/categories/astronaut");
    assert_eq!(status, Status::NotFound);
}

#[test]
fn category_workers_known_empty_and_unknown() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/categories/doctor/workers");
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["title"], "Available Doctors");
    assert_eq!(ids(&body["data"]["workers"]), vec![5]);

    let (status, body) = get_json(&client, "/api/v1/categories/tailor/workers");
    assert_eq!(status, Status::Ok);
    assert!(body["data"]["workers"].as_array().expect("array").is_empty());

    let (status, _) = get_json(&client, "/api/v1/categories/astronaut/workers");
    assert_eq!(status, Status::NotFound);
}

#[test]
fn worker_lookup() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/workers/1");
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["name"], "Rajesh Kumar");

    let (status, body) = get_json(&client, "/api/v1/workers/999");
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["success"], false);
}

#[test]
fn featured_defaults_to_fallback_origin() {
    let client = client();
    let (_, body) = get_json(&client, "/api/v1/workers/featured");
    assert_eq!(ids(&body["data"]), vec![5, 3, 1, 2]);

    let (_, body) = get_json(&client, "/api/v1/workers/featured?latitude=17.4401&longitude=78.3489");
    assert_eq!(ids(&body["data"])[0], 2);
}

#[test]
fn stateless_search() {
    let client = client();
    let (status, body) = get_json(&client, "/api/v1/workers/search");
    assert_eq!(status, Status::Ok);
    assert!(body.get("data").is_none());

    let (_, body) = get_json(&client, "/api/v1/workers/search?service=PLUMBER");
    assert_eq!(ids(&body["data"]), vec![1]);

    let (_, body) = get_json(
        &client,
        "/api/v1/workers/search?location=Your%20Current%20Location&sort=most-jobs",
    );
    assert_eq!(ids(&body["data"]), vec![5, 1, 2, 3, 4]);

    let (status, _) = get_json(&client, "/api/v1/workers/search?service=x&sort=cheapest");
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn location_suggestions_need_two_characters() {
    let client = client();
    let (_, body) = get_json(&client, "/api/v1/locations/suggest?q=h");
    assert!(body["data"].as_array().expect("array").is_empty());

    let (_, body) = get_json(&client, "/api/v1/locations/suggest?q=hills");
    assert_eq!(body["data"], json!(["Banjara Hills", "Jubilee Hills"]));
}

#[test]
fn review_updates_rating() {
    let client = client();
    let response = client
        .post("/api/v1/workers/1/reviews")
        .json(&json!({ "rating": 4, "comment": "Quick and tidy" }))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    let (_, body) = get_json(&client, "/api/v1/workers/1");
    assert_eq!(body["data"]["rating"], 4.5);
    assert_eq!(body["data"]["reviewCount"], 2);
    assert_eq!(body["data"]["reviews"][0]["userName"], "You");

    let response = client
        .post("/api/v1/workers/1/reviews")
        .json(&json!({ "rating": 9, "comment": "?" }))
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn cart_rejects_duplicates_with_notice() {
    let client = client();
    let item = json!({ "workerId": 1, "workerName": "Rajesh Kumar", "serviceName": "Pipe Repair", "price": 300.0 });

    let body: Value = client.post("/api/v1/cart").json(&item).dispatch().into_json().expect("json");
    assert_eq!(body["message"], "Pipe Repair added to cart");

    let body: Value = client.post("/api/v1/cart").json(&item).dispatch().into_json().expect("json");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Service already in cart");
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["total"], 300.0);

    let body: Value = client.delete("/api/v1/cart/1").dispatch().into_json().expect("json");
    assert_eq!(body["message"], "Removed from cart");
    assert_eq!(body["data"]["total"], 0.0);
}

#[test]
fn review_for_unknown_worker_is_a_no_op() {
    let client = client();
    let response = client
        .post("/api/v1/workers/987654/reviews")
        .json(&json!({ "rating": 4, "comment": "ok" }))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "No such worker");
    assert!(body.get("data").is_none());
}

#[test]
fn booking_lifecycle() {
    let client = client();
    let response = client
        .post("/api/v1/bookings")
        .json(&json!({
            "workerId": 2,
            "service": "Coconut Harvesting",
            "customerName": "Kiran",
            "customerPhone": "9123456780"
        }))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json");
    assert_eq!(body["data"]["status"], "pending");
    let booking_id = body["data"]["id"].as_i64().expect("id");

    let body: Value = client
        .post(format!("/api/v1/bookings/{}/cancel", booking_id))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["status"], "cancelled");
    assert_eq!(body["message"], "Booking cancelled");

    let body: Value = client
        .post(format!("/api/v1/bookings/{}/cancel", booking_id))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["message"], "Booking is already cancelled; nothing changed");
    assert_eq!(body["data"]["status"], "cancelled");

    let body: Value = client.post("/api/v1/bookings/42/cancel").dispatch().into_json().expect("json");
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_none());
}

#[test]
fn admin_routes_require_token() {
    let client = client();
    let response = client.get("/api/v1/admin/workers").dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client
        .post("/api/v1/admin/login")
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn admin_adds_toggles_and_deletes_worker() {
    let client = client();
    let auth = admin_token(&client);

    let response = client
        .post("/api/v1/admin/workers")
        .header(auth.clone())
        .json(&json!({
            "name": "Ravi Teja",
            "age": 29,
            "categoryId": "electrician",
            "experience": 4,
            "city": "Ameerpet",
            "phone": "9000000001",
            "skills": ["Wiring", " "]
        }))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().expect("json");
    assert_eq!(body["message"], "Worker added successfully!");
    assert_eq!(body["data"]["categoryName"], "Electricians");
    assert_eq!(body["data"]["skills"], json!(["Wiring"]));
    let id = body["data"]["id"].as_i64().expect("id");

    let (_, body) = get_json(&client, "/api/v1/workers");
    assert_eq!(ids(&body["data"])[0], id);

    let body: Value = client
        .post(format!("/api/v1/admin/workers/{}/featured", id))
        .header(auth.clone())
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["value"], true);

    let body: Value = client
        .delete(format!("/api/v1/admin/workers/{}", id))
        .header(auth.clone())
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["message"], "Worker deleted.");

    let (status, _) = get_json(&client, &format!("/api/v1/workers/{}", id));
    assert_eq!(status, Status::NotFound);
}

#[test]
fn admin_rejects_unknown_category_and_bad_phone() {
    let client = client();
    let auth = admin_token(&client);

    let response = client
        .post("/api/v1/admin/workers")
        .header(auth.clone())
        .json(&json!({ "name": "X", "categoryId": "astronaut", "phone": "9000000001" }))
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    let response = client
        .post("/api/v1/admin/workers")
        .header(auth)
        .json(&json!({ "name": "X", "categoryId": "plumber", "phone": "12345" }))
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn admin_export_and_dashboard() {
    let client = client();
    let auth = admin_token(&client);

    let response = client.get("/api/v1/admin/workers/export").header(auth.clone()).dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type().map(|c| c.sub().to_string()), Some("csv".to_string()));
    let csv = response.into_string().expect("csv body");
    assert!(csv.starts_with("ID,Name,Age,Category,"));
    assert_eq!(csv.lines().count(), 6);

    let (status, _) = get_json(&client, "/api/v1/admin/dashboard");
    assert_eq!(status, Status::Unauthorized);
    let body: Value = client
        .get("/api/v1/admin/dashboard")
        .header(auth)
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["totalWorkers"], 5);
    assert_eq!(body["data"]["featuredWorkers"], 4);
}

#[test]
fn admin_offers() {
    let client = client();
    let auth = admin_token(&client);

    let body: Value = client
        .post("/api/v1/admin/offers")
        .header(auth.clone())
        .json(&json!({ "title": "Monsoon deal", "type": "percentage", "value": 15, "validTill": "2024-09-30" }))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["message"], "Offer 'Monsoon deal' created (15% OFF)");
    let offer_id = body["data"]["id"].as_str().expect("offer id").to_string();

    let body: Value = client.get("/api/v1/admin/offers").header(auth.clone()).dispatch().into_json().expect("json");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let body: Value = client
        .delete(format!("/api/v1/admin/offers/{}", offer_id))
        .header(auth)
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["message"], "Offer deleted");
}

#[test]
fn browse_session_flow() {
    let client = client();
    let body: Value = client
        .post("/api/v1/browse")
        .header(ContentType::JSON)
        .body("{}")
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["view"]["locationLabel"], "Hyderabad");
    let session = body["data"]["sessionId"].as_str().expect("session id").to_string();
    let base = format!("/api/v1/browse/{}", session);

    let body: Value = client
        .put(format!("{}/location", base))
        .json(&json!({ "latitude": 17.4401, "longitude": 78.3489 }))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["locationLabel"], "Your Current Location");

    let body: Value = client
        .post(format!("{}/category/coconut-climber", base))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["title"], "Available Coconut Tree Climber");
    assert_eq!(ids(&body["data"]["workers"]), vec![2]);

    let body: Value = client
        .post(format!("{}/search", base))
        .json(&json!({ "service": "", "location": "Your Current Location" }))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["title"], "Search Results");
    assert_eq!(ids(&body["data"]["workers"])[0], 2);
    assert_eq!(body["data"]["tip"], Value::Null);

    let body: Value = client
        .put(format!("{}/refine", base))
        .json(&json!({ "term": "team" }))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(ids(&body["data"]["workers"]), vec![3]);

    let body: Value = client
        .put(format!("{}/sort", base))
        .json(&json!({ "mode": "top-rated" }))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["sortMode"], "top-rated");

    let body: Value = client.post(format!("{}/back", base)).dispatch().into_json().expect("json");
    assert_eq!(body["data"]["title"], Value::Null);
    assert!(body["data"]["workers"].as_array().expect("array").is_empty());

    assert_eq!(client.delete(base.clone()).dispatch().status(), Status::Ok);
    assert_eq!(client.get(base).dispatch().status(), Status::NotFound);
}

#[test]
fn browse_location_failure_falls_back() {
    let client = client();
    let body: Value = client
        .post("/api/v1/browse")
        .json(&json!({ "latitude": 17.4401, "longitude": 78.3489 }))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["data"]["view"]["locationLabel"], "Your Current Location");
    let session = body["data"]["sessionId"].as_str().expect("session id").to_string();

    let body: Value = client
        .put(format!("/api/v1/browse/{}/location", session))
        .json(&json!({}))
        .dispatch()
        .into_json()
        .expect("json");
    assert_eq!(body["message"], "Could not get your location.");
    assert_eq!(body["data"]["locationLabel"], "Hyderabad");

    let response = client.get("/api/v1/browse/not-a-uuid").dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn browse_sessions_are_capped() {
    let client = client();
    for _ in 0..(TEST_MAX_SESSIONS * 3) {
        let response = client.post("/api/v1/browse").header(ContentType::JSON).body("{}").dispatch();
        assert_eq!(response.status(), Status::Ok);
    }

    let state = client.rocket().state::<AppState>().expect("managed state");
    let sessions = state.sessions.try_read().expect("sessions unlocked");
    assert_eq!(sessions.len(), TEST_MAX_SESSIONS);
}
