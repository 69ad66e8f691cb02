//! End-to-end flows against a mocked Calorie Counter API

use calorie_counter::compose::MealDraft;
use calorie_counter::error::Error;
use calorie_counter::guard::Protected;
use calorie_counter::meals::MealCategory;
use calorie_counter::session::{FileStorage, SessionStore};
use calorie_counter::CalorieCounter;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn food_body(id: i64, name: &str, calories: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "brand": null,
        "portion_size_g": "100.00",
        "portion_unit": "g",
        "calories": calories,
        "proteins": "13.00",
        "fats": "11.00",
        "carbs": "1.10",
        "sugars": null,
        "fiber": null,
        "sodium": null
    })
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({"username": "maria", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "test_access",
            "refresh": "test_refresh",
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_log_a_meal_from_scratch() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/foods/"))
        .and(query_param("search", "egg"))
        .and(header("Authorization", "Bearer test_access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            food_body(1, "Huevo", "155.00"),
            food_body(2, "Huevo frito", "196.00"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/meals/"))
        .and(header("Authorization", "Bearer test_access"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "date": "2025-06-14",
            "meal_type": "desayuno",
            "total_calories": "155.00",
            "total_proteins": "13.00",
            "total_fats": "11.00",
            "total_carbs": "1.10",
            "meal_food_items": [{
                "id": 10,
                "food_item": 1,
                "food_item_name": "Huevo",
                "food_item_brand": null,
                "food_item_portion_unit": "g",
                "quantity": "100.00",
                "calculated_calories": "155.00",
                "calculated_proteins": "13.00",
                "calculated_fats": "11.00",
                "calculated_carbs": "1.10"
            }]
        })))
        .mount(&server)
        .await;

    let client = CalorieCounter::new(&server.uri());
    client.auth().sign_in("maria", "hunter2").await.unwrap();

    // search, pick the first result with its default quantity
    let mut draft = MealDraft::new();
    let ticket = draft.begin_search("egg").unwrap();
    let results = client.foods().search(draft.query()).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(draft.apply_search_results(ticket, results));

    let picked = draft.search_results()[0].clone();
    draft.select_candidate(picked);
    draft.add_candidate_to_meal().unwrap();

    // default quantity equals the portion size, so the computed calories
    // match the listed ones exactly
    assert_eq!(draft.items()[0].macros.calories, 155.0);
    assert_eq!(draft.totals().calories, 155.0);

    let payload = draft.save_payload().unwrap();
    let saved = client.meals().create(&payload).await.unwrap();
    assert_eq!(saved.total_calories, 155.0);

    draft.clear_after_save();
    assert!(draft.items().is_empty());
}

#[tokio::test]
async fn test_401_clears_session_and_guards_redirect() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/meals/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(&server)
        .await;

    let client = CalorieCounter::new(&server.uri());
    client.auth().sign_in("maria", "hunter2").await.unwrap();
    assert!(client.session().is_signed_in());

    let dashboard = Protected::new("dashboard");
    assert!(!dashboard.resolve(client.session()).is_redirect());

    let result = client.meals().list(None).await;
    assert!(matches!(result, Err(Error::Unauthorized)));

    // both tokens are gone and protected routes bounce to login
    assert_eq!(client.session().get(), None);
    assert!(dashboard.resolve(client.session()).is_redirect());
}

#[tokio::test]
async fn test_daily_summary_over_three_meals() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    let meal = |id: i64, date: &str, calories: &str| {
        json!({
            "id": id,
            "date": date,
            "meal_type": "cena",
            "total_calories": calories,
            "total_proteins": "10.00",
            "total_fats": "5.00",
            "total_carbs": "20.00",
            "meal_food_items": []
        })
    };

    Mock::given(method("GET"))
        .and(path("/api/meals/"))
        .and(query_param("date", "2025-06-14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            meal(1, "2025-06-14", "195.00"),
            meal(2, "2025-06-14", "300.00"),
            meal(3, "2025-06-14", "105.00"),
            meal(4, "2025-06-13", "999.00"),
            meal(5, "2025-06-12", "999.00"),
        ])))
        .mount(&server)
        .await;

    let client = CalorieCounter::new(&server.uri());
    client.auth().sign_in("maria", "hunter2").await.unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    let summary = client.meals().daily_summary(date).await.unwrap();

    assert_eq!(summary.meals.len(), 3);
    assert_eq!(summary.totals.calories, 600.0);
    assert!(summary.meals.iter().all(|m| m.date == date));
    assert_eq!(summary.meals[0].meal_type, MealCategory::Dinner);
}

#[tokio::test]
async fn test_session_survives_a_restart() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    {
        let store = SessionStore::with_backend(FileStorage::new(&session_path));
        let client = CalorieCounter::new_with_store(&server.uri(), store);
        client.auth().sign_in("maria", "hunter2").await.unwrap();
    }

    // a fresh client over the same file starts signed in
    let store = SessionStore::with_backend(FileStorage::new(&session_path));
    let client = CalorieCounter::new_with_store(&server.uri(), store);

    assert!(client.session().is_signed_in());
    assert_eq!(client.session().username().as_deref(), Some("maria"));

    let dashboard = Protected::new("dashboard");
    assert!(!dashboard.resolve(client.session()).is_redirect());

    // sign-out removes the file too
    client.auth().sign_out();
    let reopened = SessionStore::with_backend(FileStorage::new(&session_path));
    assert!(!reopened.is_signed_in());
}

#[tokio::test]
async fn test_unexpected_server_errors_surface_as_api_errors() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/foods/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = CalorieCounter::new(&server.uri());
    client.auth().sign_in("maria", "hunter2").await.unwrap();

    match client.foods().search("egg").await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected API error, got {:?}", other.map(|f| f.len())),
    }

    // an unexpected failure does not invalidate the session
    assert!(client.session().is_signed_in());
}
