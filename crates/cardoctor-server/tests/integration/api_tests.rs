use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::integration::common::{body_json, get_with_cookie, json_request, login, setup_test_app};

#[tokio::test]
async fn test_health_with_store() {
    let (app, _db, _container) = setup_test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn test_services_listing_and_projection() {
    let (app, db, _container) = setup_test_app().await;

    let seed = json!({
        "service_id": "01",
        "title": "Full Car Repair",
        "img": "https://example.com/repair.jpg",
        "price": "200.00",
        "description": "Everything, fixed.",
        "facility": [{"name": "Instant Car Services"}]
    });
    let inserted = db
        .service_repo()
        .insert_many(&[seed.as_object().cloned().unwrap()])
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    let response = app
        .clone()
        .oneshot(Request::get("/services").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let services = body_json(response).await;
    let services = services.as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["description"], "Everything, fixed.");
    assert_eq!(services[0]["facility"][0]["name"], "Instant Car Services");
    let id = services[0]["_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::get(format!("/service/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    assert_eq!(summary["_id"], id.as_str());
    assert_eq!(summary["title"], "Full Car Repair");
    assert_eq!(summary["price"], "200.00");
    assert_eq!(summary["img"], "https://example.com/repair.jpg");
    assert_eq!(summary["description"], "Everything, fixed.");
    assert!(summary.get("service_id").is_none());
    assert!(summary.get("facility").is_none());
}

#[tokio::test]
async fn test_unknown_service_is_null() {
    let (app, _db, _container) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::get("/service/64b7f0c2a1b2c3d4e5f60718")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_null());
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let (app, _db, _container) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/booking",
            &json!({
                "_id": "client-chosen",
                "customerName": "Ana",
                "email": "ana@example.com",
                "service": "Full Car Repair",
                "service_id": "01",
                "price": "200.00",
                "date": "2024-05-01"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let inserted = body_json(response).await;
    assert_eq!(inserted["acknowledged"], true);
    let id = inserted["insertedId"].as_str().unwrap().to_string();
    assert_ne!(id, "client-chosen");

    // Someone else's booking must not show up
    app.clone()
        .oneshot(json_request(
            "POST",
            "/booking",
            &json!({"email": "bo@example.com", "service": "Oil Change"}),
        ))
        .await
        .unwrap();

    let cookie = login(&app, json!({"email": "ana@example.com"})).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/booking?email=ana@example.com", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bookings = body_json(response).await;
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["_id"], id.as_str());
    assert_eq!(bookings[0]["customerName"], "Ana");

    for expected_modified in [1, 0] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/booking/{id}"),
                &json!({"status": "confirm"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated = body_json(response).await;
        assert_eq!(updated["matchedCount"], 1);
        assert_eq!(updated["modifiedCount"], expected_modified);
        assert_eq!(updated["upsertedCount"], 0);
        assert!(updated["upsertedId"].is_null());
    }

    let response = app
        .clone()
        .oneshot(get_with_cookie("/booking?email=ana@example.com", &cookie))
        .await
        .unwrap();
    let bookings = body_json(response).await;
    assert_eq!(bookings[0]["status"], "confirm");

    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/booking/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["acknowledged"], true);
    assert_eq!(deleted["deletedCount"], 1);

    let response = app
        .oneshot(get_with_cookie("/booking?email=ana@example.com", &cookie))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_delete_unknown_booking() {
    let (app, _db, _container) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::delete("/booking/64b7f0c2a1b2c3d4e5f60718")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["acknowledged"], true);
    assert_eq!(deleted["deletedCount"], 0);
}

#[tokio::test]
async fn test_patch_unknown_booking_matches_nothing() {
    let (app, _db, _container) = setup_test_app().await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/booking/64b7f0c2a1b2c3d4e5f60718",
            &json!({"status": "confirm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["matchedCount"], 0);
    assert_eq!(updated["modifiedCount"], 0);
}

#[tokio::test]
async fn test_claimless_session_lists_everything() {
    let (app, _db, _container) = setup_test_app().await;

    for email in ["ana@example.com", "bo@example.com"] {
        app.clone()
            .oneshot(json_request("POST", "/booking", &json!({"email": email})))
            .await
            .unwrap();
    }

    let cookie = login(&app, json!({"name": "walk-in"})).await;

    let response = app
        .oneshot(get_with_cookie("/booking", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_email_query_lists_everything() {
    let (app, _db, _container) = setup_test_app().await;

    for email in ["ana@example.com", "bo@example.com"] {
        app.clone()
            .oneshot(json_request("POST", "/booking", &json!({"email": email})))
            .await
            .unwrap();
    }

    let cookie = login(&app, json!({"email": ""})).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/booking?email=", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    // The claim still has to match the query exactly
    let response = app
        .oneshot(get_with_cookie("/booking", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
