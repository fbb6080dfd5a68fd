use serde_json::json;

use crate::integration::common::setup_test_db;

fn seed() -> Vec<serde_json::Map<String, serde_json::Value>> {
    vec![
        json!({
            "service_id": "01",
            "title": "Full car Repair",
            "img": "https://i.ibb.co/repair.jpg",
            "price": "200.00",
            "description": "Complete overhaul",
            "facility": [{"name": "Instant Car Services", "details": "fast"}]
        }),
        json!({
            "service_id": "02",
            "title": "Engine Oil Change",
            "img": "https://i.ibb.co/oil.jpg",
            "price": "20.00",
            "description": "Oil and filter"
        }),
    ]
    .into_iter()
    .map(|v| v.as_object().cloned().unwrap())
    .collect()
}

#[tokio::test]
async fn list_returns_all_fields() {
    let (db, _container) = setup_test_db().await;
    let repo = db.service_repo();

    assert_eq!(repo.insert_many(&seed()).await.unwrap(), 2);

    let services = repo.list().await.unwrap();
    assert_eq!(services.len(), 2);

    let repair = services
        .iter()
        .find(|s| s.title() == Some("Full car Repair"))
        .expect("seeded service");
    assert!(repair.fields.contains_key("facility"));
    assert_eq!(repair.fields["service_id"], "01");
}

#[tokio::test]
async fn list_tolerates_irregular_documents() {
    let (db, _container) = setup_test_db().await;
    let repo = db.service_repo();

    let odd = json!({"_id": 1, "title": 42, "price": 19.5, "img": null});
    repo.insert_many(&seed()).await.unwrap();
    repo.insert_many(&[odd.as_object().cloned().unwrap()])
        .await
        .unwrap();

    let services = repo.list().await.unwrap();
    assert_eq!(services.len(), 3);

    let irregular = services
        .iter()
        .find(|s| s.id == json!(1))
        .expect("numeric id is listed");
    assert_eq!(irregular.fields["title"], 42);
    assert!(irregular.fields["img"].is_null());
}

#[tokio::test]
async fn get_summary_projects_fields() {
    let (db, _container) = setup_test_db().await;
    let repo = db.service_repo();
    repo.insert_many(&seed()).await.unwrap();

    let id = repo.list().await.unwrap()[0].id.clone();
    let hex = id.as_str().expect("object ids render as hex");
    let summary = repo
        .get_summary(hex)
        .await
        .unwrap()
        .expect("service exists");

    assert_eq!(summary.id, id);
    assert!(summary.fields.contains_key("title"));
    assert!(summary.fields.contains_key("price"));

    let value = serde_json::to_value(&summary).unwrap();
    assert!(value.get("facility").is_none());
    assert!(value.get("service_id").is_none());
}

#[tokio::test]
async fn get_summary_miss_is_none() {
    let (db, _container) = setup_test_db().await;

    let summary = db
        .service_repo()
        .get_summary("6650c7d2a1b2c3d4e5f60718")
        .await
        .unwrap();
    assert!(summary.is_none());
}

#[tokio::test]
async fn clear_removes_everything() {
    let (db, _container) = setup_test_db().await;
    let repo = db.service_repo();
    repo.insert_many(&seed()).await.unwrap();

    assert_eq!(repo.clear().await.unwrap(), 2);
    assert!(repo.list().await.unwrap().is_empty());
    assert_eq!(repo.insert_many(&[]).await.unwrap(), 0);
}
