use healthsheet_client::http_client::ReqwestSheetStore;
use healthsheet_client::{ConfigStore, ConfigValue, RecordStore, SheetError, Table};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> ReqwestSheetStore {
    ReqwestSheetStore::new(&server.uri(), "sheet-1", SecretString::new("tok".into()))
}

#[tokio::test]
async fn append_sends_basic_auth_and_ordered_values() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Water/values"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([["date", "time", "volume_ml"]])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Water/rows"))
        .and(body_partial_json(json!({"values": ["2025-03-01", "08:30", 250]})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut row = healthsheet_client::Row::new();
    row.insert("volume_ml".into(), json!(250));
    row.insert("time".into(), json!("08:30"));
    row.insert("date".into(), json!("2025-03-01"));
    store_for(&server)
        .append(Table::Water, row)
        .await
        .expect("append");

    let received = server.received_requests().await.unwrap();
    let auth = received[0].headers.get("authorization").cloned().expect("auth header");
    assert!(auth.to_str().map(|s| s.starts_with("Basic ")).unwrap_or(false));
}

#[tokio::test]
async fn append_writes_header_first_when_tab_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Weight/values"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    // Header row, then the data row.
    Mock::given(method("POST"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Weight/rows"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let mut row = healthsheet_client::Row::new();
    row.insert("date".into(), json!("2025-03-01"));
    row.insert("height_cm".into(), json!(170.0));
    row.insert("weight_kg".into(), json!(68.2));
    row.insert("bmi".into(), json!(23.6));
    store_for(&server)
        .append(Table::Weight, row)
        .await
        .expect("append");

    let posts: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.to_string() == "POST")
        .collect();
    assert_eq!(posts.len(), 2);
    let header_body: serde_json::Value = serde_json::from_slice(&posts[0].body).unwrap();
    assert_eq!(
        header_body["values"],
        json!(["date", "height_cm", "weight_kg", "bmi", "waist_cm"])
    );
}

#[tokio::test]
async fn read_all_normalizes_aliased_columns() {
    let server = MockServer::start().await;
    let body = json!([
        {"date": "2025-03-01", "time": "08:00", "water_ml": 500},
        {"date": "2025-03-01", "time": "12:00", "amount": "250"}
    ]);
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Water/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let rows = store_for(&server).read_all(Table::Water).await.expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["volume_ml"], json!(500));
    assert_eq!(rows[1]["volume_ml"], json!("250"));
    assert!(rows[0].get("water_ml").is_none());
}

#[tokio::test]
async fn read_all_treats_missing_tab_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Food/records"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such tab"))
        .mount(&server)
        .await;

    let rows = store_for(&server).read_all(Table::Food).await.expect("rows");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn read_all_maps_auth_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Food/records"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let res = store_for(&server).read_all(Table::Food).await;
    assert!(matches!(res, Err(SheetError::Auth(_))));
}

#[tokio::test]
async fn config_get_all_auto_types_values() {
    let server = MockServer::start().await;
    let body = json!([
        {"key": "target_cal", "value": "2000"},
        {"key": "target_weight", "value": "62.5"},
        {"key": "coach_note", "value": "cut back on sugar"}
    ]);
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Config/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let cfg = store_for(&server).get_all().await.expect("config");
    assert_eq!(cfg["target_cal"], ConfigValue::Int(2000));
    assert_eq!(cfg["target_weight"], ConfigValue::Float(62.5));
    assert_eq!(cfg["coach_note"], ConfigValue::Text("cut back on sugar".into()));
}

#[tokio::test]
async fn config_set_updates_existing_key_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Config/values"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([["key", "value"]])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Config/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"key": "target_cal", "value": "2000"},
            {"key": "target_protein", "value": "60"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Config/rows/1"))
        .and(body_partial_json(json!({"values": ["target_protein", "80"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .set("target_protein", &ConfigValue::Int(80))
        .await
        .expect("set");
}

#[tokio::test]
async fn config_set_appends_new_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Config/values"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([["key", "value"]])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Config/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/spreadsheets/sheet-1/tables/Config/rows"))
        .and(body_partial_json(json!({"values": ["target_water", "2500"]})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .set("target_water", &ConfigValue::Int(2500))
        .await
        .expect("set");
}
