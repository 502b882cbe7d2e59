//! End-to-end CRUD lifecycle over HTTP:
//! the real router on an ephemeral port, backed by the in-memory document store.

use async_trait::async_trait;
use pet_appointments_api::storage::document::{InsertOneResult, UpdateResult};
use pet_appointments_api::{
    transport, DocumentStore, MemoryDocumentStore, ObjectId, Services, StoreError,
};
use reqwest::StatusCode;
use serde_json::{json, Value as JsonValue};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    store: Arc<MemoryDocumentStore>,
}

/// Serves the router over `services` and returns its base URL.
async fn spawn_router(services: Services) -> String {
    let router = transport::http::create_router(transport::http::AppState::new(services));

    // Bind to an ephemeral port to avoid conflicts between tests.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

impl TestServer {
    async fn start() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let services = Services::new(store.clone(), Duration::from_secs(10));
        services.ensure_collections().await.unwrap();

        Self {
            base_url: spawn_router(services).await,
            client: reqwest::Client::new(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> (StatusCode, JsonValue) {
        let resp = req.send().await.unwrap();
        let status = resp.status();
        let body = resp.json::<JsonValue>().await.unwrap();
        // The envelope status always mirrors the HTTP status.
        assert_eq!(body["status"].as_u64(), Some(status.as_u16() as u64));
        (status, body)
    }

    async fn post(&self, path: &str, body: &JsonValue) -> (StatusCode, JsonValue) {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn get(&self, path: &str) -> (StatusCode, JsonValue) {
        self.send(self.client.get(self.url(path))).await
    }

    async fn put(&self, path: &str, body: &JsonValue) -> (StatusCode, JsonValue) {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> (StatusCode, JsonValue) {
        self.send(self.client.delete(self.url(path))).await
    }

    async fn create(&self, path: &str, body: &JsonValue) -> String {
        let (status, resp) = self.post(path, body).await;
        assert_eq!(status, StatusCode::CREATED, "{}", resp);
        resp["data"]["data"]["InsertedID"].as_str().unwrap().to_string()
    }
}

fn ana() -> JsonValue {
    json!({
        "name": "Ana",
        "lastName": "Diaz",
        "idNumber": 123,
        "phone": 555,
        "email": "a@x.com"
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn owner_round_trip_preserves_fields() {
    let server = TestServer::start().await;

    let (status, created) = server.post("/owner", &ana()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "A new Owner was created successfully.");
    let id = created["data"]["data"]["InsertedID"].as_str().unwrap();
    assert!(!ObjectId::parse_str(id).unwrap().is_nil());

    let (status, fetched) = server.get(&format!("/owner/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["message"], "The operation was successfully.");
    let owner = &fetched["data"]["data"];
    assert_eq!(owner["id"], id);
    assert_eq!(owner["name"], "Ana");
    assert_eq!(owner["lastName"], "Diaz");
    assert_eq!(owner["idNumber"], 123);
    assert_eq!(owner["phone"], 555);
    assert_eq!(owner["email"], "a@x.com");
    let created_at = chrono::DateTime::parse_from_rfc3339(owner["creationDate"].as_str().unwrap())
        .unwrap();
    assert!(created_at.timestamp() > 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn client_supplied_id_and_timestamp_are_ignored() {
    let server = TestServer::start().await;
    let mut body = ana();
    body["id"] = json!("ffffffffffffffffffffffff");
    body["creationDate"] = json!("1990-01-01T00:00:00Z");

    let id = server.create("/owner", &body).await;
    assert_ne!(id, "ffffffffffffffffffffffff");
    let (_, fetched) = server.get(&format!("/owner/{}", id)).await;
    assert_ne!(fetched["data"]["data"]["creationDate"], "1990-01-01T00:00:00Z");
}

/// One valid payload per entity, with every client-owned field set.
fn entity_payloads() -> [(&'static str, JsonValue); 4] {
    [
        (
            "owner",
            json!({
                "name": "Ana", "lastName": "Diaz", "idNumber": 123, "phone": 555,
                "email": "a@x.com", "pets": ["p1", "p2"]
            }),
        ),
        (
            "partner",
            json!({
                "name": "Luis", "lastName": "Paz", "idNumber": 9, "phone": 7,
                "email": "l@x.com", "services": ["grooming", "walking"]
            }),
        ),
        (
            "pet",
            json!({ "ownerId": "o1", "name": "Rex", "age": 3, "petType": "dog", "breed": "lab" }),
        ),
        (
            "appointment",
            json!({
                "ownerId": "o1", "petId": "p1", "partnerId": "q1",
                "service": "bath", "amount": 25.5, "paymentType": "card"
            }),
        ),
    ]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_entity_reads_back_as_created() {
    let server = TestServer::start().await;
    for (entity, body) in entity_payloads() {
        let id = server.create(&format!("/{}", entity), &body).await;
        let (status, fetched) = server.get(&format!("/{}/{}", entity, id)).await;
        assert_eq!(status, StatusCode::OK, "{}", entity);

        let record = &fetched["data"]["data"];
        assert_eq!(record["id"], id.as_str(), "{}", entity);
        for (field, value) in body.as_object().unwrap() {
            assert_eq!(&record[field], value, "{}.{}", entity, field);
        }
        let stamp = if entity == "appointment" { "date" } else { "creationDate" };
        assert!(record[stamp].is_string(), "{}.{}", entity, stamp);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unusable_server_owned_values_are_ignored() {
    let server = TestServer::start().await;
    let junk = [json!(""), json!(null), json!("not-a-value"), json!(42)];
    for (entity, body) in entity_payloads() {
        let stamp = if entity == "appointment" { "date" } else { "creationDate" };
        for value in &junk {
            let mut sent = body.clone();
            sent["id"] = value.clone();
            sent[stamp] = value.clone();

            let (status, resp) = server.post(&format!("/{}", entity), &sent).await;
            assert_eq!(status, StatusCode::CREATED, "{} {}: {}", entity, value, resp);
            let id = resp["data"]["data"]["InsertedID"].as_str().unwrap().to_string();
            assert!(!ObjectId::parse_str(&id).unwrap().is_nil());
            let (_, before) = server.get(&format!("/{}/{}", entity, id)).await;

            let (status, resp) = server.put(&format!("/{}/{}", entity, id), &sent).await;
            assert_eq!(status, StatusCode::OK, "{} {}: {}", entity, value, resp);
            assert_eq!(resp["data"]["data"]["id"], id.as_str());
            assert_eq!(resp["data"]["data"][stamp], before["data"]["data"][stamp]);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_required_field_is_rejected_per_entity() {
    let server = TestServer::start().await;
    let cases = [
        ("/owner", "owners", ana(), "email"),
        (
            "/partner",
            "partners",
            json!({
                "name": "Luis", "lastName": "Paz", "idNumber": 9, "phone": 7,
                "email": "l@x.com", "services": ["grooming"]
            }),
            "phone",
        ),
        (
            "/pet",
            "pets",
            json!({ "ownerId": "o1", "name": "Rex", "age": 3, "petType": "dog", "breed": "lab" }),
            "age",
        ),
        (
            "/appointment",
            "appointments",
            json!({
                "ownerId": "o1", "petId": "p1", "partnerId": "q1",
                "service": "bath", "amount": 25.5, "paymentType": "card"
            }),
            "amount",
        ),
    ];

    for (path, collection, mut body, field) in cases {
        body.as_object_mut().unwrap().remove(field);
        let (status, resp) = server.post(path, &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(resp["message"], "Error: some fields could be invalid.");
        assert!(resp["data"]["data"]
            .as_str()
            .unwrap()
            .contains("failed on the 'required' tag"));
        assert_eq!(server.store.len(collection).await, 0, "{}", collection);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_valued_field_counts_as_missing() {
    let server = TestServer::start().await;
    let mut body = ana();
    body["name"] = json!("");
    let (status, resp) = server.post("/owner", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp["data"]["data"],
        "Key: 'Owner.Name' Error:Field validation for 'Name' failed on the 'required' tag"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_body_is_a_bad_request() {
    let server = TestServer::start().await;
    let (status, resp) = server
        .send(
            server
                .client
                .post(server.url("/pet"))
                .header("content-type", "application/json")
                .body("{\"name\": "),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp["message"],
        "Error: the request body is invalid, please check it again."
    );

    // Wrong type for a numeric field.
    let mut body = ana();
    body["phone"] = json!("five-five-five");
    let (status, _) = server.post("/owner", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn get_missing_or_malformed_id_is_a_server_error() {
    let server = TestServer::start().await;
    for id in [ObjectId::new().to_hex(), "not-an-id".to_string()] {
        let (status, resp) = server.get(&format!("/pet/{}", id)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp["message"], "Error: invalid pet ID.");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn edit_replaces_mutable_fields_and_keeps_identity() {
    let server = TestServer::start().await;
    let id = server
        .create(
            "/pet",
            &json!({ "ownerId": "o1", "name": "Rex", "age": 3, "petType": "dog", "breed": "lab" }),
        )
        .await;
    let (_, before) = server.get(&format!("/pet/{}", id)).await;

    let (status, resp) = server
        .put(
            &format!("/pet/{}", id),
            &json!({
                "id": ObjectId::new().to_hex(),
                "ownerId": "o2", "name": "Rex", "age": 4, "petType": "dog", "breed": "lab"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        resp["message"],
        format!("The Pet with the ID {} was edited correctly.", id)
    );
    let pet = &resp["data"]["data"];
    assert_eq!(pet["id"], id.as_str());
    assert_eq!(pet["ownerId"], "o2");
    assert_eq!(pet["age"], 4);
    assert_eq!(pet["creationDate"], before["data"]["data"]["creationDate"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn edit_with_missing_field_is_rejected_like_create() {
    let server = TestServer::start().await;
    let id = server.create("/owner", &ana()).await;
    let (status, resp) = server
        .put(&format!("/owner/{}", id), &json!({ "name": "Ana" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Error: some fields could be invalid.");

    let (_, fetched) = server.get(&format!("/owner/{}", id)).await;
    assert_eq!(fetched["data"]["data"]["email"], "a@x.com");
}

/// An edit that matches nothing answers 200 with a default-valued record.
/// Delete answers 404 for the same id; the two operations disagree on purpose.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn edit_of_unknown_id_returns_default_record() {
    let server = TestServer::start().await;
    let unknown = ObjectId::new().to_hex();
    let (status, resp) = server.put(&format!("/owner/{}", unknown), &ana()).await;
    assert_eq!(status, StatusCode::OK);
    let owner = &resp["data"]["data"];
    assert_eq!(owner["id"], "000000000000000000000000");
    assert_eq!(owner["name"], "");
    assert_eq!(owner["phone"], 0);
    assert_eq!(server.store.len("owners").await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delete_removes_exactly_one_document() {
    let server = TestServer::start().await;
    let keep = server.create("/owner", &ana()).await;
    let gone = server.create("/owner", &ana()).await;

    let (status, resp) = server.delete(&format!("/owner/{}", gone)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Success");
    assert_eq!(resp["data"]["data"], "The Owner was deleted successfully.");
    assert_eq!(server.store.len("owners").await, 1);

    let (status, _) = server.get(&format!("/owner/{}", gone)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = server.get(&format!("/owner/{}", keep)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, resp) = server.delete(&format!("/owner/{}", gone)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["message"], "Error");
    assert_eq!(
        resp["data"]["data"],
        format!("Error: The Owner with the ID {} does not exist.", gone)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_on_empty_collection_is_an_empty_array() {
    let server = TestServer::start().await;
    for path in ["/owners", "/partners", "/pets", "/appointments"] {
        let (status, resp) = server.get(path).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(resp["message"], "Success");
        assert_eq!(resp["data"]["data"], json!([]));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_returns_every_record() {
    let server = TestServer::start().await;
    let appointment = json!({
        "ownerId": "o1", "petId": "p1", "partnerId": "q1",
        "service": "bath", "amount": 25.5, "paymentType": "card"
    });
    let first = server.create("/appointment", &appointment).await;
    let second = server.create("/appointment", &appointment).await;

    let (status, resp) = server.get("/appointments").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = resp["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    assert_eq!(resp["data"]["data"][0]["amount"], 25.5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dangling_references_are_accepted() {
    let server = TestServer::start().await;
    let id = server
        .create(
            "/pet",
            &json!({
                "ownerId": ObjectId::new().to_hex(),
                "name": "Orphan", "age": 1, "petType": "cat", "breed": "tabby"
            }),
        )
        .await;
    let (status, _) = server.get(&format!("/pet/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_collide() {
    let server = Arc::new(TestServer::start().await);
    let mut handles = Vec::new();
    for i in 0..50 {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            let mut body = ana();
            body["idNumber"] = json!(i + 1);
            server.create("/owner", &body).await
        }));
    }
    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 50);
    assert_eq!(server.store.len("owners").await, 50);
}

/// Edit and delete racing on one id are not coordinated. Whichever lands first
/// decides the outcome; only the set of possible answers is asserted.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn edit_delete_race_is_accepted() {
    let server = Arc::new(TestServer::start().await);
    let id = server.create("/owner", &ana()).await;

    let edit = {
        let server = server.clone();
        let path = format!("/owner/{}", id);
        tokio::spawn(async move { server.put(&path, &ana()).await.0 })
    };
    let delete = {
        let server = server.clone();
        let path = format!("/owner/{}", id);
        tokio::spawn(async move { server.delete(&path).await.0 })
    };

    let edit_status = edit.await.unwrap();
    let delete_status = delete.await.unwrap();
    assert!(
        edit_status == StatusCode::OK || edit_status == StatusCode::INTERNAL_SERVER_ERROR,
        "edit answered {}",
        edit_status
    );
    assert_eq!(delete_status, StatusCode::OK);
    assert_eq!(server.store.len("owners").await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_reports_store_reachable() {
    let server = TestServer::start().await;
    let (status, resp) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["data"]["status"], "ok");
}

/// Store that never answers a ping within any test timeout.
struct UnresponsiveStore {
    inner: MemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for UnresponsiveStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        self.inner.ensure_collection(collection).await
    }
    async fn collection_exists(&self, collection: &str) -> Result<bool, StoreError> {
        self.inner.collection_exists(collection).await
    }
    async fn insert_one(
        &self,
        collection: &str,
        id: ObjectId,
        doc: JsonValue,
    ) -> Result<InsertOneResult, StoreError> {
        self.inner.insert_one(collection, id, doc).await
    }
    async fn find_one(&self, collection: &str, id: ObjectId) -> Result<Option<JsonValue>, StoreError> {
        self.inner.find_one(collection, id).await
    }
    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        changes: JsonValue,
    ) -> Result<UpdateResult, StoreError> {
        self.inner.update_one(collection, id, changes).await
    }
    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<u64, StoreError> {
        self.inner.delete_one(collection, id).await
    }
    async fn find_all(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        self.inner.find_all(collection).await
    }
    async fn ping(&self) -> Result<(), StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_reports_unhealthy_when_ping_times_out() {
    let store = Arc::new(UnresponsiveStore {
        inner: MemoryDocumentStore::new(),
    });
    let services = Services::new(store, Duration::from_millis(50));
    let base_url = spawn_router(services).await;

    let resp = reqwest::get(format!("{}/health", base_url)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = resp.json::<JsonValue>().await.unwrap();
    assert_eq!(body["status"], 503);
    assert_eq!(body["data"]["data"]["status"], "unhealthy");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("context deadline exceeded"));
}
