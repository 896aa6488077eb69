use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::Value;
use taskboard::*;
use tower::ServiceExt;

struct TestApp {
    store: Store,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let store = Store::in_memory().await.unwrap();
        let router = app(store.clone(), &AppConfig::default());
        Self { store, router }
    }

    async fn send(&self, req: Request) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(content_type.starts_with("application/json"), "{content_type}");
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(&self, path: &str, body: &str) -> (StatusCode, Value) {
        let req = http::Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send(req).await
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let req = http::Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send(req).await
    }

    async fn add(&self, task: &str, priority: u8) -> i64 {
        let (status, body) = self
            .post("/api/add", &format!("task={task}&priority={priority}"))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn tasks(&self, query: &str) -> Vec<Value> {
        let (status, body) = self.get(&format!("/api/get{query}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let todos = body["todos"].as_array().unwrap().clone();
        assert_eq!(body["count"], todos.len());
        todos
    }

    async fn task(&self, id: i64) -> Task {
        let id = TaskId::parse(Some(id.to_string().as_str())).unwrap();
        self.store.get(id).await.unwrap().unwrap()
    }
}

#[tokio::test]
async fn add_trims_and_defaults() {
    let app = TestApp::new().await;
    let (status, body) = app.post("/api/add", "task=%20%20Buy+milk%20%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["task"], "Buy milk");
    assert_eq!(body["priority"], 1);
    assert_eq!(body["is_done"], 0);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body["created_at"].is_string());

    let stored = app.task(body["id"].as_i64().unwrap()).await;
    assert_eq!(stored.task, "Buy milk");
    assert_eq!(stored.priority, Priority::NORMAL);
}

#[rstest]
#[case("7", 2)]
#[case("-3", 0)]
#[case("2", 2)]
#[case("urgent", 0)]
#[tokio::test]
async fn add_clamps_priority(#[case] priority: &str, #[case] expected: u8) {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/api/add", &format!("task=clamp&priority={priority}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority"], expected);
    let stored = app.task(body["id"].as_i64().unwrap()).await;
    assert_eq!(stored.priority.get(), expected);
}

#[rstest]
#[case("task=", "Task cannot be empty")]
#[case("task=+++%09", "Task cannot be empty")]
#[case("priority=2", "Task cannot be empty")]
#[tokio::test]
async fn add_rejects_bad_text(#[case] body: &str, #[case] message: &str) {
    let app = TestApp::new().await;
    let (status, resp) = app.post("/api/add", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], message);
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn add_rejects_long_text() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/api/add", &format!("task={}", "a".repeat(501)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Task is too long (max 500 characters)");
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn add_accepts_exactly_max_length() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post("/api/add", &format!("task={}", "a".repeat(500)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.count().await.unwrap(), 1);
}

#[rstest]
#[case(Method::GET, "/api/add")]
#[case(Method::PUT, "/api/update")]
#[case(Method::DELETE, "/api/delete")]
#[case(Method::POST, "/api/get")]
#[tokio::test]
async fn wrong_verbs_are_rejected(#[case] method: Method, #[case] path: &str) {
    let app = TestApp::new().await;
    let req = http::Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("task=x&id=1"))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method not allowed");
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn round_trip() {
    let app = TestApp::new().await;
    let id = app.add("round+trip", 2).await;

    let todos = app.tasks("?filter=all").await;
    let matching: Vec<_> = todos.iter().filter(|t| t["id"] == id).collect();
    assert_eq!(matching.len(), 1);
    let todo = matching[0];
    assert_eq!(todo["task"], "round trip");
    assert_eq!(todo["priority"], 2);
    assert_eq!(todo["is_done"], 0);
    assert_eq!(todo["created_at"], todo["updated_at"]);

    let (status, body) = app.post("/api/delete", &format!("id={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Task deleted");

    assert!(app.tasks("").await.iter().all(|t| t["id"] != id));
}

#[tokio::test]
async fn list_filters_and_sorts() {
    let app = TestApp::new().await;
    let report = app.add("write+report", 1).await;
    let milk = app.add("buy+milk", 2).await;
    let bob = app.add("call+bob", 0).await;
    app.post("/api/update", &format!("id={milk}&done=1")).await;

    let ids = |todos: Vec<Value>| -> Vec<i64> {
        todos.iter().map(|t| t["id"].as_i64().unwrap()).collect()
    };

    assert_eq!(ids(app.tasks("").await), [bob, milk, report]);
    assert_eq!(ids(app.tasks("?sort=priority").await), [milk, report, bob]);
    assert_eq!(ids(app.tasks("?sort=task").await), [milk, bob, report]);
    assert_eq!(ids(app.tasks("?filter=active").await), [bob, report]);
    assert_eq!(ids(app.tasks("?filter=completed").await), [milk]);
    assert_eq!(
        ids(app.tasks("?filter=active&sort=priority").await),
        [report, bob]
    );
}

#[tokio::test]
async fn task_sort_ignores_case() {
    let app = TestApp::new().await;
    let zebra = app.add("Zebra", 1).await;
    let apple = app.add("apple", 1).await;
    let mango = app.add("Mango", 1).await;

    let ids: Vec<i64> = app
        .tasks("?sort=task")
        .await
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [apple, mango, zebra]);
}

#[tokio::test]
async fn unknown_filter_and_sort_behave_like_defaults() {
    let app = TestApp::new().await;
    app.add("one", 0).await;
    app.add("two", 2).await;
    let done = app.add("three", 1).await;
    app.post("/api/update", &format!("id={done}&done=1")).await;

    let defaults = app.tasks("").await;
    assert_eq!(defaults.len(), 3);
    assert_eq!(app.tasks("?filter=bogus&sort=bogus").await, defaults);
    assert_eq!(app.tasks("?filter=all&sort=created").await, defaults);
}

#[tokio::test]
async fn toggling_done_refreshes_updated_at() {
    let app = TestApp::new().await;
    let id = app.add("toggle", 1).await;
    let created = app.task(id).await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, body) = app.post("/api/update", &format!("id={id}&done=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated");
    let done = app.task(id).await;
    assert!(done.is_done);
    assert!(done.updated_at > created.updated_at);
    assert_eq!(done.created_at, created.created_at);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, _) = app.post("/api/update", &format!("id={id}&done=1")).await;
    assert_eq!(status, StatusCode::OK);
    let again = app.task(id).await;
    assert!(again.is_done);
    assert!(again.updated_at > done.updated_at);

    app.post("/api/update", &format!("id={id}&done=0")).await;
    assert!(!app.task(id).await.is_done);
}

#[tokio::test]
async fn update_applies_only_first_present_field() {
    let app = TestApp::new().await;
    let id = app.add("original", 0).await;

    app.post("/api/update", &format!("id={id}&done=1&task=renamed&priority=2"))
        .await;
    let task = app.task(id).await;
    assert!(task.is_done);
    assert_eq!(task.task, "original");
    assert_eq!(task.priority, Priority::LOW);

    app.post("/api/update", &format!("id={id}&task=+renamed+&priority=2"))
        .await;
    let task = app.task(id).await;
    assert_eq!(task.task, "renamed");
    assert_eq!(task.priority, Priority::LOW);

    app.post("/api/update", &format!("id={id}&priority=9")).await;
    assert_eq!(app.task(id).await.priority, Priority::HIGH);
}

#[rstest]
#[case("", StatusCode::BAD_REQUEST, "Invalid task ID")]
#[case("id=0&done=1", StatusCode::BAD_REQUEST, "Invalid task ID")]
#[case("id=-1&done=1", StatusCode::BAD_REQUEST, "Invalid task ID")]
#[case("id=abc&done=1", StatusCode::BAD_REQUEST, "Invalid task ID")]
#[case("id={id}", StatusCode::BAD_REQUEST, "No update data provided")]
#[case("id={id}&task=+++", StatusCode::BAD_REQUEST, "Task cannot be empty")]
#[case("id=9999&done=1", StatusCode::NOT_FOUND, "Task not found")]
#[tokio::test]
async fn update_rejections_leave_row_alone(
    #[case] body: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let app = TestApp::new().await;
    let id = app.add("untouched", 1).await;
    let before = app.task(id).await;

    let (got, resp) = app
        .post("/api/update", &body.replace("{id}", &id.to_string()))
        .await;
    assert_eq!(got, status);
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], message);
    assert_eq!(app.task(id).await, before);
}

#[tokio::test]
async fn update_rejects_long_text() {
    let app = TestApp::new().await;
    let id = app.add("short", 1).await;
    let (status, body) = app
        .post("/api/update", &format!("id={id}&task={}", "b".repeat(501)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Task is too long (max 500 characters)");
    assert_eq!(app.task(id).await.task, "short");
}

#[rstest]
#[case("", StatusCode::BAD_REQUEST, "Invalid task ID")]
#[case("id=0", StatusCode::BAD_REQUEST, "Invalid task ID")]
#[case("id=x1", StatusCode::BAD_REQUEST, "Invalid task ID")]
#[case("id=424242", StatusCode::NOT_FOUND, "Task not found")]
#[tokio::test]
async fn delete_rejections_keep_rows(
    #[case] body: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let app = TestApp::new().await;
    app.add("stays", 1).await;

    let (got, resp) = app.post("/api/delete", body).await;
    assert_eq!(got, status);
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], message);
    assert_eq!(app.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn deleting_twice_is_not_found() {
    let app = TestApp::new().await;
    let id = app.add("once", 1).await;
    let (first, _) = app.post("/api/delete", &format!("id={id}")).await;
    let (second, body) = app.post("/api/delete", &format!("id={id}")).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");
}

#[tokio::test]
async fn markup_is_stored_verbatim() {
    let app = TestApp::new().await;
    let id = app
        .post("/api/add", "task=%3Cscript%3Ealert(1)%3C%2Fscript%3E")
        .await
        .1["id"]
        .as_i64()
        .unwrap();
    let todos = app.tasks("").await;
    assert_eq!(todos[0]["id"], id);
    assert_eq!(todos[0]["task"], "<script>alert(1)</script>");
}

#[tokio::test]
async fn store_failures_are_generic() {
    let app = TestApp::new().await;
    app.store.close().await;

    let (status, body) = app.get("/api/get").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch tasks");

    let (status, body) = app.post("/api/add", "task=lost").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to add task");

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Store unavailable");
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "success": true, "message": "ok" }));

    let (status, body) = app.get("/api/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[rstest]
#[case(Some("application/json"), r#"{"task":"json"}"#)]
#[case(Some("text/plain"), "task=plain")]
#[case(None, "task=bare")]
#[tokio::test]
async fn unparseable_forms_get_an_envelope(#[case] content_type: Option<&str>, #[case] body: &str) {
    let app = TestApp::new().await;
    let mut req = http::Request::builder().method(Method::POST).uri("/api/add");
    if let Some(content_type) = content_type {
        req = req.header(header::CONTENT_TYPE, content_type);
    }
    let req = req.body(Body::from(body.to_owned())).unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request");
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn oversized_bodies_are_refused() {
    let store = Store::in_memory().await.unwrap();
    let config = AppConfig {
        request_body_limit: 64,
        ..Default::default()
    };
    let router = app(store.clone(), &config);
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/api/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("task={}", "z".repeat(200))))
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn page_and_assets_are_served() {
    let app = TestApp::new().await;
    for (path, content_type) in [
        ("/", "text/html"),
        ("/assets/app.js", "text/javascript"),
        ("/assets/style.css", "text/css"),
    ] {
        let req = http::Request::builder().uri(path).body(Body::empty()).unwrap();
        let resp = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let got = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(got.starts_with(content_type), "{path}: {got}");
    }
}
