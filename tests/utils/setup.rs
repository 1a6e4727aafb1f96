use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use scoreboard::{
    table::{InMemoryTableRepository, TableRepository},
    AppState, ScoreTable,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub repository: Arc<InMemoryTableRepository>,
    pub app: Router,
}

pub struct TestSetupBuilder {
    tables: Vec<ScoreTable>,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { tables: vec![] }
    }

    pub fn with_table(mut self, table: ScoreTable) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_tables(mut self, tables: Vec<ScoreTable>) -> Self {
        self.tables.extend(tables);
        self
    }

    pub fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryTableRepository::with_tables(self.tables));
        let table_repository: Arc<dyn TableRepository> = repository.clone();
        let app = scoreboard::router(AppState::new(table_repository));
        TestSetup { repository, app }
    }
}

#[allow(dead_code)]
impl TestSetup {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> T {
        let (status, body) = self.request("GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "GET {} failed", uri);
        serde_json::from_slice(&body).unwrap()
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        uri: &str,
        body: &str,
        expected: StatusCode,
    ) -> T {
        let (status, bytes) = self.request(method, uri, Some(body)).await;
        assert_eq!(status, expected, "{} {} returned {}", method, uri, status);
        serde_json::from_slice(&bytes).unwrap()
    }
}
