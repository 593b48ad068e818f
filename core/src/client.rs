//! Stateless HTTP request builder and response parser for the to-do service.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Titles travel in the path and are
//! percent-encoded here, so callers pass them verbatim.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, MessageResponse, Todo, TodoResponse};

/// Synchronous, stateless client for the to-do service.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_index(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/".to_string())
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/api/todos".to_string())
    }

    pub fn build_get_todo(&self, title: &str) -> HttpRequest {
        self.bare(
            HttpMethod::Get,
            format!("/api/get_todo/{}", urlencoding::encode(title)),
        )
    }

    /// Any `id` on `todo` is sent but ignored by the service.
    pub fn build_create_todo(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(todo).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/todo", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_todo(&self, title: &str, description: &str) -> HttpRequest {
        self.bare(
            HttpMethod::Put,
            format!(
                "/api/update_todo/{}?desc={}",
                urlencoding::encode(title),
                urlencoding::encode(description)
            ),
        )
    }

    pub fn build_delete_todo(&self, title: &str) -> HttpRequest {
        self.bare(
            HttpMethod::Delete,
            format!("/api/remove_todo/{}", urlencoding::encode(title)),
        )
    }

    pub fn parse_index(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        parse_ok(response)
    }

    /// An empty collection comes back from the service as `NotFound`.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_ok(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_ok(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoResponse, ApiError> {
        parse_ok(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoResponse, ApiError> {
        parse_ok(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        parse_ok(response)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }
}

fn parse_ok<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-200 responses to the matching `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound(detail(&response.body))),
        400 => Err(ApiError::BadRequest(detail(&response.body))),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// The service's `detail` message, or the raw body if it sent something else.
fn detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:8000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/api/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_encodes_title() {
        let req = client().build_get_todo("buy milk");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/api/get_todo/buy%20milk");
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let req = client().build_create_todo(&Todo::new("buy milk", "2%")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/api/todo");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "buy milk");
        assert_eq!(body["description"], "2%");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_todo_puts_description_in_query() {
        let req = client().build_update_todo("buy milk", "skim & whole");
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(
            req.path,
            "http://localhost:8000/api/update_todo/buy%20milk?desc=skim%20%26%20whole"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo("walk/dog");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/api/remove_todo/walk%2Fdog");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = TodoClient::new("http://localhost:8000/").build_index();
        assert_eq!(req.path, "http://localhost:8000/");
    }

    #[test]
    fn parse_list_todos_success() {
        let body = r#"[{"id":"65f0","title":"Test","description":"d"}]"#;
        let todos = client().parse_list_todos(response(200, body)).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id.as_deref(), Some("65f0"));
        assert_eq!(todos[0].title, "Test");
    }

    #[test]
    fn parse_list_todos_empty_is_not_found() {
        let err = client()
            .parse_list_todos(response(404, r#"{"detail":"No todos found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref d) if d == "No todos found"));
    }

    #[test]
    fn parse_create_todo_success() {
        let body = r#"{"message":"Todo created","to_do":{"title":"New","description":"d"}}"#;
        let created = client().parse_create_todo(response(200, body)).unwrap();
        assert_eq!(created.message, "Todo created");
        assert_eq!(created.to_do, Todo::new("New", "d"));
    }

    #[test]
    fn parse_create_todo_bad_request() {
        let err = client()
            .parse_create_todo(response(400, r#"{"detail":"Error creating to_do"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref d) if d == "Error creating to_do"));
    }

    #[test]
    fn parse_update_todo_success() {
        let body = r#"{"message":"Todo updated successfully","to_do":{"id":"1","title":"t","description":"new"}}"#;
        let updated = client().parse_update_todo(response(200, body)).unwrap();
        assert_eq!(updated.to_do.description, "new");
    }

    #[test]
    fn parse_delete_todo_not_found_keeps_raw_body() {
        let err = client().parse_delete_todo(response(404, "gone")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref d) if d == "gone"));
    }

    #[test]
    fn parse_get_todo_server_error() {
        let err = client()
            .parse_get_todo(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_get_todo_bad_json() {
        let err = client().parse_get_todo(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
