//! HTTP endpoints, one per record operation.

use axum::{
    extract::State,
    http::HeaderValue,
    routing::{delete, get, post, put},
    Json, Router,
};
use futures::TryStreamExt;
use serde::Deserialize;
use todo_core::{MessageResponse, Todo, TodoResponse};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::repository::TodoRepository;

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    pub desc: String,
}

/// Build the service with CORS restricted to `allowed_origin`. Requests from
/// any other origin get no `Access-Control-Allow-Origin` header.
pub fn app(repo: TodoRepository, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/", get(index))
        .route("/api/todos", get(list_todos))
        .route("/api/get_todo/{title}", get(get_todo))
        .route("/api/todo", post(create_todo))
        .route("/api/update_todo/{title}", put(update_todo))
        .route("/api/remove_todo/{title}", delete(delete_todo))
        .fallback(unknown_route)
        .with_state(repo)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn unknown_route() -> AppError {
    AppError::NotFound("Not Found")
}

async fn index() -> Json<MessageResponse> {
    Json(message("Hello"))
}

/// An empty collection is reported as not found rather than as `[]`.
async fn list_todos(State(repo): State<TodoRepository>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos: Vec<Todo> = repo.fetch_all().await?.try_collect().await?;
    if todos.is_empty() {
        return Err(AppError::NotFound("No todos found"));
    }
    Ok(Json(todos))
}

async fn get_todo(
    State(repo): State<TodoRepository>,
    PathParam(title): PathParam<String>,
) -> Result<Json<Todo>, AppError> {
    repo.fetch_one(&title)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Todo not found"))
}

async fn create_todo(
    State(repo): State<TodoRepository>,
    JsonBody(todo): JsonBody<Todo>,
) -> Result<Json<TodoResponse>, AppError> {
    let created = repo
        .create(todo)
        .await?
        .ok_or(AppError::BadRequest("Error creating to_do"))?;
    Ok(Json(TodoResponse {
        message: "Todo created".to_string(),
        to_do: created,
    }))
}

async fn update_todo(
    State(repo): State<TodoRepository>,
    PathParam(title): PathParam<String>,
    QueryParams(params): QueryParams<UpdateParams>,
) -> Result<Json<TodoResponse>, AppError> {
    let updated = repo
        .update(&title, &params.desc)
        .await?
        .ok_or(AppError::NotFound("Todo not found"))?;
    Ok(Json(TodoResponse {
        message: "Todo updated successfully".to_string(),
        to_do: updated,
    }))
}

async fn delete_todo(
    State(repo): State<TodoRepository>,
    PathParam(title): PathParam<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if repo.delete(&title).await? {
        Ok(Json(message("Todo deleted successfully")))
    } else {
        Err(AppError::NotFound("Todo not found or already deleted"))
    }
}

fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}
