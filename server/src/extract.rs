//! Extractors whose rejections render as `{"detail": ...}` like every other
//! error the service returns.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query};

use crate::error::AppError;

#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct PathParam<T>(pub T);
