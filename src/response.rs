//! Response helpers: list envelope, form failures and post-mutation redirects.

use crate::service::{FormState, Redirect};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> SuccessMany<T> {
    let count = data.len() as u64;
    SuccessMany {
        data,
        meta: MetaCount { count },
    }
}

/// 303 See Other, so the browser follows with a GET.
pub fn see_other(redirect: Redirect) -> Response {
    axum::response::Redirect::to(&redirect.location).into_response()
}

/// Field errors are the client's to fix (422); a bare message means the write itself failed (500).
pub fn form_failure(state: FormState) -> Response {
    let status = if state.errors.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(state)).into_response()
}
