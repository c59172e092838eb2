use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use crate::types::error::AppError;

pub enum ApiResponse<T> {
    Ok(T),
    Created(T),
    /// Bulk writes report how many rows they touched.
    Affected(u64),
}

#[derive(Serialize)]
struct AffectedBody {
    affected: u64,
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        match self {
            ApiResponse::Ok(v) => HttpResponse::Ok().json(v),
            ApiResponse::Created(v) => HttpResponse::Created().json(v),
            ApiResponse::Affected(affected) => HttpResponse::Ok().json(AffectedBody { affected }),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
