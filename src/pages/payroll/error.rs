use actix_web::{body, http::{header::ContentType, StatusCode}, HttpResponse};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use crate::entity::sea_orm_active_enums::PayrollStatus;

#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("year and month are required")]
    MissingPeriod,

    #[error("invalid month {0}")]
    InvalidMonth(u32),

    #[error("해당 기간에 출퇴근 기록이 없습니다.")]
    NoAttendance,

    #[error("payroll not found")]
    NotFound,

    #[error("payroll cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: PayrollStatus,
        to: PayrollStatus,
    },

    #[error("database error")]
    Database(#[from] DbErr),
}

impl actix_web::error::ResponseError for PayrollError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        if let PayrollError::Database(e) = self {
            error!("Database error: {e}");
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PayrollError::MissingPeriod
            | PayrollError::InvalidMonth(_)
            | PayrollError::NoAttendance
            | PayrollError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            PayrollError::NotFound => StatusCode::NOT_FOUND,
            PayrollError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
