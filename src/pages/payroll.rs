use std::{collections::BTreeSet, str::FromStr};

use actix_web::{dev, get, post, web, FromRequest, HttpRequest, HttpResponse, Responder};
use futures_util::future::LocalBoxFuture;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Manager, Principal, RoleType},
    entity::{attendance, contract, payroll, prelude::*, sea_orm_active_enums::PayrollStatus},
    payroll::{calculate_month, model::{AttendanceRecord, ContractRate}, rates::RateTable, store::{self, PayrollPeriod, StaffFailure}},
    utils,
};

use error::PayrollError;
use model::*;

mod error;
mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(calculate_payroll)
        .service(list_payrolls)
        .service(get_payroll)
        .service(confirm_payroll)
        .service(pay_payroll);
}

#[post("/calculate")]
async fn calculate_payroll(
    db: web::Data<DatabaseConnection>,
    rates: web::Data<RateTable>,
    manager: Manager,
    payload: web::Json<CalculatePayroll>,
) -> Result<HttpResponse, PayrollError> {
    let (Some(year), Some(month)) = (payload.year, payload.month) else {
        return Err(PayrollError::MissingPeriod)
    };

    let Some((start_of_month, end_of_month)) = utils::month_range(year, month) else {
        return Err(PayrollError::InvalidMonth(month))
    };

    let attendances = Attendance::find()
        .filter(attendance::Column::CompanyId.eq(manager.company_id))
        .filter(attendance::Column::WorkDate.between(start_of_month, end_of_month))
        .all(db.as_ref()).await?;

    if attendances.is_empty() {
        return Err(PayrollError::NoAttendance)
    }

    let staff_ids = attendances.iter().map(|a| a.staff_id).collect::<BTreeSet<_>>();

    let contracts = Contract::find()
        .filter(contract::Column::CompanyId.eq(manager.company_id))
        .filter(contract::Column::StaffId.is_in(staff_ids))
        .all(db.as_ref()).await?
        .into_iter()
        .map(ContractRate::from)
        .collect::<Vec<_>>();

    info!(
        company_id = %manager.company_id,
        year,
        month,
        "Calculating payroll from {} attendance record(s)", attendances.len()
    );

    let drafts = calculate_month(attendances.into_iter().map(AttendanceRecord::from), &contracts, &rates);

    let period = PayrollPeriod {
        company_id: manager.company_id,
        year,
        month: month as i32,
    };
    let run = store::run(&db, &period, &drafts).await;

    Ok(HttpResponse::Ok().json(web::Json(PayrollSummary {
        success: true,
        message: format!("{}년 {}월 급여 {}건이 계산되었습니다.", year, month, run.records.len()),
        data: run.records,
        failures: run.failures,
    })))
}

#[get("")]
async fn list_payrolls(
    db: web::Data<DatabaseConnection>,
    principal: Principal,
    query: web::Query<PayrollQuery>,
) -> Result<impl Responder, PayrollError> {
    let mut select = Payroll::find()
        .filter(payroll::Column::CompanyId.eq(principal.company_id));

    if let RoleType::Staff = principal.role {
        select = select.filter(payroll::Column::StaffId.eq(principal.id));
    }

    if let Some(year) = query.year {
        select = select.filter(payroll::Column::Year.eq(year));
    }

    if let Some(month) = query.month {
        select = select.filter(payroll::Column::Month.eq(month));
    }

    let records = select
        .order_by_desc(payroll::Column::Year)
        .order_by_desc(payroll::Column::Month)
        .order_by_asc(payroll::Column::StaffId)
        .all(db.as_ref()).await?;

    Ok(web::Json(records))
}

#[get("/{payroll_id}")]
async fn get_payroll(record: payroll::Model) -> impl Responder {
    web::Json(record)
}

#[post("/{payroll_id}/confirm")]
async fn confirm_payroll(db: web::Data<DatabaseConnection>, _manager: Manager, record: payroll::Model) -> Result<impl Responder, PayrollError> {
    advance(&db, record, PayrollStatus::Confirmed).await
}

#[post("/{payroll_id}/pay")]
async fn pay_payroll(db: web::Data<DatabaseConnection>, _manager: Manager, record: payroll::Model) -> Result<impl Responder, PayrollError> {
    advance(&db, record, PayrollStatus::Paid).await
}

async fn advance(db: &DatabaseConnection, record: payroll::Model, status: PayrollStatus) -> Result<web::Json<payroll::Model>, PayrollError> {
    if !record.status.can_become(status) {
        return Err(PayrollError::InvalidTransition { from: record.status, to: status })
    }

    let record = store::set_status(db, &record, status).await?;

    info!(payroll_id = %record.id, staff_id = %record.staff_id, "Payroll moved to {status:?}");

    Ok(web::Json(record))
}
