use chrono::Local;
use sea_orm::{ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::entity::{payroll, prelude::*, sea_orm_active_enums::PayrollStatus};

use super::PayrollDraft;

/// Billing month of one company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    pub company_id: Uuid,
    pub year: i32,
    pub month: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffFailure {
    pub staff_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct PayrollRun {
    pub records: Vec<payroll::Model>,
    pub failures: Vec<StaffFailure>,
}

/// Writes `draft` as the payroll of its staff member for `period`
///
/// The record is keyed on staff, year and month: an existing record is
/// overwritten in place (keeping its status), otherwise a pending one is
/// created.
pub async fn upsert(db: &DatabaseConnection, period: &PayrollPeriod, draft: &PayrollDraft) -> Result<payroll::Model, DbErr> {
    let now = Local::now().fixed_offset();

    let existing = Payroll::find()
        .filter(payroll::Column::StaffId.eq(draft.staff_id))
        .filter(payroll::Column::Year.eq(period.year))
        .filter(payroll::Column::Month.eq(period.month))
        .one(db).await?;

    match existing {
        Some(existing) => {
            Payroll::update(payroll::ActiveModel {
                id: Unchanged(existing.id),
                updated_at: Set(now),
                ..computed_fields(draft)
            }).exec(db).await
        },
        None => {
            Payroll::insert(payroll::ActiveModel {
                created_at: Set(now),
                updated_at: Set(now),
                company_id: Set(period.company_id),
                staff_id: Set(draft.staff_id),
                year: Set(period.year),
                month: Set(period.month),
                status: Set(PayrollStatus::Pending),
                ..computed_fields(draft)
            }).exec_with_returning(db).await
        },
    }
}

fn computed_fields(draft: &PayrollDraft) -> payroll::ActiveModel {
    payroll::ActiveModel {
        base_pay: Set(draft.totals.base_pay),
        overtime_pay: Set(draft.totals.overtime_pay),
        night_pay: Set(draft.totals.night_pay),
        holiday_pay: Set(draft.holiday_pay),
        allowances: Set(draft.allowances),
        gross_pay: Set(draft.gross_pay),
        national_pension: Set(draft.deductions.national_pension),
        health_insurance: Set(draft.deductions.health_insurance),
        long_term_care: Set(draft.deductions.long_term_care),
        employment_insurance: Set(draft.deductions.employment_insurance),
        income_tax: Set(draft.deductions.income_tax),
        local_income_tax: Set(draft.deductions.local_income_tax),
        total_deductions: Set(draft.deductions.total()),
        net_pay: Set(draft.net_pay),
        work_days: Set(draft.totals.work_days),
        total_hours: Set(draft.totals.total_hours),
        ..Default::default()
    }
}

/// Upserts every draft, one staff member's failure never blocks the others
pub async fn run(db: &DatabaseConnection, period: &PayrollPeriod, drafts: &[PayrollDraft]) -> PayrollRun {
    let results = futures_util::future::join_all(
        drafts.iter().map(|draft| async move {
            (draft.staff_id, upsert(db, period, draft).await)
        })
    ).await;

    let mut run = PayrollRun::default();

    for (staff_id, result) in results {
        match result {
            Ok(record) => run.records.push(record),
            Err(e) => {
                error!(%staff_id, year = period.year, month = period.month, "Unable to save payroll: {e}");
                run.failures.push(StaffFailure { staff_id, reason: e.to_string() });
            },
        }
    }

    info!(
        company_id = %period.company_id,
        year = period.year,
        month = period.month,
        "Payroll run saved {} record(s), {} failure(s)", run.records.len(), run.failures.len()
    );

    run
}

/// Moves a record to `status`, stamping the matching timestamp
pub async fn set_status(db: &DatabaseConnection, record: &payroll::Model, status: PayrollStatus) -> Result<payroll::Model, DbErr> {
    let now = Local::now().fixed_offset();

    let mut model = payroll::ActiveModel {
        id: Unchanged(record.id),
        updated_at: Set(now),
        status: Set(status),
        ..Default::default()
    };

    match status {
        PayrollStatus::Confirmed => model.confirmed_at = Set(Some(now)),
        PayrollStatus::Paid => model.paid_at = Set(Some(now)),
        PayrollStatus::Pending => {},
    }

    Payroll::update(model).exec(db).await
}

#[cfg(test)]
pub(crate) mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction, Value};

    use crate::payroll::{aggregate::StaffMonthlyTotals, deduction::Deductions, rates::RateTable};

    use super::*;

    /// Second handle onto the same mock; `DatabaseConnection` is not `Clone` with the `mock` feature
    pub(crate) fn share(db: &DatabaseConnection) -> DatabaseConnection {
        match db {
            DatabaseConnection::MockDatabaseConnection(mock) => DatabaseConnection::MockDatabaseConnection(mock.clone()),
            _ => unreachable!("tests only run against the mock"),
        }
    }

    pub(crate) fn draft(staff_id: Uuid) -> PayrollDraft {
        let totals = StaffMonthlyTotals {
            work_days: 1,
            total_hours: 8.0,
            base_pay: 80_000,
            overtime_pay: 0,
            night_pay: 0,
        };
        let deductions = Deductions::calculate(80_000, &RateTable::default());

        PayrollDraft {
            staff_id,
            totals,
            holiday_pay: 0,
            allowances: 0,
            gross_pay: 80_000,
            deductions,
            net_pay: 80_000 - deductions.total(),
        }
    }

    /// The row Postgres would hand back for `draft`
    pub(crate) fn stored(id: Uuid, period: &PayrollPeriod, draft: &PayrollDraft, status: PayrollStatus) -> payroll::Model {
        payroll::Model {
            id,
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            company_id: period.company_id,
            staff_id: draft.staff_id,
            year: period.year,
            month: period.month,
            base_pay: draft.totals.base_pay,
            overtime_pay: draft.totals.overtime_pay,
            night_pay: draft.totals.night_pay,
            holiday_pay: draft.holiday_pay,
            allowances: draft.allowances,
            gross_pay: draft.gross_pay,
            national_pension: draft.deductions.national_pension,
            health_insurance: draft.deductions.health_insurance,
            long_term_care: draft.deductions.long_term_care,
            employment_insurance: draft.deductions.employment_insurance,
            income_tax: draft.deductions.income_tax,
            local_income_tax: draft.deductions.local_income_tax,
            total_deductions: draft.deductions.total(),
            net_pay: draft.net_pay,
            work_days: draft.totals.work_days,
            total_hours: draft.totals.total_hours,
            status,
            confirmed_at: None,
            paid_at: None,
        }
    }

    /// Asserts `txn` binds every computed figure of `draft`
    pub(crate) fn assert_writes(txn: &Transaction, draft: &PayrollDraft) {
        let values = txn.statements().iter()
            .filter_map(|statement| statement.values.as_ref())
            .flat_map(|values| values.0.iter().cloned())
            .collect::<Vec<_>>();

        for amount in [
            draft.gross_pay,
            draft.deductions.national_pension,
            draft.deductions.income_tax,
            draft.deductions.total(),
            draft.net_pay,
        ] {
            assert!(values.contains(&Value::BigInt(Some(amount))), "{amount} not written in {values:?}");
        }

        assert!(values.contains(&Value::Int(Some(draft.totals.work_days))), "work_days not written in {values:?}");
        assert!(values.contains(&Value::Double(Some(draft.totals.total_hours))), "total_hours not written in {values:?}");
    }

    /// Whether a payroll query in `txn` is narrowed to one staff member
    pub(crate) fn filters_on_staff(txn: &Transaction) -> bool {
        txn.statements().iter()
            .any(|statement| statement.sql.contains(r#""payrolls"."staff_id" = "#))
    }

    fn period() -> PayrollPeriod {
        PayrollPeriod { company_id: Uuid::new_v4(), year: 2025, month: 3 }
    }

    #[actix_web::test]
    async fn test_upsert_is_idempotent() {
        let period = period();
        let draft = draft(Uuid::new_v4());
        let record = stored(Uuid::new_v4(), &period, &draft, PayrollStatus::Pending);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                // first run: nothing stored yet, then the inserted row
                vec![],
                vec![ record.clone() ],
                // second run: the stored row, then the updated row
                vec![ record.clone() ],
                vec![ record.clone() ],
            ])
            .into_connection();

        let first = upsert(&db, &period, &draft).await.expect("Unable to insert payroll");
        let second = upsert(&db, &period, &draft).await.expect("Unable to update payroll");

        assert_eq!(first, second);
        assert_eq!(first.id, record.id);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 4);
        assert!(format!("{:?}", log[1]).contains("INSERT INTO"));
        assert!(format!("{:?}", log[3]).contains("UPDATE"));
        assert!(!format!("{:?}", log[3]).contains("INSERT INTO"));

        // The second run rewrites exactly what the first one stored
        assert_writes(&log[1], &draft);
        assert_writes(&log[3], &draft);
    }

    #[actix_web::test]
    async fn test_run_reports_failures() {
        let period = period();
        let failing = draft(Uuid::new_v4());
        let succeeding = draft(Uuid::new_v4());
        let record = stored(Uuid::new_v4(), &period, &succeeding, PayrollStatus::Pending);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_owned())])
            .append_query_results([
                vec![],
                vec![ record.clone() ],
            ])
            .into_connection();

        let run = run(&db, &period, &[failing.clone(), succeeding]).await;

        assert_eq!(run.records, [record]);
        assert_eq!(run.failures.len(), 1);
        assert_eq!(run.failures[0].staff_id, failing.staff_id);
        assert!(run.failures[0].reason.contains("connection reset"));
    }

    #[actix_web::test]
    async fn test_set_status() {
        let period = period();
        let draft = draft(Uuid::new_v4());
        let record = stored(Uuid::new_v4(), &period, &draft, PayrollStatus::Pending);

        let confirmed = payroll::Model {
            status: PayrollStatus::Confirmed,
            confirmed_at: Some(Local::now().into()),
            ..record.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ confirmed.clone() ],
            ])
            .into_connection();

        let updated = set_status(&db, &record, PayrollStatus::Confirmed).await.expect("Unable to update status");
        assert_eq!(updated, confirmed);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("confirmed_at"));
    }
}
