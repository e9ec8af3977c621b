use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::util::{default_table_statement, DefaultColumn};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(
                schema.create_enum_from_active_enum::<SalaryType>()
            ).await?;

        manager
            .create_type(
                schema.create_enum_from_active_enum::<PayrollStatus>()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(Attendances::Table)
                .col(ColumnDef::new(Attendances::StaffId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Attendances::WorkDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Attendances::ScheduledCheckIn)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Attendances::ScheduledCheckOut)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Attendances::ActualCheckIn)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Attendances::ActualCheckOut)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Attendances::WorkHours)
                    .double())
                .col(ColumnDef::new(Attendances::BasePay)
                    .big_integer())
                .col(ColumnDef::new(Attendances::OvertimePay)
                    .big_integer())
                .col(ColumnDef::new(Attendances::NightPay)
                    .big_integer())
                .take()
            ).await?;

        manager
            .create_index(Index::create()
                .name("idx_attendances_company_work_date")
                .table(Attendances::Table)
                .col(DefaultColumn::CompanyId)
                .col(Attendances::WorkDate)
                .take()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(Contracts::Table)
                .col(ColumnDef::new(Contracts::StaffId)
                    .uuid()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Contracts::BaseSalaryType)
                    .custom(SalaryType::name())
                    .not_null())
                .col(ColumnDef::new(Contracts::BaseSalaryAmount)
                    .big_integer()
                    .not_null()) // Won, hourly or monthly depending on `base_salary_type`
                .col(ColumnDef::new(Contracts::StandardHoursPerDay)
                    .double())
                .take()
            ).await?;

        let mut payrolls = default_table_statement()
            .table(Payrolls::Table)
            .col(ColumnDef::new(Payrolls::StaffId)
                .uuid()
                .not_null())
            .col(ColumnDef::new(Payrolls::Year)
                .integer()
                .not_null())
            .col(ColumnDef::new(Payrolls::Month)
                .integer()
                .not_null())
            .take();

        for amount in [
            Payrolls::BasePay,
            Payrolls::OvertimePay,
            Payrolls::NightPay,
            Payrolls::HolidayPay,
            Payrolls::Allowances,
            Payrolls::GrossPay,
            Payrolls::NationalPension,
            Payrolls::HealthInsurance,
            Payrolls::LongTermCare,
            Payrolls::EmploymentInsurance,
            Payrolls::IncomeTax,
            Payrolls::LocalIncomeTax,
            Payrolls::TotalDeductions,
            Payrolls::NetPay,
        ] {
            payrolls.col(ColumnDef::new(amount)
                .big_integer()
                .not_null()
                .default(0));
        }

        manager
            .create_table(payrolls
                .col(ColumnDef::new(Payrolls::WorkDays)
                    .integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(Payrolls::TotalHours)
                    .double()
                    .not_null()
                    .default(0.0))
                .col(ColumnDef::new(Payrolls::Status)
                    .custom(PayrollStatus::name())
                    .not_null()
                    .default("pending"))
                .col(ColumnDef::new(Payrolls::ConfirmedAt)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Payrolls::PaidAt)
                    .timestamp_with_time_zone())
                .take()
            ).await?;

        // Upsert key
        manager
            .create_index(Index::create()
                .name("idx_payrolls_staff_period")
                .table(Payrolls::Table)
                .col(Payrolls::StaffId)
                .col(Payrolls::Year)
                .col(Payrolls::Month)
                .unique()
                .take()
            ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(
            TableDropStatement::new()
                .table(Payrolls::Table)
                .take()
        ).await?;

        manager.drop_table(
            TableDropStatement::new()
                .table(Contracts::Table)
                .take()
        ).await?;

        manager.drop_table(
            TableDropStatement::new()
                .table(Attendances::Table)
                .take()
        ).await?;

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(PayrollStatus::name())
                    .to_owned()
            ).await?;

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(SalaryType::name())
                    .to_owned()
            ).await?;

        Ok(())
    }
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "salary_type")]
enum SalaryType {
    #[sea_orm(string_value = "hourly")]
    Hourly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payroll_status")]
enum PayrollStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "paid")]
    Paid,
}

#[derive(Iden)]
enum Attendances {
    Table,
    StaffId,
    WorkDate,
    ScheduledCheckIn,
    ScheduledCheckOut,
    ActualCheckIn,
    ActualCheckOut,
    WorkHours,
    BasePay,
    OvertimePay,
    NightPay,
}

#[derive(Iden)]
enum Contracts {
    Table,
    StaffId,
    BaseSalaryType,
    BaseSalaryAmount,
    StandardHoursPerDay,
}

#[derive(Iden)]
enum Payrolls {
    Table,
    StaffId,
    Year,
    Month,
    BasePay,
    OvertimePay,
    NightPay,
    HolidayPay,
    Allowances,
    GrossPay,
    NationalPension,
    HealthInsurance,
    LongTermCare,
    EmploymentInsurance,
    IncomeTax,
    LocalIncomeTax,
    TotalDeductions,
    NetPay,
    WorkDays,
    TotalHours,
    Status,
    ConfirmedAt,
    PaidAt,
}
