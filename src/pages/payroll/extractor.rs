use super::*;

/// Payroll record named by `payroll_id`, restricted to what the caller may see
impl FromRequest for payroll::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let principal = Principal::from_request(&req, &mut dev::Payload::None).await?;

            let payroll_id = req.match_info().get("payroll_id").expect("This extractor must be used under `payroll_id` path");
            let Ok(payroll_id) = Uuid::from_str(payroll_id) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `payroll_id`"))
            };

            let db = req.app_data::<web::Data<DatabaseConnection>>().expect("DatabaseConnection must be attached");

            let mut select = Payroll::find_by_id(payroll_id)
                .filter(payroll::Column::CompanyId.eq(principal.company_id));

            // Staff only ever see their own payslips
            if let RoleType::Staff = principal.role {
                select = select.filter(payroll::Column::StaffId.eq(principal.id));
            }

            let Some(record) = select
                .one(db.as_ref()).await.map_err(PayrollError::from)?
            else {
                return Err(PayrollError::NotFound.into())
            };

            Ok(record)
        })
    }
}
