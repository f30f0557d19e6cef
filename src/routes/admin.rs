use actix_web::{web, HttpResponse};
use chrono::{Days, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::AuthAdmin,
    db,
    error::ApiError,
    models::{AppointmentDetail, AppointmentJoinRow, Service},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateServicePayload {
    pub name: String,
    pub price: String,
}

pub async fn list_appointments(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
) -> Result<HttpResponse, ApiError> {
    let rows = sqlx::query_as::<_, AppointmentJoinRow>(
        r#"SELECT a.id, a.customer_name, a.customer_phone,
                  s.id AS slot_id, s.date AS slot_date, s.time AS slot_time,
                  s.available AS slot_available,
                  sv.id AS service_id, sv.name AS service_name, sv.price AS service_price
           FROM appointments a
           JOIN slots s ON a.slot_id = s.id
           JOIN services sv ON a.service_id = sv.id
           ORDER BY s.date ASC, s.time ASC"#,
    )
    .fetch_all(&state.db)
    .await?;

    let appointments: Vec<AppointmentDetail> =
        rows.into_iter().map(AppointmentDetail::from).collect();
    Ok(HttpResponse::Ok().json(appointments))
}

pub async fn create_service(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    payload: web::Json<CreateServicePayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let name = payload.name.trim();
    let price = payload.price.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required.".to_string()));
    }
    if price.is_empty() {
        return Err(ApiError::Validation("price is required.".to_string()));
    }

    let result = sqlx::query("INSERT INTO services (name, price) VALUES (?, ?)")
        .bind(name)
        .bind(price)
        .execute(&state.db)
        .await?;

    Ok(HttpResponse::Created().json(Service {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        price: price.to_string(),
    }))
}

/// Deletion is blocked while any appointment still references the service.
pub async fn delete_service(
    state: web::Data<AppState>,
    _admin: AuthAdmin,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let service_id = path.into_inner();

    let referenced =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments WHERE service_id = ?")
            .bind(service_id)
            .fetch_one(&state.db)
            .await?;
    if referenced > 0 {
        return Err(ApiError::Conflict(
            "Service is referenced by existing appointments.".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM services WHERE id = ?")
        .bind(service_id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Service not found.".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Service deleted successfully." })))
}

pub async fn generate_week(
    state: web::Data<AppState>,
    admin: AuthAdmin,
) -> Result<HttpResponse, ApiError> {
    let start = Utc::now().date_naive() + Days::new(1);
    let created = db::generate_week(&state.db, start).await?;
    log::info!("{} generated {created} slots starting {start}", admin.email);

    Ok(HttpResponse::Ok().json(json!({ "created": created })))
}

pub async fn cancel_appointment(
    state: web::Data<AppState>,
    admin: AuthAdmin,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let appointment_id = path.into_inner();
    db::cancel_appointment(&state.db, appointment_id).await?;
    log::info!("{} cancelled appointment {appointment_id}", admin.email);

    Ok(HttpResponse::Ok().json(json!({ "message": "Appointment cancelled successfully." })))
}
