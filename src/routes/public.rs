use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{authenticate_credentials, issue_token, TOKEN_TTL_SECS},
    db::{self, BookingInput},
    error::ApiError,
    models::{Appointment, Service, ServiceRow, Slot, SlotRow},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub slot_id: i64,
    pub service_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

pub async fn list_services(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = sqlx::query_as::<_, ServiceRow>("SELECT id, name, price FROM services ORDER BY id")
        .fetch_all(&state.db)
        .await?;

    let services: Vec<Service> = rows.into_iter().map(Service::from).collect();
    Ok(HttpResponse::Ok().json(services))
}

pub async fn list_slots(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = sqlx::query_as::<_, SlotRow>(
        r#"SELECT id, date, time, available
           FROM slots
           WHERE available = 1
           ORDER BY date ASC, time ASC"#,
    )
    .fetch_all(&state.db)
    .await?;

    let slots: Vec<Slot> = rows.into_iter().map(Slot::from).collect();
    Ok(HttpResponse::Ok().json(slots))
}

pub async fn create_appointment(
    state: web::Data<AppState>,
    payload: web::Json<CreateAppointmentPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let input = BookingInput {
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        slot_id: payload.slot_id,
        service_id: payload.service_id,
    };

    let appointment = db::book_slot(&state.db, &input).await?;
    log::info!(
        "appointment {} booked for slot {}",
        appointment.id,
        appointment.slot_id
    );

    Ok(HttpResponse::Created().json(Appointment::from(appointment)))
}

pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let admin = authenticate_credentials(&state, &payload.email, &payload.password).await?;
    let token = issue_token(&admin, &state.auth.secret)?;

    Ok(HttpResponse::Ok().json(json!({
        "auth": true,
        "token": token,
        "expiresIn": TOKEN_TTL_SECS,
    })))
}
