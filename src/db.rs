use std::{env, fs, path::Path};

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::{auth::hash_password, error::ApiError, models::AppointmentRow};

/// Hours a slot can start at when a week is bulk-generated.
pub const WORKING_HOURS: [&str; 10] = [
    "09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00", "18:00", "19:00", "20:00",
];

const WEEK_DAYS: u64 = 7;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let path = if let Some(path) = db_url.strip_prefix("sqlite://") {
        Some(path)
    } else if let Some(path) = db_url.strip_prefix("sqlite:") {
        Some(path)
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    let db_path = Path::new(path);
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    seed_admin(pool).await?;
    seed_demo(pool).await?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct BookingInput {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub slot_id: i64,
    pub service_id: i64,
}

/// Books a slot: claims it and creates the appointment in one transaction.
///
/// The conditional UPDATE is both the availability check and the claim, and
/// it is the first write of the transaction, so two concurrent bookings of
/// the same slot serialize on the row: the loser's UPDATE matches zero rows
/// and the request is answered with a conflict, never a double booking.
pub async fn book_slot(pool: &SqlitePool, input: &BookingInput) -> Result<AppointmentRow, ApiError> {
    let name = input.customer_name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("customerName is required.".to_string()));
    }

    let mut tx = pool.begin().await?;

    let claimed = sqlx::query("UPDATE slots SET available = 0 WHERE id = ? AND available = 1")
        .bind(input.slot_id)
        .execute(&mut *tx)
        .await?;
    if claimed.rows_affected() == 0 {
        return Err(ApiError::Conflict("Slot is already taken.".to_string()));
    }

    let service = sqlx::query_scalar::<_, i64>("SELECT id FROM services WHERE id = ?")
        .bind(input.service_id)
        .fetch_optional(&mut *tx)
        .await?;
    if service.is_none() {
        return Err(ApiError::Validation(
            "serviceId does not reference a known service.".to_string(),
        ));
    }

    let phone = input
        .customer_phone
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let created_at = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"INSERT INTO appointments (customer_name, customer_phone, slot_id, service_id, created_at)
           VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(name)
    .bind(phone)
    .bind(input.slot_id)
    .bind(input.service_id)
    .bind(&created_at)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();
    tx.commit().await?;

    Ok(AppointmentRow {
        id,
        customer_name: name.to_string(),
        customer_phone: phone.map(str::to_string),
        slot_id: input.slot_id,
        service_id: input.service_id,
        created_at,
    })
}

/// Deletes an appointment and frees its slot in one transaction.
pub async fn cancel_appointment(pool: &SqlitePool, appointment_id: i64) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let slot_id =
        sqlx::query_scalar::<_, i64>("DELETE FROM appointments WHERE id = ? RETURNING slot_id")
            .bind(appointment_id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(slot_id) = slot_id else {
        return Err(ApiError::NotFound("Appointment not found.".to_string()));
    };

    sqlx::query("UPDATE slots SET available = 1 WHERE id = ?")
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Creates the next seven days of slots on the working-hours grid, skipping
/// any (date, time) pair that already exists. Returns how many were created.
pub async fn generate_week(pool: &SqlitePool, start: NaiveDate) -> Result<u64, ApiError> {
    let mut created = 0u64;
    for day in 0..WEEK_DAYS {
        let date = (start + chrono::Days::new(day))
            .format("%Y-%m-%d")
            .to_string();
        for hour in WORKING_HOURS {
            let result = sqlx::query(
                r#"INSERT INTO slots (date, time, available)
                   SELECT ?, ?, 1
                   WHERE NOT EXISTS (SELECT 1 FROM slots WHERE date = ? AND time = ?)"#,
            )
            .bind(&date)
            .bind(hour)
            .bind(&date)
            .bind(hour)
            .execute(pool)
            .await?;
            created += result.rows_affected();
        }
    }
    Ok(created)
}

async fn seed_admin(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM admin_users LIMIT 1")
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@salao.com".to_string());
    let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "senha_forte_123".to_string());

    if password == "senha_forte_123" {
        log::warn!("ADMIN_PASSWORD not set. Using the default password. Set ADMIN_PASSWORD in production.");
    }

    let password_hash =
        hash_password(&password).map_err(|_| sqlx::Error::Protocol("password hash failed".into()))?;
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"INSERT INTO admin_users (email, password_hash, created_at)
           VALUES (?, ?, ?)"#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_demo(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let demo = env::var("SEED_DEMO").unwrap_or_else(|_| "false".to_string());
    if demo != "true" {
        return Ok(());
    }

    let has_services = sqlx::query_scalar::<_, i64>("SELECT id FROM services LIMIT 1")
        .fetch_optional(pool)
        .await?
        .is_some();
    if !has_services {
        for (name, price) in [
            ("Corte de Cabelo", "R$ 50,00"),
            ("Barba Tradicional", "R$ 35,00"),
        ] {
            sqlx::query("INSERT INTO services (name, price) VALUES (?, ?)")
                .bind(name)
                .bind(price)
                .execute(pool)
                .await?;
        }
    }

    let has_slots = sqlx::query_scalar::<_, i64>("SELECT id FROM slots LIMIT 1")
        .fetch_optional(pool)
        .await?
        .is_some();
    if !has_slots {
        for (date, time) in [
            ("2025-07-28", "09:00"),
            ("2025-07-28", "10:00"),
            ("2025-07-29", "19:00"),
            ("2025-07-29", "20:00"),
        ] {
            sqlx::query("INSERT INTO slots (date, time, available) VALUES (?, ?, 1)")
                .bind(date)
                .bind(time)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}
