use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceRow {
    pub id: i64,
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SlotRow {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub available: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppointmentRow {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub slot_id: i64,
    pub service_id: i64,
    pub created_at: String,
}

/// One row of the admin listing: an appointment joined with its slot and service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppointmentJoinRow {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub slot_id: i64,
    pub slot_date: String,
    pub slot_time: String,
    pub slot_available: i64,
    pub service_id: i64,
    pub service_name: String,
    pub service_price: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub price: String,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Slot {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub available: bool,
}

impl From<SlotRow> for Slot {
    fn from(row: SlotRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            time: row.time,
            available: row.available != 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub slot_id: i64,
    pub service_id: i64,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Self {
            id: row.id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            slot_id: row.slot_id,
            service_id: row.service_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub slot: Slot,
    pub service: Service,
}

impl From<AppointmentJoinRow> for AppointmentDetail {
    fn from(row: AppointmentJoinRow) -> Self {
        Self {
            id: row.id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            slot: Slot {
                id: row.slot_id,
                date: row.slot_date,
                time: row.slot_time,
                available: row.slot_available != 0,
            },
            service: Service {
                id: row.service_id,
                name: row.service_name,
                price: row.service_price,
            },
        }
    }
}
