use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One attendance entry per employee per UTC calendar day. `date` keeps the
/// exact instant the record was created with; day-level lookups truncate.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    #[schema(value_type = String, format = "date-time")]
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
}
