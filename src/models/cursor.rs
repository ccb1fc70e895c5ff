use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored list position. Its id is handed out as `next_page` and it is
/// deleted the first time it is read.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CursorModel {
    pub id: i64,
    pub user_id: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}
