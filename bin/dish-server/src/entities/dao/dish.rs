use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A row in the `dishes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishRecord {
    pub id: Uuid,
    pub dish_id: String,
    pub dish_name: String,
    pub image_url: String,
    pub is_published: bool,
    /// Incremented together with every flip of `is_published`.
    pub revision: i64,
    pub created_at: DateTime<Utc>,
}
