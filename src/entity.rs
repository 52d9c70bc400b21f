use serde::{Deserialize, Serialize};

/// Row lifecycle state. Deleted rows keep their data but are excluded from
/// every read, and uniqueness constraints only apply among active rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entity_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Active,
    Deleted,
}
