use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a citizen profile
///
/// `id` is the identity provider's subject id, not a locally generated
/// key.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub updated_at: DateTime<Utc>,
}
