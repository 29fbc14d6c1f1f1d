use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::date::lenient_timestamp;

/// Audit timestamps maintained by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}
