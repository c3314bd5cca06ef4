use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Метаданные записи (lifecycle tracking), приходят с бэкенда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EntityMetadata {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at: None,
        }
    }

    /// Последнее изменение: updated_at, иначе created_at
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}
