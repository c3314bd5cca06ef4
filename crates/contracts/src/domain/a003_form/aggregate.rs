use serde::{Deserialize, Serialize};

use crate::domain::common::{require_non_empty, EntityMetadata, EntityStatus, ValidationError};
use crate::shared::api::is_zero;

/// Форма (чек-лист / формуляр инспекции)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub status: EntityStatus,
    #[serde(default)]
    pub question_count: usize,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

impl FormDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)
    }
}

impl From<&Form> for FormDto {
    fn from(f: &Form) -> Self {
        Self {
            name: f.name.clone(),
            description: f.description.clone(),
            category: f.category.clone(),
            status: Some(f.status),
        }
    }
}

/// GET /forms?page=&limit=&search=&status=&category=
///
/// Каталог грузится целиком (до лимита) и фильтруется на клиенте.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormListQuery {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
