use serde::{Deserialize, Serialize};

use crate::domain::common::{require_non_empty, EntityMetadata, EntityStatus, ValidationError};
use crate::shared::api::is_zero;

/// Шаблон документа/формы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub status: EntityStatus,
    /// Форма, на основе которой построен шаблон
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub form_name: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
}

impl TemplateDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)
    }
}

impl From<&Template> for TemplateDto {
    fn from(t: &Template) -> Self {
        Self {
            name: t.name.clone(),
            category: t.category.clone(),
            status: Some(t.status),
            form_id: t.form_id.clone(),
        }
    }
}

/// GET /templates?page=&limit=&search=&status=&category=
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateListQuery {
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
