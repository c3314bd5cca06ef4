use serde::{Deserialize, Serialize};

use crate::domain::common::{require_email, require_non_empty, EntityMetadata, EntityStatus, ValidationError};
use crate::shared::api::is_zero;

// ============================================================================
// Aggregate
// ============================================================================

/// Компания-подрядчик (empresa contratista)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// RUT / налоговый идентификатор
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: EntityStatus,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

// ============================================================================
// DTO
// ============================================================================

/// Тело POST /companies и PUT /companies/:id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub name: String,
    pub tax_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

impl CompanyDto {
    /// Валидация перед отправкой
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("taxId", &self.tax_id)?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            require_email("email", email)?;
        }
        Ok(())
    }
}

impl From<&Company> for CompanyDto {
    fn from(c: &Company) -> Self {
        Self {
            name: c.name.clone(),
            tax_id: c.tax_id.clone(),
            industry: c.industry.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            status: Some(c.status),
        }
    }
}

// ============================================================================
// List query
// ============================================================================

/// GET /companies?page=&limit=&search=&status=&industry=
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyListQuery {
    /// Номер страницы на проводе (с 1)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_deserializes_with_missing_optionals() {
        let raw = r#"{
            "id": "c-1",
            "name": "Constructora Andes",
            "taxId": "76.123.456-7",
            "status": "active",
            "createdAt": "2026-01-10T12:00:00Z"
        }"#;
        let c: Company = serde_json::from_str(raw).unwrap();
        assert_eq!(c.name, "Constructora Andes");
        assert_eq!(c.industry, None);
        assert_eq!(c.status, EntityStatus::Active);
        assert_eq!(c.metadata.updated_at, None);
    }

    #[test]
    fn test_validate_requires_name_and_tax_id() {
        let mut dto = CompanyDto {
            name: "Andes".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err().field, "taxId");
        dto.tax_id = "76.123.456-7".into();
        assert!(dto.validate().is_ok());
        dto.email = Some("bad".into());
        assert_eq!(dto.validate().unwrap_err().field, "email");
        dto.email = Some("   ".into());
        assert!(dto.validate().is_ok());
    }
}
