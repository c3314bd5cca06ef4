use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{require_email, require_non_empty, EntityMetadata, EntityStatus, ValidationError};
use crate::shared::api::is_zero;

/// Краткая ссылка на компанию внутри записи контрагента
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Прогресс по курсу обучения (охрана труда)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub name: String,
    /// Оценка 0..100, отсутствует пока курс не сдан
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub completed: bool,
}

/// Контрагент (trabajador contratista)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// RUT
    #[serde(default)]
    pub rut: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
    pub status: EntityStatus,
    /// Дата окончания действия документов (допуск к работам)
    #[serde(default)]
    pub document_expires_at: Option<NaiveDate>,
    /// Бэкенд может не присылать массив вообще
    #[serde(default)]
    pub courses: Option<Vec<CourseProgress>>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Contractor {
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.name.as_str())
    }

    pub fn company_id(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.id.as_str())
    }
}

/// Тело POST /contractors и PUT /contractors/:id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_expires_at: Option<NaiveDate>,
}

impl ContractorDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            require_email("email", email)?;
        }
        if let Some(company_id) = &self.company_id {
            require_non_empty("companyId", company_id)?;
        }
        Ok(())
    }
}

impl From<&Contractor> for ContractorDto {
    fn from(c: &Contractor) -> Self {
        Self {
            name: c.name.clone(),
            rut: c.rut.clone(),
            email: c.email.clone(),
            company_id: c.company_id().map(str::to_string),
            status: Some(c.status),
            document_expires_at: c.document_expires_at,
        }
    }
}

/// GET /contractors?page=&limit=&search=&status=&companyId=
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorListQuery {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contractor_without_courses() {
        let raw = r#"{
            "id": "k-7",
            "name": "Ñandú Pérez",
            "status": "suspended",
            "company": { "id": "c-1", "name": "Andes" },
            "documentExpiresAt": "2026-11-01",
            "createdAt": "2026-01-10T12:00:00Z",
            "updatedAt": "2026-02-10T12:00:00Z"
        }"#;
        let c: Contractor = serde_json::from_str(raw).unwrap();
        assert!(c.courses.is_none());
        assert_eq!(c.company_name(), Some("Andes"));
        assert_eq!(c.document_expires_at, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert!(c.metadata.updated_at.is_some());
    }

    #[test]
    fn test_dto_skips_empty_optionals() {
        let dto = ContractorDto {
            name: "Ana".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Ana" }));
    }

    #[test]
    fn test_dto_validation() {
        let dto = ContractorDto::default();
        assert_eq!(dto.validate().unwrap_err().field, "name");
        let dto = ContractorDto {
            name: "Ana".into(),
            email: Some("ana@".into()),
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err().field, "email");
    }
}
