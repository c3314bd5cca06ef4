use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a002_contractor::aggregate::CompanyRef;
use crate::domain::common::{require_email, EntityMetadata, ValidationError};
use crate::shared::api::is_zero;

// ============================================================================
// Invitation code
// ============================================================================

/// Статус временного кода приглашения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Used,
    Expired,
    Revoked,
    #[serde(other)]
    Unknown,
}

impl InvitationStatus {
    pub const ALL: [InvitationStatus; 4] = [
        InvitationStatus::Pending,
        InvitationStatus::Used,
        InvitationStatus::Expired,
        InvitationStatus::Revoked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Used => "used",
            InvitationStatus::Expired => "expired",
            InvitationStatus::Revoked => "revoked",
            InvitationStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "Pendiente",
            InvitationStatus::Used => "Utilizado",
            InvitationStatus::Expired => "Expirado",
            InvitationStatus::Revoked => "Revocado",
            InvitationStatus::Unknown => "Desconocido",
        }
    }
}

/// Временный код приглашения (temporary-codes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationCode {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
    pub status: InvitationStatus,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

/// GET /temporary-codes?page=&limit=&search=&status=&companyId=
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationCodeListQuery {
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
}

// ============================================================================
// Mass invitation batch
// ============================================================================

/// Одна строка массового приглашения
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationRecord {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl InvitationRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)
    }
}

/// POST /temporary-codes/batches/schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchScheduleRequest {
    pub invitations: Vec<InvitationRecord>,
    /// None = выполнить сразу после планирования
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub send_email: bool,
}

impl BatchScheduleRequest {
    /// Проверяет каждую строку; ошибки возвращаются с номером строки (с 1)
    pub fn validate(&self) -> Result<(), Vec<(usize, ValidationError)>> {
        if self.invitations.is_empty() {
            return Err(vec![(
                0,
                ValidationError::new("invitations", "La lista de invitaciones está vacía"),
            )]);
        }
        let errors: Vec<(usize, ValidationError)> = self
            .invitations
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.validate().err().map(|e| (i + 1, e)))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Состояние пакета на сервере
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Scheduled,
    Running,
    Paused,
    Completed,
    Cancelled,
    Failed,
    #[serde(other)]
    Unknown,
}

impl BatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BatchStatus::Scheduled => "Programado",
            BatchStatus::Running => "En ejecución",
            BatchStatus::Paused => "En pausa",
            BatchStatus::Completed => "Completado",
            BatchStatus::Cancelled => "Cancelado",
            BatchStatus::Failed => "Con errores",
            BatchStatus::Unknown => "Desconocido",
        }
    }

    /// Пакет больше не управляется
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BatchStatus::Completed | BatchStatus::Cancelled | BatchStatus::Failed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchScheduleResponse {
    pub batch_id: String,
    pub total_invitations: usize,
    pub status: BatchStatus,
}

/// POST /temporary-codes/batches/:id/{execute,pause,cancel}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchAction {
    Execute,
    Pause,
    Cancel,
}

impl BatchAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            BatchAction::Execute => "execute",
            BatchAction::Pause => "pause",
            BatchAction::Cancel => "cancel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatchAction::Execute => "Ejecutar",
            BatchAction::Pause => "Pausar",
            BatchAction::Cancel => "Cancelar",
        }
    }
}
