use chrono::NaiveDate;
use contracts::domain::a005_invitation_code::aggregate::{InvitationCode, InvitationStatus};

use crate::domain::a005_invitation_code::api::{COMPANY, STATUS};
use crate::shared::list_view::{
    ListConfig, PaginationMode, StatsConfig, TextField, NAME_PLACEHOLDER,
};

fn id(c: &InvitationCode) -> &str {
    &c.id
}

/// Код без имени показывается через placeholder
fn name(c: &InvitationCode) -> &str {
    c.name.as_deref().unwrap_or_default()
}

fn code(c: &InvitationCode) -> Option<&str> {
    Some(c.code.as_str())
}

fn name_field(c: &InvitationCode) -> Option<&str> {
    c.name.as_deref()
}

fn email(c: &InvitationCode) -> Option<&str> {
    c.email.as_deref()
}

fn company_name(c: &InvitationCode) -> Option<&str> {
    c.company
        .as_ref()
        .map(|r| r.name.as_str())
        .filter(|n| !n.trim().is_empty())
}

fn company_id(c: &InvitationCode) -> Option<&str> {
    c.company.as_ref().map(|r| r.id.as_str())
}

fn status(c: &InvitationCode) -> Option<&str> {
    Some(c.status.as_str())
}

fn expires(c: &InvitationCode) -> Option<NaiveDate> {
    c.expires_at.map(|dt| dt.date_naive())
}

/// Истекают только неиспользованные коды
fn pending_expiry(c: &InvitationCode) -> Option<NaiveDate> {
    (c.status == InvitationStatus::Pending).then(|| expires(c)).flatten()
}

pub fn status_options() -> Vec<(String, String)> {
    InvitationStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

pub fn list_config() -> ListConfig<InvitationCode> {
    ListConfig {
        id,
        display_name: name,
        placeholder: NAME_PLACEHOLDER,
        text_fields: vec![code as TextField<InvitationCode>, name_field, email, company_name],
        equality_fields: vec![
            (STATUS, status as TextField<InvitationCode>),
            (COMPANY, company_id as TextField<InvitationCode>),
        ],
        date_field: Some(expires),
        mode: PaginationMode::Server,
    }
}

pub fn stats_config(expiring_window_days: i64) -> StatsConfig<InvitationCode> {
    StatsConfig {
        status,
        group: Some(company_name),
        expiry: Some(pending_expiry),
        nested: None,
        expiring_window_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::stats::aggregate;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a002_contractor::aggregate::CompanyRef;
    use contracts::domain::common::EntityMetadata;

    fn code_at(code: &str, status: InvitationStatus, expires: Option<(i32, u32, u32)>) -> InvitationCode {
        InvitationCode {
            id: format!("id-{}", code),
            code: code.to_string(),
            email: Some(format!("{}@andes.cl", code.to_lowercase())),
            name: None,
            company: Some(CompanyRef {
                id: "c-1".to_string(),
                name: "Andes".to_string(),
            }),
            status,
            expires_at: expires.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
            metadata: EntityMetadata::new(Utc::now()),
        }
    }

    #[test]
    fn test_only_pending_codes_count_as_expiring() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let items = vec![
            code_at("A1", InvitationStatus::Pending, Some((2026, 10, 20))),
            code_at("A2", InvitationStatus::Used, Some((2026, 10, 20))),
            code_at("A3", InvitationStatus::Pending, Some((2026, 10, 1))),
            code_at("A4", InvitationStatus::Pending, None),
        ];
        let s = aggregate(&items, &stats_config(30), today);
        assert_eq!(s.expiring_soon, 1);
        assert_eq!(s.expired, 1);
        assert_eq!(s.status_count("pending"), 3);
        assert_eq!(s.by_group.get("Andes"), Some(&4));
    }

    #[test]
    fn test_unnamed_code_uses_placeholder() {
        let c = code_at("Z9", InvitationStatus::Pending, None);
        assert_eq!(list_config().label(&c), NAME_PLACEHOLDER);
    }

    #[test]
    fn test_status_options_exclude_unknown() {
        let values: Vec<String> = status_options().into_iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec!["pending", "used", "expired", "revoked"]);
    }
}
