use chrono::NaiveDate;
use contracts::domain::a001_company::aggregate::Company;

use crate::domain::a001_company::api::{INDUSTRY, STATUS};
use crate::shared::list_view::{
    ListConfig, PaginationMode, StatsConfig, TextField, NAME_PLACEHOLDER,
};

fn id(c: &Company) -> &str {
    &c.id
}

fn name(c: &Company) -> &str {
    &c.name
}

fn name_field(c: &Company) -> Option<&str> {
    Some(c.name.as_str())
}

fn tax_id(c: &Company) -> Option<&str> {
    Some(c.tax_id.as_str())
}

fn email(c: &Company) -> Option<&str> {
    c.email.as_deref()
}

fn status(c: &Company) -> Option<&str> {
    Some(c.status.as_str())
}

fn industry(c: &Company) -> Option<&str> {
    c.industry.as_deref().filter(|i| !i.trim().is_empty())
}

fn created(c: &Company) -> Option<NaiveDate> {
    Some(c.metadata.created_at.date_naive())
}

/// Компании фильтруются и режутся на бэкенде
pub fn list_config() -> ListConfig<Company> {
    ListConfig {
        id,
        display_name: name,
        placeholder: NAME_PLACEHOLDER,
        text_fields: vec![name_field as TextField<Company>, tax_id, email],
        equality_fields: vec![
            (STATUS, status as TextField<Company>),
            (INDUSTRY, industry as TextField<Company>),
        ],
        date_field: Some(created),
        mode: PaginationMode::Server,
    }
}

pub fn stats_config(expiring_window_days: i64) -> StatsConfig<Company> {
    StatsConfig {
        status,
        group: Some(industry),
        expiry: None,
        nested: None,
        expiring_window_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::stats::{aggregate, UNGROUPED};
    use crate::shared::list_view::{FilterState, ListController};
    use contracts::domain::common::{EntityMetadata, EntityStatus};

    fn company(name: &str, status: EntityStatus, industry: Option<&str>) -> Company {
        Company {
            id: format!("id-{}", name),
            name: name.to_string(),
            tax_id: "76.000.000-0".to_string(),
            industry: industry.map(str::to_string),
            email: None,
            phone: None,
            status,
            metadata: EntityMetadata::new(chrono::Utc::now()),
        }
    }

    #[test]
    fn test_stats_by_industry() {
        let items = vec![
            company("Andes", EntityStatus::Active, Some("Minería")),
            company("Bío Bío", EntityStatus::Active, Some("Minería")),
            company("Costa", EntityStatus::Inactive, None),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let s = aggregate(&items, &stats_config(30), today);
        assert_eq!(s.total, 3);
        assert_eq!(s.by_group.get("Minería"), Some(&2));
        assert_eq!(s.by_group.get(UNGROUPED), Some(&1));
        assert_eq!(s.status_count("active"), 2);
    }

    #[test]
    fn test_server_mode_groups_page_as_is() {
        let mut c = ListController::new(list_config(), 25);
        c.update_filter(|f: &mut FilterState| f.set_equals(STATUS, "inactive"));
        let items = vec![
            company("Zeta", EntityStatus::Active, None),
            company("Andes", EntityStatus::Active, None),
        ];
        // фильтр уже применён сервером: клиент ничего не выбрасывает
        let vm = c.view(&items);
        assert_eq!(vm.filtered.len(), 2);
        assert_eq!(vm.groups.keys(), vec!["A", "Z"]);
    }
}
