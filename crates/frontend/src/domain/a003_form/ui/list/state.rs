use chrono::NaiveDate;
use contracts::domain::a003_form::aggregate::Form;

use crate::domain::a003_form::api::{CATEGORY, STATUS};
use crate::shared::list_view::{
    ListConfig, PaginationMode, StatsConfig, TextField, NAME_PLACEHOLDER,
};

fn id(f: &Form) -> &str {
    &f.id
}

fn name(f: &Form) -> &str {
    &f.name
}

fn name_field(f: &Form) -> Option<&str> {
    Some(f.name.as_str())
}

fn description(f: &Form) -> Option<&str> {
    f.description.as_deref()
}

fn category(f: &Form) -> Option<&str> {
    f.category.as_deref().filter(|c| !c.trim().is_empty())
}

fn status(f: &Form) -> Option<&str> {
    Some(f.status.as_str())
}

fn created(f: &Form) -> Option<NaiveDate> {
    Some(f.metadata.created_at.date_naive())
}

pub fn list_config() -> ListConfig<Form> {
    ListConfig {
        id,
        display_name: name,
        placeholder: NAME_PLACEHOLDER,
        text_fields: vec![name_field as TextField<Form>, description, category],
        equality_fields: vec![
            (STATUS, status as TextField<Form>),
            (CATEGORY, category as TextField<Form>),
        ],
        date_field: Some(created),
        mode: PaginationMode::Client,
    }
}

pub fn stats_config(expiring_window_days: i64) -> StatsConfig<Form> {
    StatsConfig {
        status,
        group: Some(category),
        expiry: None,
        nested: None,
        expiring_window_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::ListController;
    use contracts::domain::common::{EntityMetadata, EntityStatus};

    fn form(name: &str, category: Option<&str>, status: EntityStatus) -> Form {
        Form {
            id: format!("f-{}", name),
            name: name.to_string(),
            description: None,
            category: category.map(str::to_string),
            status,
            question_count: 0,
            metadata: EntityMetadata::new(chrono::Utc::now()),
        }
    }

    fn catalog() -> Vec<Form> {
        vec![
            form("Trabajo en altura", Some("Seguridad"), EntityStatus::Active),
            form("Ñandutí checklist", Some("Calidad"), EntityStatus::Active),
            form("Espacios confinados", Some("Seguridad"), EntityStatus::Inactive),
            form("andamios", Some("Seguridad"), EntityStatus::Active),
            form("", None, EntityStatus::Active),
        ]
    }

    #[test]
    fn test_catalog_filters_and_groups_in_memory() {
        let mut c = ListController::new(list_config(), 2);
        c.update_filter(|f| f.set_equals(CATEGORY, "Seguridad"));
        let items = catalog();
        let vm = c.view(&items);
        let names: Vec<&str> = vm.filtered.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["andamios", "Espacios confinados", "Trabajo en altura"]);
        assert_eq!(vm.page.page_items.len(), 2);
        assert_eq!(vm.page.page_count, 2);
        assert_eq!(vm.groups.keys(), vec!["A", "E", "T"]);
    }

    #[test]
    fn test_blank_name_shown_with_placeholder() {
        let c = ListController::new(list_config(), 10);
        let items = catalog();
        let vm = c.view(&items);
        assert_eq!(vm.groups.keys()[0], "#");
        assert_eq!(c.config.label(&vm.filtered[0]), NAME_PLACEHOLDER);
        assert!(vm.groups.keys().contains(&"Ñ"));
    }
}
