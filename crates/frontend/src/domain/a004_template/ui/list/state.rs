use contracts::domain::a004_template::aggregate::Template;

use crate::domain::a004_template::api::{CATEGORY, STATUS};
use crate::shared::list_view::{
    ListConfig, PaginationMode, StatsConfig, TextField, NAME_PLACEHOLDER,
};

fn id(t: &Template) -> &str {
    &t.id
}

fn name(t: &Template) -> &str {
    &t.name
}

fn name_field(t: &Template) -> Option<&str> {
    Some(t.name.as_str())
}

fn category(t: &Template) -> Option<&str> {
    t.category.as_deref().filter(|c| !c.trim().is_empty())
}

fn form_name(t: &Template) -> Option<&str> {
    t.form_name.as_deref()
}

fn status(t: &Template) -> Option<&str> {
    Some(t.status.as_str())
}

pub fn list_config() -> ListConfig<Template> {
    ListConfig {
        id,
        display_name: name,
        placeholder: NAME_PLACEHOLDER,
        text_fields: vec![name_field as TextField<Template>, category, form_name],
        equality_fields: vec![
            (STATUS, status as TextField<Template>),
            (CATEGORY, category as TextField<Template>),
        ],
        date_field: None,
        mode: PaginationMode::Client,
    }
}

pub fn stats_config(expiring_window_days: i64) -> StatsConfig<Template> {
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
    use crate::shared::list_view::stats::aggregate;
    use crate::shared::list_view::ListController;
    use contracts::domain::common::{EntityMetadata, EntityStatus};

    fn template(name: &str, category: Option<&str>, form: Option<&str>) -> Template {
        Template {
            id: format!("t-{}", name),
            name: name.to_string(),
            category: category.map(str::to_string),
            status: EntityStatus::Active,
            form_id: form.map(|f| format!("f-{}", f)),
            form_name: form.map(str::to_string),
            metadata: EntityMetadata::new(chrono::Utc::now()),
        }
    }

    #[test]
    fn test_search_matches_form_name() {
        let mut c = ListController::new(list_config(), 25);
        c.update_filter(|f| f.set_search("ALTURA"));
        let items = vec![
            template("Permiso diario", Some("Permisos"), Some("Trabajo en altura")),
            template("Acta de entrega", Some("Actas"), None),
        ];
        let vm = c.view(&items);
        assert_eq!(vm.filtered.len(), 1);
        assert_eq!(vm.filtered[0].name, "Permiso diario");
    }

    #[test]
    fn test_missing_category_never_matches_filter() {
        let mut c = ListController::new(list_config(), 25);
        c.update_filter(|f| f.set_equals(CATEGORY, "Actas"));
        let items = vec![
            template("Acta de entrega", Some("Actas"), None),
            template("Borrador", None, None),
            template("Vacía", Some("  "), None),
        ];
        assert_eq!(c.view(&items).filtered.len(), 1);
    }

    #[test]
    fn test_stats_group_by_category() {
        let items = vec![
            template("a", Some("Actas"), None),
            template("b", Some("Actas"), None),
            template("c", Some("Permisos"), None),
            template("d", None, None),
        ];
        let today = chrono::Utc::now().date_naive();
        let s = aggregate(&items, &stats_config(30), today);
        assert_eq!(s.total, 4);
        assert_eq!(s.by_group.get("Actas"), Some(&2));
        assert_eq!(s.top_groups(1), vec![("Actas", 2)]);
    }
}
