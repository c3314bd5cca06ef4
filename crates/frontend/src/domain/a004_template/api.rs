use contracts::domain::a004_template::aggregate::{Template, TemplateListQuery};
use contracts::shared::api::ExportFormat;

use crate::shared::api_error::{ensure_success, into_data, ApiError};
use crate::shared::api_utils::{api_url, delete, encode_id, get_json};
use crate::shared::config::config;
use crate::shared::export::export_resource;
use crate::shared::list_view::{FilterState, Fetched, PaginationState};

pub const RESOURCE: &str = "templates";

pub const STATUS: &str = "status";
pub const CATEGORY: &str = "category";

pub fn catalog_query(cap: usize) -> TemplateListQuery {
    TemplateListQuery {
        page: 1,
        limit: cap,
        ..Default::default()
    }
}

pub fn export_query(filter: &FilterState) -> TemplateListQuery {
    TemplateListQuery {
        search: filter.search_param(),
        status: filter.equals_param(STATUS),
        category: filter.equals_param(CATEGORY),
        ..Default::default()
    }
}

/// Весь каталог шаблонов, фильтрация на клиенте
pub async fn fetch_templates(
    _filter: FilterState,
    _pagination: PaginationState,
) -> Result<Fetched<Template>, ApiError> {
    let cap = config().list.catalog_cap;
    let url = api_url(RESOURCE, Some(&catalog_query(cap)))?;
    let (items, envelope) = into_data(get_json::<Vec<Template>>(&url).await?)?;
    if let Some(meta) = envelope.pagination.filter(|m| m.total > items.len()) {
        log::warn!("Template catalog truncated: {} of {}", items.len(), meta.total);
    }
    Ok(Fetched::all(items))
}

pub async fn delete_template(id: &str) -> Result<(), ApiError> {
    let url = api_url::<()>(&format!("{}/{}", RESOURCE, encode_id(id)), None)?;
    ensure_success(delete(&url).await?)?;
    Ok(())
}

pub async fn export_templates(filter: &FilterState, format: ExportFormat) -> Result<(), ApiError> {
    export_resource(RESOURCE, &export_query(filter), format).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::query_string;

    #[test]
    fn test_export_query() {
        let mut filter = FilterState::default();
        filter.set_search("inducción");
        filter.set_equals(STATUS, "active");
        let qs = query_string(&export_query(&filter)).unwrap();
        assert!(qs.starts_with("search="));
        assert!(qs.ends_with("&status=active"));
        assert!(!qs.contains("page"));
    }
}
