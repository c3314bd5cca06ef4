//! REST-клиент `/forms`
//!
//! Каталог небольшой: грузится одним запросом до `list.catalog_cap`
//! записей, фильтры и страницы считаются на клиенте.

use contracts::domain::a003_form::aggregate::{Form, FormListQuery};
use contracts::shared::api::ExportFormat;

use crate::shared::api_error::{ensure_success, into_data, ApiError};
use crate::shared::api_utils::{api_url, delete, encode_id, get_json};
use crate::shared::config::config;
use crate::shared::export::export_resource;
use crate::shared::list_view::{FilterState, Fetched, PaginationState};

pub const RESOURCE: &str = "forms";

pub const STATUS: &str = "status";
pub const CATEGORY: &str = "category";

/// Запрос всего каталога
pub fn catalog_query(cap: usize) -> FormListQuery {
    FormListQuery {
        page: 1,
        limit: cap,
        ..Default::default()
    }
}

pub fn export_query(filter: &FilterState) -> FormListQuery {
    FormListQuery {
        search: filter.search_param(),
        status: filter.equals_param(STATUS),
        category: filter.equals_param(CATEGORY),
        ..Default::default()
    }
}

/// Фильтры и страница не уходят на сервер
pub async fn fetch_forms(
    _filter: FilterState,
    _pagination: PaginationState,
) -> Result<Fetched<Form>, ApiError> {
    let cap = config().list.catalog_cap;
    let url = api_url(RESOURCE, Some(&catalog_query(cap)))?;
    let (items, envelope) = into_data(get_json::<Vec<Form>>(&url).await?)?;
    if let Some(meta) = envelope.pagination.filter(|m| m.total > items.len()) {
        log::warn!("Form catalog truncated: {} of {}", items.len(), meta.total);
    }
    Ok(Fetched::all(items))
}

pub async fn delete_form(id: &str) -> Result<(), ApiError> {
    let url = api_url::<()>(&format!("{}/{}", RESOURCE, encode_id(id)), None)?;
    ensure_success(delete(&url).await?)?;
    Ok(())
}

pub async fn export_forms(filter: &FilterState, format: ExportFormat) -> Result<(), ApiError> {
    export_resource(RESOURCE, &export_query(filter), format).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::query_string;

    #[test]
    fn test_catalog_query() {
        assert_eq!(query_string(&catalog_query(500)).unwrap(), "page=1&limit=500");
    }

    #[test]
    fn test_export_query_uses_client_filters() {
        let mut filter = FilterState::default();
        filter.set_equals(CATEGORY, "Seguridad");
        filter.set_equals(STATUS, "all");
        assert_eq!(query_string(&export_query(&filter)).unwrap(), "category=Seguridad");
    }
}
