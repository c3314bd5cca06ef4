//! REST-клиент `/companies`

use contracts::domain::a001_company::aggregate::{Company, CompanyDto, CompanyListQuery};
use contracts::shared::api::ExportFormat;

use crate::shared::api_error::{ensure_success, into_data, ApiError};
use crate::shared::api_utils::{api_url, delete, encode_id, get_json, send_json, Method};
use crate::shared::export::export_resource;
use crate::shared::list_view::{FilterState, Fetched, PaginationState};

pub const RESOURCE: &str = "companies";

/// Имена фильтров на равенство (совпадают с параметрами query)
pub const STATUS: &str = "status";
pub const INDUSTRY: &str = "industry";

pub fn list_query(filter: &FilterState, pagination: &PaginationState) -> CompanyListQuery {
    CompanyListQuery {
        page: pagination.wire_page(),
        limit: pagination.page_size(),
        search: filter.search_param(),
        status: filter.equals_param(STATUS),
        industry: filter.equals_param(INDUSTRY),
    }
}

/// Фильтры без страницы: выгрузка идёт по всей выборке
pub fn export_query(filter: &FilterState) -> CompanyListQuery {
    CompanyListQuery {
        page: 0,
        limit: 0,
        ..list_query(filter, &PaginationState::default())
    }
}

pub async fn fetch_companies(
    filter: FilterState,
    pagination: PaginationState,
) -> Result<Fetched<Company>, ApiError> {
    let url = api_url(RESOURCE, Some(&list_query(&filter, &pagination)))?;
    let (items, envelope) = into_data(get_json::<Vec<Company>>(&url).await?)?;
    Ok(Fetched::page(items, envelope.pagination))
}

pub async fn fetch_company(id: &str) -> Result<Company, ApiError> {
    let url = api_url::<()>(&format!("{}/{}", RESOURCE, encode_id(id)), None)?;
    let (company, _) = into_data(get_json::<Company>(&url).await?)?;
    Ok(company)
}

/// Создание (id = None) или обновление
pub async fn save_company(id: Option<&str>, dto: &CompanyDto) -> Result<Company, ApiError> {
    dto.validate()?;
    let (method, path) = match id {
        Some(id) => (Method::Put, format!("{}/{}", RESOURCE, encode_id(id))),
        None => (Method::Post, RESOURCE.to_string()),
    };
    let url = api_url::<()>(&path, None)?;
    let (company, _) = into_data(send_json::<_, Company>(method, &url, dto).await?)?;
    Ok(company)
}

pub async fn delete_company(id: &str) -> Result<(), ApiError> {
    let url = api_url::<()>(&format!("{}/{}", RESOURCE, encode_id(id)), None)?;
    ensure_success(delete(&url).await?)?;
    Ok(())
}

pub async fn export_companies(filter: &FilterState, format: ExportFormat) -> Result<(), ApiError> {
    export_resource(RESOURCE, &export_query(filter), format).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::query_string;

    #[test]
    fn test_list_query_translates_page_and_skips_disabled_filters() {
        let mut filter = FilterState::default();
        filter.set_equals(STATUS, "active");
        filter.set_equals(INDUSTRY, "all");
        let mut pagination = PaginationState::new(25);
        pagination.set_total(100);
        pagination.set_page(2);

        let q = list_query(&filter, &pagination);
        assert_eq!(q.page, 3);
        assert_eq!(q.limit, 25);
        assert_eq!(q.status.as_deref(), Some("active"));
        assert_eq!(q.industry, None);
        assert_eq!(q.search, None);
    }

    #[test]
    fn test_export_query_has_no_paging() {
        let mut filter = FilterState::default();
        filter.set_search("andes");
        let qs = query_string(&export_query(&filter)).unwrap();
        assert_eq!(qs, "search=andes");
    }
}
