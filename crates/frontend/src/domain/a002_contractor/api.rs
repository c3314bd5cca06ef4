//! REST-клиент `/contractors`

use contracts::domain::a002_contractor::aggregate::{Contractor, ContractorDto, ContractorListQuery};
use contracts::shared::api::ExportFormat;

use crate::shared::api_error::{ensure_success, into_data, ApiError};
use crate::shared::api_utils::{api_url, delete, encode_id, get_json, send_json, Method};
use crate::shared::export::export_resource;
use crate::shared::list_view::{FilterState, Fetched, PaginationState};

pub const RESOURCE: &str = "contractors";

pub const STATUS: &str = "status";
pub const COMPANY: &str = "companyId";

pub fn list_query(filter: &FilterState, pagination: &PaginationState) -> ContractorListQuery {
    ContractorListQuery {
        page: pagination.wire_page(),
        limit: pagination.page_size(),
        search: filter.search_param(),
        status: filter.equals_param(STATUS),
        company_id: filter.equals_param(COMPANY),
        date_from: filter.date_from,
        date_to: filter.date_to,
    }
}

pub fn export_query(filter: &FilterState) -> ContractorListQuery {
    ContractorListQuery {
        page: 0,
        limit: 0,
        ..list_query(filter, &PaginationState::default())
    }
}

pub async fn fetch_contractors(
    filter: FilterState,
    pagination: PaginationState,
) -> Result<Fetched<Contractor>, ApiError> {
    let url = api_url(RESOURCE, Some(&list_query(&filter, &pagination)))?;
    let (items, envelope) = into_data(get_json::<Vec<Contractor>>(&url).await?)?;
    Ok(Fetched::page(items, envelope.pagination))
}

pub async fn fetch_contractor(id: &str) -> Result<Contractor, ApiError> {
    let url = api_url::<()>(&format!("{}/{}", RESOURCE, encode_id(id)), None)?;
    let (contractor, _) = into_data(get_json::<Contractor>(&url).await?)?;
    Ok(contractor)
}

pub async fn save_contractor(id: Option<&str>, dto: &ContractorDto) -> Result<Contractor, ApiError> {
    dto.validate()?;
    let (method, path) = match id {
        Some(id) => (Method::Put, format!("{}/{}", RESOURCE, encode_id(id))),
        None => (Method::Post, RESOURCE.to_string()),
    };
    let url = api_url::<()>(&path, None)?;
    let (contractor, _) = into_data(send_json::<_, Contractor>(method, &url, dto).await?)?;
    Ok(contractor)
}

pub async fn delete_contractor(id: &str) -> Result<(), ApiError> {
    let url = api_url::<()>(&format!("{}/{}", RESOURCE, encode_id(id)), None)?;
    ensure_success(delete(&url).await?)?;
    Ok(())
}

pub async fn export_contractors(filter: &FilterState, format: ExportFormat) -> Result<(), ApiError> {
    export_resource(RESOURCE, &export_query(filter), format).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::query_string;
    use chrono::NaiveDate;

    #[test]
    fn test_list_query_carries_company_and_dates() {
        let mut filter = FilterState::default();
        filter.set_equals(COMPANY, "c-7");
        filter.set_date_range(NaiveDate::from_ymd_opt(2026, 1, 1), None);
        let q = list_query(&filter, &PaginationState::new(10));
        assert_eq!(q.page, 1);
        assert_eq!(q.company_id.as_deref(), Some("c-7"));
        assert_eq!(q.date_from, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(q.date_to, None);

        let qs = query_string(&q).unwrap();
        assert!(qs.contains("companyId=c-7"));
        assert!(qs.contains("dateFrom=2026-01-01"));
        assert!(!qs.contains("dateTo"));
    }
}
