//! REST-клиент `/temporary-codes` и массовых приглашений

use contracts::domain::a005_invitation_code::aggregate::{
    BatchAction, BatchScheduleRequest, BatchScheduleResponse, InvitationCode,
    InvitationCodeListQuery,
};
use contracts::domain::common::ValidationError;
use contracts::shared::api::ExportFormat;

use crate::shared::api_error::{ensure_success, into_data, ApiError};
use crate::shared::api_utils::{api_url, delete, encode_id, get_json, send_json, Method};
use crate::shared::export::export_resource;
use crate::shared::list_view::{FilterState, Fetched, PaginationState};

pub const RESOURCE: &str = "temporary-codes";

pub const STATUS: &str = "status";
pub const COMPANY: &str = "companyId";

pub fn list_query(filter: &FilterState, pagination: &PaginationState) -> InvitationCodeListQuery {
    InvitationCodeListQuery {
        page: pagination.wire_page(),
        limit: pagination.page_size(),
        search: filter.search_param(),
        status: filter.equals_param(STATUS),
        company_id: filter.equals_param(COMPANY),
    }
}

pub fn export_query(filter: &FilterState) -> InvitationCodeListQuery {
    InvitationCodeListQuery {
        page: 0,
        limit: 0,
        ..list_query(filter, &PaginationState::default())
    }
}

pub async fn fetch_codes(
    filter: FilterState,
    pagination: PaginationState,
) -> Result<Fetched<InvitationCode>, ApiError> {
    let url = api_url(RESOURCE, Some(&list_query(&filter, &pagination)))?;
    let (items, envelope) = into_data(get_json::<Vec<InvitationCode>>(&url).await?)?;
    Ok(Fetched::page(items, envelope.pagination))
}

pub async fn delete_code(id: &str) -> Result<(), ApiError> {
    let url = api_url::<()>(&format!("{}/{}", RESOURCE, encode_id(id)), None)?;
    ensure_success(delete(&url).await?)?;
    Ok(())
}

pub async fn export_codes(filter: &FilterState, format: ExportFormat) -> Result<(), ApiError> {
    export_resource(RESOURCE, &export_query(filter), format).await
}

/// Первая ошибка строки в виде ошибки валидации формы
fn batch_validation_error(errors: Vec<(usize, ValidationError)>) -> ApiError {
    match errors.into_iter().next() {
        Some((0, e)) => ApiError::Validation(e),
        Some((row, e)) => ApiError::Validation(ValidationError::new(
            e.field,
            format!("Invitación {}: {}", row, e.message),
        )),
        None => ApiError::Decode("empty validation result".to_string()),
    }
}

/// POST /temporary-codes/batches/schedule
pub async fn schedule_batch(request: &BatchScheduleRequest) -> Result<BatchScheduleResponse, ApiError> {
    request.validate().map_err(batch_validation_error)?;
    let url = api_url::<()>(&format!("{}/batches/schedule", RESOURCE), None)?;
    let (response, _) =
        into_data(send_json::<_, BatchScheduleResponse>(Method::Post, &url, request).await?)?;
    log::info!(
        "Batch {} scheduled: {} invitations ({:?})",
        response.batch_id,
        response.total_invitations,
        response.status
    );
    Ok(response)
}

pub fn batch_action_path(batch_id: &str, action: BatchAction) -> String {
    format!(
        "{}/batches/{}/{}",
        RESOURCE,
        encode_id(batch_id),
        action.path_segment()
    )
}

/// POST /temporary-codes/batches/:id/{execute,pause,cancel}
pub async fn batch_action(batch_id: &str, action: BatchAction) -> Result<(), ApiError> {
    let url = api_url::<()>(&batch_action_path(batch_id, action), None)?;
    ensure_success(
        send_json::<_, serde_json::Value>(Method::Post, &url, &serde_json::json!({})).await?,
    )?;
    log::info!("Batch {}: {:?}", batch_id, action);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::query_string;

    #[test]
    fn test_list_query_company_param() {
        let mut filter = FilterState::default();
        filter.set_equals(COMPANY, "c-7");
        filter.set_equals(STATUS, "pending");
        let mut pagination = PaginationState::new(50);
        pagination.set_total(120);
        pagination.set_page(1);
        let qs = query_string(&list_query(&filter, &pagination)).unwrap();
        assert_eq!(qs, "page=2&limit=50&status=pending&companyId=c-7");
    }

    #[test]
    fn test_batch_action_path() {
        assert_eq!(
            batch_action_path("b 42", BatchAction::Pause),
            "temporary-codes/batches/b%2042/pause"
        );
    }

    #[test]
    fn test_batch_validation_error_names_invitation() {
        let err = batch_validation_error(vec![(3, ValidationError::new("email", "Correo electrónico no válido"))]);
        assert_eq!(err.user_message(), "Invitación 3: Correo electrónico no válido");
    }
}
