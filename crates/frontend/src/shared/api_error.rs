//! Типизированные ошибки обращения к API

use contracts::domain::common::ValidationError;
use contracts::shared::api::ApiResponse;
use thiserror::Error;

/// Сообщение, если сервер не прислал своё
pub const GENERIC_ERROR: &str = "Ocurrió un error inesperado. Inténtalo de nuevo.";

/// Ошибки загрузки и мутаций
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// fetch не выполнился (сеть, CORS)
    #[error("Network error: {0}")]
    Network(String),

    /// Ответ не 2xx
    #[error("HTTP error: {status}")]
    Http { status: u16, message: Option<String> },

    /// `success: false` от бэкенда
    #[error("Rejected by server: {}", .0.as_deref().unwrap_or("-"))]
    Rejected(Option<String>),

    /// Ответ не соответствует контракту
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Проверка на клиенте до отправки
    #[error("Validation error: {0}")]
    Validation(ValidationError),
}

impl ApiError {
    /// Текст для баннера/тоста: сообщение сервера дословно, иначе общий текст
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(Some(msg)) | ApiError::Http { message: Some(msg), .. }
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            ApiError::Network(_) => {
                "No se pudo conectar con el servidor. Revisa tu conexión.".to_string()
            }
            ApiError::Http { status: 401, .. } | ApiError::Http { status: 403, .. } => {
                "Tu sesión expiró o no tienes permisos.".to_string()
            }
            ApiError::Validation(e) => e.message.clone(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    /// Можно ли повторить запрос кнопкой "Reintentar"
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::Http { .. } | ApiError::Decode(_)
        )
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

/// Разобрать конверт: `success: false` -> Rejected, нет `data` -> Decode
pub fn into_data<T>(resp: ApiResponse<T>) -> Result<(T, ApiResponse<()>), ApiError> {
    let ApiResponse {
        success,
        data,
        pagination,
        message,
    } = resp;
    if !success {
        return Err(ApiError::Rejected(message));
    }
    let data = data.ok_or_else(|| ApiError::Decode("missing `data` field".to_string()))?;
    Ok((
        data,
        ApiResponse {
            success,
            data: None,
            pagination,
            message,
        },
    ))
}

/// Для мутаций без тела ответа: важен только `success`
pub fn ensure_success<T>(resp: ApiResponse<T>) -> Result<Option<T>, ApiError> {
    if !resp.success {
        return Err(ApiError::Rejected(resp.message));
    }
    Ok(resp.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api::PaginationMeta;

    #[test]
    fn test_server_message_used_verbatim() {
        let e = ApiError::Rejected(Some("El RUT ya existe".into()));
        assert_eq!(e.user_message(), "El RUT ya existe");
        let e = ApiError::Rejected(None);
        assert_eq!(e.user_message(), GENERIC_ERROR);
        let e = ApiError::Rejected(Some("  ".into()));
        assert_eq!(e.user_message(), GENERIC_ERROR);
        assert!(!e.is_retryable());
    }

    #[test]
    fn test_http_errors() {
        let e = ApiError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(e.user_message(), GENERIC_ERROR);
        assert!(e.is_retryable());
        let e = ApiError::Http {
            status: 401,
            message: None,
        };
        assert!(e.user_message().contains("sesión"));
    }

    #[test]
    fn test_into_data() {
        let mut resp = ApiResponse::ok(vec![1, 2]);
        resp.pagination = Some(PaginationMeta {
            total: 2,
            page: 1,
            limit: 10,
        });
        let (data, meta) = into_data(resp).unwrap();
        assert_eq!(data, vec![1, 2]);
        assert_eq!(meta.pagination.map(|p| p.total), Some(2));

        let rejected: ApiResponse<Vec<i32>> = ApiResponse::rejected("nope");
        assert_eq!(
            into_data(rejected).unwrap_err(),
            ApiError::Rejected(Some("nope".into()))
        );

        let empty: ApiResponse<Vec<i32>> = ApiResponse {
            success: true,
            data: None,
            pagination: None,
            message: None,
        };
        assert!(matches!(into_data(empty), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_ensure_success() {
        let resp: ApiResponse<()> = ApiResponse::rejected("bloqueado");
        assert!(ensure_success(resp).is_err());
        let resp = ApiResponse::ok(5);
        assert_eq!(ensure_success(resp).unwrap(), Some(5));
    }
}
