//! Единый формат ответа REST API и общие типы пагинации/экспорта

use serde::{Deserialize, Serialize};

/// Конверт, в который бэкенд заворачивает любой ответ
///
/// ```json
/// { "success": true, "data": [...], "pagination": { "total": 23, "page": 1, "limit": 10 } }
/// { "success": false, "message": "El RUT ya existe" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            message: Some(message.into()),
        }
    }
}

/// Пагинация на проводе: страницы нумеруются с 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Для `skip_serializing_if`: нулевые page/limit не уходят в query string (выгрузка)
pub fn is_zero(v: &usize) -> bool {
    *v == 0
}

/// Результат удаления/мутации без тела
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// Формат выгрузки `/<resource>/export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    /// Значение параметра `format=`
    pub fn as_query(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
        }
    }

    /// Расширение скачиваемого файла
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_deserializes() {
        let raw = r#"{
            "success": true,
            "data": [1, 2, 3],
            "pagination": { "total": 23, "page": 2, "limit": 10 }
        }"#;
        let resp: ApiResponse<Vec<u32>> = serde_json::from_str(raw).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
        assert_eq!(
            resp.pagination,
            Some(PaginationMeta {
                total: 23,
                page: 2,
                limit: 10
            })
        );
        assert_eq!(resp.message, None);
    }

    #[test]
    fn test_rejection_without_data() {
        let raw = r#"{ "success": false, "message": "El RUT ya existe" }"#;
        let resp: ApiResponse<Vec<u32>> = serde_json::from_str(raw).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.message.as_deref(), Some("El RUT ya existe"));
    }

    #[test]
    fn test_export_format() {
        assert_eq!(ExportFormat::Excel.as_query(), "excel");
        assert_eq!(ExportFormat::Excel.extension(), "xlsx");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
    }
}
