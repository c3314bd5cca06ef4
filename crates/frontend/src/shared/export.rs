/// Выгрузка списков (CSV/Excel с бэкенда) и скачивание файлов в браузере
use chrono::NaiveDate;
use contracts::shared::api::ExportFormat;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{api_url, get_bytes};

/// Имя файла выгрузки: `<resource>_<YYYY-MM-DD>.<ext>`
pub fn export_filename(resource: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        resource.trim_matches('/').replace('/', "_"),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

fn mime_type(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Csv => "text/csv;charset=utf-8;",
        ExportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    }
}

/// Параметры `GET /<resource>/export`: фильтры списка + format
#[derive(Serialize)]
struct ExportQuery<'a, Q: Serialize> {
    #[serde(flatten)]
    filters: &'a Q,
    format: &'static str,
}

/// Скачать выгрузку с сервера с текущими фильтрами
pub async fn export_resource<Q: Serialize>(
    resource: &str,
    filters: &Q,
    format: ExportFormat,
) -> Result<(), ApiError> {
    let query = ExportQuery {
        filters,
        format: format.as_query(),
    };
    let url = api_url(&format!("{}/export", resource.trim_end_matches('/')), Some(&query))?;
    let bytes = get_bytes(&url).await?;
    let filename = export_filename(resource, chrono::Local::now().date_naive(), format);
    log::info!("Export ready: {} ({} bytes)", filename, bytes.len());
    download_bytes(&bytes, &filename, mime_type(format)).map_err(ApiError::Decode)
}

/// Создает Blob из байтов и инициирует скачивание
pub fn download_bytes(bytes: &[u8], filename: &str, mime: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes).buffer());

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    let blob = Blob::new_with_buffer_source_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

/// Скачать текст (например, шаблон CSV для массовых приглашений)
pub fn download_text(content: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    // UTF-8 BOM, чтобы Excel правильно показал "ñ" и акценты
    array.push(&wasm_bindgen::JsValue::from_str(&format!("\u{FEFF}{}", content)));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

/// Инициирует скачивание Blob через браузер (скрытая ссылка + click)
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            export_filename("contractors", date, ExportFormat::Csv),
            "contractors_2026-10-17.csv"
        );
        assert_eq!(
            export_filename("/temporary-codes/", date, ExportFormat::Excel),
            "temporary-codes_2026-10-17.xlsx"
        );
    }
}
