//! Разбор CSV для массовых приглашений
//!
//! Ожидаемые колонки: `email`, `name`, `companyId`, `role` (порядок любой,
//! регистр заголовков не важен, есть испанские синонимы). Разделитель
//! `,` или `;` (Excel в es-CL сохраняет CSV через `;`). Номер строки в
//! ошибках совпадает с номером строки в таблице: заголовок = строка 1.

use std::collections::HashSet;

use contracts::domain::a005_invitation_code::aggregate::InvitationRecord;

pub const TEMPLATE_FILENAME: &str = "plantilla_invitaciones.csv";

const HEADERS: [&str; 4] = ["email", "name", "companyId", "role"];

const EMAIL: &[&str] = &["email", "correo", "e-mail"];
const NAME: &[&str] = &["name", "nombre"];
const COMPANY: &[&str] = &["companyid", "company_id", "empresa"];
const ROLE: &[&str] = &["role", "rol", "cargo"];

/// Ошибка в конкретной строке файла
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fila {}: {}", self.row, self.message)
    }
}

/// Результат разбора: корректные записи и ошибки по строкам
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    pub records: Vec<InvitationRecord>,
    pub errors: Vec<RowError>,
}

impl ImportPreview {
    /// Пакет можно отправлять только без ошибок
    pub fn is_ready(&self) -> bool {
        !self.records.is_empty() && self.errors.is_empty()
    }
}

fn detect_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or_default();
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Разобрать текст файла. `Err` только если файл целиком непригоден
/// (нет заголовка или колонки email), ошибки строк идут в `errors`.
pub fn parse_invitations(text: &str) -> Result<ImportPreview, String> {
    let text = text.trim_start_matches('\u{FEFF}');
    if text.trim().is_empty() {
        return Err("El archivo está vacío".to_string());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(text))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("No se pudo leer el encabezado: {}", e))?
        .clone();
    let email_col = column(&headers, EMAIL)
        .ok_or_else(|| "Falta la columna \"email\"".to_string())?;
    let name_col = column(&headers, NAME);
    let company_col = column(&headers, COMPANY);
    let role_col = column(&headers, ROLE);

    let mut preview = ImportPreview::default();
    let mut seen = HashSet::new();

    for (index, result) in reader.records().enumerate() {
        // запасной номер, если csv не знает позицию
        let fallback_row = index + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let row = e
                    .position()
                    .map_or(fallback_row, |p| p.line() as usize);
                preview.errors.push(RowError {
                    row,
                    message: format!("Formato inválido ({})", e),
                });
                continue;
            }
        };
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let row = record
            .position()
            .map_or(fallback_row, |p| p.line() as usize);

        let invitation = InvitationRecord {
            email: cell(&record, Some(email_col)).unwrap_or_default(),
            name: cell(&record, name_col),
            company_id: cell(&record, company_col),
            role: cell(&record, role_col),
        };
        if let Err(e) = invitation.validate() {
            preview.errors.push(RowError {
                row,
                message: format!("{} ({})", e.message, invitation.email),
            });
            continue;
        }
        if !seen.insert(invitation.email.to_lowercase()) {
            preview.errors.push(RowError {
                row,
                message: format!("Correo duplicado ({})", invitation.email),
            });
            continue;
        }
        preview.records.push(invitation);
    }

    log::debug!(
        "Parsed invitation CSV: {} records, {} errors",
        preview.records.len(),
        preview.errors.len()
    );
    Ok(preview)
}

/// Текст шаблона для скачивания: заголовок и строка-пример
pub fn template_csv() -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS).map_err(|e| e.to_string())?;
    writer
        .write_record(["ana.perez@empresa.cl", "Ana Pérez", "", "supervisor"])
        .map_err(|e| e.to_string())?;
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}
