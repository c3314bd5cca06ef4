use serde::{Deserialize, Serialize};

/// Ошибка валидации формы до отправки на сервер (показывается рядом с полем)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Имя поля в DTO
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "Campo obligatorio"));
    }
    Ok(())
}

/// Минимальная проверка email: непустые части до и после '@', точка в домене
pub fn require_email(field: &str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::new(field, "Correo electrónico no válido"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_email() {
        assert!(require_email("email", "ana@empresa.cl").is_ok());
        assert!(require_email("email", " ana@empresa.cl ").is_ok());
        assert!(require_email("email", "ana@empresa").is_err());
        assert!(require_email("email", "@empresa.cl").is_err());
        assert!(require_email("email", "ana.empresa.cl").is_err());
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("name", "  ").is_err());
        assert_eq!(require_non_empty("name", "").unwrap_err().field, "name");
        assert!(require_non_empty("name", "x").is_ok());
    }
}
