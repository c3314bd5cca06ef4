use serde::{Deserialize, Serialize};

/// Статус записи в списке (контрагенты, компании, формы, шаблоны)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Active,
    Inactive,
    Suspended,
    /// Значение, которое бэкенд прислал, а клиент не знает
    #[serde(other)]
    Unknown,
}

impl EntityStatus {
    pub const ALL: [EntityStatus; 3] = [
        EntityStatus::Active,
        EntityStatus::Inactive,
        EntityStatus::Suspended,
    ];

    /// Значение как на проводе
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Active => "active",
            EntityStatus::Inactive => "inactive",
            EntityStatus::Suspended => "suspended",
            EntityStatus::Unknown => "unknown",
        }
    }

    /// Подпись для UI
    pub fn label(&self) -> &'static str {
        match self {
            EntityStatus::Active => "Activo",
            EntityStatus::Inactive => "Inactivo",
            EntityStatus::Suspended => "Suspendido",
            EntityStatus::Unknown => "Desconocido",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EntityStatus::Active),
            "inactive" => Some(EntityStatus::Inactive),
            "suspended" => Some(EntityStatus::Suspended),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_does_not_fail() {
        let s: EntityStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(s, EntityStatus::Unknown);
        let s: EntityStatus = serde_json::from_str("\"suspended\"").unwrap();
        assert_eq!(s, EntityStatus::Suspended);
    }

    #[test]
    fn test_round_trip_str() {
        for s in EntityStatus::ALL {
            assert_eq!(EntityStatus::from_str_opt(s.as_str()), Some(s));
        }
        assert_eq!(EntityStatus::from_str_opt("all"), None);
    }
}
