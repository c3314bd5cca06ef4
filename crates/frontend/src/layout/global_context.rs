use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Разделы консоли
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Companies,
    Contractors,
    Forms,
    Templates,
    InvitationCodes,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Companies,
        Section::Contractors,
        Section::Forms,
        Section::Templates,
        Section::InvitationCodes,
    ];

    /// Ключ раздела в `?active=`
    pub fn key(&self) -> &'static str {
        match self {
            Section::Companies => "companies",
            Section::Contractors => "contractors",
            Section::Forms => "forms",
            Section::Templates => "templates",
            Section::InvitationCodes => "invitations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Companies => "Empresas",
            Section::Contractors => "Contratistas",
            Section::Forms => "Formularios",
            Section::Templates => "Plantillas",
            Section::InvitationCodes => "Códigos de invitación",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Section from a query string like `?active=forms`
pub fn section_from_search(search: &str) -> Option<Section> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| Section::from_key(key))
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Section>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Section::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Активный раздел живёт в `?active=`, чтобы переживать перезагрузку
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(section) = section_from_search(&search) {
            self.active.set(section);
        }

        let active = self.active;
        Effect::new(move |_| {
            let section = active.get();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active", section.key())])).unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open(&self, section: Section) {
        log::debug!("Open section: {}", section.key());
        self.active.set(section);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys() {
        for section in Section::ALL {
            assert_eq!(Section::from_key(section.key()), Some(section));
        }
        assert_eq!(Section::from_key("dashboards"), None);
    }

    #[test]
    fn test_section_from_search() {
        assert_eq!(section_from_search("?active=invitations"), Some(Section::InvitationCodes));
        assert_eq!(section_from_search("?active=unknown"), None);
        assert_eq!(section_from_search(""), None);
    }
}
