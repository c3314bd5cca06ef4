use contracts::domain::a001_company::aggregate::{Company, CompanyDto};
use contracts::domain::common::ValidationError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_company::api::{fetch_company, save_company};
use crate::shared::api_error::ApiError;

/// Форма хранится прямо как CompanyDto, поля правятся через form.update()
#[derive(Clone, Copy)]
pub struct CompanyDetailsViewModel {
    pub form: RwSignal<CompanyDto>,
    /// Ошибка сервера/сети
    pub error: RwSignal<Option<String>>,
    /// Ошибка валидации конкретного поля
    pub field_error: RwSignal<Option<ValidationError>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl CompanyDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(CompanyDto::default()),
            error: RwSignal::new(None),
            field_error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    pub fn load(&self, id: String) {
        let vm = *self;
        vm.loading.set(true);
        spawn_local(async move {
            match fetch_company(&id).await {
                Ok(company) => vm.form.set(CompanyDto::from(&company)),
                Err(e) => vm.error.set(Some(e.user_message())),
            }
            vm.loading.set(false);
        });
    }

    /// Проверка на клиенте; невалидная форма на сервер не уходит
    pub fn save_command(&self, id: Option<String>, on_saved: Callback<Company>) {
        let dto = self.form.get_untracked();
        if let Err(e) = dto.validate() {
            self.field_error.set(Some(e));
            return;
        }
        self.field_error.set(None);
        self.error.set(None);
        self.saving.set(true);

        let vm = *self;
        spawn_local(async move {
            match save_company(id.as_deref(), &dto).await {
                Ok(company) => {
                    log::info!("Company {} saved", company.id);
                    on_saved.run(company);
                }
                Err(ApiError::Validation(e)) => vm.field_error.set(Some(e)),
                Err(e) => vm.error.set(Some(e.user_message())),
            }
            vm.saving.set(false);
        });
    }
}

impl Default for CompanyDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
