use contracts::domain::a002_contractor::aggregate::{Contractor, ContractorDto};
use contracts::domain::common::ValidationError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_contractor::api::{fetch_contractor, save_contractor};
use crate::shared::api_error::ApiError;

#[derive(Clone, Copy)]
pub struct ContractorDetailsViewModel {
    pub form: RwSignal<ContractorDto>,
    pub error: RwSignal<Option<String>>,
    pub field_error: RwSignal<Option<ValidationError>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
}

impl ContractorDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ContractorDto::default()),
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
            match fetch_contractor(&id).await {
                Ok(contractor) => vm.form.set(ContractorDto::from(&contractor)),
                Err(e) => vm.error.set(Some(e.user_message())),
            }
            vm.loading.set(false);
        });
    }

    pub fn save_command(&self, id: Option<String>, on_saved: Callback<Contractor>) {
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
            match save_contractor(id.as_deref(), &dto).await {
                Ok(contractor) => {
                    log::info!("Contractor {} saved", contractor.id);
                    on_saved.run(contractor);
                }
                Err(ApiError::Validation(e)) => vm.field_error.set(Some(e)),
                Err(e) => vm.error.set(Some(e.user_message())),
            }
            vm.saving.set(false);
        });
    }
}

impl Default for ContractorDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
