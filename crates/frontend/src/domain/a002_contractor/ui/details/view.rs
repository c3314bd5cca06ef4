use contracts::domain::a002_contractor::aggregate::Contractor;
use contracts::domain::common::EntityStatus;
use leptos::prelude::*;

use super::view_model::ContractorDetailsViewModel;
use crate::shared::components::modal::{FieldError, Modal};
use crate::shared::date_utils::{date_input_value, parse_date_input};
use crate::shared::icons::icon;
use crate::shared::list_utils::non_empty;

#[component]
pub fn ContractorDetails(
    /// None = новый контрагент
    id: Option<String>,
    /// (id, название) компаний для выбора
    #[prop(into)]
    companies: Signal<Vec<(String, String)>>,
    on_saved: Callback<Contractor>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ContractorDetailsViewModel::new();
    if let Some(id) = id.clone() {
        vm.load(id);
    }
    let title = if id.is_some() { "Editar contratista" } else { "Nuevo contratista" };
    let field_error = Signal::derive(move || vm.field_error.get());

    view! {
        <Modal
            title=title.to_string()
            on_close=on_close
            action_buttons=view! {
                <button
                    class="button button--primary"
                    disabled=move || vm.saving.get() || vm.loading.get()
                    on:click=move |_| vm.save_command(id.clone(), on_saved)
                >
                    {icon("check")}
                    {move || if vm.saving.get() { " Guardando..." } else { " Guardar" }}
                </button>
            }.into_any()
        >
            {move || vm.error.get().map(|e| view! { <div class="warning-box text-error">{e}</div> })}

            <div class="detail-form">
                <div class="form__group">
                    <label class="form__label" for="contractor-name">"Nombre"</label>
                    <input
                        class="form__input"
                        type="text"
                        id="contractor-name"
                        prop:value=move || vm.form.get().name
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                    />
                    <FieldError field="name" error=field_error />
                </div>

                <div class="form__group">
                    <label class="form__label" for="contractor-rut">"RUT"</label>
                    <input
                        class="form__input"
                        type="text"
                        id="contractor-rut"
                        placeholder="12.345.678-9"
                        prop:value=move || vm.form.get().rut.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.rut = non_empty(event_target_value(&ev)))
                    />
                </div>

                <div class="form__group">
                    <label class="form__label" for="contractor-email">"Email"</label>
                    <input
                        class="form__input"
                        type="email"
                        id="contractor-email"
                        prop:value=move || vm.form.get().email.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.email = non_empty(event_target_value(&ev)))
                    />
                    <FieldError field="email" error=field_error />
                </div>

                <div class="form__group">
                    <label class="form__label" for="contractor-company">"Empresa"</label>
                    <select
                        class="form__select"
                        id="contractor-company"
                        prop:value=move || vm.form.get().company_id.unwrap_or_default()
                        on:change=move |ev| vm.form.update(|f| f.company_id = non_empty(event_target_value(&ev)))
                    >
                        <option value="">"Sin empresa"</option>
                        {move || companies.get().into_iter().map(|(id, name)| view! {
                            <option value=id>{name}</option>
                        }).collect_view()}
                    </select>
                    <FieldError field="companyId" error=field_error />
                </div>

                <div class="form__group">
                    <label class="form__label" for="contractor-status">"Estado"</label>
                    <select
                        class="form__select"
                        id="contractor-status"
                        prop:value=move || vm.form.get().status.unwrap_or(EntityStatus::Active).as_str()
                        on:change=move |ev| {
                            let status = EntityStatus::from_str_opt(&event_target_value(&ev));
                            vm.form.update(|f| f.status = status);
                        }
                    >
                        {EntityStatus::ALL.iter().map(|s| view! {
                            <option value=s.as_str()>{s.label()}</option>
                        }).collect_view()}
                    </select>
                </div>

                <div class="form__group">
                    <label class="form__label" for="contractor-expiry">"Vencimiento de documentos"</label>
                    <input
                        class="form__input"
                        type="date"
                        id="contractor-expiry"
                        prop:value=move || date_input_value(vm.form.get().document_expires_at)
                        on:change=move |ev| {
                            let date = parse_date_input(&event_target_value(&ev));
                            vm.form.update(|f| f.document_expires_at = date);
                        }
                    />
                </div>
            </div>
        </Modal>
    }
}
