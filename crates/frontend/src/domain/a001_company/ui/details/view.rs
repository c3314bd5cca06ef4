use contracts::domain::a001_company::aggregate::Company;
use contracts::domain::common::EntityStatus;
use leptos::prelude::*;

use super::view_model::CompanyDetailsViewModel;
use crate::shared::components::modal::{FieldError, Modal};
use crate::shared::icons::icon;
use crate::shared::list_utils::non_empty;

#[component]
pub fn CompanyDetails(
    /// None = новая компания
    id: Option<String>,
    on_saved: Callback<Company>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = CompanyDetailsViewModel::new();
    if let Some(id) = id.clone() {
        vm.load(id);
    }
    let title = if id.is_some() { "Editar empresa" } else { "Nueva empresa" };
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
                    <label class="form__label" for="company-name">"Nombre"</label>
                    <input
                        class="form__input"
                        type="text"
                        id="company-name"
                        prop:value=move || vm.form.get().name
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                    />
                    <FieldError field="name" error=field_error />
                </div>

                <div class="form__group">
                    <label class="form__label" for="company-tax-id">"RUT"</label>
                    <input
                        class="form__input"
                        type="text"
                        id="company-tax-id"
                        placeholder="76.123.456-7"
                        prop:value=move || vm.form.get().tax_id
                        on:input=move |ev| vm.form.update(|f| f.tax_id = event_target_value(&ev))
                    />
                    <FieldError field="taxId" error=field_error />
                </div>

                <div class="form__group">
                    <label class="form__label" for="company-industry">"Industria"</label>
                    <input
                        class="form__input"
                        type="text"
                        id="company-industry"
                        prop:value=move || vm.form.get().industry.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.industry = non_empty(event_target_value(&ev)))
                    />
                </div>

                <div class="form__group">
                    <label class="form__label" for="company-email">"Email"</label>
                    <input
                        class="form__input"
                        type="email"
                        id="company-email"
                        prop:value=move || vm.form.get().email.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.email = non_empty(event_target_value(&ev)))
                    />
                    <FieldError field="email" error=field_error />
                </div>

                <div class="form__group">
                    <label class="form__label" for="company-phone">"Teléfono"</label>
                    <input
                        class="form__input"
                        type="tel"
                        id="company-phone"
                        prop:value=move || vm.form.get().phone.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.phone = non_empty(event_target_value(&ev)))
                    />
                </div>

                <div class="form__group">
                    <label class="form__label" for="company-status">"Estado"</label>
                    <select
                        class="form__select"
                        id="company-status"
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
            </div>
        </Modal>
    }
}
