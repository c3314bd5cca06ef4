use crate::shared::icons::icon;
use contracts::shared::api::ExportFormat;
use leptos::prelude::*;

/// Кнопки выгрузки CSV/Excel с текущими фильтрами
#[component]
pub fn ExportButtons(
    on_export: Callback<ExportFormat>,
    #[prop(into)]
    busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="button-group">
            <button
                class="button button--secondary"
                disabled=move || busy.get()
                on:click=move |_| on_export.run(ExportFormat::Csv)
            >
                {icon("download")}
                " CSV"
            </button>
            <button
                class="button button--secondary"
                disabled=move || busy.get()
                on:click=move |_| on_export.run(ExportFormat::Excel)
            >
                {icon("download")}
                " Excel"
            </button>
        </div>
    }
}
