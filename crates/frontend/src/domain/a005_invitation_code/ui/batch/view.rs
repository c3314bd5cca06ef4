use contracts::domain::a005_invitation_code::aggregate::{BatchAction, BatchScheduleResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::state::{available_actions, build_request, status_after};
use crate::domain::a005_invitation_code::api::{batch_action, schedule_batch};
use crate::domain::a005_invitation_code::csv_import::{
    parse_invitations, template_csv, ImportPreview, TEMPLATE_FILENAME,
};
use crate::shared::api_error::ApiError;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::modal::Modal;
use crate::shared::date_utils::parse_datetime_input;
use crate::shared::export::download_text;
use crate::shared::icons::icon;
use crate::shared::list_utils::confirm;

/// Сколько строк файла показывать в превью
const PREVIEW_ROWS: usize = 10;

async fn read_file_text(file: web_sys::File) -> Result<String, String> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("No se pudo leer el archivo: {:?}", e))?;
    value
        .as_string()
        .ok_or_else(|| "El archivo no contiene texto".to_string())
}

fn action_icon(action: BatchAction) -> &'static str {
    match action {
        BatchAction::Execute => "play",
        BatchAction::Pause => "pause",
        BatchAction::Cancel => "cancel",
    }
}

fn preview_view(preview: &ImportPreview) -> AnyView {
    let records = preview
        .records
        .iter()
        .take(PREVIEW_ROWS)
        .cloned()
        .collect::<Vec<_>>();
    let hidden = preview.records.len().saturating_sub(PREVIEW_ROWS);
    let errors = preview.errors.clone();
    view! {
        <div class="batch-preview">
            <div class="batch-preview__summary">
                {format!("{} invitaciones válidas", preview.records.len())}
                {(!errors.is_empty()).then(|| format!(", {} filas con errores", errors.len()))}
            </div>
            {(!errors.is_empty()).then(|| view! {
                <ul class="batch-preview__errors">
                    {errors.into_iter().map(|e| view! { <li>{e.to_string()}</li> }).collect_view()}
                </ul>
            })}
            <table class="table__data">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell">"Email"</th>
                        <th class="table__header-cell">"Nombre"</th>
                        <th class="table__header-cell">"Empresa"</th>
                        <th class="table__header-cell">"Rol"</th>
                    </tr>
                </thead>
                <tbody>
                    {records.into_iter().map(|r| view! {
                        <tr class="table__row">
                            <td class="table__cell">{r.email}</td>
                            <td class="table__cell">{r.name.unwrap_or_else(|| "-".to_string())}</td>
                            <td class="table__cell">{r.company_id.unwrap_or_else(|| "-".to_string())}</td>
                            <td class="table__cell">{r.role.unwrap_or_else(|| "-".to_string())}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            {(hidden > 0).then(|| view! { <div class="batch-preview__more">{format!("… y {} más", hidden)}</div> })}
        </div>
    }
    .into_any()
}

/// Массовое приглашение: CSV -> превью -> планирование -> управление пакетом
#[component]
#[allow(non_snake_case)]
pub fn MassInvitationDialog(
    on_close: Callback<()>,
    /// Пакет создан или сменил состояние: список кодов стоит перечитать
    on_changed: Callback<()>,
) -> impl IntoView {
    let file_name = RwSignal::new(None::<String>);
    let preview = RwSignal::new(None::<Result<ImportPreview, String>>);
    let scheduled_at = RwSignal::new(String::new());
    let send_email = RwSignal::new(true);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<ApiError>);
    let batch = RwSignal::new(None::<BatchScheduleResponse>);

    let ready = Memo::new(move |_| {
        preview.with(|p| matches!(p, Some(Ok(p)) if p.is_ready()))
    });

    let on_file = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            return;
        };
        file_name.set(Some(file.name()));
        spawn_local(async move {
            let parsed = match read_file_text(file).await {
                Ok(text) => parse_invitations(&text),
                Err(e) => Err(e),
            };
            if let Err(e) = &parsed {
                log::warn!("Invitation file rejected: {}", e);
            }
            preview.set(Some(parsed));
        });
    };

    let download_template = move |_| {
        if let Err(e) = template_csv().and_then(|text| download_text(&text, TEMPLATE_FILENAME)) {
            log::error!("Template download failed: {}", e);
        }
    };

    let schedule = move |_| {
        let when = parse_datetime_input(&scheduled_at.get_untracked());
        let request = preview.with_untracked(|p| match p {
            Some(Ok(p)) => build_request(p, when, send_email.get_untracked()),
            _ => None,
        });
        let Some(request) = request else {
            return;
        };
        busy.set(true);
        spawn_local(async move {
            match schedule_batch(&request).await {
                Ok(response) => {
                    batch.set(Some(response));
                    error.set(None);
                    on_changed.run(());
                }
                Err(e) => error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    let run_action = move |action: BatchAction| {
        let Some(batch_id) = batch.with_untracked(|b| b.as_ref().map(|b| b.batch_id.clone())) else {
            return;
        };
        if action == BatchAction::Cancel
            && !confirm("¿Cancelar el envío de las invitaciones pendientes?")
        {
            return;
        }
        busy.set(true);
        spawn_local(async move {
            match batch_action(&batch_id, action).await {
                Ok(()) => {
                    batch.update(|b| {
                        if let Some(b) = b {
                            b.status = status_after(action);
                        }
                    });
                    on_changed.run(());
                }
                Err(e) => error.set(Some(e)),
            }
            busy.set(false);
        });
    };

    view! {
        <Modal title="Invitación masiva".to_string() on_close=on_close>
            <div class="batch-dialog">
                <ErrorBanner error=error />
                {move || match batch.get() {
                    None => view! {
                        <div class="batch-dialog__upload">
                            <div class="batch-dialog__row">
                                <label class="button button--secondary">
                                    {icon("upload")}
                                    " Seleccionar CSV"
                                    <input type="file" accept=".csv,text/csv" class="visually-hidden" on:change=on_file />
                                </label>
                                <span class="batch-dialog__file">
                                    {move || file_name.get().unwrap_or_else(|| "Ningún archivo seleccionado".to_string())}
                                </span>
                                <button class="button button--link" on:click=download_template>
                                    {icon("download")}
                                    " Descargar plantilla"
                                </button>
                            </div>
                            {move || preview.with(|p| match p {
                                None => view! {
                                    <p class="batch-dialog__hint">
                                        "Columnas: email (obligatoria), name, companyId, role"
                                    </p>
                                }.into_any(),
                                Some(Err(message)) => view! { <div class="error-message">{message.clone()}</div> }.into_any(),
                                Some(Ok(p)) => preview_view(p),
                            })}
                            <div class="batch-dialog__row">
                                <label class="filter-field">
                                    <span class="filter-field__label">"Programar para"</span>
                                    <input
                                        type="datetime-local"
                                        class="filter-field__input"
                                        prop:value=scheduled_at
                                        on:input=move |ev| scheduled_at.set(event_target_value(&ev))
                                    />
                                </label>
                                <label class="checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=send_email
                                        on:change=move |ev| send_email.set(event_target_checked(&ev))
                                    />
                                    " Enviar correo con el código"
                                </label>
                            </div>
                            <p class="batch-dialog__hint">"Sin fecha, el envío queda programado para ahora."</p>
                            <button
                                class="button button--primary"
                                disabled=move || !ready.get() || busy.get()
                                on:click=schedule
                            >
                                {icon("clock")}
                                {move || if busy.get() { " Programando..." } else { " Programar envío" }}
                            </button>
                        </div>
                    }.into_any(),
                    Some(response) => view! {
                        <div class="batch-dialog__status">
                            <div class="batch-dialog__row">
                                <span>"Lote: "<strong>{response.batch_id.clone()}</strong></span>
                                <span>{format!("{} invitaciones", response.total_invitations)}</span>
                                <span class="badge">{response.status.label()}</span>
                            </div>
                            <div class="batch-dialog__row">
                                {available_actions(response.status).iter().copied().map(|action| view! {
                                    <button
                                        class="button button--secondary"
                                        disabled=move || busy.get()
                                        on:click=move |_| run_action(action)
                                    >
                                        {icon(action_icon(action))}
                                        {format!(" {}", action.label())}
                                    </button>
                                }).collect_view()}
                                <button class="button button--secondary" on:click=move |_| on_close.run(())>
                                    "Cerrar"
                                </button>
                            </div>
                        </div>
                    }.into_any(),
                }}
            </div>
        </Modal>
    }
}
