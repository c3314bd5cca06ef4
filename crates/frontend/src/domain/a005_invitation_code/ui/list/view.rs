use contracts::domain::a005_invitation_code::aggregate::{InvitationCode, InvitationStatus};
use contracts::shared::api::ExportFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{list_config, stats_config, status_options};
use crate::domain::a001_company::api::fetch_companies;
use crate::domain::a005_invitation_code::api::{delete_code, export_codes, fetch_codes, COMPANY, STATUS};
use crate::domain::a005_invitation_code::ui::batch::MassInvitationDialog;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::export_buttons::ExportButtons;
use crate::shared::components::filter_panel::{FilterPanel, SelectFilter};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{format_thousands, StatCard, StatTone};
use crate::shared::config::config;
use crate::shared::date_utils::{format_datetime, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::{confirm, highlight_matches, SearchInput};
use crate::shared::list_view::stats::aggregate;
use crate::shared::list_view::{use_list_view, FilterState, ListController, PaginationState};

fn status_badge(status: InvitationStatus) -> &'static str {
    match status {
        InvitationStatus::Pending => "badge badge--warning",
        InvitationStatus::Used => "badge badge--active",
        InvitationStatus::Expired | InvitationStatus::Revoked => "badge badge--inactive",
        InvitationStatus::Unknown => "badge",
    }
}

#[component]
#[allow(non_snake_case)]
pub fn InvitationCodeList() -> impl IntoView {
    let cfg = config();
    let handle = use_list_view(
        ListController::new(list_config(), cfg.list.page_size),
        cfg.list.debounce_ms,
        fetch_codes,
    );
    let window_days = cfg.stats.expiring_window_days;
    let stats_cfg = stats_config(window_days);
    let stats = Memo::new(move |_| handle.items.with(|items| aggregate(items, &stats_cfg, today())));
    let is_filter_expanded = RwSignal::new(false);
    let exporting = RwSignal::new(false);
    let batch_open = RwSignal::new(false);

    let companies = RwSignal::new(Vec::<(String, String)>::new());
    let catalog_cap = cfg.list.catalog_cap;
    spawn_local(async move {
        match fetch_companies(FilterState::default(), PaginationState::new(catalog_cap)).await {
            Ok(fetched) => companies.set(
                fetched
                    .items
                    .into_iter()
                    .map(|c| (c.id, c.name))
                    .collect(),
            ),
            Err(e) => log::warn!("Company options not loaded: {}", e),
        }
    });

    let delete_row = move |code: InvitationCode| {
        if !confirm(&format!("¿Eliminar el código {}?", code.code)) {
            return;
        }
        spawn_local(async move {
            match delete_code(&code.id).await {
                Ok(()) => {
                    log::info!("Invitation code {} deleted", code.id);
                    handle.remove_local(&code.id);
                }
                Err(e) => handle.error.set(Some(e)),
            }
        });
    };

    let on_export = Callback::new(move |format: ExportFormat| {
        let filter = handle.controller.with_untracked(|c| c.filter.clone());
        exporting.set(true);
        spawn_local(async move {
            if let Err(e) = export_codes(&filter, format).await {
                handle.error.set(Some(e));
            }
            exporting.set(false);
        });
    });

    let pagination = handle.pagination();
    let on_page_change = Callback::new(move |page| handle.set_page(page));
    let on_page_size_change = Callback::new(move |size| handle.set_page_size(size));
    let page_size_options = cfg.list.page_size_options.clone();
    let page_size_options_bottom = page_size_options.clone();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{icon("invitations")}" Códigos de invitación"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput value=handle.search_input placeholder="Buscar por código, nombre, email o empresa" />
                    <button class="button button--primary" on:click=move |_| batch_open.set(true)>
                        {icon("upload")}
                        " Invitación masiva"
                    </button>
                    <button class="button button--secondary" on:click=move |_| handle.reload()>
                        {icon("refresh")}
                        " Actualizar"
                    </button>
                </div>
            </div>

            <ErrorBanner error=handle.error on_retry=Callback::new(move |_| handle.reload()) />

            <div class="stat-cards">
                <StatCard
                    label="Total códigos".to_string()
                    icon_name="invitations"
                    value=Signal::derive(move || format_thousands(pagination.get().total_count()))
                />
                <StatCard
                    label="Pendientes".to_string()
                    icon_name="clock"
                    value=Signal::derive(move || stats.with(|s| s.status_count("pending").to_string()))
                    subtitle=Signal::derive(move || {
                        stats.with(|s| Some(format!("{}% en esta página", s.status_percentage("pending"))))
                    })
                />
                <StatCard
                    label="Por expirar".to_string()
                    icon_name="alert"
                    tone=Signal::derive(move || {
                        if stats.with(|s| s.expiring_soon) > 0 { StatTone::Warning } else { StatTone::Neutral }
                    })
                    value=Signal::derive(move || stats.with(|s| s.expiring_soon.to_string()))
                    subtitle=Signal::derive(move || Some(format!("próximos {} días", window_days)))
                />
                <StatCard
                    label="Utilizados".to_string()
                    icon_name="check"
                    tone=StatTone::Good
                    value=Signal::derive(move || stats.with(|s| s.status_count("used").to_string()))
                />
            </div>

            <FilterPanel
                is_expanded=is_filter_expanded
                active_filters_count=Signal::derive(move || handle.filter().with(|f| f.active_count()))
                on_clear=Callback::new(move |_| handle.clear_filters())
                pagination_controls=view! {
                    <PaginationControls
                        state=pagination
                        on_page_change=on_page_change
                        on_page_size_change=on_page_size_change
                        page_size_options=page_size_options
                    />
                }.into_any()
                actions=view! { <ExportButtons on_export=on_export busy=exporting /> }.into_any()
            >
                <SelectFilter
                    label="Estado"
                    value=Signal::derive(move || handle.filter().with(|f| f.equals_value(STATUS).to_string()))
                    options=status_options()
                    on_change=Callback::new(move |v: String| handle.set_equals(STATUS, &v))
                />
                <SelectFilter
                    label="Empresa"
                    value=Signal::derive(move || handle.filter().with(|f| f.equals_value(COMPANY).to_string()))
                    options=companies
                    on_change=Callback::new(move |v: String| handle.set_equals(COMPANY, &v))
                />
            </FilterPanel>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Código"</th>
                            <th class="table__header-cell">"Nombre"</th>
                            <th class="table__header-cell">"Email"</th>
                            <th class="table__header-cell">"Empresa"</th>
                            <th class="table__header-cell">"Estado"</th>
                            <th class="table__header-cell">"Expira"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let search = handle.controller.with(|c| c.filter.search.clone());
                            let label_cfg = handle.controller.with_untracked(|c| c.config.clone());
                            handle.view.with(|v| v.page.page_items.clone()).into_iter().map(|code| {
                                let for_delete = code.clone();
                                let company = code.company.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| "-".to_string());
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell table__cell--mono">{highlight_matches(&code.code, &search)}</td>
                                        <td class="table__cell">{highlight_matches(label_cfg.label(&code), &search)}</td>
                                        <td class="table__cell">{highlight_matches(code.email.as_deref().unwrap_or("-"), &search)}</td>
                                        <td class="table__cell">{highlight_matches(&company, &search)}</td>
                                        <td class="table__cell">
                                            <span class=status_badge(code.status)>{code.status.label()}</span>
                                        </td>
                                        <td class="table__cell">
                                            {code.expires_at.map(format_datetime).unwrap_or_else(|| "-".to_string())}
                                        </td>
                                        <td class="table__cell">
                                            <button
                                                class="button button--icon"
                                                title="Eliminar"
                                                on:click=move |_| delete_row(for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
                {move || handle.loading.get().then(|| view! { <div class="table__loading">"Cargando..."</div> })}
                {move || {
                    let empty = !handle.loading.get() && handle.view.with(|v| v.page.page_items.is_empty());
                    empty.then(|| view! { <div class="table__empty">"No se encontraron códigos"</div> })
                }}
            </div>

            <PaginationControls
                state=pagination
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                page_size_options=page_size_options_bottom
            />

            {move || batch_open.get().then(|| view! {
                <MassInvitationDialog
                    on_close=Callback::new(move |_| batch_open.set(false))
                    on_changed=Callback::new(move |_| handle.reload())
                />
            })}
        </div>
    }
}
