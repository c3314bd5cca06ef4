use contracts::domain::a001_company::aggregate::Company;
use contracts::shared::api::ExportFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{list_config, stats_config};
use crate::domain::a001_company::api::{delete_company, export_companies, fetch_companies, INDUSTRY, STATUS};
use crate::domain::a001_company::ui::details::CompanyDetails;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::export_buttons::ExportButtons;
use crate::shared::components::filter_panel::{distinct_options, status_options, FilterPanel, SelectFilter};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{format_thousands, StatCard, StatTone};
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{confirm, highlight_matches, SearchInput};
use crate::shared::list_view::stats::aggregate;
use crate::shared::list_view::{use_list_view, ListController};
use crate::shared::date_utils::{format_datetime, today};

#[component]
#[allow(non_snake_case)]
pub fn CompanyList() -> impl IntoView {
    let cfg = config();
    let handle = use_list_view(
        ListController::new(list_config(), cfg.list.page_size),
        cfg.list.debounce_ms,
        fetch_companies,
    );
    let stats_cfg = stats_config(cfg.stats.expiring_window_days);
    // сервер отдаёт страницу: статистика по статусам/отраслям считается по ней
    let stats = Memo::new(move |_| handle.items.with(|items| aggregate(items, &stats_cfg, today())));
    let is_filter_expanded = RwSignal::new(false);
    let exporting = RwSignal::new(false);
    // None: диалог закрыт, Some(None): новая компания
    let details = RwSignal::new(None::<Option<String>>);

    let industries = Memo::new(move |_| {
        handle
            .items
            .with(|items| distinct_options(items.iter().filter_map(|c| c.industry.as_deref())))
    });

    let delete_row = move |company: Company| {
        if !confirm(&format!("¿Eliminar la empresa \"{}\"?", company.name)) {
            return;
        }
        spawn_local(async move {
            match delete_company(&company.id).await {
                Ok(()) => {
                    log::info!("Company {} deleted", company.id);
                    handle.remove_local(&company.id);
                }
                Err(e) => handle.error.set(Some(e)),
            }
        });
    };

    let on_export = Callback::new(move |format: ExportFormat| {
        let filter = handle.controller.with_untracked(|c| c.filter.clone());
        exporting.set(true);
        spawn_local(async move {
            if let Err(e) = export_companies(&filter, format).await {
                handle.error.set(Some(e));
            }
            exporting.set(false);
        });
    });

    let on_saved = Callback::new(move |_: Company| {
        details.set(None);
        handle.reload();
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
                    <h1 class="header__title">{icon("companies")}" Empresas"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput value=handle.search_input placeholder="Buscar por nombre, RUT o email" />
                    <button class="button button--primary" on:click=move |_| details.set(Some(None))>
                        {icon("plus")}
                        " Nueva empresa"
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
                    label="Total empresas".to_string()
                    icon_name="companies"
                    value=Signal::derive(move || format_thousands(pagination.get().total_count()))
                />
                <StatCard
                    label="Activas".to_string()
                    icon_name="check"
                    tone=StatTone::Good
                    value=Signal::derive(move || stats.with(|s| format!("{}%", s.status_percentage("active"))))
                    subtitle=Signal::derive(move || Some("en esta página".to_string()))
                />
                <StatCard
                    label="Por industria".to_string()
                    icon_name="filter"
                    value=Signal::derive(move || stats.with(|s| s.by_group.len().to_string()))
                    subtitle=Signal::derive(move || {
                        stats.with(|s| {
                            let top = s
                                .top_groups(3)
                                .into_iter()
                                .map(|(g, n)| format!("{} ({})", g, n))
                                .collect::<Vec<_>>();
                            (!top.is_empty()).then(|| top.join(", "))
                        })
                    })
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
                    label="Industria"
                    value=Signal::derive(move || handle.filter().with(|f| f.equals_value(INDUSTRY).to_string()))
                    options=industries
                    on_change=Callback::new(move |v: String| handle.set_equals(INDUSTRY, &v))
                />
            </FilterPanel>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Nombre"</th>
                            <th class="table__header-cell">"RUT"</th>
                            <th class="table__header-cell">"Industria"</th>
                            <th class="table__header-cell">"Email"</th>
                            <th class="table__header-cell">"Estado"</th>
                            <th class="table__header-cell">"Creada"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let search = handle.controller.with(|c| c.filter.search.clone());
                            let label_cfg = handle.controller.with_untracked(|c| c.config.clone());
                            handle.view.with(|v| v.page.page_items.clone()).into_iter().map(|company| {
                                let id_for_edit = company.id.clone();
                                let for_delete = company.clone();
                                view! {
                                    <tr class="table__row" on:click=move |_| details.set(Some(Some(id_for_edit.clone())))>
                                        <td class="table__cell">{highlight_matches(label_cfg.label(&company), &search)}</td>
                                        <td class="table__cell">{highlight_matches(&company.tax_id, &search)}</td>
                                        <td class="table__cell">{company.industry.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td class="table__cell">{company.email.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td class="table__cell">
                                            <span class=format!("badge badge--{}", company.status.as_str())>{company.status.label()}</span>
                                        </td>
                                        <td class="table__cell">{format_datetime(company.metadata.created_at)}</td>
                                        <td class="table__cell">
                                            <button
                                                class="button button--icon"
                                                title="Eliminar"
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    delete_row(for_delete.clone());
                                                }
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
                {move || (handle.loading.get()).then(|| view! { <div class="table__loading">"Cargando..."</div> })}
                {move || {
                    let empty = !handle.loading.get() && handle.view.with(|v| v.page.page_items.is_empty());
                    empty.then(|| view! { <div class="table__empty">"No se encontraron empresas"</div> })
                }}
            </div>

            <PaginationControls
                state=pagination
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                page_size_options=page_size_options_bottom
            />

            {move || details.get().map(|id| view! {
                <CompanyDetails
                    id=id
                    on_saved=on_saved
                    on_close=Callback::new(move |_| details.set(None))
                />
            })}
        </div>
    }
}
