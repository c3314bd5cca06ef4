use contracts::domain::a002_contractor::aggregate::Contractor;
use contracts::shared::api::ExportFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{list_config, stats_config};
use crate::domain::a001_company::api::fetch_companies;
use crate::domain::a002_contractor::api::{delete_contractor, export_contractors, fetch_contractors, COMPANY, STATUS};
use crate::domain::a002_contractor::ui::details::ContractorDetails;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::export_buttons::ExportButtons;
use crate::shared::components::filter_panel::{status_options, FilterPanel, SelectFilter};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{format_thousands, StatCard, StatTone};
use crate::shared::config::config;
use crate::shared::date_utils::{date_input_value, format_date_opt, parse_date_input, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::{confirm, highlight_matches, SearchInput};
use crate::shared::list_view::stats::{aggregate, expiry_horizon};
use crate::shared::list_view::{use_list_view, FilterState, ListController, PaginationState};

/// Документы, истекающие в окне, подсвечиваются в таблице
fn expiry_class(contractor: &Contractor, window_days: i64) -> &'static str {
    let today = today();
    match contractor.document_expires_at {
        Some(date) if date < today => "table__cell text-error",
        Some(date) if date <= expiry_horizon(today, window_days) => "table__cell text-warning",
        _ => "table__cell",
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ContractorList() -> impl IntoView {
    let cfg = config();
    let handle = use_list_view(
        ListController::new(list_config(), cfg.list.page_size),
        cfg.list.debounce_ms,
        fetch_contractors,
    );
    let window_days = cfg.stats.expiring_window_days;
    let stats_cfg = stats_config(window_days);
    let stats = Memo::new(move |_| handle.items.with(|items| aggregate(items, &stats_cfg, today())));
    let is_filter_expanded = RwSignal::new(false);
    let exporting = RwSignal::new(false);
    // None: диалог закрыт, Some(None): новый контрагент
    let details = RwSignal::new(None::<Option<String>>);

    // Справочник компаний для фильтра и формы
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

    let delete_row = move |contractor: Contractor| {
        if !confirm(&format!("¿Eliminar a \"{}\"?", contractor.name)) {
            return;
        }
        spawn_local(async move {
            match delete_contractor(&contractor.id).await {
                Ok(()) => {
                    log::info!("Contractor {} deleted", contractor.id);
                    handle.remove_local(&contractor.id);
                }
                Err(e) => handle.error.set(Some(e)),
            }
        });
    };

    let on_export = Callback::new(move |format: ExportFormat| {
        let filter = handle.controller.with_untracked(|c| c.filter.clone());
        exporting.set(true);
        spawn_local(async move {
            if let Err(e) = export_contractors(&filter, format).await {
                handle.error.set(Some(e));
            }
            exporting.set(false);
        });
    });

    let on_saved = Callback::new(move |saved: Contractor| {
        let existed = details.get_untracked().flatten().is_some();
        details.set(None);
        if existed {
            handle.replace_local(saved);
        } else {
            handle.reload();
        }
    });

    let date_from = Signal::derive(move || handle.filter().with(|f| date_input_value(f.date_from)));
    let date_to = Signal::derive(move || handle.filter().with(|f| date_input_value(f.date_to)));

    let pagination = handle.pagination();
    let on_page_change = Callback::new(move |page| handle.set_page(page));
    let on_page_size_change = Callback::new(move |size| handle.set_page_size(size));
    let page_size_options = cfg.list.page_size_options.clone();
    let page_size_options_bottom = page_size_options.clone();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{icon("contractors")}" Contratistas"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput value=handle.search_input placeholder="Buscar por nombre, RUT, email o empresa" />
                    <button class="button button--primary" on:click=move |_| details.set(Some(None))>
                        {icon("plus")}
                        " Nuevo contratista"
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
                    label="Total contratistas".to_string()
                    icon_name="contractors"
                    value=Signal::derive(move || format_thousands(pagination.get().total_count()))
                    subtitle=Signal::derive(move || {
                        stats.with(|s| Some(format!("{}% activos en esta página", s.status_percentage("active"))))
                    })
                />
                <StatCard
                    label="Documentos por vencer".to_string()
                    icon_name="clock"
                    tone=Signal::derive(move || {
                        if stats.with(|s| s.expiring_soon) > 0 { StatTone::Warning } else { StatTone::Neutral }
                    })
                    value=Signal::derive(move || stats.with(|s| s.expiring_soon.to_string()))
                    subtitle=Signal::derive(move || Some(format!("próximos {} días", window_days)))
                />
                <StatCard
                    label="Documentos vencidos".to_string()
                    icon_name="alert"
                    tone=Signal::derive(move || {
                        if stats.with(|s| s.expired) > 0 { StatTone::Bad } else { StatTone::Neutral }
                    })
                    value=Signal::derive(move || stats.with(|s| s.expired.to_string()))
                />
                <StatCard
                    label="Cursos completados".to_string()
                    icon_name="check"
                    tone=StatTone::Good
                    value=Signal::derive(move || stats.with(|s| s.completed_nested.to_string()))
                    subtitle=Signal::derive(move || {
                        stats.with(|s| {
                            Some(match s.average_score {
                                Some(avg) => format!("Promedio: {}", avg),
                                None => "Sin calificaciones".to_string(),
                            })
                        })
                    })
                />
                <StatCard
                    label="Por empresa".to_string()
                    icon_name="companies"
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
                    label="Empresa"
                    value=Signal::derive(move || handle.filter().with(|f| f.equals_value(COMPANY).to_string()))
                    options=companies
                    on_change=Callback::new(move |v: String| handle.set_equals(COMPANY, &v))
                />
                <label class="filter-field">
                    <span class="filter-field__label">"Creado desde"</span>
                    <input
                        type="date"
                        class="filter-field__input"
                        prop:value=date_from
                        on:change=move |ev| {
                            let to = handle.controller.with_untracked(|c| c.filter.date_to);
                            handle.set_date_range(parse_date_input(&event_target_value(&ev)), to);
                        }
                    />
                </label>
                <label class="filter-field">
                    <span class="filter-field__label">"hasta"</span>
                    <input
                        type="date"
                        class="filter-field__input"
                        prop:value=date_to
                        on:change=move |ev| {
                            let from = handle.controller.with_untracked(|c| c.filter.date_from);
                            handle.set_date_range(from, parse_date_input(&event_target_value(&ev)));
                        }
                    />
                </label>
            </FilterPanel>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Nombre"</th>
                            <th class="table__header-cell">"RUT"</th>
                            <th class="table__header-cell">"Empresa"</th>
                            <th class="table__header-cell">"Email"</th>
                            <th class="table__header-cell">"Estado"</th>
                            <th class="table__header-cell">"Vencimiento documentos"</th>
                            <th class="table__header-cell">"Cursos"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let search = handle.controller.with(|c| c.filter.search.clone());
                            let label_cfg = handle.controller.with_untracked(|c| c.config.clone());
                            handle.view.with(|v| v.page.page_items.clone()).into_iter().map(|contractor| {
                                let id_for_edit = contractor.id.clone();
                                let for_delete = contractor.clone();
                                let courses = contractor
                                    .courses
                                    .as_ref()
                                    .map(|cs| format!("{}/{}", cs.iter().filter(|c| c.completed).count(), cs.len()))
                                    .unwrap_or_else(|| "-".to_string());
                                view! {
                                    <tr class="table__row" on:click=move |_| details.set(Some(Some(id_for_edit.clone())))>
                                        <td class="table__cell">{highlight_matches(label_cfg.label(&contractor), &search)}</td>
                                        <td class="table__cell">{highlight_matches(contractor.rut.as_deref().unwrap_or("-"), &search)}</td>
                                        <td class="table__cell">{highlight_matches(contractor.company_name().unwrap_or("-"), &search)}</td>
                                        <td class="table__cell">{highlight_matches(contractor.email.as_deref().unwrap_or("-"), &search)}</td>
                                        <td class="table__cell">
                                            <span class=format!("badge badge--{}", contractor.status.as_str())>{contractor.status.label()}</span>
                                        </td>
                                        <td class=expiry_class(&contractor, window_days)>{format_date_opt(contractor.document_expires_at)}</td>
                                        <td class="table__cell">{courses}</td>
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
                {move || handle.loading.get().then(|| view! { <div class="table__loading">"Cargando..."</div> })}
                {move || {
                    let empty = !handle.loading.get() && handle.view.with(|v| v.page.page_items.is_empty());
                    empty.then(|| view! { <div class="table__empty">"No se encontraron contratistas"</div> })
                }}
            </div>

            <PaginationControls
                state=pagination
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                page_size_options=page_size_options_bottom
            />

            {move || details.get().map(|id| view! {
                <ContractorDetails
                    id=id
                    companies=companies
                    on_saved=on_saved
                    on_close=Callback::new(move |_| details.set(None))
                />
            })}
        </div>
    }
}
