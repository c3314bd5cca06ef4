use contracts::domain::a004_template::aggregate::Template;
use contracts::shared::api::ExportFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{list_config, stats_config};
use crate::domain::a004_template::api::{
    delete_template, export_templates, fetch_templates, CATEGORY, STATUS,
};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::export_buttons::ExportButtons;
use crate::shared::components::filter_panel::{distinct_options, status_options, FilterPanel, SelectFilter};
use crate::shared::components::letter_index::LetterIndex;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{format_thousands, StatCard, StatTone};
use crate::shared::config::config;
use crate::shared::date_utils::{format_datetime, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::{confirm, highlight_matches, SearchInput};
use crate::shared::list_view::stats::aggregate;
use crate::shared::list_view::{use_list_view, ListController};

#[component]
#[allow(non_snake_case)]
pub fn TemplateCatalog() -> impl IntoView {
    let cfg = config();
    let handle = use_list_view(
        ListController::new(list_config(), cfg.list.page_size),
        cfg.list.debounce_ms,
        fetch_templates,
    );
    let stats_cfg = stats_config(cfg.stats.expiring_window_days);
    let stats = Memo::new(move |_| handle.items.with(|items| aggregate(items, &stats_cfg, today())));
    let is_filter_expanded = RwSignal::new(false);
    let exporting = RwSignal::new(false);

    let categories = Memo::new(move |_| {
        handle
            .items
            .with(|items| distinct_options(items.iter().filter_map(|t| t.category.as_deref())))
    });

    let delete_row = move |template: Template| {
        if !confirm(&format!("¿Eliminar la plantilla \"{}\"?", template.name)) {
            return;
        }
        spawn_local(async move {
            match delete_template(&template.id).await {
                Ok(()) => {
                    log::info!("Template {} deleted", template.id);
                    handle.remove_local(&template.id);
                }
                Err(e) => handle.error.set(Some(e)),
            }
        });
    };

    let on_export = Callback::new(move |format: ExportFormat| {
        let filter = handle.controller.with_untracked(|c| c.filter.clone());
        exporting.set(true);
        spawn_local(async move {
            if let Err(e) = export_templates(&filter, format).await {
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
                    <h1 class="header__title">{icon("templates")}" Plantillas"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput value=handle.search_input placeholder="Buscar por nombre, categoría o formulario" />
                    <button class="button button--secondary" on:click=move |_| handle.reload()>
                        {icon("refresh")}
                        " Actualizar"
                    </button>
                </div>
            </div>

            <ErrorBanner error=handle.error on_retry=Callback::new(move |_| handle.reload()) />

            <div class="stat-cards">
                <StatCard
                    label="Plantillas".to_string()
                    icon_name="templates"
                    value=Signal::derive(move || stats.with(|s| format_thousands(s.total)))
                />
                <StatCard
                    label="Activas".to_string()
                    icon_name="check"
                    tone=StatTone::Good
                    value=Signal::derive(move || stats.with(|s| s.status_count("active").to_string()))
                    subtitle=Signal::derive(move || {
                        stats.with(|s| Some(format!("{}% del total", s.status_percentage("active"))))
                    })
                />
                <StatCard
                    label="Categorías".to_string()
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
                    label="Categoría"
                    value=Signal::derive(move || handle.filter().with(|f| f.equals_value(CATEGORY).to_string()))
                    options=categories
                    on_change=Callback::new(move |v: String| handle.set_equals(CATEGORY, &v))
                />
            </FilterPanel>

            <LetterIndex
                letters=Signal::derive(move || handle.view.with(|v| v.groups.letter_index()))
                on_select=Callback::new(move |letter: &'static str| handle.jump_to_letter(letter))
            />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Nombre"</th>
                            <th class="table__header-cell">"Categoría"</th>
                            <th class="table__header-cell">"Formulario"</th>
                            <th class="table__header-cell">"Estado"</th>
                            <th class="table__header-cell">"Modificada"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let search = handle.controller.with(|c| c.filter.search.clone());
                            let label_cfg = handle.controller.with_untracked(|c| c.config.clone());
                            handle.view.with(|v| v.page.page_items.clone()).into_iter().map(|template| {
                                let for_delete = template.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{highlight_matches(label_cfg.label(&template), &search)}</td>
                                        <td class="table__cell">{highlight_matches(template.category.as_deref().unwrap_or("-"), &search)}</td>
                                        <td class="table__cell">{highlight_matches(template.form_name.as_deref().unwrap_or("-"), &search)}</td>
                                        <td class="table__cell">
                                            <span class=format!("badge badge--{}", template.status.as_str())>{template.status.label()}</span>
                                        </td>
                                        <td class="table__cell">{format_datetime(template.metadata.last_modified())}</td>
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
                    let empty = !handle.loading.get() && handle.view.with(|v| v.filtered.is_empty());
                    empty.then(|| view! { <div class="table__empty">"No se encontraron plantillas"</div> })
                }}
            </div>

            <PaginationControls
                state=pagination
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
                page_size_options=page_size_options_bottom
            />
        </div>
    }
}
