use contracts::domain::a003_form::aggregate::Form;
use contracts::shared::api::ExportFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{list_config, stats_config};
use crate::domain::a003_form::api::{delete_form, export_forms, fetch_forms, CATEGORY, STATUS};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::export_buttons::ExportButtons;
use crate::shared::components::filter_panel::{distinct_options, status_options, FilterPanel, SelectFilter};
use crate::shared::components::letter_index::LetterIndex;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{format_thousands, StatCard};
use crate::shared::config::config;
use crate::shared::date_utils::{format_datetime, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::{confirm, highlight_matches, SearchInput};
use crate::shared::list_view::grouping::group_sorted;
use crate::shared::list_view::stats::aggregate;
use crate::shared::list_view::{use_list_view, ListController};

#[component]
#[allow(non_snake_case)]
pub fn FormCatalog() -> impl IntoView {
    let cfg = config();
    let handle = use_list_view(
        ListController::new(list_config(), cfg.list.page_size),
        cfg.list.debounce_ms,
        fetch_forms,
    );
    let stats_cfg = stats_config(cfg.stats.expiring_window_days);
    // каталог загружен целиком: статистика по всей коллекции
    let stats = Memo::new(move |_| handle.items.with(|items| aggregate(items, &stats_cfg, today())));
    let is_filter_expanded = RwSignal::new(false);
    let exporting = RwSignal::new(false);

    let categories = Memo::new(move |_| {
        handle
            .items
            .with(|items| distinct_options(items.iter().filter_map(|f| f.category.as_deref())))
    });
    let letters = Signal::derive(move || handle.view.with(|v| v.groups.letter_index()));

    let delete_card = move |form: Form| {
        if !confirm(&format!("¿Eliminar el formulario \"{}\"?", form.name)) {
            return;
        }
        spawn_local(async move {
            match delete_form(&form.id).await {
                Ok(()) => {
                    log::info!("Form {} deleted", form.id);
                    handle.remove_local(&form.id);
                }
                Err(e) => handle.error.set(Some(e)),
            }
        });
    };

    let on_export = Callback::new(move |format: ExportFormat| {
        let filter = handle.controller.with_untracked(|c| c.filter.clone());
        exporting.set(true);
        spawn_local(async move {
            if let Err(e) = export_forms(&filter, format).await {
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
                    <h1 class="header__title">{icon("forms")}" Formularios"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput value=handle.search_input placeholder="Buscar formularios" />
                    <button class="button button--secondary" on:click=move |_| handle.reload()>
                        {icon("refresh")}
                        " Actualizar"
                    </button>
                </div>
            </div>

            <ErrorBanner error=handle.error on_retry=Callback::new(move |_| handle.reload()) />

            <div class="stat-cards">
                <StatCard
                    label="Formularios".to_string()
                    icon_name="forms"
                    value=Signal::derive(move || stats.with(|s| format_thousands(s.total)))
                    subtitle=Signal::derive(move || {
                        stats.with(|s| Some(format!("{} activos", s.status_count("active"))))
                    })
                />
                <StatCard
                    label="Categorías".to_string()
                    icon_name="templates"
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

            <LetterIndex letters=letters on_select=Callback::new(move |letter: &'static str| handle.jump_to_letter(letter)) />

            <div class="catalog">
                {move || {
                    let search = handle.controller.with(|c| c.filter.search.clone());
                    let label_cfg = handle.controller.with_untracked(|c| c.config.clone());
                    let page_items = handle.view.with(|v| v.page.page_items.clone());
                    // страница уже отсортирована, раскладываем её по буквам
                    let groups = group_sorted(page_items, label_cfg.display_name);
                    groups.buckets().iter().map(|bucket| {
                        let cards = bucket.items.iter().cloned().map(|form| {
                            let for_delete = form.clone();
                            view! {
                                <div class="catalog-card">
                                    <div class="catalog-card__header">
                                        <span class="catalog-card__title">{highlight_matches(label_cfg.label(&form), &search)}</span>
                                        <span class=format!("badge badge--{}", form.status.as_str())>{form.status.label()}</span>
                                    </div>
                                    <div class="catalog-card__body">
                                        {form.description.clone().map(|d| view! { <p>{highlight_matches(&d, &search)}</p> })}
                                        <div class="catalog-card__meta">
                                            {form.category.clone().unwrap_or_else(|| "Sin categoría".to_string())}
                                            " · "
                                            {format!("{} preguntas", form.question_count)}
                                            " · "
                                            {format_datetime(form.metadata.last_modified())}
                                        </div>
                                    </div>
                                    <button
                                        class="button button--icon catalog-card__delete"
                                        title="Eliminar"
                                        on:click=move |_| delete_card(for_delete.clone())
                                    >
                                        {icon("delete")}
                                    </button>
                                </div>
                            }
                        }).collect_view();
                        view! {
                            <section class="catalog-group">
                                <h3 class="catalog-group__letter">{bucket.key.clone()}</h3>
                                <div class="catalog-group__cards">{cards}</div>
                            </section>
                        }
                    }).collect_view()
                }}
                {move || handle.loading.get().then(|| view! { <div class="table__loading">"Cargando..."</div> })}
                {move || {
                    let empty = !handle.loading.get() && handle.view.with(|v| v.filtered.is_empty());
                    empty.then(|| view! { <div class="table__empty">"No se encontraron formularios"</div> })
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
