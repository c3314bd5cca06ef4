use crate::shared::icons::icon;
use contracts::domain::common::EntityStatus;
use leptos::prelude::*;

/// Опции фильтра по статусу записи
pub fn status_options() -> Vec<(String, String)> {
    EntityStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

/// Опции из значений, встреченных в загруженных записях (отрасль, категория)
pub fn distinct_options<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(String, String)> {
    let mut seen: Vec<String> = values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    seen.sort();
    seen.dedup();
    seen.into_iter().map(|v| (v.clone(), v)).collect()
}

/// FilterPanel - сворачиваемая панель фильтров с пагинацией в заголовке
#[component]
pub fn FilterPanel(
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Количество активных фильтров (бейдж)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Сброс всех фильтров
    on_clear: Callback<()>,

    /// Верхний экземпляр PaginationControls
    pagination_controls: AnyView,

    /// Кнопки справа (экспорт)
    #[prop(optional)]
    actions: Option<AnyView>,

    /// Поля фильтров
    children: Children,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=toggle_expanded
                >
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-right")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filtros"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{count}</span>
                        })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls}
                </div>
                <div class="filter-panel-header__right">
                    {actions}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {children()}
                    <button
                        class="button button--ghost"
                        on:click=move |_| on_clear.run(())
                        disabled=move || active_filters_count.get() == 0
                    >
                        {icon("x")}
                        " Limpiar filtros"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Выпадающий список для фильтра на равенство; первая опция "Todos" ("all")
#[component]
pub fn SelectFilter(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<String>,
    /// (значение, подпись)
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter-field">
            <span class="filter-field__label">{label}</span>
            <select
                class="filter-field__select"
                on:change=move |ev| on_change.run(event_target_value(&ev))
                prop:value=move || value.get()
            >
                <option value={crate::shared::list_view::ALL}>"Todos"</option>
                {move || options.get().into_iter().map(|(v, l)| {
                    let selected_value = v.clone();
                    view! {
                        <option value=v selected=move || value.get() == selected_value>{l}</option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_options() {
        let opts = distinct_options(["Minería", " ", "Energía", "Minería"]);
        assert_eq!(
            opts,
            vec![
                ("Energía".to_string(), "Energía".to_string()),
                ("Minería".to_string(), "Minería".to_string()),
            ]
        );
        assert_eq!(status_options().len(), 3);
    }
}
