use crate::shared::icons::icon;
use crate::shared::list_view::PaginationState;
use leptos::prelude::*;

/// Подпись "N–M de T" для текущей страницы
pub fn range_label(state: &PaginationState) -> String {
    let total = state.total_count();
    if total == 0 {
        return "0 de 0".to_string();
    }
    let from = state.offset() + 1;
    let to = (state.offset() + state.page_size()).min(total);
    format!("{}–{} de {}", from, to, total)
}

/// PaginationControls - навигация по страницам + выбор размера страницы
///
/// Рисуется над и под таблицей; оба экземпляра читают одно и то же
/// состояние, поэтому всегда показывают одинаковую страницу.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    state: Signal<PaginationState>,

    /// Новая страница (0-based)
    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,

    /// Варианты размера страницы
    page_size_options: Vec<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || !state.get().has_prev()
                title="Primera página"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let s = state.get_untracked();
                    if s.has_prev() {
                        on_page_change.run(s.page() - 1);
                    }
                }
                disabled=move || !state.get().has_prev()
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let s = state.get();
                    format!(
                        "{} / {} ({})",
                        s.page() + 1,
                        s.page_count().max(1),
                        range_label(&s)
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let s = state.get_untracked();
                    if s.has_next() {
                        on_page_change.run(s.page() + 1);
                    }
                }
                disabled=move || !state.get().has_next()
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(state.get_untracked().last_page())
                disabled=move || !state.get().has_next()
                title="Última página"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || state.get().page_size().to_string()
            >
                {page_size_options.into_iter().map(|size| {
                    view! {
                        <option value={size.to_string()} selected=move || state.get().page_size() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_label() {
        let mut s = PaginationState::new(25);
        assert_eq!(range_label(&s), "0 de 0");
        s.set_total(60);
        assert_eq!(range_label(&s), "1–25 de 60");
        s.set_page(2);
        assert_eq!(range_label(&s), "51–60 de 60");
    }
}
