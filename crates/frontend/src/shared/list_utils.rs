/// Утилиты для списков: поле поиска и подсветка совпадений
use leptos::prelude::*;

/// Куски текста для подсветки: (начало, конец, совпадение ли), байтовые индексы.
///
/// Поиск без учёта регистра. Если нижний регистр меняет длину строки
/// (редкие символы), подсветка не делается.
pub fn match_segments(text: &str, needle: &str) -> Vec<(usize, usize, bool)> {
    let needle = needle.trim().to_lowercase();
    let lower = text.to_lowercase();
    if needle.is_empty() || lower.len() != text.len() {
        return vec![(0, text.len(), false)];
    }

    let mut segments = Vec::new();
    let mut last = 0;
    while let Some(pos) = lower[last..].find(&needle) {
        let start = last + pos;
        let end = start + needle.len();
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            break;
        }
        if start > last {
            segments.push((last, start, false));
        }
        segments.push((start, end, true));
        last = end;
    }
    if last < text.len() || segments.is_empty() {
        segments.push((last, text.len(), false));
    }
    segments
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, needle: &str) -> AnyView {
    let parts = match_segments(text, needle)
        .into_iter()
        .map(|(start, end, hit)| {
            let chunk = text[start..end].to_string();
            if hit {
                view! { <mark class="search-hit">{chunk}</mark> }.into_any()
            } else {
                view! { <span>{chunk}</span> }.into_any()
            }
        })
        .collect::<Vec<_>>();
    view! { <>{parts}</> }.into_any()
}

/// Значение поля формы: пустая строка означает "не задано".
/// Текст не обрезается, иначе в поле нельзя набрать пробел между словами.
pub fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Подтверждение через window.confirm; без окна считаем отказом
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Поле поиска с кнопкой очистки.
///
/// Пишет сырой ввод в `value`; задержку перед запросом держит `use_list_view`.
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: RwSignal<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder={placeholder}
                class=move || {
                    if is_filter_active() {
                        "search-input__field search-input__field--active"
                    } else {
                        "search-input__field"
                    }
                }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || is_filter_active().then(|| view! {
                <button
                    class="search-input__clear"
                    on:click=move |_| value.set(String::new())
                    title="Limpiar"
                >
                    {crate::shared::icons::icon("x")}
                </button>
            })}
        </div>
    }
}
