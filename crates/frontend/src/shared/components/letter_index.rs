use leptos::prelude::*;

/// Алфавитный указатель над карточками; пустые буквы неактивны
#[component]
pub fn LetterIndex(
    /// (буква, есть ли записи)
    #[prop(into)]
    letters: Signal<Vec<(&'static str, bool)>>,
    /// Переход к первой записи на букву
    on_select: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <nav class="letter-index">
            {move || letters.get().into_iter().map(|(letter, present)| {
                view! {
                    <button
                        class="letter-index__item"
                        class:letter-index__item--empty={!present}
                        disabled={!present}
                        on:click=move |_| on_select.run(letter)
                    >
                        {letter}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
