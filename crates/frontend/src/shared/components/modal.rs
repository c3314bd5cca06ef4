use crate::shared::icons::icon;
use contracts::domain::common::ValidationError;
use leptos::ev;
use leptos::prelude::*;

/// Диалог поверх страницы: Escape, клик по фону и крестик закрывают его
#[component]
pub fn Modal(
    title: String,
    on_close: Callback<()>,
    /// Кнопки в заголовке (Guardar, Cancelar)
    #[prop(optional)]
    action_buttons: Option<AnyView>,
    children: Children,
) -> impl IntoView {
    let keydown = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || keydown.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" role="dialog" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        {action_buttons}
                        <button
                            class="button button--icon modal__close"
                            title="Cerrar"
                            on:click=move |_| on_close.run(())
                        >
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Ошибка валидации рядом с полем формы
#[component]
pub fn FieldError(
    field: &'static str,
    #[prop(into)]
    error: Signal<Option<ValidationError>>,
) -> impl IntoView {
    move || {
        error
            .get()
            .filter(|e| e.field == field)
            .map(|e| view! { <div class="form__error">{e.message}</div> })
    }
}
