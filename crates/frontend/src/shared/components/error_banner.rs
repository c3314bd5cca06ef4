use crate::shared::api_error::ApiError;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Баннер ошибки загрузки: текст для пользователя, "Reintentar" и закрытие
#[component]
pub fn ErrorBanner(
    #[prop(into)]
    error: RwSignal<Option<ApiError>>,
    /// Повтор последнего запроса; кнопка только для повторяемых ошибок
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        error.get().map(|e| {
            let retry = on_retry.filter(|_| e.is_retryable());
            view! {
                <div class="error-banner" role="alert">
                    {icon("alert")}
                    <span class="error-banner__message">{e.user_message()}</span>
                    {retry.map(|cb| view! {
                        <button class="button button--secondary" on:click=move |_| cb.run(())>
                            {icon("refresh")}
                            " Reintentar"
                        </button>
                    })}
                    <button
                        class="error-banner__close"
                        title="Cerrar"
                        on:click=move |_| error.set(None)
                    >
                        {icon("x")}
                    </button>
                </div>
            }
        })
    }
}
