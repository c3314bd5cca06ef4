use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let is_open = move || ctx.left_open.get();

    view! {
        <div data-zone="left" class="left" class:collapsed=move || !is_open()>
            <button class="left__toggle" title="Menú" on:click=move |_| ctx.toggle_left()>
                "☰"
            </button>
            {children()}
        </div>
    }
}
