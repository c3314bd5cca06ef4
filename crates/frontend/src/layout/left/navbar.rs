use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::icons;
use leptos::prelude::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <nav class="main-nav-bar">
            <ul>
                {Section::ALL.into_iter().map(|section| {
                    view! {
                        <li
                            class:active=move || ctx.active.get() == section
                            on:click=move |_| ctx.open(section)
                        >
                            {icons::icon(section.key())}
                            <span>{section.title()}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}
