pub mod center;
pub mod global_context;
pub mod left;

use leptos::prelude::*;

/// Каркас приложения
///
/// ```text
/// +---------+---------------------------+
/// | Navbar  |   активный раздел         |
/// | (Left)  |   (Center)                |
/// +---------+---------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <div class="app-body">
                <left::Left>
                    <left::Navbar />
                </left::Left>
                <div class="app-main">
                    <center::Center />
                </div>
            </div>
        </div>
    }
}
