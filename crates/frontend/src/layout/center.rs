use crate::domain::a001_company::ui::list::CompanyList;
use crate::domain::a002_contractor::ui::list::ContractorList;
use crate::domain::a003_form::ui::list::FormCatalog;
use crate::domain::a004_template::ui::list::TemplateCatalog;
use crate::domain::a005_invitation_code::ui::list::InvitationCodeList;
use crate::layout::global_context::{AppGlobalContext, Section};
use leptos::prelude::*;

/// Страница активного раздела; при смене раздела старая размонтируется
#[component]
pub fn Center() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <div data-zone="center" class="app-content">
            {move || match ctx.active.get() {
                Section::Companies => view! { <CompanyList /> }.into_any(),
                Section::Contractors => view! { <ContractorList /> }.into_any(),
                Section::Forms => view! { <FormCatalog /> }.into_any(),
                Section::Templates => view! { <TemplateCatalog /> }.into_any(),
                Section::InvitationCodes => view! { <InvitationCodeList /> }.into_any(),
            }}
        </div>
    }
}
