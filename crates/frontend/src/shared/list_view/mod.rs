//! Движок списков: фильтры, алфавитная группировка, пагинация, статистика
//!
//! Всё, кроме `hooks`, чистые функции без зависимости от Leptos/DOM.

pub mod collation;
pub mod controller;
pub mod debounce;
pub mod filter;
pub mod grouping;
pub mod hooks;
pub mod pagination;
pub mod request_seq;
pub mod stats;

pub use controller::{ListConfig, ListController, ListViewModel, PaginationMode, NAME_PLACEHOLDER};
pub use filter::{DateField, FilterState, TextField, ALL};
pub use hooks::{use_list_view, Fetched, ListHandle};
pub use pagination::PaginationState;
pub use stats::{StatsConfig, StatsSnapshot};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use super::controller::{ListConfig, PaginationMode};
    use super::filter::TextField;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Row {
        pub name: String,
        pub status: Option<String>,
        pub company: Option<String>,
        pub email: Option<String>,
        pub created: Option<NaiveDate>,
    }

    pub fn row(
        name: &str,
        status: Option<&str>,
        company: Option<&str>,
        email: Option<&str>,
        created: Option<(i32, u32, u32)>,
    ) -> Row {
        Row {
            name: name.to_string(),
            status: status.map(str::to_string),
            company: company.map(str::to_string),
            email: email.map(str::to_string),
            created: created.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    fn name(r: &Row) -> &str {
        &r.name
    }

    fn name_field(r: &Row) -> Option<&str> {
        Some(r.name.as_str()).filter(|n| !n.is_empty())
    }

    fn status(r: &Row) -> Option<&str> {
        r.status.as_deref()
    }

    fn company(r: &Row) -> Option<&str> {
        r.company.as_deref()
    }

    fn email(r: &Row) -> Option<&str> {
        r.email.as_deref()
    }

    fn created(r: &Row) -> Option<NaiveDate> {
        r.created
    }

    pub fn config(mode: PaginationMode) -> ListConfig<Row> {
        ListConfig {
            id: name,
            display_name: name,
            placeholder: super::controller::NAME_PLACEHOLDER,
            text_fields: vec![name_field as TextField<Row>, email, company],
            equality_fields: vec![
                ("status", status as TextField<Row>),
                ("company", company as TextField<Row>),
            ],
            date_field: Some(created),
            mode,
        }
    }
}
