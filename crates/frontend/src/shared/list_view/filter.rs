//! Набор предикатов фильтрации списка
//!
//! Предикаты независимы и объединяются только через AND. OR бывает лишь
//! внутри текстового поиска: совпадение в любом из текстовых полей.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::controller::ListConfig;

/// Значение фильтра "все": предикат выключен
pub const ALL: &str = "all";

/// Текстовое поле записи для поиска/сравнения
pub type TextField<T> = fn(&T) -> Option<&str>;

/// Поле-дата записи для фильтра по периоду
pub type DateField<T> = fn(&T) -> Option<NaiveDate>;

/// Состояние фильтров списка
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Строка поиска (после debounce)
    pub search: String,
    /// Фильтры на точное совпадение: поле -> значение ("all"/"" = выключен)
    pub equals: BTreeMap<String, String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Включённый предикат
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Подстрока без учёта регистра (уже в нижнем регистре)
    Text(String),
    Equals { field: String, value: String },
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

fn is_disabled(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case(ALL)
}

impl FilterState {
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Установить фильтр по полю; "all" или пустая строка выключают его
    pub fn set_equals(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        if is_disabled(&value) {
            self.equals.remove(field);
        } else {
            self.equals.insert(field.to_string(), value);
        }
    }

    /// Текущее значение фильтра по полю или "all"
    pub fn equals_value(&self, field: &str) -> &str {
        self.equals.get(field).map(String::as_str).unwrap_or(ALL)
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.date_from = from;
        self.date_to = to;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Активные предикаты (выключенные не попадают в список)
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            out.push(Predicate::Text(search.to_lowercase()));
        }
        for (field, value) in &self.equals {
            if !is_disabled(value) {
                out.push(Predicate::Equals {
                    field: field.clone(),
                    value: value.clone(),
                });
            }
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            out.push(Predicate::DateRange {
                from: self.date_from,
                to: self.date_to,
            });
        }
        out
    }

    /// Количество активных фильтров (для бейджа панели)
    pub fn active_count(&self) -> usize {
        self.predicates().len()
    }

    /// Значение для query string: None если фильтр выключен
    pub fn search_param(&self) -> Option<String> {
        let s = self.search.trim();
        (!s.is_empty()).then(|| s.to_string())
    }

    pub fn equals_param(&self, field: &str) -> Option<String> {
        self.equals
            .get(field)
            .filter(|v| !is_disabled(v))
            .cloned()
    }
}

impl Predicate {
    pub fn matches<T>(&self, entity: &T, config: &ListConfig<T>) -> bool {
        match self {
            Predicate::Text(needle) => config
                .text_fields
                .iter()
                .filter_map(|field| field(entity))
                .any(|value| value.to_lowercase().contains(needle.as_str())),
            Predicate::Equals { field, value } => config
                .equality_field(field)
                .and_then(|extract| extract(entity))
                .is_some_and(|actual| actual == value.as_str()),
            Predicate::DateRange { from, to } => {
                let Some(date) = config.date_field.and_then(|extract| extract(entity)) else {
                    return false;
                };
                from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
            }
        }
    }
}

/// Запись проходит все активные предикаты
pub fn matches<T>(entity: &T, filter: &FilterState, config: &ListConfig<T>) -> bool {
    filter
        .predicates()
        .iter()
        .all(|p| p.matches(entity, config))
}

/// Отфильтровать коллекцию, исходный срез не меняется
pub fn apply_filters<T: Clone>(items: &[T], filter: &FilterState, config: &ListConfig<T>) -> Vec<T> {
    let predicates = filter.predicates();
    if predicates.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| predicates.iter().all(|p| p.matches(*item, config)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::controller::PaginationMode;
    use crate::shared::list_view::test_support::{config, row, Row};

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn sample() -> Vec<Row> {
        vec![
            row("Beta", Some("active"), Some("andes"), Some("beta@andes.cl"), Some((2026, 3, 1))),
            row("alfa", Some("inactive"), Some("andes"), None, Some((2026, 5, 20))),
            row("Álvarez", Some("active"), None, Some("alvarez@sur.cl"), None),
            row("Zeta", Some("suspended"), Some("sur"), None, Some((2026, 1, 15))),
            row("Ñandú", Some("active"), Some("sur"), Some("nandu@sur.cl"), Some((2026, 4, 2))),
        ]
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let cfg = config(PaginationMode::Client);
        let items = sample();
        assert_eq!(apply_filters(&items, &FilterState::default(), &cfg), items);
    }

    #[test]
    fn test_status_only_filter() {
        let cfg = config(PaginationMode::Client);
        let mut f = FilterState::default();
        f.set_equals("status", "active");
        f.set_search("");
        let out = apply_filters(&sample(), &f, &cfg);
        assert_eq!(names(&out), vec!["Beta", "Álvarez", "Ñandú"]);
    }

    #[test]
    fn test_all_sentinel_disables_predicate() {
        let mut f = FilterState::default();
        f.set_equals("status", "active");
        f.set_equals("status", ALL);
        assert!(f.predicates().is_empty());
        assert_eq!(f.equals_value("status"), ALL);
        assert_eq!(f.equals_param("status"), None);
    }

    #[test]
    fn test_text_search_matches_any_field_case_insensitive() {
        let cfg = config(PaginationMode::Client);
        let mut f = FilterState::default();
        f.set_search("SUR");
        let out = apply_filters(&sample(), &f, &cfg);
        // email "alvarez@sur.cl" или компания "sur"
        assert_eq!(names(&out), vec!["Álvarez", "Zeta", "Ñandú"]);
    }

    #[test]
    fn test_missing_fields_do_not_match_text() {
        let cfg = config(PaginationMode::Client);
        let items = vec![row("", None, None, None, None)];
        let mut f = FilterState::default();
        f.set_search("x");
        assert!(apply_filters(&items, &f, &cfg).is_empty());
        // но без фильтров запись проходит
        assert_eq!(apply_filters(&items, &FilterState::default(), &cfg).len(), 1);
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let cfg = config(PaginationMode::Client);
        let mut f = FilterState::default();
        f.set_date_range(NaiveDate::from_ymd_opt(2026, 3, 1), NaiveDate::from_ymd_opt(2026, 4, 2));
        let out = apply_filters(&sample(), &f, &cfg);
        assert_eq!(names(&out), vec!["Beta", "Ñandú"]);

        // только нижняя граница
        f.set_date_range(NaiveDate::from_ymd_opt(2026, 4, 3), None);
        assert_eq!(names(&apply_filters(&sample(), &f, &cfg)), vec!["alfa"]);
    }

    #[test]
    fn test_predicate_order_does_not_matter() {
        let cfg = config(PaginationMode::Client);
        let mut f = FilterState::default();
        f.set_search("a");
        f.set_equals("status", "active");
        f.set_equals("company", "sur");
        f.set_date_range(NaiveDate::from_ymd_opt(2026, 1, 1), None);

        let items = sample();
        let predicates = f.predicates();
        let forward: Vec<Row> = items
            .iter()
            .filter(|r| predicates.iter().all(|p| p.matches(*r, &cfg)))
            .cloned()
            .collect();
        let backward: Vec<Row> = items
            .iter()
            .filter(|r| predicates.iter().rev().all(|p| p.matches(*r, &cfg)))
            .cloned()
            .collect();
        // последовательное применение по одному предикату
        let mut staged = items.clone();
        for p in predicates.iter().rev() {
            staged.retain(|r| p.matches(r, &cfg));
        }
        assert_eq!(forward, backward);
        assert_eq!(forward, staged);
        assert_eq!(names(&forward), vec!["Ñandú"]);
    }

    #[test]
    fn test_active_count() {
        let mut f = FilterState::default();
        assert_eq!(f.active_count(), 0);
        f.set_search("  ");
        assert_eq!(f.active_count(), 0);
        f.set_search("ana");
        f.set_equals("status", "active");
        f.set_date_range(None, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(f.active_count(), 3);
        f.clear();
        assert_eq!(f.active_count(), 0);
    }
}
