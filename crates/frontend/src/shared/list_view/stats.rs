//! Агрегатор статистики для панели над списком
//!
//! Один проход по загруженной (не разбитой на страницы) коллекции.

use chrono::{NaiveDate, TimeDelta};
use std::collections::BTreeMap;

use super::filter::{DateField, TextField};

/// Вклад вложенной коллекции записи (например, курсы контрагента)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NestedStats {
    /// Количество завершённых элементов
    pub completed: usize,
    pub score_sum: f64,
    pub score_count: usize,
}

/// Какие поля записи участвуют в статистике
pub struct StatsConfig<T> {
    pub status: TextField<T>,
    /// Группировка "по компании" / "по отрасли"
    pub group: Option<TextField<T>>,
    /// Дата окончания срока (документы, коды)
    pub expiry: Option<DateField<T>>,
    /// None от функции = у записи нет вложенной коллекции
    pub nested: Option<fn(&T) -> Option<NestedStats>>,
    /// Окно "скоро истекает" в днях: [today, today + window]
    pub expiring_window_days: i64,
}

impl<T> Clone for StatsConfig<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            group: self.group,
            expiry: self.expiry,
            nested: self.nested,
            expiring_window_days: self.expiring_window_days,
        }
    }
}

/// Группа для записей без значения группирующего поля
pub const UNGROUPED: &str = "Sin asignar";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_group: BTreeMap<String, usize>,
    pub expiring_soon: usize,
    /// Уже истекли (дата < today)
    pub expired: usize,
    pub completed_nested: usize,
    /// Средняя оценка по записям, у которых есть вложенная коллекция с оценками
    pub average_score: Option<u32>,
}

impl StatsSnapshot {
    pub fn status_count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    /// Доля статуса в процентах, округление до целого
    pub fn status_percentage(&self, status: &str) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.status_count(status) as f64 * 100.0 / self.total as f64).round() as u32
    }

    /// Группы по убыванию количества (для топа компаний)
    pub fn top_groups(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut groups: Vec<(&str, usize)> = self
            .by_group
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        groups.truncate(limit);
        groups
    }
}

/// Последний день окна "скоро истекает"; отрицательное окно считается нулевым,
/// переполнение упирается в `NaiveDate::MAX`
pub fn expiry_horizon(today: NaiveDate, window_days: i64) -> NaiveDate {
    TimeDelta::try_days(window_days.max(0))
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(NaiveDate::MAX)
}

/// Посчитать статистику за один проход
pub fn aggregate<T>(items: &[T], config: &StatsConfig<T>, today: NaiveDate) -> StatsSnapshot {
    let horizon = expiry_horizon(today, config.expiring_window_days);
    let mut snapshot = StatsSnapshot {
        total: items.len(),
        ..Default::default()
    };
    let mut score_sum = 0.0;
    let mut score_count = 0usize;

    for item in items {
        let status = (config.status)(item).unwrap_or("unknown");
        *snapshot.by_status.entry(status.to_string()).or_insert(0) += 1;

        if let Some(group) = config.group {
            let key = group(item)
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .unwrap_or(UNGROUPED);
            *snapshot.by_group.entry(key.to_string()).or_insert(0) += 1;
        }

        if let Some(date) = config.expiry.and_then(|f| f(item)) {
            if date < today {
                snapshot.expired += 1;
            } else if date <= horizon {
                snapshot.expiring_soon += 1;
            }
        }

        if let Some(nested) = config.nested.and_then(|f| f(item)) {
            snapshot.completed_nested += nested.completed;
            score_sum += nested.score_sum;
            score_count += nested.score_count;
        }
    }

    if score_count > 0 {
        snapshot.average_score = Some((score_sum / score_count as f64).round() as u32);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Worker {
        status: &'static str,
        company: Option<&'static str>,
        expires: Option<NaiveDate>,
        courses: Option<Vec<(bool, Option<f64>)>>,
    }

    fn status(w: &Worker) -> Option<&str> {
        Some(w.status)
    }

    fn company(w: &Worker) -> Option<&str> {
        w.company
    }

    fn expires(w: &Worker) -> Option<NaiveDate> {
        w.expires
    }

    fn courses(w: &Worker) -> Option<NestedStats> {
        let courses = w.courses.as_ref()?;
        let mut n = NestedStats::default();
        for (completed, score) in courses {
            if *completed {
                n.completed += 1;
            }
            if let Some(s) = score {
                n.score_sum += s;
                n.score_count += 1;
            }
        }
        Some(n)
    }

    fn cfg() -> StatsConfig<Worker> {
        StatsConfig {
            status,
            group: Some(company),
            expiry: Some(expires),
            nested: Some(courses),
            expiring_window_days: 30,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_missing_nested_collection_is_not_zero_score() {
        let items = vec![
            Worker {
                status: "active",
                company: Some("Andes"),
                expires: None,
                courses: Some(vec![(true, Some(80.0)), (true, Some(91.0))]),
            },
            Worker {
                status: "active",
                company: None,
                expires: None,
                courses: None,
            },
        ];
        let s = aggregate(&items, &cfg(), d(2026, 10, 17));
        assert_eq!(s.completed_nested, 2);
        // (80 + 91) / 2 = 85.5 -> 86; запись без курсов не входит в знаменатель
        assert_eq!(s.average_score, Some(86));
    }

    #[test]
    fn test_no_scores_means_no_average() {
        let items = vec![Worker {
            status: "inactive",
            company: None,
            expires: None,
            courses: Some(vec![(false, None)]),
        }];
        let s = aggregate(&items, &cfg(), d(2026, 10, 17));
        assert_eq!(s.average_score, None);
        assert_eq!(s.completed_nested, 0);
    }

    #[test]
    fn test_counts_and_expiring_window() {
        let today = d(2026, 10, 17);
        let w = |status, company, expires| Worker {
            status,
            company,
            expires,
            courses: None,
        };
        let items = vec![
            w("active", Some("Andes"), Some(today)),
            w("active", Some("Andes"), Some(d(2026, 11, 16))),
            w("suspended", Some("Sur"), Some(d(2026, 11, 17))),
            w("inactive", Some(" "), Some(d(2026, 10, 16))),
        ];
        let s = aggregate(&items, &cfg(), today);
        assert_eq!(s.total, 4);
        assert_eq!(s.status_count("active"), 2);
        assert_eq!(s.status_count("suspended"), 1);
        assert_eq!(s.status_count("missing"), 0);
        assert_eq!(s.status_percentage("active"), 50);
        assert_eq!(s.status_percentage("inactive"), 25);
        assert_eq!(s.by_group.get("Andes"), Some(&2));
        assert_eq!(s.by_group.get(UNGROUPED), Some(&1));
        // today и today+30 входят, today+31 нет, вчера уже истекло
        assert_eq!(s.expiring_soon, 2);
        assert_eq!(s.expired, 1);
        assert_eq!(s.top_groups(1), vec![("Andes", 2)]);
    }

    #[test]
    fn test_huge_or_negative_window_does_not_panic() {
        let today = d(2026, 10, 17);
        assert_eq!(expiry_horizon(today, 10_000_000_000_000), NaiveDate::MAX);
        assert_eq!(expiry_horizon(today, i64::MAX), NaiveDate::MAX);
        assert_eq!(expiry_horizon(today, -5), today);
        assert_eq!(expiry_horizon(today, 30), d(2026, 11, 16));

        let item = Worker {
            status: "active",
            company: None,
            expires: Some(d(2100, 1, 1)),
            courses: None,
        };
        let config = StatsConfig {
            expiring_window_days: 10_000_000_000_000,
            ..cfg()
        };
        let s = aggregate(&[item], &config, today);
        assert_eq!(s.expiring_soon, 1);
        assert_eq!(s.expired, 0);
    }

    #[test]
    fn test_empty_collection() {
        let s = aggregate(&[], &cfg(), d(2026, 10, 17));
        assert_eq!(s.total, 0);
        assert_eq!(s.status_percentage("active"), 0);
        assert_eq!(s.average_score, None);
    }
}
