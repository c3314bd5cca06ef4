use chrono::NaiveDate;
use contracts::domain::a002_contractor::aggregate::Contractor;

use crate::domain::a002_contractor::api::{COMPANY, STATUS};
use crate::shared::list_view::stats::NestedStats;
use crate::shared::list_view::{
    ListConfig, PaginationMode, StatsConfig, TextField, NAME_PLACEHOLDER,
};

fn id(c: &Contractor) -> &str {
    &c.id
}

fn name(c: &Contractor) -> &str {
    &c.name
}

fn name_field(c: &Contractor) -> Option<&str> {
    Some(c.name.as_str())
}

fn rut(c: &Contractor) -> Option<&str> {
    c.rut.as_deref()
}

fn email(c: &Contractor) -> Option<&str> {
    c.email.as_deref()
}

fn company_name(c: &Contractor) -> Option<&str> {
    c.company_name().filter(|n| !n.trim().is_empty())
}

fn company_id(c: &Contractor) -> Option<&str> {
    c.company_id()
}

fn status(c: &Contractor) -> Option<&str> {
    Some(c.status.as_str())
}

fn created(c: &Contractor) -> Option<NaiveDate> {
    Some(c.metadata.created_at.date_naive())
}

fn document_expiry(c: &Contractor) -> Option<NaiveDate> {
    c.document_expires_at
}

/// Курсы контрагента; без массива курсов вклада в статистику нет
pub fn course_stats(c: &Contractor) -> Option<NestedStats> {
    let courses = c.courses.as_ref()?;
    let scores = courses.iter().filter_map(|course| course.score);
    Some(NestedStats {
        completed: courses.iter().filter(|course| course.completed).count(),
        score_sum: scores.clone().sum(),
        score_count: scores.count(),
    })
}

pub fn list_config() -> ListConfig<Contractor> {
    ListConfig {
        id,
        display_name: name,
        placeholder: NAME_PLACEHOLDER,
        text_fields: vec![name_field as TextField<Contractor>, rut, email, company_name],
        equality_fields: vec![
            (STATUS, status as TextField<Contractor>),
            (COMPANY, company_id as TextField<Contractor>),
        ],
        date_field: Some(created),
        mode: PaginationMode::Server,
    }
}

pub fn stats_config(expiring_window_days: i64) -> StatsConfig<Contractor> {
    StatsConfig {
        status,
        group: Some(company_name),
        expiry: Some(document_expiry),
        nested: Some(course_stats),
        expiring_window_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::filter::apply_filters;
    use crate::shared::list_view::stats::aggregate;
    use crate::shared::list_view::FilterState;
    use contracts::domain::a002_contractor::aggregate::{CompanyRef, CourseProgress};
    use contracts::domain::common::{EntityMetadata, EntityStatus};

    fn contractor(name: &str, company: Option<&str>, courses: Option<Vec<CourseProgress>>) -> Contractor {
        Contractor {
            id: format!("id-{}", name),
            name: name.to_string(),
            rut: None,
            email: None,
            company: company.map(|c| CompanyRef {
                id: format!("c-{}", c),
                name: c.to_string(),
            }),
            status: EntityStatus::Active,
            document_expires_at: None,
            courses,
            metadata: EntityMetadata::new(chrono::Utc::now()),
        }
    }

    fn course(score: Option<f64>, completed: bool) -> CourseProgress {
        CourseProgress {
            name: "Altura física".to_string(),
            score,
            completed,
        }
    }

    #[test]
    fn test_missing_courses_do_not_drag_average() {
        let items = vec![
            contractor("Ana", Some("Andes"), Some(vec![course(Some(80.0), true), course(Some(91.0), true)])),
            contractor("Beto", Some("Andes"), None),
            contractor("Carla", None, Some(vec![course(None, false)])),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let s = aggregate(&items, &stats_config(30), today);
        assert_eq!(s.completed_nested, 2);
        // (80 + 91) / 2 = 85.5 -> 86; Beto не входит в знаменатель
        assert_eq!(s.average_score, Some(86));
        assert_eq!(s.by_group.get("Andes"), Some(&2));
    }

    #[test]
    fn test_expiring_documents() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut soon = contractor("Ana", None, None);
        soon.document_expires_at = NaiveDate::from_ymd_opt(2026, 3, 20);
        let mut late = contractor("Beto", None, None);
        late.document_expires_at = NaiveDate::from_ymd_opt(2026, 6, 1);
        let mut gone = contractor("Carla", None, None);
        gone.document_expires_at = NaiveDate::from_ymd_opt(2026, 2, 1);
        let s = aggregate(&[soon, late, gone], &stats_config(30), today);
        assert_eq!(s.expiring_soon, 1);
        assert_eq!(s.expired, 1);
    }

    #[test]
    fn test_search_matches_company_name() {
        let items = vec![
            contractor("Ana", Some("Constructora Andes"), None),
            contractor("Beto", None, None),
        ];
        let mut filter = FilterState::default();
        filter.set_search("andes");
        let found = apply_filters(&items, &filter, &list_config());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ana");
    }
}
