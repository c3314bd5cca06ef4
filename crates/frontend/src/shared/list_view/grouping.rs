//! Алфавитная группировка: сортировка по имени и раскладка по первой букве

use std::collections::HashMap;

use super::collation::{bucket_key, CollationKey, SPANISH_ALPHABET};

/// Группа записей с одной первой буквой
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<T> {
    pub key: String,
    pub items: Vec<T>,
}

/// Результат группировки; корзины идут в порядке сортировки
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<T> {
    buckets: Vec<Bucket<T>>,
}

impl<T> Default for Grouping<T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

impl<T> Grouping<T> {
    pub fn buckets(&self) -> &[Bucket<T>] {
        &self.buckets
    }

    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.buckets
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.items.as_slice())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.key.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Количество записей во всех корзинах
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|b| b.items.len()).sum()
    }

    /// Позиция первой записи корзины в склеенном списке (переход к букве)
    pub fn first_index(&self, key: &str) -> Option<usize> {
        let mut offset = 0;
        for bucket in &self.buckets {
            if bucket.key == key {
                return Some(offset);
            }
            offset += bucket.items.len();
        }
        None
    }

    /// Склеить корзины обратно в отсортированный список
    pub fn flatten(self) -> Vec<T> {
        self.buckets.into_iter().flat_map(|b| b.items).collect()
    }

    /// Буквы алфавита с признаком "есть записи" для панели перехода
    pub fn letter_index(&self) -> Vec<(&'static str, bool)> {
        SPANISH_ALPHABET
            .iter()
            .map(|letter| (*letter, self.get(letter).is_some()))
            .collect()
    }
}

/// Отсортировать копию по отображаемому имени (испанская сортировка, стабильно)
pub fn sort_by_name<T: Clone>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by_cached_key(|item| {
        let n = name(item);
        (CollationKey::new(n), n.to_string())
    });
    sorted
}

/// Отсортировать и разложить по корзинам
pub fn group_alphabetically<T: Clone>(items: &[T], name: impl Fn(&T) -> &str) -> Grouping<T> {
    let sorted = sort_by_name(items, &name);
    group_sorted(sorted, name)
}

/// Разложить уже отсортированный список; порядок внутри корзин сохраняется
pub fn group_sorted<T>(sorted: Vec<T>, name: impl Fn(&T) -> &str) -> Grouping<T> {
    let mut buckets: Vec<Bucket<T>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for item in sorted {
        let key = bucket_key(name(&item));
        match index.get(&key) {
            Some(&i) => buckets[i].items.push(item),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    key,
                    items: vec![item],
                });
            }
        }
    }
    Grouping { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::collation::FALLBACK_BUCKET;

    fn name(s: &String) -> &str {
        s.as_str()
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_contractor_scenario() {
        let items = strings(&["Beta", "alfa", "Álvarez", "Zeta", "Ñandú"]);
        let g = group_alphabetically(&items, name);
        assert_eq!(g.keys(), vec!["A", "B", "Ñ", "Z"]);
        assert_eq!(g.get("A").unwrap(), &strings(&["alfa", "Álvarez"])[..]);
        assert_eq!(g.get("B").unwrap(), &strings(&["Beta"])[..]);
        assert_eq!(g.get("Ñ").unwrap(), &strings(&["Ñandú"])[..]);
        assert_eq!(g.get("Z").unwrap(), &strings(&["Zeta"])[..]);
    }

    #[test]
    fn test_concatenation_equals_sorted_input() {
        let items = strings(&[
            "mario", "Nuñez", "ñu", "Óscar", "", "  ", "3M", "beto", "Ana", "ana", "Zúñiga", "oso",
        ]);
        let sorted = sort_by_name(&items, name);
        let g = group_alphabetically(&items, name);
        assert_eq!(g.item_count(), items.len());
        assert_eq!(g.flatten(), sorted);
    }

    #[test]
    fn test_irregular_case_letters_keep_buckets_contiguous() {
        let items = strings(&[
            "Ivan", "ılgaz", "Zeta", "µicro", "Ørsted", "μ", "ſeñal", "Sara", "ßeta", "3M",
        ]);
        let sorted = sort_by_name(&items, name);
        let g = group_alphabetically(&items, name);
        assert_eq!(g.clone().flatten(), sorted);
        assert!(g.keys().iter().all(|k| k.chars().count() == 1));
        assert_eq!(g.get("I").unwrap(), &strings(&["ılgaz", "Ivan"])[..]);
        assert_eq!(g.get("S").unwrap(), &strings(&["Sara", "ſeñal"])[..]);
        assert_eq!(g.get(FALLBACK_BUCKET).unwrap(), &strings(&["3M", "ßeta"])[..]);
        assert_eq!(g.get("Μ").unwrap().len(), 2);
    }

    #[test]
    fn test_blank_names_go_to_fallback_bucket() {
        let items = strings(&["", "   ", "Beta"]);
        let g = group_alphabetically(&items, name);
        assert_eq!(g.keys(), vec![FALLBACK_BUCKET, "B"]);
        assert_eq!(g.get(FALLBACK_BUCKET).unwrap().len(), 2);
    }

    #[test]
    fn test_grouping_is_idempotent_and_pure() {
        let items = strings(&["Zeta", "alfa", "Beta"]);
        let before = items.clone();
        let a = group_alphabetically(&items, name);
        let b = group_alphabetically(&items, name);
        assert_eq!(a, b);
        assert_eq!(items, before);
    }

    #[test]
    fn test_first_index() {
        let items = strings(&["Beta", "alfa", "Álvarez", "Zeta", "Ñandú"]);
        let g = group_alphabetically(&items, name);
        assert_eq!(g.first_index("A"), Some(0));
        assert_eq!(g.first_index("B"), Some(2));
        assert_eq!(g.first_index("Ñ"), Some(3));
        assert_eq!(g.first_index("Z"), Some(4));
        assert_eq!(g.first_index("Q"), None);
    }

    #[test]
    fn test_letter_index() {
        let items = strings(&["alfa", "Ñandú"]);
        let g = group_alphabetically(&items, name);
        let idx = g.letter_index();
        assert_eq!(idx.len(), 27);
        assert!(idx.contains(&("A", true)));
        assert!(idx.contains(&("Ñ", true)));
        assert!(idx.contains(&("N", false)));
    }

    #[test]
    fn test_empty_input() {
        let g = group_alphabetically(&Vec::<String>::new(), name);
        assert!(g.is_empty());
    }
}
