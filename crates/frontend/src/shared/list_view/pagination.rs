//! Пагинация списка: состояние страницы и срез данных
//!
//! В UI страницы нумеруются с 0, на проводе с 1. Переводить номер
//! страницы можно только через [`to_wire_page`] / [`from_wire_page`].

use contracts::shared::api::PaginationMeta;

/// Номер страницы UI (с 0) -> номер страницы API (с 1)
pub fn to_wire_page(page: usize) -> usize {
    page + 1
}

/// Номер страницы API (с 1) -> номер страницы UI (с 0)
pub fn from_wire_page(page: usize) -> usize {
    page.saturating_sub(1)
}

/// Состояние пагинации, общее для таблицы (desktop) и карточек (mobile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page: usize,
    page_size: usize,
    total_count: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(25)
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn page_count(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    /// Последняя допустимая страница (0 для пустого списка)
    pub fn last_page(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Смещение первой записи страницы
    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }

    pub fn wire_page(&self) -> usize {
        to_wire_page(self.page)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.last_page());
    }

    /// Смена размера страницы всегда возвращает на первую страницу
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.page_size = page_size;
        self.page = 0;
    }

    pub fn set_total(&mut self, total: usize) {
        self.total_count = total;
        self.page = self.page.min(self.last_page());
    }

    /// Сброс на первую страницу (при смене фильтров)
    pub fn reset_page(&mut self) {
        self.page = 0;
    }

    /// Применить метаданные пагинации из ответа сервера
    pub fn apply_server_meta(&mut self, meta: &PaginationMeta) {
        if meta.limit > 0 {
            self.page_size = meta.limit;
        }
        self.total_count = meta.total;
        self.page = from_wire_page(meta.page).min(self.last_page());
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }
}

/// Готовая к отрисовке страница
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub page_items: Vec<T>,
    pub total_count: usize,
    pub page_count: usize,
}

impl<T> PageView<T> {
    /// Серверная пагинация: страница уже вырезана бэкендом, повторно не режем
    pub fn from_server(items: Vec<T>, state: &PaginationState) -> Self {
        Self {
            page_items: items,
            total_count: state.total_count(),
            page_count: state.page_count(),
        }
    }
}

impl<T> Default for PageView<T> {
    fn default() -> Self {
        Self {
            page_items: Vec::new(),
            total_count: 0,
            page_count: 0,
        }
    }
}

/// Клиентская пагинация: срез `[page*size, (page+1)*size)` отфильтрованного набора
///
/// Состояние синхронизируется с длиной набора (страница зажимается).
pub fn paginate<T: Clone>(items: &[T], state: &mut PaginationState) -> PageView<T> {
    state.set_total(items.len());
    let start = state.offset().min(items.len());
    let end = (start + state.page_size()).min(items.len());
    PageView {
        page_items: items[start..end].to_vec(),
        total_count: items.len(),
        page_count: state.page_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let mut s = PaginationState::new(10);
        s.set_total(23);
        assert_eq!(s.page_count(), 3);
        s.set_total(0);
        assert_eq!(s.page_count(), 0);
        assert_eq!(s.last_page(), 0);
        s.set_total(30);
        assert_eq!(s.page_count(), 3);
    }

    #[test]
    fn test_resize_resets_page() {
        let mut s = PaginationState::new(10);
        s.set_total(23);
        s.set_page(5);
        assert_eq!(s.page(), 2);
        s.set_page_size(25);
        assert_eq!(s.page(), 0);
        assert_eq!(s.page_count(), 1);
    }

    #[test]
    fn test_zero_page_size_is_ignored() {
        let mut s = PaginationState::new(0);
        assert_eq!(s.page_size(), 1);
        s.set_page_size(0);
        assert_eq!(s.page_size(), 1);
    }

    #[test]
    fn test_page_never_out_of_range_after_resize() {
        for total in 0..60usize {
            for size in 1..15usize {
                for page in 0..20usize {
                    let mut s = PaginationState::new(7);
                    s.set_total(total);
                    s.set_page(page);
                    s.set_page_size(size);
                    let max = total.div_ceil(size).saturating_sub(1);
                    assert!(s.page() <= max);
                    s.set_total(total / 2);
                    assert!(s.page() <= (total / 2).div_ceil(size).saturating_sub(1));
                }
            }
        }
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut s = PaginationState::new(10);
        s.set_total(100);
        s.set_page(9);
        assert_eq!(s.page(), 9);
        s.set_total(35);
        assert_eq!(s.page(), 3);
    }

    #[test]
    fn test_client_slice() {
        let items: Vec<u32> = (0..23).collect();
        let mut s = PaginationState::new(10);
        let view = paginate(&items, &mut s);
        assert_eq!(view.page_items, (0..10).collect::<Vec<_>>());
        assert_eq!(view.total_count, 23);
        assert_eq!(view.page_count, 3);

        s.set_page(2);
        let view = paginate(&items, &mut s);
        assert_eq!(view.page_items, vec![20, 21, 22]);
    }

    #[test]
    fn test_client_slice_clamps_when_items_shrink() {
        let items: Vec<u32> = (0..23).collect();
        let mut s = PaginationState::new(10);
        paginate(&items, &mut s);
        s.set_page(2);
        // после фильтрации осталось 5 записей
        let view = paginate(&items[..5], &mut s);
        assert_eq!(s.page(), 0);
        assert_eq!(view.page_items.len(), 5);
    }

    #[test]
    fn test_wire_translation() {
        assert_eq!(to_wire_page(0), 1);
        assert_eq!(from_wire_page(1), 0);
        assert_eq!(from_wire_page(0), 0);
        assert_eq!(from_wire_page(to_wire_page(4)), 4);
    }

    #[test]
    fn test_server_meta() {
        let mut s = PaginationState::new(10);
        s.apply_server_meta(&PaginationMeta {
            total: 23,
            page: 3,
            limit: 10,
        });
        assert_eq!(s.page(), 2);
        assert_eq!(s.total_count(), 23);
        assert!(!s.has_next());
        assert!(s.has_prev());

        let view = PageView::from_server(vec!["x"; 3], &s);
        assert_eq!(view.page_items.len(), 3);
        assert_eq!(view.total_count, 23);
        assert_eq!(view.page_count, 3);
    }
}
