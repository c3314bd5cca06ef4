//! Универсальный контроллер списка
//!
//! Один контроллер на все каталоги (компании, контрагенты, формы, шаблоны,
//! коды): страница описывает свои поля через [`ListConfig`], а цепочка
//! фильтр -> сортировка -> группировка -> пагинация общая.

use super::filter::{apply_filters, DateField, FilterState, TextField};
use super::grouping::{group_sorted, sort_by_name, Grouping};
use super::pagination::{paginate, PageView, PaginationState};

/// Подпись для записей с пустым именем
pub const NAME_PLACEHOLDER: &str = "Sin nombre";

/// Где режется страница
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// Бэкенд фильтрует и отдаёт одну страницу + total
    Server,
    /// Небольшой каталог грузится целиком и фильтруется в памяти
    Client,
}

/// Описание полей записи для фильтров и группировки
pub struct ListConfig<T> {
    /// Идентификатор записи (ключ строки, удаление из локального списка)
    pub id: fn(&T) -> &str,
    /// Отображаемое имя, ключ сортировки и группировки
    pub display_name: fn(&T) -> &str,
    /// Подпись для записей без имени
    pub placeholder: &'static str,
    /// Поля текстового поиска (OR между полями)
    pub text_fields: Vec<TextField<T>>,
    /// Поля фильтров на равенство: имя фильтра -> извлекатель
    pub equality_fields: Vec<(&'static str, TextField<T>)>,
    /// Поле для фильтра по периоду
    pub date_field: Option<DateField<T>>,
    pub mode: PaginationMode,
}

impl<T> Clone for ListConfig<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            display_name: self.display_name,
            placeholder: self.placeholder,
            text_fields: self.text_fields.clone(),
            equality_fields: self.equality_fields.clone(),
            date_field: self.date_field,
            mode: self.mode,
        }
    }
}

impl<T> ListConfig<T> {
    pub fn equality_field(&self, field: &str) -> Option<TextField<T>> {
        self.equality_fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, extract)| *extract)
    }

    /// Имя для показа: пустое заменяется на placeholder
    pub fn label<'a>(&self, item: &'a T) -> &'a str {
        let name = (self.display_name)(item);
        if name.trim().is_empty() {
            self.placeholder
        } else {
            name
        }
    }
}

/// Результат обработки коллекции для отрисовки
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel<T> {
    /// Все записи после фильтров в порядке сортировки
    pub filtered: Vec<T>,
    /// Текущая страница
    pub page: PageView<T>,
    /// Алфавитные корзины по отфильтрованному набору
    pub groups: Grouping<T>,
    /// Пагинация, согласованная с этим набором (страница зажата)
    pub pagination: PaginationState,
}

impl<T> Default for ListViewModel<T> {
    fn default() -> Self {
        Self {
            filtered: Vec::new(),
            page: PageView::default(),
            groups: Grouping::default(),
            pagination: PaginationState::default(),
        }
    }
}

/// Состояние одного экземпляра списка
pub struct ListController<T> {
    pub config: ListConfig<T>,
    pub filter: FilterState,
    pub pagination: PaginationState,
}

impl<T> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            filter: self.filter.clone(),
            pagination: self.pagination,
        }
    }
}

impl<T: Clone> ListController<T> {
    pub fn new(config: ListConfig<T>, page_size: usize) -> Self {
        Self {
            config,
            filter: FilterState::default(),
            pagination: PaginationState::new(page_size),
        }
    }

    pub fn mode(&self) -> PaginationMode {
        self.config.mode
    }

    /// Изменение фильтров возвращает на первую страницу
    pub fn update_filter(&mut self, f: impl FnOnce(&mut FilterState)) {
        let before = self.filter.clone();
        f(&mut self.filter);
        if self.filter != before {
            self.pagination.reset_page();
        }
    }

    /// Клиентский режим: привести total к размеру отфильтрованного набора
    pub fn sync_total(&mut self, filtered_len: usize) {
        if self.config.mode == PaginationMode::Client {
            self.pagination.set_total(filtered_len);
        }
    }

    /// Построить модель представления. Ни контроллер, ни исходная коллекция
    /// не меняются; зажатая пагинация возвращается в модели.
    ///
    /// В серверном режиме `items` это уже страница с бэкенда: фильтры и срез
    /// применены на сервере, клиент только группирует.
    pub fn view(&self, items: &[T]) -> ListViewModel<T> {
        let display_name = self.config.display_name;
        let mut pagination = self.pagination;
        match self.config.mode {
            PaginationMode::Server => {
                let page = PageView::from_server(items.to_vec(), &pagination);
                let groups = group_sorted(sort_by_name(items, display_name), display_name);
                ListViewModel {
                    filtered: items.to_vec(),
                    page,
                    groups,
                    pagination,
                }
            }
            PaginationMode::Client => {
                let filtered = apply_filters(items, &self.filter, &self.config);
                let sorted = sort_by_name(&filtered, display_name);
                let page = paginate(&sorted, &mut pagination);
                let groups = group_sorted(sorted.clone(), display_name);
                ListViewModel {
                    filtered: sorted,
                    page,
                    groups,
                    pagination,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::test_support::{config, row, Row};

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn contractors() -> Vec<Row> {
        vec![
            row("Beta", Some("active"), None, None, None),
            row("alfa", Some("active"), None, None, None),
            row("Álvarez", Some("inactive"), None, None, None),
            row("Zeta", Some("active"), None, None, None),
            row("Ñandú", Some("active"), None, None, None),
        ]
    }

    #[test]
    fn test_client_pipeline() {
        let mut c = ListController::new(config(PaginationMode::Client), 2);
        let items = contractors();
        let vm = c.view(&items);
        assert_eq!(names(&vm.filtered), vec!["alfa", "Álvarez", "Beta", "Ñandú", "Zeta"]);
        assert_eq!(names(&vm.page.page_items), vec!["alfa", "Álvarez"]);
        assert_eq!(vm.page.page_count, 3);
        assert_eq!(vm.groups.keys(), vec!["A", "B", "Ñ", "Z"]);

        c.update_filter(|f| f.set_equals("status", "active"));
        let vm = c.view(&items);
        assert_eq!(names(&vm.filtered), vec!["alfa", "Beta", "Ñandú", "Zeta"]);
        assert_eq!(vm.page.total_count, 4);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut c = ListController::new(config(PaginationMode::Client), 2);
        let items = contractors();
        c.sync_total(items.len());
        c.pagination.set_page(2);
        assert_eq!(c.pagination.page(), 2);
        c.update_filter(|f| f.set_search("a"));
        assert_eq!(c.pagination.page(), 0);

        // то же значение фильтра не сбрасывает страницу
        let vm = c.view(&items);
        c.sync_total(vm.filtered.len());
        c.pagination.set_page(1);
        c.update_filter(|f| f.set_search("a"));
        assert_eq!(c.pagination.page(), 1);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let mut c = ListController::new(config(PaginationMode::Client), 10);
        c.update_filter(|f| f.set_search("a"));
        let items = contractors();
        let pagination_before = c.pagination;
        let before = items.clone();
        let a = c.view(&items);
        let b = c.view(&items);
        assert_eq!(a, b);
        assert_eq!(items, before);
        assert_eq!(c.pagination, pagination_before);
    }

    #[test]
    fn test_view_clamps_stale_page() {
        let mut c = ListController::new(config(PaginationMode::Client), 2);
        let items = contractors();
        c.sync_total(items.len());
        c.pagination.set_page(2);
        c.filter.set_equals("status", "inactive");
        let vm = c.view(&items);
        assert_eq!(vm.pagination.page(), 0);
        assert_eq!(names(&vm.page.page_items), vec!["Álvarez"]);
    }

    #[test]
    fn test_server_mode_does_not_reslice_or_filter() {
        let mut c = ListController::new(config(PaginationMode::Server), 2);
        c.update_filter(|f| f.set_equals("status", "inactive"));
        c.pagination.set_total(23);
        let items = contractors();
        let vm = c.view(&items);
        assert_eq!(vm.page.page_items.len(), 5);
        assert_eq!(vm.page.total_count, 23);
        assert_eq!(vm.page.page_count, 12);
        assert_eq!(vm.groups.item_count(), 5);
    }

    #[test]
    fn test_label_placeholder() {
        let c = config(PaginationMode::Client);
        let blank = row("  ", None, None, None, None);
        assert_eq!(c.label(&blank), c.placeholder);
        let named = row("Beta", None, None, None, None);
        assert_eq!(c.label(&named), "Beta");
    }
}
