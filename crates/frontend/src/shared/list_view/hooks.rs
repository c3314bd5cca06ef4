//! Leptos-обвязка движка списков
//!
//! `use_list_view` держит контроллер, коллекцию, loading/error в сигналах и
//! сам перезапрашивает данные в серверном режиме. Ответы старых запросов
//! отбрасываются через [`RequestSequencer`], после размонтирования ничего
//! не пишется в сигналы.

use std::future::Future;

use contracts::shared::api::PaginationMeta;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::controller::{ListController, ListViewModel, PaginationMode};
use super::debounce::Debouncer;
use super::filter::FilterState;
use super::pagination::PaginationState;
use super::request_seq::RequestSequencer;
use crate::shared::api_error::ApiError;

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Значение `source`, стабильное `delay_ms` миллисекунд
pub fn use_debounced(source: Signal<String>, delay_ms: u64) -> Signal<String> {
    let (debounced, set_debounced) = signal(source.get_untracked());
    let debouncer = StoredValue::new(Debouncer::<String>::new(delay_ms));
    // Timeout отменяется при drop, поэтому хранится только последний
    let timer = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |prev: Option<()>| {
        let value = source.get();
        if prev.is_none() {
            return;
        }
        let Some(generation) = debouncer.try_update_value(|d| d.push(value, now_ms())) else {
            return;
        };
        let timeout = Timeout::new(delay_ms as u32, move || {
            let fired = debouncer.try_update_value(|d| {
                // setTimeout может сработать на миллисекунду раньше Date.now()
                let now = d.deadline().map_or_else(now_ms, |deadline| deadline.max(now_ms()));
                d.fire(generation, now)
            });
            if let Some(Some(value)) = fired {
                set_debounced.set(value);
            }
        });
        timer.try_update_value(|t| *t = Some(timeout));
    });

    on_cleanup(move || {
        debouncer.try_update_value(|d| d.cancel());
        timer.try_update_value(|t| *t = None);
    });

    debounced.into()
}

/// Ответ загрузчика: записи и, для серверного режима, метаданные страницы
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub pagination: Option<PaginationMeta>,
}

impl<T> Fetched<T> {
    pub fn all(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: None,
        }
    }

    pub fn page(items: Vec<T>, pagination: Option<PaginationMeta>) -> Self {
        Self { items, pagination }
    }
}

/// Состояние одного списка на странице. Все поля Copy.
pub struct ListHandle<T: Send + Sync + 'static> {
    pub controller: RwSignal<ListController<T>>,
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    /// Сырой текст поля поиска (до debounce)
    pub search_input: RwSignal<String>,
    pub view: Memo<ListViewModel<T>>,
    reload: Callback<()>,
}

impl<T: Send + Sync + 'static> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListHandle<T> {}

impl<T> ListHandle<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Повторить последний запрос (кнопка "Reintentar", после мутаций)
    pub fn reload(&self) {
        self.reload.run(());
    }

    pub fn mode(&self) -> PaginationMode {
        self.controller.with_untracked(|c| c.mode())
    }

    pub fn pagination(&self) -> Signal<PaginationState> {
        let view = self.view;
        Signal::derive(move || view.with(|v| v.pagination))
    }

    pub fn filter(&self) -> Signal<FilterState> {
        let controller = self.controller;
        Signal::derive(move || controller.with(|c| c.filter.clone()))
    }

    pub fn set_page(&self, page: usize) {
        let filtered_len = self.view.with_untracked(|v| v.filtered.len());
        self.controller.update(|c| {
            c.sync_total(filtered_len);
            c.pagination.set_page(page);
        });
    }

    pub fn set_page_size(&self, page_size: usize) {
        self.controller.update(|c| c.pagination.set_page_size(page_size));
    }

    pub fn set_equals(&self, field: &str, value: &str) {
        self.controller
            .update(|c| c.update_filter(|f| f.set_equals(field, value)));
    }

    pub fn set_date_range(&self, from: Option<chrono::NaiveDate>, to: Option<chrono::NaiveDate>) {
        self.controller
            .update(|c| c.update_filter(|f| f.set_date_range(from, to)));
    }

    /// Сбросить все фильтры, включая поле поиска
    pub fn clear_filters(&self) {
        self.search_input.set(String::new());
        self.controller.update(|c| c.update_filter(|f| f.clear()));
    }

    /// Открыть страницу с первой записью на букву
    pub fn jump_to_letter(&self, letter: &str) {
        let target = self.view.with_untracked(|v| {
            v.groups
                .first_index(letter)
                .map(|index| index / v.pagination.page_size())
        });
        if let Some(page) = target {
            self.set_page(page);
        }
    }

    /// Убрать удалённую запись без перезагрузки
    pub fn remove_local(&self, id: &str) {
        let id_of = self.controller.with_untracked(|c| c.config.id);
        self.items.update(|items| items.retain(|item| id_of(item) != id));
        if self.mode() == PaginationMode::Server {
            self.controller.update(|c| {
                let total = c.pagination.total_count().saturating_sub(1);
                c.pagination.set_total(total);
            });
        }
    }

    /// Заменить запись после успешного обновления
    pub fn replace_local(&self, updated: T) {
        let id_of = self.controller.with_untracked(|c| c.config.id);
        self.items.update(|items| {
            if let Some(slot) = items.iter_mut().find(|i| id_of(i) == id_of(&updated)) {
                *slot = updated;
            }
        });
    }
}

/// Подключить контроллер к загрузчику.
///
/// Серверный режим: каждое изменение фильтров/страницы/размера страницы
/// вызывает `fetch`. Клиентский режим: `fetch` один раз при монтировании,
/// дальше всё считается в памяти.
pub fn use_list_view<T, F, Fut>(controller: ListController<T>, delay_ms: u64, fetch: F) -> ListHandle<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(FilterState, PaginationState) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Fetched<T>, ApiError>> + 'static,
{
    let mode = controller.mode();
    let initial_search = controller.filter.search.clone();
    let controller = RwSignal::new(controller);
    let items = RwSignal::new(Vec::<T>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<ApiError>);
    let search_input = RwSignal::new(initial_search);
    let sequencer = StoredValue::new(RequestSequencer::new());

    let view = Memo::new(move |_| items.with(|items| controller.with(|c| c.view(items))));

    let reload = Callback::new(move |_: ()| {
        let Some(ticket) = sequencer.try_update_value(|s| s.issue()) else {
            return;
        };
        let (filter, pagination) =
            controller.with_untracked(|c| (c.filter.clone(), c.pagination));
        loading.set(true);
        let fetch = fetch.clone();
        spawn_local(async move {
            let result = fetch(filter, pagination).await;
            let accepted = sequencer
                .try_update_value(|s| s.accept(ticket))
                .unwrap_or(false);
            if !accepted {
                log::debug!("Discarding stale list response #{}", ticket.seq());
                return;
            }
            match result {
                Ok(fetched) => {
                    if let Some(meta) = fetched.pagination {
                        controller.update(|c| c.pagination.apply_server_meta(&meta));
                    }
                    items.set(fetched.items);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("List fetch failed: {}", e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    });

    // Поиск уходит в фильтр только после паузы ввода
    let debounced = use_debounced(search_input.into(), delay_ms);
    Effect::new(move |_| {
        let value = debounced.get();
        let changed = controller.with_untracked(|c| c.filter.search != value);
        if changed {
            controller.update(|c| c.update_filter(|f| f.set_search(value)));
        }
    });

    // total не входит в ключ: применение метаданных ответа не вызывает новый запрос
    let fetch_key = Memo::new(move |_| {
        controller.with(|c| match c.mode() {
            PaginationMode::Server => Some((
                c.filter.clone(),
                c.pagination.page(),
                c.pagination.page_size(),
            )),
            PaginationMode::Client => None,
        })
    });
    Effect::new(move |_| {
        fetch_key.track();
        reload.run(());
    });

    on_cleanup(move || {
        sequencer.try_update_value(|s| s.cancel_all());
    });

    log::debug!("List view mounted ({:?} mode)", mode);

    ListHandle {
        controller,
        items,
        loading,
        error,
        search_input,
        view,
        reload,
    }
}
