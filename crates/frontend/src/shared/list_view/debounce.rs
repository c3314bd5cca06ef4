//! Debounce без привязки к UI-фреймворку
//!
//! Часы передаются явно (миллисекунды), поэтому логика проверяется
//! тестами, а в браузере ею управляет `use_debounced` через `gloo-timers`.

/// Значение по умолчанию для поля поиска
pub const DEFAULT_DELAY_MS: u64 = 300;

/// "Последний выигрывает": наружу уходит только значение, которое
/// не менялось `delay_ms` миллисекунд. Каждый `push` отменяет предыдущее.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<Pending<T>>,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: u64,
    generation: u64,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
            generation: 0,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Новое входное значение; возвращает поколение для таймера
    pub fn push(&mut self, value: T, now_ms: u64) -> u64 {
        self.generation += 1;
        self.pending = Some(Pending {
            value,
            deadline: now_ms + self.delay_ms,
            generation: self.generation,
        });
        self.generation
    }

    /// Забрать значение, если оно стабильно `delay_ms`. Выдаётся один раз.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now_ms >= p.deadline);
        if ready {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Срабатывание таймера конкретного поколения; устаревшие таймеры игнорируются
    pub fn fire(&mut self, generation: u64, now_ms: u64) -> Option<T> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == generation);
        if current {
            self.poll(now_ms)
        } else {
            None
        }
    }

    /// Отменить ожидающее значение (размонтирование, очистка поиска)
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Когда ожидающее значение можно будет забрать
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_final_value_emitted_once() {
        let mut d = Debouncer::new(300);
        d.push("a", 0);
        d.push("ab", 100);
        d.push("abc", 250);
        assert_eq!(d.poll(400), None);
        assert_eq!(d.poll(549), None);
        assert_eq!(d.poll(550), Some("abc"));
        assert_eq!(d.poll(1000), None);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut d = Debouncer::new(300);
        let g1 = d.push("a", 0);
        let g2 = d.push("ab", 200);
        // таймер первого значения срабатывает, но значение уже заменено
        assert_eq!(d.fire(g1, 300), None);
        assert!(d.is_pending());
        assert_eq!(d.fire(g2, 500), Some("ab"));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut d = Debouncer::new(300);
        let g = d.push(1, 0);
        d.cancel();
        assert_eq!(d.fire(g, 1000), None);
        assert_eq!(d.poll(1000), None);
    }

    #[test]
    fn test_sequence_of_bursts() {
        let mut d = Debouncer::new(100);
        let mut emitted = Vec::new();
        for (t, v) in [(0, 1), (50, 2), (300, 3), (320, 4), (330, 5)] {
            if let Some(x) = d.poll(t) {
                emitted.push(x);
            }
            d.push(v, t);
        }
        if let Some(x) = d.poll(1000) {
            emitted.push(x);
        }
        assert_eq!(emitted, vec![2, 5]);
        assert_eq!(d.deadline(), None);
    }
}
