//! Защита от гонки запросов: применяется только ответ последнего запроса

/// Билет запроса; номер растёт монотонно в пределах одного списка
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: u64,
    applied: Option<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Выдать билет новому запросу; все предыдущие становятся устаревшими
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Можно ли применить ответ. Возвращает true не более одного раза на билет.
    pub fn accept(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_latest(ticket) || self.applied == Some(ticket.0) {
            return false;
        }
        self.applied = Some(ticket.0);
        true
    }

    /// Игнорировать все запросы в полёте (уход со страницы)
    pub fn cancel_all(&mut self) {
        self.issued += 1;
    }

    /// Есть ли запрос, ответ на который ещё не применён
    pub fn in_flight(&self) -> bool {
        self.applied != Some(self.issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        // второй ответ пришёл раньше
        assert!(seq.accept(second));
        // первый пришёл позже и устарел
        assert!(!seq.accept(first));
    }

    #[test]
    fn test_old_response_ignored_even_if_first_to_arrive() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.accept(first));
        assert!(seq.in_flight());
        assert!(seq.accept(second));
        assert!(!seq.in_flight());
    }

    #[test]
    fn test_ticket_accepted_once() {
        let mut seq = RequestSequencer::new();
        let t = seq.issue();
        assert!(seq.accept(t));
        assert!(!seq.accept(t));
    }

    #[test]
    fn test_cancel_all() {
        let mut seq = RequestSequencer::new();
        let t = seq.issue();
        seq.cancel_all();
        assert!(!seq.accept(t));
        let next = seq.issue();
        assert!(next > t);
        assert!(seq.accept(next));
    }
}
