use chrono::{DateTime, Utc};
use contracts::domain::a005_invitation_code::aggregate::{
    BatchAction, BatchScheduleRequest, BatchStatus,
};

use crate::domain::a005_invitation_code::csv_import::ImportPreview;

/// Кнопки управления для текущего состояния пакета
pub fn available_actions(status: BatchStatus) -> &'static [BatchAction] {
    match status {
        BatchStatus::Scheduled | BatchStatus::Paused => &[BatchAction::Execute, BatchAction::Cancel],
        BatchStatus::Running => &[BatchAction::Pause, BatchAction::Cancel],
        _ => &[],
    }
}

/// Ожидаемое состояние после успешной команды
pub fn status_after(action: BatchAction) -> BatchStatus {
    match action {
        BatchAction::Execute => BatchStatus::Running,
        BatchAction::Pause => BatchStatus::Paused,
        BatchAction::Cancel => BatchStatus::Cancelled,
    }
}

/// Запрос на планирование; None, пока в файле есть ошибки
pub fn build_request(
    preview: &ImportPreview,
    scheduled_at: Option<DateTime<Utc>>,
    send_email: bool,
) -> Option<BatchScheduleRequest> {
    preview.is_ready().then(|| BatchScheduleRequest {
        invitations: preview.records.clone(),
        scheduled_at,
        send_email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_invitation_code::csv_import::parse_invitations;

    #[test]
    fn test_actions_follow_status() {
        assert_eq!(
            available_actions(BatchStatus::Scheduled),
            &[BatchAction::Execute, BatchAction::Cancel]
        );
        assert_eq!(
            available_actions(BatchStatus::Running),
            &[BatchAction::Pause, BatchAction::Cancel]
        );
        for status in [BatchStatus::Completed, BatchStatus::Cancelled, BatchStatus::Failed] {
            assert!(status.is_terminal());
            assert!(available_actions(status).is_empty());
        }
        assert_eq!(status_after(BatchAction::Pause), BatchStatus::Paused);
        assert_eq!(
            available_actions(status_after(BatchAction::Pause)),
            &[BatchAction::Execute, BatchAction::Cancel]
        );
    }

    #[test]
    fn test_request_only_for_clean_file() {
        let clean = parse_invitations("email\nana@andes.cl\n").unwrap();
        let request = build_request(&clean, None, true).unwrap();
        assert_eq!(request.invitations.len(), 1);
        assert!(request.send_email);
        assert!(request.validate().is_ok());

        let dirty = parse_invitations("email\nana@andes.cl\nmal\n").unwrap();
        assert!(build_request(&dirty, None, true).is_none());
        assert!(build_request(&ImportPreview::default(), None, false).is_none());
    }
}
