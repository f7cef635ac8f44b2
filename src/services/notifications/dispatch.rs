//! Criação de notificações a partir de outras operações
//!
//! Falhas aqui só vão para o log: a operação que gerou a notificação já foi
//! gravada e a resposta não muda.

use actix_web::HttpRequest;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::mailer::Mailer;
use crate::models::notifications::entities::NewNotification;
use crate::models::users::entities::{User, UserStatus};
use crate::services::app_state;
use crate::storage::Storage;

/// Grava as notificações e, com e-mail habilitado, envia uma cópia a cada destinatário
pub async fn dispatch_notifications(
    request: &HttpRequest,
    storage: &Arc<dyn Storage>,
    notifications: Vec<NewNotification>,
) {
    if notifications.is_empty() {
        return;
    }

    let created = match storage.create_notifications(notifications).await {
        Ok(created) => created,
        Err(e) => {
            warn!("Failed to create notifications: {}", e);
            return;
        }
    };
    debug!("{} notification(s) created", created.len());

    let Ok(mailer) = app_state::<Mailer>(request, "Mailer") else {
        return;
    };
    if !mailer.is_enabled() {
        return;
    }

    for notification in created {
        match storage.get_user_by_id(notification.user_id).await {
            Ok(Some(user)) => match email_recipient(&user) {
                Some(email) => {
                    mailer.send_in_background(email, notification.title, notification.content)
                }
                None => debug!("Skipping email to inactive user {}", user.id),
            },
            Ok(None) => {}
            Err(e) => warn!(
                "Failed to load recipient {} for email: {}",
                notification.user_id, e
            ),
        }
    }
}

/// Só contas ativas recebem e-mail
fn email_recipient(user: &User) -> Option<String> {
    (user.status == UserStatus::Active).then(|| user.email.clone())
}

/// Destinatários sem repetição e sem o autor da ação
pub fn recipients_except(member_ids: Vec<i64>, author_id: i64) -> Vec<i64> {
    let mut ids: Vec<i64> = member_ids.into_iter().filter(|id| *id != author_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn user(status: UserStatus) -> User {
        User {
            id: 9,
            name: "Ana".to_string(),
            email: "ana@npj.local".to_string(),
            password_hash: String::new(),
            phone: None,
            registration: None,
            role: UserRole::Aluno,
            status,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_inactive_users_get_no_email() {
        assert_eq!(
            email_recipient(&user(UserStatus::Active)).as_deref(),
            Some("ana@npj.local")
        );
        assert!(email_recipient(&user(UserStatus::Inactive)).is_none());
        assert!(email_recipient(&user(UserStatus::Suspended)).is_none());
    }

    #[test]
    fn test_recipients_skip_author_and_duplicates() {
        assert_eq!(recipients_except(vec![4, 2, 7, 2, 4], 7), vec![2, 4]);
        assert!(recipients_except(vec![3], 3).is_empty());
    }
}
