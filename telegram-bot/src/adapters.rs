use chat_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message to core message. Non-text messages keep `text: None`.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            text: self.0.text().map(str::to_string),
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.display_name(), "Test");
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    #[test]
    fn test_telegram_user_wrapper_without_username() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(456),
            is_bot: false,
            first_name: "Minimal".to_string(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 456);
        assert_eq!(core_user.username, None);
        assert_eq!(core_user.first_name, Some("Minimal".to_string()));
    }
}
