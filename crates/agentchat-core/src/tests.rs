#[cfg(test)]
mod tests {
    use crate::chats::{validate_new_chat, ChatList};
    use crate::event_bus::EventBus;
    use crate::messages::MessageLog;
    use crate::ports::ApiPort;
    use crate::session::{AuthSession, SessionPhase, SessionRecord};
    use crate::token;
    use agentchat_types::chat::{Chat, CreateChatRequest};
    use agentchat_types::event::{AppEvent, NoticeKind};
    use agentchat_types::message::{Message, MessageEntry};
    use agentchat_types::user::{AuthData, User};
    use agentchat_types::ClientError;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;

    // ─── Fixtures ────────────────────────────────────────────

    /// Unsigned JWT with the given expiry, enough for the validator.
    fn jwt_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("{header}.{payload}.sig")
    }

    fn sample_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            secret: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sample_chat(id: &str) -> Chat {
        Chat {
            id: id.to_string(),
            bot_id: "b1".to_string(),
            user_id: "u1".to_string(),
            name: "Helper".to_string(),
            description: "A helpful bot".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            created_by: "u1".to_string(),
        }
    }

    fn sample_message(id: &str, hour: u32, minute: u32, from_user: bool) -> Message {
        Message {
            id: id.to_string(),
            chat_id: "c1".to_string(),
            content: format!("msg {id}"),
            is_user_message: from_user,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, hour, minute, 0).unwrap(),
        }
    }

    /// Mock API that only records bearer arming; the stores never reach the
    /// async endpoints in these tests (the app performs those awaits).
    struct MockApi {
        bearer: RefCell<Option<String>>,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                bearer: RefCell::new(None),
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl ApiPort for MockApi {
        async fn request_otp(&self, _email: &str) -> agentchat_types::Result<()> {
            Ok(())
        }

        async fn validate_otp(
            &self,
            _email: &str,
            _otp: &str,
        ) -> agentchat_types::Result<AuthData> {
            Err(ClientError::Network("mock".to_string()))
        }

        async fn list_chats(&self, _user_id: &str) -> agentchat_types::Result<Vec<Chat>> {
            Ok(Vec::new())
        }

        async fn create_chat(&self, _req: &CreateChatRequest) -> agentchat_types::Result<Chat> {
            Err(ClientError::Network("mock".to_string()))
        }

        async fn list_messages(&self, _chat_id: &str) -> agentchat_types::Result<Vec<Message>> {
            Ok(Vec::new())
        }

        async fn send_message(
            &self,
            _chat_id: &str,
            _content: &str,
        ) -> agentchat_types::Result<Message> {
            Err(ClientError::Network("mock".to_string()))
        }

        fn set_bearer(&self, token: Option<String>) {
            *self.bearer.borrow_mut() = token;
        }
    }

    // ─── Token validator ─────────────────────────────────────

    #[test]
    fn test_token_expired_is_invalid() {
        let token = jwt_with_exp(1_000);
        assert!(!token::is_valid_at(&token, 2_000));
    }

    #[test]
    fn test_token_future_expiry_is_valid() {
        let token = jwt_with_exp(2_000);
        assert!(token::is_valid_at(&token, 1_000));
    }

    #[test]
    fn test_token_expiry_boundary_is_invalid() {
        let token = jwt_with_exp(1_000);
        assert!(!token::is_valid_at(&token, 1_000));
    }

    #[test]
    fn test_token_malformed_never_panics() {
        for junk in ["", "not a token", "a.b.c", "a.!!!.c", "onlyonesegment"] {
            assert!(!token::is_valid_at(junk, 0), "accepted junk: {junk}");
        }
    }

    #[test]
    fn test_token_payload_without_exp_is_invalid() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"u1"}"#);
        let token = format!("{header}.{payload}.sig");
        assert!(!token::is_valid_at(&token, 0));
    }

    #[test]
    fn test_token_padded_payload_accepted() {
        // 19-byte payload, so strict encoding carries trailing padding.
        let padded = base64::engine::general_purpose::URL_SAFE.encode(br#"{"exp":99999999999}"#);
        let token = format!("h.{padded}.s");
        assert!(token::is_valid_at(&token, 1_000));
    }

    #[test]
    fn test_token_wall_clock_variant() {
        let future = Utc::now().timestamp() + 3_600;
        assert!(token::is_valid(&jwt_with_exp(future)));
        let past = Utc::now().timestamp() - 3_600;
        assert!(!token::is_valid(&jwt_with_exp(past)));
    }

    // ─── Event bus ───────────────────────────────────────────

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());

        bus.success("done");
        bus.error("oops");
        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            AppEvent::Notice {
                kind: NoticeKind::Success,
                text: "done".to_string()
            }
        );
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        bus1.emit(AppEvent::SessionExpired);
        assert!(bus2.has_pending());
        assert_eq!(bus2.drain().len(), 1);
        assert!(!bus1.has_pending());
    }

    // ─── Auth session ────────────────────────────────────────

    #[test]
    fn test_session_starts_uninitialized() {
        let session = AuthSession::new();
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert!(!session.is_initialized());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn test_session_initialize_runs_once() {
        let mut session = AuthSession::new();
        assert!(session.begin_initialize());
        assert_eq!(session.phase(), SessionPhase::Initializing);
        assert!(!session.begin_initialize());
    }

    #[test]
    fn test_session_restore_with_valid_token() {
        let api = MockApi::new();
        let mut session = AuthSession::new();
        session.begin_initialize();

        let token = jwt_with_exp(Utc::now().timestamp() + 3_600);
        let record = SessionRecord {
            user: sample_user(),
            access_token: token.clone(),
        };
        session.complete_initialize(Some(record), &api);

        assert!(session.is_initialized());
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some(token.as_str()));
        assert_eq!(api.bearer.borrow().as_deref(), Some(token.as_str()));
    }

    #[test]
    fn test_session_restore_with_expired_token_stays_unauthenticated() {
        let api = MockApi::new();
        let mut session = AuthSession::new();
        session.begin_initialize();

        let record = SessionRecord {
            user: sample_user(),
            access_token: jwt_with_exp(Utc::now().timestamp() - 3_600),
        };
        session.complete_initialize(Some(record), &api);

        assert!(session.is_initialized());
        assert!(!session.is_authenticated());
        assert!(api.bearer.borrow().is_none());
    }

    #[test]
    fn test_session_restore_with_nothing_persisted() {
        let api = MockApi::new();
        let mut session = AuthSession::new();
        session.begin_initialize();
        session.complete_initialize(None, &api);

        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_session_login_installs_state_and_returns_record() {
        let api = MockApi::new();
        let mut session = AuthSession::new();
        session.begin_initialize();
        session.complete_initialize(None, &api);

        let auth = AuthData {
            user: sample_user(),
            access_token: "tok-123".to_string(),
        };
        let record = session.complete_login(auth, &api);

        // Persisted record matches in-memory state.
        assert_eq!(record.user, *session.user().unwrap());
        assert_eq!(record.access_token, session.access_token().unwrap());
        assert!(session.is_authenticated());
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert_eq!(api.bearer.borrow().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_session_logout_clears_everything() {
        let api = MockApi::new();
        let mut session = AuthSession::new();
        session.begin_initialize();
        session.complete_initialize(None, &api);
        session.complete_login(
            AuthData {
                user: sample_user(),
                access_token: "tok".to_string(),
            },
            &api,
        );

        session.logout(&api);

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.access_token().is_none());
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(api.bearer.borrow().is_none());
    }

    #[test]
    fn test_session_expire_drops_authenticated_state() {
        let api = MockApi::new();
        let mut session = AuthSession::new();
        session.begin_initialize();
        session.complete_initialize(None, &api);
        session.complete_login(
            AuthData {
                user: sample_user(),
                access_token: "tok".to_string(),
            },
            &api,
        );

        session.expire();
        assert!(!session.is_authenticated());
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    }

    #[test]
    fn test_session_record_round_trip() {
        let record = SessionRecord {
            user: sample_user(),
            access_token: "tok".to_string(),
        };
        let raw = record.serialize().unwrap();
        assert_eq!(SessionRecord::parse(&raw), Some(record));
        assert_eq!(SessionRecord::parse("not json"), None);
    }

    // ─── Chat list ───────────────────────────────────────────

    #[test]
    fn test_chats_fetch_replaces_collection() {
        let bus = EventBus::new();
        let mut list = ChatList::new();

        assert!(list.needs_fetch("u1"));
        list.begin_fetch("u1");
        assert!(list.is_loading());
        assert!(!list.needs_fetch("u1"));

        list.resolve_fetch(Ok(vec![sample_chat("c1"), sample_chat("c2")]), &bus);
        assert!(!list.is_loading());
        assert_eq!(list.chats().len(), 2);
        assert!(list.error().is_none());
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_chats_fetch_error_keeps_prior_collection() {
        let bus = EventBus::new();
        let mut list = ChatList::new();
        list.begin_fetch("u1");
        list.resolve_fetch(Ok(vec![sample_chat("c1")]), &bus);

        list.begin_fetch("u1");
        list.resolve_fetch(Err(ClientError::Network("down".to_string())), &bus);

        assert_eq!(list.chats().len(), 1, "prior chats must survive a failed refresh");
        assert_eq!(list.error(), Some("Failed to load chats"));
        let events = bus.drain();
        assert!(matches!(
            &events[0],
            AppEvent::Notice { kind: NoticeKind::Error, .. }
        ));
    }

    #[test]
    fn test_chats_needs_fetch_tracks_user_change() {
        let bus = EventBus::new();
        let mut list = ChatList::new();
        list.begin_fetch("u1");
        list.resolve_fetch(Ok(vec![]), &bus);

        assert!(!list.needs_fetch("u1"));
        assert!(list.needs_fetch("u2"));

        list.reset();
        assert!(list.needs_fetch("u1"));
    }

    #[test]
    fn test_chats_create_prepends_and_notifies() {
        let bus = EventBus::new();
        let mut list = ChatList::new();
        list.begin_fetch("u1");
        list.resolve_fetch(Ok(vec![sample_chat("old")]), &bus);

        list.begin_create();
        let created = list.resolve_create(Ok(sample_chat("new")), &bus);

        assert_eq!(created.unwrap().id, "new");
        assert_eq!(list.chats()[0].id, "new", "new chat goes first");
        assert_eq!(list.chats()[1].id, "old");
        let events = bus.drain();
        assert!(matches!(
            &events[0],
            AppEvent::Notice { kind: NoticeKind::Success, .. }
        ));
    }

    #[test]
    fn test_chats_create_failure_returns_none() {
        let bus = EventBus::new();
        let mut list = ChatList::new();
        list.begin_create();
        let created = list.resolve_create(Err(ClientError::Network("down".to_string())), &bus);

        assert!(created.is_none());
        assert!(list.chats().is_empty());
        assert_eq!(list.error(), Some("Failed to create chatbot"));
        assert!(bus.has_pending());
    }

    #[test]
    fn test_validate_new_chat() {
        assert!(validate_new_chat("Helper").is_ok());
        assert!(validate_new_chat("   ").is_err());
        assert!(validate_new_chat("").is_err());
    }

    // ─── Message log ─────────────────────────────────────────

    #[test]
    fn test_messages_fetch_sorts_ascending() {
        let bus = EventBus::new();
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));
        assert_eq!(log.begin_fetch(), Some("c1".to_string()));

        // Backend returns 10:02 before 10:01.
        let result = Ok(vec![
            sample_message("m2", 10, 2, false),
            sample_message("m1", 10, 1, true),
        ]);
        log.resolve_fetch(result, &bus);

        let ids: Vec<&str> = log
            .entries()
            .iter()
            .map(|e| match e {
                MessageEntry::Persisted(m) => m.id.as_str(),
                _ => panic!("expected only persisted entries after a fetch"),
            })
            .collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_messages_fetch_without_selection_is_noop() {
        let mut log = MessageLog::new();
        assert!(log.begin_fetch().is_none());
        assert!(!log.is_loading());
    }

    #[test]
    fn test_messages_fetch_error_keeps_entries() {
        let bus = EventBus::new();
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));
        log.begin_fetch();
        log.resolve_fetch(Ok(vec![sample_message("m1", 10, 0, true)]), &bus);

        log.begin_fetch();
        log.resolve_fetch(Err(ClientError::Network("down".to_string())), &bus);

        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.error(), Some("Failed to load messages"));
        assert!(bus.has_pending());
    }

    #[test]
    fn test_messages_whitespace_send_rejected() {
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));

        assert!(log.begin_send("").is_none());
        assert!(log.begin_send("   \n\t").is_none());
        assert!(log.entries().is_empty(), "no optimistic entries on rejection");
        assert!(!log.is_sending());
    }

    #[test]
    fn test_messages_send_without_selection_rejected() {
        let mut log = MessageLog::new();
        assert!(log.begin_send("hello").is_none());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_messages_overlapping_send_rejected() {
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));

        let first = log.begin_send("one");
        assert!(first.is_some());
        assert!(log.is_sending());
        assert!(log.begin_send("two").is_none());
        assert_eq!(log.entries().len(), 2, "second send appended nothing");
    }

    #[test]
    fn test_messages_send_appends_echo_and_placeholder() {
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));

        let ticket = log.begin_send("  hello bot  ").unwrap();
        assert_eq!(ticket.chat_id, "c1");
        assert_eq!(ticket.content, "hello bot", "content is trimmed");

        assert_eq!(log.entries().len(), 2);
        assert!(matches!(
            &log.entries()[0],
            MessageEntry::PendingEcho { content, .. } if content == "hello bot"
        ));
        assert!(
            matches!(&log.entries()[1], MessageEntry::PendingReply { local_id } if *local_id == ticket.reply_id)
        );
    }

    #[test]
    fn test_messages_send_success_shape() {
        let bus = EventBus::new();
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));
        log.begin_fetch();
        log.resolve_fetch(Ok(vec![sample_message("m1", 9, 0, true)]), &bus);

        let ticket = log.begin_send("hello").unwrap();
        let ok = log.resolve_send(&ticket, Ok(sample_message("bot-1", 10, 0, false)), &bus);
        assert!(ok);
        assert!(!log.is_sending());

        // Prior messages, then the optimistic echo, then the real reply;
        // the placeholder is gone.
        assert_eq!(log.entries().len(), 3);
        assert!(matches!(&log.entries()[0], MessageEntry::Persisted(m) if m.id == "m1"));
        assert!(matches!(&log.entries()[1], MessageEntry::PendingEcho { .. }));
        assert!(matches!(&log.entries()[2], MessageEntry::Persisted(m) if m.id == "bot-1"));
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_messages_send_failure_keeps_echo_removes_placeholder() {
        let bus = EventBus::new();
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));

        let ticket = log.begin_send("hello").unwrap();
        let ok = log.resolve_send(&ticket, Err(ClientError::Network("down".to_string())), &bus);
        assert!(!ok);

        assert_eq!(log.entries().len(), 1);
        assert!(matches!(&log.entries()[0], MessageEntry::PendingEcho { .. }));
        assert_eq!(log.error(), Some("Failed to send message"));
        assert!(bus.has_pending());
    }

    #[test]
    fn test_messages_switching_chat_mid_send_keeps_guard_and_drops_result() {
        let bus = EventBus::new();
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));
        let ticket = log.begin_send("hello").unwrap();

        log.select_chat(Some("c2".to_string()));
        assert!(log.is_sending(), "the in-flight send still holds the flag");
        assert!(log.begin_send("again").is_none(), "no second send may start");
        assert!(log.entries().is_empty());

        let ok = log.resolve_send(&ticket, Ok(sample_message("bot-1", 10, 0, false)), &bus);
        assert!(!ok);
        assert!(!log.is_sending());
        assert!(log.entries().is_empty(), "the old chat's reply never lands here");
        assert!(!bus.has_pending(), "a dropped result is silent");

        // With the flag lifted, sending in the new chat proceeds normally.
        assert!(log.begin_send("fresh start").is_some());
    }

    #[test]
    fn test_messages_select_chat_clears_log() {
        let bus = EventBus::new();
        let mut log = MessageLog::new();
        log.select_chat(Some("c1".to_string()));
        log.begin_fetch();
        log.resolve_fetch(Ok(vec![sample_message("m1", 9, 0, true)]), &bus);

        log.select_chat(Some("c2".to_string()));
        assert!(log.entries().is_empty());
        assert!(log.error().is_none());
        assert_eq!(log.chat_id(), Some("c2"));

        // Re-selecting the same chat is not a change and clears nothing.
        log.begin_fetch();
        log.resolve_fetch(Ok(vec![sample_message("m2", 9, 5, false)]), &bus);
        log.select_chat(Some("c2".to_string()));
        assert_eq!(log.entries().len(), 1);
    }
}
