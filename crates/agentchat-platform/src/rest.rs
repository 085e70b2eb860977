//! REST adapter for the chatbot platform backend.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility. Every request
//! carries the armed bearer credential; every response is inspected for 401,
//! which evicts the persisted session as a side effect before the error
//! surfaces. Calls are fire-once — no retry, no backoff, no timeout.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use agentchat_core::event_bus::EventBus;
use agentchat_core::ports::{ApiPort, StoragePort};
use agentchat_core::session::SESSION_KEY;
use agentchat_types::{
    api::{CreateSessionRequest, Envelope, SendMessageRequest, ValidateSessionRequest},
    chat::{Chat, CreateChatRequest},
    config::AppConfig,
    event::AppEvent,
    message::Message,
    user::AuthData,
    ClientError, Result,
};

pub struct RestClient {
    base_url: String,
    /// Default credential attached to every request while armed.
    bearer: RefCell<Option<String>>,
    /// Needed for the 401 eviction side effect.
    storage: Rc<dyn StoragePort>,
    bus: EventBus,
}

impl RestClient {
    pub fn new(config: &AppConfig, storage: Rc<dyn StoragePort>, bus: EventBus) -> Self {
        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            bearer: RefCell::new(None),
            storage,
            bus,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> Option<String> {
        self.bearer
            .borrow()
            .as_ref()
            .map(|token| format!("Bearer {token}"))
    }

    /// 401 evicts the credential locally (best-effort) and maps to
    /// `Unauthorized`; any other non-2xx becomes an `Api` error.
    async fn check(&self, response: Response) -> Result<Response> {
        if response.status() == 401 {
            self.bearer.replace(None);
            if let Err(e) = self.storage.delete(SESSION_KEY).await {
                log::warn!("failed to evict stored session after 401: {e}");
            }
            self.bus.emit(AppEvent::SessionExpired);
            return Err(ClientError::Unauthorized);
        }
        if !response.ok() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::Api { status, message });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut builder = Request::get(&self.url(path)).query(query.iter().copied());
        if let Some(auth) = self.auth_header() {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let response = self.check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    async fn post_checked<B: Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let mut builder = Request::post(&self.url(path));
        if let Some(auth) = self.auth_header() {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .json(body)
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.check(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.post_checked(path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[async_trait(?Send)]
impl ApiPort for RestClient {
    async fn request_otp(&self, email: &str) -> Result<()> {
        let body = CreateSessionRequest {
            email: email.to_string(),
        };
        // Only the status matters; the response body is ignored.
        self.post_checked("/session/create", &body).await?;
        Ok(())
    }

    async fn validate_otp(&self, email: &str, otp: &str) -> Result<AuthData> {
        let body = ValidateSessionRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        let env: Envelope<AuthData> = self.post_json("/session/validate", &body).await?;
        Ok(env.data)
    }

    async fn list_chats(&self, user_id: &str) -> Result<Vec<Chat>> {
        let env: Envelope<Vec<Chat>> = self.get_json("/chat", &[("userId", user_id)]).await?;
        Ok(env.data)
    }

    async fn create_chat(&self, req: &CreateChatRequest) -> Result<Chat> {
        let env: Envelope<Chat> = self.post_json("/chat", req).await?;
        Ok(env.data)
    }

    async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>> {
        let env: Envelope<Vec<Message>> =
            self.get_json("/message", &[("chatId", chat_id)]).await?;
        Ok(env.data)
    }

    async fn send_message(&self, chat_id: &str, content: &str) -> Result<Message> {
        let body = SendMessageRequest {
            chat_id: chat_id.to_string(),
            content: content.to_string(),
        };
        let env: Envelope<Message> = self.post_json("/message", &body).await?;
        Ok(env.data)
    }

    fn set_bearer(&self, token: Option<String>) {
        *self.bearer.borrow_mut() = token;
    }
}
