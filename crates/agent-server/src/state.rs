//! Application State

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use agent_core::{Agent, AgentConfig, LlmProvider, Session, SessionId, ToolRegistry};

/// One browser conversation and the agent answering it
pub struct ChatSession {
    pub session: Session,
    pub agent: Agent,
}

/// Guarded by its own lock so a slow answer in one session never blocks
/// another.
pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Completion provider (None when the API key is missing)
    pub provider: Option<Arc<dyn LlmProvider>>,

    /// Why `provider` is missing
    pub config_error: Option<String>,

    /// Tools presented to the model
    pub tools: Arc<ToolRegistry>,

    /// Loop configuration for every new agent
    pub agent_config: AgentConfig,

    /// Live sessions by id
    pub sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,

    /// Sessions untouched for this long are dropped
    pub idle_timeout: Duration,
}

impl AppState {
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, agent_config: AgentConfig) -> Self {
        Self {
            provider: Some(provider),
            config_error: None,
            tools,
            agent_config,
            sessions: Arc::default(),
            idle_timeout: Duration::hours(1),
        }
    }

    /// State that serves the UI but refuses to chat
    pub fn unconfigured(error: impl Into<String>, tools: Arc<ToolRegistry>, agent_config: AgentConfig) -> Self {
        Self {
            provider: None,
            config_error: Some(error.into()),
            tools,
            agent_config,
            sessions: Arc::default(),
            idle_timeout: Duration::hours(1),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// A fresh agent sharing nothing with existing sessions but the provider
    /// and the tools
    pub fn build_agent(&self, provider: Arc<dyn LlmProvider>) -> Agent {
        Agent::new(provider, Arc::clone(&self.tools), self.agent_config.clone())
    }

    /// Register a new empty session
    pub async fn open_session(&self, provider: Arc<dyn LlmProvider>) -> SharedSession {
        let chat = ChatSession {
            session: Session::new(self.agent_config.generation.model.clone()),
            agent: self.build_agent(provider),
        };
        let id = chat.session.id.clone();
        let shared = Arc::new(Mutex::new(chat));
        self.evict_idle(Utc::now()).await;
        self.sessions.write().await.insert(id, Arc::clone(&shared));
        shared
    }

    pub async fn session(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Forget a session; false when it was not live
    pub async fn remove_session(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Drop every session idle for at least `idle_timeout` as of `now`.
    ///
    /// A session whose lock is held is mid-turn and always survives.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, shared| match shared.try_lock() {
            Ok(chat) => now - chat.session.updated_at < self.idle_timeout,
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!("Evicted {} idle sessions", evicted);
        }
        evicted
    }
}
