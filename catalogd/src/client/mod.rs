//! Client-side reconciliation cache.
//!
//! [`CatalogClient`] keeps local copies of both catalog lists and reconciles
//! them against the server: it seeds an empty catalog from the bundled
//! fallback dataset, serves the fallback outright when the server is
//! unreachable, and refetches both lists wholesale after every successful
//! mutation. The server is always the source of truth; the client never
//! patches its lists locally.

pub mod fallback;

use tracing::instrument;

use crate::{
    api::models::{
        CreatedResponse, MessageResponse,
        auth::{LoginRequest, LoginResponse},
        prompts::{PromptPayload, PromptRecord},
        seed::SeedRequest,
        tools::{ToolPayload, ToolRecord},
    },
    types::{PromptId, ToolId},
};
pub use fallback::FallbackCatalog;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server could not be reached or returned an unreadable response
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("server rejected the request ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },

    /// A mutation was attempted without logging in first
    #[error("no active session; call login first")]
    NotLoggedIn,
}

/// An authenticated session held by the client.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub username: String,
}

pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    fallback: FallbackCatalog,
    session: Option<Session>,
    tools: Vec<ToolRecord>,
    prompts: Vec<PromptRecord>,
    offline: bool,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_fallback(base_url, FallbackCatalog::bundled())
    }

    pub fn with_fallback(base_url: impl Into<String>, fallback: FallbackCatalog) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback,
            session: None,
            tools: Vec::new(),
            prompts: Vec::new(),
            offline: false,
        }
    }

    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    pub fn prompts(&self) -> &[PromptRecord] {
        &self.prompts
    }

    /// True when the lists currently come from the bundled fallback.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Routing lookup only; slugs are display attributes, never mutation keys.
    pub fn find_tool_by_slug(&self, slug: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|t| t.payload.slug.as_deref() == Some(slug))
    }

    pub fn find_prompt_by_slug(&self, slug: &str) -> Option<&PromptRecord> {
        self.prompts.iter().find(|p| p.payload.slug.as_deref() == Some(slug))
    }

    /// Reconcile the local lists against the server.
    ///
    /// An empty tool list triggers a seed from the fallback dataset followed
    /// by a re-read. Transport failure anywhere in that sequence, including
    /// the seed call and the post-seed re-read, switches to the fallback
    /// lists instead of erroring: an unreachable server must not take the
    /// caller down.
    #[instrument(skip_all)]
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.reconcile().await {
            Ok(()) => {
                self.offline = false;
                Ok(())
            }
            Err(ClientError::Transport(error)) => {
                tracing::warn!(%error, "Catalog server unreachable, serving bundled fallback");
                self.tools = self.fallback.tool_records();
                self.prompts = self.fallback.prompt_records();
                self.offline = true;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn reconcile(&mut self) -> Result<(), ClientError> {
        let (tools, prompts) = self.fetch_lists().await?;
        if tools.is_empty() {
            tracing::info!("Catalog is empty, seeding from bundled fallback");
            self.seed().await?;
            let (tools, prompts) = self.fetch_lists().await?;
            self.tools = tools;
            self.prompts = prompts;
        } else {
            self.tools = tools;
            self.prompts = prompts;
        }
        Ok(())
    }

    #[instrument(skip_all, fields(username))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body: LoginResponse = response.json().await?;
        self.session = Some(Session {
            token: body.token,
            username: body.username,
        });
        Ok(())
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Ask the server whether the held token is still good; drop the session
    /// when it is not. Returns whether a valid session remains.
    #[instrument(skip_all)]
    pub async fn verify_session(&mut self) -> Result<bool, ClientError> {
        let Some(session) = &self.session else {
            return Ok(false);
        };

        let response = self
            .http
            .get(format!("{}/session", self.base_url))
            .bearer_auth(&session.token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(true)
        } else {
            tracing::info!(status = %response.status(), "Server rejected session token, dropping session");
            self.session = None;
            Ok(false)
        }
    }

    pub async fn create_tool(&mut self, payload: &ToolPayload) -> Result<ToolId, ClientError> {
        let token = self.require_session()?;
        let response = self
            .http
            .post(format!("{}/tools", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body: CreatedResponse = response.json().await?;
        self.refetch().await?;
        Ok(body.id)
    }

    pub async fn update_tool(&mut self, id: ToolId, payload: &ToolPayload) -> Result<(), ClientError> {
        let token = self.require_session()?;
        let response = self
            .http
            .put(format!("{}/tools/{id}", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        self.refetch().await
    }

    pub async fn delete_tool(&mut self, id: ToolId) -> Result<(), ClientError> {
        let token = self.require_session()?;
        let response = self
            .http
            .delete(format!("{}/tools/{id}", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        self.refetch().await
    }

    pub async fn create_prompt(&mut self, payload: &PromptPayload) -> Result<PromptId, ClientError> {
        let token = self.require_session()?;
        let response = self
            .http
            .post(format!("{}/prompts", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body: CreatedResponse = response.json().await?;
        self.refetch().await?;
        Ok(body.id)
    }

    pub async fn update_prompt(&mut self, id: PromptId, payload: &PromptPayload) -> Result<(), ClientError> {
        let token = self.require_session()?;
        let response = self
            .http
            .put(format!("{}/prompts/{id}", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        self.refetch().await
    }

    pub async fn delete_prompt(&mut self, id: PromptId) -> Result<(), ClientError> {
        let token = self.require_session()?;
        let response = self
            .http
            .delete(format!("{}/prompts/{id}", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        self.refetch().await
    }

    fn require_session(&self) -> Result<String, ClientError> {
        self.session
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ClientError::NotLoggedIn)
    }

    /// Replace both lists from the server. Mutation paths call this instead
    /// of patching locally.
    async fn refetch(&mut self) -> Result<(), ClientError> {
        let (tools, prompts) = self.fetch_lists().await?;
        self.tools = tools;
        self.prompts = prompts;
        self.offline = false;
        Ok(())
    }

    async fn fetch_lists(&self) -> Result<(Vec<ToolRecord>, Vec<PromptRecord>), ClientError> {
        let tools = self
            .http
            .get(format!("{}/tools", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let prompts = self
            .http
            .get(format!("{}/prompts", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok((tools, prompts))
    }

    async fn seed(&self) -> Result<(), ClientError> {
        let body = SeedRequest {
            tools: self.fallback.tools.clone(),
            prompts: self.fallback.prompts.clone(),
        };
        self.http
            .post(format!("{}/seed", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

async fn rejection(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    ClientError::Rejected { status, message }
}
