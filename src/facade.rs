//! Collaborator-facing client: endpoint call, then normalization, then canonical record.
//! Raw payload trees never leave this module.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, Session};
use crate::error::{ClientError, ClientResult};
use crate::model::{
    DepositRecord, DueSummary, Ledger, Member, MemberDue, MemberProfile, MessageRecord, Page, ShareDetails, UserRecord,
};
use crate::normalize;
use crate::remote::{EndpointClient, HttpTransport};

#[derive(Clone)]
pub struct SocietyClient {
    endpoints: EndpointClient,
    credentials: Arc<CredentialStore>,
}

impl SocietyClient {
    pub fn new(config: &ClientConfig, credentials: Arc<CredentialStore>) -> ClientResult<Self> {
        let transport = HttpTransport::new(config, credentials.clone())?;
        Ok(Self::from_parts(EndpointClient::new(transport, config.device_name.clone()), credentials))
    }

    pub fn from_parts(endpoints: EndpointClient, credentials: Arc<CredentialStore>) -> Self {
        Self { endpoints, credentials }
    }

    /// Authenticate and persist the session. Nothing is stored unless both token and role resolve.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserRecord> {
        let raw = self.endpoints.login(email, password).await?;
        let record = normalize::login(&raw);
        let token = record.token.ok_or_else(|| ClientError::decode("login response carried no token"))?;
        let role = record.user.role.clone().ok_or_else(|| ClientError::decode("login response carried no role"))?;
        self.credentials.set(&token, &role)?;
        info!(target: "society::facade", "logged in as role '{}'", role);
        Ok(record.user)
    }

    pub async fn me(&self) -> ClientResult<UserRecord> {
        let raw = self.endpoints.me().await?;
        Ok(normalize::user(&raw))
    }

    /// Best-effort remote logout; the local session is cleared whatever the backend says.
    pub async fn logout(&self) -> ClientResult<()> {
        if self.credentials.get().is_authenticated() {
            if let Err(e) = self.endpoints.logout().await {
                warn!(target: "society::facade", code = e.code_str(), "remote logout failed: {}", e);
            }
        } else {
            debug!(target: "society::facade", "no session; skipping remote logout");
        }
        self.credentials.clear()
    }

    pub async fn change_password(&self, current: &str, new: &str) -> ClientResult<MessageRecord> {
        let raw = self.endpoints.change_password(current, new).await?;
        Ok(normalize::message(&raw))
    }

    pub async fn profile(&self) -> ClientResult<MemberProfile> {
        let raw = self.endpoints.member_profile().await?;
        Ok(normalize::profile(&raw))
    }

    pub async fn ledger(&self, year: Option<i32>) -> ClientResult<Ledger> {
        let raw = self.endpoints.member_ledger(year).await?;
        Ok(normalize::ledger(&raw))
    }

    pub async fn due_summary(&self, year: Option<i32>) -> ClientResult<DueSummary> {
        let raw = self.endpoints.member_due_summary(year).await?;
        Ok(normalize::due_summary(&raw))
    }

    pub async fn share_details(&self) -> ClientResult<ShareDetails> {
        let raw = self.endpoints.member_share_details().await?;
        Ok(normalize::share_details(&raw))
    }

    pub async fn admin_members(&self, search: Option<&str>, per_page: Option<u32>) -> ClientResult<Page<Member>> {
        let raw = self.endpoints.admin_members(search, per_page).await?;
        Ok(normalize::member_page(&raw))
    }

    pub async fn admin_deposits(&self, search: Option<&str>, per_page: Option<u32>) -> ClientResult<Page<DepositRecord>> {
        let raw = self.endpoints.admin_deposits(search, per_page).await?;
        Ok(normalize::deposit_page(&raw))
    }

    pub async fn admin_due_summary(&self, search: Option<&str>, per_page: Option<u32>) -> ClientResult<Page<MemberDue>> {
        let raw = self.endpoints.admin_due_summary(search, per_page).await?;
        Ok(normalize::member_due_page(&raw))
    }

    pub fn session(&self) -> Session { self.credentials.get() }

    pub fn subscribe(&self) -> watch::Receiver<Session> { self.credentials.subscribe() }
}
