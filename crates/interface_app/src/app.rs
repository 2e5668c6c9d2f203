//! Application facade

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use core_kernel::{Address, Clock, Money, PoolId, RequestId, Token};
use domain_claims::{ClaimRules, Vote, VoteReceipt};
use domain_pool::{
    pending_actions, DepositReceipt, PayoutOutcome, PendingAction, Pool, PoolConfig, PoolError,
    PremiumStanding, PremiumStatus,
};
use infra_store::LedgerStore;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::session::{Identity, Session};
use crate::views::{PoolSummary, PremiumOverview, TokenInfo};

/// Entry point for every user-facing operation
///
/// Cheap to share behind an `Arc`; all state lives in the store and the
/// session, both of which synchronize internally.
pub struct BreadfundApp {
    store: Arc<LedgerStore>,
    clock: Arc<dyn Clock>,
    rules: ClaimRules,
    session: Session,
}

impl BreadfundApp {
    pub fn new(store: Arc<LedgerStore>, clock: Arc<dyn Clock>, rules: ClaimRules, session: Session) -> Self {
        Self {
            store,
            clock,
            rules,
            session,
        }
    }

    /// Builds the facade from configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the mock address, quorum ratio or cap
    /// multiplier is invalid.
    pub fn from_config(config: &AppConfig, store: Arc<LedgerStore>, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let address = Address::parse(&config.mock_address)
            .map_err(|e| AppError::Configuration(format!("mock_address: {}", e)))?;
        let rules = config
            .claim_rules()
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        let session = Session::new(
            Identity {
                address,
                name: config.mock_name.clone(),
            },
            Duration::from_millis(config.connect_delay_ms),
        );
        Ok(Self::new(store, clock, rules, session))
    }

    pub fn store(&self) -> &Arc<LedgerStore> {
        &self.store
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub async fn connect_identity(&self) -> Identity {
        self.session.connect().await
    }

    pub async fn disconnect_identity(&self) {
        self.session.disconnect().await
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        self.session.current().await
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Creates a pool owned by the connected identity
    #[instrument(skip_all, fields(name = %config.name))]
    pub async fn create_pool(&self, config: PoolConfig) -> Result<PoolId, AppError> {
        let identity = self.session.current().await.ok_or(AppError::NotAuthenticated)?;
        let pool = Pool::create(identity.address, &config, self.clock.now())?;
        let id = self.store.insert(pool).await?;
        info!(pool_id = %id, "Pool created");
        Ok(id)
    }

    /// Records a premium payment by `member`
    #[instrument(skip_all, fields(pool_id = %pool_id, member = %member))]
    pub async fn record_deposit(
        &self,
        pool_id: PoolId,
        member: &Address,
        amount: Decimal,
    ) -> Result<DepositReceipt, AppError> {
        let now = self.clock.now();
        let receipt = self
            .store
            .mutate(pool_id, |pool| pool.record_deposit(member, amount, now))
            .await?;
        info!(amount = %receipt.amount, balance = %receipt.pool_balance, "Deposit recorded");
        Ok(receipt)
    }

    /// Opens a withdrawal request by `requester`
    #[instrument(skip_all, fields(pool_id = %pool_id, requester = %requester))]
    pub async fn create_claim(
        &self,
        pool_id: PoolId,
        requester: &Address,
        amount: Decimal,
        reason: &str,
    ) -> Result<RequestId, AppError> {
        let now = self.clock.now();
        let rules = &self.rules;
        let request_id = self
            .store
            .mutate(pool_id, |pool| pool.create_claim(rules, requester, amount, reason, now))
            .await?;
        info!(request_id = %request_id, %amount, "Claim opened");
        Ok(request_id)
    }

    /// Records `voter`'s vote on a request
    #[instrument(skip_all, fields(pool_id = %pool_id, request_id = %request_id, voter = %voter))]
    pub async fn cast_vote(
        &self,
        pool_id: PoolId,
        request_id: RequestId,
        voter: &Address,
        vote: Vote,
    ) -> Result<VoteReceipt, AppError> {
        let now = self.clock.now();
        let receipt = self
            .store
            .mutate(pool_id, |pool| pool.cast_vote(request_id, voter, vote, now))
            .await?;

        debug!(%vote, yes = receipt.voted_yes, no = receipt.voted_no, "Vote recorded");
        if receipt.resolved() {
            info!(status = %receipt.status, "Request resolved");
        }
        Ok(receipt)
    }

    /// Pays out an approved request and returns the remaining pool balance
    ///
    /// # Errors
    ///
    /// `InsufficientLiquidity` if the pool cannot cover the request. The
    /// request is rejected in that case and stays rejected.
    #[instrument(skip_all, fields(pool_id = %pool_id, request_id = %request_id))]
    pub async fn process_payout(&self, pool_id: PoolId, request_id: RequestId) -> Result<Money, AppError> {
        let now = self.clock.now();
        let outcome = self
            .store
            .mutate(pool_id, |pool| pool.process_payout(request_id, now))
            .await?;

        match outcome {
            PayoutOutcome::Paid {
                amount,
                remaining_balance,
            } => {
                info!(%amount, balance = %remaining_balance, "Payout completed");
                Ok(remaining_balance)
            }
            PayoutOutcome::Unfunded { requested, available } => {
                warn!(%requested, %available, "Payout rejected, pool underfunded");
                Err(AppError::InsufficientLiquidity {
                    available: available.to_string(),
                    requested: requested.to_string(),
                })
            }
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn list_pools(&self) -> Vec<PoolSummary> {
        self.store.list().await.iter().map(PoolSummary::from).collect()
    }

    pub async fn pool(&self, pool_id: PoolId) -> Result<Pool, AppError> {
        Ok(self.store.get(pool_id).await?)
    }

    pub async fn member_pools(&self, member: &Address) -> Vec<PoolSummary> {
        self.store
            .member_pools(member)
            .await
            .iter()
            .map(PoolSummary::from)
            .collect()
    }

    /// Votes owed and payouts available to `member`, across all their pools
    pub async fn pending_actions(&self, member: &Address) -> Vec<PendingAction> {
        let actions: Vec<PendingAction> = self
            .store
            .member_pools(member)
            .await
            .iter()
            .flat_map(|pool| pending_actions(pool, member))
            .collect();
        debug!(member = %member, count = actions.len(), "Pending actions");
        actions
    }

    /// Premium standing of `member` in one pool
    ///
    /// # Errors
    ///
    /// `PoolNotFound` for an unknown pool, `NotMember` if `member` is not in it.
    pub async fn premium_standing(&self, pool_id: PoolId, member: &Address) -> Result<PremiumStanding, AppError> {
        let pool = self.store.get(pool_id).await?;
        if !pool.is_member(member) {
            return Err(PoolError::NotMember(member.to_string()).into());
        }
        Ok(pool.premium_standing(member, self.clock.now())?)
    }

    /// Premium standing of `member` in every pool they belong to
    pub async fn premium_overview(&self, member: &Address) -> Result<PremiumOverview, AppError> {
        let now = self.clock.now();
        let standings = self
            .store
            .member_pools(member)
            .await
            .iter()
            .map(|pool| pool.premium_standing(member, now))
            .collect::<Result<Vec<_>, PoolError>>()?;

        let overdue = standings
            .iter()
            .filter(|s| s.status == PremiumStatus::Overdue)
            .count();
        Ok(PremiumOverview {
            member: member.clone(),
            current: standings.len() - overdue,
            overdue,
            standings,
        })
    }

    pub fn allowed_tokens(&self) -> Vec<TokenInfo> {
        Token::ALL.into_iter().map(TokenInfo::from).collect()
    }
}
