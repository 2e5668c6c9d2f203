//! Scenario tests for the application facade

use std::sync::Arc;

use chrono::Duration;
use rust_decimal_macros::dec;

use core_kernel::{Clock, ManualClock, PoolId, RequestId, Token};
use domain_claims::{RequestStatus, Vote};
use domain_pool::{ActionKind, PoolConfig, PremiumStatus};
use infra_store::{seed_demo_data, LedgerStore};
use interface_app::{AppConfig, AppError, BreadfundApp};
use test_utils::{assert_balance_equation, AddressFixtures, TemporalFixtures, TestPoolBuilder};

struct Harness {
    app: BreadfundApp,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let config = AppConfig {
        connect_delay_ms: 0,
        ..AppConfig::default()
    };
    let clock = Arc::new(ManualClock::new(TemporalFixtures::claim_day()));
    let store = Arc::new(LedgerStore::new());
    let app = BreadfundApp::from_config(&config, store, Arc::clone(&clock) as Arc<dyn Clock>).unwrap();
    Harness { app, clock }
}

/// Alice, Bob and Carol with 1000 DAI in the pool
async fn funded_pool(h: &Harness) -> PoolId {
    let pool = TestPoolBuilder::three_members()
        .with_initial_deposit(dec!(1000))
        .build();
    h.app.store().insert(pool).await.unwrap()
}

async fn bobs_claim(h: &Harness, pool_id: PoolId) -> RequestId {
    h.app
        .create_claim(pool_id, &AddressFixtures::bob(), dec!(300), "Medical emergency")
        .await
        .unwrap()
}

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_pool_requires_identity() {
        let h = harness();
        let result = h.app.create_pool(PoolConfig::new("Pool", Token::Dai)).await;
        assert!(matches!(result, Err(AppError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_connected_identity_owns_new_pool() {
        let h = harness();
        let identity = h.app.connect_identity().await;
        assert_eq!(identity.address, AddressFixtures::alice());

        let id = h.app.create_pool(PoolConfig::new("Pool", Token::Usdc)).await.unwrap();
        let pool = h.app.pool(id).await.unwrap();
        assert_eq!(pool.owner, identity.address);
        assert_eq!(pool.token, Token::Usdc);
        assert_eq!(pool.created_at, TemporalFixtures::claim_day());

        h.app.disconnect_identity().await;
        assert!(h.app.current_identity().await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_config_is_invalid_input() {
        let h = harness();
        h.app.connect_identity().await;
        let config = PoolConfig::new("Pool", Token::Dai).with_member_bounds(5, 3);

        let err = h.app.create_pool(config).await.unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert!(h.app.list_pools().await.is_empty());
    }
}

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_and_pay_out() {
        let h = harness();
        let pool_id = funded_pool(&h).await;
        let request_id = bobs_claim(&h, pool_id).await;

        let first = h
            .app
            .cast_vote(pool_id, request_id, &AddressFixtures::alice(), Vote::Yes)
            .await
            .unwrap();
        assert_eq!(first.status, RequestStatus::Pending);

        let second = h
            .app
            .cast_vote(pool_id, request_id, &AddressFixtures::carol(), Vote::Yes)
            .await
            .unwrap();
        assert_eq!(second.status, RequestStatus::Approved);

        let remaining = h.app.process_payout(pool_id, request_id).await.unwrap();
        assert_eq!(remaining.amount(), dec!(700));

        let pool = h.app.pool(pool_id).await.unwrap();
        assert_eq!(pool.request(request_id).unwrap().status(), RequestStatus::Withdrawn);
        assert_balance_equation(&pool, dec!(0));
    }

    #[tokio::test]
    async fn test_split_vote_rejects_without_balance_change() {
        let h = harness();
        let pool_id = funded_pool(&h).await;
        let request_id = bobs_claim(&h, pool_id).await;

        h.app
            .cast_vote(pool_id, request_id, &AddressFixtures::alice(), Vote::Yes)
            .await
            .unwrap();
        let receipt = h
            .app
            .cast_vote(pool_id, request_id, &AddressFixtures::carol(), Vote::No)
            .await
            .unwrap();
        assert_eq!(receipt.status, RequestStatus::Rejected);

        let err = h.app.process_payout(pool_id, request_id).await.unwrap_err();
        assert!(matches!(err, AppError::RequestNotApproved { .. }));
        assert_eq!(h.app.pool(pool_id).await.unwrap().total_balance().amount(), dec!(1000));
    }

    #[tokio::test]
    async fn test_unfunded_payout_is_committed_as_rejected() {
        let h = harness();
        let pool_id = funded_pool(&h).await;

        let mut approved = Vec::new();
        for _ in 0..2 {
            let id = h
                .app
                .create_claim(pool_id, &AddressFixtures::bob(), dec!(600), "Surgery")
                .await
                .unwrap();
            for voter in [AddressFixtures::alice(), AddressFixtures::carol()] {
                h.app.cast_vote(pool_id, id, &voter, Vote::Yes).await.unwrap();
            }
            approved.push(id);
        }

        h.app.process_payout(pool_id, approved[0]).await.unwrap();
        let err = h.app.process_payout(pool_id, approved[1]).await.unwrap_err();
        assert_eq!(err.code(), "insufficient_liquidity");

        let pool = h.app.pool(pool_id).await.unwrap();
        assert_eq!(pool.request(approved[1]).unwrap().status(), RequestStatus::Rejected);
        assert_eq!(pool.total_balance().amount(), dec!(400));
    }

    #[tokio::test]
    async fn test_vote_errors() {
        let h = harness();
        let pool_id = funded_pool(&h).await;
        let request_id = bobs_claim(&h, pool_id).await;

        let err = h
            .app
            .cast_vote(pool_id, request_id, &AddressFixtures::bob(), Vote::Yes)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_eligible_voter");

        let err = h
            .app
            .cast_vote(pool_id, request_id, &AddressFixtures::outsider(), Vote::Yes)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_eligible_voter");

        h.app
            .cast_vote(pool_id, request_id, &AddressFixtures::alice(), Vote::No)
            .await
            .unwrap();
        let err = h
            .app
            .cast_vote(pool_id, request_id, &AddressFixtures::alice(), Vote::Yes)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "already_voted");

        let err = h
            .app
            .cast_vote(pool_id, RequestId::new_v7(), &AddressFixtures::alice(), Vote::Yes)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "request_not_found");
    }

    #[tokio::test]
    async fn test_claim_errors() {
        let h = harness();
        let pool_id = funded_pool(&h).await;

        let err = h
            .app
            .create_claim(pool_id, &AddressFixtures::bob(), dec!(5000), "Too much")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "claim_too_large");

        let err = h
            .app
            .create_claim(pool_id, &AddressFixtures::bob(), dec!(1200), "More than the pool")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "insufficient_liquidity");

        let err = h
            .app
            .create_claim(pool_id, &AddressFixtures::outsider(), dec!(10), "Not mine")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_member");

        let err = h
            .app
            .create_claim(PoolId::new_v7(), &AddressFixtures::bob(), dec!(10), "Nowhere")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "pool_not_found");
    }

    #[tokio::test]
    async fn test_member_without_saving_claims_too_large() {
        let h = harness();
        let pool = TestPoolBuilder::three_members()
            .with_initial_deposit(dec!(1000))
            .with_member(AddressFixtures::outsider(), dec!(0))
            .build();
        let pool_id = h.app.store().insert(pool).await.unwrap();

        let err = h
            .app
            .create_claim(pool_id, &AddressFixtures::outsider(), dec!(1), "Rent")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "claim_too_large");
        assert!(h.app.pool(pool_id).await.unwrap().withdrawal_requests().is_empty());
    }
}

mod premium_tests {
    use super::*;

    #[tokio::test]
    async fn test_deposit_finer_than_token_is_invalid_input() {
        let h = harness();
        let pool = TestPoolBuilder::new()
            .with_config(PoolConfig::new("Stable Fund", Token::Usdc))
            .build();
        let pool_id = h.app.store().insert(pool).await.unwrap();

        let err = h
            .app
            .record_deposit(pool_id, &AddressFixtures::alice(), dec!(109.9999999))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "invalid_input");

        let pool = h.app.pool(pool_id).await.unwrap();
        assert_eq!(pool.total_balance().amount(), dec!(50));
        assert_balance_equation(&pool, dec!(0));
    }

    #[tokio::test]
    async fn test_short_deposit_is_rejected() {
        let h = harness();
        let pool_id = funded_pool(&h).await;

        let err = h
            .app
            .record_deposit(pool_id, &AddressFixtures::bob(), dec!(159))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "insufficient_amount");
        assert_eq!(h.app.pool(pool_id).await.unwrap().total_balance().amount(), dec!(1000));
    }

    #[tokio::test]
    async fn test_standing_goes_overdue() {
        let h = harness();
        let pool_id = funded_pool(&h).await;
        h.app
            .record_deposit(pool_id, &AddressFixtures::bob(), dec!(160))
            .await
            .unwrap();

        let standing = h
            .app
            .premium_standing(pool_id, &AddressFixtures::bob())
            .await
            .unwrap();
        assert_eq!(standing.status, PremiumStatus::Current);

        h.clock.advance(Duration::days(31));
        let standing = h
            .app
            .premium_standing(pool_id, &AddressFixtures::bob())
            .await
            .unwrap();
        assert_eq!(standing.status, PremiumStatus::Overdue);
        assert_eq!(standing.days_since, Some(31));
    }

    #[tokio::test]
    async fn test_standing_for_non_member() {
        let h = harness();
        let pool_id = funded_pool(&h).await;
        let err = h
            .app
            .premium_standing(pool_id, &AddressFixtures::outsider())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_member");
    }

    #[tokio::test]
    async fn test_overview_counts_pools() {
        let h = harness();
        funded_pool(&h).await;
        let second = h.app.store().insert(TestPoolBuilder::new().build()).await.unwrap();
        h.app
            .record_deposit(second, &AddressFixtures::alice(), dec!(110))
            .await
            .unwrap();

        let overview = h.app.premium_overview(&AddressFixtures::alice()).await.unwrap();
        assert_eq!(overview.standings.len(), 2);
        assert_eq!(overview.current, 1);
        assert_eq!(overview.overdue, 1);
    }
}

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_data_views() {
        let h = harness();
        let pool_id = seed_demo_data(h.app.store()).await.unwrap();

        let pools = h.app.list_pools().await;
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].name, "Devs Mutual Aid");
        assert_eq!(pools[0].pending_requests, 1);

        let actions = h.app.pending_actions(&AddressFixtures::alice()).await;
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, ActionKind::Vote);
        assert_eq!(actions[0].pool_id, pool_id);

        assert!(h.app.pending_actions(&AddressFixtures::bob()).await.is_empty());
        assert!(h.app.member_pools(&AddressFixtures::outsider()).await.is_empty());

        let json = serde_json::to_value(&actions[0]).unwrap();
        assert_eq!(json["kind"], "vote");
        assert_eq!(json["request"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_allowed_tokens() {
        let h = harness();
        let tokens = h.app.allowed_tokens();
        let symbols: Vec<&str> = tokens.iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, ["DAI", "USDC", "USDT"]);
        assert_eq!(tokens[1].decimals, 6);
    }

    #[tokio::test]
    async fn test_unknown_pool() {
        let h = harness();
        let err = h.app.pool(PoolId::new_v7()).await.unwrap_err();
        assert_eq!(err.code(), "pool_not_found");
    }
}
