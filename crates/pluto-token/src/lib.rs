//! # pluto-token
//!
//! Reference runtime for the PLUTO capped token.
//!
//! Wires the PLUTO components (policy, ledger, engine and clock) into a
//! single `PlutoToken`, and ships the deployment profiles the token is
//! launched with:
//!
//! 1. **Mainnet**: 8888 PLT cap, 8 per call, daily cooldown, 888 per year.
//! 2. **Testnet**: 31 PLT cap, 8 per call, 4s cooldown, 16 per 8s window.
//!
//! No network or key handling happens here; accounts are plain identifiers
//! and time comes from the injected `Clock`.

pub mod profiles;
pub mod token;

pub use profiles::Profile;
pub use token::PlutoToken;

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// Timelines replay the testnet deployment with a manual clock: cap 31,
// 8 per call, 4s cooldown, 16 per 8s period.

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use pluto_contracts::{
        account::AccountId,
        amount::TokenAmount,
        error::{PlutoError, RejectionKind},
        time::Timestamp,
    };
    use pluto_core::{traits::AdmissionPolicy, ManualClock, SystemClock};
    use pluto_policy::RuleSetPolicy;

    use crate::{PlutoToken, Profile};

    // ── Helpers ───────────────────────────────────────────────────────────────

    const DEPLOYED_AT: u64 = 1_000;

    /// `tokens * 10^18` base units.
    fn plt(tokens: u128) -> TokenAmount {
        TokenAmount::from_tokens(tokens).unwrap()
    }

    fn account(n: u8) -> AccountId {
        AccountId::new(format!("addr{}", n))
    }

    fn deploy() -> (PlutoToken, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Timestamp::new(DEPLOYED_AT)));
        let token = Profile::Testnet.deploy(clock.clone()).unwrap();
        (token, clock)
    }

    fn expect_rejection(result: Result<impl std::fmt::Debug, PlutoError>, kind: RejectionKind) {
        match result {
            Err(err) => {
                assert_eq!(err.rejection_kind(), Some(kind), "wrong rejection: {err}");
                assert!(err.to_string().contains(kind.reason()), "reason missing from: {err}");
            }
            Ok(value) => panic!("expected {:?}, got {:?}", kind, value),
        }
    }

    // ── Deployment ────────────────────────────────────────────────────────────

    #[test]
    fn test_has_zero_total_supply() {
        let (token, _) = deploy();
        assert_eq!(token.total_supply(), TokenAmount::ZERO);
    }

    #[test]
    fn test_has_cap() {
        let (token, _) = deploy();
        assert_eq!(token.cap().raw(), 31_000_000_000_000_000_000);
        assert_eq!(token.symbol(), "PLT");
        assert_eq!(token.name(), "PlutoToken");
        assert_eq!(token.decimals(), 18);
    }

    #[test]
    fn test_mainnet_profile_limits() {
        let token = Profile::Mainnet.deploy(Arc::new(SystemClock)).unwrap();
        let limits = token.limits();
        assert_eq!(limits.supply_cap, plt(8888));
        assert_eq!(limits.max_amount_per_call, plt(8));
        assert_eq!(limits.min_cooldown_interval, 24 * 60 * 60);
        assert_eq!(limits.max_amount_per_period, plt(888));
        assert_eq!(limits.period_duration, 365 * 24 * 60 * 60);
    }

    // ── Single account ────────────────────────────────────────────────────────

    #[test]
    fn test_can_mint() {
        let (token, _) = deploy();
        let receipt = token.mint(&account(1), plt(7)).unwrap();

        assert_eq!(token.balance_of(&account(1)), plt(7));
        assert_eq!(receipt.balance, plt(7));
        assert_eq!(receipt.total_supply, plt(7));
        assert_eq!(receipt.minted_at, Timestamp::new(DEPLOYED_AT));
    }

    #[test]
    fn test_cannot_mint_twice_without_waiting() {
        let (token, _) = deploy();
        token.mint(&account(1), plt(3)).unwrap();

        expect_rejection(token.mint(&account(1), plt(4)), RejectionKind::CooldownActive);
        assert_eq!(token.balance(&account(1)), plt(3));
    }

    #[test]
    fn test_can_mint_again_after_waiting() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(3)).unwrap();

        clock.advance(5);
        token.mint(&account(1), plt(3)).unwrap();

        assert_eq!(token.balance(&account(1)), plt(6));
    }

    /// With a 4s cooldown, Δt = 3 is refused and Δt = 4 is accepted.
    #[test]
    fn test_cooldown_boundary() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(1)).unwrap();

        clock.advance(3);
        expect_rejection(token.mint(&account(1), plt(1)), RejectionKind::CooldownActive);
        assert_eq!(token.cooldown_remaining(&account(1)), 1);

        clock.advance(1);
        assert_eq!(token.cooldown_remaining(&account(1)), 0);
        token.mint(&account(1), plt(1)).unwrap();
        assert_eq!(token.balance(&account(1)), plt(2));
    }

    #[test]
    fn test_cannot_mint_more_than_per_call_ceiling() {
        let (token, _) = deploy();
        expect_rejection(token.mint(&account(1), plt(9)), RejectionKind::CallAmountExceeded);
        assert_eq!(token.balance(&account(1)), TokenAmount::ZERO);
    }

    /// The ceiling applies to each call on its own; earlier mints by the
    /// same account do not count against it.
    #[test]
    fn test_per_call_ceiling_ignores_history() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(5)).unwrap();

        clock.advance(5);
        token.mint(&account(1), plt(4)).unwrap();
        assert_eq!(token.balance(&account(1)), plt(9));
    }

    // ── Period window ─────────────────────────────────────────────────────────

    #[test]
    fn test_can_mint_again_once_period_has_passed() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(8)).unwrap();
        token.mint(&account(2), plt(8)).unwrap();

        expect_rejection(token.mint(&account(3), plt(3)), RejectionKind::PeriodQuotaExceeded);
        assert_eq!(token.period_remaining(), TokenAmount::ZERO);

        clock.advance(8);
        let receipt = token.mint(&account(3), plt(3)).unwrap();

        // Wholesale reset: the accumulator holds exactly this mint.
        assert_eq!(receipt.minted_in_window, plt(3));
        assert_eq!(receipt.window_start, Timestamp::new(DEPLOYED_AT + 8));
        assert_eq!(token.snapshot().window.minted_in_window, plt(3));
    }

    /// Waiting out two full periods grants one fresh window, not two.
    #[test]
    fn test_two_elapsed_periods_grant_one_window() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(1)).unwrap();
        token.mint(&account(2), plt(1)).unwrap();
        token.mint(&account(3), plt(1)).unwrap();

        clock.advance(17);
        token.mint(&account(1), plt(7)).unwrap();
        token.mint(&account(2), plt(7)).unwrap();
        expect_rejection(token.mint(&account(3), plt(7)), RejectionKind::PeriodQuotaExceeded);

        let window = token.snapshot().window;
        assert_eq!(window.window_start, Timestamp::new(DEPLOYED_AT + 17));
        assert_eq!(window.minted_in_window, plt(14));
    }

    /// A fresh quota window does not lift the supply cap.
    #[test]
    fn test_cannot_mint_more_than_the_cap() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(8)).unwrap();
        token.mint(&account(2), plt(8)).unwrap();

        clock.advance(8);
        token.mint(&account(3), plt(8)).unwrap();

        expect_rejection(token.mint(&account(4), plt(8)), RejectionKind::SupplyCapExceeded);
        assert_eq!(token.total_supply(), plt(24));
        // The quota check passed for that request; the window still has room.
        assert_eq!(token.period_remaining(), plt(8));
    }

    #[test]
    fn test_next_window_reset() {
        let (token, clock) = deploy();
        assert_eq!(token.next_window_reset(), Some(Timestamp::new(DEPLOYED_AT + 8)));

        clock.advance(8);
        assert_eq!(token.next_window_reset(), None);
        assert_eq!(token.period_remaining(), plt(16));
    }

    /// With a zero-length period every request rolls the window, including
    /// one at the deployment instant.
    #[test]
    fn test_zero_period_has_no_pending_reset() {
        let mut limits = *Profile::Testnet.policy().unwrap().limits();
        limits.period_duration = 0;
        let clock = Arc::new(ManualClock::new(Timestamp::new(100)));
        let token = PlutoToken::deploy(RuleSetPolicy::new(limits).unwrap(), clock).unwrap();

        assert_eq!(token.next_window_reset(), None);
        assert_eq!(token.period_remaining(), plt(16));
    }

    // ── Atomicity ─────────────────────────────────────────────────────────────

    /// A rejected mint changes no balance, supply, cooldown, or window.
    #[test]
    fn test_rejection_has_no_effect() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(8)).unwrap();
        token.mint(&account(2), plt(8)).unwrap();
        clock.advance(1);

        let before = token.snapshot();
        let supply = token.total_supply();
        let journal_len = token.export_journal().entries.len();

        expect_rejection(token.mint(&account(3), plt(9)), RejectionKind::CallAmountExceeded);
        expect_rejection(token.mint(&account(1), plt(1)), RejectionKind::CooldownActive);
        expect_rejection(token.mint(&account(3), plt(1)), RejectionKind::PeriodQuotaExceeded);

        assert_eq!(token.snapshot(), before);
        assert_eq!(token.total_supply(), supply);
        assert_eq!(token.balance_of(&account(3)), TokenAmount::ZERO);
        assert_eq!(token.export_journal().entries.len(), journal_len);
    }

    /// Rejected requests after the window expired do not roll it.
    #[test]
    fn test_rejection_does_not_roll_window() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(8)).unwrap();

        clock.advance(9);
        expect_rejection(token.mint(&account(2), plt(9)), RejectionKind::CallAmountExceeded);

        let window = token.snapshot().window;
        assert_eq!(window.window_start, Timestamp::new(DEPLOYED_AT));
        assert_eq!(window.minted_in_window, plt(8));
    }

    #[test]
    fn test_zero_amount_is_invalid_request() {
        let (token, _) = deploy();
        assert!(matches!(
            token.mint(&account(1), TokenAmount::ZERO),
            Err(PlutoError::InvalidRequest { .. })
        ));
        assert_eq!(token.snapshot().accounts.len(), 0);
    }

    #[test]
    fn test_mint_at_before_deployment_is_invalid() {
        let (token, _) = deploy();
        assert!(matches!(
            token.mint_at(&account(1), plt(1), Timestamp::new(DEPLOYED_AT - 1)),
            Err(PlutoError::InvalidRequest { .. })
        ));
    }

    /// An explicit time earlier than another account's accepted mint is a
    /// clock regression, not a fresh request.
    #[test]
    fn test_mint_at_before_other_accounts_mint_is_invalid() {
        let (token, _) = deploy();
        token.mint_at(&account(1), plt(2), Timestamp::new(DEPLOYED_AT + 10)).unwrap();
        let before = token.snapshot();

        assert!(matches!(
            token.mint_at(&account(2), plt(2), Timestamp::new(DEPLOYED_AT + 5)),
            Err(PlutoError::InvalidRequest { .. })
        ));
        assert_eq!(token.snapshot(), before);
        assert_eq!(token.balance_of(&account(2)), TokenAmount::ZERO);
        assert_eq!(token.total_supply(), plt(2));
    }

    #[test]
    fn test_mint_at_explicit_time() {
        let (token, _) = deploy();
        token.mint_at(&account(1), plt(2), Timestamp::new(DEPLOYED_AT + 100)).unwrap();
        assert_eq!(
            token.snapshot().account(&account(1)).last_mint_at,
            Some(Timestamp::new(DEPLOYED_AT + 100))
        );
    }

    // ── Journal ───────────────────────────────────────────────────────────────

    #[test]
    fn test_journal_records_each_accepted_mint() {
        let (token, clock) = deploy();
        token.mint(&account(1), plt(8)).unwrap();
        token.mint(&account(2), plt(8)).unwrap();
        let _ = token.mint(&account(3), plt(3));
        clock.advance(8);
        token.mint(&account(3), plt(3)).unwrap();

        let journal = token.export_journal();
        assert_eq!(journal.token, "PLT");
        assert_eq!(journal.entries.len(), 3);
        assert_eq!(journal.entries[2].record.account, account(3));
        assert_eq!(journal.entries[2].record.total_supply, plt(19));
        assert!(token.verify_journal());
    }

    // ── Concurrency ───────────────────────────────────────────────────────────

    /// With the clock frozen, 32 accounts racing to mint 1 PLT each share
    /// one 16 PLT window: exactly 16 succeed, the rest see the quota.
    #[test]
    fn test_concurrent_mints_respect_quota() {
        let (token, _) = deploy();
        let token = Arc::new(token);

        let handles: Vec<_> = (0..32u8)
            .map(|n| {
                let token = Arc::clone(&token);
                thread::spawn(move || token.mint(&account(n), plt(1)))
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => {
                    assert_eq!(err.rejection_kind(), Some(RejectionKind::PeriodQuotaExceeded))
                }
            }
        }

        assert_eq!(accepted, 16);
        assert_eq!(token.total_supply(), plt(16));
        assert_eq!(token.snapshot().window.minted_in_window, plt(16));
        assert!(token.verify_journal());
    }
}
