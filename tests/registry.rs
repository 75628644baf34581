//! End-to-end lifecycle scenarios against the bounty registry, mirroring
//! the flows an external harness drives through the program: issue,
//! fulfill, accept, cancel, and every rejection path in between.

use bounties::error::BountyError;
use bounties::event::BountyEvent;
use bounties::state::{BountyRegistry, BountyStatus};
use solana_program::pubkey::Pubkey;

const DAY_IN_SECONDS: i64 = 86_400;
const AMOUNT: u64 = 500_000_000_000_000_000;

struct Harness {
    registry: BountyRegistry,
    now: i64,
}

impl Harness {
    fn new() -> Self {
        Harness {
            registry: BountyRegistry::new(),
            now: 1_600_000_000,
        }
    }

    fn advance_time(&mut self, seconds: i64) {
        self.now += seconds;
    }

    fn issue(&mut self, issuer: Pubkey) -> (u64, BountyEvent) {
        self.registry
            .issue_bounty(
                issuer,
                "data".to_string(),
                self.now + 2 * DAY_IN_SECONDS,
                AMOUNT,
                self.now,
            )
            .unwrap()
    }
}

#[test]
fn issue_fulfill_accept_releases_reward() {
    let mut h = Harness::new();
    let issuer = Pubkey::new_unique();
    let fulfiller = Pubkey::new_unique();

    let (bounty_id, issued) = h.issue(issuer);
    assert_eq!(bounty_id, 0);
    assert_eq!(
        issued,
        BountyEvent::BountyIssued {
            bounty_id: 0,
            issuer,
            amount: AMOUNT,
        }
    );

    let (fulfillment_id, _) = h
        .registry
        .fulfill_bounty(fulfiller, 0, "work".to_string(), h.now)
        .unwrap();
    assert_eq!(fulfillment_id, 0);

    let accepted = h.registry.accept_fulfillment(issuer, 0, 0).unwrap();
    assert_eq!(
        accepted,
        BountyEvent::FulfillmentAccepted {
            bounty_id: 0,
            issuer,
            fulfiller,
            fulfillment_id: 0,
            amount: AMOUNT,
        }
    );
    assert_eq!(h.registry.bounty(0).unwrap().status, BountyStatus::Accepted);
}

#[test]
fn issuer_cannot_fulfill_own_bounty() {
    let mut h = Harness::new();
    let issuer = Pubkey::new_unique();
    h.issue(issuer);

    let err = h
        .registry
        .fulfill_bounty(issuer, 0, "work".to_string(), h.now)
        .unwrap_err();
    assert_eq!(err, BountyError::Unauthorized);
}

#[test]
fn issuance_rejects_bad_deadline_and_zero_value() {
    let mut h = Harness::new();
    let issuer = Pubkey::new_unique();

    let err = h
        .registry
        .issue_bounty(issuer, "data".to_string(), h.now - 1, AMOUNT, h.now)
        .unwrap_err();
    assert_eq!(err, BountyError::InvalidDeadline);

    let err = h
        .registry
        .issue_bounty(
            issuer,
            "data".to_string(),
            h.now + 2 * DAY_IN_SECONDS,
            0,
            h.now,
        )
        .unwrap_err();
    assert_eq!(err, BountyError::InsufficientValue);

    assert!(h.registry.is_empty());
}

#[test]
fn fulfillment_rejected_once_deadline_passes() {
    let mut h = Harness::new();
    h.issue(Pubkey::new_unique());

    h.advance_time(2 * DAY_IN_SECONDS + 1);

    let err = h
        .registry
        .fulfill_bounty(Pubkey::new_unique(), 0, "work".to_string(), h.now)
        .unwrap_err();
    assert_eq!(err, BountyError::DeadlineExpired);
}

#[test]
fn cancelled_bounty_refunds_and_goes_dark() {
    let mut h = Harness::new();
    let issuer = Pubkey::new_unique();
    h.issue(issuer);

    let cancelled = h.registry.cancel_bounty(issuer, 0).unwrap();
    assert_eq!(
        cancelled,
        BountyEvent::BountyCancelled {
            bounty_id: 0,
            issuer,
            amount: AMOUNT,
        }
    );
    assert_eq!(
        h.registry.bounty(0).unwrap().status,
        BountyStatus::Cancelled
    );

    let err = h
        .registry
        .fulfill_bounty(Pubkey::new_unique(), 0, "work".to_string(), h.now)
        .unwrap_err();
    assert_eq!(err, BountyError::NotOpen);

    let err = h.registry.cancel_bounty(issuer, 0).unwrap_err();
    assert_eq!(err, BountyError::NotOpen);
}

#[test]
fn independent_bounties_do_not_interfere() {
    let mut h = Harness::new();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let carol = Pubkey::new_unique();

    let (first, _) = h.issue(alice);
    let (second, _) = h.issue(bob);
    assert_eq!((first, second), (0, 1));

    // Carol fulfills both; each bounty numbers its fulfillments from 0.
    let (id, _) = h
        .registry
        .fulfill_bounty(carol, 0, "work".to_string(), h.now)
        .unwrap();
    assert_eq!(id, 0);
    let (id, _) = h
        .registry
        .fulfill_bounty(carol, 1, "work".to_string(), h.now)
        .unwrap();
    assert_eq!(id, 0);

    // Alice settling her bounty leaves Bob's untouched.
    h.registry.accept_fulfillment(alice, 0, 0).unwrap();
    assert_eq!(h.registry.bounty(0).unwrap().status, BountyStatus::Accepted);
    assert_eq!(h.registry.bounty(1).unwrap().status, BountyStatus::Open);

    // Bob cannot settle Alice's bounty, and vice versa rules held all along.
    let err = h.registry.cancel_bounty(bob, 0).unwrap_err();
    assert_eq!(err, BountyError::NotOpen);
    let err = h.registry.accept_fulfillment(alice, 1, 0).unwrap_err();
    assert_eq!(err, BountyError::Unauthorized);

    h.registry.cancel_bounty(bob, 1).unwrap();
    assert_eq!(
        h.registry.bounty(1).unwrap().status,
        BountyStatus::Cancelled
    );
}

#[test]
fn accepting_one_of_many_fulfillments_settles_the_bounty() {
    let mut h = Harness::new();
    let issuer = Pubkey::new_unique();
    let first = Pubkey::new_unique();
    let second = Pubkey::new_unique();
    h.issue(issuer);

    h.registry
        .fulfill_bounty(first, 0, "first".to_string(), h.now)
        .unwrap();
    h.registry
        .fulfill_bounty(second, 0, "second".to_string(), h.now)
        .unwrap();

    let accepted = h.registry.accept_fulfillment(issuer, 0, 1).unwrap();
    assert_eq!(
        accepted,
        BountyEvent::FulfillmentAccepted {
            bounty_id: 0,
            issuer,
            fulfiller: second,
            fulfillment_id: 1,
            amount: AMOUNT,
        }
    );

    // The losing fulfillment stays on record but can no longer be accepted.
    let bounty = h.registry.bounty(0).unwrap();
    assert_eq!(bounty.accepted_fulfillment, Some(1));
    assert_eq!(bounty.fulfillments.len(), 2);
    let err = h.registry.accept_fulfillment(issuer, 0, 0).unwrap_err();
    assert_eq!(err, BountyError::NotOpen);
}

#[test]
fn open_bounty_survives_deadline_for_settlement() {
    // The deadline only gates fulfillment. An issuer can still accept
    // existing work or cancel after the deadline has passed.
    let mut h = Harness::new();
    let issuer = Pubkey::new_unique();
    let fulfiller = Pubkey::new_unique();

    h.issue(issuer);
    h.registry
        .fulfill_bounty(fulfiller, 0, "work".to_string(), h.now)
        .unwrap();

    h.advance_time(3 * DAY_IN_SECONDS);

    h.registry.accept_fulfillment(issuer, 0, 0).unwrap();
    assert_eq!(h.registry.bounty(0).unwrap().status, BountyStatus::Accepted);

    let (id, _) = h.issue(issuer);
    h.advance_time(3 * DAY_IN_SECONDS);
    h.registry.cancel_bounty(issuer, id).unwrap();
    assert_eq!(
        h.registry.bounty(id).unwrap().status,
        BountyStatus::Cancelled
    );
}
