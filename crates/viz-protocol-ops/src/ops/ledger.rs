//! Virtual operations.
//!
//! Nodes emit these into account and block history as side effects of
//! regular operations and block processing. They never appear in a signed
//! transaction.

use viz_protocol_core::serde_helpers::flex_u64;
use viz_protocol_core::{Asset, Timestamp};

wire_struct! {
    pub struct AuthorReward {
        pub author: String,
        pub permlink: String,
        pub token_payout: Asset,
        pub vesting_payout: Asset,
    }
}

wire_struct! {
    pub struct CurationReward {
        pub curator: String,
        pub reward: Asset,
        pub content_author: String,
        pub content_permlink: String,
    }
}

wire_struct! {
    pub struct ContentReward {
        pub author: String,
        pub permlink: String,
        pub payout: Asset,
    }
}

wire_struct! {
    pub struct FillVestingWithdraw {
        pub from_account: String,
        pub to_account: String,
        pub withdrawn: Asset,
        pub deposited: Asset,
    }
}

wire_struct! {
    pub struct ShutdownWitness {
        pub owner: String,
    }
}

wire_struct! {
    pub struct Hardfork {
        pub hardfork_id: u32,
    }
}

wire_struct! {
    pub struct ContentPayoutUpdate {
        pub author: String,
        pub permlink: String,
    }
}

wire_struct! {
    pub struct ContentBenefactorReward {
        pub benefactor: String,
        pub author: String,
        pub permlink: String,
        pub reward: Asset,
    }
}

wire_struct! {
    pub struct ReturnVestingDelegation {
        pub account: String,
        pub vesting_shares: Asset,
    }
}

wire_struct! {
    pub struct CommitteeCancelRequest {
        pub request_id: u32,
    }
}

wire_struct! {
    pub struct CommitteeApproveRequest {
        pub request_id: u32,
    }
}

wire_struct! {
    pub struct CommitteePayoutRequest {
        pub request_id: u32,
    }
}

wire_struct! {
    pub struct CommitteePayRequest {
        pub worker: String,
        pub request_id: u32,
        pub tokens: Asset,
    }
}

wire_struct! {
    pub struct WitnessReward {
        pub witness: String,
        pub shares: Asset,
    }
}

wire_struct! {
    pub struct ReceiveAward {
        pub initiator: String,
        pub receiver: String,
        #[serde(with = "flex_u64")]
        pub custom_sequence: u64,
        pub memo: String,
        pub shares: Asset,
    }
}

wire_struct! {
    pub struct BenefactorAward {
        pub initiator: String,
        pub benefactor: String,
        pub receiver: String,
        #[serde(with = "flex_u64")]
        pub custom_sequence: u64,
        pub memo: String,
        pub shares: Asset,
    }
}

wire_struct! {
    /// Emitted on every subscription payment or renewal.
    pub struct PaidSubscriptionAction {
        pub subscriber: String,
        pub account: String,
        pub level: u16,
        pub amount: Asset,
        pub period: u16,
        #[serde(with = "flex_u64")]
        pub summary_duration_sec: u64,
        pub summary_amount: Asset,
    }
}

wire_struct! {
    pub struct CancelPaidSubscription {
        pub subscriber: String,
        pub account: String,
    }
}

wire_struct! {
    pub struct AccountSale {
        pub account: String,
        pub price: Asset,
        pub buyer: String,
        pub seller: String,
    }
}

wire_struct! {
    /// An escrow nobody ratified in time; funds went back to `from`.
    pub struct ExpireEscrowRatification {
        pub from: String,
        pub to: String,
        pub agent: String,
        pub escrow_id: u32,
        pub token_amount: Asset,
        pub fee: Asset,
        pub ratification_deadline: Timestamp,
    }
}
