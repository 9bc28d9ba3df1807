//! Proptest generators for property-based testing.
//!
//! [`operation`] covers every operation variant; [`regular_operation`] and
//! [`virtual_operation`] split them by whether they can be signed.

use proptest::prelude::*;
use proptest::strategy::Union;

use viz_protocol_core::{
    Asset, BlockId, ChainId, PrivateKey, PublicKey, Symbol, Timestamp, TransactionId,
};
use viz_protocol_ops::ops::*;
use viz_protocol_ops::{
    Authority, Beneficiary, ContentExtension, Extensions, FutureExtension, Operation, Transaction,
};

/// Build a payload struct from one strategy per field, in field order.
macro_rules! payload {
    ($name:ident { $($field:ident : $strategy:expr),* $(,)? }) => {
        ($($strategy,)*).prop_map(|($($field,)*)| $name { $($field,)* })
    };
}

/// Like [`payload!`], lifted into a boxed [`Operation`] strategy.
macro_rules! op {
    ($name:ident { $($body:tt)* }) => {
        payload!($name { $($body)* }).prop_map(Operation::from).boxed()
    };
}

/// Generate a random private key.
pub fn private_key() -> impl Strategy<Value = PrivateKey> {
    any::<[u8; 32]>().prop_filter_map("scalar out of range", |bytes| {
        PrivateKey::from_bytes(&bytes).ok()
    })
}

/// Generate a random public key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    private_key().prop_map(|key| key.public_key())
}

pub fn block_id() -> impl Strategy<Value = BlockId> {
    any::<[u8; 20]>().prop_map(BlockId::from_bytes)
}

pub fn transaction_id() -> impl Strategy<Value = TransactionId> {
    any::<[u8; 20]>().prop_map(TransactionId::from_bytes)
}

pub fn chain_id() -> impl Strategy<Value = ChainId> {
    any::<[u8; 32]>().prop_map(ChainId::from_bytes)
}

/// Any representable timestamp.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    any::<u32>().prop_map(Timestamp::from_secs)
}

/// A ticker that does not collide with the native symbols.
pub fn custom_symbol() -> impl Strategy<Value = Symbol> {
    ("[A-Z][A-Z0-9]{0,6}", 0u8..=8)
        .prop_filter("native ticker", |(name, _)| {
            name != Symbol::VIZ_NAME && name != Symbol::VESTS_NAME
        })
        .prop_map(|(name, precision)| Symbol::Custom { name, precision })
}

pub fn symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![Just(Symbol::Viz), Just(Symbol::Vests), custom_symbol()]
}

/// An asset with a non-negative amount.
pub fn asset() -> impl Strategy<Value = Asset> {
    (0i64..=1_000_000_000_000_000, symbol())
        .prop_map(|(amount, symbol)| Asset::new(amount, symbol))
}

pub fn viz() -> impl Strategy<Value = Asset> {
    (0i64..=1_000_000_000_000).prop_map(Asset::viz)
}

pub fn shares() -> impl Strategy<Value = Asset> {
    (0i64..=1_000_000_000_000_000).prop_map(Asset::vests)
}

/// Generate an account name.
pub fn account_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.-]{1,24}".prop_map(String::from)
}

pub fn permlink() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,64}".prop_map(String::from)
}

/// Free text such as memos and metadata.
pub fn text() -> impl Strategy<Value = String> {
    "\\PC{0,48}".prop_map(String::from)
}

pub fn authority() -> impl Strategy<Value = Authority> {
    (
        any::<u32>(),
        prop::collection::vec((account_name(), any::<u16>()), 0..3),
        prop::collection::vec((public_key(), any::<u16>()), 0..3),
    )
        .prop_map(|(weight_threshold, account_auths, key_auths)| Authority {
            weight_threshold,
            account_auths,
            key_auths,
        })
}

pub fn beneficiaries() -> impl Strategy<Value = Vec<Beneficiary>> {
    prop::collection::vec(
        payload!(Beneficiary {
            account: account_name(),
            weight: 0u16..=10_000,
        }),
        0..3,
    )
}

pub fn extensions() -> impl Strategy<Value = Extensions> {
    prop::collection::vec(Just(FutureExtension::Void), 0..2)
}

pub fn content_extensions() -> impl Strategy<Value = Vec<ContentExtension>> {
    prop::collection::vec(beneficiaries().prop_map(ContentExtension::beneficiaries), 0..2)
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(account_name(), 0..3)
}

fn keys() -> impl Strategy<Value = Vec<PublicKey>> {
    prop::collection::vec(public_key(), 0..2)
}

/// Simple regular operations, used as proposal contents.
fn leaf_operation() -> BoxedStrategy<Operation> {
    Union::new(vec![
        op!(Transfer {
            from: account_name(),
            to: account_name(),
            amount: viz(),
            memo: text(),
        }),
        op!(Vote {
            voter: account_name(),
            author: account_name(),
            permlink: permlink(),
            weight: any::<i16>(),
        }),
        op!(AccountMetadata {
            account: account_name(),
            json_metadata: text(),
        }),
    ])
    .boxed()
}

/// Every operation that may appear in a signed transaction.
pub fn regular_operation() -> BoxedStrategy<Operation> {
    Union::new(vec![
        op!(Vote {
            voter: account_name(),
            author: account_name(),
            permlink: permlink(),
            weight: any::<i16>(),
        }),
        op!(Content {
            parent_author: account_name(),
            parent_permlink: permlink(),
            author: account_name(),
            permlink: permlink(),
            title: text(),
            body: text(),
            curation_percent: any::<i16>(),
            json_metadata: text(),
            extensions: content_extensions(),
        }),
        op!(Transfer {
            from: account_name(),
            to: account_name(),
            amount: asset(),
            memo: text(),
        }),
        op!(TransferToVesting {
            from: account_name(),
            to: account_name(),
            amount: viz(),
        }),
        op!(WithdrawVesting {
            account: account_name(),
            vesting_shares: shares(),
        }),
        op!(AccountUpdate {
            account: account_name(),
            master: prop::option::of(authority()),
            active: prop::option::of(authority()),
            regular: prop::option::of(authority()),
            memo_key: public_key(),
            json_metadata: text(),
        }),
        op!(WitnessUpdate {
            owner: account_name(),
            url: text(),
            block_signing_key: public_key(),
        }),
        op!(AccountWitnessVote {
            account: account_name(),
            witness: account_name(),
            approve: any::<bool>(),
        }),
        op!(AccountWitnessProxy {
            account: account_name(),
            proxy: account_name(),
        }),
        op!(DeleteContent {
            author: account_name(),
            permlink: permlink(),
        }),
        op!(Custom {
            required_active_auths: names(),
            required_regular_auths: names(),
            id: "[a-z.]{1,16}",
            json: text(),
        }),
        op!(SetWithdrawVestingRoute {
            from_account: account_name(),
            to_account: account_name(),
            percent: 0u16..=10_000,
            auto_vest: any::<bool>(),
        }),
        op!(RequestAccountRecovery {
            recovery_account: account_name(),
            account_to_recover: account_name(),
            new_master_authority: authority(),
            extensions: extensions(),
        }),
        op!(RecoverAccount {
            account_to_recover: account_name(),
            new_master_authority: authority(),
            recent_master_authority: authority(),
            extensions: extensions(),
        }),
        op!(ChangeRecoveryAccount {
            account_to_recover: account_name(),
            new_recovery_account: account_name(),
            extensions: extensions(),
        }),
        op!(EscrowTransfer {
            from: account_name(),
            to: account_name(),
            token_amount: viz(),
            escrow_id: any::<u32>(),
            agent: account_name(),
            fee: viz(),
            json_metadata: text(),
            ratification_deadline: timestamp(),
            escrow_expiration: timestamp(),
        }),
        op!(EscrowDispute {
            from: account_name(),
            to: account_name(),
            agent: account_name(),
            who: account_name(),
            escrow_id: any::<u32>(),
        }),
        op!(EscrowRelease {
            from: account_name(),
            to: account_name(),
            agent: account_name(),
            who: account_name(),
            receiver: account_name(),
            escrow_id: any::<u32>(),
            token_amount: viz(),
        }),
        op!(EscrowApprove {
            from: account_name(),
            to: account_name(),
            agent: account_name(),
            who: account_name(),
            escrow_id: any::<u32>(),
            approve: any::<bool>(),
        }),
        op!(DelegateVestingShares {
            delegator: account_name(),
            delegatee: account_name(),
            vesting_shares: shares(),
        }),
        op!(AccountCreate {
            fee: viz(),
            delegation: shares(),
            creator: account_name(),
            new_account_name: account_name(),
            master: authority(),
            active: authority(),
            regular: authority(),
            memo_key: public_key(),
            json_metadata: text(),
            referrer: account_name(),
            extensions: extensions(),
        }),
        op!(AccountMetadata {
            account: account_name(),
            json_metadata: text(),
        }),
        op!(ProposalCreate {
            author: account_name(),
            title: permlink(),
            memo: text(),
            expiration_time: timestamp(),
            proposed_operations: prop::collection::vec(
                leaf_operation().prop_map(OperationWrapper::from),
                1..3,
            ),
            review_period_time: prop::option::of(timestamp()),
            extensions: extensions(),
        }),
        op!(ProposalUpdate {
            author: account_name(),
            title: permlink(),
            active_approvals_to_add: names(),
            active_approvals_to_remove: names(),
            master_approvals_to_add: names(),
            master_approvals_to_remove: names(),
            regular_approvals_to_add: names(),
            regular_approvals_to_remove: names(),
            key_approvals_to_add: keys(),
            key_approvals_to_remove: keys(),
            extensions: extensions(),
        }),
        op!(ProposalDelete {
            author: account_name(),
            title: permlink(),
            requester: account_name(),
            extensions: extensions(),
        }),
        op!(CommitteeWorkerCreateRequest {
            creator: account_name(),
            url: text(),
            worker: account_name(),
            required_amount_min: viz(),
            required_amount_max: viz(),
            duration: any::<u32>(),
        }),
        op!(CommitteeWorkerCancelRequest {
            creator: account_name(),
            request_id: any::<u32>(),
        }),
        op!(CommitteeVoteRequest {
            voter: account_name(),
            request_id: any::<u32>(),
            vote_percent: -10_000i16..=10_000,
        }),
        op!(CreateInvite {
            creator: account_name(),
            balance: viz(),
            invite_key: public_key(),
        }),
        op!(ClaimInviteBalance {
            initiator: account_name(),
            receiver: account_name(),
            invite_secret: text(),
        }),
        op!(InviteRegistration {
            initiator: account_name(),
            new_account_name: account_name(),
            invite_secret: text(),
            new_account_key: public_key(),
        }),
        op!(Award {
            initiator: account_name(),
            receiver: account_name(),
            energy: 0u16..=10_000,
            custom_sequence: any::<u64>(),
            memo: text(),
            beneficiaries: beneficiaries(),
        }),
        op!(SetPaidSubscription {
            account: account_name(),
            url: text(),
            levels: any::<u16>(),
            amount: viz(),
            period: any::<u16>(),
        }),
        op!(PaidSubscribe {
            subscriber: account_name(),
            account: account_name(),
            level: any::<u16>(),
            amount: viz(),
            period: any::<u16>(),
            auto_renewal: any::<bool>(),
        }),
        op!(SetAccountPrice {
            account: account_name(),
            account_seller: account_name(),
            account_offer_price: viz(),
            account_on_sale: any::<bool>(),
        }),
        op!(SetSubaccountPrice {
            account: account_name(),
            subaccount_seller: account_name(),
            subaccount_offer_price: viz(),
            subaccount_on_sale: any::<bool>(),
        }),
        op!(BuyAccount {
            buyer: account_name(),
            account: account_name(),
            account_offer_price: viz(),
            account_authorities_key: public_key(),
            tokens_to_shares: viz(),
        }),
        op!(UseInviteBalance {
            initiator: account_name(),
            receiver: account_name(),
            invite_secret: text(),
        }),
        op!(FixedAward {
            initiator: account_name(),
            receiver: account_name(),
            reward_amount: viz(),
            max_energy: 0u16..=10_000,
            custom_sequence: any::<u64>(),
            memo: text(),
            beneficiaries: beneficiaries(),
        }),
        op!(TargetAccountSale {
            account: account_name(),
            account_seller: account_name(),
            target_buyer: account_name(),
            account_offer_price: viz(),
            account_on_sale: any::<bool>(),
        }),
    ])
    .boxed()
}

/// Every operation the ledger emits on its own.
pub fn virtual_operation() -> BoxedStrategy<Operation> {
    Union::new(vec![
        op!(AuthorReward {
            author: account_name(),
            permlink: permlink(),
            token_payout: viz(),
            vesting_payout: shares(),
        }),
        op!(CurationReward {
            curator: account_name(),
            reward: shares(),
            content_author: account_name(),
            content_permlink: permlink(),
        }),
        op!(ContentReward {
            author: account_name(),
            permlink: permlink(),
            payout: viz(),
        }),
        op!(FillVestingWithdraw {
            from_account: account_name(),
            to_account: account_name(),
            withdrawn: shares(),
            deposited: viz(),
        }),
        op!(ShutdownWitness {
            owner: account_name(),
        }),
        op!(Hardfork {
            hardfork_id: any::<u32>(),
        }),
        op!(ContentPayoutUpdate {
            author: account_name(),
            permlink: permlink(),
        }),
        op!(ContentBenefactorReward {
            benefactor: account_name(),
            author: account_name(),
            permlink: permlink(),
            reward: shares(),
        }),
        op!(ReturnVestingDelegation {
            account: account_name(),
            vesting_shares: shares(),
        }),
        op!(CommitteeCancelRequest {
            request_id: any::<u32>(),
        }),
        op!(CommitteeApproveRequest {
            request_id: any::<u32>(),
        }),
        op!(CommitteePayoutRequest {
            request_id: any::<u32>(),
        }),
        op!(CommitteePayRequest {
            worker: account_name(),
            request_id: any::<u32>(),
            tokens: viz(),
        }),
        op!(WitnessReward {
            witness: account_name(),
            shares: shares(),
        }),
        op!(ReceiveAward {
            initiator: account_name(),
            receiver: account_name(),
            custom_sequence: any::<u64>(),
            memo: text(),
            shares: shares(),
        }),
        op!(BenefactorAward {
            initiator: account_name(),
            benefactor: account_name(),
            receiver: account_name(),
            custom_sequence: any::<u64>(),
            memo: text(),
            shares: shares(),
        }),
        op!(PaidSubscriptionAction {
            subscriber: account_name(),
            account: account_name(),
            level: any::<u16>(),
            amount: viz(),
            period: any::<u16>(),
            summary_duration_sec: any::<u64>(),
            summary_amount: viz(),
        }),
        op!(CancelPaidSubscription {
            subscriber: account_name(),
            account: account_name(),
        }),
        op!(AccountSale {
            account: account_name(),
            price: viz(),
            buyer: account_name(),
            seller: account_name(),
        }),
        op!(ExpireEscrowRatification {
            from: account_name(),
            to: account_name(),
            agent: account_name(),
            escrow_id: any::<u32>(),
            token_amount: viz(),
            fee: viz(),
            ratification_deadline: timestamp(),
        }),
    ])
    .boxed()
}

/// Any operation, regular or virtual.
pub fn operation() -> BoxedStrategy<Operation> {
    prop_oneof![3 => regular_operation(), 1 => virtual_operation()].boxed()
}

/// A transaction that passes validation.
pub fn transaction() -> impl Strategy<Value = Transaction> {
    (
        any::<u16>(),
        any::<u32>(),
        timestamp(),
        prop::collection::vec(regular_operation(), 1..4),
    )
        .prop_map(|(ref_block_num, ref_block_prefix, expiration, operations)| Transaction {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations,
            extensions: Extensions::new(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;
    use std::collections::HashSet;
    use viz_protocol_ops::OperationKind;

    #[test]
    fn test_generators_cover_every_kind() {
        let mut runner = TestRunner::deterministic();
        let mut seen = HashSet::new();
        for strategy in [regular_operation(), virtual_operation()] {
            for _ in 0..2_000 {
                let op = strategy.new_tree(&mut runner).unwrap().current();
                seen.extend(op.kind());
            }
        }
        let expected: HashSet<_> = OperationKind::ALL
            .iter()
            .copied()
            .filter(|kind| !kind.is_reserved())
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_split_by_virtual_flag() {
        let mut runner = TestRunner::deterministic();
        for _ in 0..200 {
            let op = regular_operation().new_tree(&mut runner).unwrap().current();
            assert!(!op.is_virtual(), "{} is virtual", op.name());
            let op = virtual_operation().new_tree(&mut runner).unwrap().current();
            assert!(op.is_virtual(), "{} is regular", op.name());
        }
    }
}
