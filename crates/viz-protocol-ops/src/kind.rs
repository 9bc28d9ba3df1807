//! Numeric operation tags.
//!
//! The chain numbers operations by their position in one static variant, with
//! regular and virtual operations interleaved. These numbers are part of the
//! consensus format and never change.

use std::fmt;
use std::str::FromStr;

/// Every slot of the chain's operation variant, in tag order.
///
/// Two slots are reserved: their operations are not supported by this
/// client and decode to [`Operation::Unknown`](crate::Operation::Unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperationKind {
    Vote = 0,
    Content = 1,
    Transfer = 2,
    TransferToVesting = 3,
    WithdrawVesting = 4,
    AccountUpdate = 5,
    WitnessUpdate = 6,
    AccountWitnessVote = 7,
    AccountWitnessProxy = 8,
    DeleteContent = 9,
    Custom = 10,
    SetWithdrawVestingRoute = 11,
    RequestAccountRecovery = 12,
    RecoverAccount = 13,
    ChangeRecoveryAccount = 14,
    EscrowTransfer = 15,
    EscrowDispute = 16,
    EscrowRelease = 17,
    EscrowApprove = 18,
    DelegateVestingShares = 19,
    AccountCreate = 20,
    AccountMetadata = 21,
    ProposalCreate = 22,
    ProposalUpdate = 23,
    ProposalDelete = 24,
    /// Reserved: not supported, decodes as unknown.
    ChainPropertiesUpdate = 25,

    // Ledger-emitted rewards and state changes start here, interleaved
    // with regular operations added by later hardforks.
    AuthorReward = 26,
    CurationReward = 27,
    ContentReward = 28,
    FillVestingWithdraw = 29,
    ShutdownWitness = 30,
    Hardfork = 31,
    ContentPayoutUpdate = 32,
    ContentBenefactorReward = 33,
    ReturnVestingDelegation = 34,
    CommitteeWorkerCreateRequest = 35,
    CommitteeWorkerCancelRequest = 36,
    CommitteeVoteRequest = 37,
    CommitteeCancelRequest = 38,
    CommitteeApproveRequest = 39,
    CommitteePayoutRequest = 40,
    CommitteePayRequest = 41,
    WitnessReward = 42,
    CreateInvite = 43,
    ClaimInviteBalance = 44,
    InviteRegistration = 45,
    /// Reserved: not supported, decodes as unknown.
    VersionedChainPropertiesUpdate = 46,
    Award = 47,
    ReceiveAward = 48,
    BenefactorAward = 49,
    SetPaidSubscription = 50,
    PaidSubscribe = 51,
    PaidSubscriptionAction = 52,
    CancelPaidSubscription = 53,
    SetAccountPrice = 54,
    SetSubaccountPrice = 55,
    BuyAccount = 56,
    AccountSale = 57,
    UseInviteBalance = 58,
    ExpireEscrowRatification = 59,
    FixedAward = 60,
    TargetAccountSale = 61,
}

impl OperationKind {
    /// Number of slots in the tag space.
    pub const COUNT: usize = 62;

    /// All kinds in tag order.
    pub const ALL: [OperationKind; Self::COUNT] = [
        OperationKind::Vote,
        OperationKind::Content,
        OperationKind::Transfer,
        OperationKind::TransferToVesting,
        OperationKind::WithdrawVesting,
        OperationKind::AccountUpdate,
        OperationKind::WitnessUpdate,
        OperationKind::AccountWitnessVote,
        OperationKind::AccountWitnessProxy,
        OperationKind::DeleteContent,
        OperationKind::Custom,
        OperationKind::SetWithdrawVestingRoute,
        OperationKind::RequestAccountRecovery,
        OperationKind::RecoverAccount,
        OperationKind::ChangeRecoveryAccount,
        OperationKind::EscrowTransfer,
        OperationKind::EscrowDispute,
        OperationKind::EscrowRelease,
        OperationKind::EscrowApprove,
        OperationKind::DelegateVestingShares,
        OperationKind::AccountCreate,
        OperationKind::AccountMetadata,
        OperationKind::ProposalCreate,
        OperationKind::ProposalUpdate,
        OperationKind::ProposalDelete,
        OperationKind::ChainPropertiesUpdate,
        OperationKind::AuthorReward,
        OperationKind::CurationReward,
        OperationKind::ContentReward,
        OperationKind::FillVestingWithdraw,
        OperationKind::ShutdownWitness,
        OperationKind::Hardfork,
        OperationKind::ContentPayoutUpdate,
        OperationKind::ContentBenefactorReward,
        OperationKind::ReturnVestingDelegation,
        OperationKind::CommitteeWorkerCreateRequest,
        OperationKind::CommitteeWorkerCancelRequest,
        OperationKind::CommitteeVoteRequest,
        OperationKind::CommitteeCancelRequest,
        OperationKind::CommitteeApproveRequest,
        OperationKind::CommitteePayoutRequest,
        OperationKind::CommitteePayRequest,
        OperationKind::WitnessReward,
        OperationKind::CreateInvite,
        OperationKind::ClaimInviteBalance,
        OperationKind::InviteRegistration,
        OperationKind::VersionedChainPropertiesUpdate,
        OperationKind::Award,
        OperationKind::ReceiveAward,
        OperationKind::BenefactorAward,
        OperationKind::SetPaidSubscription,
        OperationKind::PaidSubscribe,
        OperationKind::PaidSubscriptionAction,
        OperationKind::CancelPaidSubscription,
        OperationKind::SetAccountPrice,
        OperationKind::SetSubaccountPrice,
        OperationKind::BuyAccount,
        OperationKind::AccountSale,
        OperationKind::UseInviteBalance,
        OperationKind::ExpireEscrowRatification,
        OperationKind::FixedAward,
        OperationKind::TargetAccountSale,
    ];

    /// Numeric tag.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a kind by tag.
    pub fn from_id(id: u64) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Name used in JSON, without the `_operation` suffix.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Vote => "vote",
            OperationKind::Content => "content",
            OperationKind::Transfer => "transfer",
            OperationKind::TransferToVesting => "transfer_to_vesting",
            OperationKind::WithdrawVesting => "withdraw_vesting",
            OperationKind::AccountUpdate => "account_update",
            OperationKind::WitnessUpdate => "witness_update",
            OperationKind::AccountWitnessVote => "account_witness_vote",
            OperationKind::AccountWitnessProxy => "account_witness_proxy",
            OperationKind::DeleteContent => "delete_content",
            OperationKind::Custom => "custom",
            OperationKind::SetWithdrawVestingRoute => "set_withdraw_vesting_route",
            OperationKind::RequestAccountRecovery => "request_account_recovery",
            OperationKind::RecoverAccount => "recover_account",
            OperationKind::ChangeRecoveryAccount => "change_recovery_account",
            OperationKind::EscrowTransfer => "escrow_transfer",
            OperationKind::EscrowDispute => "escrow_dispute",
            OperationKind::EscrowRelease => "escrow_release",
            OperationKind::EscrowApprove => "escrow_approve",
            OperationKind::DelegateVestingShares => "delegate_vesting_shares",
            OperationKind::AccountCreate => "account_create",
            OperationKind::AccountMetadata => "account_metadata",
            OperationKind::ProposalCreate => "proposal_create",
            OperationKind::ProposalUpdate => "proposal_update",
            OperationKind::ProposalDelete => "proposal_delete",
            OperationKind::ChainPropertiesUpdate => "chain_properties_update",
            OperationKind::AuthorReward => "author_reward",
            OperationKind::CurationReward => "curation_reward",
            OperationKind::ContentReward => "content_reward",
            OperationKind::FillVestingWithdraw => "fill_vesting_withdraw",
            OperationKind::ShutdownWitness => "shutdown_witness",
            OperationKind::Hardfork => "hardfork",
            OperationKind::ContentPayoutUpdate => "content_payout_update",
            OperationKind::ContentBenefactorReward => "content_benefactor_reward",
            OperationKind::ReturnVestingDelegation => "return_vesting_delegation",
            OperationKind::CommitteeWorkerCreateRequest => "committee_worker_create_request",
            OperationKind::CommitteeWorkerCancelRequest => "committee_worker_cancel_request",
            OperationKind::CommitteeVoteRequest => "committee_vote_request",
            OperationKind::CommitteeCancelRequest => "committee_cancel_request",
            OperationKind::CommitteeApproveRequest => "committee_approve_request",
            OperationKind::CommitteePayoutRequest => "committee_payout_request",
            OperationKind::CommitteePayRequest => "committee_pay_request",
            OperationKind::WitnessReward => "witness_reward",
            OperationKind::CreateInvite => "create_invite",
            OperationKind::ClaimInviteBalance => "claim_invite_balance",
            OperationKind::InviteRegistration => "invite_registration",
            OperationKind::VersionedChainPropertiesUpdate => "versioned_chain_properties_update",
            OperationKind::Award => "award",
            OperationKind::ReceiveAward => "receive_award",
            OperationKind::BenefactorAward => "benefactor_award",
            OperationKind::SetPaidSubscription => "set_paid_subscription",
            OperationKind::PaidSubscribe => "paid_subscribe",
            OperationKind::PaidSubscriptionAction => "paid_subscription_action",
            OperationKind::CancelPaidSubscription => "cancel_paid_subscription",
            OperationKind::SetAccountPrice => "set_account_price",
            OperationKind::SetSubaccountPrice => "set_subaccount_price",
            OperationKind::BuyAccount => "buy_account",
            OperationKind::AccountSale => "account_sale",
            OperationKind::UseInviteBalance => "use_invite_balance",
            OperationKind::ExpireEscrowRatification => "expire_escrow_ratification",
            OperationKind::FixedAward => "fixed_award",
            OperationKind::TargetAccountSale => "target_account_sale",
        }
    }

    /// Look up a kind by JSON name. A trailing `_operation` is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_suffix("_operation").unwrap_or(name);
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Ledger-emitted operations that no one can sign.
    pub fn is_virtual(self) -> bool {
        match self {
            OperationKind::AuthorReward
            | OperationKind::CurationReward
            | OperationKind::ContentReward
            | OperationKind::FillVestingWithdraw
            | OperationKind::ShutdownWitness
            | OperationKind::Hardfork
            | OperationKind::ContentPayoutUpdate
            | OperationKind::ContentBenefactorReward
            | OperationKind::ReturnVestingDelegation
            | OperationKind::CommitteeCancelRequest
            | OperationKind::CommitteeApproveRequest
            | OperationKind::CommitteePayoutRequest
            | OperationKind::CommitteePayRequest
            | OperationKind::WitnessReward
            | OperationKind::ReceiveAward
            | OperationKind::BenefactorAward
            | OperationKind::PaidSubscriptionAction
            | OperationKind::CancelPaidSubscription
            | OperationKind::AccountSale
            | OperationKind::ExpireEscrowRatification => true,
            OperationKind::Vote
            | OperationKind::Content
            | OperationKind::Transfer
            | OperationKind::TransferToVesting
            | OperationKind::WithdrawVesting
            | OperationKind::AccountUpdate
            | OperationKind::WitnessUpdate
            | OperationKind::AccountWitnessVote
            | OperationKind::AccountWitnessProxy
            | OperationKind::DeleteContent
            | OperationKind::Custom
            | OperationKind::SetWithdrawVestingRoute
            | OperationKind::RequestAccountRecovery
            | OperationKind::RecoverAccount
            | OperationKind::ChangeRecoveryAccount
            | OperationKind::EscrowTransfer
            | OperationKind::EscrowDispute
            | OperationKind::EscrowRelease
            | OperationKind::EscrowApprove
            | OperationKind::DelegateVestingShares
            | OperationKind::AccountCreate
            | OperationKind::AccountMetadata
            | OperationKind::ProposalCreate
            | OperationKind::ProposalUpdate
            | OperationKind::ProposalDelete
            | OperationKind::ChainPropertiesUpdate
            | OperationKind::CommitteeWorkerCreateRequest
            | OperationKind::CommitteeWorkerCancelRequest
            | OperationKind::CommitteeVoteRequest
            | OperationKind::CreateInvite
            | OperationKind::ClaimInviteBalance
            | OperationKind::InviteRegistration
            | OperationKind::VersionedChainPropertiesUpdate
            | OperationKind::Award
            | OperationKind::SetPaidSubscription
            | OperationKind::PaidSubscribe
            | OperationKind::SetAccountPrice
            | OperationKind::SetSubaccountPrice
            | OperationKind::BuyAccount
            | OperationKind::UseInviteBalance
            | OperationKind::FixedAward
            | OperationKind::TargetAccountSale => false,
        }
    }

    /// Slots this client keeps but cannot encode or decode.
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            OperationKind::ChainPropertiesUpdate | OperationKind::VersionedChainPropertiesUpdate
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown operation {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_positions() {
        for (i, kind) in OperationKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i);
            assert_eq!(OperationKind::from_id(i as u64), Some(*kind));
        }
        assert_eq!(OperationKind::from_id(62), None);
        assert_eq!(OperationKind::from_id(u64::MAX), None);
    }

    #[test]
    fn test_stable_tags() {
        assert_eq!(OperationKind::Vote.id(), 0);
        assert_eq!(OperationKind::Transfer.id(), 2);
        assert_eq!(OperationKind::AccountCreate.id(), 20);
        assert_eq!(OperationKind::CommitteeWorkerCreateRequest.id(), 35);
        assert_eq!(OperationKind::Award.id(), 47);
        assert_eq!(OperationKind::TargetAccountSale.id(), 61);
    }

    #[test]
    fn test_names_roundtrip() {
        for kind in OperationKind::ALL {
            assert_eq!(OperationKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(
            OperationKind::from_name("transfer_operation"),
            Some(OperationKind::Transfer)
        );
        assert_eq!(OperationKind::from_name("comment"), None);
    }

    #[test]
    fn test_virtual_flags() {
        assert!(!OperationKind::Transfer.is_virtual());
        assert!(OperationKind::AuthorReward.is_virtual());
        assert!(OperationKind::ReceiveAward.is_virtual());
        assert!(!OperationKind::FixedAward.is_virtual());
        assert!(OperationKind::ExpireEscrowRatification.is_virtual());

        let virtual_count = OperationKind::ALL.iter().filter(|k| k.is_virtual()).count();
        assert_eq!(virtual_count, 20);
    }

    #[test]
    fn test_reserved_slots() {
        let reserved: Vec<u8> = OperationKind::ALL
            .iter()
            .filter(|k| k.is_reserved())
            .map(|k| k.id())
            .collect();
        assert_eq!(reserved, vec![25, 46]);
    }
}
