//! The operation registry: one enum over every supported operation.
//!
//! Binary form is `varint(tag) || payload`. JSON form is the pair
//! `[name, payload]`. Tags and names come from [`OperationKind`].
//!
//! Decoding never fails on an unrecognized tag or name. It produces
//! [`Operation::Unknown`] instead, which can be inspected and re-emitted as
//! JSON but never encoded to the wire.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use tracing::debug;
use viz_protocol_core::{WireDecode, WireDecoder, WireEncode, WireEncoder, WireError};

use crate::kind::OperationKind;
use crate::ops::*;

/// Any operation the chain knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Vote(Vote),
    Content(Content),
    Transfer(Transfer),
    TransferToVesting(TransferToVesting),
    WithdrawVesting(WithdrawVesting),
    AccountUpdate(AccountUpdate),
    WitnessUpdate(WitnessUpdate),
    AccountWitnessVote(AccountWitnessVote),
    AccountWitnessProxy(AccountWitnessProxy),
    DeleteContent(DeleteContent),
    Custom(Custom),
    SetWithdrawVestingRoute(SetWithdrawVestingRoute),
    RequestAccountRecovery(RequestAccountRecovery),
    RecoverAccount(RecoverAccount),
    ChangeRecoveryAccount(ChangeRecoveryAccount),
    EscrowTransfer(EscrowTransfer),
    EscrowDispute(EscrowDispute),
    EscrowRelease(EscrowRelease),
    EscrowApprove(EscrowApprove),
    DelegateVestingShares(DelegateVestingShares),
    AccountCreate(AccountCreate),
    AccountMetadata(AccountMetadata),
    ProposalCreate(ProposalCreate),
    ProposalUpdate(ProposalUpdate),
    ProposalDelete(ProposalDelete),

    // Regular and virtual operations interleave from here on.
    AuthorReward(AuthorReward),
    CurationReward(CurationReward),
    ContentReward(ContentReward),
    FillVestingWithdraw(FillVestingWithdraw),
    ShutdownWitness(ShutdownWitness),
    Hardfork(Hardfork),
    ContentPayoutUpdate(ContentPayoutUpdate),
    ContentBenefactorReward(ContentBenefactorReward),
    ReturnVestingDelegation(ReturnVestingDelegation),

    CommitteeWorkerCreateRequest(CommitteeWorkerCreateRequest),
    CommitteeWorkerCancelRequest(CommitteeWorkerCancelRequest),
    CommitteeVoteRequest(CommitteeVoteRequest),
    CommitteeCancelRequest(CommitteeCancelRequest),
    CommitteeApproveRequest(CommitteeApproveRequest),
    CommitteePayoutRequest(CommitteePayoutRequest),
    CommitteePayRequest(CommitteePayRequest),
    WitnessReward(WitnessReward),
    CreateInvite(CreateInvite),
    ClaimInviteBalance(ClaimInviteBalance),
    InviteRegistration(InviteRegistration),
    Award(Award),
    ReceiveAward(ReceiveAward),
    BenefactorAward(BenefactorAward),
    SetPaidSubscription(SetPaidSubscription),
    PaidSubscribe(PaidSubscribe),
    PaidSubscriptionAction(PaidSubscriptionAction),
    CancelPaidSubscription(CancelPaidSubscription),
    SetAccountPrice(SetAccountPrice),
    SetSubaccountPrice(SetSubaccountPrice),
    BuyAccount(BuyAccount),
    AccountSale(AccountSale),
    UseInviteBalance(UseInviteBalance),
    ExpireEscrowRatification(ExpireEscrowRatification),
    FixedAward(FixedAward),
    TargetAccountSale(TargetAccountSale),

    /// An operation this client cannot interpret.
    Unknown(UnknownOperation),
}

/// What is known about an operation that failed to resolve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnknownOperation {
    /// Tag, when decoded from binary or given numerically in JSON.
    pub id: Option<u64>,
    /// Name, when given in JSON or when the tag is a reserved slot.
    pub name: Option<String>,
    /// Undecoded bytes following the tag, through the end of the buffer.
    pub raw: Vec<u8>,
    /// JSON payload as received.
    pub body: Value,
}

impl Operation {
    /// The kind of a recognized operation; `None` for [`Operation::Unknown`].
    pub fn kind(&self) -> Option<OperationKind> {
        let kind = match self {
            Operation::Vote(_) => OperationKind::Vote,
            Operation::Content(_) => OperationKind::Content,
            Operation::Transfer(_) => OperationKind::Transfer,
            Operation::TransferToVesting(_) => OperationKind::TransferToVesting,
            Operation::WithdrawVesting(_) => OperationKind::WithdrawVesting,
            Operation::AccountUpdate(_) => OperationKind::AccountUpdate,
            Operation::WitnessUpdate(_) => OperationKind::WitnessUpdate,
            Operation::AccountWitnessVote(_) => OperationKind::AccountWitnessVote,
            Operation::AccountWitnessProxy(_) => OperationKind::AccountWitnessProxy,
            Operation::DeleteContent(_) => OperationKind::DeleteContent,
            Operation::Custom(_) => OperationKind::Custom,
            Operation::SetWithdrawVestingRoute(_) => OperationKind::SetWithdrawVestingRoute,
            Operation::RequestAccountRecovery(_) => OperationKind::RequestAccountRecovery,
            Operation::RecoverAccount(_) => OperationKind::RecoverAccount,
            Operation::ChangeRecoveryAccount(_) => OperationKind::ChangeRecoveryAccount,
            Operation::EscrowTransfer(_) => OperationKind::EscrowTransfer,
            Operation::EscrowDispute(_) => OperationKind::EscrowDispute,
            Operation::EscrowRelease(_) => OperationKind::EscrowRelease,
            Operation::EscrowApprove(_) => OperationKind::EscrowApprove,
            Operation::DelegateVestingShares(_) => OperationKind::DelegateVestingShares,
            Operation::AccountCreate(_) => OperationKind::AccountCreate,
            Operation::AccountMetadata(_) => OperationKind::AccountMetadata,
            Operation::ProposalCreate(_) => OperationKind::ProposalCreate,
            Operation::ProposalUpdate(_) => OperationKind::ProposalUpdate,
            Operation::ProposalDelete(_) => OperationKind::ProposalDelete,
            Operation::AuthorReward(_) => OperationKind::AuthorReward,
            Operation::CurationReward(_) => OperationKind::CurationReward,
            Operation::ContentReward(_) => OperationKind::ContentReward,
            Operation::FillVestingWithdraw(_) => OperationKind::FillVestingWithdraw,
            Operation::ShutdownWitness(_) => OperationKind::ShutdownWitness,
            Operation::Hardfork(_) => OperationKind::Hardfork,
            Operation::ContentPayoutUpdate(_) => OperationKind::ContentPayoutUpdate,
            Operation::ContentBenefactorReward(_) => OperationKind::ContentBenefactorReward,
            Operation::ReturnVestingDelegation(_) => OperationKind::ReturnVestingDelegation,
            Operation::CommitteeWorkerCreateRequest(_) => OperationKind::CommitteeWorkerCreateRequest,
            Operation::CommitteeWorkerCancelRequest(_) => OperationKind::CommitteeWorkerCancelRequest,
            Operation::CommitteeVoteRequest(_) => OperationKind::CommitteeVoteRequest,
            Operation::CommitteeCancelRequest(_) => OperationKind::CommitteeCancelRequest,
            Operation::CommitteeApproveRequest(_) => OperationKind::CommitteeApproveRequest,
            Operation::CommitteePayoutRequest(_) => OperationKind::CommitteePayoutRequest,
            Operation::CommitteePayRequest(_) => OperationKind::CommitteePayRequest,
            Operation::WitnessReward(_) => OperationKind::WitnessReward,
            Operation::CreateInvite(_) => OperationKind::CreateInvite,
            Operation::ClaimInviteBalance(_) => OperationKind::ClaimInviteBalance,
            Operation::InviteRegistration(_) => OperationKind::InviteRegistration,
            Operation::Award(_) => OperationKind::Award,
            Operation::ReceiveAward(_) => OperationKind::ReceiveAward,
            Operation::BenefactorAward(_) => OperationKind::BenefactorAward,
            Operation::SetPaidSubscription(_) => OperationKind::SetPaidSubscription,
            Operation::PaidSubscribe(_) => OperationKind::PaidSubscribe,
            Operation::PaidSubscriptionAction(_) => OperationKind::PaidSubscriptionAction,
            Operation::CancelPaidSubscription(_) => OperationKind::CancelPaidSubscription,
            Operation::SetAccountPrice(_) => OperationKind::SetAccountPrice,
            Operation::SetSubaccountPrice(_) => OperationKind::SetSubaccountPrice,
            Operation::BuyAccount(_) => OperationKind::BuyAccount,
            Operation::AccountSale(_) => OperationKind::AccountSale,
            Operation::UseInviteBalance(_) => OperationKind::UseInviteBalance,
            Operation::ExpireEscrowRatification(_) => OperationKind::ExpireEscrowRatification,
            Operation::FixedAward(_) => OperationKind::FixedAward,
            Operation::TargetAccountSale(_) => OperationKind::TargetAccountSale,
            Operation::Unknown(_) => return None,
        };
        Some(kind)
    }

    /// The JSON name, or the best available label for an unknown operation.
    pub fn name(&self) -> &str {
        match (self.kind(), self) {
            (Some(kind), _) => kind.name(),
            (None, Operation::Unknown(unknown)) => unknown.name.as_deref().unwrap_or("unknown"),
            (None, _) => "unknown",
        }
    }

    /// Ledger-emitted operations may not appear in a transaction.
    pub fn is_virtual(&self) -> bool {
        self.kind().is_some_and(OperationKind::is_virtual)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Operation::Unknown(_))
    }

    fn encode_payload(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        match self {
            Operation::Vote(op) => op.encode(enc),
            Operation::Content(op) => op.encode(enc),
            Operation::Transfer(op) => op.encode(enc),
            Operation::TransferToVesting(op) => op.encode(enc),
            Operation::WithdrawVesting(op) => op.encode(enc),
            Operation::AccountUpdate(op) => op.encode(enc),
            Operation::WitnessUpdate(op) => op.encode(enc),
            Operation::AccountWitnessVote(op) => op.encode(enc),
            Operation::AccountWitnessProxy(op) => op.encode(enc),
            Operation::DeleteContent(op) => op.encode(enc),
            Operation::Custom(op) => op.encode(enc),
            Operation::SetWithdrawVestingRoute(op) => op.encode(enc),
            Operation::RequestAccountRecovery(op) => op.encode(enc),
            Operation::RecoverAccount(op) => op.encode(enc),
            Operation::ChangeRecoveryAccount(op) => op.encode(enc),
            Operation::EscrowTransfer(op) => op.encode(enc),
            Operation::EscrowDispute(op) => op.encode(enc),
            Operation::EscrowRelease(op) => op.encode(enc),
            Operation::EscrowApprove(op) => op.encode(enc),
            Operation::DelegateVestingShares(op) => op.encode(enc),
            Operation::AccountCreate(op) => op.encode(enc),
            Operation::AccountMetadata(op) => op.encode(enc),
            Operation::ProposalCreate(op) => op.encode(enc),
            Operation::ProposalUpdate(op) => op.encode(enc),
            Operation::ProposalDelete(op) => op.encode(enc),
            Operation::AuthorReward(op) => op.encode(enc),
            Operation::CurationReward(op) => op.encode(enc),
            Operation::ContentReward(op) => op.encode(enc),
            Operation::FillVestingWithdraw(op) => op.encode(enc),
            Operation::ShutdownWitness(op) => op.encode(enc),
            Operation::Hardfork(op) => op.encode(enc),
            Operation::ContentPayoutUpdate(op) => op.encode(enc),
            Operation::ContentBenefactorReward(op) => op.encode(enc),
            Operation::ReturnVestingDelegation(op) => op.encode(enc),
            Operation::CommitteeWorkerCreateRequest(op) => op.encode(enc),
            Operation::CommitteeWorkerCancelRequest(op) => op.encode(enc),
            Operation::CommitteeVoteRequest(op) => op.encode(enc),
            Operation::CommitteeCancelRequest(op) => op.encode(enc),
            Operation::CommitteeApproveRequest(op) => op.encode(enc),
            Operation::CommitteePayoutRequest(op) => op.encode(enc),
            Operation::CommitteePayRequest(op) => op.encode(enc),
            Operation::WitnessReward(op) => op.encode(enc),
            Operation::CreateInvite(op) => op.encode(enc),
            Operation::ClaimInviteBalance(op) => op.encode(enc),
            Operation::InviteRegistration(op) => op.encode(enc),
            Operation::Award(op) => op.encode(enc),
            Operation::ReceiveAward(op) => op.encode(enc),
            Operation::BenefactorAward(op) => op.encode(enc),
            Operation::SetPaidSubscription(op) => op.encode(enc),
            Operation::PaidSubscribe(op) => op.encode(enc),
            Operation::PaidSubscriptionAction(op) => op.encode(enc),
            Operation::CancelPaidSubscription(op) => op.encode(enc),
            Operation::SetAccountPrice(op) => op.encode(enc),
            Operation::SetSubaccountPrice(op) => op.encode(enc),
            Operation::BuyAccount(op) => op.encode(enc),
            Operation::AccountSale(op) => op.encode(enc),
            Operation::UseInviteBalance(op) => op.encode(enc),
            Operation::ExpireEscrowRatification(op) => op.encode(enc),
            Operation::FixedAward(op) => op.encode(enc),
            Operation::TargetAccountSale(op) => op.encode(enc),
            Operation::Unknown(_) => Err(WireError::UnsupportedType(
                "unserializable operation".into(),
            )),
        }
    }

    /// Decode the payload for `kind`; `None` for reserved slots.
    fn decode_payload(
        kind: OperationKind,
        dec: &mut WireDecoder<'_>,
    ) -> Result<Option<Self>, WireError> {
        let op = match kind {
            OperationKind::Vote => Operation::Vote(dec.get()?),
            OperationKind::Content => Operation::Content(dec.get()?),
            OperationKind::Transfer => Operation::Transfer(dec.get()?),
            OperationKind::TransferToVesting => Operation::TransferToVesting(dec.get()?),
            OperationKind::WithdrawVesting => Operation::WithdrawVesting(dec.get()?),
            OperationKind::AccountUpdate => Operation::AccountUpdate(dec.get()?),
            OperationKind::WitnessUpdate => Operation::WitnessUpdate(dec.get()?),
            OperationKind::AccountWitnessVote => Operation::AccountWitnessVote(dec.get()?),
            OperationKind::AccountWitnessProxy => Operation::AccountWitnessProxy(dec.get()?),
            OperationKind::DeleteContent => Operation::DeleteContent(dec.get()?),
            OperationKind::Custom => Operation::Custom(dec.get()?),
            OperationKind::SetWithdrawVestingRoute => Operation::SetWithdrawVestingRoute(dec.get()?),
            OperationKind::RequestAccountRecovery => Operation::RequestAccountRecovery(dec.get()?),
            OperationKind::RecoverAccount => Operation::RecoverAccount(dec.get()?),
            OperationKind::ChangeRecoveryAccount => Operation::ChangeRecoveryAccount(dec.get()?),
            OperationKind::EscrowTransfer => Operation::EscrowTransfer(dec.get()?),
            OperationKind::EscrowDispute => Operation::EscrowDispute(dec.get()?),
            OperationKind::EscrowRelease => Operation::EscrowRelease(dec.get()?),
            OperationKind::EscrowApprove => Operation::EscrowApprove(dec.get()?),
            OperationKind::DelegateVestingShares => Operation::DelegateVestingShares(dec.get()?),
            OperationKind::AccountCreate => Operation::AccountCreate(dec.get()?),
            OperationKind::AccountMetadata => Operation::AccountMetadata(dec.get()?),
            OperationKind::ProposalCreate => Operation::ProposalCreate(dec.get()?),
            OperationKind::ProposalUpdate => Operation::ProposalUpdate(dec.get()?),
            OperationKind::ProposalDelete => Operation::ProposalDelete(dec.get()?),
            OperationKind::AuthorReward => Operation::AuthorReward(dec.get()?),
            OperationKind::CurationReward => Operation::CurationReward(dec.get()?),
            OperationKind::ContentReward => Operation::ContentReward(dec.get()?),
            OperationKind::FillVestingWithdraw => Operation::FillVestingWithdraw(dec.get()?),
            OperationKind::ShutdownWitness => Operation::ShutdownWitness(dec.get()?),
            OperationKind::Hardfork => Operation::Hardfork(dec.get()?),
            OperationKind::ContentPayoutUpdate => Operation::ContentPayoutUpdate(dec.get()?),
            OperationKind::ContentBenefactorReward => Operation::ContentBenefactorReward(dec.get()?),
            OperationKind::ReturnVestingDelegation => Operation::ReturnVestingDelegation(dec.get()?),
            OperationKind::CommitteeWorkerCreateRequest => Operation::CommitteeWorkerCreateRequest(dec.get()?),
            OperationKind::CommitteeWorkerCancelRequest => Operation::CommitteeWorkerCancelRequest(dec.get()?),
            OperationKind::CommitteeVoteRequest => Operation::CommitteeVoteRequest(dec.get()?),
            OperationKind::CommitteeCancelRequest => Operation::CommitteeCancelRequest(dec.get()?),
            OperationKind::CommitteeApproveRequest => Operation::CommitteeApproveRequest(dec.get()?),
            OperationKind::CommitteePayoutRequest => Operation::CommitteePayoutRequest(dec.get()?),
            OperationKind::CommitteePayRequest => Operation::CommitteePayRequest(dec.get()?),
            OperationKind::WitnessReward => Operation::WitnessReward(dec.get()?),
            OperationKind::CreateInvite => Operation::CreateInvite(dec.get()?),
            OperationKind::ClaimInviteBalance => Operation::ClaimInviteBalance(dec.get()?),
            OperationKind::InviteRegistration => Operation::InviteRegistration(dec.get()?),
            OperationKind::Award => Operation::Award(dec.get()?),
            OperationKind::ReceiveAward => Operation::ReceiveAward(dec.get()?),
            OperationKind::BenefactorAward => Operation::BenefactorAward(dec.get()?),
            OperationKind::SetPaidSubscription => Operation::SetPaidSubscription(dec.get()?),
            OperationKind::PaidSubscribe => Operation::PaidSubscribe(dec.get()?),
            OperationKind::PaidSubscriptionAction => Operation::PaidSubscriptionAction(dec.get()?),
            OperationKind::CancelPaidSubscription => Operation::CancelPaidSubscription(dec.get()?),
            OperationKind::SetAccountPrice => Operation::SetAccountPrice(dec.get()?),
            OperationKind::SetSubaccountPrice => Operation::SetSubaccountPrice(dec.get()?),
            OperationKind::BuyAccount => Operation::BuyAccount(dec.get()?),
            OperationKind::AccountSale => Operation::AccountSale(dec.get()?),
            OperationKind::UseInviteBalance => Operation::UseInviteBalance(dec.get()?),
            OperationKind::ExpireEscrowRatification => Operation::ExpireEscrowRatification(dec.get()?),
            OperationKind::FixedAward => Operation::FixedAward(dec.get()?),
            OperationKind::TargetAccountSale => Operation::TargetAccountSale(dec.get()?),
            OperationKind::ChainPropertiesUpdate
            | OperationKind::VersionedChainPropertiesUpdate => return Ok(None),
        };
        Ok(Some(op))
    }

    fn serialize_payload<T: SerializeTuple>(&self, tuple: &mut T) -> Result<(), T::Error> {
        match self {
            Operation::Vote(op) => tuple.serialize_element(op),
            Operation::Content(op) => tuple.serialize_element(op),
            Operation::Transfer(op) => tuple.serialize_element(op),
            Operation::TransferToVesting(op) => tuple.serialize_element(op),
            Operation::WithdrawVesting(op) => tuple.serialize_element(op),
            Operation::AccountUpdate(op) => tuple.serialize_element(op),
            Operation::WitnessUpdate(op) => tuple.serialize_element(op),
            Operation::AccountWitnessVote(op) => tuple.serialize_element(op),
            Operation::AccountWitnessProxy(op) => tuple.serialize_element(op),
            Operation::DeleteContent(op) => tuple.serialize_element(op),
            Operation::Custom(op) => tuple.serialize_element(op),
            Operation::SetWithdrawVestingRoute(op) => tuple.serialize_element(op),
            Operation::RequestAccountRecovery(op) => tuple.serialize_element(op),
            Operation::RecoverAccount(op) => tuple.serialize_element(op),
            Operation::ChangeRecoveryAccount(op) => tuple.serialize_element(op),
            Operation::EscrowTransfer(op) => tuple.serialize_element(op),
            Operation::EscrowDispute(op) => tuple.serialize_element(op),
            Operation::EscrowRelease(op) => tuple.serialize_element(op),
            Operation::EscrowApprove(op) => tuple.serialize_element(op),
            Operation::DelegateVestingShares(op) => tuple.serialize_element(op),
            Operation::AccountCreate(op) => tuple.serialize_element(op),
            Operation::AccountMetadata(op) => tuple.serialize_element(op),
            Operation::ProposalCreate(op) => tuple.serialize_element(op),
            Operation::ProposalUpdate(op) => tuple.serialize_element(op),
            Operation::ProposalDelete(op) => tuple.serialize_element(op),
            Operation::AuthorReward(op) => tuple.serialize_element(op),
            Operation::CurationReward(op) => tuple.serialize_element(op),
            Operation::ContentReward(op) => tuple.serialize_element(op),
            Operation::FillVestingWithdraw(op) => tuple.serialize_element(op),
            Operation::ShutdownWitness(op) => tuple.serialize_element(op),
            Operation::Hardfork(op) => tuple.serialize_element(op),
            Operation::ContentPayoutUpdate(op) => tuple.serialize_element(op),
            Operation::ContentBenefactorReward(op) => tuple.serialize_element(op),
            Operation::ReturnVestingDelegation(op) => tuple.serialize_element(op),
            Operation::CommitteeWorkerCreateRequest(op) => tuple.serialize_element(op),
            Operation::CommitteeWorkerCancelRequest(op) => tuple.serialize_element(op),
            Operation::CommitteeVoteRequest(op) => tuple.serialize_element(op),
            Operation::CommitteeCancelRequest(op) => tuple.serialize_element(op),
            Operation::CommitteeApproveRequest(op) => tuple.serialize_element(op),
            Operation::CommitteePayoutRequest(op) => tuple.serialize_element(op),
            Operation::CommitteePayRequest(op) => tuple.serialize_element(op),
            Operation::WitnessReward(op) => tuple.serialize_element(op),
            Operation::CreateInvite(op) => tuple.serialize_element(op),
            Operation::ClaimInviteBalance(op) => tuple.serialize_element(op),
            Operation::InviteRegistration(op) => tuple.serialize_element(op),
            Operation::Award(op) => tuple.serialize_element(op),
            Operation::ReceiveAward(op) => tuple.serialize_element(op),
            Operation::BenefactorAward(op) => tuple.serialize_element(op),
            Operation::SetPaidSubscription(op) => tuple.serialize_element(op),
            Operation::PaidSubscribe(op) => tuple.serialize_element(op),
            Operation::PaidSubscriptionAction(op) => tuple.serialize_element(op),
            Operation::CancelPaidSubscription(op) => tuple.serialize_element(op),
            Operation::SetAccountPrice(op) => tuple.serialize_element(op),
            Operation::SetSubaccountPrice(op) => tuple.serialize_element(op),
            Operation::BuyAccount(op) => tuple.serialize_element(op),
            Operation::AccountSale(op) => tuple.serialize_element(op),
            Operation::UseInviteBalance(op) => tuple.serialize_element(op),
            Operation::ExpireEscrowRatification(op) => tuple.serialize_element(op),
            Operation::FixedAward(op) => tuple.serialize_element(op),
            Operation::TargetAccountSale(op) => tuple.serialize_element(op),
            Operation::Unknown(unknown) => tuple.serialize_element(&unknown.body),
        }
    }

    /// Build from a resolved kind and its JSON payload; `None` for reserved slots.
    fn from_json_payload(
        kind: OperationKind,
        body: Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        let op = match kind {
            OperationKind::Vote => Operation::Vote(serde_json::from_value(body)?),
            OperationKind::Content => Operation::Content(serde_json::from_value(body)?),
            OperationKind::Transfer => Operation::Transfer(serde_json::from_value(body)?),
            OperationKind::TransferToVesting => Operation::TransferToVesting(serde_json::from_value(body)?),
            OperationKind::WithdrawVesting => Operation::WithdrawVesting(serde_json::from_value(body)?),
            OperationKind::AccountUpdate => Operation::AccountUpdate(serde_json::from_value(body)?),
            OperationKind::WitnessUpdate => Operation::WitnessUpdate(serde_json::from_value(body)?),
            OperationKind::AccountWitnessVote => Operation::AccountWitnessVote(serde_json::from_value(body)?),
            OperationKind::AccountWitnessProxy => Operation::AccountWitnessProxy(serde_json::from_value(body)?),
            OperationKind::DeleteContent => Operation::DeleteContent(serde_json::from_value(body)?),
            OperationKind::Custom => Operation::Custom(serde_json::from_value(body)?),
            OperationKind::SetWithdrawVestingRoute => Operation::SetWithdrawVestingRoute(serde_json::from_value(body)?),
            OperationKind::RequestAccountRecovery => Operation::RequestAccountRecovery(serde_json::from_value(body)?),
            OperationKind::RecoverAccount => Operation::RecoverAccount(serde_json::from_value(body)?),
            OperationKind::ChangeRecoveryAccount => Operation::ChangeRecoveryAccount(serde_json::from_value(body)?),
            OperationKind::EscrowTransfer => Operation::EscrowTransfer(serde_json::from_value(body)?),
            OperationKind::EscrowDispute => Operation::EscrowDispute(serde_json::from_value(body)?),
            OperationKind::EscrowRelease => Operation::EscrowRelease(serde_json::from_value(body)?),
            OperationKind::EscrowApprove => Operation::EscrowApprove(serde_json::from_value(body)?),
            OperationKind::DelegateVestingShares => Operation::DelegateVestingShares(serde_json::from_value(body)?),
            OperationKind::AccountCreate => Operation::AccountCreate(serde_json::from_value(body)?),
            OperationKind::AccountMetadata => Operation::AccountMetadata(serde_json::from_value(body)?),
            OperationKind::ProposalCreate => Operation::ProposalCreate(serde_json::from_value(body)?),
            OperationKind::ProposalUpdate => Operation::ProposalUpdate(serde_json::from_value(body)?),
            OperationKind::ProposalDelete => Operation::ProposalDelete(serde_json::from_value(body)?),
            OperationKind::AuthorReward => Operation::AuthorReward(serde_json::from_value(body)?),
            OperationKind::CurationReward => Operation::CurationReward(serde_json::from_value(body)?),
            OperationKind::ContentReward => Operation::ContentReward(serde_json::from_value(body)?),
            OperationKind::FillVestingWithdraw => Operation::FillVestingWithdraw(serde_json::from_value(body)?),
            OperationKind::ShutdownWitness => Operation::ShutdownWitness(serde_json::from_value(body)?),
            OperationKind::Hardfork => Operation::Hardfork(serde_json::from_value(body)?),
            OperationKind::ContentPayoutUpdate => Operation::ContentPayoutUpdate(serde_json::from_value(body)?),
            OperationKind::ContentBenefactorReward => Operation::ContentBenefactorReward(serde_json::from_value(body)?),
            OperationKind::ReturnVestingDelegation => Operation::ReturnVestingDelegation(serde_json::from_value(body)?),
            OperationKind::CommitteeWorkerCreateRequest => Operation::CommitteeWorkerCreateRequest(serde_json::from_value(body)?),
            OperationKind::CommitteeWorkerCancelRequest => Operation::CommitteeWorkerCancelRequest(serde_json::from_value(body)?),
            OperationKind::CommitteeVoteRequest => Operation::CommitteeVoteRequest(serde_json::from_value(body)?),
            OperationKind::CommitteeCancelRequest => Operation::CommitteeCancelRequest(serde_json::from_value(body)?),
            OperationKind::CommitteeApproveRequest => Operation::CommitteeApproveRequest(serde_json::from_value(body)?),
            OperationKind::CommitteePayoutRequest => Operation::CommitteePayoutRequest(serde_json::from_value(body)?),
            OperationKind::CommitteePayRequest => Operation::CommitteePayRequest(serde_json::from_value(body)?),
            OperationKind::WitnessReward => Operation::WitnessReward(serde_json::from_value(body)?),
            OperationKind::CreateInvite => Operation::CreateInvite(serde_json::from_value(body)?),
            OperationKind::ClaimInviteBalance => Operation::ClaimInviteBalance(serde_json::from_value(body)?),
            OperationKind::InviteRegistration => Operation::InviteRegistration(serde_json::from_value(body)?),
            OperationKind::Award => Operation::Award(serde_json::from_value(body)?),
            OperationKind::ReceiveAward => Operation::ReceiveAward(serde_json::from_value(body)?),
            OperationKind::BenefactorAward => Operation::BenefactorAward(serde_json::from_value(body)?),
            OperationKind::SetPaidSubscription => Operation::SetPaidSubscription(serde_json::from_value(body)?),
            OperationKind::PaidSubscribe => Operation::PaidSubscribe(serde_json::from_value(body)?),
            OperationKind::PaidSubscriptionAction => Operation::PaidSubscriptionAction(serde_json::from_value(body)?),
            OperationKind::CancelPaidSubscription => Operation::CancelPaidSubscription(serde_json::from_value(body)?),
            OperationKind::SetAccountPrice => Operation::SetAccountPrice(serde_json::from_value(body)?),
            OperationKind::SetSubaccountPrice => Operation::SetSubaccountPrice(serde_json::from_value(body)?),
            OperationKind::BuyAccount => Operation::BuyAccount(serde_json::from_value(body)?),
            OperationKind::AccountSale => Operation::AccountSale(serde_json::from_value(body)?),
            OperationKind::UseInviteBalance => Operation::UseInviteBalance(serde_json::from_value(body)?),
            OperationKind::ExpireEscrowRatification => Operation::ExpireEscrowRatification(serde_json::from_value(body)?),
            OperationKind::FixedAward => Operation::FixedAward(serde_json::from_value(body)?),
            OperationKind::TargetAccountSale => Operation::TargetAccountSale(serde_json::from_value(body)?),
            OperationKind::ChainPropertiesUpdate
            | OperationKind::VersionedChainPropertiesUpdate => return Ok(None),
        };
        Ok(Some(op))
    }
}

impl WireEncode for Operation {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        let kind = self
            .kind()
            .ok_or_else(|| WireError::UnsupportedType("unserializable operation".into()))?;
        enc.put_varint(u64::from(kind.id()));
        self.encode_payload(enc)
    }
}

impl WireDecode for Operation {
    /// An unrecognized or reserved tag swallows the rest of the buffer, since
    /// its payload length cannot be known.
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        let tag = dec.get_varint()?;
        let kind = OperationKind::from_id(tag);
        if let Some(kind) = kind {
            if let Some(op) = Self::decode_payload(kind, dec)? {
                return Ok(op);
            }
        }
        debug!(tag, "decoded unknown operation tag");
        Ok(Operation::Unknown(UnknownOperation {
            id: Some(tag),
            name: kind.map(|k| k.name().to_string()),
            raw: dec.take_rest().to_vec(),
            body: Value::Null,
        }))
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        match self {
            Operation::Unknown(UnknownOperation { name: Some(name), .. }) => {
                tuple.serialize_element(name)?
            }
            Operation::Unknown(UnknownOperation { id: Some(id), .. }) => {
                tuple.serialize_element(id)?
            }
            _ => tuple.serialize_element(self.name())?,
        }
        self.serialize_payload(&mut tuple)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairVisitor;

        impl<'de> Visitor<'de> for PairVisitor {
            type Value = Operation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an operation as [name, payload]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Operation, A::Error> {
                let tag: Value = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let body: Value = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;

                let (kind, unknown) = match &tag {
                    Value::String(name) => (
                        OperationKind::from_name(name),
                        UnknownOperation {
                            name: Some(name.clone()),
                            ..Default::default()
                        },
                    ),
                    Value::Number(n) => {
                        let id = n
                            .as_u64()
                            .ok_or_else(|| de::Error::custom(format!("operation tag {n}")))?;
                        (
                            OperationKind::from_id(id),
                            UnknownOperation {
                                id: Some(id),
                                ..Default::default()
                            },
                        )
                    }
                    other => {
                        return Err(de::Error::custom(format!(
                            "operation tag must be a name or number, got {other}"
                        )))
                    }
                };

                if let Some(kind) = kind {
                    let parsed = Operation::from_json_payload(kind, body.clone())
                        .map_err(|e| de::Error::custom(format!("{kind}: {e}")))?;
                    if let Some(op) = parsed {
                        return Ok(op);
                    }
                }
                debug!(%tag, "decoded unknown operation name");
                Ok(Operation::Unknown(UnknownOperation { body, ..unknown }))
            }
        }

        deserializer.deserialize_seq(PairVisitor)
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Operation {
                fn from(op: $variant) -> Self {
                    Operation::$variant(op)
                }
            }
        )*
    };
}

impl_from_payload!(
    Vote, Content, Transfer, TransferToVesting, WithdrawVesting, AccountUpdate, WitnessUpdate,
    AccountWitnessVote, AccountWitnessProxy, DeleteContent, Custom, SetWithdrawVestingRoute,
    RequestAccountRecovery, RecoverAccount, ChangeRecoveryAccount, EscrowTransfer,
    EscrowDispute, EscrowRelease, EscrowApprove, DelegateVestingShares, AccountCreate,
    AccountMetadata, ProposalCreate, ProposalUpdate, ProposalDelete, AuthorReward,
    CurationReward, ContentReward, FillVestingWithdraw, ShutdownWitness, Hardfork,
    ContentPayoutUpdate, ContentBenefactorReward, ReturnVestingDelegation,
    CommitteeWorkerCreateRequest, CommitteeWorkerCancelRequest, CommitteeVoteRequest,
    CommitteeCancelRequest, CommitteeApproveRequest, CommitteePayoutRequest,
    CommitteePayRequest, WitnessReward, CreateInvite, ClaimInviteBalance, InviteRegistration,
    Award, ReceiveAward, BenefactorAward, SetPaidSubscription, PaidSubscribe,
    PaidSubscriptionAction, CancelPaidSubscription, SetAccountPrice, SetSubaccountPrice,
    BuyAccount, AccountSale, UseInviteBalance, ExpireEscrowRatification, FixedAward,
    TargetAccountSale,
);

impl From<UnknownOperation> for Operation {
    fn from(op: UnknownOperation) -> Self {
        Operation::Unknown(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::Beneficiary;
    use proptest::prelude::*;
    use viz_protocol_core::{from_wire_bytes, to_wire_bytes, Asset, Timestamp};

    fn transfer() -> Operation {
        Operation::Transfer(Transfer {
            from: "alice".into(),
            to: "bob".into(),
            amount: Asset::viz(1000),
            memo: String::new(),
        })
    }

    #[test]
    fn test_transfer_wire_layout() {
        let bytes = to_wire_bytes(&transfer()).unwrap();
        let mut expected = vec![2, 5, b'a', b'l', b'i', b'c', b'e', 3, b'b', b'o', b'b'];
        expected.extend_from_slice(&1000i64.to_le_bytes());
        expected.extend_from_slice(&[3, b'V', b'I', b'Z', 0, 0, 0, 0]);
        expected.push(0);
        assert_eq!(bytes, expected);
        assert_eq!(from_wire_bytes::<Operation>(&bytes).unwrap(), transfer());
    }

    #[test]
    fn test_transfer_json_form() {
        let json = serde_json::to_string(&transfer()).unwrap();
        assert_eq!(
            json,
            r#"["transfer",{"from":"alice","to":"bob","amount":"1.000 VIZ","memo":""}]"#
        );
        assert_eq!(serde_json::from_str::<Operation>(&json).unwrap(), transfer());
    }

    #[test]
    fn test_json_accepts_suffix_and_numeric_tag() {
        let body = r#"{"from":"alice","to":"bob","amount":"1.000 VIZ","memo":""}"#;
        let suffixed = format!(r#"["transfer_operation",{body}]"#);
        let numeric = format!(r#"[2,{body}]"#);
        assert_eq!(serde_json::from_str::<Operation>(&suffixed).unwrap(), transfer());
        assert_eq!(serde_json::from_str::<Operation>(&numeric).unwrap(), transfer());
    }

    #[test]
    fn test_unknown_tag_decodes_to_sentinel() {
        let bytes = [99u8, 1, 2, 3];
        let op = from_wire_bytes::<Operation>(&bytes).unwrap();
        assert_eq!(
            op,
            Operation::Unknown(UnknownOperation {
                id: Some(99),
                name: None,
                raw: vec![1, 2, 3],
                body: Value::Null,
            })
        );
        assert!(op.kind().is_none());
        assert!(!op.is_virtual());
        assert!(matches!(
            to_wire_bytes(&op),
            Err(WireError::UnsupportedType(msg)) if msg == "unserializable operation"
        ));
    }

    #[test]
    fn test_reserved_tag_is_unknown() {
        let op = from_wire_bytes::<Operation>(&[25, 0xaa]).unwrap();
        match op {
            Operation::Unknown(unknown) => {
                assert_eq!(unknown.id, Some(25));
                assert_eq!(unknown.name.as_deref(), Some("chain_properties_update"));
                assert_eq!(unknown.raw, vec![0xaa]);
            }
            other => panic!("expected unknown, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_json_name_is_preserved() {
        let json = r#"["comment",{"author":"alice"}]"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert!(op.is_unknown());
        assert_eq!(op.name(), "comment");
        assert_eq!(serde_json::to_string(&op).unwrap(), json);
    }

    #[test]
    fn test_known_name_with_bad_payload_fails() {
        let json = r#"["transfer",{"from":"alice"}]"#;
        assert!(serde_json::from_str::<Operation>(json).is_err());
    }

    #[test]
    fn test_virtual_flag() {
        let reward = Operation::from(AuthorReward {
            author: "alice".into(),
            permlink: "post".into(),
            token_payout: Asset::viz(1),
            vesting_payout: Asset::vests(2),
        });
        assert!(reward.is_virtual());
        assert!(!transfer().is_virtual());

        // Virtual operations still have a binary form on their own.
        let bytes = to_wire_bytes(&reward).unwrap();
        assert_eq!(bytes[0], 26);
        assert_eq!(from_wire_bytes::<Operation>(&bytes).unwrap(), reward);
    }

    #[test]
    fn test_award_sequence_large_values_as_string() {
        let award = Operation::from(Award {
            initiator: "alice".into(),
            receiver: "bob".into(),
            energy: 100,
            custom_sequence: 1 << 40,
            memo: "thanks".into(),
            beneficiaries: vec![Beneficiary {
                account: "carol".into(),
                weight: 1000,
            }],
        });
        let json = serde_json::to_value(&award).unwrap();
        assert_eq!(json[0], "award");
        assert_eq!(json[1]["custom_sequence"], "1099511627776");
        assert_eq!(serde_json::from_value::<Operation>(json).unwrap(), award);
    }

    #[test]
    fn test_proposal_nests_operations() {
        let proposal = Operation::from(ProposalCreate {
            author: "alice".into(),
            title: "pay-bob".into(),
            memo: String::new(),
            expiration_time: Timestamp::from_secs(1_600_000_000),
            proposed_operations: vec![transfer().into()],
            review_period_time: None,
            extensions: Vec::new(),
        });

        let bytes = to_wire_bytes(&proposal).unwrap();
        assert_eq!(from_wire_bytes::<Operation>(&bytes).unwrap(), proposal);

        let json = serde_json::to_value(&proposal).unwrap();
        assert_eq!(json[1]["proposed_operations"][0]["op"][0], "transfer");
        assert_eq!(serde_json::from_value::<Operation>(json).unwrap(), proposal);
    }

    proptest! {
        #[test]
        fn test_unassigned_tags_decode_to_unknown(
            tag in prop_oneof![Just(25u64), Just(46u64), 62u64..],
            raw in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut enc = WireEncoder::new();
            enc.put_varint(tag);
            let mut bytes = enc.into_bytes();
            bytes.extend_from_slice(&raw);

            let op = from_wire_bytes::<Operation>(&bytes).unwrap();
            match &op {
                Operation::Unknown(unknown) => {
                    prop_assert_eq!(unknown.id, Some(tag));
                    prop_assert_eq!(&unknown.raw, &raw);
                }
                other => prop_assert!(false, "expected unknown, got {:?}", other),
            }
            prop_assert!(matches!(to_wire_bytes(&op), Err(WireError::UnsupportedType(_))));
        }
    }
}
