//! Typed node responses.
//!
//! Only the fields a client commonly needs are modelled. Nodes add fields
//! between releases; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use viz_protocol_core::serde_helpers::{flex_i64, flex_u64};
use viz_protocol_core::{Asset, BlockId, PublicKey, Signature, Timestamp, TransactionId};
use viz_protocol_ops::{Authority, Operation, SignedTransaction};

/// Chain state as of the head block. Used to pick a reference block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    pub head_block_number: u32,
    pub head_block_id: BlockId,
    pub time: Timestamp,
    #[serde(default)]
    pub genesis_time: Option<Timestamp>,
    pub current_witness: String,
    pub last_irreversible_block_num: u32,
    #[serde(default)]
    pub committee_fund: Option<Asset>,
    #[serde(default)]
    pub current_supply: Option<Asset>,
    #[serde(default)]
    pub total_vesting_fund: Option<Asset>,
    #[serde(default)]
    pub total_vesting_shares: Option<Asset>,
    #[serde(default)]
    pub total_reward_fund: Option<Asset>,
    #[serde(default)]
    pub maximum_block_size: u32,
    #[serde(default)]
    pub average_block_size: u32,
    #[serde(default, with = "flex_u64")]
    pub current_aslot: u64,
    #[serde(default)]
    pub participation_count: u32,
    #[serde(default)]
    pub inflation_witness_percent: u16,
    #[serde(default)]
    pub inflation_ratio: u16,
}

/// Parameters voted on by witnesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainProperties {
    pub account_creation_fee: Asset,
    pub maximum_block_size: u32,
    pub create_account_delegation_ratio: u32,
    pub create_account_delegation_time: u32,
    pub min_delegation: Asset,
    pub min_curation_percent: i16,
    pub max_curation_percent: i16,
    pub bandwidth_reserve_percent: i16,
    pub bandwidth_reserve_below: Asset,
    pub flag_energy_additional_cost: i16,
    pub vote_accounting_min_rshares: u32,
    pub committee_request_approve_min_percent: i16,
    #[serde(default)]
    pub inflation_witness_percent: i16,
    #[serde(default)]
    pub inflation_ratio_committee_vs_reward_fund: i16,
    #[serde(default)]
    pub inflation_recalc_period: u32,
    #[serde(default)]
    pub data_operations_cost_additional_bandwidth: u32,
    #[serde(default)]
    pub witness_miss_penalty_percent: i16,
    #[serde(default)]
    pub witness_miss_penalty_duration: u32,
    #[serde(default)]
    pub create_invite_min_balance: Option<Asset>,
    #[serde(default)]
    pub committee_create_request_fee: Option<Asset>,
    #[serde(default)]
    pub create_paid_subscription_fee: Option<Asset>,
    #[serde(default)]
    pub account_on_sale_fee: Option<Asset>,
    #[serde(default)]
    pub subaccount_on_sale_fee: Option<Asset>,
    #[serde(default)]
    pub witness_declaration_fee: Option<Asset>,
    #[serde(default)]
    pub withdraw_intervals: u16,
}

/// An account as returned by `get_accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u32,
    pub name: String,
    pub master_authority: Authority,
    pub active_authority: Authority,
    pub regular_authority: Authority,
    pub memo_key: PublicKey,
    #[serde(default)]
    pub json_metadata: String,
    #[serde(default)]
    pub proxy: String,
    #[serde(default)]
    pub referrer: String,
    pub created: Timestamp,
    #[serde(default)]
    pub recovery_account: String,
    #[serde(default)]
    pub energy: i16,
    #[serde(default)]
    pub last_vote_time: Option<Timestamp>,
    pub balance: Asset,
    pub vesting_shares: Asset,
    #[serde(default)]
    pub delegated_vesting_shares: Option<Asset>,
    #[serde(default)]
    pub received_vesting_shares: Option<Asset>,
    #[serde(default)]
    pub vesting_withdraw_rate: Option<Asset>,
    #[serde(default)]
    pub next_vesting_withdrawal: Option<Timestamp>,
    #[serde(default, with = "flex_u64")]
    pub custom_sequence: u64,
    #[serde(default)]
    pub witnesses_voted_for: u16,
}

impl Account {
    /// Every key of every authority, plus the memo key.
    pub fn keys(&self) -> impl Iterator<Item = &PublicKey> {
        self.master_authority
            .keys()
            .chain(self.active_authority.keys())
            .chain(self.regular_authority.keys())
            .chain(std::iter::once(&self.memo_key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub previous: BlockId,
    pub timestamp: Timestamp,
    pub witness: String,
    pub transaction_merkle_root: String,
    #[serde(default)]
    pub extensions: Vec<serde_json::Value>,
}

impl BlockHeader {
    /// Height of this block, derived from the previous block id.
    pub fn block_num(&self) -> u32 {
        self.previous.block_num().wrapping_add(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedBlock {
    #[serde(flatten)]
    pub header: BlockHeader,
    pub witness_signature: Signature,
    #[serde(default)]
    pub transactions: Vec<SignedTransaction>,
    #[serde(default)]
    pub block_id: Option<BlockId>,
    #[serde(default)]
    pub signing_key: Option<PublicKey>,
    #[serde(default)]
    pub transaction_ids: Vec<TransactionId>,
}

/// An operation as recorded in history, with its position in the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedOperation {
    pub trx_id: TransactionId,
    pub block: u32,
    pub trx_in_block: u32,
    pub op_in_trx: u32,
    #[serde(with = "flex_u64")]
    pub virtual_op: u64,
    pub timestamp: Timestamp,
    pub op: Operation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    pub id: u32,
    pub owner: String,
    pub created: Timestamp,
    pub url: String,
    #[serde(with = "flex_i64")]
    pub votes: i64,
    #[serde(default)]
    pub total_missed: u32,
    #[serde(default, with = "flex_u64")]
    pub last_aslot: u64,
    #[serde(default, with = "flex_u64")]
    pub last_confirmed_block_num: u64,
    pub signing_key: PublicKey,
    #[serde(default)]
    pub props: Option<ChainProperties>,
    #[serde(default)]
    pub running_version: String,
    #[serde(default)]
    pub hardfork_version_vote: String,
    #[serde(default)]
    pub hardfork_time_vote: Option<Timestamp>,
}

impl Witness {
    /// A witness with a null signing key does not produce blocks.
    pub fn is_active(&self) -> bool {
        !self.signing_key.is_null()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub id: u32,
    pub creator: String,
    #[serde(default)]
    pub receiver: String,
    pub invite_key: PublicKey,
    #[serde(default)]
    pub invite_secret: String,
    pub balance: Asset,
    pub claimed_balance: Asset,
    pub create_time: Timestamp,
    #[serde(default)]
    pub claim_time: Option<Timestamp>,
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeVote {
    pub voter: String,
    pub vote_percent: i16,
    pub last_update: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeRequest {
    pub id: u32,
    pub request_id: u32,
    pub url: String,
    pub creator: String,
    pub worker: String,
    pub required_amount_min: Asset,
    pub required_amount_max: Asset,
    pub start_time: Timestamp,
    pub duration: u32,
    pub end_time: Timestamp,
    pub status: u16,
    #[serde(default)]
    pub votes_count: u32,
    #[serde(default)]
    pub conclusion_time: Option<Timestamp>,
    #[serde(default)]
    pub conclusion_payout_amount: Option<Asset>,
    #[serde(default)]
    pub payout_amount: Option<Asset>,
    #[serde(default)]
    pub remain_payout_amount: Option<Asset>,
    #[serde(default)]
    pub votes: Vec<CommitteeVote>,
}

/// Acknowledgment of `broadcast_transaction_synchronous`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastConfirmation {
    pub id: TransactionId,
    pub block_num: u32,
    pub trx_num: u32,
    pub expired: bool,
}
