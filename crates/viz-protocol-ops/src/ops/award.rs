//! Rewards paid from the reward fund by spending energy.

use viz_protocol_core::serde_helpers::flex_u64;
use viz_protocol_core::Asset;

use crate::authority::Beneficiary;

wire_struct! {
    /// Spend `energy` (basis points of the initiator's energy) on an award.
    pub struct Award {
        pub initiator: String,
        pub receiver: String,
        pub energy: u16,
        #[serde(with = "flex_u64")]
        pub custom_sequence: u64,
        pub memo: String,
        pub beneficiaries: Vec<Beneficiary>,
    }
}

wire_struct! {
    /// Award a fixed amount, spending at most `max_energy`.
    pub struct FixedAward {
        pub initiator: String,
        pub receiver: String,
        pub reward_amount: Asset,
        pub max_energy: u16,
        #[serde(with = "flex_u64")]
        pub custom_sequence: u64,
        pub memo: String,
        pub beneficiaries: Vec<Beneficiary>,
    }
}
