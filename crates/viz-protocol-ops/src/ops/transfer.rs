//! Moving tokens between balances and vesting.

use viz_protocol_core::Asset;

wire_struct! {
    /// Move liquid tokens from one account to another.
    pub struct Transfer {
        pub from: String,
        pub to: String,
        pub amount: Asset,
        pub memo: String,
    }
}

wire_struct! {
    /// Convert liquid tokens into vesting shares, optionally for another account.
    pub struct TransferToVesting {
        pub from: String,
        pub to: String,
        pub amount: Asset,
    }
}

wire_struct! {
    /// Start (or with zero shares, stop) a vesting withdrawal.
    pub struct WithdrawVesting {
        pub account: String,
        pub vesting_shares: Asset,
    }
}

wire_struct! {
    pub struct SetWithdrawVestingRoute {
        pub from_account: String,
        pub to_account: String,
        pub percent: u16,
        pub auto_vest: bool,
    }
}

wire_struct! {
    pub struct DelegateVestingShares {
        pub delegator: String,
        pub delegatee: String,
        pub vesting_shares: Asset,
    }
}
