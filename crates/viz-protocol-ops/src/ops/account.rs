//! Account creation, keys, metadata and recovery.

use viz_protocol_core::{Asset, PublicKey};

use crate::authority::{Authority, Extensions};

wire_struct! {
    /// Register a new account, paid for by `creator`.
    pub struct AccountCreate {
        pub fee: Asset,
        pub delegation: Asset,
        pub creator: String,
        pub new_account_name: String,
        pub master: Authority,
        pub active: Authority,
        pub regular: Authority,
        pub memo_key: PublicKey,
        pub json_metadata: String,
        pub referrer: String,
        pub extensions: Extensions,
    }
}

wire_struct! {
    /// Replace some of an account's authorities. Absent authorities are kept.
    pub struct AccountUpdate {
        pub account: String,
        pub master: Option<Authority>,
        pub active: Option<Authority>,
        pub regular: Option<Authority>,
        pub memo_key: PublicKey,
        pub json_metadata: String,
    }
}

wire_struct! {
    pub struct AccountMetadata {
        pub account: String,
        pub json_metadata: String,
    }
}

wire_struct! {
    /// Sent by the recovery account to open a recovery window.
    pub struct RequestAccountRecovery {
        pub recovery_account: String,
        pub account_to_recover: String,
        pub new_master_authority: Authority,
        pub extensions: Extensions,
    }
}

wire_struct! {
    /// Completes recovery; must be signed by both the new and a recent master authority.
    pub struct RecoverAccount {
        pub account_to_recover: String,
        pub new_master_authority: Authority,
        pub recent_master_authority: Authority,
        pub extensions: Extensions,
    }
}

wire_struct! {
    pub struct ChangeRecoveryAccount {
        pub account_to_recover: String,
        pub new_recovery_account: String,
        pub extensions: Extensions,
    }
}
