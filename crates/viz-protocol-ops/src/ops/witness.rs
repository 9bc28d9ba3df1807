//! Block producer registration and voting.

use viz_protocol_core::PublicKey;

wire_struct! {
    /// Register or update a witness. A null signing key disables production.
    pub struct WitnessUpdate {
        pub owner: String,
        pub url: String,
        pub block_signing_key: PublicKey,
    }
}

wire_struct! {
    pub struct AccountWitnessVote {
        pub account: String,
        pub witness: String,
        pub approve: bool,
    }
}

wire_struct! {
    /// Delegate witness voting to another account. An empty proxy clears it.
    pub struct AccountWitnessProxy {
        pub account: String,
        pub proxy: String,
    }
}
