//! Prepaid invite codes.

use viz_protocol_core::{Asset, PublicKey};

wire_struct! {
    /// Lock `balance` behind a key whose private half becomes the invite secret.
    pub struct CreateInvite {
        pub creator: String,
        pub balance: Asset,
        pub invite_key: PublicKey,
    }
}

wire_struct! {
    pub struct ClaimInviteBalance {
        pub initiator: String,
        pub receiver: String,
        pub invite_secret: String,
    }
}

wire_struct! {
    /// Create a new account funded by an invite.
    pub struct InviteRegistration {
        pub initiator: String,
        pub new_account_name: String,
        pub invite_secret: String,
        pub new_account_key: PublicKey,
    }
}

wire_struct! {
    /// Claim an invite balance straight into vesting shares.
    pub struct UseInviteBalance {
        pub initiator: String,
        pub receiver: String,
        pub invite_secret: String,
    }
}
