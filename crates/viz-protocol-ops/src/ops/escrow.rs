//! Three-party escrow.

use viz_protocol_core::{Asset, Timestamp};

wire_struct! {
    /// Lock tokens with an agent until released, disputed or expired.
    pub struct EscrowTransfer {
        pub from: String,
        pub to: String,
        pub token_amount: Asset,
        pub escrow_id: u32,
        pub agent: String,
        pub fee: Asset,
        pub json_metadata: String,
        pub ratification_deadline: Timestamp,
        pub escrow_expiration: Timestamp,
    }
}

wire_struct! {
    pub struct EscrowDispute {
        pub from: String,
        pub to: String,
        pub agent: String,
        pub who: String,
        pub escrow_id: u32,
    }
}

wire_struct! {
    pub struct EscrowRelease {
        pub from: String,
        pub to: String,
        pub agent: String,
        pub who: String,
        pub receiver: String,
        pub escrow_id: u32,
        pub token_amount: Asset,
    }
}

wire_struct! {
    pub struct EscrowApprove {
        pub from: String,
        pub to: String,
        pub agent: String,
        pub who: String,
        pub escrow_id: u32,
        pub approve: bool,
    }
}
