//! Paid subscriptions.

use viz_protocol_core::Asset;

wire_struct! {
    /// Offer subscriptions: `levels` tiers at `amount` per level every `period` days.
    pub struct SetPaidSubscription {
        pub account: String,
        pub url: String,
        pub levels: u16,
        pub amount: Asset,
        pub period: u16,
    }
}

wire_struct! {
    pub struct PaidSubscribe {
        pub subscriber: String,
        pub account: String,
        pub level: u16,
        pub amount: Asset,
        pub period: u16,
        pub auto_renewal: bool,
    }
}
