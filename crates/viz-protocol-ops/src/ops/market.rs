//! Selling accounts and subaccount names.

use viz_protocol_core::{Asset, PublicKey};

wire_struct! {
    pub struct SetAccountPrice {
        pub account: String,
        pub account_seller: String,
        pub account_offer_price: Asset,
        pub account_on_sale: bool,
    }
}

wire_struct! {
    /// Offer subaccounts (`name.account`) for sale.
    pub struct SetSubaccountPrice {
        pub account: String,
        pub subaccount_seller: String,
        pub subaccount_offer_price: Asset,
        pub subaccount_on_sale: bool,
    }
}

wire_struct! {
    /// Buy an account on sale; all of its authorities become `account_authorities_key`.
    pub struct BuyAccount {
        pub buyer: String,
        pub account: String,
        pub account_offer_price: Asset,
        pub account_authorities_key: PublicKey,
        pub tokens_to_shares: Asset,
    }
}

wire_struct! {
    /// Offer an account to one specific buyer.
    pub struct TargetAccountSale {
        pub account: String,
        pub account_seller: String,
        pub target_buyer: String,
        pub account_offer_price: Asset,
        pub account_on_sale: bool,
    }
}
