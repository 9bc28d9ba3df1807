//! Operation payloads, grouped by the chain feature they belong to.
//!
//! Every payload is a plain struct whose fields are written to the wire in
//! declaration order. The field order is consensus-critical: reordering two
//! fields changes the transaction digest.

/// Declare a payload struct with serde and wire impls that follow the field
/// order.
macro_rules! wire_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl ::viz_protocol_core::WireEncode for $name {
            fn encode(
                &self,
                enc: &mut ::viz_protocol_core::WireEncoder,
            ) -> ::std::result::Result<(), ::viz_protocol_core::WireError> {
                $( enc.put(&self.$field)?; )*
                Ok(())
            }
        }

        impl ::viz_protocol_core::WireDecode for $name {
            fn decode(
                dec: &mut ::viz_protocol_core::WireDecoder<'_>,
            ) -> ::std::result::Result<Self, ::viz_protocol_core::WireError> {
                Ok(Self {
                    $( $field: dec.get()?, )*
                })
            }
        }
    };
}

pub(crate) use wire_struct;

pub mod account;
pub mod award;
pub mod committee;
pub mod content;
pub mod escrow;
pub mod invite;
pub mod ledger;
pub mod market;
pub mod proposal;
pub mod subscription;
pub mod transfer;
pub mod witness;

pub use account::*;
pub use award::*;
pub use committee::*;
pub use content::*;
pub use escrow::*;
pub use invite::*;
pub use ledger::*;
pub use market::*;
pub use proposal::*;
pub use subscription::*;
pub use transfer::*;
pub use witness::*;
