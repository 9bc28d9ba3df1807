//! Proposed transactions that collect approvals before they execute.

use viz_protocol_core::{PublicKey, Timestamp};

use crate::authority::Extensions;
use crate::operation::Operation;

wire_struct! {
    /// One operation inside a proposal. JSON form is `{"op": [name, payload]}`.
    pub struct OperationWrapper {
        pub op: Operation,
    }
}

wire_struct! {
    pub struct ProposalCreate {
        pub author: String,
        pub title: String,
        pub memo: String,
        pub expiration_time: Timestamp,
        pub proposed_operations: Vec<OperationWrapper>,
        pub review_period_time: Option<Timestamp>,
        pub extensions: Extensions,
    }
}

wire_struct! {
    /// Add or withdraw approvals on an existing proposal.
    pub struct ProposalUpdate {
        pub author: String,
        pub title: String,
        pub active_approvals_to_add: Vec<String>,
        pub active_approvals_to_remove: Vec<String>,
        pub master_approvals_to_add: Vec<String>,
        pub master_approvals_to_remove: Vec<String>,
        pub regular_approvals_to_add: Vec<String>,
        pub regular_approvals_to_remove: Vec<String>,
        pub key_approvals_to_add: Vec<PublicKey>,
        pub key_approvals_to_remove: Vec<PublicKey>,
        pub extensions: Extensions,
    }
}

wire_struct! {
    pub struct ProposalDelete {
        pub author: String,
        pub title: String,
        pub requester: String,
        pub extensions: Extensions,
    }
}

impl From<Operation> for OperationWrapper {
    fn from(op: Operation) -> Self {
        Self { op }
    }
}
