//! Worker requests funded by the committee fund.

use viz_protocol_core::Asset;

wire_struct! {
    /// Ask the committee to fund `worker` for `duration` seconds.
    pub struct CommitteeWorkerCreateRequest {
        pub creator: String,
        pub url: String,
        pub worker: String,
        pub required_amount_min: Asset,
        pub required_amount_max: Asset,
        pub duration: u32,
    }
}

wire_struct! {
    pub struct CommitteeWorkerCancelRequest {
        pub creator: String,
        pub request_id: u32,
    }
}

wire_struct! {
    /// Vote on a request; `vote_percent` is in basis points, -10000..=10000.
    pub struct CommitteeVoteRequest {
        pub voter: String,
        pub request_id: u32,
        pub vote_percent: i16,
    }
}
