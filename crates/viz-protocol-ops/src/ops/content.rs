//! Posting, voting and free-form custom data.

use crate::authority::ContentExtension;

wire_struct! {
    /// Vote on a piece of content. Weight is in basis points, negative to flag.
    pub struct Vote {
        pub voter: String,
        pub author: String,
        pub permlink: String,
        pub weight: i16,
    }
}

wire_struct! {
    /// Create or edit a post or comment.
    ///
    /// A top-level post has an empty `parent_author` and uses
    /// `parent_permlink` as its category.
    pub struct Content {
        pub parent_author: String,
        pub parent_permlink: String,
        pub author: String,
        pub permlink: String,
        pub title: String,
        pub body: String,
        pub curation_percent: i16,
        pub json_metadata: String,
        pub extensions: Vec<ContentExtension>,
    }
}

wire_struct! {
    pub struct DeleteContent {
        pub author: String,
        pub permlink: String,
    }
}

wire_struct! {
    /// Application-defined JSON, authorized by the listed accounts.
    pub struct Custom {
        pub required_active_auths: Vec<String>,
        pub required_regular_auths: Vec<String>,
        pub id: String,
        pub json: String,
    }
}

impl Content {
    /// True when this is a top-level post rather than a reply.
    pub fn is_root(&self) -> bool {
        self.parent_author.is_empty()
    }
}

impl Custom {
    /// Custom data signed by a single account's regular authority.
    pub fn regular(
        account: impl Into<String>,
        id: impl Into<String>,
        json: impl Into<String>,
    ) -> Self {
        Self {
            required_active_auths: Vec::new(),
            required_regular_auths: vec![account.into()],
            id: id.into(),
            json: json.into(),
        }
    }
}
