//! RBAC transaction-family records: the dispatch envelope and the
//! create-user intent it carries.

/// Discriminant telling the RBAC transaction processor how to decode
/// [`RbacPayload::content`].
///
/// Only the messages this crate assembles are listed; the processor
/// defines further values for role and task administration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MessageType {
    CreateUser = 0,
}

/// The envelope stored as a transaction payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RbacPayload {
    #[prost(enumeration = "MessageType", tag = "1")]
    pub message_type: i32,
    /// Serialized message selected by `message_type`.
    #[prost(bytes = "vec", tag = "2")]
    pub content: Vec<u8>,
}

/// Intent to create a user record.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUser {
    /// The user's public key; also keys the user's state address.
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    /// Client-supplied, opaque to the ledger.
    #[prost(string, tag = "3")]
    pub metadata: String,
    /// The user's single manager, if any.
    #[prost(string, optional, tag = "4")]
    pub manager_id: Option<String>,
}
