//! Payload and envelope encoding for create-user transactions.
//!
//! Two layers, both pure:
//!
//! 1. The **payload encoder** turns a [`NewUser`] into a serialized
//!    [`CreateUser`] record.
//! 2. The **envelope encoder** wraps those bytes in an [`RbacPayload`]
//!    with the message-type discriminant. The envelope bytes are what get
//!    hashed into the header and stored as the transaction payload.

use prost::Message;

use super::error::{encode_record, TransactionError};
use crate::messages::{CreateUser, MessageType, RbacPayload};

// ---------------------------------------------------------------------------
// NewUser
// ---------------------------------------------------------------------------

/// The caller's intent to create a user.
///
/// `manager_ids` is an ordered list. Only the first entry is recorded as the
/// user's manager: the RBAC data model links a user to a single manager.
/// Every entry still contributes a state address to the header (see
/// [`super::user::CreateUserPipeline::state_addresses`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Display name of the user.
    pub name: String,
    /// The user's public key.
    pub user_id: String,
    /// Client-supplied metadata, passed through untouched.
    pub metadata: String,
    /// Managers in order of preference.
    pub manager_ids: Vec<String>,
}

impl NewUser {
    /// Creates an intent with no managers.
    pub fn new(name: impl Into<String>, user_id: impl Into<String>, metadata: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id: user_id.into(),
            metadata: metadata.into(),
            manager_ids: Vec::new(),
        }
    }

    /// Appends a manager id.
    pub fn manager(mut self, manager_id: impl Into<String>) -> Self {
        self.manager_ids.push(manager_id.into());
        self
    }

    /// Appends several manager ids, keeping their order.
    pub fn managers<I, S>(mut self, manager_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manager_ids.extend(manager_ids.into_iter().map(Into::into));
        self
    }

    /// The manager recorded in the payload: the first one, if any.
    pub fn primary_manager(&self) -> Option<&str> {
        self.manager_ids.first().map(String::as_str)
    }

    /// Builds the [`CreateUser`] record for this intent.
    pub fn to_message(&self) -> CreateUser {
        CreateUser {
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            metadata: self.metadata.clone(),
            manager_id: self.primary_manager().map(str::to_string),
        }
    }
}

/// Serializes the create-user record for `user`.
pub fn encode_create_user(user: &NewUser) -> Result<Vec<u8>, TransactionError> {
    encode_record("create-user payload", &user.to_message())
}

/// Decodes a create-user record out of an envelope's bytes.
///
/// Returns `None` when the envelope carries some other message type.
pub fn decode_create_user(envelope: &[u8]) -> Result<Option<CreateUser>, prost::DecodeError> {
    let payload = RbacPayload::decode(envelope)?;
    match MessageType::try_from(payload.message_type) {
        Ok(MessageType::CreateUser) => CreateUser::decode(payload.content.as_slice()).map(Some),
        Err(_) => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// EnvelopeEncoder
// ---------------------------------------------------------------------------

/// Wraps a family message in the family's dispatch envelope.
pub trait EnvelopeEncoder {
    /// Produces the envelope bytes for `content` tagged with `message_type`.
    fn encode_envelope(&self, message_type: MessageType, content: Vec<u8>) -> Result<Vec<u8>, TransactionError>;
}

impl<T: EnvelopeEncoder + ?Sized> EnvelopeEncoder for &T {
    fn encode_envelope(&self, message_type: MessageType, content: Vec<u8>) -> Result<Vec<u8>, TransactionError> {
        (**self).encode_envelope(message_type, content)
    }
}

/// The RBAC family's envelope: an [`RbacPayload`] record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnvelopeEncoder;

impl EnvelopeEncoder for RbacEnvelopeEncoder {
    fn encode_envelope(&self, message_type: MessageType, content: Vec<u8>) -> Result<Vec<u8>, TransactionError> {
        let envelope = RbacPayload {
            message_type: message_type as i32,
            content,
        };
        encode_record("rbac envelope", &envelope)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
