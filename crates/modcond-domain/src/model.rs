//! Subject documents handed over by the host.
//!
//! These mirror what the host already has in hand when it asks for a verdict.
//! They are raw inputs; [`crate::facts`] derives the values leaves read.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Opaque role identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reference to another note. Only presence matters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    #[serde(default)]
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
    #[serde(default)]
    pub md5: String,
    #[serde(default)]
    pub blurhash: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub host: Option<String>,
}

/// A note about to be created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSubject {
    pub user_id: String,
    /// `None` when the note carries no text after host normalization.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub reply: Option<NoteRef>,
    #[serde(default)]
    pub renote: Option<NoteRef>,
    /// `None` when the note has no attachment list at all.
    #[serde(default)]
    pub files: Option<Vec<DriveFile>>,
    #[serde(default)]
    pub mentions: Vec<Mention>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Federation state of a remote user's instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceFacts {
    #[serde(default)]
    pub suspended: bool,
    /// Local users following accounts on this instance.
    #[serde(default)]
    pub following_count: u64,
    /// Accounts on this instance following local users.
    #[serde(default)]
    pub followers_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(default)]
    pub blurhash: Option<String>,
}

/// A user account considered for a conditional role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubject {
    pub id: String,
    pub username: String,
    /// `None` for local accounts.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_active_at: Option<OffsetDateTime>,

    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub notes_count: u64,

    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_cat: bool,
    #[serde(default)]
    pub is_explorable: bool,
    #[serde(default)]
    pub two_factor_enabled: bool,
    #[serde(default)]
    pub security_keys_available: bool,
    #[serde(default)]
    pub using_passwordless_login: bool,
    #[serde(default)]
    pub no_crawle: bool,
    #[serde(default)]
    pub prevent_ai_learning: bool,

    #[serde(default)]
    pub instance: Option<InstanceFacts>,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
    #[serde(default)]
    pub banner: Option<ImageRef>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UserSubject {
    pub fn is_local(&self) -> bool {
        self.host.is_none()
    }
}
