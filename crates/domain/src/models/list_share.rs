//! List share domain models.
//!
//! A share grants a non-owner user one of three permission levels on a list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Permission level carried by a share.
///
/// Levels are strictly ordered: `Viewer < Editor < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionLevel {
    /// May read the list and its items.
    Viewer,
    /// May add, edit and purchase items.
    Editor,
    /// May manage the list itself, its shares and invitations.
    Admin,
}

impl PermissionLevel {
    /// Stable string form, also used as the database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Editor => "EDITOR",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VIEWER" => Ok(Self::Viewer),
            "EDITOR" => Ok(Self::Editor),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("Unknown permission level: {}", other)),
        }
    }
}

/// List share domain model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListShare {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub shared_user_id: Uuid,
    pub permission_level: PermissionLevel,
    pub shared_at: DateTime<Utc>,
}

/// Request to share a list with a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateListShareRequest {
    pub user_id: Uuid,
    pub permission_level: PermissionLevel,
}

/// Request to change a share's permission level.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateListShareRequest {
    pub permission_level: PermissionLevel,
}

/// List share representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListShareResponse {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub shared_user_id: Uuid,
    pub permission_level: PermissionLevel,
    pub shared_at: DateTime<Utc>,
}

impl From<ListShare> for ListShareResponse {
    fn from(share: ListShare) -> Self {
        Self {
            id: share.id,
            shopping_list_id: share.shopping_list_id,
            shared_user_id: share.shared_user_id,
            permission_level: share.permission_level,
            shared_at: share.shared_at,
        }
    }
}
