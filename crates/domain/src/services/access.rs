//! List access resolution.
//!
//! Every permission decision in the service goes through this single
//! resolver: given a list's owner and the caller's share row (if any), it
//! computes the caller's effective access level. Ownership dominates any
//! share row, including a conflicting one.
//!
//! Levels are recomputed on every call; there is no cache.

use uuid::Uuid;

use crate::models::list_share::PermissionLevel;

/// Effective access a user has on a shopping list.
///
/// `None < Viewer < Editor < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    None,
    Viewer,
    Editor,
    Admin,
}

impl AccessLevel {
    /// May read the list and its items.
    pub fn can_view(&self) -> bool {
        *self >= AccessLevel::Viewer
    }

    /// May add, edit and purchase items.
    pub fn can_edit(&self) -> bool {
        *self >= AccessLevel::Editor
    }

    /// May manage the list itself, its shares and invitations.
    pub fn can_admin(&self) -> bool {
        *self == AccessLevel::Admin
    }
}

impl From<PermissionLevel> for AccessLevel {
    fn from(level: PermissionLevel) -> Self {
        match level {
            PermissionLevel::Viewer => AccessLevel::Viewer,
            PermissionLevel::Editor => AccessLevel::Editor,
            PermissionLevel::Admin => AccessLevel::Admin,
        }
    }
}

/// Computes the effective access level of `user_id` on a list.
///
/// The owner is Admin unconditionally - an explicit share row for the owner
/// (such as the bootstrap share created with the list) never lowers that.
/// Non-owners get their share's level, or `None` without a share.
pub fn effective_level(
    owner_id: Uuid,
    share_level: Option<PermissionLevel>,
    user_id: Uuid,
) -> AccessLevel {
    if owner_id == user_id {
        return AccessLevel::Admin;
    }

    share_level.map(AccessLevel::from).unwrap_or(AccessLevel::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_always_admin() {
        let owner = Uuid::new_v4();
        assert_eq!(effective_level(owner, None, owner), AccessLevel::Admin);
    }

    #[test]
    fn test_owner_dominates_conflicting_share() {
        // Even a VIEWER share row naming the owner must not lower the
        // owner's rights.
        let owner = Uuid::new_v4();
        assert_eq!(
            effective_level(owner, Some(PermissionLevel::Viewer), owner),
            AccessLevel::Admin
        );
    }

    #[test]
    fn test_share_level_maps_through() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert_eq!(
            effective_level(owner, Some(PermissionLevel::Viewer), other),
            AccessLevel::Viewer
        );
        assert_eq!(
            effective_level(owner, Some(PermissionLevel::Editor), other),
            AccessLevel::Editor
        );
        assert_eq!(
            effective_level(owner, Some(PermissionLevel::Admin), other),
            AccessLevel::Admin
        );
    }

    #[test]
    fn test_no_share_means_no_access() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        assert_eq!(effective_level(owner, None, stranger), AccessLevel::None);
    }

    #[test]
    fn test_view_predicate() {
        assert!(!AccessLevel::None.can_view());
        assert!(AccessLevel::Viewer.can_view());
        assert!(AccessLevel::Editor.can_view());
        assert!(AccessLevel::Admin.can_view());
    }

    #[test]
    fn test_edit_predicate() {
        assert!(!AccessLevel::None.can_edit());
        assert!(!AccessLevel::Viewer.can_edit());
        assert!(AccessLevel::Editor.can_edit());
        assert!(AccessLevel::Admin.can_edit());
    }

    #[test]
    fn test_admin_predicate() {
        assert!(!AccessLevel::None.can_admin());
        assert!(!AccessLevel::Viewer.can_admin());
        assert!(!AccessLevel::Editor.can_admin());
        assert!(AccessLevel::Admin.can_admin());
    }
}
