//! Ownership checks for owner-only grants.
//!
//! When a grant has `own: true`, single records must belong to the caller
//! and collections are narrowed to the caller's records. Both rules key on
//! `createdBy.id`, exposed through [`Owned`].

use crate::{AccessDenied, PermissionGrant};
use cms_types::Identity;

/// A record that remembers who created it.
pub trait Owned {
    /// The identity stamped on the record at creation.
    fn created_by(&self) -> &Identity;
}

/// Rejects access to `record` when `grant` is owner-only and the caller did
/// not create it.
///
/// A missing grant, or one without `own`, never restricts.
///
/// # Errors
///
/// Returns [`AccessDenied::NotOwner`] on mismatch.
///
/// # Example
///
/// ```
/// use cms_auth::{ensure_owner, Owned, PermissionGrant};
/// use cms_types::Identity;
///
/// struct Note(Identity);
/// impl Owned for Note {
///     fn created_by(&self) -> &Identity { &self.0 }
/// }
///
/// let grant = PermissionGrant::new("notes").owned_only();
/// let caller = Identity::new("u1", "");
/// let theirs = Note(Identity::new("u2", ""));
///
/// assert!(ensure_owner(None, &caller, &theirs).is_ok());
/// assert!(ensure_owner(Some(&grant), &caller, &theirs).is_err());
/// ```
pub fn ensure_owner<T: Owned + ?Sized>(
    grant: Option<&PermissionGrant>,
    caller: &Identity,
    record: &T,
) -> Result<(), AccessDenied> {
    let Some(grant) = grant.filter(|g| g.own) else {
        return Ok(());
    };

    let owner = record.created_by();
    if owner.is(caller) {
        Ok(())
    } else {
        Err(AccessDenied::NotOwner {
            permission: grant.name.clone(),
            owner: owner.id.clone(),
            caller: caller.id.clone(),
        })
    }
}

/// Narrows `records` to the caller's own when `grant` is owner-only.
///
/// Order is preserved. Without an owner-only grant the list is returned
/// untouched.
#[must_use]
pub fn retain_owned<T: Owned>(
    grant: Option<&PermissionGrant>,
    caller: &Identity,
    mut records: Vec<T>,
) -> Vec<T> {
    if grant.is_some_and(|g| g.own) {
        records.retain(|r| r.created_by().is(caller));
    }
    records
}
