//! Reconciling supplied and declared identity
//!
//! A bundle's own metadata is authoritative where the caller says nothing,
//! but anything the caller does say must agree with it exactly. Callers use
//! this to catch drift: "declare, don't override".

use crate::error::{Result, meta_conflict, missing_name, name_conflict};
use crate::meta::{Declared, Meta};

use super::Identity;

/// Merge caller expectations with what the bundle declares
///
/// - No supplied name: the declared name is used, and one must exist.
/// - Both names present: they must be equal.
/// - Metadata: declared keys fill in what the caller left out; keys present
///   on both sides must carry equal values.
pub fn reconcile(
    supplied_name: Option<&str>,
    supplied_meta: Option<Meta>,
    declared: Declared,
) -> Result<Identity> {
    let name = match (supplied_name, declared.name) {
        (None, None) => return Err(missing_name()),
        (None, Some(declared)) => declared,
        (Some(supplied), Some(declared)) if supplied != declared => {
            return Err(name_conflict(declared, supplied));
        }
        (Some(supplied), _) => supplied.to_string(),
    };

    let mut meta = supplied_meta.unwrap_or_default();
    for (key, value) in declared.meta {
        match meta.get(&key) {
            None => {
                meta.insert(key, value);
            }
            Some(supplied) if *supplied != value => {
                return Err(meta_conflict(key, value, supplied.as_str()));
            }
            Some(_) => {}
        }
    }

    Ok(Identity { name, meta })
}
