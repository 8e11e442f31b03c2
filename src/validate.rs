//! Client-side checks run before a request is encoded.

use crate::error::Result;
use std::collections::{BTreeMap, HashMap};

/// A request payload that can check and normalize itself.
///
/// The pipeline calls [`Validate::validate`] before encoding. Returning an
/// error aborts the call without any network I/O. Implementations may also
/// fix up the payload, for example by clearing mutually exclusive fields.
///
/// The default implementation accepts everything.
///
/// # Examples
///
/// ```
/// use asana_client::{Error, Validate};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Rename {
///     name: String,
/// }
///
/// impl Validate for Rename {
///     fn validate(&mut self) -> Result<(), Error> {
///         if self.name.trim().is_empty() {
///             return Err(Error::Validation("name must not be blank".to_string()));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validate {
    /// Checks the payload, normalizing it where possible.
    fn validate(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Validate for () {}

impl Validate for serde_json::Value {}

impl Validate for serde_json::Map<String, serde_json::Value> {}

impl<V> Validate for HashMap<String, V> {}

impl<V> Validate for BTreeMap<String, V> {}

impl<T: Validate> Validate for Option<T> {
    fn validate(&mut self) -> Result<()> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}
