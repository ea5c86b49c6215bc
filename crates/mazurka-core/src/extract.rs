// src/extract.rs
use serde::de::DeserializeOwned;

use crate::error::RouterResult;
use crate::params::Params;

/// Typed view over captured path parameters.
///
/// Captures are always strings, so target fields are `String` (or string-ish
/// via serde). Shape mismatches surface as `RouterError::InvalidParams`.
pub struct PathParams<T>(pub T);

impl<T> PathParams<T>
where
    T: DeserializeOwned,
{
    pub fn from_params(params: &Params) -> RouterResult<Self> {
        let value = serde_json::to_value(params)?;
        Ok(PathParams(serde_json::from_value(value)?))
    }
}
