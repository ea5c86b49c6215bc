// src/params.rs
use std::collections::HashMap;

/// Path parameters captured during a match, keyed by capture name.
pub type Params = HashMap<String, String>;

/// Rebuild a named-parameter map from recorded segment positions.
///
/// `positions` maps a parameter name to the zero-based index of the path
/// segment that carried its value, for embedders that store capture
/// positions instead of captured values. The query string is stripped at the
/// first `?` before splitting. Missing input or an out-of-range index
/// degrades to an empty or partial map; this helper sits on the request path
/// and must not fault.
pub fn parse_params(path: Option<&str>, positions: Option<&HashMap<String, usize>>) -> Params {
    let (Some(path), Some(positions)) = (path, positions) else {
        return Params::new();
    };
    let path = match path.find('?') {
        Some(at) => &path[..at],
        None => path,
    };
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    positions
        .iter()
        .filter_map(|(name, &at)| {
            segments
                .get(at)
                .map(|value| (name.clone(), (*value).to_string()))
        })
        .collect()
}
