//! Reference resolution between an index location and the entries it names.

use url::Url;

use crate::error::{PlaylistError, Result};

/// Resolve an entry of an m3u8 index to an absolute location.
///
/// `index` is either an absolute URL or a plain absolute filesystem path.
/// A path index keeps the result a plain path, except when the entry is
/// itself a full URL, which passes through unchanged.
pub fn resolve_url(index: &str, entry: &str) -> Result<String> {
    // An entry with its own scheme stands alone.
    if let Ok(absolute) = Url::parse(entry) {
        return Ok(absolute.to_string());
    }
    match Url::parse(index) {
        Ok(base) => {
            let resolved = base.join(entry).map_err(|source| PlaylistError::InvalidUrl {
                url: entry.to_string(),
                source,
            })?;
            Ok(resolved.to_string())
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => resolve_path(index, entry),
        Err(source) => Err(PlaylistError::InvalidUrl {
            url: index.to_string(),
            source,
        }),
    }
}

// The index is a bare filesystem path. Borrow the file scheme for the
// join, then strip it off the result again.
fn resolve_path(index: &str, entry: &str) -> Result<String> {
    if !index.starts_with('/') {
        return Err(PlaylistError::InvalidUrl {
            url: index.to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        });
    }
    let base =
        Url::parse(&format!("file://{}", index)).map_err(|source| PlaylistError::InvalidUrl {
            url: index.to_string(),
            source,
        })?;
    let resolved = base.join(entry).map_err(|source| PlaylistError::InvalidUrl {
        url: entry.to_string(),
        source,
    })?;
    if resolved.host().is_none() {
        Ok(resolved.path().to_string())
    } else {
        // A scheme-relative entry brought its own host; drop only the
        // scheme we invented.
        Ok(resolved.to_string().trim_start_matches("file:").to_string())
    }
}
