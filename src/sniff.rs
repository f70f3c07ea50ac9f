//! Format sniffing
//!
//! A media playlist announces itself with #EXTINF, a master playlist with
//! #EXT-X-STREAM-INF; whichever appears first decides.

use std::io::{BufRead, Read};

use crate::error::{PlaylistError, Result};
use crate::master::{decode_master, MasterPlaylist};
use crate::tags::{EXTINF, STREAM_INF};

/// Report whether the content is a master playlist.
///
/// Scans until the first segment-duration tag (media) or variant-stream
/// tag (master); input containing neither fails with
/// [`PlaylistError::AmbiguousPlaylist`].
pub fn is_master<R: BufRead>(reader: R) -> Result<bool> {
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.starts_with(EXTINF) {
            return Ok(false);
        }
        if line.starts_with(STREAM_INF) {
            return Ok(true);
        }
    }
    Err(PlaylistError::AmbiguousPlaylist)
}

/// Buffer the content, sniff it, and decode it as a master playlist.
///
/// Media-playlist content fails with [`PlaylistError::NotMaster`] and is
/// left undecoded; the caller may hand the same bytes to [`crate::decode`]
/// instead.
pub fn try_decode_master<R: Read>(mut reader: R) -> Result<MasterPlaylist> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    if !is_master(content.as_bytes())? {
        tracing::debug!("content sniffed as media playlist, not master");
        return Err(PlaylistError::NotMaster);
    }
    decode_master(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDIA: &str = "#EXTM3U\n#EXT-X-TARGETDURATION:10\n#EXTINF:9.0,\na.ts\n";
    const MASTER: &str = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1280000\nlow.m3u8\n";

    #[test]
    fn test_is_master() {
        assert!(!is_master(MEDIA.as_bytes()).unwrap());
        assert!(is_master(MASTER.as_bytes()).unwrap());
    }

    #[test]
    fn test_is_master_ambiguous() {
        let err = is_master("#EXTM3U\n#EXT-X-VERSION:3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PlaylistError::AmbiguousPlaylist));
    }

    #[test]
    fn test_try_decode_master() {
        let master = try_decode_master(MASTER.as_bytes()).unwrap();
        assert_eq!(master.streams.len(), 1);
        assert_eq!(master.streams[0].uri, "low.m3u8");
    }

    #[test]
    fn test_try_decode_master_rejects_media() {
        let err = try_decode_master(MEDIA.as_bytes()).unwrap_err();
        assert!(matches!(err, PlaylistError::NotMaster));

        // the content is untouched; re-dispatch to the media decoder works
        let playlist = crate::decode::decode_str(MEDIA).unwrap();
        assert_eq!(playlist.len(), 1);
    }
}
