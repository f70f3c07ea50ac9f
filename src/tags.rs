//! Tag names and line classification
//!
//! Tags are matched by name (the text before the first `:`), not by raw
//! prefix, so `#EXT-X-VERSION:3` and `#EXT-X-VERSIONFOO` never collide.
//! Tags defined without arguments (`#EXTM3U`, `#EXT-X-DISCONTINUITY`,
//! `#EXT-X-ENDLIST`) match only as the whole line.

// basic tags
pub(crate) const MARKER: &str = "#EXTM3U";
pub(crate) const VERSION: &str = "#EXT-X-VERSION";

// media playlist tags
pub(crate) const END_LIST: &str = "#EXT-X-ENDLIST";
pub(crate) const TARGET_DURATION: &str = "#EXT-X-TARGETDURATION";
pub(crate) const MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE";

// segment tags
pub(crate) const EXTINF: &str = "#EXTINF";
pub(crate) const DISCONTINUITY: &str = "#EXT-X-DISCONTINUITY";
pub(crate) const BYTE_RANGE: &str = "#EXT-X-BYTERANGE";
pub(crate) const MAP: &str = "#EXT-X-MAP";

// master playlist tags
pub(crate) const STREAM_INF: &str = "#EXT-X-STREAM-INF";
pub(crate) const MEDIA: &str = "#EXT-X-MEDIA";

/// Playlist-level tags that are kept verbatim in the playlist's directive
/// buffer rather than parsed into typed fields.
const PASSTHROUGH: &[&str] = &[
    "#EXT-X-DISCONTINUITY-SEQUENCE",
    "#EXT-X-PLAYLIST-TYPE",
    "#EXT-X-I-FRAMES-ONLY",
    "#EXT-X-INDEPENDENT-SEGMENTS",
    "#EXT-X-START",
];

/// One extended tag line, classified.
///
/// Valued variants carry the text after the first `:` (empty if the colon
/// is missing); the caller parses it in context so errors can cite the
/// whole line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TagKind<'a> {
    /// `#EXTM3U`, whole line
    Marker,
    /// `#EXT-X-VERSION:<n>`
    Version(&'a str),
    /// `#EXT-X-TARGETDURATION:<n>`
    TargetDuration(&'a str),
    /// `#EXT-X-MEDIA-SEQUENCE:<n>`
    MediaSequence(&'a str),
    /// `#EXT-X-ENDLIST`, whole line
    EndList,
    /// `#EXTINF:<duration>,[<title>]`
    ExtInf(&'a str),
    /// `#EXT-X-BYTERANGE:<n>[@<o>]`
    ByteRange(&'a str),
    /// `#EXT-X-MAP:<attribute-list>`
    Map(&'a str),
    /// `#EXT-X-DISCONTINUITY`, whole line
    Discontinuity,
    /// Allow-listed playlist-level tag, kept verbatim on the playlist
    PlaylistLevel,
    /// Anything else, kept verbatim on the segment under assembly
    Unknown,
}

/// Classify one `#EXT...` line.
pub(crate) fn classify(line: &str) -> TagKind<'_> {
    match line {
        MARKER => return TagKind::Marker,
        END_LIST => return TagKind::EndList,
        DISCONTINUITY => return TagKind::Discontinuity,
        _ => {}
    }

    let (name, value) = match line.split_once(':') {
        Some((name, value)) => (name, value),
        None => (line, ""),
    };

    match name {
        EXTINF => TagKind::ExtInf(value),
        BYTE_RANGE => TagKind::ByteRange(value),
        MAP => TagKind::Map(value),
        VERSION => TagKind::Version(value),
        TARGET_DURATION => TagKind::TargetDuration(value),
        MEDIA_SEQUENCE => TagKind::MediaSequence(value),
        _ if PASSTHROUGH.contains(&name) => TagKind::PlaylistLevel,
        _ => TagKind::Unknown,
    }
}

/// Report whether a line carries a playlist-level tag: one that describes
/// the playlist as a whole rather than the next segment.
pub fn is_media_playlist_tag(line: &str) -> bool {
    matches!(
        classify(line),
        TagKind::Marker
            | TagKind::Version(_)
            | TagKind::TargetDuration(_)
            | TagKind::MediaSequence(_)
            | TagKind::EndList
            | TagKind::PlaylistLevel
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_name_not_prefix() {
        assert_eq!(classify("#EXT-X-VERSION:3"), TagKind::Version("3"));
        assert_eq!(classify("#EXT-X-VERSIONFOO:3"), TagKind::Unknown);
        assert_eq!(classify("#EXT-X-BYTERANGE:75232@0"), TagKind::ByteRange("75232@0"));
    }

    #[test]
    fn test_classify_whole_line_tags() {
        assert_eq!(classify("#EXT-X-DISCONTINUITY"), TagKind::Discontinuity);
        // with a stray argument it is no longer the discontinuity tag
        assert_eq!(classify("#EXT-X-DISCONTINUITY:1"), TagKind::Unknown);
        assert_eq!(classify("#EXT-X-ENDLIST"), TagKind::EndList);
        assert_eq!(classify("#EXTM3U"), TagKind::Marker);
    }

    #[test]
    fn test_classify_passthrough() {
        assert_eq!(classify("#EXT-X-PLAYLIST-TYPE:VOD"), TagKind::PlaylistLevel);
        assert_eq!(classify("#EXT-X-INDEPENDENT-SEGMENTS"), TagKind::PlaylistLevel);
        assert_eq!(classify("#EXT-X-START:TIME-OFFSET=3.0"), TagKind::PlaylistLevel);
        assert_eq!(
            classify("#EXT-X-DISCONTINUITY-SEQUENCE:7"),
            TagKind::PlaylistLevel
        );
    }

    #[test]
    fn test_is_media_playlist_tag() {
        assert!(is_media_playlist_tag("#EXT-X-VERSION:3"));
        assert!(is_media_playlist_tag("#EXT-X-TARGETDURATION:10"));
        assert!(is_media_playlist_tag("#EXT-X-PLAYLIST-TYPE:EVENT"));
        assert!(!is_media_playlist_tag("#EXTINF:10.0,"));
        assert!(!is_media_playlist_tag("#EXT-X-CUSTOM:x"));
        assert!(!is_media_playlist_tag("#EXT-X-STREAM-INF:BANDWIDTH=1280000"));
    }
}
