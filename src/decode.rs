//! Media playlist decoding
//!
//! One pass over the input lines with a single piece of state: the segment
//! under assembly. Every per-line step takes the pending segment by value
//! and hands back its successor, so the state machine has no shared
//! mutable accumulator.

use std::io::BufRead;

use crate::attr::parse_attribute_list;
use crate::error::{PlaylistError, Result};
use crate::playlist::MediaPlaylist;
use crate::tags::{classify, TagKind};
use crate::types::{ByteRange, InitSection, Segment};

// helper.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// The segment under assembly.
///
/// `duration` stays None until an #EXTINF arrives; a zero duration from
/// `#EXTINF:0,` is legal and distinct from "not seen yet".
#[derive(Debug, Default)]
struct PendingSegment {
    duration: Option<f64>,
    title: String,
    discontinuity: bool,
    byte_range: Option<ByteRange>,
    map: Option<InitSection>,
    directives: Vec<String>,
}

impl PendingSegment {
    // A URI line terminates the segment; a duration must have been seen.
    fn finish(self, uri: &str) -> Result<Segment> {
        let duration = self
            .duration
            .ok_or_else(|| PlaylistError::MissingSegmentDuration(uri.to_string()))?;
        Ok(Segment {
            uri: uri.to_string(),
            duration,
            title: self.title,
            discontinuity: self.discontinuity,
            byte_range: self.byte_range,
            map: self.map,
            directives: self.directives,
        })
    }
}

// #EXTINF:<duration>,[<title>]
fn parse_extinf(value: &str, line: &str) -> Result<(f64, String)> {
    let (duration, title) = value
        .split_once(',')
        .ok_or_else(|| PlaylistError::MalformedExtInf(line.to_string()))?;
    let duration: f64 = duration
        .parse()
        .map_err(|_| PlaylistError::MalformedExtInf(line.to_string()))?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(PlaylistError::MalformedExtInf(line.to_string()));
    }
    Ok((duration, title.to_string()))
}

// <n>[@<o>], the byte-range value syntax shared by the #EXT-X-BYTERANGE
// tag and the BYTERANGE attribute of #EXT-X-MAP.
pub(crate) fn parse_byte_range(value: &str) -> Result<ByteRange> {
    let malformed = || PlaylistError::MalformedByteRange(value.to_string());
    let caps = regex!(r"^(\d+)(?:@(\d+))?$")
        .captures(value)
        .ok_or_else(malformed)?;
    let len = caps[1].parse().map_err(|_| malformed())?;
    let start = caps
        .get(2)
        .map(|m| m.as_str().parse())
        .transpose()
        .map_err(|_| malformed())?;
    Ok(ByteRange { len, start })
}

// #EXT-X-MAP:<attribute-list>; URI is required, BYTERANGE optional.
fn parse_init_section(value: &str, line: &str) -> Result<InitSection> {
    let attrs = parse_attribute_list(value)?;
    let uri = attrs
        .get("URI")
        .ok_or_else(|| PlaylistError::MissingAttribute {
            attr: "URI",
            line: line.to_string(),
        })?
        .to_string();
    let byte_range = attrs.get("BYTERANGE").map(parse_byte_range).transpose()?;
    Ok(InitSection { uri, byte_range })
}

// integer value of a typed playlist-level tag
fn parse_int(value: &str, line: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|source| PlaylistError::InvalidInteger {
            line: line.to_string(),
            source,
        })
}

/// Process one line. Takes the pending segment and returns its successor:
/// the same accumulator mutated, or a fresh one once a URI line completed
/// the segment.
fn decode_line(
    line: &str,
    playlist: &mut MediaPlaylist,
    mut cur: PendingSegment,
) -> Result<PendingSegment> {
    // Each line is a URI, is blank, or starts with '#'. Blank lines are
    // ignored, as is surrounding whitespace.
    let line = line.trim();
    if line.is_empty() {
        return Ok(cur);
    }

    if !line.starts_with('#') {
        // URI
        playlist.append(cur.finish(line)?);
        return Ok(PendingSegment::default());
    }

    if !line.starts_with("#EXT") {
        // comment
        return Ok(cur);
    }

    match classify(line) {
        TagKind::ExtInf(value) => {
            let (duration, title) = parse_extinf(value, line)?;
            cur.duration = Some(duration);
            cur.title = title;
        }
        TagKind::ByteRange(value) => {
            cur.byte_range = Some(
                parse_byte_range(value)
                    .map_err(|_| PlaylistError::MalformedByteRange(line.to_string()))?,
            );
        }
        TagKind::Map(value) => cur.map = Some(parse_init_section(value, line)?),
        TagKind::Discontinuity => cur.discontinuity = true,
        TagKind::Marker => {}
        TagKind::EndList => playlist.closed = true,
        TagKind::Version(value) => playlist.version = Some(parse_int(value, line)?),
        TagKind::TargetDuration(value) => playlist.target_duration = Some(parse_int(value, line)?),
        TagKind::MediaSequence(value) => playlist.sequence_number = Some(parse_int(value, line)?),
        TagKind::PlaylistLevel => {
            tracing::trace!("keeping playlist-level tag verbatim: {}", line);
            playlist.directives.push(line.to_string());
        }
        TagKind::Unknown => {
            // private and future tags ride along with the segment
            tracing::trace!("keeping segment tag verbatim: {}", line);
            cur.directives.push(line.to_string());
        }
    }
    Ok(cur)
}

/// Decode a media playlist from a line-oriented byte source.
///
/// Parse errors abort immediately; no partial playlist is returned. A
/// trailing segment with no URI line was never terminated and is dropped.
pub fn decode<R: BufRead>(reader: R) -> Result<MediaPlaylist> {
    let mut playlist = MediaPlaylist::new();
    let mut cur = PendingSegment::default();
    for line in reader.lines() {
        cur = decode_line(&line?, &mut playlist, cur)?;
    }
    tracing::debug!(
        segments = playlist.len(),
        closed = playlist.closed,
        "decoded media playlist"
    );
    Ok(playlist)
}

/// Decode a media playlist from in-memory text.
pub fn decode_str(content: &str) -> Result<MediaPlaylist> {
    decode(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal() {
        let playlist = decode_str(
            "#EXTM3U\n\
             #EXT-X-VERSION:3\n\
             #EXT-X-TARGETDURATION:10\n\
             #EXT-X-MEDIA-SEQUENCE:0\n\
             #EXTINF:9.009,\n\
             first.ts\n\
             #EXTINF:9.009,\n\
             second.ts\n\
             #EXT-X-ENDLIST\n",
        )
        .unwrap();

        assert_eq!(playlist.version, Some(3));
        assert_eq!(playlist.target_duration, Some(10));
        assert_eq!(playlist.sequence_number, Some(0));
        assert!(playlist.closed);
        assert_eq!(playlist.len(), 2);

        let first = playlist.front().unwrap();
        assert_eq!(playlist.get(first).unwrap().uri, "first.ts");
        assert_eq!(playlist.get(first).unwrap().duration, 9.009);
    }

    #[test]
    fn test_decode_title_and_discontinuity() {
        let playlist = decode_str(
            "#EXTM3U\n\
             #EXTINF:5.5,opening titles\n\
             a.ts\n\
             #EXT-X-DISCONTINUITY\n\
             #EXTINF:0,\n\
             b.ts\n",
        )
        .unwrap();

        let first = playlist.front().unwrap();
        assert_eq!(playlist.get(first).unwrap().title, "opening titles");
        let second = playlist.next(first).unwrap();
        let b = playlist.get(second).unwrap();
        assert!(b.discontinuity);
        // zero is a real duration, not "unset"
        assert_eq!(b.duration, 0.0);
    }

    #[test]
    fn test_decode_byte_range_and_map() {
        let playlist = decode_str(
            "#EXTM3U\n\
             #EXT-X-MAP:URI=\"init.mp4\",BYTERANGE=\"596@0\"\n\
             #EXTINF:4.0,\n\
             #EXT-X-BYTERANGE:75232@596\n\
             media.mp4\n\
             #EXTINF:4.0,\n\
             #EXT-X-BYTERANGE:82112\n\
             media.mp4\n",
        )
        .unwrap();

        let first = playlist.front().unwrap();
        let segment = playlist.get(first).unwrap();
        let map = segment.map.as_ref().unwrap();
        assert_eq!(map.uri, "init.mp4");
        assert_eq!(map.byte_range, Some(ByteRange { len: 596, start: Some(0) }));
        assert_eq!(
            segment.byte_range,
            Some(ByteRange { len: 75232, start: Some(596) })
        );

        let second = playlist.next(first).unwrap();
        assert_eq!(
            playlist.get(second).unwrap().byte_range,
            Some(ByteRange { len: 82112, start: None })
        );
    }

    #[test]
    fn test_decode_keeps_unknown_tags_in_order() {
        let playlist = decode_str(
            "#EXTM3U\n\
             #EXT-X-PLAYLIST-TYPE:VOD\n\
             #EXT-X-CUSTOM:some-key-values\n\
             #EXTINF:10.000000,\n\
             #EXT-X-TAG:VALUE=5954336\n\
             00001.ts\n",
        )
        .unwrap();

        assert_eq!(playlist.directives, ["#EXT-X-PLAYLIST-TYPE:VOD"]);
        let first = playlist.front().unwrap();
        assert_eq!(
            playlist.get(first).unwrap().directives,
            ["#EXT-X-CUSTOM:some-key-values", "#EXT-X-TAG:VALUE=5954336"]
        );
    }

    #[test]
    fn test_uri_without_extinf() {
        let err = decode_str("#EXTM3U\nsegment.ts\n").unwrap_err();
        assert!(matches!(err, PlaylistError::MissingSegmentDuration(l) if l == "segment.ts"));
    }

    #[test]
    fn test_extinf_without_comma() {
        let err = decode_str("#EXTM3U\n#EXTINF:10.0\nsegment.ts\n").unwrap_err();
        assert!(matches!(err, PlaylistError::MalformedExtInf(_)));
    }

    #[test]
    fn test_extinf_negative_duration() {
        let err = decode_str("#EXTM3U\n#EXTINF:-2.0,\nsegment.ts\n").unwrap_err();
        assert!(matches!(err, PlaylistError::MalformedExtInf(_)));
    }

    #[test]
    fn test_bad_integer_tag() {
        let err = decode_str("#EXTM3U\n#EXT-X-TARGETDURATION:ten\n").unwrap_err();
        match err {
            PlaylistError::InvalidInteger { line, .. } => {
                assert_eq!(line, "#EXT-X-TARGETDURATION:ten")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_byte_range() {
        let err = decode_str("#EXTM3U\n#EXTINF:4.0,\n#EXT-X-BYTERANGE:12@\nx.mp4\n").unwrap_err();
        assert!(matches!(err, PlaylistError::MalformedByteRange(_)));
    }

    #[test]
    fn test_map_without_uri() {
        let err = decode_str("#EXTM3U\n#EXT-X-MAP:BYTERANGE=\"596@0\"\n").unwrap_err();
        assert!(matches!(
            err,
            PlaylistError::MissingAttribute { attr: "URI", .. }
        ));
    }

    #[test]
    fn test_trailing_segment_discarded() {
        let playlist = decode_str("#EXTM3U\n#EXTINF:4.0,\na.ts\n#EXTINF:4.0,\n").unwrap();
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let playlist = decode_str("#EXTM3U\n\n#EXTINF:4.0,\n\n  \na.ts\n\n").unwrap();
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn test_unset_headers_stay_unset() {
        let playlist = decode_str("#EXTM3U\n#EXTINF:4.0,\na.ts\n").unwrap();
        assert_eq!(playlist.version, None);
        assert_eq!(playlist.target_duration, None);
        assert_eq!(playlist.sequence_number, None);
        assert!(!playlist.closed);
    }

    #[test]
    fn test_parse_byte_range_values() {
        assert_eq!(
            parse_byte_range("596@0").unwrap(),
            ByteRange { len: 596, start: Some(0) }
        );
        assert_eq!(
            parse_byte_range("75232").unwrap(),
            ByteRange { len: 75232, start: None }
        );
        assert!(parse_byte_range("").is_err());
        assert!(parse_byte_range("@5").is_err());
        assert!(parse_byte_range("5@").is_err());
        assert!(parse_byte_range("596@0@1").is_err());
    }
}
