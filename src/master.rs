//! Master playlist model and decoding

use std::io::BufRead;

use crate::error::{PlaylistError, Result};
use crate::tags::{MARKER, MEDIA, STREAM_INF};

/// One variant stream of a master playlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantStream {
    pub uri: String,
    /// Raw attribute text of the #EXT-X-STREAM-INF tag. Run it through
    /// [`crate::parse_attribute_list`] when structured access is needed.
    pub info: String,
    /// Raw attribute text of adjacent #EXT-X-MEDIA tags. The format does
    /// not bind renditions to one variant; keeping them here preserves
    /// their position relative to the variant on output.
    pub renditions: Vec<String>,
    /// Other tag lines kept verbatim, in arrival order.
    pub directives: Vec<String>,
}

/// A master playlist: ordered variant streams plus an optional version
#[derive(Debug, Clone, Default)]
pub struct MasterPlaylist {
    /// EXT-X-VERSION for programmatically built playlists. Decoding does
    /// not fill this in: a version line in the input stays verbatim in the
    /// owning stream's directives, which keeps the round trip exact.
    pub version: Option<u64>,
    pub streams: Vec<VariantStream>,
}

impl MasterPlaylist {
    /// An empty master playlist.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Decode a master playlist from a line-oriented byte source.
///
/// Parse errors abort immediately. A trailing variant with no URI line was
/// never terminated and is dropped.
pub fn decode_master<R: BufRead>(reader: R) -> Result<MasterPlaylist> {
    let mut master = MasterPlaylist::new();
    let mut cur = VariantStream::default();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line == MARKER {
            continue;
        }
        if !line.starts_with('#') {
            // URI: terminates the variant under assembly
            if cur.info.is_empty() {
                return Err(PlaylistError::MissingStreamInfo(line.to_string()));
            }
            cur.uri = line.to_string();
            master.streams.push(std::mem::take(&mut cur));
            continue;
        }
        if !line.starts_with("#EXT") {
            // comment
            continue;
        }

        if let Some(info) = tag_value(line, STREAM_INF) {
            cur.info = info.to_string();
        } else if let Some(rendition) = tag_value(line, MEDIA) {
            cur.renditions.push(rendition.to_string());
        } else {
            cur.directives.push(line.to_string());
        }
    }

    tracing::debug!(streams = master.streams.len(), "decoded master playlist");
    Ok(master)
}

/// Decode a master playlist from in-memory text.
pub fn decode_master_str(content: &str) -> Result<MasterPlaylist> {
    decode_master(content.as_bytes())
}

// The value of `line` if it carries exactly the named tag. Matching the
// `:` as well keeps `#EXT-X-MEDIA-SEQUENCE` from reading as `#EXT-X-MEDIA`.
fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    line.strip_prefix(tag)?.strip_prefix(':')
}
