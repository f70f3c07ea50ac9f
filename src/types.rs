use std::fmt;

/// A sub-range of a resource: length plus optional start offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub len: u64,
    /// Offset into the resource. If None, the range starts where the
    /// previous range for the same resource ended.
    pub start: Option<u64>,
}

impl fmt::Display for ByteRange {
    /// `<length>` or `<length>@<offset>`, the byte-range value syntax.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "{}@{}", self.len, start),
            None => write!(f, "{}", self.len),
        }
    }
}

/// An initialization-section reference (`#EXT-X-MAP`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSection {
    pub uri: String,
    pub byte_range: Option<ByteRange>,
}

/// One media segment of a media playlist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub uri: String,
    /// Duration in seconds. Zero is a valid duration.
    pub duration: f64,
    /// Optional second parameter of the #EXTINF tag; empty means absent.
    pub title: String,
    /// Whether a discontinuity precedes this segment.
    pub discontinuity: bool,
    pub byte_range: Option<ByteRange>,
    pub map: Option<InitSection>,
    /// Unrecognized tag lines attached to this segment, verbatim and in
    /// arrival order.
    pub directives: Vec<String>,
}
