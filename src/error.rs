use thiserror::Error;

/// Main error type for playlist decoding, mutation and encoding
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// A standard I/O error from the caller-supplied source or sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A URI line arrived before any #EXTINF tag set a segment duration
    #[error("missing #EXTINF tag before URI line: {0}")]
    MissingSegmentDuration(String),

    /// An #EXTINF tag without a comma, or with an unparsable or negative duration
    #[error("malformed #EXTINF tag: {0}")]
    MalformedExtInf(String),

    /// A byte-range value that is not `<length>` or `<length>@<offset>`
    #[error("malformed byte range: {0}")]
    MalformedByteRange(String),

    /// An attribute list lacking a key the enclosing tag requires
    #[error("missing required attribute {attr} in: {line}")]
    MissingAttribute { attr: &'static str, line: String },

    /// An attribute-list token without a key/value separator
    #[error("invalid attribute list token: {0}")]
    InvalidAttributeList(String),

    /// A typed playlist-level tag whose integer value does not parse
    #[error("invalid integer in tag line {line:?}")]
    InvalidInteger {
        line: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A master-playlist URI line before any #EXT-X-STREAM-INF tag
    #[error("missing #EXT-X-STREAM-INF tag before URI line: {0}")]
    MissingStreamInfo(String),

    /// Input ended without a media or master signal tag
    #[error("invalid playlist: neither master nor media playlist")]
    AmbiguousPlaylist,

    /// The sniffed content is a media playlist, not a master playlist
    #[error("not a master playlist")]
    NotMaster,

    /// A segment handle that does not belong to the playlist (stale or never issued)
    #[error("segment handle does not belong to this playlist")]
    DetachedSegment,

    /// An index or entry reference that cannot be parsed or resolved
    #[error("invalid url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PlaylistError>;
