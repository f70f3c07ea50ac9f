//! Decode, mutate and re-encode HLS (m3u8) playlists.
//!
//! Media playlists become a [`MediaPlaylist`] of [`Segment`]s addressed by
//! stable [`SegmentHandle`]s; master playlists become a [`MasterPlaylist`]
//! of [`VariantStream`]s. Marshaling reproduces the recognized tag set;
//! unrecognized tags pass through verbatim.

pub(crate) mod attr;
pub(crate) mod decode;
pub(crate) mod error;
pub(crate) mod marshal;
pub(crate) mod master;
pub(crate) mod playlist;
pub(crate) mod resolve;
pub(crate) mod sniff;
pub(crate) mod tags;
pub(crate) mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use attr::{parse_attribute_list, AttributeList};
pub use decode::{decode, decode_str};
pub use error::{PlaylistError, Result};
pub use master::{decode_master, decode_master_str, MasterPlaylist, VariantStream};
pub use playlist::{MediaPlaylist, SegmentHandle, Segments};
pub use resolve::resolve_url;
pub use sniff::{is_master, try_decode_master};
pub use tags::is_media_playlist_tag;
pub use types::{ByteRange, InitSection, Segment};
