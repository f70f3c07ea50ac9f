//! Media playlist model
//!
//! Segments live in an arena of slots linked into a doubly linked list, so
//! insert-after and remove are O(1) given a handle and handles elsewhere in
//! the list stay valid across mutations. A handle is the slot index plus a
//! generation counter; removal bumps the slot's generation, which turns
//! every outstanding handle to that slot stale.

use crate::error::{PlaylistError, Result};
use crate::types::Segment;

/// Key identifying one live segment position inside one playlist.
///
/// Handles are issued by [`MediaPlaylist::append`], [`MediaPlaylist::insert_after`],
/// [`MediaPlaylist::front`] and [`MediaPlaylist::next`]. A handle is only
/// meaningful for the playlist that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentHandle {
    index: usize,
    generation: u64,
}

impl Default for SegmentHandle {
    /// A detached handle: belongs to no playlist, fails every lookup.
    fn default() -> Self {
        SegmentHandle {
            index: usize::MAX,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    segment: Option<Segment>,
    // starts at 1 so the default handle (generation 0) never matches
    generation: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A media playlist: header fields plus an ordered segment collection.
///
/// Collection order is playback order and is preserved through every
/// mutation and through decode/encode round trips.
#[derive(Debug, Clone, Default)]
pub struct MediaPlaylist {
    /// EXT-X-TARGETDURATION; None = tag absent.
    pub target_duration: Option<u64>,
    /// EXT-X-MEDIA-SEQUENCE; None = tag absent, Some(0) is emitted.
    pub sequence_number: Option<u64>,
    /// EXT-X-VERSION; None = tag absent.
    pub version: Option<u64>,
    /// EXT-X-ENDLIST seen or requested.
    pub closed: bool,
    /// Playlist-level tag lines kept verbatim, in arrival order.
    pub directives: Vec<String>,

    slots: Vec<Slot>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Vec<usize>,
    len: usize,
}

impl MediaPlaylist {
    /// An empty media playlist with no header fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a segment to the end of the playlist.
    pub fn append(&mut self, segment: Segment) -> SegmentHandle {
        let index = self.alloc(segment);
        let generation = self.slots[index].generation;
        self.slots[index].prev = self.tail;
        self.slots[index].next = None;
        match self.tail {
            Some(tail) => self.slots[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        SegmentHandle { index, generation }
    }

    /// Handle of the first segment, or None if the playlist is empty.
    pub fn front(&self) -> Option<SegmentHandle> {
        self.head.map(|index| SegmentHandle {
            index,
            generation: self.slots[index].generation,
        })
    }

    /// Handle of the segment after `handle`, or None at the end of the
    /// playlist or if `handle` is stale.
    pub fn next(&self, handle: SegmentHandle) -> Option<SegmentHandle> {
        let index = self.live(handle)?;
        let next = self.slots[index].next?;
        Some(SegmentHandle {
            index: next,
            generation: self.slots[next].generation,
        })
    }

    /// The segment a live handle points at.
    pub fn get(&self, handle: SegmentHandle) -> Option<&Segment> {
        let index = self.live(handle)?;
        self.slots[index].segment.as_ref()
    }

    /// Mutable access to the segment a live handle points at.
    pub fn get_mut(&mut self, handle: SegmentHandle) -> Option<&mut Segment> {
        let index = self.live(handle)?;
        self.slots[index].segment.as_mut()
    }

    /// Insert a segment directly after `after`.
    ///
    /// Fails with [`PlaylistError::DetachedSegment`] if `after` does not
    /// currently belong to this playlist.
    pub fn insert_after(&mut self, after: SegmentHandle, segment: Segment) -> Result<SegmentHandle> {
        let anchor = self.live(after).ok_or(PlaylistError::DetachedSegment)?;
        let index = self.alloc(segment);
        let generation = self.slots[index].generation;
        let follower = self.slots[anchor].next;
        self.slots[index].prev = Some(anchor);
        self.slots[index].next = follower;
        self.slots[anchor].next = Some(index);
        match follower {
            Some(follower) => self.slots[follower].prev = Some(index),
            None => self.tail = Some(index),
        }
        self.len += 1;
        Ok(SegmentHandle { index, generation })
    }

    /// Unlink the segment `handle` points at and return it.
    ///
    /// The handle (and every copy of it) becomes stale; other handles are
    /// unaffected. Fails with [`PlaylistError::DetachedSegment`] if the
    /// handle does not currently belong to this playlist.
    pub fn remove(&mut self, handle: SegmentHandle) -> Result<Segment> {
        let index = self.live(handle).ok_or(PlaylistError::DetachedSegment)?;
        let segment = self.slots[index]
            .segment
            .take()
            .ok_or(PlaylistError::DetachedSegment)?;

        let (prev, next) = (self.slots[index].prev, self.slots[index].next);
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }

        let slot = &mut self.slots[index];
        slot.prev = None;
        slot.next = None;
        slot.generation += 1;
        self.free.push(index);
        self.len -= 1;
        Ok(segment)
    }

    /// Iterate segments in playback order.
    pub fn iter(&self) -> Segments<'_> {
        Segments {
            playlist: self,
            cursor: self.head,
        }
    }

    // Place a segment in a free slot, or grow the arena.
    fn alloc(&mut self, segment: Segment) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.slots[index].segment = Some(segment);
                index
            }
            None => {
                self.slots.push(Slot {
                    segment: Some(segment),
                    generation: 1,
                    prev: None,
                    next: None,
                });
                self.slots.len() - 1
            }
        }
    }

    // Resolve a handle to its slot index, or None if stale.
    fn live(&self, handle: SegmentHandle) -> Option<usize> {
        let slot = self.slots.get(handle.index)?;
        (slot.generation == handle.generation && slot.segment.is_some()).then_some(handle.index)
    }
}

/// Forward iterator over `(handle, segment)` pairs.
pub struct Segments<'a> {
    playlist: &'a MediaPlaylist,
    cursor: Option<usize>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (SegmentHandle, &'a Segment);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.playlist.slots[index];
        self.cursor = slot.next;
        let segment = slot.segment.as_ref()?;
        Some((
            SegmentHandle {
                index,
                generation: slot.generation,
            },
            segment,
        ))
    }
}

impl<'a> IntoIterator for &'a MediaPlaylist {
    type Item = (SegmentHandle, &'a Segment);
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
