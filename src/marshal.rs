//! Playlist serialization
//!
//! Output is rebuilt line by line from the model; raw directives come out
//! verbatim where they arrived. The streaming entry points wrap the sink
//! in an error-latching adapter, so emission code never checks individual
//! writes and the caller still sees the first failure exactly once.

use std::io::{self, Write};

use crate::master::{MasterPlaylist, VariantStream};
use crate::playlist::MediaPlaylist;
use crate::tags::{
    BYTE_RANGE, DISCONTINUITY, END_LIST, EXTINF, MAP, MARKER, MEDIA, MEDIA_SEQUENCE, STREAM_INF,
    TARGET_DURATION, VERSION,
};
use crate::types::Segment;

/// Write adapter that records the first error and swallows the rest.
struct Latched<W: Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> Latched<W> {
    fn new(inner: W) -> Self {
        Latched { inner, error: None }
    }

    /// Write one line plus newline; a no-op once an error is latched.
    fn line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self
            .inner
            .write_all(line.as_bytes())
            .and_then(|()| self.inner.write_all(b"\n"))
        {
            self.error = Some(e);
        }
    }

    fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// Render through the same emission path the streaming variant uses.
// Writes into a Vec cannot fail, so the latch stays empty.
fn render(emit: impl FnOnce(&mut Latched<Vec<u8>>)) -> String {
    let mut w = Latched::new(Vec::new());
    emit(&mut w);
    String::from_utf8_lossy(&w.inner).into_owned()
}

impl MediaPlaylist {
    /// Render the playlist to text.
    pub fn marshal(&self) -> String {
        render(|w| self.emit(w))
    }

    /// Stream the playlist to a writer.
    ///
    /// Returns the first write error; once one occurs, nothing further is
    /// written, so error presence alone marks a short output.
    pub fn marshal_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut w = Latched::new(writer);
        self.emit(&mut w);
        w.finish()
    }

    fn emit<W: Write>(&self, w: &mut Latched<W>) {
        w.line(MARKER);
        if let Some(version) = self.version {
            w.line(&format!("{}:{}", VERSION, version));
        }
        if let Some(target_duration) = self.target_duration {
            w.line(&format!("{}:{}", TARGET_DURATION, target_duration));
        }
        if let Some(sequence_number) = self.sequence_number {
            w.line(&format!("{}:{}", MEDIA_SEQUENCE, sequence_number));
        }
        for directive in &self.directives {
            w.line(directive);
        }
        for (_, segment) in self.iter() {
            segment.emit(w);
        }
        if self.closed {
            w.line(END_LIST);
        }
    }
}

impl Segment {
    /// Render this segment alone, with all its directives.
    pub fn marshal(&self) -> String {
        render(|w| self.emit(w))
    }

    fn emit<W: Write>(&self, w: &mut Latched<W>) {
        if let Some(map) = &self.map {
            match &map.byte_range {
                Some(range) => w.line(&format!(
                    "{}:URI=\"{}\",BYTERANGE=\"{}\"",
                    MAP, map.uri, range
                )),
                None => w.line(&format!("{}:URI=\"{}\"", MAP, map.uri)),
            }
        }
        if self.discontinuity {
            w.line(DISCONTINUITY);
        }
        for directive in &self.directives {
            w.line(directive);
        }
        w.line(&format!("{}:{:.6},{}", EXTINF, self.duration, self.title));
        if let Some(range) = &self.byte_range {
            w.line(&format!("{}:{}", BYTE_RANGE, range));
        }
        w.line(&self.uri);
    }
}

impl VariantStream {
    /// Render this stream alone: directives, renditions, variant line, URI.
    pub fn marshal(&self) -> String {
        render(|w| self.emit(w))
    }

    fn emit<W: Write>(&self, w: &mut Latched<W>) {
        for directive in &self.directives {
            w.line(directive);
        }
        for rendition in &self.renditions {
            w.line(&format!("{}:{}", MEDIA, rendition));
        }
        if !self.renditions.is_empty() {
            // blank line groups the renditions with their variant
            w.line("");
        }
        w.line(&format!("{}:{}", STREAM_INF, self.info));
        w.line(&self.uri);
    }
}

impl MasterPlaylist {
    /// Render the master playlist to text.
    pub fn marshal(&self) -> String {
        render(|w| self.emit(w))
    }

    /// Stream the master playlist to a writer, latching the first error.
    pub fn marshal_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut w = Latched::new(writer);
        self.emit(&mut w);
        w.finish()
    }

    fn emit<W: Write>(&self, w: &mut Latched<W>) {
        w.line(MARKER);
        if let Some(version) = self.version {
            w.line(&format!("{}:{}", VERSION, version));
        }
        for stream in &self.streams {
            stream.emit(w);
            // blank line between streams
            w.line("");
        }
    }
}
