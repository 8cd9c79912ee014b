//! `EventReader`: pull-based iterator over the `<event>` elements of a log.
//!
//! Memory use is bounded by the largest single element: one event buffer
//! is reused for the whole file and each [`Event`] owns only its own
//! attributes.  The first error ends the iteration.  A document whose
//! root is missing or is not `<events>` is rejected like malformed XML.

use std::io::BufRead;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event as XmlEvent;
use tp_network::xml::{attributes, open_input, xml_reader};

use crate::{Event, EventError, EventResult};

pub struct EventReader<R: BufRead> {
    reader:      Reader<R>,
    buf:         Vec<u8>,
    depth:       usize,
    root_seen:   bool,
    events_read: u64,
    done:        bool,
}

impl EventReader<Box<dyn BufRead>> {
    /// Open an event log, transparently decompressing `.gz` files.
    pub fn open(path: &Path) -> EventResult<Self> {
        Ok(Self::new(open_input(path)?))
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader:      xml_reader(source),
            buf:         Vec::with_capacity(1024),
            depth:       0,
            root_seen:   false,
            events_read: 0,
            done:        false,
        }
    }

    /// Number of events yielded so far.
    pub fn events_read(&self) -> u64 {
        self.events_read
    }

    /// Byte offset in the (decompressed) input.
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    fn fail(&mut self, e: EventError) -> Option<EventResult<Event>> {
        self.done = true;
        Some(Err(e))
    }
}

/// Accept the first element only if it is `<events>`.
fn check_root(root_seen: &mut bool, name: &[u8]) -> EventResult<()> {
    if std::mem::replace(root_seen, true) || name == b"events" {
        return Ok(());
    }
    Err(EventError::UnexpectedRoot(String::from_utf8_lossy(name).into_owned()))
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = EventResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            let parsed = match self.reader.read_event_into(&mut self.buf) {
                Ok(XmlEvent::Start(e)) => {
                    if let Err(err) = check_root(&mut self.root_seen, e.local_name().as_ref()) {
                        self.done = true;
                        return Some(Err(err));
                    }
                    self.depth += 1;
                    (e.local_name().as_ref() == b"event").then(|| attributes(&e))
                }
                Ok(XmlEvent::Empty(e)) => {
                    if let Err(err) = check_root(&mut self.root_seen, e.local_name().as_ref()) {
                        self.done = true;
                        return Some(Err(err));
                    }
                    (e.local_name().as_ref() == b"event").then(|| attributes(&e))
                }
                Ok(XmlEvent::End(_)) => {
                    self.depth = self.depth.saturating_sub(1);
                    None
                }
                Ok(XmlEvent::Eof) => {
                    self.done = true;
                    if !self.root_seen {
                        return Some(Err(EventError::NoRoot));
                    }
                    if self.depth > 0 {
                        return Some(Err(EventError::Truncated));
                    }
                    return None;
                }
                Ok(_) => None,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };

            match parsed {
                None => continue,
                Some(Err(e)) => return self.fail(e.into()),
                Some(Ok(attrs)) => match Event::from_attributes(attrs) {
                    Ok(event) => {
                        self.events_read += 1;
                        return Some(Ok(event));
                    }
                    Err(e) => return self.fail(e),
                },
            }
        }
    }
}
