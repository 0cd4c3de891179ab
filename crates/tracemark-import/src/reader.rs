//! Line context reader.
//!
//! Streams a text source as a sequence of line-context windows so the parsing
//! engine can look one line back and one line ahead without touching I/O
//! itself. A window only becomes available once the following line has been
//! read (or end-of-input is confirmed), which is what makes retroactive
//! heading detection possible.

use std::io::BufRead;
use thiserror::Error;
use tracing::debug;

/// One source line together with its neighbors.
///
/// `number` is 1-based, matching human-visible file line numbering.
/// `previous` is absent only for the first line; `next` only for the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineContext<'a> {
    pub number: usize,
    pub previous: Option<&'a str>,
    pub current: &'a str,
    pub next: Option<&'a str>,
}

/// Receives one callback per source line, plus a terminal notification.
pub trait LineListener {
    /// Called exactly once per line, in source order.
    fn next_line(&mut self, context: &LineContext<'_>);

    /// Called exactly once after the last line. Not called on read failure.
    fn finish(&mut self);
}

/// Failure while acquiring or advancing a line source.
///
/// Read failures are fatal to the current document's import and are never
/// retried; everything already delivered to the listener stays delivered.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open '{file}': {source}")]
    Open {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading '{file}' at line {line}: {source}")]
    Read {
        file: String,
        /// Number of the last successfully-read line.
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("no dialect registered for '{file}'")]
    UnsupportedFormat { file: String },
}

/// Drive `listener` with one [`LineContext`] per line of `source`, then one
/// [`LineListener::finish`] call.
///
/// On a read failure the remaining lines are abandoned: the error carries
/// `source_name` and the last successfully-read line number, no further line
/// callbacks fire, and `finish` is not called. The reader borrows the source
/// only for the duration of this call.
pub fn read_lines<R, L>(source_name: &str, source: R, listener: &mut L) -> Result<(), ImportError>
where
    R: BufRead,
    L: LineListener + ?Sized,
{
    debug!(file = source_name, "reading lines");
    let mut previous: Option<String> = None;
    let mut current: Option<String> = None;
    let mut number = 0usize;

    for line in source.lines() {
        let next = line.map_err(|source| ImportError::Read {
            file: source_name.to_string(),
            line: number,
            source,
        })?;
        if let Some(text) = current.as_deref() {
            listener.next_line(&LineContext {
                number,
                previous: previous.as_deref(),
                current: text,
                next: Some(&next),
            });
        }
        number += 1;
        previous = current;
        current = Some(next);
    }
    if let Some(text) = current.as_deref() {
        listener.next_line(&LineContext {
            number,
            previous: previous.as_deref(),
            current: text,
            next: None,
        });
    }
    listener.finish();
    debug!(file = source_name, lines = number, "finished reading");
    Ok(())
}
