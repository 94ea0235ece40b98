//! crates/logging/src/sink.rs
//! Writer plumbing behind the default emitter.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::{self, Write};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard};

/// Boxed writer handed back by [`Logger::replace_writer`](crate::Logger::replace_writer).
pub type BoxedWriter = Box<dyn Write + Send>;

thread_local! {
    /// Render buffer reused across messages on this thread.
    static SCRATCH: Cell<String> = const { Cell::new(String::new()) };
    /// Sinks this thread is currently writing to, with lines logged from
    /// inside their writers.
    static ACTIVE: RefCell<Vec<ActiveWrite>> = const { RefCell::new(Vec::new()) };
}

struct ActiveWrite {
    sink: usize,
    deferred: Vec<String>,
}

/// Destination of the default emitter.
///
/// A line is rendered into a thread-local buffer with no lock held, so the
/// message arguments may themselves log or reconfigure the logger. The writer
/// lock is taken only for the final `write_all`, which keeps concurrent lines
/// whole. Lines logged by the writer itself while it runs are queued and
/// written right after the current line.
pub(crate) struct LineSink {
    writer: Mutex<BoxedWriter>,
}

enum Entry {
    /// This thread already holds the writer lock; the line was queued.
    Deferred,
    /// First write to this sink on this thread.
    Tracked,
    /// Thread-local state is gone (thread teardown).
    Untracked,
}

impl LineSink {
    pub(crate) fn new(writer: BoxedWriter) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoxedWriter> {
        self.writer
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn id(&self) -> usize {
        std::ptr::from_ref(self).addr()
    }

    /// Renders a line via `render` and writes it out, returning the byte count.
    ///
    /// Write errors are swallowed; the count reflects what was rendered.
    pub(crate) fn write_line<F>(&self, render: F) -> usize
    where
        F: FnOnce(&mut String),
    {
        let mut line = SCRATCH.try_with(Cell::take).unwrap_or_default();
        line.clear();
        render(&mut line);
        let written = line.len();
        self.write_rendered(&line);
        let _ = SCRATCH.try_with(|scratch| scratch.set(line));
        written
    }

    fn write_rendered(&self, line: &str) {
        let id = self.id();
        let entry = ACTIVE
            .try_with(|active| {
                let mut active = active.borrow_mut();
                if let Some(current) = active.iter_mut().find(|write| write.sink == id) {
                    current.deferred.push(line.to_owned());
                    Entry::Deferred
                } else {
                    active.push(ActiveWrite {
                        sink: id,
                        deferred: Vec::new(),
                    });
                    Entry::Tracked
                }
            })
            .unwrap_or(Entry::Untracked);

        match entry {
            Entry::Deferred => {}
            Entry::Untracked => {
                let mut writer = self.lock();
                let _ = writer.write_all(line.as_bytes());
                let _ = writer.flush();
            }
            Entry::Tracked => {
                let _guard = ActiveGuard(id);
                let mut writer = self.lock();
                let _ = writer.write_all(line.as_bytes());
                while let Some(next) = next_deferred(id) {
                    let _ = writer.write_all(next.as_bytes());
                }
                let _ = writer.flush();
            }
        }
    }

    /// Swaps the writer in place and returns the previous one.
    ///
    /// Must not be called from inside the writer being replaced.
    pub(crate) fn replace_writer(&self, mut writer: BoxedWriter) -> BoxedWriter {
        let mut current = self.lock();
        let _ = current.flush();
        mem::swap(&mut *current, &mut writer);
        writer
    }
}

fn next_deferred(sink: usize) -> Option<String> {
    ACTIVE
        .try_with(|active| {
            let mut active = active.borrow_mut();
            let current = active.iter_mut().find(|write| write.sink == sink)?;
            (!current.deferred.is_empty()).then(|| current.deferred.remove(0))
        })
        .ok()
        .flatten()
}

/// Unregisters an active write, even when the writer panics.
struct ActiveGuard(usize);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        let _ = ACTIVE.try_with(|active| {
            active.borrow_mut().retain(|write| write.sink != self.0);
        });
    }
}

impl fmt::Debug for LineSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSink").finish_non_exhaustive()
    }
}

/// Cloneable in-memory writer.
///
/// Every clone appends to the same buffer, which makes it convenient to hand
/// one clone to a [`Logger`](crate::Logger) and inspect the output through
/// another.
///
/// ```
/// use logging::{Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder().writer(buffer.clone()).build();
/// logger.error(format_args!("failed: {}", 42));
/// assert_eq!(buffer.contents_lossy(), "hw: failed: 42\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Copies the bytes written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the bytes written so far as text, replacing invalid UTF-8.
    #[must_use]
    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<u8> {
        mem::take(&mut *self.lock())
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
