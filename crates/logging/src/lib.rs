#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the embeddable logging facility of the hardware-abstraction
//! library. Library code reports diagnostics at one of five severities
//! (error, warning, info, debug, spew); the host application decides how
//! verbose the output is, how each line is decorated, which prefix identifies
//! the library, and whether messages go to standard error or to a callback of
//! its own.
//!
//! # Design
//!
//! [`Logger`] owns all state: a verbosity threshold ([`LogLevel`]), timestamp
//! decorations ([`LogOptions`]), a domain prefix ([`LogDomain`]), and one
//! registered emitter. The built-in emitter filters by threshold, renders
//! `[date ][time ][domain]message\n` into a reusable buffer, and writes the
//! line with a single call. A custom [`LogCallback`] replaces it entirely and
//! receives every message unfiltered, together with the opaque
//! [`EmitContext`] registered alongside it.
//!
//! The free functions ([`set_level`], [`info`], ...) and the `log_*!` macros
//! drive a lazily created process-wide [`Logger`], which is what library code
//! normally uses. Independent instances built with [`Logger::builder`] are
//! handy in tests and for hosts that embed several libraries.
//!
//! # Invariants
//!
//! - The threshold is always one of the six defined levels and the option
//!   mask never carries bits outside [`LogOptions::ALL`]; invalid requests
//!   are rejected and leave state untouched.
//! - The domain never exceeds [`LogDomain::MAX_CHARS`] characters.
//! - A callback and its context are always replaced together.
//! - Callbacks run without any logger lock held, so they may reconfigure the
//!   logger they are attached to.
//! - Lines are rendered with no lock held. Message arguments may log or
//!   reconfigure the logger; a writer that logs through its own logger has
//!   those lines written right after the current one.
//!
//! # Errors
//!
//! Setters return [`LogError`] for invalid arguments after reporting the
//! problem through the logger itself at error severity. Write failures of the
//! built-in emitter are ignored.
//!
//! # Examples
//!
//! ```
//! use logging::{LogLevel, LogOptions, Logger, SharedBuffer, log_info};
//!
//! let out = SharedBuffer::new();
//! let logger = Logger::builder().writer(out.clone()).build();
//!
//! logger.set_level(LogLevel::Info)?;
//! logger.set_domain("fx2: ")?;
//! log_info!(logger: logger, "found {} device(s)", 2);
//!
//! assert_eq!(out.contents_lossy(), "fx2: found 2 device(s)\n");
//! assert_eq!(logger.options(), LogOptions::NONE);
//! # Ok::<(), logging::LogError>(())
//! ```
//!
//! # See also
//!
//! - [`LogConfig`] for environment and serde based configuration.
//! - `tracing_bridge` (feature `tracing`) for interop with the `tracing`
//!   ecosystem.

mod callback;
mod clock;
mod config;
mod domain;
mod emitter;
mod error;
mod global;
mod level;
mod logger;
mod macros;
mod options;
mod sink;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use callback::{EmitContext, LogCallback, callback_fn};
pub use clock::{Clock, FixedClock, LocalOffsetError, SystemClock};
pub use config::{DOMAIN_ENV, LEVEL_ENV, LogConfig, OPTIONS_ENV};
pub use domain::{IntoDomain, LogDomain};
pub use error::{InvalidArgument, LogError};
pub use global::{
    debug, domain, error, info, level, log, logger, options, replace_writer, reset_callback,
    set_callback, set_domain, set_level, set_options, spew, warn,
};
pub use level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use options::LogOptions;
pub use sink::{BoxedWriter, SharedBuffer};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, TracingCallback, init_tracing, init_tracing_with_filter};
