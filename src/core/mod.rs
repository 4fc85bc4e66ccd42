// src/core/mod.rs

// The `core` module holds everything that does not touch the terminal:
// data models, the error type, input validation, the resolver pipeline and
// the job that wires them together for the UI.

/// Transient values passed along the pipeline, such as `NetworkLogEntry`,
/// `FileReference` and the `StatusMessage`s shown to the user.
pub mod models;

/// The single error type every pipeline stage reports through.
pub mod error;

/// Validation of the link typed or pasted by the user.
pub mod input;

/// The link resolver: browser control, log scanning, fetching, extraction
/// and the OS download trigger.
pub mod resolver;

/// One end-to-end download attempt, reporting progress as status messages.
pub mod job;

/// Channel handle jobs use to push status messages to the UI.
pub mod reporter;
