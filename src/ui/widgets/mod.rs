// src/ui/widgets/mod.rs

// Module declarations for all UI widgets.

pub mod exit_popup; // Warning shown when quitting with downloads in flight.
pub mod footer;     // Key hints, depending on the app state.
pub mod header;     // Title line.
pub mod input;      // The link input field.
pub mod log_view;   // Colored status messages.
