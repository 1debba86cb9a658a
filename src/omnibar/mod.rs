//! The omnibar: a single input line with a live suggestion popup.
//!
//! Split the same way the UI behaves: [`controller`] holds the pure
//! input/selection state machine, [`fetcher`] runs suggestion requests
//! on a background task, `render` lays the widgets out, and [`runtime`]
//! wires all three to the terminal.

pub mod controller;
pub mod fetcher;
pub(crate) mod render;
pub mod runtime;

pub use controller::{FetchTicket, InteractionSource, KeyOutcome, Omnibar};
pub use fetcher::{FetchOutcome, FetchRequest, FetchResponse, Fetcher};
pub use runtime::run;
