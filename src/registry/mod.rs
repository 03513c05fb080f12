//! Registry Module
//!
//! Ownership-gated record registry: the single-threaded core, its shared
//! concurrent front end and the events it publishes.

pub mod events;
pub mod record;
pub mod shared;
pub mod state;

pub use events::*;
pub use record::*;
pub use shared::*;
pub use state::*;
