//! Kingdom CLI
//!
//! Text presentation of a kingdom session: views, the JSONL event log and the
//! non-interactive session driver used by the `kingdom` binary.

pub mod logger;
pub mod session;
pub mod view;

pub use logger::EventLogger;
pub use session::{resolve_config, run_session, SessionError, SessionOptions};
pub use view::{CreationsView, GameView, InventoryView, MapView};
