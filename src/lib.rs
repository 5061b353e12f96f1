//! Ideashelf - a spatial idea canvas core.
//!
//! Colored idea nodes on an infinite 2D canvas, grouped into books, with
//! rotating snapshots and a backup reminder. Drawing, storage, time and user
//! prompts are injected through traits; [`app::Ideashelf`] is the session
//! object that ties them together.

pub mod app;
pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod durability;
pub mod error;
pub mod input;
pub mod logging;
pub mod perf;
pub mod render;
pub mod spatial_index;
pub mod storage;
pub mod types;

pub use app::{ActionRequest, AppView, BookAction, Decision, Ideashelf, Prompter};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use error::{CoreError, CoreResult};
pub use storage::{JsonFileStore, MemoryStore, Store, StoreError};
pub use types::{Book, BookId, HexColor, Node, NodeId, ScreenPoint, WorldPoint};
