//! 도메인 모델.

pub mod class_score;
pub mod macro_event;
pub mod snapshot;
pub mod status;

pub use class_score::*;
pub use macro_event::*;
pub use snapshot::*;
pub use status::*;
