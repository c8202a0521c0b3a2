//! SmartSwipe funnel engine core.
//!
//! Domain types and state machines for the swipe-and-funnel flow: candidate
//! items are swiped one at a time, accepted items are narrowed through
//! selection and ranking, and the ranked top three are combined with the
//! questionnaire answers into a final artifact.

pub mod candidate;
pub mod config;
pub mod error;
pub mod funnel;
pub mod gate;
pub mod gesture;
pub mod pool;
pub mod questionnaire;
pub mod selection;
pub mod session;
pub mod synthesis;

pub use error::{FunnelError, Result};
