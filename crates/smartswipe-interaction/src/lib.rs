//! HTTP adapters for the remote SmartSwipe collaborators.
//!
//! Every adapter translates transport failures into the core error taxonomy
//! at this boundary; nothing above sees a `reqwest` type.

pub mod client;
pub mod decision_recorder;
pub mod dto;
pub mod item_source;
pub mod synthesis_service;

pub use client::ApiClient;
pub use decision_recorder::HttpDecisionRecorder;
pub use item_source::HttpItemSource;
pub use synthesis_service::HttpSynthesisService;
