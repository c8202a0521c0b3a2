//! Storage and configuration implementations for the SmartSwipe engine.

pub mod config_service;
pub mod file_funnel_store;
pub mod memory_funnel_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_funnel_store::FileFunnelStore;
pub use crate::memory_funnel_store::InMemoryFunnelStore;
pub use crate::paths::{PathError, SmartSwipePaths};
