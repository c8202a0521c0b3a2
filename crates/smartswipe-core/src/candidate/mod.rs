//! Candidate domain module.
//!
//! - `model`: Candidate items and identifiers
//! - `domain`: Enumerated domain tags with presentation lookups
//! - `source`: Trait for the remote item source

mod domain;
mod model;
mod source;

pub use domain::{Domain, DomainPalette, GENERAL_DOMAIN};
pub use model::{CandidateId, CandidateItem};
pub use source::{ItemSource, SourceError};
