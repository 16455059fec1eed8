//! # Rejection Core Library
//!
//! This library provides the state behind the rejection therapy tracker: a
//! fixed catalog of challenges to attempt, a list of rejections the user has
//! logged, and the form draft a new rejection is staged in. Presentation
//! layers (the bundled CLI, or any other front end) hold a store and
//! re-render after each call.
//!
//! ## Architecture
//!
//! - **Challenges**: ten seeded challenges with a completion flag and a
//!   rounded completion percentage
//! - **Rejections**: user submissions, newest first, deletable by id
//! - **Draft**: field-by-field staging with one shared validation rule
//! - **Storage**: TOML-based preferences (records are kept in memory only)
//!
//! ## Key Components
//!
//! - [`CatalogStore`]: owner of the challenge sequence
//! - [`UploadStore`]: owner of the rejection sequence
//! - [`Draft`] and [`DraftField`]: form staging
//! - [`Config`]: application configuration management

pub mod challenge;
pub mod difficulty;
pub mod draft;
pub mod error;
pub mod rejection;
pub mod storage;

pub use challenge::{completion_stats, initialize, toggle_completion, CatalogStore, ChallengeRecord, CompletionStats};
pub use difficulty::Difficulty;
pub use draft::{is_submittable, reset, update_field, validate, Draft, DraftField, FieldName, ValidationPolicy};
pub use error::{ConfigError, CoreError, ValidationError};
pub use rejection::{Clock, FixedClock, RejectionRecord, SystemClock, UploadStore};
pub use storage::Config;
