//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - AnswerSupplier: stage-1 forced-choice answers
//! - PickSupplier: stage-2 scenario picks
//! - AssessmentRepository: storage of completed assessments
//!
//! These traits keep the engine independent of where answers come from and
//! where results go.

pub mod assessment_repository;
pub mod supplier;

pub use assessment_repository::AssessmentRepository;
pub use supplier::{AnswerSupplier, PickSupplier};
