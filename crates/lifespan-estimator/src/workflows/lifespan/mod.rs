//! Lifespan questionnaire: answer capture, the calculation gate, additive scoring,
//! and the presentation layer built on top of a scored estimate.

pub mod answers;
pub mod assistant;
pub mod domain;
pub mod report;
pub mod router;
pub mod scoring;
pub mod validation;
pub mod wizard;

pub use answers::{AnswerSet, FieldError};
pub use assistant::{ChatMode, FaqResponder, HealthAssistant};
pub use domain::{Collection, EstimationMode, Field, Gender, Selection, UnknownChoice, WizardSection};
pub use report::{AnswerSheet, ExportError, ExportFormat, LifespanReport, Precaution};
pub use router::{lifespan_router, LifespanState};
pub use scoring::{LifespanEngine, LifespanResult, Outlook, ScoringConfig};
pub use validation::{ValidationError, ValidationIssue, ValidationPolicy, ValidationReport};
pub use wizard::{Estimate, Questionnaire, SectionProgress};
