//! Domain model: the validated submission record and its value objects.

mod email;
mod signature;
mod submission;

pub use email::{EmailAddress, EmailError};
pub use signature::{SignatureError, SignatureImage};
pub use submission::{FormError, Submission, SubmissionForm};
