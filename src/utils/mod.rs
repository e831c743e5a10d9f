pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod redirect;
pub mod validate;

pub use extractor::{SafeAssignmentId, SafeSubmissionId};
pub use parameter_error_handler::{form_error_handler, json_error_handler, query_error_handler};
pub use redirect::{see_other, see_other_with_cookie};
