pub mod eligibility;
pub mod entities;
pub mod requests;
