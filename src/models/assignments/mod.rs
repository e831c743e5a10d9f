pub mod entities;
pub mod requests;
pub mod status;
