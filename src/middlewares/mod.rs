pub mod access_gate;

pub use access_gate::{AccessDecision, AccessGate, LOGIN_PATH, evaluate};
