pub mod notify;
pub mod webutils;
