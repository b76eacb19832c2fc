//! Request parsing and response building shared by the Lambda handlers

pub mod helpers;
pub mod parsing;
