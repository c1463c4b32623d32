//! Error types and error handling for the front end.
//!
//! This module defines the fatal error type shared by the lexer, the
//! parser and the diagnostic sink. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each failure
//! - Error names and suggestions used when rendering

pub mod errors;
