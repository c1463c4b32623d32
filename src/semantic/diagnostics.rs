//! Semantic diagnostics and the process-wide sink they are reported to.

use log::debug;
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::symbol_table::SymbolKind;

/// A non-fatal problem found during name resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `kind` is what the repeated declaration would have bound.
    #[error("Error: {kind} '{name}' already declared.")]
    AlreadyDeclared { name: String, kind: SymbolKind },
    #[error("Error: Undeclared identifier '{name}'.")]
    UndeclaredIdentifier { name: String },
}

impl Diagnostic {
    pub fn get_name(&self) -> &str {
        match self {
            Diagnostic::AlreadyDeclared { name, .. } | Diagnostic::UndeclaredIdentifier { name } => {
                name.as_str()
            }
        }
    }
}

pub type DiagnosticSink = Box<dyn Fn(&str) + Send + Sync>;

static DIAGNOSTIC_SINK: OnceCell<DiagnosticSink> = OnceCell::new();

/// Installs the callback every diagnostic message is sent to.
///
/// Can be called once per process; later calls fail with
/// `ErrorImpl::SinkAlreadySet` and leave the first sink in place.
pub fn set_diagnostic_sink<F>(sink: F) -> Result<(), Error>
where
    F: Fn(&str) + Send + Sync + 'static,
{
    DIAGNOSTIC_SINK
        .set(Box::new(sink))
        .map_err(|_| Error::new(ErrorImpl::SinkAlreadySet, Position::null()))
}

pub fn has_diagnostic_sink() -> bool {
    DIAGNOSTIC_SINK.get().is_some()
}

/// Sends the formatted diagnostic to the sink, or to stderr when none is
/// installed.
pub fn report(diagnostic: &Diagnostic) {
    let message = diagnostic.to_string();
    debug!("reporting diagnostic: {}", message);

    match DIAGNOSTIC_SINK.get() {
        Some(sink) => sink(&message),
        None => eprintln!("{}", message),
    }
}
