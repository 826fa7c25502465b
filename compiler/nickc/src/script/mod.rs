//! Script interpretation.
//!
//! A script is a sequence of data read through a table with the alias
//! sentinel installed. Three list forms are directives, interpreted by the
//! driver as they are read:
//!
//! ```text
//! (defnamespace NAME (:export SYM...) (:intern SYM...))
//! (in-namespace NAME)
//! (aliases (TARGET ALIAS)...)
//! ```
//!
//! Directive keywords are compared after case folding, so they follow the
//! active case policy like every other symbol. Any other datum is handed to
//! the caller in its displayed form.

use std::sync::Arc;

use nick_alias::{
    install_sentinel_with, register_aliases, AliasErrorKind, AliasRegistry, AliasStore,
    ReaderConfig,
};
use nick_diagnostic::{Diagnostic, ErrorCode};
use nick_host::{Datum, HostError, NamespaceTable, ReadError, ReadTable, Reader};
use nick_ir::{Designator, NamespaceId, Span};
use tracing::debug;

/// A failure that stops a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("{source}")]
    Host {
        #[source]
        source: HostError,
        span: Span,
    },
    #[error("{kind}")]
    Aliases { kind: AliasErrorKind, span: Span },
    #[error("malformed `{directive}` directive: {message}")]
    Directive {
        directive: &'static str,
        message: String,
        span: Span,
    },
}

impl ScriptError {
    pub fn span(&self) -> Span {
        match self {
            ScriptError::Read(err) => err.span(),
            ScriptError::Host { span, .. }
            | ScriptError::Aliases { span, .. }
            | ScriptError::Directive { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScriptError::Read(err) => err.to_diagnostic(),
            ScriptError::Host { source, span } => source.to_diagnostic(*span),
            ScriptError::Aliases { kind, span } => Diagnostic::error(kind.code())
                .with_message(kind.to_string())
                .with_label(*span, "in this `aliases` directive"),
            ScriptError::Directive {
                directive, span, ..
            } => Diagnostic::error(ErrorCode::E0006)
                .with_message(self.to_string())
                .with_label(*span, "directive")
                .with_suggestion(usage(directive)),
        }
    }
}

fn usage(directive: &str) -> &'static str {
    match directive {
        DEFNAMESPACE => "write `(defnamespace NAME (:export SYM...) (:intern SYM...))`",
        IN_NAMESPACE => "write `(in-namespace NAME)`",
        _ => "write `(aliases (TARGET ALIAS)...)`",
    }
}

const DEFNAMESPACE: &str = "defnamespace";
const IN_NAMESPACE: &str = "in-namespace";
const ALIASES: &str = "aliases";

/// Host, alias registry and installed read table shared by every script
/// run in the session.
pub struct Session {
    host: NamespaceTable,
    registry: Arc<AliasRegistry>,
    table: ReadTable,
    config: ReaderConfig,
    namespace: NamespaceId,
}

impl Session {
    /// Name of the namespace a session starts in, before case folding.
    pub const DEFAULT_NAMESPACE: &'static str = "user";

    pub fn new(config: ReaderConfig) -> Result<Self, HostError> {
        let mut host = NamespaceTable::new();
        let namespace = host.create_namespace(&config.case.fold(Self::DEFAULT_NAMESPACE))?;
        let registry = AliasRegistry::shared();
        let mut table = ReadTable::standard();
        install_sentinel_with(&mut table, &config, Arc::clone(&registry) as Arc<dyn AliasStore>);
        Ok(Session {
            host,
            registry,
            table,
            config,
            namespace,
        })
    }

    pub fn host(&self) -> &NamespaceTable {
        &self.host
    }

    pub fn registry(&self) -> &Arc<AliasRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Namespace the next script starts in.
    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Read `source`, running directives and passing every other datum to
    /// `emit` in displayed form.
    ///
    /// The current namespace carries over to the next call, including when
    /// this one fails.
    pub fn run(&mut self, source: &str, mut emit: impl FnMut(String)) -> Result<(), ScriptError> {
        let registry = Arc::clone(&self.registry);
        let mut reader =
            Reader::new(&mut self.host, source, self.table.clone(), self.namespace);
        let result = loop {
            reader.skip_whitespace();
            if reader.stream().is_eof() {
                break Ok(());
            }
            let start = reader.stream().pos();
            let datum = match reader.read_form() {
                Ok(Some(datum)) => datum,
                Ok(None) => continue,
                Err(err) => break Err(err.into()),
            };
            let span = reader.stream().span_from(start);
            match execute(&mut reader, &registry, &datum, span) {
                Ok(true) => {}
                Ok(false) => emit(datum.display(reader.host()).to_string()),
                Err(err) => break Err(err),
            }
        };
        self.namespace = reader.namespace();
        result
    }
}

/// Run `datum` if it is a directive. Returns `false` for ordinary data.
fn execute(
    reader: &mut Reader<'_, '_>,
    registry: &AliasRegistry,
    datum: &Datum,
    span: Span,
) -> Result<bool, ScriptError> {
    let Some([head, args @ ..]) = datum.as_list() else {
        return Ok(false);
    };
    let Some(head) = head.as_symbol() else {
        return Ok(false);
    };
    let case = reader.table().case();
    let keyword = reader.host().symbol_name(head);
    let directive = [DEFNAMESPACE, IN_NAMESPACE, ALIASES]
        .into_iter()
        .find(|d| case.fold(d) == keyword);
    let malformed = |directive: &'static str, message: &str| ScriptError::Directive {
        directive,
        message: message.to_owned(),
        span,
    };

    match directive {
        Some(DEFNAMESPACE) => {
            let [name, clauses @ ..] = args else {
                return Err(malformed(DEFNAMESPACE, "expected a namespace name"));
            };
            let name = text(reader.host(), name)
                .ok_or_else(|| malformed(DEFNAMESPACE, "the name must be a symbol or string"))?;
            let export = case.fold(":export");
            let intern = case.fold(":intern");
            let mut exports = Vec::new();
            let mut internals = Vec::new();
            for clause in clauses {
                let Some([kind, symbols @ ..]) = clause.as_list() else {
                    return Err(malformed(DEFNAMESPACE, "each clause must be a list"));
                };
                let kind = text(reader.host(), kind).unwrap_or_default();
                let names = symbols
                    .iter()
                    .map(|s| text(reader.host(), s))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| {
                        malformed(DEFNAMESPACE, "clause entries must be symbols or strings")
                    })?;
                if kind == export {
                    exports.extend(names);
                } else if kind == intern {
                    internals.extend(names);
                } else {
                    return Err(malformed(DEFNAMESPACE, "clauses are `:export` or `:intern`"));
                }
            }
            let host = reader.host_mut();
            let namespace = host
                .create_namespace(&name)
                .map_err(|source| ScriptError::Host { source, span })?;
            for symbol in &exports {
                host.export(namespace, symbol);
            }
            for symbol in &internals {
                host.intern_symbol(namespace, symbol);
            }
            debug!(
                namespace = %name,
                exports = exports.len(),
                internals = internals.len(),
                "namespace defined"
            );
        }
        Some(IN_NAMESPACE) => {
            let [name] = args else {
                return Err(malformed(IN_NAMESPACE, "expected exactly one namespace name"));
            };
            let name = text(reader.host(), name)
                .ok_or_else(|| malformed(IN_NAMESPACE, "the name must be a symbol or string"))?;
            let namespace = reader
                .host()
                .require_namespace(&Designator::Name(name))
                .map_err(|source| ScriptError::Host { source, span })?;
            reader.set_namespace(namespace);
        }
        Some(_) => {
            let pairs = args
                .iter()
                .map(|pair| match pair.as_list() {
                    Some([target, alias]) => {
                        Some((text(reader.host(), target)?, text(reader.host(), alias)?))
                    }
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| malformed(ALIASES, "each entry must be a `(TARGET ALIAS)` pair"))?;
            register_aliases(registry, reader.namespace(), pairs, case)
                .map_err(|kind| ScriptError::Aliases { kind, span })?;
        }
        None => return Ok(false),
    }
    Ok(true)
}

/// The text a directive argument stands for: a symbol's name or a string.
fn text(host: &NamespaceTable, datum: &Datum) -> Option<String> {
    match datum {
        Datum::Symbol(sym) => Some(host.symbol_name(*sym).to_owned()),
        Datum::Str(text) => Some(text.clone()),
        Datum::List(_) | Datum::Quote(_) => None,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
