//! CLI errors.

use astro_ast::TreeError;
use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors reported by the CLI.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// The AST suffix would make every source its own AST.
    #[error("the AST suffix must not be empty")]
    #[diagnostic(
        code(astro_tsx::config::ast_suffix),
        help("pass something like `--ast-suffix .json`")
    )]
    EmptyAstSuffix,

    /// A source or AST file could not be read.
    #[error("failed to read {path}")]
    #[diagnostic(code(astro_tsx::io::read))]
    Read {
        /// The file that failed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The AST file does not describe the source.
    #[error("invalid AST in {path}")]
    #[diagnostic(
        code(astro_tsx::ast),
        help("the AST must be the compiler's JSON output for the same source file")
    )]
    Ast {
        /// The AST file.
        path: Utf8PathBuf,
        /// What was wrong with it.
        #[source]
        error: TreeError,
    },

    /// Output could not be encoded.
    #[error("failed to encode JSON output")]
    #[diagnostic(code(astro_tsx::output::json))]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("failed to write output")]
    #[diagnostic(code(astro_tsx::output::write))]
    Write(#[from] std::io::Error),
}
