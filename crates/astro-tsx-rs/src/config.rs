//! Run configuration.

use crate::cli::{Args, OutputFormat};
use crate::error::CliError;
use astro_tsx::{ShorthandPolicy, TsxOptions};
use camino::{Utf8Path, Utf8PathBuf};

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Source files in the order given.
    pub files: Vec<Utf8PathBuf>,
    /// Suffix that turns a source path into its AST path.
    pub ast_suffix: String,
    /// Output format.
    pub output: OutputFormat,
    /// Shorthand handling passed to the printer.
    pub shorthand_policy: ShorthandPolicy,
}

impl RunConfig {
    /// Builds the configuration from parsed arguments.
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        if args.ast_suffix.is_empty() {
            return Err(CliError::EmptyAstSuffix);
        }

        let shorthand_policy = if args.skip_comment_shorthand {
            ShorthandPolicy::SkipAttribute
        } else {
            ShorthandPolicy::AbortElement
        };

        Ok(Self {
            files: args.files.clone(),
            ast_suffix: args.ast_suffix.clone(),
            output: args.output,
            shorthand_policy,
        })
    }

    /// Path of the JSON AST for `source`.
    pub fn ast_path(&self, source: &Utf8Path) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{source}{}", self.ast_suffix))
    }

    /// Printer options for `source`.
    pub fn tsx_options(&self, source: &Utf8Path) -> TsxOptions {
        TsxOptions {
            filename: Some(source.to_string()),
            shorthand_policy: self.shorthand_policy,
        }
    }
}
