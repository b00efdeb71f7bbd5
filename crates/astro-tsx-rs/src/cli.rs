//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Print Astro components as TSX with source maps.
#[derive(Debug, Parser)]
#[command(name = "astro-tsx-rs")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Astro source files to print
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Suffix appended to each source path to find its JSON AST
    #[arg(long = "ast-suffix", default_value = ".json")]
    pub ast_suffix: String,

    /// Output format
    #[arg(long, value_enum, default_value = "tsx")]
    pub output: OutputFormat,

    /// Drop comment-only shorthand attributes instead of cutting the element short
    #[arg(long = "skip-comment-shorthand")]
    pub skip_comment_shorthand: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The generated TSX, one file after another (default)
    #[default]
    Tsx,
    /// A JSON array with code and a v3 source map per file
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["astro-tsx-rs", "src/pages/index.astro"]);
        assert_eq!(args.files, vec![Utf8PathBuf::from("src/pages/index.astro")]);
        assert_eq!(args.ast_suffix, ".json");
        assert_eq!(args.output, OutputFormat::Tsx);
        assert!(!args.skip_comment_shorthand);
        assert!(!args.verbose);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Args::try_parse_from(["astro-tsx-rs"]).is_err());
    }

    #[test]
    fn test_output_formats() {
        let args = Args::parse_from(["astro-tsx-rs", "--output", "json", "a.astro"]);
        assert_eq!(args.output, OutputFormat::Json);
        assert!(Args::try_parse_from(["astro-tsx-rs", "--output", "yaml", "a.astro"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["astro-tsx-rs", "-v", "-q", "a.astro"]).is_err());
    }

    #[test]
    fn test_multiple_files_and_suffix() {
        let args = Args::parse_from([
            "astro-tsx-rs",
            "--ast-suffix",
            ".ast.json",
            "--skip-comment-shorthand",
            "a.astro",
            "b.astro",
        ]);
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.ast_suffix, ".ast.json");
        assert!(args.skip_comment_shorthand);
    }
}
