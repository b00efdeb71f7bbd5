//! Per-file pipeline: read, load the AST, print, collect.

use crate::config::RunConfig;
use crate::error::CliError;
use crate::output::{Formatter, PrintedFile};
use astro_ast::from_json;
use astro_tsx::print_to_tsx;
use camino::Utf8Path;
use rayon::prelude::*;
use std::fs;
use std::io::Write;

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files printed successfully.
    pub printed: usize,
    /// Files that could not be printed.
    pub failed: usize,
}

/// Prints every configured file and writes the results to `out`.
///
/// Files are processed in parallel and written in input order. A file that
/// fails is logged at error level and skipped; the others are still written.
pub fn run(config: &RunConfig, out: &mut impl Write) -> Result<RunSummary, CliError> {
    let results: Vec<Result<PrintedFile, CliError>> = config
        .files
        .par_iter()
        .map(|path| print_file(config, path))
        .collect();

    let mut printed = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result {
            Ok(file) => printed.push(file),
            Err(err) => {
                failed += 1;
                tracing::error!("{:?}", miette::Report::new(err));
            }
        }
    }

    Formatter::new(config.output).write(&printed, out)?;
    out.flush()?;

    tracing::info!(printed = printed.len(), failed, "done");
    Ok(RunSummary {
        printed: printed.len(),
        failed,
    })
}

fn print_file(config: &RunConfig, path: &Utf8Path) -> Result<PrintedFile, CliError> {
    let source = read(path)?;
    let ast_path = config.ast_path(path);
    let json = read(&ast_path)?;

    let tree = from_json(&json, &source).map_err(|error| CliError::Ast {
        path: ast_path.clone(),
        error,
    })?;
    let result = print_to_tsx(&source, tree.root(), &config.tsx_options(path));
    tracing::debug!(%path, bytes = result.code.len(), segments = result.chunk.len(), "printed");

    let file_name = path.file_name().unwrap_or(path.as_str());
    let map = result
        .chunk
        .to_source_map(&format!("{file_name}.tsx"), path.as_str(), Some(&source));

    Ok(PrintedFile {
        path: path.to_owned(),
        code: result.code,
        map,
    })
}

fn read(path: &Utf8Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|error| CliError::Read {
        path: path.to_owned(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use astro_tsx::ShorthandPolicy;
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "<p>{a}</p>";
    const AST: &str = r#"{"type": "root", "children": [
        {"type": "element", "name": "p", "attributes": [], "children": [
            {"type": "expression", "children": [
                {"type": "text", "value": "a", "position": {"start": {"line": 1, "column": 5, "offset": 4}}}
            ], "position": {"start": {"line": 1, "column": 4, "offset": 3}, "end": {"line": 1, "column": 7, "offset": 6}}}
        ], "position": {"start": {"line": 1, "column": 1, "offset": 0}, "end": {"line": 1, "column": 11, "offset": 10}}}
    ]}"#;

    fn write(dir: &Utf8Path, name: &str, contents: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn config(files: Vec<Utf8PathBuf>, output: OutputFormat) -> RunConfig {
        RunConfig {
            files,
            ast_suffix: ".json".to_string(),
            output,
            shorthand_policy: ShorthandPolicy::AbortElement,
        }
    }

    #[test]
    fn test_prints_file_with_ast() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        let source = write(dir, "card.astro", SOURCE);
        write(dir, "card.astro.json", AST);

        let mut out = Vec::new();
        let summary = run(&config(vec![source], OutputFormat::Tsx), &mut out).unwrap();
        assert_eq!(summary, RunSummary { printed: 1, failed: 0 });

        let code = String::from_utf8(out).unwrap();
        assert_eq!(
            code,
            "<Fragment>\n<p>{a}</p>\n</Fragment>\n\n\
             export default function Card__AstroComponent_(_props: Record<string, any>): any {}\n"
        );
    }

    #[test]
    fn test_missing_ast_is_counted() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        let good = write(dir, "good.astro", SOURCE);
        write(dir, "good.astro.json", AST);
        let bad = write(dir, "bad.astro", SOURCE);

        let mut out = Vec::new();
        let summary = run(&config(vec![bad, good], OutputFormat::Json), &mut out).unwrap();
        assert_eq!(summary, RunSummary { printed: 1, failed: 1 });

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["map"]["file"], "good.astro.tsx");
        assert_eq!(value[0]["map"]["sourcesContent"][0], SOURCE);
    }

    #[test]
    fn test_ast_error_names_the_ast_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(tmp.path()).unwrap();
        let source = write(dir, "x.astro", "hi");
        write(dir, "x.astro.json", r#"{"type": "text", "value": "hi"}"#);

        let config = config(vec![source.clone()], OutputFormat::Tsx);
        let err = print_file(&config, &source).unwrap_err();
        match err {
            CliError::Ast { path, .. } => assert_eq!(path, dir.join("x.astro.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
