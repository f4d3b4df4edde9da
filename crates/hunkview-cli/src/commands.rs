use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use hunkview_diff::SparseLines;
use hunkview_render::{render_text, DiffInfo, FileMeta};
use hunkview_script::{DiffConfig, PatchScript};

use crate::cli::*;

/// Stands for a side that does not exist (added or deleted file).
const NULL_PATH: &str = "/dev/null";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config),
        Command::Config => cmd_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DiffConfig> {
    match path {
        Some(path) => {
            DiffConfig::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(DiffConfig::default()),
    }
}

fn apply_overrides(mut config: DiffConfig, args: &DiffArgs) -> DiffConfig {
    if let Some(context) = args.context {
        config.context = context;
        config.full_file = false;
    }
    if args.full {
        config.full_file = true;
    }
    if args.no_intraline {
        config.intraline = false;
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    config
}

/// One side of the diff: its display name and text, or `None` if the
/// file does not exist on that side.
struct InputFile {
    name: String,
    text: Option<String>,
}

impl InputFile {
    fn read(path: &Path) -> anyhow::Result<Self> {
        let name = path.display().to_string();
        if path == Path::new(NULL_PATH) {
            return Ok(Self { name, text: None });
        }
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {name}"))?;
        Ok(Self { name, text: Some(text) })
    }

    fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

fn cmd_diff(args: DiffArgs, config: DiffConfig) -> anyhow::Result<()> {
    let old = InputFile::read(&args.old)?;
    let new = InputFile::read(&args.new)?;
    let config = apply_overrides(config, &args);
    tracing::debug!(?config, "diff configuration");

    let out = render(&old, &new, &config, &args)?;
    print!("{out}");
    Ok(())
}

fn render(
    old: &InputFile,
    new: &InputFile,
    config: &DiffConfig,
    args: &DiffArgs,
) -> anyhow::Result<String> {
    let script = PatchScript::build(old.text(), new.text(), config)?;

    let result = match args.format {
        OutputFormat::Text => {
            render_text(&script.edits, &script.a, &script.b, args.color).map(|body| {
                let header = format!("--- {}\n+++ {}\n", old.name, new.name);
                let header = if args.color { header.bold().to_string() } else { header };
                format!("{header}{body}")
            })
        }
        OutputFormat::Json => {
            let meta = |side: &InputFile, lines: usize| {
                side.text.as_ref().map(|_| FileMeta::text(&side.name, lines))
            };
            DiffInfo::build(
                &script.edits,
                &script.a,
                &script.b,
                meta(old, script.a.size()),
                meta(new, script.b.size()),
            )
            .map(|info| if config.intraline { info } else { info.intraline_off() })
            .and_then(|info| info.to_json(args.pretty))
            .map(|json| json + "\n")
        }
    };

    match result {
        Ok(out) => Ok(out),
        Err(err) if err.is_fatal() => {
            tracing::error!(error = %err, "diff assembly failed");
            bail!("diff unavailable")
        }
        Err(err) => Err(anyhow::Error::from(err)),
    }
}

fn cmd_config(config: &DiffConfig) -> anyhow::Result<()> {
    print!("{}", toml::to_string(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn args(extra: &[&str]) -> DiffArgs {
        let mut argv = vec!["hunkview", "diff", "old", "new"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Diff(args) => args,
            Command::Config => unreachable!(),
        }
    }

    fn side(name: &str, text: &str) -> InputFile {
        InputFile {
            name: name.into(),
            text: Some(text.into()),
        }
    }

    #[test]
    fn overrides_replace_file_settings() {
        let config = DiffConfig {
            full_file: true,
            ..Default::default()
        };
        let flags = args(&["-U", "2", "--no-intraline", "--algorithm", "lcs"]);
        let config = apply_overrides(config, &flags);
        assert_eq!(config.context_window(), Some(2));
        assert!(!config.intraline);
        assert_eq!(config.algorithm, hunkview_script::DiffAlgorithm::Lcs);
    }

    #[test]
    fn text_output_has_header() {
        let out = render(
            &side("a.txt", "x\ny\n"),
            &side("b.txt", "x\nz\n"),
            &DiffConfig::default(),
            &args(&[]),
        )
        .unwrap();
        assert_eq!(out, "--- a.txt\n+++ b.txt\n x\n-y\n+z\n");
    }

    #[test]
    fn json_output_for_added_file() {
        let old = InputFile {
            name: NULL_PATH.into(),
            text: None,
        };
        let new = side("n.txt", "hello\n");
        let out = render(&old, &new, &DiffConfig::default(), &args(&["--format", "json"])).unwrap();
        assert!(out.contains("\"change_type\":\"ADDED\""));
        assert!(out.contains("\"b\":[\"hello\"]"));
        assert!(!out.contains("meta_a"));
    }

    #[test]
    fn reads_null_path_as_missing() {
        let side = InputFile::read(Path::new(NULL_PATH)).unwrap();
        assert!(side.text.is_none());
        assert_eq!(side.text(), "");
    }

    #[test]
    fn reads_file_and_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\nb\n").unwrap();
        let side = InputFile::read(file.path()).unwrap();
        assert_eq!(side.text(), "a\nb\n");

        let mut cfg = tempfile::NamedTempFile::new().unwrap();
        writeln!(cfg, "context = 1").unwrap();
        let config = load_config(Some(cfg.path())).unwrap();
        assert_eq!(config.context, 1);
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(InputFile::read(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn json_output_marks_intraline_off() {
        let config = apply_overrides(DiffConfig::default(), &args(&["--no-intraline"]));
        let json = args(&["--format", "json"]);
        let out = render(&side("a", "x\n"), &side("a", "y\n"), &config, &json).unwrap();
        assert!(out.contains("\"intraline_status\":\"OFF\""));

        let config = DiffConfig::default();
        let out = render(&side("a", "x\n"), &side("a", "y\n"), &config, &json).unwrap();
        assert!(out.contains("\"intraline_status\":\"OK\""));
    }

    #[test]
    fn line_ending_change_is_rendered() {
        let out = render(&side("a", "x\r\n"), &side("a", "x\n"), &DiffConfig::default(), &args(&[]))
            .unwrap();
        assert_eq!(out, "--- a\n+++ a\n-x\r\n+x\n");
    }
}
