use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use fluent_rewriter::extensions::{method_renamer, using_normalizer};
use fluent_rewriter::logging::init_logger;
use fluent_rewriter::syntax::{format, to_full_string};
use fluent_rewriter::{FormatOptions, IndentStyle, Pass, Pipeline, Rewriter, SyntaxNode};

/// syntax-rewrite: apply configured rewrites to a JSON-serialized syntax tree
#[derive(Parser, Debug)]
#[command(name = "syntax-rewrite")]
#[command(about = "Rewrite a JSON-serialized syntax tree and print the result", long_about = None)]
struct Cli {
    /// Input tree as JSON; `-` reads stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rename identifier tokens spelled OLD to NEW (repeatable)
    #[arg(long = "rename-token", value_name = "OLD=NEW", value_parser = parse_rename)]
    rename_tokens: Vec<(String, String)>,

    /// Rename method declarations named OLD to NEW (repeatable)
    #[arg(long = "rename-method", value_name = "OLD=NEW", value_parser = parse_rename)]
    rename_methods: Vec<(String, String)>,

    /// Sort and deduplicate using directives
    #[arg(long, default_value_t = false)]
    normalize_usings: bool,

    /// Output representation
    #[arg(long, value_enum, default_value_t = Emit::Formatted)]
    emit: Emit,

    /// Indentation for formatted output
    #[arg(long, value_enum, default_value_t = Indent::Spaces)]
    indent: Indent,

    /// Spaces per level when indenting with spaces
    #[arg(long, default_value_t = 4)]
    indent_width: usize,

    /// Line ending for formatted output
    #[arg(long, value_enum, default_value_t = Newline::Lf)]
    newline: Newline,

    /// Log level filter (otherwise RUST_LOG, then "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Also append debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable ANSI colors in log output
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Tokens and trivia exactly as in the tree
    Verbatim,
    /// Pretty-printed source
    Formatted,
    /// The rewritten tree as JSON
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Indent {
    Spaces,
    Tabs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Newline {
    Lf,
    Crlf,
}

fn parse_rename(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((old, new)) if !old.is_empty() && !new.is_empty() => Ok((old.to_string(), new.to_string())),
        _ => Err(format!("expected OLD=NEW, got `{}`", value)),
    }
}

impl Cli {
    fn format_options(&self) -> FormatOptions {
        let indent = match self.indent {
            Indent::Spaces => IndentStyle::Spaces(self.indent_width),
            Indent::Tabs => IndentStyle::Tabs,
        };
        let newline = match self.newline {
            Newline::Lf => "\n",
            Newline::Crlf => "\r\n",
        };
        FormatOptions::default().with_indent(indent).with_newline(newline)
    }

    fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        if !self.rename_tokens.is_empty() {
            let renames: HashMap<String, String> = self.rename_tokens.iter().cloned().collect();
            let rewriter = Rewriter::new().with_token(move |rewriter, token| match renames.get(&token.text) {
                Some(new) if token.is_identifier() => Ok(Some(Arc::new(token.with_text(new.as_str())))),
                _ => rewriter.walk_token(token),
            });
            pipeline.add_pass(Pass::new("rename-tokens", rewriter));
        }
        let mut previous: Option<String> = None;
        for (index, (old, new)) in self.rename_methods.iter().enumerate() {
            let id = format!("rename-method:{}:{}", index, old);
            let target = old.clone();
            let mut pass = Pass::new(id.clone(), method_renamer(move |m| m.identifier.text == target, new));
            if let Some(previous) = previous.take() {
                pass = pass.depends_on(previous);
            }
            pipeline.add_pass(pass);
            previous = Some(id);
        }
        if self.normalize_usings {
            pipeline.add_pass(Pass::new("normalize-usings", using_normalizer()));
        }
        pipeline
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn render(tree: &SyntaxNode, cli: &Cli) -> Result<String> {
    Ok(match cli.emit {
        Emit::Verbatim => to_full_string(tree),
        Emit::Formatted => format(tree, &cli.format_options()),
        Emit::Json => {
            let mut json = serde_json::to_string_pretty(tree).context("failed to serialize tree")?;
            json.push('\n');
            json
        }
    })
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, text).with_context(|| format!("failed to write {}", path.display())),
        None => io::stdout().write_all(text.as_bytes()).context("failed to write stdout"),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = read_input(&cli.input)?;
    let tree: Arc<SyntaxNode> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse syntax tree from {}", cli.input.display()))?;

    let pipeline = cli.pipeline();
    info!(passes = pipeline.len(), root = %tree.kind(), "Rewriting tree");
    let rewritten = pipeline.apply(&tree).context("rewrite failed")?;
    debug!(unchanged = Arc::ptr_eq(&tree, &rewritten), "Pipeline finished");

    let rendered = render(&rewritten, cli)?;
    write_output(cli.output.as_deref(), &rendered)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logger(cli.no_color, cli.log_level.as_deref(), cli.log_file.as_deref())
        .context("failed to initialise logging")?;
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["syntax-rewrite"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("-"));
        assert_eq!(cli.emit, Emit::Formatted);
        assert_eq!(cli.format_options(), FormatOptions::default());
        assert!(cli.pipeline().is_empty());
    }

    #[test]
    fn test_repeated_renames() {
        let cli = Cli::try_parse_from([
            "syntax-rewrite",
            "tree.json",
            "--rename-method",
            "Hello=Greet",
            "--rename-method",
            "Bye=Farewell",
            "--rename-token",
            "PLACEHOLDER=Value",
            "--normalize-usings",
        ])
        .unwrap();
        assert_eq!(cli.rename_methods, vec![("Hello".into(), "Greet".into()), ("Bye".into(), "Farewell".into())]);
        let pipeline = cli.pipeline();
        assert_eq!(
            pipeline.execution_order().unwrap(),
            vec!["rename-tokens", "rename-method:0:Hello", "rename-method:1:Bye", "normalize-usings"]
        );
    }

    #[test]
    fn test_same_method_renamed_twice_keeps_both_passes() {
        use fluent_rewriter::syntax::factory::{block, class_declaration, method_declaration, predefined_type};

        let cli = Cli::try_parse_from(["syntax-rewrite", "--rename-method", "A=B", "--rename-method", "A=C"]).unwrap();
        let pipeline = cli.pipeline();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.execution_order().unwrap(), vec!["rename-method:0:A", "rename-method:1:A"]);

        let method = method_declaration(&["public"], predefined_type("void"), "A", vec![], Some(block(vec![])));
        let tree = class_declaration(&["public"], "Program", vec![method]);
        let result = pipeline.apply(&tree).unwrap();
        assert!(format(&result, &FormatOptions::default()).contains("public void B()"));
    }

    #[test]
    fn test_malformed_rename_is_rejected() {
        assert!(Cli::try_parse_from(["syntax-rewrite", "--rename-token", "Hello"]).is_err());
        assert!(Cli::try_parse_from(["syntax-rewrite", "--rename-token", "=New"]).is_err());
    }

    #[test]
    fn test_format_options_from_flags() {
        let cli = Cli::try_parse_from(["syntax-rewrite", "--indent", "tabs", "--newline", "crlf"]).unwrap();
        assert_eq!(cli.format_options(), FormatOptions::default().with_indent(IndentStyle::Tabs).with_newline("\r\n"));
        let narrow = Cli::try_parse_from(["syntax-rewrite", "--indent-width", "2"]).unwrap();
        assert_eq!(narrow.format_options().indent, IndentStyle::Spaces(2));
    }
}
