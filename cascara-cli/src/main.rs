//! Cascara CLI
//!
//! Dumps the structural event stream of a CSS2 stylesheet, one event per line.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use cascara_common::warning::set_quiet;
use cascara_css::{CssParser, EventKind, ParseEvent, render_expression};
use clap::Parser;
use owo_colors::OwoColorize;

/// Cascara: print the events fired while parsing a CSS2 stylesheet
#[derive(Parser, Debug)]
#[command(name = "cascara")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Dump every event of a stylesheet
    cascara style.css

    # Parse inline CSS
    cascara --css 'a { color: red }'

    # Only rules and declarations, as JSON lines
    cascara --json --only startrule --only property style.css
"#)]
struct Cli {
    /// Path to the stylesheet to parse
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse CSS text directly instead of a file
    #[arg(long, value_name = "CSS", conflicts_with = "path")]
    css: Option<String>,

    /// Print one JSON object per event
    #[arg(long)]
    json: bool,

    /// Only print events of this kind (repeatable), e.g. `property`
    #[arg(long, value_name = "KIND")]
    only: Vec<EventKind>,

    /// Suppress tokenizer warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    let (source, css) = match (&cli.css, &cli.path) {
        (Some(css), _) => ("<inline>".to_string(), css.clone()),
        (None, Some(path)) => {
            let css = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), css)
        }
        (None, None) => bail!("no input: pass a FILE or --css TEXT (see --help)"),
    };

    let mut output_error = None;
    let mut parser = CssParser::new();
    parser.on_any(|event| {
        if output_error.is_some() || !(cli.only.is_empty() || cli.only.contains(&event.kind())) {
            return;
        }
        if cli.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(err) => output_error = Some(err),
            }
        } else {
            print_event(event);
        }
    });

    let result = parser.parse(&css);
    drop(parser);

    if let Some(err) = output_error {
        return Err(err).context("failed to serialize event");
    }
    result.with_context(|| format!("failed to parse {source}"))
}

fn print_event(event: &ParseEvent) {
    let name = event.kind().to_string();
    let detail = describe(event);
    match event {
        ParseEvent::StartStylesheet | ParseEvent::EndStylesheet => {
            println!("{}", name.dimmed());
        }
        ParseEvent::Property { .. } => println!("  {} {detail}", name.cyan()),
        _ => println!("{} {detail}", name.green().bold()),
    }
}

/// One-line rendering of an event payload.
fn describe(event: &ParseEvent) -> String {
    match event {
        ParseEvent::StartStylesheet | ParseEvent::EndStylesheet => String::new(),
        ParseEvent::Charset { charset } => format!("{charset:?}"),
        ParseEvent::Import { uri, media } => match media {
            Some(media) => format!("{uri:?} {media}"),
            None => format!("{uri:?}"),
        },
        ParseEvent::StartMedia { media } | ParseEvent::EndMedia { media } => media.to_string(),
        ParseEvent::StartPage { pseudo } | ParseEvent::EndPage { pseudo } => pseudo
            .as_ref()
            .map(|pseudo| format!(":{pseudo}"))
            .unwrap_or_default(),
        ParseEvent::StartRule { selectors } | ParseEvent::EndRule { selectors } => selectors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        ParseEvent::Property {
            property,
            value,
            important,
        } => {
            let priority = if *important { " !important" } else { "" };
            format!("{property}: {}{priority}", render_expression(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascara_css::parse_events;

    #[test]
    fn test_describe_property_and_rule() {
        let events = parse_events("ul > li, a { margin: 0 auto !important }").unwrap();
        assert_eq!(describe(&events[1]), "ul > li, a");
        assert_eq!(describe(&events[2]), "margin: 0 auto !important");
    }

    #[test]
    fn test_describe_at_rules() {
        let events =
            parse_events("@charset \"UTF-8\"; @import url(a.css) print; @page :first {}").unwrap();
        assert_eq!(describe(&events[1]), "\"UTF-8\"");
        assert_eq!(describe(&events[2]), "\"a.css\" print");
        assert_eq!(describe(&events[3]), ":first");
    }

    #[test]
    fn test_cli_parses_event_kinds() {
        let cli = Cli::parse_from(["cascara", "--css", "a{}", "--only", "startrule", "--only", "property"]);
        assert_eq!(cli.only, vec![EventKind::StartRule, EventKind::Property]);
        assert!(Cli::try_parse_from(["cascara", "--only", "nope"]).is_err());
    }
}
