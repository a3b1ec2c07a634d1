//! playground: 流式界面生成演示的命令行工具
//!
//! Usage:
//!   playground demo                     Replay the recorded contact-form generation
//!   playground generate <prompt>        Stream a live generation and print the HTML
//!   playground render <file|->          Replay a recorded patch stream
//!   playground validate <file|->        Check a recorded stream against the catalog
//!   playground catalog [--kind <Tag>]   Print the component catalog schema

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use json_render_playground::catalog::{
    catalog_schema, ensure_valid, schema_for_kind, validate_tree, ComponentKind,
};
use json_render_playground::pipeline::replay_text;
use json_render_playground::session::{Mode, Phase};
use json_render_playground::{
    GenerationClient, Playground, PlaygroundConfig, PlaygroundHandle, PlaygroundSnapshot, Renderer,
    UiTree,
};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "playground")]
#[command(version)]
#[command(about = "Streaming JSON patch UI playground", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the scripted contact-form demo
    Demo {
        /// Skip typing and reveal delays
        #[arg(long)]
        fast: bool,

        /// Print the final tree as JSON instead of HTML
        #[arg(long)]
        tree: bool,
    },

    /// Send a prompt to the generation endpoint and render the streamed tree
    Generate {
        prompt: String,

        /// Override the configured endpoint
        #[arg(long)]
        endpoint: Option<String>,

        #[arg(long)]
        tree: bool,
    },

    /// Render a recorded patch stream (`-` for stdin)
    Render {
        input: String,

        #[arg(long)]
        tree: bool,

        /// Refuse to render a tree with catalog violations
        #[arg(long)]
        strict: bool,
    },

    /// Report catalog violations in a recorded patch stream
    Validate { input: String },

    /// Print the props schema of every component, or of one kind
    Catalog {
        #[arg(long)]
        kind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PlaygroundConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Demo { fast, tree } => {
            let config = if fast {
                PlaygroundConfig {
                    typing_delay_ms: 0,
                    step_delay_ms: 0,
                    ..config
                }
            } else {
                config
            };
            let (handle, task) = spawn_playground(config)?;
            handle.start_demo();
            // HTML goes out step by step; JSON only once at the end.
            let snap = follow_run(handle.clone(), !tree).await;
            finish(handle, task).await;
            if tree {
                print_tree(&snap.tree, true)?;
            }
        }
        Commands::Generate {
            prompt,
            endpoint,
            tree,
        } => {
            let prompt = live_prompt(&prompt)?;
            let mut config = config;
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
                config.validate()?;
            }
            let (handle, task) = spawn_playground(config)?;
            handle.submit(prompt);
            let snap = follow_run(handle.clone(), false).await;
            finish(handle, task).await;
            print_tree(&snap.tree, tree)?;
            if let Some(error) = &snap.error {
                bail!("generation failed: {}", error);
            }
        }
        Commands::Render {
            input,
            tree,
            strict,
        } => {
            let text = read_input(&input)?;
            let replayed = replay_text(&text);
            if strict {
                ensure_valid(&replayed)?;
            }
            print_tree(&replayed, tree)?;
        }
        Commands::Validate { input } => {
            let text = read_input(&input)?;
            let found = write_issues(&text, &mut std::io::stdout().lock())?;
            if found > 0 {
                std::process::exit(1);
            }
            println!("ok");
        }
        Commands::Catalog { kind } => {
            let schema = match kind {
                Some(tag) => match ComponentKind::from_tag(&tag) {
                    Some(kind) => schema_for_kind(kind),
                    None => bail!("unknown component type '{}'", tag),
                },
                None => catalog_schema().clone(),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}

fn spawn_playground(
    config: PlaygroundConfig,
) -> anyhow::Result<(PlaygroundHandle, tokio::task::JoinHandle<()>)> {
    let client = GenerationClient::new(&config)?;
    let playground = Playground::new(config, client);
    let handle = playground.handle();
    let task = tokio::spawn(playground.run());
    Ok((handle, task))
}

/// Wait for the first run to finish, stopping it on Ctrl-C.
///
/// Typing progress goes to stderr. With `print_steps`, the tree is rendered
/// to stdout after every applied patch.
async fn follow_run(mut handle: PlaygroundHandle, print_steps: bool) -> Arc<PlaygroundSnapshot> {
    let stopper = handle.clone();
    let renderer = Renderer::new();
    let mut applied = 0usize;
    let mut typed = 0usize;
    let mut prompt_done = false;
    loop {
        let snap = handle.snapshot();
        if snap.generation >= 1 {
            if snap.mode == Mode::Scripted {
                if snap.prompt.len() != typed {
                    typed = snap.prompt.len();
                    eprint!("\r> {}", snap.prompt);
                }
                if typed > 0 && !prompt_done && snap.phase != Phase::Typing {
                    prompt_done = true;
                    eprintln!();
                }
            }
            if snap.patches_applied != applied {
                applied = snap.patches_applied;
                info!(patches = applied, elements = snap.tree.len(), "tree updated");
                if print_steps {
                    println!("<!-- step {} -->", applied);
                    println!("{}", renderer.render_tree(&snap.tree));
                }
            }
            if snap.is_finished() {
                return snap;
            }
        }
        tokio::select! {
            changed = handle.changed() => {
                if changed.is_none() {
                    return handle.snapshot();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                let snap = handle.snapshot();
                if snap.generation == 0 {
                    // Nothing was started, so no snapshot will ever follow.
                    return snap;
                }
                warn!("interrupted; stopping run");
                stopper.stop();
            }
        }
    }
}

async fn finish(handle: PlaygroundHandle, task: tokio::task::JoinHandle<()>) {
    handle.shutdown();
    if let Err(e) = task.await {
        warn!(error = %e, "playground task ended abnormally");
    }
}

/// One line per catalog issue in the replayed stream. Returns the count.
fn write_issues(text: &str, out: &mut impl Write) -> anyhow::Result<usize> {
    let issues = validate_tree(&replay_text(text));
    for issue in &issues {
        writeln!(out, "{}", issue)?;
    }
    Ok(issues.len())
}

/// The prompt to send, or an error when there is nothing to send.
fn live_prompt(prompt: &str) -> anyhow::Result<String> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        bail!("prompt is empty");
    }
    Ok(trimmed.to_string())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input))
    }
}

fn print_tree(tree: &UiTree, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&tree.to_value())?);
    } else {
        println!("{}", Renderer::new().render_tree(tree));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_prompt_is_rejected() {
        assert!(live_prompt("").is_err());
        assert!(live_prompt(" \t\n ").is_err());
        assert_eq!(live_prompt("  a form  ").unwrap(), "a form");
    }

    #[test]
    fn test_issues_are_listed_once() {
        let text = concat!(
            r#"{"op":"set","path":"/root","value":"page"}"#,
            "\n",
            r#"{"op":"add","path":"/elements/page","value":{"key":"page","type":"Stack","children":["ghost"]}}"#,
            "\n",
        );
        let mut out = Vec::new();
        assert_eq!(write_issues(text, &mut out).unwrap(), 1);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 1);
        assert_eq!(printed.matches("ghost").count(), 1);

        let mut out = Vec::new();
        let clean = r#"{"op":"set","path":"/root","value":"x"}"#.to_string()
            + "\n"
            + r#"{"op":"add","path":"/elements/x","value":{"key":"x","type":"Divider"}}"#;
        assert_eq!(write_issues(&clean, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_follow_run_returns_once_run_finishes() {
        let config = PlaygroundConfig {
            typing_delay_ms: 0,
            step_delay_ms: 0,
            ..Default::default()
        };
        let (handle, task) = spawn_playground(config).unwrap();
        handle.start_demo();
        let snap = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            follow_run(handle.clone(), false),
        )
        .await
        .expect("follow_run did not return");
        assert!(snap.is_finished());
        finish(handle, task).await;
    }
}
