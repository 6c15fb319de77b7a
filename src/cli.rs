// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for `--lang <VALUE>` or `--lang=<VALUE>`.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

fn build_cli(locale: &str) -> Command {
    Command::new("e2e-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("Suite.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("fail-fast")
                        .long("fail-fast")
                        .help(t!("arg_fail_fast", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("render")
                .about(t!("cmd_render_about", locale = locale).to_string())
                .arg(summary_arg(locale))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_render_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help(t!("arg_title", locale = locale).to_string())
                        .value_name("TITLE")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("show")
                .about(t!("cmd_show_about", locale = locale).to_string())
                .arg(summary_arg(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_init_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .default_value("Suite.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn summary_arg(locale: &str) -> Arg {
    Arg::new("summary")
        .short('s')
        .long("summary")
        .help(t!("arg_summary", locale = locale).to_string())
        .value_name("SUMMARY")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn path_arg(matches: &ArgMatches, id: &str) -> Option<PathBuf> {
    matches.get_one::<PathBuf>(id).cloned()
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let requested = pre_parse_language();
    let language = crate::resolve_locale(requested.as_deref());
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let config = path_arg(run_matches, "config").unwrap_or_else(|| PathBuf::from("Suite.toml"));
            let html = path_arg(run_matches, "html");
            let fail_fast = run_matches.get_flag("fail-fast");

            commands::run::execute(config, html, fail_fast, requested).await?;
        }
        Some(("render", render_matches)) => {
            let summary = path_arg(render_matches, "summary").unwrap_or_default();
            let output = path_arg(render_matches, "output");
            let title = render_matches.get_one::<String>("title").cloned();

            commands::render::execute(summary, output, title, &language)?;
        }
        Some(("show", show_matches)) => {
            let summary = path_arg(show_matches, "summary").unwrap_or_default();
            commands::show::execute(summary, &language)?;
        }
        Some(("init", init_matches)) => {
            let output = path_arg(init_matches, "output").unwrap_or_else(|| PathBuf::from("Suite.toml"));
            let force = init_matches.get_flag("force");

            // Show language detection message if it was auto-detected
            if requested.is_none() {
                println!(
                    "{}",
                    t!("system_language_detected", locale = &language, lang = &language).cyan()
                );
            }
            commands::init::execute(output, force, &language)?;
        }
        _ => {
            // Clap has already printed help for a missing subcommand.
        }
    }
    Ok(())
}
