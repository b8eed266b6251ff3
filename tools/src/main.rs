use crate::args::*;
use crate::fancy::Fancy;
use crate::runner::SystemRunner;
use crate::workflow::{CheckReport, Outcome};
use aurbump_common::config::ConfigFile;
use aurbump_common::errors::*;
use clap::Parser;
use env_logger::Env;
use serde::Serialize;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;

pub mod args;
pub mod decompress;
pub mod fancy;
pub mod index;
pub mod repo;
pub mod runner;
pub mod template;
pub mod workflow;

fn print_json<S: Serialize>(x: &S) -> Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, &x)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn checkout_path(config: &ConfigFile, arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| config.repo.checkout().to_path_buf())
}

fn update(config: &ConfigFile, args: Update) -> Result<()> {
    let checkout = checkout_path(config, args.checkout);
    let mut runner = SystemRunner;

    if args.dry_run {
        debug!("Dry run, using checkout in {:?} as is", checkout);
    } else {
        repo::prepare(&mut runner, &config.repo, &checkout)
            .context("Failed to prepare AUR checkout")?;
    }

    let latest = index::latest(&config.index).context("Failed to get latest version")?;

    let mut ctx = workflow::Context {
        runner: &mut runner,
        checkout: &checkout,
        allow: config.policy.allow(),
        force: args.force,
        dry_run: args.dry_run,
        push: config.repo.push() && !args.no_push,
    };
    let outcome = workflow::update(&mut ctx, &latest)?;

    if let Outcome::Planned { pkgbuild, .. } = &outcome {
        println!("{}", pkgbuild);
    }
    eprintln!("{}", outcome.fancy());

    Ok(())
}

fn check(config: &ConfigFile, args: Check) -> Result<()> {
    let checkout = checkout_path(config, args.checkout);

    if args.fetch {
        repo::prepare(&mut SystemRunner, &config.repo, &checkout)
            .context("Failed to prepare AUR checkout")?;
    }

    let current = workflow::current_version(&checkout)?;
    let latest = index::latest(&config.index).context("Failed to get latest version")?;
    let report = CheckReport::new(&current, &latest);

    if args.json {
        print_json(&report)?;
    } else {
        println!("{}", report.fancy());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let logging = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::init_from_env(Env::default().default_filter_or(logging));

    if args.color {
        debug!("Bypass tty detection and always use colors");
        colored::control::set_override(true);
    }

    let config = aurbump_common::config::load(args.config.as_ref())
        .context("Failed to load config file")?;

    match args.subcommand {
        SubCommand::Update(update_args) => update(&config, update_args)?,
        SubCommand::Check(check_args) => check(&config, check_args)?,
        SubCommand::Render(render) => {
            println!("{}", template::nordvpn_bin(&render.version));
        }
        SubCommand::CheckConfig => {
            let buf = toml::to_string_pretty(&config)?;
            print!("{}", buf);
        }
        SubCommand::Completions(completions) => args::gen_completions(&completions)?,
    }

    Ok(())
}
