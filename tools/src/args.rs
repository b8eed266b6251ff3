use aurbump_common::errors::*;
use aurbump_common::Version;
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Verbose logging
    #[arg(short, long, global = true, action(ArgAction::Count))]
    pub verbose: u8,
    /// Configuration file path
    #[arg(short, long, env = "AURBUMP_CONFIG")]
    pub config: Option<PathBuf>,
    /// Bypass tty detection and always use colors
    #[arg(short = 'C', long, global = true)]
    pub color: bool,
    #[command(subcommand)]
    pub subcommand: SubCommand,
}

#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Regenerate, build, commit and push the PKGBUILD if upstream has a new version
    Update(Update),
    /// Compare the current PKGBUILD with the package index
    Check(Check),
    /// Print the PKGBUILD that would be generated for a version
    Render(Render),
    /// Load and print the config
    CheckConfig,
    /// Generate shell completions
    Completions(Completions),
}

#[derive(Debug, Parser)]
pub struct Update {
    /// Regenerate and publish even if the version didn't change
    #[arg(long)]
    pub force: bool,
    /// Print the new PKGBUILD instead of writing it, no git or makepkg invocations
    #[arg(long)]
    pub dry_run: bool,
    /// Commit locally but don't push
    #[arg(long)]
    pub no_push: bool,
    /// Path of the AUR repository checkout
    #[arg(long)]
    pub checkout: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct Check {
    /// Print the result as json
    #[arg(long)]
    pub json: bool,
    /// Fetch and reset the checkout before reading the PKGBUILD
    #[arg(long)]
    pub fetch: bool,
    /// Path of the AUR repository checkout
    #[arg(long)]
    pub checkout: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct Render {
    /// Upstream version, eg. 3.7.0-3
    pub version: Version,
}

#[derive(Debug, Parser)]
pub struct Completions {
    pub shell: Shell,
}

pub fn gen_completions(args: &Completions) -> Result<()> {
    clap_complete::generate(args.shell, &mut Args::command(), "aurbump", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_update() {
        let args = Args::try_parse_from(["aurbump", "-vv", "update", "--force", "--no-push"]).unwrap();
        assert_eq!(args.verbose, 2);
        match args.subcommand {
            SubCommand::Update(update) => {
                assert!(update.force);
                assert!(update.no_push);
                assert!(!update.dry_run);
                assert_eq!(update.checkout, None);
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_parse_render_version() {
        let args = Args::try_parse_from(["aurbump", "render", "3.7.0-3"]).unwrap();
        match args.subcommand {
            SubCommand::Render(render) => assert_eq!(render.version.to_pkgver(), "3.7.0_3"),
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_parse_render_invalid_version() {
        assert!(Args::try_parse_from(["aurbump", "render", "latest"]).is_err());
    }
}
