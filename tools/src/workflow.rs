use crate::runner::Runner;
use crate::template;
use aurbump_common::config::Bump;
use aurbump_common::errors::*;
use aurbump_common::errors::Context as _;
use aurbump_common::pkgbuild;
use aurbump_common::Version;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const PKGBUILD: &str = "PKGBUILD";
pub const SRCINFO: &str = ".SRCINFO";

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Command {command:?} failed with {}", exit_code(.code))]
    ToolFailure { command: String, code: Option<i32> },
    #[error("Refusing to automatically publish the update from {from} to {to}, only {allow} updates are allowed (review and push manually)")]
    PolicyRefusal {
        from: Version,
        to: Version,
        allow: Bump,
    },
}

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "signal".to_string(),
    }
}

pub struct Context<'a, R: Runner> {
    pub runner: &'a mut R,
    pub checkout: &'a Path,
    pub allow: Bump,
    pub force: bool,
    pub dry_run: bool,
    pub push: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    UpToDate {
        current: Version,
    },
    Planned {
        from: Version,
        to: Version,
        pkgbuild: String,
    },
    Updated {
        from: Version,
        to: Version,
        pushed: bool,
    },
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub current: String,
    pub latest: String,
    pub update_available: bool,
}

impl CheckReport {
    pub fn new(current: &Version, latest: &Version) -> CheckReport {
        CheckReport {
            current: current.to_upstream(),
            latest: latest.to_upstream(),
            update_available: latest > current,
        }
    }
}

pub fn current_version(checkout: &Path) -> Result<Version> {
    let path = checkout.join(PKGBUILD);
    let text = fs::read_to_string(&path).with_context(|| anyhow!("Failed to read {:?}", path))?;
    pkgbuild::read_pkgver(&text)
}

/// Make sure the change from `from` to `to` may be published unattended.
pub fn check_policy(allow: Bump, from: &Version, to: &Version) -> Result<(), UpdateError> {
    let allowed = match allow {
        Bump::Patch => from.is_same_minor(to),
        Bump::Minor => from.is_same_major(to),
        Bump::Major => true,
    };

    if allowed {
        Ok(())
    } else {
        Err(UpdateError::PolicyRefusal {
            from: *from,
            to: *to,
            allow,
        })
    }
}

pub fn update<R: Runner>(ctx: &mut Context<R>, latest: &Version) -> Result<Outcome> {
    let current = current_version(ctx.checkout)?;
    info!("Current version: {}, latest version: {}", current, latest);

    if !ctx.force {
        if *latest == current {
            info!("Current version is the latest version, no update necessary");
            return Ok(Outcome::UpToDate { current });
        }
        if *latest < current {
            warn!(
                "Index offers {} which is older than the current {}, not downgrading",
                latest, current
            );
            return Ok(Outcome::UpToDate { current });
        }
    } else if *latest == current {
        info!("Forcing regeneration of {}", current);
    }

    let pkgbuild = template::nordvpn_bin(latest).render();
    if ctx.dry_run {
        return Ok(Outcome::Planned {
            from: current,
            to: *latest,
            pkgbuild,
        });
    }

    let path = ctx.checkout.join(PKGBUILD);
    debug!("Writing {:?}", path);
    fs::write(&path, &pkgbuild).with_context(|| anyhow!("Failed to write {:?}", path))?;

    let checkout = ctx.checkout;
    let runner = &mut *ctx.runner;
    runner.run(checkout, "updpkgsums", &[])?;
    runner.run(checkout, "makepkg", &["-f"])?;

    let srcinfo = runner.capture(checkout, "makepkg", &["--printsrcinfo"])?;
    let path = checkout.join(SRCINFO);
    fs::write(&path, srcinfo).with_context(|| anyhow!("Failed to write {:?}", path))?;

    runner.run(checkout, "git", &["add", SRCINFO, PKGBUILD])?;
    let msg = format!("Update to {}", latest.to_upstream());
    runner.run(checkout, "git", &["commit", "-m", &msg])?;

    info!(
        "Updating from {} to {}",
        current.to_upstream(),
        latest.to_upstream()
    );

    check_policy(ctx.allow, &current, latest)?;

    if ctx.push {
        runner.run(checkout, "git", &["push"])?;
    } else {
        info!("Publishing is disabled, skipping git push");
    }

    Ok(Outcome::Updated {
        from: current,
        to: *latest,
        pushed: ctx.push,
    })
}
