use crate::runner::Runner;
use aurbump_common::config::RepoConfig;
use aurbump_common::errors::*;
use std::fs;
use std::path::Path;

/// Clone the AUR repository, or reset an existing checkout to the remote branch.
pub fn prepare<R: Runner>(runner: &mut R, config: &RepoConfig, checkout: &Path) -> Result<()> {
    if checkout.exists() {
        info!("Updating existing checkout in {:?}", checkout);
        let remote = format!("origin/{}", config.branch());
        runner.run(checkout, "git", &["fetch", "origin"])?;
        runner.run(checkout, "git", &["reset", "--hard", &remote])?;
    } else {
        let name = checkout
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| format_err!("Invalid checkout path: {:?}", checkout))?;
        let parent = match checkout.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| anyhow!("Failed to create directory {:?}", parent))?;

        info!("Cloning {} into {:?}", config.url(), checkout);
        runner.run(
            parent,
            "git",
            &[
                "clone",
                "--depth",
                "1",
                "--branch",
                config.branch(),
                config.url(),
                name,
            ],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::fake::RecordingRunner;

    #[test]
    fn test_existing_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();
        prepare(&mut runner, &RepoConfig::default(), dir.path()).unwrap();
        assert_eq!(
            runner.calls,
            vec!["git fetch origin", "git reset --hard origin/master"]
        );
    }

    #[test]
    fn test_fresh_clone() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = dir.path().join("aur").join("nordvpn-bin");
        let config = RepoConfig {
            branch: Some("main".to_string()),
            ..Default::default()
        };

        let mut runner = RecordingRunner::new();
        prepare(&mut runner, &config, &checkout).unwrap();
        assert_eq!(
            runner.calls,
            vec!["git clone --depth 1 --branch main ssh://aur@aur.archlinux.org/nordvpn-bin.git nordvpn-bin"]
        );
        assert!(dir.path().join("aur").is_dir());
    }

    #[test]
    fn test_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::failing_on("git fetch origin");
        assert!(prepare(&mut runner, &RepoConfig::default(), dir.path()).is_err());
        assert_eq!(runner.calls, vec!["git fetch origin"]);
    }
}
