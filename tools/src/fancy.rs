use crate::workflow::{CheckReport, Outcome};
use colored::Colorize;

pub trait Fancy {
    fn fancy(&self) -> String;
}

impl Fancy for Outcome {
    fn fancy(&self) -> String {
        match self {
            Outcome::UpToDate { current } => format!(
                "{} ({})",
                "Current version is the latest version, no update necessary".green(),
                current
            ),
            Outcome::Planned { from, to, .. } => {
                format!("Would update from {} to {}", from, to).blue().to_string()
            }
            Outcome::Updated {
                from,
                to,
                pushed: true,
            } => format!("Updated from {} to {}", from, to).green().to_string(),
            Outcome::Updated {
                from,
                to,
                pushed: false,
            } => format!("Committed update from {} to {} (not pushed)", from, to)
                .yellow()
                .to_string(),
        }
    }
}

impl Fancy for CheckReport {
    fn fancy(&self) -> String {
        if self.update_available {
            format!(
                "{} {} -> {}",
                "Update available:".yellow(),
                self.current,
                self.latest.bold()
            )
        } else {
            format!("{} {}", "Up to date:".green(), self.current)
        }
    }
}
