//! Maps validated CLI matches to an [`Action`].

use crate::cli::actions::{fingerprint, login, Action};
use crate::cli::commands::{self, device};
use anyhow::{anyhow, Context, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let device = device::Options::parse(matches)?;

    match matches.subcommand() {
        Some(("login", sub_m)) => {
            let options = commands::login::Options::parse(sub_m)
                .context("invalid login arguments")?;

            Ok(Action::Login(login::Args { device, options }))
        }
        Some(("fingerprint", sub_m)) => Ok(Action::Fingerprint(fingerprint::Args {
            device,
            decode: commands::fingerprint::decode(sub_m),
        })),
        _ => Err(anyhow!("missing subcommand")),
    }
}
