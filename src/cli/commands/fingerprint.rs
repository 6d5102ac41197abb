use clap::{Arg, ArgMatches, Command};

pub const ARG_DECODE: &str = "decode";

#[must_use]
pub fn decode(matches: &ArgMatches) -> Option<String> {
    matches
        .get_one::<String>(ARG_DECODE)
        .cloned()
        .filter(|v| !v.trim().is_empty())
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new("fingerprint")
        .about("Print this device's snapshot and encoded fingerprint")
        .arg(
            Arg::new(ARG_DECODE)
                .long(ARG_DECODE)
                .value_name("FINGERPRINT")
                .help("Decode an encoded fingerprint instead of collecting one"),
        )
}
