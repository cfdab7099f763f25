#![forbid(unsafe_code)]

//! iform demo binary.
//!
//! Runs a survey in the alternate screen and prints the submitted answers to
//! stdout as pretty JSON.

mod app;
mod cli;
mod logging;
mod present;

use std::io;
use std::process;

use iform::FormSettings;

/// Sample survey used when no configuration is given.
const SAMPLE_SURVEY: &str = include_str!("../demos/survey.json");

fn main() {
    let opts = cli::Opts::parse();
    logging::init(opts.json_log);
    if let Err(err) = run(&opts) {
        tracing::warn!(error = %err, "demo failed");
        eprintln!("iform-demo: {err}");
        process::exit(1);
    }
}

fn run(opts: &cli::Opts) -> iform::Result<()> {
    let configs = match &opts.config {
        Some(path) => iform::load_config(path)?,
        None => iform::parse_config(SAMPLE_SURVEY)?,
    };
    let settings = match &opts.settings {
        Some(path) => iform::load_settings(path)?,
        None => FormSettings::default(),
    };
    tracing::info!(fields = configs.len(), variant = ?opts.variant, "starting");

    match app::run(opts, &configs, settings)? {
        Some(event) => {
            let json = serde_json::to_string_pretty(&event.answers).map_err(io::Error::from)?;
            println!("{json}");
        }
        None => eprintln!("Cancelled."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_surveys_parse() {
        let registry = iform::FieldRegistry::default();
        for doc in [
            SAMPLE_SURVEY,
            include_str!("../demos/quick.json"),
        ] {
            let configs = iform::parse_config(doc).expect("bundled config");
            registry.build_all(&configs).expect("bundled fields");
        }
        let settings = FormSettings::from_json(include_str!("../demos/fast.settings.json"))
            .expect("bundled settings");
        assert_eq!(settings.slide_ms, 150);
    }
}
