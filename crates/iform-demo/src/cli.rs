#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Environment variables with
//! the `IFORM_DEMO_*` prefix set defaults that explicit flags override.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
iform demo: answer a survey in the terminal

USAGE:
    iform-demo [OPTIONS] [CONFIG]

ARGS:
    CONFIG               Field configuration JSON (array or {\"questions\": [...]}).
                         Defaults to the bundled sample survey.

OPTIONS:
    --variant=NAME       'slide' (default) or 'stack'
    --settings=PATH      Timing overrides as JSON (e.g. {\"slideMs\": 150})
    --no-mouse           Disable mouse capture (no wheel or drag navigation)
    --json-log           Write IFORM_LOG as JSON lines instead of text
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Enter / Tab / Down   Save the answer and go to the next question
    Shift-Tab / Up       Go to the previous question
    PageUp / PageDown    Scroll freely
    Esc / Ctrl+C         Quit without submitting

ENVIRONMENT VARIABLES:
    IFORM_DEMO_CONFIG         Override CONFIG
    IFORM_DEMO_VARIANT        Override --variant
    IFORM_DEMO_SETTINGS       Override --settings
    IFORM_DEMO_EXIT_AFTER_MS  Auto-quit after N milliseconds (for testing)
    IFORM_LOG                 Write tracing output to this file
    RUST_LOG                  Tracing filter (default: debug)";

/// Which presentation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Slide,
    Stack,
}

impl Variant {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "slide" => Some(Self::Slide),
            "stack" => Some(Self::Stack),
            _ => None,
        }
    }
}

/// Parsed command-line options.
#[derive(Debug)]
pub struct Opts {
    /// Configuration file; `None` uses the bundled survey.
    pub config: Option<PathBuf>,
    pub variant: Variant,
    pub settings: Option<PathBuf>,
    pub mouse: bool,
    pub json_log: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            config: None,
            variant: Variant::Slide,
            settings: None,
            mouse: true,
            json_log: false,
            exit_after_ms: 0,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    pub fn parse() -> Self {
        let mut opts = Self::default();
        opts.apply_env(|name| env::var(name).ok());
        let args: Vec<String> = env::args().skip(1).collect();
        if let Err(message) = opts.apply_args(&args) {
            eprintln!("{message}");
            eprintln!("Run with --help for usage information.");
            process::exit(1);
        }
        opts
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("IFORM_DEMO_CONFIG") {
            self.config = Some(val.into());
        }
        if let Some(variant) = var("IFORM_DEMO_VARIANT").and_then(|v| Variant::parse(&v)) {
            self.variant = variant;
        }
        if let Some(val) = var("IFORM_DEMO_SETTINGS") {
            self.settings = Some(val.into());
        }
        if let Some(val) = var("IFORM_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            self.exit_after_ms = n;
        }
    }

    fn apply_args(&mut self, args: &[String]) -> Result<(), String> {
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("iform-demo {VERSION}");
                    process::exit(0);
                }
                "--no-mouse" => self.mouse = false,
                "--json-log" => self.json_log = true,
                other => {
                    if let Some(val) = other.strip_prefix("--variant=") {
                        self.variant = Variant::parse(val)
                            .ok_or_else(|| format!("Invalid --variant value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--settings=") {
                        self.settings = Some(val.into());
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        self.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else if other.starts_with("--") {
                        return Err(format!("Unknown argument: {other}"));
                    } else {
                        self.config = Some(other.into());
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.variant, Variant::Slide);
        assert!(opts.config.is_none());
        assert!(opts.mouse);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags_override_env() {
        let mut opts = Opts::default();
        opts.apply_env(|name| match name {
            "IFORM_DEMO_VARIANT" => Some("stack".into()),
            "IFORM_DEMO_CONFIG" => Some("env.json".into()),
            _ => None,
        });
        assert_eq!(opts.variant, Variant::Stack);
        opts.apply_args(&args(&["--variant=slide", "cli.json", "--no-mouse"]))
            .expect("valid args");
        assert_eq!(opts.variant, Variant::Slide);
        assert_eq!(opts.config, Some(PathBuf::from("cli.json")));
        assert!(!opts.mouse);
    }

    #[test]
    fn bad_values_are_reported() {
        let mut opts = Opts::default();
        assert!(opts.apply_args(&args(&["--variant=carousel"])).is_err());
        assert!(opts.apply_args(&args(&["--exit-after-ms=soon"])).is_err());
        assert!(opts.apply_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn unknown_env_variant_is_ignored() {
        let mut opts = Opts::default();
        opts.apply_env(|name| (name == "IFORM_DEMO_VARIANT").then(|| "carousel".into()));
        assert_eq!(opts.variant, Variant::Slide);
    }

    #[test]
    fn help_mentions_every_env_var() {
        for var in [
            "IFORM_DEMO_CONFIG",
            "IFORM_DEMO_VARIANT",
            "IFORM_DEMO_SETTINGS",
            "IFORM_DEMO_EXIT_AFTER_MS",
            "IFORM_LOG",
        ] {
            assert!(HELP_TEXT.contains(var), "{var} missing from help");
        }
    }

    proptest! {
        #[test]
        fn exit_after_round_trips(ms in any::<u64>()) {
            let mut opts = Opts::default();
            opts.apply_args(&[format!("--exit-after-ms={ms}")]).expect("numeric value");
            prop_assert_eq!(opts.exit_after_ms, ms);
        }

        #[test]
        fn bare_arguments_become_the_config(name in "[a-z][a-z0-9_.]{0,12}") {
            let mut opts = Opts::default();
            opts.apply_args(std::slice::from_ref(&name)).expect("plain path");
            prop_assert_eq!(opts.config, Some(PathBuf::from(name)));
        }
    }
}
