#![forbid(unsafe_code)]

//! Tracing setup. The terminal belongs to the form, so logs only go to the
//! file named by `IFORM_LOG`.

use std::env;
use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a subscriber writing to `$IFORM_LOG`, as JSON lines when `json`
/// is set. Does nothing when the variable is unset.
pub fn init(json: bool) {
    let Some(path) = env::var_os("IFORM_LOG") else {
        return;
    };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("iform-demo: cannot open log file {}: {err}", path.to_string_lossy());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = installed {
        eprintln!("iform-demo: tracing already initialized: {err}");
    }
}
