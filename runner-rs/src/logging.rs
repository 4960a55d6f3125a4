use tracing_subscriber::EnvFilter;

/// Env var checked before `RUST_LOG`.
const LOG_ENV: &str = "SEIRD_LOG";

/// Filter directives for a `-v` count.
///
/// | count | runner | model | per-day state |
/// |---|---|---|---|
/// | 0 | warn | warn | off |
/// | 1 | info | info | off |
/// | 2 | debug | debug | off |
/// | 3 | trace | debug | off |
/// | 4+ | trace | trace | on |
///
/// Per-day state lines are `trace` events on `seird::model`; a long batch
/// emits one per replicate per day, so they need their own step.
fn directives(verbosity: u8) -> String {
    let (runner, model) = match verbosity {
        0 => ("warn", "warn"),
        1 => ("info", "info"),
        2 => ("debug", "debug"),
        3 => ("trace", "debug"),
        _ => ("trace", "trace"),
    };
    format!("seird_run={runner},seird={model}")
}

/// Installs the stderr subscriber, so CSV written to stdout stays clean.
///
/// `SEIRD_LOG`, then `RUST_LOG`, override the `-v` count when set. Event
/// targets are shown from `-vv` up.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::directives;

    #[test]
    fn quiet_by_default() {
        assert_eq!(directives(0), "seird_run=warn,seird=warn");
    }

    #[test]
    fn runner_trace_keeps_model_at_debug() {
        assert_eq!(directives(2), "seird_run=debug,seird=debug");
        assert_eq!(directives(3), "seird_run=trace,seird=debug");
    }

    #[test]
    fn per_day_state_needs_four_flags() {
        assert_eq!(directives(4), "seird_run=trace,seird=trace");
        assert_eq!(directives(u8::MAX), directives(4));
    }
}
