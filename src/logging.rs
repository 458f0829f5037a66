// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Tracing subscriber setup for the action binary.
///
/// `RUST_LOG` takes precedence. Otherwise the level follows the runner's
/// debug switch so step debug logging surfaces the `debug!` diagnostics.
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for the given runner debug state.
pub fn default_directive(runner_debug: bool,) -> &'static str
{
    if runner_debug { "debug" } else { "info" }
}

/// Installs the global subscriber writing to stderr.
///
/// Calling it again after a subscriber is installed has no effect.
pub fn init_tracing(runner_debug: bool,)
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(runner_debug,),),);

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr,)
        .with_target(false,)
        .without_time();

    let _ = tracing_subscriber::registry().with(formatter,).with(filter,).try_init();
}

#[cfg(test)]
mod tests
{
    use super::{default_directive, init_tracing};

    #[test]
    fn runner_debug_selects_debug_level()
    {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "info");
    }

    #[test]
    fn repeated_initialization_is_harmless()
    {
        init_tracing(false,);
        init_tracing(true,);
    }
}
