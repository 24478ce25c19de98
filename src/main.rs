// Copyright (c) 2026 MCU-Debug Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use log::{info, warn};
use rtl_syms::cli::Args;
use rtl_syms::config::Config;
use rtl_syms::error::{
    exit_code_for, EXIT_OPERATIONAL, EXIT_SUCCESS, EXIT_UNEXPECTED, EXIT_UNRECOGNIZED, EXIT_USAGE,
};
use rtl_syms::scratch::Scratch;
use rtl_syms::{logging, pipeline};
use std::sync::Arc;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}: {}", e.category(), e);
            std::process::exit(EXIT_OPERATIONAL);
        }
    };

    let _logger = match logging::init(config.verbosity) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    };
    info!("RTEMS Kernel Symbols {}", env!("CARGO_PKG_VERSION"));
    config.log_warnings();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: exception: starting runtime: {e}");
            std::process::exit(EXIT_UNEXPECTED);
        }
    };
    let code = runtime.block_on(supervise(config));
    // An interrupted pipeline may still be blocked in the compiler.
    runtime.shutdown_background();
    std::process::exit(code);
}

/// Run the pipeline on a blocking thread while watching for signals. The
/// scratch directory is released on every path out of here.
async fn supervise(config: Config) -> i32 {
    let scratch = match Scratch::new(config.keep_temporaries) {
        Ok(scratch) => Arc::new(scratch),
        Err(e) => {
            eprintln!("error: exception: creating scratch directory: {e}");
            return EXIT_UNEXPECTED;
        }
    };

    let worker = {
        let scratch = Arc::clone(&scratch);
        tokio::task::spawn_blocking(move || pipeline::run(&config, &scratch))
    };

    let code = tokio::select! {
        joined = worker => match joined {
            Ok(Ok(())) => EXIT_SUCCESS,
            Ok(Err(e)) => {
                let (code, message) = exit_code_for(&e);
                eprintln!("error: {message}");
                code
            }
            Err(e) => {
                eprintln!("error: unhandled exception: {e}");
                EXIT_UNRECOGNIZED
            }
        },
        signo = shutdown_signal() => {
            warn!("interrupted by signal {signo}");
            128 + signo
        }
    };

    scratch.release();
    code
}

#[cfg(unix)]
async fn shutdown_signal() -> i32 {
    use tokio::signal::unix::{signal, SignalKind};

    const SIGHUP: i32 = 1;
    const SIGINT: i32 = 2;
    const SIGTERM: i32 = 15;

    let (mut int, mut term, mut hup) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
        signal(SignalKind::hangup()),
    ) {
        (Ok(int), Ok(term), Ok(hup)) => (int, term, hup),
        _ => {
            warn!("cannot watch for signals, temporaries may be left behind");
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = int.recv() => SIGINT,
        _ = term.recv() => SIGTERM,
        _ = hup.recv() => SIGHUP,
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> i32 {
    const SIGINT: i32 = 2;
    if tokio::signal::ctrl_c().await.is_err() {
        return std::future::pending().await;
    }
    SIGINT
}
