// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![deny(clippy::all, clippy::pedantic)]
#![deny(rustdoc::all)]
#![allow(rustdoc::missing_crate_level_docs)]

mod run;

use std::process::ExitCode;
use std::sync::Arc;

use args::{CmdArgs, Parser};
use commit::{CommandValidator, SystemctlReloader};
use tracectl::{LevelFilter, TracingControl, trace_target};
use tracing::{debug, error, info};

use crate::run::{RunParams, RunParamsBuilder, run};

trace_target!("networker", LevelFilter::INFO, &[]);

fn run_params(args: &CmdArgs) -> Option<RunParams> {
    let validator = if args.skip_validation() {
        None
    } else if let Some(custom) = args.frr_validator() {
        let custom_args: Vec<&str> = custom.args().iter().map(String::as_str).collect();
        Some(CommandValidator::new(custom.program(), &custom_args))
    } else {
        Some(CommandValidator::frr())
    };
    RunParamsBuilder::default()
        .input(args.input())
        .frr_config(args.frr_config())
        .frr_validator(validator)
        .frr_reload_unit(args.frr_reload_unit().map(str::to_owned))
        .validation_timeout(args.validation_timeout())
        .reload_timeout(args.reload_timeout())
        .dry_run(args.dry_run())
        .build()
        .inspect_err(|e| error!("Bad run parameters: {e}"))
        .ok()
}

fn main() -> ExitCode {
    /* parse cmd line args */
    let args = CmdArgs::parse();

    /* initialize logging */
    let mut tctl = TracingControl::new(LevelFilter::INFO);
    if let Some(tracing) = args.tracing()
        && let Err(e) = tctl.setup_from_string(tracing)
    {
        eprintln!("Invalid tracing configuration: {e}");
        return ExitCode::FAILURE;
    }
    if args.show_tracing_tags() {
        print!("{}", tctl.targets_by_tag());
        return ExitCode::SUCCESS;
    }
    if args.show_tracing_targets() {
        print!("{}", tctl.targets());
        return ExitCode::SUCCESS;
    }
    if let Err(e) = tctl.install() {
        eprintln!("Failed to set up tracing: {e}");
        return ExitCode::FAILURE;
    }
    debug!("Tracing configuration: {}", tctl.as_config_string());

    let Some(params) = run_params(&args) else {
        return ExitCode::FAILURE;
    };

    /* create tokio runtime */
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Tokio runtime creation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = match rt.block_on(run(&params, Arc::new(SystemctlReloader))) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if params.dry_run {
        print!("{}", report.rendered);
        return ExitCode::SUCCESS;
    }
    if report.has_failures() {
        error!("Some configurations could not be committed");
        return ExitCode::FAILURE;
    }
    info!("Done with {} warnings", report.warnings.len());
    ExitCode::SUCCESS
}
