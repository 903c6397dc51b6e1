use std::env;

use anyhow::bail;
use cf_common::{config::collation_config::SUGGESTED_FORCE_ALGORITHMS, error::Error};
use cf_task::{
    collation_migrator::{MigrationAborted, MigrationOutcome, MigrationRequest},
    task_runner::TaskRunner,
};

const USAGE: &str =
    "usage: collation-fix <task_config.ini> [--report] [--verbose] [--dry-run] [--force <algorithm>]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env::set_var("RUST_BACKTRACE", "1");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail! {Error::ConfigError(format!("no task_config provided in args, {}", USAGE))}
    }

    let runner = TaskRunner::new(&args[1])?;
    let mut request = runner.default_request();
    apply_args(&mut request, &args[2..])?;

    match runner.start_task(true, &request).await {
        Ok(outcome) => {
            print_report(&request, &outcome);
            Ok(())
        }
        Err(e) => {
            if let Some(aborted) = e.downcast_ref::<MigrationAborted>() {
                print_report(&request, &aborted.outcome);
            }
            Err(e)
        }
    }
}

fn print_report(request: &MigrationRequest, outcome: &MigrationOutcome) {
    if request.report {
        for line in outcome.report.iter() {
            println!("{}", line);
        }
    }
}

/// command line flags turn a run into an on demand one
fn apply_args(request: &mut MigrationRequest, args: &[String]) -> anyhow::Result<()> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--report" => request.report = true,
            "--verbose" => request.verbose = true,
            "--dry-run" => request.dry_run = true,
            "--force" => {
                let algorithm = match iter.next() {
                    Some(algorithm) => algorithm,
                    None => bail! {Error::ConfigError(format!(
                        "--force needs an algorithm, one of: {}",
                        SUGGESTED_FORCE_ALGORITHMS.join(", ")
                    ))},
                };
                request.report = true;
                request.force_algorithm = Some(algorithm.clone());
            }
            _ => bail! {Error::ConfigError(format!("unknown argument: {}, {}", arg, USAGE))},
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_apply_args() {
        let mut request = MigrationRequest::scheduled();
        apply_args(&mut request, &args(&["--dry-run", "--force", "utf8mb4_general_ci"])).unwrap();
        assert!(request.report);
        assert!(request.dry_run);
        assert!(!request.verbose);
        assert_eq!(request.force_algorithm.as_deref(), Some("utf8mb4_general_ci"));

        let mut request = MigrationRequest::scheduled();
        apply_args(&mut request, &args(&["--report", "--verbose"])).unwrap();
        assert!(request.report && request.verbose);
        assert_eq!(request.force_algorithm, None);
    }

    #[test]
    fn test_apply_bad_args() {
        let mut request = MigrationRequest::scheduled();
        assert!(apply_args(&mut request, &args(&["--force"])).is_err());
        assert!(apply_args(&mut request, &args(&["--fast"])).is_err());
    }
}
