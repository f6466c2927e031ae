//! jenkins - command-line access to a Jenkins server
//!
//! Thin wrapper over the rustline-jenkins client. Results are printed to
//! stdout, JSON resources pretty-printed; logs go to stderr.
//!
//! ## Commands
//!
//! - `jenkins info` - Show server information
//! - `jenkins job <op>` - Build, inspect and manage jobs
//! - `jenkins build <op>` - Inspect, stop and read logs of builds
//! - `jenkins node <op>` - Manage agents and their online state
//! - `jenkins queue <op>` - List and cancel queue items
//! - `jenkins completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! export JENKINS_URL=https://ci.example.com
//! export JENKINS_USER=admin JENKINS_API_TOKEN=...
//!
//! # Trigger a parameterized build and print its queue id
//! jenkins job build deploy -p env=staging
//!
//! # Take an agent offline
//! jenkins node disable agent-1 --message "disk replacement"
//!
//! # Generate shell completions
//! jenkins completions bash > /etc/bash_completion.d/jenkins
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("JENKINS_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
