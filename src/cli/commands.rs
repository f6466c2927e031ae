//! Subcommand execution against a [`Jenkins`] client

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use rustline_jenkins::{BuildOptions, GetOptions, Jenkins, NodeCreateOptions};

use super::{BuildCommand, Command, JobCommand, NodeCommand, QueueCommand};

/// Result of a command, printed to stdout
#[derive(Debug, PartialEq)]
pub(super) enum Output {
    /// A JSON resource or list, pretty-printed
    Json(Value),
    /// Raw text such as `config.xml` or console output
    Text(String),
    /// An existence check
    Flag(bool),
    /// A queue item identifier
    Id(u64),
    /// Nothing to print
    Done,
}

impl Output {
    /// Writes the output to stdout
    pub(super) fn print(&self) -> Result<()> {
        match self {
            Output::Json(value) => {
                let json = serde_json::to_string_pretty(value).context("Failed to format JSON")?;
                println!("{json}");
            }
            Output::Text(text) => print!("{text}"),
            Output::Flag(flag) => println!("{flag}"),
            Output::Id(id) => println!("{id}"),
            Output::Done => {}
        }
        Ok(())
    }
}

fn read_xml(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))
}

/// Runs one subcommand
pub(super) async fn execute(jenkins: &Jenkins, command: Command) -> Result<Output> {
    let output = match command {
        Command::Info { depth } => Output::Json(jenkins.info(&GetOptions::depth(depth)).await?),
        Command::Job(job) => execute_job(jenkins, job).await?,
        Command::Build(build) => execute_build(jenkins, build).await?,
        Command::Node(node) => execute_node(jenkins, node).await?,
        Command::Queue(queue) => execute_queue(jenkins, queue).await?,
        Command::Completions { .. } => Output::Done,
    };
    Ok(output)
}

async fn execute_job(jenkins: &Jenkins, command: JobCommand) -> Result<Output> {
    let jobs = jenkins.job();

    let output = match command {
        JobCommand::Build {
            name,
            params,
            build_token,
        } => {
            let options = BuildOptions {
                parameters: params,
                token: build_token,
            };
            Output::Id(jobs.build(&name, &options).await?)
        }
        JobCommand::Config { name } => Output::Text(jobs.config(&name).await?),
        JobCommand::SetConfig { name, file } => {
            jobs.set_config(&name, &read_xml(&file)?).await?;
            Output::Done
        }
        JobCommand::Copy { from, name } => {
            jobs.copy(&from, &name).await?;
            Output::Done
        }
        JobCommand::Create { name, file } => {
            jobs.create(&name, &read_xml(&file)?).await?;
            Output::Done
        }
        JobCommand::Destroy { name } => {
            jobs.destroy(&name).await?;
            Output::Done
        }
        JobCommand::Disable { name } => {
            jobs.disable(&name).await?;
            Output::Done
        }
        JobCommand::Enable { name } => {
            jobs.enable(&name).await?;
            Output::Done
        }
        JobCommand::Exists { name } => Output::Flag(jobs.exists(&name).await?),
        JobCommand::Get { name, depth } => {
            Output::Json(jobs.get(&name, &GetOptions::depth(depth)).await?)
        }
        JobCommand::List { depth } => {
            Output::Json(Value::Array(jobs.list(&GetOptions::depth(depth)).await?))
        }
    };
    Ok(output)
}

async fn execute_build(jenkins: &Jenkins, command: BuildCommand) -> Result<Output> {
    let builds = jenkins.build();

    let output = match command {
        BuildCommand::Get {
            name,
            number,
            depth,
        } => Output::Json(builds.get(&name, number, &GetOptions::depth(depth)).await?),
        BuildCommand::Stop { name, number } => {
            builds.stop(&name, number).await?;
            Output::Done
        }
        BuildCommand::Log { name, number } => Output::Text(builds.log(&name, number).await?),
    };
    Ok(output)
}

async fn execute_node(jenkins: &Jenkins, command: NodeCommand) -> Result<Output> {
    let nodes = jenkins.node();

    let output = match command {
        NodeCommand::Config { name } => Output::Text(nodes.config(&name).await?),
        NodeCommand::SetConfig { name, file } => {
            nodes.set_config(&name, &read_xml(&file)?).await?;
            Output::Done
        }
        NodeCommand::Create {
            name,
            description,
            executors,
            remote_fs,
            labels,
            exclusive,
        } => {
            let options = NodeCreateOptions {
                description,
                executors,
                remote_fs,
                labels,
                exclusive,
            };
            nodes.create(&name, &options).await?;
            Output::Done
        }
        NodeCommand::Destroy { name } => {
            nodes.destroy(&name).await?;
            Output::Done
        }
        NodeCommand::Disable { name, message } => {
            nodes.disable(&name, &message).await?;
            Output::Done
        }
        NodeCommand::Enable { name } => {
            nodes.enable(&name).await?;
            Output::Done
        }
        NodeCommand::Exists { name } => Output::Flag(nodes.exists(&name).await?),
        NodeCommand::Get { name, depth } => {
            Output::Json(nodes.get(&name, &GetOptions::depth(depth)).await?)
        }
        NodeCommand::List { depth } => {
            Output::Json(Value::Array(nodes.list(&GetOptions::depth(depth)).await?))
        }
    };
    Ok(output)
}

async fn execute_queue(jenkins: &Jenkins, command: QueueCommand) -> Result<Output> {
    let queue = jenkins.queue();

    let output = match command {
        QueueCommand::List { depth } => {
            Output::Json(Value::Array(queue.list(&GetOptions::depth(depth)).await?))
        }
        QueueCommand::Get { id, depth } => {
            Output::Json(queue.get(id, &GetOptions::depth(depth)).await?)
        }
        QueueCommand::Cancel { id } => {
            queue.cancel(id).await?;
            Output::Done
        }
    };
    Ok(output)
}
