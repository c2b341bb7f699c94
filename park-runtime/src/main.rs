use anyhow::{anyhow, Result};
use clap::{arg, Command};
use park_model::task::{verify_result as check_result, Task, TaskResult};
use park_solvers::resolve_task;
use std::{fs, io::Read, path::PathBuf};

fn cli() -> Command {
    Command::new("park-runtime")
        .about("Solves or verifies restroom placement tasks")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve_task")
                .about("Solves a task file and prints the result as JSON")
                .arg(
                    arg!(<TASK> "Path to a task file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--seed [SEED] "Overrides the seed for random-restart sampling")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the result will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify_result")
                .about("Verifies a result against a task file")
                .arg(
                    arg!(<TASK> "Path to a task file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<RESULT> "Result json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve_task", sub_m)) => solve_task(
            sub_m.get_one::<PathBuf>("TASK").unwrap().clone(),
            sub_m.get_one::<u64>("seed").copied(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("verify_result", sub_m)) => verify_result(
            sub_m.get_one::<PathBuf>("TASK").unwrap().clone(),
            sub_m.get_one::<String>("RESULT").unwrap().clone(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve_task(task_path: PathBuf, seed: Option<u64>, output_file: Option<PathBuf>) -> Result<()> {
    let mut task = load_task(&task_path)?;
    if let (Some(seed), Task::RandomRestart(task)) = (seed, &mut task) {
        task.seed = expand_seed(seed);
    }
    let result = resolve_task(&task)?;
    let json = serde_json::to_string(&result)?;
    match output_file {
        Some(path) => {
            fs::write(&path, &json)?;
            println!("Result saved to: {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn verify_result(task_path: PathBuf, result: String) -> Result<()> {
    let task = load_task(&task_path)?;
    let result = if result == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else if result.ends_with(".json") {
        fs::read_to_string(&result)
            .map_err(|e| anyhow!("failed to read result file '{}': {}", result, e))?
    } else {
        result
    };
    let result = serde_json::from_str::<TaskResult>(&result)?;
    check_result(&task, &result)?;
    println!("Result verified");
    Ok(())
}

fn load_task(path: &PathBuf) -> Result<Task> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read task file {:?}: {}", path, e))?;
    let body = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();
    Task::from_lines(&body)
}

/// Low 8 bytes little-endian, rest zero.
fn expand_seed(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    bytes
}
