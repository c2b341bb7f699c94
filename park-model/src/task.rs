use crate::grid::GridVector;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub const TASK_KIND_GLS: u32 = 0;
pub const TASK_KIND_RRGLS: u32 = 1;

/// Restarts used when a random-restart task leaves the budget as zero or
/// absent.
pub const DEFAULT_RESTART_COUNT: u32 = 3000;

/// Seed for random-restart sampling. Fixed so repeated runs of the same task
/// produce identical results.
pub const DEFAULT_SEED: [u8; 32] = *b"park-planner-rrgls-default-seed!";

/// Greedy local search task: the initial placement is given explicitly and
/// its length fixes the restroom count for the whole search.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GlsTask {
    pub grid_size: GridVector,
    pub playground_locations: Vec<GridVector>,
    pub initial_restroom_locations: Vec<GridVector>,
}

impl GlsTask {
    /// Fails fast on a starting placement the search could never report.
    pub fn validate(&self) -> Result<()> {
        if self.initial_restroom_locations.is_empty() && !self.playground_locations.is_empty() {
            return Err(anyhow!(
                "task places no restrooms but has {} playgrounds",
                self.playground_locations.len()
            ));
        }
        if let Some(outside) = self
            .initial_restroom_locations
            .iter()
            .find(|location| !self.grid_size.within_grid(location))
        {
            return Err(anyhow!(
                "initial restroom {} is outside the {}x{} grid",
                outside,
                self.grid_size.v,
                self.grid_size.h
            ));
        }
        if !is_valid_placement(&self.playground_locations, &self.initial_restroom_locations) {
            return Err(anyhow!(
                "initial restrooms collide with each other or with a playground"
            ));
        }
        Ok(())
    }
}

/// Random-restart task: only the restroom count is given; starting placements
/// are sampled from the seeded stream.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RrglsTask {
    pub grid_size: GridVector,
    pub playground_locations: Vec<GridVector>,
    pub target_restroom_locations_count: usize,
    pub restart_count: Option<u32>,
    pub seed: [u8; 32],
}

impl RrglsTask {
    pub fn effective_restart_count(&self) -> u32 {
        match self.restart_count {
            None | Some(0) => DEFAULT_RESTART_COUNT,
            Some(n) => n,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Task {
    GreedyLocalSearch(GlsTask),
    RandomRestart(RrglsTask),
    Unsupported { kind: u32 },
}

impl Task {
    /// Parses the line-oriented task-file body. The loader strips blank
    /// lines before calling this.
    pub fn from_lines(body: &[String]) -> Result<Task> {
        if body.len() < 3 {
            return Err(anyhow!(
                "task file has {} lines, expected at least 3",
                body.len()
            ));
        }
        let kind = body[0]
            .trim()
            .parse::<u32>()
            .map_err(|e| anyhow!("invalid task kind '{}': {}", body[0].trim(), e))?;
        let grid_size = body[1].trim().parse::<GridVector>()?;
        let playground_locations = parse_locations(&body[2])?;
        match kind {
            TASK_KIND_GLS => {
                let line = body
                    .get(3)
                    .ok_or_else(|| anyhow!("task is missing its initial restroom line"))?;
                Ok(Task::GreedyLocalSearch(GlsTask {
                    grid_size,
                    playground_locations,
                    initial_restroom_locations: parse_locations(line)?,
                }))
            }
            TASK_KIND_RRGLS => {
                let line = body
                    .get(3)
                    .ok_or_else(|| anyhow!("task is missing its restroom count line"))?;
                let target = line
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| anyhow!("invalid restroom count '{}': {}", line.trim(), e))?;
                let restart_count = match body.get(4) {
                    Some(line) => Some(line.trim().parse::<u32>().map_err(|e| {
                        anyhow!("invalid restart count '{}': {}", line.trim(), e)
                    })?),
                    None => None,
                };
                Ok(Task::RandomRestart(RrglsTask {
                    grid_size,
                    playground_locations,
                    target_restroom_locations_count: target,
                    restart_count,
                    seed: DEFAULT_SEED,
                }))
            }
            kind => Ok(Task::Unsupported { kind }),
        }
    }
}

/// Parses `N|v,h|v,h|...`, checking the leading count against the pairs that
/// follow.
fn parse_locations(line: &str) -> Result<Vec<GridVector>> {
    let mut parts = line.trim().split('|');
    let count = parts
        .next()
        .unwrap_or("")
        .trim()
        .parse::<usize>()
        .map_err(|e| anyhow!("invalid location count in '{}': {}", line.trim(), e))?;
    let locations = parts
        .map(|pair| pair.parse::<GridVector>())
        .collect::<Result<Vec<_>>>()?;
    if locations.len() != count {
        return Err(anyhow!(
            "location line declares {} entries but lists {}",
            count,
            locations.len()
        ));
    }
    Ok(locations)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ini_cost: Option<u64>,
    pub best_cost: u64,
    pub locations: Vec<GridVector>,
}

/// Total L1 distance from every playground to its nearest restroom. Zero
/// playgrounds cost zero; a non-empty set of playgrounds with no restrooms
/// has no defined cost.
pub fn placement_cost(playgrounds: &[GridVector], restrooms: &[GridVector]) -> Result<u64> {
    let mut total = 0;
    for playground in playgrounds {
        total += restrooms
            .iter()
            .map(|restroom| playground.l1_distance(restroom))
            .min()
            .ok_or_else(|| anyhow!("cost is undefined without restrooms"))?;
    }
    Ok(total)
}

/// Restrooms must be pairwise distinct and stay off every playground. Grid
/// bounds are enforced where moves are generated, not here.
pub fn is_valid_placement(playgrounds: &[GridVector], restrooms: &[GridVector]) -> bool {
    restrooms.iter().enumerate().all(|(i, restroom)| {
        !restrooms[..i].contains(restroom) && !playgrounds.contains(restroom)
    })
}

/// Checks a result record against its task: restroom count, grid bounds,
/// collisions, and that the reported costs are consistent with the reported
/// locations.
pub fn verify_result(task: &Task, result: &TaskResult) -> Result<()> {
    let (grid_size, playgrounds, restroom_count, reports_ini_cost) = match task {
        Task::GreedyLocalSearch(task) => (
            task.grid_size,
            &task.playground_locations,
            task.initial_restroom_locations.len(),
            true,
        ),
        Task::RandomRestart(task) => (
            task.grid_size,
            &task.playground_locations,
            task.target_restroom_locations_count,
            false,
        ),
        Task::Unsupported { kind } => return Err(anyhow!("unsupported task kind {}", kind)),
    };
    if result.locations.len() != restroom_count {
        return Err(anyhow!(
            "expected {} restroom locations, found {}",
            restroom_count,
            result.locations.len()
        ));
    }
    if let Some(outside) = result
        .locations
        .iter()
        .find(|location| !grid_size.within_grid(location))
    {
        return Err(anyhow!(
            "restroom {} is outside the {}x{} grid",
            outside,
            grid_size.v,
            grid_size.h
        ));
    }
    if !is_valid_placement(playgrounds, &result.locations) {
        return Err(anyhow!(
            "restrooms collide with each other or with a playground"
        ));
    }
    let cost = placement_cost(playgrounds, &result.locations)?;
    if cost != result.best_cost {
        return Err(anyhow!(
            "best_cost is {} but the locations cost {}",
            result.best_cost,
            cost
        ));
    }
    match result.ini_cost {
        Some(ini_cost) if reports_ini_cost => {
            if result.best_cost > ini_cost {
                return Err(anyhow!(
                    "best_cost {} exceeds ini_cost {}",
                    result.best_cost,
                    ini_cost
                ));
            }
        }
        Some(_) => return Err(anyhow!("random-restart results do not report ini_cost")),
        None if reports_ini_cost => {
            return Err(anyhow!("greedy local search results must report ini_cost"))
        }
        None => {}
    }
    Ok(())
}
