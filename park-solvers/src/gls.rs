use anyhow::Result;
use park_model::{
    grid::GridVector,
    task::{is_valid_placement, placement_cost, GlsTask, TaskResult},
};

/// Greedy local search: from the task's starting placement, repeatedly adopt
/// the cheapest simultaneous one-step move of all restrooms until no move
/// improves the cost.
///
/// Each accepted step strictly decreases a non-negative integer cost, so the
/// search always terminates.
pub fn solve_task(task: &GlsTask) -> Result<TaskResult> {
    task.validate()?;
    let ini_cost = placement_cost(
        &task.playground_locations,
        &task.initial_restroom_locations,
    )?;
    let mut best_cost = ini_cost;
    let mut best_locations = task.initial_restroom_locations.clone();
    while let Some((cost, locations)) = step(task, best_cost, &best_locations)? {
        best_cost = cost;
        best_locations = locations;
    }
    Ok(TaskResult {
        ini_cost: Some(ini_cost),
        best_cost,
        locations: best_locations,
    })
}

/// Candidate cells for one restroom: stay plus the four unit moves, filtered
/// to the grid. This order fixes cost tie-breaking and must not change.
fn candidate_moves(bounds: &GridVector, location: &GridVector) -> Vec<GridVector> {
    [
        location.at_center(),
        location.at_down(),
        location.at_left(),
        location.at_right(),
        location.at_up(),
    ]
    .into_iter()
    .filter(|cell| bounds.within_grid(cell))
    .collect()
}

fn step(
    task: &GlsTask,
    current_cost: u64,
    current: &[GridVector],
) -> Result<Option<(u64, Vec<GridVector>)>> {
    let slots = current
        .iter()
        .map(|location| candidate_moves(&task.grid_size, location))
        .collect::<Vec<_>>();
    let mut selected: Option<(u64, Vec<GridVector>)> = None;
    for candidate in CrossProduct::new(&slots) {
        if !is_valid_placement(&task.playground_locations, &candidate) {
            continue;
        }
        let cost = placement_cost(&task.playground_locations, &candidate)?;
        // Strict `<` keeps the first minimum in enumeration order.
        if selected.as_ref().map_or(true, |(best, _)| cost < *best) {
            selected = Some((cost, candidate));
        }
    }
    let (cost, locations) = match selected {
        Some(selected) => selected,
        None => return Ok(None),
    };
    // A selected move never lands on a playground; treat the search as
    // finished if one does.
    if locations
        .iter()
        .any(|location| task.playground_locations.contains(location))
    {
        return Ok(None);
    }
    if cost == current_cost {
        return Ok(None);
    }
    Ok(Some((cost, locations)))
}

/// Odometer over per-restroom candidate cells: the last slot varies fastest,
/// matching the enumeration order the tie-break depends on.
struct CrossProduct<'a> {
    slots: &'a [Vec<GridVector>],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> CrossProduct<'a> {
    fn new(slots: &'a [Vec<GridVector>]) -> Self {
        Self {
            slots,
            indices: vec![0; slots.len()],
            done: slots.iter().any(|slot| slot.is_empty()),
        }
    }
}

impl<'a> Iterator for CrossProduct<'a> {
    type Item = Vec<GridVector>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self
            .indices
            .iter()
            .zip(self.slots.iter())
            .map(|(&i, slot)| slot[i])
            .collect();
        self.done = true;
        for i in (0..self.indices.len()).rev() {
            self.indices[i] += 1;
            if self.indices[i] < self.slots[i].len() {
                self.done = false;
                break;
            }
            self.indices[i] = 0;
        }
        Some(item)
    }
}
