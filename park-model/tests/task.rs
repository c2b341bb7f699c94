use park_model::grid::GridVector;
use park_model::task::{
    is_valid_placement, placement_cost, verify_result, GlsTask, Task, TaskResult,
    DEFAULT_RESTART_COUNT, DEFAULT_SEED,
};

fn lines(body: &[&str]) -> Vec<String> {
    body.iter().map(|line| line.to_string()).collect()
}

#[test]
fn test_parse_gls_task() {
    let task = Task::from_lines(&lines(&["0", "3,3", "2|0,0|1,2", "1|2,2"])).unwrap();
    match task {
        Task::GreedyLocalSearch(task) => {
            assert_eq!(task.grid_size, GridVector::new(3, 3));
            assert_eq!(
                task.playground_locations,
                vec![GridVector::new(0, 0), GridVector::new(1, 2)]
            );
            assert_eq!(task.initial_restroom_locations, vec![GridVector::new(2, 2)]);
        }
        _ => panic!("expected a greedy local search task"),
    }
}

#[test]
fn test_parse_rrgls_task() {
    let task = Task::from_lines(&lines(&["1", "4,5", "1|1,1", "2", "25"])).unwrap();
    match task {
        Task::RandomRestart(task) => {
            assert_eq!(task.grid_size, GridVector::new(4, 5));
            assert_eq!(task.playground_locations, vec![GridVector::new(1, 1)]);
            assert_eq!(task.target_restroom_locations_count, 2);
            assert_eq!(task.restart_count, Some(25));
            assert_eq!(task.effective_restart_count(), 25);
            assert_eq!(task.seed, DEFAULT_SEED);
        }
        _ => panic!("expected a random-restart task"),
    }
}

#[test]
fn test_restart_count_defaults() {
    let absent = Task::from_lines(&lines(&["1", "4,5", "1|1,1", "2"])).unwrap();
    let zero = Task::from_lines(&lines(&["1", "4,5", "1|1,1", "2", "0"])).unwrap();
    for task in [absent, zero] {
        match task {
            Task::RandomRestart(task) => {
                assert_eq!(task.effective_restart_count(), DEFAULT_RESTART_COUNT)
            }
            _ => panic!("expected a random-restart task"),
        }
    }
}

#[test]
fn test_parse_unsupported_kind() {
    let task = Task::from_lines(&lines(&["7", "3,3", "0"])).unwrap();
    match task {
        Task::Unsupported { kind } => assert_eq!(kind, 7),
        _ => panic!("expected an unsupported task"),
    }
}

#[test]
fn test_parse_errors() {
    // too few lines
    assert!(Task::from_lines(&lines(&["0", "3,3"])).is_err());
    // non-numeric kind
    assert!(Task::from_lines(&lines(&["x", "3,3", "0", "0"])).is_err());
    // declared count does not match the listed pairs
    assert!(Task::from_lines(&lines(&["0", "3,3", "2|0,0", "1|2,2"])).is_err());
    // kind 0 without its initial placement line
    assert!(Task::from_lines(&lines(&["0", "3,3", "1|0,0"])).is_err());
    // kind 1 without its restroom count line
    assert!(Task::from_lines(&lines(&["1", "3,3", "1|0,0"])).is_err());
}

#[test]
fn test_placement_cost() {
    let playgrounds = vec![GridVector::new(0, 0), GridVector::new(2, 2)];
    let restrooms = vec![GridVector::new(0, 1), GridVector::new(2, 1)];
    assert_eq!(placement_cost(&playgrounds, &restrooms).unwrap(), 2);
    assert_eq!(placement_cost(&[], &restrooms).unwrap(), 0);
    assert!(placement_cost(&playgrounds, &[]).is_err());
}

#[test]
fn test_is_valid_placement() {
    let playgrounds = vec![GridVector::new(1, 1)];
    assert!(is_valid_placement(
        &playgrounds,
        &[GridVector::new(0, 0), GridVector::new(0, 1)]
    ));
    assert!(!is_valid_placement(
        &playgrounds,
        &[GridVector::new(0, 0), GridVector::new(0, 0)]
    ));
    assert!(!is_valid_placement(&playgrounds, &[GridVector::new(1, 1)]));
    assert!(is_valid_placement(&playgrounds, &[]));
}

#[test]
fn test_validate_initial_placement() {
    let valid = GlsTask {
        grid_size: GridVector::new(3, 3),
        playground_locations: vec![GridVector::new(0, 0)],
        initial_restroom_locations: vec![GridVector::new(2, 2)],
    };
    assert!(valid.validate().is_ok());

    let out_of_bounds = GlsTask {
        initial_restroom_locations: vec![GridVector::new(3, 0)],
        ..valid.clone()
    };
    assert!(out_of_bounds.validate().is_err());

    let on_playground = GlsTask {
        initial_restroom_locations: vec![GridVector::new(0, 0)],
        ..valid.clone()
    };
    assert!(on_playground.validate().is_err());

    let duplicated = GlsTask {
        initial_restroom_locations: vec![GridVector::new(1, 1), GridVector::new(1, 1)],
        ..valid.clone()
    };
    assert!(duplicated.validate().is_err());

    let no_restrooms = GlsTask {
        initial_restroom_locations: vec![],
        ..valid
    };
    assert!(no_restrooms.validate().is_err());
}

#[test]
fn test_verify_result() {
    let task = Task::from_lines(&lines(&["0", "3,3", "1|1,1", "1|0,0"])).unwrap();
    let good = TaskResult {
        ini_cost: Some(2),
        best_cost: 1,
        locations: vec![GridVector::new(1, 0)],
    };
    assert!(verify_result(&task, &good).is_ok());

    let wrong_cost = TaskResult {
        best_cost: 3,
        ..good.clone()
    };
    assert!(verify_result(&task, &wrong_cost).is_err());

    let on_playground = TaskResult {
        ini_cost: Some(2),
        best_cost: 0,
        locations: vec![GridVector::new(1, 1)],
    };
    assert!(verify_result(&task, &on_playground).is_err());

    let missing_ini_cost = TaskResult {
        ini_cost: None,
        ..good.clone()
    };
    assert!(verify_result(&task, &missing_ini_cost).is_err());

    let wrong_count = TaskResult {
        ini_cost: Some(2),
        best_cost: 2,
        locations: vec![GridVector::new(1, 0), GridVector::new(0, 1)],
    };
    assert!(verify_result(&task, &wrong_count).is_err());

    let unsupported = Task::Unsupported { kind: 9 };
    assert!(verify_result(&unsupported, &good).is_err());
}

#[test]
fn test_result_serde_omits_absent_ini_cost() {
    let rrgls = TaskResult {
        ini_cost: None,
        best_cost: 5,
        locations: vec![GridVector::new(1, 0), GridVector::new(2, 1)],
    };
    assert_eq!(
        serde_json::to_string(&rrgls).unwrap(),
        r#"{"best_cost":5,"locations":[[1,0],[2,1]]}"#
    );
    let gls = TaskResult {
        ini_cost: Some(9),
        best_cost: 7,
        locations: vec![GridVector::new(0, 1)],
    };
    assert_eq!(
        serde_json::to_string(&gls).unwrap(),
        r#"{"ini_cost":9,"best_cost":7,"locations":[[0,1]]}"#
    );
    assert_eq!(serde_json::from_str::<TaskResult>(&serde_json::to_string(&gls).unwrap()).unwrap(), gls);
}
