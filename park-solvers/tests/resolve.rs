use park_model::task::Task;
use park_solvers::{gls, resolve_task};

fn lines(body: &[&str]) -> Vec<String> {
    body.iter().map(|line| line.to_string()).collect()
}

#[test]
fn test_resolve_gls_task() {
    let task = Task::from_lines(&lines(&["0", "3,3", "1|1,1", "1|0,0"])).unwrap();
    let resolved = resolve_task(&task).unwrap();
    match &task {
        Task::GreedyLocalSearch(task) => assert_eq!(resolved, gls::solve_task(task).unwrap()),
        _ => panic!("expected a greedy local search task"),
    }
}

#[test]
fn test_resolve_rrgls_task() {
    let task = Task::from_lines(&lines(&["1", "3,3", "1|1,1", "1", "5"])).unwrap();
    let resolved = resolve_task(&task).unwrap();
    assert_eq!(resolved.ini_cost, None);
    assert_eq!(resolved.best_cost, 1);
}

#[test]
fn test_unsupported_kind_is_an_error() {
    let task = Task::from_lines(&lines(&["2", "3,3", "0"])).unwrap();
    assert!(resolve_task(&task).is_err());
}
