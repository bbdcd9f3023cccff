use core::module_path;
use function_name::named;
use pretty_assertions::assert_eq;

use super::{metrics, owner, run, simulate, timeline};

#[test]
#[named]
pub fn rr_textbook() {
    let result = simulate("rr", Some(4), &[(0, 24, 1), (0, 3, 1), (0, 3, 1)]);

    assert_eq!(
        timeline(&result),
        vec![
            owner("P1", 0, 4),
            owner("P2", 4, 7),
            owner("P3", 7, 10),
            owner("P1", 10, 30),
        ]
    );
    assert_eq!(metrics(&result), vec![(1, 30, 6, 30), (2, 7, 4, 7), (3, 10, 7, 10)]);
    // P1 runs as six separate quanta.
    assert_eq!(result.gantt.len(), 8);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &result,
    );
}

#[test]
#[named]
pub fn priority_rr_non_preemptive() {
    let result = simulate(
        "priority-rr-nonpreemptive",
        Some(2),
        &[(0, 5, 2), (1, 3, 1), (2, 2, 3), (4, 2, 0)],
    );

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &result,
    );
}

#[test]
pub fn arrivals_during_a_slice_queue_before_the_rotated_process() {
    let result = simulate("rr", Some(3), &[(0, 5, 0), (2, 2, 0)]);

    assert_eq!(
        timeline(&result),
        vec![owner("P1", 0, 3), owner("P2", 3, 5), owner("P1", 5, 7)]
    );
}

#[test]
pub fn arrival_at_slice_end_queues_before_the_rotated_process() {
    let result = simulate("rr", Some(2), &[(0, 4, 0), (2, 2, 0)]);

    assert_eq!(
        timeline(&result),
        vec![owner("P1", 0, 2), owner("P2", 2, 4), owner("P1", 4, 6)]
    );
}

#[test]
pub fn higher_priority_arrival_waits_for_the_slice() {
    let result = simulate("priority-rr-nonpreemptive", Some(4), &[(0, 6, 2), (1, 2, 0)]);

    assert_eq!(
        timeline(&result),
        vec![owner("P1", 0, 4), owner("P2", 4, 6), owner("P1", 6, 8)]
    );
}

#[test]
pub fn idle_until_first_arrival() {
    let result = simulate("rr", Some(2), &[(3, 3, 0)]);

    assert_eq!(timeline(&result), vec![owner("Idle", 0, 3), owner("P1", 3, 6)]);
    assert_eq!(metrics(&result), vec![(1, 6, 0, 3)]);
}
