use super::*;

fn two_lines() -> Vec<TextLine> {
    vec![
        TextLine {
            content: "DELETE".to_owned(),
            start_x: 100.0,
            end_x: 700.0,
            y: 250.0,
        },
        TextLine {
            content: "2025?".to_owned(),
            start_x: 200.0,
            end_x: 600.0,
            y: 350.0,
        },
    ]
}

#[test]
fn scan_sweeps_from_start_to_end_of_line() {
    let mut c = ScanPathController::new(2.0, 0.3).unwrap();
    let lines = two_lines();

    let p0 = c.sample(0.0, &lines);
    assert_eq!(p0, Point::new(100.0, 250.0));
    assert_eq!(c.phase(), ScanPhase::Scan { line: 0 });

    let p1 = c.sample(1.0, &lines);
    assert_eq!(p1, Point::new(400.0, 250.0));

    let p2 = c.sample(1.999, &lines);
    assert!(p2.x > 699.0);
    assert_eq!(p2.y, 250.0);
}

#[test]
fn full_cycle_visits_lines_in_order() {
    let mut c = ScanPathController::new(2.0, 0.3).unwrap();
    let lines = two_lines();

    c.sample(0.0, &lines);
    assert_eq!(c.phase(), ScanPhase::Scan { line: 0 });

    c.sample(2.1, &lines);
    assert_eq!(c.phase(), ScanPhase::Jump { from: 0, to: 1 });

    c.sample(2.4, &lines);
    assert_eq!(c.phase(), ScanPhase::Scan { line: 1 });

    c.sample(4.4, &lines);
    assert_eq!(c.phase(), ScanPhase::Jump { from: 1, to: 0 });

    c.sample(4.8, &lines);
    assert_eq!(c.phase(), ScanPhase::Scan { line: 0 });
    assert_eq!(c.cycles(), 1);
}

#[test]
fn large_time_gap_catches_up_through_phases() {
    let mut c = ScanPathController::new(2.0, 0.3).unwrap();
    let lines = two_lines();

    c.sample(0.0, &lines);
    // One full cycle is 4.6s; jump straight past two cycles.
    c.sample(9.3, &lines);
    assert_eq!(c.cycles(), 2);
    assert_eq!(c.phase(), ScanPhase::Scan { line: 0 });
}

#[test]
fn jump_interpolates_between_line_edges() {
    let mut c = ScanPathController::new(1.0, 0.5).unwrap();
    let lines = two_lines();

    c.sample(0.0, &lines);
    // Mid-jump: halfway between end of line 0 and start of line 1.
    let p = c.sample(1.25, &lines);
    assert_eq!(c.phase(), ScanPhase::Jump { from: 0, to: 1 });
    assert_eq!(p, Point::new(450.0, 300.0));
}

#[test]
fn no_lines_holds_last_focus() {
    let mut c = ScanPathController::new(2.0, 0.3).unwrap();
    let lines = two_lines();

    let before = c.sample(1.0, &lines);
    let held = c.sample(2.0, &[]);
    assert_eq!(held, before);
    // And with no history at all, the origin.
    let mut fresh = ScanPathController::new(2.0, 0.3).unwrap();
    assert_eq!(fresh.sample(5.0, &[]), Point::ZERO);
}

#[test]
fn shrinking_line_set_restarts_at_first_line() {
    let mut c = ScanPathController::new(1.0, 0.5).unwrap();
    let lines = two_lines();
    c.sample(0.0, &lines);
    c.sample(1.2, &lines);
    assert_eq!(c.phase(), ScanPhase::Jump { from: 0, to: 1 });

    let single = vec![lines[0].clone()];
    c.sample(1.3, &single);
    assert_eq!(c.phase(), ScanPhase::Scan { line: 0 });
}

#[test]
fn single_line_wraps_onto_itself() {
    let mut c = ScanPathController::new(1.0, 0.5).unwrap();
    let lines = vec![two_lines().remove(0)];
    c.sample(0.0, &lines);
    c.sample(1.1, &lines);
    assert_eq!(c.phase(), ScanPhase::Jump { from: 0, to: 0 });
    c.sample(1.6, &lines);
    assert_eq!(c.phase(), ScanPhase::Scan { line: 0 });
    assert_eq!(c.cycles(), 1);
}

#[test]
fn index_never_leaves_valid_range() {
    let mut c = ScanPathController::new(0.5, 0.1).unwrap();
    let lines = two_lines();
    for i in 0..2000 {
        c.sample(f64::from(i) * 0.037, &lines);
        match c.phase() {
            ScanPhase::Scan { line } => assert!(line < lines.len()),
            ScanPhase::Jump { from, to } => {
                assert!(from < lines.len());
                assert!(to < lines.len());
            }
        }
    }
}

#[test]
fn durations_must_be_positive() {
    assert!(ScanPathController::new(0.0, 0.3).is_err());
    assert!(ScanPathController::new(2.0, f64::NAN).is_err());
}
