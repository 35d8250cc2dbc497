use portfolio_counter_core::{Config, CounterAnimator, RecordingSink, Scheduler, VirtualScheduler};

/// Animate one target to completion and return every text written.
fn run_to_end(target: &str) -> Vec<String> {
    let mut sched = VirtualScheduler::new();
    let mut animator = CounterAnimator::new(&Config::default());
    let sink = RecordingSink::new();
    animator.animate(&mut sched, sink.clone(), target);
    sched.run_until_idle(60_000);
    assert_eq!(sched.active(), 0, "{target} should have finished");
    sink.writes()
}

fn is_tenths_k(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 4 && b[0].is_ascii_digit() && b[1] == b'.' && b[2].is_ascii_digit() && b[3] == b'K'
}

#[test]
fn thousands_renders_tenths_and_lands_exactly() {
    let writes = run_to_end("2.5K");
    assert_eq!(writes.last().map(String::as_str), Some("2.5K"));
    assert!(writes.iter().all(|w| is_tenths_k(w)), "{writes:?}");
    assert_eq!(writes.first().map(String::as_str), Some("0.0K"));
}

#[test]
fn plus_suffix_is_non_decreasing() {
    let writes = run_to_end("120+");
    assert_eq!(writes.last().map(String::as_str), Some("120+"));
    let values: Vec<u32> = writes
        .iter()
        .map(|w| w.strip_suffix('+').expect("plus suffix").parse().expect("integer"))
        .collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
    assert_eq!(values[0], 2);
}

#[test]
fn plain_never_shows_a_suffix() {
    let writes = run_to_end("42");
    assert_eq!(writes.last().map(String::as_str), Some("42"));
    for w in &writes {
        assert!(!w.contains('+') && !w.contains('K'), "{w}");
        w.parse::<u32>().expect("plain integer");
    }
}

#[test]
fn tick_count_is_bounded() {
    // Accumulated float steps may land just short of the target on tick 60.
    for target in ["42", "120+", "2.5K", "7", "1000"] {
        let n = run_to_end(target).len();
        assert!((60..=61).contains(&n), "{target}: {n} ticks");
    }
}

#[test]
fn final_text_is_verbatim_for_valid_inputs() {
    for target in ["0", "1", "007", "99", "3.5", "3.5+", "15+", "0.5K", "12K", "1.25K", "100000"] {
        let writes = run_to_end(target);
        assert_eq!(writes.last().map(String::as_str), Some(target));
    }
}

#[test]
fn zero_finishes_on_first_tick() {
    assert_eq!(run_to_end("0"), vec!["0".to_string()]);
    assert_eq!(run_to_end("0+"), vec!["0+".to_string()]);
}

#[test]
fn ticks_are_spaced_by_interval() {
    let mut sched = VirtualScheduler::new();
    let mut animator = CounterAnimator::new(&Config::default());
    let sink = RecordingSink::new();
    animator.animate(&mut sched, sink.clone(), "120+");

    sched.advance(49);
    assert!(sink.writes().is_empty());
    sched.advance(1);
    assert_eq!(sink.writes(), vec!["2+".to_string()]);
    sched.advance(100);
    assert_eq!(sink.last().as_deref(), Some("6+"));
}

#[test]
fn unparsable_target_guard_is_configurable() {
    let mut sched = VirtualScheduler::new();
    let sink = RecordingSink::new();
    CounterAnimator::new(&Config::default()).animate(&mut sched, sink.clone(), "soon");
    sched.run_until_idle(60_000);
    assert_eq!(sink.writes(), vec!["soon".to_string()]);

    let cfg = Config {
        guard_unparsable: false,
        ..Config::default()
    };
    let mut sched = VirtualScheduler::new();
    let sink = RecordingSink::new();
    CounterAnimator::new(&cfg).animate(&mut sched, sink.clone(), "soon");
    assert_eq!(sched.run_until_idle(10_000), 10_000);
    assert_eq!(sched.active(), 1);
    assert_eq!(sink.writes().len(), 200);
    assert!(sink.writes().iter().all(|w| w == "NaN"));
}

#[test]
fn concurrent_animations_on_one_element_race() {
    let mut sched = VirtualScheduler::new();
    let mut animator = CounterAnimator::new(&Config::default());
    let sink = RecordingSink::new();
    animator.animate(&mut sched, sink.clone(), "2.5K");
    animator.animate(&mut sched, sink.clone(), "10");
    sched.run_until_idle(60_000);

    // "2.5K" lands on tick 60, "10" needs a 61st tick and so owns the final text.
    let writes = sink.writes();
    assert!(writes.iter().any(|w| w == "2.5K"));
    assert_eq!(writes.last().map(String::as_str), Some("10"));
}
