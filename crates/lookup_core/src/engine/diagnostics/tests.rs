use std::time::Duration;

use crate::engine::{Measurement, MemoryDiagnoser, ProbeScope, TimeDiagnoser, measure};

#[test]
fn time_probe_measures_the_enclosed_operation() {
	let (value, measurement) = measure(|| {
		std::thread::sleep(Duration::from_millis(5));
		7
	});
	assert_eq!(value, 7);
	assert!(measurement.elapsed >= Duration::from_millis(5));
}

#[test]
fn probes_stop_when_the_operation_unwinds() {
	let mut measurement = Measurement::default();
	let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
		let _scope = ProbeScope::start(&mut measurement);
		std::thread::sleep(Duration::from_millis(2));
		panic!("probe target failed");
	}));
	assert!(outcome.is_err());
	assert!(measurement.elapsed >= Duration::from_millis(2));
}

#[test]
fn stopping_an_idle_probe_is_a_no_op() {
	let mut time = TimeDiagnoser::default();
	time.stop();
	assert_eq!(time.elapsed(), Duration::ZERO);

	let mut memory = MemoryDiagnoser::default();
	memory.stop();
	assert_eq!(memory.allocated(), 0);
}

#[test]
fn restarting_resets_previous_readings() {
	let mut time = TimeDiagnoser::default();
	time.start();
	std::thread::sleep(Duration::from_millis(3));
	time.stop();
	let first = time.elapsed();

	time.start();
	time.stop();
	assert!(time.elapsed() < first);
}
