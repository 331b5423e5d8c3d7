#![allow(missing_docs)]

use lookup::engine::{CountingAllocator, DecomposeOptions, allocated_bytes, decompose_members, measure};
use lookup_testkit::{sample_options, sample_target};

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

#[test]
fn measure_reports_bytes_allocated_by_the_operation() {
	let before = allocated_bytes();
	let (buffer, measurement) = measure(|| vec![0_u8; 4096]);

	assert_eq!(buffer.len(), 4096);
	assert!(measurement.allocated_bytes >= 4096);
	assert!(allocated_bytes() >= before + 4096);
}

#[test]
fn allocating_getters_report_their_cost() {
	let options = sample_options(DecomposeOptions::default());
	let wall = sample_target("wall").expect("wall target");
	let members = decompose_members(&wall, Some(&options)).expect("wall decomposes");

	let layers = members.iter().find(|member| member.name == "Layers").expect("layers listed");
	assert!(layers.allocated_bytes > 0);

	let comment = members.iter().find(|member| member.name == "Comment").expect("comment listed");
	assert_eq!(comment.allocated_bytes, 0);
}
