use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::time::{Duration, Instant};

thread_local! {
	static ALLOCATED: Cell<u64> = const { Cell::new(0) };
}

/// `GlobalAlloc` wrapper over [`System`] that counts bytes allocated per thread.
///
/// Binaries opt in with `#[global_allocator]`; without it every allocation
/// delta reads zero.
pub struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		let ptr = unsafe { System.alloc(layout) };
		if !ptr.is_null() {
			record(layout.size());
		}
		ptr
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		let ptr = unsafe { System.alloc_zeroed(layout) };
		if !ptr.is_null() {
			record(layout.size());
		}
		ptr
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		unsafe { System.dealloc(ptr, layout) }
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		let out = unsafe { System.realloc(ptr, layout, new_size) };
		if !out.is_null() && new_size > layout.size() {
			record(new_size - layout.size());
		}
		out
	}
}

fn record(bytes: usize) {
	// TLS may already be torn down while a thread exits.
	let _ = ALLOCATED.try_with(|total| total.set(total.get().wrapping_add(bytes as u64)));
}

/// Bytes allocated on the current thread since it started.
pub fn allocated_bytes() -> u64 {
	ALLOCATED.try_with(Cell::get).unwrap_or(0)
}

/// Wall-clock probe.
#[derive(Debug, Default)]
pub struct TimeDiagnoser {
	started: Option<Instant>,
	elapsed: Duration,
}

impl TimeDiagnoser {
	/// Start timing, discarding any earlier reading.
	pub fn start(&mut self) {
		self.elapsed = Duration::ZERO;
		self.started = Some(Instant::now());
	}

	/// Stop timing; no-op when not started.
	pub fn stop(&mut self) {
		if let Some(started) = self.started.take() {
			self.elapsed = started.elapsed();
		}
	}

	/// Last measured interval.
	pub fn elapsed(&self) -> Duration {
		self.elapsed
	}
}

/// Allocation probe over the per-thread counter.
#[derive(Debug, Default)]
pub struct MemoryDiagnoser {
	baseline: Option<u64>,
	allocated: u64,
}

impl MemoryDiagnoser {
	/// Capture the current allocation baseline.
	pub fn start(&mut self) {
		self.allocated = 0;
		self.baseline = Some(allocated_bytes());
	}

	/// Record bytes allocated since [`MemoryDiagnoser::start`].
	pub fn stop(&mut self) {
		if let Some(baseline) = self.baseline.take() {
			self.allocated = allocated_bytes().saturating_sub(baseline);
		}
	}

	/// Last measured allocation delta.
	pub fn allocated(&self) -> u64 {
		self.allocated
	}
}

/// Cost of one value-producing operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Measurement {
	/// Wall-clock time.
	pub elapsed: Duration,
	/// Bytes allocated on the calling thread.
	pub allocated_bytes: u64,
}

/// Running probes; stopping happens on drop so unwinding operations are measured too.
pub struct ProbeScope<'a> {
	time: TimeDiagnoser,
	memory: MemoryDiagnoser,
	out: &'a mut Measurement,
}

impl<'a> ProbeScope<'a> {
	/// Start both probes, writing the result into `out` when the scope ends.
	pub fn start(out: &'a mut Measurement) -> Self {
		let mut time = TimeDiagnoser::default();
		let mut memory = MemoryDiagnoser::default();
		memory.start();
		time.start();
		Self { time, memory, out }
	}
}

impl Drop for ProbeScope<'_> {
	fn drop(&mut self) {
		self.time.stop();
		self.memory.stop();
		*self.out = Measurement {
			elapsed: self.time.elapsed(),
			allocated_bytes: self.memory.allocated(),
		};
	}
}

/// Run `op` under fresh probes.
pub fn measure<T>(op: impl FnOnce() -> T) -> (T, Measurement) {
	let mut measurement = Measurement::default();
	let value = {
		let _scope = ProbeScope::start(&mut measurement);
		op()
	};
	(value, measurement)
}

#[cfg(test)]
mod tests;
