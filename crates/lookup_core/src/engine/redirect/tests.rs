use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{create_value, redirect_value};
use crate::engine::test_support::{Declining, Successor, options_with};
use crate::engine::{DecomposeOptions, Descriptor, Redirector, Value};

fn successor_options(max_redirects: usize) -> (DecomposeOptions, Arc<AtomicUsize>) {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	let options = DecomposeOptions {
		max_redirects,
		..DecomposeOptions::default()
	}
	.with_resolver(move |value, _| {
		counter.fetch_add(1, Ordering::SeqCst);
		let value = value.as_i64().unwrap_or_default();
		Ok(Arc::new(Successor {
			value,
			description: (value == 1).then_some("one"),
		}) as Arc<dyn Descriptor>)
	});
	(options, calls)
}

#[test]
fn declining_redirector_keeps_value_with_one_lookup() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	let options = DecomposeOptions::default().with_resolver(move |_, _| {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(Declining) as Arc<dyn Descriptor>)
	});
	let input = Value::from("wrapped");

	let redirected = redirect_value(&options, "Target", input.clone(), None).expect("redirect succeeds");
	assert_eq!(redirected.value.as_str(), Some("wrapped"));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn chain_is_bounded_and_keeps_descriptions() {
	let (options, calls) = successor_options(3);
	let redirected = redirect_value(&options, "Level", Value::from(0), None).expect("redirect succeeds");

	assert_eq!(redirected.value.as_i64(), Some(3));
	assert_eq!(redirected.description.as_deref(), Some("one"));
	assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn cyclic_chain_stops_at_default_bound() {
	let (options, _) = successor_options(DecomposeOptions::default().max_redirects);
	let redirected = redirect_value(&options, "Level", Value::from(10), None).expect("redirect succeeds");
	assert_eq!(redirected.value.as_i64(), Some(26));
}

#[test]
fn disabled_redirection_resolves_once() {
	let (options, calls) = successor_options(16);
	let options = DecomposeOptions {
		enable_redirection: false,
		..options
	};
	let redirected = redirect_value(&options, "Level", Value::from(1), None).expect("redirect succeeds");

	assert_eq!(redirected.value.as_i64(), Some(1));
	assert_eq!(redirected.description.as_deref(), Some("one"));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn caller_description_outranks_descriptors_along_the_chain() {
	let (options, _) = successor_options(3);
	let redirected = redirect_value(&options, "Level", Value::from(0), Some("given".to_owned())).expect("redirect succeeds");

	assert_eq!(redirected.value.as_i64(), Some(3));
	assert_eq!(redirected.description.as_deref(), Some("given"));
}

struct Offering {
	offers: Arc<AtomicUsize>,
}

impl Descriptor for Offering {
	fn as_redirector(&self) -> Option<&dyn Redirector> {
		Some(self)
	}
}

impl Redirector for Offering {
	fn try_redirect(&self, _: &str) -> Option<Value> {
		self.offers.fetch_add(1, Ordering::SeqCst);
		Some(Value::from("unwrapped"))
	}
}

#[test]
fn zero_bound_never_consults_redirectors() {
	let offers = Arc::new(AtomicUsize::new(0));
	let counter = offers.clone();
	let options = DecomposeOptions {
		max_redirects: 0,
		..DecomposeOptions::default()
	}
	.with_resolver(move |_, _| Ok(Arc::new(Offering { offers: counter.clone() }) as Arc<dyn Descriptor>));

	let redirected = redirect_value(&options, "Target", Value::from("wrapped"), None).expect("redirect succeeds");
	assert_eq!(redirected.value.as_str(), Some("wrapped"));
	assert_eq!(offers.load(Ordering::SeqCst), 0);
}

#[test]
fn caller_description_survives_descriptor_without_one() {
	let options = options_with(DecomposeOptions::default(), Declining);
	let value = create_value(&options, "Target", Value::from(5), Some("five".to_owned())).expect("value builds");

	assert_eq!(value.description.as_deref(), Some("five"));
	assert_eq!(value.name, "5");
	assert_eq!(value.type_name, "Int64");
	assert_eq!(value.type_full_name, "System.Int64");
}

struct Exploding;

impl Descriptor for Exploding {
	fn as_redirector(&self) -> Option<&dyn Redirector> {
		Some(self)
	}
}

impl Redirector for Exploding {
	fn try_redirect(&self, _: &str) -> Option<Value> {
		panic!("redirector exploded")
	}
}

#[test]
fn panicking_redirector_declines() {
	let options = options_with(DecomposeOptions::default(), Exploding);
	let redirected = redirect_value(&options, "Target", Value::from(true), None).expect("redirect succeeds");
	assert_eq!(redirected.value.as_bool(), Some(true));
}
