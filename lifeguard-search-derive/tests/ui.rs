//! UI tests for `Searchable` compile errors
//!
//! Note: We use a single shared TestCases instance to avoid race conditions
//! when tests run in parallel.

#[macro_use]
extern crate lazy_static;

use std::sync::Mutex;

lazy_static! {
    static ref TEST_CASES: Mutex<trybuild::TestCases> = Mutex::new(trybuild::TestCases::new());
}

#[test]
fn compile_error_tuple_struct() {
    let t = TEST_CASES.lock().unwrap();
    t.compile_fail("tests/ui/compile_error_tuple_struct.rs");
}

#[test]
fn compile_error_all_fields_skipped() {
    let t = TEST_CASES.lock().unwrap();
    t.compile_fail("tests/ui/compile_error_all_fields_skipped.rs");
}

#[test]
fn compile_error_duplicate_variant() {
    let t = TEST_CASES.lock().unwrap();
    t.compile_fail("tests/ui/compile_error_duplicate_variant.rs");
}
