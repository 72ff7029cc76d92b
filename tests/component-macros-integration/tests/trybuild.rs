//! trybuild compile-time tests for autowire_macros

#[test]
fn trybuild_autowire_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/ok_injectable.rs");
    t.pass("tests/trybuild/ok_controller.rs");
}
