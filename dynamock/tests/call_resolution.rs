// vim: tw=80
//! How a call picks a setup, and what happens when none fits

use dynamock::*;

fn mock_h() -> FunctionMock {
    FunctionMock::new(Signature::new("h").param("x"))
}

#[test]
fn newest_first() {
    let mut h = mock_h();
    h.setup(pattern!(Expect::any())).unwrap().returns_const("fallback");
    h.setup(pattern!(Expect::matching(|x: &i32| *x > 10))).unwrap()
        .returns_const("big");
    h.setup(pattern!(42)).unwrap().returns_const("answer");

    assert_eq!(h.call(args!(42)).unwrap(), Some(Value::new("answer")));
    assert_eq!(h.call(args!(11)).unwrap(), Some(Value::new("big")));
    assert_eq!(h.call(args!(1)).unwrap(), Some(Value::new("fallback")));
}

#[test]
fn broad_setup_shadows_older_ones() {
    let mut h = mock_h();
    h.setup(pattern!(42)).unwrap().returns_const("answer");
    h.setup(pattern!(Expect::any())).unwrap().returns_const("fallback");
    assert_eq!(h.call(args!(42)).unwrap(), Some(Value::new("fallback")));
}

#[test]
fn loose_unmatched_call() {
    let mut h = mock_h();
    h.setup(pattern!(1)).unwrap().returns_const(());
    assert_eq!(h.call(args!(2)).unwrap(), None);
}

#[test]
fn strict_unmatched_call() {
    let mut h = mock_h().with_behavior(Behavior::Strict);
    h.setup(pattern!(1)).unwrap().returns_const(());
    assert_eq!(h.call(args!(1)).unwrap(), Some(Value::new(())));
    let e = h.call(args!(2)).unwrap_err();
    assert_eq!(e.to_string(), "no setup of h(x) matches the call (2)");
}

#[test]
fn unmatched_calls_are_recorded() {
    let h = mock_h();
    h.call(args!(3)).unwrap();
    assert_eq!(h.calls().len(), 1);
    assert_eq!(h.calls()[0].arg::<i32>("x"), Some(&3));
}

#[test]
fn bad_calls_are_rejected() {
    let h = mock_h();
    assert!(matches!(h.call(args!()),
        Err(MockError::SignatureMismatch{
            reason: BindError::MissingArguments(_), ..})));
    assert!(matches!(h.call(args!(1, 2)),
        Err(MockError::SignatureMismatch{
            reason: BindError::TooManyPositional{expected: 1, given: 2}, ..})));
    assert!(matches!(h.call(args!(; y = 1)),
        Err(MockError::SignatureMismatch{
            reason: BindError::UnexpectedKeyword(_), ..})));
    assert!(h.calls().is_empty());
}

#[test]
fn stateful_generator() {
    let mut h = mock_h();
    let mut count = 0usize;
    h.setup(pattern!(Expect::any())).unwrap()
        .returns(move |_| {
            count += 1;
            count
        });
    assert_eq!(h.call(args!(0)).unwrap(), Some(Value::new(1usize)));
    assert_eq!(h.call(args!(0)).unwrap(), Some(Value::new(2usize)));
}

#[test]
fn return_value_downcast() {
    let mut h = mock_h();
    h.setup(pattern!(Expect::any())).unwrap()
        .returns_const(vec![1u8, 2, 3]);
    let v = h.call(args!(0)).unwrap().unwrap();
    assert_eq!(v.downcast::<Vec<u8>>().unwrap(), vec![1, 2, 3]);
}
