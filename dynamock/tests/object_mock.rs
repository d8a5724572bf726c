// vim: tw=80
//! An ObjectMock built from a hand-written descriptor

use dynamock::*;

/// A signature provider that doesn't use the attribute macro
struct Store;

impl Interface for Store {
    fn descriptor() -> InterfaceDescriptor {
        InterfaceDescriptor::new("Store")
            .member(Signature::new("load").receiver().param("key"))
            .member(Signature::new("save")
                    .receiver()
                    .param("key")
                    .param("value")
                    .param_with_default("overwrite", false))
            .member(Signature::new("load").param("ignored"))
    }
}

#[test]
fn first_declaration_wins() {
    let mock = ObjectMock::new(Store::descriptor());
    assert_eq!(mock.member_names(), &["load".to_owned(), "save".to_owned()]);
    assert!(mock.get("load").unwrap().signature().has_receiver());
}

#[test]
fn members_are_independent() {
    let mut mock = ObjectMock::new(Store::descriptor());
    mock.setup("load", pattern!("k")).unwrap().returns_const(Some(7u64));
    mock.setup("save", pattern!("k", Expect::any())).unwrap()
        .returns_const(true);

    assert_eq!(mock.call("load", args!("k")).unwrap(),
               Some(Value::new(Some(7u64))));
    assert_eq!(mock.call("save", args!("k", 7u64)).unwrap(),
               Some(Value::new(true)));
    assert_eq!(mock.call("save", args!("k", 7u64; overwrite = true)).unwrap(),
               None);
    mock.get("load").unwrap().verify(pattern!()).unwrap().once().unwrap();
}

#[test]
fn unknown_member() {
    let mut mock = ObjectMock::new(Store::descriptor());
    assert!(matches!(mock.setup("delete", pattern!()),
                     Err(MockError::UnknownMember{..})));
}

#[test]
fn receiver_is_not_a_caller_argument() {
    let mock = ObjectMock::new(Store::descriptor());
    let e = mock.call("load", args!("k", "extra")).unwrap_err();
    assert_eq!(e.to_string(),
        "load(self, key): takes 1 positional arguments but 2 were given");
}
