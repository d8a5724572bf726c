// vim: tw=80
//! Proc Macros for use with Dynamock
//!
//! You probably don't want to use this crate directly.  Instead, you use its
//! reexports via the [`dynamock`](../dynamock/index.html) crate.

extern crate proc_macro;

mod interface;
use crate::interface::do_interface;

/// Generate a mock identifier from the regular one: eg "Foo" => "MockFoo"
fn gen_mock_ident(ident: &syn::Ident) -> syn::Ident {
    syn::Ident::new(&format!("Mock{}", ident), ident.span())
}

/// Describe a trait as a mockable interface.
///
/// The trait is emitted unchanged, together with a `Mock` struct named after
/// it, eg `MockFoo` for `Foo`.  The struct implements `dynamock::Interface`
/// and dereferences to a `dynamock::ObjectMock` with one member per method.
///
/// * Each method's parameters become the member's parameters, in order.  They
///   must be plain identifiers.
/// * Methods with any form of `self` receiver become instance methods.
/// * `#[defaults(name = expr, ..)]` on a method gives default values to some
///   of its parameters.  The attribute is removed from the emitted trait.
/// * Methods whose names start with `_` are left out of the mock.
///
/// # Examples
///
/// ```ignore
/// use dynamock::*;
///
/// #[interface]
/// pub trait Web {
///     fn get(&self, url: &str) -> String;
///     #[defaults(body = "")]
///     fn post(&self, url: &str, body: &str) -> u16;
/// }
///
/// let mut mock = MockWeb::new();
/// mock.setup("post", pattern!("http://a")).unwrap().returns_const(200u16);
/// assert_eq!(mock.call("post", args!("http://a")).unwrap(),
///            Some(Value::new(200u16)));
/// ```
#[proc_macro_attribute]
pub fn interface(attrs: proc_macro::TokenStream, input: proc_macro::TokenStream)
    -> proc_macro::TokenStream
{
    do_interface(attrs.into(), input.into()).into()
}
