// vim: tw=80
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute,
    Expr,
    FnArg,
    ItemTrait,
    MetaNameValue,
    Pat,
    Token,
    TraitItem,
    TraitItemFn,
    ext::IdentExt,
    punctuated::Punctuated,
    spanned::Spanned
};

use crate::gen_mock_ident;

struct Param {
    name: String,
    default: Option<Expr>,
}

/// One method of the trait, as the runtime will see it
struct Member {
    name: String,
    receiver: bool,
    params: Vec<Param>,
}

impl Member {
    /// Build from a trait method, removing its `#[defaults]` attributes.
    fn from_trait_fn(f: &mut TraitItemFn) -> syn::Result<Self> {
        let defaults = take_defaults(&mut f.attrs)?;
        let receiver = f.sig.receiver().is_some();
        let mut params = Vec::new();
        for input in f.sig.inputs.iter() {
            if let FnArg::Typed(pt) = input {
                params.push(Param{name: param_name(&pt.pat)?, default: None});
            }
        }
        for nv in defaults {
            let ident = nv.path.get_ident()
                .ok_or_else(|| syn::Error::new(nv.path.span(),
                    "Expected a parameter name"))?;
            let name = ident.unraw().to_string();
            let param = params.iter_mut()
                .find(|p| p.name == name)
                .ok_or_else(|| syn::Error::new(ident.span(),
                    format!("`{}` has no parameter named `{}`",
                            f.sig.ident, name)))?;
            if param.default.is_some() {
                return Err(syn::Error::new(ident.span(),
                    format!("Duplicate default for `{}`", name)));
            }
            param.default = Some(nv.value);
        }
        Ok(Member{name: f.sig.ident.unraw().to_string(), receiver, params})
    }

    /// An expression that builds this member's `dynamock::Signature`
    fn signature_expr(&self) -> TokenStream {
        let name = &self.name;
        let receiver = self.receiver.then(|| quote!(.receiver()));
        let params = self.params.iter().map(|p| {
            let pname = &p.name;
            match &p.default {
                Some(d) => quote!(.param_with_default(#pname, #d)),
                None => quote!(.param(#pname))
            }
        });
        quote!(::dynamock::Signature::new(#name) #receiver #(#params)*)
    }
}

/// Remove every `#[defaults(..)]` attribute and return their contents.
fn take_defaults(attrs: &mut Vec<Attribute>) -> syn::Result<Vec<MetaNameValue>>
{
    let (ours, others): (Vec<_>, Vec<_>) = attrs.drain(..)
        .partition(|a| a.path().is_ident("defaults"));
    *attrs = others;
    let mut defaults = Vec::new();
    for attr in ours {
        let nvs = attr.parse_args_with(
            Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
        defaults.extend(nvs);
    }
    Ok(defaults)
}

fn param_name(pat: &Pat) -> syn::Result<String> {
    match pat {
        Pat::Ident(pat_ident) => {
            if let Some(r) = &pat_ident.by_ref {
                return Err(syn::Error::new(r.span(),
                    "Dynamock does not support by-reference argument bindings"));
            }
            if let Some((_at, subpat)) = &pat_ident.subpat {
                return Err(syn::Error::new(subpat.span(),
                    "Dynamock does not support subpattern bindings"));
            }
            Ok(pat_ident.ident.unraw().to_string())
        },
        Pat::Wild(_) => Err(syn::Error::new(pat.span(),
            "Mocked methods must have named arguments")),
        _ => Err(syn::Error::new(pat.span(), "Unsupported argument pattern"))
    }
}

fn expand(mut item: ItemTrait) -> syn::Result<TokenStream> {
    let mut members = Vec::new();
    for ti in item.items.iter_mut() {
        if let TraitItem::Fn(f) = ti {
            members.push(Member::from_trait_fn(f)?);
        }
    }
    let vis = &item.vis;
    let name = item.ident.to_string();
    let mock_ident = gen_mock_ident(&item.ident);
    let doc = format!("Mock of the [`{}`] interface", item.ident);
    let signatures = members.iter().map(Member::signature_expr);
    Ok(quote!(
        #item

        #[doc = #doc]
        #[derive(Debug)]
        #vis struct #mock_ident {
            object: ::dynamock::ObjectMock
        }

        impl ::dynamock::Interface for #mock_ident {
            fn descriptor() -> ::dynamock::InterfaceDescriptor {
                ::dynamock::InterfaceDescriptor::new(#name)
                    #(.member(#signatures))*
            }
        }

        impl #mock_ident {
            /// Create a mock with no setups.
            pub fn new() -> Self {
                let descriptor =
                    <Self as ::dynamock::Interface>::descriptor();
                #mock_ident {
                    object: ::dynamock::ObjectMock::new(descriptor)
                }
            }

            /// Apply `behavior` to every member.
            pub fn with_behavior(self, behavior: ::dynamock::Behavior) -> Self
            {
                #mock_ident {
                    object: self.object.with_behavior(behavior)
                }
            }
        }

        impl ::std::default::Default for #mock_ident {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::ops::Deref for #mock_ident {
            type Target = ::dynamock::ObjectMock;

            fn deref(&self) -> &::dynamock::ObjectMock {
                &self.object
            }
        }

        impl ::std::ops::DerefMut for #mock_ident {
            fn deref_mut(&mut self) -> &mut ::dynamock::ObjectMock {
                &mut self.object
            }
        }
    ))
}

pub(crate) fn do_interface(attrs: TokenStream, input: TokenStream)
    -> TokenStream
{
    if !attrs.is_empty() {
        return syn::Error::new(attrs.span(), "#[interface] takes no arguments")
            .to_compile_error();
    }
    let item: ItemTrait = match syn::parse2(input) {
        Ok(item) => item,
        Err(err) => {
            return err.to_compile_error();
        }
    };
    match expand(item) {
        Ok(ts) => ts,
        Err(err) => err.to_compile_error()
    }
}
