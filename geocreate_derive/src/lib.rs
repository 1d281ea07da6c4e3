//! Attribute macros shared by the geocreate crates.

mod args;

use crate::args::ContextArgs;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::{ReturnType, parse_macro_input};

/// Wraps the body of a function returning `anyhow::Result` so that every error
/// leaving it carries an extra line of context.
///
/// The arguments are passed to `format!`, so function parameters can be
/// referenced:
///
/// ```ignore
/// #[context("Failed to open dataset {:?}", path)]
/// fn open(path: &Path) -> Result<Dataset> { ... }
/// ```
///
/// Prefix the arguments with `move,` to move captured parameters into the
/// wrapped body.
#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let ContextArgs { move_token, format_args } = parse_macro_input!(args);
	let mut function = parse_macro_input!(input as syn::ItemFn);

	if function.sig.asyncness.is_some() {
		return syn::Error::new_spanned(function.sig.asyncness, "#[context] does not support async functions")
			.to_compile_error()
			.into();
	}
	let return_type = match &function.sig.output {
		ReturnType::Default => {
			return syn::Error::new_spanned(&function.sig, "#[context] requires a function returning Result")
				.to_compile_error()
				.into();
		}
		ReturnType::Type(_, ty) => ty.clone(),
	};

	let body = &function.block;
	let err = Ident::new("err", Span::mixed_site());
	let once = Ident::new("once", Span::mixed_site());

	// `once` makes the closure FnOnce, so the body may consume its arguments
	let wrapped = quote! {
		let #once = ::core::iter::empty::<()>();
		(#move_token || -> #return_type {
			::core::mem::drop(#once);
			#body
		})()
		.map_err(|#err| #err.context(format!(#format_args)).into())
	};
	function.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(wrapped), None)];

	function.into_token_stream().into()
}
