use proc_macro2::TokenStream;
use syn::{
	Token,
	parse::{Parse, ParseStream, Result},
};

/// Arguments of `#[context(...)]`: an optional leading `move,` followed by
/// anything `format!` accepts.
pub struct ContextArgs {
	pub move_token: Option<Token![move]>,
	pub format_args: TokenStream,
}

impl Parse for ContextArgs {
	fn parse(input: ParseStream<'_>) -> Result<Self> {
		let move_token = if input.peek(Token![move]) {
			let token = input.parse()?;
			input.parse::<Token![,]>()?;
			Some(token)
		} else {
			None
		};
		Ok(ContextArgs {
			move_token,
			format_args: input.parse()?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::ContextArgs;
	use syn::parse_str;

	#[test]
	fn plain_format_string() {
		let args: ContextArgs = parse_str(r#""Failed to open {:?}", path"#).unwrap();
		assert!(args.move_token.is_none());
		assert_eq!(args.format_args.to_string(), r#""Failed to open {:?}" , path"#);
	}

	#[test]
	fn leading_move() {
		let args: ContextArgs = parse_str(r#"move, "layer {}", name"#).unwrap();
		assert!(args.move_token.is_some());
		assert_eq!(args.format_args.to_string(), r#""layer {}" , name"#);
	}

	#[test]
	fn move_without_comma_is_rejected() {
		assert!(parse_str::<ContextArgs>(r#"move "x""#).is_err());
	}
}
