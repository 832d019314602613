//! Procedural macros for tagql.
//!
//! The [`gql!`](macro@gql) macro is the template-literal tag: it takes a
//! string literal with `${expr}` interpolation holes and expands to a call to
//! `tagql::query::interleave`, splicing each hole's value in at runtime with
//! no escaping.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Expr, LitStr};

/// Builds a GraphQL query string from a template with `${expr}` holes.
///
/// # Example
///
/// ```ignore
/// let name = "world";
/// let query = gql!("query { hello(name: ${name}) }");
/// assert_eq!(query, "query { hello(name: world) }");
/// ```
///
/// Each hole holds a Rust expression, stringified with `Display` and spliced
/// verbatim into the surrounding literal text. A `$` not followed by `{` is
/// plain text. The literal text is preserved exactly as authored, whitespace
/// included.
#[proc_macro]
pub fn gql(input: TokenStream) -> TokenStream {
    let template = parse_macro_input!(input as LitStr);
    TokenStream::from(expand_gql(&template))
}

fn expand_gql(template: &LitStr) -> TokenStream2 {
    let (fragments, holes) = match split_template(&template.value()) {
        Ok(parts) => parts,
        Err(message) => {
            return syn::Error::new(template.span(), message).to_compile_error();
        }
    };

    let mut values = Vec::with_capacity(holes.len());
    for hole in &holes {
        match syn::parse_str::<Expr>(hole) {
            Ok(expr) => values.push(expr),
            Err(_) => {
                let message = format!("`${{{hole}}}` is not a valid expression");
                return syn::Error::new(template.span(), message).to_compile_error();
            }
        }
    }

    quote! {
        ::tagql::query::interleave(
            &[#(#fragments),*],
            &[#(&(#values) as &dyn ::core::fmt::Display),*],
        )
    }
}

/// Splits template text into literal fragments and the hole expressions
/// between them. Fragments always outnumber holes by one.
fn split_template(template: &str) -> Result<(Vec<String>, Vec<String>), String> {
    let mut fragments = Vec::new();
    let mut holes = Vec::new();
    let mut fragment = String::new();

    let mut chars = template.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if ch != '$' || !matches!(chars.peek(), Some((_, '{'))) {
            fragment.push(ch);
            continue;
        }
        chars.next(); // consume `{`

        let mut hole = String::new();
        let mut depth = 1usize;
        loop {
            match chars.next() {
                Some((_, '{')) => {
                    depth += 1;
                    hole.push('{');
                }
                Some((_, '}')) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    hole.push('}');
                }
                Some((_, c)) => hole.push(c),
                None => {
                    return Err(format!(
                        "unterminated `${{` starting at byte {index} of the template"
                    ));
                }
            }
        }

        if hole.trim().is_empty() {
            return Err("empty `${}` interpolation hole".to_string());
        }

        fragments.push(std::mem::take(&mut fragment));
        holes.push(hole);
    }
    fragments.push(fragment);

    Ok((fragments, holes))
}

#[cfg(test)]
mod tests {
    use super::{expand_gql, split_template};
    use syn::LitStr;

    #[test]
    fn expansion_interleaves_fragments_and_holes() {
        let template = LitStr::new(
            "query { hello(name: ${name}) }",
            proc_macro2::Span::call_site(),
        );
        let expanded = expand_gql(&template).to_string();
        assert!(expanded.contains("interleave"));
        assert!(expanded.contains("query { hello(name: "));
        assert!(expanded.contains("name"));
    }

    #[test]
    fn expansion_of_a_bad_hole_is_a_compile_error() {
        let template = LitStr::new("query ${not valid", proc_macro2::Span::call_site());
        let expanded = expand_gql(&template).to_string();
        assert!(expanded.contains("compile_error"));
    }

    #[test]
    fn plain_text_is_one_fragment() {
        let (fragments, holes) = split_template("query { hello }").unwrap();
        assert_eq!(fragments, vec!["query { hello }"]);
        assert!(holes.is_empty());
    }

    #[test]
    fn holes_split_fragments_in_order() {
        let (fragments, holes) =
            split_template("query { hello(a: ${a}, b: ${b.c()}) }").unwrap();
        assert_eq!(fragments, vec!["query { hello(a: ", ", b: ", ") }"]);
        assert_eq!(holes, vec!["a", "b.c()"]);
    }

    #[test]
    fn dollar_without_brace_is_literal() {
        let (fragments, holes) = split_template("query { field(cost: $5) }").unwrap();
        assert_eq!(fragments, vec!["query { field(cost: $5) }"]);
        assert!(holes.is_empty());
    }

    #[test]
    fn nested_braces_stay_inside_the_hole() {
        let (_, holes) = split_template("q ${ if x { 1 } else { 2 } } end").unwrap();
        assert_eq!(holes, vec![" if x { 1 } else { 2 } "]);
    }

    #[test]
    fn unterminated_hole_is_an_error() {
        assert!(split_template("query ${oops").is_err());
    }

    #[test]
    fn empty_hole_is_an_error() {
        assert!(split_template("query ${ }").is_err());
    }
}
