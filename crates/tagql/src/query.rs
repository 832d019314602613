//! Raw query interpolation.
//!
//! A query tag is an ordered list of literal fragments with substitution
//! values between them. [`interleave`] stitches them back together exactly as
//! authored: values are stringified with `Display` and spliced in with no
//! escaping. The [`gql!`](crate::gql) macro compiles a `${expr}` template down
//! to a call to this function.

use std::fmt::Display;

/// Interleaves literal fragments with stringified substitution values.
///
/// Fragments and values alternate, starting and ending with a fragment, so a
/// well-formed tag has `fragments.len() == values.len() + 1`. A shorter value
/// slice is tolerated: remaining fragments are emitted back to back.
///
/// ```
/// use tagql::query::interleave;
///
/// let id = 42;
/// let q = interleave(&["query { user(id: ", ") { name } }"], &[&id]);
/// assert_eq!(q, "query { user(id: 42) { name } }");
/// ```
pub fn interleave(fragments: &[&str], values: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(fragments.iter().map(|f| f.len()).sum());
    let mut values = values.iter();
    for fragment in fragments {
        out.push_str(fragment);
        if let Some(value) = values.next() {
            out.push_str(&value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_in_template_order() {
        let q = interleave(
            &["query { hello(a: ", ", b: ", ") }"],
            &[&"\"x\"", &true],
        );
        assert_eq!(q, "query { hello(a: \"x\", b: true) }");
    }

    #[test]
    fn no_values_is_plain_concatenation() {
        assert_eq!(interleave(&["query { hello }"], &[]), "query { hello }");
    }

    #[test]
    fn values_are_not_escaped() {
        // Raw interpolation: whatever Display produces lands verbatim.
        let raw = "line1\nline2 \"quoted\"";
        let q = interleave(&["{ f(s: ", ") }"], &[&raw]);
        assert_eq!(q, "{ f(s: line1\nline2 \"quoted\") }");
    }

    #[test]
    fn missing_trailing_values_emit_remaining_fragments() {
        assert_eq!(interleave(&["a", "b", "c"], &[&1]), "a1bc");
    }

    #[test]
    fn preserves_authored_whitespace() {
        let q = interleave(&["\n\t\tquery {\n\t\t\thello\n\t\t}\n\t"], &[]);
        assert_eq!(q, "\n\t\tquery {\n\t\t\thello\n\t\t}\n\t");
    }
}
