//! Crate-level tests exercising the public checker API.


/// Expands the `\n` escapes used by feature files.
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[test]
fn unescape_expands_newlines() {
    assert_eq!(unescape("a = 1\\nb =\\n"), "a = 1\nb =\n");
}
