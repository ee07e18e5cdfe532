/// Reports whether `name` starts with an upper-case letter.
///
/// This is Go's exportedness rule: `Reader` is exported, `reader`, `_Reader`
/// and the empty string are not.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Reports whether `name` is the blank identifier.
pub fn is_blank(name: &str) -> bool {
    name == "_"
}
