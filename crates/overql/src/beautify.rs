//! Re-indentation of compiled query text.
//!
//! Purely textual: line breaks are inserted around parentheses and
//! after statement boundaries, then the result is indented by paren
//! depth. The depth counter is signed because a closing paren can be
//! seen before any opening one (`)->` splits before `(\n` does), in
//! which case the depth floors at no indentation.

/// Add line breaks and indentation to compiled query text.
pub fn beautify(query: &str) -> String {
    let query = query.replace("((", "(\n(\n");
    let mut query = query.replace("\n(", "\n(\n");
    if query.starts_with('(') {
        query.replace_range(0..1, "\n(\n");
    }
    let query = query.replace("\n\n", "\n");
    let query = query.replace(");", "\n);");
    let query = query.replace(")->", "\n)->");
    let query = query.replace("; ", ";\n");

    let chars: Vec<char> = query.chars().collect();
    let mut indented = String::with_capacity(query.len());
    let mut depth: i32 = 0;
    let mut i = 0;
    while i < chars.len() {
        match (chars[i], chars.get(i + 1)) {
            ('(', Some('\n')) => {
                depth += 1;
                indented.push_str("(\n");
                push_indent(&mut indented, depth);
                i += 2;
            }
            ('\n', Some(')')) => {
                depth -= 1;
                indented.push('\n');
                push_indent(&mut indented, depth);
                indented.push(')');
                i += 2;
            }
            ('\n', _) => {
                indented.push('\n');
                push_indent(&mut indented, depth);
                i += 1;
            }
            (c, _) => {
                indented.push(c);
                i += 1;
            }
        }
    }
    indented
}

fn push_indent(out: &mut String, depth: i32) {
    for _ in 0..depth.max(0) {
        out.push_str("  ");
    }
}
