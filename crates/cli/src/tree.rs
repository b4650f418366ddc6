//! Text rendering of a built grammar tree for `--print-tree`.

use std::fmt::Write;

use treeshell_core::command_definitions::NodeType;
use treeshell_core::grammar::GrammarNode;

const INDENT: &str = "  ";

/// One line per node, children indented under their parent.
///
/// Options are shown as `<name>`, nodes without a bound handler (none
/// configured, or a name missing from the registry) are marked with a
/// trailing `*`, and the localized description follows after ` - `.
#[must_use]
pub fn render_tree<S: AsRef<str>>(root: &GrammarNode, languages: &[S]) -> String {
    let mut output = String::new();
    for child in root.children() {
        render_node(&mut output, child, languages, 0);
    }
    output
}

fn render_node<S: AsRef<str>>(
    output: &mut String,
    node: &GrammarNode,
    languages: &[S],
    depth: usize,
) {
    let label = match node.node_type() {
        NodeType::Command => node.key().to_string(),
        NodeType::Option => format!("<{}>", node.key()),
    };
    let marker = if node.has_handler() { "" } else { "*" };
    let (_, description) = node.translations().get_translation(languages);

    let _ = write!(output, "{}{label}{marker}", INDENT.repeat(depth));
    if !description.is_empty() {
        let _ = write!(output, " - {description}");
    }
    output.push('\n');

    for child in node.children() {
        render_node(output, child, languages, depth + 1);
    }
}
