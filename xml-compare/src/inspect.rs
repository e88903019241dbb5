use xml_compare_core::Node;

/// Render a node tree with paths, values and attributes down to `max_depth`.
pub fn render_tree(node: &Node, max_depth: usize) -> String {
    let mut out = String::new();
    render_node(node, 0, max_depth, &mut out);
    out
}

fn render_node(node: &Node, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push_str(node.path());
    if let Some(value) = node.value() {
        out.push_str(&format!(" = {value:?}"));
    }
    out.push('\n');

    for (name, value) in node.attributes() {
        out.push_str(&format!("{indent}  @{name} = {value:?}\n"));
    }

    if depth >= max_depth {
        return;
    }

    let mut children: Vec<&Node> = node.children().values().flatten().collect();
    children.sort_by_key(|child| child.index());
    for child in children {
        render_node(child, depth + 1, max_depth, out);
    }
}
