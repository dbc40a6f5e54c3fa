//! Skeleton hierarchy rendering

use console::Style;
use rigpose::Skeleton;

/// A node of the rendered tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub annotations: Vec<(String, String)>,
    pub children: Vec<TreeNode>,
}

/// How a skeleton node is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Transform-only node
    Joint,
    /// Node driving a skinned bone
    Bone,
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
}

impl TreeNode {
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            annotations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Add a `key:value` annotation shown after the name
    pub fn with_annotation(mut self, key: &str, value: &str) -> Self {
        self.annotations.push((key.to_string(), value.to_string()));
        self
    }
}

impl NodeKind {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Root => "◆",
            Self::Joint => "○",
            Self::Bone => "●",
        }
    }

    pub fn style(self, no_color: bool) -> Style {
        if no_color {
            Style::new()
        } else {
            match self {
                Self::Root => Style::new().bold().cyan(),
                Self::Joint => Style::new().dim(),
                Self::Bone => Style::new().green(),
            }
        }
    }
}

/// Build the display tree of a skeleton's bind-pose hierarchy
pub fn skeleton_tree(skeleton: &Skeleton) -> TreeNode {
    build_subtree(skeleton, Skeleton::ROOT)
}

fn build_subtree(skeleton: &Skeleton, index: usize) -> TreeNode {
    let Some(node) = skeleton.node(index) else {
        return TreeNode::new("?", NodeKind::Joint);
    };

    let kind = if index == Skeleton::ROOT {
        NodeKind::Root
    } else if node.bone_index.is_some() {
        NodeKind::Bone
    } else {
        NodeKind::Joint
    };

    let mut tree = TreeNode::new(&node.name, kind);
    if let Some(bone) = node.bone_index {
        tree = tree.with_annotation("bone", &bone.to_string());
    }

    node.children
        .iter()
        .fold(tree, |tree, &child| tree.add_child(build_subtree(skeleton, child)))
}

/// Render a tree structure to string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let style = node.kind.style(options.no_color);
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    output.push_str(&format!(
        "{}{}{} {}",
        prefix,
        connector,
        node.kind.marker(),
        style.apply_to(&node.name)
    ));

    if !node.annotations.is_empty() {
        let parts: Vec<String> = node
            .annotations
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        output.push_str(&format!(" [{}]", parts.join(", ")));
    }
    output.push('\n');

    let new_prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}{}", prefix, if is_last { "    " } else { "│   " })
    };

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == node.children.len() - 1;
        render_node(child, output, &new_prefix, is_last_child, depth + 1, options);
    }
}
