//! Tree rendering functionality for debugging and visualization.

use super::LazyTree;

/// Children shown per node before eliding; lazy child sequences can be
/// unbounded, so rendering must cap breadth as well as depth.
const MAX_RENDERED_CHILDREN: usize = 16;

impl<T> LazyTree<T>
where
    T: std::fmt::Display + Clone + 'static,
{
    /// Render the tree structure as a string for debugging.
    ///
    /// Forces children down to `max_depth` levels and at most
    /// [`MAX_RENDERED_CHILDREN`] per node; elided children are shown as
    /// an ellipsis line.
    pub fn render(&self, max_depth: usize) -> String {
        let mut result = String::new();
        result.push_str(&format!("{}\n", self.value));
        self.render_children(&mut result, "", max_depth);
        result
    }

    fn render_children(&self, result: &mut String, prefix: &str, depth_left: usize) {
        if depth_left == 0 {
            return;
        }

        let mut children: Vec<LazyTree<T>> =
            self.children().take(MAX_RENDERED_CHILDREN + 1).collect();
        let elided = children.len() > MAX_RENDERED_CHILDREN;
        if elided {
            children.truncate(MAX_RENDERED_CHILDREN);
        }

        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            let is_last = !elided && index == count - 1;
            result.push_str(prefix);
            if is_last {
                result.push_str("└── ");
            } else {
                result.push_str("├── ");
            }
            result.push_str(&format!("{}\n", child.value));

            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            child.render_children(result, &child_prefix, depth_left - 1);
        }

        if elided {
            result.push_str(prefix);
            result.push_str("└── …\n");
        }
    }
}
