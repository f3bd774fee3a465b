//! Text rendering of heap structure, for debugging and tests
//!
//! Both renderers only use [`Inspect`], so they work for either heap.
//!
//! ```text
//! *1: "a"
//! ├─ 3: "c"
//! │  └─ 4: "d"
//! └─ 2: "b"
//! ```

use crate::inspect::{reachable, Inspect, NodeView};
use std::fmt::{Debug, Write};

/// Options for [`render_tree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print `key: value` instead of just the key
    pub show_values: bool,
    /// Stop descending below this depth (roots are depth 0)
    pub max_depth: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_values: true,
            max_depth: None,
        }
    }
}

/// Draws every tree of the heap, one root after the other.
///
/// The minimum is prefixed with `*`, marked Fibonacci nodes are suffixed with
/// `'`, and hollow nodes print as `(hollow)`. A hollow node is drawn in full
/// under the parent it was linked to; under its extra parent it appears as a
/// single `~>` reference line.
pub fn render_tree<T, P, I>(heap: &I, options: &RenderOptions) -> String
where
    T: Debug,
    P: Debug,
    I: Inspect<T, P>,
{
    let min = heap.min_handle();
    let mut out = String::new();
    for root in heap.root_handles() {
        if let Some(view) = heap.view(root) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&label(&view, min, options));
            render_children(heap, &view, min, options, "", 1, &mut out);
        }
    }
    out
}

fn render_children<T, P, I>(
    heap: &I,
    parent: &NodeView<'_, T, P, I::Handle>,
    min: Option<I::Handle>,
    options: &RenderOptions,
    tab: &str,
    depth: usize,
    out: &mut String,
) where
    T: Debug,
    P: Debug,
    I: Inspect<T, P>,
{
    if parent.children.is_empty() {
        return;
    }
    if options.max_depth.is_some_and(|max| depth > max) {
        let _ = write!(out, "\n{tab}└─ …");
        return;
    }

    let last = parent.children.len() - 1;
    for (i, &child) in parent.children.iter().enumerate() {
        let Some(view) = heap.view(child) else {
            continue;
        };
        let is_last = i == last;
        let branch = if is_last { "└─" } else { "├─" };

        if view.extra_parent == Some(parent.handle) {
            let _ = write!(out, "\n{tab}{branch} ~> {:?} (hollow)", view.key);
            continue;
        }

        let _ = write!(out, "\n{tab}{branch} {}", label(&view, min, options));
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        render_children(heap, &view, min, options, &child_tab, depth + 1, out);
    }
}

fn label<T: Debug, P: Debug, H: PartialEq>(
    view: &NodeView<'_, T, P, H>,
    min: Option<H>,
    options: &RenderOptions,
) -> String {
    let mut label = String::new();
    if min.as_ref() == Some(&view.handle) {
        label.push('*');
    }
    let _ = write!(label, "{:?}", view.key);
    match view.value {
        None => label.push_str(" (hollow)"),
        Some(value) if options.show_values => {
            let _ = write!(label, ": {value:?}");
        }
        Some(_) => {}
    }
    if view.marked {
        label.push('\'');
    }
    label
}

/// Prints one line per reachable node with its raw links, identified by key:
/// right sibling, first child, parent, extra parent and rank.
pub fn render_link_table<T, P, I>(heap: &I) -> String
where
    P: Debug,
    I: Inspect<T, P>,
{
    let key_of = |handle: Option<I::Handle>| -> String {
        handle
            .and_then(|h| heap.view(h))
            .map_or_else(|| "-".to_string(), |view| format!("{:?}", view.key))
    };

    let mut out = format!(
        "{:<10} {:<10} {:<10} {:<10} {:<10} rank",
        "key", "right", "child", "parent", "ep"
    );
    for handle in reachable(heap) {
        let Some(view) = heap.view(handle) else {
            continue;
        };
        let key = format!("{:?}{}", view.key, if view.is_hollow() { "°" } else { "" });
        let _ = write!(
            out,
            "\n{:<10} {:<10} {:<10} {:<10} {:<10} {}",
            key,
            key_of(view.next_sibling),
            key_of(view.children.first().copied()),
            key_of(view.parent),
            key_of(view.extra_parent),
            view.rank,
        );
    }
    out
}
