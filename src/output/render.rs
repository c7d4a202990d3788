//! Text rendering of a collected tree
//!
//! Both formats first produce a list of [`RenderLine`]s and only join them
//! once every line formatted successfully, so an error never leaves partial
//! output behind.

use crate::config::Config;
use crate::error::Result;
use crate::tree::{CollectStrategy, Node};

use super::config::{FormatMode, UNREADABLE_MARKER, omission_marker};
use super::path::PathFormatter;

/// One output line and the nesting depth it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub depth: usize,
    pub text: String,
}

impl RenderLine {
    fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }
}

enum Step<'a> {
    Enter(&'a Node),
    Leave(usize),
    Omitted { count: usize, depth: usize },
}

/// Children of `node` in output order, with the omission marker spliced in
/// after the kept head of a truncated run.
fn child_steps(node: &Node) -> Vec<Step<'_>> {
    let mut steps = Vec::with_capacity(node.children.len() + 1);
    for (i, child) in node.children.iter().enumerate() {
        if let Some(t) = node.truncation {
            if i == t.head {
                steps.push(Step::Omitted {
                    count: t.omitted,
                    depth: node.depth + 1,
                });
            }
        }
        steps.push(Step::Enter(child));
    }
    steps
}

pub struct Renderer<'a> {
    config: &'a Config,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render a collected tree to its final text, without a trailing newline.
    pub fn render(&self, root: &Node) -> Result<String> {
        let lines = self.lines(root)?;
        let text = match self.config.format {
            FormatMode::Inline => lines
                .into_iter()
                .map(|line| line.text)
                .collect::<Vec<_>>()
                .join("\n"),
            FormatMode::Summary => lines
                .iter()
                .map(|line| {
                    let width = self.config.indent.saturating_mul(line.depth);
                    format!("{}{}", " ".repeat(width), line.text)
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(text)
    }

    pub fn lines(&self, root: &Node) -> Result<Vec<RenderLine>> {
        let formatter = PathFormatter::new(self.config, &root.entry.path);
        match self.config.format {
            FormatMode::Inline => self.inline(root, &formatter),
            FormatMode::Summary => self.summary(root, &formatter),
        }
    }

    fn inline(&self, root: &Node, formatter: &PathFormatter) -> Result<Vec<RenderLine>> {
        let lists_dirs = self.config.collect.lists_dirs();
        let mut lines = Vec::new();
        let mut stack = vec![Step::Enter(root)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) if node.is_dir() => {
                    if lists_dirs {
                        let mut text = formatter.format(&node.entry)?;
                        if node.unreadable.is_some() {
                            text = format!("{text} {UNREADABLE_MARKER}");
                        }
                        lines.push(RenderLine::new(node.depth, text));
                    }
                    stack.extend(child_steps(node).into_iter().rev());
                }
                Step::Enter(node) => {
                    lines.push(RenderLine::new(node.depth, formatter.format(&node.entry)?));
                }
                Step::Omitted { count, depth } => {
                    lines.push(RenderLine::new(depth, omission_marker(count)));
                }
                Step::Leave(_) => {}
            }
        }
        Ok(lines)
    }

    fn summary(&self, root: &Node, formatter: &PathFormatter) -> Result<Vec<RenderLine>> {
        let strategy = self.config.collect;
        let compact = self.config.compact_braces;
        let mut lines: Vec<RenderLine> = Vec::new();
        let mut stack = vec![Step::Enter(root)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) if node.is_dir() => {
                    let label = if strategy == CollectStrategy::FilesOnly {
                        None
                    } else if node.depth == 0 {
                        Some(formatter.format(&node.entry)?)
                    } else {
                        Some(formatter.format_name(node.name()))
                    };

                    // A partly read directory keeps the children it did get.
                    let label = match (label, node.unreadable.is_some()) {
                        (Some(label), true) => Some(format!("{label} {UNREADABLE_MARKER}")),
                        (None, true) => Some(UNREADABLE_MARKER.to_string()),
                        (label, false) => label,
                    };
                    if node.unreadable.is_some() && node.children.is_empty() {
                        lines.push(RenderLine::new(node.depth, label.unwrap_or_default()));
                        continue;
                    }

                    if node.children.is_empty() {
                        let text = match label {
                            Some(label) if strategy == CollectStrategy::DirsOnly => label,
                            Some(label) => format!("{label} {{}}"),
                            None => "{}".to_string(),
                        };
                        lines.push(RenderLine::new(node.depth, text));
                        continue;
                    }

                    let open = match label {
                        Some(label) => format!("{label} {{"),
                        None => "{".to_string(),
                    };
                    lines.push(RenderLine::new(node.depth, open));
                    stack.push(Step::Leave(node.depth));
                    stack.extend(child_steps(node).into_iter().rev());
                }
                Step::Enter(node) => {
                    lines.push(RenderLine::new(
                        node.depth,
                        formatter.format_name(node.name()),
                    ));
                }
                Step::Omitted { count, depth } => {
                    lines.push(RenderLine::new(depth, omission_marker(count)));
                }
                Step::Leave(depth) => match lines.last_mut().filter(|_| compact) {
                    Some(last) => last.text.push('}'),
                    None => lines.push(RenderLine::new(depth, "}")),
                },
            }
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Decorator, PathStyle};
    use crate::sort::SortMode;
    use crate::tree::{Entry, EntryKind, Truncation, collect};

    fn file(path: &str, depth: usize) -> Node {
        Node::new(Entry::new(path, EntryKind::File), depth)
    }

    fn dir(path: &str, depth: usize, children: Vec<Node>) -> Node {
        let mut node = Node::new(Entry::new(path, EntryKind::Directory), depth);
        node.children = children;
        node
    }

    /// proj/a.txt, proj/sub/b.txt, proj/sub/c.txt
    fn proj() -> Node {
        dir(
            "/w/proj",
            0,
            vec![
                dir(
                    "/w/proj/sub",
                    1,
                    vec![file("/w/proj/sub/c.txt", 2), file("/w/proj/sub/b.txt", 2)],
                ),
                file("/w/proj/a.txt", 1),
            ],
        )
    }

    fn config(format: FormatMode) -> Config {
        Config {
            format,
            sort: SortMode::Name,
            decorators: [Decorator::Unix].into_iter().collect(),
            ..Config::new("/w/proj")
        }
    }

    fn render(mut tree: Node, config: &Config) -> String {
        collect(&mut tree, config);
        Renderer::new(config).render(&tree).unwrap()
    }

    #[test]
    fn test_summary_end_to_end() {
        let out = render(proj(), &config(FormatMode::Summary));
        assert_eq!(
            out,
            "proj {\n  a.txt\n  sub {\n    b.txt\n    c.txt\n  }\n}"
        );
    }

    #[test]
    fn test_summary_compact_braces() {
        let config = Config {
            compact_braces: true,
            ..config(FormatMode::Summary)
        };
        let out = render(proj(), &config);
        assert_eq!(out, "proj {\n  a.txt\n  sub {\n    b.txt\n    c.txt}}");
    }

    #[test]
    fn test_summary_indent_width() {
        let config = Config {
            indent: 4,
            ..config(FormatMode::Summary)
        };
        let out = render(proj(), &config);
        assert!(out.contains("\n        b.txt\n"), "{out}");
    }

    #[test]
    fn test_summary_empty_directories() {
        let tree = dir("/w/proj", 0, vec![dir("/w/proj/empty", 1, vec![])]);
        let out = render(tree.clone(), &config(FormatMode::Summary));
        assert_eq!(out, "proj {\n  empty {}\n}");

        let config = Config {
            collect: CollectStrategy::DirsOnly,
            ..config(FormatMode::Summary)
        };
        assert_eq!(render(tree, &config), "proj {\n  empty\n}");
    }

    #[test]
    fn test_summary_files_only_groups() {
        let config = Config {
            collect: CollectStrategy::FilesOnly,
            ..config(FormatMode::Summary)
        };
        let out = render(proj(), &config);
        assert_eq!(out, "{\n  a.txt\n  {\n    b.txt\n    c.txt\n  }\n}");
    }

    #[test]
    fn test_summary_unreadable_marker() {
        let mut locked = dir("/w/proj/locked", 1, vec![]);
        locked.unreadable = Some("Permission denied".into());
        let tree = dir("/w/proj", 0, vec![locked]);
        let out = render(tree, &config(FormatMode::Summary));
        assert_eq!(out, "proj {\n  locked [unreadable]\n}");
    }

    #[test]
    fn test_partly_read_directory_keeps_children_in_both_formats() {
        let mut locked = dir("/w/proj/locked", 1, vec![file("/w/proj/locked/seen.txt", 2)]);
        locked.unreadable = Some("Input/output error".into());
        let tree = dir("/w/proj", 0, vec![locked]);

        let out = render(tree.clone(), &config(FormatMode::Summary));
        assert_eq!(out, "proj {\n  locked [unreadable] {\n    seen.txt\n  }\n}");

        let out = render(tree, &config(FormatMode::Inline));
        assert_eq!(out, "proj\nproj/locked [unreadable]\nproj/locked/seen.txt");
    }

    #[test]
    fn test_inline_lists_paths_in_pre_order() {
        let out = render(proj(), &config(FormatMode::Inline));
        assert_eq!(out, "proj\nproj/a.txt\nproj/sub\nproj/sub/b.txt\nproj/sub/c.txt");
    }

    #[test]
    fn test_inline_rel_style() {
        let config = Config {
            path_style: PathStyle::Rel,
            ..config(FormatMode::Inline)
        };
        let out = render(proj(), &config);
        assert_eq!(out, ".\na.txt\nsub\nsub/b.txt\nsub/c.txt");
    }

    #[test]
    fn test_inline_files_only_has_no_directory_lines() {
        let config = Config {
            collect: CollectStrategy::FilesOnly,
            path_style: PathStyle::FilesOnly,
            ..config(FormatMode::Inline)
        };
        let out = render(proj(), &config);
        assert_eq!(out, "a.txt\nb.txt\nc.txt");
    }

    #[test]
    fn test_truncation_marker_between_head_and_tail() {
        let files = (1..=6)
            .map(|i| file(&format!("/w/proj/f{i}"), 1))
            .collect();
        let config = Config {
            collect_limit: Some(3),
            ..config(FormatMode::Summary)
        };
        let out = render(dir("/w/proj", 0, files), &config);
        assert_eq!(out, "proj {\n  f1\n  ... (4 omitted)\n  f6\n}");
    }

    #[test]
    fn test_inline_omission_marker_sits_between_files() {
        let mut tree = dir(
            "/w/proj",
            0,
            vec![
                file("/w/proj/a", 1),
                file("/w/proj/b", 1),
                file("/w/proj/c", 1),
                dir("/w/proj/d", 1, vec![]),
            ],
        );
        let config = config(FormatMode::Inline);
        collect(&mut tree, &config);
        tree.children.remove(1);
        tree.truncation = Some(Truncation {
            head: 1,
            omitted: 1,
        });
        let out = Renderer::new(&config).render(&tree).unwrap();
        assert_eq!(out, "proj\nproj/a\n... (1 omitted)\nproj/c\nproj/d");
    }

    #[test]
    fn test_lines_carry_depth() {
        let config = config(FormatMode::Summary);
        let mut tree = proj();
        collect(&mut tree, &config);
        let lines = Renderer::new(&config).lines(&tree).unwrap();
        let depths: Vec<_> = lines.iter().map(|l| l.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2, 2, 1, 0]);
    }
}
