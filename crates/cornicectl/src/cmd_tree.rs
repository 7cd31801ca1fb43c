//! Generic command-tree dispatch.
//!
//! A [`CommandNode`] is a named unit in a static dispatch tree: zero or more
//! uniquely-named children plus an optional handler. The tree is built once
//! at process start as an owned value and traversed read-only per
//! invocation, so dispatch never touches shared mutable state.
//!
//! Matching is exact and case-sensitive. Descent consumes one token per
//! matching child; when it stops, a handler (if present) receives the
//! unconsumed tail, a handler-less group renders its command summary, and an
//! unmatched token on a handler-less node is a usage error. The dispatcher
//! itself performs no I/O beyond writing the summary to the supplied writer.

use std::io::{self, Write};

use thiserror::Error;

/// Handler invoked when dispatch resolves to this node.
///
/// Receives the shared context and the tokens left unconsumed by descent.
/// Handlers own their argument arity and range validation.
pub type Handler<C, E> = fn(&mut C, &[String]) -> Result<(), E>;

/// A named node in the command tree.
#[derive(Debug)]
pub struct CommandNode<C, E> {
    name: &'static str,
    summary: &'static str,
    exec: Option<Handler<C, E>>,
    children: Vec<CommandNode<C, E>>,
}

/// Errors raised while constructing a command tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandTreeError {
    /// Two children of the same parent share a name.
    #[error("command '{parent}' already has a child named '{child}'")]
    DuplicateChild {
        /// Name of the parent node.
        parent: &'static str,
        /// The conflicting child name.
        child: &'static str,
    },
}

/// Errors raised by [`dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// A token matched no child of a handler-less node.
    #[error("unknown command '{token}'")]
    UnknownCommand {
        /// The first unmatched token.
        token: String,
    },
    /// Writing the command summary failed.
    #[error("failed to write command summary: {0}")]
    Write(#[source] io::Error),
    /// The resolved handler failed.
    #[error(transparent)]
    Handler(E),
}

/// How a dispatch call concluded when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran to completion.
    Executed,
    /// A handler-less group rendered its command summary.
    Summary,
}

impl<C, E> CommandNode<C, E> {
    /// Creates a branching node with no handler.
    #[must_use]
    pub fn group(name: &'static str, summary: &'static str) -> Self {
        Self {
            name,
            summary,
            exec: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf node with a handler.
    #[must_use]
    pub fn leaf(name: &'static str, summary: &'static str, exec: Handler<C, E>) -> Self {
        Self {
            name,
            summary,
            exec: Some(exec),
            children: Vec::new(),
        }
    }

    /// Appends a child, preserving insertion order for summary renders.
    ///
    /// # Errors
    ///
    /// Returns [`CommandTreeError::DuplicateChild`] when a sibling of the
    /// same name already exists; shadowing is never allowed.
    pub fn child(mut self, node: Self) -> Result<Self, CommandTreeError> {
        if self.children.iter().any(|existing| existing.name == node.name) {
            return Err(CommandTreeError::DuplicateChild {
                parent: self.name,
                child: node.name,
            });
        }
        self.children.push(node);
        Ok(self)
    }

    /// The node's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn child_named(&self, token: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == token)
    }

    fn render_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{} - {}", self.name, self.summary)?;
        if self.children.is_empty() {
            return Ok(());
        }
        writeln!(out, "Commands:")?;
        let width = self
            .children
            .iter()
            .map(|child| child.name.len())
            .max()
            .unwrap_or(0);
        for child in &self.children {
            writeln!(out, "  {:width$}  {}", child.name, child.summary)?;
        }
        Ok(())
    }
}

/// Resolves `tokens` against the tree rooted at `root`.
///
/// Descends while the next token names a child of the current node, then
/// either invokes the resolved handler with the unconsumed tail, renders the
/// command summary for a handler-less group, or reports the first unmatched
/// token as an unknown command.
///
/// # Errors
///
/// Returns [`DispatchError::UnknownCommand`] for an unmatched token on a
/// handler-less node, [`DispatchError::Handler`] when the resolved handler
/// fails, and [`DispatchError::Write`] when the summary cannot be written.
pub fn dispatch<C, E, W: Write>(
    root: &CommandNode<C, E>,
    tokens: &[String],
    context: &mut C,
    out: &mut W,
) -> Result<DispatchOutcome, DispatchError<E>> {
    let mut node = root;
    let mut consumed = 0;
    while let Some(token) = tokens.get(consumed) {
        match node.child_named(token) {
            Some(child) => {
                node = child;
                consumed += 1;
            }
            None => break,
        }
    }

    let remaining = tokens.get(consumed..).unwrap_or(&[]);
    if let Some(exec) = node.exec {
        exec(context, remaining).map_err(DispatchError::Handler)?;
        return Ok(DispatchOutcome::Executed);
    }
    if let Some(first) = remaining.first() {
        return Err(DispatchError::UnknownCommand {
            token: first.clone(),
        });
    }
    node.render_summary(out).map_err(DispatchError::Write)?;
    Ok(DispatchOutcome::Summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records which handler ran and with which trailing tokens.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<(&'static str, Vec<String>)>,
    }

    #[derive(Debug, Error, PartialEq, Eq)]
    #[error("handler failed")]
    struct HandlerFailure;

    type Node = CommandNode<Recorder, HandlerFailure>;

    fn record(name: &'static str) -> Handler<Recorder, HandlerFailure> {
        match name {
            "up" => |recorder, args| {
                recorder.calls.push(("up", args.to_vec()));
                Ok(())
            },
            "down" => |recorder, args| {
                recorder.calls.push(("down", args.to_vec()));
                Ok(())
            },
            _ => |recorder, args| {
                recorder.calls.push(("set", args.to_vec()));
                Ok(())
            },
        }
    }

    fn volume_tree() -> Node {
        Node::group("volume", "Control the default audio sink")
            .child(Node::leaf("up", "Raise the volume", record("up")))
            .expect("add up")
            .child(Node::leaf("down", "Lower the volume", record("down")))
            .expect("add down")
            .child(Node::leaf("set", "Set an absolute level", record("set")))
            .expect("add set")
    }

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| String::from(*part)).collect()
    }

    #[test]
    fn resolves_leaf_with_trailing_tokens() {
        let tree = volume_tree();
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let outcome = dispatch(&tree, &tokens(&["set", "0.5"]), &mut recorder, &mut out)
            .expect("dispatch set");
        assert_eq!(outcome, DispatchOutcome::Executed);
        assert_eq!(recorder.calls, vec![("set", tokens(&["0.5"]))]);
        assert!(out.is_empty(), "handlers render nothing through dispatch");
    }

    #[test]
    fn resolves_leaf_with_no_trailing_tokens() {
        let tree = volume_tree();
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        dispatch(&tree, &tokens(&["up"]), &mut recorder, &mut out).expect("dispatch up");
        assert_eq!(recorder.calls, vec![("up", Vec::new())]);
    }

    #[test]
    fn group_renders_children_in_insertion_order() {
        let tree = volume_tree();
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let outcome = dispatch(&tree, &[], &mut recorder, &mut out).expect("dispatch group");
        assert_eq!(outcome, DispatchOutcome::Summary);
        assert!(recorder.calls.is_empty(), "no handler may run for a group");

        let rendered = String::from_utf8(out).expect("summary utf8");
        let up = rendered.find("up").expect("lists up");
        let down = rendered.find("down").expect("lists down");
        let set = rendered.find("set").expect("lists set");
        assert!(up < down && down < set, "children out of order: {rendered}");
    }

    #[test]
    fn unmatched_token_is_an_unknown_command() {
        let tree = volume_tree();
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let error = dispatch(&tree, &tokens(&["bogus", "extra"]), &mut recorder, &mut out)
            .expect_err("bogus token");
        match error {
            DispatchError::UnknownCommand { token } => assert_eq!(token, "bogus"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(recorder.calls.is_empty(), "no handler may run");
        assert!(out.is_empty(), "no summary may render");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let tree = volume_tree();
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let error =
            dispatch(&tree, &tokens(&["UP"]), &mut recorder, &mut out).expect_err("case mismatch");
        assert!(matches!(error, DispatchError::UnknownCommand { .. }));
    }

    #[test]
    fn handler_errors_propagate() {
        let failing: Node = Node::leaf("fail", "Always fails", |_, _| Err(HandlerFailure));
        let tree = Node::group("root", "Test root")
            .child(failing)
            .expect("add fail");
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let error = dispatch(&tree, &tokens(&["fail"]), &mut recorder, &mut out)
            .expect_err("handler failure");
        assert!(matches!(error, DispatchError::Handler(HandlerFailure)));
    }

    #[test]
    fn duplicate_children_fail_at_construction() {
        let error = Node::group("volume", "Control the default audio sink")
            .child(Node::leaf("up", "Raise the volume", record("up")))
            .expect("first insert")
            .child(Node::leaf("up", "Shadowing duplicate", record("up")))
            .unwrap_err();
        assert_eq!(
            error,
            CommandTreeError::DuplicateChild {
                parent: "volume",
                child: "up",
            }
        );
    }

    #[test]
    fn descent_stops_at_deepest_match() {
        let inner = Node::group("tray", "Tray commands")
            .child(Node::leaf("up", "Nested up", record("up")))
            .expect("nested up");
        let tree = Node::group("root", "Test root").child(inner).expect("tray");
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        dispatch(
            &tree,
            &tokens(&["tray", "up", "tail"]),
            &mut recorder,
            &mut out,
        )
        .expect("nested dispatch");
        assert_eq!(recorder.calls, vec![("up", tokens(&["tail"]))]);
    }
}
