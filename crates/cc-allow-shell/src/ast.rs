//! Two-pass Bash AST walker (§4.3): turns a parsed [`tree_sitter::Tree`]
//! into a flat [`ExtractionRecord`] of commands, redirects and heredocs,
//! with effective cwd and pipe topology already resolved.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::path::Path;
use std::path::PathBuf;

use cc_allow_error::AstParseError;
use tree_sitter::Node;
use tree_sitter::Parser;

pub type Result<T> = std::result::Result<T, AstParseError>;

/// A single simple (or declaration) command extracted from the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub pipes_to: Vec<String>,
    pub pipes_from: Vec<String>,
    pub background: bool,
    pub subshell_depth: u32,
    pub is_user_function: bool,
    pub dynamic_token_spans: Vec<String>,
}

impl Command {
    pub fn has_dynamic_tokens(&self) -> bool {
        !self.dynamic_token_spans.is_empty()
    }
}

/// Redirection kinds (§3 `Redirect`), collapsed to the subset that
/// matters for policy: which direction, and whether it truncates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
    Append,
    ReadWrite,
    Dup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub command_index: usize,
    pub kind: RedirectKind,
    pub target: String,
    pub is_fd_redirect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heredoc {
    pub command_index: usize,
    pub is_here_string: bool,
    pub delimiter: String,
    pub body: String,
    pub quoted: bool,
}

/// The output of walking one parsed command line (§3 `ExtractionRecord`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRecord {
    pub commands: Vec<Command>,
    pub redirects: Vec<Redirect>,
    pub heredocs: Vec<Heredoc>,
    pub has_subshell: bool,
    pub has_function_definition: bool,
    pub has_background: bool,
    /// Function bodies by name, walked eagerly so a rule can inspect what
    /// a permitted function actually does; bodies are never spliced into
    /// `commands` since they only run once the function is invoked.
    pub functions: BTreeMap<String, ExtractionRecord>,
}

/// Parse `source` as a Bash script and extract its [`ExtractionRecord`].
pub fn extract(source: &str, initial_cwd: &Path) -> Result<ExtractionRecord> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_bash::LANGUAGE.into())
        .map_err(|e| AstParseError::new(format!("failed to load bash grammar: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AstParseError::new("tree-sitter produced no tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!(source, "bash parse tree contains error nodes");
    }

    let function_names = collect_function_names(root, source.as_bytes());

    let mut walker = Walker {
        source: source.as_bytes(),
        cwd: initial_cwd.to_path_buf(),
        function_names: &function_names,
        record: ExtractionRecord::default(),
        depth: 0,
    };
    walker.walk_block(root);

    // The external scanner in tree-sitter-bash emits `heredoc_body` nodes
    // once it reaches the line after the terminating delimiter, which can
    // land them outside the `heredoc_redirect` node that names the
    // delimiter. Any heredoc whose body the structural walk missed is
    // backfilled here from a flat, document-order scan.
    backfill_heredoc_bodies(root, source.as_bytes(), &mut walker.record);

    Ok(walker.record)
}

fn backfill_heredoc_bodies(root: Node, source: &[u8], record: &mut ExtractionRecord) {
    if record.heredocs.iter().all(|h| !h.body.is_empty() || h.is_here_string) {
        return;
    }
    let mut bodies = VecDeque::new();
    collect_heredoc_bodies(root, source, &mut bodies);
    for heredoc in &mut record.heredocs {
        if !heredoc.is_here_string && heredoc.body.is_empty() {
            if let Some(body) = bodies.pop_front() {
                heredoc.body = body;
            }
        }
    }
}

fn collect_heredoc_bodies(node: Node, source: &[u8], out: &mut VecDeque<String>) {
    if node.kind() == "heredoc_body" {
        out.push_back(text_of(node, source).to_string());
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_heredoc_bodies(child, source, out);
    }
}

fn collect_function_names(node: Node, source: &[u8]) -> HashSet<String> {
    let mut names = HashSet::new();
    collect_function_names_rec(node, source, &mut names);
    names
}

fn collect_function_names_rec(node: Node, source: &[u8], names: &mut HashSet<String>) {
    if node.kind() == "function_definition" {
        if let Some(name_node) = node.child_by_field_name("name") {
            names.insert(text_of(name_node, source).to_string());
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_function_names_rec(child, source, names);
    }
}

struct Walker<'a> {
    source: &'a [u8],
    cwd: PathBuf,
    function_names: &'a HashSet<String>,
    record: ExtractionRecord,
    depth: u32,
}

impl<'a> Walker<'a> {
    /// Walk a node that represents a sequence of statements (`program`,
    /// `list`, the body of a `subshell`/`compound_statement`), recursing
    /// into pipelines and individual statements in document order.
    fn walk_block(&mut self, node: Node) {
        let mut cursor = node.walk();
        let mut pending_background = false;
        // cwd as of just before the statement we're about to walk; used to
        // undo a `cd` on the left of `||` before walking the right side,
        // since `||`'s right side sees the outer cwd, not the left's.
        let mut cwd_before_statement = self.cwd.clone();
        let mut saw_or = false;
        for child in node.children(&mut cursor) {
            match child.kind() {
                "&" => pending_background = true,
                "||" => saw_or = true,
                "&&" | ";" | "\n" => {}
                _ if is_statement_kind(child.kind()) => {
                    if saw_or {
                        self.cwd = cwd_before_statement.clone();
                        saw_or = false;
                    }
                    cwd_before_statement = self.cwd.clone();
                    let start = self.record.commands.len();
                    self.walk_statement(child);
                    if pending_background {
                        for cmd in &mut self.record.commands[start..] {
                            cmd.background = true;
                        }
                        self.record.has_background = true;
                        pending_background = false;
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_statement(&mut self, node: Node) {
        match node.kind() {
            "pipeline" => self.walk_pipeline(node),
            "redirected_statement" => self.walk_redirected_statement(node),
            "subshell" => self.walk_subshell(node),
            "negated_command" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if is_statement_kind(child.kind()) {
                        self.walk_statement(child);
                    }
                }
            }
            "function_definition" => self.walk_function_definition(node),
            "command" | "declaration_command" | "unset_command" | "test_command" => {
                self.walk_command(node);
            }
            "compound_statement" | "do_group" | "for_statement" | "c_style_for_statement"
            | "while_statement" | "if_statement" | "case_statement" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if is_statement_kind(child.kind()) {
                        self.walk_statement(child);
                    } else if child.kind() == "body" || child.kind() == "compound_statement" {
                        self.walk_block(child);
                    }
                }
            }
            "list" => self.walk_block(node),
            _ => {}
        }
    }

    fn walk_pipeline(&mut self, node: Node) {
        let mut cursor = node.walk();
        let mut names = Vec::new();
        let mut indices = Vec::new();
        for child in node.children(&mut cursor) {
            if is_statement_kind(child.kind()) {
                let idx_before = self.record.commands.len();
                self.walk_statement(child);
                if let Some(cmd) = self.record.commands.get(idx_before) {
                    names.push(cmd.name.clone());
                    indices.push(idx_before);
                }
            }
        }
        for (pos, &idx) in indices.iter().enumerate() {
            if pos > 0 {
                self.record.commands[idx].pipes_from = vec![names[pos - 1].clone()];
            }
            if pos + 1 < indices.len() {
                self.record.commands[idx].pipes_to = vec![names[pos + 1].clone()];
            }
        }
    }

    fn walk_redirected_statement(&mut self, node: Node) {
        let mut cursor = node.walk();
        let mut command_index = None;
        for child in node.children(&mut cursor) {
            if is_statement_kind(child.kind()) {
                let before = self.record.commands.len();
                self.walk_statement(child);
                if self.record.commands.len() > before {
                    command_index = Some(self.record.commands.len() - 1);
                }
            } else if matches!(
                child.kind(),
                "file_redirect" | "heredoc_redirect" | "herestring_redirect"
            ) {
                if let Some(idx) = command_index {
                    self.walk_redirect(child, idx);
                }
            }
        }
    }

    fn walk_subshell(&mut self, node: Node) {
        self.record.has_subshell = true;
        let saved_cwd = self.cwd.clone();
        self.depth += 1;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "(" && child.kind() != ")" {
                self.walk_block(child);
            }
        }
        self.depth -= 1;
        // Subshells never leak a `cd` back to the parent.
        self.cwd = saved_cwd;
    }

    fn walk_function_definition(&mut self, node: Node) {
        self.record.has_function_definition = true;
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = text_of(name_node, self.source).to_string();
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        let mut sub = Walker {
            source: self.source,
            cwd: self.cwd.clone(),
            function_names: self.function_names,
            record: ExtractionRecord::default(),
            depth: 0,
        };
        sub.walk_block(body);
        self.record.functions.insert(name, sub.record);
    }

    fn walk_command(&mut self, node: Node) {
        let mut name = String::new();
        let mut args = Vec::new();
        let mut dynamic_spans = Vec::new();
        let mut redirect_children = Vec::new();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "command_name" => name = text_of(child, self.source).to_string(),
                "file_redirect" | "heredoc_redirect" | "herestring_redirect" => {
                    redirect_children.push(child);
                }
                "word" | "string" | "raw_string" | "ansi_c_string" | "translated_string"
                | "concatenation" | "number" | "simple_expansion" | "expansion"
                | "command_substitution" | "variable_assignment" => {
                    args.push(text_of(child, self.source).to_string());
                    collect_dynamic_spans(child, self.source, &mut dynamic_spans);
                }
                _ => {}
            }
        }

        if name.is_empty() {
            return;
        }

        let is_user_function = self.function_names.contains(&name);
        let command = Command {
            name: name.clone(),
            args,
            cwd: self.cwd.clone(),
            pipes_to: Vec::new(),
            pipes_from: Vec::new(),
            background: false,
            subshell_depth: self.depth,
            is_user_function,
            dynamic_token_spans: dynamic_spans,
        };
        let index = self.record.commands.len();
        self.record.commands.push(command);

        for redirect_child in redirect_children {
            self.walk_redirect(redirect_child, index);
        }

        self.maybe_apply_cd(index);
    }

    fn maybe_apply_cd(&mut self, index: usize) {
        let cmd = &self.record.commands[index];
        if cmd.name != "cd" {
            return;
        }
        if cmd.has_dynamic_tokens() {
            // The target can't be resolved lexically; the real cwd is now
            // unknown, so erase it rather than leave the stale value a
            // later `path:` rule could incorrectly match against.
            self.cwd = PathBuf::new();
            return;
        }
        let Some(target) = cmd.args.first() else {
            // No-arg `cd` goes to `$HOME`.
            self.cwd = dirs_home().unwrap_or_default();
            return;
        };
        if target.starts_with('-') || target.starts_with('$') {
            self.cwd = PathBuf::new();
            return;
        }
        self.cwd = join_cwd(&self.cwd, target);
    }

    fn walk_redirect(&mut self, node: Node, command_index: usize) {
        match node.kind() {
            "file_redirect" => {
                let mut kind = RedirectKind::Out;
                let mut target = String::new();
                let mut is_fd = false;
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    match child.kind() {
                        ">" => kind = RedirectKind::Out,
                        ">>" => kind = RedirectKind::Append,
                        "<" => kind = RedirectKind::In,
                        "<>" => kind = RedirectKind::ReadWrite,
                        "&>" | ">&" | ">|" => kind = RedirectKind::Dup,
                        "file_descriptor" => is_fd = true,
                        "word" | "string" | "raw_string" | "concatenation"
                        | "simple_expansion" | "expansion" | "command_substitution" => {
                            target = text_of(child, self.source).to_string();
                        }
                        _ => {}
                    }
                }
                self.record.redirects.push(Redirect {
                    command_index,
                    kind,
                    target,
                    is_fd_redirect: is_fd,
                });
            }
            "herestring_redirect" => {
                let mut cursor = node.walk();
                let mut target = String::new();
                for child in node.children(&mut cursor) {
                    if child.kind() != "<<<" {
                        target = text_of(child, self.source).to_string();
                    }
                }
                self.record.heredocs.push(Heredoc {
                    command_index,
                    is_here_string: true,
                    delimiter: String::new(),
                    body: target,
                    quoted: false,
                });
            }
            "heredoc_redirect" => {
                let mut cursor = node.walk();
                let mut delimiter = String::new();
                let mut body = String::new();
                let mut quoted = false;
                for child in node.children(&mut cursor) {
                    match child.kind() {
                        "heredoc_start" => {
                            let raw = text_of(child, self.source);
                            quoted = raw.contains('\'') || raw.contains('"');
                            delimiter = raw
                                .trim_start_matches("<<-")
                                .trim_start_matches("<<")
                                .trim_matches(|c| c == '\'' || c == '"')
                                .trim()
                                .to_string();
                        }
                        "heredoc_body" => {
                            body = text_of(child, self.source).to_string();
                        }
                        _ => {}
                    }
                }
                self.record.heredocs.push(Heredoc {
                    command_index,
                    is_here_string: false,
                    delimiter,
                    body,
                    quoted,
                });
            }
            _ => {}
        }
    }
}

fn is_statement_kind(kind: &str) -> bool {
    matches!(
        kind,
        "pipeline"
            | "redirected_statement"
            | "subshell"
            | "negated_command"
            | "function_definition"
            | "command"
            | "declaration_command"
            | "unset_command"
            | "test_command"
            | "compound_statement"
            | "do_group"
            | "for_statement"
            | "c_style_for_statement"
            | "while_statement"
            | "if_statement"
            | "case_statement"
            | "list"
    )
}

fn collect_dynamic_spans(node: Node, source: &[u8], out: &mut Vec<String>) {
    if matches!(
        node.kind(),
        "command_substitution" | "process_substitution" | "expansion" | "simple_expansion"
    ) {
        out.push(text_of(node, source).to_string());
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_dynamic_spans(child, source, out);
    }
}

fn text_of<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// A minimal, dependency-free lexical `cd` resolver: handles absolute
/// paths, `~`, and `.`/`..` segments, without touching the filesystem.
fn join_cwd(cwd: &Path, target: &str) -> PathBuf {
    let raw = if let Some(rest) = target.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            match dirs_home() {
                Some(home) => {
                    if rest.is_empty() {
                        home
                    } else {
                        home.join(rest.trim_start_matches('/'))
                    }
                }
                None => PathBuf::from(target),
            }
        } else {
            PathBuf::from(target)
        }
    } else if Path::new(target).is_absolute() {
        PathBuf::from(target)
    } else {
        cwd.join(target)
    };
    clean_lexical(&raw)
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn clean_lexical(path: &Path) -> PathBuf {
    let mut out: VecDeque<std::path::Component> = VecDeque::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                if !matches!(out.back(), None | Some(std::path::Component::RootDir)) {
                    out.pop_back();
                } else {
                    out.push_back(component);
                }
            }
            other => out.push_back(other),
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
#[path = "ast.test.rs"]
mod tests;
