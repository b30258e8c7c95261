//! The message templater (§4.8). The placeholder syntax described by the
//! spec — `{{.Field}}`, the method call `{{.Arg 0}}`, and the bare
//! helpers `FileName`/`FileDir`/`TargetFileName`/`TargetDir`/`ArgsStr` —
//! is Go `text/template` syntax; no Rust crate reproduces that exact
//! dot-prefixed grammar, so this is a small hand-rolled mini-evaluator in
//! the same spirit as the teacher's own hand-rolled glob matcher
//! (`features/hooks/src/matcher.rs`'s `HookMatcher::Wildcard`) rather
//! than reaching for a general templating crate whose syntax wouldn't
//! match.

use std::path::Path;

/// The fields a rule message may interpolate. Unknown field names, or
/// any other parse/execute failure, fall back to the raw template text
/// unchanged (§4.8) — the templater never errors the decision path.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub tool: String,
    pub command: String,
    pub args: Vec<String>,
    pub file_path: String,
    pub target_file_path: String,
    pub url: String,
}

/// Expand `message` against `ctx`. Messages with no `{{` are returned
/// unchanged without being parsed at all.
pub fn render(message: &str, ctx: &TemplateContext) -> String {
    if !message.contains("{{") {
        return message.to_string();
    }

    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(start) = rest.find("{{") {
        let Some(end) = rest[start..].find("}}") else {
            // Unterminated placeholder: treat the whole thing as a parse
            // failure and fall back to the raw message.
            return message.to_string();
        };
        let end = start + end;

        let token = rest[start + 2..end].trim();
        match eval_token(token, ctx) {
            Some(value) => {
                out.push_str(&rest[..start]);
                out.push_str(&value);
            }
            None => return message.to_string(),
        }
        rest = &rest[end + 2..];
    }
    out.push_str(rest);
    out
}

fn eval_token(token: &str, ctx: &TemplateContext) -> Option<String> {
    if let Some(field) = token.strip_prefix('.') {
        return eval_dotted(field, ctx);
    }
    eval_helper(token, ctx)
}

fn eval_dotted(field: &str, ctx: &TemplateContext) -> Option<String> {
    if let Some(rest) = field.strip_prefix("Arg ") {
        let index: usize = rest.trim().parse().ok()?;
        return ctx.args.get(index).cloned();
    }
    match field {
        "Tool" => Some(ctx.tool.clone()),
        "Command" => Some(ctx.command.clone()),
        "FilePath" => Some(ctx.file_path.clone()),
        "TargetFilePath" => Some(ctx.target_file_path.clone()),
        "Url" => Some(ctx.url.clone()),
        _ => None,
    }
}

fn eval_helper(name: &str, ctx: &TemplateContext) -> Option<String> {
    match name {
        "FileName" => file_name(&ctx.file_path),
        "FileDir" => file_dir(&ctx.file_path),
        "TargetFileName" => file_name(&ctx.target_file_path),
        "TargetDir" => file_dir(&ctx.target_file_path),
        "ArgsStr" => Some(ctx.args.join(" ")),
        _ => None,
    }
}

fn file_name(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

fn file_dir(path: &str) -> Option<String> {
    Path::new(path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "template.test.rs"]
mod tests;
