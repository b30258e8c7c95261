use super::*;
use pretty_assertions::assert_eq;

fn ctx() -> TemplateContext {
    TemplateContext {
        tool: "Bash".to_string(),
        command: "rm".to_string(),
        args: vec!["-rf".to_string(), "/tmp/build".to_string()],
        file_path: "/home/user/project/src/main.rs".to_string(),
        target_file_path: String::new(),
        url: String::new(),
    }
}

#[test]
fn message_without_placeholders_passes_through() {
    assert_eq!(render("plain message", &ctx()), "plain message");
}

#[test]
fn expands_dotted_field() {
    assert_eq!(render("tool is {{.Tool}}", &ctx()), "tool is Bash");
}

#[test]
fn expands_arg_method_call() {
    assert_eq!(render("first flag: {{.Arg 0}}", &ctx()), "first flag: -rf");
}

#[test]
fn expands_file_name_helper() {
    assert_eq!(render("editing {{FileName}}", &ctx()), "editing main.rs");
}

#[test]
fn expands_args_str_helper() {
    assert_eq!(render("{{ArgsStr}}", &ctx()), "-rf /tmp/build");
}

#[test]
fn unknown_field_falls_back_to_raw_message() {
    let raw = "{{.NoSuchField}}";
    assert_eq!(render(raw, &ctx()), raw);
}

#[test]
fn unterminated_placeholder_falls_back_to_raw_message() {
    let raw = "broken {{.Tool";
    assert_eq!(render(raw, &ctx()), raw);
}

#[test]
fn out_of_range_arg_index_falls_back_to_raw_message() {
    let raw = "{{.Arg 99}}";
    assert_eq!(render(raw, &ctx()), raw);
}
