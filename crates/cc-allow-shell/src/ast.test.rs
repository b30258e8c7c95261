use super::*;
use pretty_assertions::assert_eq;

fn extract_at(source: &str, cwd: &str) -> ExtractionRecord {
    extract(source, Path::new(cwd)).expect("should parse")
}

#[test]
fn simple_command_extracts_name_and_args() {
    let record = extract_at("echo hello world", "/home/user");
    assert_eq!(record.commands.len(), 1);
    assert_eq!(record.commands[0].name, "echo");
    assert_eq!(record.commands[0].args, vec!["hello", "world"]);
}

#[test]
fn pipeline_links_commands_in_both_directions() {
    let record = extract_at("cat file.txt | grep foo | wc -l", "/home/user");
    assert_eq!(record.commands.len(), 3);
    assert_eq!(record.commands[0].pipes_to, vec!["grep"]);
    assert!(record.commands[0].pipes_from.is_empty());
    assert_eq!(record.commands[1].pipes_from, vec!["cat"]);
    assert_eq!(record.commands[1].pipes_to, vec!["wc"]);
    assert_eq!(record.commands[2].pipes_from, vec!["grep"]);
}

#[test]
fn cd_with_static_argument_updates_effective_cwd() {
    let record = extract_at("cd /tmp && ls", "/home/user");
    assert_eq!(record.commands[0].name, "cd");
    assert_eq!(record.commands[1].name, "ls");
    assert_eq!(record.commands[1].cwd, Path::new("/tmp"));
}

#[test]
fn cd_with_dynamic_argument_erases_cwd() {
    let record = extract_at("cd \"$(mktemp -d)\" && ls", "/home/user");
    assert_eq!(record.commands[1].cwd, Path::new(""));
}

#[test]
fn relative_cd_joins_against_current_cwd() {
    let record = extract_at("cd sub && cd ../other && pwd", "/home/user");
    assert_eq!(record.commands[2].cwd, Path::new("/home/other"));
}

#[test]
fn no_arg_cd_resolves_to_home() {
    let record = extract_at("cd && pwd", "/home/user");
    let expected = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    assert_eq!(record.commands[1].cwd, expected);
}

#[test]
fn cd_dash_erases_cwd() {
    let record = extract_at("cd - && pwd", "/home/user");
    assert_eq!(record.commands[1].cwd, Path::new(""));
}

#[test]
fn cd_with_variable_target_erases_cwd() {
    let record = extract_at("cd \"$OLDPWD\" && pwd", "/home/user");
    assert_eq!(record.commands[1].cwd, Path::new(""));
}

#[test]
fn or_operator_does_not_leak_left_side_cd_to_right_side() {
    let record = extract_at("false || cd /tmp && pwd", "/home/user");
    let cd_cmd = record.commands.iter().find(|c| c.name == "cd").unwrap();
    assert_eq!(cd_cmd.cwd, Path::new("/home/user"));
    let pwd_cmd = record.commands.iter().find(|c| c.name == "pwd").unwrap();
    assert_eq!(pwd_cmd.cwd, Path::new("/tmp"));
}

#[test]
fn command_substitution_is_flagged_dynamic() {
    let record = extract_at("echo $(whoami)", "/home/user");
    assert!(record.commands[0].has_dynamic_tokens());
}

#[test]
fn output_redirect_is_recorded_against_its_command() {
    let record = extract_at("echo hi > /tmp/out.txt", "/home/user");
    assert_eq!(record.redirects.len(), 1);
    assert_eq!(record.redirects[0].command_index, 0);
    assert_eq!(record.redirects[0].kind, RedirectKind::Out);
    assert_eq!(record.redirects[0].target, "/tmp/out.txt");
}

#[test]
fn append_redirect_is_distinguished_from_truncate() {
    let record = extract_at("echo hi >> /tmp/out.txt", "/home/user");
    assert_eq!(record.redirects[0].kind, RedirectKind::Append);
}

#[test]
fn heredoc_is_captured_with_delimiter_and_body() {
    let record = extract_at("cat <<EOF\nhello\nEOF\n", "/home/user");
    assert_eq!(record.heredocs.len(), 1);
    assert_eq!(record.heredocs[0].delimiter, "EOF");
    assert!(record.heredocs[0].body.contains("hello"));
    assert!(!record.heredocs[0].is_here_string);
}

#[test]
fn here_string_is_distinguished_from_heredoc() {
    let record = extract_at("cat <<< \"hello\"", "/home/user");
    assert_eq!(record.heredocs.len(), 1);
    assert!(record.heredocs[0].is_here_string);
}

#[test]
fn subshell_sets_flag_and_does_not_leak_cd() {
    let record = extract_at("(cd /tmp && ls); pwd", "/home/user");
    assert!(record.has_subshell);
    let pwd_cmd = record.commands.iter().find(|c| c.name == "pwd").unwrap();
    assert_eq!(pwd_cmd.cwd, Path::new("/home/user"));
}

#[test]
fn background_marks_the_preceding_statement() {
    let record = extract_at("sleep 10 &", "/home/user");
    assert!(record.has_background);
    assert!(record.commands[0].background);
}

#[test]
fn function_definition_is_not_inlined_into_top_level_commands() {
    let record = extract_at("deploy() { rm -rf /tmp/build; }\necho done", "/home/user");
    assert!(record.has_function_definition);
    assert_eq!(record.commands.len(), 1);
    assert_eq!(record.commands[0].name, "echo");
    assert!(record.functions.contains_key("deploy"));
    assert_eq!(record.functions["deploy"].commands[0].name, "rm");
}

#[test]
fn invoking_a_user_function_is_flagged() {
    let record = extract_at("deploy() { :; }\ndeploy", "/home/user");
    let invocation = record
        .commands
        .iter()
        .find(|c| c.name == "deploy")
        .expect("invocation recorded");
    assert!(invocation.is_user_function);
}
