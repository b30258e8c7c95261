//! The tool dispatcher (§4.7): reads one `PreToolUse` hook invocation and
//! routes it to the rule evaluator or the file/URL evaluator by tool name.

mod dispatch;
mod hook;

pub use dispatch::dispatch;
pub use hook::HookInput;
pub use hook::HookOutput;
pub use hook::ToolInput;
