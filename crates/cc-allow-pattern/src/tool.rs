//! The closed set of tools the dispatcher knows how to evaluate.

use serde::Deserialize;
use serde::Serialize;

/// A tool the host may invoke. Matches the `tool_name` field of the hook
/// protocol (§6); an empty `tool_name` is treated as `Bash` by the
/// dispatcher, not represented as its own variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Bash,
    Read,
    Write,
    Edit,
    WebFetch,
    Glob,
    Grep,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Bash => "Bash",
            Tool::Read => "Read",
            Tool::Write => "Write",
            Tool::Edit => "Edit",
            Tool::WebFetch => "WebFetch",
            Tool::Glob => "Glob",
            Tool::Grep => "Grep",
        }
    }
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bash" | "" => Ok(Tool::Bash),
            "Read" => Ok(Tool::Read),
            "Write" => Ok(Tool::Write),
            "Edit" => Ok(Tool::Edit),
            "WebFetch" => Ok(Tool::WebFetch),
            "Glob" => Ok(Tool::Glob),
            "Grep" => Ok(Tool::Grep),
            other => Err(format!("unknown tool {other:?}")),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
