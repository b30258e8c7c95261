//! Configuration data model and merger (§3, §4.2).
//!
//! Raw TOML files are deserialized into [`raw::RawConfig`] (a thin, purely
//! textual mirror of the file schema), then compiled into a [`Config`] —
//! at which point every pattern string has become a typed
//! `cc_allow_pattern::Pattern`/`BoolExpr` and alias references have been
//! inlined. A sequence of `Config`s is folded into one [`MergedConfig`] by
//! [`merge::merge`].

mod defaults;
mod merge;
mod model;
mod raw;
mod tracked;

pub use defaults::apply_defaults;
pub use merge::merge;
pub use model::AllowMode;
pub use model::ArgsMatch;
pub use model::BashRule;
pub use model::CommandsList;
pub use model::Config;
pub use model::Constructs;
pub use model::DebugConfig;
pub use model::FileToolConfig;
pub use model::HeredocRule;
pub use model::MergedBashRule;
pub use model::MergedConfig;
pub use model::MergedFileToolConfig;
pub use model::MergedHeredocRule;
pub use model::MergedRedirectRule;
pub use model::PipeContext;
pub use model::RedirectRule;
pub use model::WebFetchConfig;
pub use tracked::Tracked;

/// Parse raw TOML text into a compiled [`Config`] for `path`.
pub fn load_str(path: impl Into<std::path::PathBuf>, text: &str) -> Result<Config, cc_allow_error::ConfigLoadError> {
    let path = path.into();
    let raw: raw::RawConfig = toml::from_str(text).map_err(|source| cc_allow_error::ConfigLoadError::Toml {
        path: path.clone(),
        source,
    })?;
    Config::compile(path, raw).map_err(cc_allow_error::ConfigLoadError::from)
}

/// Read and parse a TOML file into a compiled [`Config`]. A missing file
/// is not an error at this layer (discovery is responsible for skipping
/// absent files per §6); call sites should check existence first.
pub fn load_file(path: impl Into<std::path::PathBuf>) -> Result<Config, cc_allow_error::ConfigLoadError> {
    let path = path.into();
    let text = std::fs::read_to_string(&path).map_err(|source| cc_allow_error::ConfigLoadError::Io {
        path: path.clone(),
        source,
    })?;
    load_str(path, &text)
}
