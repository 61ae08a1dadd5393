use derive_builder::Builder;
use regex::Regex;

use crate::error::{ChangelogError, Result};

/// Raw options as collected from the command line and configuration.
#[derive(Debug, Clone, Default, Builder)]
#[builder(
    setter(into, strip_option),
    default,
    build_fn(private, name = "_build")
)]
pub struct BuildOptionsParams {
    /// Only keep tags at or newer than this version.
    pub from_version: Option<String>,
    /// Only keep the most recent tag.
    pub latest_only: bool,
    /// Regular expression tag names must match.
    pub filter: Option<String>,
    /// Only keep tags reachable from the current branch.
    pub ancestors_only: bool,
    /// Version to record for work not yet tagged.
    pub next_version: Option<String>,
    /// Collect merged pull requests newer than the latest tag.
    pub show_unreleased: bool,
}

impl BuildOptionsParamsBuilder {
    pub fn build(&self) -> Result<BuildOptions> {
        let params = self._build().map_err(|e| {
            ChangelogError::InvalidConfig(format!(
                "failed to build changelog options: {e}"
            ))
        })?;
        BuildOptions::new(params)
    }
}

/// Validated options for one changelog build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub from_version: Option<String>,
    pub latest_only: bool,
    pub filter: Option<Regex>,
    pub ancestors_only: bool,
    pub next_version: Option<String>,
    pub show_unreleased: bool,
}

impl BuildOptions {
    pub fn builder() -> BuildOptionsParamsBuilder {
        BuildOptionsParamsBuilder::default()
    }

    pub fn new(params: BuildOptionsParams) -> Result<Self> {
        let filter = params
            .filter
            .filter(|f| !f.is_empty())
            .map(|f| {
                Regex::new(&f).map_err(|e| {
                    ChangelogError::InvalidConfig(format!(
                        "invalid tag filter '{f}': {e}"
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            from_version: params.from_version.filter(|v| !v.is_empty()),
            latest_only: params.latest_only,
            filter,
            ancestors_only: params.ancestors_only,
            next_version: params.next_version.filter(|v| !v.is_empty()),
            show_unreleased: params.show_unreleased,
        })
    }
}
