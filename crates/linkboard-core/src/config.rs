use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use serde::Deserialize;
use tracing::{
  debug,
  info,
  warn
};

pub const CONFIG_ENV_VAR: &str =
  "LINKBOARD_CONFIG";
pub const DEFAULT_API_BASE: &str =
  "http://127.0.0.1:8000";

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct ClientConfig {
  /// Prefix joined onto every `/api/...`
  /// path. Empty means same origin.
  pub api_base:    String,
  pub log_filter:  String,
  pub color:       bool,
  #[serde(skip)]
  pub loaded_from: Option<PathBuf>
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_base:    DEFAULT_API_BASE
        .to_string(),
      log_filter:  "warn".to_string(),
      color:       true,
      loaded_from: None
    }
  }
}

impl ClientConfig {
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    toml::from_str(text).map_err(|e| {
      anyhow!(
        "invalid linkboard config: {e}"
      )
    })
  }

  /// Loads the config file named by
  /// `override_path`, then
  /// `$LINKBOARD_CONFIG`, then the user
  /// config dir. Missing files mean
  /// defaults.
  #[tracing::instrument(skip(
    override_path
  ))]
  pub fn load(
    override_path: Option<&Path>
  ) -> anyhow::Result<Self> {
    let Some(path) = resolve_config_path(
      override_path
    )?
    else {
      warn!(
        "no linkboard config found; \
         using defaults"
      );
      return Ok(Self::default());
    };

    info!(config = %path.display(), "loading config");
    let text = fs::read_to_string(&path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;

    let mut cfg =
      Self::from_toml_str(&text)
        .with_context(|| {
          format!(
            "failed to parse {}",
            path.display()
          )
        })?;
    cfg.loaded_from = Some(path);
    Ok(cfg)
  }

  pub fn apply_api_base(
    &mut self,
    api_base: Option<String>
  ) {
    if let Some(base) = api_base {
      debug!(api_base = %base, "overriding api base");
      self.api_base = base;
    }
  }
}

fn resolve_config_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(from_env) =
    std::env::var(CONFIG_ENV_VAR)
  {
    if from_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      from_env
    )));
  }

  let Some(config_dir) =
    dirs::config_dir()
  else {
    debug!(
      "cannot determine config \
       directory"
    );
    return Ok(None);
  };

  let candidate = config_dir
    .join("linkboard")
    .join("config.toml");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}
