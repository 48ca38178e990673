use crate::error::{Error, Result};

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Config {
  pub storage_dir_path: String,
}

impl Config {
  /// Loads the config from `$TASKBOOK_CONFIG`, falling back to
  /// `$HOME/.taskbook.json`. On first run the default config is written out.
  pub fn new() -> Result<Self> {
    const TASKBOOK_DEFAULT_STORAGE_DIR: &str = ".taskbook";
    const TASKBOOK_DEFAULT_CONFIG_NAME: &str = ".taskbook.json";

    let home_env =
      std::env::var("HOME").map_err(|_| Error::InvalidArgument("HOME is not set".to_owned()))?;
    let home = std::path::Path::new(home_env.as_str());

    let config_file_path = match std::env::var("TASKBOOK_CONFIG") {
      Ok(file_path) => std::path::Path::new(&file_path).to_path_buf(),
      Err(_) => home.join(TASKBOOK_DEFAULT_CONFIG_NAME),
    };

    if !config_file_path.exists() {
      let config = Self {
        storage_dir_path: home
          .join(TASKBOOK_DEFAULT_STORAGE_DIR)
          .to_string_lossy()
          .into_owned(),
      };

      let config_file = std::fs::File::create(&config_file_path)?;
      serde_json::to_writer_pretty(config_file, &config)?;
      return Ok(config);
    }

    let config_file = std::fs::File::open(&config_file_path)?;
    return Ok(serde_json::from_reader(config_file)?);
  }
}
