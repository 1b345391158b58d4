use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;

/// 予定ファイルのパスを指定する環境変数。
pub const EVENTS_ENV_VAR: &str = "MONTHCAL_EVENTS";

const APP_DIR: &str = "monthcal";
const EVENTS_FILE: &str = "events.json";

/// 実行時の設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub events_path: PathBuf,
}

impl Config {
    /// 設定を読み込む。
    ///
    /// 予定ファイルのパスは、コマンドライン引数、環境変数`MONTHCAL_EVENTS`、
    /// データディレクトリの`monthcal/events.json`の順に優先する。
    ///
    /// # Arguments
    ///
    /// * `events_path` - コマンドライン引数で指定された予定ファイルのパス
    pub fn load(events_path: Option<PathBuf>) -> Result<Self> {
        Self::resolve(
            events_path,
            env::var_os(EVENTS_ENV_VAR).map(PathBuf::from),
            dirs::data_dir(),
        )
    }

    fn resolve(
        cli_path: Option<PathBuf>,
        env_path: Option<PathBuf>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let events_path = match (cli_path, env_path) {
            (Some(path), _) => path,
            (None, Some(path)) => path,
            (None, None) => data_dir
                .map(|dir| dir.join(APP_DIR).join(EVENTS_FILE))
                .with_context(|| {
                    format!(
                        "Failed to find data directory, pass --events or set {}",
                        EVENTS_ENV_VAR
                    )
                })?,
        };
        debug!("Events file: {}", events_path.display());

        Ok(Self { events_path })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::Config;

    #[rstest]
    #[case::cli_first(Some("cli.json"), Some("env.json"), Some("/data"), "cli.json")]
    #[case::env_second(None, Some("env.json"), Some("/data"), "env.json")]
    #[case::data_dir_last(None, None, Some("/data"), "/data/monthcal/events.json")]
    fn test_resolve(
        #[case] cli: Option<&str>,
        #[case] env: Option<&str>,
        #[case] data_dir: Option<&str>,
        #[case] expected: &str,
    ) {
        let config = Config::resolve(
            cli.map(PathBuf::from),
            env.map(PathBuf::from),
            data_dir.map(PathBuf::from),
        )
        .unwrap();

        assert_eq!(config.events_path, PathBuf::from(expected));
    }

    #[test]
    fn test_resolve_without_any_path() {
        assert!(Config::resolve(None, None, None).is_err());
    }
}
