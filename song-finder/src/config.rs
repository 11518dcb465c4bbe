use std::str::FromStr;
use std::time::Duration;

use eyre::WrapErr;
use models::Bucket;
use song_catalog::matcher::DEFAULT_MAX_COST;
use song_catalog::{CatalogSource, SearchOptions};

use crate::cli::RootArgs;
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::session::{SessionOptions, DEFAULT_RESULT_CAP, DEFAULT_VIEWPORT_WIDTH};

pub const DEFAULT_CATALOG: &str = "songs.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog: CatalogSource,
    pub viewport_width: u32,
    pub max_cost: f64,
    pub result_cap: usize,
    pub debounce: Duration,
    /// Letter the interactive shell opens on.
    pub default_bucket: Option<Bucket>,
}

impl AppConfig {
    pub fn from_env_and_args(args: &RootArgs) -> eyre::Result<Self> {
        Self::from_lookup_and_args(|key| std::env::var(key).ok(), args)
    }

    /// Like [`AppConfig::from_env_and_args`] with an injectable variable lookup.
    pub fn from_lookup_and_args<F>(lookup: F, args: &RootArgs) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog = args
            .catalog
            .clone()
            .or_else(|| lookup("SONG_FINDER_CATALOG"))
            .unwrap_or_else(|| DEFAULT_CATALOG.to_string());

        let viewport_width = match args.width {
            Some(width) => width,
            None => parse_var(&lookup, "SONG_FINDER_VIEWPORT_WIDTH")?
                .unwrap_or(DEFAULT_VIEWPORT_WIDTH),
        };
        let max_cost = match args.max_cost {
            Some(cost) => cost,
            None => parse_var(&lookup, "SONG_FINDER_MAX_COST")?.unwrap_or(DEFAULT_MAX_COST),
        };
        if !(0.0..=1.0).contains(&max_cost) {
            return Err(eyre::eyre!("max cost must be within 0..1, got {max_cost}"));
        }
        let result_cap = match args.result_cap {
            Some(cap) => cap,
            None => parse_var(&lookup, "SONG_FINDER_RESULT_CAP")?.unwrap_or(DEFAULT_RESULT_CAP),
        };
        if result_cap == 0 {
            return Err(eyre::eyre!(
                "SONG_FINDER_RESULT_CAP (--result-cap) must be at least 1"
            ));
        }
        let debounce = parse_var::<u64, _>(&lookup, "SONG_FINDER_DEBOUNCE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE);
        let default_bucket = parse_var(&lookup, "SONG_FINDER_DEFAULT_LETTER")?;

        Ok(Self {
            catalog: CatalogSource::parse(&catalog),
            viewport_width,
            max_cost,
            result_cap,
            debounce,
            default_bucket,
        })
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            viewport_width: self.viewport_width,
            search: SearchOptions {
                max_cost: self.max_cost,
                ..SearchOptions::default()
            },
            result_cap: self.result_cap,
            default_bucket: self.default_bucket,
            ..SessionOptions::default()
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .wrap_err_with(|| format!("{key} must be a valid {}", std::any::type_name::<T>()))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn args(extra: &[&str]) -> RootArgs {
        let mut argv = vec!["song-finder"];
        argv.extend_from_slice(extra);
        argv.push("buckets");
        RootArgs::try_parse_from(argv).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_env_or_flags() {
        let config = AppConfig::from_lookup_and_args(env(&[]), &args(&[])).unwrap();
        assert_eq!(config.catalog, CatalogSource::Path(PathBuf::from("songs.json")));
        assert_eq!(config.viewport_width, DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(config.max_cost, DEFAULT_MAX_COST);
        assert_eq!(config.result_cap, DEFAULT_RESULT_CAP);
        assert_eq!(config.debounce, DEFAULT_DEBOUNCE);
        assert_eq!(config.default_bucket, None);
    }

    #[test]
    fn default_letter_feeds_the_session() {
        let config = AppConfig::from_lookup_and_args(
            env(&[("SONG_FINDER_DEFAULT_LETTER", "q")]),
            &args(&[]),
        )
        .unwrap();
        assert_eq!(config.default_bucket, Some(Bucket::Letter('Q')));
        assert_eq!(
            config.session_options().default_bucket,
            Some(Bucket::Letter('Q'))
        );

        let err = AppConfig::from_lookup_and_args(
            env(&[("SONG_FINDER_DEFAULT_LETTER", "qq")]),
            &args(&[]),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("SONG_FINDER_DEFAULT_LETTER"));
    }

    #[test]
    fn env_is_read_and_flags_win() {
        let lookup = env(&[
            ("SONG_FINDER_CATALOG", "https://example.com/songs.json"),
            ("SONG_FINDER_VIEWPORT_WIDTH", "700"),
            ("SONG_FINDER_RESULT_CAP", "50"),
            ("SONG_FINDER_DEBOUNCE_MS", "1500"),
        ]);
        let config = AppConfig::from_lookup_and_args(&lookup, &args(&["--width", "900"])).unwrap();
        assert_eq!(
            config.catalog,
            CatalogSource::Url("https://example.com/songs.json".to_string())
        );
        assert_eq!(config.viewport_width, 900);
        assert_eq!(config.result_cap, 50);
        assert_eq!(config.debounce, Duration::from_millis(1500));
        assert_eq!(config.session_options().viewport_width, 900);
    }

    #[test]
    fn invalid_numbers_name_the_variable() {
        let err = AppConfig::from_lookup_and_args(
            env(&[("SONG_FINDER_VIEWPORT_WIDTH", "wide")]),
            &args(&[]),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("SONG_FINDER_VIEWPORT_WIDTH"));
    }

    #[test]
    fn result_cap_must_show_something() {
        let err = AppConfig::from_lookup_and_args(env(&[("SONG_FINDER_RESULT_CAP", "0")]), &args(&[]))
            .unwrap_err();
        assert!(err.to_string().contains("SONG_FINDER_RESULT_CAP"));
        assert!(
            AppConfig::from_lookup_and_args(env(&[]), &args(&["--result-cap", "0"])).is_err()
        );
    }

    #[test]
    fn max_cost_must_be_a_fraction() {
        assert!(AppConfig::from_lookup_and_args(env(&[]), &args(&["--max-cost", "1.5"])).is_err());
    }
}
