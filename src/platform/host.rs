//! Attribute detection for the machine running the CLI.
//!
//! A terminal session has no screen metrics, touch input, cookie jar or web
//! storage, so those report as absent. Locale, timezone, CPU and memory come from
//! the environment and the local filesystem.

use super::{Geolocation, Platform, Position, PositionError, PositionOptions, Screen};
use std::{env, fs, path::Path, thread};
use tracing::debug;

const MEMINFO_PATH: &str = "/proc/meminfo";
const TIMEZONE_PATH: &str = "/etc/timezone";
const LOCALTIME_PATH: &str = "/etc/localtime";

/// Lower and upper bounds for the reported memory, in GiB.
const MIN_DEVICE_MEMORY: f64 = 0.25;
const MAX_DEVICE_MEMORY: f64 = 8.0;

#[derive(Clone, Debug, Default)]
pub struct HostPlatform {
    geolocation: Option<FixedGeolocation>,
}

impl HostPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_geolocation(mut self, geolocation: FixedGeolocation) -> Self {
        self.geolocation = Some(geolocation);
        self
    }
}

impl Platform for HostPlatform {
    type Geolocation = FixedGeolocation;

    fn user_agent(&self) -> Option<String> {
        Some(format!(
            "{}/{} ({}; {})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env::consts::OS,
            env::consts::ARCH
        ))
    }

    fn language(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .and_then(|locale| locale_to_language(&locale))
    }

    fn languages(&self) -> Option<Vec<String>> {
        env::var("LANGUAGE")
            .ok()
            .map(|value| parse_language_list(&value))
            .filter(|languages| !languages.is_empty())
    }

    fn timezone(&self) -> Option<String> {
        if let Some(zone) = env::var("TZ").ok().and_then(|tz| zone_from_tz(&tz)) {
            return Some(zone);
        }

        if let Some(zone) = fs::read_to_string(TIMEZONE_PATH)
            .ok()
            .map(|contents| contents.trim().to_string())
            .filter(|zone| !zone.is_empty())
        {
            return Some(zone);
        }

        fs::read_link(LOCALTIME_PATH)
            .ok()
            .and_then(|target| zone_from_path(&target))
    }

    fn screen(&self) -> Option<Screen> {
        None
    }

    fn hardware_concurrency(&self) -> Option<u32> {
        thread::available_parallelism()
            .ok()
            .and_then(|count| u32::try_from(count.get()).ok())
    }

    fn device_memory(&self) -> Option<f64> {
        let contents = fs::read_to_string(MEMINFO_PATH).ok()?;
        let kib = parse_mem_total(&contents)?;
        approximate_memory(kib as f64 / (1024.0 * 1024.0))
    }

    fn touch_support(&self) -> bool {
        false
    }

    fn cookie_enabled(&self) -> bool {
        false
    }

    fn session_storage(&self) -> bool {
        false
    }

    fn local_storage(&self) -> bool {
        false
    }

    fn geolocation(&self) -> Option<&FixedGeolocation> {
        self.geolocation.as_ref()
    }
}

/// A position supplied out-of-band as `LAT,LON`. Values are validated when the
/// position is read, not when it is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedGeolocation {
    latitude: String,
    longitude: String,
}

impl FixedGeolocation {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let (latitude, longitude) = value.split_once(',').unwrap_or((value, ""));

        Self {
            latitude: latitude.trim().to_string(),
            longitude: longitude.trim().to_string(),
        }
    }
}

impl Geolocation for FixedGeolocation {
    async fn current_position(&self, _options: PositionOptions) -> Result<Position, PositionError> {
        let position = Position {
            latitude: parse_coordinate(&self.latitude),
            longitude: parse_coordinate(&self.longitude),
        };

        debug!("fixed position: {:?}", position);

        Ok(position)
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// `pt_BR.UTF-8` → `pt-BR`. The `C` and `POSIX` locales carry no language.
fn locale_to_language(locale: &str) -> Option<String> {
    let base = locale
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    Some(base.replace('_', "-"))
}

fn parse_language_list(value: &str) -> Vec<String> {
    value.split(':').filter_map(locale_to_language).collect()
}

fn zone_from_tz(tz: &str) -> Option<String> {
    let tz = tz.trim().trim_start_matches(':');

    if tz.is_empty() {
        None
    } else if tz.starts_with('/') {
        zone_from_path(Path::new(tz))
    } else {
        Some(tz.to_string())
    }
}

fn zone_from_path(path: &Path) -> Option<String> {
    let path = path.to_string_lossy();
    let (_, zone) = path.split_once("zoneinfo/")?;

    if zone.is_empty() {
        None
    } else {
        Some(zone.to_string())
    }
}

fn parse_mem_total(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find_map(|line| line.strip_prefix("MemTotal:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kib| kib.parse().ok())
}

/// Round down to a power of two and clamp, so the figure is coarse enough to stay
/// stable across reboots.
fn approximate_memory(gib: f64) -> Option<f64> {
    if !gib.is_finite() || gib <= 0.0 {
        return None;
    }

    let rounded = 2f64.powi(gib.log2().floor() as i32);

    Some(rounded.clamp(MIN_DEVICE_MEMORY, MAX_DEVICE_MEMORY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn options() -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: false,
            timeout: Duration::from_secs(1),
            maximum_age: Duration::from_secs(60),
        }
    }

    #[test]
    fn locale_to_language_strips_encoding_and_modifier() {
        assert_eq!(locale_to_language("pt_BR.UTF-8"), Some("pt-BR".to_string()));
        assert_eq!(locale_to_language("de_DE@euro"), Some("de-DE".to_string()));
        assert_eq!(locale_to_language("en"), Some("en".to_string()));
        assert_eq!(locale_to_language("C"), None);
        assert_eq!(locale_to_language("POSIX"), None);
        assert_eq!(locale_to_language("C.UTF-8"), None);
        assert_eq!(locale_to_language(""), None);
    }

    #[test]
    fn parse_language_list_keeps_order() {
        assert_eq!(
            parse_language_list("pt_BR:en_US:C:en"),
            vec!["pt-BR".to_string(), "en-US".to_string(), "en".to_string()]
        );
        assert!(parse_language_list("").is_empty());
    }

    #[test]
    fn zone_from_tz_handles_names_and_paths() {
        assert_eq!(
            zone_from_tz(":America/Sao_Paulo"),
            Some("America/Sao_Paulo".to_string())
        );
        assert_eq!(
            zone_from_tz("/usr/share/zoneinfo/Europe/Lisbon"),
            Some("Europe/Lisbon".to_string())
        );
        assert_eq!(zone_from_tz("UTC"), Some("UTC".to_string()));
        assert_eq!(zone_from_tz(""), None);
        assert_eq!(zone_from_tz("/etc/somewhere"), None);
    }

    #[test]
    fn parse_mem_total_reads_kib() {
        let meminfo = "MemTotal:       16318888 kB\nMemFree:         1234 kB\n";
        assert_eq!(parse_mem_total(meminfo), Some(16_318_888));
        assert_eq!(parse_mem_total("MemFree: 1 kB"), None);
    }

    #[test]
    fn approximate_memory_rounds_down_and_clamps() {
        assert_eq!(approximate_memory(15.56), Some(8.0));
        assert_eq!(approximate_memory(5.9), Some(4.0));
        assert_eq!(approximate_memory(2.0), Some(2.0));
        assert_eq!(approximate_memory(0.7), Some(0.5));
        assert_eq!(approximate_memory(0.01), Some(0.25));
        assert_eq!(approximate_memory(0.0), None);
        assert_eq!(approximate_memory(f64::NAN), None);
    }

    #[test]
    fn language_reads_lang_fallback() {
        temp_env::with_vars(
            [
                ("LC_ALL", None::<&str>),
                ("LC_MESSAGES", None::<&str>),
                ("LANG", Some("es_AR.UTF-8")),
            ],
            || {
                assert_eq!(HostPlatform::new().language(), Some("es-AR".to_string()));
            },
        );
    }

    #[test]
    fn language_prefers_lc_all() {
        temp_env::with_vars(
            [("LC_ALL", Some("fr_FR.UTF-8")), ("LANG", Some("en_US.UTF-8"))],
            || {
                assert_eq!(HostPlatform::new().language(), Some("fr-FR".to_string()));
            },
        );
    }

    #[test]
    fn timezone_reads_tz() {
        temp_env::with_var("TZ", Some("Asia/Tokyo"), || {
            assert_eq!(HostPlatform::new().timezone(), Some("Asia/Tokyo".to_string()));
        });
    }

    #[test]
    fn host_has_no_browser_capabilities() {
        let platform = HostPlatform::new();
        assert!(platform.screen().is_none());
        assert!(!platform.touch_support());
        assert!(!platform.cookie_enabled());
        assert!(!platform.session_storage());
        assert!(!platform.local_storage());
        assert!(platform.geolocation().is_none());
        assert!(platform
            .user_agent()
            .is_some_and(|agent| agent.starts_with("device-login/")));
    }

    #[tokio::test]
    async fn fixed_geolocation_parses_coordinates() {
        let geolocation = FixedGeolocation::parse(" 40.7128 , -74.0060 ");
        let position = geolocation.current_position(options()).await;
        assert_eq!(position, Ok(Position::new(40.7128, -74.006)));
    }

    #[tokio::test]
    async fn fixed_geolocation_reports_missing_coordinates() {
        let position = FixedGeolocation::parse("40.7128")
            .current_position(options())
            .await;
        assert_eq!(
            position,
            Ok(Position {
                latitude: Some(40.7128),
                longitude: None,
            })
        );

        let position = FixedGeolocation::parse("north,NaN")
            .current_position(options())
            .await;
        assert_eq!(position, Ok(Position::default()));
    }
}
