use super::{Geolocation, Platform, Position, PositionError, PositionOptions, Screen};
use std::future::pending;

#[derive(Clone, Debug)]
pub enum StaticGeolocation {
    Fix(Position),
    Denied,
    Pending,
}

impl Geolocation for StaticGeolocation {
    async fn current_position(&self, _options: PositionOptions) -> Result<Position, PositionError> {
        match self {
            StaticGeolocation::Fix(position) => Ok(*position),
            StaticGeolocation::Denied => Err(PositionError::PermissionDenied),
            StaticGeolocation::Pending => pending().await,
        }
    }
}

/// Browser-like platform with fixed answers.
#[derive(Clone, Debug)]
pub struct StaticPlatform {
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub languages: Option<Vec<String>>,
    pub timezone: Option<String>,
    pub screen: Option<Screen>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    pub touch_support: bool,
    pub cookie_enabled: bool,
    pub session_storage: bool,
    pub local_storage: bool,
    pub geolocation: Option<StaticGeolocation>,
}

impl Default for StaticPlatform {
    fn default() -> Self {
        Self {
            user_agent: Some("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".to_string()),
            language: Some("pt-BR".to_string()),
            languages: Some(vec!["pt-BR".to_string(), "en".to_string()]),
            timezone: Some("America/Sao_Paulo".to_string()),
            screen: Some(Screen {
                width: 1920,
                height: 1080,
                color_depth: 24,
                orientation: Some("landscape-primary".to_string()),
            }),
            hardware_concurrency: Some(8),
            device_memory: Some(8.0),
            touch_support: false,
            cookie_enabled: true,
            session_storage: true,
            local_storage: true,
            geolocation: Some(StaticGeolocation::Denied),
        }
    }
}

impl Platform for StaticPlatform {
    type Geolocation = StaticGeolocation;

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn languages(&self) -> Option<Vec<String>> {
        self.languages.clone()
    }

    fn timezone(&self) -> Option<String> {
        self.timezone.clone()
    }

    fn screen(&self) -> Option<Screen> {
        self.screen.clone()
    }

    fn hardware_concurrency(&self) -> Option<u32> {
        self.hardware_concurrency
    }

    fn device_memory(&self) -> Option<f64> {
        self.device_memory
    }

    fn touch_support(&self) -> bool {
        self.touch_support
    }

    fn cookie_enabled(&self) -> bool {
        self.cookie_enabled
    }

    fn session_storage(&self) -> bool {
        self.session_storage
    }

    fn local_storage(&self) -> bool {
        self.local_storage
    }

    fn geolocation(&self) -> Option<&StaticGeolocation> {
        self.geolocation.as_ref()
    }
}
