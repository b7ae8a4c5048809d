use serde::Deserialize;

use crate::infra::config::{AppConfig, ComposerConfig, LogConfig, ServerConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub server: Option<FileServerConfig>,
    pub composer: Option<FileComposerConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(server) = self.server {
            server.merge_into(&mut config.server);
        }

        if let Some(composer) = self.composer {
            composer.merge_into(&mut config.composer);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileServerConfig {
    pub url: Option<String>,
    pub reconnect_delay_ms: Option<u64>,
}

impl FileServerConfig {
    fn merge_into(self, config: &mut ServerConfig) {
        if let Some(url) = self.url {
            config.url = url;
        }

        if let Some(delay_ms) = self.reconnect_delay_ms {
            config.reconnect_delay_ms = delay_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileComposerConfig {
    pub stop_typing_on_empty: Option<bool>,
}

impl FileComposerConfig {
    fn merge_into(self, config: &mut ComposerConfig) {
        if let Some(stop_typing_on_empty) = self.stop_typing_on_empty {
            config.stop_typing_on_empty = stop_typing_on_empty;
        }
    }
}
