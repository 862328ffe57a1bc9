use hostcli::config::{AppConfig, ApplyToConfig};

use crate::cli::ClapCli;

impl ApplyToConfig for ClapCli {
    fn apply_to_config(&self, mut config: AppConfig) -> AppConfig {
        if let Some(rest_url) = self.rest_url.as_ref() {
            *config.rest_url_mut() = Some(rest_url.clone());
        }

        if let Some(token) = self.token.as_ref() {
            *config.token_mut() = Some(token.clone());
        }

        // Flags only ever switch these on (verbose) or off (colors)
        if self.verbose {
            *config.verbose_mut() = true;
        }
        if self.no_color {
            *config.use_colors_mut() = false;
        }

        config
    }
}
