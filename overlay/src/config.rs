use envconfig::Envconfig;

use crate::controller::OverlayOptions;

#[derive(Envconfig, Clone, Debug)]
pub struct OverlayConfig {
    #[envconfig(default = "0")]
    pub popup_offset_x: f64,

    #[envconfig(default = "8")]
    pub popup_offset_y: f64,
}

impl From<OverlayConfig> for OverlayOptions {
    fn from(config: OverlayConfig) -> Self {
        OverlayOptions {
            offset_x: config.popup_offset_x,
            offset_y: config.popup_offset_y,
        }
    }
}
