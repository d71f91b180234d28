pub const POPUP_OPENED_COUNTER: &str = "overlay_popup_opened_total";
pub const POPUP_CLOSED_COUNTER: &str = "overlay_popup_closed_total";
pub const POPUP_POSITIONING_ERROR_COUNTER: &str = "overlay_popup_positioning_error_total";
