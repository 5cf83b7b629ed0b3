use log::Level;

pub const SITE_TITLE: &str = "Solaire Inovações";
pub const SITE_DESCRIPTION: &str = "MICROGERAÇÃO | MINIGERAÇÃO | HOMOLOGAÇÃO";

/// Business WhatsApp line, international format.
// Placeholder: must be replaced with the real business line before deploying.
pub const WHATSAPP_NUMBER: &str = "+55 (00) 00000-0000";
pub const CONTACT_MESSAGE: &str = "Olá, quero saber mais sobre a Solari";

/// Quiet period after the last resize before scroll effects re-measure.
pub const SCROLL_REFRESH_DEBOUNCE_MS: u32 = 200;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose animation tracing when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
