use serde::Deserialize;

pub const DEFAULT_FORM_ID: &str = "resenaForm";
pub const DEFAULT_MESSAGE_ID: &str = "resenaMessage";
pub const DEFAULT_SUCCESS_TEXT: &str = "Reseña enviada correctamente. Recargando...";
pub const DEFAULT_UNAUTHORIZED_TEXT: &str = "Debes iniciar sesión para escribir una reseña.";
pub const DEFAULT_ERROR_PREFIX: &str = "Error: ";
pub const DEFAULT_RELOAD_DELAY_MILLIS: u32 = 1200;

/// Element ids, feedback texts and the reload delay.
///
/// Deserialized from a plain JS object with camelCase keys; any key left
/// out falls back to its default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitterOptions {
    pub form_id: String,
    pub message_id: String,
    pub success_text: String,
    pub unauthorized_text: String,
    pub error_prefix: String,
    pub reload_delay_millis: u32,
}

// defaults
impl Default for SubmitterOptions {
    fn default() -> Self {
        SubmitterOptions {
            form_id: DEFAULT_FORM_ID.to_string(),
            message_id: DEFAULT_MESSAGE_ID.to_string(),
            success_text: DEFAULT_SUCCESS_TEXT.to_string(),
            unauthorized_text: DEFAULT_UNAUTHORIZED_TEXT.to_string(),
            error_prefix: DEFAULT_ERROR_PREFIX.to_string(),
            reload_delay_millis: DEFAULT_RELOAD_DELAY_MILLIS,
        }
    }
}
