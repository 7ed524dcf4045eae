use forecast_core::{LocationError, Prompt};
use inquire::{InquireError, Text};

/// Terminal prompts backed by `inquire`. Esc / Ctrl-C cancel collection.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> Result<String, LocationError> {
        Text::new(message.trim_end()).prompt().map_err(into_location_error)
    }
}

pub fn into_location_error(err: InquireError) -> LocationError {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            LocationError::Cancelled
        }
        other => LocationError::Input(other.to_string()),
    }
}
