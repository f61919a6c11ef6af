//! cliclack theme in Azure blue

use cliclack::ThemeState;
use console::Style;

#[derive(Debug, Clone, Default)]
pub struct AzfnTheme;

impl cliclack::Theme for AzfnTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().blue(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().blue().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().blue(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }
}

/// Install the theme for all prompts and spinners
pub fn init_theme() {
    cliclack::set_theme(AzfnTheme);
}
