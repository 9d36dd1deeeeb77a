use console::Style;
use once_cell::sync::Lazy;

pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static TERM: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static PAGE: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ACTIVE: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold());
