/// Terminal front end: menu text and line prompts.
pub mod menu;
pub mod prompt;
