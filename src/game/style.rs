//! Text styling for game output
//!
//! Produces ANSI SGR sequences; the browser client converts them to spans.

use crossterm::style::{Color, Stylize};

/// Presentation role of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// The player's own command, reflected back
    Echo,
    Heading,
    /// A command name in help output
    Command,
    /// A command that ends the session
    Danger,
    Hint,
    /// Room description body
    Narration,
    /// The named place in a room description
    Landmark,
    /// A notable feature inside narration
    Accent,
    Notice,
    Error,
}

const NARRATION: Color = Color::Rgb {
    r: 100,
    g: 150,
    b: 255,
};
const LANDMARK: Color = Color::Rgb {
    r: 50,
    g: 200,
    b: 50,
};

/// Wrap `text` in the styling for `tag`.
///
/// crossterm drops the colour codes (but not bold) when `NO_COLOR` is set in
/// the server's environment.
pub fn style(tag: Tag, text: &str) -> String {
    let styled = match tag {
        Tag::Echo => text.yellow().bold(),
        Tag::Notice => text.yellow(),
        Tag::Heading => text.cyan().bold(),
        Tag::Command | Tag::Accent => text.green(),
        Tag::Danger => text.red(),
        Tag::Hint => text.dark_grey(),
        Tag::Narration => text.with(NARRATION),
        Tag::Landmark => text.with(LANDMARK).bold(),
        Tag::Error => text.red().bold(),
    };
    styled.to_string()
}
