use crate::context::{INDENT, NEWLINE};
use crate::options::{EmitOptions, IndentStyle, LineEnding};

/// Apply the configured line endings and indentation to finished output
pub fn normalize(text: &str, options: &EmitOptions) -> String {
    let mut output = match options.line_ending {
        LineEnding::Lf => text.replace(NEWLINE, "\n"),
        LineEnding::Crlf => text.to_string(),
    };

    if let IndentStyle::Spaces(width) = options.indent {
        output = output.replace(INDENT, &" ".repeat(usize::from(width)));
    }

    output
}
