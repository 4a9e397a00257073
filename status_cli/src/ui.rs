// Terminal rendering of status view frames
use colored::Colorize;
use status_core::{Frame, Line, Tone};

pub fn print_header(text: &str) {
    println!("\n{}", text.bold().cyan());
    println!("{}", "=".repeat(text.chars().count()).cyan());
}

pub fn styled(line: &Line) -> String {
    let text = line.text.as_str();
    match line.tone {
        Tone::Title => text.bold().white().to_string(),
        Tone::Muted => text.dimmed().to_string(),
        Tone::Healthy => text.green().bold().to_string(),
        Tone::Detail => text.white().to_string(),
        Tone::Alert => text.bright_red().bold().to_string(),
        Tone::AlertDetail => text.yellow().to_string(),
        Tone::AlertFaint => text.yellow().dimmed().to_string(),
    }
}

/// Print the state lines of a frame; the title is printed once as a header.
pub fn print_lines(frame: &Frame) {
    for line in &frame.lines {
        println!("{}", styled(line));
    }
}

pub fn print_frame(frame: &Frame) {
    print_header(&frame.title);
    print_lines(frame);
}
