//! Plain-text rendering of scenarios and events

use std::fmt::Write;

use typewriter_core::{Cursor, Repeat, TypewriterEvent, ValidatedConfig};

/// One log line: time, event kind, the detail for that kind and the text.
pub fn event_line(time: u64, event: &TypewriterEvent, text: &str) -> String {
    let detail = match event {
        TypewriterEvent::Changed { action, cursor } | TypewriterEvent::Finished { action, cursor } => {
            format!("{:?} by {}", action.kind, cursor_label(cursor))
        }
        TypewriterEvent::Repeating { cursor } => cursor_label(cursor),
        TypewriterEvent::Blinking { cursor } => format!("cursor #{}", cursor),
        TypewriterEvent::Initialized
        | TypewriterEvent::Playing
        | TypewriterEvent::Paused
        | TypewriterEvent::Stopped => String::new(),
    };

    let mut line = format!("{:>7}ms  {:<11}", time, event.kind().as_str());
    if !detail.is_empty() {
        let _ = write!(line, "  {}", detail);
    }
    let _ = write!(line, "  {:?}", text);
    line
}

fn cursor_label(cursor: &Cursor) -> String {
    let name = if cursor.name.is_empty() {
        "cursor"
    } else {
        cursor.name.as_str()
    };
    match cursor.selection {
        Some(selection) => format!(
            "{}@{} [{}..{}]",
            name, cursor.position, selection.start, selection.end
        ),
        None => format!("{}@{}", name, cursor.position),
    }
}

fn repeat_label(repeat: Repeat) -> String {
    match repeat {
        Repeat::Never => "once".to_string(),
        Repeat::Forever => "forever".to_string(),
        Repeat::Times(times) => format!("{} passes", times),
    }
}

/// Multi-line summary printed by `typewriter check`.
pub fn summary(config: &ValidatedConfig) -> String {
    let total_delay: u64 = config.actions.iter().map(|action| action.delay_ms()).sum();

    let mut out = String::new();
    let _ = writeln!(out, "text:        {:?}", config.document.text());
    let _ = writeln!(out, "cursors:     {}", config.document.cursors().len());
    for cursor in config.document.cursors() {
        let _ = writeln!(out, "  - {}", cursor_label(cursor));
    }
    let _ = writeln!(
        out,
        "actions:     {} ({}ms per pass)",
        config.actions.len(),
        total_delay
    );
    let _ = writeln!(out, "blink after: {}ms", config.blink_after);
    let _ = writeln!(
        out,
        "repeat:      {} (delay {}ms)",
        repeat_label(config.repeat),
        config.repeat_delay
    );
    let _ = writeln!(out, "history:     {}", config.keep_history_for);
    let _ = write!(out, "auto play:   {}", config.auto_play);
    out
}
