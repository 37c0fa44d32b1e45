//! Menu, pause and results text
//!
//! Plain strings; the platform lays them out with whatever font it has.

use crate::consts::RESULTS_BOARD_SIZE;
use crate::store::ScoreRow;

pub const MENU_TEXT: &str =
    "ALIEN FORCE - DEMO\n\nEnter: Play   Esc: Quit\n\nWASD to move  *  Space/Click to shoot";

pub const PAUSED_TEXT: &str = "PAUSED\n\nEsc: Resume   R: Reset";

pub fn score_line(score: u32) -> String {
    format!("Score: {score}")
}

pub fn lives_line(lives: u8) -> String {
    format!("Lives: {lives}")
}

/// Game-over board with an optional top list
pub fn results_text(score: u32, rows: &[ScoreRow], now: u64) -> String {
    let mut board = format!("GAME OVER\n\nScore: {score}\n\n");
    if !rows.is_empty() {
        board.push_str(&format!("TOP {RESULTS_BOARD_SIZE}\n"));
        for (i, row) in rows.iter().enumerate() {
            board.push_str(&format!(
                "{}. {}  {}  ({})\n",
                i + 1,
                row.name,
                row.score,
                format_age(now, row.timestamp)
            ));
        }
        board.push('\n');
    }
    board.push_str("Enter: Play Again   Esc: Close");
    board
}

/// Format a timestamp relative to `now` (both Unix seconds)
pub fn format_age(now: u64, timestamp: u64) -> String {
    let diff_secs = now.saturating_sub(timestamp);
    let diff_mins = diff_secs / 60;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_days >= 1 {
        match diff_days {
            1 => "Yesterday".to_string(),
            d if d < 7 => format!("{d} days ago"),
            d => format!("{} weeks ago", d / 7),
        }
    } else if diff_hours >= 1 {
        if diff_hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{diff_hours} hours ago")
        }
    } else if diff_mins >= 1 {
        if diff_mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{diff_mins} mins ago")
        }
    } else {
        "Just now".to_string()
    }
}
