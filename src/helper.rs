use std::{
    fs::{read_to_string, OpenOptions},
    io::{BufRead, Write},
    path::Path,
    process::Command,
};

use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{parse_date, DdayError, Result, COLORS};

/// Trims the title and rejects an empty one.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DdayError::InvalidInput {
            message: "Title must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Accepts a 1-based palette index or a `#RRGGBB` colour.
pub fn parse_color(input: &str) -> Result<String> {
    let input = input.trim();

    if let Ok(index) = input.parse::<usize>() {
        return match index.checked_sub(1).and_then(|i| COLORS.get(i)) {
            Some(color) => Ok(color.to_string()),
            None => Err(DdayError::InvalidInput {
                message: format!("Palette index must be 1-{}, got {}", COLORS.len(), index),
            }),
        };
    }

    let is_hex = input.len() == 7
        && input.starts_with('#')
        && input[1..].chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        Ok(input.to_uppercase())
    } else {
        Err(DdayError::InvalidInput {
            message: format!("Invalid colour '{}': use 1-8 or #RRGGBB", input),
        })
    }
}

/// Optional date flag; missing means today.
pub fn parse_date_or(input: Option<&str>, today: chrono::NaiveDate) -> Result<chrono::NaiveDate> {
    match input {
        Some(value) => parse_date(value),
        None => Ok(today),
    }
}

/// Asks a yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, mut input: R, mut output: W) -> Result<bool> {
    write!(output, "{} [y/N]: ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Drops `#` comment lines from editor output and trims the rest.
pub fn strip_editor_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Opens `editor_cmd` on a temp file seeded with `existing` and returns the
/// edited memo.
pub fn edit_memo_in_editor(editor_cmd: &str, title: &str, existing: &str) -> Result<String> {
    let temp_file = Builder::new().suffix(".txt").tempfile()?;
    let temp_path = temp_file.path().to_path_buf();

    {
        let mut file = OpenOptions::new().write(true).open(&temp_path)?;
        writeln!(file, "# Memo for: {}", title)?;
        writeln!(file, "# Lines starting with # are ignored. Save and exit when done.")?;
        if !existing.is_empty() {
            writeln!(file, "{}", existing)?;
        }
    }

    info!("Opening editor to write memo. Save and exit when done...");
    launch_editor(editor_cmd, &temp_path)?;

    let content = read_to_string(&temp_path)?;
    Ok(strip_editor_comments(&content))
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| DdayError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let Some((program, extra)) = args.split_first() else {
        return Err(DdayError::EditorError {
            message: "Empty editor command".to_string(),
        });
    };

    debug!("Launching editor: {} {:?}", program, extra);
    let status = Command::new(program)
        .args(extra)
        .arg(file_path.as_os_str())
        .status()?;

    if !status.success() {
        return Err(DdayError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(validate_title("  Trip ").unwrap(), "Trip");
        assert!(matches!(
            validate_title("   ").unwrap_err(),
            DdayError::InvalidInput { .. }
        ));
    }

    #[test]
    fn colours_from_palette_or_hex() {
        assert_eq!(parse_color("1").unwrap(), "#FF6B6B");
        assert_eq!(parse_color("8").unwrap(), "#F7DC6F");
        assert_eq!(parse_color("#abcdef").unwrap(), "#ABCDEF");
        assert!(parse_color("0").is_err());
        assert!(parse_color("9").is_err());
        assert!(parse_color("red").is_err());
        assert!(parse_color("#12345").is_err());
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut out = Vec::new();
        assert!(confirm("Delete?", Cursor::new("y\n"), &mut out).unwrap());
        assert!(confirm("Delete?", Cursor::new("YES\n"), &mut out).unwrap());
        assert!(!confirm("Delete?", Cursor::new("\n"), &mut out).unwrap());
        assert!(!confirm("Delete?", Cursor::new("nope\n"), &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().starts_with("Delete? [y/N]: "));
    }

    #[test]
    fn editor_comments_removed() {
        let raw = "# Memo for: Trip\n# ignored\nPack passport\n  # also ignored\nBook hotel\n";
        assert_eq!(strip_editor_comments(raw), "Pack passport\nBook hotel");
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(parse_date_or(None, today).unwrap(), today);
        assert_eq!(
            parse_date_or(Some("2026-12-25"), today).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()
        );
    }
}
