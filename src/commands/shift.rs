//! `kara shift` - move every timestamp in an LRC file by a constant offset.

use std::path::PathBuf;

use anyhow::{bail, Result};

use kara::lrc::LrcDocument;
use kara::ui::Theme;

use crate::cli::ShiftArgs;

pub fn run(args: &ShiftArgs) -> Result<()> {
    let theme = Theme::default();

    let doc = LrcDocument::parse(&args.input)?;
    let timed = doc.timed_len();
    if timed == 0 {
        bail!(
            "no timestamped lyric lines found in {}",
            args.input.display()
        );
    }

    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output(&args.input),
    };

    println!("{}", theme.primary_text("Adjusting LRC timing..."));
    println!("  Input:  {}", args.input.display());
    println!("  Output: {}", output.display());
    println!(
        "  Offset: {}",
        theme.accent_text(&format!("{:+.2} seconds", args.offset))
    );
    let direction = if args.offset >= 0.0 {
        format!("lyrics will appear {:.2}s later", args.offset)
    } else {
        format!("lyrics will appear {:.2}s earlier", args.offset.abs())
    };
    println!("  {}", theme.secondary_text(&format!("({direction})")));
    println!();

    let shifted = doc.shifted(args.offset);
    shifted.write(&output)?;

    println!(
        "{}",
        theme.success_text(&format!("Adjusted {timed} timestamp(s)"))
    );
    println!(
        "{}",
        theme.success_text(&format!("Saved to: {}", output.display()))
    );
    println!();

    println!("{}", theme.bold_text("Preview (first 5 lines):"));
    for line in shifted.render().lines().filter(|l| !l.trim().is_empty()).take(5) {
        println!("  {line}");
    }

    Ok(())
}

/// `song.lrc` -> `song_adjusted.lrc`, next to the input.
fn default_output(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "lyrics".to_string());

    input.with_file_name(format!("{stem}_adjusted.lrc"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn default_output_appends_adjusted_suffix() {
        assert_eq!(
            default_output(Path::new("/lyrics/song.lrc")),
            PathBuf::from("/lyrics/song_adjusted.lrc")
        );
    }

    #[test]
    fn default_output_handles_bare_filename() {
        assert_eq!(
            default_output(Path::new("song.lrc")),
            PathBuf::from("song_adjusted.lrc")
        );
    }
}
