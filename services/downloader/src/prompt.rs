//! Pre-download confirmation.

use std::io::{self, BufRead, Write};

/// Bytes per megabyte as reported to the operator.
const BYTES_PER_MB: f64 = 1_000_000.0;

/// Show the file count and expected size, then read a yes/no answer.
///
/// Only `y`, `Y` and `yes` proceed; anything else, including end of input,
/// declines.
pub fn confirm_download<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    files: usize,
    total_bytes: u64,
) -> io::Result<bool> {
    writeln!(output, "==> Number of requested files: {}", files)?;
    write!(
        output,
        "==> Requested download BEFORE domain reducing is ~ {} MB. Continue? [y|n] ",
        size_in_mb(total_bytes)
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Rounded to the nearest whole megabyte.
pub fn size_in_mb(bytes: u64) -> u64 {
    (bytes as f64 / BYTES_PER_MB).round() as u64
}

/// Printed when the operator declines.
pub fn print_goodbye<W: Write>(mut output: W) -> io::Result<()> {
    writeln!(output, "==================")?;
    writeln!(output, "===  Goodbye!  ===")?;
    writeln!(output, "==================")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> (bool, String) {
        let mut out = Vec::new();
        let proceed = confirm_download(Cursor::new(answer.to_string()), &mut out, 12, 96_400_000).unwrap();
        (proceed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_accepts_yes() {
        for answer in ["y\n", "Y\n", "yes\n", "  yes  \n"] {
            assert!(ask(answer).0, "{:?} should proceed", answer);
        }
    }

    #[test]
    fn test_declines_everything_else() {
        for answer in ["n\n", "\n", "", "YES\n", "sure\n"] {
            assert!(!ask(answer).0, "{:?} should decline", answer);
        }
    }

    #[test]
    fn test_prompt_reports_count_and_size() {
        let (_, text) = ask("n\n");
        assert!(text.contains("Number of requested files: 12"));
        assert!(text.contains("~ 96 MB"));
    }

    #[test]
    fn test_size_rounding() {
        assert_eq!(size_in_mb(0), 0);
        assert_eq!(size_in_mb(499_999), 0);
        assert_eq!(size_in_mb(500_000), 1);
        assert_eq!(size_in_mb(2_600_000), 3);
    }
}
