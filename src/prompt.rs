//! Startup prompt for a fresh run

use std::io::{BufRead, Write};

use crate::error::{KeeperError, Result};

/// Ask for the number of addresses to keep
pub fn prompt_target_total<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u32> {
    write!(output, "Enter the desired number of kept IPs: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    line.trim()
        .parse::<u32>()
        .map_err(|_| KeeperError::InvalidInput("Please enter a number.".to_string()))
}
