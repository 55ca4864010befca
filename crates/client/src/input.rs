use std::io::{self, BufRead, Write};

use common::{checked_price, required_text, ProductField};

use crate::errors::ValidationError;

/// Line-oriented terminal: prompts go to the writer, answers come from the
/// reader.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one line without its line terminator.
    /// `Ok(None)` means the input is closed.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

pub fn parse_text(field: ProductField, raw: &str) -> Result<String, ValidationError> {
    Ok(required_text(field, raw)?)
}

pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    let price: f64 = raw
        .parse()
        .map_err(|_| ValidationError::PriceNotNumeric(raw.to_string()))?;
    Ok(checked_price(price)?)
}

pub fn parse_id(raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| ValidationError::IdNotNumeric(raw.to_string()))
}
