/// Clipboard writes through the OSC 52 terminal escape.
///
/// The terminal decides whether to honour the request; nothing comes back,
/// so a copy is fire-and-forget.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::io::{self, Write};

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text))
}

pub fn copy_to<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

/// Copies via stdout; failures are logged, not reported
pub fn copy(text: &str) {
    match copy_to(&mut io::stdout(), text) {
        Ok(()) => log::debug!("Sent {} bytes to clipboard", text.len()),
        Err(e) => log::debug!("Clipboard write failed: {}", e),
    }
}
