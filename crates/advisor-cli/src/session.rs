//! Interactive session loop
//!
//! Reads one line per turn and answers it. Exit words and EOF end the
//! session; blank lines are skipped; a failing turn is reported and the loop
//! keeps going.

use std::borrow::Cow;
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use crypto_advisor::{CryptoAdvisor, is_exit_command};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::display;

/// What to do with one line of input
#[derive(Debug, PartialEq, Eq)]
pub enum Turn {
    Exit,
    Skip,
    Query(String),
}

impl Turn {
    /// `None` means stdin was closed
    pub fn parse(line: Option<&str>) -> Self {
        let Some(line) = line else {
            return Self::Exit;
        };
        let line = line.trim();

        if line.is_empty() {
            Self::Skip
        } else if is_exit_command(line) {
            Self::Exit
        } else {
            Self::Query(line.to_string())
        }
    }
}

pub struct Session {
    advisor: Arc<CryptoAdvisor>,
}

impl Session {
    pub fn new(advisor: Arc<CryptoAdvisor>) -> Self {
        Self { advisor }
    }

    /// Answer one question on its own task so a panic stays inside the turn
    pub async fn answer(&self, query: String) -> Result<String> {
        let advisor = Arc::clone(&self.advisor);
        let response = tokio::spawn(async move { advisor.process_query(&query).await }).await?;
        Ok(response)
    }

    /// Run until an exit word, EOF or Ctrl-C. Input that is not valid UTF-8
    /// is decoded lossily; a failed reply write is logged and the loop goes on.
    pub async fn run<R, W>(&self, mut input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let name = self.advisor.name().to_string();
        let mut buf = Vec::new();

        loop {
            write!(out, "{}", display::prompt())?;
            out.flush()?;

            buf.clear();
            let read = tokio::select! {
                read = input.read_until(b'\n', &mut buf) => read,
                _ = tokio::signal::ctrl_c() => {
                    emit(out, &format!("\n\n{}", display::goodbye(&name)));
                    return Ok(());
                }
            };

            let line = match read {
                Ok(0) => None,
                Ok(_) => Some(decode_line(&buf)),
                Err(e) => {
                    tracing::error!(error = %e, "failed to read input");
                    emit(out, &display::turn_error(&e.to_string()));
                    return Err(e.into());
                }
            };

            match Turn::parse(line.as_deref()) {
                Turn::Exit => {
                    emit(out, &format!("\n{}", display::goodbye(&name)));
                    return Ok(());
                }
                Turn::Skip => {}
                Turn::Query(query) => {
                    let answered = tokio::select! {
                        answered = self.answer(query) => answered,
                        _ = tokio::signal::ctrl_c() => {
                            emit(out, &format!("\n\n{}", display::goodbye(&name)));
                            return Ok(());
                        }
                    };

                    match answered {
                        Ok(response) => emit(out, &display::reply(&name, &response)),
                        Err(e) => {
                            tracing::error!(error = %e, "query failed");
                            emit(out, &display::turn_error(&e.to_string()));
                        }
                    }
                }
            }
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let line = String::from_utf8_lossy(bytes);
    if matches!(line, Cow::Owned(_)) {
        tracing::warn!("input was not valid UTF-8; invalid bytes replaced");
    }
    line.into_owned()
}

/// Write one transcript line; a failure is logged and the turn moves on
fn emit<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
        tracing::error!(error = %e, "failed to write to terminal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_advisor::{DEGRADED_MESSAGE, MetricsTable, exchange::MockPriceProvider};

    fn session(provider: MockPriceProvider) -> Session {
        let advisor = CryptoAdvisor::new(MetricsTable::seed(), Arc::new(provider)).unwrap();
        Session::new(Arc::new(advisor))
    }

    async fn transcript(session: &Session, input: &str) -> String {
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_turn_parsing() {
        assert_eq!(Turn::parse(None), Turn::Exit);
        assert_eq!(Turn::parse(Some("   ")), Turn::Skip);
        assert_eq!(Turn::parse(Some("QUIT")), Turn::Exit);
        assert_eq!(Turn::parse(Some(" bye ")), Turn::Exit);
        assert_eq!(Turn::parse(Some(" help ")), Turn::Query("help".into()));
    }

    #[tokio::test]
    async fn test_session_stops_at_exit_word() {
        let session = session(MockPriceProvider::new());
        let out = transcript(&session, "help\n\nexit\nTell me about bitcoin\n").await;

        assert!(out.contains("I can help you with:"));
        assert!(out.contains("Goodbye! Happy investing!"));
        assert!(!out.contains("Details for Bitcoin"));
        // help, blank line, exit
        assert_eq!(out.matches("You:").count(), 3);
    }

    #[tokio::test]
    async fn test_session_ends_on_eof() {
        let session = session(MockPriceProvider::new());
        let out = transcript(&session, "Tell me about cardano").await;

        assert!(out.contains("Details for Cardano"));
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_session_keeps_going_after_invalid_utf8() {
        let session = session(MockPriceProvider::new());
        let mut out = Vec::new();
        let input: &[u8] = b"\xff\xfe bitcoin\nhelp\nexit\n";

        session.run(input, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Details for Bitcoin"));
        assert!(out.contains("I can help you with:"));
        assert!(out.contains("Goodbye!"));
    }

    /// Accepts prompts, refuses everything else
    #[derive(Default)]
    struct RepliesFail {
        prompts: usize,
    }

    impl Write for RepliesFail {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if String::from_utf8_lossy(buf).contains("You:") {
                self.prompts += 1;
                Ok(buf.len())
            } else {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_reply_write_does_not_end_session() {
        let session = session(MockPriceProvider::new());
        let mut out = RepliesFail::default();

        let result = session.run(&b"help\nTell me about cardano\nexit\n"[..], &mut out).await;

        assert!(result.is_ok());
        assert_eq!(out.prompts, 3);
    }

    #[tokio::test]
    async fn test_session_survives_provider_outage() {
        let session = session(MockPriceProvider::unavailable());
        let out = transcript(&session, "help\nprices\nbye\n").await;

        assert_eq!(out.matches(DEGRADED_MESSAGE).count(), 2);
        assert!(out.contains("Goodbye!"));
    }
}
