use crate::app::commands::{parse_command, Command};
use crate::app::screens::render;
use crate::core::wizard::Session;
use crate::domain::ports::{LocalityResolver, PriceEstimator};
use crate::utils::error::{Result, WizardError};
use crate::utils::format::format_currency;
use std::io::{BufRead, Write};

/// 逐行讀取輸入、每次動作後重新輸出畫面的互動迴圈
pub struct TerminalWizard<'a, R: BufRead, W: Write> {
    input: R,
    output: W,
    resolver: &'a dyn LocalityResolver,
    estimator: &'a dyn PriceEstimator,
}

impl<'a, R: BufRead, W: Write> TerminalWizard<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        resolver: &'a dyn LocalityResolver,
        estimator: &'a dyn PriceEstimator,
    ) -> Self {
        Self {
            input,
            output,
            resolver,
            estimator,
        }
    }

    /// 執行到使用者離開或輸入結束為止，回傳最後的 session
    pub async fn run(&mut self, mut session: Session) -> Result<Session> {
        loop {
            write!(self.output, "{}", render(&session)?)?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                writeln!(self.output)?;
                tracing::debug!("Input closed, leaving the wizard");
                return Ok(session);
            }

            // 非 UTF-8 的一行只算輸入錯誤，不結束整個 session
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    self.report(&WizardError::InvalidFieldValue {
                        field: "input".to_string(),
                        reason: format!(
                            "'{}' is not valid UTF-8",
                            String::from_utf8_lossy(e.as_bytes()).trim_end()
                        ),
                    })?;
                    continue;
                }
            };

            let command = match parse_command(session.page(), &line) {
                Ok(command) => command,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };

            let outcome = match command {
                Command::Quit => {
                    writeln!(self.output, "👋 Bye!")?;
                    return Ok(session);
                }
                Command::Navigate(nav) => session.navigate(nav).map(|_| ()),
                Command::Edit(edit) => session.apply(edit, self.resolver),
                Command::Predict => {
                    writeln!(self.output, "⏳ Asking the prediction service...")?;
                    self.output.flush()?;
                    session.predict(self.estimator).await.and_then(|record| {
                        writeln!(
                            self.output,
                            "✅ Estimated price: {}",
                            format_currency(record.value)
                        )?;
                        Ok(())
                    })
                }
            };

            if let Err(e) = outcome {
                self.report(&e)?;
            }
        }
    }

    fn report(&mut self, error: &WizardError) -> Result<()> {
        tracing::debug!("Action failed: {} (Category: {:?})", error, error.category());
        writeln!(self.output, "❌ {}", error.user_friendly_message())?;
        writeln!(self.output, "💡 {}", error.recovery_suggestion())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wizard::Page;
    use crate::domain::model::PropertyDraft;
    use async_trait::async_trait;
    use std::io::Cursor;

    struct OneLocality;

    impl LocalityResolver for OneLocality {
        fn resolve(&self, postal_code: u32) -> Option<String> {
            (postal_code == 1000).then(|| "Bruxelles".to_string())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl PriceEstimator for Unreachable {
        async fn predict(&self, _draft: &PropertyDraft) -> Result<f64> {
            Err(WizardError::UnexpectedFormat {
                body: "{}".to_string(),
            })
        }
    }

    #[test]
    fn test_quit_from_welcome() {
        let input = Cursor::new("q\n");
        let mut output = Vec::new();
        let session = tokio_test::block_on(
            TerminalWizard::new(input, &mut output, &OneLocality, &Unreachable)
                .run(Session::new()),
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Welcome to Our Prediction App!"));
        assert!(text.contains("👋 Bye!"));
        assert_eq!(session.page(), Page::Welcome);
    }

    #[test]
    fn test_bad_input_is_reported_and_loop_continues() {
        let input = Cursor::new("\nback\nhello\n");
        let mut output = Vec::new();
        let session = tokio_test::block_on(
            TerminalWizard::new(input, &mut output, &OneLocality, &Unreachable)
                .run(Session::new()),
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        // "back" on step 1 returns to welcome, "hello" is then an unknown command there
        assert!(text.contains("❌ Invalid value for command: 'hello' is not available on the Welcome page"));
        assert!(text.contains("💡 "));
        assert_eq!(session.page(), Page::Welcome);
    }

    #[test]
    fn test_undecodable_line_is_reported_and_loop_continues() {
        let input = Cursor::new(b"s\nLi\xe8ge\n1000\nn\nq\n".to_vec());
        let mut output = Vec::new();
        let session = tokio_test::block_on(
            TerminalWizard::new(input, &mut output, &OneLocality, &Unreachable)
                .run(Session::new()),
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("❌ Invalid value for input: 'Li\u{FFFD}ge' is not valid UTF-8"));
        assert!(text.contains("The locality for postal code 1000 is: Bruxelles"));
        assert!(text.contains("👋 Bye!"));
        assert_eq!(session.page(), Page::Basics);
        assert_eq!(session.draft().locality_name, "Bruxelles");
    }
}
