//! Interactive walk through the flow: one prompt per form field, repeated
//! until each page navigates away.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Result};
use client_core::{
    Dispatcher, Location, Navigator, OtpPage, PaymentPage, RegistrationPage, ResendOutcome,
    SubmitOutcome,
};
use shared::domain::Step;

use crate::render;

pub async fn run(dispatcher: &Dispatcher, mut navigator: Navigator) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());

    loop {
        let step = match navigator.current() {
            Location::External(_) => {
                render::location(&navigator);
                return Ok(());
            }
            Location::Route(step) => *step,
        };
        render::heading(step, navigator.href());

        match step {
            Step::Register => register(&mut prompter, dispatcher, &mut navigator).await?,
            Step::Payment => pay(&mut prompter, dispatcher, &mut navigator).await?,
            Step::VerifyOtp => verify(&mut prompter, dispatcher, &mut navigator).await?,
        }
    }
}

async fn register<R: BufRead>(
    prompter: &mut Prompter<R>,
    dispatcher: &Dispatcher,
    navigator: &mut Navigator,
) -> Result<()> {
    let mut page = RegistrationPage::default();
    loop {
        let fields = &mut page.fields;
        fields.first_name = prompter.ask("First name")?;
        fields.last_name = prompter.ask("Last name")?;
        fields.email = prompter.ask("Email")?;
        fields.address = prompter.ask("Address")?;
        fields.document = prompter.ask_path("Document file (optional)")?;
        fields.picture = prompter.ask_path("Picture file (optional)")?;
        fields.is_registered = prompter.confirm("Already registered?")?;

        let outcome = page.submit(dispatcher, navigator).await;
        render::status(page.status());
        if outcome.is_navigated() {
            return Ok(());
        }
    }
}

async fn pay<R: BufRead>(
    prompter: &mut Prompter<R>,
    dispatcher: &Dispatcher,
    navigator: &mut Navigator,
) -> Result<()> {
    let mut page = PaymentPage::default();
    loop {
        let fields = &mut page.fields;
        fields.amount = prompter.ask("Amount")?;
        fields.description = prompter.ask("Description")?;
        fields.first_name = prompter.ask("First name")?;
        fields.last_name = prompter.ask("Last name")?;

        let outcome = page.submit(dispatcher, navigator).await;
        render::status(page.status());
        if outcome.is_navigated() {
            return Ok(());
        }
    }
}

async fn verify<R: BufRead>(
    prompter: &mut Prompter<R>,
    dispatcher: &Dispatcher,
    navigator: &mut Navigator,
) -> Result<()> {
    let mut page = OtpPage::default();
    loop {
        page.fields.email = prompter.ask("Email")?;
        page.fields.otp = prompter.ask("OTP")?;

        let outcome = page.submit(dispatcher, navigator).await;
        render::status(page.status());
        if outcome.is_navigated() {
            return Ok(());
        }
        if matches!(outcome, SubmitOutcome::Failed(_)) && page.resend_prompt().is_some() {
            resend(prompter, dispatcher, &mut page).await?;
        }
    }
}

async fn resend<R: BufRead>(
    prompter: &mut Prompter<R>,
    dispatcher: &Dispatcher,
    page: &mut OtpPage,
) -> Result<()> {
    while page.resend_prompt().is_some() {
        if !prompter.confirm("Resend OTP?")? {
            page.close_resend();
            return Ok(());
        }
        let prompt = page.open_resend();
        prompt.first_name = prompter.ask("First name")?;
        prompt.last_name = prompter.ask("Last name")?;

        match page.submit_resend(dispatcher).await {
            Some(ResendOutcome::Sent(toast)) => {
                render::toast(&toast);
                prompter.ask_optional("Press Enter to dismiss")?;
                page.dismiss_toast();
            }
            Some(ResendOutcome::Invalid(err)) => println!("[error] {err}"),
            Some(ResendOutcome::Failed(message)) => println!("[error] {message}"),
            Some(ResendOutcome::Busy) | None => {}
        }
    }
    Ok(())
}

struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    fn new(input: R) -> Self {
        Self { input }
    }

    /// Empty answers are returned as-is; the page decides what is required.
    fn ask(&mut self, label: &str) -> Result<String> {
        print!("{label}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed before the flow finished");
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn ask_optional(&mut self, label: &str) -> Result<Option<String>> {
        let answer = self.ask(label)?;
        Ok((!answer.trim().is_empty()).then_some(answer))
    }

    fn ask_path(&mut self, label: &str) -> Result<Option<PathBuf>> {
        Ok(self.ask_optional(label)?.map(|p| PathBuf::from(p.trim())))
    }

    fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.ask(&format!("{label} [y/N]"))?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn prompter_reads_answers_in_order() {
        let mut prompter = Prompter::new(Cursor::new("Ada\n\n./me.png\r\nYes\n"));

        assert_eq!(prompter.ask("First name").expect("answer"), "Ada");
        assert_eq!(prompter.ask_path("Document").expect("answer"), None);
        assert_eq!(
            prompter.ask_path("Picture").expect("answer"),
            Some(PathBuf::from("./me.png"))
        );
        assert!(prompter.confirm("Already registered?").expect("answer"));
        assert!(prompter.ask("Anything").is_err());
    }
}
