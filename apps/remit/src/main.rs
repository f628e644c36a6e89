use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::DEFAULT_CONFIG_FILE, load_settings_from, Dispatcher, Navigator, OtpFields, OtpPage,
    PaymentFields, PaymentPage, RegistrationFields, RegistrationPage, ResendOutcome,
    SubmitOutcome,
};
use shared::domain::Step;
use tracing_subscriber::EnvFilter;

mod render;
mod walk;

#[derive(Parser, Debug)]
#[command(author, version, about = "Register, pay and verify an OTP against the remittance backends")]
struct Args {
    /// Settings file. Missing files fall back to defaults and APP__* variables.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit the registration form
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
        /// Identity document (pdf, doc, docx or image)
        #[arg(long)]
        document: Option<PathBuf>,
        /// Profile picture
        #[arg(long)]
        picture: Option<PathBuf>,
        #[arg(long)]
        registered: bool,
    },
    /// Submit the payment form
    Pay {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Verify an OTP and print the checkout URL
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
    /// Ask the backend for a new OTP
    ResendOtp {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Prompt for every page in turn, from registration to checkout
    Walk,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings_from(&args.config, |key| std::env::var(key).ok())
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?;
    let dispatcher = Dispatcher::new(settings)?;
    let routes = dispatcher.settings().routes.clone();

    match args.command {
        Command::Register {
            first_name,
            last_name,
            email,
            address,
            document,
            picture,
            registered,
        } => {
            let mut page = RegistrationPage::new(RegistrationFields {
                first_name,
                last_name,
                email,
                address,
                document,
                picture,
                is_registered: registered,
            });
            let mut navigator = Navigator::starting_at(routes, Step::Register);
            let outcome = page.submit(&dispatcher, &mut navigator).await;
            render::status(page.status());
            finish(outcome, &navigator)
        }
        Command::Pay {
            amount,
            description,
            first_name,
            last_name,
        } => {
            let mut page = PaymentPage::new(PaymentFields {
                amount,
                description,
                first_name,
                last_name,
            });
            let mut navigator = Navigator::starting_at(routes, Step::Payment);
            let outcome = page.submit(&dispatcher, &mut navigator).await;
            render::status(page.status());
            finish(outcome, &navigator)
        }
        Command::VerifyOtp { email, otp } => {
            let mut page = OtpPage::new(OtpFields { email, otp });
            let mut navigator = Navigator::starting_at(routes, Step::VerifyOtp);
            let outcome = page.submit(&dispatcher, &mut navigator).await;
            render::status(page.status());
            if page.resend_prompt().is_some() {
                println!("Run `remit resend-otp` to request a new code.");
            }
            finish(outcome, &navigator)
        }
        Command::ResendOtp {
            first_name,
            last_name,
        } => {
            let mut page = OtpPage::default();
            let prompt = page.open_resend();
            prompt.first_name = first_name;
            prompt.last_name = last_name;
            match page.submit_resend(&dispatcher).await {
                Some(ResendOutcome::Sent(toast)) => {
                    render::toast(&toast);
                    Ok(())
                }
                Some(ResendOutcome::Invalid(err)) => bail!(err),
                Some(ResendOutcome::Failed(message)) => bail!(message),
                Some(ResendOutcome::Busy) | None => bail!("resend form is not available"),
            }
        }
        Command::Walk => walk::run(&dispatcher, Navigator::new(routes)).await,
    }
}

fn finish(outcome: SubmitOutcome, navigator: &Navigator) -> Result<()> {
    match outcome {
        SubmitOutcome::Navigated(_) => {
            render::location(navigator);
            Ok(())
        }
        SubmitOutcome::Invalid(err) => bail!(err),
        SubmitOutcome::Failed(message) => bail!(message),
        SubmitOutcome::Busy => bail!("a request from this page is still in flight"),
    }
}
