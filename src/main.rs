use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotdash::{config, error, server, spotify, success, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the API proxy and the dashboard (default)
    Serve(ServeOptions),

    /// Request an application token with the client credentials grant
    AppToken,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Address to listen on, overrides SERVER_ADDRESS
    #[clap(long)]
    addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let mut config = config::Config::from_env();

    match cli.command.unwrap_or(Command::Serve(ServeOptions::default())) {
        Command::Serve(opt) => {
            if let Some(addr) = opt.addr {
                config.server_address = addr;
            }
            server::start_api_server(&config).await
        }
        Command::AppToken => match spotify::request_app_token(&config).await {
            Ok(token) => {
                success!(
                    "Application token acquired (expires in {}s)",
                    token.expires_in
                );
                println!("{}", token.access_token);
            }
            Err(e) => error!("{}", e),
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
