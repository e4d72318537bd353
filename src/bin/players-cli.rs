use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "players-cli")]
#[command(about = "Client for a running player-server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8888")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every stored player
    List,
    /// Create a player
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        win_msg: Option<String>,
        #[arg(long)]
        lose_msg: Option<String>,
    },
    /// Fetch the index page
    Index,
}

/// Form body for a create request. Values are sent as typed: the server
/// does not percent-decode, so a value containing `&` would split into
/// extra fields and is refused instead.
fn create_body(
    name: &str,
    win_msg: Option<&str>,
    lose_msg: Option<&str>,
) -> Result<String, String> {
    let fields = [("name", Some(name)), ("win_msg", win_msg), ("lose_msg", lose_msg)];

    let mut pairs = Vec::new();
    for (key, value) in fields {
        let Some(value) = value else { continue };
        if value.contains('&') {
            return Err(format!("--{} must not contain '&': {:?}", key.replace('_', "-"), value));
        }
        pairs.push(format!("{}={}", key, value));
    }
    Ok(pairs.join("&"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/players", base)).send().await?,
        Commands::Create {
            name,
            win_msg,
            lose_msg,
        } => {
            let body = create_body(&name, win_msg.as_deref(), lose_msg.as_deref())?;
            client
                .post(format!("{}/players", base))
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(body)
                .send()
                .await?
        }
        Commands::Index => client.get(format!("{}/", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprint!("{}", text);
        return Ok(ExitCode::FAILURE);
    }

    print!("{}", text);
    Ok(ExitCode::SUCCESS)
}
