use clap::{Parser, Subcommand};
use concierge::channels::ConsoleChannel;
use concierge::{Coordinator, Message};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Reference messages fed through the pipeline by `concierge demo`.
const DEMO_MESSAGES: &[(&str, &str)] = &[
    ("User1", "Hola"),
    ("User2", "Precio del producto A?"),
    ("User3", "Quiero una reserva"),
    ("U4", "xyz unrelated"),
    ("UsuarioAlfa", "Hola, ¿qué tal?"),
    ("UsuarioBeta", "Quiero saber el precio del producto X"),
    ("UsuarioGamma", "Necesito hacer una reserva para mañana"),
    ("UsuarioDelta", "¿Venden bicicletas?"),
    ("UsuarioEpsilon", "blablabla"),
];

#[derive(Parser)]
#[command(name = "concierge")]
#[command(about = "Concierge CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config file with the built-in keyword rules.
    Init {
        /// Config file path (default: CONCIERGE_CONFIG_PATH or ~/.concierge/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Print the intent a text would be classified as.
    Classify {
        /// Message text to classify
        text: String,

        /// Config file path (default: CONCIERGE_CONFIG_PATH or ~/.concierge/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Route the built-in example messages through the pipeline and print the replies.
    Demo {
        /// Config file path (default: CONCIERGE_CONFIG_PATH or ~/.concierge/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Route each line typed on stdin as a message (interactive).
    Chat {
        /// Config file path (default: CONCIERGE_CONFIG_PATH or ~/.concierge/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// Sender id attached to every message; replies are addressed to it.
        #[arg(long, value_name = "ID", default_value = "console")]
        sender: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("concierge {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Classify { text, config }) => {
            if let Err(e) = run_classify(config, &text) {
                log::error!("classify failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Demo { config }) => {
            if let Err(e) = run_demo(config).await {
                log::error!("demo failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Chat { config, sender }) => {
            if let Err(e) = run_chat(config, sender).await {
                log::error!("chat failed: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(concierge::config::default_config_path);
    let dir = concierge::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

fn build_coordinator(config_path: Option<std::path::PathBuf>) -> anyhow::Result<Coordinator> {
    let (config, path) = concierge::config::load_config(config_path)?;
    log::debug!("using config {}", path.display());
    Coordinator::from_config(&config, Arc::new(ConsoleChannel::new()))
}

fn run_classify(config_path: Option<std::path::PathBuf>, text: &str) -> anyhow::Result<()> {
    let coordinator = build_coordinator(config_path)?;
    println!("{}", coordinator.classifier().classify(text));
    Ok(())
}

async fn run_demo(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let coordinator = build_coordinator(config_path)?;
    let (inbound_tx, inbound_rx) = mpsc::channel(DEMO_MESSAGES.len());
    for (sender, text) in DEMO_MESSAGES {
        inbound_tx.send(Message::new(*sender, *text)).await?;
    }
    drop(inbound_tx);
    let stats = coordinator.run(inbound_rx).await;
    if stats.failed > 0 {
        anyhow::bail!("{} of {} message(s) failed", stats.failed, DEMO_MESSAGES.len());
    }
    Ok(())
}

async fn run_chat(config_path: Option<std::path::PathBuf>, sender: String) -> anyhow::Result<()> {
    use std::io::{self, Write};

    let coordinator = build_coordinator(config_path)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("/exit") || input.eq_ignore_ascii_case("/quit") {
            break;
        }

        if let Err(e) = coordinator.handle(Message::new(sender.as_str(), input)).await {
            eprintln!("chat error: {}", e);
        }
    }

    Ok(())
}
