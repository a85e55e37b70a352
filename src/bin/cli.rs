//! gridlink CLI Client
//!
//! Command-line interface for issuing single operations against a server.

use clap::{Parser, Subcommand};
use gridlink::{Config, Connector, Credentials, Pool, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// gridlink CLI
#[derive(Parser, Debug)]
#[command(name = "gridlink-cli")]
#[command(about = "CLI for a key/value data-grid server")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:40404")]
    server: String,

    /// Username for authentication
    #[arg(short, long, requires = "password")]
    username: Option<String>,

    /// Password for authentication
    #[arg(short, long, requires = "username")]
    password: Option<String>,

    /// Read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// Region name
        region: String,

        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// Region name
        region: String,

        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Remove a key
    Remove {
        /// Region name
        region: String,

        /// The key to remove
        key: String,
    },

    /// Count the entries in a region
    Size {
        /// Region name
        region: String,
    },

    /// List the keys in a region
    Keys {
        /// Region name
        region: String,
    },

    /// List the regions on the server
    Regions,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gridlink=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Config::builder()
        .server(&args.server)
        .max_sessions(1)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms);
    if let (Some(username), Some(password)) = (&args.username, &args.password) {
        builder = builder.credentials(Credentials::username_password(username, password));
    }
    let config = builder.build();

    tracing::debug!("gridlink CLI v{} connecting to {}", gridlink::VERSION, args.server);

    let connector = match Pool::connect(&config) {
        Ok(pool) => Connector::new(pool),
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&connector, args.command) {
        if e.is_authentication() {
            eprintln!("authentication failed: {}", e);
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }

    connector.pool().close();
}

fn run(connector: &Connector<std::net::TcpStream>, command: Commands) -> gridlink::Result<()> {
    match command {
        Commands::Get { region, key } => match connector.get(&region, key)? {
            Some(value) => println!("{}", render(&value)),
            None => println!("(nil)"),
        },
        Commands::Put { region, key, value } => {
            connector.put(&region, key, value)?;
            println!("OK");
        }
        Commands::Remove { region, key } => {
            connector.remove(&region, key)?;
            println!("OK");
        }
        Commands::Size { region } => println!("{}", connector.size(&region)?),
        Commands::Keys { region } => {
            for key in connector.key_set(&region)? {
                println!("{}", render(&key));
            }
        }
        Commands::Regions => {
            for region in connector.region_names()? {
                println!("{}", region);
            }
        }
    }
    Ok(())
}

fn render(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Byte(v) => format!("{:#04x}", v),
        Value::Bool(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Bytes(v) => format!("<{} bytes>", v.len()),
        Value::String(v) => format!("{:?}", v),
        Value::Object(fields) => format!("{:?}", fields),
    }
}
