use clap::Parser;
use tokio::io::BufReader;
use weather_agent::app::Application;
use weather_agent::cli::Args;
use weather_agent::config::Config;
use weather_agent::core::error::AgentError;
use weather_agent::core::telemetry;
use weather_agent::providers::factory::ProviderFactory;
use weather_agent::responder::WeatherResponder;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("weather-agent: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AgentError> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let config = Config::resolve(&args)?;
    telemetry::init(config.log_level())?;

    let provider = ProviderFactory::new().create(&config.provider(), &config.provider_config())?;
    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        timeout_secs = ?config.request_timeout_secs,
        "starting weather agent"
    );

    let responder = WeatherResponder::new(provider, config.request_timeout());
    let mut app = Application::new(responder);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    app.run(stdin, &mut stdout).await
}
