use clap::Parser;
use wapi_fixtures::utils::{logger, validation::Validate};
use wapi_fixtures::{CliConfig, Coord, Lookup, WapiClient, WapiError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ Lookup failed: {} (Severity: {:?})", e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.severity().exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), WapiError> {
    let config = cli.load()?;
    config.validate()?;

    let client = WapiClient::new(&config);
    tracing::debug!("Using API at {}", client.api_url());

    let result = match &cli.lookup {
        Lookup::GeoSearch { lat, lng, zoom } => {
            client.geo_search(Coord::new(*lat, *lng), zoom).await?
        }
        Lookup::FirmList { building_id, page } => client.firm_list(building_id, *page).await?,
        Lookup::FirmInfo { id } => client.firm_info(id).await?,
        Lookup::Poi => client.poi_coordinates().await?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
